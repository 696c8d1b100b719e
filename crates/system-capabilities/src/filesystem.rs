//! 文件系统能力模块。
//!
//! 提供驱动器枚举、目录浏览、元数据查询等能力。所有操作都是无状态的，
//! 每次调用直接访问操作系统并把结果映射为 [`FileSystemItem`]。

use std::fs;
use std::path::Path;
use std::sync::Arc;
use std::time::UNIX_EPOCH;

use fsbrowse_api_types::FileSystemItem;
use tracing::{debug, info};

use crate::config::CapabilitiesConfig;
use crate::disk::{NativeSpaceQuery, SpaceQuery};
use crate::error::{FileSystemError, Result};
use crate::platform::Platform;

/// 文件系统能力接口。
#[derive(Clone)]
pub struct FileSystemCapabilities {
    pub(crate) config: Arc<CapabilitiesConfig>,
    pub(crate) platform: Platform,
    pub(crate) space: Arc<dyn SpaceQuery>,
}

impl FileSystemCapabilities {
    /// 使用默认配置创建实例。
    pub fn new() -> Self {
        Self::with_config(CapabilitiesConfig::default())
    }

    /// 使用指定配置创建实例，平台取编译目标平台。
    pub fn with_config(config: CapabilitiesConfig) -> Self {
        Self {
            config: Arc::new(config),
            platform: Platform::current(),
            space: Arc::new(NativeSpaceQuery),
        }
    }

    /// 替换平台标识。
    pub fn with_platform(mut self, platform: Platform) -> Self {
        self.platform = platform;
        self
    }

    /// 替换磁盘空间查询实现。
    pub fn with_space_query(mut self, space: impl SpaceQuery + 'static) -> Self {
        self.space = Arc::new(space);
        self
    }

    pub fn config(&self) -> &CapabilitiesConfig {
        &self.config
    }

    pub fn platform(&self) -> Platform {
        self.platform
    }

    /// 列出可访问的 Windows 驱动器（`A:\` 到 `Z:\`，按字母顺序）。
    ///
    /// 非 Windows 平台返回空列表；无法访问的驱动器直接跳过，从不报错。
    pub fn list_drives(&self) -> Vec<FileSystemItem> {
        if !self.platform.is_windows() {
            return Vec::new();
        }

        ('A'..='Z')
            .filter_map(|letter| {
                let root = format!("{letter}:\\");
                fs::metadata(&root).ok().map(|_| drive_item(letter))
            })
            .collect()
    }

    /// 列出目录的直接子项。
    ///
    /// 无法读取元数据的条目会被跳过；顺序与操作系统返回的顺序一致。
    pub fn list_directory(&self, path: impl AsRef<Path>) -> Result<Vec<FileSystemItem>> {
        let path = path.as_ref();
        info!(path = %path.display(), "Listing directory");

        let entries = fs::read_dir(path).map_err(|source| FileSystemError::DirectoryRead {
            path: path.display().to_string(),
            source,
        })?;

        let mut items = Vec::new();
        for entry in entries {
            let entry = match entry {
                Ok(entry) => entry,
                Err(err) => {
                    debug!(path = %path.display(), error = %err, "Skipping unreadable entry");
                    continue;
                }
            };

            let metadata = match entry.metadata() {
                Ok(metadata) => metadata,
                Err(err) => {
                    debug!(
                        entry = %entry.path().display(),
                        error = %err,
                        "Skipping entry without metadata"
                    );
                    continue;
                }
            };

            let name = entry.file_name().to_string_lossy().into_owned();
            let full_path = path.join(&name).to_string_lossy().into_owned();
            items.push(item_from_metadata(full_path, name, &metadata));
        }

        Ok(items)
    }

    /// 获取单个路径的元数据。
    pub fn stat_item(&self, path: impl AsRef<Path>) -> Result<FileSystemItem> {
        let path = path.as_ref();
        let metadata = fs::metadata(path).map_err(|source| FileSystemError::Stat {
            path: path.display().to_string(),
            source,
        })?;

        let full_path = path.to_string_lossy().into_owned();
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| full_path.clone());

        Ok(item_from_metadata(full_path, name, &metadata))
    }

    /// 列出根级条目：Windows 下为驱动器，其他平台为根目录内容。
    pub fn list_root_directories(&self) -> Result<Vec<FileSystemItem>> {
        if self.platform.is_windows() {
            return Ok(self.list_drives());
        }

        self.list_directory(&self.config.unix_root)
    }
}

impl Default for FileSystemCapabilities {
    fn default() -> Self {
        Self::new()
    }
}

fn drive_item(letter: char) -> FileSystemItem {
    let path = format!("{letter}:\\");
    let name = format!("{letter}:");
    FileSystemItem {
        key: path.clone(),
        label: name.clone(),
        path,
        name,
        is_directory: true,
        size: 0,
        modified: 0,
        is_leaf: false,
    }
}

fn item_from_metadata(path: String, name: String, metadata: &fs::Metadata) -> FileSystemItem {
    let is_directory = metadata.is_dir();
    FileSystemItem {
        key: path.clone(),
        label: name.clone(),
        path,
        name,
        is_directory,
        size: if is_directory {
            0
        } else {
            i64::try_from(metadata.len()).unwrap_or(i64::MAX)
        },
        modified: modified_unix_secs(metadata),
        is_leaf: !is_directory,
    }
}

/// 修改时间（Unix 秒），早于纪元时为负数，不可用时为 0。
fn modified_unix_secs(metadata: &fs::Metadata) -> i64 {
    let Ok(modified) = metadata.modified() else {
        return 0;
    };

    match modified.duration_since(UNIX_EPOCH) {
        Ok(after) => i64::try_from(after.as_secs()).unwrap_or(i64::MAX),
        Err(before) => -i64::try_from(before.duration().as_secs()).unwrap_or(i64::MAX),
    }
}
