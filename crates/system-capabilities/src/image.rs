//! 图片预览：把图片文件编码为 data URI。

use std::fs::File;
use std::io::Read;
use std::path::Path;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use tracing::debug;

use crate::error::{FileSystemError, Result};
use crate::filesystem::FileSystemCapabilities;

/// 支持预览的扩展名（小写）及其 MIME 类型。
const IMAGE_TYPES: &[(&str, &str)] = &[
    ("jpg", "image/jpeg"),
    ("jpeg", "image/jpeg"),
    ("png", "image/png"),
    ("gif", "image/gif"),
    ("bmp", "image/bmp"),
    ("webp", "image/webp"),
];

/// 根据扩展名（不区分大小写）确定 MIME 类型。
pub fn image_mime_type(path: impl AsRef<Path>) -> Result<&'static str> {
    let extension = path
        .as_ref()
        .extension()
        .map(|ext| ext.to_string_lossy().to_lowercase());

    let Some(extension) = extension else {
        return Err(FileSystemError::UnsupportedFormat("(none)".to_string()));
    };

    IMAGE_TYPES
        .iter()
        .find(|(ext, _)| *ext == extension)
        .map(|(_, mime)| *mime)
        .ok_or_else(|| FileSystemError::UnsupportedFormat(format!(".{extension}")))
}

impl FileSystemCapabilities {
    /// 读取图片文件并返回 `data:<mime>;base64,<payload>`。
    pub fn get_image_data(&self, path: impl AsRef<Path>) -> Result<String> {
        let path = path.as_ref();
        let mime = image_mime_type(path)?;
        let data = self.read_image_bytes(path)?;

        debug!(path = %path.display(), bytes = data.len(), mime, "Encoding image preview");
        Ok(format!("data:{mime};base64,{}", STANDARD.encode(&data)))
    }

    fn read_image_bytes(&self, path: &Path) -> Result<Vec<u8>> {
        let read_error = |source: std::io::Error| FileSystemError::Read {
            path: path.display().to_string(),
            source,
        };

        let file = File::open(path).map_err(read_error)?;
        let size = file.metadata().map_err(read_error)?.len();
        let limit = self.config.image_size_limit();

        if let Some(limit) = limit {
            if size > limit {
                return Err(too_large(path, size, limit));
            }
        }

        let mut data = Vec::with_capacity(usize::try_from(size).unwrap_or_default());
        match limit {
            // 文件在检查之后仍可能增长，多读一个字节用于判断。
            Some(limit) => {
                file.take(limit.saturating_add(1))
                    .read_to_end(&mut data)
                    .map_err(read_error)?;
                if data.len() as u64 > limit {
                    return Err(too_large(path, data.len() as u64, limit));
                }
            }
            None => {
                let mut file = file;
                file.read_to_end(&mut data).map_err(read_error)?;
            }
        }

        Ok(data)
    }
}

fn too_large(path: &Path, size: u64, limit: u64) -> FileSystemError {
    FileSystemError::TooLarge {
        path: path.display().to_string(),
        size,
        limit,
    }
}
