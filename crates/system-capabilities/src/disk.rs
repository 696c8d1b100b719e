//! 磁盘空间统计。

use std::io;
use std::path::{Path, PathBuf};

use fsbrowse_api_types::{DiskSpaceInfo, DiskSpaceReport};
use tracing::{debug, warn};

use crate::filesystem::FileSystemCapabilities;

/// 单个卷的容量与可用空间（字节）。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VolumeSpace {
    pub total: u64,
    /// 调用者可用的空闲字节数。
    pub free: u64,
}

/// 卷空间查询接口。
pub trait SpaceQuery: Send + Sync {
    fn volume_space(&self, path: &Path) -> io::Result<VolumeSpace>;
}

/// 基于系统调用的实现（Windows 为 `GetDiskFreeSpaceExW`，Unix 为 `statvfs`）。
#[derive(Debug, Clone, Copy, Default)]
pub struct NativeSpaceQuery;

impl SpaceQuery for NativeSpaceQuery {
    fn volume_space(&self, path: &Path) -> io::Result<VolumeSpace> {
        Ok(VolumeSpace {
            total: fs2::total_space(path)?,
            free: fs2::available_space(path)?,
        })
    }
}

impl FileSystemCapabilities {
    /// 汇总磁盘空间。
    ///
    /// Windows 下累加所有可访问驱动器，单个驱动器查询失败只记录日志；
    /// 其他平台统计配置的根目录所在卷。没有任何可用数据时返回
    /// [`DiskSpaceReport::Unavailable`]。
    pub fn get_disk_space_info(&self) -> DiskSpaceReport {
        let volumes: Vec<PathBuf> = if self.platform.is_windows() {
            self.list_drives()
                .into_iter()
                .map(|drive| PathBuf::from(drive.path))
                .collect()
        } else {
            vec![self.config.unix_root.clone()]
        };

        let report = self.aggregate_space(&volumes);
        if let DiskSpaceReport::Unavailable { reason } = &report {
            warn!(reason = %reason, "disk space unavailable");
        }
        report
    }

    fn aggregate_space(&self, volumes: &[PathBuf]) -> DiskSpaceReport {
        if volumes.is_empty() {
            return DiskSpaceReport::unavailable("no accessible volumes");
        }

        let mut total = 0u64;
        let mut free = 0u64;
        let mut queried = 0usize;
        let mut last_error = None;

        for volume in volumes {
            match self.space.volume_space(volume) {
                Ok(space) => {
                    debug!(
                        volume = %volume.display(),
                        total = space.total,
                        free = space.free,
                        "volume space queried"
                    );
                    total = total.saturating_add(space.total);
                    free = free.saturating_add(space.free.min(space.total));
                    queried += 1;
                }
                Err(err) => {
                    warn!(volume = %volume.display(), error = %err, "failed to get disk space");
                    last_error = Some(format!("{}: {err}", volume.display()));
                }
            }
        }

        if queried == 0 || total == 0 {
            let reason = match last_error {
                Some(err) => format!("disk space query failed for every volume ({err})"),
                None => "volumes report zero capacity".to_string(),
            };
            return DiskSpaceReport::unavailable(reason);
        }

        DiskSpaceReport::Available(DiskSpaceInfo::from_bytes(total, free))
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;
    use crate::config::CapabilitiesConfig;
    use crate::platform::Platform;

    const GB: u64 = 1024 * 1024 * 1024;

    #[derive(Default)]
    struct FakeSpace {
        volumes: HashMap<PathBuf, VolumeSpace>,
    }

    impl FakeSpace {
        fn with(mut self, path: &str, total: u64, free: u64) -> Self {
            self.volumes
                .insert(PathBuf::from(path), VolumeSpace { total, free });
            self
        }
    }

    impl SpaceQuery for FakeSpace {
        fn volume_space(&self, path: &Path) -> io::Result<VolumeSpace> {
            self.volumes
                .get(path)
                .copied()
                .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, "volume not mounted"))
        }
    }

    fn capabilities(space: FakeSpace) -> FileSystemCapabilities {
        FileSystemCapabilities::new()
            .with_platform(Platform::Windows)
            .with_space_query(space)
    }

    #[test]
    fn sums_volumes_and_skips_failures() {
        let fs = capabilities(
            FakeSpace::default()
                .with("C:\\", 500 * GB, 200 * GB)
                .with("D:\\", 100 * GB, 50 * GB),
        );

        let report = fs.aggregate_space(&[
            PathBuf::from("C:\\"),
            PathBuf::from("D:\\"),
            PathBuf::from("E:\\"),
        ]);

        let info = report.info().expect("space should be available");
        assert_eq!(info.total_bytes, 600 * GB);
        assert_eq!(info.free_bytes, 250 * GB);
        assert_eq!(info.used_bytes, 350 * GB);
        assert_eq!(info.used_bytes + info.free_bytes, info.total_bytes);
    }

    #[test]
    fn all_failures_are_unavailable() {
        let fs = capabilities(FakeSpace::default());
        let report = fs.aggregate_space(&[PathBuf::from("C:\\")]);

        match report {
            DiskSpaceReport::Unavailable { reason } => {
                assert!(reason.contains("volume not mounted"), "{reason}");
            }
            other => panic!("expected unavailable, got {other:?}"),
        }
    }

    #[test]
    fn no_volumes_is_unavailable() {
        let fs = capabilities(FakeSpace::default());
        assert_eq!(
            fs.aggregate_space(&[]),
            DiskSpaceReport::unavailable("no accessible volumes")
        );
    }

    #[test]
    fn zero_capacity_is_unavailable() {
        let fs = capabilities(FakeSpace::default().with("C:\\", 0, 0));
        assert_eq!(
            fs.aggregate_space(&[PathBuf::from("C:\\")]),
            DiskSpaceReport::unavailable("volumes report zero capacity")
        );
    }

    #[test]
    fn unix_reports_configured_root_volume() {
        let config = CapabilitiesConfig {
            unix_root: PathBuf::from("/data"),
            ..CapabilitiesConfig::default()
        };
        let fs = FileSystemCapabilities::with_config(config)
            .with_platform(Platform::Unix)
            .with_space_query(FakeSpace::default().with("/data", 100 * GB, 25 * GB));

        let report = fs.get_disk_space_info();
        let info = report.info().expect("space should be available");
        assert_eq!(info.total_bytes, 100 * GB);
        assert_eq!(info.usage_percent, 75.0);
    }

    #[test]
    fn native_query_reads_real_volume() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let space = NativeSpaceQuery
            .volume_space(dir.path())
            .expect("query temp volume");
        assert!(space.total > 0);
    }
}
