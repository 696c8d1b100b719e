//! System Capabilities - 文件浏览器后端的系统能力封装。
//!
//! 该 crate 提供无状态的文件系统查询接口：驱动器枚举、目录浏览、元数据、
//! 图片预览、默认程序打开以及磁盘空间统计，供桥接层按方法名调用。

pub mod config;
pub mod disk;
pub mod dispatch;
pub mod error;
pub mod filesystem;
pub mod image;
pub mod launcher;
pub mod platform;

pub use config::{CapabilitiesConfig, OpenerConfig};
pub use disk::{NativeSpaceQuery, SpaceQuery, VolumeSpace};
pub use dispatch::METHODS;
pub use error::{FileSystemError, Result};
pub use filesystem::FileSystemCapabilities;
pub use fsbrowse_api_types::{DiskSpaceInfo, DiskSpaceReport, ErrorResponse, FileSystemItem};
pub use image::image_mime_type;
pub use launcher::default_opener;
pub use platform::Platform;
