//! Shared records marshalled between the filesystem backend and the frontend.

use serde::{Deserialize, Serialize};

const BYTES_PER_GB: f64 = 1024.0 * 1024.0 * 1024.0;

/// One filesystem entry: a file, a directory or a drive root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileSystemItem {
    pub key: String,
    pub label: String,
    pub path: String,
    pub name: String,
    pub is_directory: bool,
    /// Size in bytes, 0 for directories.
    pub size: i64,
    /// Last modification time in unix seconds.
    pub modified: i64,
    pub is_leaf: bool,
}

/// Aggregated disk usage snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiskSpaceInfo {
    pub total_bytes: u64,
    pub free_bytes: u64,
    pub used_bytes: u64,
    #[serde(rename = "totalSpaceGB")]
    pub total_space_gb: f64,
    #[serde(rename = "freeSpaceGB")]
    pub free_space_gb: f64,
    #[serde(rename = "usedSpaceGB")]
    pub used_space_gb: f64,
    pub usage_percent: f64,
}

impl DiskSpaceInfo {
    /// Derives the used and GB figures from raw byte counts.
    ///
    /// `free` is clamped to `total` so that `used_bytes + free_bytes == total_bytes`
    /// holds even when a volume reports more free space than capacity.
    #[must_use]
    pub fn from_bytes(total: u64, free: u64) -> Self {
        let free = free.min(total);
        let used = total - free;
        let usage_percent = if total == 0 {
            0.0
        } else {
            used as f64 / total as f64 * 100.0
        };

        Self {
            total_bytes: total,
            free_bytes: free,
            used_bytes: used,
            total_space_gb: total as f64 / BYTES_PER_GB,
            free_space_gb: free as f64 / BYTES_PER_GB,
            used_space_gb: used as f64 / BYTES_PER_GB,
            usage_percent,
        }
    }
}

/// Result of a disk usage query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum DiskSpaceReport {
    Available(DiskSpaceInfo),
    Unavailable { reason: String },
}

impl DiskSpaceReport {
    #[must_use]
    pub fn unavailable(reason: impl Into<String>) -> Self {
        Self::Unavailable {
            reason: reason.into(),
        }
    }

    #[must_use]
    pub fn info(&self) -> Option<&DiskSpaceInfo> {
        match self {
            Self::Available(info) => Some(info),
            Self::Unavailable { .. } => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub code: String,
    pub message: String,
}
