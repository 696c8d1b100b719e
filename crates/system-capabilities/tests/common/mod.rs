use std::fs;
use std::io;
use std::path::Path;
use std::thread;
use std::time::Duration;

use system_capabilities::{SpaceQuery, VolumeSpace};
use tempfile::TempDir;

/// Builds a scratch directory with two files and one subdirectory.
pub fn sample_tree() -> TempDir {
    let dir = tempfile::tempdir().expect("create temp dir");
    fs::write(dir.path().join("notes.txt"), b"hello world").expect("write notes");
    fs::write(dir.path().join("photo.PNG"), PNG_BYTES).expect("write photo");
    fs::create_dir(dir.path().join("albums")).expect("create albums");
    dir
}

/// A 1x1 transparent PNG.
pub const PNG_BYTES: &[u8] = &[
    0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A, 0x00, 0x00, 0x00, 0x0D, 0x49, 0x48, 0x44,
    0x52, 0x00, 0x00, 0x00, 0x01, 0x00, 0x00, 0x00, 0x01, 0x08, 0x06, 0x00, 0x00, 0x00, 0x1F,
    0x15, 0xC4, 0x89, 0x00, 0x00, 0x00, 0x0A, 0x49, 0x44, 0x41, 0x54, 0x78, 0x9C, 0x63, 0x00,
    0x01, 0x00, 0x00, 0x05, 0x00, 0x01, 0x0D, 0x0A, 0x2D, 0xB4, 0x00, 0x00, 0x00, 0x00, 0x49,
    0x45, 0x4E, 0x44, 0xAE, 0x42, 0x60, 0x82,
];

/// Space query that blocks before answering, standing in for an unreachable share.
pub struct SlowSpace {
    pub delay: Duration,
}

impl SpaceQuery for SlowSpace {
    fn volume_space(&self, _path: &Path) -> io::Result<VolumeSpace> {
        thread::sleep(self.delay);
        Ok(VolumeSpace {
            total: 1024,
            free: 256,
        })
    }
}
