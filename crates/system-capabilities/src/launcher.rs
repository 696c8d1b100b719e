//! 使用系统默认程序打开文件。

use std::path::Path;
use std::process::{Command, Stdio};

use tracing::{info, warn};

use crate::config::OpenerConfig;
use crate::error::{FileSystemError, Result};
use crate::filesystem::FileSystemCapabilities;
use crate::platform::Platform;

/// 平台默认的打开命令，目标路径追加在参数末尾。
pub fn default_opener(platform: Platform) -> OpenerConfig {
    match platform {
        Platform::Windows => OpenerConfig {
            program: "cmd".to_string(),
            args: vec!["/C".to_string(), "start".to_string(), String::new()],
        },
        Platform::MacOs => OpenerConfig {
            program: "open".to_string(),
            args: Vec::new(),
        },
        Platform::Unix => OpenerConfig {
            program: "xdg-open".to_string(),
            args: Vec::new(),
        },
    }
}

impl FileSystemCapabilities {
    /// 启动默认程序打开 `path`，只等待进程创建成功，不等待其退出。
    pub fn open_with_default_application(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let opener = self
            .config
            .opener
            .clone()
            .unwrap_or_else(|| default_opener(self.platform));

        info!(
            program = %opener.program,
            args = ?opener.args,
            path = %path.display(),
            "launching default application"
        );

        let mut child = Command::new(&opener.program)
            .args(&opener.args)
            .arg(path)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|source| FileSystemError::Launch {
                program: opener.program.clone(),
                source,
            })?;

        // 后台回收子进程，避免残留僵尸进程。
        let program = opener.program;
        std::thread::spawn(move || {
            if let Err(err) = child.wait() {
                warn!(program = %program, error = %err, "failed to wait for opener process");
            }
        });

        Ok(())
    }
}
