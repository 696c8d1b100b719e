//! 按方法名调用文件系统能力。
//!
//! 桥接层把前端的调用（方法名 + JSON 参数）转交给这里，结果以 JSON 返回。

use anyhow::Context;
use serde::Serialize;
use serde_json::Value;

use crate::error::{FileSystemError, Result};
use crate::filesystem::FileSystemCapabilities;

/// 对外暴露的方法名。
pub const METHODS: &[&str] = &[
    "listDrives",
    "listDirectory",
    "statItem",
    "getImageData",
    "openWithDefaultApplication",
    "listRootDirectories",
    "getDiskSpaceInfo",
];

impl FileSystemCapabilities {
    /// 同步执行一次调用。
    pub fn invoke(&self, method: &str, params: &Value) -> Result<Value> {
        match method {
            "listDrives" => to_json(self.list_drives()),
            "listDirectory" => to_json(self.list_directory(path_param(method, params)?)?),
            "statItem" => to_json(self.stat_item(path_param(method, params)?)?),
            "getImageData" => to_json(self.get_image_data(path_param(method, params)?)?),
            "openWithDefaultApplication" => {
                self.open_with_default_application(path_param(method, params)?)?;
                Ok(Value::Null)
            }
            "listRootDirectories" => to_json(self.list_root_directories()?),
            "getDiskSpaceInfo" => to_json(self.get_disk_space_info()),
            other => Err(FileSystemError::UnknownMethod(other.to_string())),
        }
    }

    /// 在阻塞线程池上执行调用，配置了 `call_timeout_ms` 时超时返回 [`FileSystemError::Timeout`]。
    ///
    /// 超时后底层的阻塞调用仍会在后台运行直到操作系统返回。
    pub async fn invoke_async(&self, method: impl Into<String>, params: Value) -> Result<Value> {
        let this = self.clone();
        let method = method.into();
        let task = tokio::task::spawn_blocking(move || this.invoke(&method, &params));

        let joined = match self.config.call_timeout() {
            Some(limit) => tokio::time::timeout(limit, task)
                .await
                .map_err(|_| FileSystemError::Timeout(limit.as_millis() as u64))?,
            None => task.await,
        };

        joined.context("blocking call panicked or was cancelled")?
    }
}

fn to_json(value: impl Serialize) -> Result<Value> {
    Ok(serde_json::to_value(value).context("failed to serialize result")?)
}

/// 取出路径参数：`{"path": ..}`、`[..]` 或字符串。
fn path_param(method: &str, params: &Value) -> Result<String> {
    let path = match params {
        Value::String(path) => Some(path),
        Value::Array(items) => match items.first() {
            Some(Value::String(path)) => Some(path),
            _ => None,
        },
        Value::Object(map) => match map.get("path") {
            Some(Value::String(path)) => Some(path),
            _ => None,
        },
        _ => None,
    };

    path.cloned().ok_or_else(|| {
        FileSystemError::InvalidParams(format!("{method} expects a `path` string parameter"))
    })
}
