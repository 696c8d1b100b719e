//! 文件系统能力错误类型。

use fsbrowse_api_types::ErrorResponse;
use thiserror::Error;

/// 文件系统错误类型。
#[derive(Debug, Error)]
pub enum FileSystemError {
    #[error("failed to read directory {path}: {source}")]
    DirectoryRead {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to get file info {path}: {source}")]
    Stat {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("unsupported image format: {0}")]
    UnsupportedFormat(String),

    #[error("failed to read image file {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("image file {path} is too large: {size} bytes exceeds limit of {limit} bytes")]
    TooLarge { path: String, size: u64, limit: u64 },

    #[error("failed to launch default application `{program}`: {source}")]
    Launch {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("unknown method: {0}")]
    UnknownMethod(String),

    #[error("invalid params: {0}")]
    InvalidParams(String),

    #[error("call timed out after {0} ms")]
    Timeout(u64),

    #[error("internal error: {0}")]
    Other(#[from] anyhow::Error),
}

impl FileSystemError {
    /// 面向前端的稳定错误码。
    pub fn code(&self) -> &'static str {
        match self {
            Self::DirectoryRead { .. } => "DIRECTORY_READ_ERROR",
            Self::Stat { .. } => "STAT_ERROR",
            Self::UnsupportedFormat(_) => "UNSUPPORTED_FORMAT",
            Self::Read { .. } => "READ_ERROR",
            Self::TooLarge { .. } => "TOO_LARGE",
            Self::Launch { .. } => "LAUNCH_ERROR",
            Self::UnknownMethod(_) => "UNKNOWN_METHOD",
            Self::InvalidParams(_) => "INVALID_PARAMS",
            Self::Timeout(_) => "TIMEOUT",
            Self::Other(_) => "INTERNAL_ERROR",
        }
    }

    /// 转换为可序列化的错误响应。
    pub fn to_response(&self) -> ErrorResponse {
        ErrorResponse {
            code: self.code().to_string(),
            message: self.to_string(),
        }
    }
}

impl From<FileSystemError> for ErrorResponse {
    fn from(err: FileSystemError) -> Self {
        err.to_response()
    }
}

pub type Result<T> = std::result::Result<T, FileSystemError>;
