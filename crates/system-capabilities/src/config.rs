use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::Context;
use serde::Deserialize;
type Result<T> = anyhow::Result<T>;

#[derive(Debug, Clone, Deserialize)]
pub struct CapabilitiesConfig {
    /// Upper bound for image previews; `0` disables the check.
    #[serde(default = "default_max_image_bytes")]
    pub max_image_bytes: u64,
    #[serde(default)]
    pub call_timeout_ms: Option<u64>,
    #[serde(default = "default_unix_root")]
    pub unix_root: PathBuf,
    #[serde(default)]
    pub opener: Option<OpenerConfig>,
}

impl CapabilitiesConfig {
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file: {}", path.display()))?;
        Self::from_str(&content)
            .with_context(|| format!("failed to parse config file: {}", path.display()))
    }

    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Result<Self> {
        toml::from_str(s).context("failed to deserialize capabilities config")
    }

    pub fn image_size_limit(&self) -> Option<u64> {
        (self.max_image_bytes > 0).then_some(self.max_image_bytes)
    }

    pub fn call_timeout(&self) -> Option<Duration> {
        self.call_timeout_ms.map(Duration::from_millis)
    }
}

impl Default for CapabilitiesConfig {
    fn default() -> Self {
        Self {
            max_image_bytes: default_max_image_bytes(),
            call_timeout_ms: None,
            unix_root: default_unix_root(),
            opener: None,
        }
    }
}

/// Replaces the platform's default-open command.
#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct OpenerConfig {
    pub program: String,
    #[serde(default)]
    pub args: Vec<String>,
}

fn default_max_image_bytes() -> u64 {
    64 * 1024 * 1024
}

fn default_unix_root() -> PathBuf {
    PathBuf::from("/")
}

#[cfg(test)]
mod tests {
    use super::{CapabilitiesConfig, OpenerConfig};
    use std::path::PathBuf;
    use std::time::Duration;

    #[test]
    fn test_parse_config() {
        let raw = r#"
max_image_bytes = 1048576
call_timeout_ms = 1500
unix_root = "/srv/share"

[opener]
program = "gio"
args = ["open"]
"#;

        let config = CapabilitiesConfig::from_str(raw).expect("config should parse");
        assert_eq!(config.image_size_limit(), Some(1_048_576));
        assert_eq!(config.call_timeout(), Some(Duration::from_millis(1500)));
        assert_eq!(config.unix_root, PathBuf::from("/srv/share"));
        assert_eq!(
            config.opener,
            Some(OpenerConfig {
                program: "gio".to_string(),
                args: vec!["open".to_string()],
            })
        );
    }

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = CapabilitiesConfig::from_str("").expect("empty config should parse");
        assert_eq!(config.image_size_limit(), Some(64 * 1024 * 1024));
        assert!(config.call_timeout().is_none());
        assert_eq!(config.unix_root, PathBuf::from("/"));
        assert!(config.opener.is_none());
    }

    #[test]
    fn test_zero_disables_image_limit() {
        let config = CapabilitiesConfig::from_str("max_image_bytes = 0").expect("config should parse");
        assert!(config.image_size_limit().is_none());
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        let err = CapabilitiesConfig::from_str("max_image_bytes = \"big\"")
            .expect_err("string size should be rejected");
        assert!(err.to_string().contains("capabilities config"));
    }
}
