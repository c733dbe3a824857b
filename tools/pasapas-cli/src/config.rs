//! CLI configuration.

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use pasapas_data::ApiConfig;
use serde::{Deserialize, Serialize};

/// Names looked up in each directory, in order.
pub const CONFIG_NAMES: [&str; 3] = ["pasapas.toml", ".pasapas.toml", "pasapas.json"];

/// CLI configuration file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CliConfig {
    /// Backend API.
    #[serde(default)]
    pub api: ApiSection,

    /// Local storage for the session token and the cart.
    #[serde(default)]
    pub storage: StorageSection,

    /// Hosted payment widget.
    #[serde(default)]
    pub payment: PaymentSection,
}

impl CliConfig {
    /// Load config from a file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        if path.extension().is_some_and(|ext| ext == "json") {
            serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse JSON config: {}", path.display()))
        } else {
            toml::from_str(&content)
                .with_context(|| format!("Failed to parse TOML config: {}", path.display()))
        }
    }

    /// Apply `PASAPAS_*` overrides read through `var`.
    pub fn apply_env<F>(&mut self, var: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = var("PASAPAS_API_URL") {
            self.api.base_url = url;
        }
        if let Some(dir) = var("PASAPAS_STORAGE_DIR") {
            self.storage.dir = Some(PathBuf::from(dir));
        }
        if let Some(key) = var("PASAPAS_PUBLISHABLE_KEY") {
            self.payment.publishable_key = Some(key);
        }
    }

    pub fn api_config(&self) -> ApiConfig {
        ApiConfig {
            base_url: self.api.base_url.clone(),
            products_path: self.api.products_path.clone(),
            timeout: Duration::from_secs(self.api.timeout_secs),
        }
    }

    /// Directory holding the persisted token and cart.
    pub fn storage_dir(&self) -> PathBuf {
        self.storage.dir.clone().unwrap_or_else(default_storage_dir)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiSection {
    #[serde(default = "default_base_url")]
    pub base_url: String,

    #[serde(default = "default_products_path")]
    pub products_path: String,

    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_base_url() -> String {
    "http://localhost:3000".to_string()
}

fn default_products_path() -> String {
    "/api/v1/products".to_string()
}

fn default_timeout_secs() -> u64 {
    15
}

impl Default for ApiSection {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            products_path: default_products_path(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StorageSection {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dir: Option<PathBuf>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PaymentSection {
    /// Publishable key of the payment provider.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub publishable_key: Option<String>,
}

/// Platform data directory for the shop.
fn default_storage_dir() -> PathBuf {
    if let Some(home) = std::env::var_os("HOME") {
        PathBuf::from(home).join(".local").join("share").join("pasapas")
    } else {
        std::env::temp_dir().join("pasapas")
    }
}

/// Generate a default pasapas.toml config file.
pub fn generate_default_config() -> String {
    r#"# Pas à Pas storefront configuration

[api]
base_url = "http://localhost:3000"
products_path = "/api/v1/products"
timeout_secs = 15

[storage]
# dir = "~/.local/share/pasapas"

[payment]
# publishable_key = "pk_test_..."
"#
    .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_fill_missing_sections() {
        let config: CliConfig = toml::from_str("[api]\nbase_url = \"https://api.pasapas.shop\"\n").unwrap();
        assert_eq!(config.api.base_url, "https://api.pasapas.shop");
        assert_eq!(config.api.products_path, "/api/v1/products");
        assert_eq!(config.api.timeout_secs, 15);
        assert!(config.payment.publishable_key.is_none());
    }

    #[test]
    fn test_generated_file_parses_to_defaults() {
        let config: CliConfig = toml::from_str(&generate_default_config()).unwrap();
        assert_eq!(config, CliConfig::default());
    }

    #[test]
    fn test_env_overrides() {
        let mut config = CliConfig::default();
        config.apply_env(|name| match name {
            "PASAPAS_API_URL" => Some("http://shop.test".to_string()),
            "PASAPAS_PUBLISHABLE_KEY" => Some("pk_live".to_string()),
            _ => None,
        });
        assert_eq!(config.api.base_url, "http://shop.test");
        assert_eq!(config.payment.publishable_key.as_deref(), Some("pk_live"));
        assert!(config.storage.dir.is_none());
    }

    #[test]
    fn test_load_json_and_timeout() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("pasapas.json");
        std::fs::write(&path, r#"{"api": {"timeout_secs": 3}, "storage": {"dir": "/tmp/pp"}}"#).unwrap();

        let config = CliConfig::load(&path).unwrap();
        assert_eq!(config.api_config().timeout, Duration::from_secs(3));
        assert_eq!(config.storage_dir(), PathBuf::from("/tmp/pp"));
    }
}
