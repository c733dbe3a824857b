//! CLI execution context.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context as _, Result};
use pasapas_cache::Cache;
use pasapas_data::HttpStorefrontApi;
use pasapas_storefront::Storefront;

use crate::config::{CliConfig, CONFIG_NAMES};
use crate::output::Output;

/// Execution context for CLI commands.
pub struct Context {
    /// Effective configuration, environment overrides applied.
    pub config: CliConfig,
    /// File the configuration came from, if any.
    pub config_path: Option<PathBuf>,
    /// Output handler.
    pub output: Output,
    /// Working directory.
    pub cwd: PathBuf,
}

impl Context {
    /// Load context from config file.
    pub fn load(config_path: Option<&str>, output: Output) -> Result<Self> {
        let cwd = std::env::current_dir().context("Failed to get current directory")?;

        let (mut config, config_path) = match config_path {
            Some(path) => {
                let path = PathBuf::from(path);
                (CliConfig::load(&path)?, Some(path))
            }
            None => match find_config(&cwd) {
                Some(path) => (CliConfig::load(&path)?, Some(path)),
                None => (CliConfig::default(), None),
            },
        };
        config.apply_env(|name| std::env::var(name).ok());

        Ok(Self {
            config,
            config_path,
            output,
            cwd,
        })
    }

    /// Open the storefront over the configured backend and storage.
    pub fn storefront(&self) -> Result<Storefront> {
        let api = HttpStorefrontApi::new(self.config.api_config())
            .context("Failed to create the API client")?;

        let dir = self.config.storage_dir();
        let cache = Cache::open_dir(&dir)
            .with_context(|| format!("Failed to open storage at {}", dir.display()))?;

        let storefront = Storefront::open(Arc::new(api), cache)?
            .with_payment_key(self.config.payment.publishable_key.clone());
        Ok(storefront)
    }
}

/// Find a config file in the directory tree.
fn find_config(start: &Path) -> Option<PathBuf> {
    start.ancestors().find_map(|dir| {
        CONFIG_NAMES
            .iter()
            .map(|name| dir.join(name))
            .find(|path| path.is_file())
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_config_walks_up() {
        let root = tempfile::tempdir().unwrap();
        let nested = root.path().join("a").join("b");
        std::fs::create_dir_all(&nested).unwrap();
        std::fs::write(root.path().join(".pasapas.toml"), "").unwrap();

        assert_eq!(find_config(&nested), Some(root.path().join(".pasapas.toml")));
    }

    #[test]
    fn test_find_config_prefers_first_name() {
        let root = tempfile::tempdir().unwrap();
        std::fs::write(root.path().join("pasapas.json"), "{}").unwrap();
        std::fs::write(root.path().join("pasapas.toml"), "").unwrap();

        assert_eq!(find_config(root.path()), Some(root.path().join("pasapas.toml")));
    }
}
