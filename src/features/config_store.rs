// Config store - loads config.json and swaps it wholesale on reload

use std::path::{Path, PathBuf};
use std::sync::Arc;

use thiserror::Error;
use tokio::sync::RwLock;
use tracing::{error, info, warn};

use crate::models::config::WelcomerConfig;
use crate::utils::schema::Structure;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Holds the current config snapshot. Readers clone the `Arc`; reload replaces it.
pub struct ConfigStore {
    path: PathBuf,
    checker: Structure,
    current: RwLock<Option<Arc<WelcomerConfig>>>,
}

impl ConfigStore {
    /// Empty store; nothing is read until `reload`
    pub fn new(path: impl Into<PathBuf>, checker: Structure) -> Self {
        Self {
            path: path.into(),
            checker,
            current: RwLock::new(None),
        }
    }

    /// Create the store and do the startup load. A failed load leaves the store empty.
    pub async fn load(path: impl Into<PathBuf>, checker: Structure) -> Self {
        let store = Self::new(path, checker);
        if let Err(e) = store.reload().await {
            error!("Welcomer config not loaded: {}", e);
        }
        store
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Current snapshot, if any config has been loaded
    pub async fn get(&self) -> Option<Arc<WelcomerConfig>> {
        self.current.read().await.clone()
    }

    /// Re-read the file. On error the previous snapshot stays in effect.
    pub async fn reload(&self) -> Result<(), ConfigError> {
        let config = read_config(&self.path, &self.checker).await?;
        *self.current.write().await = Some(Arc::new(config));
        info!("Loaded welcomer config from {}", self.path.display());
        Ok(())
    }
}

async fn read_config(path: &Path, checker: &Structure) -> Result<WelcomerConfig, ConfigError> {
    let raw = tokio::fs::read_to_string(path)
        .await
        .map_err(|source| ConfigError::Io { path: path.to_path_buf(), source })?;
    parse_config(path, &raw, checker)
}

/// Parse and validate. Validation issues are logged only; bad fields render with defaults.
fn parse_config(path: &Path, raw: &str, checker: &Structure) -> Result<WelcomerConfig, ConfigError> {
    let parse_err = |source| ConfigError::Parse { path: path.to_path_buf(), source };

    let value: serde_json::Value = serde_json::from_str(raw).map_err(parse_err)?;
    for issue in checker.check(&value) {
        warn!("Invalid welcomer config value: {}", issue);
    }
    serde_json::from_value(value).map_err(parse_err)
}
