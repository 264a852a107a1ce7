//! Configuration for Recall
//!
//! Resolves where questions are stored and how to reach the explanation
//! service. Values come from a JSON file with per-field defaults, and a few
//! environment variables override the file.

use dirs::home_dir;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use url::Url;

use crate::error::{RecallError, Result};

/// Overrides the data directory (default `~/.recall`)
pub const HOME_ENV: &str = "RECALL_HOME";
/// Overrides the config file location (default `<data dir>/config.json`)
pub const CONFIG_ENV: &str = "RECALL_CONFIG";
/// Overrides `service.base_url`
pub const SERVICE_URL_ENV: &str = "RECALL_SERVICE_URL";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
  /// Where the question list is kept; defaults to the data root
  #[serde(default)]
  pub data_dir: Option<PathBuf>,
  #[serde(default)]
  pub service: ServiceConfig,
}

/// Explanation service connection settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceConfig {
  #[serde(default = "default_base_url")]
  pub base_url: String,
  #[serde(default = "default_timeout_secs")]
  pub timeout_secs: u64,
}

fn default_base_url() -> String {
  "http://localhost:5000".to_string()
}
fn default_timeout_secs() -> u64 {
  30
}

impl Default for ServiceConfig {
  fn default() -> Self {
    Self { base_url: default_base_url(), timeout_secs: default_timeout_secs() }
  }
}

/// The Recall data root (`$RECALL_HOME` or `~/.recall`)
pub fn data_root() -> Result<PathBuf> {
  // An empty override counts as unset
  if let Some(custom_root) = std::env::var(HOME_ENV).ok().filter(|v| !v.trim().is_empty()) {
    return Ok(PathBuf::from(custom_root));
  }

  let home = home_dir().ok_or_else(|| RecallError::config("could not find home directory"))?;
  Ok(home.join(".recall"))
}

impl Config {
  pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path)
      .map_err(|e| RecallError::config(format!("cannot read {}: {e}", path.display())))?;
    serde_json::from_str(&content)
      .map_err(|e| RecallError::config(format!("cannot parse {}: {e}", path.display())))
  }

  /// Load from `$RECALL_CONFIG`, then `<data root>/config.json`, then defaults,
  /// and apply environment overrides
  pub fn load() -> Result<Self> {
    let mut config = match std::env::var(CONFIG_ENV) {
      Ok(path) => Self::load_from_file(path)?,
      Err(_) => {
        let default_path = data_root()?.join("config.json");
        if default_path.exists() {
          Self::load_from_file(default_path)?
        } else {
          Self::default()
        }
      }
    };

    if let Ok(url) = std::env::var(SERVICE_URL_ENV) {
      config.service.base_url = url;
    }

    config.validate()?;
    tracing::debug!(?config, "loaded configuration");
    Ok(config)
  }

  pub fn validate(&self) -> Result<()> {
    let url = Url::parse(&self.service.base_url).map_err(|e| {
      RecallError::config(format!("service.base_url '{}' is invalid: {e}", self.service.base_url))
    })?;

    if !matches!(url.scheme(), "http" | "https") {
      return Err(RecallError::config(format!(
        "service.base_url must use http or https, got '{}'",
        url.scheme()
      )));
    }

    if self.service.timeout_secs == 0 {
      return Err(RecallError::config("service.timeout_secs must be greater than 0"));
    }

    Ok(())
  }

  /// Directory holding the question list
  pub fn data_dir(&self) -> Result<PathBuf> {
    match &self.data_dir {
      Some(dir) => Ok(dir.clone()),
      None => data_root(),
    }
  }
}
