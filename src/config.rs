//! Host configuration parsed from environment variables.
//!
//! - `PORT`: listen port, default 3000
//! - `PAGES_DIR`: directory holding `data.json` and the page images, default `pages`
//! - `SITE_DIR`: compiled viewer bundle with its `index.html`, default `site`

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use std::net::SocketAddr;
use std::path::PathBuf;

use overlay::consts::MANIFEST_URL;

pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_PAGES_DIR: &str = "pages";
pub const DEFAULT_SITE_DIR: &str = "site";

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid PORT '{value}': expected an integer in 0..=65535")]
    InvalidPort { value: String },
    #[error("{var} is set but empty")]
    EmptyDir { var: &'static str },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostConfig {
    pub port: u16,
    pub pages_dir: PathBuf,
    pub site_dir: PathBuf,
}

impl Default for HostConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            pages_dir: PathBuf::from(DEFAULT_PAGES_DIR),
            site_dir: PathBuf::from(DEFAULT_SITE_DIR),
        }
    }
}

impl HostConfig {
    /// Build config from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build config from an arbitrary variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let port = match lookup("PORT") {
            None => DEFAULT_PORT,
            Some(raw) => raw.trim().parse().map_err(|_| ConfigError::InvalidPort { value: raw })?,
        };
        Ok(Self {
            port,
            pages_dir: dir_var(&lookup, "PAGES_DIR", DEFAULT_PAGES_DIR)?,
            site_dir: dir_var(&lookup, "SITE_DIR", DEFAULT_SITE_DIR)?,
        })
    }

    #[must_use]
    pub fn bind_addr(&self) -> SocketAddr {
        SocketAddr::from(([0, 0, 0, 0], self.port))
    }

    /// On-disk location of the manifest served at `MANIFEST_URL`.
    #[must_use]
    pub fn manifest_path(&self) -> PathBuf {
        let file = MANIFEST_URL.rsplit('/').next().unwrap_or(MANIFEST_URL);
        self.pages_dir.join(file)
    }

    #[must_use]
    pub fn index_path(&self) -> PathBuf {
        self.site_dir.join("index.html")
    }
}

fn dir_var(
    lookup: &impl Fn(&str) -> Option<String>,
    var: &'static str,
    default: &str,
) -> Result<PathBuf, ConfigError> {
    match lookup(var) {
        None => Ok(PathBuf::from(default)),
        Some(value) if value.trim().is_empty() => Err(ConfigError::EmptyDir { var }),
        Some(value) => Ok(PathBuf::from(value)),
    }
}
