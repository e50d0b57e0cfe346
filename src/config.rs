//! Configuration file support.
//!
//! TOML configuration is read from, lowest priority first:
//! - XDG config: `~/.config/facefit/config.toml`
//! - Project-local: `.facefit.toml` (searched up the directory tree)
//! - An explicit file passed on the command line
//!
//! CLI flags are applied on top by the binaries.

use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::{debug, info, warn};

use crate::error::{Error, Result};
use crate::pipeline::DEFAULT_RECOMMENDATION_COUNT;

pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 5001;
/// Upper bound on requested recommendations.
pub const MAX_RECOMMENDATIONS: usize = 16;

#[derive(Debug, Default, Clone, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub recommendations: RecommendationConfig,
    pub output: OutputConfig,
}

#[derive(Debug, Default, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Address to bind.
    pub host: Option<String>,
    pub port: Option<u16>,
}

#[derive(Debug, Default, Clone, Deserialize)]
#[serde(default)]
pub struct RecommendationConfig {
    /// Styles returned per analysis.
    pub count: Option<usize>,
}

#[derive(Debug, Default, Clone, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Pretty-print JSON output.
    pub pretty: Option<bool>,
}

impl AppConfig {
    /// Load XDG and project-local configuration, then `explicit` if given.
    ///
    /// Missing implicit files are skipped. An explicit file that cannot be
    /// read or parsed is an error.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        let mut config = Self::default();

        if let Some(xdg_path) = xdg_config_path() {
            if xdg_path.exists() {
                info!("Loading XDG config: {}", xdg_path.display());
                if let Some(xdg_config) = load_optional(&xdg_path) {
                    config = xdg_config;
                }
            } else {
                debug!("XDG config not found: {}", xdg_path.display());
            }
        }

        if let Some(project_path) = find_project_config() {
            info!("Loading project config: {}", project_path.display());
            if let Some(project_config) = load_optional(&project_path) {
                config.merge(project_config);
            }
        }

        if let Some(path) = explicit {
            info!("Loading config: {}", path.display());
            config.merge(Self::from_file(path)?);
        }

        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content)
            .map_err(|e| Error::Config(format!("{}: {e}", path.display())))
    }

    pub fn validate(&self) -> Result<()> {
        if let Some(ref host) = self.server.host {
            if host.trim().is_empty() {
                return Err(Error::Config("server.host must not be empty".into()));
            }
        }
        if self.server.port == Some(0) {
            return Err(Error::Config("server.port must be non-zero".into()));
        }
        if let Some(count) = self.recommendations.count {
            if !(1..=MAX_RECOMMENDATIONS).contains(&count) {
                return Err(Error::Config(format!(
                    "recommendations.count must be 1-{MAX_RECOMMENDATIONS}, got {count}"
                )));
            }
        }
        Ok(())
    }

    /// Values from `other` override values in `self` when present.
    pub fn merge(&mut self, other: Self) {
        self.server.host = other.server.host.or_else(|| self.server.host.take());
        self.server.port = other.server.port.or(self.server.port);
        self.recommendations.count = other
            .recommendations
            .count
            .or(self.recommendations.count);
        self.output.pretty = other.output.pretty.or(self.output.pretty);
    }

    pub fn host(&self) -> &str {
        self.server.host.as_deref().unwrap_or(DEFAULT_HOST)
    }

    pub fn port(&self) -> u16 {
        self.server.port.unwrap_or(DEFAULT_PORT)
    }

    pub fn recommendation_count(&self) -> usize {
        self.recommendations
            .count
            .unwrap_or(DEFAULT_RECOMMENDATION_COUNT)
    }

    pub fn pretty(&self) -> bool {
        self.output.pretty.unwrap_or(true)
    }
}

fn xdg_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("facefit").join("config.toml"))
}

fn find_project_config() -> Option<PathBuf> {
    let cwd = std::env::current_dir().ok()?;
    find_config_in_parents(&cwd)
}

/// Search for `.facefit.toml` in the given directory and its parents.
fn find_config_in_parents(start: &Path) -> Option<PathBuf> {
    start
        .ancestors()
        .map(|dir| dir.join(".facefit.toml"))
        .find(|path| path.exists())
}

fn load_optional(path: &Path) -> Option<AppConfig> {
    match AppConfig::from_file(path) {
        Ok(config) => Some(config),
        Err(e) => {
            warn!("Ignoring config file {}: {}", path.display(), e);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = AppConfig::default();
        assert_eq!(config.host(), "0.0.0.0");
        assert_eq!(config.port(), 5001);
        assert_eq!(config.recommendation_count(), 4);
        assert!(config.pretty());
    }

    #[test]
    fn parse_full_config() {
        let toml = r#"
[server]
host = "127.0.0.1"
port = 8080

[recommendations]
count = 3

[output]
pretty = false
"#;
        let config: AppConfig = toml::from_str(toml).unwrap();
        assert_eq!(config.host(), "127.0.0.1");
        assert_eq!(config.port(), 8080);
        assert_eq!(config.recommendation_count(), 3);
        assert!(!config.pretty());
        config.validate().unwrap();
    }

    #[test]
    fn merge_prefers_override() {
        let mut base: AppConfig = toml::from_str(
            r#"
[server]
port = 9000

[recommendations]
count = 2
"#,
        )
        .unwrap();
        let over: AppConfig = toml::from_str("[recommendations]\ncount = 5\n").unwrap();
        base.merge(over);

        assert_eq!(base.port(), 9000);
        assert_eq!(base.recommendation_count(), 5);
    }

    #[test]
    fn rejects_bad_values() {
        let zero: AppConfig = toml::from_str("[recommendations]\ncount = 0\n").unwrap();
        assert!(matches!(zero.validate(), Err(Error::Config(_))));

        let port: AppConfig = toml::from_str("[server]\nport = 0\n").unwrap();
        assert!(port.validate().is_err());

        let host: AppConfig = toml::from_str("[server]\nhost = \" \"\n").unwrap();
        assert!(host.validate().is_err());
    }

    #[test]
    fn finds_config_in_parent() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("a").join("b");
        std::fs::create_dir_all(&nested).unwrap();
        std::fs::write(dir.path().join(".facefit.toml"), "").unwrap();

        let found = find_config_in_parents(&nested).unwrap();
        assert_eq!(found, dir.path().join(".facefit.toml"));
    }

    #[test]
    fn explicit_file_errors_are_reported() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.toml");
        std::fs::write(&path, "[server\nport = ").unwrap();
        assert!(matches!(AppConfig::from_file(&path), Err(Error::Config(_))));
    }
}
