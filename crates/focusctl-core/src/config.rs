use crate::error::Result;
use crate::paths;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

// ---------------------------------------------------------------------------
// SshConfig
// ---------------------------------------------------------------------------

/// Connection parameters baked into each exported Shortcuts action.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SshConfig {
    #[serde(default = "default_ssh_host")]
    pub host: String,
    #[serde(default = "default_ssh_port")]
    pub port: u16,
    /// Defaults to the invoking user when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<String>,
}

fn default_ssh_host() -> String {
    "localhost".to_string()
}

fn default_ssh_port() -> u16 {
    22
}

impl Default for SshConfig {
    fn default() -> Self {
        Self {
            host: default_ssh_host(),
            port: default_ssh_port(),
            user: None,
        }
    }
}

impl SshConfig {
    pub fn resolved_user(&self) -> String {
        self.user.clone().unwrap_or_else(current_user)
    }
}

/// Login name of the invoking user.
pub fn current_user() -> String {
    std::env::var("USER")
        .or_else(|_| std::env::var("USERNAME"))
        .ok()
        .filter(|u| !u.is_empty())
        .unwrap_or_else(|| "unknown".to_string())
}

// ---------------------------------------------------------------------------
// Config
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_version")]
    pub version: u32,
    /// Install directory for exported actions. `~/Library/Shortcuts` when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shortcuts_dir: Option<PathBuf>,
    #[serde(default)]
    pub ssh: SshConfig,
}

fn default_version() -> u32 {
    1
}

impl Default for Config {
    fn default() -> Self {
        Self {
            version: default_version(),
            shortcuts_dir: None,
            ssh: SshConfig::default(),
        }
    }
}

impl Config {
    /// Load `config.yaml` from `root`, falling back to defaults when absent.
    pub fn load(root: &Path) -> Result<Self> {
        let path = paths::config_path(root);
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no config file, using defaults");
            return Ok(Self::default());
        }
        let data = std::fs::read_to_string(&path)?;
        let cfg: Config = serde_yaml::from_str(&data)?;
        Ok(cfg)
    }

    pub fn save(&self, root: &Path) -> Result<()> {
        let path = paths::config_path(root);
        let data = serde_yaml::to_string(self)?;
        crate::io::atomic_write(&path, data.as_bytes())
    }

    /// Write the default config unless one already exists. Returns true if written.
    pub fn init(root: &Path) -> Result<bool> {
        let data = serde_yaml::to_string(&Self::default())?;
        crate::io::write_if_missing(&paths::config_path(root), data.as_bytes())
    }

    /// Resolve the install directory: explicit override, then config, then default.
    pub fn shortcuts_dir(&self, explicit: Option<&Path>) -> Result<PathBuf> {
        if let Some(p) = explicit {
            return Ok(p.to_path_buf());
        }
        match &self.shortcuts_dir {
            Some(p) => Ok(p.clone()),
            None => paths::default_shortcuts_dir(),
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn missing_file_yields_defaults() {
        let dir = TempDir::new().unwrap();
        let cfg = Config::load(dir.path()).unwrap();
        assert_eq!(cfg, Config::default());
        assert_eq!(cfg.ssh.host, "localhost");
        assert_eq!(cfg.ssh.port, 22);
    }

    #[test]
    fn save_and_load_preserves_overrides() {
        let dir = TempDir::new().unwrap();
        let cfg = Config {
            shortcuts_dir: Some(PathBuf::from("/srv/shortcuts")),
            ssh: SshConfig {
                host: "mac-mini.local".into(),
                port: 2222,
                user: Some("ops".into()),
            },
            ..Config::default()
        };
        cfg.save(dir.path()).unwrap();
        assert_eq!(Config::load(dir.path()).unwrap(), cfg);
    }

    #[test]
    fn partial_yaml_fills_defaults() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("config.yaml"), "ssh:\n  port: 2022\n").unwrap();
        let cfg = Config::load(dir.path()).unwrap();
        assert_eq!(cfg.ssh.port, 2022);
        assert_eq!(cfg.ssh.host, "localhost");
        assert!(cfg.shortcuts_dir.is_none());
    }

    #[test]
    fn init_does_not_clobber_existing() {
        let dir = TempDir::new().unwrap();
        assert!(Config::init(dir.path()).unwrap());
        std::fs::write(dir.path().join("config.yaml"), "ssh:\n  host: box\n").unwrap();
        assert!(!Config::init(dir.path()).unwrap());
        assert_eq!(Config::load(dir.path()).unwrap().ssh.host, "box");
    }

    #[test]
    fn explicit_shortcuts_dir_wins() {
        let cfg = Config {
            shortcuts_dir: Some(PathBuf::from("/from/config")),
            ..Config::default()
        };
        assert_eq!(
            cfg.shortcuts_dir(Some(Path::new("/from/flag"))).unwrap(),
            PathBuf::from("/from/flag")
        );
        assert_eq!(
            cfg.shortcuts_dir(None).unwrap(),
            PathBuf::from("/from/config")
        );
    }

    #[test]
    fn configured_user_overrides_current() {
        let ssh = SshConfig {
            user: Some("alice".into()),
            ..SshConfig::default()
        };
        assert_eq!(ssh.resolved_user(), "alice");
    }
}
