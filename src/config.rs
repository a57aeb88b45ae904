use crate::models::pool::{is_known_ashift, Drive, GroupType, Pool, Vdev};
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub general: GeneralConfig,

    #[serde(default)]
    pub defaults: PlanDefaults,

    #[serde(default)]
    pub clipboard: ClipboardConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// Color theme: default, dracula, gruvbox, nord
    pub theme: String,
    /// Decimal places for capacity figures
    pub decimals: usize,
}

/// Seeds for the starting pool and for newly enabled devices.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PlanDefaults {
    pub pool_name:     String,
    /// Group type of the starting pool and of every added group
    pub vdev_type:     String,
    /// Size of every new drive, in TB
    pub drive_size_tb: f64,
    pub ashift:        u8,
    /// Size of a freshly enabled SLOG, in GB
    pub slog_size_gb:  f64,
    /// Size of a freshly enabled L2ARC, in GB
    pub l2arc_size_gb: f64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ClipboardConfig {
    /// Explicit copy program and arguments, e.g. ["wl-copy"]. Empty = auto-detect.
    #[serde(default)]
    pub command: Vec<String>,
}

// ── Defaults ─────────────────────────────────────────────────────────

impl Default for GeneralConfig {
    fn default() -> Self {
        Self { theme: "default".into(), decimals: 2 }
    }
}

impl Default for PlanDefaults {
    fn default() -> Self {
        Self {
            pool_name:     "tank".into(),
            vdev_type:     "raidz1".into(),
            drive_size_tb: 4.0,
            ashift:        12,
            slog_size_gb:  16.0,
            l2arc_size_gb: 256.0,
        }
    }
}

impl PlanDefaults {
    pub fn drive(&self) -> Drive { Drive::tb(self.drive_size_tb) }
    pub fn slog(&self)  -> Drive { Drive::gb(self.slog_size_gb) }
    pub fn l2arc(&self) -> Drive { Drive::gb(self.l2arc_size_gb) }

    /// Unrecognized type names fall back to raidz1.
    pub fn group_type(&self) -> GroupType {
        match GroupType::from_name(&self.vdev_type) {
            GroupType::Unknown => GroupType::Raidz1,
            t => t,
        }
    }

    /// A new group of the configured type at its minimum width.
    pub fn vdev(&self) -> Vdev {
        let kind = self.group_type();
        Vdev::new(kind, vec![self.drive(); kind.min_drives()])
    }

    pub fn pool(&self) -> Pool {
        Pool {
            name:   self.pool_name.clone(),
            vdevs:  vec![self.vdev()],
            ashift: if is_known_ashift(self.ashift) { self.ashift } else { 12 },
            ..Pool::default()
        }
    }
}

// ── Load / Save ───────────────────────────────────────────────────────

impl Config {
    pub fn load() -> Self {
        let exists = Self::config_path().map(|p| p.exists()).unwrap_or(false);
        match try_load() {
            Ok(c) => c,
            Err(e) if exists => {
                tracing::warn!(error = %e, "config unreadable, using defaults");
                Config::default()
            }
            Err(_) => {
                // Write defaults on first run (best-effort)
                if let Err(e) = try_write_defaults() {
                    tracing::debug!(error = %e, "could not write default config");
                }
                Config::default()
            }
        }
    }

    pub fn config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("zplan").join("zplan.toml"))
    }

    pub fn data_dir() -> Option<PathBuf> {
        dirs::data_local_dir().map(|p| p.join("zplan"))
    }
}

fn try_load() -> Result<Config> {
    let path = Config::config_path().ok_or_else(|| anyhow::anyhow!("no config dir"))?;
    let text = fs::read_to_string(path)?;
    let cfg: Config = toml::from_str(&text)?;
    Ok(cfg)
}

fn try_write_defaults() -> Result<()> {
    let path = Config::config_path().ok_or_else(|| anyhow::anyhow!("no config dir"))?;
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let text = toml::to_string_pretty(&Config::default())?;
    fs::write(path, format!("# zplan configuration\n# Generated on first run, edit freely\n\n{}", text))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_seed_is_the_standard_pool() {
        assert_eq!(PlanDefaults::default().pool(), Pool::default());
    }

    #[test]
    fn partial_toml_fills_in_defaults() {
        let cfg: Config = toml::from_str("[general]\ntheme = \"nord\"\ndecimals = 1\n").unwrap();
        assert_eq!(cfg.general.theme, "nord");
        assert_eq!(cfg.defaults.slog_size_gb, 16.0);
        assert!(cfg.clipboard.command.is_empty());
    }

    #[test]
    fn seeded_pool_honours_overrides() {
        let d = PlanDefaults {
            pool_name:     "vault".into(),
            vdev_type:     "raidz2".into(),
            drive_size_tb: 18.0,
            ashift:        10,
            ..PlanDefaults::default()
        };
        let pool = d.pool();
        assert_eq!(pool.name, "vault");
        assert_eq!(pool.vdevs[0].kind, GroupType::Raidz2);
        assert_eq!(pool.vdevs[0].drives, vec![Drive::tb(18.0); 4]);
        assert_eq!(pool.ashift, 12);
    }

    #[test]
    fn unknown_group_type_falls_back() {
        let d = PlanDefaults { vdev_type: "raid5".into(), ..PlanDefaults::default() };
        assert_eq!(d.group_type(), GroupType::Raidz1);
    }

    #[test]
    fn defaults_serialize_round_trip() {
        let text = toml::to_string_pretty(&Config::default()).unwrap();
        let back: Config = toml::from_str(&text).unwrap();
        assert_eq!(back.defaults.pool_name, "tank");
        assert_eq!(back.general.decimals, 2);
    }
}
