//! Pool descriptions read from disk (`--plan FILE`).

use crate::models::pool::{is_known_ashift, Drive, Pool, Vdev};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PlanError {
    #[error("failed to read {path}: {source}")]
    Io {
        path:   PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid TOML plan: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("invalid JSON plan: {0}")]
    Json(#[from] serde_json::Error),

    #[error("unsupported ashift {0} (expected 9, 12, 13 or 14)")]
    InvalidAshift(u8),
}

pub type Result<T> = std::result::Result<T, PlanError>;

#[derive(Debug, Deserialize)]
struct PlanFile {
    #[serde(default = "default_name")]
    name:          String,
    #[serde(default)]
    vdevs:         Vec<Vdev>,
    #[serde(default)]
    spares:        Vec<Drive>,
    slog:          Option<Drive>,
    l2arc:         Option<Drive>,
    #[serde(default = "default_ashift")]
    ashift:        u8,
    #[serde(default)]
    slog_mirrored: bool,
}

fn default_name() -> String { "tank".to_string() }
fn default_ashift() -> u8 { 12 }

impl TryFrom<PlanFile> for Pool {
    type Error = PlanError;

    fn try_from(f: PlanFile) -> Result<Pool> {
        if !is_known_ashift(f.ashift) {
            return Err(PlanError::InvalidAshift(f.ashift));
        }
        Ok(Pool {
            name:          f.name,
            vdevs:         f.vdevs,
            spares:        f.spares,
            slog:          f.slog,
            l2arc:         f.l2arc,
            ashift:        f.ashift,
            slog_mirrored: f.slog_mirrored,
        })
    }
}

fn is_json(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| e.eq_ignore_ascii_case("json"))
        .unwrap_or(false)
}

pub fn parse_toml(text: &str) -> Result<Pool> {
    toml::from_str::<PlanFile>(text)?.try_into()
}

pub fn parse_json(text: &str) -> Result<Pool> {
    serde_json::from_str::<PlanFile>(text)?.try_into()
}

/// Read a plan file; `.json` files are JSON, everything else TOML.
pub fn load(path: &Path) -> Result<Pool> {
    let text = fs::read_to_string(path).map_err(|source| PlanError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let pool = if is_json(path) { parse_json(&text)? } else { parse_toml(&text)? };
    tracing::info!(
        path = %path.display(),
        vdevs = pool.vdevs.len(),
        drives = pool.drive_count(),
        "loaded plan"
    );
    Ok(pool)
}
