use crate::capacity::drive_tb;
use crate::models::pool::{GroupType, Pool, Vdev};
use serde::Serialize;
use std::collections::HashSet;

/// Smallest slog the planner stays quiet about, in TB (16 GB).
const SLOG_MIN_TB: f64 = 0.016;

/// raidz1 groups wider than this get a rebuild-risk advisory.
const RAIDZ1_MAX_WIDTH: usize = 8;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub enum Severity {
    Warning,
    Critical,
}

impl Severity {
    pub fn label(&self) -> &'static str {
        match self {
            Severity::Warning  => "WARN",
            Severity::Critical => "CRIT",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Advisory {
    pub severity: Severity,
    pub message:  &'static str,
}

const MIXED_TYPES: &str =
    "Mixing different VDEV types (e.g., mirror with RAIDZ) is not recommended. \
     This can lead to inconsistent performance and complicate capacity planning.";
const WIDE_RAIDZ1: &str =
    "RAIDZ1 vdevs with more than 8 drives increase rebuild times and failure risk.";
const RAIDZ_ALIGNMENT: &str =
    "For optimal RAIDZ performance, the number of data disks (total disks minus parity) \
     should be a power of 2 (e.g., 2, 4, 8).";
const STRIPE_NO_REDUNDANCY: &str =
    "Stripe vdevs provide no redundancy. Data loss will occur if any drive fails.";
const SMALL_SLOG: &str =
    "SLOG devices should be at least 16GB for optimal performance.";
const UNMIRRORED_SLOG: &str =
    "Consider using mirrored SLOG devices to prevent write performance degradation if the SLOG fails.";

fn advisory(severity: Severity, message: &'static str) -> Advisory {
    Advisory { severity, message }
}

fn has_mixed_types(pool: &Pool) -> bool {
    pool.vdevs.iter().map(|v| v.kind).collect::<HashSet<_>>().len() > 1
}

/// Data disks of a raidz group must be a positive power of two.
fn has_misaligned_raidz(pool: &Pool) -> bool {
    pool.vdevs.iter().any(|v| match v.kind.parity() {
        Some(p) if v.kind.is_raidz() => {
            let data = v.drives.len() as i64 - p as i64;
            !(data > 0 && (data as u64).is_power_of_two())
        }
        _ => false,
    })
}

/// Evaluate every advisory rule. Rules are independent; all that hold are
/// returned, in rule order.
pub fn evaluate(pool: &Pool) -> Vec<Advisory> {
    let mut out = Vec::new();

    if has_mixed_types(pool) {
        out.push(advisory(Severity::Warning, MIXED_TYPES));
    }
    if pool.vdevs.iter().any(|v| v.kind == GroupType::Raidz1 && v.drives.len() > RAIDZ1_MAX_WIDTH) {
        out.push(advisory(Severity::Warning, WIDE_RAIDZ1));
    }
    if has_misaligned_raidz(pool) {
        out.push(advisory(Severity::Warning, RAIDZ_ALIGNMENT));
    }
    if pool.vdevs.iter().any(|v| v.kind == GroupType::Stripe) {
        out.push(advisory(Severity::Critical, STRIPE_NO_REDUNDANCY));
    }
    if let Some(slog) = &pool.slog {
        if drive_tb(slog) < SLOG_MIN_TB {
            out.push(advisory(Severity::Warning, SMALL_SLOG));
        }
        if !pool.slog_mirrored {
            out.push(advisory(Severity::Warning, UNMIRRORED_SLOG));
        }
    }
    out
}

// ── Per-group validation ──────────────────────────────────────────────

pub fn min_drives(kind: GroupType) -> usize {
    kind.min_drives()
}

pub fn validation_message(vdev: &Vdev) -> Option<String> {
    let min = min_drives(vdev.kind);
    (vdev.drives.len() < min)
        .then(|| format!("{} requires at least {} drives", vdev.kind.keyword(), min))
}

/// The UI keeps groups at or above their minimum by disabling removal.
pub fn can_remove_drive(vdev: &Vdev) -> bool {
    vdev.drives.len() > min_drives(vdev.kind)
}

/// Validation messages for every under-provisioned group, tagged with its index.
pub fn validate(pool: &Pool) -> Vec<(usize, String)> {
    pool.vdevs.iter().enumerate()
        .filter_map(|(i, v)| validation_message(v).map(|m| (i, m)))
        .collect()
}
