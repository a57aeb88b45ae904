//! `zfs snapshot` and scheduled-snapshot builders.

use chrono::{DateTime, Utc};
use serde::Serialize;

pub const INTERVALS: [&str; 6] = ["15m", "1h", "6h", "12h", "1d", "1w"];

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Schedule {
    pub interval: &'static str,
    pub retain:   u32,
}

impl Default for Schedule {
    fn default() -> Self {
        Self { interval: "1h", retain: 24 }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SnapshotOptions {
    /// Path below the pool; empty snapshots the pool's root dataset.
    pub dataset_path: String,
    pub recursive:    bool,
    /// Empty means "use a timestamp".
    pub custom_name:  String,
    pub schedule:     Option<Schedule>,
}

pub fn full_path(pool_name: &str, opts: &SnapshotOptions) -> String {
    if opts.dataset_path.is_empty() {
        pool_name.to_string()
    } else {
        format!("{}/{}", pool_name, opts.dataset_path)
    }
}

/// ISO-8601 UTC timestamp with `:` and `.` turned into `-`, safe as a snapshot name.
pub fn timestamp_name(now: DateTime<Utc>) -> String {
    now.format("%Y-%m-%dT%H-%M-%S-%3fZ").to_string()
}

pub fn snapshot_command(pool_name: &str, opts: &SnapshotOptions, now: DateTime<Utc>) -> String {
    let name = if opts.custom_name.is_empty() { timestamp_name(now) } else { opts.custom_name.clone() };
    let mut parts = vec!["zfs snapshot".to_string()];
    if opts.recursive {
        parts.push("-r".to_string());
    }
    parts.push(format!("{}@{}", full_path(pool_name, opts), name));
    parts.join(" ")
}

pub fn schedule_command(pool_name: &str, opts: &SnapshotOptions) -> Option<String> {
    opts.schedule.as_ref().map(|s| format!(
        "zfs-auto-snapshot --keep={} --interval={} {}",
        s.retain, s.interval, full_path(pool_name, opts)
    ))
}

/// Everything the copy action puts on the clipboard.
pub fn script(pool_name: &str, opts: &SnapshotOptions, now: DateTime<Utc>) -> String {
    std::iter::once(snapshot_command(pool_name, opts, now))
        .chain(schedule_command(pool_name, opts))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Token-by-token explanation of the generated commands.
pub fn explain(pool_name: &str, opts: &SnapshotOptions) -> Vec<(String, String)> {
    let mut parts = vec![(
        "zfs snapshot".to_string(),
        "Creates a read-only copy of the dataset at the current point in time.".to_string(),
    )];
    if opts.recursive {
        parts.push((
            "-r".to_string(),
            "Snapshots every descendant dataset too, keeping the hierarchy consistent.".to_string(),
        ));
    }
    let name = if opts.custom_name.is_empty() { "<timestamp>" } else { opts.custom_name.as_str() };
    parts.push((
        format!("{}@{}", full_path(pool_name, opts), name),
        "Dataset and snapshot name separated by \"@\". Timestamps keep names unique.".to_string(),
    ));
    if let Some(s) = &opts.schedule {
        parts.push((
            "zfs-auto-snapshot".to_string(),
            "Helper utility that takes and prunes snapshots on a schedule.".to_string(),
        ));
        parts.push((
            format!("--keep={}", s.retain),
            format!("Keeps only the {} most recent snapshots and removes older ones.", s.retain),
        ));
        parts.push((
            format!("--interval={}", s.interval),
            format!("Takes a new snapshot every {}. Shorter intervals give finer recovery points but use more space.", s.interval),
        ));
    }
    parts
}
