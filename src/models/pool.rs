use serde::{Deserialize, Serialize};

// ── Units ─────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Unit {
    #[serde(rename = "TB")]
    Tb,
    #[serde(rename = "GB")]
    Gb,
    /// Anything a plan file spells differently. Counts as zero capacity.
    #[serde(other, rename = "unknown")]
    Unknown,
}

impl Unit {
    pub fn label(&self) -> &'static str {
        match self {
            Unit::Tb      => "TB",
            Unit::Gb      => "GB",
            Unit::Unknown => "??",
        }
    }

    /// Multiplier that normalizes a size in this unit to TB.
    pub fn tb_factor(&self) -> f64 {
        match self {
            Unit::Tb      => 1.0,
            Unit::Gb      => 0.001,
            Unit::Unknown => 0.0,
        }
    }

    pub fn toggle(&self) -> Self {
        match self {
            Unit::Tb => Unit::Gb,
            _        => Unit::Tb,
        }
    }
}

// ── Drive ─────────────────────────────────────────────────────────────

/// A nominal drive: a size and a unit, nothing more.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Drive {
    pub size: f64,
    pub unit: Unit,
}

impl Drive {
    pub const fn tb(size: f64) -> Self { Self { size, unit: Unit::Tb } }
    pub const fn gb(size: f64) -> Self { Self { size, unit: Unit::Gb } }

    pub fn label(&self) -> String {
        format!("{} {}", self.size, self.unit.label())
    }
}

impl Default for Drive {
    fn default() -> Self { DEFAULT_DRIVE }
}

pub const DEFAULT_DRIVE: Drive = Drive::tb(4.0);
pub const DEFAULT_SLOG:  Drive = Drive::gb(16.0);
pub const DEFAULT_L2ARC: Drive = Drive::gb(256.0);

/// Sizes offered by the drive picker, in TB.
pub const DRIVE_SIZES: [f64; 15] = [
    1.0, 2.0, 4.0, 6.0, 8.0, 10.0, 12.0, 14.0, 16.0, 18.0, 20.0, 22.0, 24.0, 26.0, 30.0,
];

/// Sector sizes in bytes; ashift is log2 of each.
pub const SECTOR_SIZES: [u32; 4] = [512, 4096, 8192, 16384];

pub fn ashift_for_sector(bytes: u32) -> u8 {
    bytes.trailing_zeros() as u8
}

pub fn is_known_ashift(ashift: u8) -> bool {
    SECTOR_SIZES.iter().any(|&s| ashift_for_sector(s) == ashift)
}

// ── Group type ────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GroupType {
    Stripe,
    Mirror,
    Raidz1,
    Raidz2,
    Raidz3,
    Draid1,
    Draid2,
    Draid3,
    #[serde(other)]
    Unknown,
}

impl GroupType {
    pub const ALL: [GroupType; 8] = [
        GroupType::Stripe,
        GroupType::Mirror,
        GroupType::Raidz1,
        GroupType::Raidz2,
        GroupType::Raidz3,
        GroupType::Draid1,
        GroupType::Draid2,
        GroupType::Draid3,
    ];

    /// Keyword used on the `zpool create` command line.
    pub fn keyword(&self) -> &'static str {
        match self {
            GroupType::Stripe  => "stripe",
            GroupType::Mirror  => "mirror",
            GroupType::Raidz1  => "raidz1",
            GroupType::Raidz2  => "raidz2",
            GroupType::Raidz3  => "raidz3",
            GroupType::Draid1  => "draid1",
            GroupType::Draid2  => "draid2",
            GroupType::Draid3  => "draid3",
            GroupType::Unknown => "unknown",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            GroupType::Stripe  => "Stripe (no redundancy)",
            GroupType::Mirror  => "Mirror",
            GroupType::Raidz1  => "RAIDZ-1",
            GroupType::Raidz2  => "RAIDZ-2",
            GroupType::Raidz3  => "RAIDZ-3",
            GroupType::Draid1  => "dRAID-1",
            GroupType::Draid2  => "dRAID-2",
            GroupType::Draid3  => "dRAID-3",
            GroupType::Unknown => "Unknown",
        }
    }

    pub fn from_name(name: &str) -> Self {
        match name.to_lowercase().as_str() {
            "stripe" => GroupType::Stripe,
            "mirror" => GroupType::Mirror,
            "raidz1" | "raidz" => GroupType::Raidz1,
            "raidz2" => GroupType::Raidz2,
            "raidz3" => GroupType::Raidz3,
            "draid1" | "draid" => GroupType::Draid1,
            "draid2" => GroupType::Draid2,
            "draid3" => GroupType::Draid3,
            _ => GroupType::Unknown,
        }
    }

    /// Parity level for raidz/draid groups.
    pub fn parity(&self) -> Option<usize> {
        match self {
            GroupType::Raidz1 | GroupType::Draid1 => Some(1),
            GroupType::Raidz2 | GroupType::Draid2 => Some(2),
            GroupType::Raidz3 | GroupType::Draid3 => Some(3),
            _ => None,
        }
    }

    pub fn is_raidz(&self) -> bool {
        matches!(self, GroupType::Raidz1 | GroupType::Raidz2 | GroupType::Raidz3)
    }

    pub fn is_draid(&self) -> bool {
        matches!(self, GroupType::Draid1 | GroupType::Draid2 | GroupType::Draid3)
    }

    pub fn min_drives(&self) -> usize {
        match self {
            GroupType::Mirror => 2,
            GroupType::Raidz1 => 3,
            GroupType::Raidz2 => 4,
            GroupType::Raidz3 => 5,
            GroupType::Draid1 => 4,
            GroupType::Draid2 => 5,
            GroupType::Draid3 => 6,
            GroupType::Stripe | GroupType::Unknown => 1,
        }
    }

    pub fn next(&self) -> Self {
        let idx = Self::ALL.iter().position(|t| t == self).unwrap_or(0);
        Self::ALL[(idx + 1) % Self::ALL.len()]
    }

    pub fn prev(&self) -> Self {
        let idx = Self::ALL.iter().position(|t| t == self).unwrap_or(0);
        Self::ALL[(idx + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

// ── Vdev ──────────────────────────────────────────────────────────────

/// One redundancy group.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Vdev {
    #[serde(rename = "type")]
    pub kind:    GroupType,
    #[serde(default)]
    pub drives:  Vec<Drive>,
    /// Size edits on one drive apply to every drive in the group.
    #[serde(default = "default_uniform")]
    pub uniform: bool,
}

fn default_uniform() -> bool { true }

impl Vdev {
    pub fn new(kind: GroupType, drives: Vec<Drive>) -> Self {
        Self { kind, drives, uniform: true }
    }

    /// The group every fresh pool and every "add vdev" starts with.
    pub fn default_group() -> Self {
        Self::new(GroupType::Raidz1, vec![DEFAULT_DRIVE; 3])
    }
}

// ── Pool ──────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pool {
    pub name:          String,
    pub vdevs:         Vec<Vdev>,
    pub spares:        Vec<Drive>,
    pub slog:          Option<Drive>,
    pub l2arc:         Option<Drive>,
    pub ashift:        u8,
    pub slog_mirrored: bool,
}

impl Default for Pool {
    fn default() -> Self {
        Self {
            name:          "tank".to_string(),
            vdevs:         vec![Vdev::default_group()],
            spares:        Vec::new(),
            slog:          None,
            l2arc:         None,
            ashift:        12,
            slog_mirrored: false,
        }
    }
}

impl Pool {
    pub fn drive_count(&self) -> usize {
        self.vdevs.iter().map(|v| v.drives.len()).sum()
    }
}

// ── Drive roles (pool map) ────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DriveRole {
    Data,
    MirrorPrimary,
    MirrorCopy,
    Parity,
    DistributedParity,
    Spare,
    Slog,
    L2arc,
}

impl DriveRole {
    pub fn label(&self) -> &'static str {
        match self {
            DriveRole::Data              => "data",
            DriveRole::MirrorPrimary     => "primary",
            DriveRole::MirrorCopy        => "copy",
            DriveRole::Parity            => "parity",
            DriveRole::DistributedParity => "dparity",
            DriveRole::Spare             => "spare",
            DriveRole::Slog              => "slog",
            DriveRole::L2arc             => "l2arc",
        }
    }
}

/// Visual role of each drive in a group. Parity is drawn on the trailing
/// drives; real raidz/draid spread it over every member.
pub fn drive_roles(vdev: &Vdev) -> Vec<DriveRole> {
    let n = vdev.drives.len();
    (0..n).map(|i| match vdev.kind {
        GroupType::Mirror => if i == 0 { DriveRole::MirrorPrimary } else { DriveRole::MirrorCopy },
        k if k.is_raidz() => {
            let p = k.parity().unwrap_or(0);
            if i >= n.saturating_sub(p) { DriveRole::Parity } else { DriveRole::Data }
        }
        k if k.is_draid() => {
            let p = k.parity().unwrap_or(0);
            if i >= n.saturating_sub(p) { DriveRole::DistributedParity } else { DriveRole::Data }
        }
        _ => DriveRole::Data,
    }).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_pool_matches_startup_layout() {
        let pool = Pool::default();
        assert_eq!(pool.name, "tank");
        assert_eq!(pool.ashift, 12);
        assert_eq!(pool.vdevs.len(), 1);
        assert_eq!(pool.vdevs[0].kind, GroupType::Raidz1);
        assert_eq!(pool.vdevs[0].drives, vec![Drive::tb(4.0); 3]);
        assert!(pool.vdevs[0].uniform);
        assert!(pool.spares.is_empty());
        assert!(pool.slog.is_none() && pool.l2arc.is_none());
        assert!(!pool.slog_mirrored);
    }

    #[test]
    fn minimum_drive_table() {
        let mins: Vec<usize> = GroupType::ALL.iter().map(|t| t.min_drives()).collect();
        assert_eq!(mins, vec![1, 2, 3, 4, 5, 4, 5, 6]);
    }

    #[test]
    fn sector_sizes_map_to_ashift() {
        let shifts: Vec<u8> = SECTOR_SIZES.iter().map(|&s| ashift_for_sector(s)).collect();
        assert_eq!(shifts, vec![9, 12, 13, 14]);
        assert!(is_known_ashift(13));
        assert!(!is_known_ashift(10));
    }

    #[test]
    fn group_type_cycle_wraps() {
        assert_eq!(GroupType::Draid3.next(), GroupType::Stripe);
        assert_eq!(GroupType::Stripe.prev(), GroupType::Draid3);
        assert_eq!(GroupType::Unknown.next(), GroupType::Mirror);
    }

    #[test]
    fn unknown_strings_deserialize_to_catch_all() {
        let v: Vdev = serde_json::from_str(r#"{"type":"raid10","drives":[{"size":2,"unit":"PB"}]}"#).unwrap();
        assert_eq!(v.kind, GroupType::Unknown);
        assert_eq!(v.drives[0].unit, Unit::Unknown);
        assert!(v.uniform);
    }

    #[test]
    fn roles_mark_trailing_parity() {
        let v = Vdev::new(GroupType::Raidz2, vec![DEFAULT_DRIVE; 5]);
        assert_eq!(drive_roles(&v), vec![
            DriveRole::Data, DriveRole::Data, DriveRole::Data, DriveRole::Parity, DriveRole::Parity,
        ]);

        let m = Vdev::new(GroupType::Mirror, vec![DEFAULT_DRIVE; 3]);
        assert_eq!(drive_roles(&m), vec![
            DriveRole::MirrorPrimary, DriveRole::MirrorCopy, DriveRole::MirrorCopy,
        ]);

        let d = Vdev::new(GroupType::Draid1, vec![DEFAULT_DRIVE; 4]);
        assert_eq!(drive_roles(&d)[3], DriveRole::DistributedParity);
    }

    #[test]
    fn short_raidz_is_all_parity() {
        let v = Vdev::new(GroupType::Raidz3, vec![DEFAULT_DRIVE; 2]);
        assert_eq!(drive_roles(&v), vec![DriveRole::Parity, DriveRole::Parity]);
    }
}
