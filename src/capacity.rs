use crate::models::pool::{Drive, GroupType, Pool, Vdev};
use serde::Serialize;

/// Usable fraction applied to dRAID groups. A rough visual proxy, not a
/// model of dRAID's real layout.
const DRAID1_FACTOR: f64 = 0.75;
const DRAID2_FACTOR: f64 = 0.70;
const DRAID3_FACTOR: f64 = 0.65;

/// Derived view of a pool. Recomputed after every edit, never mutated.
///
/// Degenerate values are kept as-is: `efficiency` is NaN for a pool with no
/// drives and `usable_space` goes negative for raidz groups narrower than
/// their parity.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CapacityResult {
    pub total_raw:    f64,
    pub usable_space: f64,
    pub protection:   String,
    pub efficiency:   f64,
}

/// Drive size normalized to TB. GB counts a thousandth; unknown units count nothing.
pub fn drive_tb(drive: &Drive) -> f64 {
    drive.size * drive.unit.tb_factor()
}

/// Sum seeded at +0.0; `Iterator::sum` yields -0.0 for an empty f64 iterator.
fn total(values: impl Iterator<Item = f64>) -> f64 {
    values.fold(0.0, |acc, x| acc + x)
}

pub fn raw_capacity(vdev: &Vdev) -> f64 {
    total(vdev.drives.iter().map(drive_tb))
}

pub fn group_capacity(vdev: &Vdev) -> f64 {
    let total = raw_capacity(vdev);
    let n = vdev.drives.len() as f64;

    match vdev.kind {
        GroupType::Stripe => total,
        GroupType::Mirror => total / n,
        GroupType::Raidz1 => total * ((n - 1.0) / n),
        GroupType::Raidz2 => total * ((n - 2.0) / n),
        GroupType::Raidz3 => total * ((n - 3.0) / n),
        GroupType::Draid1 => total * DRAID1_FACTOR,
        GroupType::Draid2 => total * DRAID2_FACTOR,
        GroupType::Draid3 => total * DRAID3_FACTOR,
        GroupType::Unknown => 0.0,
    }
}

pub fn pool_capacity(pool: &Pool) -> CapacityResult {
    let total_raw    = total(pool.vdevs.iter().map(raw_capacity));
    let usable_space = total(pool.vdevs.iter().map(group_capacity));

    CapacityResult {
        total_raw,
        usable_space,
        protection: determine_protection_level(&pool.vdevs, pool.spares.len()),
        efficiency: usable_space / total_raw * 100.0,
    }
}

const NO_PROTECTION: &str = "None";

fn group_protection(vdev: &Vdev) -> String {
    match vdev.kind {
        GroupType::Stripe  => NO_PROTECTION.to_string(),
        // n-1 is substituted verbatim, so a 2-way mirror reads "1 drive failures".
        GroupType::Mirror  => format!("{} drive failures per vdev", vdev.drives.len() as i64 - 1),
        GroupType::Raidz1  => "1 drive failure per vdev".to_string(),
        GroupType::Raidz2  => "2 drive failures per vdev".to_string(),
        GroupType::Raidz3  => "3 drive failures per vdev".to_string(),
        GroupType::Draid1  => "1 drive failure + distributed spare".to_string(),
        GroupType::Draid2  => "2 drive failures + distributed spare".to_string(),
        GroupType::Draid3  => "3 drive failures + distributed spare".to_string(),
        GroupType::Unknown => "Unknown".to_string(),
    }
}

/// Pool-wide protection summary.
///
/// Any unprotected group makes the whole pool unprotected. Otherwise the
/// description of the first group wins; levels are not ranked against each
/// other. A pool with no groups reports "None".
pub fn determine_protection_level(vdevs: &[Vdev], spare_count: usize) -> String {
    let mut level: Option<String> = None;
    for vdev in vdevs {
        let desc = group_protection(vdev);
        if desc == NO_PROTECTION {
            level = Some(desc);
            break;
        }
        level.get_or_insert(desc);
    }
    let level = level.unwrap_or_else(|| NO_PROTECTION.to_string());

    match spare_count {
        0 => level,
        1 => format!("{} + 1 hot spare", level),
        n => format!("{} + {} hot spares", level, n),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::pool::{Drive, Pool, Unit, Vdev};

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    fn group(kind: GroupType, n: usize, tb: f64) -> Vdev {
        Vdev::new(kind, vec![Drive::tb(tb); n])
    }

    fn pool_of(vdevs: Vec<Vdev>) -> Pool {
        Pool { vdevs, ..Pool::default() }
    }

    #[test]
    fn units_normalize_to_tb() {
        assert_eq!(drive_tb(&Drive::tb(4.0)), 4.0);
        assert!(close(drive_tb(&Drive::gb(500.0)), 0.5));
        assert_eq!(drive_tb(&Drive { size: 9.0, unit: Unit::Unknown }), 0.0);
    }

    #[test]
    fn stripe_pool_has_no_overhead() {
        let pool = pool_of(vec![group(GroupType::Stripe, 3, 6.0), group(GroupType::Stripe, 1, 2.0)]);
        let r = pool_capacity(&pool);
        assert_eq!(r.usable_space, r.total_raw);
        assert_eq!(r.efficiency, 100.0);
    }

    #[test]
    fn mirror_counts_one_copy_regardless_of_width() {
        for k in 2..=5 {
            assert!(close(group_capacity(&group(GroupType::Mirror, k, 8.0)), 8.0));
        }
    }

    #[test]
    fn raidz_reserves_parity_drives() {
        for (kind, p) in [(GroupType::Raidz1, 1), (GroupType::Raidz2, 2), (GroupType::Raidz3, 3)] {
            for d in (p + 1)..=10 {
                let cap = group_capacity(&group(kind, d, 4.0));
                assert!(close(cap, 4.0 * (d - p) as f64), "{:?} x{} -> {}", kind, d, cap);
            }
        }
    }

    #[test]
    fn raidz_narrower_than_parity_is_not_clamped() {
        assert!(close(group_capacity(&group(GroupType::Raidz1, 1, 4.0)), 0.0));
        assert!(close(group_capacity(&group(GroupType::Raidz3, 2, 4.0)), -4.0));
        assert!(group_capacity(&group(GroupType::Raidz2, 1, 4.0)) < 0.0);
    }

    #[test]
    fn raidz1_of_three_4tb_drives_is_8tb() {
        assert!(close(group_capacity(&group(GroupType::Raidz1, 3, 4.0)), 8.0));
        assert!(close(pool_capacity(&Pool::default()).usable_space, 8.0));
    }

    #[test]
    fn draid_uses_fixed_factors() {
        assert!(close(group_capacity(&group(GroupType::Draid1, 4, 10.0)), 30.0));
        assert!(close(group_capacity(&group(GroupType::Draid2, 5, 10.0)), 35.0));
        assert!(close(group_capacity(&group(GroupType::Draid3, 6, 10.0)), 39.0));
    }

    #[test]
    fn unknown_group_contributes_raw_but_not_usable() {
        let pool = pool_of(vec![group(GroupType::Unknown, 2, 4.0)]);
        let r = pool_capacity(&pool);
        assert_eq!(r.total_raw, 8.0);
        assert_eq!(r.usable_space, 0.0);
        assert_eq!(r.protection, "Unknown");
    }

    #[test]
    fn two_way_mirror_scenario() {
        let pool = pool_of(vec![group(GroupType::Mirror, 2, 4.0)]);
        let r = pool_capacity(&pool);
        assert_eq!(r.total_raw, 8.0);
        assert_eq!(r.usable_space, 4.0);
        assert_eq!(r.efficiency, 50.0);
        assert_eq!(r.protection, "1 drive failures per vdev");
    }

    #[test]
    fn empty_pool_efficiency_is_nan() {
        let r = pool_capacity(&pool_of(vec![]));
        assert_eq!(r.total_raw, 0.0);
        assert_eq!(r.usable_space, 0.0);
        assert!(!r.total_raw.is_sign_negative());
        assert!(!r.usable_space.is_sign_negative());
        assert!(r.efficiency.is_nan());
        assert_eq!(r.protection, "None");
    }

    #[test]
    fn driveless_group_has_positive_zero_raw() {
        let raw = raw_capacity(&group(GroupType::Stripe, 0, 4.0));
        assert_eq!(raw, 0.0);
        assert!(!raw.is_sign_negative());
    }

    #[test]
    fn empty_mirror_yields_nan_usable() {
        let r = pool_capacity(&pool_of(vec![group(GroupType::Mirror, 0, 4.0)]));
        assert!(r.usable_space.is_nan());
    }

    #[test]
    fn spares_do_not_count_as_raw() {
        let mut pool = Pool::default();
        pool.spares.push(Drive::tb(20.0));
        pool.slog = Some(Drive::gb(16.0));
        assert_eq!(pool_capacity(&pool).total_raw, 12.0);
    }

    #[test]
    fn any_stripe_means_no_protection() {
        let vdevs = vec![
            group(GroupType::Raidz3, 6, 4.0),
            group(GroupType::Mirror, 3, 4.0),
            group(GroupType::Stripe, 1, 4.0),
        ];
        assert_eq!(determine_protection_level(&vdevs, 0), "None");

        let vdevs = vec![group(GroupType::Stripe, 1, 4.0), group(GroupType::Raidz2, 4, 4.0)];
        assert_eq!(determine_protection_level(&vdevs, 0), "None");
    }

    #[test]
    fn first_group_wins_without_ranking() {
        let vdevs = vec![group(GroupType::Raidz3, 6, 4.0), group(GroupType::Raidz1, 3, 4.0)];
        assert_eq!(determine_protection_level(&vdevs, 0), "3 drive failures per vdev");

        let vdevs = vec![group(GroupType::Raidz1, 3, 4.0), group(GroupType::Raidz3, 6, 4.0)];
        assert_eq!(determine_protection_level(&vdevs, 0), "1 drive failure per vdev");
    }

    #[test]
    fn draid_descriptions() {
        let vdevs = vec![group(GroupType::Draid2, 5, 4.0)];
        assert_eq!(determine_protection_level(&vdevs, 0), "2 drive failures + distributed spare");
    }

    #[test]
    fn spare_suffix_pluralizes_from_two() {
        let vdevs = vec![group(GroupType::Raidz1, 3, 4.0)];
        let base = determine_protection_level(&vdevs, 0);
        assert_eq!(determine_protection_level(&vdevs, 1), format!("{} + 1 hot spare", base));
        assert_eq!(determine_protection_level(&vdevs, 2), format!("{} + 2 hot spares", base));
    }

    #[test]
    fn pool_protection_counts_spares() {
        let mut pool = Pool::default();
        pool.spares = vec![Drive::tb(4.0); 3];
        assert_eq!(pool_capacity(&pool).protection, "1 drive failure per vdev + 3 hot spares");
    }
}
