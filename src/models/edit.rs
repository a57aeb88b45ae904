//! Pool transitions. Every edit takes the current pool by reference and
//! returns the next one; an out-of-range index yields an unchanged copy.

use crate::models::pool::{Drive, GroupType, Pool, Unit, Vdev, DEFAULT_DRIVE, DEFAULT_L2ARC, DEFAULT_SLOG};

fn with_vdev(pool: &Pool, idx: usize, f: impl FnOnce(&mut Vdev)) -> Pool {
    let mut next = pool.clone();
    if let Some(v) = next.vdevs.get_mut(idx) {
        f(v);
    }
    next
}

pub fn add_vdev(pool: &Pool, vdev: Vdev) -> Pool {
    let mut next = pool.clone();
    next.vdevs.push(vdev);
    next
}

pub fn remove_vdev(pool: &Pool, idx: usize) -> Pool {
    let mut next = pool.clone();
    if idx < next.vdevs.len() {
        next.vdevs.remove(idx);
    }
    next
}

/// Change a group's type, growing its drive list to the new minimum by
/// cloning the first drive (or the default drive for an empty group).
pub fn set_vdev_type(pool: &Pool, idx: usize, kind: GroupType) -> Pool {
    with_vdev(pool, idx, |v| {
        let template = v.drives.first().copied().unwrap_or(DEFAULT_DRIVE);
        while v.drives.len() < kind.min_drives() {
            v.drives.push(template);
        }
        v.kind = kind;
    })
}

pub fn set_vdev_uniform(pool: &Pool, idx: usize, uniform: bool) -> Pool {
    with_vdev(pool, idx, |v| v.uniform = uniform)
}

pub fn add_drive(pool: &Pool, idx: usize, drive: Drive) -> Pool {
    with_vdev(pool, idx, |v| v.drives.push(drive))
}

/// Removes unconditionally; the minimum-drive floor is a UI rule
/// (see `advisories::can_remove_drive`).
pub fn remove_drive(pool: &Pool, idx: usize, drive_idx: usize) -> Pool {
    with_vdev(pool, idx, |v| {
        if drive_idx < v.drives.len() {
            v.drives.remove(drive_idx);
        }
    })
}

pub fn set_drive_size(pool: &Pool, idx: usize, drive_idx: usize, size: f64) -> Pool {
    with_vdev(pool, idx, |v| {
        if drive_idx >= v.drives.len() { return; }
        if v.uniform {
            v.drives.iter_mut().for_each(|d| d.size = size);
        } else {
            v.drives[drive_idx].size = size;
        }
    })
}

pub fn set_drive_unit(pool: &Pool, idx: usize, drive_idx: usize, unit: Unit) -> Pool {
    with_vdev(pool, idx, |v| {
        if let Some(d) = v.drives.get_mut(drive_idx) {
            d.unit = unit;
        }
    })
}

pub fn add_spare(pool: &Pool, drive: Drive) -> Pool {
    let mut next = pool.clone();
    next.spares.push(drive);
    next
}

pub fn remove_spare(pool: &Pool, idx: usize) -> Pool {
    let mut next = pool.clone();
    if idx < next.spares.len() {
        next.spares.remove(idx);
    }
    next
}

pub fn set_spare(pool: &Pool, idx: usize, drive: Drive) -> Pool {
    let mut next = pool.clone();
    if let Some(s) = next.spares.get_mut(idx) {
        *s = drive;
    }
    next
}

pub fn rename(pool: &Pool, name: &str) -> Pool {
    Pool { name: name.to_string(), ..pool.clone() }
}

pub fn set_ashift(pool: &Pool, ashift: u8) -> Pool {
    Pool { ashift, ..pool.clone() }
}

/// Enabling always starts from `slog_default`; disabling drops the device.
/// Either way the mirror flag is cleared.
pub fn toggle_slog(pool: &Pool, enabled: bool, slog_default: Drive) -> Pool {
    Pool {
        slog:          enabled.then_some(slog_default),
        slog_mirrored: false,
        ..pool.clone()
    }
}

pub fn update_slog(pool: &Pool, drive: Drive) -> Pool {
    Pool { slog: Some(drive), ..pool.clone() }
}

pub fn set_slog_mirrored(pool: &Pool, mirrored: bool) -> Pool {
    Pool { slog_mirrored: mirrored, ..pool.clone() }
}

pub fn toggle_l2arc(pool: &Pool, enabled: bool, l2arc_default: Drive) -> Pool {
    Pool { l2arc: enabled.then_some(l2arc_default), ..pool.clone() }
}

pub fn update_l2arc(pool: &Pool, drive: Drive) -> Pool {
    Pool { l2arc: Some(drive), ..pool.clone() }
}

/// Defaults used when the caller has no configured override.
pub fn toggle_slog_default(pool: &Pool, enabled: bool) -> Pool {
    toggle_slog(pool, enabled, DEFAULT_SLOG)
}

pub fn toggle_l2arc_default(pool: &Pool, enabled: bool) -> Pool {
    toggle_l2arc(pool, enabled, DEFAULT_L2ARC)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slog_toggle_resets_to_default() {
        let pool = toggle_slog_default(&Pool::default(), true);
        assert_eq!(pool.slog, Some(Drive::gb(16.0)));

        let pool = update_slog(&pool, Drive::gb(64.0));
        let pool = set_slog_mirrored(&pool, true);
        let pool = toggle_slog_default(&pool, false);
        assert_eq!(pool.slog, None);
        assert!(!pool.slog_mirrored);

        let pool = toggle_slog_default(&pool, true);
        assert_eq!(pool.slog, Some(Drive::gb(16.0)));
    }

    #[test]
    fn l2arc_toggle_uses_default_size() {
        let pool = toggle_l2arc_default(&Pool::default(), true);
        assert_eq!(pool.l2arc, Some(Drive::gb(256.0)));
        assert_eq!(toggle_l2arc_default(&pool, false).l2arc, None);
    }

    #[test]
    fn transitions_leave_input_untouched() {
        let before = Pool::default();
        let after = add_drive(&before, 0, Drive::tb(8.0));
        assert_eq!(before.vdevs[0].drives.len(), 3);
        assert_eq!(after.vdevs[0].drives.len(), 4);
    }

    #[test]
    fn uniform_size_edit_propagates() {
        let pool = set_drive_size(&Pool::default(), 0, 1, 12.0);
        assert!(pool.vdevs[0].drives.iter().all(|d| d.size == 12.0));

        let pool = set_vdev_uniform(&Pool::default(), 0, false);
        let pool = set_drive_size(&pool, 0, 1, 12.0);
        let sizes: Vec<f64> = pool.vdevs[0].drives.iter().map(|d| d.size).collect();
        assert_eq!(sizes, vec![4.0, 12.0, 4.0]);
    }

    #[test]
    fn unit_edit_touches_one_drive() {
        let pool = set_drive_unit(&Pool::default(), 0, 2, Unit::Gb);
        let units: Vec<Unit> = pool.vdevs[0].drives.iter().map(|d| d.unit).collect();
        assert_eq!(units, vec![Unit::Tb, Unit::Tb, Unit::Gb]);
    }

    #[test]
    fn type_change_pads_to_minimum() {
        let pool = set_drive_size(&Pool::default(), 0, 0, 8.0);
        let pool = set_vdev_type(&pool, 0, GroupType::Draid3);
        assert_eq!(pool.vdevs[0].kind, GroupType::Draid3);
        assert_eq!(pool.vdevs[0].drives, vec![Drive::tb(8.0); 6]);

        // Shrinking the minimum never drops drives.
        let pool = set_vdev_type(&pool, 0, GroupType::Mirror);
        assert_eq!(pool.vdevs[0].drives.len(), 6);
    }

    #[test]
    fn type_change_on_empty_group_uses_default_drive() {
        let empty = add_vdev(&Pool::default(), Vdev::new(GroupType::Stripe, vec![]));
        let pool = set_vdev_type(&empty, 1, GroupType::Mirror);
        assert_eq!(pool.vdevs[1].drives, vec![DEFAULT_DRIVE; 2]);
    }

    #[test]
    fn model_allows_going_below_minimum() {
        let pool = remove_drive(&Pool::default(), 0, 0);
        let pool = remove_drive(&pool, 0, 0);
        assert_eq!(pool.vdevs[0].drives.len(), 1);
    }

    #[test]
    fn out_of_range_indices_are_no_ops() {
        let pool = Pool::default();
        assert_eq!(remove_vdev(&pool, 5), pool);
        assert_eq!(remove_drive(&pool, 0, 9), pool);
        assert_eq!(set_drive_size(&pool, 3, 0, 1.0), pool);
        assert_eq!(remove_spare(&pool, 0), pool);
    }

    #[test]
    fn spare_lifecycle() {
        let pool = add_spare(&Pool::default(), Drive::tb(4.0));
        let pool = add_spare(&pool, Drive::tb(4.0));
        let pool = set_spare(&pool, 1, Drive::gb(500.0));
        assert_eq!(pool.spares, vec![Drive::tb(4.0), Drive::gb(500.0)]);
        let pool = remove_spare(&pool, 0);
        assert_eq!(pool.spares, vec![Drive::gb(500.0)]);
    }

    #[test]
    fn rename_and_ashift() {
        let pool = rename(&Pool::default(), "backup");
        let pool = set_ashift(&pool, 13);
        assert_eq!(pool.name, "backup");
        assert_eq!(pool.ashift, 13);
    }
}
