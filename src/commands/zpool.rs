use crate::models::pool::Pool;

/// Stand-in for every device path. The operator substitutes real ones.
pub const PLACEHOLDER_DEVICE: &str = "/dev/sdX";

const CONTINUATION: &str = " \\\n  ";

fn placeholders(count: usize) -> String {
    vec![PLACEHOLDER_DEVICE; count].join(" ")
}

/// Render the pool as a `zpool create` command.
///
/// Section order is fixed: groups, spares, log, cache, then the ashift
/// option. The pool name is inserted verbatim, with no shell quoting.
pub fn create_command(pool: &Pool) -> String {
    let groups = pool.vdevs.iter()
        .map(|v| format!("{} {}", v.kind.keyword(), placeholders(v.drives.len())))
        .collect::<Vec<_>>()
        .join(CONTINUATION);

    let mut cmd = format!("zpool create \\\n    {} \\\n    {}", pool.name, groups);

    if !pool.spares.is_empty() {
        cmd.push_str(CONTINUATION);
        cmd.push_str("spare ");
        cmd.push_str(&placeholders(pool.spares.len()));
    }

    if pool.slog.is_some() {
        cmd.push_str(CONTINUATION);
        cmd.push_str("log ");
        if pool.slog_mirrored {
            cmd.push_str("mirror ");
            cmd.push_str(&placeholders(2));
        } else {
            cmd.push_str(&placeholders(1));
        }
    }

    if pool.l2arc.is_some() {
        cmd.push_str(CONTINUATION);
        cmd.push_str("cache ");
        cmd.push_str(PLACEHOLDER_DEVICE);
    }

    cmd.push_str(&format!(" -o ashift={}", pool.ashift));
    cmd
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::edit;
    use crate::models::pool::{Drive, GroupType, Vdev, DEFAULT_DRIVE};
    use pretty_assertions::assert_eq;

    #[test]
    fn default_pool_command() {
        assert_eq!(
            create_command(&Pool::default()),
            "zpool create \\\n    tank \\\n    raidz1 /dev/sdX /dev/sdX /dev/sdX -o ashift=12"
        );
    }

    #[test]
    fn full_pool_sections_in_order() {
        let pool = edit::add_vdev(&Pool::default(), Vdev::new(GroupType::Mirror, vec![DEFAULT_DRIVE; 2]));
        let pool = edit::add_spare(&pool, Drive::tb(4.0));
        let pool = edit::add_spare(&pool, Drive::tb(4.0));
        let pool = edit::toggle_slog_default(&pool, true);
        let pool = edit::set_slog_mirrored(&pool, true);
        let pool = edit::toggle_l2arc_default(&pool, true);
        let pool = edit::set_ashift(&pool, 13);

        let expected = "zpool create \\\n    tank \\\n    \
raidz1 /dev/sdX /dev/sdX /dev/sdX \\\n  \
mirror /dev/sdX /dev/sdX \\\n  \
spare /dev/sdX /dev/sdX \\\n  \
log mirror /dev/sdX /dev/sdX \\\n  \
cache /dev/sdX -o ashift=13";
        assert_eq!(create_command(&pool), expected);
    }

    #[test]
    fn single_log_device_when_unmirrored() {
        let pool = edit::toggle_slog_default(&Pool::default(), true);
        assert!(create_command(&pool).ends_with(" \\\n  log /dev/sdX -o ashift=12"));
    }

    #[test]
    fn stripe_keyword_is_emitted_verbatim() {
        let pool = edit::set_vdev_type(&Pool::default(), 0, GroupType::Stripe);
        assert!(create_command(&pool).contains("    stripe /dev/sdX /dev/sdX /dev/sdX"));
    }

    #[test]
    fn name_is_not_escaped() {
        let pool = edit::rename(&Pool::default(), "my pool;rm");
        assert!(create_command(&pool).starts_with("zpool create \\\n    my pool;rm \\\n"));
    }

    #[test]
    fn empty_pool_still_renders() {
        let pool = Pool { vdevs: vec![], ..Pool::default() };
        assert_eq!(create_command(&pool), "zpool create \\\n    tank \\\n     -o ashift=12");
    }

    #[test]
    fn synthesis_is_deterministic() {
        let pool = edit::toggle_l2arc_default(&Pool::default(), true);
        assert_eq!(create_command(&pool), create_command(&pool));
    }
}
