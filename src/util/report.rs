use crate::advisories::{self, Advisory};
use crate::capacity::{self, CapacityResult};
use crate::commands::zpool;
use crate::models::pool::Pool;
use crate::util::human::{fmt_pct, fmt_tb, plural};

/// Generate a human-readable plan report to a String.
pub fn generate(pool: &Pool, decimals: usize) -> String {
    let result = capacity::pool_capacity(pool);
    let advs   = advisories::evaluate(pool);
    let now    = chrono::Local::now().format("%Y-%m-%d %H:%M:%S");
    render(pool, &result, &advs, decimals, &now.to_string())
}

fn render(pool: &Pool, result: &CapacityResult, advs: &[Advisory], decimals: usize, stamp: &str) -> String {
    let mut out = String::new();

    out.push_str("═══════════════════════════════════════════════\n");
    out.push_str(&format!("  zplan Pool Report: {} ({})\n", pool.name, stamp));
    out.push_str("═══════════════════════════════════════════════\n\n");

    // ── Summary ────────────────────────────────────────────────────────
    out.push_str("── Summary ────────────────────────────────────\n");
    out.push_str(&format!("  Raw capacity:    {}\n", fmt_tb(result.total_raw, decimals)));
    out.push_str(&format!("  Usable capacity: {}\n", fmt_tb(result.usable_space, decimals)));
    out.push_str(&format!("  Efficiency:      {}\n", fmt_pct(result.efficiency)));
    out.push_str(&format!("  Protection:      {}\n", result.protection));
    out.push_str(&format!("  Sector size:     ashift={}\n\n", pool.ashift));

    // ── Groups ─────────────────────────────────────────────────────────
    out.push_str(&format!("── Vdevs ({}) ──────────────────────────────────\n", pool.vdevs.len()));
    for (i, v) in pool.vdevs.iter().enumerate() {
        let sizes = v.drives.iter().map(|d| d.label()).collect::<Vec<_>>().join(", ");
        out.push_str(&format!(
            "  #{:<2} {:<8} {:<10} raw {:>12}  usable {:>12}\n",
            i + 1,
            v.kind.keyword(),
            plural(v.drives.len(), "drive"),
            fmt_tb(capacity::raw_capacity(v), decimals),
            fmt_tb(capacity::group_capacity(v), decimals),
        ));
        if !sizes.is_empty() {
            out.push_str(&format!("      [{}]\n", sizes));
        }
        if let Some(msg) = advisories::validation_message(v) {
            out.push_str(&format!("      ! {}\n", msg));
        }
    }
    out.push('\n');

    // ── Support devices ────────────────────────────────────────────────
    out.push_str("── Support Devices ────────────────────────────\n");
    let spares = pool.spares.iter().map(|d| d.label()).collect::<Vec<_>>().join(", ");
    out.push_str(&format!(
        "  Spares: {}\n",
        if spares.is_empty() { "none".to_string() } else { spares }
    ));
    out.push_str(&format!(
        "  SLOG:   {}\n",
        match &pool.slog {
            Some(d) if pool.slog_mirrored => format!("{} (mirrored)", d.label()),
            Some(d) => d.label(),
            None    => "none".to_string(),
        }
    ));
    out.push_str(&format!(
        "  L2ARC:  {}\n\n",
        pool.l2arc.map(|d| d.label()).unwrap_or_else(|| "none".to_string())
    ));

    // ── Advisories ─────────────────────────────────────────────────────
    out.push_str(&format!("── Advisories ({}) ─────────────────────────────\n", advs.len()));
    if advs.is_empty() {
        out.push_str("  ● No advisories\n");
    } else {
        for a in advs {
            out.push_str(&format!("  [{}]  {}\n", a.severity.label(), a.message));
        }
    }
    out.push('\n');

    // ── Command ────────────────────────────────────────────────────────
    out.push_str("── Command ────────────────────────────────────\n");
    out.push_str(&zpool::create_command(pool));
    out.push_str("\n\n");
    out.push_str("Capacities are estimates. Actual usable space depends on metadata,\n");
    out.push_str("padding and compression; verify device paths before running.\n");

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::pool::{Drive, GroupType, Vdev};

    fn report(pool: &Pool) -> String {
        let result = capacity::pool_capacity(pool);
        render(pool, &result, &advisories::evaluate(pool), 2, "2026-01-01 00:00:00")
    }

    #[test]
    fn default_pool_report() {
        let text = report(&Pool::default());
        assert!(text.contains("zplan Pool Report: tank"));
        assert!(text.contains("Raw capacity:    12.00 TB"));
        assert!(text.contains("Usable capacity: 8.00 TB"));
        assert!(text.contains("Efficiency:      66.7%"));
        assert!(text.contains("Protection:      1 drive failure per vdev"));
        assert!(text.contains("No advisories"));
        assert!(text.contains("zpool create"));
    }

    #[test]
    fn report_lists_problems() {
        let pool = Pool {
            vdevs: vec![Vdev::new(GroupType::Stripe, vec![Drive::tb(1.0)]),
                        Vdev::new(GroupType::Raidz2, vec![Drive::tb(1.0); 2])],
            slog:  Some(Drive::gb(8.0)),
            ..Pool::default()
        };
        let text = report(&pool);
        assert!(text.contains("[CRIT]"));
        assert!(text.contains("raidz2 requires at least 4 drives"));
        assert!(text.contains("SLOG:   8 GB"));
    }

    #[test]
    fn empty_pool_efficiency_not_a_number() {
        let pool = Pool { vdevs: Vec::new(), ..Pool::default() };
        let text = report(&pool);
        assert!(text.contains("Efficiency:      n/a"));
        assert!(text.contains("Raw capacity:    0.00 TB"));
        assert!(text.contains("Usable capacity: 0.00 TB"));
        assert!(!text.contains("-0.00"));
    }
}
