//! `zfs create` builder for a dataset inside the planned pool.

use serde::Serialize;

// ── Compression ───────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Algorithm {
    Off,
    On,
    Lz4,
    Gzip,
    Zstd,
    Zle,
    Lzjb,
}

impl Algorithm {
    pub const ALL: [Algorithm; 7] = [
        Algorithm::Off, Algorithm::On, Algorithm::Lz4, Algorithm::Gzip,
        Algorithm::Zstd, Algorithm::Zle, Algorithm::Lzjb,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Algorithm::Off  => "off",
            Algorithm::On   => "on",
            Algorithm::Lz4  => "lz4",
            Algorithm::Gzip => "gzip",
            Algorithm::Zstd => "zstd",
            Algorithm::Zle  => "zle",
            Algorithm::Lzjb => "lzjb",
        }
    }

    pub fn hint(&self) -> &'static str {
        match self {
            Algorithm::Off  => "no compression",
            Algorithm::On   => "default algorithm",
            Algorithm::Lz4  => "recommended",
            Algorithm::Gzip => "levels 1-9",
            Algorithm::Zstd => "better compression, good performance",
            Algorithm::Zle  => "zero length encoding",
            Algorithm::Lzjb => "legacy",
        }
    }

    /// Levels offered for this algorithm, weakest first. Empty when the
    /// algorithm takes none.
    pub fn levels(&self) -> Vec<String> {
        match self {
            Algorithm::Gzip => (1..=9).map(|l| l.to_string()).collect(),
            Algorithm::Zstd => (1..=19).map(|l| l.to_string())
                .chain((1..=10).map(|l| format!("fast-{}", l)))
                .collect(),
            _ => Vec::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Compression {
    pub algorithm: Algorithm,
    pub level:     Option<String>,
}

impl Default for Compression {
    fn default() -> Self {
        Self { algorithm: Algorithm::Lz4, level: None }
    }
}

impl Compression {
    /// Property value: the bare algorithm unless a level applies.
    pub fn value(&self) -> String {
        match (&self.algorithm, &self.level) {
            (Algorithm::Off | Algorithm::On | Algorithm::Lz4, _) => self.algorithm.name().to_string(),
            (alg, Some(level)) if !level.is_empty() => format!("{}-{}", alg.name(), level),
            (alg, _) => alg.name().to_string(),
        }
    }

    /// Step to the next algorithm, dropping any level.
    pub fn next_algorithm(&self) -> Self {
        let idx = Algorithm::ALL.iter().position(|a| *a == self.algorithm).unwrap_or(0);
        Self { algorithm: Algorithm::ALL[(idx + 1) % Algorithm::ALL.len()], level: None }
    }

    pub fn prev_algorithm(&self) -> Self {
        let n = Algorithm::ALL.len();
        let idx = Algorithm::ALL.iter().position(|a| *a == self.algorithm).unwrap_or(0);
        Self { algorithm: Algorithm::ALL[(idx + n - 1) % n], level: None }
    }

    /// Cycle through default → each level → default.
    pub fn next_level(&self) -> Self {
        let levels = self.algorithm.levels();
        let level = match &self.level {
            None => levels.first().cloned(),
            Some(cur) => levels.iter().position(|l| l == cur)
                .and_then(|i| levels.get(i + 1).cloned()),
        };
        Self { algorithm: self.algorithm, level }
    }
}

// ── Other properties ──────────────────────────────────────────────────

pub const RECORD_SIZES: [&str; 9] = ["4K", "8K", "16K", "32K", "64K", "128K", "256K", "512K", "1M"];
pub const CACHE_MODES:  [&str; 3] = ["all", "metadata", "none"];
pub const SIZE_SUFFIXES: [&str; 4] = ["K", "M", "G", "T"];

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SizeLimit {
    pub amount: u64,
    pub suffix: &'static str,
}

impl SizeLimit {
    /// Parse "500G" style input. A bare number takes a `G` suffix.
    pub fn parse(text: &str) -> Option<Self> {
        let text = text.trim();
        let digits = text.trim_end_matches(|c: char| c.is_ascii_alphabetic());
        let suffix_text = text[digits.len()..].to_uppercase();
        let amount = digits.parse::<u64>().ok()?;
        let suffix = if suffix_text.is_empty() {
            "G"
        } else {
            SIZE_SUFFIXES.iter().copied().find(|s| *s == suffix_text)?
        };
        Some(Self { amount, suffix })
    }

    pub fn value(&self) -> String {
        format!("{}{}", self.amount, self.suffix)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DatasetOptions {
    pub name:              String,
    pub mountpoint:        String,
    pub compression:       Compression,
    pub recordsize:        &'static str,
    pub primary_cache:     &'static str,
    pub secondary_cache:   &'static str,
    pub atime:             bool,
    pub exec:              bool,
    pub quota:             Option<SizeLimit>,
    pub reservation:       Option<SizeLimit>,
    pub custom_properties: Vec<(String, String)>,
}

impl Default for DatasetOptions {
    fn default() -> Self {
        Self {
            name:              String::new(),
            mountpoint:        String::new(),
            compression:       Compression::default(),
            recordsize:        "128K",
            primary_cache:     "all",
            secondary_cache:   "all",
            atime:             false,
            exec:              true,
            quota:             None,
            reservation:       None,
            custom_properties: Vec::new(),
        }
    }
}

fn on_off(b: bool) -> &'static str {
    if b { "on" } else { "off" }
}

/// Add a custom property; blank names or values are ignored.
pub fn add_property(opts: &DatasetOptions, name: &str, value: &str) -> DatasetOptions {
    let mut next = opts.clone();
    if !name.is_empty() && !value.is_empty() {
        next.custom_properties.push((name.to_string(), value.to_string()));
    }
    next
}

pub fn create_command(pool_name: &str, opts: &DatasetOptions) -> String {
    if opts.name.is_empty() {
        return "# Please specify a dataset name".to_string();
    }

    let mut props: Vec<String> = Vec::new();
    if !opts.mountpoint.is_empty() {
        props.push(format!("-o mountpoint={}", opts.mountpoint));
    }
    props.push(format!("-o compression={}", opts.compression.value()));
    props.push(format!("-o recordsize={}", opts.recordsize));
    props.push(format!("-o primarycache={}", opts.primary_cache));
    props.push(format!("-o secondarycache={}", opts.secondary_cache));
    props.push(format!("-o atime={}", on_off(opts.atime)));
    props.push(format!("-o exec={}", on_off(opts.exec)));
    if let Some(q) = &opts.quota {
        props.push(format!("-o quota={}", q.value()));
    }
    if let Some(r) = &opts.reservation {
        props.push(format!("-o reservation={}", r.value()));
    }
    for (k, v) in &opts.custom_properties {
        props.push(format!("-o {}={}", k, v));
    }

    format!("zfs create {} {}/{}", props.join(" "), pool_name, opts.name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn empty_name_yields_hint() {
        assert_eq!(create_command("tank", &DatasetOptions::default()), "# Please specify a dataset name");
    }

    #[test]
    fn defaults_render_every_fixed_property() {
        let opts = DatasetOptions { name: "data/docs".into(), ..DatasetOptions::default() };
        assert_eq!(
            create_command("tank", &opts),
            "zfs create -o compression=lz4 -o recordsize=128K -o primarycache=all \
             -o secondarycache=all -o atime=off -o exec=on tank/data/docs"
        );
    }

    #[test]
    fn optional_properties_in_order() {
        let opts = DatasetOptions {
            name:        "vm".into(),
            mountpoint:  "/srv/vm".into(),
            compression: Compression { algorithm: Algorithm::Zstd, level: Some("9".into()) },
            recordsize:  "64K",
            quota:       Some(SizeLimit { amount: 500, suffix: "G" }),
            reservation: Some(SizeLimit { amount: 50, suffix: "G" }),
            ..DatasetOptions::default()
        };
        let opts = add_property(&opts, "sync", "disabled");
        let opts = add_property(&opts, "", "ignored");
        assert_eq!(
            create_command("fast", &opts),
            "zfs create -o mountpoint=/srv/vm -o compression=zstd-9 -o recordsize=64K \
             -o primarycache=all -o secondarycache=all -o atime=off -o exec=on \
             -o quota=500G -o reservation=50G -o sync=disabled fast/vm"
        );
    }

    #[test]
    fn compression_value_rules() {
        let c = |a, l: Option<&str>| Compression { algorithm: a, level: l.map(String::from) }.value();
        assert_eq!(c(Algorithm::Lz4, Some("5")), "lz4");
        assert_eq!(c(Algorithm::Off, None), "off");
        assert_eq!(c(Algorithm::Gzip, None), "gzip");
        assert_eq!(c(Algorithm::Gzip, Some("")), "gzip");
        assert_eq!(c(Algorithm::Gzip, Some("6")), "gzip-6");
        assert_eq!(c(Algorithm::Zstd, Some("fast-3")), "zstd-fast-3");
    }

    #[test]
    fn level_cycle_returns_to_default() {
        let mut c = Compression { algorithm: Algorithm::Gzip, level: None };
        for expected in 1..=9 {
            c = c.next_level();
            assert_eq!(c.level.as_deref(), Some(expected.to_string().as_str()));
        }
        assert_eq!(c.next_level().level, None);
    }

    #[test]
    fn zstd_offers_fast_levels() {
        let levels = Algorithm::Zstd.levels();
        assert_eq!(levels.len(), 29);
        assert_eq!(levels.last().map(String::as_str), Some("fast-10"));
        assert!(Algorithm::Lz4.levels().is_empty());
    }

    #[test]
    fn size_limits_parse() {
        assert_eq!(SizeLimit::parse("500G"), Some(SizeLimit { amount: 500, suffix: "G" }));
        assert_eq!(SizeLimit::parse(" 2t "), Some(SizeLimit { amount: 2, suffix: "T" }));
        assert_eq!(SizeLimit::parse("64"), Some(SizeLimit { amount: 64, suffix: "G" }));
        assert_eq!(SizeLimit::parse("5P"), None);
        assert_eq!(SizeLimit::parse("G"), None);
    }

    #[test]
    fn algorithm_steps_wrap_both_ways() {
        let off = Compression { algorithm: Algorithm::Off, level: None };
        assert_eq!(off.prev_algorithm().algorithm, Algorithm::Lzjb);
        assert_eq!(off.prev_algorithm().next_algorithm(), off);
    }

    #[test]
    fn algorithm_step_drops_level() {
        let c = Compression { algorithm: Algorithm::Gzip, level: Some("3".into()) };
        assert_eq!(c.next_algorithm(), Compression { algorithm: Algorithm::Zstd, level: None });
    }
}
