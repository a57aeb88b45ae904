/// Format a capacity in TB with `decimals` places: "10.67 TB"
pub fn fmt_tb(tb: f64, decimals: usize) -> String {
    format!("{:.*} TB", decimals, tb)
}

/// Format a percentage with one decimal: "66.7%". NaN (no drives) shows as "n/a".
pub fn fmt_pct(pct: f64) -> String {
    if pct.is_nan() { "n/a".to_string() } else { format!("{:.1}%", pct) }
}

/// "1 drive", "3 drives"
pub fn plural(n: usize, word: &str) -> String {
    format!("{} {}{}", n, word, if n == 1 { "" } else { "s" })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn capacity_formatting() {
        assert_eq!(fmt_tb(8.0, 2), "8.00 TB");
        assert_eq!(fmt_tb(10.666_666, 1), "10.7 TB");
        assert_eq!(fmt_tb(-1.0, 0), "-1 TB");
    }

    #[test]
    fn percentage_formatting() {
        assert_eq!(fmt_pct(66.666_7), "66.7%");
        assert_eq!(fmt_pct(f64::NAN), "n/a");
    }

    #[test]
    fn plurals() {
        assert_eq!(plural(1, "drive"), "1 drive");
        assert_eq!(plural(0, "spare"), "0 spares");
    }
}
