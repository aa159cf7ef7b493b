//! Config files specify sizes as "500K" or "1M" but rotation and retention
//! operate on raw bytes. These two functions bridge that gap.

/// Both the one- and two-letter spellings of each unit are accepted.
const UNITS: [(&str, u64); 6] = [
    ("GB", 1 << 30),
    ("MB", 1 << 20),
    ("KB", 1 << 10),
    ("G", 1 << 30),
    ("M", 1 << 20),
    ("K", 1 << 10),
];

/// Config files use "500M"/"1G" notation, not raw byte counts. Fractions
/// like "1.5M" are accepted; unknown suffixes and negatives are not.
#[must_use]
pub fn parse_size(s: &str) -> Option<u64> {
    let s = s.trim().to_uppercase();
    let (digits, unit) = UNITS
        .iter()
        .find_map(|(suffix, unit)| s.strip_suffix(suffix).map(|rest| (rest, *unit)))
        .unwrap_or((s.as_str(), 1));

    let value: f64 = digits.trim().parse().ok()?;
    if value < 0.0 {
        return None;
    }

    #[allow(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        clippy::cast_precision_loss
    )]
    Some((value * unit as f64) as u64)
}

/// Raw byte counts are unreadable in reports.
#[must_use]
pub fn format_size(bytes: u64) -> String {
    const KIB: f64 = 1024.0;

    #[allow(clippy::cast_precision_loss)]
    let b = bytes as f64;

    if b >= KIB * KIB * KIB {
        format!("{:.2} GB", b / (KIB * KIB * KIB))
    } else if b >= KIB * KIB {
        format!("{:.2} MB", b / (KIB * KIB))
    } else if b >= KIB {
        format!("{:.2} KB", b / KIB)
    } else {
        format!("{bytes} B")
    }
}
