//! Number formatting for metric tiles, axis ticks and annotations.

/// Group an integer's digits in thousands: `1234567` -> `"1,234,567"`.
#[must_use]
pub fn thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// Whole-dollar amount with thousands separators: `123456.6` -> `"$123,457"`.
#[must_use]
pub fn usd(value: f64) -> String {
    let rounded = value.round();
    if rounded < 0.0 {
        format!("-${}", thousands((-rounded) as u64))
    } else {
        format!("${}", thousands(rounded as u64))
    }
}

/// Compact axis tick: `185000` -> `"185k"`, `1200000` -> `"1.2M"`.
#[must_use]
pub fn compact(value: f64) -> String {
    let magnitude = value.abs();
    if magnitude >= 1_000_000.0 {
        format!("{:.1}M", value / 1_000_000.0)
    } else if magnitude >= 1_000.0 {
        format!("{:.0}k", value / 1_000.0)
    } else {
        format!("{value:.0}")
    }
}

/// Percentage with one decimal: `0.4567` -> `"45.7%"`.
#[must_use]
pub fn percent(fraction: f64) -> String {
    format!("{:.1}%", fraction * 100.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_thousands() {
        assert_eq!(thousands(0), "0");
        assert_eq!(thousands(999), "999");
        assert_eq!(thousands(1000), "1,000");
        assert_eq!(thousands(1_234_567), "1,234,567");
    }

    #[test]
    fn test_usd() {
        assert_eq!(usd(0.0), "$0");
        assert_eq!(usd(123_456.6), "$123,457");
        assert_eq!(usd(-1500.0), "-$1,500");
    }

    #[test]
    fn test_compact() {
        assert_eq!(compact(950.0), "950");
        assert_eq!(compact(185_000.0), "185k");
        assert_eq!(compact(1_200_000.0), "1.2M");
    }

    #[test]
    fn test_percent() {
        assert_eq!(percent(0.4567), "45.7%");
        assert_eq!(percent(1.0), "100.0%");
    }
}
