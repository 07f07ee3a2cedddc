//! Derived-value calculations
//!
//! Pure arithmetic consumed by the assembler and by the form layer:
//! fine amounts, overweight figures, payment due dates, and the
//! two-decimal weight formatting used everywhere on the forms.

use chrono::{Days, NaiveDate};

/// Fine base amount per violation tier (first, second, third-and-later)
const FINE_TIERS: [u64; 3] = [300_000, 600_000, 1_000_000];

/// Surcharge per full 1000 kg of overweight
const OVERWEIGHT_SURCHARGE_PER_TON: u64 = 50_000;

/// Fine for a repeat-violation count plus measured overweight
///
/// The base is tiered by count (1 → 300 000, 2 → 600 000, 3 or more →
/// 1 000 000) and each full 1000 kg of overweight adds 50 000.
/// A count of zero carries no base fine.
///
/// # Examples
/// ```
/// use report_fill::calc::fine;
/// assert_eq!(fine(1, 0.0), 300_000);
/// assert_eq!(fine(3, 2500.0), 1_100_000);
/// ```
pub fn fine(violation_count: u32, overweight_kg: f64) -> u64 {
    let base = match violation_count {
        0 => 0,
        1 => FINE_TIERS[0],
        2 => FINE_TIERS[1],
        _ => FINE_TIERS[2],
    };

    let surcharge = if overweight_kg > 0.0 {
        (overweight_kg / 1000.0).floor() as u64 * OVERWEIGHT_SURCHARGE_PER_TON
    } else {
        0
    };

    base + surcharge
}

/// Overweight amount, clamped at zero
pub fn overweight(actual: f64, allowed: f64) -> f64 {
    (actual - allowed).max(0.0)
}

/// Overweight as a percentage of the allowed weight, one decimal
///
/// Returns 0.0 when the allowed weight is zero or negative (guarded
/// division) or when the actual weight does not exceed it.
pub fn overweight_percentage(actual: f64, allowed: f64) -> f64 {
    if allowed <= 0.0 {
        return 0.0;
    }
    let pct = ((actual - allowed) / allowed * 100.0).max(0.0);
    round1_half_up(pct)
}

/// Render a percentage as displayed on the form (e.g. "25.0%")
pub fn percent_label(pct: f64) -> String {
    format!("{pct:.1}%")
}

/// Payment due date: detection date plus `days` calendar days
///
/// Plain calendar arithmetic, no timezone conversion.
pub fn due_date(detection: NaiveDate, days: u64) -> NaiveDate {
    detection
        .checked_add_days(Days::new(days))
        .unwrap_or(detection)
}

/// Default payment window in days
pub const DUE_DAYS: u64 = 30;

/// Sum of the parseable entries, rounded to two decimals
///
/// Unparseable entries contribute 0 and never error.
pub fn total_weight<I, S>(values: I) -> f64
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let sum: f64 = values
        .into_iter()
        .filter_map(|v| v.as_ref().trim().parse::<f64>().ok())
        .sum();
    round2_half_up(sum)
}

/// Round to two decimals, half-up
///
/// Rounding through thousandths first keeps values like 15.505 (stored
/// as 15.50499…) from collapsing downward.
pub fn round2_half_up(v: f64) -> f64 {
    let milli = (v * 1000.0).round();
    (milli / 10.0).round() / 100.0
}

/// Round to one decimal, half-up
pub fn round1_half_up(v: f64) -> f64 {
    let centi = (v * 100.0).round();
    (centi / 10.0).round() / 10.0
}

/// Format a weight in tons with exactly two decimals, half-up
pub fn format_tons(v: f64) -> String {
    format!("{:.2}", round2_half_up(v))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_fine_tiers() {
        assert_eq!(fine(1, 0.0), 300_000);
        assert_eq!(fine(2, 0.0), 600_000);
        assert_eq!(fine(3, 0.0), 1_000_000);
        assert_eq!(fine(7, 0.0), 1_000_000);
    }

    #[test]
    fn test_fine_with_overweight() {
        // 2500 kg → 2 full tons → 100 000 surcharge
        assert_eq!(fine(3, 2500.0), 1_100_000);
        // 999 kg is below one full ton
        assert_eq!(fine(1, 999.0), 300_000);
        assert_eq!(fine(1, 1000.0), 350_000);
    }

    #[test]
    fn test_fine_zero_count() {
        assert_eq!(fine(0, 0.0), 0);
        assert_eq!(fine(0, 3000.0), 150_000);
    }

    #[test]
    fn test_fine_negative_overweight() {
        assert_eq!(fine(1, -500.0), 300_000);
    }

    #[test]
    fn test_overweight() {
        assert_eq!(overweight(50.0, 40.0), 10.0);
        assert_eq!(overweight(40.0, 40.0), 0.0);
        assert_eq!(overweight(30.0, 40.0), 0.0);
    }

    #[test]
    fn test_overweight_percentage() {
        assert_eq!(overweight_percentage(50.0, 40.0), 25.0);
        assert_eq!(overweight_percentage(40.0, 40.0), 0.0);
        assert_eq!(overweight_percentage(30.0, 40.0), 0.0);
    }

    #[test]
    fn test_overweight_percentage_guarded_division() {
        assert_eq!(overweight_percentage(0.0, 0.0), 0.0);
        assert_eq!(overweight_percentage(50.0, 0.0), 0.0);
        assert_eq!(overweight_percentage(50.0, -1.0), 0.0);
    }

    #[test]
    fn test_overweight_percentage_one_decimal() {
        // 46.5 / 44 → 5.6818…% → 5.7%
        assert_eq!(overweight_percentage(46.5, 44.0), 5.7);
    }

    #[test]
    fn test_percent_label() {
        assert_eq!(percent_label(overweight_percentage(0.0, 0.0)), "0.0%");
        assert_eq!(percent_label(overweight_percentage(50.0, 40.0)), "25.0%");
    }

    #[test]
    fn test_due_date() {
        let detection = NaiveDate::from_ymd_opt(2026, 1, 13).unwrap();
        let due = due_date(detection, DUE_DAYS);
        assert_eq!(due, NaiveDate::from_ymd_opt(2026, 2, 12).unwrap());
    }

    #[test]
    fn test_due_date_month_rollover() {
        let detection = NaiveDate::from_ymd_opt(2026, 12, 15).unwrap();
        let due = due_date(detection, 30);
        assert_eq!(due, NaiveDate::from_ymd_opt(2027, 1, 14).unwrap());
    }

    #[test]
    fn test_total_weight() {
        let values = ["10.5", "", "abc", "0", "-3", "5.005"];
        // 10.5 + 0 + (-3) + 5.005 = 12.505 → 12.51 (parseable entries,
        // including zero and negatives, all contribute)
        assert_eq!(total_weight(values), 12.51);
    }

    #[test]
    fn test_total_weight_all_unparseable() {
        assert_eq!(total_weight(["", "x", "--"]), 0.0);
    }

    #[test]
    fn test_round2_half_up() {
        assert_eq!(round2_half_up(15.505), 15.51);
        assert_eq!(round2_half_up(15.504), 15.50);
        assert_eq!(round2_half_up(10.5 + 5.005), 15.51);
        assert_eq!(round2_half_up(44.0), 44.0);
    }

    #[test]
    fn test_format_tons() {
        assert_eq!(format_tons(11.0), "11.00");
        assert_eq!(format_tons(15.505), "15.51");
        assert_eq!(format_tons(0.1), "0.10");
    }
}
