// Path: crates/types/src/app/humanize.rs

use super::status::UNKNOWN_SENTINEL;

const MINUTE: f64 = 60.0;
const HOUR: f64 = 60.0 * MINUTE;
const DAY: f64 = 24.0 * HOUR;

/// Formats a duration in seconds as a short two-unit string such as
/// `"2h 15m"` or `"45s"`.
///
/// Durations of a minute or less are rounded to whole seconds. Above that the
/// larger unit is floored and the remainder is rounded into the next smaller
/// unit; once the larger unit exceeds 9 the remainder is dropped (`"12d"`).
pub fn humanize_duration(seconds: f64) -> String {
    if !seconds.is_finite() {
        return UNKNOWN_SENTINEL.to_string();
    }

    let (unit, ratio, big_unit, little_unit): (f64, u32, &str, &str) = if seconds > DAY {
        (DAY, 24, "d", "h")
    } else if seconds > HOUR {
        (HOUR, 60, "h", "m")
    } else if seconds > MINUTE {
        (MINUTE, 60, "m", "s")
    } else {
        return format!("{}s", seconds.round().max(0.0) as u64);
    };

    let mut big = (seconds / unit).floor() as u64;
    let mut little = ((seconds % unit) / (unit / f64::from(ratio))).round() as u64;
    if little >= u64::from(ratio) {
        big += 1;
        little = 0;
    }

    if big > 9 {
        return format!("{big}{big_unit}");
    }
    format!("{big}{big_unit} {little}{little_unit}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seconds() {
        assert_eq!(humanize_duration(0.0), "0s");
        assert_eq!(humanize_duration(3.5), "4s");
        assert_eq!(humanize_duration(60.0), "60s");
    }

    #[test]
    fn test_minutes_and_hours() {
        assert_eq!(humanize_duration(61.0), "1m 1s");
        assert_eq!(humanize_duration(150.0), "2m 30s");
        assert_eq!(humanize_duration(2.0 * HOUR + 15.0 * MINUTE), "2h 15m");
        assert_eq!(humanize_duration(1.0 * DAY + 3.0 * HOUR), "1d 3h");
    }

    #[test]
    fn test_large_values_drop_remainder() {
        assert_eq!(humanize_duration(12.0 * MINUTE + 5.0), "12m");
        assert_eq!(humanize_duration(30.0 * DAY + HOUR), "30d");
    }

    #[test]
    fn test_remainder_rounding_carries() {
        // 1m 59.7s rounds the remainder up to a full minute.
        assert_eq!(humanize_duration(119.7), "2m 0s");
        assert_eq!(humanize_duration(DAY + 23.0 * HOUR + 59.0 * MINUTE), "2d 0h");
    }

    #[test]
    fn test_non_finite() {
        assert_eq!(humanize_duration(f64::NAN), "???");
        assert_eq!(humanize_duration(f64::INFINITY), "???");
    }
}
