//! Text formatting helpers shared by commands and handlers.
//!
//! Numbers are always rendered with thousands separators and money with a `$`
//! prefix so every reply reads the same.

use chrono::{DateTime, Utc};

/// Formats an integer with comma thousands separators, e.g. `1,234,567`.
#[must_use]
pub fn format_number(value: i64) -> String {
    let digits = value.unsigned_abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 + 1);

    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    if value < 0 {
        format!("-{grouped}")
    } else {
        grouped
    }
}

/// Formats an amount of money, e.g. `$1,000` or `-$7,500`.
#[must_use]
pub fn format_currency(value: i64) -> String {
    if value < 0 {
        format!("-${}", format_number(value.saturating_abs()))
    } else {
        format!("${}", format_number(value))
    }
}

/// Renders a Discord relative timestamp (`<t:SECONDS:R>`).
#[must_use]
pub fn relative_timestamp(at: DateTime<Utc>) -> String {
    format!("<t:{}:R>", at.timestamp())
}

/// Embed title for the outcome of a work command.
#[must_use]
pub fn work_title(total: i64) -> String {
    match total.signum() {
        1 => format!("You earned {}", format_currency(total)),
        -1 => format!("You lost {}", format_currency(total.saturating_abs())),
        _ => "No luck this time".to_string(),
    }
}

/// Picks the singular or plural word for `count`.
#[must_use]
pub const fn pluralize<'a>(count: u64, singular: &'a str, plural: &'a str) -> &'a str {
    if count == 1 { singular } else { plural }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_format_number() {
        assert_eq!(format_number(0), "0");
        assert_eq!(format_number(999), "999");
        assert_eq!(format_number(1_000), "1,000");
        assert_eq!(format_number(1_234_567), "1,234,567");
        assert_eq!(format_number(-7_000), "-7,000");
        assert_eq!(format_number(i64::MIN), "-9,223,372,036,854,775,808");
    }

    #[test]
    fn test_format_currency() {
        assert_eq!(format_currency(500), "$500");
        assert_eq!(format_currency(12_500), "$12,500");
        assert_eq!(format_currency(-75_000), "-$75,000");
    }

    #[test]
    fn test_relative_timestamp() {
        let at = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        assert_eq!(relative_timestamp(at), "<t:1704067200:R>");
    }

    #[test]
    fn test_work_title() {
        assert_eq!(work_title(1_500), "You earned $1,500");
        assert_eq!(work_title(-8_000), "You lost $8,000");
        assert_eq!(work_title(0), "No luck this time");
    }

    #[test]
    fn test_pluralize() {
        assert_eq!(pluralize(1, "use", "uses"), "use");
        assert_eq!(pluralize(2, "use", "uses"), "uses");
        assert_eq!(pluralize(0, "use", "uses"), "uses");
    }
}
