use std::fmt::Write as _;

use chrono::format::{Item, StrftimeItems};
use chrono::{Local, NaiveDate};
use spdlog::warn;

pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

pub const FALLBACK_DATE_FORMAT: &str = "%Y-%m-%d";

/// Display date stored in the post, e.g. `2024年5月22日` for `%Y年%-m月%-d日`.
/// An invalid format falls back to `%Y-%m-%d`.
pub fn format_display_date(date: &NaiveDate, date_format: &str) -> String {
    let mut buf = String::new();
    if write!(buf, "{}", date.format(date_format)).is_err() {
        warn!("Invalid date format '{}', using {}", date_format, FALLBACK_DATE_FORMAT);
        return date.format(FALLBACK_DATE_FORMAT).to_string();
    }
    buf
}

/// True when chrono understands every specifier of `date_format`
pub fn is_valid_date_format(date_format: &str) -> bool {
    StrftimeItems::new(date_format).all(|item| !matches!(item, Item::Error))
}

/// Shortens `text` to `keep` characters plus `...` when it has more than `max` characters
pub fn ellipsize(text: &str, max: usize, keep: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    let short: String = text.chars().take(keep).collect();
    format!("{}...", short)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_display_date() {
        let date = NaiveDate::from_ymd_opt(2024, 5, 2).unwrap();
        assert_eq!(format_display_date(&date, "%Y年%-m月%-d日"), "2024年5月2日");
        assert_eq!(format_display_date(&date, "%Y-%m-%d"), "2024-05-02");
    }

    #[test]
    fn test_invalid_date_format_does_not_panic() {
        let date = NaiveDate::from_ymd_opt(2024, 5, 2).unwrap();
        assert_eq!(format_display_date(&date, "%Y年%Q"), "2024-05-02");
        assert!(!is_valid_date_format("%Y年%Q"));
        assert!(is_valid_date_format("%Y年%-m月%-d日"));
    }

    #[test]
    fn test_ellipsize() {
        assert_eq!(ellipsize("short", 30, 27), "short");
        assert_eq!(ellipsize(&"a".repeat(30), 30, 27), "a".repeat(30));
        assert_eq!(ellipsize(&"a".repeat(31), 30, 27), format!("{}...", "a".repeat(27)));
        assert_eq!(ellipsize("一二三四五", 3, 2), "一二...");
    }
}
