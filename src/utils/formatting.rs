//! Text formatting utilities for the photo gallery.
//!
//! This module provides helper functions for formatting values in a human-readable way.

use chrono::{DateTime, Local};

/// Formats a count with thousands separators for readability.
///
/// # Examples
/// ```ignore
/// assert_eq!(format_count(1000), "1,000");
/// assert_eq!(format_count(1234567), "1,234,567");
/// ```
pub fn format_count(count: usize) -> String {
    let s = count.to_string();
    let mut result = String::new();
    let chars: Vec<char> = s.chars().collect();
    for (i, ch) in chars.iter().enumerate() {
        if i > 0 && (chars.len() - i) % 3 == 0 {
            result.push(',');
        }
        result.push(*ch);
    }
    result
}

/// Formats an RFC 3339 timestamp as a local calendar date, e.g. "March 5, 2024".
///
/// Unparsable input is returned unchanged.
pub fn format_date(created_at: &str) -> String {
    match DateTime::parse_from_rfc3339(created_at) {
        Ok(date) => date.with_timezone(&Local).format("%B %-d, %Y").to_string(),
        Err(_) => created_at.to_string(),
    }
}

/// "1 photo" / "3 photos"
pub fn format_photo_count(count: usize) -> String {
    if count == 1 {
        "1 photo".to_string()
    } else {
        format!("{} photos", format_count(count))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_count() {
        assert_eq!(format_count(0), "0");
        assert_eq!(format_count(999), "999");
        assert_eq!(format_count(1000), "1,000");
        assert_eq!(format_count(1234567), "1,234,567");
    }

    #[test]
    fn test_format_date_uses_long_month_name() {
        // the local day may shift by one depending on the timezone
        let formatted = format_date("2024-03-15T12:00:00Z");
        assert!(formatted.starts_with("March 1"), "{}", formatted);
        assert!(formatted.ends_with(", 2024"), "{}", formatted);
    }

    #[test]
    fn test_format_date_passes_through_garbage() {
        assert_eq!(format_date("yesterday"), "yesterday");
    }

    #[test]
    fn test_format_photo_count() {
        assert_eq!(format_photo_count(1), "1 photo");
        assert_eq!(format_photo_count(1500), "1,500 photos");
    }
}
