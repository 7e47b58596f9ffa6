//! Whitespace collapsing and date reformatting.

use chrono::NaiveDateTime;
use tracing::warn;

use super::patterns::WHITESPACE;

/// Source date-time layout, e.g. `Oct 20, 2025 11:59:00 PM`.
pub const SOURCE_DATETIME_FORMAT: &str = "%b %d, %Y %I:%M:%S %p";

/// Output date layout, e.g. `20/10/2025`.
pub const OUTPUT_DATE_FORMAT: &str = "%d/%m/%Y";

/// Collapse every whitespace run (line breaks included) into one space and trim.
pub fn collapse_whitespace(s: &str) -> String {
    WHITESPACE.replace_all(s, " ").trim().to_string()
}

/// Convert `Oct 20, 2025 11:59:00 PM` to `20/10/2025`.
pub fn try_convert_date(date: &str) -> Result<String, chrono::ParseError> {
    let cleaned = collapse_whitespace(date);
    let parsed = NaiveDateTime::parse_from_str(&cleaned, SOURCE_DATETIME_FORMAT)?;
    Ok(parsed.format(OUTPUT_DATE_FORMAT).to_string())
}

/// Like [`try_convert_date`], but returns the input unchanged on failure.
pub fn convert_date(date: &str) -> String {
    match try_convert_date(date) {
        Ok(converted) => converted,
        Err(e) => {
            warn!("Error converting date format: {:?}, {}", date, e);
            date.to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collapse_whitespace() {
        assert_eq!(collapse_whitespace("  Agropur\n Industrial\t\tDiv \r\n"), "Agropur Industrial Div");
        assert_eq!(collapse_whitespace(""), "");
    }

    #[test]
    fn test_convert_date() {
        assert_eq!(convert_date("Oct 20, 2025 11:59:00 PM"), "20/10/2025");
        assert_eq!(convert_date("Jan 3, 2026 7:05:00 AM"), "03/01/2026");
    }

    #[test]
    fn test_convert_date_across_lines() {
        assert_eq!(convert_date("Oct 22, 2025\n 8:00:00 AM"), "22/10/2025");
    }

    #[test]
    fn test_unparsable_date_is_returned_unchanged() {
        assert_eq!(convert_date("garbage"), "garbage");
        assert_eq!(convert_date("Feb 30, 2025 1:00:00 PM"), "Feb 30, 2025 1:00:00 PM");
        assert!(try_convert_date("garbage").is_err());
    }
}
