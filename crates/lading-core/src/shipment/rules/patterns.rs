//! Common regex patterns for shipment tender extraction.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    // Whitespace runs, including line breaks
    pub static ref WHITESPACE: Regex = Regex::new(r"\s+").unwrap();

    // Template detection: a per-item pickup date-time
    pub static ref TEMPLATE2_MARKER: Regex = Regex::new(
        r"(?i)Pickup\s*:\s*\w{3}\s+\d{1,2},\s+\d{4}\s+\d{1,2}:\d{2}:\d{2}"
    ).unwrap();

    // Stop blocks; destination may span lines
    pub static ref STOP_BLOCK: Regex = Regex::new(
        r"(?is)Stop:\s*(\d+)\s*Destination:\s*(.*?)\s*Stop Location Memo:"
    ).unwrap();

    // Vendor name shapes, tried in order
    pub static ref VENDOR_NUMBERED_WITH_STOP: Regex = Regex::new(
        r"^\d+\s*-\s*(.*?)\s*-\s*\d+"
    ).unwrap();

    pub static ref VENDOR_NAME_FIRST: Regex = Regex::new(
        r"^(.*?)\s*-\s*\d+\s*-"
    ).unwrap();

    pub static ref VENDOR_NUMBERED: Regex = Regex::new(
        r"^\d+\s*-\s*(.+?)$"
    ).unwrap();

    // Trailing "- <stop> - <location>" on a vendor block
    pub static ref VENDOR_STOP_SEGMENT: Regex = Regex::new(
        r"-\s*(\d+)\s*-\s*(.+)$"
    ).unwrap();

    // Leading "<stop>," on a destination
    pub static ref DESTINATION_STOP_NUMBER: Regex = Regex::new(
        r"^(\d+),"
    ).unwrap();

    // Template-1 document-level dates (already DD/MM/YYYY)
    pub static ref PICKUP_ON: Regex = Regex::new(
        r"(?i)Pickup\s+On\s*:\s*(\d{2}/\d{2}/\d{4})"
    ).unwrap();

    pub static ref DELIVER_ON: Regex = Regex::new(
        r"(?i)Deliver\s+On\s*:\s*(\d{2}/\d{2}/\d{4})"
    ).unwrap();

    // Template-1 line item:
    // 1 vendor no, 2 vendor/route, 3 cube, 4 weight, 5 pieces, 6 PO, 7 pallet count, 8 trailing
    pub static ref TEMPLATE1_LINE_ITEM: Regex = Regex::new(
        r"(\d+)\s+-\s+(.*)\s*Cube\s*:\s*([0-9,]+)\s*Weight\s*:\s*([0-9,]+)\s*Pieces\s*:\s*([0-9,]+)\s*[A-Z]{3}-PO-\d{2}-\d{4}-(\d+).*\s+Ref\s*Number:.*\s*Pallet\s*Count:(.*)\s*(.*)"
    ).unwrap();

    // Description near a PO when the line-item capture came back empty
    pub static ref PALLET_COUNT_FALLBACK: Regex = Regex::new(
        r"(?i)Pallet\s+Count:\s*([^\n|]+)"
    ).unwrap();

    // Template-2 line item; vendor block may span lines:
    // 1 vendor no, 2 vendor block, 3 cube, 4 weight, 5 pieces, 6 full PO, 7 PO number
    pub static ref TEMPLATE2_LINE_ITEM: Regex = Regex::new(
        r"(\d{6})\s+-\s+([\s\S]+?)\s*Cube\s*:\s*([0-9,]+)\s+Weight\s*:\s*([0-9,]+)\s+Pieces\s*:\s*([0-9,]+)\s+([A-Z]{3}-PO-\d{2}-\d{4}-(\d+))"
    ).unwrap();

    // Template-2 description, cut at the next Pickup/Delivery marker
    pub static ref PALLET_COUNT: Regex = Regex::new(
        r"Pallet\s+Count:\s*([^\n]+)"
    ).unwrap();

    // Template-2 per-item date-times
    pub static ref PICKUP_DATETIME: Regex = Regex::new(
        r"(?i)Pickup\s*:\s*([A-Za-z]{3}\s+\d{1,2},\s+\d{4}\s+\d{1,2}:\d{2}:\d{2}\s*(?:AM|PM))"
    ).unwrap();

    pub static ref DELIVERY_DATETIME: Regex = Regex::new(
        r"(?i)Deliver(?:y)?\s*:\s*([A-Za-z]{3}\s+\d{1,2},\s+\d{4}[\s\S]*?\d{1,2}:\d{2}:\d{2}\s*(?:AM|PM))"
    ).unwrap();
}

/// Byte offset of the first case-insensitive occurrence of any ASCII `marker`
/// at or after the second character of `s`.
///
/// Mirrors a lazy one-or-more capture followed by a marker look-ahead.
pub fn cut_before_markers(s: &str, markers: &[&str], ignore_case: bool) -> usize {
    let Some((start, _)) = s.char_indices().nth(1) else {
        return s.len();
    };

    let haystack = if ignore_case {
        s.to_ascii_lowercase()
    } else {
        s.to_string()
    };

    markers
        .iter()
        .filter_map(|marker| {
            let marker = if ignore_case {
                marker.to_ascii_lowercase()
            } else {
                (*marker).to_string()
            };
            haystack[start..].find(&marker).map(|pos| start + pos)
        })
        .min()
        .unwrap_or(s.len())
}
