//! Stop/destination table built from `Stop: N ... Destination: ... Stop Location Memo:` blocks.

use tracing::{debug, warn};

use super::patterns::{DESTINATION_STOP_NUMBER, STOP_BLOCK};

/// Destinations indexed by `stop number - 1`.
///
/// Skipped stop numbers hold empty strings; a repeated stop number keeps the
/// text of its last occurrence.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StopTable {
    destinations: Vec<String>,
    warnings: Vec<String>,
}

impl StopTable {
    /// Build the table from raw document text.
    pub fn from_text(text: &str, max_stop_number: usize) -> Self {
        let mut table = Self::default();

        for caps in STOP_BLOCK.captures_iter(text) {
            let destination = caps[2].trim();
            match caps[1].parse::<usize>() {
                Ok(stop) if (1..=max_stop_number).contains(&stop) => {
                    table.insert(stop, destination);
                }
                _ => {
                    let message = format!(
                        "Ignoring stop {} (supported range is 1..={})",
                        &caps[1], max_stop_number
                    );
                    warn!("{}", message);
                    table.warnings.push(message);
                }
            }
        }

        debug!("Built stop table with {} entries", table.len());
        table
    }

    /// Set the destination for a 1-based stop number, growing the table as needed.
    pub fn insert(&mut self, stop: usize, destination: impl Into<String>) {
        if stop == 0 {
            return;
        }
        if self.destinations.len() < stop {
            self.destinations.resize(stop, String::new());
        }
        self.destinations[stop - 1] = destination.into();
    }

    /// Destination for a 1-based stop number.
    pub fn stop(&self, stop: usize) -> Option<&str> {
        stop.checked_sub(1)
            .and_then(|idx| self.destinations.get(idx))
            .map(String::as_str)
    }

    /// Stop 1, the origin by convention.
    pub fn origin(&self) -> &str {
        self.stop(1).unwrap_or_default()
    }

    /// First destination whose text starts with `<stop_number>,`.
    pub fn find_by_leading_number(&self, stop_number: &str) -> Option<&str> {
        self.destinations
            .iter()
            .find(|dest| {
                DESTINATION_STOP_NUMBER
                    .captures(dest)
                    .is_some_and(|caps| &caps[1] == stop_number)
            })
            .map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.destinations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.destinations.is_empty()
    }

    pub fn as_slice(&self) -> &[String] {
        &self.destinations
    }

    /// Diagnostics collected while building the table.
    pub fn warnings(&self) -> &[String] {
        &self.warnings
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MAX: usize = 1000;

    #[test]
    fn test_contiguous_stops() {
        let text = "Stop: 1 Destination: Warehouse A Stop Location Memo:\n\
                    Stop: 2 Destination: Store B Stop Location Memo:";
        let table = StopTable::from_text(text, MAX);

        assert_eq!(table.as_slice(), ["Warehouse A", "Store B"]);
        assert_eq!(table.origin(), "Warehouse A");
        assert_eq!(table.stop(2), Some("Store B"));
        assert_eq!(table.stop(3), None);
    }

    #[test]
    fn test_gaps_and_out_of_order() {
        let text = "Stop: 3 Destination: C Stop Location Memo: Stop: 1 Destination: A Stop Location Memo:";
        let table = StopTable::from_text(text, MAX);

        assert_eq!(table.as_slice(), ["A", "", "C"]);
    }

    #[test]
    fn test_last_occurrence_wins() {
        let text = "Stop: 2 Destination: First Stop Location Memo:\n\
                    Stop: 2 Destination: Second Stop Location Memo:";
        let table = StopTable::from_text(text, MAX);

        assert_eq!(table.stop(2), Some("Second"));
        assert_eq!(table.origin(), "");
    }

    #[test]
    fn test_multiline_destination() {
        let text = "stop:  1\nDestination:\n  1, Mount Pearl DC\n  123 Main St\n  Stop Location Memo: dock 4";
        let table = StopTable::from_text(text, MAX);

        assert_eq!(table.origin(), "1, Mount Pearl DC\n  123 Main St");
    }

    #[test]
    fn test_out_of_range_stop_is_ignored() {
        let text = "Stop: 0 Destination: Zero Stop Location Memo: Stop: 5000 Destination: Far Stop Location Memo:";
        let table = StopTable::from_text(text, MAX);

        assert!(table.is_empty());
        assert_eq!(table.warnings().len(), 2);
    }

    #[test]
    fn test_find_by_leading_number() {
        let mut table = StopTable::default();
        table.insert(1, "1, Mount Pearl DC");
        table.insert(2, "24, TRA St. Johns");

        assert_eq!(table.find_by_leading_number("24"), Some("24, TRA St. Johns"));
        assert_eq!(table.find_by_leading_number("2"), None);
    }
}
