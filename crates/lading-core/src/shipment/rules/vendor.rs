//! Vendor name isolation from composite vendor/route strings.

use tracing::{debug, warn};

use super::normalize::collapse_whitespace;
use super::patterns::{VENDOR_NAME_FIRST, VENDOR_NUMBERED, VENDOR_NUMBERED_WITH_STOP};

/// Which shape a vendor string was recognized as.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VendorNameShape {
    /// `<number> - <name> - <stop> - <location>`
    NumberedWithStop,
    /// `<name> - <stop> - <location>`
    NameFirst,
    /// `<number> - <name>`
    Numbered,
    /// Nothing matched; the cleaned input is used as the name.
    Unrecognized,
}

/// Split a composite vendor string into its bare name and the shape that matched.
///
/// The numbered-with-stop shape is tried first so names containing a second
/// numeric segment are not cut at the wrong dash.
pub fn classify_vendor_name(full: &str) -> (String, VendorNameShape) {
    let cleaned = collapse_whitespace(full);
    if cleaned.is_empty() {
        return (cleaned, VendorNameShape::Unrecognized);
    }

    let shapes = [
        (&*VENDOR_NUMBERED_WITH_STOP, VendorNameShape::NumberedWithStop),
        (&*VENDOR_NAME_FIRST, VendorNameShape::NameFirst),
        (&*VENDOR_NUMBERED, VendorNameShape::Numbered),
    ];

    for (pattern, shape) in shapes {
        if let Some(caps) = pattern.captures(&cleaned) {
            let name = caps[1].trim().to_string();
            debug!("Extracted vendor name ({:?}): {:?} from {:?}", shape, name, cleaned);
            return (name, shape);
        }
    }

    (cleaned, VendorNameShape::Unrecognized)
}

/// Return the bare vendor name from a composite vendor string.
///
/// Falls back to the whitespace-collapsed input when no shape matches.
pub fn extract_vendor_name(full: &str) -> String {
    let (name, shape) = classify_vendor_name(full);
    if shape == VendorNameShape::Unrecognized && !name.is_empty() {
        warn!("Could not extract vendor name from {:?}, returning full string", name);
    }
    name
}
