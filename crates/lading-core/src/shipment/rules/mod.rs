//! Rule-based field extractors for shipment tenders.

pub mod detect;
pub mod normalize;
pub mod patterns;
pub mod shipment_type;
pub mod stops;
pub mod vendor;

pub use detect::detect_template;
pub use normalize::{collapse_whitespace, convert_date, try_convert_date};
pub use shipment_type::extract_shipment_type;
pub use stops::StopTable;
pub use vendor::{classify_vendor_name, extract_vendor_name, VendorNameShape};
