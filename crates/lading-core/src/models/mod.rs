//! Data models for shipment extraction.

pub mod capability;
pub mod config;
pub mod shipment;
