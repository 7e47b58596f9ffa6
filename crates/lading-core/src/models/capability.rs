//! Capability request/response envelope for the command interface.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use super::shipment::{BatchResult, ParsedDocument};

/// Capability tag used when the request itself could not be read.
pub const UNKNOWN_CAPABILITY: &str = "unknown";

/// Supported capabilities.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Capability {
    ParsePdf,
    ParseDirectory,
}

impl Capability {
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "parse_pdf" => Some(Self::ParsePdf),
            "parse_directory" => Some(Self::ParseDirectory),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ParsePdf => "parse_pdf",
            Self::ParseDirectory => "parse_directory",
        }
    }

    /// Name of the argument this capability requires.
    pub fn required_arg(&self) -> &'static str {
        match self {
            Self::ParsePdf => "pdf_path",
            Self::ParseDirectory => "directory_path",
        }
    }
}

/// Incoming request, e.g. `{"capability": "parse_pdf", "args": {"pdf_path": "..."}}`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CapabilityRequest {
    #[serde(default, deserialize_with = "capability_name")]
    pub capability: Option<String>,

    #[serde(default)]
    pub args: Value,
}

impl CapabilityRequest {
    /// String argument by name, if present.
    pub fn arg(&self, name: &str) -> Option<&str> {
        self.args.get(name).and_then(Value::as_str)
    }
}

/// Non-string capability values are kept as their JSON text so they can be
/// reported as unknown.
fn capability_name<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => None,
        Some(Value::String(name)) => Some(name),
        Some(other) => Some(other.to_string()),
    })
}

/// Success payload of a capability.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CapabilityPayload {
    Document(ParsedDocument),
    Batch(BatchResult),
}

/// Reply envelope: exactly one of `result` and `error` is set.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CapabilityResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    result: Option<CapabilityPayload>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    error: Option<String>,

    pub capability: String,
}

impl CapabilityResponse {
    pub fn success(capability: impl Into<String>, payload: CapabilityPayload) -> Self {
        Self {
            result: Some(payload),
            error: None,
            capability: capability.into(),
        }
    }

    pub fn failure(capability: impl Into<String>, error: impl Into<String>) -> Self {
        Self {
            result: None,
            error: Some(error.into()),
            capability: capability.into(),
        }
    }

    pub fn result(&self) -> Option<&CapabilityPayload> {
        self.result.as_ref()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn is_success(&self) -> bool {
        self.result.is_some()
    }
}
