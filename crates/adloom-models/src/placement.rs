//! Ad placement requests for the branding pipeline.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// A requested brand integration: which brand goes on which on-screen
/// subject, optionally bounded to a time range. Request-scoped, never
/// persisted.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct Placement {
    /// On-screen subject the brand attaches to.
    pub character: String,
    /// Brand to integrate.
    pub brand: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_seconds: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_seconds: Option<f64>,
}

impl Placement {
    pub fn new(character: impl Into<String>, brand: impl Into<String>) -> Self {
        Self {
            character: character.into(),
            brand: brand.into(),
            start_seconds: None,
            end_seconds: None,
        }
    }
}
