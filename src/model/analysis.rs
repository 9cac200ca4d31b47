//! Analysis result returned by the backend.

use serde::{Deserialize, Serialize};

/// Outcome of analysing one photo.
///
/// Fields missing from the response fall back to empty values, so a body
/// of the wrong shape still renders instead of failing.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AnalysisResult {
    pub body_type: String,
    pub skin_tone: String,
    pub recommendations: Recommendations,
}

/// Suggestions derived from body type and skin tone, in server order.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Recommendations {
    pub colors: Vec<String>,
    pub outfits: Vec<String>,
}
