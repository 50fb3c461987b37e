use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Severity of a single vendor risk item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Low,
    Medium,
    High,
}

impl Severity {
    pub fn label(&self) -> &'static str {
        match self {
            Severity::Low => "low",
            Severity::Medium => "medium",
            Severity::High => "high",
        }
    }
}

/// One labeled concern associated with a vendor.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct RiskItem {
    pub severity: Severity,
    pub description: String,
}

/// A known AI model/API vendor from the static catalog.
///
/// `transparency` and `compliance_notes` are passthrough metadata: never
/// inspected by the matcher or scorer, only surfaced to callers and the
/// prompt.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct VendorRecord {
    /// Unique stable identifier, e.g. "openai".
    pub id: String,
    /// Canonical display name, e.g. "OpenAI".
    pub name: String,
    /// Case-insensitive substrings that identify this vendor in free text.
    #[serde(default)]
    pub aliases: Vec<String>,
    #[serde(default)]
    pub risk_items: Vec<RiskItem>,
    #[serde(default)]
    pub transparency: Option<String>,
    #[serde(default)]
    pub compliance_notes: Option<String>,
}

impl VendorRecord {
    /// Counts of (high, medium, low) severity risk items.
    pub fn severity_counts(&self) -> (usize, usize, usize) {
        let mut high = 0;
        let mut medium = 0;
        let mut low = 0;
        for item in &self.risk_items {
            match item.severity {
                Severity::High => high += 1,
                Severity::Medium => medium += 1,
                Severity::Low => low += 1,
            }
        }
        (high, medium, low)
    }
}

/// Self-reported ratings extracted from the model's fenced JSON block.
///
/// The block is not contractually guaranteed: the upstream generator may
/// omit it or emit malformed JSON, in which case no ratings are returned.
/// Unknown fields in the block are ignored.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct SelfRatings {
    /// Overall governance readiness, 0-100.
    pub overall: u8,
    #[serde(default)]
    pub data_governance: Option<u8>,
    #[serde(default)]
    pub transparency: Option<u8>,
    #[serde(default)]
    pub accountability: Option<u8>,
    #[serde(default)]
    pub summary: Option<String>,
}
