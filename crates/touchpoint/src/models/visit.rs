use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::Value;

pub const DIRECT_SOURCE: &str = "direct";
pub const NOT_SET: &str = "(not set)";

pub const UTM_SOURCE: &str = "utm_source";
pub const UTM_MEDIUM: &str = "utm_medium";
pub const UTM_CAMPAIGN: &str = "utm_campaign";
pub const UTM_TERM: &str = "utm_term";
pub const UTM_CONTENT: &str = "utm_content";

pub const UTM_PARAMS: [&str; 5] = [UTM_SOURCE, UTM_MEDIUM, UTM_CAMPAIGN, UTM_TERM, UTM_CONTENT];

/// Canonical `{source, medium, campaign, term, content}` attribution of one page load.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
pub struct AttributionTuple {
    pub utm_source: String,
    pub utm_medium: String,
    pub utm_campaign: String,
    pub utm_term: String,
    pub utm_content: String,
}

impl Default for AttributionTuple {
    fn default() -> Self {
        Self {
            utm_source: DIRECT_SOURCE.to_string(),
            utm_medium: NOT_SET.to_string(),
            utm_campaign: NOT_SET.to_string(),
            utm_term: NOT_SET.to_string(),
            utm_content: NOT_SET.to_string(),
        }
    }
}

impl AttributionTuple {
    #[must_use]
    pub fn is_direct(&self) -> bool {
        self.utm_source == DIRECT_SOURCE
    }

    /// Returns the field addressed by a UTM parameter name.
    pub fn field_mut(&mut self, param: &str) -> Option<&mut String> {
        match param {
            UTM_SOURCE => Some(&mut self.utm_source),
            UTM_MEDIUM => Some(&mut self.utm_medium),
            UTM_CAMPAIGN => Some(&mut self.utm_campaign),
            UTM_TERM => Some(&mut self.utm_term),
            UTM_CONTENT => Some(&mut self.utm_content),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct VisitRecord {
    pub utm: AttributionTuple,

    /// External referrer of the visit; empty for same-site or absent referrers.
    #[serde(default)]
    pub referrer: String,

    #[serde(default)]
    pub timestamp: String,
}

/// Two-slot persisted visit history.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct VisitLedger {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_visit: Option<VisitRecord>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub second_visit: Option<VisitRecord>,
}

impl VisitLedger {
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.first_visit.is_none() && self.second_visit.is_none()
    }
}

#[must_use]
pub fn json_schema() -> Value {
    let schema = schemars::schema_for!(VisitLedger);
    match serde_json::to_value(schema) {
        Ok(value) => value,
        Err(error) => {
            panic!("failed to serialize generated visit ledger schema: {error}");
        }
    }
}
