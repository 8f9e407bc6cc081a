use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A persisted record of one scanned and confirmed item.
///
/// Created exactly once, when the user confirms an analysis result, and
/// never mutated afterwards. Removal is only by explicit deletion by id.
/// Serialized field names match the v1 storage format (camelCase).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrackedProduct {
    pub id: String,
    pub name: String,
    pub price: f64,
    /// Currency code or symbol, display-only.
    pub currency: String,
    pub category: String,
    pub scanned_at: DateTime<Utc>,
    /// Embedded JPEG thumbnail of the scan, if one could be produced.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_base64: Option<String>,
    /// Model confidence in the price reading, in [0, 1].
    pub confidence: f64,
}

impl TrackedProduct {
    /// Build a new record from a confirmed analysis result.
    ///
    /// Generates a fresh unique id and stamps the scan time; both are
    /// immutable for the life of the record.
    pub fn from_result(result: &AnalysisResult, image_base64: Option<String>) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            name: result.product_name.clone(),
            price: result.price,
            currency: result.currency.clone(),
            category: result.category.clone(),
            scanned_at: Utc::now(),
            image_base64,
            confidence: result.confidence_score,
        }
    }
}

/// The transient structured output of one vision inference call.
///
/// Field names match the structured-output schema sent to the model.
/// The user may edit name/price/currency on the review screen before this
/// becomes a [`TrackedProduct`]; it is never persisted on its own.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    pub product_name: String,
    pub price: f64,
    /// Currency symbol as read from (or guessed for) the tag.
    pub currency: String,
    pub category: String,
    /// Confidence in the price reading, in [0, 1].
    pub confidence_score: f64,
}

/// The single persisted user setting: preferred currency code.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Preference {
    pub currency: String,
}

impl Default for Preference {
    fn default() -> Self {
        Self {
            currency: "USD".to_string(),
        }
    }
}
