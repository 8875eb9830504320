//! Marketplace responses

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Response to `brand-created`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BrandCreated {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub success: Option<bool>,

    /// Canonical brand ID assigned by the marketplace
    pub brand_id: String,

    /// Storefront path, relative to the marketplace base URL
    pub url: String,

    /// Remaining response fields (e.g. `directories`)
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Response to `book-generated`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookGenerated {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub success: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub book_id: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub brand_url: Option<String>,

    /// Number of books now in the brand's catalog
    pub catalog_size: u64,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Response to `seo-generated`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeoGenerated {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub success: Option<bool>,

    /// Post path, relative to the marketplace base URL
    pub post_url: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub slug: Option<String>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Response to `GET health`.
///
/// Only `status` is decoded; everything else, including the advertised
/// `webhooks`, stays in `extra` whatever its shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthStatus {
    pub status: String,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl HealthStatus {
    /// `status` is exactly `"ok"`
    pub fn is_ok(&self) -> bool {
        self.status == "ok"
    }

    /// Webhook paths the marketplace advertises, when `webhooks` is a list
    pub fn webhooks(&self) -> Vec<&str> {
        match self.extra.get("webhooks") {
            Some(Value::Array(paths)) => paths.iter().filter_map(Value::as_str).collect(),
            _ => Vec::new(),
        }
    }
}
