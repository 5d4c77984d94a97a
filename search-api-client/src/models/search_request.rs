use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{error_handler::RequestValidationError, models::model_spec::ModelSpec};

/// Target collection and optional Qdrant filter.
///
/// `query_filter` is opaque to the client: it is forwarded as-is and only
/// checked for JSON well-formedness by [`crate::filter::validate_filter`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QdrantConfig {
    pub url: String,
    pub collection: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub query_filter: Option<Value>,
}

impl QdrantConfig {
    pub fn new(url: impl Into<String>, collection: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            collection: collection.into(),
            query_filter: None,
        }
    }

    pub fn with_filter(mut self, query_filter: Option<Value>) -> Self {
        self.query_filter = query_filter;
        self
    }
}

/// Body of `POST /search`.
///
/// Unset optionals are left out of the JSON so that the server defaults
/// apply. `preset_id` takes precedence over `model` on the server.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchRequest {
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preset_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<ModelSpec>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub top_k: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub threshold: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub with_payload: Option<bool>,
    pub qdrant: QdrantConfig,
}

impl SearchRequest {
    /// Creates a request with surrounding whitespace trimmed from `text`.
    pub fn new(text: impl AsRef<str>, qdrant: QdrantConfig) -> Self {
        Self {
            text: text.as_ref().trim().to_string(),
            preset_id: None,
            model: None,
            top_k: None,
            threshold: None,
            with_payload: None,
            qdrant,
        }
    }

    pub fn with_preset(mut self, preset_id: impl Into<String>) -> Self {
        self.preset_id = Some(preset_id.into());
        self
    }

    pub fn with_model(mut self, model: ModelSpec) -> Self {
        self.model = Some(model);
        self
    }

    pub fn with_top_k(mut self, top_k: u32) -> Self {
        self.top_k = Some(top_k);
        self
    }

    pub fn with_threshold(mut self, threshold: f32) -> Self {
        self.threshold = Some(threshold);
        self
    }

    pub fn with_payload(mut self, with_payload: bool) -> Self {
        self.with_payload = Some(with_payload);
        self
    }

    /// Checks the request before it is submitted.
    ///
    /// The transport never calls this; front ends do, so the user gets a
    /// local message instead of a server 422.
    ///
    /// # Errors
    /// The first failed check, in field order.
    pub fn validate(&self) -> Result<(), RequestValidationError> {
        if self.text.trim().is_empty() {
            return Err(RequestValidationError::EmptyText);
        }
        if self.qdrant.collection.trim().is_empty() {
            return Err(RequestValidationError::EmptyCollection);
        }
        if let Some(top_k) = self.top_k {
            if top_k == 0 {
                return Err(RequestValidationError::InvalidTopK(top_k));
            }
        }
        if let Some(threshold) = self.threshold {
            if !(threshold.is_finite() && (0.0..=1.0).contains(&threshold)) {
                return Err(RequestValidationError::ThresholdOutOfRange(threshold));
            }
        }
        Ok(())
    }
}
