use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::models::model_spec::ModelSpec;

/// Point id as returned by the server: integer or string.
///
/// Qdrant ids are `u64` or UUID strings, but the API passes ids through
/// untyped, so negative integers decode too. Non-negative values always land
/// in `Num`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PointId {
    Num(u64),
    Signed(i64),
    Uuid(String),
}

impl fmt::Display for PointId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PointId::Num(n) => write!(f, "{n}"),
            PointId::Signed(n) => write!(f, "{n}"),
            PointId::Uuid(s) => f.write_str(s),
        }
    }
}

/// One ranked search result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Hit {
    pub id: PointId,
    pub score: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payload: Option<Map<String, Value>>,
}

impl Hit {
    /// Score scaled to percent (`0.9` -> `90.0`).
    pub fn similarity_percent(&self) -> f64 {
        self.score * 100.0
    }

    /// The `text` payload field, when it is a string.
    pub fn text(&self) -> Option<&str> {
        self.payload.as_ref()?.get("text")?.as_str()
    }

    /// Payload entries other than `text`.
    pub fn extra_payload(&self) -> Vec<(&str, &Value)> {
        self.payload
            .iter()
            .flat_map(|p| p.iter())
            .filter(|(k, _)| k.as_str() != "text")
            .map(|(k, v)| (k.as_str(), v))
            .collect()
    }
}

/// Body of a successful `POST /search`.
///
/// `hits` is in server rank order; it is never re-sorted client side.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResponse {
    pub took_ms: u64,
    pub model: ModelSpec,
    pub collection: String,
    pub total_candidates: u64,
    pub hits: Vec<Hit>,
}
