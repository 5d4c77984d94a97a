use serde::{Deserialize, Serialize};

/// Method used by the server to turn text into a vector.
///
/// On the wire the sentence-transformers backend is spelled `"st"`; the long
/// forms are accepted when decoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EmbeddingBackend {
    #[serde(rename = "fastembed")]
    FastEmbed,
    #[serde(
        rename = "st",
        alias = "sentence-transformer",
        alias = "sentence-transformers"
    )]
    SentenceTransformer,
}

impl EmbeddingBackend {
    pub fn as_str(&self) -> &'static str {
        match self {
            EmbeddingBackend::FastEmbed => "fastembed",
            EmbeddingBackend::SentenceTransformer => "st",
        }
    }
}

/// Prefixing mode for E5-family models (`query: ` / `passage: `).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum E5Mode {
    #[default]
    Auto,
    Query,
    Passage,
}

impl E5Mode {
    pub fn as_str(&self) -> &'static str {
        match self {
            E5Mode::Auto => "auto",
            E5Mode::Query => "query",
            E5Mode::Passage => "passage",
        }
    }
}

/// How text is embedded for a search.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelSpec {
    pub backend: EmbeddingBackend,
    /// Model identifier, a hub name (`BAAI/bge-m3`) or a local path.
    pub name: String,
    pub normalize: bool,
    pub e5_mode: E5Mode,
}

impl ModelSpec {
    /// Spec with `normalize = true` and `e5_mode = auto`, the server defaults.
    pub fn new(backend: EmbeddingBackend, name: impl Into<String>) -> Self {
        Self {
            backend,
            name: name.into(),
            normalize: true,
            e5_mode: E5Mode::Auto,
        }
    }
}

/// Server-owned catalog entry: a [`ModelSpec`] addressable by `preset_id`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PresetModel {
    pub preset_id: String,
    #[serde(flatten)]
    pub spec: ModelSpec,
}

/// Body of `GET /models`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelsResponse {
    pub models: Vec<PresetModel>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn backend_wire_names() {
        assert_eq!(
            serde_json::to_value(EmbeddingBackend::SentenceTransformer).unwrap(),
            json!("st")
        );
        assert_eq!(
            serde_json::to_value(EmbeddingBackend::FastEmbed).unwrap(),
            json!("fastembed")
        );

        let long: EmbeddingBackend = serde_json::from_value(json!("sentence-transformer")).unwrap();
        assert_eq!(long, EmbeddingBackend::SentenceTransformer);

        assert!(serde_json::from_value::<EmbeddingBackend>(json!("onnx")).is_err());
    }

    #[test]
    fn preset_model_is_flat() {
        let raw = json!({
            "preset_id": "mE5-base",
            "backend": "st",
            "name": "intfloat/multilingual-e5-base",
            "normalize": true,
            "e5_mode": "query"
        });
        let preset: PresetModel = serde_json::from_value(raw.clone()).unwrap();
        assert_eq!(preset.preset_id, "mE5-base");
        assert_eq!(preset.spec.backend, EmbeddingBackend::SentenceTransformer);
        assert_eq!(preset.spec.e5_mode, E5Mode::Query);
        assert_eq!(serde_json::to_value(&preset).unwrap(), raw);
    }

    #[test]
    fn model_spec_requires_all_fields() {
        let partial = json!({ "backend": "fastembed", "name": "BAAI/bge-m3" });
        assert!(serde_json::from_value::<ModelSpec>(partial).is_err());
    }
}
