//! Embedding preset catalog helpers.
//!
//! The server owns the catalog (`GET /models`). When it cannot be reached a
//! front end can still offer the built-in presets below, marked offline.

use tracing::warn;

use crate::{
    error_handler::SearchApiError,
    models::model_spec::{EmbeddingBackend, ModelSpec, ModelsResponse, PresetModel},
};

/// Models available to a front end plus whether they came from the server.
#[derive(Debug, Clone, PartialEq)]
pub struct ModelCatalog {
    pub models: Vec<PresetModel>,
    pub connected: bool,
}

fn preset(id: &str, backend: EmbeddingBackend, name: &str) -> PresetModel {
    PresetModel {
        preset_id: id.to_string(),
        spec: ModelSpec::new(backend, name),
    }
}

/// Presets assumed to exist on a stock server.
pub fn fallback_presets() -> Vec<PresetModel> {
    vec![
        preset("bge-m3", EmbeddingBackend::FastEmbed, "BAAI/bge-m3"),
        preset(
            "ko-sbert",
            EmbeddingBackend::SentenceTransformer,
            "./models/ko-sbert",
        ),
        preset(
            "mE5-base",
            EmbeddingBackend::SentenceTransformer,
            "intfloat/multilingual-e5-base",
        ),
        preset(
            "mE5-large",
            EmbeddingBackend::SentenceTransformer,
            "intfloat/multilingual-e5-large",
        ),
    ]
}

/// Turns the outcome of `list_models` into a catalog, falling back to
/// [`fallback_presets`] on any error.
pub fn resolve_models(result: Result<ModelsResponse, SearchApiError>) -> ModelCatalog {
    match result {
        Ok(resp) => ModelCatalog {
            models: resp.models,
            connected: true,
        },
        Err(err) => {
            warn!(error = %err, "model catalog unavailable, using built-in presets");
            ModelCatalog {
                models: fallback_presets(),
                connected: false,
            }
        }
    }
}

/// Picks `last` when it is still in `models`, else the first model.
pub fn select_preset<'a>(models: &'a [PresetModel], last: Option<&str>) -> Option<&'a PresetModel> {
    last.and_then(|id| models.iter().find(|m| m.preset_id == id))
        .or_else(|| models.first())
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::StatusCode;

    #[test]
    fn fallback_catalog_contents() {
        let models = fallback_presets();
        let ids: Vec<&str> = models.iter().map(|m| m.preset_id.as_str()).collect();
        assert_eq!(ids, ["bge-m3", "ko-sbert", "mE5-base", "mE5-large"]);
        assert_eq!(models[0].spec.backend, EmbeddingBackend::FastEmbed);
        assert!(models.iter().all(|m| m.spec.normalize));
    }

    #[test]
    fn resolve_uses_server_list_when_available() {
        let server = ModelsResponse {
            models: vec![preset("only", EmbeddingBackend::FastEmbed, "x")],
        };
        let catalog = resolve_models(Ok(server.clone()));
        assert!(catalog.connected);
        assert_eq!(catalog.models, server.models);
    }

    #[test]
    fn resolve_falls_back_on_error() {
        let err = SearchApiError::RequestFailed {
            status: StatusCode::BAD_GATEWAY,
            message: "failed to fetch models".into(),
        };
        let catalog = resolve_models(Err(err));
        assert!(!catalog.connected);
        assert_eq!(catalog.models, fallback_presets());
    }

    #[test]
    fn selection_prefers_last_then_first() {
        let models = fallback_presets();
        assert_eq!(
            select_preset(&models, Some("mE5-base")).map(|m| m.preset_id.as_str()),
            Some("mE5-base")
        );
        assert_eq!(
            select_preset(&models, Some("gone")).map(|m| m.preset_id.as_str()),
            Some("bge-m3")
        );
        assert_eq!(
            select_preset(&models, None).map(|m| m.preset_id.as_str()),
            Some("bge-m3")
        );
        assert!(select_preset(&[], Some("bge-m3")).is_none());
    }
}
