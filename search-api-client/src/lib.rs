//! Client library for the vector search API.
//!
//! - [`SearchApiClient`] — health, model catalog and search calls
//! - [`filter::validate_filter`] — well-formedness check for Qdrant filter text
//! - [`catalog`] — offline preset catalog and preset selection
//! - [`telemetry`] — tracing layer scoped to this crate

pub mod catalog;
pub mod error_handler;
pub mod filter;
pub mod telemetry;

pub mod config {
    pub mod client_config;
    pub mod default_config;
}

pub mod models {
    pub mod health_response;
    pub mod model_spec;
    pub mod search_request;
    pub mod search_response;
}

pub mod services {
    pub mod search_api_service;
}

pub use config::client_config::{ClientConfig, DEFAULT_BASE_URL};
pub use error_handler::{
    ConfigError, ErrorKind, RequestValidationError, SearchApiError, SetupError,
};
pub use services::search_api_service::SearchApiClient;
