//! Command execution.

use anyhow::{Context, Result, anyhow, bail};
use search_api_client::{
    ClientConfig, SearchApiClient,
    catalog::{self, ModelCatalog},
    error_handler::validate_http_endpoint,
    filter::{self, FilterValidation, validate_filter},
    models::search_request::{QdrantConfig, SearchRequest},
};
use serde_json::Value;

use crate::cli::{
    args::{Command, ModelsArgs, SearchArgs, TesterArgs, ValidateFilterArgs},
    output,
};

/// Runs the parsed command.
pub async fn execute_command(args: TesterArgs) -> Result<()> {
    match &args.command {
        Command::ValidateFilter(a) => validate_filter_command(a, args.json),
        Command::FilterPresets => output::print_filter_presets(&filter::presets(), args.json),
        Command::Health => {
            let client = build_client(&args)?;
            let health = client.health().await?;
            output::print_health(client.base_url(), &health, args.json)
        }
        Command::Models(a) => models_command(&build_client(&args)?, a, args.json).await,
        Command::Search(a) => search_command(&build_client(&args)?, a, args.json).await,
    }
}

/// Env config first, then command line overrides.
fn build_client(args: &TesterArgs) -> Result<SearchApiClient> {
    let mut cfg = ClientConfig::from_env().context("invalid search API configuration")?;
    if let Some(url) = &args.api_url {
        validate_http_endpoint("--api-url", url)?;
        cfg.set_base_url(url);
    }
    if args.timeout_secs.is_some() {
        cfg.timeout_secs = args.timeout_secs;
    }
    Ok(SearchApiClient::new(cfg)?)
}

async fn models_command(client: &SearchApiClient, a: &ModelsArgs, json: bool) -> Result<()> {
    let catalog = load_catalog(client, a.fallback).await?;
    output::print_models(&catalog, json)
}

/// Server catalog; with `fallback`, the built-in presets when it is unreachable.
async fn load_catalog(client: &SearchApiClient, fallback: bool) -> Result<ModelCatalog> {
    let result = client.list_models().await;
    if fallback {
        return Ok(catalog::resolve_models(result));
    }
    Ok(ModelCatalog {
        models: result?.models,
        connected: true,
    })
}

/// First preset of the catalog, offline defaults included.
async fn default_preset(client: &SearchApiClient) -> Result<String> {
    let catalog = load_catalog(client, true).await?;
    catalog::select_preset(&catalog.models, None)
        .map(|m| m.preset_id.clone())
        .ok_or_else(|| anyhow!("server offers no model presets; pass --preset"))
}

async fn search_command(client: &SearchApiClient, a: &SearchArgs, json: bool) -> Result<()> {
    let query_filter = resolve_filter(a)?;

    let preset_id = match &a.preset {
        Some(p) => p.clone(),
        None => default_preset(client).await?,
    };

    let request = SearchRequest::new(
        &a.text,
        QdrantConfig::new(&a.qdrant_url, a.collection.trim()).with_filter(query_filter),
    )
    .with_preset(preset_id)
    .with_top_k(a.top_k)
    .with_threshold(a.threshold)
    .with_payload(!a.no_payload);

    request.validate()?;

    let response = client.search(&request).await?;
    output::print_search(&response, !a.no_payload, json)
}

fn resolve_filter(a: &SearchArgs) -> Result<Option<Value>> {
    if let Some(key) = &a.filter_preset {
        let preset = filter::preset(key)
            .ok_or_else(|| anyhow!("unknown filter preset `{key}` (see `filter-presets`)"))?;
        return Ok(Some(preset.filter));
    }

    let text = a.filter.as_deref().unwrap_or("");
    match validate_filter(text).into_query_filter() {
        Ok(parsed) => Ok(parsed),
        Err(error) => bail!("filter JSON error: {error}"),
    }
}

fn validate_filter_command(a: &ValidateFilterArgs, json: bool) -> Result<()> {
    let outcome = validate_filter(&a.filter);
    output::print_filter_validation(&outcome, json)?;
    match outcome {
        FilterValidation::Valid { .. } => Ok(()),
        FilterValidation::Invalid { error } => bail!("filter JSON error: {error}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use std::net::TcpListener;

    fn search_args(extra: &[&str]) -> SearchArgs {
        let mut argv = vec!["vector-search-tester", "search", "-t", "hello", "-c", "docs"];
        argv.extend_from_slice(extra);
        match TesterArgs::try_parse_from(argv).unwrap().command {
            Command::Search(a) => a,
            other => panic!("unexpected command {other:?}"),
        }
    }

    fn tester_args(extra: &[&str]) -> TesterArgs {
        let mut argv = vec!["vector-search-tester"];
        argv.extend_from_slice(extra);
        argv.push("health");
        TesterArgs::try_parse_from(argv).unwrap()
    }

    /// Base URL of a port nothing listens on.
    fn closed_port_url() -> String {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);
        format!("http://{addr}")
    }

    #[test]
    fn filter_preset_is_looked_up() {
        let a = search_args(&["--filter-preset", "category"]);
        let expected = filter::preset("category").unwrap().filter;
        assert_eq!(resolve_filter(&a).unwrap(), Some(expected));
    }

    #[test]
    fn unknown_filter_preset_is_an_error() {
        let a = search_args(&["--filter-preset", "nope"]);
        let err = resolve_filter(&a).unwrap_err().to_string();
        assert!(err.contains("unknown filter preset `nope`"), "{err}");
    }

    #[test]
    fn bad_filter_json_stops_the_search() {
        let a = search_args(&["--filter", r#"{"must":["#]);
        let err = resolve_filter(&a).unwrap_err().to_string();
        assert!(err.starts_with("filter JSON error: "), "{err}");
    }

    #[test]
    fn filter_text_is_parsed_or_skipped() {
        let a = search_args(&["--filter", r#"{"must":[]}"#]);
        assert_eq!(resolve_filter(&a).unwrap(), Some(serde_json::json!({ "must": [] })));

        assert_eq!(resolve_filter(&search_args(&[])).unwrap(), None);
        assert_eq!(resolve_filter(&search_args(&["--filter", "  "])).unwrap(), None);
        assert_eq!(resolve_filter(&search_args(&["--filter", "null"])).unwrap(), None);
    }

    #[test]
    fn filter_and_filter_preset_conflict() {
        let argv = [
            "vector-search-tester",
            "search",
            "-t",
            "q",
            "-c",
            "docs",
            "--filter",
            "{}",
            "--filter-preset",
            "tags",
        ];
        assert!(TesterArgs::try_parse_from(argv).is_err());
    }

    #[test]
    fn api_url_flag_overrides_env_config() {
        let args = tester_args(&["--api-url", "http://override:9000/", "--timeout-secs", "7"]);
        let client = build_client(&args).unwrap();
        assert_eq!(client.base_url(), "http://override:9000");
        assert_eq!(client.config().timeout_secs, Some(7));
    }

    #[test]
    fn api_url_flag_must_be_http() {
        for url in ["ftp://host:21", "localhost:5200"] {
            let args = tester_args(&["--api-url", url]);
            let err = build_client(&args).unwrap_err().to_string();
            assert!(err.contains("--api-url"), "{url}: {err}");
        }
    }

    #[tokio::test]
    async fn models_fallback_when_server_is_down() {
        let client = SearchApiClient::new(ClientConfig::new(closed_port_url())).unwrap();

        let catalog = load_catalog(&client, true).await.unwrap();
        assert!(!catalog.connected);
        assert_eq!(catalog.models, catalog::fallback_presets());

        assert!(load_catalog(&client, false).await.is_err());
    }

    #[tokio::test]
    async fn default_preset_offline_is_bge_m3() {
        let client = SearchApiClient::new(ClientConfig::new(closed_port_url())).unwrap();
        assert_eq!(default_preset(&client).await.unwrap(), "bge-m3");
    }
}
