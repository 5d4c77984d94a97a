//! Rendering of command results.

use anyhow::Result;
use colored::Colorize;
use search_api_client::{
    catalog::ModelCatalog,
    filter::{FilterPreset, FilterValidation},
    models::{
        health_response::HealthResponse, model_spec::PresetModel, search_response::SearchResponse,
    },
};
use serde::Serialize;
use serde_json::{Value, json};

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

pub fn print_health(base_url: &str, health: &HealthResponse, json: bool) -> Result<()> {
    if json {
        return print_json(health);
    }
    let state = if health.ok {
        "ok".green().bold()
    } else {
        "degraded".yellow().bold()
    };
    println!("{} {state}", base_url.bold());
    println!("  qdrant: {}", health.qdrant_url);
    Ok(())
}

pub fn print_models(catalog: &ModelCatalog, json: bool) -> Result<()> {
    if json {
        return print_json(&json!({
            "connected": catalog.connected,
            "models": catalog.models,
        }));
    }
    if !catalog.connected {
        println!(
            "{}",
            "server unreachable, showing built-in presets".yellow()
        );
    }
    for model in &catalog.models {
        println!("{}", model_line(model));
    }
    Ok(())
}

fn model_line(model: &PresetModel) -> String {
    format!(
        "{:<12} {:<10} {} (normalize={}, e5_mode={})",
        model.preset_id.bold(),
        model.spec.backend.as_str(),
        model.spec.name,
        model.spec.normalize,
        model.spec.e5_mode.as_str()
    )
}

pub fn print_search(resp: &SearchResponse, with_payload: bool, json: bool) -> Result<()> {
    if json {
        return print_json(resp);
    }

    println!(
        "{} hits from {} ({} candidates, {} ms, model {} / {})",
        resp.hits.len().to_string().bold(),
        resp.collection.bold(),
        resp.total_candidates,
        resp.took_ms,
        resp.model.backend.as_str(),
        resp.model.name
    );

    for (rank, hit) in resp.hits.iter().enumerate() {
        println!();
        println!(
            "#{} {} {}",
            rank + 1,
            format!("{:.1}%", hit.similarity_percent()).green().bold(),
            format!("id={}", hit.id).dimmed()
        );
        if let Some(text) = hit.text() {
            println!("  {}", text.trim());
        }
        if with_payload {
            for (key, value) in hit.extra_payload() {
                println!("  {} {}", format!("{key}:").cyan(), scalar(value));
            }
        }
    }
    Ok(())
}

fn scalar(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

pub fn print_filter_validation(outcome: &FilterValidation, json: bool) -> Result<()> {
    match (outcome, json) {
        (FilterValidation::Valid { parsed }, true) => {
            print_json(&json!({ "valid": true, "parsed": parsed }))
        }
        (FilterValidation::Invalid { error }, true) => {
            print_json(&json!({ "valid": false, "error": error }))
        }
        (FilterValidation::Valid { parsed: None }, false) => {
            println!("{} (no filter)", "valid".green().bold());
            Ok(())
        }
        (FilterValidation::Valid { parsed: Some(v) }, false) => {
            println!("{}", "valid".green().bold());
            print_json(v)
        }
        // reported by the caller as the command error
        (FilterValidation::Invalid { .. }, false) => Ok(()),
    }
}

pub fn print_filter_presets(presets: &[FilterPreset], json: bool) -> Result<()> {
    if json {
        let all: Vec<Value> = presets
            .iter()
            .map(|p| json!({ "key": p.key, "name": p.name, "filter": p.filter }))
            .collect();
        return print_json(&all);
    }
    for p in presets {
        println!("{} ({})", p.key.bold(), p.name);
        println!("{}", p.json_text());
        println!();
    }
    Ok(())
}
