//! Command line arguments.

use clap::{Args, Parser, Subcommand};

/// Interactive tester for the vector search API.
#[derive(Parser, Debug, Clone)]
#[command(name = "vector-search-tester")]
#[command(about = "Send queries to a vector search API and inspect ranked hits")]
#[command(version = env!("CARGO_PKG_VERSION"))]
pub struct TesterArgs {
    /// API server base URL (overrides SEARCH_API_URL)
    #[arg(long, global = true)]
    pub api_url: Option<String>,

    /// Request timeout in seconds (overrides SEARCH_API_TIMEOUT_SECS)
    #[arg(long, global = true)]
    pub timeout_secs: Option<u64>,

    /// Print raw JSON instead of formatted output
    #[arg(long, global = true)]
    pub json: bool,

    /// Client log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Check that the API server (and its Qdrant) is up
    Health,

    /// List embedding model presets offered by the server
    Models(ModelsArgs),

    /// Run a search
    Search(SearchArgs),

    /// Check filter JSON without sending anything
    #[command(name = "validate-filter")]
    ValidateFilter(ValidateFilterArgs),

    /// Show the built-in filter presets
    #[command(name = "filter-presets")]
    FilterPresets,
}

#[derive(Args, Debug, Clone)]
pub struct ModelsArgs {
    /// Show the built-in presets when the server cannot be reached
    #[arg(long)]
    pub fallback: bool,
}

#[derive(Args, Debug, Clone)]
pub struct SearchArgs {
    /// Query text
    #[arg(short, long)]
    pub text: String,

    /// Qdrant collection to search
    #[arg(short, long, env = "QDRANT_COLLECTION")]
    pub collection: String,

    /// Qdrant URL the API server should use
    #[arg(long, env = "QDRANT_URL", default_value = "http://localhost:6333")]
    pub qdrant_url: String,

    /// Embedding preset id; defaults to the first listed preset (bge-m3 offline)
    #[arg(short, long)]
    pub preset: Option<String>,

    /// Number of hits to return
    #[arg(long, default_value_t = 5)]
    pub top_k: u32,

    /// Minimum score (0.0..=1.0)
    #[arg(long, default_value_t = 0.0)]
    pub threshold: f32,

    /// Do not ask for payloads
    #[arg(long)]
    pub no_payload: bool,

    /// Qdrant filter as JSON
    #[arg(long, conflicts_with = "filter_preset")]
    pub filter: Option<String>,

    /// Key of a built-in filter preset (see `filter-presets`)
    #[arg(long)]
    pub filter_preset: Option<String>,
}

#[derive(Args, Debug, Clone)]
pub struct ValidateFilterArgs {
    /// Filter JSON; blank means no filter
    pub filter: String,
}
