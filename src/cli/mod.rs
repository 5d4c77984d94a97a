//! Command line front end.

pub mod args;
pub mod commands;
pub mod output;

pub use args::*;
pub use commands::*;
