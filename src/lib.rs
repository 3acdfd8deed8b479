//! scorefeed - export live-score JavaScript feeds as CSV
//!
//! The feed is a JavaScript file made of `var A=Array(n);` declarations and
//! `A[i]=[...];` assignments. This crate recovers those tables, joins matches
//! with their league and country, and writes one flat row per match.

pub mod config;
pub mod error;
pub mod export;
pub mod fetch;
pub mod join;
pub mod model;
pub mod output;
pub mod parser;
pub mod preset;

pub use config::Config;
pub use error::{ExportError, Result};
pub use export::{ExportStats, Exporter};
pub use model::TableStore;
