//! # NS Sweep Library
//!
//! A concurrent scanner that probes DNS NS records for a single base name
//! across a large, dynamically-sourced list of public domain suffixes.
//!
//! The scan fetches the suffix list (by default the public suffix list),
//! partitions it into contiguous chunks, dispatches one NS lookup per
//! (name, suffix) pair across many concurrent workers, classifies each
//! outcome, and funnels one report line per candidate to a shared sink.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use ns_sweep_lib::{ReportSink, ScanConfig, SuffixScanner, SuffixSource};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = ScanConfig::default();
//!     let suffixes = SuffixSource::new(&config.source_url)?.fetch().await?;
//!     let sink = Arc::new(ReportSink::create(&config.output_path).await?);
//!
//!     let scanner = SuffixScanner::with_config(config)?;
//!     scanner.scan("crypto", suffixes, sink).await?;
//!     Ok(())
//! }
//! ```
//!
//! ## Features
//!
//! - **Chunked fan-out**: fixed worker count, deterministic partitioning
//! - **Outcome taxonomy**: Found / NotFound / Timeout / Temporary / Unexpected
//! - **Single-writer sink**: report lines never interleave
//! - **Mockable probes**: the scanner only needs something that answers
//!   "does this name have NS records?"

// Re-export main public API types and functions
pub use config::{
    load_env_config, parse_timeout_string, ConfigManager, DefaultsConfig, EnvConfig, FileConfig,
};
pub use error::NsSweepError;
pub use partition::chunk_ranges;
pub use probe::{NsProbe, ResolverProbe};
pub use scanner::SuffixScanner;
pub use sink::{ReportSink, WRITE_FALLBACK_LINE};
pub use source::{extract_suffixes, SuffixSource};
pub use types::{Candidate, LookupOutcome, LookupSignal, ProbeReport, ScanConfig};

// Internal modules
mod config;
mod error;
mod partition;
mod probe;
mod scanner;
mod sink;
mod source;
mod types;

// Type alias for convenience
pub type Result<T> = std::result::Result<T, NsSweepError>;

// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
