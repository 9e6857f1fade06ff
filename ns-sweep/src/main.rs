//! NS Sweep CLI Application
//!
//! A command-line interface for probing NS records for a single base name
//! across a dynamically-fetched list of public domain suffixes. This CLI
//! provides a user-friendly front end to the ns-sweep-lib library.

use clap::builder::styling::{AnsiColor, Effects, Styles};
use clap::Parser;
use console::Style;
use ns_sweep_lib::{
    load_env_config, ConfigManager, FileConfig, NsSweepError, ReportSink, ScanConfig,
    SuffixScanner, SuffixSource,
};
use std::path::PathBuf;
use std::process;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

const STYLES: Styles = Styles::styled()
    .header(AnsiColor::Yellow.on_default().effects(Effects::BOLD))
    .usage(AnsiColor::Yellow.on_default().effects(Effects::BOLD))
    .literal(AnsiColor::Green.on_default().effects(Effects::BOLD))
    .placeholder(AnsiColor::Cyan.on_default());

/// CLI arguments for ns-sweep
#[derive(Parser, Debug)]
#[command(name = "ns-sweep")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Probe NS records for a base name across the public suffix list")]
#[command(
    long_about = "Probe DNS NS records for a single base name across every suffix of a \
remote suffix list (the public suffix list by default).\n\nThe list is split into chunks \
scanned by concurrent workers; each candidate yields one classified line in the report file."
)]
#[command(styles = STYLES)]
pub struct Args {
    /// Base name to probe (e.g. "crypto")
    #[arg(value_name = "NAME", help_heading = "Scan Selection")]
    pub name: Option<String>,

    /// Number of work chunks / concurrent workers (1-10000)
    #[arg(short = 'c', long = "chunks", value_name = "N", help_heading = "Performance")]
    pub chunks: Option<usize>,

    /// Per-lookup timeout (e.g. "5s", "2m", or bare seconds)
    #[arg(long = "timeout", value_name = "DURATION", help_heading = "Performance")]
    pub timeout: Option<String>,

    /// URL of the suffix source document
    #[arg(long = "source-url", value_name = "URL", help_heading = "Scan Selection")]
    pub source_url: Option<String>,

    /// Report file path (prior contents are replaced)
    #[arg(short = 'o', long = "output", value_name = "FILE", help_heading = "Output")]
    pub output: Option<PathBuf>,

    /// Use specific config file instead of automatic discovery
    #[arg(long = "config", value_name = "FILE", help_heading = "Configuration")]
    pub config: Option<String>,

    /// Verbose logging
    #[arg(short = 'v', long = "verbose", help_heading = "Configuration")]
    pub verbose: bool,

    /// Show detailed debug information
    #[arg(short = 'd', long = "debug", help_heading = "Configuration")]
    pub debug: bool,
}

#[tokio::main]
async fn main() {
    let args = Args::parse();

    init_tracing(&args);

    if let Err(e) = validate_args(&args) {
        eprintln!("Error: {}", e);
        process::exit(1);
    }

    if let Err(e) = run_scan(args).await {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

/// Route library diagnostics to stderr; `-v`/`-d` raise the default level.
fn init_tracing(args: &Args) {
    let default_level = if args.debug {
        "debug"
    } else if args.verbose {
        "info"
    } else {
        "warn"
    };

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Validate command line arguments
fn validate_args(args: &Args) -> Result<(), String> {
    if let Some(chunks) = args.chunks {
        if chunks == 0 || chunks > 10_000 {
            return Err("Chunk count must be between 1 and 10000".to_string());
        }
    }

    if let Some(url) = &args.source_url {
        if !url.starts_with("http://") && !url.starts_with("https://") {
            return Err(format!("Source URL must be http(s), got: {}", url));
        }
    }

    Ok(())
}

/// Main scanning logic
async fn run_scan(args: Args) -> Result<(), Box<dyn std::error::Error>> {
    let file_config = load_file_config(&args)?;
    let env_config = load_env_config(args.verbose);

    let name = resolve_name(&args, &env_config.name, &file_config).ok_or(
        "You must specify a base name (argument, NS_SWEEP_NAME, or config file)",
    )?;
    let config = build_config(&args, &env_config, &file_config);

    // Fetch the suffix list. A failed fetch is a diagnostic, not a fatal
    // error: the scan proceeds with whatever was obtained.
    let source = SuffixSource::new(&config.source_url)?;
    let suffixes = match source.fetch().await {
        Ok(suffixes) => suffixes,
        Err(e) => {
            eprintln!("Warning: {}", e);
            Vec::new()
        }
    };

    if args.verbose {
        let info = Style::new().cyan();
        println!(
            "{}",
            info.apply_to(format!(
                "Scanning '{}' across {} suffixes with {} chunks",
                name,
                suffixes.len(),
                config.chunk_count
            ))
        );
    }

    // No report file, no run.
    let sink = Arc::new(ReportSink::create(&config.output_path).await?);

    let output_path = config.output_path.clone();
    let scanner = SuffixScanner::with_config(config)?;
    scanner.scan(&name, suffixes, sink).await?;

    let done = Style::new().green().bold();
    println!(
        "{} Report written to {}",
        done.apply_to("It's done."),
        output_path.display()
    );

    Ok(())
}

/// Load the config file named by --config / NS_SWEEP_CONFIG, or discover.
fn load_file_config(args: &Args) -> Result<FileConfig, NsSweepError> {
    let manager = ConfigManager::new(args.verbose);

    if let Some(path) = &args.config {
        return manager.load_file(path);
    }
    if let Ok(path) = std::env::var("NS_SWEEP_CONFIG") {
        return manager.load_file(&path);
    }

    // Automatic discovery; absence of config files is not an error.
    manager.discover_and_load()
}

/// Resolve the base name: CLI > environment > config file.
fn resolve_name(
    args: &Args,
    env_name: &Option<String>,
    file_config: &FileConfig,
) -> Option<String> {
    if let Some(name) = &args.name {
        return Some(name.clone());
    }
    if let Some(name) = env_name {
        return Some(name.clone());
    }
    file_config
        .defaults
        .as_ref()
        .and_then(|defaults| defaults.name.clone())
}

/// Build ScanConfig with precedence: CLI > environment > file > defaults.
fn build_config(
    args: &Args,
    env_config: &ns_sweep_lib::EnvConfig,
    file_config: &FileConfig,
) -> ScanConfig {
    let mut config = ScanConfig::default();

    // Step 1: config file values
    if let Some(defaults) = &file_config.defaults {
        if let Some(chunks) = defaults.chunks {
            config = config.with_chunk_count(chunks);
        }
        if let Some(url) = &defaults.source_url {
            config = config.with_source_url(url.clone());
        }
        if let Some(output) = &defaults.output {
            config = config.with_output_path(output.clone());
        }
        if let Some(timeout) = &defaults.timeout {
            if let Ok(secs) = ns_sweep_lib::parse_timeout_string(timeout) {
                config = config.with_lookup_timeout(std::time::Duration::from_secs(secs));
            }
        }
    }

    // Step 2: environment variables (NS_SWEEP_*)
    if let Some(chunks) = env_config.chunks {
        config = config.with_chunk_count(chunks);
    }
    if let Some(url) = &env_config.source_url {
        config = config.with_source_url(url.clone());
    }
    if let Some(output) = &env_config.output {
        config = config.with_output_path(output.clone());
    }
    if let Some(timeout) = &env_config.timeout {
        if let Ok(secs) = ns_sweep_lib::parse_timeout_string(timeout) {
            config = config.with_lookup_timeout(std::time::Duration::from_secs(secs));
        }
    }

    // Step 3: CLI arguments (highest precedence)
    if let Some(chunks) = args.chunks {
        config = config.with_chunk_count(chunks);
    }
    if let Some(url) = &args.source_url {
        config = config.with_source_url(url.clone());
    }
    if let Some(output) = &args.output {
        config = config.with_output_path(output.clone());
    }
    if let Some(timeout) = &args.timeout {
        match ns_sweep_lib::parse_timeout_string(timeout) {
            Ok(secs) => {
                config = config.with_lookup_timeout(std::time::Duration::from_secs(secs));
            }
            Err(e) => {
                eprintln!("Warning: {}", e);
            }
        }
    }

    config
}
