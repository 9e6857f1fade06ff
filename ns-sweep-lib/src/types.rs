//! Core data types for suffix scanning.
//!
//! This module defines the main data structures used throughout the library:
//! scan configuration, candidate names, lookup signals and outcomes, and the
//! probe report that renders into a single sink line.

use std::path::PathBuf;
use std::time::Duration;

/// Default location of the public suffix list document.
pub const DEFAULT_SOURCE_URL: &str = "https://publicsuffix.org/list/public_suffix_list.dat";

/// Default report file path.
pub const DEFAULT_OUTPUT_PATH: &str = "records1.txt";

/// Configuration options for a scan run.
///
/// The base name itself is not part of the configuration; it is passed to
/// [`crate::SuffixScanner::scan`] per invocation.
#[derive(Debug, Clone)]
pub struct ScanConfig {
    /// Number of work chunks (and therefore concurrent workers) the suffix
    /// list is split into. Default: 1000, Range: 1-10000
    pub chunk_count: usize,

    /// Timeout for each individual NS lookup
    /// Default: 5 seconds
    pub lookup_timeout: Duration,

    /// URL of the suffix source document
    pub source_url: String,

    /// Path of the report file. Prior contents are replaced per run.
    pub output_path: PathBuf,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            chunk_count: 1000,
            lookup_timeout: Duration::from_secs(5),
            source_url: DEFAULT_SOURCE_URL.to_string(),
            output_path: PathBuf::from(DEFAULT_OUTPUT_PATH),
        }
    }
}

impl ScanConfig {
    /// Set the chunk count, clamped to a sane range.
    pub fn with_chunk_count(mut self, chunk_count: usize) -> Self {
        self.chunk_count = chunk_count.clamp(1, 10_000);
        self
    }

    /// Set the per-lookup timeout.
    pub fn with_lookup_timeout(mut self, timeout: Duration) -> Self {
        self.lookup_timeout = timeout;
        self
    }

    /// Set the suffix source URL.
    pub fn with_source_url<U: Into<String>>(mut self, url: U) -> Self {
        self.source_url = url.into();
        self
    }

    /// Set the report file path.
    pub fn with_output_path<P: Into<PathBuf>>(mut self, path: P) -> Self {
        self.output_path = path.into();
        self
    }
}

/// A fully-qualified name built from a base name and one suffix.
///
/// The join inserts exactly one separator dot; a leading dot already present
/// on the suffix is absorbed, so `crypto` + `.com` and `crypto` + `com` both
/// yield `crypto.com`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    fqdn: String,
}

impl Candidate {
    pub fn new(name: &str, suffix: &str) -> Self {
        let suffix = suffix.trim_start_matches('.');
        Self {
            fqdn: format!("{}.{}", name, suffix),
        }
    }

    /// The joined name, suitable for a DNS query.
    pub fn fqdn(&self) -> &str {
        &self.fqdn
    }
}

impl std::fmt::Display for Candidate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.fqdn)
    }
}

/// Raw result of one NS lookup, as exposed by the probe layer.
///
/// The resolver backend translates its own error shapes into this tagged
/// signal set; everything downstream matches on the discriminant and never
/// inspects resolver internals.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LookupSignal {
    /// The lookup returned at least one NS record.
    Success,
    /// The lookup timed out.
    Timeout,
    /// The name does not exist or carries no NS records.
    NotFound,
    /// A transient resolution failure (SERVFAIL, refused, I/O).
    Temporary,
    /// Any other failure, with a human-readable description.
    Other(String),
}

/// Classified outcome of probing one candidate.
///
/// Exactly one outcome is produced per lookup; the variants are mutually
/// exclusive and exhaustive over the signal set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LookupOutcome {
    /// NS records exist; the name is delegated under this suffix.
    Found,

    /// No NS records; the name is not registered under this suffix.
    NotFound,

    /// The lookup timed out.
    Timeout,

    /// The resolver reported a transient failure.
    Temporary,

    /// Anything else.
    Unexpected,
}

impl LookupOutcome {
    /// Derive the outcome from a lookup signal.
    ///
    /// Exhaustive by construction: adding a signal variant forces a decision
    /// here.
    pub fn classify(signal: &LookupSignal) -> Self {
        match signal {
            LookupSignal::Success => Self::Found,
            LookupSignal::Timeout => Self::Timeout,
            LookupSignal::NotFound => Self::NotFound,
            LookupSignal::Temporary => Self::Temporary,
            LookupSignal::Other(_) => Self::Unexpected,
        }
    }
}

impl std::fmt::Display for LookupOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Found => write!(f, "Found"),
            Self::NotFound => write!(f, "NotFound"),
            Self::Timeout => write!(f, "Timeout"),
            Self::Temporary => write!(f, "Temporary"),
            Self::Unexpected => write!(f, "Unexpected"),
        }
    }
}

/// The result of probing one candidate, ready to be rendered into the
/// report.
#[derive(Debug, Clone)]
pub struct ProbeReport {
    /// The candidate that was probed
    pub candidate: Candidate,

    /// Classified outcome
    pub outcome: LookupOutcome,

    /// Human-readable description of an unexpected failure, for logging
    pub detail: Option<String>,
}

impl ProbeReport {
    pub fn new(candidate: Candidate, signal: LookupSignal) -> Self {
        let outcome = LookupOutcome::classify(&signal);
        let detail = match signal {
            LookupSignal::Other(description) => Some(description),
            _ => None,
        };
        Self {
            candidate,
            outcome,
            detail,
        }
    }

    /// Render the single report line for this probe.
    ///
    /// The exact wording, trailing space and newline are part of the report
    /// format and are asserted by tests; do not "clean them up".
    pub fn line(&self) -> String {
        let verdict = match self.outcome {
            LookupOutcome::Found => "Yes NS",
            LookupOutcome::NotFound => "No NS",
            LookupOutcome::Timeout => "TIMEOUT, please check your connection",
            LookupOutcome::Temporary => "Temporary",
            LookupOutcome::Unexpected => "Unexpected error",
        };
        format!("{}: {} \n", self.candidate, verdict)
    }
}
