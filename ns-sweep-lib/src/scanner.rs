//! Scan coordination: partition, fan out, join.
//!
//! `SuffixScanner` owns the scan configuration and the probe. One scan run
//! partitions the suffix list, spawns one worker task per chunk, and blocks
//! until every worker has finished and the sink has been flushed.

use crate::error::NsSweepError;
use crate::partition::chunk_ranges;
use crate::probe::{NsProbe, ResolverProbe};
use crate::sink::ReportSink;
use crate::types::{Candidate, ProbeReport, ScanConfig};
use futures::future::join_all;
use std::sync::Arc;
use tokio::io::AsyncWrite;
use tracing::{debug, warn};

/// Coordinates a full suffix scan for one base name.
pub struct SuffixScanner {
    /// Configuration settings for this scanner instance
    config: ScanConfig,
    /// Probe performing the NS lookups
    probe: Arc<dyn NsProbe>,
}

impl SuffixScanner {
    /// Create a scanner with default configuration and the system resolver.
    ///
    /// # Errors
    ///
    /// Returns `NsSweepError::Resolver` if the system resolver cannot be
    /// constructed.
    pub fn new() -> Result<Self, NsSweepError> {
        Self::with_config(ScanConfig::default())
    }

    /// Create a scanner with custom configuration and the system resolver.
    pub fn with_config(config: ScanConfig) -> Result<Self, NsSweepError> {
        let probe = Arc::new(ResolverProbe::new(config.lookup_timeout)?);
        Ok(Self { config, probe })
    }

    /// Create a scanner with a caller-supplied probe.
    ///
    /// This is the seam tests use to substitute a scripted resolver.
    pub fn with_probe(config: ScanConfig, probe: Arc<dyn NsProbe>) -> Self {
        Self { config, probe }
    }

    /// Get the current configuration for this scanner.
    pub fn config(&self) -> &ScanConfig {
        &self.config
    }

    /// Scan every suffix for `name`, appending one report line per
    /// candidate to `sink`.
    ///
    /// The suffix list is split into `chunk_count` chunks plus the terminal
    /// remainder chunk, one worker task per chunk. Workers probe their
    /// chunk's candidates in order; global line order across workers is
    /// unspecified. The call returns only after every candidate has been
    /// probed exactly once, every worker has been joined, and the sink has
    /// been flushed.
    ///
    /// Lookup failures are classified results, never errors. A worker panic
    /// is logged and the remaining workers still run to completion.
    ///
    /// # Errors
    ///
    /// Returns `NsSweepError::InvalidName` for an unusable base name and
    /// `NsSweepError::SinkWrite` if the final flush fails.
    pub async fn scan<W>(
        &self,
        name: &str,
        suffixes: Vec<String>,
        sink: Arc<ReportSink<W>>,
    ) -> Result<(), NsSweepError>
    where
        W: AsyncWrite + Unpin + Send + 'static,
    {
        validate_base_name(name)?;

        let suffixes = Arc::new(suffixes);
        let ranges = chunk_ranges(suffixes.len(), self.config.chunk_count);
        debug!(
            name,
            suffixes = suffixes.len(),
            workers = ranges.len(),
            "starting scan"
        );

        let mut workers = Vec::with_capacity(ranges.len());
        for range in ranges {
            let name = name.to_string();
            let probe = Arc::clone(&self.probe);
            let sink = Arc::clone(&sink);
            let suffixes = Arc::clone(&suffixes);

            workers.push(tokio::spawn(async move {
                for suffix in &suffixes[range] {
                    let candidate = Candidate::new(&name, suffix);
                    let signal = probe.lookup_ns(candidate.fqdn()).await;
                    let report = ProbeReport::new(candidate, signal);
                    if let Some(detail) = &report.detail {
                        debug!(candidate = %report.candidate, detail = %detail, "unexpected lookup failure");
                    }
                    sink.write_line(&report.line()).await;
                }
            }));
        }

        // Single join barrier: a crashed worker loses its chunk's remaining
        // lines but never takes the run down with it.
        for result in join_all(workers).await {
            if let Err(e) = result {
                warn!(error = %e, "scan worker crashed");
            }
        }

        sink.flush().await?;
        debug!(name, "scan complete");
        Ok(())
    }
}

/// Validate that a base name is usable as the left-most DNS label.
fn validate_base_name(name: &str) -> Result<(), NsSweepError> {
    if name.is_empty() {
        return Err(NsSweepError::invalid_name(name, "name cannot be empty"));
    }
    if name.len() > 63 {
        return Err(NsSweepError::invalid_name(
            name,
            "DNS labels are limited to 63 characters",
        ));
    }
    if name.starts_with('-') || name.ends_with('-') {
        return Err(NsSweepError::invalid_name(
            name,
            "name cannot start or end with a hyphen",
        ));
    }
    if !name.chars().all(|c| c.is_ascii_alphanumeric() || c == '-') {
        return Err(NsSweepError::invalid_name(
            name,
            "only alphanumeric characters and hyphens are allowed",
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_base_name() {
        assert!(validate_base_name("crypto").is_ok());
        assert!(validate_base_name("my-name2").is_ok());

        assert!(validate_base_name("").is_err());
        assert!(validate_base_name("-crypto").is_err());
        assert!(validate_base_name("crypto-").is_err());
        assert!(validate_base_name("crypto.com").is_err());
        assert!(validate_base_name(&"a".repeat(64)).is_err());
    }
}
