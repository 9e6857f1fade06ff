//! Report sink: the shared append target for scan workers.
//!
//! Every worker writes through one `ReportSink`, which serializes writes
//! behind a mutex so a report line can never interleave with another. That
//! contract is enforced structurally here rather than assumed from platform
//! write semantics.

use crate::error::NsSweepError;
use std::path::Path;
use tokio::fs::File;
use tokio::io::{AsyncWrite, AsyncWriteExt};
use tokio::sync::Mutex;
use tracing::warn;

/// Diagnostic line appended when an individual report write fails.
pub const WRITE_FALLBACK_LINE: &str = "Could not write to file \n";

/// Append-only destination for report lines, safe to share across workers.
///
/// Generic over the underlying writer so tests can capture output in a
/// `Vec<u8>`; production runs write to a file created fresh per run.
pub struct ReportSink<W = File> {
    writer: Mutex<W>,
}

impl ReportSink<File> {
    /// Create the report file, replacing any prior contents.
    ///
    /// # Errors
    ///
    /// Returns `NsSweepError::SinkCreate` if the file cannot be created.
    /// This is fatal to the run: there is nowhere to write results.
    pub async fn create(path: &Path) -> Result<Self, NsSweepError> {
        let file = File::create(path)
            .await
            .map_err(|e| NsSweepError::sink_create(path, e.to_string()))?;
        Ok(Self::from_writer(file))
    }
}

impl<W: AsyncWrite + Unpin + Send> ReportSink<W> {
    /// Wrap an arbitrary writer, mainly for tests.
    pub fn from_writer(writer: W) -> Self {
        Self {
            writer: Mutex::new(writer),
        }
    }

    /// Append one line to the report.
    ///
    /// The whole line is written under the lock, so concurrent callers never
    /// produce torn or interleaved lines. A failed write is recovered
    /// in-place: the fallback diagnostic is appended and the scan goes on,
    /// per the run's "lookups matter more than lines" policy.
    pub async fn write_line(&self, line: &str) {
        let mut writer = self.writer.lock().await;
        if let Err(e) = writer.write_all(line.as_bytes()).await {
            warn!(error = %e, "report write failed, appending fallback diagnostic");
            if let Err(e) = writer.write_all(WRITE_FALLBACK_LINE.as_bytes()).await {
                warn!(error = %e, "fallback diagnostic write failed too");
            }
        }
    }

    /// Flush buffered bytes to the underlying destination.
    ///
    /// # Errors
    ///
    /// Returns `NsSweepError::SinkWrite` if the flush fails.
    pub async fn flush(&self) -> Result<(), NsSweepError> {
        let mut writer = self.writer.lock().await;
        writer
            .flush()
            .await
            .map_err(|e| NsSweepError::sink_write(e.to_string()))
    }

    /// Consume the sink and return the underlying writer.
    pub fn into_writer(self) -> W {
        self.writer.into_inner()
    }
}
