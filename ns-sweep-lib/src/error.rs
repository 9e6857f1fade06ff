//! Error handling for suffix scanning operations.
//!
//! This module defines an error type covering the different ways a scan run
//! can fail, from fetching the suffix source to creating the report sink.
//! Lookup failures are deliberately not part of this taxonomy: a timeout or
//! NXDOMAIN is a classified result of the scan, never an error of it.

use std::fmt;
use std::path::Path;

/// Main error type for suffix scanning operations.
#[derive(Debug, Clone)]
pub enum NsSweepError {
    /// The suffix source document could not be fetched.
    SourceFetch { url: String, message: String },

    /// The report sink could not be created. Fatal: there is nowhere to
    /// write results.
    SinkCreate { path: String, message: String },

    /// An individual append to the report sink failed.
    SinkWrite { message: String },

    /// The system DNS resolver could not be constructed.
    Resolver { message: String },

    /// The base name to probe is not usable.
    InvalidName { name: String, reason: String },

    /// Configuration errors (unreadable or malformed config files, etc.)
    Config { message: String },

    /// Generic internal errors that don't fit other categories
    Internal { message: String },
}

impl NsSweepError {
    /// Create a new source fetch error.
    pub fn source_fetch<U: Into<String>, M: Into<String>>(url: U, message: M) -> Self {
        Self::SourceFetch {
            url: url.into(),
            message: message.into(),
        }
    }

    /// Create a new sink creation error.
    pub fn sink_create<M: Into<String>>(path: &Path, message: M) -> Self {
        Self::SinkCreate {
            path: path.display().to_string(),
            message: message.into(),
        }
    }

    /// Create a new sink write error.
    pub fn sink_write<M: Into<String>>(message: M) -> Self {
        Self::SinkWrite {
            message: message.into(),
        }
    }

    /// Create a new resolver construction error.
    pub fn resolver<M: Into<String>>(message: M) -> Self {
        Self::Resolver {
            message: message.into(),
        }
    }

    /// Create a new invalid name error.
    pub fn invalid_name<N: Into<String>, R: Into<String>>(name: N, reason: R) -> Self {
        Self::InvalidName {
            name: name.into(),
            reason: reason.into(),
        }
    }

    /// Create a new configuration error.
    pub fn config<M: Into<String>>(message: M) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a new internal error.
    pub fn internal<M: Into<String>>(message: M) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    /// Whether the run can continue after this error.
    ///
    /// Only the suffix-source fetch and individual sink writes are
    /// recoverable; everything else aborts the run.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Self::SourceFetch { .. } | Self::SinkWrite { .. })
    }
}

impl fmt::Display for NsSweepError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SourceFetch { url, message } => {
                write!(f, "Could not fetch suffix list from '{}': {}", url, message)
            }
            Self::SinkCreate { path, message } => {
                write!(f, "Failed creating report file '{}': {}", path, message)
            }
            Self::SinkWrite { message } => {
                write!(f, "Failed writing to report file: {}", message)
            }
            Self::Resolver { message } => {
                write!(f, "Failed to create DNS resolver: {}", message)
            }
            Self::InvalidName { name, reason } => {
                write!(f, "Invalid base name '{}': {}", name, reason)
            }
            Self::Config { message } => {
                write!(f, "Configuration error: {}", message)
            }
            Self::Internal { message } => {
                write!(f, "Internal error: {}", message)
            }
        }
    }
}

impl std::error::Error for NsSweepError {}

// Implement From conversions for common error types
impl From<std::io::Error> for NsSweepError {
    fn from(err: std::io::Error) -> Self {
        Self::Internal {
            message: format!("I/O error: {}", err),
        }
    }
}

impl From<toml::de::Error> for NsSweepError {
    fn from(err: toml::de::Error) -> Self {
        Self::Config {
            message: format!("TOML parsing failed: {}", err),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_formats() {
        let err = NsSweepError::source_fetch("https://example.com/list", "connection refused");
        assert_eq!(
            err.to_string(),
            "Could not fetch suffix list from 'https://example.com/list': connection refused"
        );

        let err = NsSweepError::invalid_name("-bad", "cannot start with hyphen");
        assert!(err.to_string().contains("-bad"));
        assert!(err.to_string().contains("hyphen"));
    }

    #[test]
    fn test_recoverable_classification() {
        assert!(NsSweepError::source_fetch("u", "m").is_recoverable());
        assert!(NsSweepError::sink_write("m").is_recoverable());
        assert!(!NsSweepError::sink_create(Path::new("records1.txt"), "m").is_recoverable());
        assert!(!NsSweepError::resolver("m").is_recoverable());
        assert!(!NsSweepError::config("m").is_recoverable());
    }
}
