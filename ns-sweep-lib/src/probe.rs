//! NS lookup probes.
//!
//! The scanner depends only on [`NsProbe`]: something that performs one NS
//! lookup for a fully-qualified name and yields a classified
//! [`LookupSignal`]. The production implementation is backed by
//! hickory-resolver; tests substitute scripted probes.

use crate::error::NsSweepError;
use crate::types::LookupSignal;
use async_trait::async_trait;
use hickory_resolver::proto::op::ResponseCode;
use hickory_resolver::proto::rr::RecordType;
use hickory_resolver::proto::ProtoErrorKind;
use hickory_resolver::{ResolveError, ResolveErrorKind, TokioResolver};
use std::time::Duration;
use tracing::debug;

/// A capability that answers "does this name have NS records?".
///
/// Implementations must classify every failure into the signal taxonomy;
/// they never write to the report sink and never retry.
#[async_trait]
pub trait NsProbe: Send + Sync {
    /// Perform a single NS lookup for `fqdn` and classify the result.
    async fn lookup_ns(&self, fqdn: &str) -> LookupSignal;
}

/// Production probe backed by the system DNS resolver.
pub struct ResolverProbe {
    resolver: TokioResolver,
    /// Per-lookup deadline; lookups exceeding it classify as Timeout.
    timeout: Duration,
}

impl ResolverProbe {
    /// Create a probe using the system resolver configuration.
    ///
    /// # Errors
    ///
    /// Returns `NsSweepError::Resolver` if the system resolver cannot be
    /// constructed (e.g. unreadable /etc/resolv.conf).
    pub fn new(timeout: Duration) -> Result<Self, NsSweepError> {
        let resolver = TokioResolver::builder_tokio()
            .map_err(|e| NsSweepError::resolver(e.to_string()))?
            .build();
        Ok(Self { resolver, timeout })
    }
}

#[async_trait]
impl NsProbe for ResolverProbe {
    async fn lookup_ns(&self, fqdn: &str) -> LookupSignal {
        let lookup = tokio::time::timeout(
            self.timeout,
            self.resolver.lookup(fqdn, RecordType::NS),
        )
        .await;

        match lookup {
            Ok(Ok(records)) => {
                debug!(name = fqdn, records = records.iter().count(), "NS lookup succeeded");
                LookupSignal::Success
            }
            Ok(Err(e)) => {
                let signal = classify_resolve_error(&e);
                debug!(name = fqdn, error = %e, signal = ?signal, "NS lookup failed");
                signal
            }
            Err(_) => {
                debug!(name = fqdn, timeout = ?self.timeout, "NS lookup timed out");
                LookupSignal::Timeout
            }
        }
    }
}

/// Translate a resolver error into the tagged signal set.
///
/// Priority order: timeout, then not-found, then transient, then anything
/// else. NXDOMAIN and an empty answer both count as NotFound: either way
/// there is no NS delegation under the suffix. SERVFAIL and REFUSED are
/// server-side conditions that may clear on their own, so they classify as
/// Temporary, as do I/O-level failures.
fn classify_resolve_error(err: &ResolveError) -> LookupSignal {
    match err.kind() {
        ResolveErrorKind::Proto(proto) => match proto.kind() {
            ProtoErrorKind::Timeout => LookupSignal::Timeout,
            ProtoErrorKind::NoRecordsFound { response_code, .. } => match response_code {
                ResponseCode::ServFail | ResponseCode::Refused => LookupSignal::Temporary,
                _ => LookupSignal::NotFound,
            },
            ProtoErrorKind::Busy | ProtoErrorKind::Io(_) => LookupSignal::Temporary,
            ProtoErrorKind::NoConnections => LookupSignal::Temporary,
            _ => LookupSignal::Other(proto.to_string()),
        },
        _ => LookupSignal::Other(err.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hickory_resolver::proto::ProtoError;

    #[test]
    fn test_classify_timeout() {
        let err = ResolveError::from(ProtoError::from(ProtoErrorKind::Timeout));
        assert_eq!(classify_resolve_error(&err), LookupSignal::Timeout);
    }

    #[test]
    fn test_classify_busy_as_temporary() {
        let err = ResolveError::from(ProtoError::from(ProtoErrorKind::Busy));
        assert_eq!(classify_resolve_error(&err), LookupSignal::Temporary);
    }

    #[test]
    fn test_classify_message_as_other() {
        let err = ResolveError::from(ProtoError::from("something odd"));
        assert!(matches!(
            classify_resolve_error(&err),
            LookupSignal::Other(_)
        ));
    }

    /// Hits the network: probe a name that is essentially guaranteed to
    /// have NS records. Run with `cargo test -- --ignored`.
    #[tokio::test]
    #[ignore]
    async fn test_probe_known_delegated_name() {
        let probe = ResolverProbe::new(Duration::from_secs(10)).unwrap();
        let signal = probe.lookup_ns("google.com").await;
        assert_eq!(signal, LookupSignal::Success);
    }
}
