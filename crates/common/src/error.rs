//! Error taxonomy for a single ensure invocation.

use thiserror::Error;

/// Top-level invocation error type.
///
/// Variants map to the `errorType` reported to the caller:
/// - [`EnsureError::InvalidEvent`] → `InvalidEvent`
/// - [`EnsureError::Lookup`] and [`EnsureError::Create`] → `ProviderError`
/// - [`EnsureError::EnableDns64`] → `PartialFailure`
#[derive(Debug, Error)]
pub enum EnsureError {
    /// The invocation event was not an object or lacked a required field.
    #[error("invalid invocation event: {0}")]
    InvalidEvent(String),

    /// The existence query against the subnet inventory failed.
    #[error("failed to query existing subnets: {0}")]
    Lookup(String),

    /// The create call failed or returned no subnet identifier.
    #[error("failed to create subnet: {0}")]
    Create(String),

    /// The subnet was created but DNS64 could not be enabled on it.
    ///
    /// The subnet is left in place without DNS64.
    #[error("subnet {subnet_id} was created but enabling DNS64 failed: {message}")]
    EnableDns64 { subnet_id: String, message: String },
}

impl EnsureError {
    /// Returns the short error class reported in [`crate::protocol::ErrorResponse`].
    pub fn error_type(&self) -> &'static str {
        match self {
            EnsureError::InvalidEvent(_) => "InvalidEvent",
            EnsureError::Lookup(_) | EnsureError::Create(_) => "ProviderError",
            EnsureError::EnableDns64 { .. } => "PartialFailure",
        }
    }

    /// Returns `true` if provider state was mutated before the failure.
    pub fn left_partial_state(&self) -> bool {
        matches!(self, EnsureError::EnableDns64 { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_types() {
        assert_eq!(EnsureError::InvalidEvent("x".into()).error_type(), "InvalidEvent");
        assert_eq!(EnsureError::Lookup("x".into()).error_type(), "ProviderError");
        assert_eq!(EnsureError::Create("x".into()).error_type(), "ProviderError");
        let partial = EnsureError::EnableDns64 {
            subnet_id: "subnet-0abc".into(),
            message: "x".into(),
        };
        assert_eq!(partial.error_type(), "PartialFailure");
    }

    #[test]
    fn only_dns64_failure_leaves_partial_state() {
        assert!(!EnsureError::Create("quota exceeded".into()).left_partial_state());
        assert!(EnsureError::EnableDns64 {
            subnet_id: "subnet-0abc".into(),
            message: "throttled".into(),
        }
        .left_partial_state());
    }

    #[test]
    fn display_includes_subnet_and_provider_message() {
        let e = EnsureError::EnableDns64 {
            subnet_id: "subnet-0abc".into(),
            message: "UnauthorizedOperation".into(),
        };
        let text = e.to_string();
        assert!(text.contains("subnet-0abc"));
        assert!(text.contains("UnauthorizedOperation"));
    }
}
