//! Invocation request and response types.
//!
//! The event shape (`az`, `vpcid`, `v6cidr`) and the result shape (a bare
//! subnet id string, or the integer `0`) are fixed by existing callers.

use std::fmt;

use serde::{Deserialize, Serialize, Serializer};

use crate::error::EnsureError;

// ---------------------------------------------------------------------------
// Request
// ---------------------------------------------------------------------------

/// Caller-supplied parameters for one ensure invocation.
///
/// Deserialised from the invocation event. Extra event fields are ignored.
/// Values are passed to the provider as-is; no local validation is done.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubnetRequest {
    /// Availability zone to place the subnet in (e.g. `"us-east-1a"`).
    #[serde(rename = "az")]
    pub availability_zone: String,
    /// Identifier of the VPC that owns the subnet.
    #[serde(rename = "vpcid")]
    pub vpc_id: String,
    /// IPv6 CIDR block for the subnet (e.g. `"2600:1f18::/64"`).
    #[serde(rename = "v6cidr")]
    pub ipv6_cidr: String,
}

impl SubnetRequest {
    /// Build a request from a raw invocation event.
    ///
    /// # Errors
    ///
    /// Returns [`EnsureError::InvalidEvent`] if the event is not an object or
    /// any of `az`, `vpcid`, `v6cidr` is missing or not a string.
    pub fn from_event(event: serde_json::Value) -> Result<Self, EnsureError> {
        serde_json::from_value(event).map_err(|e| EnsureError::InvalidEvent(e.to_string()))
    }
}

// ---------------------------------------------------------------------------
// Subnet identifier
// ---------------------------------------------------------------------------

/// Provider-assigned subnet identifier (e.g. `"subnet-0abc"`). Opaque.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SubnetId(String);

impl SubnetId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SubnetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// ---------------------------------------------------------------------------
// Outcome
// ---------------------------------------------------------------------------

/// Result of a successful invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EnsureOutcome {
    /// A new subnet was created and DNS64 enabled on it.
    Created(SubnetId),
    /// A matching subnet already existed; nothing was changed.
    AlreadyExists,
}

impl EnsureOutcome {
    /// The created subnet id, if this invocation created one.
    pub fn subnet_id(&self) -> Option<&SubnetId> {
        match self {
            EnsureOutcome::Created(id) => Some(id),
            EnsureOutcome::AlreadyExists => None,
        }
    }
}

/// Serialises as the bare subnet id string, or `0` when no action was taken.
impl Serialize for EnsureOutcome {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            EnsureOutcome::Created(id) => serializer.serialize_str(id.as_str()),
            EnsureOutcome::AlreadyExists => serializer.serialize_u8(0),
        }
    }
}

// ---------------------------------------------------------------------------
// Error response
// ---------------------------------------------------------------------------

/// Error document written in place of an outcome when an invocation fails.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorResponse {
    /// Short error class, see [`EnsureError::error_type`].
    pub error_type: String,
    /// Underlying error text, provider message included.
    pub error_message: String,
}

impl ErrorResponse {
    /// Construct an [`ErrorResponse`] from a type and message.
    pub fn new(error_type: impl Into<String>, error_message: impl Into<String>) -> Self {
        Self {
            error_type: error_type.into(),
            error_message: error_message.into(),
        }
    }
}

impl From<&EnsureError> for ErrorResponse {
    fn from(e: &EnsureError) -> Self {
        Self::new(e.error_type(), e.to_string())
    }
}
