//! Invocation boundary: raw event in, result document out.

use common::protocol::ErrorResponse;
use common::{EnsureError, EnsureOutcome, SubnetRequest};
use tokio::io::{AsyncRead, AsyncReadExt};
use tracing::info;

use crate::aws::SubnetApi;
use crate::subnet;

/// Read a single JSON event document from `reader` until EOF.
///
/// # Errors
///
/// Returns [`EnsureError::InvalidEvent`] if the input cannot be read or is
/// not valid JSON.
pub async fn read_event<R>(mut reader: R) -> Result<serde_json::Value, EnsureError>
where
    R: AsyncRead + Unpin,
{
    let mut raw = String::new();
    reader
        .read_to_string(&mut raw)
        .await
        .map_err(|e| EnsureError::InvalidEvent(format!("failed to read event: {e}")))?;
    serde_json::from_str(&raw)
        .map_err(|e| EnsureError::InvalidEvent(format!("event is not valid JSON: {e}")))
}

/// Handle one invocation event against `api`.
///
/// # Errors
///
/// Returns [`EnsureError::InvalidEvent`] for a malformed event, otherwise
/// whatever [`subnet::ensure_subnet`] returns.
pub async fn handle_event<A>(api: &A, event: serde_json::Value) -> Result<EnsureOutcome, EnsureError>
where
    A: SubnetApi + ?Sized,
{
    let request = SubnetRequest::from_event(event)?;
    info!(
        availability_zone = %request.availability_zone,
        vpc_id = %request.vpc_id,
        ipv6_cidr = %request.ipv6_cidr,
        "received invocation"
    );
    subnet::ensure_subnet(api, &request).await
}

/// Read one event from `reader` and handle it.
///
/// # Errors
///
/// See [`read_event`] and [`handle_event`].
pub async fn invoke<A, R>(api: &A, reader: R) -> Result<EnsureOutcome, EnsureError>
where
    A: SubnetApi + ?Sized,
    R: AsyncRead + Unpin,
{
    let event = read_event(reader).await?;
    handle_event(api, event).await
}

/// Render the document written back to the caller.
pub fn response_body(result: &Result<EnsureOutcome, EnsureError>) -> serde_json::Value {
    let body = match result {
        Ok(outcome) => serde_json::to_value(outcome),
        Err(e) => serde_json::to_value(ErrorResponse::from(e)),
    };
    // Both types serialise infallibly; keep the error text if that ever changes.
    body.unwrap_or_else(|e| serde_json::Value::String(e.to_string()))
}
