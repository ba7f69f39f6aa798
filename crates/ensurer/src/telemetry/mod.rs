//! Structured logging and optional OpenTelemetry span export.
//!
//! - Log level is configurable via `LOG_LEVEL` (default: `info`), overridden
//!   by `RUST_LOG` when present.
//! - Span export is enabled only when `OTEL_EXPORTER_OTLP_ENDPOINT` is set.

pub mod init;

pub use init::{init_telemetry, shutdown_telemetry};
