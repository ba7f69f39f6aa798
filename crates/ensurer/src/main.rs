//! `subnet-ensurer` — binary entry point.
//!
//! Startup sequence:
//! 1. Load and validate [`Config`] from environment variables.
//! 2. Initialise the telemetry pipeline (JSON logs, optional OTLP).
//! 3. Build the EC2 client once and wrap it in [`Ec2SubnetApi`].
//! 4. Read one invocation event from stdin and ensure the subnet.
//! 5. Write the result document to stdout; exit non-zero on failure.

mod aws;
mod config;
mod handler;
mod subnet;
mod telemetry;

use anyhow::Result;
use tracing::{error, info, info_span, Instrument};
use uuid::Uuid;

use aws::Ec2SubnetApi;
use config::Config;

#[tokio::main]
async fn main() -> Result<()> {
    // -----------------------------------------------------------------------
    // 1. Configuration
    // -----------------------------------------------------------------------
    let cfg = Config::from_env().map_err(|e| {
        // Telemetry is not yet up; write to stderr directly.
        eprintln!("ERROR: configuration invalid: {e}");
        e
    })?;

    // -----------------------------------------------------------------------
    // 2. Telemetry
    // -----------------------------------------------------------------------
    telemetry::init_telemetry(cfg.otel_exporter_otlp_endpoint.as_deref(), &cfg.log_level)?;
    info!(version = env!("CARGO_PKG_VERSION"), "subnet-ensurer starting");

    // -----------------------------------------------------------------------
    // 3. EC2 client
    // -----------------------------------------------------------------------
    let api = Ec2SubnetApi::new(aws::ec2_client(&cfg).await);

    // -----------------------------------------------------------------------
    // 4. Invocation
    // -----------------------------------------------------------------------
    let request_id = Uuid::new_v4();
    let result = handler::invoke(&api, tokio::io::stdin())
        .instrument(info_span!("invocation", %request_id))
        .await;

    // -----------------------------------------------------------------------
    // 5. Result
    // -----------------------------------------------------------------------
    println!("{}", handler::response_body(&result));
    if let Err(e) = &result {
        error!(%request_id, error_type = e.error_type(), error = %e, "invocation failed");
    }
    telemetry::shutdown_telemetry();

    result?;
    Ok(())
}
