//! Configuration loading and validation for the subnet ensurer.
//!
//! All values are read from environment variables at startup. Everything is
//! optional; credentials and region otherwise come from the standard AWS
//! provider chain.

use anyhow::{Context, Result};
use serde::Deserialize;

/// Validated ensurer configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Tracing log level (e.g. `"info"`, `"debug"`). `RUST_LOG` takes precedence.
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Region override. Falls back to the SDK provider chain when unset.
    #[serde(default)]
    pub aws_region: Option<String>,

    /// EC2 endpoint override, e.g. a local emulator.
    #[serde(default)]
    pub ec2_endpoint_url: Option<String>,

    /// OTLP endpoint. Span export is disabled when unset.
    #[serde(default)]
    pub otel_exporter_otlp_endpoint: Option<String>,
}

fn default_log_level() -> String {
    "info".into()
}

impl Config {
    /// Load and validate configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if a variable cannot be parsed or fails validation.
    pub fn from_env() -> Result<Self> {
        let cfg = config::Config::builder()
            .add_source(config::Environment::default())
            .build()
            .context("failed to build configuration from environment")?;

        let c: Config = cfg
            .try_deserialize()
            .context("failed to deserialise configuration")?;

        c.validate()?;
        Ok(c)
    }

    /// Validate all fields, returning a descriptive error on the first failure.
    fn validate(&self) -> Result<()> {
        if self.log_level.trim().is_empty() {
            anyhow::bail!("LOG_LEVEL must not be empty");
        }
        ensure_not_blank(self.aws_region.as_deref(), "AWS_REGION")?;
        ensure_not_blank(self.ec2_endpoint_url.as_deref(), "EC2_ENDPOINT_URL")?;
        ensure_not_blank(
            self.otel_exporter_otlp_endpoint.as_deref(),
            "OTEL_EXPORTER_OTLP_ENDPOINT",
        )?;
        Ok(())
    }
}

/// An optional variable may be unset, but not set to whitespace.
fn ensure_not_blank(value: Option<&str>, name: &str) -> Result<()> {
    if let Some(v) = value {
        if v.trim().is_empty() {
            anyhow::bail!("{name} is set but empty; unset it to use the default");
        }
    }
    Ok(())
}
