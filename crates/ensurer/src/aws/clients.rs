//! EC2 SDK client construction.

use aws_config::{BehaviorVersion, Region};

use crate::config::Config;

/// Build the EC2 client shared by every call of an invocation.
///
/// Credentials are resolved via the standard AWS credential chain. The
/// region and endpoint can be overridden from [`Config`].
pub async fn ec2_client(cfg: &Config) -> aws_sdk_ec2::Client {
    let mut loader = aws_config::defaults(BehaviorVersion::latest());
    if let Some(region) = &cfg.aws_region {
        loader = loader.region(Region::new(region.clone()));
    }
    let sdk_config = loader.load().await;

    let mut builder = aws_sdk_ec2::config::Builder::from(&sdk_config);
    if let Some(url) = &cfg.ec2_endpoint_url {
        builder = builder.endpoint_url(url);
    }
    aws_sdk_ec2::Client::from_conf(builder.build())
}
