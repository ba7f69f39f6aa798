//! The three EC2 subnet operations the ensurer depends on.

use async_trait::async_trait;
use aws_sdk_ec2::error::DisplayErrorContext;
use aws_sdk_ec2::types::{AttributeBooleanValue, Filter, ResourceType, Tag, TagSpecification};
use common::SubnetId;
use thiserror::Error;

/// `DescribeSubnets` filter matching the subnet's associated IPv6 block.
pub const IPV6_CIDR_FILTER: &str = "ipv6-cidr-block-association.ipv6-cidr-block";

/// `DescribeSubnets` filter matching the owning VPC.
pub const VPC_ID_FILTER: &str = "vpc-id";

/// A failed EC2 call, carrying the provider's error text verbatim.
#[derive(Debug, Error)]
#[error("{operation}: {message}")]
pub struct ApiError {
    /// EC2 API operation name, e.g. `"CreateSubnet"`.
    pub operation: &'static str,
    pub message: String,
}

impl ApiError {
    pub fn new(operation: &'static str, message: impl Into<String>) -> Self {
        Self {
            operation,
            message: message.into(),
        }
    }
}

/// Selects subnets by owning VPC and associated IPv6 CIDR block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubnetFilter {
    pub vpc_id: String,
    pub ipv6_cidr: String,
}

/// Parameters for `CreateSubnet`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateSubnetSpec {
    pub availability_zone: String,
    pub vpc_id: String,
    pub ipv6_cidr: String,
    /// IPv6-native subnets get no IPv4 CIDR.
    pub ipv6_native: bool,
    /// `(key, value)` pairs applied at creation time.
    pub tags: Vec<(String, String)>,
}

/// Narrow view of the EC2 control plane used by the ensurer.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SubnetApi: Send + Sync {
    /// Count subnets matching `filter`. Only the first result page is counted.
    async fn count_matching_subnets(&self, filter: &SubnetFilter) -> Result<usize, ApiError>;

    /// Create a subnet and return its provider-assigned identifier.
    async fn create_subnet(&self, spec: &CreateSubnetSpec) -> Result<SubnetId, ApiError>;

    /// Set the subnet's `EnableDns64` attribute to `true`.
    async fn enable_dns64(&self, subnet_id: &SubnetId) -> Result<(), ApiError>;
}

/// [`SubnetApi`] backed by the AWS SDK EC2 client.
#[derive(Clone, Debug)]
pub struct Ec2SubnetApi {
    client: aws_sdk_ec2::Client,
}

impl Ec2SubnetApi {
    pub fn new(client: aws_sdk_ec2::Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl SubnetApi for Ec2SubnetApi {
    async fn count_matching_subnets(&self, filter: &SubnetFilter) -> Result<usize, ApiError> {
        let resp = self
            .client
            .describe_subnets()
            .filters(
                Filter::builder()
                    .name(IPV6_CIDR_FILTER)
                    .values(&filter.ipv6_cidr)
                    .build(),
            )
            .filters(
                Filter::builder()
                    .name(VPC_ID_FILTER)
                    .values(&filter.vpc_id)
                    .build(),
            )
            .send()
            .await
            .map_err(|e| ApiError::new("DescribeSubnets", DisplayErrorContext(&e).to_string()))?;

        Ok(resp.subnets().len())
    }

    async fn create_subnet(&self, spec: &CreateSubnetSpec) -> Result<SubnetId, ApiError> {
        let resp = self
            .client
            .create_subnet()
            .availability_zone(&spec.availability_zone)
            .vpc_id(&spec.vpc_id)
            .ipv6_cidr_block(&spec.ipv6_cidr)
            .ipv6_native(spec.ipv6_native)
            .tag_specifications(tag_specification(&spec.tags))
            .send()
            .await
            .map_err(|e| ApiError::new("CreateSubnet", DisplayErrorContext(&e).to_string()))?;

        let id = resp
            .subnet()
            .and_then(|s| s.subnet_id())
            .ok_or_else(|| ApiError::new("CreateSubnet", "response contained no subnet id"))?;

        Ok(SubnetId::new(id))
    }

    async fn enable_dns64(&self, subnet_id: &SubnetId) -> Result<(), ApiError> {
        self.client
            .modify_subnet_attribute()
            .subnet_id(subnet_id.as_str())
            .enable_dns64(AttributeBooleanValue::builder().value(true).build())
            .send()
            .await
            .map_err(|e| {
                ApiError::new("ModifySubnetAttribute", DisplayErrorContext(&e).to_string())
            })?;
        Ok(())
    }
}

/// Wrap `(key, value)` pairs in a `subnet` tag specification.
fn tag_specification(tags: &[(String, String)]) -> TagSpecification {
    tags.iter()
        .fold(
            TagSpecification::builder().resource_type(ResourceType::Subnet),
            |b, (key, value)| b.tags(Tag::builder().key(key).value(value).build()),
        )
        .build()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tag_specification_targets_subnets() {
        let spec = tag_specification(&[("Name".into(), "Priv-v6only-Subnet".into())]);
        assert_eq!(spec.resource_type(), Some(&ResourceType::Subnet));
        assert_eq!(spec.tags().len(), 1);
        assert_eq!(spec.tags()[0].key(), Some("Name"));
        assert_eq!(spec.tags()[0].value(), Some("Priv-v6only-Subnet"));
    }

    #[test]
    fn tag_specification_without_tags() {
        let spec = tag_specification(&[]);
        assert_eq!(spec.resource_type(), Some(&ResourceType::Subnet));
        assert!(spec.tags().is_empty());
    }

    #[test]
    fn api_error_names_operation() {
        let e = ApiError::new("CreateSubnet", "InvalidSubnet.Range");
        assert_eq!(e.to_string(), "CreateSubnet: InvalidSubnet.Range");
    }
}
