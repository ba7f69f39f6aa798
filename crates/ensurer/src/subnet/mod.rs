//! Create-if-missing for a single IPv6-only subnet.
//!
//! # Flow
//!
//! 1. Look up subnets in the VPC associated with the requested IPv6 CIDR.
//! 2. If none match, create an IPv6-native subnet tagged [`SUBNET_NAME`].
//! 3. Enable DNS64 on the subnet just created.
//!
//! Calls run strictly in sequence and nothing is retried. A DNS64 failure
//! leaves the created subnet in place and is reported as
//! [`EnsureError::EnableDns64`].
//!
//! The lookup and the create are not atomic: two concurrent invocations for
//! the same VPC and CIDR can both observe "absent".

use common::{EnsureError, EnsureOutcome, SubnetRequest};
use tracing::{debug, info, instrument, warn};

use crate::aws::{CreateSubnetSpec, SubnetApi, SubnetFilter};

/// Value of the `Name` tag applied to every subnet this service creates.
pub const SUBNET_NAME: &str = "Priv-v6only-Subnet";

/// Whether a subnet for the requested VPC and CIDR already exists.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Existence {
    Absent,
    Present { matches: usize },
}

impl Existence {
    pub fn from_count(matches: usize) -> Self {
        if matches == 0 {
            Existence::Absent
        } else {
            Existence::Present { matches }
        }
    }
}

/// Query the provider for subnets matching the request's VPC and IPv6 CIDR.
///
/// # Errors
///
/// Returns [`EnsureError::Lookup`] if the query fails.
pub async fn lookup<A>(api: &A, req: &SubnetRequest) -> Result<Existence, EnsureError>
where
    A: SubnetApi + ?Sized,
{
    let filter = SubnetFilter {
        vpc_id: req.vpc_id.clone(),
        ipv6_cidr: req.ipv6_cidr.clone(),
    };
    let count = api
        .count_matching_subnets(&filter)
        .await
        .map_err(|e| EnsureError::Lookup(e.to_string()))?;
    Ok(Existence::from_count(count))
}

/// Create parameters for an IPv6-only subnet matching `req`.
pub fn ipv6_only_spec(req: &SubnetRequest) -> CreateSubnetSpec {
    CreateSubnetSpec {
        availability_zone: req.availability_zone.clone(),
        vpc_id: req.vpc_id.clone(),
        ipv6_cidr: req.ipv6_cidr.clone(),
        ipv6_native: true,
        tags: vec![("Name".into(), SUBNET_NAME.into())],
    }
}

/// Ensure an IPv6-only, DNS64-enabled subnet exists for `req`.
///
/// Returns [`EnsureOutcome::Created`] with the new id, or
/// [`EnsureOutcome::AlreadyExists`] when at least one subnet already matches.
/// Several matches are accepted as "exists" and logged at `warn`.
///
/// # Errors
///
/// - [`EnsureError::Lookup`] if the existence query fails.
/// - [`EnsureError::Create`] if the create call fails; DNS64 is not attempted.
/// - [`EnsureError::EnableDns64`] if DNS64 cannot be enabled after creation.
#[instrument(
    skip(api, req),
    fields(vpc_id = %req.vpc_id, ipv6_cidr = %req.ipv6_cidr)
)]
pub async fn ensure_subnet<A>(api: &A, req: &SubnetRequest) -> Result<EnsureOutcome, EnsureError>
where
    A: SubnetApi + ?Sized,
{
    if let Existence::Present { matches } = lookup(api, req).await? {
        if matches > 1 {
            warn!(matches, "several subnets match the VPC and IPv6 CIDR");
        }
        info!("subnet already exists");
        return Ok(EnsureOutcome::AlreadyExists);
    }

    info!(availability_zone = %req.availability_zone, "creating subnet");
    let subnet_id = api
        .create_subnet(&ipv6_only_spec(req))
        .await
        .map_err(|e| EnsureError::Create(e.to_string()))?;

    api.enable_dns64(&subnet_id)
        .await
        .map_err(|e| EnsureError::EnableDns64 {
            subnet_id: subnet_id.to_string(),
            message: e.to_string(),
        })?;

    debug!(subnet_id = %subnet_id, "DNS64 enabled");
    Ok(EnsureOutcome::Created(subnet_id))
}
