//! EC2 access: client construction and the narrow [`SubnetApi`] seam.
//!
//! The ensure logic only ever talks to [`SubnetApi`]; the SDK-backed
//! implementation lives in [`ec2`].

pub mod clients;
pub mod ec2;

pub use clients::ec2_client;
pub use ec2::{ApiError, CreateSubnetSpec, Ec2SubnetApi, SubnetApi, SubnetFilter};
