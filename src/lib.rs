//! Minimal signed client for the AWS query APIs of RDS and VPC.
//!
//! Each operation builds a flat parameter set, signs it, sends it as a single
//! GET and decodes the XML response into a typed result.
//!
//! # Features
//!
//! - Describe RDS instances, parameter groups and parameters
//! - Describe VPCs and subnets
//! - Deterministic `Filter.N.Name` / `Filter.N.Value.M` parameters
//! - Signature Version 2 signing, or any custom [`Signer`]
//! - Injectable clock for reproducible requests
//!
//! # Example
//!
//! ```ignore
//! use aws_query::{Credentials, Filter, QueryError, Region, Vpc};
//!
//! fn main() -> Result<(), QueryError> {
//!     let vpc = Vpc::new(Credentials::from_env()?, Region::from_name("eu-west-1")?)?;
//!
//!     let mut filter = Filter::new();
//!     filter.add("state", ["available"]);
//!
//!     for subnet in vpc.describe_subnets(&[], Some(&filter))?.subnets {
//!         println!("{} {}", subnet.subnet_id, subnet.cidr_block);
//!     }
//!     Ok(())
//! }
//! ```
//!
//! # Operations
//!
//! | Client | Method | Action |
//! |--------|--------|--------|
//! | [`Rds`] | `describe_db_instances` | DescribeDBInstances |
//! | [`Rds`] | `describe_db_parameter_groups` | DescribeDBParameterGroups |
//! | [`Rds`] | `describe_db_parameters` | DescribeDBParameters |
//! | [`Vpc`] | `describe_vpcs` | DescribeVpcs |
//! | [`Vpc`] | `describe_subnets` | DescribeSubnets |

pub mod arn;
mod client;
mod error;
mod filter;
mod params;
mod query;
pub mod rds;
mod region;
mod service;
pub mod signing;
pub mod vpc;

pub use client::{DEFAULT_MAX_BODY_SIZE, DEFAULT_TIMEOUT};
pub use error::{QueryError, ServiceError};
pub use filter::Filter;
pub use params::{add_params_list, make_params, Params};
pub use query::{system_clock, Clock};
pub use rds::Rds;
pub use region::{Region, REGIONS};
pub use service::Service;
pub use signing::{Credentials, SignatureV2, Signer};
pub use vpc::Vpc;
