//! Virtual Private Cloud operations, served by the EC2 query API.

use std::sync::Arc;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::QueryError;
use crate::filter::{add_filter, Filter};
use crate::params::{add_params_list, make_params};
use crate::query::{Clock, QueryApi};
use crate::region::Region;
use crate::service::Service;
use crate::signing::{Credentials, SignatureV2, Signer};

/// Operations against the VPC actions of the EC2 query API of one region.
#[derive(Debug, Clone)]
pub struct Vpc {
    api: QueryApi,
}

impl Vpc {
    /// Create a client signing with Signature Version 2.
    pub fn new(credentials: Credentials, region: Region) -> Result<Self, QueryError> {
        Self::with_signer(SignatureV2::new(credentials), region)
    }

    /// Create a client with a custom signer.
    pub fn with_signer(signer: impl Signer + 'static, region: Region) -> Result<Self, QueryError> {
        Ok(Self {
            api: QueryApi::new(Service::Ec2, region, Arc::new(signer))?,
        })
    }

    /// Use `clock` for request timestamps instead of the system clock.
    pub fn with_clock(mut self, clock: Clock) -> Self {
        self.api = self.api.with_clock(clock);
        self
    }

    /// Set the HTTP timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Result<Self, QueryError> {
        self.api = self.api.with_timeout(timeout)?;
        Ok(self)
    }

    /// Reject responses larger than `max` bytes. Defaults to 16 MiB.
    pub fn with_max_body_size(mut self, max: usize) -> Self {
        self.api = self.api.with_max_body_size(max);
        self
    }

    /// The region this client talks to.
    pub fn region(&self) -> &Region {
        self.api.region()
    }

    /// Describe VPCs, optionally restricted to `vpc_ids`.
    pub fn describe_vpcs(
        &self,
        vpc_ids: &[&str],
        filter: Option<&Filter>,
    ) -> Result<DescribeVpcsResponse, QueryError> {
        let mut params = make_params("DescribeVpcs");
        add_params_list(&mut params, "VpcId", vpc_ids);
        add_filter(&mut params, filter);
        self.api.query(params)
    }

    /// Describe subnets, optionally restricted to `subnet_ids`.
    pub fn describe_subnets(
        &self,
        subnet_ids: &[&str],
        filter: Option<&Filter>,
    ) -> Result<DescribeSubnetsResponse, QueryError> {
        let mut params = make_params("DescribeSubnets");
        add_params_list(&mut params, "SubnetId", subnet_ids);
        add_filter(&mut params, filter);
        self.api.query(params)
    }
}

/// EC2 wraps every list in `<...Set><item>`.
#[derive(Default, Deserialize)]
struct ItemSet<T> {
    #[serde(rename = "item", default)]
    items: Vec<T>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "RawDescribeVpcs")]
pub struct DescribeVpcsResponse {
    pub vpcs: Vec<VpcInfo>,
    pub request_id: Option<String>,
}

#[derive(Deserialize)]
struct RawDescribeVpcs {
    #[serde(rename = "requestId", default)]
    request_id: Option<String>,
    #[serde(rename = "vpcSet", default)]
    vpcs: ItemSet<VpcInfo>,
}

impl From<RawDescribeVpcs> for DescribeVpcsResponse {
    fn from(raw: RawDescribeVpcs) -> Self {
        Self {
            vpcs: raw.vpcs.items,
            request_id: raw.request_id,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VpcInfo {
    #[serde(rename = "vpcId")]
    pub vpc_id: String,
    #[serde(rename = "state")]
    pub state: String,
    #[serde(rename = "cidrBlock")]
    pub cidr_block: String,
    #[serde(rename = "dhcpOptionsId")]
    pub dhcp_options_id: Option<String>,
    #[serde(rename = "instanceTenancy")]
    pub instance_tenancy: Option<String>,
    #[serde(rename = "isDefault")]
    pub is_default: Option<bool>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "RawDescribeSubnets")]
pub struct DescribeSubnetsResponse {
    pub subnets: Vec<SubnetInfo>,
    pub request_id: Option<String>,
}

#[derive(Deserialize)]
struct RawDescribeSubnets {
    #[serde(rename = "requestId", default)]
    request_id: Option<String>,
    #[serde(rename = "subnetSet", default)]
    subnets: ItemSet<SubnetInfo>,
}

impl From<RawDescribeSubnets> for DescribeSubnetsResponse {
    fn from(raw: RawDescribeSubnets) -> Self {
        Self {
            subnets: raw.subnets.items,
            request_id: raw.request_id,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SubnetInfo {
    #[serde(rename = "subnetId")]
    pub subnet_id: String,
    #[serde(rename = "state")]
    pub state: String,
    #[serde(rename = "vpcId")]
    pub vpc_id: String,
    #[serde(rename = "cidrBlock")]
    pub cidr_block: String,
    #[serde(rename = "availableIpAddressCount")]
    pub available_ip_address_count: Option<u32>,
    #[serde(rename = "availabilityZone")]
    pub availability_zone: Option<String>,
    #[serde(rename = "defaultForAz")]
    pub default_for_az: Option<bool>,
    #[serde(rename = "mapPublicIpOnLaunch")]
    pub map_public_ip_on_launch: Option<bool>,
}
