//! Region endpoint catalog.

use crate::error::QueryError;
use crate::service::Service;

/// Region names known to the built-in catalog.
pub const REGIONS: &[&str] = &[
    "us-east-1",
    "us-west-1",
    "us-west-2",
    "us-gov-west-1",
    "eu-west-1",
    "eu-central-1",
    "ap-southeast-1",
    "ap-southeast-2",
    "ap-northeast-1",
    "sa-east-1",
    "cn-north-1",
];

/// A region and the endpoints of the services this crate talks to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Region {
    name: String,
    rds_endpoint: String,
    ec2_endpoint: String,
}

impl Region {
    /// Look up a region in the built-in catalog.
    pub fn from_name(name: &str) -> Result<Self, QueryError> {
        if !REGIONS.contains(&name) {
            return Err(QueryError::UnknownRegion(name.to_string()));
        }
        Ok(Self {
            name: name.to_string(),
            rds_endpoint: standard_endpoint(Service::Rds, name),
            ec2_endpoint: standard_endpoint(Service::Ec2, name),
        })
    }

    /// A region with explicit endpoints, e.g. a mock server or a compatible service.
    pub fn custom(name: &str, rds_endpoint: &str, ec2_endpoint: &str) -> Self {
        Self {
            name: name.to_string(),
            rds_endpoint: rds_endpoint.to_string(),
            ec2_endpoint: ec2_endpoint.to_string(),
        }
    }

    /// Region name ("us-east-1", ...).
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Endpoint URL for the given service.
    pub fn endpoint(&self, service: Service) -> &str {
        match service {
            Service::Rds => &self.rds_endpoint,
            Service::Ec2 => &self.ec2_endpoint,
        }
    }
}

impl Default for Region {
    fn default() -> Self {
        Self {
            name: "us-east-1".to_string(),
            rds_endpoint: standard_endpoint(Service::Rds, "us-east-1"),
            ec2_endpoint: standard_endpoint(Service::Ec2, "us-east-1"),
        }
    }
}

fn standard_endpoint(service: Service, region: &str) -> String {
    let prefix = service.endpoint_prefix();
    if region.starts_with("cn-") {
        format!("https://{}.{}.amazonaws.com.cn", prefix, region)
    } else {
        format!("https://{}.{}.amazonaws.com", prefix, region)
    }
}
