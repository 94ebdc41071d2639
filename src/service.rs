//! Query API service enumeration.

use std::fmt;

/// Query API services with a pinned API version.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Service {
    /// Relational Database Service
    Rds,
    /// Elastic Compute Cloud (serves the VPC actions)
    Ec2,
}

impl Service {
    /// The `Version` parameter sent with every request.
    pub fn api_version(&self) -> &'static str {
        match self {
            Service::Rds => "2013-05-15",
            Service::Ec2 => "2013-10-01",
        }
    }

    /// Endpoint prefix used in `https://{prefix}.{region}.amazonaws.com`.
    pub fn endpoint_prefix(&self) -> &'static str {
        match self {
            Service::Rds => "rds",
            Service::Ec2 => "ec2",
        }
    }
}

impl fmt::Display for Service {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Service::Rds => write!(f, "RDS"),
            Service::Ec2 => write!(f, "EC2"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_service_display() {
        assert_eq!(Service::Rds.to_string(), "RDS");
        assert_eq!(Service::Ec2.to_string(), "EC2");
    }

    #[test]
    fn test_api_versions() {
        assert_eq!(Service::Rds.api_version(), "2013-05-15");
        assert_eq!(Service::Ec2.api_version(), "2013-10-01");
    }

    #[test]
    fn test_endpoint_prefix() {
        assert_eq!(Service::Rds.endpoint_prefix(), "rds");
        assert_eq!(Service::Ec2.endpoint_prefix(), "ec2");
    }
}
