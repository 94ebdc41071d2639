//! Relational Database Service client.

use std::sync::Arc;
use std::time::Duration;

use serde::{Deserialize, Deserializer, Serialize};

use crate::error::QueryError;
use crate::filter::{add_filter, Filter};
use crate::params::{add_params_list, make_params};
use crate::query::{Clock, QueryApi};
use crate::region::Region;
use crate::service::Service;
use crate::signing::{Credentials, SignatureV2, Signer};

/// Operations against the RDS query API of one region.
///
/// # Example
///
/// ```ignore
/// use aws_query::{Credentials, Filter, Rds, Region};
///
/// let rds = Rds::new(Credentials::from_env()?, Region::from_name("us-east-1")?)?;
/// let mut filter = Filter::new();
/// filter.add("engine", ["mysql"]);
/// let resp = rds.describe_db_instances(&[], Some(&filter))?;
/// for instance in resp.instances {
///     println!("{} {}", instance.identifier, instance.status);
/// }
/// ```
#[derive(Debug, Clone)]
pub struct Rds {
    api: QueryApi,
}

impl Rds {
    /// Create a client signing with Signature Version 2.
    pub fn new(credentials: Credentials, region: Region) -> Result<Self, QueryError> {
        Self::with_signer(SignatureV2::new(credentials), region)
    }

    /// Create a client with a custom signer.
    pub fn with_signer(signer: impl Signer + 'static, region: Region) -> Result<Self, QueryError> {
        Ok(Self {
            api: QueryApi::new(Service::Rds, region, Arc::new(signer))?,
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

    /// Describe database instances, optionally restricted to `ids`.
    pub fn describe_db_instances(
        &self,
        ids: &[&str],
        filter: Option<&Filter>,
    ) -> Result<DescribeDbInstancesResponse, QueryError> {
        let mut params = make_params("DescribeDBInstances");
        add_params_list(&mut params, "InstanceId", ids);
        add_filter(&mut params, filter);
        self.api.query(params)
    }

    /// Describe parameter groups, optionally restricted to `names`.
    pub fn describe_db_parameter_groups(
        &self,
        names: &[&str],
        filter: Option<&Filter>,
    ) -> Result<DescribeDbParameterGroupsResponse, QueryError> {
        let mut params = make_params("DescribeDBParameterGroups");
        add_params_list(&mut params, "DBParameterGroupName", names);
        add_filter(&mut params, filter);
        self.api.query(params)
    }

    /// Describe the parameters of the named parameter groups.
    pub fn describe_db_parameters(
        &self,
        group_names: &[&str],
        filter: Option<&Filter>,
    ) -> Result<DescribeDbParametersResponse, QueryError> {
        let mut params = make_params("DescribeDBParameters");
        add_params_list(&mut params, "DBParameterGroupName", group_names);
        add_filter(&mut params, filter);
        self.api.query(params)
    }
}

// ----------------------------------------------------------------------------
// DescribeDBInstances

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "RawDescribeDbInstances")]
pub struct DescribeDbInstancesResponse {
    pub instances: Vec<DbInstance>,
    pub request_id: Option<String>,
}

#[derive(Deserialize)]
struct RawDescribeDbInstances {
    #[serde(rename = "DescribeDBInstancesResult", default)]
    result: DbInstancesResult,
    #[serde(rename = "ResponseMetadata", default)]
    metadata: ResponseMetadata,
}

#[derive(Default, Deserialize)]
struct DbInstancesResult {
    #[serde(rename = "DBInstances", default)]
    instances: DbInstanceList,
}

#[derive(Default, Deserialize)]
struct DbInstanceList {
    #[serde(rename = "DBInstance", default)]
    items: Vec<DbInstance>,
}

impl From<RawDescribeDbInstances> for DescribeDbInstancesResponse {
    fn from(raw: RawDescribeDbInstances) -> Self {
        Self {
            instances: raw.result.instances.items,
            request_id: raw.metadata.request_id,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DbInstance {
    #[serde(rename = "DBInstanceIdentifier")]
    pub identifier: String,
    #[serde(rename = "DBInstanceClass")]
    pub class: String,
    #[serde(rename = "Engine")]
    pub engine: String,
    #[serde(rename = "EngineVersion")]
    pub engine_version: Option<String>,
    #[serde(rename = "DBInstanceStatus")]
    pub status: String,
    #[serde(rename = "MasterUsername")]
    pub master_username: Option<String>,
    #[serde(rename = "Endpoint")]
    pub endpoint: Option<Endpoint>,
    #[serde(rename = "AllocatedStorage")]
    pub allocated_storage: Option<u32>,
    #[serde(rename = "InstanceCreateTime")]
    pub instance_create_time: Option<String>,
    #[serde(rename = "LatestRestorableTime")]
    pub latest_restorable_time: Option<String>,
    #[serde(rename = "PreferredBackupWindow")]
    pub preferred_backup_window: Option<String>,
    #[serde(rename = "PreferredMaintenanceWindow")]
    pub preferred_maintenance_window: Option<String>,
    #[serde(rename = "BackupRetentionPeriod")]
    pub backup_retention_period: Option<u32>,
    #[serde(rename = "MultiAZ")]
    pub multi_az: Option<bool>,
    #[serde(rename = "AutoMinorVersionUpgrade")]
    pub auto_minor_version_upgrade: Option<bool>,
    #[serde(rename = "LicenseModel")]
    pub license_model: Option<String>,
    #[serde(rename = "AvailabilityZone")]
    pub availability_zone: Option<String>,
    #[serde(rename = "PendingModifiedValues")]
    pub pending_modified_values: Option<PendingModifiedValues>,
    #[serde(rename = "DBSecurityGroups", deserialize_with = "security_groups")]
    pub security_groups: Vec<DbSecurityGroupMembership>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Endpoint {
    #[serde(rename = "Address")]
    pub address: String,
    #[serde(rename = "Port")]
    pub port: Option<u16>,
}

/// Changes queued for the next maintenance window.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PendingModifiedValues {
    #[serde(rename = "DBInstanceClass")]
    pub class: Option<String>,
    #[serde(rename = "AllocatedStorage")]
    pub allocated_storage: Option<u32>,
    #[serde(rename = "MasterUserPassword")]
    pub master_user_password: Option<String>,
    #[serde(rename = "Port")]
    pub port: Option<u16>,
    #[serde(rename = "BackupRetentionPeriod")]
    pub backup_retention_period: Option<u32>,
    #[serde(rename = "MultiAZ")]
    pub multi_az: Option<bool>,
    #[serde(rename = "EngineVersion")]
    pub engine_version: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DbSecurityGroupMembership {
    #[serde(rename = "DBSecurityGroupName")]
    pub name: String,
    #[serde(rename = "Status")]
    pub status: String,
}

fn security_groups<'de, D>(deserializer: D) -> Result<Vec<DbSecurityGroupMembership>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    struct List {
        #[serde(rename = "DBSecurityGroup", default)]
        items: Vec<DbSecurityGroupMembership>,
    }
    Ok(List::deserialize(deserializer)?.items)
}

// ----------------------------------------------------------------------------
// DescribeDBParameterGroups

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "RawDescribeDbParameterGroups")]
pub struct DescribeDbParameterGroupsResponse {
    pub parameter_groups: Vec<DbParameterGroup>,
    pub request_id: Option<String>,
}

#[derive(Deserialize)]
struct RawDescribeDbParameterGroups {
    #[serde(rename = "DescribeDBParameterGroupsResult", default)]
    result: DbParameterGroupsResult,
    #[serde(rename = "ResponseMetadata", default)]
    metadata: ResponseMetadata,
}

#[derive(Default, Deserialize)]
struct DbParameterGroupsResult {
    #[serde(rename = "DBParameterGroups", default)]
    groups: DbParameterGroupList,
}

#[derive(Default, Deserialize)]
struct DbParameterGroupList {
    #[serde(rename = "DBParameterGroup", default)]
    items: Vec<DbParameterGroup>,
}

impl From<RawDescribeDbParameterGroups> for DescribeDbParameterGroupsResponse {
    fn from(raw: RawDescribeDbParameterGroups) -> Self {
        Self {
            parameter_groups: raw.result.groups.items,
            request_id: raw.metadata.request_id,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DbParameterGroup {
    #[serde(rename = "DBParameterGroupName")]
    pub name: String,
    #[serde(rename = "DBParameterGroupFamily")]
    pub family: String,
    #[serde(rename = "Description")]
    pub description: String,
}

// ----------------------------------------------------------------------------
// DescribeDBParameters

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "RawDescribeDbParameters")]
pub struct DescribeDbParametersResponse {
    pub parameters: Vec<DbParameter>,
    pub request_id: Option<String>,
}

#[derive(Deserialize)]
struct RawDescribeDbParameters {
    #[serde(rename = "DescribeDBParametersResult", default)]
    result: DbParametersResult,
    #[serde(rename = "ResponseMetadata", default)]
    metadata: ResponseMetadata,
}

#[derive(Default, Deserialize)]
struct DbParametersResult {
    #[serde(rename = "Parameters", default)]
    parameters: DbParameterList,
}

#[derive(Default, Deserialize)]
struct DbParameterList {
    #[serde(rename = "Parameter", default)]
    items: Vec<DbParameter>,
}

impl From<RawDescribeDbParameters> for DescribeDbParametersResponse {
    fn from(raw: RawDescribeDbParameters) -> Self {
        Self {
            parameters: raw.result.parameters.items,
            request_id: raw.metadata.request_id,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DbParameter {
    #[serde(rename = "ParameterName")]
    pub name: String,
    #[serde(rename = "ParameterValue")]
    pub value: Option<String>,
    #[serde(rename = "Description")]
    pub description: Option<String>,
    #[serde(rename = "Source")]
    pub source: Option<String>,
    #[serde(rename = "ApplyType")]
    pub apply_type: Option<String>,
    #[serde(rename = "DataType")]
    pub data_type: Option<String>,
    #[serde(rename = "AllowedValues")]
    pub allowed_values: Option<String>,
    #[serde(rename = "IsModifiable")]
    pub is_modifiable: Option<bool>,
    #[serde(rename = "MinimumEngineVersion")]
    pub minimum_engine_version: Option<String>,
}

#[derive(Default, Deserialize)]
struct ResponseMetadata {
    #[serde(rename = "RequestId", default)]
    request_id: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    const INSTANCES: &str = r#"<DescribeDBInstancesResponse xmlns="http://rds.amazonaws.com/doc/2013-05-15/">
  <DescribeDBInstancesResult>
    <DBInstances>
      <DBInstance>
        <LatestRestorableTime>2013-05-15T09:55:00Z</LatestRestorableTime>
        <Engine>mysql</Engine>
        <PendingModifiedValues/>
        <BackupRetentionPeriod>1</BackupRetentionPeriod>
        <MultiAZ>false</MultiAZ>
        <LicenseModel>general-public-license</LicenseModel>
        <DBInstanceStatus>available</DBInstanceStatus>
        <EngineVersion>5.6.13</EngineVersion>
        <Endpoint>
          <Port>3306</Port>
          <Address>mydb.cdgmuqiadpid.us-east-1.rds.amazonaws.com</Address>
        </Endpoint>
        <DBInstanceIdentifier>mydb</DBInstanceIdentifier>
        <DBSecurityGroups>
          <DBSecurityGroup>
            <Status>active</Status>
            <DBSecurityGroupName>default</DBSecurityGroupName>
          </DBSecurityGroup>
          <DBSecurityGroup>
            <Status>active</Status>
            <DBSecurityGroupName>ops</DBSecurityGroupName>
          </DBSecurityGroup>
        </DBSecurityGroups>
        <PreferredBackupWindow>00:00-00:30</PreferredBackupWindow>
        <AutoMinorVersionUpgrade>true</AutoMinorVersionUpgrade>
        <PreferredMaintenanceWindow>sat:07:30-sat:08:00</PreferredMaintenanceWindow>
        <AvailabilityZone>us-east-1a</AvailabilityZone>
        <InstanceCreateTime>2013-05-14T21:29:56Z</InstanceCreateTime>
        <AllocatedStorage>5</AllocatedStorage>
        <DBInstanceClass>db.t1.micro</DBInstanceClass>
        <MasterUsername>admin</MasterUsername>
      </DBInstance>
      <DBInstance>
        <Engine>postgres</Engine>
        <DBInstanceStatus>creating</DBInstanceStatus>
        <DBInstanceIdentifier>pg</DBInstanceIdentifier>
        <DBInstanceClass>db.m1.small</DBInstanceClass>
        <PendingModifiedValues>
          <MasterUserPassword>****</MasterUserPassword>
        </PendingModifiedValues>
      </DBInstance>
    </DBInstances>
  </DescribeDBInstancesResult>
  <ResponseMetadata>
    <RequestId>9135fff3-8509-11e0-bd9b-a7b1ece36d51</RequestId>
  </ResponseMetadata>
</DescribeDBInstancesResponse>"#;

    #[test]
    fn test_decode_instances() {
        let resp: DescribeDbInstancesResponse = quick_xml::de::from_str(INSTANCES).unwrap();

        assert_eq!(resp.instances.len(), 2);
        assert_eq!(
            resp.request_id.as_deref(),
            Some("9135fff3-8509-11e0-bd9b-a7b1ece36d51")
        );

        let mydb = &resp.instances[0];
        assert_eq!(mydb.identifier, "mydb");
        assert_eq!(mydb.class, "db.t1.micro");
        assert_eq!(mydb.engine, "mysql");
        assert_eq!(mydb.engine_version.as_deref(), Some("5.6.13"));
        assert_eq!(mydb.status, "available");
        assert_eq!(mydb.allocated_storage, Some(5));
        assert_eq!(mydb.backup_retention_period, Some(1));
        assert_eq!(mydb.multi_az, Some(false));
        assert_eq!(mydb.auto_minor_version_upgrade, Some(true));
        assert_eq!(mydb.availability_zone.as_deref(), Some("us-east-1a"));

        let endpoint = mydb.endpoint.as_ref().unwrap();
        assert_eq!(endpoint.port, Some(3306));
        assert_eq!(
            endpoint.address,
            "mydb.cdgmuqiadpid.us-east-1.rds.amazonaws.com"
        );

        let groups: Vec<&str> = mydb.security_groups.iter().map(|g| g.name.as_str()).collect();
        assert_eq!(groups, ["default", "ops"]);

        let pg = &resp.instances[1];
        assert_eq!(pg.identifier, "pg");
        assert_eq!(pg.endpoint, None);
        assert!(pg.security_groups.is_empty());
        assert_eq!(
            pg.pending_modified_values
                .as_ref()
                .and_then(|p| p.master_user_password.as_deref()),
            Some("****")
        );
    }

    #[test]
    fn test_decode_empty_instances() {
        let xml = r#"<DescribeDBInstancesResponse>
  <DescribeDBInstancesResult><DBInstances/></DescribeDBInstancesResult>
</DescribeDBInstancesResponse>"#;
        let resp: DescribeDbInstancesResponse = quick_xml::de::from_str(xml).unwrap();
        assert!(resp.instances.is_empty());
        assert_eq!(resp.request_id, None);
    }

    #[test]
    fn test_decode_parameter_groups() {
        let xml = r#"<DescribeDBParameterGroupsResponse xmlns="http://rds.amazonaws.com/doc/2013-05-15/">
  <DescribeDBParameterGroupsResult>
    <DBParameterGroups>
      <DBParameterGroup>
        <DBParameterGroupFamily>mysql5.5</DBParameterGroupFamily>
        <Description>Default parameter group for mysql5.5</Description>
        <DBParameterGroupName>default.mysql5.5</DBParameterGroupName>
      </DBParameterGroup>
      <DBParameterGroup>
        <DBParameterGroupFamily>mysql5.6</DBParameterGroupFamily>
        <Description>tuned</Description>
        <DBParameterGroupName>tuned-56</DBParameterGroupName>
      </DBParameterGroup>
    </DBParameterGroups>
  </DescribeDBParameterGroupsResult>
  <ResponseMetadata><RequestId>req-pg</RequestId></ResponseMetadata>
</DescribeDBParameterGroupsResponse>"#;

        let resp: DescribeDbParameterGroupsResponse = quick_xml::de::from_str(xml).unwrap();
        assert_eq!(
            resp.parameter_groups,
            vec![
                DbParameterGroup {
                    name: "default.mysql5.5".into(),
                    family: "mysql5.5".into(),
                    description: "Default parameter group for mysql5.5".into(),
                },
                DbParameterGroup {
                    name: "tuned-56".into(),
                    family: "mysql5.6".into(),
                    description: "tuned".into(),
                },
            ]
        );
        assert_eq!(resp.request_id.as_deref(), Some("req-pg"));
    }

    #[test]
    fn test_decode_parameters() {
        let xml = r#"<DescribeDBParametersResponse>
  <DescribeDBParametersResult>
    <Parameters>
      <Parameter>
        <DataType>boolean</DataType>
        <Source>engine-default</Source>
        <IsModifiable>false</IsModifiable>
        <Description>Controls whether user-defined functions can be created</Description>
        <ApplyType>static</ApplyType>
        <AllowedValues>0,1</AllowedValues>
        <ParameterName>allow-suspicious-udfs</ParameterName>
      </Parameter>
      <Parameter>
        <DataType>integer</DataType>
        <Source>user</Source>
        <IsModifiable>true</IsModifiable>
        <ApplyType>dynamic</ApplyType>
        <ParameterName>max_connections</ParameterName>
        <ParameterValue>200</ParameterValue>
      </Parameter>
    </Parameters>
  </DescribeDBParametersResult>
</DescribeDBParametersResponse>"#;

        let resp: DescribeDbParametersResponse = quick_xml::de::from_str(xml).unwrap();
        assert_eq!(resp.parameters.len(), 2);

        let udfs = &resp.parameters[0];
        assert_eq!(udfs.name, "allow-suspicious-udfs");
        assert_eq!(udfs.value, None);
        assert_eq!(udfs.is_modifiable, Some(false));
        assert_eq!(udfs.allowed_values.as_deref(), Some("0,1"));

        let conns = &resp.parameters[1];
        assert_eq!(conns.name, "max_connections");
        assert_eq!(conns.value.as_deref(), Some("200"));
        assert_eq!(conns.source.as_deref(), Some("user"));
        assert_eq!(conns.apply_type.as_deref(), Some("dynamic"));
    }

    #[test]
    fn test_client_region() {
        let region = Region::custom("local", "http://localhost:1234", "http://localhost:5678");
        let rds = Rds::new(Credentials::new("a", "s"), region.clone()).unwrap();
        assert_eq!(rds.region(), &region);
    }
}
