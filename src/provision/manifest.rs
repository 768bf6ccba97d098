//! Recording provisioner.
//!
//! An in-memory [`Provisioner`] that records every resource it is asked to
//! create instead of calling a cloud API. The resulting manifest serializes
//! to JSON for inspection, and doubles as the test double for the executor.

use std::collections::BTreeMap;

use color_eyre::Result;
use serde::{Deserialize, Serialize};

use super::{Provisioner, ResourceId};

/// One recorded resource
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceRecord {
    pub id: String,
    pub kind: String,
    pub name: String,
    pub attributes: BTreeMap<String, String>,
}

/// All resources recorded during one run, in creation order
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Manifest {
    pub resources: Vec<ResourceRecord>,
}

impl Manifest {
    /// Iterate over records of one resource kind, in creation order
    pub fn find_kind<'a>(&'a self, kind: &'a str) -> impl Iterator<Item = &'a ResourceRecord> {
        self.resources.iter().filter(move |r| r.kind == kind)
    }

    /// Number of records of one resource kind
    pub fn count_kind(&self, kind: &str) -> usize {
        self.find_kind(kind).count()
    }

    /// Serialize the manifest to pretty-printed JSON
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Provisioner that records instead of creating
#[derive(Debug, Default)]
pub struct ManifestProvisioner {
    manifest: Manifest,
    next_seq: u32,
}

impl ManifestProvisioner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Consume the provisioner and return everything it recorded
    pub fn into_manifest(self) -> Manifest {
        self.manifest
    }

    fn record(
        &mut self,
        kind: &str,
        name: &str,
        attributes: BTreeMap<String, String>,
    ) -> ResourceId {
        let id = format!("{}-{:04}", kind, self.next_seq);
        self.next_seq += 1;
        self.manifest.resources.push(ResourceRecord {
            id: id.clone(),
            kind: kind.to_string(),
            name: name.to_string(),
            attributes,
        });
        ResourceId(id)
    }
}

impl Provisioner for ManifestProvisioner {
    fn create_vpc(&mut self, name: &str, cidr_block: &str) -> Result<ResourceId> {
        let attributes = BTreeMap::from([("cidr_block".to_string(), cidr_block.to_string())]);
        Ok(self.record("vpc", name, attributes))
    }

    fn create_internet_gateway(&mut self, name: &str, vpc: &ResourceId) -> Result<ResourceId> {
        let attributes = BTreeMap::from([("vpc_id".to_string(), vpc.0.clone())]);
        Ok(self.record("internet-gateway", name, attributes))
    }

    fn create_route_table(&mut self, name: &str, vpc: &ResourceId) -> Result<ResourceId> {
        let attributes = BTreeMap::from([("vpc_id".to_string(), vpc.0.clone())]);
        Ok(self.record("route-table", name, attributes))
    }

    fn create_subnet(
        &mut self,
        name: &str,
        vpc: &ResourceId,
        cidr_block: &str,
        availability_zone: &str,
        map_public_ip_on_launch: bool,
    ) -> Result<ResourceId> {
        let attributes = BTreeMap::from([
            ("vpc_id".to_string(), vpc.0.clone()),
            ("cidr_block".to_string(), cidr_block.to_string()),
            (
                "availability_zone".to_string(),
                availability_zone.to_string(),
            ),
            (
                "map_public_ip_on_launch".to_string(),
                map_public_ip_on_launch.to_string(),
            ),
        ]);
        Ok(self.record("subnet", name, attributes))
    }

    fn create_route_table_association(
        &mut self,
        name: &str,
        subnet: &ResourceId,
        route_table: &ResourceId,
    ) -> Result<ResourceId> {
        let attributes = BTreeMap::from([
            ("subnet_id".to_string(), subnet.0.clone()),
            ("route_table_id".to_string(), route_table.0.clone()),
        ]);
        Ok(self.record("route-table-association", name, attributes))
    }

    fn create_route(
        &mut self,
        name: &str,
        route_table: &ResourceId,
        destination_cidr_block: &str,
        gateway: &ResourceId,
    ) -> Result<ResourceId> {
        let attributes = BTreeMap::from([
            ("route_table_id".to_string(), route_table.0.clone()),
            (
                "destination_cidr_block".to_string(),
                destination_cidr_block.to_string(),
            ),
            ("gateway_id".to_string(), gateway.0.clone()),
        ]);
        Ok(self.record("route", name, attributes))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ids_are_sequential_per_run() {
        let mut provisioner = ManifestProvisioner::new();
        let vpc = provisioner.create_vpc("vpc", "10.0.0.0/16").unwrap();
        let igw = provisioner.create_internet_gateway("igw", &vpc).unwrap();
        assert_eq!(vpc.0, "vpc-0000");
        assert_eq!(igw.0, "internet-gateway-0001");
    }

    #[test]
    fn test_records_keep_creation_order_and_attributes() {
        let mut provisioner = ManifestProvisioner::new();
        let vpc = provisioner.create_vpc("main-vpc", "10.0.0.0/16").unwrap();
        provisioner
            .create_subnet("public-subnet-0", &vpc, "10.0.0.0/18", "us-east-1a", true)
            .unwrap();

        let manifest = provisioner.into_manifest();
        assert_eq!(manifest.resources.len(), 2);
        assert_eq!(manifest.resources[0].kind, "vpc");
        assert_eq!(manifest.resources[1].kind, "subnet");

        let subnet = &manifest.resources[1];
        assert_eq!(subnet.name, "public-subnet-0");
        assert_eq!(subnet.attributes.get("cidr_block").unwrap(), "10.0.0.0/18");
        assert_eq!(
            subnet.attributes.get("availability_zone").unwrap(),
            "us-east-1a"
        );
    }

    #[test]
    fn test_manifest_json_round_trip() {
        let mut provisioner = ManifestProvisioner::new();
        provisioner.create_vpc("main-vpc", "10.0.0.0/16").unwrap();
        let manifest = provisioner.into_manifest();

        let json = manifest.to_json().unwrap();
        let back: Manifest = serde_json::from_str(&json).unwrap();
        assert_eq!(back, manifest);
    }
}
