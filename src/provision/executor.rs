//! Plan execution.
//!
//! Second phase of the two-phase design: the allocator computes the full
//! subnet plan first, then this executor walks the finished plan and drives
//! a [`Provisioner`] to create every resource. Resource names are built
//! from the configured prefixes plus each entry's per-role ordinal, so
//! repeated runs with the same input produce the same names.

use color_eyre::Result;
use log::info;

use crate::config::Config;
use crate::topology::SubnetPlanEntry;

use super::{Provisioner, ResourceId};

/// Ids of the top-level resources created for one topology
#[derive(Debug, Clone)]
pub struct ProvisionedNetwork {
    pub vpc: ResourceId,
    pub internet_gateway: ResourceId,
    pub public_route_table: ResourceId,
    pub private_route_table: ResourceId,
    pub subnets: Vec<ResourceId>,
}

/// Availability zone name for a zone index, e.g. ("us-east-1", 0) ->
/// "us-east-1a". Zone indices are capped well below 26 by the allocator.
pub fn zone_name(region: &str, zone_index: u32) -> String {
    let letter = (b'a' + (zone_index % 26) as u8) as char;
    format!("{}{}", region, letter)
}

/// Create every resource for a finished plan: one VPC, one internet
/// gateway, one route table per role, one subnet and one route-table
/// association per plan entry, and the default route wiring the public
/// route table to the gateway.
pub fn provision_topology(
    provisioner: &mut dyn Provisioner,
    config: &Config,
    plan: &[SubnetPlanEntry],
) -> Result<ProvisionedNetwork> {
    let naming = &config.naming;
    let region = &config.network.region;

    let vpc = provisioner.create_vpc(&naming.vpc, &config.network.cidr_block)?;
    info!("Created VPC {} ({})", naming.vpc, vpc);

    let internet_gateway =
        provisioner.create_internet_gateway(&naming.internet_gateway, &vpc)?;
    let public_route_table =
        provisioner.create_route_table(&naming.public_route_table, &vpc)?;
    let private_route_table =
        provisioner.create_route_table(&naming.private_route_table, &vpc)?;

    let mut subnets = Vec::with_capacity(plan.len());
    for entry in plan {
        let (subnet_prefix, association_prefix, route_table) = if entry.role.is_public() {
            (
                &naming.public_subnet_prefix,
                &naming.public_association_prefix,
                &public_route_table,
            )
        } else {
            (
                &naming.private_subnet_prefix,
                &naming.private_association_prefix,
                &private_route_table,
            )
        };

        let subnet_name = format!("{}{}", subnet_prefix, entry.index);
        let subnet = provisioner.create_subnet(
            &subnet_name,
            &vpc,
            &entry.cidr.to_string(),
            &zone_name(region, entry.zone_index),
            entry.role.is_public(),
        )?;
        info!(
            "Created {} subnet {} with {} in zone {}",
            entry.role,
            subnet_name,
            entry.cidr,
            zone_name(region, entry.zone_index)
        );

        provisioner.create_route_table_association(
            &format!("{}{}", association_prefix, entry.index),
            &subnet,
            route_table,
        )?;
        subnets.push(subnet);
    }

    provisioner.create_route(
        "public-route",
        &public_route_table,
        &config.routing.destination_cidr_block,
        &internet_gateway,
    )?;
    info!(
        "Wired default route {} on {} to {}",
        config.routing.destination_cidr_block, naming.public_route_table, naming.internet_gateway
    );

    Ok(ProvisionedNetwork {
        vpc,
        internet_gateway,
        public_route_table,
        private_route_table,
        subnets,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::provision::ManifestProvisioner;
    use crate::topology::TopologyAllocator;

    fn test_config(region: &str) -> Config {
        serde_yaml::from_str(&format!(
            r#"
network:
  cidr_block: "10.0.0.0/16"
  region: "{}"
"#,
            region
        ))
        .unwrap()
    }

    #[test]
    fn test_zone_name() {
        assert_eq!(zone_name("us-east-1", 0), "us-east-1a");
        assert_eq!(zone_name("us-east-1", 2), "us-east-1c");
        assert_eq!(zone_name("eu-west-1", 1), "eu-west-1b");
    }

    #[test]
    fn test_provision_topology_resource_counts() {
        let config = test_config("us-east-1");
        let plan = TopologyAllocator::default()
            .plan(config.source_block().unwrap(), &config.network.region)
            .unwrap();

        let mut provisioner = ManifestProvisioner::new();
        let network = provision_topology(&mut provisioner, &config, &plan).unwrap();

        assert_eq!(network.subnets.len(), 6);
        let manifest = provisioner.into_manifest();
        assert_eq!(manifest.count_kind("vpc"), 1);
        assert_eq!(manifest.count_kind("internet-gateway"), 1);
        assert_eq!(manifest.count_kind("route-table"), 2);
        assert_eq!(manifest.count_kind("subnet"), 6);
        assert_eq!(manifest.count_kind("route-table-association"), 6);
        assert_eq!(manifest.count_kind("route"), 1);
    }

    #[test]
    fn test_default_route_points_at_gateway() {
        let config = test_config("us-west-1");
        let plan = TopologyAllocator::default()
            .plan(config.source_block().unwrap(), &config.network.region)
            .unwrap();

        let mut provisioner = ManifestProvisioner::new();
        let network = provision_topology(&mut provisioner, &config, &plan).unwrap();

        let manifest = provisioner.into_manifest();
        let route = manifest.find_kind("route").next().unwrap();
        assert_eq!(
            route.attributes.get("route_table_id").unwrap(),
            &network.public_route_table.0
        );
        assert_eq!(
            route.attributes.get("gateway_id").unwrap(),
            &network.internet_gateway.0
        );
        assert_eq!(
            route.attributes.get("destination_cidr_block").unwrap(),
            "0.0.0.0/0"
        );
    }

    #[test]
    fn test_subnet_names_are_deterministic() {
        let config = test_config("us-west-1");
        let plan = TopologyAllocator::default()
            .plan(config.source_block().unwrap(), &config.network.region)
            .unwrap();

        let mut first = ManifestProvisioner::new();
        provision_topology(&mut first, &config, &plan).unwrap();
        let mut second = ManifestProvisioner::new();
        provision_topology(&mut second, &config, &plan).unwrap();

        assert_eq!(first.into_manifest(), second.into_manifest());
    }

    #[test]
    fn test_subnet_naming_and_zones() {
        let config = test_config("us-west-1");
        let plan = TopologyAllocator::default()
            .plan(config.source_block().unwrap(), &config.network.region)
            .unwrap();

        let mut provisioner = ManifestProvisioner::new();
        provision_topology(&mut provisioner, &config, &plan).unwrap();
        let manifest = provisioner.into_manifest();

        let names: Vec<&str> = manifest.find_kind("subnet").map(|r| r.name.as_str()).collect();
        assert_eq!(
            names,
            vec![
                "public-subnet-0",
                "public-subnet-1",
                "private-subnet-0",
                "private-subnet-1",
            ]
        );

        let zones: Vec<&str> = manifest
            .find_kind("subnet")
            .map(|r| r.attributes.get("availability_zone").unwrap().as_str())
            .collect();
        assert_eq!(
            zones,
            vec!["us-west-1a", "us-west-1b", "us-west-1a", "us-west-1b"]
        );

        // Only public subnets map public IPs on launch.
        let public_flags: Vec<&str> = manifest
            .find_kind("subnet")
            .map(|r| r.attributes.get("map_public_ip_on_launch").unwrap().as_str())
            .collect();
        assert_eq!(public_flags, vec!["true", "true", "false", "false"]);
    }
}
