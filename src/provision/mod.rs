//! Resource provisioning boundary.
//!
//! The planner itself never talks to a cloud API. Everything side-effecting
//! sits behind the [`Provisioner`] trait: each call takes plain parameters
//! (CIDR text, names, ids of previously created resources) and returns an
//! opaque [`ResourceId`] usable by dependent calls.

pub mod executor;
pub mod manifest;

use color_eyre::Result;
use serde::{Deserialize, Serialize};

// Re-export commonly used items
pub use executor::{provision_topology, ProvisionedNetwork};
pub use manifest::{Manifest, ManifestProvisioner, ResourceRecord};

/// Opaque identifier for a provisioned resource
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ResourceId(pub String);

impl std::fmt::Display for ResourceId {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Side-effecting resource creation calls, one per resource kind.
///
/// Implementations own their own retry and error semantics; failures
/// propagate to the caller untranslated.
pub trait Provisioner {
    fn create_vpc(&mut self, name: &str, cidr_block: &str) -> Result<ResourceId>;

    fn create_internet_gateway(&mut self, name: &str, vpc: &ResourceId) -> Result<ResourceId>;

    fn create_route_table(&mut self, name: &str, vpc: &ResourceId) -> Result<ResourceId>;

    fn create_subnet(
        &mut self,
        name: &str,
        vpc: &ResourceId,
        cidr_block: &str,
        availability_zone: &str,
        map_public_ip_on_launch: bool,
    ) -> Result<ResourceId>;

    fn create_route_table_association(
        &mut self,
        name: &str,
        subnet: &ResourceId,
        route_table: &ResourceId,
    ) -> Result<ResourceId>;

    fn create_route(
        &mut self,
        name: &str,
        route_table: &ResourceId,
        destination_cidr_block: &str,
        gateway: &ResourceId,
    ) -> Result<ResourceId>;
}
