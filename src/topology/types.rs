//! Subnet plan type definitions.
//!
//! This file contains the types that make up a finished topology plan:
//! the role a subnet plays and the per-subnet plan entry handed to the
//! provisioning layer.

use serde::{Deserialize, Serialize};

use crate::net::AddressBlock;

/// Role a subnet plays in the topology
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SubnetRole {
    /// Routed to the internet gateway; instances get public IPs on launch
    Public,
    /// No default route to the internet gateway
    Private,
}

impl SubnetRole {
    /// Returns true for the public role
    pub fn is_public(&self) -> bool {
        matches!(self, Self::Public)
    }

    /// Lowercase label used in resource names and log lines
    pub fn label(&self) -> &'static str {
        match self {
            Self::Public => "public",
            Self::Private => "private",
        }
    }
}

impl std::fmt::Display for SubnetRole {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// One subnet in a finished plan.
///
/// Created once by the allocator, handed by value to the provisioning layer,
/// never mutated. `index` is the ordinal within the subnet's role group
/// (public and private each count from 0), which is what deterministic
/// resource naming keys on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubnetPlanEntry {
    /// Ordinal within the role group, used for resource naming
    pub index: u32,
    /// The subnet's address block
    pub cidr: AddressBlock,
    /// Availability zone this subnet is pinned to, as an index into the
    /// region's zone list
    pub zone_index: u32,
    /// Public or private
    pub role: SubnetRole,
}
