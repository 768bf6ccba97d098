//! Network topology planning.
//!
//! This module contains the region-to-zone mapping, the subnet plan types,
//! and the allocator that assigns partitioned address blocks to
//! availability zones and public/private roles.

pub mod allocator;
pub mod regions;
pub mod types;

// Re-export key types and functions for easier access
pub use allocator::{plan_with_profile, AllocationError, TopologyAllocator};
pub use regions::{RegionMap, RegionProfile, DEFAULT_ZONE_COUNT, MAX_SUBNETS_PER_ROLE};
pub use types::{SubnetPlanEntry, SubnetRole};
