//! Region to availability-zone mapping.
//!
//! This file maps region identifiers to the number of availability zones
//! the planner spreads subnets across, and derives the per-role subnet
//! counts from that zone count.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Cap on subnets created per role, guarding against pathological region
/// configurations.
pub const MAX_SUBNETS_PER_ROLE: u32 = 10;

/// Zone count used for any region without an explicit entry in the map.
pub const DEFAULT_ZONE_COUNT: u32 = 3;

/// Zone count and per-role subnet counts for one region.
///
/// Immutable for a run; derived from the region name via [`RegionMap`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegionProfile {
    pub zone_count: u32,
    pub public_subnet_count: u32,
    pub private_subnet_count: u32,
}

impl RegionProfile {
    /// Build a profile for a region with the given zone count, one public
    /// and one private subnet per zone, each capped at
    /// [`MAX_SUBNETS_PER_ROLE`].
    pub fn for_zone_count(zone_count: u32) -> Self {
        let per_role = zone_count.min(MAX_SUBNETS_PER_ROLE);
        RegionProfile {
            zone_count,
            public_subnet_count: per_role,
            private_subnet_count: per_role,
        }
    }

    /// Total subnets this profile asks for across both roles.
    pub fn total_subnet_count(&self) -> u32 {
        self.public_subnet_count + self.private_subnet_count
    }
}

/// Mapping from region identifier to zone count.
///
/// Regions without an entry fall back to `default_zone_count`, so an
/// unrecognized region never fails the run outright.
#[derive(Debug, Clone)]
pub struct RegionMap {
    zone_counts: HashMap<String, u32>,
    default_zone_count: u32,
}

impl Default for RegionMap {
    /// The built-in table: `us-west-1` has two zones, every other region
    /// defaults to three.
    fn default() -> Self {
        RegionMap::new(DEFAULT_ZONE_COUNT).with_zone_count("us-west-1", 2)
    }
}

impl RegionMap {
    /// Create an empty map with the given fallback zone count.
    pub fn new(default_zone_count: u32) -> Self {
        RegionMap {
            zone_counts: HashMap::new(),
            default_zone_count,
        }
    }

    /// Add or override the zone count for one region.
    pub fn with_zone_count(mut self, region: &str, zone_count: u32) -> Self {
        self.zone_counts.insert(region.to_string(), zone_count);
        self
    }

    /// Resolve the zone count for a region.
    pub fn zone_count(&self, region: &str) -> u32 {
        *self
            .zone_counts
            .get(region)
            .unwrap_or(&self.default_zone_count)
    }

    /// Resolve the full profile for a region.
    pub fn profile(&self, region: &str) -> RegionProfile {
        RegionProfile::for_zone_count(self.zone_count(region))
    }
}
