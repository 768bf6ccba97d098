//! Topology allocation logic.
//!
//! This file turns one source address block and a region profile into a
//! finished subnet plan: which CIDR goes to which availability zone in
//! which role. Pure computation; nothing here talks to a cloud API.

use log::{debug, info};

use crate::net::{partition, AddressBlock, PartitionError, MAX_PREFIX_LEN};

use super::regions::{RegionMap, RegionProfile};
use super::types::{SubnetPlanEntry, SubnetRole};

/// Errors raised while allocating a topology plan
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AllocationError {
    #[error(
        "insufficient address space: {source_block} cannot be split into {required} subnets \
         (would need prefix /{needed_prefix})"
    )]
    InsufficientAddressSpace {
        source_block: AddressBlock,
        required: u32,
        needed_prefix: u32,
    },

    #[error(transparent)]
    Partition(#[from] PartitionError),
}

/// Plans subnet layouts for a region.
///
/// Holds the region-to-zone-count table so callers can swap in their own
/// mapping; [`TopologyAllocator::default`] uses the built-in one.
#[derive(Debug, Clone, Default)]
pub struct TopologyAllocator {
    regions: RegionMap,
}

impl TopologyAllocator {
    pub fn new(regions: RegionMap) -> Self {
        TopologyAllocator { regions }
    }

    /// Produce the subnet plan for `source` in `region`.
    ///
    /// Resolves the region's profile, splits `source` once, and assigns the
    /// first blocks to the public role and the following blocks to the
    /// private role, cycling each role's zone index independently. Output
    /// order is stable: public entries ascending by CIDR, then private.
    pub fn plan(
        &self,
        source: AddressBlock,
        region: &str,
    ) -> Result<Vec<SubnetPlanEntry>, AllocationError> {
        let profile = self.regions.profile(region);
        info!(
            "Planning topology for region {} ({} zones, {} public + {} private subnets)",
            region, profile.zone_count, profile.public_subnet_count, profile.private_subnet_count
        );
        plan_with_profile(source, &profile)
    }
}

/// Produce the subnet plan for `source` under an explicit profile.
pub fn plan_with_profile(
    source: AddressBlock,
    profile: &RegionProfile,
) -> Result<Vec<SubnetPlanEntry>, AllocationError> {
    let total = profile.total_subnet_count();
    if total == 0 {
        return Ok(Vec::new());
    }

    // The extension has to cover the combined public + private count, not
    // just the zone count: with one subnet per role per zone the two differ
    // by a factor of two, and splitting for zones alone under-provisions.
    let bit_extension = bit_extension_for(total);
    let needed_prefix = u32::from(source.prefix_len()) + bit_extension;
    if needed_prefix > u32::from(MAX_PREFIX_LEN) {
        return Err(AllocationError::InsufficientAddressSpace {
            source_block: source,
            required: total,
            needed_prefix,
        });
    }

    let blocks = partition(source, bit_extension as u8)?;
    if (blocks.len() as u32) < total {
        return Err(AllocationError::InsufficientAddressSpace {
            source_block: source,
            required: total,
            needed_prefix,
        });
    }
    debug!(
        "Partitioned {} into {} blocks of /{} ({} will be used)",
        source,
        blocks.len(),
        source.prefix_len() + bit_extension as u8,
        total
    );

    let public = profile.public_subnet_count as usize;
    let private = profile.private_subnet_count as usize;

    let mut entries = Vec::with_capacity(total as usize);
    for (i, block) in blocks.iter().take(public).enumerate() {
        entries.push(SubnetPlanEntry {
            index: i as u32,
            cidr: *block,
            zone_index: i as u32 % profile.zone_count,
            role: SubnetRole::Public,
        });
    }
    for (i, block) in blocks.iter().skip(public).take(private).enumerate() {
        entries.push(SubnetPlanEntry {
            index: i as u32,
            cidr: *block,
            zone_index: i as u32 % profile.zone_count,
            role: SubnetRole::Private,
        });
    }

    Ok(entries)
}

/// Smallest number of extension bits whose block count covers `count`
/// subnets, i.e. `ceil(log2(count))`.
fn bit_extension_for(count: u32) -> u32 {
    count.max(1).next_power_of_two().trailing_zeros()
}
