//! Address space partitioning.
//!
//! This file contains the core partitioning algorithm: splitting one CIDR
//! block into an ordered set of equal-sized sub-blocks by extending the
//! prefix length a fixed number of bits.

use std::collections::BTreeSet;
use std::net::Ipv4Addr;

use super::block::{AddressBlock, MAX_PREFIX_LEN};

/// Errors raised by [`partition`]
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PartitionError {
    #[error("invalid partition request: /{prefix_len} extended by {bit_extension} bits exceeds /32")]
    InvalidPartitionRequest { prefix_len: u8, bit_extension: u8 },
}

/// Split `source` into `2^bit_extension` sub-blocks of prefix length
/// `source.prefix_len() + bit_extension`.
///
/// The result tiles `source` exactly (no gaps, no overlaps) and is sorted
/// strictly ascending by base address. Downstream role and zone assignment
/// relies on that ordering being stable across runs, so it is part of the
/// contract, not an implementation detail.
///
/// A `bit_extension` of 0 returns the source block itself.
pub fn partition(
    source: AddressBlock,
    bit_extension: u8,
) -> Result<Vec<AddressBlock>, PartitionError> {
    let new_prefix_len = source
        .prefix_len()
        .checked_add(bit_extension)
        .filter(|len| *len <= MAX_PREFIX_LEN)
        .ok_or(PartitionError::InvalidPartitionRequest {
            prefix_len: source.prefix_len(),
            bit_extension,
        })?;

    let block_size = 1u64 << (MAX_PREFIX_LEN - new_prefix_len);
    let base = u64::from(u32::from(source.base()));

    // Collect through an ordered set so duplicate blocks can never slip
    // through, whatever the surrounding arithmetic does. The exact tiling
    // makes duplicates impossible in theory, but the set semantics are part
    // of the contract and cheap to keep.
    let mut blocks = BTreeSet::new();
    for i in 0..(1u64 << bit_extension) {
        let addr = Ipv4Addr::from((base + i * block_size) as u32);
        blocks.insert(AddressBlock::from_network(addr, new_prefix_len));
    }

    Ok(blocks.into_iter().collect())
}
