//! IPv4 address block handling.
//!
//! This module owns the [`AddressBlock`] value type and the pure
//! partitioning algorithm that splits one block into equal-sized sub-blocks.

pub mod block;
pub mod partition;

// Re-export commonly used types
pub use block::{AddressBlock, MalformedAddressBlock, MAX_PREFIX_LEN};
pub use partition::{partition, PartitionError};
