//! CIDR address block representation.
//!
//! This file defines the immutable [`AddressBlock`] value type used throughout
//! the planner: an IPv4 network address plus a prefix length, parsed from and
//! rendered back to `a.b.c.d/nn` text.

use serde::de;
use serde::{Deserialize, Deserializer, Serialize};
use std::net::Ipv4Addr;
use std::str::FromStr;

/// Maximum prefix length for an IPv4 block (32 bits).
pub const MAX_PREFIX_LEN: u8 = 32;

/// Errors raised when CIDR text cannot be converted into an [`AddressBlock`]
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MalformedAddressBlock {
    #[error("invalid CIDR format '{0}', expected a.b.c.d/nn")]
    InvalidFormat(String),

    #[error("invalid IPv4 address: {0}")]
    InvalidAddress(String),

    #[error("invalid prefix length '{0}', expected 0-32")]
    InvalidPrefixLength(String),
}

/// An immutable IPv4 network prefix: base address plus prefix length.
///
/// The base address is always the network address for its prefix length
/// (host bits are masked off on construction), so two blocks compare by
/// the numeric value of their base address.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct AddressBlock {
    base: Ipv4Addr,
    prefix_len: u8,
}

impl AddressBlock {
    /// Create a block from an address and prefix length.
    ///
    /// Host bits below the prefix are cleared so the stored base is the
    /// network address.
    pub fn new(addr: Ipv4Addr, prefix_len: u8) -> Result<Self, MalformedAddressBlock> {
        if prefix_len > MAX_PREFIX_LEN {
            return Err(MalformedAddressBlock::InvalidPrefixLength(
                prefix_len.to_string(),
            ));
        }
        Ok(Self::from_network(addr, prefix_len))
    }

    /// Internal constructor for callers that have already validated the
    /// prefix length. Still masks host bits.
    pub(crate) fn from_network(addr: Ipv4Addr, prefix_len: u8) -> Self {
        debug_assert!(prefix_len <= MAX_PREFIX_LEN);
        let base = Ipv4Addr::from(u32::from(addr) & prefix_mask(prefix_len));
        AddressBlock { base, prefix_len }
    }

    /// The network address of this block.
    pub fn base(&self) -> Ipv4Addr {
        self.base
    }

    /// The prefix length of this block.
    pub fn prefix_len(&self) -> u8 {
        self.prefix_len
    }

    /// Number of addresses covered by this block.
    pub fn size(&self) -> u64 {
        1u64 << (MAX_PREFIX_LEN - self.prefix_len)
    }

    /// The last address inside this block.
    pub fn last_address(&self) -> Ipv4Addr {
        Ipv4Addr::from(u32::from(self.base) | !prefix_mask(self.prefix_len))
    }

    /// Returns true if `other`'s address range falls entirely within this block.
    pub fn contains(&self, other: &AddressBlock) -> bool {
        other.prefix_len >= self.prefix_len
            && (u32::from(other.base) & prefix_mask(self.prefix_len)) == u32::from(self.base)
    }
}

/// Subnet mask for a prefix length, as a u32.
fn prefix_mask(prefix_len: u8) -> u32 {
    debug_assert!(prefix_len <= MAX_PREFIX_LEN);
    if prefix_len == 0 {
        0
    } else {
        u32::MAX << (MAX_PREFIX_LEN - prefix_len)
    }
}

impl FromStr for AddressBlock {
    type Err = MalformedAddressBlock;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let (addr_part, prefix_part) = s
            .split_once('/')
            .ok_or_else(|| MalformedAddressBlock::InvalidFormat(s.to_string()))?;
        let addr = Ipv4Addr::from_str(addr_part)
            .map_err(|_| MalformedAddressBlock::InvalidAddress(addr_part.to_string()))?;
        let prefix_len = prefix_part
            .parse::<u8>()
            .map_err(|_| MalformedAddressBlock::InvalidPrefixLength(prefix_part.to_string()))?;
        AddressBlock::new(addr, prefix_len)
    }
}

impl std::fmt::Display for AddressBlock {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}/{}", self.base, self.prefix_len)
    }
}

impl Serialize for AddressBlock {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::ser::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for AddressBlock {
    fn deserialize<D>(deserializer: D) -> Result<AddressBlock, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        AddressBlock::from_str(&s).map_err(de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_and_display() {
        let block: AddressBlock = "10.0.0.0/16".parse().unwrap();
        assert_eq!(block.base(), Ipv4Addr::new(10, 0, 0, 0));
        assert_eq!(block.prefix_len(), 16);
        assert_eq!(block.to_string(), "10.0.0.0/16");
    }

    #[test]
    fn test_parse_masks_host_bits() {
        let block: AddressBlock = "192.168.1.42/24".parse().unwrap();
        assert_eq!(block.base(), Ipv4Addr::new(192, 168, 1, 0));
        assert_eq!(block.to_string(), "192.168.1.0/24");
    }

    #[test]
    fn test_parse_rejects_malformed_text() {
        assert!(matches!(
            "not-a-cidr".parse::<AddressBlock>(),
            Err(MalformedAddressBlock::InvalidFormat(_))
        ));
        assert!(matches!(
            "10.0.0.256/16".parse::<AddressBlock>(),
            Err(MalformedAddressBlock::InvalidAddress(_))
        ));
        assert!(matches!(
            "10.0.0.0/33".parse::<AddressBlock>(),
            Err(MalformedAddressBlock::InvalidPrefixLength(_))
        ));
        assert!(matches!(
            "10.0.0.0/abc".parse::<AddressBlock>(),
            Err(MalformedAddressBlock::InvalidPrefixLength(_))
        ));
    }

    #[test]
    fn test_ordering_by_base_address() {
        let a: AddressBlock = "10.0.0.0/18".parse().unwrap();
        let b: AddressBlock = "10.0.64.0/18".parse().unwrap();
        let c: AddressBlock = "10.0.128.0/18".parse().unwrap();
        assert!(a < b);
        assert!(b < c);
    }

    #[test]
    fn test_size_and_last_address() {
        let block: AddressBlock = "10.0.0.0/24".parse().unwrap();
        assert_eq!(block.size(), 256);
        assert_eq!(block.last_address(), Ipv4Addr::new(10, 0, 0, 255));

        let all: AddressBlock = "0.0.0.0/0".parse().unwrap();
        assert_eq!(all.size(), 1u64 << 32);
        assert_eq!(all.last_address(), Ipv4Addr::new(255, 255, 255, 255));
    }

    #[test]
    fn test_contains() {
        let outer: AddressBlock = "10.0.0.0/16".parse().unwrap();
        let inner: AddressBlock = "10.0.64.0/18".parse().unwrap();
        let other: AddressBlock = "10.1.0.0/18".parse().unwrap();
        assert!(outer.contains(&inner));
        assert!(!outer.contains(&other));
        assert!(!inner.contains(&outer));
        assert!(outer.contains(&outer));
    }

    #[test]
    fn test_serde_round_trip() {
        let block: AddressBlock = "10.0.128.0/18".parse().unwrap();
        let yaml = serde_yaml::to_string(&block).unwrap();
        assert_eq!(yaml.trim(), "10.0.128.0/18");
        let back: AddressBlock = serde_yaml::from_str(&yaml).unwrap();
        assert_eq!(back, block);
    }
}
