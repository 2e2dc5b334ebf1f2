//! Physical address ranges.
//!
//! This module defines the contiguous interval type used for the system memory map and
//! for address-range parameters. It provides the following:
//! 1. **Construction:** From a size alone (base 0) or from an explicit base and size.
//! 2. **Parsing:** `"512MB"` or `"0x80000000:512MB"`.
//! 3. **Overlap Checks:** Used by the topology root to keep its ranges disjoint.

use std::fmt;
use std::str::FromStr;

use super::error::UnitError;
use super::units::{MemorySize, parse_count};

/// A contiguous `[start, start + size)` interval of the physical address space.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct AddrRange {
    start: u64,
    size: u64,
}

impl AddrRange {
    /// Creates a range from a base address and a size in bytes.
    ///
    /// # Arguments
    ///
    /// * `start` - First address of the range.
    /// * `size` - Number of bytes covered.
    ///
    /// # Returns
    ///
    /// The range, or `UnitError::Overflow` if `start + size` does not fit in 64 bits.
    pub fn new(start: u64, size: u64) -> Result<Self, UnitError> {
        if start.checked_add(size).is_none() {
            return Err(UnitError::Overflow(format!("{start:#x}+{size:#x}")));
        }
        Ok(Self { start, size })
    }

    /// Creates a range starting at address zero.
    pub const fn with_size(size: MemorySize) -> Self {
        Self {
            start: 0,
            size: size.bytes(),
        }
    }

    /// Returns the first address of the range.
    #[inline]
    pub const fn start(&self) -> u64 {
        self.start
    }

    /// Returns the number of bytes covered.
    #[inline]
    pub const fn size(&self) -> u64 {
        self.size
    }

    /// Returns the first address past the range.
    #[inline]
    pub const fn end(&self) -> u64 {
        self.start + self.size
    }

    /// Returns whether `addr` falls inside the range.
    pub const fn contains(&self, addr: u64) -> bool {
        addr >= self.start && addr < self.end()
    }

    /// Returns whether the two ranges share at least one address.
    ///
    /// Empty ranges never overlap anything.
    pub const fn overlaps(&self, other: &Self) -> bool {
        self.size != 0 && other.size != 0 && self.start < other.end() && other.start < self.end()
    }

    /// Parses `"<size>"` or `"<base>:<size>"`; the base may be decimal or `0x`-prefixed hex.
    pub fn parse(value: &str) -> Result<Self, UnitError> {
        let trimmed = value.trim();
        match trimmed.split_once(':') {
            Some((base, size)) => {
                let start = parse_count(base)?;
                Self::new(start, MemorySize::parse(size)?.bytes())
            }
            None => Ok(Self::with_size(MemorySize::parse(trimmed)?)),
        }
    }
}

impl fmt::Display for AddrRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:#x}:{}",
            self.start,
            MemorySize::from_bytes(self.size)
        )
    }
}

impl FromStr for AddrRange {
    type Err = UnitError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}
