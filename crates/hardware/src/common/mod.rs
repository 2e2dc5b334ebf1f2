//! Common utilities and types used throughout the topology assembler.
//!
//! This module provides the leaf building blocks shared by every other module. It includes:
//! 1. **Units:** Strong types for memory sizes, bandwidths, frequencies, voltages and latencies.
//! 2. **Clock Domain:** The explicit clock/voltage pair every latency is resolved against.
//! 3. **Address Ranges:** Contiguous `[base, base + size)` intervals of the physical address space.
//! 4. **Constants:** Tick resolution and canonical component paths.
//! 5. **Error Handling:** The assembly-time error taxonomy.

/// Address range type (`AddrRange`).
pub mod addr;

/// Clock and voltage domain.
pub mod clock;

/// Common constants used throughout the assembler.
pub mod constants;

/// Error types for unit parsing and topology assembly.
pub mod error;

/// Unit-carrying scalar types and their parsers.
pub mod units;

pub use addr::AddrRange;
pub use clock::ClockDomain;
pub use constants::TICKS_PER_SECOND;
pub use error::{TopologyError, UnitError};
pub use units::{Frequency, Latency, MemoryBandwidth, MemorySize, Voltage};
