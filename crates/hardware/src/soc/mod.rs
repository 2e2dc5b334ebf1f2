//! Topology assembly.
//!
//! This module organizes everything that turns components into a wired machine: the topology
//! root, the wiring engine, the cache hierarchy policy, interrupt controllers, and the builder
//! for the canonical single-CPU system.

/// Canonical system construction from a `Config`.
pub mod builder;

/// Cache levels and the hierarchy builder.
pub mod hierarchy;

/// Wiring engine and completeness validation.
pub mod interconnect;

/// Per-CPU interrupt controller creation and wiring.
pub mod interrupts;

/// The topology root and component arena.
pub mod topology;

pub use builder::build_system;
pub use hierarchy::{
    CacheHierarchyBuilder, CacheLevel, L1Caches, L1DCache, L1ICache, L2Cache, L2Stage,
};
pub use topology::Topology;
