//! Declarative topology assembly for simulated computers.
//!
//! This crate builds a validated, static description of a machine and hands it to an external
//! execution engine. It provides the following:
//! 1. **Parameters:** Typed, unit-aware, defaultable parameter schemas per component type.
//! 2. **Components:** A catalog of CPUs, caches, crossbars, interrupt controllers and memory.
//! 3. **Wiring:** Role-checked port bindings, bus fan-in/fan-out and completeness validation.
//! 4. **Cache hierarchy:** The canonical private-L1 / shared-L2 policy.
//! 5. **Handoff:** Workload loading and the `Simulator` interface.

/// Units, address ranges, clock domains, constants and errors.
pub mod common;
/// Component types, ports, the built-in catalog and component instances.
pub mod component;
/// Configuration surface (defaults, JSON loading).
pub mod config;
/// Parameter schema, values and resolution.
pub mod params;
/// Workload loading and simulator handoff.
pub mod sim;
/// Topology root, wiring engine, cache hierarchy and system builder.
pub mod soc;

/// Root configuration type; use `Config::default()` or deserialize from JSON.
pub use crate::config::Config;
/// Assembly error taxonomy.
pub use crate::common::TopologyError;
/// The assembled machine; build one with `build_system` or by hand.
pub use crate::soc::{Topology, build_system};
