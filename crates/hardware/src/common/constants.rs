//! Global Assembly Constants.
//!
//! This module defines system-wide constants used across the assembler. It includes:
//! 1. **Time Constants:** The tick resolution all latencies are expressed in.
//! 2. **Naming Constants:** Canonical paths and port names of the fixed system skeleton.

/// Number of simulated ticks per second (one tick = one picosecond).
pub const TICKS_PER_SECOND: u64 = 1_000_000_000_000;

/// Path of the root `System` component every topology owns.
pub const SYSTEM_PATH: &str = "system";

/// Separator between path segments (`system.cpu.icache`).
pub const PATH_SEPARATOR: char = '.';

/// Request-role port on the `System` component used for functional accesses.
pub const SYSTEM_PORT: &str = "system_port";

/// CPU port carrying instruction fetches.
pub const ICACHE_PORT: &str = "icache_port";

/// CPU port carrying data accesses.
pub const DCACHE_PORT: &str = "dcache_port";

/// CPU-facing (response-role) port of every cache.
pub const CACHE_CPU_SIDE: &str = "cpu_side";

/// Memory-facing (request-role) port of every cache.
pub const CACHE_MEM_SIDE: &str = "mem_side";

/// Response-role vector port of every crossbar (its clients are requestors).
pub const BUS_CPU_SIDE_PORTS: &str = "cpu_side_ports";

/// Request-role vector port of every crossbar (its clients are responders).
pub const BUS_MEM_SIDE_PORTS: &str = "mem_side_ports";

/// Upper bound on hardware thread contexts a single CPU may declare.
pub const MAX_THREADS_PER_CPU: u64 = 64;
