//! # Unit Components
//!
//! This module organizes the tests of every layer of the assembler, leaf-first: unit
//! parsing, parameter resolution, wiring, cache hierarchy, and the simulator handoff.

/// Unit tests for units, address ranges and errors.
pub mod common;

/// Unit tests for the configuration surface.
pub mod config;

/// Unit tests for parameter resolution against component schemas.
pub mod params;
