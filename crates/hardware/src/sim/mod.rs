//! Collaborators on either side of assembly.
//!
//! Workloads come in through a `WorkloadLoader`; the finished topology goes out to a
//! `Simulator`.

/// Workload handles and loaders.
pub mod loader;

/// Simulator interface and handoff.
pub mod simulator;

pub use loader::{ElfLoader, Workload, WorkloadLoader};
pub use simulator::{DryRunSimulator, EngineError, ExitReason, LaunchError, Simulator, launch};
