//! Simulator handoff.
//!
//! The execution engine is external; this module defines the interface the assembled
//! topology is handed to and the single entry point that performs the handoff.

use std::fmt;

use crate::common::TopologyError;
use crate::soc::Topology;

/// Failure reported by an execution engine.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum EngineError {
    /// The engine rejected the topology while instantiating it.
    #[error("instantiation failed: {0}")]
    Instantiate(String),

    /// The engine failed while running.
    #[error("simulation failed: {0}")]
    Run(String),
}

/// Failure of [`launch`]: either assembly was incomplete or the engine failed.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum LaunchError {
    /// The topology did not validate; the engine was never called.
    #[error(transparent)]
    Topology(#[from] TopologyError),

    /// The engine failed after the handoff.
    #[error(transparent)]
    Engine(#[from] EngineError),
}

/// Why and when a simulation stopped.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExitReason {
    /// Engine-defined cause (`"exiting with last active thread context"`).
    pub cause: String,
    /// Simulated tick at which the run stopped.
    pub tick: u64,
}

impl fmt::Display for ExitReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} @ {} ticks", self.cause, self.tick)
    }
}

/// An execution engine that consumes a validated topology.
pub trait Simulator {
    /// Engine-side representation of an instantiated topology.
    type Handle;

    /// Builds the engine's objects from the (read-only) topology.
    fn instantiate(&mut self, topology: &Topology) -> Result<Self::Handle, EngineError>;

    /// Runs the instantiated system until it exits.
    fn run(&mut self, handle: Self::Handle) -> Result<ExitReason, EngineError>;
}

/// Validates `topology` and hands it to `simulator`.
///
/// Nothing reaches the engine unless validation succeeds.
///
/// # Arguments
///
/// * `topology` - The assembled topology; it is frozen by validation.
/// * `simulator` - The engine to instantiate and run.
///
/// # Returns
///
/// The engine's exit reason.
pub fn launch<S: Simulator>(
    topology: &mut Topology,
    simulator: &mut S,
) -> Result<ExitReason, LaunchError> {
    topology.validate_complete()?;
    tracing::info!("handing topology to the simulator");
    let handle = simulator.instantiate(topology)?;
    let exit = simulator.run(handle)?;
    tracing::info!(cause = %exit.cause, tick = exit.tick, "simulation exited");
    Ok(exit)
}

/// Engine stand-in that accepts any validated topology without simulating it.
#[derive(Clone, Copy, Debug, Default)]
pub struct DryRunSimulator;

impl Simulator for DryRunSimulator {
    type Handle = usize;

    fn instantiate(&mut self, topology: &Topology) -> Result<usize, EngineError> {
        if !topology.is_validated() {
            return Err(EngineError::Instantiate(
                "topology has not been validated".to_string(),
            ));
        }
        Ok(topology.components().count())
    }

    fn run(&mut self, handle: usize) -> Result<ExitReason, EngineError> {
        tracing::debug!(components = handle, "dry run");
        Ok(ExitReason {
            cause: "dry run: topology accepted".to_string(),
            tick: 0,
        })
    }
}
