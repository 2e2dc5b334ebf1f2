/// Topology fixtures.
pub mod harness;

/// Mock collaborators.
pub mod mocks;
