//! Assembly error definitions.
//!
//! This module defines the failure conditions of topology assembly. It provides:
//! 1. **Unit Errors:** Returned by the pure parsers in [`crate::common::units`].
//! 2. **Topology Errors:** Every condition raised while resolving parameters, wiring ports,
//!    building the cache hierarchy, binding workloads and validating the finished graph.
//!
//! All conditions are synchronous and non-retryable. Each one names the component path,
//! port or parameter that caused it; assembly stops at the first one.

use crate::component::PortRole;

/// Failure to parse a unit-carrying value such as `"16kB"` or `"1.25ns"`.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum UnitError {
    /// The value was empty or whitespace.
    #[error("empty value")]
    Empty,

    /// The value does not start with a number (`"kB"`).
    #[error("`{0}` does not start with a numeric magnitude")]
    MissingMagnitude(String),

    /// The numeric part could not be parsed (`"1.2.3kB"`, `"1.5kB"` for an integral unit).
    #[error("`{0}` has an invalid numeric magnitude")]
    InvalidMagnitude(String),

    /// The suffix is not a unit of the expected kind.
    #[error("unknown {expected} unit `{suffix}` in `{value}`")]
    UnknownSuffix {
        /// The full value that failed to parse.
        value: String,
        /// The unrecognised suffix.
        suffix: String,
        /// Human-readable kind of unit that was expected.
        expected: &'static str,
    },

    /// The canonical quantity does not fit in 64 bits.
    #[error("`{0}` does not fit in 64 bits")]
    Overflow(String),

    /// The value must be strictly positive (e.g. a clock frequency).
    #[error("`{0}` must be greater than zero")]
    NotPositive(String),
}

/// Assembly-time failure of a topology.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum TopologyError {
    /// A required parameter was neither overridden nor defaulted.
    #[error("{component}: required parameter `{param}` has no value")]
    MissingRequiredParameter {
        /// Path of the component being resolved.
        component: String,
        /// Name of the missing parameter.
        param: String,
    },

    /// A unit-carrying value failed to parse.
    #[error("{component}.{param}: malformed value `{value}`: {source}")]
    MalformedUnitValue {
        /// Path of the component being resolved.
        component: String,
        /// Name of the parameter.
        param: String,
        /// The offending text.
        value: String,
        /// Why it failed to parse.
        source: UnitError,
    },

    /// A value or reference is not assignable to the declared parameter type.
    #[error("{component}.{param}: expected {expected}, found {found}")]
    TypeMismatch {
        /// Path of the component being resolved or bound.
        component: String,
        /// Name of the parameter.
        param: String,
        /// The declared type.
        expected: String,
        /// What was supplied.
        found: String,
    },

    /// An override names a parameter the component type does not declare.
    #[error("{component}: type {type_name} has no parameter `{param}`")]
    UnknownParameter {
        /// Path of the component being resolved.
        component: String,
        /// Name of the unknown parameter.
        param: String,
        /// Component type that was searched.
        type_name: &'static str,
    },

    /// A component reference would make a component reach one of its ancestors or itself.
    #[error("{component}.{param}: referencing {target} would create a cycle")]
    ReferenceCycle {
        /// Path of the referring component.
        component: String,
        /// Name of the reference parameter.
        param: String,
        /// Path of the referenced component.
        target: String,
    },

    /// A port name is not declared by the component's type.
    #[error("{component}: no port named `{port}`")]
    UnknownPort {
        /// Path of the component.
        component: String,
        /// The requested port name.
        port: String,
    },

    /// A component id, path or type name does not exist.
    #[error("unknown component `{0}`")]
    UnknownComponent(String),

    /// A sibling with the same name already exists.
    #[error("component `{0}` already exists")]
    DuplicateComponent(String),

    /// Both ends of a direct connection have the same role.
    #[error("cannot connect {a} to {b}: both are {role} ports")]
    RoleConflict {
        /// First port.
        a: String,
        /// Second port.
        b: String,
        /// The shared role.
        role: PortRole,
    },

    /// A single (non-bus) port already has a peer.
    #[error("{port} is already connected to {peer}")]
    AlreadyConnected {
        /// The port that is already bound.
        port: String,
        /// Its current peer.
        peer: String,
    },

    /// Ports left unconnected at validation time.
    #[error("{} unconnected port(s): {}", .ports.len(), .ports.join(", "))]
    DanglingPort {
        /// Every unconnected port, as `component.port`.
        ports: Vec<String>,
    },

    /// The CPU exposes none of the ports a cache level attaches to.
    #[error("{cpu} ({type_name}) exposes no instruction-fetch or data port")]
    UnsupportedCpuPort {
        /// Path of the CPU.
        cpu: String,
        /// The CPU's component type.
        type_name: &'static str,
    },

    /// A connection would bypass the declared cache hierarchy.
    #[error("cannot connect {from} to {to}: {reason}")]
    HierarchyOrderViolation {
        /// Port on the side being attached.
        from: String,
        /// The attempted target.
        to: String,
        /// Which ordering rule was broken.
        reason: &'static str,
    },

    /// The CPU already runs a workload.
    #[error("{cpu} already has workload `{existing}` bound")]
    WorkloadBindingConflict {
        /// Path of the CPU.
        cpu: String,
        /// Path of the workload already bound.
        existing: String,
    },

    /// The workload loader could not produce a workload.
    #[error("workload `{path}` could not be loaded: {reason}")]
    WorkloadNotFound {
        /// Requested binary path.
        path: String,
        /// Loader-specific reason.
        reason: String,
    },

    /// A new system address range intersects an existing one.
    #[error("address range {new} overlaps {existing}")]
    OverlappingAddressRanges {
        /// The range already registered.
        existing: String,
        /// The rejected range.
        new: String,
    },

    /// The topology was validated and may no longer change.
    #[error("{0}: topology is frozen after validation")]
    Frozen(String),
}
