//! Ports: typed, directional attachment points on components.
//!
//! This module defines how components expose their connectivity. It provides:
//! 1. **Roles:** A port either issues requests or answers them; a binding always pairs one of each.
//! 2. **Declarations:** Static per-type port tables (`PortDecl`), single or vector.
//! 3. **References:** `PortRef` names one port of one component; `Endpoint` is either a port
//!    or a whole bus, in which case the bus picks the array matching the caller's role.

use std::fmt;

use super::ComponentId;

/// Direction of a port.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum PortRole {
    /// Issues requests toward memory (e.g. a CPU's fetch port, a cache's `mem_side`).
    Request,
    /// Answers requests (e.g. a cache's `cpu_side`, a memory controller's `port`).
    Response,
}

impl PortRole {
    /// Returns the role a peer must have to bind to this one.
    pub const fn complement(self) -> Self {
        match self {
            Self::Request => Self::Response,
            Self::Response => Self::Request,
        }
    }
}

impl fmt::Display for PortRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Request => f.write_str("request"),
            Self::Response => f.write_str("response"),
        }
    }
}

/// How many peers a port accepts.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PortArity {
    /// Exactly one peer.
    Single,
    /// Any number of peers; used by crossbars for fan-in and fan-out.
    Vector,
}

/// Static declaration of a port on a component type.
#[derive(Debug)]
pub struct PortDecl {
    /// Port name, unique within the type's lineage.
    pub name: &'static str,
    /// Direction.
    pub role: PortRole,
    /// Single or vector.
    pub arity: PortArity,
    /// One-line description.
    pub description: &'static str,
}

impl PortDecl {
    /// Declares a port that binds to exactly one peer.
    pub const fn single(name: &'static str, role: PortRole, description: &'static str) -> Self {
        Self {
            name,
            role,
            arity: PortArity::Single,
            description,
        }
    }

    /// Declares a port array that grows by one entry per connection.
    pub const fn vector(name: &'static str, role: PortRole, description: &'static str) -> Self {
        Self {
            name,
            role,
            arity: PortArity::Vector,
            description,
        }
    }

    /// Returns whether this is a bus-style vector port.
    pub const fn is_vector(&self) -> bool {
        matches!(self.arity, PortArity::Vector)
    }
}

/// One port of one component.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PortRef {
    /// Owning component.
    pub component: ComponentId,
    /// Declared port name.
    pub port: &'static str,
}

/// Target of a connection.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Endpoint {
    /// A specific port; roles are checked directly.
    Port(PortRef),
    /// A bus; the port is appended to the bus array with the complementary role.
    Bus(ComponentId),
}

impl From<PortRef> for Endpoint {
    fn from(port: PortRef) -> Self {
        Self::Port(port)
    }
}

/// Connection state of one declared port on a component instance.
#[derive(Clone, Debug)]
pub(crate) struct PortState {
    pub(crate) decl: &'static PortDecl,
    pub(crate) peers: Vec<PortRef>,
}

impl PortState {
    pub(crate) const fn new(decl: &'static PortDecl) -> Self {
        Self {
            decl,
            peers: Vec::new(),
        }
    }

    pub(crate) fn is_connected(&self) -> bool {
        !self.peers.is_empty()
    }
}
