//! Component instances and their static descriptions.
//!
//! This module defines the nodes of a topology. It provides:
//! 1. **Types:** `ComponentType` schemas with single-inheritance and a capability class.
//! 2. **Ports:** Directional, single or vector attachment points.
//! 3. **Catalog:** The built-in component types (CPUs, caches, crossbars, memory).
//! 4. **Instances:** `Component`, a named node with resolved parameters and live ports.

/// Built-in component types.
pub mod catalog;

/// Port declarations, references and connection state.
pub mod port;

/// Component type descriptors and capability classes.
pub mod types;

use std::fmt;

use serde::Serialize;

pub use port::{Endpoint, PortArity, PortDecl, PortRef, PortRole};
pub use types::{ComponentClass, ComponentType, CpuTraits, Isa, MemMode};

use crate::params::{Overrides, ResolvedParams};
use crate::sim::loader::Workload;
use port::PortState;

/// Stable handle of a component inside one topology.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct ComponentId(pub(crate) usize);

impl ComponentId {
    /// Returns the arena index of the component.
    pub const fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for ComponentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// One hardware thread of a CPU, created when a workload is bound.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct ThreadContext {
    /// Index of the thread within its CPU.
    pub thread_id: u64,
    /// CPU that owns the thread.
    pub cpu: ComponentId,
}

/// A node of the topology.
#[derive(Clone, Debug)]
pub struct Component {
    pub(crate) id: ComponentId,
    pub(crate) name: String,
    pub(crate) path: String,
    pub(crate) ty: &'static ComponentType,
    pub(crate) params: ResolvedParams,
    pub(crate) overrides: Overrides,
    pub(crate) ports: Vec<PortState>,
    pub(crate) parent: Option<ComponentId>,
    pub(crate) children: Vec<ComponentId>,
    pub(crate) workload: Option<Workload>,
    pub(crate) thread_contexts: Vec<ThreadContext>,
}

impl Component {
    pub(crate) fn new(
        id: ComponentId,
        name: String,
        path: String,
        ty: &'static ComponentType,
        params: ResolvedParams,
        overrides: Overrides,
        parent: Option<ComponentId>,
    ) -> Self {
        let ports = ty.port_decls().into_iter().map(PortState::new).collect();
        Self {
            id,
            name,
            path,
            ty,
            params,
            overrides,
            ports,
            parent,
            children: Vec::new(),
            workload: None,
            thread_contexts: Vec::new(),
        }
    }

    /// Returns the handle of this component.
    #[inline]
    pub const fn id(&self) -> ComponentId {
        self.id
    }

    /// Returns the short name (`"l2cache"`).
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the dotted path from the root (`"system.l2cache"`).
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Returns the component type.
    #[inline]
    pub const fn component_type(&self) -> &'static ComponentType {
        self.ty
    }

    /// Returns the resolved parameters.
    pub const fn params(&self) -> &ResolvedParams {
        &self.params
    }

    /// Returns the overrides the component was created with.
    pub const fn overrides(&self) -> &Overrides {
        &self.overrides
    }

    /// Returns the parent component, `None` for the system root.
    pub const fn parent(&self) -> Option<ComponentId> {
        self.parent
    }

    /// Returns the child components in creation order.
    pub fn children(&self) -> &[ComponentId] {
        &self.children
    }

    /// Returns the bound workload, if any.
    pub const fn workload(&self) -> Option<&Workload> {
        self.workload.as_ref()
    }

    /// Returns the thread contexts created by workload binding.
    pub fn thread_contexts(&self) -> &[ThreadContext] {
        &self.thread_contexts
    }

    /// Iterates the declared ports with their current peers.
    pub fn ports(&self) -> impl Iterator<Item = (&'static PortDecl, &[PortRef])> + '_ {
        self.ports.iter().map(|state| (state.decl, state.peers.as_slice()))
    }

    /// Returns whether the type declares `port`.
    pub fn has_port(&self, port: &str) -> bool {
        self.ports.iter().any(|state| state.decl.name == port)
    }

    /// Returns the peers of `port`, or `None` if the port is not declared.
    pub fn peers(&self, port: &str) -> Option<&[PortRef]> {
        self.port_state(port).map(|state| state.peers.as_slice())
    }

    /// Returns whether `port` has at least one peer.
    pub fn is_connected(&self, port: &str) -> bool {
        self.port_state(port).is_some_and(PortState::is_connected)
    }

    pub(crate) fn port_state(&self, port: &str) -> Option<&PortState> {
        self.ports.iter().find(|state| state.decl.name == port)
    }

    pub(crate) fn port_state_mut(&mut self, port: &str) -> Option<&mut PortState> {
        self.ports.iter_mut().find(|state| state.decl.name == port)
    }
}
