//! Wiring engine: port-to-port and port-to-bus bindings.
//!
//! This module records the connection graph of a topology. It provides:
//! 1. **Connect:** Role-checked, bidirectional bindings; single ports take one peer, bus
//!    vector ports grow by one entry per binding.
//! 2. **Bus mediation:** Connecting to a whole bus appends the port to the array with the
//!    complementary role.
//! 3. **Hierarchy policy:** Once a CPU has L1 caches, its ports may only bind to them, and no
//!    CPU port ever binds straight to an L2.
//! 4. **Validation:** `validate_complete` rejects dangling ports and incomplete CPUs, then
//!    freezes the topology.

use super::topology::Topology;
use crate::common::TopologyError;
use crate::component::catalog::{L1_CACHE, L2_CACHE};
use crate::component::{Endpoint, PortRef};

impl Topology {
    /// Establishes a bidirectional binding between `a` and `b`.
    ///
    /// # Arguments
    ///
    /// * `a` - The port being attached.
    /// * `b` - A specific port, or a whole bus (`Endpoint::Bus`).
    ///
    /// # Returns
    ///
    /// Checks run in order: `RoleConflict` if both ends share a role,
    /// `HierarchyOrderViolation` if the binding would bypass a CPU's caches,
    /// `AlreadyConnected` if a single port already has a peer or the pair is already bound.
    pub fn connect(&mut self, a: PortRef, b: impl Into<Endpoint>) -> Result<(), TopologyError> {
        self.ensure_mutable(&self.port_path(a))?;
        self.ensure_port(a)?;
        let b = self.endpoint_port(a, b.into())?;
        self.check_roles(a, b)?;
        self.check_hierarchy(a, b)?;
        self.bind(a, b)
    }

    /// Replaces whatever `a` is bound to with `b`.
    ///
    /// The previous peers of `a` are unbound first and restored if the new binding fails.
    pub fn reconnect(&mut self, a: PortRef, b: impl Into<Endpoint>) -> Result<(), TopologyError> {
        let previous = self.disconnect(a)?;
        match self.connect(a, b) {
            Ok(()) => Ok(()),
            Err(err) => {
                for peer in previous {
                    self.link(a, peer);
                }
                Err(err)
            }
        }
    }

    /// Removes every binding of `a` and returns its former peers.
    pub fn disconnect(&mut self, a: PortRef) -> Result<Vec<PortRef>, TopologyError> {
        let path = self.port_path(a);
        self.ensure_mutable(&path)?;
        self.ensure_port(a)?;

        let previous = self.components[a.component.index()]
            .port_state_mut(a.port)
            .map(|state| std::mem::take(&mut state.peers))
            .unwrap_or_default();
        for peer in &previous {
            if let Some(state) = self.components[peer.component.index()].port_state_mut(peer.port) {
                state.peers.retain(|p| *p != a);
            }
        }
        if !previous.is_empty() {
            tracing::debug!(port = %path, peers = previous.len(), "port disconnected");
        }
        Ok(previous)
    }

    /// Returns every binding once, as ordered `(a, b)` pairs with `a < b`.
    pub fn connections(&self) -> Vec<(PortRef, PortRef)> {
        let mut pairs = Vec::new();
        for component in &self.components {
            for (decl, peers) in component.ports() {
                let here = PortRef {
                    component: component.id(),
                    port: decl.name,
                };
                pairs.extend(peers.iter().filter(|peer| here < **peer).map(|peer| (here, *peer)));
            }
        }
        pairs
    }

    /// Checks that the topology is complete and freezes it.
    ///
    /// Every declared port of every reachable component must have a peer; the system must
    /// own at least one address range; every CPU must have a workload, an interrupt controller
    /// and a memory mode matching the system's.
    ///
    /// # Returns
    ///
    /// `DanglingPort` listing every unconnected port, or the first incomplete CPU.
    pub fn validate_complete(&mut self) -> Result<(), TopologyError> {
        if self.validated {
            return Ok(());
        }

        let reachable = self.reachable();
        let dangling: Vec<String> = reachable
            .iter()
            .flat_map(|id| {
                let component = &self.components[id.index()];
                component
                    .ports
                    .iter()
                    .filter(|state| !state.is_connected())
                    .map(move |state| format!("{}.{}", component.path, state.decl.name))
            })
            .collect();
        if !dangling.is_empty() {
            return Err(TopologyError::DanglingPort { ports: dangling });
        }

        if self.mem_ranges().is_empty() {
            return Err(TopologyError::MissingRequiredParameter {
                component: self.path_of(self.system()),
                param: "mem_ranges".to_string(),
            });
        }

        for id in &reachable {
            let component = &self.components[id.index()];
            let Some(traits) = component.ty.cpu_traits() else {
                continue;
            };
            if component.workload.is_none() {
                return Err(TopologyError::MissingRequiredParameter {
                    component: component.path.clone(),
                    param: "workload".to_string(),
                });
            }
            if component.params.component("interrupts").is_none() {
                return Err(TopologyError::MissingRequiredParameter {
                    component: component.path.clone(),
                    param: "interrupts".to_string(),
                });
            }
            if traits.mem_mode != self.mem_mode() {
                return Err(TopologyError::TypeMismatch {
                    component: self.path_of(self.system()),
                    param: "mem_mode".to_string(),
                    expected: format!("{} (required by {})", traits.mem_mode, component.ty.name),
                    found: self.mem_mode().to_string(),
                });
            }
        }

        self.validated = true;
        tracing::info!(
            components = reachable.len(),
            connections = self.connections().len(),
            "topology validated"
        );
        Ok(())
    }

    /// Turns an endpoint into a concrete port, choosing the bus array for bus endpoints.
    fn endpoint_port(&self, a: PortRef, endpoint: Endpoint) -> Result<PortRef, TopologyError> {
        match endpoint {
            Endpoint::Port(port) => self.ensure_port(port).map(|()| port),
            Endpoint::Bus(bus) => {
                let role = self.port_decl(a.component, a.port)?.role.complement();
                let component = self.component(bus)?;
                if !component.ty.is_bus() {
                    return Err(TopologyError::TypeMismatch {
                        component: component.path.clone(),
                        param: "bus".to_string(),
                        expected: "Bus".to_string(),
                        found: component.ty.name.to_string(),
                    });
                }
                component
                    .ports()
                    .find(|(decl, _)| decl.is_vector() && decl.role == role)
                    .map(|(decl, _)| PortRef {
                        component: bus,
                        port: decl.name,
                    })
                    .ok_or_else(|| TopologyError::UnknownPort {
                        component: component.path.clone(),
                        port: format!("<{role} array>"),
                    })
            }
        }
    }

    fn ensure_port(&self, port: PortRef) -> Result<(), TopologyError> {
        self.port_decl(port.component, port.port).map(|_| ())
    }

    /// Rejects a direct binding between two ports of the same role.
    fn check_roles(&self, a: PortRef, b: PortRef) -> Result<(), TopologyError> {
        let role = self.port_decl(a.component, a.port)?.role;
        if role == self.port_decl(b.component, b.port)?.role {
            return Err(TopologyError::RoleConflict {
                a: self.port_path(a),
                b: self.port_path(b),
                role,
            });
        }
        Ok(())
    }

    /// Enforces the cache hierarchy order for bindings that touch a CPU port.
    fn check_hierarchy(&self, a: PortRef, b: PortRef) -> Result<(), TopologyError> {
        for (cpu_side, other) in [(a, b), (b, a)] {
            let cpu = &self.components[cpu_side.component.index()];
            if cpu.ty.cpu_traits().is_none() {
                continue;
            }
            let target = self.components[other.component.index()].ty;
            let reason = if target.is_a(&L2_CACHE) {
                Some("CPU ports may not bypass the L1 caches")
            } else if self.cached_cpus.contains(&cpu_side.component) && !target.is_a(&L1_CACHE) {
                Some("CPU has L1 caches attached; its ports may only bind to them")
            } else {
                None
            };
            if let Some(reason) = reason {
                return Err(TopologyError::HierarchyOrderViolation {
                    from: self.port_path(cpu_side),
                    to: self.port_path(other),
                    reason,
                });
            }
        }
        Ok(())
    }

    fn bind(&mut self, a: PortRef, b: PortRef) -> Result<(), TopologyError> {
        let decl_a = self.port_decl(a.component, a.port)?;
        let decl_b = self.port_decl(b.component, b.port)?;

        for (port, decl) in [(a, decl_a), (b, decl_b)] {
            let peers = self.components[port.component.index()]
                .peers(port.port)
                .unwrap_or_default();
            let occupied = if decl.is_vector() {
                let other = if port == a { b } else { a };
                peers.iter().find(|peer| **peer == other)
            } else {
                peers.first()
            };
            if let Some(peer) = occupied {
                return Err(TopologyError::AlreadyConnected {
                    port: self.port_path(port),
                    peer: self.port_path(*peer),
                });
            }
        }

        self.link(a, b);
        tracing::debug!(a = %self.port_path(a), b = %self.port_path(b), "ports connected");
        Ok(())
    }

    fn link(&mut self, a: PortRef, b: PortRef) {
        if let Some(state) = self.components[a.component.index()].port_state_mut(a.port) {
            state.peers.push(b);
        }
        if let Some(state) = self.components[b.component.index()].port_state_mut(b.port) {
            state.peers.push(a);
        }
    }
}
