//! Topology root: the aggregate holding the whole component graph.
//!
//! This module owns every component of one simulated machine. It provides:
//! 1. **Component arena:** Components are stored by `ComponentId` and addressed by dotted path
//!    (`system.cpu.interrupts`); parameters are resolved at creation time.
//! 2. **System state:** The clock domain, memory mode and the disjoint system address ranges.
//! 3. **Composition:** `ComponentReference` parameters are checked for type and for cycles.
//! 4. **Workload binding:** Associates a loaded workload with a CPU and creates its threads.
//! 5. **Description:** A JSON view of the assembled graph for inspection and dumps.

use std::collections::BTreeSet;

use serde_json::{Map, Value, json};

use crate::common::constants::{MAX_THREADS_PER_CPU, PATH_SEPARATOR, SYSTEM_PATH};
use crate::common::{AddrRange, ClockDomain, TopologyError};
use crate::component::catalog::SYSTEM;
use crate::component::{
    Component, ComponentId, ComponentType, MemMode, PortDecl, PortRef, ThreadContext,
};
use crate::params::{Overrides, ParamInput, ResolveContext, ResolvedParams, TypeLookup};
use crate::sim::loader::Workload;

/// The assembled machine description handed to a simulator.
///
/// The root `System` component always exists with id `#0` and path `system`; every other
/// component is created beneath it. Once [`Topology::validate_complete`] succeeds the
/// topology is frozen and every mutating operation fails with `TopologyError::Frozen`.
#[derive(Clone, Debug)]
pub struct Topology {
    clock: ClockDomain,
    mem_mode: MemMode,
    mem_ranges: Vec<AddrRange>,
    pub(super) components: Vec<Component>,
    system: ComponentId,
    /// CPUs with L1 caches attached; their ports may only bind to those caches.
    pub(super) cached_cpus: BTreeSet<ComponentId>,
    pub(super) validated: bool,
}

impl Topology {
    /// Creates a topology containing only the `System` root.
    ///
    /// # Arguments
    ///
    /// * `clock` - Clock domain every latency parameter is resolved against.
    ///
    /// # Returns
    ///
    /// The new topology, or an error if the `System` defaults fail to resolve.
    pub fn new(clock: ClockDomain) -> Result<Self, TopologyError> {
        let no_components = |_: ComponentId| -> Option<&'static ComponentType> { None };
        let params = ResolveContext {
            component: SYSTEM_PATH,
            clock: &clock,
            types: &no_components,
        }
        .resolve(&SYSTEM, &Overrides::new())?;

        let system = ComponentId(0);
        let root = Component::new(
            system,
            SYSTEM_PATH.to_string(),
            SYSTEM_PATH.to_string(),
            &SYSTEM,
            params,
            Overrides::new(),
            None,
        );

        Ok(Self {
            clock,
            mem_mode: MemMode::default(),
            mem_ranges: Vec::new(),
            components: vec![root],
            system,
            cached_cpus: BTreeSet::new(),
            validated: false,
        })
    }

    /// Returns the clock domain.
    pub const fn clock(&self) -> &ClockDomain {
        &self.clock
    }

    /// Returns the system memory mode.
    pub const fn mem_mode(&self) -> MemMode {
        self.mem_mode
    }

    /// Sets the system memory mode.
    pub fn set_mem_mode(&mut self, mode: MemMode) -> Result<(), TopologyError> {
        self.ensure_mutable("mem_mode")?;
        self.mem_mode = mode;
        Ok(())
    }

    /// Returns the system address ranges in insertion order.
    pub fn mem_ranges(&self) -> &[AddrRange] {
        &self.mem_ranges
    }

    /// Adds a system address range.
    ///
    /// # Arguments
    ///
    /// * `range` - The new range; it must not overlap any existing one.
    pub fn add_mem_range(&mut self, range: AddrRange) -> Result<(), TopologyError> {
        self.ensure_mutable("mem_ranges")?;
        if let Some(existing) = self.mem_ranges.iter().find(|r| r.overlaps(&range)) {
            return Err(TopologyError::OverlappingAddressRanges {
                existing: existing.to_string(),
                new: range.to_string(),
            });
        }
        self.mem_ranges.push(range);
        Ok(())
    }

    /// Returns the id of the `System` root.
    pub const fn system(&self) -> ComponentId {
        self.system
    }

    /// Returns whether `validate_complete` has succeeded.
    pub const fn is_validated(&self) -> bool {
        self.validated
    }

    /// Creates a component directly beneath the system root.
    pub fn add_component(
        &mut self,
        name: &str,
        ty: &'static ComponentType,
        overrides: Overrides,
    ) -> Result<ComponentId, TopologyError> {
        self.add_child(self.system, name, ty, overrides)
    }

    /// Creates a component beneath `parent` and resolves its parameters.
    ///
    /// # Arguments
    ///
    /// * `parent` - Owning component; the new path is `<parent path>.<name>`.
    /// * `name` - Short name, unique among the parent's children.
    /// * `ty` - Component type.
    /// * `overrides` - Parameter overrides applied over the type's defaults.
    ///
    /// # Returns
    ///
    /// The id of the new component. Fails if the path is taken, if resolution fails, or if a
    /// reference parameter points at the new component's own ancestry.
    pub fn add_child(
        &mut self,
        parent: ComponentId,
        name: &str,
        ty: &'static ComponentType,
        overrides: Overrides,
    ) -> Result<ComponentId, TopologyError> {
        self.ensure_mutable(name)?;
        let parent_path = self.component(parent)?.path.clone();
        if name.is_empty() || name.contains(PATH_SEPARATOR) {
            return Err(TopologyError::UnknownComponent(format!(
                "{parent_path}{PATH_SEPARATOR}{name}"
            )));
        }
        let path = format!("{parent_path}{PATH_SEPARATOR}{name}");
        if self.find(&path).is_some() {
            return Err(TopologyError::DuplicateComponent(path));
        }

        let params = self.resolve(&path, ty, &overrides)?;
        for (param, target) in params.references() {
            if self.reaches(target, parent) {
                return Err(TopologyError::ReferenceCycle {
                    component: path,
                    param: param.to_string(),
                    target: self.path_of(target),
                });
            }
        }

        let id = ComponentId(self.components.len());
        tracing::debug!(component = %path, ty = ty.name, "component created");
        self.components.push(Component::new(
            id,
            name.to_string(),
            path,
            ty,
            params,
            overrides,
            Some(parent),
        ));
        self.components[parent.index()].children.push(id);
        Ok(id)
    }

    /// Overrides one parameter of an existing component and re-resolves it.
    ///
    /// This is how references are completed after both ends exist, for example a CPU's
    /// `interrupts` parameter pointing at its interrupt controller.
    pub fn set_param(
        &mut self,
        id: ComponentId,
        name: &str,
        value: impl Into<ParamInput>,
    ) -> Result<(), TopologyError> {
        let component = self.component(id)?;
        self.ensure_mutable(&component.path)?;
        let path = component.path.clone();
        let ty = component.ty;
        let mut overrides = component.overrides.clone();
        overrides.insert(name, value);

        let params = self.resolve(&path, ty, &overrides)?;
        for (param, target) in params.references() {
            if self.reaches(target, id) {
                return Err(TopologyError::ReferenceCycle {
                    component: path,
                    param: param.to_string(),
                    target: self.path_of(target),
                });
            }
        }

        let component = &mut self.components[id.index()];
        component.params = params;
        component.overrides = overrides;
        tracing::debug!(component = %path, param = name, "parameter overridden");
        Ok(())
    }

    /// Returns the component with `id`.
    pub fn component(&self, id: ComponentId) -> Result<&Component, TopologyError> {
        self.get(id)
            .ok_or_else(|| TopologyError::UnknownComponent(id.to_string()))
    }

    /// Returns the component with `id`, if it exists.
    pub fn get(&self, id: ComponentId) -> Option<&Component> {
        self.components.get(id.index())
    }

    /// Returns the id of the component at `path` (`"system.cpu"`).
    pub fn find(&self, path: &str) -> Option<ComponentId> {
        self.components.iter().find(|c| c.path == path).map(|c| c.id)
    }

    /// Iterates every component in creation order.
    pub fn components(&self) -> impl Iterator<Item = &Component> {
        self.components.iter()
    }

    /// Returns every component reachable from the root through children and references.
    pub fn reachable(&self) -> Vec<ComponentId> {
        let mut seen = BTreeSet::new();
        let mut stack = vec![self.system];
        let mut order = Vec::new();
        while let Some(id) = stack.pop() {
            if !seen.insert(id) {
                continue;
            }
            order.push(id);
            let component = &self.components[id.index()];
            stack.extend(component.params.references().map(|(_, target)| target));
            stack.extend(component.children.iter().rev().copied());
        }
        order
    }

    /// Names one port of one component.
    ///
    /// # Returns
    ///
    /// A `PortRef`, or `UnknownPort` if the type does not declare `port`.
    pub fn port(&self, id: ComponentId, port: &str) -> Result<PortRef, TopologyError> {
        let decl = self.port_decl(id, port)?;
        Ok(PortRef {
            component: id,
            port: decl.name,
        })
    }

    /// Returns the declaration of `port` on component `id`.
    pub(crate) fn port_decl(
        &self,
        id: ComponentId,
        port: &str,
    ) -> Result<&'static PortDecl, TopologyError> {
        let component = self.component(id)?;
        component
            .ports
            .iter()
            .find(|state| state.decl.name == port)
            .map(|state| state.decl)
            .ok_or_else(|| TopologyError::UnknownPort {
                component: component.path.clone(),
                port: port.to_string(),
            })
    }

    /// Returns `component.port` for diagnostics.
    pub fn port_path(&self, port: PortRef) -> String {
        format!("{}{PATH_SEPARATOR}{}", self.path_of(port.component), port.port)
    }

    /// Associates a workload with a CPU and creates the CPU's thread contexts.
    ///
    /// # Arguments
    ///
    /// * `cpu` - A component whose type is a CPU model.
    /// * `workload` - Handle produced by a `WorkloadLoader`.
    ///
    /// # Returns
    ///
    /// `WorkloadBindingConflict` if the CPU already runs a workload, `TypeMismatch` if the
    /// component is not a CPU or its `numThreads` is zero or above `MAX_THREADS_PER_CPU`.
    pub fn bind_workload(
        &mut self,
        cpu: ComponentId,
        workload: Workload,
    ) -> Result<(), TopologyError> {
        let component = self.component(cpu)?;
        self.ensure_mutable(&component.path)?;
        let Some(traits) = component.ty.cpu_traits() else {
            return Err(TopologyError::TypeMismatch {
                component: component.path.clone(),
                param: "workload".to_string(),
                expected: "CPU model".to_string(),
                found: component.ty.name.to_string(),
            });
        };
        if let Some(existing) = &component.workload {
            return Err(TopologyError::WorkloadBindingConflict {
                cpu: component.path.clone(),
                existing: existing.path().to_string(),
            });
        }
        if let Some(arch) = workload.arch() {
            if arch != traits.isa {
                tracing::warn!(
                    cpu = %component.path,
                    workload = workload.path(),
                    %arch,
                    expected = %traits.isa,
                    "workload architecture does not match the CPU model"
                );
            }
        }

        let threads = component.params.int("numThreads").unwrap_or(1);
        if !(1..=MAX_THREADS_PER_CPU).contains(&threads) {
            return Err(TopologyError::TypeMismatch {
                component: component.path.clone(),
                param: "numThreads".to_string(),
                expected: format!("thread count in 1..={MAX_THREADS_PER_CPU}"),
                found: threads.to_string(),
            });
        }
        let component = &mut self.components[cpu.index()];
        component.thread_contexts = (0..threads)
            .map(|thread_id| ThreadContext { thread_id, cpu })
            .collect();
        tracing::info!(
            cpu = %component.path,
            workload = workload.path(),
            threads,
            "workload bound"
        );
        component.workload = Some(workload);
        Ok(())
    }

    /// Produces a JSON description of the topology.
    ///
    /// Parameters are rendered in canonical unit form and ports list their peers by path.
    pub fn describe(&self) -> Value {
        let components: Vec<Value> = self
            .components
            .iter()
            .map(|component| {
                let params: Map<String, Value> = component
                    .params
                    .iter()
                    .map(|(name, value)| {
                        let rendered = match value.and_then(|v| v.as_component()) {
                            Some(target) => Value::String(self.path_of(target)),
                            None => value.map_or(Value::Null, |v| Value::String(v.to_string())),
                        };
                        (name.to_string(), rendered)
                    })
                    .collect();
                let ports: Map<String, Value> = component
                    .ports()
                    .map(|(decl, peers)| {
                        let peers = peers
                            .iter()
                            .map(|peer| Value::String(self.port_path(*peer)))
                            .collect();
                        (decl.name.to_string(), Value::Array(peers))
                    })
                    .collect();
                let mut node = json!({
                    "path": component.path,
                    "type": component.ty.name,
                    "params": params,
                    "ports": ports,
                });
                if let Some(workload) = &component.workload {
                    node["workload"] = json!({
                        "path": workload.path(),
                        "args": workload.args(),
                        "threads": component.thread_contexts.len(),
                    });
                }
                node
            })
            .collect();

        json!({
            "clock": self.clock.clock.to_string(),
            "voltage": self.clock.voltage.to_string(),
            "mem_mode": self.mem_mode,
            "mem_ranges": self.mem_ranges.iter().map(ToString::to_string).collect::<Vec<_>>(),
            "validated": self.validated,
            "components": components,
        })
    }

    pub(super) fn ensure_mutable(&self, what: &str) -> Result<(), TopologyError> {
        if self.validated {
            return Err(TopologyError::Frozen(what.to_string()));
        }
        Ok(())
    }

    pub(super) fn path_of(&self, id: ComponentId) -> String {
        self.get(id)
            .map_or_else(|| id.to_string(), |component| component.path.clone())
    }

    fn resolve(
        &self,
        path: &str,
        ty: &'static ComponentType,
        overrides: &Overrides,
    ) -> Result<ResolvedParams, TopologyError> {
        ResolveContext {
            component: path,
            clock: &self.clock,
            types: self,
        }
        .resolve(ty, overrides)
    }

    /// Returns whether `to` can be reached from `from` through children or references.
    fn reaches(&self, from: ComponentId, to: ComponentId) -> bool {
        let mut seen = BTreeSet::new();
        let mut stack = vec![from];
        while let Some(id) = stack.pop() {
            if id == to {
                return true;
            }
            if !seen.insert(id) {
                continue;
            }
            if let Some(component) = self.get(id) {
                stack.extend(component.children.iter().copied());
                stack.extend(component.params.references().map(|(_, target)| target));
            }
        }
        false
    }
}

impl TypeLookup for Topology {
    fn type_of(&self, id: ComponentId) -> Option<&'static ComponentType> {
        self.get(id).map(Component::component_type)
    }
}
