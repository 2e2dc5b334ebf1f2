//! Cache hierarchy assembly.
//!
//! This module encodes the canonical private-L1 / shared-L2 topology as a policy. It provides:
//! 1. **Cache levels:** `L1ICache`, `L1DCache` and `L2Cache` handles implementing `CacheLevel`,
//!    each refusing the connections its level may not make.
//! 2. **Builder:** `CacheHierarchyBuilder` creates the caches with their level defaults (size
//!    overridable) and wires CPU → L1 → L2 bus → L2, leaving the L2's memory side to the caller.
//! 3. **Zero-cache path:** CPU ports straight onto the system bus.

use super::topology::Topology;
use crate::common::TopologyError;
use crate::common::constants::{CACHE_CPU_SIDE, CACHE_MEM_SIDE, DCACHE_PORT, ICACHE_PORT};
use crate::component::catalog::{L1_DCACHE, L1_ICACHE, L2_CACHE, L2_XBAR, SYSTEM_XBAR};
use crate::component::{ComponentId, Endpoint};
use crate::params::Overrides;

/// Connection capabilities of one cache level.
///
/// Every level implements all three operations; a level that may not make a connection
/// returns `HierarchyOrderViolation` instead.
pub trait CacheLevel {
    /// Returns the cache component.
    fn cache(&self) -> ComponentId;

    /// Binds the cache's CPU side to the matching CPU port.
    fn connect_to_cpu(
        &self,
        topology: &mut Topology,
        cpu: ComponentId,
    ) -> Result<(), TopologyError>;

    /// Binds the cache's CPU side to a bus above it.
    fn connect_to_upstream_bus(
        &self,
        topology: &mut Topology,
        bus: ComponentId,
    ) -> Result<(), TopologyError>;

    /// Binds the cache's memory side to a bus below it.
    fn connect_to_downstream_bus(
        &self,
        topology: &mut Topology,
        bus: ComponentId,
    ) -> Result<(), TopologyError>;
}

/// First-level instruction cache.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct L1ICache(ComponentId);

/// First-level data cache.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct L1DCache(ComponentId);

/// Shared second-level cache.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct L2Cache(ComponentId);

impl CacheLevel for L1ICache {
    fn cache(&self) -> ComponentId {
        self.0
    }

    fn connect_to_cpu(
        &self,
        topology: &mut Topology,
        cpu: ComponentId,
    ) -> Result<(), TopologyError> {
        l1_connect_to_cpu(topology, self.0, cpu, ICACHE_PORT)
    }

    fn connect_to_upstream_bus(
        &self,
        topology: &mut Topology,
        bus: ComponentId,
    ) -> Result<(), TopologyError> {
        l1_refuse_upstream(topology, self.0, bus)
    }

    fn connect_to_downstream_bus(
        &self,
        topology: &mut Topology,
        bus: ComponentId,
    ) -> Result<(), TopologyError> {
        l1_connect_downstream(topology, self.0, bus)
    }
}

impl CacheLevel for L1DCache {
    fn cache(&self) -> ComponentId {
        self.0
    }

    fn connect_to_cpu(
        &self,
        topology: &mut Topology,
        cpu: ComponentId,
    ) -> Result<(), TopologyError> {
        l1_connect_to_cpu(topology, self.0, cpu, DCACHE_PORT)
    }

    fn connect_to_upstream_bus(
        &self,
        topology: &mut Topology,
        bus: ComponentId,
    ) -> Result<(), TopologyError> {
        l1_refuse_upstream(topology, self.0, bus)
    }

    fn connect_to_downstream_bus(
        &self,
        topology: &mut Topology,
        bus: ComponentId,
    ) -> Result<(), TopologyError> {
        l1_connect_downstream(topology, self.0, bus)
    }
}

impl CacheLevel for L2Cache {
    fn cache(&self) -> ComponentId {
        self.0
    }

    fn connect_to_cpu(
        &self,
        topology: &mut Topology,
        cpu: ComponentId,
    ) -> Result<(), TopologyError> {
        Err(TopologyError::HierarchyOrderViolation {
            from: topology.port_path(topology.port(self.0, CACHE_CPU_SIDE)?),
            to: topology.path_of(cpu),
            reason: "an L2 cache is fed by the L2 bus, never by a CPU",
        })
    }

    fn connect_to_upstream_bus(
        &self,
        topology: &mut Topology,
        bus: ComponentId,
    ) -> Result<(), TopologyError> {
        let cpu_side = topology.port(self.0, CACHE_CPU_SIDE)?;
        if is_system_bus(topology, bus)? {
            return Err(TopologyError::HierarchyOrderViolation {
                from: topology.port_path(cpu_side),
                to: topology.path_of(bus),
                reason: "the L2 cache sits below the L2 bus, not the system bus",
            });
        }
        topology.connect(cpu_side, Endpoint::Bus(bus))
    }

    fn connect_to_downstream_bus(
        &self,
        topology: &mut Topology,
        bus: ComponentId,
    ) -> Result<(), TopologyError> {
        let mem_side = topology.port(self.0, CACHE_MEM_SIDE)?;
        topology.connect(mem_side, Endpoint::Bus(bus))
    }
}

fn l1_connect_to_cpu(
    topology: &mut Topology,
    cache: ComponentId,
    cpu: ComponentId,
    cpu_port: &str,
) -> Result<(), TopologyError> {
    let cpu_side = topology.port(cache, CACHE_CPU_SIDE)?;
    let port = topology.port(cpu, cpu_port)?;
    topology.connect(port, cpu_side)
}

fn l1_refuse_upstream(
    topology: &Topology,
    cache: ComponentId,
    bus: ComponentId,
) -> Result<(), TopologyError> {
    Err(TopologyError::HierarchyOrderViolation {
        from: topology.port_path(topology.port(cache, CACHE_CPU_SIDE)?),
        to: topology.path_of(bus),
        reason: "an L1 cache faces the CPU directly",
    })
}

fn l1_connect_downstream(
    topology: &mut Topology,
    cache: ComponentId,
    bus: ComponentId,
) -> Result<(), TopologyError> {
    let mem_side = topology.port(cache, CACHE_MEM_SIDE)?;
    if is_system_bus(topology, bus)? {
        return Err(TopologyError::HierarchyOrderViolation {
            from: topology.port_path(mem_side),
            to: topology.path_of(bus),
            reason: "L1 caches reach the system bus only through the L2",
        });
    }
    topology.connect(mem_side, Endpoint::Bus(bus))
}

fn is_system_bus(topology: &Topology, bus: ComponentId) -> Result<bool, TopologyError> {
    Ok(topology.component(bus)?.component_type().is_a(&SYSTEM_XBAR))
}

/// The L1 caches attached to one CPU.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct L1Caches {
    /// The CPU the caches serve.
    pub cpu: ComponentId,
    /// Instruction cache, absent if the CPU has no fetch port.
    pub icache: Option<L1ICache>,
    /// Data cache, absent if the CPU has no data port.
    pub dcache: Option<L1DCache>,
}

impl L1Caches {
    /// Iterates the present caches, instruction cache first.
    pub fn levels(&self) -> impl Iterator<Item = &dyn CacheLevel> {
        let icache = self.icache.as_ref().map(|c| c as &dyn CacheLevel);
        let dcache = self.dcache.as_ref().map(|c| c as &dyn CacheLevel);
        icache.into_iter().chain(dcache)
    }
}

/// The shared stage created by [`CacheHierarchyBuilder::attach_l2`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct L2Stage {
    /// The crossbar between the L1s and the L2.
    pub bus: ComponentId,
    /// The L2 cache; its memory side is still unconnected.
    pub cache: L2Cache,
}

/// Builds the canonical cache hierarchy inside a topology.
#[derive(Debug)]
pub struct CacheHierarchyBuilder<'a> {
    topology: &'a mut Topology,
}

impl<'a> CacheHierarchyBuilder<'a> {
    /// Creates a builder over `topology`.
    pub const fn new(topology: &'a mut Topology) -> Self {
        Self { topology }
    }

    /// Creates and connects the instruction and data caches of `cpu`.
    ///
    /// The caches become children of the CPU (`<cpu>.icache`, `<cpu>.dcache`) and take the
    /// L1 defaults, with `size` overridden where given. A cache is only created for a port
    /// the CPU actually has.
    ///
    /// # Arguments
    ///
    /// * `cpu` - The CPU to cache.
    /// * `icache_size` - Optional instruction cache size (`"32kB"`).
    /// * `dcache_size` - Optional data cache size.
    ///
    /// # Returns
    ///
    /// The attached caches, or `UnsupportedCpuPort` if the CPU exposes neither port.
    pub fn attach_l1(
        &mut self,
        cpu: ComponentId,
        icache_size: Option<&str>,
        dcache_size: Option<&str>,
    ) -> Result<L1Caches, TopologyError> {
        let component = self.topology.component(cpu)?;
        let has_fetch = component.has_port(ICACHE_PORT);
        let has_data = component.has_port(DCACHE_PORT);
        if !has_fetch && !has_data {
            return Err(TopologyError::UnsupportedCpuPort {
                cpu: component.path().to_string(),
                type_name: component.component_type().name,
            });
        }

        let icache = if has_fetch {
            let id = self
                .topology
                .add_child(cpu, "icache", &L1_ICACHE, size_override(icache_size))?;
            let icache = L1ICache(id);
            icache.connect_to_cpu(self.topology, cpu)?;
            Some(icache)
        } else {
            None
        };
        let dcache = if has_data {
            let id = self
                .topology
                .add_child(cpu, "dcache", &L1_DCACHE, size_override(dcache_size))?;
            let dcache = L1DCache(id);
            dcache.connect_to_cpu(self.topology, cpu)?;
            Some(dcache)
        } else {
            None
        };

        let _ = self.topology.cached_cpus.insert(cpu);
        tracing::debug!(cpu = %self.topology.path_of(cpu), "L1 caches attached");
        Ok(L1Caches { cpu, icache, dcache })
    }

    /// Creates the L2 bus and the L2 cache and connects every L1 through them.
    ///
    /// The L2's memory side is left for the caller to connect to the system bus.
    ///
    /// # Arguments
    ///
    /// * `l1` - Caches returned by [`Self::attach_l1`].
    /// * `size` - Optional L2 size override.
    pub fn attach_l2(
        &mut self,
        l1: &L1Caches,
        size: Option<&str>,
    ) -> Result<L2Stage, TopologyError> {
        let bus = self
            .topology
            .add_component("l2bus", &L2_XBAR, Overrides::new())?;
        for level in l1.levels() {
            level.connect_to_downstream_bus(self.topology, bus)?;
        }

        let cache = L2Cache(
            self.topology
                .add_component("l2cache", &L2_CACHE, size_override(size))?,
        );
        cache.connect_to_upstream_bus(self.topology, bus)?;
        tracing::debug!(l2 = %self.topology.path_of(cache.cache()), "L2 stage attached");
        Ok(L2Stage { bus, cache })
    }

    /// Connects the CPU's ports straight to the system bus (zero-cache configuration).
    pub fn attach_uncached(
        &mut self,
        cpu: ComponentId,
        membus: ComponentId,
    ) -> Result<(), TopologyError> {
        let component = self.topology.component(cpu)?;
        let ports: Vec<&str> = [ICACHE_PORT, DCACHE_PORT]
            .into_iter()
            .filter(|port| component.has_port(port))
            .collect();
        if ports.is_empty() {
            return Err(TopologyError::UnsupportedCpuPort {
                cpu: component.path().to_string(),
                type_name: component.component_type().name,
            });
        }
        for port in ports {
            let port = self.topology.port(cpu, port)?;
            self.topology.connect(port, Endpoint::Bus(membus))?;
        }
        Ok(())
    }
}

fn size_override(size: Option<&str>) -> Overrides {
    size.map_or_else(Overrides::new, |size| Overrides::new().set("size", size))
}
