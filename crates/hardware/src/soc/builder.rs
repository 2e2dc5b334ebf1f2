//! Canonical single-CPU system construction.
//!
//! This module assembles the complete machine from configuration. It performs:
//! 1. **Root setup:** Clock domain, memory mode and the system address range.
//! 2. **CPU and buses:** The configured CPU model and the system crossbar.
//! 3. **Caches:** The L1/L2 hierarchy through `CacheHierarchyBuilder`, or the zero-cache path.
//! 4. **Interrupts and memory:** The CPU's interrupt controller, the system port, and a memory
//!    controller backed by the configured DRAM interface.
//! 5. **Workload:** Loads the binary and binds it to the CPU.
//!
//! The returned topology is complete but not yet validated; `launch` validates it.

use super::hierarchy::{CacheHierarchyBuilder, CacheLevel};
use super::topology::Topology;
use crate::common::constants::{SYSTEM_PATH, SYSTEM_PORT};
use crate::common::{AddrRange, ClockDomain, Frequency, TopologyError, UnitError, Voltage};
use crate::component::catalog::{self, DRAM_INTERFACE, MEM_CTRL, SYSTEM_XBAR};
use crate::component::{ComponentType, Endpoint};
use crate::config::Config;
use crate::params::Overrides;
use crate::sim::loader::WorkloadLoader;

/// Builds the canonical system described by `config`.
///
/// # Arguments
///
/// * `config` - CPU model, clock, memory and cache settings plus the workload.
/// * `loader` - Produces the workload bound to the CPU.
///
/// # Returns
///
/// The assembled topology, or the first assembly error.
pub fn build_system(
    config: &Config,
    loader: &dyn WorkloadLoader,
) -> Result<Topology, TopologyError> {
    let system = &config.system;
    let clock = Frequency::parse(&system.clock)
        .map_err(|e| malformed("clock", &system.clock, e))?;
    let voltage = Voltage::parse(&system.voltage)
        .map_err(|e| malformed("voltage", &system.voltage, e))?;

    let mut topology = Topology::new(ClockDomain::new(clock, voltage))?;
    topology.set_mem_mode(system.mem_mode)?;
    let range = AddrRange::parse(&system.mem_size)
        .map_err(|e| malformed("mem_ranges", &system.mem_size, e))?;
    topology.add_mem_range(range)?;

    let cpu_type = lookup_type(&system.cpu_type, |ty| ty.cpu_traits().is_some())?;
    let cpu = topology.add_component("cpu", cpu_type, Overrides::new())?;
    let membus = topology.add_component("membus", &SYSTEM_XBAR, Overrides::new())?;

    let cache = &config.cache;
    let mut hierarchy = CacheHierarchyBuilder::new(&mut topology);
    if cache.enabled {
        let l1 = hierarchy.attach_l1(cpu, cache.l1i_size.as_deref(), cache.l1d_size.as_deref())?;
        let l2 = hierarchy.attach_l2(&l1, cache.l2_size.as_deref())?;
        l2.cache.connect_to_downstream_bus(&mut topology, membus)?;
    } else {
        hierarchy.attach_uncached(cpu, membus)?;
    }

    let interrupts = topology.create_interrupt_controller(cpu)?;
    topology.connect_interrupts(interrupts, membus)?;

    let system_port = topology.port(topology.system(), SYSTEM_PORT)?;
    topology.connect(system_port, Endpoint::Bus(membus))?;

    let dram_type = lookup_type(&system.dram, |ty| ty.is_a(&DRAM_INTERFACE))?;
    let dram = topology.add_component("dram", dram_type, Overrides::new().set("range", range))?;
    let mem_ctrl =
        topology.add_component("mem_ctrl", &MEM_CTRL, Overrides::new().set("dram", dram))?;
    topology.connect(topology.port(mem_ctrl, "port")?, Endpoint::Bus(membus))?;

    let workload = loader.load(config.binary(), &config.general.args)?;
    topology.bind_workload(cpu, workload)?;

    tracing::info!(
        cpu = cpu_type.name,
        caches = cache.enabled,
        mem = %range,
        "system assembled"
    );
    Ok(topology)
}

fn lookup_type(
    name: &str,
    accept: impl Fn(&ComponentType) -> bool,
) -> Result<&'static ComponentType, TopologyError> {
    catalog::lookup(name)
        .filter(|ty| accept(ty))
        .ok_or_else(|| TopologyError::UnknownComponent(name.to_string()))
}

fn malformed(param: &str, value: &str, source: UnitError) -> TopologyError {
    TopologyError::MalformedUnitValue {
        component: SYSTEM_PATH.to_string(),
        param: param.to_string(),
        value: value.to_string(),
        source,
    }
}
