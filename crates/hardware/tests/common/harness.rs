use simforge_core::common::constants::SYSTEM_PORT;
use simforge_core::common::{AddrRange, ClockDomain, MemorySize};
use simforge_core::component::catalog::{DDR3_1600_8X8, MEM_CTRL, SYSTEM_XBAR, X86_O3_CPU};
use simforge_core::component::{ComponentId, ComponentType, Endpoint};
use simforge_core::params::Overrides;
use simforge_core::sim::Workload;
use simforge_core::soc::Topology;

/// Path of the canonical hello-world workload.
pub const HELLO: &str = "tests/test-progs/hello/bin/x86/linux/hello";

/// Routes `tracing` output through the test writer; safe to call from every test.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_max_level(tracing::Level::DEBUG)
        .try_init();
}

/// A topology with everything wired except the CPU's instruction and data paths.
///
/// Contains the system address range, a CPU with its interrupt controller, the system bus,
/// the system port, a DDR3 memory controller, and a bound workload. Tests add caches (or the
/// zero-cache path) on top.
pub struct Rig {
    pub topology: Topology,
    pub cpu: ComponentId,
    pub membus: ComponentId,
}

impl Rig {
    pub fn new() -> Self {
        Self::with_cpu(&X86_O3_CPU)
    }

    pub fn with_cpu(cpu_type: &'static ComponentType) -> Self {
        init_tracing();
        let mut topology = Topology::new(ClockDomain::default()).unwrap();
        let range = AddrRange::with_size(MemorySize::parse("512MB").unwrap());
        topology.add_mem_range(range).unwrap();

        let cpu = topology
            .add_component("cpu", cpu_type, Overrides::new())
            .unwrap();
        let membus = topology
            .add_component("membus", &SYSTEM_XBAR, Overrides::new())
            .unwrap();

        let interrupts = topology.create_interrupt_controller(cpu).unwrap();
        topology.connect_interrupts(interrupts, membus).unwrap();

        let system_port = topology.port(topology.system(), SYSTEM_PORT).unwrap();
        topology.connect(system_port, Endpoint::Bus(membus)).unwrap();

        let dram = topology
            .add_component("dram", &DDR3_1600_8X8, Overrides::new().set("range", range))
            .unwrap();
        let mem_ctrl = topology
            .add_component("mem_ctrl", &MEM_CTRL, Overrides::new().set("dram", dram))
            .unwrap();
        let port = topology.port(mem_ctrl, "port").unwrap();
        topology.connect(port, Endpoint::Bus(membus)).unwrap();

        topology
            .bind_workload(cpu, Workload::new(HELLO, Vec::new()))
            .unwrap();

        Self {
            topology,
            cpu,
            membus,
        }
    }
}

impl Default for Rig {
    fn default() -> Self {
        Self::new()
    }
}
