//! Built-in component types.
//!
//! Every type here is a static descriptor; derived types list only what they add or
//! re-default. Cache and crossbar defaults follow the canonical two-level hierarchy:
//! 16 kB / 64 kB 2-way L1s with 2-cycle latencies, and a 256 kB 8-way L2 with 20-cycle
//! latencies.

use super::port::{PortDecl, PortRole};
use super::types::{ComponentClass, ComponentType, CpuTraits, Isa, MemMode};
use crate::common::constants::{
    BUS_CPU_SIDE_PORTS, BUS_MEM_SIDE_PORTS, CACHE_CPU_SIDE, CACHE_MEM_SIDE, DCACHE_PORT,
    ICACHE_PORT, SYSTEM_PORT,
};
use crate::params::{ParamKind, ParamSpec};

// ══════════════════════════════════════════════════════════
// System
// ══════════════════════════════════════════════════════════

/// The root system object.
pub static SYSTEM: ComponentType = ComponentType {
    name: "System",
    base: None,
    class: ComponentClass::System,
    params: &[ParamSpec::new(
        "cache_line_size",
        ParamKind::Integer,
        "64",
        "Cache line size in bytes",
    )],
    ports: &[PortDecl::single(
        SYSTEM_PORT,
        PortRole::Request,
        "Functional access port used by the engine to load memory",
    )],
    description: "Root of the simulated machine",
};

// ══════════════════════════════════════════════════════════
// Interrupt controllers
// ══════════════════════════════════════════════════════════

/// Abstract per-CPU interrupt controller.
pub static BASE_INTERRUPTS: ComponentType = ComponentType {
    name: "BaseInterrupts",
    base: None,
    class: ComponentClass::InterruptController,
    params: &[],
    ports: &[],
    description: "Per-CPU interrupt controller",
};

/// x86 local APIC with its three memory-side ports.
pub static X86_LOCAL_APIC: ComponentType = ComponentType {
    name: "X86LocalApic",
    base: Some(&BASE_INTERRUPTS),
    class: ComponentClass::InterruptController,
    params: &[
        ParamSpec::new("int_latency", ParamKind::Latency, "1ns", "Interrupt delivery latency"),
        ParamSpec::new("pio_latency", ParamKind::Latency, "100ns", "Programmed I/O latency"),
        ParamSpec::new(
            "pio_addr",
            ParamKind::Integer,
            "0x2000000000000000",
            "Base address of the APIC register window",
        ),
    ],
    ports: &[
        PortDecl::single("pio", PortRole::Response, "Programmed I/O register access"),
        PortDecl::single("int_requestor", PortRole::Request, "Outgoing interrupt messages"),
        PortDecl::single("int_responder", PortRole::Response, "Incoming interrupt messages"),
    ],
    description: "x86 local APIC",
};

// ══════════════════════════════════════════════════════════
// CPUs
// ══════════════════════════════════════════════════════════

/// Abstract processor with split instruction and data ports.
pub static BASE_CPU: ComponentType = ComponentType {
    name: "BaseCPU",
    base: None,
    class: ComponentClass::Generic,
    params: &[
        ParamSpec::new("cpu_id", ParamKind::Integer, "0", "CPU identifier"),
        ParamSpec::new("numThreads", ParamKind::Integer, "1", "Hardware threads per core"),
        ParamSpec::optional(
            "interrupts",
            ParamKind::Reference(&BASE_INTERRUPTS),
            "Interrupt controller owned by this CPU",
        ),
    ],
    ports: &[
        PortDecl::single(ICACHE_PORT, PortRole::Request, "Instruction fetch port"),
        PortDecl::single(DCACHE_PORT, PortRole::Request, "Data access port"),
    ],
    description: "Abstract processor",
};

/// In-order, one-instruction-at-a-time CPU using timing memory accesses.
pub static X86_TIMING_SIMPLE_CPU: ComponentType = ComponentType {
    name: "X86TimingSimpleCPU",
    base: Some(&BASE_CPU),
    class: ComponentClass::Cpu(CpuTraits {
        isa: Isa::X86,
        mem_mode: MemMode::Timing,
        interrupts: &X86_LOCAL_APIC,
    }),
    params: &[],
    ports: &[],
    description: "Simple x86 CPU with timing memory accesses",
};

/// In-order CPU using atomic memory accesses.
pub static X86_ATOMIC_SIMPLE_CPU: ComponentType = ComponentType {
    name: "X86AtomicSimpleCPU",
    base: Some(&BASE_CPU),
    class: ComponentClass::Cpu(CpuTraits {
        isa: Isa::X86,
        mem_mode: MemMode::Atomic,
        interrupts: &X86_LOCAL_APIC,
    }),
    params: &[],
    ports: &[],
    description: "Simple x86 CPU with atomic memory accesses",
};

/// Four-stage pipelined in-order CPU.
pub static X86_MINOR_CPU: ComponentType = ComponentType {
    name: "X86MinorCPU",
    base: Some(&BASE_CPU),
    class: ComponentClass::Cpu(CpuTraits {
        isa: Isa::X86,
        mem_mode: MemMode::Timing,
        interrupts: &X86_LOCAL_APIC,
    }),
    params: &[
        ParamSpec::new(
            "fetch1LineWidth",
            ParamKind::Integer,
            "0",
            "Fetch line width,
            0 for cache line",
        ),
        ParamSpec::new(
            "decodeInputWidth",
            ParamKind::Integer,
            "2",
            "Instructions decoded per cycle",
        ),
        ParamSpec::new(
            "executeInputWidth",
            ParamKind::Integer,
            "2",
            "Instructions issued per cycle",
        ),
    ],
    ports: &[],
    description: "Pipelined in-order x86 CPU",
};

/// Out-of-order superscalar CPU.
pub static X86_O3_CPU: ComponentType = ComponentType {
    name: "X86O3CPU",
    base: Some(&BASE_CPU),
    class: ComponentClass::Cpu(CpuTraits {
        isa: Isa::X86,
        mem_mode: MemMode::Timing,
        interrupts: &X86_LOCAL_APIC,
    }),
    params: &[
        ParamSpec::new("fetchWidth", ParamKind::Integer, "8", "Instructions fetched per cycle"),
        ParamSpec::new("decodeWidth", ParamKind::Integer, "8", "Instructions decoded per cycle"),
        ParamSpec::new("issueWidth", ParamKind::Integer, "8", "Instructions issued per cycle"),
        ParamSpec::new("commitWidth", ParamKind::Integer, "8", "Instructions committed per cycle"),
        ParamSpec::new("numROBEntries", ParamKind::Integer, "192", "Reorder buffer entries"),
        ParamSpec::new("numPhysIntRegs", ParamKind::Integer, "256", "Physical integer registers"),
        ParamSpec::new("LQEntries", ParamKind::Integer, "32", "Load queue entries"),
        ParamSpec::new("SQEntries", ParamKind::Integer, "32", "Store queue entries"),
    ],
    ports: &[],
    description: "Out-of-order x86 CPU",
};

// ══════════════════════════════════════════════════════════
// Caches
// ══════════════════════════════════════════════════════════

/// Abstract cache; every timing parameter must be supplied by a subtype or an override.
pub static BASE_CACHE: ComponentType = ComponentType {
    name: "BaseCache",
    base: None,
    class: ComponentClass::Cache,
    params: &[
        ParamSpec::required("size", ParamKind::MemorySize, "Capacity"),
        ParamSpec::required("assoc", ParamKind::Integer, "Associativity"),
        ParamSpec::required("tag_latency", ParamKind::Latency, "Tag lookup latency"),
        ParamSpec::required("data_latency", ParamKind::Latency, "Data access latency"),
        ParamSpec::required(
            "response_latency",
            ParamKind::Latency,
            "Latency for the return path on a miss",
        ),
        ParamSpec::required(
            "mshrs",
            ParamKind::Integer,
            "Number of MSHRs (max outstanding requests)",
        ),
        ParamSpec::required("tgts_per_mshr", ParamKind::Integer, "Max number of accesses per MSHR"),
        ParamSpec::new("write_buffers", ParamKind::Integer, "8", "Number of write buffers"),
    ],
    ports: &[
        PortDecl::single(CACHE_CPU_SIDE, PortRole::Response, "Upstream port closer to the CPU"),
        PortDecl::single(CACHE_MEM_SIDE, PortRole::Request, "Downstream port closer to memory"),
    ],
    description: "Abstract cache",
};

/// Private first-level cache timing.
pub static L1_CACHE: ComponentType = ComponentType {
    name: "L1Cache",
    base: Some(&BASE_CACHE),
    class: ComponentClass::Cache,
    params: &[
        ParamSpec::new("assoc", ParamKind::Integer, "2", "Associativity"),
        ParamSpec::new("tag_latency", ParamKind::Latency, "2", "Tag lookup latency"),
        ParamSpec::new("data_latency", ParamKind::Latency, "2", "Data access latency"),
        ParamSpec::new(
            "response_latency",
            ParamKind::Latency,
            "2",
            "Latency for the return path on a miss",
        ),
        ParamSpec::new("mshrs", ParamKind::Integer, "4", "Number of MSHRs"),
        ParamSpec::new(
            "tgts_per_mshr",
            ParamKind::Integer,
            "20",
            "Max number of accesses per MSHR",
        ),
    ],
    ports: &[],
    description: "First-level cache",
};

/// First-level instruction cache.
pub static L1_ICACHE: ComponentType = ComponentType {
    name: "L1ICache",
    base: Some(&L1_CACHE),
    class: ComponentClass::Cache,
    params: &[ParamSpec::new("size", ParamKind::MemorySize, "16kB", "Capacity")],
    ports: &[],
    description: "First-level instruction cache",
};

/// First-level data cache.
pub static L1_DCACHE: ComponentType = ComponentType {
    name: "L1DCache",
    base: Some(&L1_CACHE),
    class: ComponentClass::Cache,
    params: &[ParamSpec::new("size", ParamKind::MemorySize, "64kB", "Capacity")],
    ports: &[],
    description: "First-level data cache",
};

/// Shared second-level cache.
pub static L2_CACHE: ComponentType = ComponentType {
    name: "L2Cache",
    base: Some(&BASE_CACHE),
    class: ComponentClass::Cache,
    params: &[
        ParamSpec::new("size", ParamKind::MemorySize, "256kB", "Capacity"),
        ParamSpec::new("assoc", ParamKind::Integer, "8", "Associativity"),
        ParamSpec::new("tag_latency", ParamKind::Latency, "20", "Tag lookup latency"),
        ParamSpec::new("data_latency", ParamKind::Latency, "20", "Data access latency"),
        ParamSpec::new(
            "response_latency",
            ParamKind::Latency,
            "20",
            "Latency for the return path on a miss",
        ),
        ParamSpec::new("mshrs", ParamKind::Integer, "20", "Number of MSHRs"),
        ParamSpec::new(
            "tgts_per_mshr",
            ParamKind::Integer,
            "12",
            "Max number of accesses per MSHR",
        ),
    ],
    ports: &[],
    description: "Second-level cache",
};

// ══════════════════════════════════════════════════════════
// Crossbars
// ══════════════════════════════════════════════════════════

/// Abstract crossbar with unbounded port arrays on both sides.
pub static BASE_XBAR: ComponentType = ComponentType {
    name: "BaseXBar",
    base: None,
    class: ComponentClass::Bus,
    params: &[
        ParamSpec::required("width", ParamKind::Integer, "Datapath width in bytes"),
        ParamSpec::required("frontend_latency", ParamKind::Latency, "Header latency"),
        ParamSpec::required("forward_latency", ParamKind::Latency, "Request forwarding latency"),
        ParamSpec::required("response_latency", ParamKind::Latency, "Response latency"),
    ],
    ports: &[
        PortDecl::vector(BUS_CPU_SIDE_PORTS, PortRole::Response, "Ports facing requestors"),
        PortDecl::vector(BUS_MEM_SIDE_PORTS, PortRole::Request, "Ports facing responders"),
    ],
    description: "Abstract crossbar",
};

/// Crossbar that also forwards snoops.
pub static COHERENT_XBAR: ComponentType = ComponentType {
    name: "CoherentXBar",
    base: Some(&BASE_XBAR),
    class: ComponentClass::Bus,
    params: &[ParamSpec::required(
        "snoop_response_latency",
        ParamKind::Latency,
        "Snoop response latency",
    )],
    ports: &[],
    description: "Coherent crossbar",
};

/// Crossbar between the private L1s and the shared L2.
pub static L2_XBAR: ComponentType = ComponentType {
    name: "L2XBar",
    base: Some(&COHERENT_XBAR),
    class: ComponentClass::Bus,
    params: &[
        ParamSpec::new("width", ParamKind::Integer, "32", "Datapath width in bytes"),
        ParamSpec::new("frontend_latency", ParamKind::Latency, "1", "Header latency"),
        ParamSpec::new("forward_latency", ParamKind::Latency, "0", "Request forwarding latency"),
        ParamSpec::new("response_latency", ParamKind::Latency, "1", "Response latency"),
        ParamSpec::new("snoop_response_latency", ParamKind::Latency, "1", "Snoop response latency"),
    ],
    ports: &[],
    description: "L1-to-L2 crossbar",
};

/// System-wide memory bus.
pub static SYSTEM_XBAR: ComponentType = ComponentType {
    name: "SystemXBar",
    base: Some(&COHERENT_XBAR),
    class: ComponentClass::Bus,
    params: &[
        ParamSpec::new("width", ParamKind::Integer, "16", "Datapath width in bytes"),
        ParamSpec::new("frontend_latency", ParamKind::Latency, "3", "Header latency"),
        ParamSpec::new("forward_latency", ParamKind::Latency, "4", "Request forwarding latency"),
        ParamSpec::new("response_latency", ParamKind::Latency, "2", "Response latency"),
        ParamSpec::new("snoop_response_latency", ParamKind::Latency, "4", "Snoop response latency"),
    ],
    ports: &[],
    description: "System memory bus",
};

// ══════════════════════════════════════════════════════════
// Memory
// ══════════════════════════════════════════════════════════

/// Abstract DRAM device and timing description.
pub static DRAM_INTERFACE: ComponentType = ComponentType {
    name: "DRAMInterface",
    base: None,
    class: ComponentClass::DramInterface,
    params: &[
        ParamSpec::required("range", ParamKind::AddrRange, "Address range served"),
        ParamSpec::required("device_size", ParamKind::MemorySize, "Capacity of one device"),
        ParamSpec::required("device_bus_width", ParamKind::Integer, "Data pins per device"),
        ParamSpec::required("devices_per_rank", ParamKind::Integer, "Devices per rank"),
        ParamSpec::required("ranks_per_channel", ParamKind::Integer, "Ranks per channel"),
        ParamSpec::required("burst_length", ParamKind::Integer, "Burst length"),
        ParamSpec::required("tCK", ParamKind::Latency, "Clock period"),
        ParamSpec::required("tCL", ParamKind::Latency, "CAS latency"),
        ParamSpec::required("tRCD", ParamKind::Latency, "RAS to CAS delay"),
        ParamSpec::required("tRP", ParamKind::Latency, "Row precharge time"),
        ParamSpec::required("tRAS", ParamKind::Latency, "Minimum row activation time"),
        ParamSpec::required("peak_bandwidth", ParamKind::MemoryBandwidth, "Peak channel bandwidth"),
    ],
    ports: &[],
    description: "Abstract DRAM interface",
};

/// DDR3-1600, 8 x8 devices per rank.
pub static DDR3_1600_8X8: ComponentType = ComponentType {
    name: "DDR3_1600_8x8",
    base: Some(&DRAM_INTERFACE),
    class: ComponentClass::DramInterface,
    params: &[
        ParamSpec::new("device_size", ParamKind::MemorySize, "512MB", "Capacity of one device"),
        ParamSpec::new("device_bus_width", ParamKind::Integer, "8", "Data pins per device"),
        ParamSpec::new("devices_per_rank", ParamKind::Integer, "8", "Devices per rank"),
        ParamSpec::new("ranks_per_channel", ParamKind::Integer, "2", "Ranks per channel"),
        ParamSpec::new("burst_length", ParamKind::Integer, "8", "Burst length"),
        ParamSpec::new("tCK", ParamKind::Latency, "1.25ns", "Clock period"),
        ParamSpec::new("tCL", ParamKind::Latency, "13.75ns", "CAS latency"),
        ParamSpec::new("tRCD", ParamKind::Latency, "13.75ns", "RAS to CAS delay"),
        ParamSpec::new("tRP", ParamKind::Latency, "13.75ns", "Row precharge time"),
        ParamSpec::new("tRAS", ParamKind::Latency, "35ns", "Minimum row activation time"),
        ParamSpec::new(
            "peak_bandwidth",
            ParamKind::MemoryBandwidth,
            "12800MB/s",
            "Peak channel bandwidth",
        ),
    ],
    ports: &[],
    description: "DDR3-1600 x64 channel",
};

/// DDR4-2400, 8 x8 devices per rank.
pub static DDR4_2400_8X8: ComponentType = ComponentType {
    name: "DDR4_2400_8x8",
    base: Some(&DRAM_INTERFACE),
    class: ComponentClass::DramInterface,
    params: &[
        ParamSpec::new("device_size", ParamKind::MemorySize, "512MB", "Capacity of one device"),
        ParamSpec::new("device_bus_width", ParamKind::Integer, "8", "Data pins per device"),
        ParamSpec::new("devices_per_rank", ParamKind::Integer, "8", "Devices per rank"),
        ParamSpec::new("ranks_per_channel", ParamKind::Integer, "2", "Ranks per channel"),
        ParamSpec::new("burst_length", ParamKind::Integer, "8", "Burst length"),
        ParamSpec::new("tCK", ParamKind::Latency, "833ps", "Clock period"),
        ParamSpec::new("tCL", ParamKind::Latency, "14.16ns", "CAS latency"),
        ParamSpec::new("tRCD", ParamKind::Latency, "14.16ns", "RAS to CAS delay"),
        ParamSpec::new("tRP", ParamKind::Latency, "14.16ns", "Row precharge time"),
        ParamSpec::new("tRAS", ParamKind::Latency, "32ns", "Minimum row activation time"),
        ParamSpec::new(
            "peak_bandwidth",
            ParamKind::MemoryBandwidth,
            "19200MB/s",
            "Peak channel bandwidth",
        ),
    ],
    ports: &[],
    description: "DDR4-2400 x64 channel",
};

/// Memory controller fronting one DRAM interface.
pub static MEM_CTRL: ComponentType = ComponentType {
    name: "MemCtrl",
    base: None,
    class: ComponentClass::MemCtrl,
    params: &[
        ParamSpec::required(
            "dram",
            ParamKind::Reference(&DRAM_INTERFACE),
            "DRAM interface served by this controller",
        ),
        ParamSpec::new(
            "static_frontend_latency",
            ParamKind::Latency,
            "10ns",
            "Controller frontend latency",
        ),
        ParamSpec::new(
            "static_backend_latency",
            ParamKind::Latency,
            "10ns",
            "Controller backend latency",
        ),
        ParamSpec::new("write_buffer_size", ParamKind::Integer, "64", "Write queue entries"),
        ParamSpec::new("read_buffer_size", ParamKind::Integer, "32", "Read queue entries"),
    ],
    ports: &[PortDecl::single("port", PortRole::Response, "Memory-side response port")],
    description: "Memory controller",
};

// ══════════════════════════════════════════════════════════
// User-defined objects
// ══════════════════════════════════════════════════════════

/// Buffer filler used as a dependency of `TutorialObject`.
pub static EXTRA_OBJECT: ComponentType = ComponentType {
    name: "ExtraObject",
    base: None,
    class: ComponentClass::Generic,
    params: &[
        ParamSpec::new(
            "buffer_size",
            ParamKind::MemorySize,
            "1kB",
            "Size of the buffer to fill",
        ),
        ParamSpec::new(
            "write_bandwidth",
            ParamKind::MemoryBandwidth,
            "100MB/s",
            "Bandwidth to fill the buffer",
        ),
    ],
    ports: &[],
    description: "Fills a buffer at a fixed bandwidth",
};

/// Event-driven object that fires after a latency and drives an `ExtraObject`.
pub static TUTORIAL_OBJECT: ComponentType = ComponentType {
    name: "TutorialObject",
    base: None,
    class: ComponentClass::Generic,
    params: &[
        ParamSpec::required("latency", ParamKind::Latency, "Time before hitting the event"),
        ParamSpec::new(
            "iterations",
            ParamKind::Integer,
            "1",
            "Number of times to fire the event",
        ),
        ParamSpec::required(
            "extra_object",
            ParamKind::Reference(&EXTRA_OBJECT),
            "An Extra Object",
        ),
    ],
    ports: &[],
    description: "Fires a timed event a fixed number of times",
};

/// Every built-in type, abstract ones included.
pub static ALL: &[&ComponentType] = &[
    &SYSTEM,
    &BASE_INTERRUPTS,
    &X86_LOCAL_APIC,
    &BASE_CPU,
    &X86_TIMING_SIMPLE_CPU,
    &X86_ATOMIC_SIMPLE_CPU,
    &X86_MINOR_CPU,
    &X86_O3_CPU,
    &BASE_CACHE,
    &L1_CACHE,
    &L1_ICACHE,
    &L1_DCACHE,
    &L2_CACHE,
    &BASE_XBAR,
    &COHERENT_XBAR,
    &L2_XBAR,
    &SYSTEM_XBAR,
    &DRAM_INTERFACE,
    &DDR3_1600_8X8,
    &DDR4_2400_8X8,
    &MEM_CTRL,
    &EXTRA_OBJECT,
    &TUTORIAL_OBJECT,
];

/// Looks up a built-in type by name.
pub fn lookup(name: &str) -> Option<&'static ComponentType> {
    ALL.iter().copied().find(|ty| ty.name == name)
}

/// Returns the names of the concrete CPU models.
pub fn cpu_models() -> impl Iterator<Item = &'static str> {
    ALL.iter()
        .filter(|ty| ty.cpu_traits().is_some())
        .map(|ty| ty.name)
}
