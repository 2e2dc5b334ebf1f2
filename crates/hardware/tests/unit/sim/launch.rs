//! # End-to-End Launch Tests
//!
//! From a `Config` through `build_system` to the simulator handoff, with the loader and the
//! engine mocked.

use pretty_assertions::assert_eq;
use simforge_core::component::MemMode;
use simforge_core::sim::{
    DryRunSimulator, EngineError, LaunchError, Simulator, Workload, launch,
};
use simforge_core::soc::CacheHierarchyBuilder;
use simforge_core::{Config, TopologyError, Topology, build_system};

use crate::common::harness::{HELLO, Rig, init_tracing};
use crate::common::mocks::{MockEngine, MockLoader, echo_loader, engine_exiting_at};

fn build(config: &Config) -> Topology {
    init_tracing();
    build_system(config, &echo_loader()).unwrap()
}

fn size_at(topology: &Topology, path: &str) -> u64 {
    let id = topology
        .find(path)
        .unwrap_or_else(|| panic!("{path} not built"));
    topology
        .component(id)
        .unwrap()
        .params()
        .size("size")
        .unwrap()
        .bytes()
}

// ══════════════════════════════════════════════════════════
// Building
// ══════════════════════════════════════════════════════════

#[test]
fn default_configuration_runs_the_hello_program() {
    init_tracing();
    let mut loader = MockLoader::new();
    loader
        .expect_load()
        .withf(|path, args| path == HELLO && args.is_empty())
        .times(1)
        .returning(|path, args| Ok(Workload::new(path, args.to_vec())));

    let mut topology = build_system(&Config::default(), &loader).unwrap();
    let exit = launch(&mut topology, &mut engine_exiting_at(5_000_000)).unwrap();

    assert_eq!(exit.tick, 5_000_000);
    assert_eq!(
        exit.to_string(),
        "exiting with last active thread context @ 5000000 ticks"
    );
    assert!(topology.is_validated());
    assert_eq!(size_at(&topology, "system.cpu.icache"), 16 * 1024);
    assert_eq!(size_at(&topology, "system.cpu.dcache"), 64 * 1024);
    assert_eq!(size_at(&topology, "system.l2cache"), 256 * 1024);
}

#[test]
fn instruction_cache_size_override_leaves_data_cache_alone() {
    let mut config = Config::default();
    config.cache.l1i_size = Some("32kB".to_string());
    let topology = build(&config);

    assert_eq!(size_at(&topology, "system.cpu.icache"), 32768);
    assert_eq!(size_at(&topology, "system.cpu.dcache"), 64 * 1024);
}

#[test]
fn workload_arguments_reach_the_cpu() {
    let mut config = Config::default();
    config.general.binary = "/opt/bench/mcf".to_string();
    config.general.args = vec!["inp.in".to_string()];
    let topology = build(&config);

    let cpu = topology.component(topology.find("system.cpu").unwrap()).unwrap();
    let workload = cpu.workload().unwrap();
    assert_eq!(workload.path(), "/opt/bench/mcf");
    assert_eq!(workload.args(), ["inp.in"]);
    assert_eq!(cpu.thread_contexts().len(), 1);
}

#[test]
fn zero_cache_configuration_validates() {
    let mut config = Config::default();
    config.cache.enabled = false;
    let mut topology = build(&config);

    launch(&mut topology, &mut DryRunSimulator).unwrap();
    assert_eq!(topology.find("system.cpu.icache"), None);
    assert_eq!(topology.find("system.l2bus"), None);
}

#[test]
fn memory_controller_serves_the_system_range() {
    let mut config = Config::default();
    config.system.mem_size = "1GB".to_string();
    config.system.dram = "DDR4_2400_8x8".to_string();
    let topology = build(&config);

    assert_eq!(topology.mem_ranges()[0].size(), 1 << 30);
    let dram = topology.find("system.dram").unwrap();
    let mem_ctrl = topology.component(topology.find("system.mem_ctrl").unwrap()).unwrap();
    assert_eq!(mem_ctrl.params().component("dram"), Some(dram));
    let dram = topology.component(dram).unwrap();
    assert_eq!(dram.component_type().name, "DDR4_2400_8x8");
    assert_eq!(dram.params().range("range").unwrap().size(), 1 << 30);
}

// ══════════════════════════════════════════════════════════
// Configuration errors
// ══════════════════════════════════════════════════════════

#[test]
fn unknown_cpu_model_is_rejected() {
    for name in ["X86FooCPU", "L2Cache"] {
        let mut config = Config::default();
        config.system.cpu_type = name.to_string();
        let err = build_system(&config, &MockLoader::new()).unwrap_err();
        assert_eq!(err, TopologyError::UnknownComponent(name.to_string()));
    }
}

#[test]
fn malformed_clock_names_the_system() {
    let mut config = Config::default();
    config.system.clock = "fast".to_string();
    let err = build_system(&config, &MockLoader::new()).unwrap_err();
    assert!(matches!(
        err,
        TopologyError::MalformedUnitValue { ref component, ref param, .. }
            if component == "system" && param == "clock"
    ));
}

#[test]
fn malformed_cache_size_names_the_cache() {
    let mut config = Config::default();
    config.cache.l2_size = Some("256kQ".to_string());
    let err = build_system(&config, &MockLoader::new()).unwrap_err();
    assert!(matches!(
        err,
        TopologyError::MalformedUnitValue { ref component, ref param, .. }
            if component == "system.l2cache" && param == "size"
    ));
}

#[test]
fn loader_failure_aborts_assembly() {
    let mut loader = MockLoader::new();
    loader.expect_load().times(1).returning(|path, _| {
        Err(TopologyError::WorkloadNotFound {
            path: path.to_string(),
            reason: "No such file or directory".to_string(),
        })
    });
    let err = build_system(&Config::default(), &loader).unwrap_err();
    assert!(matches!(err, TopologyError::WorkloadNotFound { ref path, .. } if path == HELLO));
}

// ══════════════════════════════════════════════════════════
// Handoff
// ══════════════════════════════════════════════════════════

#[test]
fn engine_is_never_called_for_an_incomplete_topology() {
    let mut rig = Rig::new();
    let mut builder = CacheHierarchyBuilder::new(&mut rig.topology);
    let l1 = builder.attach_l1(rig.cpu, None, None).unwrap();
    builder.attach_l2(&l1, None).unwrap();

    let mut engine = MockEngine::new();
    engine.expect_instantiate().never();
    engine.expect_run().never();

    let err = launch(&mut rig.topology, &mut engine).unwrap_err();
    assert_eq!(
        err,
        LaunchError::Topology(TopologyError::DanglingPort {
            ports: vec!["system.l2cache.mem_side".to_string()],
        })
    );
}

#[test]
fn atomic_cpu_requires_atomic_memory_mode() {
    let mut config = Config::default();
    config.system.cpu_type = "X86AtomicSimpleCPU".to_string();
    let mut topology = build(&config);

    let mut engine = MockEngine::new();
    engine.expect_instantiate().never();
    let err = launch(&mut topology, &mut engine).unwrap_err();
    assert!(matches!(
        err,
        LaunchError::Topology(TopologyError::TypeMismatch { ref param, .. }) if param == "mem_mode"
    ));

    config.system.mem_mode = MemMode::Atomic;
    let mut topology = build(&config);
    launch(&mut topology, &mut DryRunSimulator).unwrap();
}

#[test]
fn engine_failure_is_reported_after_validation() {
    let mut topology = build(&Config::default());
    let mut engine = MockEngine::new();
    engine
        .expect_instantiate()
        .times(1)
        .returning(|_| Err(EngineError::Instantiate("no x86 decoder".to_string())));
    engine.expect_run().never();

    let err = launch(&mut topology, &mut engine).unwrap_err();
    assert_eq!(
        err,
        LaunchError::Engine(EngineError::Instantiate("no x86 decoder".to_string()))
    );
    assert!(topology.is_validated());
}

#[test]
fn dry_run_refuses_an_unvalidated_topology() {
    let topology = build(&Config::default());
    assert!(matches!(
        DryRunSimulator.instantiate(&topology),
        Err(EngineError::Instantiate(_))
    ));
}

#[test]
fn dry_run_accepts_the_canonical_system() {
    let mut topology = build(&Config::default());
    let exit = launch(&mut topology, &mut DryRunSimulator).unwrap();
    assert_eq!(exit.tick, 0);
    assert!(exit.cause.starts_with("dry run"));
}
