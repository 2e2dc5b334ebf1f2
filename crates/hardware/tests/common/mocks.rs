use mockall::mock;
use simforge_core::TopologyError;
use simforge_core::sim::{EngineError, ExitReason, Simulator, Workload, WorkloadLoader};
use simforge_core::soc::Topology;

mock! {
    pub Loader {}
    impl WorkloadLoader for Loader {
        fn load(&self, path: &str, args: &[String]) -> Result<Workload, TopologyError>;
    }
}

mock! {
    pub Engine {}
    impl Simulator for Engine {
        type Handle = u32;
        fn instantiate(&mut self, topology: &Topology) -> Result<u32, EngineError>;
        fn run(&mut self, handle: u32) -> Result<ExitReason, EngineError>;
    }
}

/// A loader that accepts any path and echoes it back as the workload.
pub fn echo_loader() -> MockLoader {
    let mut loader = MockLoader::new();
    loader
        .expect_load()
        .returning(|path, args| Ok(Workload::new(path, args.to_vec())));
    loader
}

/// An engine that expects exactly one instantiate/run cycle and exits at `tick`.
pub fn engine_exiting_at(tick: u64) -> MockEngine {
    let mut engine = MockEngine::new();
    engine
        .expect_instantiate()
        .times(1)
        .returning(|topology| Ok(topology.components().count() as u32));
    engine.expect_run().times(1).returning(move |_| {
        Ok(ExitReason {
            cause: "exiting with last active thread context".to_string(),
            tick,
        })
    });
    engine
}
