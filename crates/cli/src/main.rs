//! Simulated-system assembly CLI.
//!
//! This binary assembles the canonical single-CPU system and hands it to the simulator. It
//! performs:
//! 1. **Configuration:** Built-in defaults, optionally a JSON file, then command-line overrides.
//! 2. **Assembly:** Builds and validates the topology (CPU, caches, buses, interrupts, memory).
//! 3. **Handoff:** Runs the topology on the dry-run simulator, or dumps it as JSON.

use std::{fs, process};

use clap::Parser;
use tracing_subscriber::EnvFilter;

use simforge_core::Config;
use simforge_core::component::catalog;
use simforge_core::sim::{DryRunSimulator, ElfLoader, launch};
use simforge_core::soc::build_system;

#[derive(Parser, Debug)]
#[command(
    name = "sim",
    author,
    version,
    about = "Assemble a simulated computer and hand it to the simulator",
    long_about = "Builds a single-CPU system (CPU, L1/L2 caches, system bus, interrupt controller, \
                  DDR memory) around a workload binary and hands it to the simulator.\n\n\
                  Examples:\n  sim\n  \
                  sim tests/test-progs/hello/bin/x86/linux/hello --l1i-size 32kB\n  \
                  sim prog --no-caches --dump-topology\n  sim prog -- arg1 arg2"
)]
struct Cli {
    /// Binary to run; defaults to the hello-world test program.
    binary: Option<String>,

    /// L1 instruction cache size (e.g. 32kB).
    #[arg(long)]
    l1i_size: Option<String>,

    /// L1 data cache size (e.g. 64kB).
    #[arg(long)]
    l1d_size: Option<String>,

    /// L2 cache size (e.g. 256kB).
    #[arg(long)]
    l2_size: Option<String>,

    /// CPU model (X86O3CPU, X86MinorCPU, X86TimingSimpleCPU, X86AtomicSimpleCPU).
    #[arg(long)]
    cpu_type: Option<String>,

    /// System clock (e.g. 2GHz).
    #[arg(long)]
    clock: Option<String>,

    /// System memory size (e.g. 1GB).
    #[arg(long)]
    mem_size: Option<String>,

    /// Connect the CPU straight to the system bus.
    #[arg(long)]
    no_caches: bool,

    /// Base configuration file (JSON); flags override it.
    #[arg(long)]
    config: Option<String>,

    /// Print the assembled topology as JSON instead of running it.
    #[arg(long)]
    dump_topology: bool,

    /// Arguments passed to the workload.
    #[arg(last = true)]
    args: Vec<String>,
}

impl Cli {
    /// Applies the command-line overrides on top of `base`.
    fn apply(self, mut config: Config) -> Config {
        if let Some(binary) = self.binary {
            config.general.binary = binary;
        }
        if !self.args.is_empty() {
            config.general.args = self.args;
        }
        if let Some(cpu_type) = self.cpu_type {
            if let Some(traits) = catalog::lookup(&cpu_type).and_then(|ty| ty.cpu_traits()) {
                config.system.mem_mode = traits.mem_mode;
            }
            config.system.cpu_type = cpu_type;
        }
        if let Some(clock) = self.clock {
            config.system.clock = clock;
        }
        if let Some(mem_size) = self.mem_size {
            config.system.mem_size = mem_size;
        }
        if self.no_caches {
            config.cache.enabled = false;
        }
        config.cache.l1i_size = self.l1i_size.or(config.cache.l1i_size);
        config.cache.l1d_size = self.l1d_size.or(config.cache.l1d_size);
        config.cache.l2_size = self.l2_size.or(config.cache.l2_size);
        config
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let base = match &cli.config {
        Some(path) => load_config(path),
        None => Config::default(),
    };
    let dump = cli.dump_topology;
    let config = cli.apply(base);

    let mut topology = build_system(&config, &ElfLoader).unwrap_or_else(|e| fatal(&e));

    if dump {
        topology.validate_complete().unwrap_or_else(|e| fatal(&e));
        match serde_json::to_string_pretty(&topology.describe()) {
            Ok(json) => println!("{json}"),
            Err(e) => fatal(&e),
        }
        return;
    }

    println!("Start of simulation");
    let exit = launch(&mut topology, &mut DryRunSimulator).unwrap_or_else(|e| fatal(&e));
    println!("Exit status: {exit}");
}

/// Reads and parses a JSON configuration file, exiting on failure.
fn load_config(path: &str) -> Config {
    let text = fs::read_to_string(path).unwrap_or_else(|e| fatal(&format!("{path}: {e}")));
    Config::from_json(&text).unwrap_or_else(|e| fatal(&format!("{path}: {e}")))
}

fn fatal(err: &dyn std::fmt::Display) -> ! {
    eprintln!("\n[!] FATAL: {err}");
    process::exit(1);
}
