//! Configuration surface for assembling a system.
//!
//! This module defines the settings the system builder consumes. It provides:
//! 1. **Defaults:** The canonical single-CPU machine (O3 CPU at 1 GHz, 512 MB DDR3).
//! 2. **Structures:** General (workload), system (CPU, clock, memory) and cache settings.
//! 3. **JSON loading:** `Config::from_json` for configuration files; unknown fields are rejected.
//!
//! Sizes, clocks and voltages stay as strings here; they are parsed with their units when the
//! topology is assembled, so a malformed value is reported against the component it configures.

use serde::{Deserialize, Serialize};

use crate::component::MemMode;

/// Default configuration values.
mod defaults {
    /// Program run when no binary is given.
    pub const BINARY: &str = "tests/test-progs/hello/bin/x86/linux/hello";

    /// CPU model.
    pub const CPU_TYPE: &str = "X86O3CPU";

    /// System clock frequency.
    pub const CLOCK: &str = "1GHz";

    /// System voltage domain.
    pub const VOLTAGE: &str = "1V";

    /// Size of the single system address range, starting at 0.
    pub const MEM_SIZE: &str = "512MB";

    /// DRAM interface type behind the memory controller.
    pub const DRAM: &str = "DDR3_1600_8x8";
}

/// Root configuration.
///
/// # Examples
///
/// ```
/// use simforge_core::config::Config;
///
/// let json = r#"{
///     "general": { "binary": "bin/hello", "args": ["-v"] },
///     "system": { "cpu_type": "X86TimingSimpleCPU", "mem_size": "1GB" },
///     "cache": { "l1i_size": "32kB" }
/// }"#;
///
/// let config = Config::from_json(json).unwrap();
/// assert_eq!(config.general.binary, "bin/hello");
/// assert_eq!(config.system.clock, "1GHz");
/// assert_eq!(config.cache.l1i_size.as_deref(), Some("32kB"));
/// assert!(config.cache.enabled);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Workload settings.
    #[serde(default)]
    pub general: GeneralConfig,
    /// CPU, clock and memory settings.
    #[serde(default)]
    pub system: SystemConfig,
    /// Cache hierarchy settings.
    #[serde(default)]
    pub cache: CacheHierarchyConfig,
}

impl Config {
    /// Parses a JSON configuration; missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Returns the binary to run, substituting the default program for an empty path.
    pub fn binary(&self) -> &str {
        if self.general.binary.is_empty() {
            defaults::BINARY
        } else {
            &self.general.binary
        }
    }
}

/// Workload settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GeneralConfig {
    /// Binary to run; empty selects the default hello-world program.
    #[serde(default)]
    pub binary: String,

    /// Program arguments.
    #[serde(default)]
    pub args: Vec<String>,
}

/// CPU, clock and memory settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SystemConfig {
    /// CPU model name from the component catalog.
    #[serde(default = "SystemConfig::default_cpu_type")]
    pub cpu_type: String,

    /// Clock frequency (`"1GHz"`).
    #[serde(default = "SystemConfig::default_clock")]
    pub clock: String,

    /// Voltage (`"1V"`).
    #[serde(default = "SystemConfig::default_voltage")]
    pub voltage: String,

    /// Memory access mode.
    #[serde(default)]
    pub mem_mode: MemMode,

    /// Size of the system address range (`"512MB"` or `"base:size"`).
    #[serde(default = "SystemConfig::default_mem_size")]
    pub mem_size: String,

    /// DRAM interface type.
    #[serde(default = "SystemConfig::default_dram")]
    pub dram: String,
}

impl SystemConfig {
    fn default_cpu_type() -> String {
        defaults::CPU_TYPE.to_string()
    }

    fn default_clock() -> String {
        defaults::CLOCK.to_string()
    }

    fn default_voltage() -> String {
        defaults::VOLTAGE.to_string()
    }

    fn default_mem_size() -> String {
        defaults::MEM_SIZE.to_string()
    }

    fn default_dram() -> String {
        defaults::DRAM.to_string()
    }
}

impl Default for SystemConfig {
    fn default() -> Self {
        Self {
            cpu_type: Self::default_cpu_type(),
            clock: Self::default_clock(),
            voltage: Self::default_voltage(),
            mem_mode: MemMode::default(),
            mem_size: Self::default_mem_size(),
            dram: Self::default_dram(),
        }
    }
}

/// Cache hierarchy settings.
///
/// Sizes left unset fall through to the level defaults of the component catalog
/// (16 kB instruction, 64 kB data, 256 kB L2).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CacheHierarchyConfig {
    /// Build the L1/L2 hierarchy; when false the CPU talks to the system bus directly.
    #[serde(default = "CacheHierarchyConfig::default_enabled")]
    pub enabled: bool,

    /// L1 instruction cache size.
    #[serde(default)]
    pub l1i_size: Option<String>,

    /// L1 data cache size.
    #[serde(default)]
    pub l1d_size: Option<String>,

    /// L2 cache size.
    #[serde(default)]
    pub l2_size: Option<String>,
}

impl CacheHierarchyConfig {
    const fn default_enabled() -> bool {
        true
    }
}

impl Default for CacheHierarchyConfig {
    fn default() -> Self {
        Self {
            enabled: Self::default_enabled(),
            l1i_size: None,
            l1d_size: None,
            l2_size: None,
        }
    }
}
