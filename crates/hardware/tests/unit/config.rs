//! # Configuration Tests
//!
//! Defaults, JSON loading and the default workload path.

use pretty_assertions::assert_eq;
use simforge_core::Config;
use simforge_core::component::MemMode;

use crate::common::harness::HELLO;

#[test]
fn defaults_describe_the_canonical_machine() {
    let config = Config::default();
    assert_eq!(config.system.cpu_type, "X86O3CPU");
    assert_eq!(config.system.clock, "1GHz");
    assert_eq!(config.system.voltage, "1V");
    assert_eq!(config.system.mem_mode, MemMode::Timing);
    assert_eq!(config.system.mem_size, "512MB");
    assert_eq!(config.system.dram, "DDR3_1600_8x8");
    assert!(config.cache.enabled);
    assert_eq!(config.cache.l1i_size, None);
    assert_eq!(config.cache.l2_size, None);
}

#[test]
fn empty_binary_selects_the_hello_program() {
    let mut config = Config::default();
    assert_eq!(config.binary(), HELLO);

    config.general.binary = "/opt/bench/mcf".to_string();
    assert_eq!(config.binary(), "/opt/bench/mcf");
}

#[test]
fn empty_document_equals_defaults() {
    assert_eq!(Config::from_json("{}").unwrap(), Config::default());
}

#[test]
fn partial_document_keeps_other_defaults() {
    let config = Config::from_json(
        r#"{
            "system": { "cpu_type": "X86AtomicSimpleCPU", "mem_mode": "atomic" },
            "cache": { "enabled": false }
        }"#,
    )
    .unwrap();
    assert_eq!(config.system.cpu_type, "X86AtomicSimpleCPU");
    assert_eq!(config.system.mem_mode, MemMode::Atomic);
    assert_eq!(config.system.clock, "1GHz");
    assert!(!config.cache.enabled);
    assert!(config.general.args.is_empty());
}

#[test]
fn unknown_field_is_rejected() {
    let err = Config::from_json(r#"{ "cache": { "l3_size": "8MB" } }"#).unwrap_err();
    assert!(err.to_string().contains("l3_size"));
}

#[test]
fn configuration_survives_serialization() {
    let mut config = Config::default();
    config.general.args = vec!["-n".to_string(), "10".to_string()];
    config.cache.l1d_size = Some("32kB".to_string());

    let json = serde_json::to_string(&config).unwrap();
    assert_eq!(Config::from_json(&json).unwrap(), config);
}
