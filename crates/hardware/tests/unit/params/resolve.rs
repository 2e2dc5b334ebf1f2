//! # Parameter Resolution Tests
//!
//! Defaults, overrides, unit parsing and reference type checks, resolved against the
//! built-in component catalog.

use pretty_assertions::assert_eq;
use proptest::prelude::*;
use simforge_core::TopologyError;
use simforge_core::common::ClockDomain;
use simforge_core::component::catalog::{
    self, EXTRA_OBJECT, L1_DCACHE, L1_ICACHE, L2_CACHE, MEM_CTRL, TUTORIAL_OBJECT, X86_O3_CPU,
};
use simforge_core::component::{ComponentId, ComponentType};
use simforge_core::params::{
    Overrides, ParamDefault, ParamInput, ParamValue, ResolveContext, ResolvedParams,
};
use simforge_core::soc::Topology;

fn no_components(_: ComponentId) -> Option<&'static ComponentType> {
    None
}

fn resolve(
    ty: &'static ComponentType,
    overrides: &Overrides,
) -> Result<ResolvedParams, TopologyError> {
    let clock = ClockDomain::default();
    ResolveContext {
        component: "system.test",
        clock: &clock,
        types: &no_components,
    }
    .resolve(ty, overrides)
}

// ══════════════════════════════════════════════════════════
// Defaults
// ══════════════════════════════════════════════════════════

#[test]
fn l1_and_l2_defaults_match_the_canonical_hierarchy() {
    let icache = resolve(&L1_ICACHE, &Overrides::new()).unwrap();
    assert_eq!(icache.size("size").unwrap().bytes(), 16 * 1024);
    assert_eq!(icache.int("assoc"), Some(2));
    assert_eq!(icache.latency("tag_latency").unwrap().ticks(), 2_000);
    assert_eq!(icache.int("mshrs"), Some(4));
    assert_eq!(icache.int("tgts_per_mshr"), Some(20));

    let dcache = resolve(&L1_DCACHE, &Overrides::new()).unwrap();
    assert_eq!(dcache.size("size").unwrap().bytes(), 64 * 1024);

    let l2 = resolve(&L2_CACHE, &Overrides::new()).unwrap();
    assert_eq!(l2.size("size").unwrap().bytes(), 256 * 1024);
    assert_eq!(l2.int("assoc"), Some(8));
    assert_eq!(l2.latency("response_latency").unwrap().ticks(), 20_000);
    assert_eq!(l2.int("mshrs"), Some(20));
    assert_eq!(l2.int("tgts_per_mshr"), Some(12));
}

#[test]
fn optional_reference_stays_unassigned() {
    let cpu = resolve(&X86_O3_CPU, &Overrides::new()).unwrap();
    assert!(cpu.contains("interrupts"));
    assert_eq!(cpu.component("interrupts"), None);
    assert_eq!(cpu.int("numROBEntries"), Some(192));
}

#[test]
fn required_parameter_without_value_is_reported() {
    let err = resolve(&MEM_CTRL, &Overrides::new()).unwrap_err();
    assert_eq!(
        err,
        TopologyError::MissingRequiredParameter {
            component: "system.test".to_string(),
            param: "dram".to_string(),
        }
    );
}

proptest! {
    #[test]
    fn resolving_without_overrides_yields_exactly_the_defaults(index in 0..catalog::ALL.len()) {
        let ty = catalog::ALL[index];
        let schema = ty.schema();
        let clock = ClockDomain::default();
        let ctx = ResolveContext { component: "system.test", clock: &clock, types: &no_components };

        match ctx.resolve(ty, &Overrides::new()) {
            Ok(params) => {
                prop_assert_eq!(params.len(), schema.len());
                for spec in &schema {
                    let expected = match spec.default {
                        ParamDefault::Value(text) => {
                            Some(ctx.convert(spec, &ParamInput::Text(text.to_string())).unwrap())
                        }
                        ParamDefault::Unset => None,
                        ParamDefault::Required => unreachable!("resolution succeeded"),
                    };
                    prop_assert_eq!(params.get(spec.name).cloned(), expected);
                }
            }
            Err(TopologyError::MissingRequiredParameter { param, .. }) => {
                prop_assert!(schema.iter().any(|s| s.name == param && s.is_required()));
            }
            Err(other) => prop_assert!(false, "unexpected error {other}"),
        }
    }

    #[test]
    fn every_default_satisfies_its_own_type(index in 0..catalog::ALL.len()) {
        let ty = catalog::ALL[index];
        let clock = ClockDomain::default();
        let ctx = ResolveContext { component: "system.test", clock: &clock, types: &no_components };
        for spec in ty.schema() {
            if let ParamDefault::Value(text) = spec.default {
                prop_assert!(
                    ctx.convert(spec, &ParamInput::Text(text.to_string())).is_ok(),
                    "{}.{} default `{}` does not parse as {}",
                    ty.name, spec.name, text, spec.kind
                );
            }
        }
    }
}

// ══════════════════════════════════════════════════════════
// Overrides
// ══════════════════════════════════════════════════════════

#[test]
fn size_override_is_parsed_into_bytes() {
    let params = resolve(&L1_ICACHE, &Overrides::new().set("size", "32kB")).unwrap();
    assert_eq!(params.size("size").unwrap().bytes(), 32768);
    assert_eq!(params.int("assoc"), Some(2));
}

#[test]
fn integer_override_for_a_latency_counts_cycles() {
    let params = resolve(&L2_CACHE, &Overrides::new().set("tag_latency", 5u64)).unwrap();
    assert_eq!(params.latency("tag_latency").unwrap().ticks(), 5_000);
}

#[test]
fn malformed_unit_value_names_component_and_parameter() {
    let err = resolve(&L1_DCACHE, &Overrides::new().set("size", "64kQ")).unwrap_err();
    assert!(matches!(
        err,
        TopologyError::MalformedUnitValue { ref component, ref param, ref value, .. }
            if component == "system.test" && param == "size" && value == "64kQ"
    ));
}

#[test]
fn wrong_input_kind_is_a_type_mismatch() {
    let overrides = Overrides::new().set("assoc", ParamInput::Size(Default::default()));
    let err = resolve(&L2_CACHE, &overrides).unwrap_err();
    assert!(matches!(
        err,
        TopologyError::TypeMismatch { ref param, ref expected, .. }
            if param == "assoc" && expected == "Integer"
    ));
}

#[test]
fn unknown_parameter_is_rejected() {
    let err = resolve(&L1_ICACHE, &Overrides::new().set("sise", "32kB")).unwrap_err();
    assert_eq!(
        err,
        TopologyError::UnknownParameter {
            component: "system.test".to_string(),
            param: "sise".to_string(),
            type_name: "L1ICache",
        }
    );
}

// ══════════════════════════════════════════════════════════
// Component references
// ══════════════════════════════════════════════════════════

#[test]
fn reference_must_point_at_a_subtype() {
    let mut topology = Topology::new(ClockDomain::default()).unwrap();
    let not_dram = topology
        .add_component("l2", &L2_CACHE, Overrides::new())
        .unwrap();

    let err = topology
        .add_component("mem_ctrl", &MEM_CTRL, Overrides::new().set("dram", not_dram))
        .unwrap_err();
    assert_eq!(
        err,
        TopologyError::TypeMismatch {
            component: "system.mem_ctrl".to_string(),
            param: "dram".to_string(),
            expected: "ComponentReference[DRAMInterface]".to_string(),
            found: "L2Cache".to_string(),
        }
    );
}

#[test]
fn reference_to_a_missing_component_is_unknown() {
    let mut topology = Topology::new(ClockDomain::default()).unwrap();
    let dangling = {
        let mut other = Topology::new(ClockDomain::default()).unwrap();
        other.add_component("a", &L2_CACHE, Overrides::new()).unwrap();
        other.add_component("b", &L2_CACHE, Overrides::new()).unwrap()
    };
    let err = topology
        .add_component("mem_ctrl", &MEM_CTRL, Overrides::new().set("dram", dangling))
        .unwrap_err();
    assert!(matches!(err, TopologyError::UnknownComponent(_)));
}

#[test]
fn resolved_reference_is_a_component_value() {
    let mut topology = Topology::new(ClockDomain::default()).unwrap();
    let dram = topology
        .add_component(
            "dram",
            &catalog::DDR3_1600_8X8,
            Overrides::new().set("range", "512MB"),
        )
        .unwrap();
    let ctrl = topology
        .add_component("mem_ctrl", &MEM_CTRL, Overrides::new().set("dram", dram))
        .unwrap();
    let params = topology.component(ctrl).unwrap().params();
    assert_eq!(params.get("dram"), Some(&ParamValue::Component(dram)));
    assert_eq!(
        params.latency("static_frontend_latency").unwrap().ticks(),
        10_000
    );
}

// ══════════════════════════════════════════════════════════
// User-defined objects
// ══════════════════════════════════════════════════════════

#[test]
fn extra_object_defaults_carry_units() {
    let params = resolve(&EXTRA_OBJECT, &Overrides::new()).unwrap();
    assert_eq!(params.size("buffer_size").unwrap().bytes(), 1024);
    assert_eq!(
        params.bandwidth("write_bandwidth").unwrap().bytes_per_sec(),
        100 * 1024 * 1024
    );
    assert_eq!(params.get("write_bandwidth").unwrap().to_string(), "100MB/s");
}

#[test]
fn tutorial_object_latency_has_no_default() {
    let err = resolve(&TUTORIAL_OBJECT, &Overrides::new()).unwrap_err();
    assert_eq!(
        err,
        TopologyError::MissingRequiredParameter {
            component: "system.test".to_string(),
            param: "latency".to_string(),
        }
    );
}

#[test]
fn tutorial_object_needs_its_extra_object() {
    let err = resolve(&TUTORIAL_OBJECT, &Overrides::new().set("latency", "2ns")).unwrap_err();
    assert_eq!(
        err,
        TopologyError::MissingRequiredParameter {
            component: "system.test".to_string(),
            param: "extra_object".to_string(),
        }
    );
}

#[test]
fn tutorial_object_resolves_its_reference() {
    let mut topology = Topology::new(ClockDomain::default()).unwrap();
    let extra = topology
        .add_component(
            "extra",
            &EXTRA_OBJECT,
            Overrides::new().set("write_bandwidth", "1GB/s"),
        )
        .unwrap();
    let tutorial = topology
        .add_component(
            "tutorial",
            &TUTORIAL_OBJECT,
            Overrides::new().set("latency", "1us").set("extra_object", extra),
        )
        .unwrap();

    let params = topology.component(tutorial).unwrap().params();
    assert_eq!(params.component("extra_object"), Some(extra));
    assert_eq!(params.latency("latency").unwrap().ticks(), 1_000_000);
    assert_eq!(params.int("iterations"), Some(1));
    let extra = topology.component(extra).unwrap().params();
    assert_eq!(
        extra.bandwidth("write_bandwidth").unwrap().bytes_per_sec(),
        1 << 30
    );
}

#[test]
fn tutorial_object_rejects_a_foreign_reference() {
    let mut topology = Topology::new(ClockDomain::default()).unwrap();
    let cache = topology
        .add_component("l2", &L2_CACHE, Overrides::new())
        .unwrap();
    let err = topology
        .add_component(
            "tutorial",
            &TUTORIAL_OBJECT,
            Overrides::new().set("latency", "1us").set("extra_object", cache),
        )
        .unwrap_err();
    assert!(matches!(
        err,
        TopologyError::TypeMismatch { ref param, ref expected, .. }
            if param == "extra_object" && expected == "ComponentReference[ExtraObject]"
    ));
}
