//! # Unit Parsing Tests
//!
//! Parsing and canonical formatting of memory sizes, bandwidths, frequencies, voltages
//! and latencies.

use proptest::prelude::*;
use rstest::rstest;
use simforge_core::common::{
    ClockDomain, Frequency, Latency, MemoryBandwidth, MemorySize, UnitError, Voltage,
};

// ══════════════════════════════════════════════════════════
// Memory sizes
// ══════════════════════════════════════════════════════════

#[rstest]
#[case("16kB", 16 * 1024)]
#[case("64kB", 64 * 1024)]
#[case("256kB", 256 * 1024)]
#[case("512MB", 512 * 1024 * 1024)]
#[case("32KiB", 32 * 1024)]
#[case("1GB", 1 << 30)]
#[case("4096", 4096)]
#[case(" 8 MB ", 8 << 20)]
fn memory_size_parses_binary_units(#[case] text: &str, #[case] bytes: u64) {
    assert_eq!(MemorySize::parse(text).unwrap().bytes(), bytes);
}

#[rstest]
#[case("16kB", "16kB")]
#[case("1024kB", "1MB")]
#[case("512MiB", "512MB")]
#[case("2048MB", "2GB")]
#[case("1536", "1536B")]
fn memory_size_canonicalizes_to_largest_exact_unit(#[case] text: &str, #[case] canonical: &str) {
    assert_eq!(MemorySize::canonicalize(text).unwrap(), canonical);
}

#[rstest]
#[case("")]
#[case("kB")]
#[case("16kQ")]
#[case("1.5kB")]
#[case("99999999999TB")]
fn memory_size_rejects_malformed_values(#[case] text: &str) {
    assert!(MemorySize::parse(text).is_err());
}

#[test]
fn memory_size_reports_unknown_suffix() {
    let err = MemorySize::parse("16kQ").unwrap_err();
    assert!(matches!(err, UnitError::UnknownSuffix { ref suffix, .. } if suffix == "kQ"));
}

proptest! {
    #[test]
    fn memory_size_round_trip_matches_canonical_form(
        magnitude in 1u64..4096,
        unit in prop::sample::select(vec!["B", "kB", "MB", "GB"]),
    ) {
        let text = format!("{magnitude}{unit}");
        let parsed = MemorySize::parse(&text).unwrap();
        prop_assert_eq!(parsed.to_string(), MemorySize::canonicalize(&text).unwrap());
        prop_assert_eq!(MemorySize::parse(&parsed.to_string()).unwrap(), parsed);
    }
}

// ══════════════════════════════════════════════════════════
// Bandwidths, frequencies, voltages
// ══════════════════════════════════════════════════════════

#[test]
fn bandwidth_requires_per_second_suffix() {
    let bw = MemoryBandwidth::parse("100MB/s").unwrap();
    assert_eq!(bw.bytes_per_sec(), 100 << 20);
    assert_eq!(bw.to_string(), "100MB/s");
    assert!(MemoryBandwidth::parse("100MB").is_err());
}

#[rstest]
#[case("1GHz", 1_000_000_000)]
#[case("2.5GHz", 2_500_000_000)]
#[case("800MHz", 800_000_000)]
#[case("100kHz", 100_000)]
fn frequency_parses_decimal_prefixes(#[case] text: &str, #[case] hz: u64) {
    assert_eq!(Frequency::parse(text).unwrap().hz(), hz);
}

#[test]
fn frequency_must_be_positive() {
    assert!(matches!(
        Frequency::parse("0GHz"),
        Err(UnitError::NotPositive(_))
    ));
}

#[test]
fn voltage_parses_volts_and_millivolts() {
    assert_eq!(Voltage::parse("1V").unwrap().millivolts(), 1000);
    assert_eq!(Voltage::parse("900mV").unwrap().millivolts(), 900);
    assert_eq!(Voltage::parse("0.9V").unwrap().to_string(), "900mV");
}

// ══════════════════════════════════════════════════════════
// Latencies
// ══════════════════════════════════════════════════════════

#[rstest]
#[case("2", 2_000)]
#[case("20", 20_000)]
#[case("1ns", 1_000)]
#[case("13.75ns", 13_750)]
#[case("500t", 500)]
#[case("1us", 1_000_000)]
fn latency_resolves_against_one_gigahertz(#[case] text: &str, #[case] ticks: u64) {
    let clock = ClockDomain::default();
    assert_eq!(Latency::parse(text, &clock).unwrap().ticks(), ticks);
}

#[test]
fn latency_cycles_follow_the_clock_domain() {
    let fast = ClockDomain::parse("2GHz", "1V").unwrap();
    let latency = Latency::parse("20", &fast).unwrap();
    assert_eq!(latency.ticks(), 10_000);
    assert_eq!(latency.cycles(&fast), 20);
    assert_eq!(latency.cycles(&ClockDomain::default()), 10);
}

#[test]
fn latency_rejects_unknown_time_unit() {
    let err = Latency::parse("3fortnights", &ClockDomain::default()).unwrap_err();
    assert!(matches!(err, UnitError::UnknownSuffix { expected: "latency", .. }));
}
