//! # Address Range Tests

use rstest::rstest;
use simforge_core::common::AddrRange;

#[test]
fn size_only_range_starts_at_zero() {
    let range = AddrRange::parse("512MB").unwrap();
    assert_eq!(range.start(), 0);
    assert_eq!(range.size(), 512 << 20);
    assert_eq!(range.end(), 0x2000_0000);
    assert_eq!(range.to_string(), "0x0:512MB");
}

#[test]
fn base_and_size_form_sets_the_base() {
    let range = AddrRange::parse("0x80000000:128MB").unwrap();
    assert_eq!(range.start(), 0x8000_0000);
    assert!(range.contains(0x8000_0000));
    assert!(!range.contains(0x8800_0000));
}

#[rstest]
#[case("0x0:1kB", "0x200:1kB", true)]
#[case("0x0:1kB", "0x400:1kB", false)]
#[case("0x400:1kB", "0x0:2kB", true)]
#[case("0x0:0", "0x0:1kB", false)]
fn overlap_is_half_open(#[case] a: &str, #[case] b: &str, #[case] overlaps: bool) {
    let a = AddrRange::parse(a).unwrap();
    let b = AddrRange::parse(b).unwrap();
    assert_eq!(a.overlaps(&b), overlaps);
    assert_eq!(b.overlaps(&a), overlaps);
}

#[test]
fn range_past_the_address_space_is_rejected() {
    assert!(AddrRange::new(u64::MAX, 2).is_err());
    assert!(AddrRange::parse("0xffffffffffffff00:1kB").is_err());
}
