//! # Workload Loader Tests

use std::io::Write;

use simforge_core::TopologyError;
use simforge_core::component::Isa;
use simforge_core::sim::{ElfLoader, WorkloadLoader};
use tempfile::NamedTempFile;

/// A bare 64-bit little-endian x86-64 executable header with no sections or segments.
fn elf64_x86_header(entry: u64) -> Vec<u8> {
    let mut image = vec![0x7f, b'E', b'L', b'F', 2, 1, 1, 0];
    image.resize(16, 0);
    image.extend_from_slice(&2u16.to_le_bytes()); // ET_EXEC
    image.extend_from_slice(&62u16.to_le_bytes()); // EM_X86_64
    image.extend_from_slice(&1u32.to_le_bytes());
    image.extend_from_slice(&entry.to_le_bytes());
    image.extend_from_slice(&0u64.to_le_bytes()); // e_phoff
    image.extend_from_slice(&0u64.to_le_bytes()); // e_shoff
    image.extend_from_slice(&0u32.to_le_bytes());
    image.extend_from_slice(&64u16.to_le_bytes());
    image.extend_from_slice(&56u16.to_le_bytes());
    image.extend_from_slice(&0u16.to_le_bytes());
    image.extend_from_slice(&64u16.to_le_bytes());
    image.extend_from_slice(&0u16.to_le_bytes());
    image.extend_from_slice(&0u16.to_le_bytes());
    assert_eq!(image.len(), 64);
    image
}

fn temp_file(contents: &[u8]) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(contents).unwrap();
    file.flush().unwrap();
    file
}

#[test]
fn elf_image_reports_isa_and_entry() {
    let file = temp_file(&elf64_x86_header(0x40_1000));
    let path = file.path().to_str().unwrap();

    let workload = ElfLoader
        .load(path, &["--size".to_string(), "4".to_string()])
        .unwrap();
    assert_eq!(workload.path(), path);
    assert_eq!(workload.args(), ["--size", "4"]);
    assert_eq!(workload.arch(), Some(Isa::X86));
    assert_eq!(workload.entry(), Some(0x40_1000));
}

#[test]
fn missing_binary_is_not_found() {
    let err = ElfLoader
        .load("/nonexistent/bin/hello", &[])
        .unwrap_err();
    assert!(matches!(
        err,
        TopologyError::WorkloadNotFound { ref path, .. } if path == "/nonexistent/bin/hello"
    ));
}

#[test]
fn script_is_not_a_loadable_image() {
    let file = temp_file(b"#!/bin/sh\necho hello\n");
    let err = ElfLoader
        .load(file.path().to_str().unwrap(), &[])
        .unwrap_err();
    assert!(matches!(
        err,
        TopologyError::WorkloadNotFound { ref reason, .. }
            if reason.starts_with("not a loadable image")
    ));
}
