//! Workload loading.
//!
//! This module turns a binary path and an argument list into a `Workload` handle that can be
//! bound to a CPU. It provides:
//! 1. **Workload:** The opaque handle (path, arguments and whatever the loader learned).
//! 2. **WorkloadLoader:** The collaborator interface used by the system builder.
//! 3. **ElfLoader:** A file-backed loader that probes ELF images with the `object` crate.

use std::fs;

use object::{Architecture, Object};

use crate::common::TopologyError;
use crate::component::Isa;

/// A runnable program bound (or about to be bound) to a CPU.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Workload {
    path: String,
    args: Vec<String>,
    arch: Option<Isa>,
    entry: Option<u64>,
}

impl Workload {
    /// Creates a workload handle with no probed metadata.
    pub fn new(path: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            path: path.into(),
            args,
            arch: None,
            entry: None,
        }
    }

    /// Records the instruction set and entry point found in the image.
    #[must_use]
    pub const fn with_image_info(mut self, arch: Option<Isa>, entry: Option<u64>) -> Self {
        self.arch = arch;
        self.entry = entry;
        self
    }

    /// Returns the binary path.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Returns the program arguments (not including the program name).
    pub fn args(&self) -> &[String] {
        &self.args
    }

    /// Returns the image's instruction set, if it was recognised.
    pub const fn arch(&self) -> Option<Isa> {
        self.arch
    }

    /// Returns the image's entry point, if known.
    pub const fn entry(&self) -> Option<u64> {
        self.entry
    }
}

/// Produces workloads from a binary path and an argument list.
pub trait WorkloadLoader {
    /// Loads `path` with `args`.
    ///
    /// # Returns
    ///
    /// The workload handle, or `TopologyError::WorkloadNotFound` naming the path.
    fn load(&self, path: &str, args: &[String]) -> Result<Workload, TopologyError>;
}

/// Loader that reads the binary from disk and probes it as an ELF image.
#[derive(Clone, Copy, Debug, Default)]
pub struct ElfLoader;

impl WorkloadLoader for ElfLoader {
    fn load(&self, path: &str, args: &[String]) -> Result<Workload, TopologyError> {
        let data = fs::read(path).map_err(|e| TopologyError::WorkloadNotFound {
            path: path.to_string(),
            reason: e.to_string(),
        })?;
        let image = object::File::parse(&*data).map_err(|e| TopologyError::WorkloadNotFound {
            path: path.to_string(),
            reason: format!("not a loadable image: {e}"),
        })?;

        let arch = isa_of(image.architecture());
        let entry = image.entry();
        tracing::debug!(path, ?arch, entry = format_args!("{entry:#x}"), "workload image probed");
        Ok(Workload::new(path, args.to_vec()).with_image_info(arch, Some(entry)))
    }
}

fn isa_of(arch: Architecture) -> Option<Isa> {
    match arch {
        Architecture::X86_64 | Architecture::X86_64_X32 | Architecture::I386 => Some(Isa::X86),
        Architecture::Riscv32 | Architecture::Riscv64 => Some(Isa::Riscv),
        Architecture::Arm | Architecture::Aarch64 | Architecture::Aarch64_Ilp32 => Some(Isa::Arm),
        _ => None,
    }
}
