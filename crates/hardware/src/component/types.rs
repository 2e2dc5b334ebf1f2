//! Component type descriptors.
//!
//! A `ComponentType` is the static schema of a kind of node: its parameter table, its port
//! table and the capability class that tells the wiring engine what the node is. Types form
//! single-inheritance chains by composition: a derived type names its `base` and lists only
//! the parameters it adds or whose defaults it changes.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::port::PortDecl;
use crate::params::ParamSpec;

/// System-wide memory access mode.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MemMode {
    /// Requests travel through the port graph and take simulated time.
    #[default]
    Timing,
    /// Requests complete immediately with an estimated latency.
    Atomic,
}

impl fmt::Display for MemMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Timing => f.write_str("timing"),
            Self::Atomic => f.write_str("atomic"),
        }
    }
}

/// Instruction set a CPU model executes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Isa {
    /// x86-64.
    X86,
    /// RISC-V.
    Riscv,
    /// Arm / AArch64.
    Arm,
}

impl fmt::Display for Isa {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::X86 => f.write_str("x86"),
            Self::Riscv => f.write_str("riscv"),
            Self::Arm => f.write_str("arm"),
        }
    }
}

/// Properties every CPU model declares.
#[derive(Clone, Copy, Debug)]
pub struct CpuTraits {
    /// Instruction set the model executes.
    pub isa: Isa,
    /// Memory mode the model requires.
    pub mem_mode: MemMode,
    /// Interrupt controller type created for this CPU.
    pub interrupts: &'static ComponentType,
}

/// Capability class of a component type.
#[derive(Clone, Copy, Debug)]
pub enum ComponentClass {
    /// The root system object.
    System,
    /// A processor model.
    Cpu(CpuTraits),
    /// A cache of any level.
    Cache,
    /// A crossbar; exposes vector ports and accepts bus-mediated connections.
    Bus,
    /// A per-CPU interrupt controller.
    InterruptController,
    /// A memory controller.
    MemCtrl,
    /// A DRAM device/timing description owned by a memory controller.
    DramInterface,
    /// Anything else (user-defined helper objects).
    Generic,
}

/// Static schema of a kind of component.
pub struct ComponentType {
    /// Type name, unique across the catalog (`"L1ICache"`).
    pub name: &'static str,
    /// Parent type whose parameters and ports are inherited.
    pub base: Option<&'static ComponentType>,
    /// Capability class.
    pub class: ComponentClass,
    /// Parameters added or re-defaulted by this type.
    pub params: &'static [ParamSpec],
    /// Ports added by this type.
    pub ports: &'static [PortDecl],
    /// One-line description.
    pub description: &'static str,
}

impl fmt::Debug for ComponentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ComponentType")
            .field("name", &self.name)
            .field("base", &self.base.map(|b| b.name))
            .finish_non_exhaustive()
    }
}

impl ComponentType {
    /// Returns the inheritance chain, starting with `self` and ending at the root type.
    pub fn lineage(&'static self) -> Vec<&'static Self> {
        let mut chain = vec![self];
        let mut current = self.base;
        while let Some(ty) = current {
            chain.push(ty);
            current = ty.base;
        }
        chain
    }

    /// Returns whether `self` is `other` or derives from it.
    pub fn is_a(&self, other: &Self) -> bool {
        let mut current = Some(self);
        while let Some(ty) = current {
            if ty.name == other.name {
                return true;
            }
            current = ty.base;
        }
        false
    }

    /// Returns the full, ordered parameter schema.
    ///
    /// Base parameters come first; a derived type re-declaring a parameter replaces the base
    /// entry in place, which is how defaults are overridden along the chain.
    pub fn schema(&'static self) -> Vec<&'static ParamSpec> {
        merge_lineage(&self.lineage(), |ty| ty.params, |p| p.name)
    }

    /// Returns every port declared along the chain.
    pub fn port_decls(&'static self) -> Vec<&'static PortDecl> {
        merge_lineage(&self.lineage(), |ty| ty.ports, |p| p.name)
    }

    /// Looks up one parameter of the merged schema.
    pub fn param(&'static self, name: &str) -> Option<&'static ParamSpec> {
        self.schema().into_iter().find(|p| p.name == name)
    }

    /// Looks up one port of the merged port table.
    pub fn port(&'static self, name: &str) -> Option<&'static PortDecl> {
        self.port_decls().into_iter().find(|p| p.name == name)
    }

    /// Returns the CPU traits if this is a CPU model.
    pub const fn cpu_traits(&self) -> Option<CpuTraits> {
        match self.class {
            ComponentClass::Cpu(traits) => Some(traits),
            _ => None,
        }
    }

    /// Returns whether this type is a crossbar.
    pub const fn is_bus(&self) -> bool {
        matches!(self.class, ComponentClass::Bus)
    }
}

fn merge_lineage<T>(
    lineage: &[&'static ComponentType],
    select: impl Fn(&'static ComponentType) -> &'static [T],
    key: impl Fn(&T) -> &'static str,
) -> Vec<&'static T> {
    let mut merged: Vec<&'static T> = Vec::new();
    for ty in lineage.iter().rev() {
        for item in select(*ty) {
            match merged.iter().position(|m| key(*m) == key(item)) {
                Some(slot) => merged[slot] = item,
                None => merged.push(item),
            }
        }
    }
    merged
}
