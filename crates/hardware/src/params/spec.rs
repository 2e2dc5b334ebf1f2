//! Parameter declarations.

use std::fmt;

use crate::component::ComponentType;

/// Semantic type of a parameter.
///
/// The type decides how textual overrides are parsed and which typed inputs are accepted.
#[derive(Clone, Copy)]
pub enum ParamKind {
    /// Unsigned integer (decimal or `0x` hex).
    Integer,
    /// Duration in ticks, written as cycles of the owning clock domain or as a time.
    Latency,
    /// Capacity in bytes (`"16kB"`).
    MemorySize,
    /// Rate in bytes per second (`"100MB/s"`).
    MemoryBandwidth,
    /// Contiguous address interval (`"512MB"`, `"0x80000000:512MB"`).
    AddrRange,
    /// Reference to another component whose type is, or derives from, the given type.
    Reference(&'static ComponentType),
    /// Free-form text.
    String,
}

impl ParamKind {
    /// Returns the type name used in diagnostics (`"ComponentReference[DRAMInterface]"`).
    pub fn type_name(&self) -> String {
        match self {
            Self::Integer => "Integer".to_string(),
            Self::Latency => "LatencyDuration".to_string(),
            Self::MemorySize => "MemorySize".to_string(),
            Self::MemoryBandwidth => "MemoryBandwidth".to_string(),
            Self::AddrRange => "AddressRange".to_string(),
            Self::Reference(ty) => format!("ComponentReference[{}]", ty.name),
            Self::String => "String".to_string(),
        }
    }
}

impl fmt::Debug for ParamKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.type_name())
    }
}

impl fmt::Display for ParamKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.type_name())
    }
}

/// What a parameter resolves to when no override is given.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ParamDefault {
    /// Resolution fails unless an override is supplied.
    Required,
    /// Parsed exactly like a textual override.
    Value(&'static str),
    /// The parameter stays unassigned.
    Unset,
}

/// One typed, described parameter of a component type.
#[derive(Debug)]
pub struct ParamSpec {
    /// Parameter name.
    pub name: &'static str,
    /// Semantic type.
    pub kind: ParamKind,
    /// Default or requirement.
    pub default: ParamDefault,
    /// One-line description.
    pub description: &'static str,
}

impl ParamSpec {
    /// Declares a parameter with a textual default.
    pub const fn new(
        name: &'static str,
        kind: ParamKind,
        default: &'static str,
        description: &'static str,
    ) -> Self {
        Self {
            name,
            kind,
            default: ParamDefault::Value(default),
            description,
        }
    }

    /// Declares a parameter that must be supplied.
    pub const fn required(name: &'static str, kind: ParamKind, description: &'static str) -> Self {
        Self {
            name,
            kind,
            default: ParamDefault::Required,
            description,
        }
    }

    /// Declares a parameter that may stay unassigned.
    pub const fn optional(name: &'static str, kind: ParamKind, description: &'static str) -> Self {
        Self {
            name,
            kind,
            default: ParamDefault::Unset,
            description,
        }
    }

    /// Returns whether resolution fails without an override.
    pub const fn is_required(&self) -> bool {
        matches!(self.default, ParamDefault::Required)
    }
}
