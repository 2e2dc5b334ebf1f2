//! Parameter inputs (what configuration code supplies) and resolved values.

use std::fmt;

use crate::common::{AddrRange, Latency, MemoryBandwidth, MemorySize};
use crate::component::ComponentId;

/// A value supplied by configuration code, before it is checked against a `ParamSpec`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ParamInput {
    /// Text parsed according to the parameter's semantic type (`"32kB"`, `"2"`, `"1ns"`).
    Text(String),
    /// A plain integer (a count, a byte size or a cycle count depending on the type).
    Int(u64),
    /// An already-parsed memory size.
    Size(MemorySize),
    /// An already-parsed address range.
    Range(AddrRange),
    /// A reference to another component.
    Component(ComponentId),
}

impl ParamInput {
    /// Short description of the input for type-mismatch diagnostics.
    pub fn describe(&self) -> String {
        match self {
            Self::Text(text) => format!("text `{text}`"),
            Self::Int(n) => format!("integer {n}"),
            Self::Size(size) => format!("size {size}"),
            Self::Range(range) => format!("range {range}"),
            Self::Component(id) => format!("component {id}"),
        }
    }
}

impl From<&str> for ParamInput {
    fn from(text: &str) -> Self {
        Self::Text(text.to_string())
    }
}

impl From<String> for ParamInput {
    fn from(text: String) -> Self {
        Self::Text(text)
    }
}

impl From<u64> for ParamInput {
    fn from(n: u64) -> Self {
        Self::Int(n)
    }
}

impl From<MemorySize> for ParamInput {
    fn from(size: MemorySize) -> Self {
        Self::Size(size)
    }
}

impl From<AddrRange> for ParamInput {
    fn from(range: AddrRange) -> Self {
        Self::Range(range)
    }
}

impl From<ComponentId> for ParamInput {
    fn from(id: ComponentId) -> Self {
        Self::Component(id)
    }
}

/// A parameter value after resolution, in canonical units.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ParamValue {
    /// Integer.
    Int(u64),
    /// Duration in ticks.
    Latency(Latency),
    /// Size in bytes.
    Size(MemorySize),
    /// Bytes per second.
    Bandwidth(MemoryBandwidth),
    /// Address interval.
    Range(AddrRange),
    /// Referenced component.
    Component(ComponentId),
    /// Text.
    Str(String),
}

impl ParamValue {
    /// Returns the integer, if this is one.
    pub const fn as_int(&self) -> Option<u64> {
        match self {
            Self::Int(n) => Some(*n),
            _ => None,
        }
    }

    /// Returns the latency, if this is one.
    pub const fn as_latency(&self) -> Option<Latency> {
        match self {
            Self::Latency(l) => Some(*l),
            _ => None,
        }
    }

    /// Returns the memory size, if this is one.
    pub const fn as_size(&self) -> Option<MemorySize> {
        match self {
            Self::Size(s) => Some(*s),
            _ => None,
        }
    }

    /// Returns the bandwidth, if this is one.
    pub const fn as_bandwidth(&self) -> Option<MemoryBandwidth> {
        match self {
            Self::Bandwidth(b) => Some(*b),
            _ => None,
        }
    }

    /// Returns the address range, if this is one.
    pub const fn as_range(&self) -> Option<AddrRange> {
        match self {
            Self::Range(r) => Some(*r),
            _ => None,
        }
    }

    /// Returns the referenced component, if this is a reference.
    pub const fn as_component(&self) -> Option<ComponentId> {
        match self {
            Self::Component(id) => Some(*id),
            _ => None,
        }
    }

    /// Returns the text, if this is a string.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Str(s) => Some(s),
            _ => None,
        }
    }
}

impl fmt::Display for ParamValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(n) => write!(f, "{n}"),
            Self::Latency(l) => write!(f, "{l}"),
            Self::Size(s) => write!(f, "{s}"),
            Self::Bandwidth(b) => write!(f, "{b}"),
            Self::Range(r) => write!(f, "{r}"),
            Self::Component(id) => write!(f, "{id}"),
            Self::Str(s) => f.write_str(s),
        }
    }
}

/// Named overrides applied on top of a type's defaults.
///
/// Built fluently: `Overrides::new().set("size", "32kB").set("assoc", 4u64)`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Overrides {
    entries: Vec<(String, ParamInput)>,
}

impl Overrides {
    /// Creates an empty override set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds (or replaces) an override and returns the set.
    #[must_use]
    pub fn set(mut self, name: impl Into<String>, value: impl Into<ParamInput>) -> Self {
        self.insert(name, value);
        self
    }

    /// Adds an override, replacing any earlier one with the same name.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<ParamInput>) {
        let name = name.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(n, _)| *n == name) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((name, value)),
        }
    }

    /// Returns the override for `name`, if any.
    pub fn get(&self, name: &str) -> Option<&ParamInput> {
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, value)| value)
    }

    /// Iterates overrides in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &ParamInput)> {
        self.entries.iter().map(|(n, v)| (n.as_str(), v))
    }

    /// Returns whether no override is set.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// A fully resolved parameter mapping, in schema order.
///
/// Every parameter of the schema has an entry; optional parameters without a value hold `None`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ResolvedParams {
    entries: Vec<(&'static str, Option<ParamValue>)>,
}

impl ResolvedParams {
    pub(crate) const fn from_entries(entries: Vec<(&'static str, Option<ParamValue>)>) -> Self {
        Self { entries }
    }

    /// Returns the value of `name`, or `None` if unknown or unassigned.
    pub fn get(&self, name: &str) -> Option<&ParamValue> {
        self.entries
            .iter()
            .find(|(n, _)| *n == name)
            .and_then(|(_, value)| value.as_ref())
    }

    /// Returns whether the schema contains `name` (assigned or not).
    pub fn contains(&self, name: &str) -> bool {
        self.entries.iter().any(|(n, _)| *n == name)
    }

    /// Iterates `(name, value)` pairs in schema order.
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, Option<&ParamValue>)> + '_ {
        self.entries.iter().map(|(n, v)| (*n, v.as_ref()))
    }

    /// Iterates the component references held by this mapping.
    pub fn references(&self) -> impl Iterator<Item = (&'static str, ComponentId)> + '_ {
        self.entries
            .iter()
            .filter_map(|(n, v)| v.as_ref().and_then(ParamValue::as_component).map(|id| (*n, id)))
    }

    /// Integer value of `name`.
    pub fn int(&self, name: &str) -> Option<u64> {
        self.get(name).and_then(ParamValue::as_int)
    }

    /// Memory size value of `name`.
    pub fn size(&self, name: &str) -> Option<MemorySize> {
        self.get(name).and_then(ParamValue::as_size)
    }

    /// Bandwidth value of `name`.
    pub fn bandwidth(&self, name: &str) -> Option<MemoryBandwidth> {
        self.get(name).and_then(ParamValue::as_bandwidth)
    }

    /// Latency value of `name`.
    pub fn latency(&self, name: &str) -> Option<Latency> {
        self.get(name).and_then(ParamValue::as_latency)
    }

    /// Address range value of `name`.
    pub fn range(&self, name: &str) -> Option<AddrRange> {
        self.get(name).and_then(ParamValue::as_range)
    }

    /// Referenced component of `name`.
    pub fn component(&self, name: &str) -> Option<ComponentId> {
        self.get(name).and_then(ParamValue::as_component)
    }

    /// Number of schema entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns whether the schema is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
