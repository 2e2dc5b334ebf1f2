//! Parameter resolution.
//!
//! Resolution turns a component type's schema plus a set of overrides into a complete,
//! typed parameter mapping. It is pure: it reads the clock domain and the types of
//! referenced components, and never touches ports or connections.

use std::fmt;

use super::spec::{ParamDefault, ParamKind, ParamSpec};
use super::value::{Overrides, ParamInput, ParamValue, ResolvedParams};
use crate::common::units::parse_count;
use crate::common::{
    AddrRange, ClockDomain, Latency, MemoryBandwidth, MemorySize, TopologyError, UnitError,
};
use crate::component::{ComponentId, ComponentType};

/// Answers "what type is component `id`?" for reference type checks.
pub trait TypeLookup {
    /// Returns the type of `id`, or `None` if no such component exists.
    fn type_of(&self, id: ComponentId) -> Option<&'static ComponentType>;
}

impl<F> TypeLookup for F
where
    F: Fn(ComponentId) -> Option<&'static ComponentType>,
{
    fn type_of(&self, id: ComponentId) -> Option<&'static ComponentType> {
        self(id)
    }
}

/// Everything resolution needs besides the schema and the overrides.
pub struct ResolveContext<'a> {
    /// Path of the component being resolved, used in every diagnostic.
    pub component: &'a str,
    /// Clock domain that gives cycle counts their length.
    pub clock: &'a ClockDomain,
    /// Type oracle for `ComponentReference` parameters.
    pub types: &'a dyn TypeLookup,
}

impl fmt::Debug for ResolveContext<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResolveContext")
            .field("component", &self.component)
            .field("clock", &self.clock)
            .finish_non_exhaustive()
    }
}

impl ResolveContext<'_> {
    /// Resolves every parameter of `ty` against `overrides`.
    ///
    /// For each parameter in schema order: an override is type-checked and used; otherwise
    /// the textual default is parsed; otherwise a required parameter fails with
    /// `MissingRequiredParameter` and an optional one stays unassigned. Override names absent
    /// from the schema fail with `UnknownParameter` before anything is parsed.
    ///
    /// # Arguments
    ///
    /// * `ty` - The component type whose merged schema is resolved.
    /// * `overrides` - Values supplied by configuration code.
    ///
    /// # Returns
    ///
    /// The resolved mapping, or the first violation encountered.
    pub fn resolve(
        &self,
        ty: &'static ComponentType,
        overrides: &Overrides,
    ) -> Result<ResolvedParams, TopologyError> {
        let schema = ty.schema();

        if let Some((name, _)) = overrides
            .iter()
            .find(|(name, _)| !schema.iter().any(|spec| spec.name == *name))
        {
            return Err(TopologyError::UnknownParameter {
                component: self.component.to_string(),
                param: name.to_string(),
                type_name: ty.name,
            });
        }

        let mut entries = Vec::with_capacity(schema.len());
        for spec in schema {
            let value = match (overrides.get(spec.name), spec.default) {
                (Some(input), _) => Some(self.convert(spec, input)?),
                (None, ParamDefault::Value(text)) => {
                    Some(self.convert(spec, &ParamInput::Text(text.to_string()))?)
                }
                (None, ParamDefault::Unset) => None,
                (None, ParamDefault::Required) => {
                    return Err(TopologyError::MissingRequiredParameter {
                        component: self.component.to_string(),
                        param: spec.name.to_string(),
                    });
                }
            };
            entries.push((spec.name, value));
        }
        Ok(ResolvedParams::from_entries(entries))
    }

    /// Checks one input against one parameter declaration and converts it to canonical form.
    pub fn convert(
        &self,
        spec: &ParamSpec,
        input: &ParamInput,
    ) -> Result<ParamValue, TopologyError> {
        match (spec.kind, input) {
            (ParamKind::Integer, ParamInput::Int(n)) => Ok(ParamValue::Int(*n)),
            (ParamKind::Integer, ParamInput::Text(text)) => parse_count(text)
                .map(ParamValue::Int)
                .map_err(|e| self.malformed(spec, text, e)),

            (ParamKind::Latency, ParamInput::Int(cycles)) => {
                Latency::from_cycles(*cycles, self.clock)
                    .map(ParamValue::Latency)
                    .map_err(|e| self.malformed(spec, &cycles.to_string(), e))
            }
            (ParamKind::Latency, ParamInput::Text(text)) => Latency::parse(text, self.clock)
                .map(ParamValue::Latency)
                .map_err(|e| self.malformed(spec, text, e)),

            (ParamKind::MemorySize, ParamInput::Size(size)) => Ok(ParamValue::Size(*size)),
            (ParamKind::MemorySize, ParamInput::Int(bytes)) => {
                Ok(ParamValue::Size(MemorySize::from_bytes(*bytes)))
            }
            (ParamKind::MemorySize, ParamInput::Text(text)) => MemorySize::parse(text)
                .map(ParamValue::Size)
                .map_err(|e| self.malformed(spec, text, e)),

            (ParamKind::MemoryBandwidth, ParamInput::Text(text)) => MemoryBandwidth::parse(text)
                .map(ParamValue::Bandwidth)
                .map_err(|e| self.malformed(spec, text, e)),

            (ParamKind::AddrRange, ParamInput::Range(range)) => Ok(ParamValue::Range(*range)),
            (ParamKind::AddrRange, ParamInput::Size(size)) => {
                Ok(ParamValue::Range(AddrRange::with_size(*size)))
            }
            (ParamKind::AddrRange, ParamInput::Text(text)) => AddrRange::parse(text)
                .map(ParamValue::Range)
                .map_err(|e| self.malformed(spec, text, e)),

            (ParamKind::Reference(expected), ParamInput::Component(id)) => {
                let found = self
                    .types
                    .type_of(*id)
                    .ok_or_else(|| TopologyError::UnknownComponent(id.to_string()))?;
                if found.is_a(expected) {
                    Ok(ParamValue::Component(*id))
                } else {
                    Err(TopologyError::TypeMismatch {
                        component: self.component.to_string(),
                        param: spec.name.to_string(),
                        expected: spec.kind.type_name(),
                        found: found.name.to_string(),
                    })
                }
            }

            (ParamKind::String, ParamInput::Text(text)) => Ok(ParamValue::Str(text.clone())),

            (kind, other) => Err(TopologyError::TypeMismatch {
                component: self.component.to_string(),
                param: spec.name.to_string(),
                expected: kind.type_name(),
                found: other.describe(),
            }),
        }
    }

    fn malformed(&self, spec: &ParamSpec, value: &str, source: UnitError) -> TopologyError {
        TopologyError::MalformedUnitValue {
            component: self.component.to_string(),
            param: spec.name.to_string(),
            value: value.to_string(),
            source,
        }
    }
}
