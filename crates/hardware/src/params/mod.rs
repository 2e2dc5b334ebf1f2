//! Parameter schema system.
//!
//! Component types declare an ordered table of typed, described, defaultable parameters.
//! This module provides:
//! 1. **Declarations:** `ParamSpec`, `ParamKind` (semantic type) and `ParamDefault`.
//! 2. **Values:** `ParamInput` supplied by configuration code, `ParamValue` after resolution.
//! 3. **Resolution:** Pure conversion of overrides + defaults into a `ResolvedParams` mapping.

/// Resolution of overrides against a schema.
pub mod resolve;

/// Parameter declarations.
pub mod spec;

/// Inputs, resolved values and override sets.
pub mod value;

pub use resolve::{ResolveContext, TypeLookup};
pub use spec::{ParamDefault, ParamKind, ParamSpec};
pub use value::{Overrides, ParamInput, ParamValue, ResolvedParams};
