/// Resolution of overrides and defaults against the catalog schemas.
pub mod resolve;
