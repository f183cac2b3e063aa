//! Shared data model for Pokémon slug reference files.

pub mod defs;
pub mod validate;

pub use defs::*;
pub use validate::{ValidationError, is_valid_slug, validate_reference};
