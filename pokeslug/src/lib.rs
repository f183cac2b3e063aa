#![warn(clippy::pedantic)]
#![allow(clippy::must_use_candidate)]

pub const POKESLUG_VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod catalog;
pub mod cli;
pub mod data_paths;
pub mod form_map;
pub mod loader;
pub mod shiny;
pub mod slug;

// Re-exports for convenience
pub use catalog::SlugCatalog;
pub use form_map::{FormMapError, build_form_display_map};
pub use loader::{Resources, load_resources};
pub use shiny::build_shiny_catalogue;
pub use slug::{sanitize_slug, slug_for};
