//! Loader utilities for building `ReferenceData` from the resource files.
//!
//! Species data and form maps are JSON, the curated form lists are plain
//! text, and the file layout itself comes from `pokeslug.toml`.

pub mod config;
pub mod json;
pub mod lists;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use log::info;

use crate::loader::config::{CONFIG_FILE_NAME, ResourceConfig, load_config};
use crate::loader::json::{load_form_display_map, load_pokedex, load_regional_forms, load_species_names};
use crate::loader::lists::{load_optional_slug_groups, load_optional_slug_list, load_slug_list};
use pokeslug_data::ReferenceData;

/// A resource root together with its configuration and loaded data.
#[derive(Debug, Clone)]
pub struct Resources {
    pub root: PathBuf,
    pub config: ResourceConfig,
    pub data: ReferenceData,
}

impl Resources {
    /// Path of a configured file relative to the resource root.
    pub fn path(&self, relative: &str) -> PathBuf {
        self.root.join(relative)
    }
}

/// Load configuration and validated reference data from a resource root.
///
/// The config is read from `config_path` when given, else from
/// `pokeslug.toml` inside the root.
///
/// # Errors
/// Errors bubble up from file IO, deserialization, or validation failures.
pub fn load_resources(root: &Path, config_path: Option<&Path>) -> Result<Resources> {
    let config = load_config(&config_path.map_or_else(|| root.join(CONFIG_FILE_NAME), Path::to_path_buf));
    let data = load_reference_data(root, &config)?;
    Ok(Resources {
        root: root.to_path_buf(),
        config,
        data,
    })
}

/// Read every reference file and validate the result.
///
/// # Errors
/// Errors bubble up from file IO, deserialization, or validation failures.
pub fn load_reference_data(root: &Path, config: &ResourceConfig) -> Result<ReferenceData> {
    let data = read_reference_data(root, config)?;
    validate_reference_data(&data)?;
    Ok(data)
}

/// Read every reference file without cross-checking them.
///
/// # Errors
/// Errors bubble up from file IO or deserialization.
pub fn read_reference_data(root: &Path, config: &ResourceConfig) -> Result<ReferenceData> {
    let files = &config.files;
    let path = |relative: &str| root.join(relative);

    let data = ReferenceData {
        pokedex: load_pokedex(&path(&files.pokedex)).context("while loading national dex")?,
        species_names: load_species_names(&path(&files.species_names)).context("while loading species names")?,
        regional_forms: load_regional_forms(&path(&files.regional_forms)).context("while loading regional forms")?,
        general_forms: load_form_display_map(&path(&files.general_forms)).context("while loading general forms")?,
        mega_forms: load_slug_list(&path(&files.mega_forms)).context("while loading mega list")?,
        gigantamax_forms: load_slug_list(&path(&files.gigantamax_forms)).context("while loading gigantamax list")?,
        minor_gender_differences: load_slug_list(&path(&files.minor_gender_differences))
            .context("while loading minor gender differences")?,
        major_gender_differences: load_slug_list(&path(&files.major_gender_differences))
            .context("while loading major gender differences")?,
        impossible_to_discern: load_optional_slug_groups(&path(&files.impossible_to_discern))
            .context("while loading impossible-to-discern groups")?,
        no_shiny_forms: load_optional_slug_list(&path(&files.no_shiny_forms))
            .context("while loading no-shiny list")?,
    };

    info!(
        "Reference data loaded from '{}': {} species, {} mega, {} gigantamax, {} gender differences",
        root.display(),
        data.pokedex.len(),
        data.mega_forms.len(),
        data.gigantamax_forms.len(),
        data.gender_differences().count()
    );
    Ok(data)
}

/// Validate the reference data and return a single aggregated error.
fn validate_reference_data(data: &ReferenceData) -> Result<()> {
    let errors = pokeslug_data::validate_reference(data);
    if errors.is_empty() {
        return Ok(());
    }
    let details = errors
        .into_iter()
        .map(|err| format!("- {err}"))
        .collect::<Vec<_>>()
        .join("\n");
    bail!("reference data validation failed:\n{details}");
}
