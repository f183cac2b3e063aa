//! Resource configuration and loader.
//!
//! `pokeslug.toml` names the reference files (relative to the resource root)
//! and the display prefix used for each region's forms. Every key is
//! optional; whatever is missing keeps its built-in default.

use anyhow::{Context, Result};
use indexmap::IndexMap;
use log::{info, warn};
use serde::Deserialize;
use std::fs;
use std::path::Path;

/// Default name of the configuration file inside the resource root.
pub const CONFIG_FILE_NAME: &str = "pokeslug.toml";

/// Reference file locations, relative to the resource root.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ResourceFiles {
    pub pokedex: String,
    pub species_names: String,
    pub regional_forms: String,
    pub general_forms: String,
    pub mega_forms: String,
    pub gigantamax_forms: String,
    pub minor_gender_differences: String,
    pub major_gender_differences: String,
    pub impossible_to_discern: String,
    pub no_shiny_forms: String,
    /// Derived file written by the form map builder.
    pub all_form_display_map: String,
}

impl Default for ResourceFiles {
    fn default() -> Self {
        Self {
            pokedex: "Pokedex/Pokedex-National.json".to_string(),
            species_names: "PokemonNameDisplay.json".to_string(),
            regional_forms: "RegionalForms.json".to_string(),
            general_forms: "GeneralFormDisplayMap.json".to_string(),
            mega_forms: "MegaPokemonList.txt".to_string(),
            gigantamax_forms: "GigantamaxForms.txt".to_string(),
            minor_gender_differences: "MinorGenderDifferenceList.txt".to_string(),
            major_gender_differences: "MajorGenderDifferenceList.txt".to_string(),
            impossible_to_discern: "ImpossibleToDiscernForms.txt".to_string(),
            no_shiny_forms: "SpecialPokemonWithNoShinyForm.txt".to_string(),
            all_form_display_map: "AllFormDisplayMap.json".to_string(),
        }
    }
}

/// Complete resource configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceConfig {
    pub files: ResourceFiles,
    /// Region slug -> adjective prepended to regional form display names.
    pub region_prefixes: IndexMap<String, String>,
}

impl Default for ResourceConfig {
    fn default() -> Self {
        Self {
            files: ResourceFiles::default(),
            region_prefixes: default_region_prefixes(),
        }
    }
}

/// Raw shape of `pokeslug.toml`.
#[derive(Debug, Default, Deserialize)]
struct ConfigFile {
    #[serde(default)]
    files: ResourceFiles,
    #[serde(default)]
    regions: IndexMap<String, String>,
}

/// Built-in region display prefixes.
fn default_region_prefixes() -> IndexMap<String, String> {
    [
        ("alola", "Alolan"),
        ("galar", "Galarian"),
        ("hisui", "Hisuian"),
        ("paldea", "Paldean"),
    ]
    .into_iter()
    .map(|(region, prefix)| (region.to_string(), prefix.to_string()))
    .collect()
}

/// Loads the resource configuration, falling back to defaults on error.
///
/// Region prefixes from the file are merged over the built-in ones, so a
/// config only needs to list new or changed regions.
pub fn load_config(toml_path: &Path) -> ResourceConfig {
    if !toml_path.exists() {
        info!("No config at '{}'; using defaults.", toml_path.display());
        return ResourceConfig::default();
    }
    match try_load_config(toml_path) {
        Ok(config) => {
            info!(
                "Config loaded from '{}' ({} region prefixes)",
                toml_path.display(),
                config.region_prefixes.len()
            );
            config
        },
        Err(e) => {
            warn!(
                "Could not load config from '{}': {e:#}. Using defaults.",
                toml_path.display()
            );
            ResourceConfig::default()
        },
    }
}

fn try_load_config(toml_path: &Path) -> Result<ResourceConfig> {
    let text =
        fs::read_to_string(toml_path).with_context(|| format!("reading config from '{}'", toml_path.display()))?;
    parse_config(&text).with_context(|| format!("parsing config from '{}'", toml_path.display()))
}

fn parse_config(text: &str) -> Result<ResourceConfig> {
    let file: ConfigFile = toml::from_str(text)?;
    let mut region_prefixes = default_region_prefixes();
    region_prefixes.extend(file.regions);
    Ok(ResourceConfig {
        files: file.files,
        region_prefixes,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_cover_known_regions() {
        let config = ResourceConfig::default();
        assert_eq!(config.region_prefixes.get("alola").map(String::as_str), Some("Alolan"));
        assert_eq!(config.region_prefixes.get("paldea").map(String::as_str), Some("Paldean"));
        assert_eq!(config.region_prefixes.get("kanto").map(String::as_str), None);
        assert_eq!(config.files.pokedex, "Pokedex/Pokedex-National.json");
    }

    #[test]
    fn partial_file_keeps_defaults() {
        let config = parse_config(
            r#"
[files]
mega_forms = "Lists/Mega.txt"

[regions]
kitakami = "Kitakamian"
galar = "Galar"
"#,
        )
        .unwrap();
        assert_eq!(config.files.mega_forms, "Lists/Mega.txt");
        assert_eq!(config.files.gigantamax_forms, "GigantamaxForms.txt");
        assert_eq!(config.region_prefixes.get("kitakami").map(String::as_str), Some("Kitakamian"));
        assert_eq!(config.region_prefixes.get("galar").map(String::as_str), Some("Galar"));
        assert_eq!(config.region_prefixes.get("hisui").map(String::as_str), Some("Hisuian"));
    }

    #[test]
    fn empty_file_is_default() {
        assert_eq!(parse_config("").unwrap(), ResourceConfig::default());
    }

    #[test]
    fn bad_file_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);
        fs::write(&path, "[files\nbroken").unwrap();
        assert_eq!(load_config(&path), ResourceConfig::default());
        assert_eq!(load_config(&dir.path().join("absent.toml")), ResourceConfig::default());
    }
}
