//! JSON reference files: national dex, species display names, regional
//! forms and form display maps.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result, anyhow};
use indexmap::IndexMap;
use log::info;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::ser::{PrettyFormatter, Serializer};

use pokeslug_data::{ENGLISH, FormDisplayMap, NameDisplayFile, RegionalForms, Slug};

fn read_json<T: DeserializeOwned>(path: &Path, what: &str) -> Result<T> {
    let bytes = fs::read(path).with_context(|| format!("reading {what} from '{}'", path.display()))?;
    serde_json::from_slice(&bytes).with_context(|| format!("parsing {what} JSON from '{}'", path.display()))
}

/// Load the national dex: a JSON array of species slugs in dex order.
pub fn load_pokedex(path: &Path) -> Result<Vec<Slug>> {
    let pokedex: Vec<Slug> = read_json(path, "national dex")?;
    info!("{} species loaded from '{}'", pokedex.len(), path.display());
    Ok(pokedex)
}

/// Load `PokemonNameDisplay.json` and keep only the English names.
pub fn load_species_names(path: &Path) -> Result<IndexMap<Slug, String>> {
    let file: NameDisplayFile = read_json(path, "species display names")?;
    let names = english_names(file)?;
    info!("{} species display names loaded from '{}'", names.len(), path.display());
    Ok(names)
}

fn english_names(file: NameDisplayFile) -> Result<IndexMap<Slug, String>> {
    file.into_iter()
        .map(|(slug, mut names)| -> Result<(Slug, String)> {
            let english = names
                .remove(ENGLISH)
                .ok_or_else(|| anyhow!("species '{slug}' has no '{ENGLISH}' display name"))?;
            Ok((slug, english))
        })
        .collect()
}

pub fn load_regional_forms(path: &Path) -> Result<RegionalForms> {
    let regions: RegionalForms = read_json(path, "regional forms")?;
    info!(
        "{} regions with {} regional species loaded from '{}'",
        regions.len(),
        regions.values().map(Vec::len).sum::<usize>(),
        path.display()
    );
    Ok(regions)
}

/// Load a species/base -> `[slug, display]` list map (general forms or the
/// full form map).
pub fn load_form_display_map(path: &Path) -> Result<FormDisplayMap> {
    let map: FormDisplayMap = read_json(path, "form display map")?;
    info!(
        "{} entries with {} forms loaded from '{}'",
        map.len(),
        map.values().map(Vec::len).sum::<usize>(),
        path.display()
    );
    Ok(map)
}

/// Render a value as JSON with four-space indentation and a trailing newline.
pub fn to_pretty_json<T: Serialize>(value: &T) -> Result<String> {
    let mut out = Vec::new();
    let mut serializer = Serializer::with_formatter(&mut out, PrettyFormatter::with_indent(b"    "));
    value.serialize(&mut serializer).context("serializing JSON")?;
    out.push(b'\n');
    String::from_utf8(out).context("serialized JSON is not UTF-8")
}

pub fn write_pretty_json<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    let text = to_pretty_json(value)?;
    fs::write(path, text).with_context(|| format!("writing JSON to '{}'", path.display()))?;
    info!("JSON written to '{}'", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pokeslug_data::FormDisplay;

    #[test]
    fn english_names_require_eng_key() {
        let file: NameDisplayFile = serde_json::from_str(
            r#"{"nidoran-f": {"eng": "Nidoran♀", "jpn": "ニドラン♀"}, "pikachu": {"eng": "Pikachu"}}"#,
        )
        .unwrap();
        let names = english_names(file).unwrap();
        assert_eq!(names.get("nidoran-f").map(String::as_str), Some("Nidoran♀"));
        assert_eq!(names.get_index(1).map(|(k, _)| k.as_str()), Some("pikachu"));

        let missing: NameDisplayFile = serde_json::from_str(r#"{"pikachu": {"jpn": "ピカチュウ"}}"#).unwrap();
        assert!(english_names(missing).is_err());
    }

    #[test]
    fn pretty_json_uses_four_spaces_and_keeps_unicode() {
        let mut map = FormDisplayMap::new();
        map.insert(
            "nidoran-f".into(),
            vec![FormDisplay::new("nidoran-f", "Nidoran♀")],
        );
        let text = to_pretty_json(&map).unwrap();
        assert_eq!(
            text,
            "{\n    \"nidoran-f\": [\n        [\n            \"nidoran-f\",\n            \"Nidoran♀\"\n        ]\n    ]\n}\n"
        );
    }

    #[test]
    fn form_map_round_trips_through_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("AllFormDisplayMap.json");
        let mut map = FormDisplayMap::new();
        map.insert(
            "rattata".into(),
            vec![
                FormDisplay::new("rattata", "Rattata"),
                FormDisplay::new("rattata-alola", "Alolan Rattata"),
            ],
        );
        write_pretty_json(&path, &map).unwrap();
        assert_eq!(load_form_display_map(&path).unwrap(), map);
    }

    #[test]
    fn unreadable_files_carry_the_path() {
        let err = load_pokedex(Path::new("/nonexistent/Pokedex-National.json")).unwrap_err();
        assert!(format!("{err:#}").contains("Pokedex-National.json"));
    }
}
