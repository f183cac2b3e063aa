//! In-memory lookup over the reference data and the built form map.

use std::collections::HashMap;

use pokeslug_data::{FormDisplay, FormDisplayMap, ReferenceData, Slug};

use crate::slug::sanitize_slug;

/// What the catalogue knows about one slug.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlugInfo {
    pub slug: Slug,
    pub species: Slug,
    pub dex_number: usize,
    pub display: String,
    pub is_species: bool,
    /// Regions in which the species has a variant.
    pub regions: Vec<Slug>,
}

/// Species whose published slug is not what the sanitizer derives from its
/// English name. Published slugs never change, so this is informational.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NameDrift {
    pub slug: Slug,
    pub name: String,
    pub derived: Slug,
}

#[derive(Debug, Clone)]
pub struct SlugCatalog<'a> {
    data: &'a ReferenceData,
    forms: &'a FormDisplayMap,
    form_owner: HashMap<&'a str, (&'a str, &'a str)>,
}

impl<'a> SlugCatalog<'a> {
    pub fn new(data: &'a ReferenceData, forms: &'a FormDisplayMap) -> Self {
        let mut form_owner = HashMap::new();
        for (species, list) in forms {
            for form in list {
                form_owner.insert(form.slug.as_str(), (species.as_str(), form.display.as_str()));
            }
        }
        Self {
            data,
            forms,
            form_owner,
        }
    }

    /// Species a species or form slug belongs to.
    pub fn species_of(&self, slug: &str) -> Option<&'a str> {
        if let Some((species, _)) = self.form_owner.get(slug) {
            return Some(*species);
        }
        self.data
            .pokedex
            .iter()
            .find(|species| *species == slug)
            .map(String::as_str)
    }

    pub fn display_name(&self, slug: &str) -> Option<&'a str> {
        if let Some((_, display)) = self.form_owner.get(slug) {
            return Some(*display);
        }
        self.data.species_names.get(slug).map(String::as_str)
    }

    pub fn dex_number(&self, slug: &str) -> Option<usize> {
        self.data.dex_number(self.species_of(slug)?)
    }

    /// Forms of a species; a species without distinct forms is its own only form.
    pub fn forms_of(&self, species: &str) -> Vec<FormDisplay> {
        if let Some(list) = self.forms.get(species) {
            return list.clone();
        }
        match self.data.english_name(species) {
            Some(name) if self.data.is_species(species) => vec![FormDisplay::new(species, name)],
            _ => Vec::new(),
        }
    }

    pub fn regions_of(&self, species: &str) -> Vec<Slug> {
        self.data
            .regional_forms
            .iter()
            .filter(|(_, members)| members.iter().any(|m| m == species))
            .map(|(region, _)| region.clone())
            .collect()
    }

    pub fn lookup(&self, slug: &str) -> Option<SlugInfo> {
        let species = self.species_of(slug)?;
        Some(SlugInfo {
            slug: slug.to_string(),
            species: species.to_string(),
            dex_number: self.data.dex_number(species)?,
            display: self.display_name(slug)?.to_string(),
            is_species: slug == species,
            regions: self.regions_of(species),
        })
    }

    /// Species whose slug differs from the sanitized English name.
    pub fn name_drift(&self) -> Vec<NameDrift> {
        self.data
            .pokedex
            .iter()
            .filter_map(|slug| {
                let name = self.data.english_name(slug)?;
                let derived = sanitize_slug(name);
                (derived != *slug).then(|| NameDrift {
                    slug: slug.clone(),
                    name: name.to_string(),
                    derived,
                })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fixture() -> (ReferenceData, FormDisplayMap) {
        let mut data = ReferenceData {
            pokedex: vec!["rattata".into(), "farfetchd".into(), "mime-jr".into()],
            ..ReferenceData::default()
        };
        for (slug, name) in [("rattata", "Rattata"), ("farfetchd", "Farfetch'd"), ("mime-jr", "Mime Jr.")] {
            data.species_names.insert(slug.into(), name.into());
        }
        data.regional_forms.insert("alola".into(), vec!["rattata".into()]);
        data.regional_forms.insert("galar".into(), vec!["farfetchd".into()]);
        let mut forms = FormDisplayMap::new();
        forms.insert(
            "rattata".into(),
            vec![
                FormDisplay::new("rattata", "Rattata"),
                FormDisplay::new("rattata-alola", "Alolan Rattata"),
            ],
        );
        (data, forms)
    }

    #[test]
    fn lookups_cover_species_and_forms() {
        let (data, forms) = fixture();
        let catalog = SlugCatalog::new(&data, &forms);

        assert_eq!(catalog.species_of("rattata-alola"), Some("rattata"));
        assert_eq!(catalog.display_name("rattata-alola"), Some("Alolan Rattata"));
        assert_eq!(catalog.dex_number("mime-jr"), Some(3));
        assert_eq!(catalog.regions_of("rattata"), ["alola"]);
        assert_eq!(catalog.forms_of("mime-jr"), vec![FormDisplay::new("mime-jr", "Mime Jr.")]);
        assert!(catalog.forms_of("missingno").is_empty());
        assert_eq!(catalog.species_of("rattata-galar"), None);

        let info = catalog.lookup("rattata-alola").unwrap();
        assert_eq!(info.dex_number, 1);
        assert!(!info.is_species);
        assert!(catalog.lookup("farfetchd").unwrap().is_species);
    }

    #[test]
    fn name_drift_flags_legacy_slugs() {
        let (data, forms) = fixture();
        let catalog = SlugCatalog::new(&data, &forms);
        assert_eq!(
            catalog.name_drift(),
            vec![NameDrift {
                slug: "farfetchd".into(),
                name: "Farfetch'd".into(),
                derived: "farfetch-d".into(),
            }]
        );
    }
}
