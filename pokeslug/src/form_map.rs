//! Builder for `AllFormDisplayMap.json`.
//!
//! Every species with visually distinct forms gets an ordered list of
//! `(form slug, display name)` pairs assembled from the curated reference
//! files. Categories are applied in a fixed sequence: regional, general,
//! mega, gigantamax, gender. Later steps build on earlier ones: a general
//! form may have its own Gigantamax form (`urshifu-rapid-strike-gmax`), and
//! a regional form may be split by gender (`sneasel-hisui-male`).

use std::collections::{HashMap, HashSet};

use indexmap::IndexMap;
use log::{debug, info};
use thiserror::Error;

use pokeslug_data::{FormDisplay, FormDisplayMap, Gender, ReferenceData, Slug};

use crate::slug::{GIGANTAMAX_SUFFIX, MEGA_SUFFIX};

/// Errors raised while assembling the form display map.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormMapError {
    #[error("'{slug}' is not a species in the national dex ({context})")]
    UnknownSpecies { slug: Slug, context: String },
    #[error("no display prefix configured for region '{0}'")]
    UnknownRegion(Slug),
    #[error("form '{0}' does not belong to any species in the form map")]
    FormNotFound(Slug),
    #[error("form '{base}' is not listed under species '{species}'")]
    BaseNotListed { base: Slug, species: Slug },
    #[error("mega form '{0}' must end in '-mega' or '-mega-<variant>'")]
    MalformedMega(Slug),
    #[error("gigantamax form '{0}' must end in '-gmax'")]
    MalformedGigantamax(Slug),
    #[error("no display name for '{0}'")]
    MissingDisplayName(Slug),
    #[error("form '{form}' appears more than once ({context})")]
    DuplicateForm { form: Slug, context: String },
}

/// Incrementally assembles the species -> forms map and a display name for
/// every slug it mentions.
pub struct FormMapBuilder<'a> {
    data: &'a ReferenceData,
    region_prefixes: &'a IndexMap<String, String>,
    forms: IndexMap<Slug, Vec<Slug>>,
    display: HashMap<Slug, String>,
}

impl<'a> FormMapBuilder<'a> {
    pub fn new(data: &'a ReferenceData, region_prefixes: &'a IndexMap<String, String>) -> Self {
        let display = data
            .pokedex
            .iter()
            .filter_map(|species| Some((species.clone(), data.english_name(species)?.to_string())))
            .collect();
        Self {
            data,
            region_prefixes,
            forms: IndexMap::new(),
            display,
        }
    }

    /// Run every step in order and produce the checked map.
    ///
    /// # Errors
    /// Returns the first `FormMapError` encountered.
    pub fn build(mut self) -> Result<FormDisplayMap, FormMapError> {
        self.add_regional_forms()?;
        self.add_general_forms()?;
        self.add_mega_forms()?;
        self.add_gigantamax_forms()?;
        self.add_gender_forms()?;
        let map = self.finish()?;
        info!(
            "Form map built: {} species with distinct forms, {} forms total",
            map.len(),
            map.values().map(Vec::len).sum::<usize>()
        );
        Ok(map)
    }

    fn add_regional_forms(&mut self) -> Result<(), FormMapError> {
        let data = self.data;
        for (region, members) in &data.regional_forms {
            let prefix = self
                .region_prefixes
                .get(region)
                .ok_or_else(|| FormMapError::UnknownRegion(region.clone()))?
                .clone();
            for species in members {
                let name = self.species_name(species, "regional forms")?;
                let slug = format!("{species}-{region}");
                self.display.insert(slug.clone(), format!("{prefix} {name}"));
                self.add_forms_from_base(species, vec![slug])?;
            }
            debug!("regional forms added for region '{region}' ({} species)", members.len());
        }
        Ok(())
    }

    fn add_general_forms(&mut self) -> Result<(), FormMapError> {
        let data = self.data;
        for (base, forms) in &data.general_forms {
            for form in forms {
                self.display.insert(form.slug.clone(), form.display.clone());
            }
            self.replace_form(base, forms.iter().map(|form| form.slug.clone()).collect())?;
        }
        debug!("general forms added for {} bases", data.general_forms.len());
        Ok(())
    }

    fn add_mega_forms(&mut self) -> Result<(), FormMapError> {
        let data = self.data;
        for mega in &data.mega_forms {
            let (species, variant) = split_mega_slug(mega).ok_or_else(|| FormMapError::MalformedMega(mega.clone()))?;
            let name = self.species_name(species, "mega list")?;
            let display = match variant {
                Some(variant) => format!("Mega {name} {}", variant.to_uppercase()),
                None => format!("Mega {name}"),
            };
            self.display.insert(mega.clone(), display);
            self.add_forms_from_base(species, vec![mega.clone()])?;
        }
        debug!("{} mega forms added", data.mega_forms.len());
        Ok(())
    }

    fn add_gigantamax_forms(&mut self) -> Result<(), FormMapError> {
        let data = self.data;
        for gmax in &data.gigantamax_forms {
            let base = gmax
                .strip_suffix(GIGANTAMAX_SUFFIX)
                .and_then(|rest| rest.strip_suffix('-'))
                .filter(|base| !base.is_empty())
                .ok_or_else(|| FormMapError::MalformedGigantamax(gmax.clone()))?;
            let display = format!("Gigantamax {}", self.display_of(base)?);
            self.display.insert(gmax.clone(), display);
            self.add_forms_from_base(base, vec![gmax.clone()])?;
        }
        debug!("{} gigantamax forms added", data.gigantamax_forms.len());
        Ok(())
    }

    fn add_gender_forms(&mut self) -> Result<(), FormMapError> {
        let data = self.data;
        for base in data.gender_differences() {
            let base_display = self.display_of(base)?.to_string();
            let mut gendered = Vec::with_capacity(2);
            for gender in [Gender::Male, Gender::Female] {
                let slug = format!("{base}-{}", gender.suffix());
                self.display
                    .insert(slug.clone(), format!("{} {base_display}", gender.display_prefix()));
                gendered.push(slug);
            }
            self.replace_form(base, gendered)?;
        }
        debug!("gender forms added for {} bases", data.gender_differences().count());
        Ok(())
    }

    fn species_name(&self, species: &str, context: &str) -> Result<String, FormMapError> {
        self.data
            .english_name(species)
            .filter(|_| self.data.is_species(species))
            .map(str::to_string)
            .ok_or_else(|| FormMapError::UnknownSpecies {
                slug: species.to_string(),
                context: context.to_string(),
            })
    }

    fn display_of(&self, slug: &str) -> Result<&str, FormMapError> {
        self.display
            .get(slug)
            .map(String::as_str)
            .ok_or_else(|| FormMapError::MissingDisplayName(slug.to_string()))
    }

    /// Species whose form list already contains `form`.
    fn owning_species(&self, form: &str) -> Option<Slug> {
        self.forms
            .iter()
            .find(|(_, forms)| forms.iter().any(|f| f == form))
            .map(|(species, _)| species.clone())
    }

    /// Add forms next to `base`, which is either a species or a form already
    /// in the map. A species seen for the first time keeps itself as its
    /// first form.
    fn add_forms_from_base(&mut self, base: &str, new_forms: Vec<Slug>) -> Result<(), FormMapError> {
        let species = if self.data.is_species(base) {
            base.to_string()
        } else {
            self.owning_species(base)
                .ok_or_else(|| FormMapError::FormNotFound(base.to_string()))?
        };
        let list = self.forms.entry(species).or_insert_with(|| vec![base.to_string()]);
        for form in new_forms {
            if !list.contains(&form) {
                list.push(form);
            }
        }
        Ok(())
    }

    /// Replace `base` in its species' list with `new_forms`, in place. A
    /// species without an entry yet gets exactly `new_forms`.
    fn replace_form(&mut self, base: &str, new_forms: Vec<Slug>) -> Result<(), FormMapError> {
        let species = if self.data.is_species(base) {
            base.to_string()
        } else {
            self.owning_species(base)
                .ok_or_else(|| FormMapError::FormNotFound(base.to_string()))?
        };
        match self.forms.get_mut(&species) {
            None => {
                self.forms.insert(species, new_forms);
            },
            Some(list) => {
                let idx = list
                    .iter()
                    .position(|form| form == base)
                    .ok_or_else(|| FormMapError::BaseNotListed {
                        base: base.to_string(),
                        species: species.clone(),
                    })?;
                list.splice(idx..=idx, new_forms);
            },
        }
        Ok(())
    }

    /// Check uniqueness and display coverage, then pair slugs with names.
    fn finish(self) -> Result<FormDisplayMap, FormMapError> {
        let mut all_forms = HashSet::new();
        let mut map = FormDisplayMap::with_capacity(self.forms.len());
        for (species, forms) in self.forms {
            if !self.data.is_species(&species) {
                return Err(FormMapError::UnknownSpecies {
                    slug: species,
                    context: "form map key".to_string(),
                });
            }
            let mut in_species = HashSet::new();
            let mut entries = Vec::with_capacity(forms.len());
            for form in forms {
                if !in_species.insert(form.clone()) {
                    return Err(FormMapError::DuplicateForm {
                        form,
                        context: format!("species '{species}'"),
                    });
                }
                if !all_forms.insert(form.clone()) {
                    return Err(FormMapError::DuplicateForm {
                        form,
                        context: "across species".to_string(),
                    });
                }
                let display = self
                    .display
                    .get(&form)
                    .cloned()
                    .ok_or_else(|| FormMapError::MissingDisplayName(form.clone()))?;
                entries.push(FormDisplay { slug: form, display });
            }
            map.insert(species, entries);
        }
        Ok(map)
    }
}

/// Split a mega slug into its species and optional variant
/// (`charizard-mega-x` -> `("charizard", Some("x"))`).
pub fn split_mega_slug(slug: &str) -> Option<(&str, Option<&str>)> {
    let mega_tail = format!("-{MEGA_SUFFIX}");
    if let Some(species) = slug.strip_suffix(mega_tail.as_str()) {
        return (!species.is_empty()).then_some((species, None));
    }
    let (head, variant) = slug.rsplit_once('-')?;
    let species = head.strip_suffix(mega_tail.as_str())?;
    (!species.is_empty() && !variant.is_empty()).then_some((species, Some(variant)))
}

/// Build the full form display map from validated reference data.
///
/// # Errors
/// Returns a `FormMapError` when the reference files contradict each other.
pub fn build_form_display_map(
    data: &ReferenceData,
    region_prefixes: &IndexMap<String, String>,
) -> Result<FormDisplayMap, FormMapError> {
    FormMapBuilder::new(data, region_prefixes).build()
}

/// Per-species differences between a form map on disk and a rebuilt one.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormMapDiff {
    pub added: Vec<Slug>,
    pub removed: Vec<Slug>,
    pub changed: Vec<Slug>,
}

impl FormMapDiff {
    pub fn is_empty(&self) -> bool {
        self.added.is_empty() && self.removed.is_empty() && self.changed.is_empty()
    }
}

/// Compare the species entries of `current` against `rebuilt`.
pub fn diff_form_maps(current: &FormDisplayMap, rebuilt: &FormDisplayMap) -> FormMapDiff {
    let mut diff = FormMapDiff::default();
    for (species, forms) in rebuilt {
        match current.get(species) {
            None => diff.added.push(species.clone()),
            Some(existing) if existing != forms => diff.changed.push(species.clone()),
            Some(_) => {},
        }
    }
    diff.removed = current
        .keys()
        .filter(|species| !rebuilt.contains_key(*species))
        .cloned()
        .collect();
    diff
}
