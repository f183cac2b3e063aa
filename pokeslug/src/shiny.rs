//! Shiny form catalogue.
//!
//! Shiny is orthogonal to the other form categories, so in general every
//! form has a `-shiny` twin. Two curated lists adjust that: forms on the
//! no-shiny list have no twin, and forms in one impossible-to-discern group
//! share a single shiny slug named after the group's first member.

use std::collections::{HashMap, HashSet};

use log::{debug, info};
use thiserror::Error;

use pokeslug_data::{FormDisplay, FormDisplayMap, ReferenceData, Slug};

use crate::slug::{is_shiny_slug, shiny_slug};

/// Curated shiny lists that disagree with the form map.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ShinyError {
    #[error("'{slug}' in the {list} is not a form of any species")]
    UnknownForm { slug: Slug, list: &'static str },
    #[error("no display name for '{0}'")]
    MissingDisplayName(Slug),
}

/// Maps each member of an impossible-to-discern group to the group's first slug.
#[derive(Debug, Clone, Default)]
pub struct DiscernGroups {
    representative: HashMap<Slug, Slug>,
}

impl DiscernGroups {
    pub fn new(groups: &[Vec<Slug>]) -> Self {
        let mut representative = HashMap::new();
        for group in groups {
            let Some(first) = group.first() else { continue };
            for member in group {
                representative.entry(member.clone()).or_insert_with(|| first.clone());
            }
        }
        Self { representative }
    }

    /// Slug that stands for `form` when it cannot be told apart from others.
    pub fn representative<'s>(&'s self, form: &'s str) -> &'s str {
        self.representative.get(form).map_or(form, String::as_str)
    }
}

/// Every form in national dex order with its display name. Species without
/// an entry in `forms` are their own only form.
fn listed_forms<'a>(data: &'a ReferenceData, forms: &'a FormDisplayMap) -> Result<Vec<(&'a str, &'a str)>, ShinyError> {
    let mut listed = Vec::new();
    for species in &data.pokedex {
        match forms.get(species) {
            Some(list) => listed.extend(list.iter().map(|f| (f.slug.as_str(), f.display.as_str()))),
            None => {
                let name = data
                    .english_name(species)
                    .ok_or_else(|| ShinyError::MissingDisplayName(species.clone()))?;
                listed.push((species.as_str(), name));
            },
        }
    }
    Ok(listed)
}

fn unknown_forms(data: &ReferenceData, known: &HashMap<&str, &str>) -> Vec<ShinyError> {
    let grouped = data
        .impossible_to_discern
        .iter()
        .flatten()
        .map(|slug| (slug, "impossible-to-discern list"));
    let no_shiny = data.no_shiny_forms.iter().map(|slug| (slug, "no-shiny list"));
    grouped
        .chain(no_shiny)
        .filter(|(slug, _)| !known.contains_key(slug.as_str()))
        .map(|(slug, list)| ShinyError::UnknownForm {
            slug: slug.clone(),
            list,
        })
        .collect()
}

/// Check that every slug named by the curated shiny lists is a real form.
pub fn check_shiny_lists(data: &ReferenceData, forms: &FormDisplayMap) -> Vec<ShinyError> {
    match listed_forms(data, forms) {
        Ok(listed) => unknown_forms(data, &listed.into_iter().collect()),
        Err(err) => vec![err],
    }
}

/// List every shiny slug in national dex order with its display name.
///
/// # Errors
/// Returns the first `ShinyError` when the curated lists name unknown forms.
pub fn build_shiny_catalogue(data: &ReferenceData, forms: &FormDisplayMap) -> Result<Vec<FormDisplay>, ShinyError> {
    let listed = listed_forms(data, forms)?;
    let display: HashMap<&str, &str> = listed.iter().copied().collect();
    if let Some(err) = unknown_forms(data, &display).into_iter().next() {
        return Err(err);
    }

    let groups = DiscernGroups::new(&data.impossible_to_discern);
    let no_shiny: HashSet<&str> = data.no_shiny_forms.iter().map(String::as_str).collect();

    let mut seen = HashSet::new();
    let mut catalogue = Vec::new();
    let mut skipped = 0usize;
    for (form, _) in &listed {
        let canonical = groups.representative(form);
        if no_shiny.contains(form) || no_shiny.contains(canonical) {
            skipped += 1;
            continue;
        }
        let slug = shiny_slug(canonical);
        if !seen.insert(slug.clone()) {
            continue;
        }
        let base_display = display
            .get(canonical)
            .ok_or_else(|| ShinyError::MissingDisplayName(canonical.to_string()))?;
        let name = if is_shiny_slug(canonical) {
            (*base_display).to_string()
        } else {
            format!("Shiny {base_display}")
        };
        catalogue.push(FormDisplay::new(slug, name));
    }

    debug!("{skipped} forms without a shiny state skipped");
    info!("{} shiny forms catalogued", catalogue.len());
    Ok(catalogue)
}
