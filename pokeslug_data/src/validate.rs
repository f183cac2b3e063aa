use std::collections::HashSet;
use std::fmt;

use crate::*;

/// Validation error for malformed or dangling slugs in `ReferenceData`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    DuplicateSlug { kind: &'static str, slug: String },
    MissingReference { kind: &'static str, slug: String, context: String },
    InvalidSlug { kind: &'static str, slug: String },
    InvalidValue { context: String },
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationError::DuplicateSlug { kind, slug } => {
                write!(f, "duplicate {kind} slug '{slug}'")
            },
            ValidationError::MissingReference { kind, slug, context } => {
                write!(f, "missing {kind} '{slug}' ({context})")
            },
            ValidationError::InvalidSlug { kind, slug } => {
                write!(f, "malformed {kind} slug '{slug}'")
            },
            ValidationError::InvalidValue { context } => {
                write!(f, "invalid value ({context})")
            },
        }
    }
}

impl std::error::Error for ValidationError {}

/// Return `true` when `value` is a well formed slug: lowercase ASCII letters,
/// digits and single hyphens, never starting or ending with a hyphen.
///
/// ```
/// use pokeslug_data::is_valid_slug;
///
/// assert!(is_valid_slug("charizard-mega-x"));
/// assert!(!is_valid_slug("Charizard"));
/// assert!(!is_valid_slug("mime--jr"));
/// assert!(!is_valid_slug("-gmax"));
/// ```
pub fn is_valid_slug(value: &str) -> bool {
    !value.is_empty()
        && value
            .split('-')
            .all(|token| !token.is_empty() && token.chars().all(|ch| ch.is_ascii_lowercase() || ch.is_ascii_digit()))
}

/// Validate slug shapes, duplicates and cross-references between the
/// reference files.
///
/// ```
/// use pokeslug_data::{ReferenceData, validate_reference};
///
/// let mut data = ReferenceData {
///     pokedex: vec!["rattata".into()],
///     ..ReferenceData::default()
/// };
/// data.species_names.insert("rattata".into(), "Rattata".into());
/// data.regional_forms.insert("alola".into(), vec!["rattata".into()]);
/// assert!(validate_reference(&data).is_empty());
/// ```
pub fn validate_reference(data: &ReferenceData) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    let mut species = HashSet::new();
    track_slugs("species", data.pokedex.iter(), &mut species, &mut errors);

    for slug in &data.pokedex {
        match data.species_names.get(slug) {
            Some(name) if name.trim().is_empty() => errors.push(ValidationError::InvalidValue {
                context: format!("species '{slug}' has an empty English name"),
            }),
            Some(_) => {},
            None => errors.push(ValidationError::MissingReference {
                kind: "display name",
                slug: slug.clone(),
                context: "species name display".to_string(),
            }),
        }
    }
    for slug in data.species_names.keys() {
        check_ref("species", slug, &species, "species name display".to_string(), &mut errors);
    }

    for (region, members) in &data.regional_forms {
        if !is_valid_slug(region) {
            errors.push(ValidationError::InvalidSlug {
                kind: "region",
                slug: region.clone(),
            });
        }
        let mut seen = HashSet::new();
        for member in members {
            if !seen.insert(member.as_str()) {
                errors.push(ValidationError::DuplicateSlug {
                    kind: "regional species",
                    slug: format!("{member}-{region}"),
                });
            }
            check_ref("species", member, &species, format!("region '{region}'"), &mut errors);
        }
    }

    let mut general = HashSet::new();
    for (base, forms) in &data.general_forms {
        check_species_prefix(data, "general form base", base, "general form map", &mut errors);
        if forms.is_empty() {
            errors.push(ValidationError::InvalidValue {
                context: format!("general form base '{base}' lists no forms"),
            });
        }
        track_slugs("general form", forms.iter().map(|f| &f.slug), &mut general, &mut errors);
        for form in forms {
            check_species_prefix(data, "general form", &form.slug, &format!("general forms of '{base}'"), &mut errors);
            if form.display.trim().is_empty() {
                errors.push(ValidationError::InvalidValue {
                    context: format!("general form '{}' has an empty display name", form.slug),
                });
            }
        }
    }

    let mut megas = HashSet::new();
    track_slugs("mega form", data.mega_forms.iter(), &mut megas, &mut errors);
    for slug in &data.mega_forms {
        if !slug.split('-').any(|token| token == "mega") {
            errors.push(ValidationError::InvalidValue {
                context: format!("mega form '{slug}' has no 'mega' token"),
            });
        }
        check_species_prefix(data, "mega form", slug, "mega list", &mut errors);
    }

    let mut gmax = HashSet::new();
    track_slugs("gigantamax form", data.gigantamax_forms.iter(), &mut gmax, &mut errors);
    for slug in &data.gigantamax_forms {
        if !slug.ends_with("-gmax") {
            errors.push(ValidationError::InvalidValue {
                context: format!("gigantamax form '{slug}' does not end in '-gmax'"),
            });
        }
        check_species_prefix(data, "gigantamax form", slug, "gigantamax list", &mut errors);
    }

    let mut gendered = HashSet::new();
    track_slugs("gender difference", data.gender_differences(), &mut gendered, &mut errors);
    for slug in data.gender_differences() {
        check_species_prefix(data, "gender difference", slug, "gender difference lists", &mut errors);
    }

    let mut grouped = HashSet::new();
    for (line, group) in data.impossible_to_discern.iter().enumerate() {
        if group.len() < 2 {
            errors.push(ValidationError::InvalidValue {
                context: format!("impossible-to-discern group {} has fewer than two forms", line + 1),
            });
        }
        track_slugs("indiscernible form", group.iter(), &mut grouped, &mut errors);
        for slug in group {
            check_species_prefix(
                data,
                "indiscernible form",
                slug,
                &format!("impossible-to-discern group {}", line + 1),
                &mut errors,
            );
        }
    }

    let mut no_shiny = HashSet::new();
    track_slugs("no-shiny form", data.no_shiny_forms.iter(), &mut no_shiny, &mut errors);
    for slug in &data.no_shiny_forms {
        check_species_prefix(data, "no-shiny form", slug, "no-shiny list", &mut errors);
    }
    for (line, group) in data.impossible_to_discern.iter().enumerate() {
        for slug in group.iter().filter(|slug| no_shiny.contains(*slug)) {
            errors.push(ValidationError::InvalidValue {
                context: format!(
                    "no-shiny form '{slug}' is listed in impossible-to-discern group {}",
                    line + 1
                ),
            });
        }
    }

    errors
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_data() -> ReferenceData {
        let mut data = ReferenceData {
            pokedex: vec!["charizard".into(), "rattata".into(), "shellos".into()],
            ..ReferenceData::default()
        };
        for (slug, name) in [("charizard", "Charizard"), ("rattata", "Rattata"), ("shellos", "Shellos")] {
            data.species_names.insert(slug.into(), name.into());
        }
        data
    }

    #[test]
    fn clean_data_has_no_errors() {
        let mut data = base_data();
        data.mega_forms = vec!["charizard-mega-x".into(), "charizard-mega-y".into()];
        data.gigantamax_forms = vec!["charizard-gmax".into()];
        data.general_forms.insert(
            "shellos".into(),
            vec![
                FormDisplay::new("shellos-west-sea", "West Sea Shellos"),
                FormDisplay::new("shellos-east-sea", "East Sea Shellos"),
            ],
        );
        data.minor_gender_differences = vec!["rattata".into()];
        data.impossible_to_discern = vec![vec!["rattata-male".into(), "rattata-female".into()]];
        assert_eq!(validate_reference(&data), Vec::new());
    }

    #[test]
    fn duplicate_slugs_are_reported() {
        let mut data = base_data();
        data.pokedex.push("rattata".into());

        let errors = validate_reference(&data);
        assert!(
            errors
                .iter()
                .any(|err| matches!(err, ValidationError::DuplicateSlug { kind, slug } if *kind == "species" && slug == "rattata"))
        );
    }

    #[test]
    fn gender_lists_share_one_namespace() {
        let mut data = base_data();
        data.minor_gender_differences = vec!["rattata".into()];
        data.major_gender_differences = vec!["rattata".into()];

        let errors = validate_reference(&data);
        assert!(errors.iter().any(
            |err| matches!(err, ValidationError::DuplicateSlug { kind, .. } if *kind == "gender difference")
        ));
    }

    #[test]
    fn missing_references_are_reported() {
        let mut data = base_data();
        data.regional_forms.insert("alola".into(), vec!["vulpix".into()]);
        data.species_names.shift_remove("shellos");

        let errors = validate_reference(&data);
        assert!(errors.iter().any(|err| matches!(err, ValidationError::MissingReference { kind, slug, .. } if *kind == "species" && slug == "vulpix")));
        assert!(errors.iter().any(|err| matches!(err, ValidationError::MissingReference { kind, slug, .. } if *kind == "display name" && slug == "shellos")));
    }

    #[test]
    fn malformed_and_mislabeled_forms_are_reported() {
        let mut data = base_data();
        data.gigantamax_forms = vec!["Charizard-GMAX".into()];
        data.mega_forms = vec!["charizard-x".into()];
        data.impossible_to_discern = vec![vec!["rattata".into()]];

        let errors = validate_reference(&data);
        assert!(
            errors
                .iter()
                .any(|err| matches!(err, ValidationError::InvalidSlug { slug, .. } if slug == "Charizard-GMAX"))
        );
        let invalid_values = errors
            .iter()
            .filter(|err| matches!(err, ValidationError::InvalidValue { .. }))
            .count();
        assert_eq!(invalid_values, 3);
    }

    #[test]
    fn no_shiny_form_cannot_share_a_shiny_slug() {
        let mut data = base_data();
        data.impossible_to_discern = vec![vec!["rattata-male".into(), "rattata-female".into()]];
        data.no_shiny_forms = vec!["rattata-male".into()];

        let errors = validate_reference(&data);
        assert_eq!(errors.len(), 1);
        assert!(errors[0].to_string().contains("'rattata-male' is listed in impossible-to-discern group 1"));
    }

    #[test]
    fn slug_shape_predicate() {
        assert!(is_valid_slug("porygon2"));
        assert!(is_valid_slug("nidoran-f"));
        assert!(!is_valid_slug(""));
        assert!(!is_valid_slug("mime-jr-"));
        assert!(!is_valid_slug("farfetch'd"));
    }
}

fn track_slugs<'a>(
    kind: &'static str,
    slugs: impl Iterator<Item = &'a Slug>,
    set: &mut HashSet<String>,
    errors: &mut Vec<ValidationError>,
) {
    for slug in slugs {
        if !is_valid_slug(slug) {
            errors.push(ValidationError::InvalidSlug {
                kind,
                slug: slug.clone(),
            });
        }
        if !set.insert(slug.clone()) {
            errors.push(ValidationError::DuplicateSlug {
                kind,
                slug: slug.clone(),
            });
        }
    }
}

fn check_ref(kind: &'static str, slug: &str, set: &HashSet<String>, context: String, errors: &mut Vec<ValidationError>) {
    if !set.contains(slug) {
        errors.push(ValidationError::MissingReference {
            kind,
            slug: slug.to_string(),
            context,
        });
    }
}

fn check_species_prefix(
    data: &ReferenceData,
    kind: &'static str,
    slug: &str,
    context: &str,
    errors: &mut Vec<ValidationError>,
) {
    if data.species_prefix(slug).is_none() {
        errors.push(ValidationError::MissingReference {
            kind,
            slug: slug.to_string(),
            context: format!("{context}: no species prefix"),
        });
    }
}
