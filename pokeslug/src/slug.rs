//! Slug construction for species and forms.
//!
//! A form slug is the species slug followed by suffix tokens in a fixed
//! order: region, general form, gender, mega, gigantamax, shiny.

use pokeslug_data::{FormCategory, FormSpec, Gender, MegaForm};

pub use pokeslug_data::is_valid_slug;

pub const GIGANTAMAX_SUFFIX: &str = "gmax";
pub const MEGA_SUFFIX: &str = "mega";
pub const SHINY_SUFFIX: &str = "shiny";

/// Species split into two dex entries by gender instead of having gender forms.
const GENDER_SPLIT_SPECIES: &[&str] = &["nidoran"];

/// Normalize a display name into a slug.
///
/// Runs of anything other than ASCII letters and digits collapse into a
/// single hyphen, and the result never starts or ends with one. Accented
/// Latin letters fold to their base letter and the gender symbols become
/// `m`/`f` tokens. Valid slugs pass through unchanged.
///
/// ```
/// use pokeslug::slug::sanitize_slug;
///
/// assert_eq!(sanitize_slug("Mime Jr."), "mime-jr");
/// assert_eq!(sanitize_slug("Farfetch'd"), "farfetch-d");
/// assert_eq!(sanitize_slug("mime-jr"), "mime-jr");
/// ```
pub fn sanitize_slug(raw: &str) -> String {
    let mut slug = String::new();
    let mut pending_dash = false;
    for ch in raw.trim().chars() {
        let token = match ch {
            '♀' => Some("f"),
            '♂' => Some("m"),
            _ => None,
        };
        if let Some(token) = token {
            if !slug.is_empty() {
                slug.push('-');
            }
            slug.push_str(token);
            pending_dash = true;
            continue;
        }

        match fold_letter(ch) {
            Some(letter) => {
                if pending_dash && !slug.is_empty() {
                    slug.push('-');
                }
                slug.push(letter);
                pending_dash = false;
            },
            None => pending_dash = true,
        }
    }
    slug
}

/// Lowercase ASCII letter or digit for `ch`, folding common Latin diacritics.
fn fold_letter(ch: char) -> Option<char> {
    if ch.is_ascii_alphanumeric() {
        return Some(ch.to_ascii_lowercase());
    }
    let folded = match ch.to_lowercase().next()? {
        'à' | 'á' | 'â' | 'ã' | 'ä' | 'å' => 'a',
        'ç' => 'c',
        'è' | 'é' | 'ê' | 'ë' => 'e',
        'ì' | 'í' | 'î' | 'ï' => 'i',
        'ñ' => 'n',
        'ò' | 'ó' | 'ô' | 'õ' | 'ö' => 'o',
        'ù' | 'ú' | 'û' | 'ü' => 'u',
        'ý' | 'ÿ' => 'y',
        _ => return None,
    };
    Some(folded)
}

/// Build the slug of a species or form from its English name and form attributes.
///
/// ```
/// use pokeslug::slug::slug_for;
/// use pokeslug_data::{FormSpec, Gender};
///
/// assert_eq!(slug_for("Rattata", &FormSpec::new().region("alola")), "rattata-alola");
/// assert_eq!(slug_for("Charizard", &FormSpec::new().mega_variant("x")), "charizard-mega-x");
/// assert_eq!(slug_for("Nidoran", &FormSpec::new().gender(Gender::Male)), "nidoran-m");
/// ```
pub fn slug_for(name: &str, spec: &FormSpec) -> String {
    let base = sanitize_slug(name);
    let split = spec.gender.and_then(|gender| gender_split_species(&base, gender));
    let gender_suffix = if split.is_some() { None } else { spec.gender };
    let mut slug = split.unwrap_or(base);

    for category in FormCategory::CANONICAL_ORDER {
        match category {
            FormCategory::Regional => {
                if let Some(region) = &spec.region {
                    push_token(&mut slug, &sanitize_slug(region));
                }
            },
            FormCategory::General => {
                if let Some(general) = &spec.general {
                    push_token(&mut slug, &sanitize_slug(general));
                }
            },
            FormCategory::Gender => {
                if let Some(gender) = gender_suffix {
                    push_token(&mut slug, gender.suffix());
                }
            },
            FormCategory::Mega => {
                if let Some(mega) = &spec.mega {
                    push_token(&mut slug, MEGA_SUFFIX);
                    if let MegaForm::Variant(variant) = mega {
                        push_token(&mut slug, &sanitize_slug(variant));
                    }
                }
            },
            FormCategory::Gigantamax => {
                if spec.gigantamax {
                    push_token(&mut slug, GIGANTAMAX_SUFFIX);
                }
            },
            FormCategory::Shiny => {
                if spec.shiny {
                    push_token(&mut slug, SHINY_SUFFIX);
                }
            },
        }
    }
    slug
}

/// Slug of the shiny state of an existing form slug. Already-shiny slugs are
/// returned unchanged.
pub fn shiny_slug(form: &str) -> String {
    if is_shiny_slug(form) {
        form.to_string()
    } else {
        format!("{form}-{SHINY_SUFFIX}")
    }
}

pub fn is_shiny_slug(slug: &str) -> bool {
    slug.rsplit('-').next() == Some(SHINY_SUFFIX)
}

/// Species slug of a gender-split species (`nidoran` + female -> `nidoran-f`).
pub fn gender_split_species(base: &str, gender: Gender) -> Option<String> {
    GENDER_SPLIT_SPECIES
        .contains(&base)
        .then(|| format!("{base}-{}", gender.species_token()))
}

fn push_token(slug: &mut String, token: &str) {
    if token.is_empty() {
        return;
    }
    if !slug.is_empty() {
        slug.push('-');
    }
    slug.push_str(token);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sanitize_handles_punctuation() {
        assert_eq!(sanitize_slug("Mime Jr."), "mime-jr");
        assert_eq!(sanitize_slug("Farfetch'd"), "farfetch-d");
        assert_eq!(sanitize_slug("Mr. Mime"), "mr-mime");
        assert_eq!(sanitize_slug("Type: Null"), "type-null");
        assert_eq!(sanitize_slug("  Ho-Oh  "), "ho-oh");
        assert_eq!(sanitize_slug("Porygon-Z"), "porygon-z");
    }

    #[test]
    fn sanitize_folds_non_ascii() {
        assert_eq!(sanitize_slug("Flabébé"), "flabebe");
        assert_eq!(sanitize_slug("Nidoran♀"), "nidoran-f");
        assert_eq!(sanitize_slug("Nidoran ♂"), "nidoran-m");
        assert_eq!(sanitize_slug("ポケモン"), "");
    }

    #[test]
    fn sanitize_is_idempotent() {
        for name in ["Mime Jr.", "Farfetch'd", "Nidoran♀", "Tapu Koko", "Flabébé", "Sirfetch’d"] {
            let once = sanitize_slug(name);
            assert_eq!(sanitize_slug(&once), once, "{name}");
            assert!(is_valid_slug(&once), "{once}");
        }
    }

    #[test]
    fn slug_for_single_categories() {
        assert_eq!(slug_for("Gyarados", &FormSpec::new().gender(Gender::Male)), "gyarados-male");
        assert_eq!(slug_for("Rattata", &FormSpec::new()), "rattata");
        assert_eq!(slug_for("Rattata", &FormSpec::new().region("alola")), "rattata-alola");
        assert_eq!(slug_for("Lucario", &FormSpec::new().mega()), "lucario-mega");
        assert_eq!(slug_for("Charizard", &FormSpec::new().mega_variant("X")), "charizard-mega-x");
        assert_eq!(slug_for("Venusaur", &FormSpec::new().gigantamax()), "venusaur-gmax");
        assert_eq!(slug_for("Shellos", &FormSpec::new().general("East Sea")), "shellos-east-sea");
        assert_eq!(slug_for("Ditto", &FormSpec::new().shiny()), "ditto-shiny");
    }

    #[test]
    fn nidoran_gender_is_a_species_split() {
        assert_eq!(slug_for("Nidoran", &FormSpec::new().gender(Gender::Male)), "nidoran-m");
        assert_eq!(slug_for("Nidoran", &FormSpec::new().gender(Gender::Female)), "nidoran-f");
        assert_eq!(
            slug_for("Nidoran", &FormSpec::new().gender(Gender::Female).shiny()),
            "nidoran-f-shiny"
        );
        assert_eq!(gender_split_species("nidoran", Gender::Male).as_deref(), Some("nidoran-m"));
        assert_eq!(gender_split_species("pikachu", Gender::Male), None);
    }

    #[test]
    fn suffix_order_ignores_builder_order() {
        let a = FormSpec::new()
            .shiny()
            .gigantamax()
            .mega()
            .gender(Gender::Female)
            .general("rapid strike")
            .region("hisui");
        let b = FormSpec::new()
            .region("hisui")
            .general("rapid strike")
            .gender(Gender::Female)
            .mega()
            .gigantamax()
            .shiny();
        let expected = "sneasel-hisui-rapid-strike-female-mega-gmax-shiny";
        assert_eq!(slug_for("Sneasel", &a), expected);
        assert_eq!(slug_for("Sneasel", &b), expected);
    }

    #[test]
    fn shiny_slug_is_not_doubled() {
        assert_eq!(shiny_slug("pikachu-gmax"), "pikachu-gmax-shiny");
        assert_eq!(shiny_slug("pikachu-gmax-shiny"), "pikachu-gmax-shiny");
        assert!(!is_shiny_slug("shinx"));
    }
}
