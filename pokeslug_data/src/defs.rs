use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Lowercase, hyphen-delimited identifier of a species, form or item.
pub type Slug = String;

/// Language key of the English entry in `PokemonNameDisplay.json`.
pub const ENGLISH: &str = "eng";

/// Display names of one species keyed by language code (`eng`, `jpn`, ...).
pub type LocalizedNames = BTreeMap<String, String>;

/// Contents of `PokemonNameDisplay.json`.
pub type NameDisplayFile = IndexMap<Slug, LocalizedNames>;

/// Species slug -> ordered list of forms with their display names.
///
/// Shape of both `AllFormDisplayMap.json` and `GeneralFormDisplayMap.json`
/// (in the latter the key may also be an existing form).
pub type FormDisplayMap = IndexMap<Slug, Vec<FormDisplay>>;

/// Region slug -> species with a variant in that region (`RegionalForms.json`).
pub type RegionalForms = IndexMap<Slug, Vec<Slug>>;

/// One `(slug, display name)` pair, stored in JSON as a two element array.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "(Slug, String)", into = "(Slug, String)")]
pub struct FormDisplay {
    pub slug: Slug,
    pub display: String,
}

impl FormDisplay {
    pub fn new(slug: impl Into<Slug>, display: impl Into<String>) -> Self {
        Self {
            slug: slug.into(),
            display: display.into(),
        }
    }
}

impl From<(Slug, String)> for FormDisplay {
    fn from((slug, display): (Slug, String)) -> Self {
        Self { slug, display }
    }
}

impl From<FormDisplay> for (Slug, String) {
    fn from(form: FormDisplay) -> Self {
        (form.slug, form.display)
    }
}

/// Gender qualifier of a form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Gender {
    Male,
    Female,
}

impl Gender {
    /// Suffix token appended to gendered forms.
    pub fn suffix(self) -> &'static str {
        match self {
            Gender::Male => "male",
            Gender::Female => "female",
        }
    }

    /// Short token used by species that are split by gender (`nidoran-m`).
    pub fn species_token(self) -> &'static str {
        match self {
            Gender::Male => "m",
            Gender::Female => "f",
        }
    }

    /// Word prepended to the display name of a gendered form.
    pub fn display_prefix(self) -> &'static str {
        match self {
            Gender::Male => "Male",
            Gender::Female => "Female",
        }
    }
}

/// Mega evolution qualifier. Species with more than one Mega form carry a
/// variant letter (`charizard-mega-x`).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum MegaForm {
    Single,
    Variant(String),
}

/// Form categories in canonical suffix order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum FormCategory {
    Regional,
    General,
    Gender,
    Mega,
    Gigantamax,
    Shiny,
}

impl FormCategory {
    pub const CANONICAL_ORDER: [FormCategory; 6] = [
        FormCategory::Regional,
        FormCategory::General,
        FormCategory::Gender,
        FormCategory::Mega,
        FormCategory::Gigantamax,
        FormCategory::Shiny,
    ];
}

/// Form attributes of a slug request. Each category has its own field, so the
/// order in which a caller sets them has no bearing on the resulting slug.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormSpec {
    pub region: Option<String>,
    pub general: Option<String>,
    pub gender: Option<Gender>,
    pub mega: Option<MegaForm>,
    pub gigantamax: bool,
    pub shiny: bool,
}

impl FormSpec {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn region(mut self, region: impl Into<String>) -> Self {
        self.region = Some(region.into());
        self
    }

    #[must_use]
    pub fn general(mut self, qualifier: impl Into<String>) -> Self {
        self.general = Some(qualifier.into());
        self
    }

    #[must_use]
    pub fn gender(mut self, gender: Gender) -> Self {
        self.gender = Some(gender);
        self
    }

    #[must_use]
    pub fn mega(mut self) -> Self {
        self.mega = Some(MegaForm::Single);
        self
    }

    #[must_use]
    pub fn mega_variant(mut self, variant: impl Into<String>) -> Self {
        self.mega = Some(MegaForm::Variant(variant.into()));
        self
    }

    #[must_use]
    pub fn gigantamax(mut self) -> Self {
        self.gigantamax = true;
        self
    }

    #[must_use]
    pub fn shiny(mut self) -> Self {
        self.shiny = true;
        self
    }
}

/// Every hand-curated reference file, loaded into memory.
#[derive(Debug, Clone, Default)]
pub struct ReferenceData {
    /// National dex order; the dex number is the 1-based position.
    pub pokedex: Vec<Slug>,
    /// English display name for each species.
    pub species_names: IndexMap<Slug, String>,
    pub regional_forms: RegionalForms,
    pub general_forms: FormDisplayMap,
    pub mega_forms: Vec<Slug>,
    pub gigantamax_forms: Vec<Slug>,
    pub minor_gender_differences: Vec<Slug>,
    pub major_gender_differences: Vec<Slug>,
    /// Groups of forms that cannot be told apart visually.
    pub impossible_to_discern: Vec<Vec<Slug>>,
    /// Forms that have no shiny state at all.
    pub no_shiny_forms: Vec<Slug>,
}

impl ReferenceData {
    pub fn is_species(&self, slug: &str) -> bool {
        self.pokedex.iter().any(|species| species == slug)
    }

    /// 1-based national dex number of a species.
    pub fn dex_number(&self, species: &str) -> Option<usize> {
        self.pokedex.iter().position(|s| s == species).map(|idx| idx + 1)
    }

    pub fn english_name(&self, species: &str) -> Option<&str> {
        self.species_names.get(species).map(String::as_str)
    }

    /// Species slug that `slug` is built on, found by stripping trailing
    /// suffix tokens until a dex entry matches (`tauros-paldea-blaze-breed`
    /// -> `tauros`). Species whose own slug contains hyphens (`mr-mime`) are
    /// matched before shorter prefixes.
    pub fn species_prefix<'a>(&self, slug: &'a str) -> Option<&'a str> {
        let mut candidate = slug;
        loop {
            if self.is_species(candidate) {
                return Some(candidate);
            }
            let (head, _) = candidate.rsplit_once('-')?;
            candidate = head;
        }
    }

    /// Gender-difference species and forms, minor list first.
    pub fn gender_differences(&self) -> impl Iterator<Item = &Slug> {
        self.minor_gender_differences
            .iter()
            .chain(self.major_gender_differences.iter())
    }
}
