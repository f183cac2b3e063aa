//! Command line interface of the `pokeslug` binary.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use clap::{Args, Parser, Subcommand, ValueEnum};
use colored::Colorize;
use log::info;

use pokeslug_data::{FormSpec, Gender, MegaForm, validate_reference};

use crate::catalog::SlugCatalog;
use crate::data_paths::resource_root;
use crate::form_map::{build_form_display_map, diff_form_maps};
use crate::loader::config::{CONFIG_FILE_NAME, load_config};
use crate::loader::json::{load_form_display_map, to_pretty_json, write_pretty_json};
use crate::loader::{Resources, load_resources, read_reference_data};
use crate::shiny::{build_shiny_catalogue, check_shiny_lists};
use crate::slug::slug_for;

#[derive(Parser)]
#[command(author, version, about = "Build and check Pokémon species and form slugs.")]
pub struct Cli {
    /// Directory containing the reference files.
    #[arg(long, global = true, value_name = "DIR")]
    pub resources: Option<PathBuf>,
    /// Configuration file (defaults to pokeslug.toml in the resource directory).
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Print the slug for a display name and form attributes.
    Slug(SlugArgs),
    /// Load and cross-check every reference file.
    Validate {
        /// Also list species whose slug differs from their sanitized name.
        #[arg(long)]
        names: bool,
    },
    /// Regenerate the all-form display map.
    BuildFormMap {
        /// Output file (defaults to the configured file in the resource directory).
        #[arg(long, value_name = "FILE")]
        out: Option<PathBuf>,
        /// Only report whether the file on disk is out of date.
        #[arg(long)]
        check: bool,
    },
    /// Print or write the shiny form catalogue as JSON.
    Shiny {
        #[arg(long, value_name = "FILE")]
        out: Option<PathBuf>,
    },
    /// Show what is known about a species or form slug.
    Lookup { slug: String },
}

#[derive(Args, Debug)]
pub struct SlugArgs {
    /// English display name of the species.
    pub name: String,
    /// Region slug of a regional variant (e.g. alola).
    #[arg(long)]
    pub region: Option<String>,
    /// General form qualifier (e.g. "east sea").
    #[arg(long = "form", value_name = "QUALIFIER")]
    pub general: Option<String>,
    #[arg(long, value_enum)]
    pub gender: Option<GenderArg>,
    /// Mega form, optionally with a variant letter (--mega=x).
    #[arg(long, value_name = "VARIANT", num_args = 0..=1, require_equals = true, default_missing_value = "")]
    pub mega: Option<String>,
    #[arg(long)]
    pub gmax: bool,
    #[arg(long)]
    pub shiny: bool,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum GenderArg {
    Male,
    Female,
}

impl From<GenderArg> for Gender {
    fn from(arg: GenderArg) -> Self {
        match arg {
            GenderArg::Male => Gender::Male,
            GenderArg::Female => Gender::Female,
        }
    }
}

impl SlugArgs {
    pub fn form_spec(&self) -> FormSpec {
        FormSpec {
            region: self.region.clone(),
            general: self.general.clone(),
            gender: self.gender.map(Gender::from),
            mega: self.mega.as_ref().map(|variant| {
                if variant.trim().is_empty() {
                    MegaForm::Single
                } else {
                    MegaForm::Variant(variant.clone())
                }
            }),
            gigantamax: self.gmax,
            shiny: self.shiny,
        }
    }
}

/// Execute a parsed command line.
///
/// # Errors
/// Any load, validation or write failure, and a stale form map under `--check`.
pub fn run(cli: Cli) -> Result<()> {
    let root = resource_root(cli.resources.as_deref());
    let config = cli.config.as_deref();
    match cli.command {
        Commands::Slug(args) => {
            println!("{}", slug_for(&args.name, &args.form_spec()));
            Ok(())
        },
        Commands::Validate { names } => run_validate(&root, config, names),
        Commands::BuildFormMap { out, check } => {
            let resources = load_resources(&root, config).context("while loading resources")?;
            run_build_form_map(&resources, out.as_deref(), check)
        },
        Commands::Shiny { out } => {
            let resources = load_resources(&root, config).context("while loading resources")?;
            run_shiny(&resources, out.as_deref())
        },
        Commands::Lookup { slug } => {
            let resources = load_resources(&root, config).context("while loading resources")?;
            run_lookup(&resources, &slug)
        },
    }
}

fn run_validate(root: &Path, config_path: Option<&Path>, names: bool) -> Result<()> {
    let config = load_config(&config_path.map_or_else(|| root.join(CONFIG_FILE_NAME), Path::to_path_buf));
    let data = read_reference_data(root, &config).context("while reading reference data")?;

    let mut problems: Vec<String> = validate_reference(&data).iter().map(ToString::to_string).collect();
    if problems.is_empty() {
        // Cross-file contradictions only surface while assembling the form map.
        match build_form_display_map(&data, &config.region_prefixes) {
            Ok(map) => problems.extend(check_shiny_lists(&data, &map).iter().map(ToString::to_string)),
            Err(err) => problems.push(err.to_string()),
        }
    }

    if names {
        let empty = Default::default();
        let catalog = SlugCatalog::new(&data, &empty);
        for drift in catalog.name_drift() {
            println!(
                "{} '{}' is named \"{}\" (sanitizes to '{}')",
                "note:".yellow(),
                drift.slug,
                drift.name,
                drift.derived
            );
        }
    }

    for problem in &problems {
        println!("{} {problem}", "error:".red().bold());
    }
    if !problems.is_empty() {
        bail!("{} problem(s) found in '{}'", problems.len(), root.display());
    }
    println!(
        "{} {} species checked in '{}'",
        "OK".green().bold(),
        data.pokedex.len(),
        root.display()
    );
    Ok(())
}

fn run_build_form_map(resources: &Resources, out: Option<&Path>, check: bool) -> Result<()> {
    let map = build_form_display_map(&resources.data, &resources.config.region_prefixes)
        .context("while building the form display map")?;
    let target = out.map_or_else(|| resources.path(&resources.config.files.all_form_display_map), Path::to_path_buf);

    if !check {
        return write_pretty_json(&target, &map);
    }

    let rendered = to_pretty_json(&map)?;
    let on_disk = match fs::read_to_string(&target) {
        Ok(text) => text,
        Err(err) if err.kind() == ErrorKind::NotFound => {
            bail!("'{}' does not exist; run `pokeslug build-form-map` to create it", target.display());
        },
        Err(err) => return Err(err).with_context(|| format!("while reading '{}'", target.display())),
    };
    if rendered == on_disk {
        println!("{} '{}' is up to date", "OK".green().bold(), target.display());
        return Ok(());
    }
    match load_form_display_map(&target) {
        Err(err) => {
            return Err(err).with_context(|| format!("'{}' is stale and could not be read back", target.display()));
        },
        Ok(current) => {
            let diff = diff_form_maps(&current, &map);
            for species in &diff.added {
                println!("{} {species}", "+".green());
            }
            for species in &diff.removed {
                println!("{} {species}", "-".red());
            }
            for species in &diff.changed {
                println!("{} {species}", "~".yellow());
            }
        },
    }
    bail!("'{}' is stale; run `pokeslug build-form-map` to regenerate it", target.display());
}

fn run_shiny(resources: &Resources, out: Option<&Path>) -> Result<()> {
    let map = build_form_display_map(&resources.data, &resources.config.region_prefixes)
        .context("while building the form display map")?;
    let catalogue =
        build_shiny_catalogue(&resources.data, &map).context("while building the shiny catalogue")?;
    match out {
        Some(path) => write_pretty_json(path, &catalogue),
        None => {
            print!("{}", to_pretty_json(&catalogue)?);
            Ok(())
        },
    }
}

fn run_lookup(resources: &Resources, slug: &str) -> Result<()> {
    let map = build_form_display_map(&resources.data, &resources.config.region_prefixes)
        .context("while building the form display map")?;
    let catalog = SlugCatalog::new(&resources.data, &map);
    let Some(found) = catalog.lookup(slug) else {
        bail!("'{slug}' is neither a species nor a known form");
    };
    info!("lookup '{slug}' resolved to species '{}'", found.species);

    println!("{} {}", found.display.bold(), format!("({})", found.slug).dimmed());
    println!("  species: {} (#{:04})", found.species, found.dex_number);
    if !found.regions.is_empty() {
        println!("  regional variants: {}", found.regions.join(", "));
    }
    let forms = catalog.forms_of(&found.species);
    if forms.len() > 1 {
        println!("  forms:");
        for form in forms {
            let marker = if form.slug == found.slug { "*" } else { " " };
            println!("   {marker} {:<32} {}", form.slug, form.display);
        }
    }
    Ok(())
}
