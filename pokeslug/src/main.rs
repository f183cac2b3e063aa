#![warn(clippy::pedantic)]
#![allow(clippy::must_use_candidate)]
//! ** pokeslug **
//! Slug construction and reference-data tooling for Pokémon species and forms.

use anyhow::Result;
use clap::Parser;
use log::info;

use pokeslug::cli::{Cli, run};

fn main() -> Result<()> {
    env_logger::init();
    info!("Start: pokeslug {}", pokeslug::POKESLUG_VERSION);
    run(Cli::parse())
}
