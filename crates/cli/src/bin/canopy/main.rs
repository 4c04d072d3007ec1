//! Command-line entry point for the canopy tree filter.

mod app_dirs;
mod cli;
mod logging;
mod render;
mod settings;
mod workflow;

use std::io::{self, Write};

use anyhow::Result;
use canopy_core::AllergenicityLevelCatalog;
use cli::{OutputFormat, parse_cli};
use settings::{AppConfig, Settings};
use workflow::FilterWorkflow;

fn main() -> Result<()> {
	let cli = parse_cli();
	logging::initialize(cli.verbose);

	let stdout = io::stdout();
	let mut out = stdout.lock();

	if cli.list_levels {
		render::levels(&AllergenicityLevelCatalog::standard(), &mut out)?;
		return Ok(());
	}

	let settings = Settings::load(&cli)?;
	let config = AppConfig::from_cli(&cli, settings)?;

	if cli.print_config {
		let criteria = &config.criteria;
		writeln!(out, "Dataset: {}", config.dataset.display())?;
		writeln!(out, "Genera: {:?}", criteria.selected_genera)?;
		writeln!(out, "Level: {:?}", criteria.allergenic_level)?;
		writeln!(out, "Search: {:?}", criteria.search_query)?;
		writeln!(out, "Output: {:?}", config.output)?;
	}

	let workflow = FilterWorkflow::from_config(&config)?;

	if cli.list_genera {
		for name in workflow.genera() {
			writeln!(out, "{name}")?;
		}
		return Ok(());
	}

	let report = workflow.report();
	match config.output {
		OutputFormat::Plain => render::plain(&report, &mut out)?,
		OutputFormat::Json => render::json(&report, &mut out)?,
	}

	Ok(())
}
