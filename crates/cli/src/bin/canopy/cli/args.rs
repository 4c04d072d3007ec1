use std::path::PathBuf;

use clap::{ArgAction, ColorChoice, Parser, ValueEnum};
use serde::{Deserialize, Serialize};

/// How results are printed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub(crate) enum OutputFormat {
	/// Aligned table with a `*` marking highlighted trees.
	#[default]
	Plain,
	/// JSON document with the criteria, counts and rows.
	Json,
}

/// Command-line arguments accepted by the `canopy` binary.
#[derive(Parser, Debug)]
#[command(
    name = "canopy",
    version,
    about = "Highlight trees in a dataset by genus, allergenicity and name",
    color = ColorChoice::Auto
)]
pub(crate) struct CliArgs {
	#[arg(
        short,
        long = "config",
        value_name = "FILE",
        env = "CANOPY_CONFIG",
        action = ArgAction::Append,
        help = "Additional configuration file to merge"
    )]
	pub(crate) config: Vec<PathBuf>,
	#[arg(
		short = 'n',
		long = "no-config",
		help = "Skip loading the user configuration file"
	)]
	pub(crate) no_config: bool,
	#[arg(
		short = 'd',
		long,
		value_name = "PATH",
		help = "JSON dataset of tree records"
	)]
	pub(crate) dataset: Option<PathBuf>,
	#[arg(
        short = 'g',
        long = "genus",
        value_name = "GENUS",
        value_delimiter = ',',
        action = ArgAction::Append,
        help = "Highlight only these genera (repeatable or comma-separated)"
    )]
	pub(crate) genus: Vec<String>,
	#[arg(
		short = 'l',
		long,
		value_name = "LEVEL",
		help = "Allergenicity level: all, 0, 1, 2 or a level name"
	)]
	pub(crate) level: Option<String>,
	#[arg(
		short = 's',
		long,
		value_name = "TEXT",
		help = "Case-insensitive search over common and genus names"
	)]
	pub(crate) search: Option<String>,
	#[arg(
		short = 'o',
		long = "output",
		value_enum,
		help = "Choose how to print the result"
	)]
	pub(crate) output: Option<OutputFormat>,
	#[arg(
		short = 'H',
		long = "only-highlighted",
		help = "Print highlighted trees only"
	)]
	pub(crate) only_highlighted: bool,
	#[arg(long = "list-levels", help = "List allergenicity levels and exit")]
	pub(crate) list_levels: bool,
	#[arg(
		long = "list-genera",
		help = "List the genera found in the dataset and exit"
	)]
	pub(crate) list_genera: bool,
	#[arg(
		short = 'p',
		long = "print-config",
		help = "Print the resolved configuration before running"
	)]
	pub(crate) print_config: bool,
	#[arg(
        short = 'v',
        long = "verbose",
        action = ArgAction::Count,
        help = "Increase log verbosity (repeat for more)"
    )]
	pub(crate) verbose: u8,
}
