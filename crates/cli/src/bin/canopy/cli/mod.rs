mod args;

pub(crate) use args::{CliArgs, OutputFormat};

use clap::Parser;

/// Parse process arguments into [`CliArgs`].
pub(crate) fn parse_cli() -> CliArgs {
	CliArgs::parse()
}
