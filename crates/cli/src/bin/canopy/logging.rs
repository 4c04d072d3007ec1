use log::LevelFilter;

/// Map the `-v` count to a default log level.
fn level_for(verbosity: u8) -> LevelFilter {
	match verbosity {
		0 => LevelFilter::Warn,
		1 => LevelFilter::Info,
		2 => LevelFilter::Debug,
		_ => LevelFilter::Trace,
	}
}

/// Install the stderr logger. `RUST_LOG` overrides the verbosity flag.
pub(crate) fn initialize(verbosity: u8) {
	let mut builder = env_logger::Builder::new();
	builder
		.filter_level(level_for(verbosity))
		.format_timestamp(None)
		.parse_default_env();

	if builder.try_init().is_err() {
		log::debug!("logger already initialized");
	}
}
