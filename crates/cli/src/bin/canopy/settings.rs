use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use canopy_core::{AllergenicityLevel, FilterCriteria};
use config::{Config, Environment, File, Map};
use serde::Deserialize;

use crate::app_dirs;
use crate::cli::{CliArgs, OutputFormat};

/// Values read from configuration files and `CANOPY_*` environment variables.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub(crate) struct Settings {
	pub(crate) dataset: Option<PathBuf>,
	pub(crate) genera: Vec<String>,
	pub(crate) level: Option<LevelSetting>,
	pub(crate) search: Option<String>,
	pub(crate) output: Option<OutputFormat>,
	pub(crate) only_highlighted: bool,
}

/// A level as written in configuration: a bare integer or a name.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub(crate) enum LevelSetting {
	Raw(i64),
	Named(String),
}

impl LevelSetting {
	fn resolve(&self) -> Result<Option<AllergenicityLevel>> {
		match self {
			Self::Raw(value) => AllergenicityLevel::from_raw(Some(*value))
				.with_context(|| format!("invalid allergenicity level '{value}'")),
			Self::Named(input) => parse_level(input),
		}
	}
}

impl Settings {
	/// Merge the user config file, `--config` files and the environment.
	///
	/// Later sources override earlier ones.
	pub(crate) fn load(cli: &CliArgs) -> Result<Self> {
		let user_file = if cli.no_config {
			None
		} else {
			Some(app_dirs::user_config_file()?)
		};
		Self::from_sources(user_file.as_deref(), &cli.config, None)
	}

	/// `env` replaces the process environment when given.
	fn from_sources(
		user_file: Option<&Path>,
		extra: &[PathBuf],
		env: Option<Map<String, String>>,
	) -> Result<Self> {
		let mut builder = Config::builder();

		if let Some(path) = user_file {
			log::debug!("reading user config from {}", path.display());
			builder = builder.add_source(File::from(path).required(false));
		}
		for path in extra {
			builder = builder.add_source(File::from(path.as_path()).required(true));
		}
		builder = builder.add_source(
			Environment::with_prefix("CANOPY")
				.try_parsing(true)
				.list_separator(",")
				.with_list_parse_key("genera")
				.source(env),
		);

		builder
			.build()
			.context("failed to read configuration")?
			.try_deserialize()
			.context("invalid configuration")
	}
}

/// Application configuration after merging settings with CLI flags.
#[derive(Debug)]
pub(crate) struct AppConfig {
	pub(crate) dataset: PathBuf,
	pub(crate) criteria: FilterCriteria,
	pub(crate) output: OutputFormat,
	pub(crate) only_highlighted: bool,
}

impl AppConfig {
	/// Resolve the final configuration; flags take precedence over settings.
	pub(crate) fn from_cli(cli: &CliArgs, settings: Settings) -> Result<Self> {
		let Some(dataset) = cli.dataset.clone().or(settings.dataset) else {
			bail!("no dataset given; pass --dataset or set `dataset` in the config file");
		};

		let genera = if cli.genus.is_empty() {
			settings.genera
		} else {
			cli.genus.clone()
		};
		let level = match (cli.level.as_deref(), settings.level) {
			(Some(input), _) => parse_level(input)?,
			(None, Some(setting)) => setting.resolve()?,
			(None, None) => None,
		};
		let search = cli.search.clone().or(settings.search).unwrap_or_default();

		let criteria = FilterCriteria::new()
			.with_genera(sanitize_genera(genera))
			.with_level(level)
			.with_search(search);

		Ok(Self {
			dataset,
			criteria,
			output: cli.output.or(settings.output).unwrap_or_default(),
			only_highlighted: cli.only_highlighted || settings.only_highlighted,
		})
	}
}

/// Parse a level argument; `all` and the empty string mean no constraint.
fn parse_level(input: &str) -> Result<Option<AllergenicityLevel>> {
	let trimmed = input.trim();
	if trimmed.is_empty() || trimmed.eq_ignore_ascii_case("all") {
		return Ok(None);
	}
	trimmed
		.parse()
		.map(Some)
		.with_context(|| format!("invalid allergenicity level '{input}'"))
}

/// Trim genus names and drop empty ones.
fn sanitize_genera(genera: Vec<String>) -> Vec<String> {
	genera
		.into_iter()
		.map(|genus| genus.trim().to_string())
		.filter(|genus| !genus.is_empty())
		.collect()
}

#[cfg(test)]
mod tests {
	use std::fs;

	use clap::Parser;

	use super::*;

	fn args(argv: &[&str]) -> CliArgs {
		CliArgs::try_parse_from(std::iter::once("canopy").chain(argv.iter().copied())).unwrap()
	}

	#[test]
	fn flags_override_settings() {
		let settings = Settings {
			dataset: Some(PathBuf::from("from-config.json")),
			genera: vec!["Acer".into()],
			level: Some(LevelSetting::Raw(2)),
			search: Some("maple".into()),
			output: Some(OutputFormat::Json),
			only_highlighted: false,
		};
		let cli = args(&["-d", "trees.json", "-g", "Quercus", "-l", "all", "-o", "plain"]);

		let config = AppConfig::from_cli(&cli, settings).unwrap();
		assert_eq!(config.dataset, PathBuf::from("trees.json"));
		assert_eq!(
			config.criteria,
			FilterCriteria::new().with_genera(["Quercus"]).with_search("maple")
		);
		assert_eq!(config.output, OutputFormat::Plain);
	}

	#[test]
	fn settings_fill_missing_flags() {
		let settings = Settings {
			dataset: Some(PathBuf::from("trees.json")),
			genera: vec![" Quercus ".into(), String::new()],
			level: Some(LevelSetting::Named("moderate".into())),
			..Settings::default()
		};
		let config = AppConfig::from_cli(&args(&[]), settings).unwrap();

		assert_eq!(
			config.criteria,
			FilterCriteria::new()
				.with_genera(["Quercus"])
				.with_level(Some(AllergenicityLevel::Moderate))
		);
		assert_eq!(config.output, OutputFormat::Plain);
		assert!(!config.only_highlighted);
	}

	#[test]
	fn missing_dataset_is_an_error() {
		let err = AppConfig::from_cli(&args(&[]), Settings::default()).unwrap_err();
		assert!(err.to_string().contains("no dataset"));
	}

	#[test]
	fn invalid_level_is_an_error() {
		let cli = args(&["-d", "trees.json", "-l", "7"]);
		let err = AppConfig::from_cli(&cli, Settings::default()).unwrap_err();
		assert!(err.to_string().contains("invalid allergenicity level"));
	}

	#[test]
	fn reads_config_files_in_order() {
		let dir = tempfile::tempdir().unwrap();
		let user = dir.path().join("config.toml");
		let extra = dir.path().join("extra.toml");
		fs::write(&user, "dataset = \"user.json\"\nsearch = \"oak\"\n").unwrap();
		fs::write(&extra, "dataset = \"extra.json\"\ngenera = [\"Quercus\"]\n").unwrap();

		let settings = Settings::from_sources(Some(user.as_path()), &[extra], Some(Map::new())).unwrap();
		assert_eq!(settings.dataset, Some(PathBuf::from("extra.json")));
		assert_eq!(settings.search.as_deref(), Some("oak"));
		assert_eq!(settings.genera, vec!["Quercus"]);
	}

	#[test]
	fn missing_user_file_is_ignored() {
		let dir = tempfile::tempdir().unwrap();
		let settings = Settings::from_sources(
			Some(dir.path().join("absent.toml").as_path()),
			&[],
			Some(Map::new()),
		).unwrap();
		assert!(settings.dataset.is_none());
	}

	#[test]
	fn missing_extra_file_is_an_error() {
		let dir = tempfile::tempdir().unwrap();
		assert!(Settings::from_sources(None, &[dir.path().join("absent.toml")], Some(Map::new())).is_err());
	}

	fn env(vars: &[(&str, &str)]) -> Option<Map<String, String>> {
		Some(
			vars.iter()
				.map(|(key, value)| ((*key).to_string(), (*value).to_string()))
				.collect(),
		)
	}

	#[test]
	fn environment_overrides_config_files() {
		let dir = tempfile::tempdir().unwrap();
		let user = dir.path().join("config.toml");
		fs::write(&user, "dataset = \"user.json\"\nlevel = \"high\"\n").unwrap();

		let settings = Settings::from_sources(
			Some(user.as_path()),
			&[],
			env(&[
				("CANOPY_GENERA", "Quercus,Acer"),
				("CANOPY_LEVEL", "1"),
				("CANOPY_ONLY_HIGHLIGHTED", "true"),
			]),
		)
		.unwrap();

		assert_eq!(settings.dataset, Some(PathBuf::from("user.json")));
		assert_eq!(settings.genera, vec!["Quercus", "Acer"]);
		assert_eq!(settings.level, Some(LevelSetting::Raw(1)));
		assert!(settings.only_highlighted);

		let config = AppConfig::from_cli(&args(&[]), settings).unwrap();
		assert_eq!(
			config.criteria.allergenic_level,
			Some(AllergenicityLevel::Moderate)
		);
	}

	#[test]
	fn out_of_range_integer_level_is_rejected() {
		let settings = Settings::from_sources(None, &[], env(&[("CANOPY_LEVEL", "5")])).unwrap();
		assert_eq!(settings.level, Some(LevelSetting::Raw(5)));

		let settings = Settings {
			dataset: Some(PathBuf::from("trees.json")),
			..settings
		};
		let err = AppConfig::from_cli(&args(&[]), settings).unwrap_err();
		assert!(err.to_string().contains("invalid allergenicity level '5'"));
	}

	#[test]
	fn named_level_from_environment_stays_a_name() {
		let settings = Settings::from_sources(None, &[], env(&[("CANOPY_LEVEL", "all")])).unwrap();
		assert_eq!(settings.level, Some(LevelSetting::Named("all".into())));
	}
}
