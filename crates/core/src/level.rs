use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::FilterError;

/// Ordinal allergenicity classification of a tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub enum AllergenicityLevel {
	NonAllergenic = 0,
	Moderate = 1,
	High = 2,
}

impl AllergenicityLevel {
	pub const ALL: [Self; 3] = [Self::NonAllergenic, Self::Moderate, Self::High];

	/// Numeric value stored in datasets for this level.
	#[must_use]
	pub const fn value(self) -> u8 {
		self as u8
	}

	/// Whether a coerced dataset value denotes this level.
	#[must_use]
	pub fn matches(self, coerced: Option<f64>) -> bool {
		coerced == Some(f64::from(self.value()))
	}

	/// Convert an optional raw level, where `None` means "no constraint".
	pub fn from_raw(raw: Option<i64>) -> Result<Option<Self>, FilterError> {
		raw.map(Self::try_from).transpose()
	}
}

impl TryFrom<i64> for AllergenicityLevel {
	type Error = FilterError;

	fn try_from(value: i64) -> Result<Self, Self::Error> {
		match value {
			0 => Ok(Self::NonAllergenic),
			1 => Ok(Self::Moderate),
			2 => Ok(Self::High),
			_ => Err(FilterError::InvalidAllergenicity { value }),
		}
	}
}

impl From<AllergenicityLevel> for i64 {
	fn from(level: AllergenicityLevel) -> Self {
		i64::from(level.value())
	}
}

impl FromStr for AllergenicityLevel {
	type Err = FilterError;

	/// Accepts the numeric value or a level name such as `moderate`.
	fn from_str(input: &str) -> Result<Self, Self::Err> {
		let normalized = input.trim().to_ascii_lowercase();
		if let Ok(value) = normalized.parse::<i64>() {
			return Self::try_from(value);
		}
		match normalized.as_str() {
			"non-allergenic" | "none" | "low" => Ok(Self::NonAllergenic),
			"moderate" | "normal" => Ok(Self::Moderate),
			"high" | "severe" => Ok(Self::High),
			_ => Err(FilterError::UnknownLevel {
				input: input.to_string(),
			}),
		}
	}
}

impl fmt::Display for AllergenicityLevel {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}", self.value())
	}
}

/// One entry of the level selector: a filter value and its label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LevelOption {
	pub value: Option<AllergenicityLevel>,
	pub label: &'static str,
}

/// The selector entries offered by the default catalog.
pub const LEVEL_OPTIONS: [LevelOption; 4] = [
	LevelOption {
		value: None,
		label: "All Trees",
	},
	LevelOption {
		value: Some(AllergenicityLevel::NonAllergenic),
		label: "Non-Allergenic",
	},
	LevelOption {
		value: Some(AllergenicityLevel::Moderate),
		label: "Moderate Allergenicity",
	},
	LevelOption {
		value: Some(AllergenicityLevel::High),
		label: "High Allergenicity",
	},
];

/// Read-only lookup of the allergenicity levels a UI can offer.
///
/// Catalogs cannot be edited after construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AllergenicityLevelCatalog {
	options: &'static [LevelOption],
}

impl AllergenicityLevelCatalog {
	#[must_use]
	pub const fn standard() -> Self {
		Self {
			options: &LEVEL_OPTIONS,
		}
	}

	pub fn iter(&self) -> impl Iterator<Item = &'static LevelOption> {
		self.options.iter()
	}

	#[must_use]
	pub fn len(&self) -> usize {
		self.options.len()
	}

	#[must_use]
	pub fn is_empty(&self) -> bool {
		self.options.is_empty()
	}

	/// Label shown for `level`, if the catalog lists it.
	#[must_use]
	pub fn label_for(&self, level: Option<AllergenicityLevel>) -> Option<&'static str> {
		self.iter()
			.find(|option| option.value == level)
			.map(|option| option.label)
	}
}

impl Default for AllergenicityLevelCatalog {
	fn default() -> Self {
		Self::standard()
	}
}
