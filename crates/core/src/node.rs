use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};

/// A single tree record from the dataset.
///
/// Only the fields the filters read are typed; every other attribute of the
/// record is kept verbatim in [`TreeNode::attributes`] so renderers can show
/// it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TreeNode {
	#[serde(default, deserialize_with = "lenient_name")]
	pub genus_name: String,
	#[serde(
		default,
		deserialize_with = "lenient_optional_name",
		skip_serializing_if = "Option::is_none"
	)]
	pub common_name: Option<String>,
	#[serde(
		rename = "Allergenicity",
		default,
		skip_serializing_if = "Allergenicity::is_missing"
	)]
	pub allergenicity: Allergenicity,
	#[serde(flatten)]
	pub attributes: Map<String, Value>,
}

impl TreeNode {
	/// Create a node for `genus_name` with no other attributes.
	#[must_use]
	pub fn new(genus_name: impl Into<String>) -> Self {
		Self {
			genus_name: genus_name.into(),
			..Self::default()
		}
	}

	#[must_use]
	pub fn with_common_name(mut self, name: impl Into<String>) -> Self {
		self.common_name = Some(name.into());
		self
	}

	#[must_use]
	pub fn with_allergenicity(mut self, value: impl Into<Allergenicity>) -> Self {
		self.allergenicity = value.into();
		self
	}

	/// Attach an extra, untyped attribute.
	#[must_use]
	pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
		self.attributes.insert(key.into(), value.into());
		self
	}

	/// Display name: the common name when present, otherwise the genus.
	#[must_use]
	pub fn display_name(&self) -> &str {
		self.common_name.as_deref().unwrap_or(&self.genus_name)
	}
}

/// Read a name field, treating `null` and non-string values as no name.
fn lenient_name<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
	lenient_optional_name(deserializer).map(Option::unwrap_or_default)
}

fn lenient_optional_name<'de, D: Deserializer<'de>>(
	deserializer: D,
) -> Result<Option<String>, D::Error> {
	match Value::deserialize(deserializer)? {
		Value::String(name) => Ok(Some(name)),
		_ => Ok(None),
	}
}

/// Raw allergenicity value as found in the dataset.
///
/// Datasets store the level as a number or as a numeric string. The value is
/// kept as-is and coerced only when compared.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum Allergenicity {
	/// The record has no `Allergenicity` field.
	#[default]
	Missing,
	Value(Value),
}

impl Allergenicity {
	#[must_use]
	pub fn is_missing(&self) -> bool {
		matches!(self, Self::Missing)
	}

	/// Numeric reading of the value, or `None` when it is not a number.
	///
	/// Strings are trimmed and an empty string reads as zero; `null` reads as
	/// zero and booleans as zero or one. Arrays, objects, unparsable strings and
	/// a missing field are not numbers.
	#[must_use]
	pub fn coerce(&self) -> Option<f64> {
		match self {
			Self::Missing => None,
			Self::Value(Value::Null) => Some(0.0),
			Self::Value(Value::Bool(flag)) => Some(if *flag { 1.0 } else { 0.0 }),
			Self::Value(Value::Number(number)) => number.as_f64(),
			Self::Value(Value::String(text)) => parse_numeric(text),
			Self::Value(Value::Array(_) | Value::Object(_)) => None,
		}
	}
}

fn parse_numeric(text: &str) -> Option<f64> {
	// The byte order mark counts as whitespace around numbers.
	let trimmed = text.trim_matches(|c: char| c.is_whitespace() || c == '\u{feff}');
	if trimmed.is_empty() {
		return Some(0.0);
	}

	// Prefixed literals take bare digits only; `from_str_radix` would allow a sign.
	let radix = |prefix_len: usize, radix: u32| {
		let digits = &trimmed[prefix_len..];
		if digits.starts_with(['+', '-']) {
			return None;
		}
		u64::from_str_radix(digits, radix)
			.ok()
			.map(|value| value as f64)
	};
	match trimmed.get(..2) {
		Some("0x" | "0X") => return radix(2, 16),
		Some("0o" | "0O") => return radix(2, 8),
		Some("0b" | "0B") => return radix(2, 2),
		_ => {}
	}

	match trimmed {
		"Infinity" | "+Infinity" => return Some(f64::INFINITY),
		"-Infinity" => return Some(f64::NEG_INFINITY),
		_ => {}
	}

	// Rust also accepts "inf" and "NaN" spellings, which are not numbers here.
	trimmed.parse::<f64>().ok().filter(|value| value.is_finite())
}

impl From<i32> for Allergenicity {
	fn from(value: i32) -> Self {
		Self::Value(Value::from(value))
	}
}

impl From<i64> for Allergenicity {
	fn from(value: i64) -> Self {
		Self::Value(Value::from(value))
	}
}

impl From<f64> for Allergenicity {
	fn from(value: f64) -> Self {
		Self::Value(Value::from(value))
	}
}

impl From<&str> for Allergenicity {
	fn from(value: &str) -> Self {
		Self::Value(Value::from(value))
	}
}

impl From<Value> for Allergenicity {
	fn from(value: Value) -> Self {
		Self::Value(value)
	}
}

impl Serialize for Allergenicity {
	fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
		match self {
			Self::Missing => serializer.serialize_none(),
			Self::Value(value) => value.serialize(serializer),
		}
	}
}

impl<'de> Deserialize<'de> for Allergenicity {
	fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
		Value::deserialize(deserializer).map(Self::Value)
	}
}
