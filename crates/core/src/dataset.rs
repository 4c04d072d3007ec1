use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use serde_json::Value;

use crate::error::DatasetError;
use crate::genus::distinct_genera;
use crate::node::TreeNode;

/// Tree records loaded from a JSON export.
///
/// Accepted layouts are a bare array of records, an object with a `nodes`
/// array, or a GeoJSON feature collection whose features carry the record in
/// `properties`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dataset {
	nodes: Vec<TreeNode>,
}

impl Dataset {
	#[must_use]
	pub fn new(nodes: Vec<TreeNode>) -> Self {
		Self { nodes }
	}

	/// Load a dataset from a JSON file.
	///
	/// # Errors
	///
	/// Fails when the file cannot be opened or its contents are not a
	/// supported dataset layout.
	pub fn from_path(path: impl AsRef<Path>) -> Result<Self, DatasetError> {
		let path = path.as_ref();
		let file = File::open(path).map_err(|source| DatasetError::Io {
			path: path.to_path_buf(),
			source,
		})?;
		let dataset = Self::from_reader(BufReader::new(file))?;
		log::info!("loaded {} trees from {}", dataset.len(), path.display());
		Ok(dataset)
	}

	/// Parse a dataset from any JSON reader.
	///
	/// # Errors
	///
	/// Fails on invalid JSON or an unsupported layout.
	pub fn from_reader(reader: impl Read) -> Result<Self, DatasetError> {
		let value: Value = serde_json::from_reader(reader)?;
		Self::from_value(value)
	}

	/// Parse a dataset from a JSON string.
	///
	/// # Errors
	///
	/// Fails on invalid JSON or an unsupported layout.
	pub fn from_json(text: &str) -> Result<Self, DatasetError> {
		let value: Value = serde_json::from_str(text)?;
		Self::from_value(value)
	}

	/// Build a dataset from an already parsed JSON document.
	///
	/// # Errors
	///
	/// Fails when the document is not one of the supported layouts or a record
	/// cannot be read as a [`TreeNode`].
	pub fn from_value(value: Value) -> Result<Self, DatasetError> {
		let records = match value {
			Value::Array(records) => records,
			Value::Object(mut object) => {
				if let Some(Value::Array(features)) = object.remove("features") {
					features.into_iter().map(feature_properties).collect()
				} else if let Some(Value::Array(nodes)) = object.remove("nodes") {
					nodes
				} else {
					return Err(DatasetError::UnexpectedShape(
						"object without a `features` or `nodes` array",
					));
				}
			}
			_ => {
				return Err(DatasetError::UnexpectedShape(
					"expected an array of records or an object",
				));
			}
		};

		let nodes = records
			.into_iter()
			.enumerate()
			.map(|(index, record)| {
				serde_json::from_value(record).map_err(|source| DatasetError::Record { index, source })
			})
			.collect::<Result<Vec<TreeNode>, _>>()?;

		log::debug!("parsed {} dataset records", nodes.len());
		Ok(Self { nodes })
	}

	#[must_use]
	pub fn nodes(&self) -> &[TreeNode] {
		&self.nodes
	}

	pub fn iter(&self) -> std::slice::Iter<'_, TreeNode> {
		self.nodes.iter()
	}

	#[must_use]
	pub fn len(&self) -> usize {
		self.nodes.len()
	}

	#[must_use]
	pub fn is_empty(&self) -> bool {
		self.nodes.is_empty()
	}

	/// Sorted distinct genus names, as offered by a genus selector.
	#[must_use]
	pub fn genera(&self) -> Vec<String> {
		distinct_genera(&self.nodes)
	}
}

impl<'a> IntoIterator for &'a Dataset {
	type Item = &'a TreeNode;
	type IntoIter = std::slice::Iter<'a, TreeNode>;

	fn into_iter(self) -> Self::IntoIter {
		self.iter()
	}
}

/// Unwrap a GeoJSON feature into its `properties`; other values pass through.
fn feature_properties(feature: Value) -> Value {
	match feature {
		Value::Object(mut object) => match object.remove("properties") {
			Some(properties @ Value::Object(_)) => properties,
			Some(other) => {
				object.insert("properties".to_string(), other);
				Value::Object(object)
			}
			None => Value::Object(object),
		},
		other => other,
	}
}

#[cfg(test)]
mod tests {
	use std::io::Write;

	use serde_json::json;

	use super::*;
	use crate::criteria::FilterCriteria;

	#[test]
	fn reads_plain_array() {
		let dataset = Dataset::from_json(
			r#"[
				{"genus_name": "Quercus", "common_name": "Live Oak", "Allergenicity": "2"},
				{"genus_name": "Acer", "Allergenicity": 1}
			]"#,
		)
		.unwrap();

		assert_eq!(dataset.len(), 2);
		assert_eq!(dataset.genera(), vec!["Acer", "Quercus"]);
	}

	#[test]
	fn reads_feature_collection_properties() {
		let dataset = Dataset::from_value(json!({
			"type": "FeatureCollection",
			"features": [
				{
					"type": "Feature",
					"geometry": { "type": "Point", "coordinates": [-122.3, 37.8] },
					"properties": { "genus_name": "Platanus", "Allergenicity": 2 }
				}
			]
		}))
		.unwrap();

		assert_eq!(dataset.nodes()[0].genus_name, "Platanus");
		assert!(dataset.nodes()[0].attributes.get("geometry").is_none());
	}

	#[test]
	fn reads_nodes_object() {
		let dataset = Dataset::from_value(json!({ "nodes": [{ "genus_name": "Ulmus" }] })).unwrap();
		assert_eq!(dataset.genera(), vec!["Ulmus"]);
	}

	#[test]
	fn rejects_unsupported_layouts() {
		let err = Dataset::from_value(json!({ "trees": [] })).unwrap_err();
		assert!(matches!(err, DatasetError::UnexpectedShape(_)));

		let err = Dataset::from_value(json!("trees")).unwrap_err();
		assert!(matches!(err, DatasetError::UnexpectedShape(_)));
	}

	#[test]
	fn reports_bad_record_index() {
		let err = Dataset::from_value(json!([{ "genus_name": "Acer" }, 42])).unwrap_err();
		assert!(matches!(err, DatasetError::Record { index: 1, .. }));
	}

	#[test]
	fn records_with_unusable_names_still_load() {
		let dataset = Dataset::from_json(
			r#"[
				{"genus_name": "Acer", "common_name": 7},
				{"genus_name": null, "common_name": "Vacant site"}
			]"#,
		)
		.unwrap();

		assert_eq!(dataset.len(), 2);
		assert!(dataset.nodes()[0].common_name.is_none());
		assert_eq!(dataset.nodes()[1].genus_name, "");
		assert_eq!(dataset.genera(), vec!["Acer"]);

		let vacant = &dataset.nodes()[1];
		let by_genus = FilterCriteria::new().with_genera(["Acer"]).predicate();
		assert!(!by_genus.matches(vacant));
		for query in ["acer", "null"] {
			let by_search = FilterCriteria::new().with_search(query).predicate();
			assert!(!by_search.matches(vacant));
		}
	}

	#[test]
	fn invalid_json_is_a_parse_error() {
		let err = Dataset::from_json("[{").unwrap_err();
		assert!(matches!(err, DatasetError::Parse(_)));
	}

	#[test]
	fn loads_from_file() {
		let mut file = tempfile::NamedTempFile::new().unwrap();
		write!(file, r#"[{{"genus_name": "Betula", "common_name": "Silver Birch"}}]"#).unwrap();

		let dataset = Dataset::from_path(file.path()).unwrap();
		assert_eq!(dataset.nodes()[0].display_name(), "Silver Birch");
	}

	#[test]
	fn missing_file_is_an_io_error() {
		let dir = tempfile::tempdir().unwrap();
		let err = Dataset::from_path(dir.path().join("absent.json")).unwrap_err();
		assert!(matches!(err, DatasetError::Io { .. }));
	}
}
