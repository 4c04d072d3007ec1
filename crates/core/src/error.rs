use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Errors raised when untyped input is turned into filter criteria.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum FilterError {
	/// A numeric allergenicity level outside `0..=2`.
	#[error("allergenicity level {value} is out of range (expected 0, 1 or 2)")]
	InvalidAllergenicity { value: i64 },

	/// A textual allergenicity level that names no known level.
	#[error("unknown allergenicity level '{input}'")]
	UnknownLevel { input: String },
}

/// Errors that can occur while loading a tree dataset.
#[derive(Debug, Error)]
pub enum DatasetError {
	#[error("failed to read dataset {}", path.display())]
	Io {
		path: PathBuf,
		#[source]
		source: io::Error,
	},

	#[error("dataset is not valid JSON")]
	Parse(#[from] serde_json::Error),

	/// A record could not be read as a tree node.
	#[error("record {index} is not a tree node")]
	Record {
		index: usize,
		#[source]
		source: serde_json::Error,
	},

	#[error("unexpected dataset shape: {0}")]
	UnexpectedShape(&'static str),
}
