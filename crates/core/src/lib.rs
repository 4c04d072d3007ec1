//! Filter state for browsing a tree dataset.
//!
//! The crate models the criteria a user picks (genera, allergenicity level,
//! free-text search), the read-only catalogs that feed the filter controls,
//! and the highlight predicate a renderer applies to every node.

pub mod criteria;
pub mod dataset;
pub mod error;
pub mod genus;
pub mod level;
pub mod node;
pub mod state;

pub use criteria::{FilterCriteria, HighlightPredicate};
pub use dataset::Dataset;
pub use error::{DatasetError, FilterError};
pub use genus::GenusCatalog;
pub use level::{AllergenicityLevel, AllergenicityLevelCatalog, LEVEL_OPTIONS, LevelOption};
pub use node::{Allergenicity, TreeNode};
pub use state::FilterState;
