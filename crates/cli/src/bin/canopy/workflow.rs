use anyhow::{Context, Result};
use canopy_core::{Dataset, FilterCriteria, FilterState, TreeNode};
use serde::Serialize;

use crate::settings::AppConfig;

/// Loads the dataset and drives the filter state from configuration.
pub(crate) struct FilterWorkflow {
	dataset: Dataset,
	state: FilterState,
	only_highlighted: bool,
}

impl FilterWorkflow {
	/// Load the configured dataset and apply the configured criteria.
	pub(crate) fn from_config(config: &AppConfig) -> Result<Self> {
		let dataset = Dataset::from_path(&config.dataset)
			.with_context(|| format!("failed to load dataset {}", config.dataset.display()))?;
		Ok(Self::with_dataset(
			dataset,
			config.criteria.clone(),
			config.only_highlighted,
		))
	}

	pub(crate) fn with_dataset(
		dataset: Dataset,
		criteria: FilterCriteria,
		only_highlighted: bool,
	) -> Self {
		let state = FilterState::new();
		state.load_genera(&dataset);

		for genus in &criteria.selected_genera {
			if !state.genus_catalog().contains(genus) {
				log::warn!("genus '{genus}' does not occur in the dataset");
			}
		}
		state.apply(criteria);

		Self {
			dataset,
			state,
			only_highlighted,
		}
	}

	/// Genus names available for selection.
	pub(crate) fn genera(&self) -> Vec<String> {
		self.state.genus_catalog().names()
	}

	/// Evaluate the current predicate over the whole dataset.
	pub(crate) fn report(&self) -> Report<'_> {
		let predicate = self.state.highlight_predicate();
		let rows: Vec<Row<'_>> = self
			.dataset
			.iter()
			.map(|node| Row {
				highlighted: predicate.matches(node),
				node,
			})
			.collect();
		let highlighted = rows.iter().filter(|row| row.highlighted).count();
		log::info!(
			"{highlighted} of {} trees highlighted",
			self.dataset.len()
		);

		let rows = if self.only_highlighted {
			rows.into_iter().filter(|row| row.highlighted).collect()
		} else {
			rows
		};

		Report {
			criteria: self.state.criteria(),
			total: self.dataset.len(),
			highlighted,
			rows,
		}
	}
}

/// Outcome of applying the filters to the dataset.
#[derive(Debug, Serialize)]
pub(crate) struct Report<'a> {
	pub(crate) criteria: FilterCriteria,
	pub(crate) total: usize,
	pub(crate) highlighted: usize,
	pub(crate) rows: Vec<Row<'a>>,
}

#[derive(Debug, Serialize)]
pub(crate) struct Row<'a> {
	pub(crate) highlighted: bool,
	#[serde(flatten)]
	pub(crate) node: &'a TreeNode,
}

#[cfg(test)]
mod tests {
	use canopy_core::AllergenicityLevel;
	use serde_json::json;

	use super::*;

	fn sample() -> Dataset {
		Dataset::from_value(json!([
			{ "genus_name": "Quercus", "common_name": "Live Oak", "Allergenicity": 2 },
			{ "genus_name": "Acer", "common_name": "Red Maple", "Allergenicity": "1" },
			{ "genus_name": "Ulmus", "Allergenicity": 1 }
		]))
		.unwrap()
	}

	#[test]
	fn neutral_criteria_highlight_all_rows() {
		let workflow = FilterWorkflow::with_dataset(sample(), FilterCriteria::new(), false);
		let report = workflow.report();
		assert_eq!(report.total, 3);
		assert_eq!(report.highlighted, 3);
		assert_eq!(workflow.genera(), vec!["Acer", "Quercus", "Ulmus"]);
	}

	#[test]
	fn only_highlighted_drops_other_rows() {
		let criteria = FilterCriteria::new().with_level(Some(AllergenicityLevel::Moderate));
		let workflow = FilterWorkflow::with_dataset(sample(), criteria, true);
		let report = workflow.report();

		assert_eq!(report.highlighted, 2);
		assert_eq!(report.rows.len(), 2);
		assert!(report.rows.iter().all(|row| row.highlighted));
	}

	#[test]
	fn rows_keep_dataset_order() {
		let criteria = FilterCriteria::new().with_search("oak");
		let workflow = FilterWorkflow::with_dataset(sample(), criteria, false);
		let flags: Vec<bool> = workflow.report().rows.iter().map(|row| row.highlighted).collect();
		assert_eq!(flags, vec![true, false, false]);
	}
}
