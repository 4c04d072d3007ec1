//! The filter state shared between data loading, controls and rendering.
//!
//! [`FilterState`] owns four cells. Writes to the genus selection, the
//! allergenicity level or the search query mark the highlight predicate
//! stale; the predicate is rebuilt on the next
//! [`FilterState::highlight_predicate`] call. The hovered node is tracked for
//! the UI only and never affects highlighting.

use std::collections::BTreeSet;

use canopy_store::{Derived, Subscription, Writable};

use crate::criteria::{FilterCriteria, HighlightPredicate};
use crate::dataset::Dataset;
use crate::genus::GenusCatalog;
use crate::level::{AllergenicityLevel, AllergenicityLevelCatalog};
use crate::node::TreeNode;

/// Filter criteria cells plus the predicate derived from them.
///
/// Construct one per view and hand references to the components that read
/// or write it.
#[derive(Debug)]
pub struct FilterState {
	selected_genera: Writable<BTreeSet<String>>,
	allergenic_level: Writable<Option<AllergenicityLevel>>,
	search_query: Writable<String>,
	hovered_node: Writable<Option<TreeNode>>,
	genus_catalog: GenusCatalog,
	level_catalog: AllergenicityLevelCatalog,
	highlight: Derived<HighlightPredicate>,
}

impl FilterState {
	/// State with no genera selected, no level constraint and an empty query.
	#[must_use]
	pub fn new() -> Self {
		let selected_genera = Writable::new(BTreeSet::new());
		let allergenic_level = Writable::new(None);
		let search_query = Writable::new(String::new());

		let highlight = {
			let (genera, level, query) = (
				selected_genera.clone(),
				allergenic_level.clone(),
				search_query.clone(),
			);
			Derived::new(&[&selected_genera, &allergenic_level, &search_query], move || {
				let criteria = FilterCriteria {
					selected_genera: genera.get(),
					allergenic_level: level.get(),
					search_query: query.get(),
				};
				HighlightPredicate::from_criteria(&criteria)
			})
		};

		Self {
			selected_genera,
			allergenic_level,
			search_query,
			hovered_node: Writable::new(None),
			genus_catalog: GenusCatalog::new(),
			level_catalog: AllergenicityLevelCatalog::standard(),
			highlight,
		}
	}

	/// Replace the selected genera. The previous selection is discarded.
	pub fn set_selected_genera<I, S>(&self, genera: I)
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		let genera: BTreeSet<String> = genera.into_iter().map(Into::into).collect();
		log::trace!("selected genera set to {genera:?}");
		self.selected_genera.set(genera);
	}

	pub fn set_allergenic_level(&self, level: Option<AllergenicityLevel>) {
		log::trace!("allergenic level set to {level:?}");
		self.allergenic_level.set(level);
	}

	/// Store the query verbatim. Case folding happens when the predicate is built.
	pub fn set_search_query(&self, query: impl Into<String>) {
		let query = query.into();
		log::trace!("search query set to {query:?}");
		self.search_query.set(query);
	}

	pub fn set_hovered_node(&self, node: Option<TreeNode>) {
		self.hovered_node.set(node);
	}

	/// Write every filter dimension from `criteria`.
	pub fn apply(&self, criteria: FilterCriteria) {
		let FilterCriteria {
			selected_genera,
			allergenic_level,
			search_query,
		} = criteria;
		self.selected_genera.set(selected_genera);
		self.allergenic_level.set(allergenic_level);
		self.search_query.set(search_query);
	}

	#[must_use]
	pub fn selected_genera(&self) -> BTreeSet<String> {
		self.selected_genera.get()
	}

	#[must_use]
	pub fn allergenic_level(&self) -> Option<AllergenicityLevel> {
		self.allergenic_level.get()
	}

	#[must_use]
	pub fn search_query(&self) -> String {
		self.search_query.get()
	}

	#[must_use]
	pub fn hovered_node(&self) -> Option<TreeNode> {
		self.hovered_node.get()
	}

	/// Snapshot of the current filter criteria.
	#[must_use]
	pub fn criteria(&self) -> FilterCriteria {
		FilterCriteria {
			selected_genera: self.selected_genera(),
			allergenic_level: self.allergenic_level(),
			search_query: self.search_query(),
		}
	}

	/// Predicate for the current criteria.
	///
	/// Rebuilt only when a filter cell changed since the previous call.
	#[must_use]
	pub fn highlight_predicate(&self) -> HighlightPredicate {
		self.highlight.get()
	}

	/// Run `listener` whenever the highlight predicate goes stale.
	pub fn subscribe_highlight(&self, listener: impl Fn() + 'static) -> Subscription {
		self.highlight.subscribe(listener)
	}

	/// Run `listener` with the new hovered node after every change.
	pub fn subscribe_hovered(&self, listener: impl Fn(Option<&TreeNode>) + 'static) -> Subscription {
		self.hovered_node
			.subscribe(move |node| listener(node.as_ref()))
	}

	/// How many times the highlight predicate has been rebuilt.
	#[must_use]
	pub fn recomputations(&self) -> u64 {
		self.highlight.recomputations()
	}

	#[must_use]
	pub fn genus_catalog(&self) -> &GenusCatalog {
		&self.genus_catalog
	}

	#[must_use]
	pub fn level_catalog(&self) -> &AllergenicityLevelCatalog {
		&self.level_catalog
	}

	/// Fill the genus catalog from a loaded dataset.
	pub fn load_genera(&self, dataset: &Dataset) {
		self.genus_catalog.replace_all(dataset.genera());
	}
}

impl Default for FilterState {
	fn default() -> Self {
		Self::new()
	}
}
