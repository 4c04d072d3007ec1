use std::collections::BTreeSet;
use std::fmt;
use std::rc::Rc;

use serde::{Deserialize, Serialize};

use crate::level::AllergenicityLevel;
use crate::node::TreeNode;

/// The user-selected filters that decide which trees are highlighted.
///
/// Each dimension passes everything through when it is empty or unset.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterCriteria {
	pub selected_genera: BTreeSet<String>,
	pub allergenic_level: Option<AllergenicityLevel>,
	pub search_query: String,
}

impl FilterCriteria {
	#[must_use]
	pub fn new() -> Self {
		Self::default()
	}

	#[must_use]
	pub fn with_genera<I, S>(mut self, genera: I) -> Self
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		self.selected_genera = genera.into_iter().map(Into::into).collect();
		self
	}

	#[must_use]
	pub fn with_level(mut self, level: Option<AllergenicityLevel>) -> Self {
		self.allergenic_level = level;
		self
	}

	#[must_use]
	pub fn with_search(mut self, query: impl Into<String>) -> Self {
		self.search_query = query.into();
		self
	}

	/// Whether no dimension constrains anything.
	#[must_use]
	pub fn is_neutral(&self) -> bool {
		self.selected_genera.is_empty()
			&& self.allergenic_level.is_none()
			&& self.search_query.is_empty()
	}

	/// Evaluate the criteria against a single node.
	#[must_use]
	pub fn matches(&self, node: &TreeNode) -> bool {
		genus_matches(&self.selected_genera, node)
			&& level_matches(self.allergenic_level, node)
			&& search_matches(&self.search_query.to_lowercase(), node)
	}

	/// Build the highlight predicate for a snapshot of these criteria.
	#[must_use]
	pub fn predicate(&self) -> HighlightPredicate {
		HighlightPredicate::from_criteria(self)
	}
}

fn genus_matches(selected: &BTreeSet<String>, node: &TreeNode) -> bool {
	selected.is_empty() || selected.contains(&node.genus_name)
}

fn level_matches(level: Option<AllergenicityLevel>, node: &TreeNode) -> bool {
	level.is_none_or(|level| level.matches(node.allergenicity.coerce()))
}

/// `needle` must already be lower-cased.
fn search_matches(needle: &str, node: &TreeNode) -> bool {
	if needle.is_empty() {
		return true;
	}
	let common = node
		.common_name
		.as_deref()
		.is_some_and(|name| name.to_lowercase().contains(needle));
	common || node.genus_name.to_lowercase().contains(needle)
}

/// Pure function from a tree node to "should this node be emphasized".
///
/// A predicate captures the criteria it was built from; later filter changes
/// produce a new predicate rather than altering this one. Clones are cheap.
#[derive(Clone)]
pub struct HighlightPredicate {
	test: Rc<dyn Fn(&TreeNode) -> bool>,
}

impl HighlightPredicate {
	pub fn new(test: impl Fn(&TreeNode) -> bool + 'static) -> Self {
		Self { test: Rc::new(test) }
	}

	/// Predicate that highlights every node.
	#[must_use]
	pub fn everything() -> Self {
		Self::new(|_| true)
	}

	#[must_use]
	pub fn from_criteria(criteria: &FilterCriteria) -> Self {
		if criteria.is_neutral() {
			return Self::everything();
		}

		let genera = criteria.selected_genera.clone();
		let level = criteria.allergenic_level;
		let needle = criteria.search_query.to_lowercase();
		Self::new(move |node| {
			genus_matches(&genera, node)
				&& level_matches(level, node)
				&& search_matches(&needle, node)
		})
	}

	#[must_use]
	pub fn matches(&self, node: &TreeNode) -> bool {
		(self.test)(node)
	}

	/// Borrow the predicate as a plain closure, e.g. for `Iterator::filter`.
	pub fn as_fn(&self) -> impl Fn(&TreeNode) -> bool + '_ {
		move |node: &TreeNode| self.matches(node)
	}

	/// Number of `nodes` the predicate highlights.
	#[must_use]
	pub fn count<'a>(&self, nodes: impl IntoIterator<Item = &'a TreeNode>) -> usize {
		nodes.into_iter().filter(|node| self.matches(node)).count()
	}
}

impl fmt::Debug for HighlightPredicate {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str("HighlightPredicate(..)")
	}
}
