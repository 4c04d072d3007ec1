use std::collections::{BTreeSet, HashSet};

use canopy_store::{Subscription, Writable};

use crate::node::TreeNode;

/// Distinct genus names a user can pick from.
///
/// The catalog is filled by whatever loads the dataset and is only ever
/// replaced as a whole. Clones share the same underlying list.
#[derive(Debug, Clone, Default)]
pub struct GenusCatalog {
	genera: Writable<Vec<String>>,
}

impl GenusCatalog {
	#[must_use]
	pub fn new() -> Self {
		Self::default()
	}

	/// Catalog of the sorted distinct genera present in `nodes`.
	#[must_use]
	pub fn from_nodes<'a>(nodes: impl IntoIterator<Item = &'a TreeNode>) -> Self {
		let catalog = Self::new();
		catalog.replace_all(distinct_genera(nodes));
		catalog
	}

	/// Replace every name in the catalog.
	///
	/// Empty names are dropped and duplicates keep their first position.
	pub fn replace_all<I, S>(&self, genera: I)
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		let mut seen = HashSet::new();
		let names: Vec<String> = genera
			.into_iter()
			.map(Into::into)
			.filter(|name: &String| !name.is_empty() && seen.insert(name.clone()))
			.collect();
		log::debug!("genus catalog replaced with {} names", names.len());
		self.genera.set(names);
	}

	/// Snapshot of the names in catalog order.
	#[must_use]
	pub fn names(&self) -> Vec<String> {
		self.genera.get()
	}

	#[must_use]
	pub fn contains(&self, genus: &str) -> bool {
		self.genera.with(|names| names.iter().any(|name| name == genus))
	}

	#[must_use]
	pub fn len(&self) -> usize {
		self.genera.with(Vec::len)
	}

	#[must_use]
	pub fn is_empty(&self) -> bool {
		self.len() == 0
	}

	/// Run `listener` with the new names after every replacement.
	pub fn subscribe(&self, listener: impl Fn(&[String]) + 'static) -> Subscription {
		self.genera.subscribe(move |names| listener(names.as_slice()))
	}
}

/// Sorted distinct non-empty genus names found in `nodes`.
pub fn distinct_genera<'a>(nodes: impl IntoIterator<Item = &'a TreeNode>) -> Vec<String> {
	nodes
		.into_iter()
		.map(|node| node.genus_name.as_str())
		.filter(|genus| !genus.is_empty())
		.collect::<BTreeSet<_>>()
		.into_iter()
		.map(str::to_string)
		.collect()
}

#[cfg(test)]
mod tests {
	use std::cell::RefCell;
	use std::rc::Rc;

	use super::*;

	#[test]
	fn from_nodes_is_sorted_and_distinct() {
		let nodes = [
			TreeNode::new("Quercus"),
			TreeNode::new("Acer"),
			TreeNode::new("Quercus"),
			TreeNode::new(""),
		];
		let catalog = GenusCatalog::from_nodes(&nodes);
		assert_eq!(catalog.names(), vec!["Acer", "Quercus"]);
	}

	#[test]
	fn replace_all_discards_previous_names() {
		let catalog = GenusCatalog::new();
		catalog.replace_all(["Acer", "Ulmus"]);
		catalog.replace_all(["Pinus", "Pinus", "Betula"]);

		assert_eq!(catalog.names(), vec!["Pinus", "Betula"]);
		assert!(!catalog.contains("Acer"));
		assert_eq!(catalog.len(), 2);
	}

	#[test]
	fn subscribers_see_replacements() {
		let catalog = GenusCatalog::new();
		let seen = Rc::new(RefCell::new(Vec::new()));
		let _subscription = {
			let seen = Rc::clone(&seen);
			catalog.subscribe(move |names| seen.borrow_mut().push(names.len()))
		};

		catalog.replace_all(["Acer"]);
		catalog.replace_all(Vec::<String>::new());
		assert_eq!(*seen.borrow(), vec![1, 0]);
		assert!(catalog.is_empty());
	}
}
