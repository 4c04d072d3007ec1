use canopy::{AllergenicityLevel, FilterState, TreeNode};
use serde_json::{Value, json};

fn node(value: Value) -> TreeNode {
	serde_json::from_value(value).unwrap()
}

fn sample_nodes() -> Vec<TreeNode> {
	vec![
		node(json!({ "genus_name": "Quercus", "common_name": "Live Oak", "Allergenicity": 2 })),
		node(json!({ "genus_name": "Quercus", "common_name": "Cork Oak", "Allergenicity": "1" })),
		node(json!({ "genus_name": "Acer", "common_name": "Red Maple", "Allergenicity": 1 })),
		node(json!({ "genus_name": "Acer", "Allergenicity": "0" })),
		node(json!({ "genus_name": "Ulmus", "common_name": "Oakleaf Elm" })),
		node(json!({ "genus_name": "Magnolia", "common_name": null, "Allergenicity": " 2 " })),
	]
}

#[test]
fn no_filters_highlight_everything() {
	let state = FilterState::new();
	let predicate = state.highlight_predicate();
	assert!(predicate.matches(&node(json!({ "genus_name": "Quercus", "Allergenicity": 2 }))));
	assert!(sample_nodes().iter().all(|node| predicate.matches(node)));
}

#[test]
fn genus_selection() {
	let state = FilterState::new();
	state.set_selected_genera(["Quercus"]);
	let predicate = state.highlight_predicate();

	assert!(!predicate.matches(&node(json!({ "genus_name": "Acer" }))));
	assert!(predicate.matches(&node(json!({ "genus_name": "Quercus" }))));
}

#[test]
fn selected_genera_bound_highlighted_nodes() {
	let state = FilterState::new();
	state.set_selected_genera(["Acer", "Ulmus"]);
	let predicate = state.highlight_predicate();

	for node in sample_nodes() {
		if predicate.matches(&node) {
			assert!(["Acer", "Ulmus"].contains(&node.genus_name.as_str()));
		}
	}
}

#[test]
fn numeric_string_allergenicity_matches_level() {
	let state = FilterState::new();
	state.set_allergenic_level(Some(AllergenicityLevel::Moderate));
	let predicate = state.highlight_predicate();

	assert!(predicate.matches(&node(json!({ "genus_name": "X", "Allergenicity": "1" }))));
}

#[test]
fn level_bounds_highlighted_nodes() {
	for level in AllergenicityLevel::ALL {
		let state = FilterState::new();
		state.set_allergenic_level(Some(level));
		let predicate = state.highlight_predicate();

		for node in sample_nodes() {
			if predicate.matches(&node) {
				assert_eq!(node.allergenicity.coerce(), Some(f64::from(level.value())));
			}
		}
	}
}

#[test]
fn search_matches_common_or_genus_name() {
	let state = FilterState::new();
	state.set_search_query("oak");
	let predicate = state.highlight_predicate();

	assert!(predicate.matches(&node(json!({ "common_name": "Live Oak", "genus_name": "Quercus" }))));
	assert!(!predicate.matches(&node(json!({ "common_name": "Maple", "genus_name": "Acer" }))));
}

#[test]
fn search_ignores_case() {
	let lower = FilterState::new();
	lower.set_search_query("oak");
	let upper = FilterState::new();
	upper.set_search_query("OAK");

	let (lower, upper) = (lower.highlight_predicate(), upper.highlight_predicate());
	for node in sample_nodes() {
		assert_eq!(lower.matches(&node), upper.matches(&node));
	}
}

#[test]
fn missing_common_name_does_not_match_search() {
	let state = FilterState::new();
	state.set_search_query("leaf");
	let predicate = state.highlight_predicate();

	assert!(!predicate.matches(&node(json!({ "genus_name": "Acer" }))));
	assert!(predicate.matches(&node(json!({ "genus_name": "Ulmus", "common_name": "Oakleaf Elm" }))));
}

#[test]
fn repeated_reads_agree() {
	let state = FilterState::new();
	state.set_selected_genera(["Quercus", "Acer"]);
	state.set_search_query("a");

	let first = state.highlight_predicate();
	let second = state.highlight_predicate();
	for node in sample_nodes() {
		assert_eq!(first.matches(&node), second.matches(&node));
		assert_eq!(first.matches(&node), first.matches(&node));
	}
	assert_eq!(state.recomputations(), 1);
}

#[test]
fn fast_path_agrees_with_general_rule() {
	let state = FilterState::new();
	let criteria = state.criteria();
	let predicate = state.highlight_predicate();
	for node in sample_nodes() {
		assert_eq!(predicate.matches(&node), criteria.matches(&node));
	}
}

#[test]
fn predicate_snapshot_is_not_affected_by_later_writes() {
	let state = FilterState::new();
	state.set_selected_genera(["Acer"]);
	let before = state.highlight_predicate();

	state.set_selected_genera(["Quercus"]);
	let after = state.highlight_predicate();

	let maple = TreeNode::new("Acer");
	assert!(before.matches(&maple));
	assert!(!after.matches(&maple));
}
