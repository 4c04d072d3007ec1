//! Reactive filter state for browsing tree datasets.
//!
//! `canopy` re-exports the filter model from [`canopy_core`] and the reactive
//! primitives it is built on from [`canopy_store`].
//!
//! ```
//! use canopy::{AllergenicityLevel, FilterState, TreeNode};
//!
//! let state = FilterState::new();
//! state.set_selected_genera(["Quercus"]);
//! state.set_allergenic_level(Some(AllergenicityLevel::High));
//!
//! let highlight = state.highlight_predicate();
//! let oak = TreeNode::new("Quercus").with_allergenicity("2");
//! assert!(highlight.matches(&oak));
//! assert!(!highlight.matches(&TreeNode::new("Acer")));
//! ```

pub use canopy_core::*;

/// Reactive cells and derived values.
pub mod store {
	pub use canopy_store::{Derived, Source, Subscription, Writable};
}
