//! Single-threaded reactive primitives for UI-facing state.
//!
//! A [`Writable`] is a shared cell whose writes are pushed synchronously to
//! its subscribers. A [`Derived`] tracks any number of [`Source`]s: every
//! write to a tracked source marks the derived cache stale and notifies the
//! derived's own listeners, while the value itself is only recomputed on the
//! next [`Derived::get`].
//!
//! Everything here is built on [`Rc`](std::rc::Rc) and
//! [`RefCell`](std::cell::RefCell), so the types are `!Send` and are meant to
//! live on the thread that owns the UI state.
//!
//! ```
//! use canopy_store::{Derived, Writable};
//!
//! let width = Writable::new(3);
//! let height = Writable::new(4);
//! let area = {
//! 	let (w, h) = (width.clone(), height.clone());
//! 	Derived::new(&[&width, &height], move || w.get() * h.get())
//! };
//!
//! assert_eq!(area.get(), 12);
//! width.set(5);
//! assert!(area.is_stale());
//! assert_eq!(area.get(), 20);
//! assert_eq!(area.recomputations(), 2);
//! ```

mod derived;
mod listeners;
mod subscription;
mod writable;

use std::rc::Rc;

pub use derived::Derived;
pub use subscription::Subscription;
pub use writable::Writable;

/// Anything a [`Derived`] value can track.
pub trait Source {
	/// Register `listener` to run after every change of this source.
	///
	/// The listener receives no payload; dependents read the current value
	/// themselves when they need it.
	fn watch(&self, listener: Rc<dyn Fn()>) -> Subscription;
}
