use std::fmt;

type Cancel = Box<dyn FnOnce()>;

/// Handle keeping a listener registered.
///
/// Dropping the handle removes the listener. Use [`Subscription::forget`] to
/// keep it registered for as long as the source lives.
#[must_use = "dropping a Subscription immediately unsubscribes the listener"]
pub struct Subscription {
	cancel: Option<Cancel>,
}

impl Subscription {
	pub(crate) fn new(cancel: impl FnOnce() + 'static) -> Self {
		Self {
			cancel: Some(Box::new(cancel)),
		}
	}

	/// Remove the listener now.
	pub fn unsubscribe(mut self) {
		if let Some(cancel) = self.cancel.take() {
			cancel();
		}
	}

	/// Leave the listener registered for the lifetime of its source.
	pub fn forget(mut self) {
		self.cancel = None;
	}

	/// Whether the handle still owns a registration.
	#[must_use]
	pub fn is_active(&self) -> bool {
		self.cancel.is_some()
	}
}

impl Drop for Subscription {
	fn drop(&mut self) {
		if let Some(cancel) = self.cancel.take() {
			cancel();
		}
	}
}

impl fmt::Debug for Subscription {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Subscription")
			.field("active", &self.is_active())
			.finish()
	}
}

#[cfg(test)]
mod tests {
	use std::cell::Cell;
	use std::rc::Rc;

	use super::*;

	#[test]
	fn cancel_runs_once_on_drop() {
		let cancelled = Rc::new(Cell::new(0));
		{
			let cancelled = Rc::clone(&cancelled);
			let _subscription = Subscription::new(move || cancelled.set(cancelled.get() + 1));
		}
		assert_eq!(cancelled.get(), 1);
	}

	#[test]
	fn forget_skips_cancel() {
		let cancelled = Rc::new(Cell::new(false));
		let flag = Rc::clone(&cancelled);
		let subscription = Subscription::new(move || flag.set(true));
		assert!(subscription.is_active());
		subscription.forget();
		assert!(!cancelled.get());
	}
}
