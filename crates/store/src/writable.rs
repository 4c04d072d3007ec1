use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::Rc;

use crate::listeners::Listeners;
use crate::{Source, Subscription};

/// Shared, mutable cell that pushes every write to its subscribers.
///
/// Cloning a `Writable` yields another handle to the same cell.
pub struct Writable<T> {
	inner: Rc<Inner<T>>,
}

struct Inner<T> {
	value: RefCell<T>,
	version: Cell<u64>,
	listeners: Rc<RefCell<Listeners<T>>>,
	notifying: Cell<bool>,
	pending: Cell<bool>,
}

impl<T: Clone + 'static> Writable<T> {
	/// Create a cell holding `value`.
	#[must_use]
	pub fn new(value: T) -> Self {
		Self {
			inner: Rc::new(Inner {
				value: RefCell::new(value),
				version: Cell::new(0),
				listeners: Listeners::new(),
				notifying: Cell::new(false),
				pending: Cell::new(false),
			}),
		}
	}

	/// Clone the current value out of the cell.
	#[must_use]
	pub fn get(&self) -> T {
		self.inner.value.borrow().clone()
	}

	/// Borrow the current value for the duration of `f`.
	pub fn with<R>(&self, f: impl FnOnce(&T) -> R) -> R {
		f(&self.inner.value.borrow())
	}

	/// Replace the value and notify subscribers.
	pub fn set(&self, value: T) {
		*self.inner.value.borrow_mut() = value;
		self.changed();
	}

	/// Mutate the value in place and notify subscribers.
	pub fn update(&self, f: impl FnOnce(&mut T)) {
		f(&mut self.inner.value.borrow_mut());
		self.changed();
	}

	/// Number of writes applied since creation.
	#[must_use]
	pub fn version(&self) -> u64 {
		self.inner.version.get()
	}

	/// Run `listener` with the new value after every write.
	///
	/// The listener is not invoked for the value present at subscription time.
	pub fn subscribe(&self, listener: impl Fn(&T) + 'static) -> Subscription {
		Listeners::register(&self.inner.listeners, Rc::new(listener))
	}

	/// Number of listeners currently registered.
	#[must_use]
	pub fn subscriber_count(&self) -> usize {
		self.inner.listeners.borrow().len()
	}

	fn changed(&self) {
		let version = self.inner.version.get() + 1;
		self.inner.version.set(version);
		log::trace!("cell written (version {version})");
		self.notify();
	}

	/// Deliver the latest value to every listener.
	///
	/// A write issued from inside a listener is not delivered recursively;
	/// it flags another round that runs once the current one has finished,
	/// so listeners always observe writes in order and end on the final value.
	fn notify(&self) {
		if self.inner.notifying.replace(true) {
			self.inner.pending.set(true);
			return;
		}
		let _round = NotifyRound(&*self.inner);

		loop {
			let value = self.get();
			let listeners = self.inner.listeners.borrow().snapshot();
			for listener in listeners {
				listener(&value);
			}
			if !self.inner.pending.replace(false) {
				break;
			}
		}
	}
}

/// Clears the notification flags when a round ends, including by unwinding
/// out of a panicking listener.
struct NotifyRound<'a, T>(&'a Inner<T>);

impl<T> Drop for NotifyRound<'_, T> {
	fn drop(&mut self) {
		self.0.pending.set(false);
		self.0.notifying.set(false);
	}
}

impl<T> Clone for Writable<T> {
	fn clone(&self) -> Self {
		Self {
			inner: Rc::clone(&self.inner),
		}
	}
}

impl<T: Clone + Default + 'static> Default for Writable<T> {
	fn default() -> Self {
		Self::new(T::default())
	}
}

impl<T: Clone + 'static> Source for Writable<T> {
	fn watch(&self, listener: Rc<dyn Fn()>) -> Subscription {
		self.subscribe(move |_| listener())
	}
}

impl<T: fmt::Debug> fmt::Debug for Writable<T> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Writable")
			.field("value", &self.inner.value)
			.field("version", &self.inner.version.get())
			.finish()
	}
}
