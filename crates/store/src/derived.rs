use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::{Rc, Weak};

use crate::listeners::Listeners;
use crate::{Source, Subscription};

type Compute<T> = Box<dyn Fn() -> T>;

/// Value computed from other sources and cached until one of them changes.
///
/// Source writes only mark the cache stale and notify listeners registered
/// through [`Derived::subscribe`]; the compute closure runs on the next
/// [`Derived::get`]. Cloning a `Derived` yields another handle to the same
/// cache.
pub struct Derived<T> {
	inner: Rc<Inner<T>>,
}

struct Inner<T> {
	compute: Compute<T>,
	cache: RefCell<Option<T>>,
	stale: Cell<bool>,
	recomputations: Cell<u64>,
	listeners: Rc<RefCell<Listeners<()>>>,
	sources: RefCell<Vec<Subscription>>,
}

impl<T: Clone + 'static> Derived<T> {
	/// Track `sources` and compute the value with `compute`.
	///
	/// `compute` should read the sources it depends on; it is not called until
	/// the first [`Derived::get`].
	pub fn new(sources: &[&dyn Source], compute: impl Fn() -> T + 'static) -> Self {
		let inner = Rc::new(Inner {
			compute: Box::new(compute),
			cache: RefCell::new(None),
			stale: Cell::new(true),
			recomputations: Cell::new(0),
			listeners: Listeners::new(),
			sources: RefCell::new(Vec::with_capacity(sources.len())),
		});

		let subscriptions = sources
			.iter()
			.map(|source| {
				let weak: Weak<Inner<T>> = Rc::downgrade(&inner);
				source.watch(Rc::new(move || {
					if let Some(inner) = weak.upgrade() {
						inner.invalidate();
					}
				}))
			})
			.collect();
		*inner.sources.borrow_mut() = subscriptions;

		Self { inner }
	}

	/// Current value, recomputed first if any source changed since the last read.
	#[must_use]
	pub fn get(&self) -> T {
		if !self.inner.stale.get()
			&& let Some(value) = self.inner.cache.borrow().as_ref()
		{
			return value.clone();
		}

		let value = (self.inner.compute)();
		*self.inner.cache.borrow_mut() = Some(value.clone());
		self.inner.stale.set(false);
		let count = self.inner.recomputations.get() + 1;
		self.inner.recomputations.set(count);
		log::debug!("derived value recomputed ({count} total)");
		value
	}

	/// Whether the next [`Derived::get`] will run the compute closure.
	#[must_use]
	pub fn is_stale(&self) -> bool {
		self.inner.stale.get()
	}

	/// How many times the compute closure has run.
	#[must_use]
	pub fn recomputations(&self) -> u64 {
		self.inner.recomputations.get()
	}

	/// Run `listener` whenever a tracked source changes.
	///
	/// Listeners are told that the value went stale; they call
	/// [`Derived::get`] when they want the fresh value.
	pub fn subscribe(&self, listener: impl Fn() + 'static) -> Subscription {
		Listeners::register(&self.inner.listeners, Rc::new(move |_: &()| listener()))
	}

	/// Number of sources this value tracks.
	#[must_use]
	pub fn source_count(&self) -> usize {
		self.inner.sources.borrow().len()
	}
}

impl<T> Inner<T> {
	fn invalidate(&self) {
		self.stale.set(true);
		let listeners = self.listeners.borrow().snapshot();
		for listener in listeners {
			listener(&());
		}
	}
}

impl<T> Clone for Derived<T> {
	fn clone(&self) -> Self {
		Self {
			inner: Rc::clone(&self.inner),
		}
	}
}

impl<T: Clone + 'static> Source for Derived<T> {
	fn watch(&self, listener: Rc<dyn Fn()>) -> Subscription {
		self.subscribe(move || listener())
	}
}

impl<T> fmt::Debug for Derived<T> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Derived")
			.field("stale", &self.inner.stale.get())
			.field("recomputations", &self.inner.recomputations.get())
			.finish_non_exhaustive()
	}
}
