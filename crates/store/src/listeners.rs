use std::cell::RefCell;
use std::rc::{Rc, Weak};

use crate::Subscription;

type Listener<T> = Rc<dyn Fn(&T)>;

/// Ordered listener registry shared between a cell and its subscriptions.
pub(crate) struct Listeners<T> {
	next_id: u64,
	entries: Vec<(u64, Listener<T>)>,
}

impl<T: 'static> Listeners<T> {
	pub(crate) fn new() -> Rc<RefCell<Self>> {
		Rc::new(RefCell::new(Self {
			next_id: 0,
			entries: Vec::new(),
		}))
	}

	/// Add `listener` and return a handle that removes it again.
	pub(crate) fn register(this: &Rc<RefCell<Self>>, listener: Listener<T>) -> Subscription {
		let id = {
			let mut listeners = this.borrow_mut();
			let id = listeners.next_id;
			listeners.next_id += 1;
			listeners.entries.push((id, listener));
			id
		};

		let registry: Weak<RefCell<Self>> = Rc::downgrade(this);
		Subscription::new(move || {
			if let Some(registry) = registry.upgrade() {
				registry.borrow_mut().entries.retain(|(entry, _)| *entry != id);
			}
		})
	}

	/// Clone the current listeners so callbacks may (un)subscribe while running.
	pub(crate) fn snapshot(&self) -> Vec<Listener<T>> {
		self.entries
			.iter()
			.map(|(_, listener)| Rc::clone(listener))
			.collect()
	}

	pub(crate) fn len(&self) -> usize {
		self.entries.len()
	}
}
