//! Explicit subscription lists for model change notification.
//!
//! Every observable model event (validity, click, page changes) is an
//! [`Emitter`]. Listeners are invoked synchronously, in subscription order,
//! from the same dispatch thread that calls [`Emitter::emit`].

use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::Rc;

/// Token returned by [`Emitter::subscribe`], used to unsubscribe.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct Subscription(u64);

type Listener<T> = Rc<dyn Fn(&T)>;

/// A single-threaded event source.
pub struct Emitter<T> {
    listeners: RefCell<Vec<(Subscription, Listener<T>)>>,
    next_id: Cell<u64>,
}

impl<T> Default for Emitter<T> {
    fn default() -> Self {
        Self {
            listeners: RefCell::new(Vec::new()),
            next_id: Cell::new(0),
        }
    }
}

impl<T> Emitter<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a listener. It stays registered until unsubscribed.
    pub fn subscribe(&self, listener: impl Fn(&T) + 'static) -> Subscription {
        let id = Subscription(self.next_id.get());
        self.next_id.set(id.0 + 1);
        self.listeners.borrow_mut().push((id, Rc::new(listener)));
        id
    }

    /// Remove a listener. Returns false if the token was unknown.
    pub fn unsubscribe(&self, token: Subscription) -> bool {
        let mut listeners = self.listeners.borrow_mut();
        let before = listeners.len();
        listeners.retain(|(id, _)| *id != token);
        listeners.len() != before
    }

    /// Invoke every listener with `payload`.
    ///
    /// The listener list is snapshotted first, so listeners may subscribe or
    /// unsubscribe while being notified.
    pub fn emit(&self, payload: &T) {
        let snapshot: Vec<Listener<T>> = self
            .listeners
            .borrow()
            .iter()
            .map(|(_, listener)| listener.clone())
            .collect();
        for listener in snapshot {
            listener(payload);
        }
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.borrow().len()
    }
}

impl<T> fmt::Debug for Emitter<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Emitter")
            .field("listeners", &self.listener_count())
            .finish()
    }
}

/// Observable validity flag shared by dialogs, tabs and wizard pages.
#[derive(Debug)]
pub struct Validity {
    valid: Cell<bool>,
    changed: Emitter<bool>,
}

impl Default for Validity {
    fn default() -> Self {
        Self {
            valid: Cell::new(true),
            changed: Emitter::new(),
        }
    }
}

impl Validity {
    pub fn is_valid(&self) -> bool {
        self.valid.get()
    }

    /// Store the new validity and notify listeners, even if it is unchanged.
    pub fn set(&self, valid: bool) {
        self.valid.set(valid);
        self.changed.emit(&valid);
    }

    pub fn on_changed(&self) -> &Emitter<bool> {
        &self.changed
    }
}
