//! Body add/remove notifications.
//!
//! Simulations own a [`BodyEvents`] and fire it whenever their body list
//! changes. Listeners are registered through `subscribe_*`, which hands back a
//! [`Subscription`]; dropping the subscription (or calling
//! [`Subscription::cancel`]) unregisters the listener.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use crate::core::body::Body;

type Listener = Rc<RefCell<dyn FnMut(&Body)>>;

#[derive(Default)]
struct Listeners {
    next_id: u64,
    added: Vec<(u64, Listener)>,
    removed: Vec<(u64, Listener)>,
}

impl Listeners {
    fn insert(&mut self, kind: EventKind, listener: Listener) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        match kind {
            EventKind::Added => self.added.push((id, listener)),
            EventKind::Removed => self.removed.push((id, listener)),
        }
        id
    }

    fn remove(&mut self, id: u64) {
        self.added.retain(|(i, _)| *i != id);
        self.removed.retain(|(i, _)| *i != id);
    }

    fn snapshot(&self, kind: EventKind) -> Vec<Listener> {
        let list = match kind {
            EventKind::Added => &self.added,
            EventKind::Removed => &self.removed,
        };
        list.iter().map(|(_, l)| Rc::clone(l)).collect()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum EventKind {
    Added,
    Removed,
}

/// Listener registry for body lifecycle events.
#[derive(Default)]
pub struct BodyEvents {
    listeners: Rc<RefCell<Listeners>>,
}

impl BodyEvents {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe_added(&mut self, listener: impl FnMut(&Body) + 'static) -> Subscription {
        self.subscribe(EventKind::Added, Rc::new(RefCell::new(listener)))
    }

    pub fn subscribe_removed(&mut self, listener: impl FnMut(&Body) + 'static) -> Subscription {
        self.subscribe(EventKind::Removed, Rc::new(RefCell::new(listener)))
    }

    fn subscribe(&mut self, kind: EventKind, listener: Listener) -> Subscription {
        let id = self.listeners.borrow_mut().insert(kind, listener);
        Subscription {
            id,
            listeners: Rc::downgrade(&self.listeners),
        }
    }

    pub fn emit_added(&self, body: &Body) {
        self.emit(EventKind::Added, body);
    }

    pub fn emit_removed(&self, body: &Body) {
        self.emit(EventKind::Removed, body);
    }

    // Listeners may drop subscriptions while running, so iterate a snapshot.
    fn emit(&self, kind: EventKind, body: &Body) {
        let snapshot = self.listeners.borrow().snapshot(kind);
        for listener in snapshot {
            (&mut *listener.borrow_mut())(body);
        }
    }

    /// Number of registered listeners (added + removed).
    pub fn listener_count(&self) -> usize {
        let l = self.listeners.borrow();
        l.added.len() + l.removed.len()
    }
}

/// Cancellation handle for a body event listener. Unregisters on drop.
pub struct Subscription {
    id: u64,
    listeners: Weak<RefCell<Listeners>>,
}

impl Subscription {
    /// Unregister the listener now. Equivalent to dropping the handle; the
    /// `Drop` impl does the unregistering.
    pub fn cancel(self) {
        drop(self);
    }

    /// Whether the event source this subscription belongs to still exists.
    pub fn is_attached(&self) -> bool {
        self.listeners.strong_count() > 0
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(listeners) = self.listeners.upgrade() {
            listeners.borrow_mut().remove(self.id);
        }
    }
}

impl std::fmt::Debug for Subscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription")
            .field("id", &self.id)
            .field("attached", &self.is_attached())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::types::BodyId;
    use crate::core::shape::Shape;
    use std::cell::Cell;

    fn body(id: u32) -> Body {
        Body::new(BodyId(id), Shape::circle(1.0))
    }

    #[test]
    fn listeners_receive_matching_events() {
        let mut events = BodyEvents::new();
        let added = Rc::new(Cell::new(0));
        let removed = Rc::new(Cell::new(0));

        let a = Rc::clone(&added);
        let _s1 = events.subscribe_added(move |_| a.set(a.get() + 1));
        let r = Rc::clone(&removed);
        let _s2 = events.subscribe_removed(move |_| r.set(r.get() + 1));

        events.emit_added(&body(1));
        events.emit_added(&body(2));
        events.emit_removed(&body(1));

        assert_eq!(added.get(), 2);
        assert_eq!(removed.get(), 1);
    }

    #[test]
    fn dropping_subscription_unregisters() {
        let mut events = BodyEvents::new();
        let hits = Rc::new(Cell::new(0));
        let h = Rc::clone(&hits);
        let sub = events.subscribe_added(move |_| h.set(h.get() + 1));
        assert_eq!(events.listener_count(), 1);

        events.emit_added(&body(1));
        drop(sub);
        events.emit_added(&body(2));

        assert_eq!(hits.get(), 1);
        assert_eq!(events.listener_count(), 0);
    }

    #[test]
    fn cancel_unregisters() {
        let mut events = BodyEvents::new();
        let sub = events.subscribe_removed(|_| {});
        assert!(sub.is_attached());
        sub.cancel();
        assert_eq!(events.listener_count(), 0);
    }

    #[test]
    fn cancel_stops_only_that_listener() {
        let mut events = BodyEvents::new();
        let (first, second) = (Rc::new(Cell::new(0)), Rc::new(Cell::new(0)));
        let (f, s) = (Rc::clone(&first), Rc::clone(&second));
        let cancelled = events.subscribe_removed(move |_| f.set(f.get() + 1));
        let _kept = events.subscribe_removed(move |_| s.set(s.get() + 1));

        cancelled.cancel();
        events.emit_removed(&body(1));

        assert_eq!(first.get(), 0);
        assert_eq!(second.get(), 1);
        assert_eq!(events.listener_count(), 1);
    }

    #[test]
    fn subscription_outliving_source_is_harmless() {
        let mut events = BodyEvents::new();
        let sub = events.subscribe_added(|_| {});
        drop(events);
        assert!(!sub.is_attached());
        drop(sub);
    }

    #[test]
    fn listener_sees_body_fields() {
        let mut events = BodyEvents::new();
        let seen = Rc::new(Cell::new(None));
        let s = Rc::clone(&seen);
        let _sub = events.subscribe_added(move |b: &Body| s.set(Some(b.id)));
        events.emit_added(&body(7));
        assert_eq!(seen.get(), Some(BodyId(7)));
    }
}
