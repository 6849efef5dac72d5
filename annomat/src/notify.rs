//! Synchronous change notification
//!
//! Matrices and annotation sets keep a [`Listeners`] registry. Callbacks run
//! in subscription order on the mutating thread before the mutating call
//! returns. A callback must not mutate the structure that notified it; there
//! is no reentrancy guard.

use std::fmt;

/// Handle returned by [`Listeners::subscribe`], used to unsubscribe
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

/// What changed in a matrix or annotation set
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeEvent {
    /// Cell values changed; carries the current shape
    Cells { rows: usize, cols: usize },
    /// The shape changed
    Resized { rows: usize, cols: usize },
    /// An annotation was registered, replaced, renamed or removed
    Annotations { count: usize },
}

type Callback = Box<dyn FnMut(&ChangeEvent)>;

/// Ordered registry of change callbacks
#[derive(Default)]
pub struct Listeners {
    next_id: u64,
    entries: Vec<(ListenerId, Callback)>,
}

impl Listeners {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a callback
    pub fn subscribe<F>(&mut self, callback: F) -> ListenerId
    where
        F: FnMut(&ChangeEvent) + 'static,
    {
        let id = ListenerId(self.next_id);
        self.next_id += 1;
        self.entries.push((id, Box::new(callback)));
        id
    }

    /// Remove a callback; returns whether it was registered
    pub fn unsubscribe(&mut self, id: ListenerId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|(entry, _)| *entry != id);
        self.entries.len() != before
    }

    /// Dispatch an event to every callback in subscription order
    pub fn notify(&mut self, event: &ChangeEvent) {
        for (_, callback) in &mut self.entries {
            callback(event);
        }
    }

    /// Number of registered callbacks
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no callback is registered
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl fmt::Debug for Listeners {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Listeners")
            .field("count", &self.entries.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn test_dispatch_order_and_unsubscribe() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut listeners = Listeners::new();

        let first = {
            let log = Rc::clone(&log);
            listeners.subscribe(move |_| log.borrow_mut().push("first"))
        };
        {
            let log = Rc::clone(&log);
            listeners.subscribe(move |_| log.borrow_mut().push("second"));
        }

        listeners.notify(&ChangeEvent::Cells { rows: 1, cols: 1 });
        assert_eq!(*log.borrow(), vec!["first", "second"]);

        assert!(listeners.unsubscribe(first));
        assert!(!listeners.unsubscribe(first));
        listeners.notify(&ChangeEvent::Annotations { count: 0 });
        assert_eq!(*log.borrow(), vec!["first", "second", "second"]);
        assert_eq!(listeners.len(), 1);
    }
}
