// buslog - app/bus.rs
//
// The event bus seam. The logger only ever calls `on`; hosts that already
// have a bus implement `EventBus` for it. `LocalEventBus` is a small
// synchronous, same-thread implementation for hosts without one and for tests.

use crate::core::event::BusEvent;
use std::collections::HashMap;

/// Callback attached to one event name.
pub type Handler = Box<dyn Fn(&BusEvent)>;

/// Publish/subscribe bus the logger attaches to.
pub trait EventBus {
    /// Attach `handler` to `event`. Returns the bus for chaining.
    fn on(&mut self, event: &str, handler: Handler) -> &mut Self;
}

/// Synchronous in-process bus. Handlers run on the emitting thread, in
/// registration order, before `emit` returns.
#[derive(Default)]
pub struct LocalEventBus {
    handlers: HashMap<String, Vec<Handler>>,
}

impl LocalEventBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Deliver `event` to every handler attached to its name.
    /// Returns the number of handlers invoked.
    pub fn emit(&self, event: &BusEvent) -> usize {
        match self.handlers.get(event.name()) {
            Some(handlers) => {
                for handler in handlers {
                    handler(event);
                }
                handlers.len()
            }
            None => 0,
        }
    }

    /// Number of handlers attached to `event`.
    pub fn listener_count(&self, event: &str) -> usize {
        self.handlers.get(event).map_or(0, Vec::len)
    }

    /// Names that have at least one handler, sorted.
    pub fn event_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.handlers.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}

impl EventBus for LocalEventBus {
    fn on(&mut self, event: &str, handler: Handler) -> &mut Self {
        self.handlers
            .entry(event.to_string())
            .or_default()
            .push(handler);
        self
    }
}

impl std::fmt::Debug for LocalEventBus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LocalEventBus")
            .field("events", &self.event_names())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    #[test]
    fn test_emit_reaches_handlers_in_order() {
        let seen = Rc::new(std::cell::RefCell::new(Vec::new()));
        let mut bus = LocalEventBus::new();
        let first = Rc::clone(&seen);
        let second = Rc::clone(&seen);
        bus.on("allStoresLoaded", Box::new(move |_| first.borrow_mut().push(1)))
            .on("allStoresLoaded", Box::new(move |_| second.borrow_mut().push(2)));

        assert_eq!(bus.emit(&BusEvent::AllStoresLoaded), 2);
        assert_eq!(*seen.borrow(), vec![1, 2]);
    }

    #[test]
    fn test_emit_without_listeners() {
        let calls = Rc::new(Cell::new(0));
        let mut bus = LocalEventBus::new();
        let counter = Rc::clone(&calls);
        bus.on("allStoresLoaded", Box::new(move |_| counter.set(counter.get() + 1)));

        assert_eq!(bus.emit(&BusEvent::AllComponentsLoaded), 0);
        assert_eq!(calls.get(), 0);
        assert_eq!(bus.listener_count("allStoresLoaded"), 1);
        assert_eq!(bus.event_names(), vec!["allStoresLoaded"]);
    }
}
