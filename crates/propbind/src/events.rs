//! Shortcuts for common [`EventListener`] shapes.

use std::rc::Rc;

use propbind_core::{Continuity, EventListener, EventRef, Property};

use crate::properties::boolean;

/// Listener gated on `condition`, with no events yet.
pub fn when(condition: Rc<dyn Property<bool>>) -> EventListener {
    EventListener::new().when(condition)
}

/// Listener gated on a fresh property initialized to `true`.
pub fn if_true() -> EventListener {
    when(boolean(true))
}

/// Listener gated on a fresh property initialized to `false`.
pub fn if_false() -> EventListener {
    when(boolean(false))
}

/// Fire `event` on every transition call, whichever way `precondition`
/// currently points.
pub fn on_change(precondition: Rc<dyn Property<bool>>, event: EventRef) -> EventListener {
    when(precondition)
        .then(Rc::clone(&event), Continuity::Once)
        .otherwise(event, Continuity::Once)
}

/// Fire `event` on every tick.
pub fn always(event: EventRef) -> EventListener {
    if_true().then(event, Continuity::Always)
}

/// Keep `event` attached but never fire it.
pub fn never(event: EventRef) -> EventListener {
    if_false().then(event, Continuity::Always)
}

#[cfg(test)]
mod tests {
    use super::*;
    use propbind_core::event;
    use std::cell::Cell;

    fn counter() -> (Rc<Cell<u32>>, EventRef) {
        let count = Rc::new(Cell::new(0u32));
        let c = Rc::clone(&count);
        (count, event(move |_| c.set(c.get() + 1)))
    }

    #[test]
    fn on_change_fires_on_transitions_either_way() {
        let flag = boolean(false);
        let (count, ev) = counter();
        let listener = on_change(flag.clone(), ev);

        listener.execute(false);
        flag.set(true).unwrap();
        listener.execute(false);
        listener.execute(true);
        assert_eq!(count.get(), 2);
    }

    #[test]
    fn always_fires_on_ticks() {
        let (count, ev) = counter();
        let listener = always(ev);
        listener.execute(true);
        listener.execute(true);
        listener.execute(false);
        assert_eq!(count.get(), 2);
    }

    #[test]
    fn never_fires() {
        let (count, ev) = counter();
        let listener = never(ev);
        listener.execute(true);
        listener.execute(false);
        assert_eq!(count.get(), 0);
        assert!(listener.event(true).is_some());
    }

    #[test]
    fn constant_conditions() {
        assert!(if_true().condition().is_some_and(|c| c.get()));
        assert!(if_false().condition().is_some_and(|c| !c.get()));
        assert!(when(boolean(true)).event(true).is_none());
    }
}
