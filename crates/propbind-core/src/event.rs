#![forbid(unsafe_code)]

//! Condition-gated event dispatch.
//!
//! An [`EventListener`] pairs a boolean [`Property`] with two branches, one
//! per condition value. Each branch carries an [`Event`] and a
//! [`Continuity`] that decides whether the event fires on a transition
//! call, on a steady tick, or never.
//!
//! ```ignore
//! let listener = EventListener::new()
//!     .when(ready)
//!     .then(event(|_| println!("ready")), Continuity::Once)
//!     .otherwise(event(|_| println!("waiting")), Continuity::Always);
//!
//! listener.execute(false); // transition: fires the true branch if ready
//! listener.execute(true);  // tick: fires the false branch while not ready
//! ```
//!
//! # Invariants
//!
//! 1. A listener without a condition never fires.
//! 2. The listener keeps no state between calls; the caller's `continuous`
//!    flag is the only notion of "transition" vs. "tick".
//! 3. The fired event receives the listener itself as its only argument.
//!
//! # Failure Modes
//!
//! - Event panic: propagates to the caller of `execute()`.

use std::fmt;
use std::rc::Rc;

use crate::capability::Event;
use crate::property::Property;

/// Shared handle to an event callback taking the firing listener.
pub type EventRef = Rc<dyn Event<EventListener>>;

/// Wrap a closure as an [`EventRef`].
pub fn event(f: impl Fn(&[&EventListener]) + 'static) -> EventRef {
    Rc::new(f)
}

/// When a branch's event fires.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Continuity {
    /// Never fire.
    #[default]
    None,
    /// Fire on transition calls (`execute(false)`).
    Once,
    /// Fire on steady ticks (`execute(true)`).
    Always,
}

impl Continuity {
    /// Whether a branch with this continuity fires for the given call kind.
    #[must_use]
    pub fn fires(self, continuous: bool) -> bool {
        matches!(
            (self, continuous),
            (Continuity::Once, false) | (Continuity::Always, true)
        )
    }
}

#[derive(Clone, Default)]
struct Branch {
    event: Option<EventRef>,
    continuity: Continuity,
}

/// A boolean-gated pair of events.
#[derive(Clone, Default)]
pub struct EventListener {
    condition: Option<Rc<dyn Property<bool>>>,
    when_true: Branch,
    when_false: Branch,
}

impl EventListener {
    /// An empty listener: no condition, no events.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Gate the listener on `condition`.
    #[must_use]
    pub fn when(mut self, condition: Rc<dyn Property<bool>>) -> Self {
        self.condition = Some(condition);
        self
    }

    /// Event to dispatch while the condition is true.
    #[must_use]
    pub fn then(mut self, event: EventRef, continuity: Continuity) -> Self {
        self.when_true = Branch {
            event: Some(event),
            continuity,
        };
        self
    }

    /// Event to dispatch while the condition is false.
    #[must_use]
    pub fn otherwise(mut self, event: EventRef, continuity: Continuity) -> Self {
        self.when_false = Branch {
            event: Some(event),
            continuity,
        };
        self
    }

    #[must_use]
    pub fn condition(&self) -> Option<&Rc<dyn Property<bool>>> {
        self.condition.as_ref()
    }

    /// Event of the branch selected by `state`.
    #[must_use]
    pub fn event(&self, state: bool) -> Option<&EventRef> {
        self.branch(state).event.as_ref()
    }

    /// Continuity of the branch selected by `state`.
    #[must_use]
    pub fn continuity(&self, state: bool) -> Continuity {
        self.branch(state).continuity
    }

    fn branch(&self, state: bool) -> &Branch {
        if state {
            &self.when_true
        } else {
            &self.when_false
        }
    }

    /// Dispatch the branch matching the condition's current value, if its
    /// continuity allows firing for this kind of call.
    ///
    /// `continuous` is `false` for a call made because something changed and
    /// `true` for a periodic tick.
    pub fn execute(&self, continuous: bool) {
        let Some(condition) = &self.condition else {
            return;
        };
        let state = condition.get();
        let branch = self.branch(state);
        if !branch.continuity.fires(continuous) {
            return;
        }
        if let Some(event) = &branch.event {
            tracing::trace!(state, continuous, "event listener firing");
            event.perform(&[self]);
        }
    }
}

impl fmt::Debug for EventListener {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventListener")
            .field("has_condition", &self.condition.is_some())
            .field("when_true", &self.when_true.continuity)
            .field("when_false", &self.when_false.continuity)
            .finish()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
