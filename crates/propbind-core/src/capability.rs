//! Single-method capability traits consumed at the crate's boundaries.
//!
//! Each trait has a blanket implementation for closures of the matching
//! shape, so callers normally pass closures and only name the traits when
//! storing capabilities behind `Rc<dyn ..>`.

/// Reads the current value of something stored outside a property.
pub trait Getter<T> {
    /// Return the current value.
    fn get(&self) -> T;
}

impl<T, F: Fn() -> T> Getter<T> for F {
    fn get(&self) -> T {
        self()
    }
}

/// Writes a value to something stored outside a property.
pub trait Setter<T> {
    /// Store `value`.
    fn set(&self, value: T);
}

impl<T, F: Fn(T)> Setter<T> for F {
    fn set(&self, value: T) {
        self(value)
    }
}

/// A side-effecting callback receiving an ordered list of contextual
/// arguments.
///
/// [`EventListener`](crate::event::EventListener) fires events with itself
/// as the only argument. A panic raised by `perform` is not caught.
pub trait Event<A: ?Sized> {
    /// Run the event.
    fn perform(&self, args: &[&A]);
}

impl<A: ?Sized, F: Fn(&[&A])> Event<A> for F {
    fn perform(&self, args: &[&A]) {
        self(args)
    }
}
