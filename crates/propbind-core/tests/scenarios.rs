//! End-to-end behavior of properties, bindings, and event listeners driven
//! by an explicit update loop.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use propbind_core::{
    BindingOrder, Continuity, EventListener, ExternalProperty, InternalProperty, Observable,
    ObservableList, Property, event,
};

fn record(prop: &dyn Observable<i32>) -> Rc<RefCell<Vec<(i32, i32)>>> {
    let log = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&log);
    prop.add_listener(Rc::new(move |_: &dyn Observable<i32>, old: &i32, new: &i32| {
        sink.borrow_mut().push((*old, *new));
    }));
    log
}

#[test]
fn set_then_update_reports_exactly_once() {
    let prop = InternalProperty::new(0);
    let log = record(prop.as_ref());

    prop.set(5).unwrap();
    assert_eq!(prop.get(), 5);
    assert!(log.borrow().is_empty());

    prop.update().unwrap();
    assert_eq!(*log.borrow(), vec![(0, 5)]);

    prop.update().unwrap();
    assert_eq!(log.borrow().len(), 1);
}

#[test]
fn external_without_setter_keeps_value() {
    let prop = ExternalProperty::without_setter(|| 42);
    prop.set(5).unwrap();
    assert_eq!(prop.get(), 42);
}

#[test]
fn recessive_construction_settles_after_one_root_report() {
    let root = InternalProperty::new(5);
    let guest = InternalProperty::new(7);
    root.bind(guest.clone(), BindingOrder::Recessive).unwrap();
    assert_eq!((root.get(), guest.get()), (7, 7));

    let binding = Rc::clone(&root.bindings()[0]);
    binding.update().unwrap();
    assert_eq!(binding.last_reconciled(), (7, 7));
    assert_eq!((root.get(), guest.get()), (7, 7));

    // The root really moved 5 -> 7 while binding, so its own change
    // detection reports that once. The guest never moved.
    let root_log = record(root.as_ref());
    let guest_log = record(guest.as_ref());
    root.update().unwrap();
    guest.update().unwrap();
    assert_eq!(*root_log.borrow(), vec![(5, 7)]);
    assert!(guest_log.borrow().is_empty());

    root.update().unwrap();
    guest.update().unwrap();
    assert_eq!(root_log.borrow().len(), 1);
    assert!(guest_log.borrow().is_empty());
}

#[test]
fn bidirectional_chain_converges() {
    let a = InternalProperty::new(0);
    let b = InternalProperty::new(0);
    let c = InternalProperty::new(0);
    a.bind(b.clone(), BindingOrder::BidirectionalDominant).unwrap();
    b.bind(c.clone(), BindingOrder::BidirectionalDominant).unwrap();

    c.set(9).unwrap();
    b.update().unwrap();
    a.update().unwrap();
    assert_eq!((a.get(), b.get(), c.get()), (9, 9, 9));

    a.set(1).unwrap();
    a.update().unwrap();
    b.update().unwrap();
    assert_eq!((a.get(), b.get(), c.get()), (1, 1, 1));
}

#[test]
fn one_guest_many_roots() {
    let shared = InternalProperty::new(0);
    let left = InternalProperty::new(1);
    let right = InternalProperty::new(2);
    left.bind(shared.clone(), BindingOrder::Dominant).unwrap();
    assert_eq!(shared.get(), 1);
    right.bind(shared.clone(), BindingOrder::Recessive).unwrap();
    assert_eq!(right.get(), 1);

    assert!(left.unbind(shared.as_ref()).unwrap());
    assert!(!left.unbind(shared.as_ref()).unwrap());
    assert_eq!(right.bindings().len(), 1);
}

#[test]
fn change_listener_drives_event_listener() {
    let ready = InternalProperty::new(false);
    let transitions = Rc::new(Cell::new(0u32));
    let ticks = Rc::new(Cell::new(0u32));

    let t = Rc::clone(&transitions);
    let k = Rc::clone(&ticks);
    let listener = Rc::new(
        EventListener::new()
            .when(ready.clone())
            .then(event(move |_| t.set(t.get() + 1)), Continuity::Once)
            .otherwise(event(move |_| k.set(k.get() + 1)), Continuity::Always),
    );

    // Transition calls come from a change listener; ticks from the loop.
    let on_change = Rc::clone(&listener);
    ready.on_change(move |_, _, _| on_change.execute(false));
    ready.add_event_listener(Rc::clone(&listener));

    for frame in 0..4 {
        if frame == 2 {
            ready.set(true).unwrap();
        }
        ready.update().unwrap();
        listener.execute(true);
    }

    assert_eq!(transitions.get(), 1);
    assert_eq!(ticks.get(), 2);
    assert_eq!(ready.event_listeners().len(), 1);
}

#[test]
fn self_hosted_lists_report_bookkeeping_changes() {
    let prop = InternalProperty::new(0);
    let sizes = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&sizes);
    prop.listener_list().on_change(move |_, _, new: &Vec<_>| {
        sink.borrow_mut().push(new.len());
    });

    let first = prop.on_change(|_, _, _| {});
    prop.on_change(|_, _, _| {});
    prop.update().unwrap();
    prop.remove_listener(first);
    prop.update().unwrap();
    prop.update().unwrap();

    assert_eq!(*sizes.borrow(), vec![2, 1]);
}

#[test]
fn list_property_detects_bulk_replace() {
    let items: ObservableList<&str> = ["a", "b"].into_iter().collect();
    let prop = InternalProperty::new(items.snapshot());
    let hits = Rc::new(Cell::new(0u32));
    let h = Rc::clone(&hits);
    prop.on_change(move |_, old: &Vec<&str>, new: &Vec<&str>| {
        assert_ne!(old, new);
        h.set(h.get() + 1);
    });

    items.replace_all(["c"]);
    prop.set(items.snapshot()).unwrap();
    prop.update().unwrap();
    assert_eq!(hits.get(), 1);
}
