use super::*;
use crate::kernel::behavior::BehaviorId;
use crate::kernel::services::adapters::runtime::ManualClock;
use crate::kernel::services::bus::{dispatch_bus, DispatchMessage, DispatchReceiver};
use std::cell::RefCell;
use std::rc::Rc;
use std::sync::Arc;

fn setup() -> (DeferredAction, ManualClock, DispatchReceiver) {
    let (tx, rx) = dispatch_bus();
    let clock = ManualClock::new(tx);
    let timer = TimerContext::new(BehaviorId::default(), Arc::new(clock.clone()));
    (DeferredAction::new(timer), clock, rx)
}

fn queued_generations(rx: &mut DispatchReceiver) -> Vec<u64> {
    let mut out = Vec::new();
    while let Ok(msg) = rx.try_recv() {
        if let DispatchMessage::TimerFired(fire) = msg {
            out.push(fire.generation);
        }
    }
    out
}

fn deliver(action: &mut DeferredAction, rx: &mut DispatchReceiver) -> usize {
    queued_generations(rx)
        .into_iter()
        .filter(|generation| action.fire(*generation))
        .count()
}

fn recorder() -> (Rc<RefCell<Vec<&'static str>>>, impl Fn(&'static str) -> Box<dyn FnOnce()>) {
    let log = Rc::new(RefCell::new(Vec::new()));
    let log_for_make = Rc::clone(&log);
    let make = move |name: &'static str| -> Box<dyn FnOnce()> {
        let log = Rc::clone(&log_for_make);
        Box::new(move || log.borrow_mut().push(name))
    };
    (log, make)
}

#[test]
fn runs_once_after_delay_elapses() {
    let (mut action, clock, mut rx) = setup();
    let (log, make) = recorder();

    action.schedule(Duration::from_millis(100), make("single"));
    assert!(action.is_pending());

    clock.advance(Duration::from_millis(99));
    assert_eq!(deliver(&mut action, &mut rx), 0);

    clock.advance(Duration::from_millis(1));
    assert_eq!(deliver(&mut action, &mut rx), 1);
    assert!(!action.is_pending());
    assert_eq!(&*log.borrow(), &["single"]);
}

#[test]
fn rescheduling_retires_the_previous_action() {
    let (mut action, clock, mut rx) = setup();
    let (log, make) = recorder();

    action.schedule(Duration::from_millis(100), make("first"));
    clock.advance(Duration::from_millis(50));
    action.schedule(Duration::from_millis(100), make("second"));
    clock.advance(Duration::from_millis(200));

    assert_eq!(deliver(&mut action, &mut rx), 1);
    assert_eq!(&*log.borrow(), &["second"]);
}

#[test]
fn supersede_drops_a_fire_already_queued() {
    let (mut action, clock, mut rx) = setup();
    let (log, make) = recorder();

    action.schedule(Duration::from_millis(100), make("single"));
    clock.advance(Duration::from_millis(100));

    assert!(action.supersede());
    assert_eq!(deliver(&mut action, &mut rx), 0);
    assert!(log.borrow().is_empty());
    assert!(!action.supersede());
}

#[test]
fn repeated_fire_for_one_generation_runs_once() {
    let (mut action, clock, mut rx) = setup();
    let (log, make) = recorder();

    action.schedule(Duration::from_millis(10), make("once"));
    clock.advance(Duration::from_millis(10));
    let generations = queued_generations(&mut rx);
    assert_eq!(generations.len(), 1);

    assert!(action.fire(generations[0]));
    assert!(!action.fire(generations[0]));
    assert_eq!(&*log.borrow(), &["once"]);
}

#[test]
fn current_generation_with_nothing_pending_runs_nothing() {
    let (mut action, clock, mut rx) = setup();
    let (log, make) = recorder();

    action.schedule(Duration::from_millis(100), make("single"));
    let scheduled = action.tokens.generation();
    action.supersede();
    let current = action.tokens.generation();
    assert_ne!(scheduled, current);

    assert!(!action.fire(current));
    assert!(!action.fire(current.wrapping_add(1)));
    clock.advance(Duration::from_millis(100));
    assert_eq!(deliver(&mut action, &mut rx), 0);
    assert!(log.borrow().is_empty());
}

#[test]
fn dispose_cancels_and_rejects_later_scheduling() {
    let (mut action, clock, mut rx) = setup();
    let (log, make) = recorder();

    action.schedule(Duration::from_millis(100), make("pending"));
    action.dispose();
    action.dispose();
    assert!(action.is_disposed());
    assert_eq!(clock.pending_timers(), 0);

    action.schedule(Duration::from_millis(10), make("rejected"));
    assert!(!action.is_pending());

    clock.advance(Duration::from_millis(500));
    assert_eq!(deliver(&mut action, &mut rx), 0);
    assert!(log.borrow().is_empty());
}

#[test]
fn fire_queued_before_dispose_is_dropped() {
    let (mut action, clock, mut rx) = setup();
    let (log, make) = recorder();

    action.schedule(Duration::from_millis(100), make("late"));
    clock.advance(Duration::from_millis(100));
    action.dispose();

    assert_eq!(deliver(&mut action, &mut rx), 0);
    assert!(log.borrow().is_empty());
}
