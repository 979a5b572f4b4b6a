use super::*;
use crate::core::RelayCommand;
use crate::kernel::behavior::BehaviorId;
use crate::kernel::services::adapters::runtime::ManualClock;
use crate::kernel::services::bus::{dispatch_bus, DispatchMessage, DispatchReceiver};
use std::cell::RefCell;
use std::sync::Arc;

type Log = Rc<RefCell<Vec<(String, String)>>>;

struct Harness {
    debouncer: ChangeDebouncer,
    clock: ManualClock,
    rx: DispatchReceiver,
    log: Log,
}

fn harness(initial: &str) -> Harness {
    let (tx, rx) = dispatch_bus();
    let clock = ManualClock::new(tx);
    let timer = TimerContext::new(BehaviorId::default(), Arc::new(clock.clone()));
    let log: Log = Rc::default();
    let log_in_cmd = Rc::clone(&log);
    let command: Rc<dyn Command<TextChange>> = Rc::new(RelayCommand::new(move |c: &TextChange| {
        log_in_cmd
            .borrow_mut()
            .push((c.old_text.clone(), c.new_text.clone()))
    }));
    let debouncer = ChangeDebouncer::new(timer, initial).with_command(command);
    Harness {
        debouncer,
        clock,
        rx,
        log,
    }
}

impl Harness {
    fn type_text(&mut self, text: &str) {
        self.debouncer.on_text_changed(text);
    }

    fn advance(&mut self, ms: u64) -> Vec<TextChange> {
        self.clock.advance(Duration::from_millis(ms));
        let mut settled = Vec::new();
        while let Ok(msg) = self.rx.try_recv() {
            if let DispatchMessage::TimerFired(fire) = msg {
                settled.extend(self.debouncer.on_settled(fire.generation));
            }
        }
        settled
    }

    fn log(&self) -> Vec<(String, String)> {
        self.log.borrow().clone()
    }
}

fn pair(old: &str, new: &str) -> (String, String) {
    (old.to_string(), new.to_string())
}

#[test]
fn burst_collapses_into_one_before_after_report() {
    let mut h = harness("abc");

    h.type_text("abcd");
    h.advance(50);
    h.type_text("abcde");
    h.advance(300);

    assert_eq!(h.log(), vec![pair("abc", "abcde")]);
    assert_eq!(h.debouncer.stable_value(), "abcde");
}

#[test]
fn stable_value_only_moves_when_the_timer_fires() {
    let mut h = harness("seed");

    h.type_text("seed1");
    h.advance(100);
    h.type_text("seed12");
    assert_eq!(h.debouncer.stable_value(), "seed");
    assert_eq!(h.debouncer.pending_value(), "seed12");

    h.advance(200);
    assert_eq!(h.debouncer.stable_value(), "seed12");
}

#[test]
fn separated_changes_report_separately() {
    let mut h = harness("");

    h.type_text("a");
    h.advance(250);
    h.type_text("ab");
    h.advance(250);

    assert_eq!(h.log(), vec![pair("", "a"), pair("a", "ab")]);
}

#[test]
fn burst_that_returns_to_the_start_still_reports() {
    let mut h = harness("abc");

    h.type_text("abcd");
    h.advance(20);
    h.type_text("abc");
    let settled = h.advance(200);

    assert_eq!(settled.len(), 1);
    assert!(settled[0].is_unchanged());
    assert_eq!(h.log(), vec![pair("abc", "abc")]);
}

#[test]
fn custom_delay_applies_to_later_changes() {
    let mut h = harness("x");
    h.debouncer.set_delay(Duration::from_millis(50));

    h.type_text("xy");
    h.advance(49);
    assert!(h.log().is_empty());
    h.advance(1);
    assert_eq!(h.log(), vec![pair("x", "xy")]);
}

#[test]
fn guard_rejection_still_settles_the_burst() {
    let mut h = harness("a");
    let log = Rc::clone(&h.log);
    let guarded: Rc<dyn Command<TextChange>> = Rc::new(
        RelayCommand::new(move |c: &TextChange| {
            log.borrow_mut()
                .push((c.old_text.clone(), c.new_text.clone()))
        })
        .with_guard(|c: &TextChange| c.new_text.len() > 2),
    );
    h.debouncer.set_command(Some(guarded));

    h.type_text("ab");
    h.advance(200);
    assert!(h.log().is_empty());
    assert_eq!(h.debouncer.stable_value(), "ab");

    h.type_text("abc");
    h.advance(200);
    assert_eq!(h.log(), vec![pair("ab", "abc")]);
}

#[test]
fn unbound_command_is_silently_skipped() {
    let mut h = harness("a");
    h.debouncer.set_command(None);

    h.type_text("ab");
    let settled = h.advance(200);

    assert_eq!(settled, vec![TextChange::new("a", "ab")]);
    assert!(h.log().is_empty());
}

#[test]
fn dispose_while_armed_prevents_any_report() {
    let mut h = harness("abc");

    h.type_text("abcd");
    h.advance(100);
    h.debouncer.dispose();
    h.debouncer.dispose();
    h.type_text("abcde");

    assert!(h.advance(1_000).is_empty());
    assert!(h.log().is_empty());
    assert!(!h.debouncer.is_armed());
}

#[test]
fn dispose_with_fire_already_queued_prevents_report() {
    let mut h = harness("abc");

    h.type_text("abcd");
    h.clock.advance(Duration::from_millis(200));
    h.debouncer.dispose();

    assert!(h.advance(0).is_empty());
    assert!(h.log().is_empty());
}
