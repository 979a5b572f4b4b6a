use super::*;
use std::cell::{Cell, RefCell};

#[test]
fn relay_command_without_guard_always_executes() {
    let hits = Rc::new(Cell::new(0));
    let hits_in_cmd = Rc::clone(&hits);
    let cmd = RelayCommand::new(move |_: &u32| hits_in_cmd.set(hits_in_cmd.get() + 1));

    assert!(invoke_guarded(&cmd, &7));
    assert!(invoke_guarded(&cmd, &8));
    assert_eq!(hits.get(), 2);
}

#[test]
fn rejected_guard_skips_execution_silently() {
    let seen = Rc::new(RefCell::new(Vec::new()));
    let seen_in_cmd = Rc::clone(&seen);
    let cmd = RelayCommand::new(move |p: &u32| seen_in_cmd.borrow_mut().push(*p))
        .with_guard(|p: &u32| p % 2 == 0);

    assert!(!invoke_guarded(&cmd, &1));
    assert!(invoke_guarded(&cmd, &2));
    assert!(!invoke_guarded(&cmd, &3));

    assert_eq!(&*seen.borrow(), &[2]);
}

#[test]
fn binding_invokes_with_its_own_parameter() {
    let seen = Rc::new(RefCell::new(Vec::new()));
    let seen_in_cmd = Rc::clone(&seen);
    let cmd: Rc<dyn Command<String>> = Rc::new(RelayCommand::new(move |p: &String| {
        seen_in_cmd.borrow_mut().push(p.clone())
    }));

    let binding = CommandBinding::new(Rc::clone(&cmd), "row-3".to_string());
    let copy = binding.clone();

    assert!(binding.invoke());
    assert!(copy.invoke());
    assert_eq!(&*seen.borrow(), &["row-3".to_string(), "row-3".to_string()]);
}
