//! Command bindings: the externally supplied actions a behavior resolves to.
//!
//! A command pairs a guard (`can_execute`) with an action (`execute`). Behaviors always ask
//! the guard first; a rejected guard is a silent no-op, never an error.

use std::fmt;
use std::rc::Rc;

pub trait Command<P> {
    fn can_execute(&self, parameter: &P) -> bool;
    fn execute(&self, parameter: &P);
}

/// Runs `command` with `parameter` when its guard allows it.
///
/// Returns whether the command actually executed.
pub fn invoke_guarded<P>(command: &dyn Command<P>, parameter: &P) -> bool {
    if !command.can_execute(parameter) {
        tracing::trace!("command guard rejected invocation");
        return false;
    }
    command.execute(parameter);
    true
}

type Guard<P> = Box<dyn Fn(&P) -> bool>;
type Action<P> = Box<dyn Fn(&P)>;

/// Closure-backed command.
pub struct RelayCommand<P> {
    execute: Action<P>,
    can_execute: Option<Guard<P>>,
}

impl<P> RelayCommand<P> {
    pub fn new(execute: impl Fn(&P) + 'static) -> Self {
        Self {
            execute: Box::new(execute),
            can_execute: None,
        }
    }

    pub fn with_guard(mut self, can_execute: impl Fn(&P) -> bool + 'static) -> Self {
        self.can_execute = Some(Box::new(can_execute));
        self
    }
}

impl<P> Command<P> for RelayCommand<P> {
    fn can_execute(&self, parameter: &P) -> bool {
        self.can_execute
            .as_ref()
            .map_or(true, |guard| guard(parameter))
    }

    fn execute(&self, parameter: &P) {
        (self.execute)(parameter)
    }
}

impl<P> fmt::Debug for RelayCommand<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RelayCommand")
            .field("guarded", &self.can_execute.is_some())
            .finish()
    }
}

/// A command together with the parameter it is invoked with.
pub struct CommandBinding<P> {
    pub command: Rc<dyn Command<P>>,
    pub parameter: P,
}

impl<P> CommandBinding<P> {
    pub fn new(command: Rc<dyn Command<P>>, parameter: P) -> Self {
        Self { command, parameter }
    }

    pub fn invoke(&self) -> bool {
        invoke_guarded(self.command.as_ref(), &self.parameter)
    }
}

impl<P: Clone> Clone for CommandBinding<P> {
    fn clone(&self) -> Self {
        Self {
            command: Rc::clone(&self.command),
            parameter: self.parameter.clone(),
        }
    }
}

impl<P: fmt::Debug> fmt::Debug for CommandBinding<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CommandBinding")
            .field("parameter", &self.parameter)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/core/command.rs"]
mod tests;
