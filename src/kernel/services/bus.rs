use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender, TryRecvError};
use std::time::Duration;

use crate::core::{InputEvent, TargetId};

use super::ports::TimerFire;

#[derive(Debug)]
pub enum DispatchMessage {
    TimerFired(TimerFire),
    Input { target: TargetId, event: InputEvent },
}

/// Posting side of the dispatch loop. Safe to hand to timer threads.
#[derive(Clone)]
pub struct DispatchSender {
    tx: Sender<DispatchMessage>,
}

pub struct DispatchReceiver {
    rx: Receiver<DispatchMessage>,
}

pub fn dispatch_bus() -> (DispatchSender, DispatchReceiver) {
    let (tx, rx) = mpsc::channel();
    (DispatchSender { tx }, DispatchReceiver { rx })
}

impl DispatchSender {
    pub fn send(&self, msg: DispatchMessage) -> Result<(), mpsc::SendError<DispatchMessage>> {
        self.tx.send(msg)
    }

    pub fn send_fire(&self, fire: TimerFire) -> Result<(), mpsc::SendError<DispatchMessage>> {
        self.send(DispatchMessage::TimerFired(fire))
    }

    pub fn send_input(
        &self,
        target: TargetId,
        event: InputEvent,
    ) -> Result<(), mpsc::SendError<DispatchMessage>> {
        self.send(DispatchMessage::Input { target, event })
    }
}

impl DispatchReceiver {
    pub fn try_recv(&mut self) -> Result<DispatchMessage, TryRecvError> {
        self.rx.try_recv()
    }

    pub fn recv_timeout(&mut self, timeout: Duration) -> Result<DispatchMessage, RecvTimeoutError> {
        self.rx.recv_timeout(timeout)
    }
}
