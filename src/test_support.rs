use std::cell::RefCell;

use crate::{
    domain::connection::{
        ConnectionError, ConnectionEvent, ConnectionLifecycle, ConnectionState, LifecycleUpdate,
        SendStatus,
    },
    usecases::contracts::ChatTransport,
};

/// In-memory transport that records every payload handed to it.
#[derive(Debug, Default)]
pub struct RecordingTransport {
    lifecycle: ConnectionLifecycle,
    handed: RefCell<Vec<String>>,
    delivered: RefCell<Vec<String>>,
    pub reopen_calls: usize,
}

impl RecordingTransport {
    pub fn open() -> Self {
        let mut transport = Self::default();
        transport.observe(&ConnectionEvent::opened(0));
        transport
    }

    /// Every payload passed to `send`, delivered or not.
    pub fn handed(&self) -> Vec<String> {
        self.handed.borrow().clone()
    }

    /// Payloads sent while the connection was open.
    pub fn delivered(&self) -> Vec<String> {
        self.delivered.borrow().clone()
    }

    pub fn generation(&self) -> u64 {
        self.lifecycle.generation()
    }
}

impl ChatTransport for RecordingTransport {
    fn state(&self) -> ConnectionState {
        self.lifecycle.state()
    }

    fn observe(&mut self, event: &ConnectionEvent) -> LifecycleUpdate {
        self.lifecycle.apply(event)
    }

    fn send(&self, payload: String) -> SendStatus {
        self.handed.borrow_mut().push(payload.clone());
        if self.lifecycle.state() != ConnectionState::Open {
            return SendStatus::Dropped;
        }
        self.delivered.borrow_mut().push(payload);
        SendStatus::Dispatched
    }

    fn reopen(&mut self) -> Result<(), ConnectionError> {
        self.lifecycle.restart()?;
        self.reopen_calls += 1;
        Ok(())
    }

    fn close(&mut self) {
        self.lifecycle.mark_closed();
    }
}
