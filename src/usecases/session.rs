//! Explicitly owned chat session: one chat id, one transport.

use crate::domain::{
    connection::{ConnectionError, ConnectionEvent, ConnectionState, LifecycleUpdate, SendStatus},
    envelope::SenderRole,
};

use super::contracts::ChatTransport;

pub struct ChatSession<T>
where
    T: ChatTransport,
{
    chat_id: String,
    sender: SenderRole,
    transport: T,
}

impl<T> ChatSession<T>
where
    T: ChatTransport,
{
    pub fn new(chat_id: impl Into<String>, sender: SenderRole, transport: T) -> Self {
        Self {
            chat_id: chat_id.into(),
            sender,
            transport,
        }
    }

    pub fn chat_id(&self) -> &str {
        &self.chat_id
    }

    pub fn sender(&self) -> &SenderRole {
        &self.sender
    }

    pub fn connection_state(&self) -> ConnectionState {
        self.transport.state()
    }

    pub fn observe(&mut self, event: &ConnectionEvent) -> LifecycleUpdate {
        self.transport.observe(event)
    }

    pub fn send_payload(&self, payload: String) -> SendStatus {
        self.transport.send(payload)
    }

    pub fn reopen(&mut self) -> Result<(), ConnectionError> {
        self.transport.reopen()
    }

    pub fn close(&mut self) {
        self.transport.close();
    }

    #[cfg(test)]
    pub fn transport(&self) -> &T {
        &self.transport
    }
}

impl<T> Drop for ChatSession<T>
where
    T: ChatTransport,
{
    fn drop(&mut self) {
        self.transport.close();
    }
}
