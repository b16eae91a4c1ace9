//! Connection lifecycle shared by the transport and the session.

use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionState {
    Connecting,
    Open,
    Closed,
}

impl ConnectionState {
    pub fn as_label(self) -> &'static str {
        match self {
            Self::Connecting => "connecting",
            Self::Open => "open",
            Self::Closed => "closed",
        }
    }
}

/// Event reported by a connection worker.
///
/// `generation` identifies the connection instance that produced it; each
/// explicit reopen starts a new generation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectionEvent {
    pub generation: u64,
    pub kind: ConnectionEventKind,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConnectionEventKind {
    Opened,
    Message(String),
    Closed { reason: Option<String> },
}

impl ConnectionEvent {
    pub fn opened(generation: u64) -> Self {
        Self {
            generation,
            kind: ConnectionEventKind::Opened,
        }
    }

    pub fn message(generation: u64, payload: impl Into<String>) -> Self {
        Self {
            generation,
            kind: ConnectionEventKind::Message(payload.into()),
        }
    }

    pub fn closed(generation: u64, reason: Option<String>) -> Self {
        Self {
            generation,
            kind: ConnectionEventKind::Closed { reason },
        }
    }
}

/// Result of applying an event to the lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifecycleUpdate {
    /// Event belongs to a superseded connection instance.
    Stale,
    Unchanged,
    Transitioned(ConnectionState),
}

/// Outcome of a fire-and-forget send.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SendStatus {
    Dispatched,
    Dropped,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConnectionError {
    #[error("chat id must not be empty")]
    EmptyChatId,
    #[error("invalid chat endpoint `{endpoint}`: {details}")]
    InvalidEndpoint { endpoint: String, details: String },
    #[error("connection is still {} and cannot be reopened", .state.as_label())]
    NotClosed { state: ConnectionState },
}

/// `Connecting -> Open -> Closed`, with `Closed` terminal per generation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectionLifecycle {
    state: ConnectionState,
    generation: u64,
}

impl Default for ConnectionLifecycle {
    fn default() -> Self {
        Self {
            state: ConnectionState::Connecting,
            generation: 0,
        }
    }
}

impl ConnectionLifecycle {
    pub fn state(&self) -> ConnectionState {
        self.state
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn apply(&mut self, event: &ConnectionEvent) -> LifecycleUpdate {
        if event.generation != self.generation {
            return LifecycleUpdate::Stale;
        }

        let next = match (&event.kind, self.state) {
            (ConnectionEventKind::Opened, ConnectionState::Connecting) => ConnectionState::Open,
            (ConnectionEventKind::Closed { .. }, ConnectionState::Connecting)
            | (ConnectionEventKind::Closed { .. }, ConnectionState::Open) => {
                ConnectionState::Closed
            }
            _ => return LifecycleUpdate::Unchanged,
        };

        self.state = next;
        LifecycleUpdate::Transitioned(next)
    }

    /// Marks the current instance closed without waiting for the worker.
    pub fn mark_closed(&mut self) -> bool {
        if self.state == ConnectionState::Closed {
            return false;
        }

        self.state = ConnectionState::Closed;
        true
    }

    /// Starts a new generation. Only legal from `Closed`.
    pub fn restart(&mut self) -> Result<u64, ConnectionError> {
        if self.state != ConnectionState::Closed {
            return Err(ConnectionError::NotClosed { state: self.state });
        }

        self.generation += 1;
        self.state = ConnectionState::Connecting;
        Ok(self.generation)
    }
}
