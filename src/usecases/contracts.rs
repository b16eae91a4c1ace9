use anyhow::Result;

use crate::domain::{
    connection::{ConnectionError, ConnectionEvent, ConnectionState, LifecycleUpdate, SendStatus},
    events::AppEvent,
    shell_state::ShellState,
};

pub trait AppEventSource {
    fn next_event(&mut self) -> Result<Option<AppEvent>>;
}

pub trait ShellOrchestrator {
    fn state(&self) -> &ShellState;
    fn state_mut(&mut self) -> &mut ShellState;
    fn handle_event(&mut self, event: AppEvent) -> Result<()>;
}

/// Connection Manager seam.
///
/// Lifecycle events are produced asynchronously by the transport and handed
/// back through [`ChatTransport::observe`] on the thread that owns the
/// session, so the state only ever changes there.
pub trait ChatTransport {
    fn state(&self) -> ConnectionState;

    fn observe(&mut self, event: &ConnectionEvent) -> LifecycleUpdate;

    /// Fire-and-forget. Anything sent while not `Open` is dropped.
    fn send(&self, payload: String) -> SendStatus;

    /// Starts a fresh connection instance. Only valid once `Closed`.
    fn reopen(&mut self) -> Result<(), ConnectionError>;

    fn close(&mut self);
}
