//! Domain layer: chat envelopes, connection lifecycle, and view state.

pub mod connection;
pub mod envelope;
pub mod events;
pub mod message_input_state;
pub mod profile;
pub mod shell_state;
pub mod transcript;

/// Returns the domain module name for smoke checks.
pub fn module_name() -> &'static str {
    "domain"
}
