//! Chat integration layer: websocket transport and wire codec.

pub mod codec;
pub mod connection;

pub use connection::WebSocketConnection;

/// Returns the chat module name for smoke checks.
pub fn module_name() -> &'static str {
    "chat"
}
