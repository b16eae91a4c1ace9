//! UI layer: terminal shell, event sources, and text reports.

mod event_source;
mod message_input;
mod profile_report;
pub mod shell;
mod styles;
mod terminal;
mod transcript_rendering;
mod view;

pub(crate) use event_source::{CrosstermEventSource, ShellEventSource};
pub(crate) use profile_report::profile_report;

/// Returns the UI module name for smoke checks.
pub fn module_name() -> &'static str {
    "ui"
}
