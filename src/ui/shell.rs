use anyhow::Result;

use crate::{
    domain::events::AppEvent,
    usecases::{
        context::AppContext,
        contracts::{AppEventSource, ShellOrchestrator},
    },
};

use super::{event_source::CONNECTION_BURST_LIMIT, terminal::TerminalSession, view};

const UI_SHELL_STARTED: &str = "UI_SHELL_STARTED";
const UI_SHELL_STOPPED: &str = "UI_SHELL_STOPPED";

pub fn start(
    context: &AppContext,
    event_source: &mut dyn AppEventSource,
    orchestrator: &mut dyn ShellOrchestrator,
) -> Result<()> {
    tracing::info!(
        code = UI_SHELL_STARTED,
        log_level = %context.config.logging.level,
        chat_id = orchestrator.state().chat_id(),
        endpoint = %context.config.chat.endpoint,
        "starting chat shell"
    );

    let mut terminal = TerminalSession::new()?;
    let result = run_loop(&mut terminal, event_source, orchestrator);
    terminal.restore();

    tracing::info!(code = UI_SHELL_STOPPED, ok = result.is_ok(), "chat shell stopped");
    result
}

fn run_loop(
    terminal: &mut TerminalSession,
    event_source: &mut dyn AppEventSource,
    orchestrator: &mut dyn ShellOrchestrator,
) -> Result<()> {
    while orchestrator.state().is_running() {
        terminal.draw(|frame| view::render(frame, orchestrator.state_mut()))?;
        pump_events(event_source, orchestrator)?;
    }

    Ok(())
}

/// Handles queued connection events and at most one terminal event, then
/// returns so the view can redraw.
fn pump_events(
    event_source: &mut dyn AppEventSource,
    orchestrator: &mut dyn ShellOrchestrator,
) -> Result<()> {
    let mut connection_events = 0;

    while let Some(event) = event_source.next_event()? {
        let from_terminal = !matches!(event, AppEvent::Connection(_));
        orchestrator.handle_event(event)?;

        if from_terminal || !orchestrator.state().is_running() {
            break;
        }

        connection_events += 1;
        if connection_events >= CONNECTION_BURST_LIMIT {
            break;
        }
    }

    Ok(())
}
