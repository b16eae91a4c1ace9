use anyhow::Result;

use crate::domain::{
    connection::{ConnectionEvent, ConnectionEventKind, ConnectionState, LifecycleUpdate, SendStatus},
    events::{AppEvent, ConnectivityStatus, KeyInput},
    shell_state::ShellState,
};

use super::{
    contracts::{ChatTransport, ShellOrchestrator},
    conversation::{self, SubmitOutcome},
    session::ChatSession,
};

const CHAT_STALE_EVENT_IGNORED: &str = "CHAT_STALE_EVENT_IGNORED";
const CHAT_REOPEN_REQUESTED: &str = "CHAT_REOPEN_REQUESTED";
const CHAT_REOPEN_REJECTED: &str = "CHAT_REOPEN_REJECTED";
const CHAT_ENCODE_FAILED: &str = "CHAT_ENCODE_FAILED";
const CHAT_CONNECTION_LOST: &str = "CHAT_CONNECTION_LOST";

const TRANSCRIPT_PAGE_ROWS: usize = 10;

pub struct DefaultShellOrchestrator<T>
where
    T: ChatTransport,
{
    state: ShellState,
    session: ChatSession<T>,
}

impl<T> DefaultShellOrchestrator<T>
where
    T: ChatTransport,
{
    pub fn new(session: ChatSession<T>) -> Self {
        let mut state = ShellState::new(session.chat_id());
        state.set_connection_state(session.connection_state());

        Self { state, session }
    }

    fn handle_key(&mut self, key: KeyInput) {
        if key.ctrl {
            if key.key == "r" {
                self.reopen();
            }
            return;
        }

        match key.key.as_str() {
            "enter" => self.submit(),
            "backspace" => self.state.message_input_mut().delete_char_before(),
            "delete" => self.state.message_input_mut().delete_char_at(),
            "left" => self.state.message_input_mut().move_cursor_left(),
            "right" => self.state.message_input_mut().move_cursor_right(),
            "home" => self.state.message_input_mut().move_cursor_home(),
            "end" => self.state.message_input_mut().move_cursor_end(),
            "up" => self.state.transcript_mut().scroll_up(1),
            "down" => self.state.transcript_mut().scroll_down(1),
            "page_up" => self.state.transcript_mut().scroll_up(TRANSCRIPT_PAGE_ROWS),
            "page_down" => self.state.transcript_mut().scroll_down(TRANSCRIPT_PAGE_ROWS),
            other => {
                let mut chars = other.chars();
                if let (Some(ch), None) = (chars.next(), chars.next()) {
                    self.state.message_input_mut().insert_char(ch);
                }
            }
        }
    }

    fn submit(&mut self) {
        match conversation::submit_input(&self.session, &mut self.state) {
            Ok(SubmitOutcome::Sent(SendStatus::Dropped)) => {
                let notice = format!(
                    "not delivered: connection is {}",
                    self.session.connection_state().as_label()
                );
                self.state.set_notice(notice);
            }
            Ok(SubmitOutcome::Sent(SendStatus::Dispatched)) => self.state.clear_notice(),
            Ok(SubmitOutcome::Ignored) => {}
            Err(error) => {
                tracing::error!(
                    code = CHAT_ENCODE_FAILED,
                    error = %error,
                    "outbound chat message could not be encoded"
                );
                self.state.set_notice("message could not be encoded");
            }
        }
    }

    fn reopen(&mut self) {
        match self.session.reopen() {
            Ok(()) => {
                tracing::info!(code = CHAT_REOPEN_REQUESTED, "chat reconnect requested");
                self.state
                    .set_connection_state(self.session.connection_state());
                conversation::on_connectivity_change(&mut self.state, ConnectivityStatus::Connecting);
                self.state.set_notice("reconnecting...");
            }
            Err(error) => {
                tracing::debug!(
                    code = CHAT_REOPEN_REJECTED,
                    error = %error,
                    "chat reconnect rejected"
                );
                self.state.set_notice(error.to_string());
            }
        }
    }

    fn handle_connection_event(&mut self, event: ConnectionEvent) {
        let update = self.session.observe(&event);
        match update {
            LifecycleUpdate::Stale => {
                tracing::debug!(
                    code = CHAT_STALE_EVENT_IGNORED,
                    generation = event.generation,
                    "ignoring event from a superseded chat connection"
                );
                return;
            }
            LifecycleUpdate::Transitioned(state) => self.state.set_connection_state(state),
            LifecycleUpdate::Unchanged => {}
        }

        match event.kind {
            ConnectionEventKind::Opened => {
                conversation::on_connectivity_change(&mut self.state, ConnectivityStatus::Online);
                self.state.clear_notice();
            }
            ConnectionEventKind::Closed { reason } => {
                conversation::on_connectivity_change(&mut self.state, ConnectivityStatus::Offline);
                if update == LifecycleUpdate::Transitioned(ConnectionState::Closed) {
                    tracing::warn!(
                        code = CHAT_CONNECTION_LOST,
                        reason = reason.as_deref().unwrap_or("unknown"),
                        "chat connection lost"
                    );
                    self.state.set_notice("connection lost, Ctrl+R to reconnect");
                }
            }
            ConnectionEventKind::Message(payload) => {
                let chat_id = self.session.chat_id().to_owned();
                conversation::receive_payload(&chat_id, self.state.transcript_mut(), &payload);
            }
        }
    }
}

impl<T> ShellOrchestrator for DefaultShellOrchestrator<T>
where
    T: ChatTransport,
{
    fn state(&self) -> &ShellState {
        &self.state
    }

    fn state_mut(&mut self) -> &mut ShellState {
        &mut self.state
    }

    fn handle_event(&mut self, event: AppEvent) -> Result<()> {
        match event {
            AppEvent::Tick => {}
            AppEvent::QuitRequested => {
                self.session.close();
                self.state.stop();
            }
            AppEvent::InputKey(key) => self.handle_key(key),
            AppEvent::Paste(text) => {
                self.state.message_input_mut().insert_str(&text);
            }
            AppEvent::Connection(event) => self.handle_connection_event(event),
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        domain::envelope::SenderRole,
        test_support::RecordingTransport,
    };

    fn orchestrator() -> DefaultShellOrchestrator<RecordingTransport> {
        DefaultShellOrchestrator::new(ChatSession::new(
            "123456",
            SenderRole::User,
            RecordingTransport::default(),
        ))
    }

    fn handle(orchestrator: &mut DefaultShellOrchestrator<RecordingTransport>, event: AppEvent) {
        orchestrator
            .handle_event(event)
            .expect("event must be handled");
    }

    fn type_text(orchestrator: &mut DefaultShellOrchestrator<RecordingTransport>, text: &str) {
        for ch in text.chars() {
            handle(orchestrator, AppEvent::InputKey(KeyInput::new(ch.to_string(), false)));
        }
    }

    fn press(orchestrator: &mut DefaultShellOrchestrator<RecordingTransport>, key: &str) {
        handle(orchestrator, AppEvent::InputKey(KeyInput::new(key, false)));
    }

    fn transcript(orchestrator: &DefaultShellOrchestrator<RecordingTransport>) -> Vec<(String, String)> {
        orchestrator
            .state()
            .transcript()
            .entries()
            .iter()
            .map(|entry| (entry.sender.to_string(), entry.content.clone()))
            .collect()
    }

    #[test]
    fn stops_and_closes_session_on_quit() {
        let mut orchestrator = orchestrator();

        handle(&mut orchestrator, AppEvent::QuitRequested);

        assert!(!orchestrator.state().is_running());
        assert_eq!(orchestrator.session.connection_state(), ConnectionState::Closed);
    }

    #[test]
    fn open_send_receive_scenario() {
        let mut orchestrator = orchestrator();
        assert_eq!(
            orchestrator.state().connectivity_status(),
            ConnectivityStatus::Connecting
        );

        handle(&mut orchestrator, AppEvent::Connection(ConnectionEvent::opened(0)));
        assert_eq!(
            orchestrator.state().connectivity_status(),
            ConnectivityStatus::Online
        );

        type_text(&mut orchestrator, "hello");
        press(&mut orchestrator, "enter");
        assert_eq!(transcript(&orchestrator), vec![("user".to_owned(), "hello".to_owned())]);
        assert!(orchestrator.state().message_input().is_empty());

        handle(
            &mut orchestrator,
            AppEvent::Connection(ConnectionEvent::message(
                0,
                r#"{"chat_id":"123456","sender":"admin","content":"hi"}"#,
            )),
        );

        assert_eq!(
            transcript(&orchestrator),
            vec![
                ("user".to_owned(), "hello".to_owned()),
                ("admin".to_owned(), "hi".to_owned()),
            ]
        );
        assert_eq!(orchestrator.session.transport().delivered().len(), 1);
    }

    #[test]
    fn close_mid_session_goes_offline_and_keeps_echoing() {
        let mut orchestrator = orchestrator();
        handle(&mut orchestrator, AppEvent::Connection(ConnectionEvent::opened(0)));

        handle(
            &mut orchestrator,
            AppEvent::Connection(ConnectionEvent::closed(0, Some("reset".to_owned()))),
        );
        assert_eq!(
            orchestrator.state().connectivity_status(),
            ConnectivityStatus::Offline
        );
        assert_eq!(orchestrator.state().connection_state(), ConnectionState::Closed);

        type_text(&mut orchestrator, "still there?");
        press(&mut orchestrator, "enter");

        assert_eq!(transcript(&orchestrator).len(), 1);
        assert!(orchestrator.session.transport().delivered().is_empty());
        assert_eq!(
            orchestrator.state().notice(),
            Some("not delivered: connection is closed")
        );
    }

    #[test]
    fn send_while_connecting_is_dropped_not_queued() {
        let mut orchestrator = orchestrator();

        type_text(&mut orchestrator, "early");
        press(&mut orchestrator, "enter");
        handle(&mut orchestrator, AppEvent::Connection(ConnectionEvent::opened(0)));

        assert_eq!(transcript(&orchestrator).len(), 1);
        assert!(orchestrator.session.transport().delivered().is_empty());
    }

    #[test]
    fn enter_on_blank_input_does_nothing() {
        let mut orchestrator = orchestrator();
        handle(&mut orchestrator, AppEvent::Connection(ConnectionEvent::opened(0)));

        type_text(&mut orchestrator, "   ");
        press(&mut orchestrator, "enter");

        assert!(transcript(&orchestrator).is_empty());
        assert!(orchestrator.session.transport().handed().is_empty());
    }

    #[test]
    fn malformed_inbound_payload_does_not_block_following_ones() {
        let mut orchestrator = orchestrator();
        handle(&mut orchestrator, AppEvent::Connection(ConnectionEvent::opened(0)));

        handle(
            &mut orchestrator,
            AppEvent::Connection(ConnectionEvent::message(0, "garbage")),
        );
        handle(
            &mut orchestrator,
            AppEvent::Connection(ConnectionEvent::message(
                0,
                r#"{"chat_id":"123456","sender":"admin","content":"ok"}"#,
            )),
        );

        assert_eq!(transcript(&orchestrator), vec![("admin".to_owned(), "ok".to_owned())]);
    }

    #[test]
    fn ctrl_r_reopens_only_after_close() {
        let mut orchestrator = orchestrator();
        handle(&mut orchestrator, AppEvent::Connection(ConnectionEvent::opened(0)));

        handle(&mut orchestrator, AppEvent::InputKey(KeyInput::new("r", true)));
        assert_eq!(orchestrator.session.transport().reopen_calls, 0);
        assert!(orchestrator.state().message_input().is_empty());

        handle(&mut orchestrator, AppEvent::Connection(ConnectionEvent::closed(0, None)));
        handle(&mut orchestrator, AppEvent::InputKey(KeyInput::new("r", true)));

        assert_eq!(orchestrator.session.transport().reopen_calls, 1);
        assert_eq!(orchestrator.session.transport().generation(), 1);
        assert_eq!(
            orchestrator.state().connectivity_status(),
            ConnectivityStatus::Connecting
        );
    }

    #[test]
    fn events_from_superseded_connection_are_ignored() {
        let mut orchestrator = orchestrator();
        handle(&mut orchestrator, AppEvent::Connection(ConnectionEvent::closed(0, None)));
        handle(&mut orchestrator, AppEvent::InputKey(KeyInput::new("r", true)));

        handle(
            &mut orchestrator,
            AppEvent::Connection(ConnectionEvent::message(
                0,
                r#"{"chat_id":"123456","sender":"admin","content":"late"}"#,
            )),
        );
        handle(&mut orchestrator, AppEvent::Connection(ConnectionEvent::opened(1)));

        assert!(transcript(&orchestrator).is_empty());
        assert_eq!(
            orchestrator.state().connectivity_status(),
            ConnectivityStatus::Online
        );
    }

    #[test]
    fn editing_keys_update_the_input() {
        let mut orchestrator = orchestrator();

        type_text(&mut orchestrator, "helo");
        press(&mut orchestrator, "left");
        type_text(&mut orchestrator, "l");
        press(&mut orchestrator, "end");
        press(&mut orchestrator, "backspace");
        press(&mut orchestrator, "home");
        press(&mut orchestrator, "delete");

        assert_eq!(orchestrator.state().message_input().text(), "ell");
    }

    #[test]
    fn paste_inserts_text_as_one_line() {
        let mut orchestrator = orchestrator();

        handle(&mut orchestrator, AppEvent::Paste("line one\nline two".to_owned()));

        assert_eq!(
            orchestrator.state().message_input().text(),
            "line one line two"
        );
    }

    #[test]
    fn scroll_keys_detach_transcript_from_tail() {
        let mut orchestrator = orchestrator();

        press(&mut orchestrator, "page_up");

        assert!(!orchestrator.state().transcript().is_following_tail());
    }
}
