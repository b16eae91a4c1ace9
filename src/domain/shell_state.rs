use super::{
    connection::ConnectionState, events::ConnectivityStatus,
    message_input_state::MessageInputState, transcript::TranscriptState,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShellState {
    running: bool,
    chat_id: String,
    connectivity_status: ConnectivityStatus,
    connection_state: ConnectionState,
    transcript: TranscriptState,
    message_input: MessageInputState,
    notice: Option<String>,
}

impl ShellState {
    pub fn new(chat_id: impl Into<String>) -> Self {
        Self {
            running: true,
            chat_id: chat_id.into(),
            connectivity_status: ConnectivityStatus::Connecting,
            connection_state: ConnectionState::Connecting,
            transcript: TranscriptState::default(),
            message_input: MessageInputState::default(),
            notice: None,
        }
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn stop(&mut self) {
        self.running = false;
    }

    pub fn chat_id(&self) -> &str {
        &self.chat_id
    }

    pub fn connectivity_status(&self) -> ConnectivityStatus {
        self.connectivity_status
    }

    pub fn set_connectivity_status(&mut self, status: ConnectivityStatus) {
        self.connectivity_status = status;
    }

    pub fn connection_state(&self) -> ConnectionState {
        self.connection_state
    }

    pub fn set_connection_state(&mut self, state: ConnectionState) {
        self.connection_state = state;
    }

    pub fn transcript(&self) -> &TranscriptState {
        &self.transcript
    }

    pub fn transcript_mut(&mut self) -> &mut TranscriptState {
        &mut self.transcript
    }

    pub fn message_input(&self) -> &MessageInputState {
        &self.message_input
    }

    pub fn message_input_mut(&mut self) -> &mut MessageInputState {
        &mut self.message_input
    }

    /// One-line hint shown in the status bar until replaced or cleared.
    pub fn notice(&self) -> Option<&str> {
        self.notice.as_deref()
    }

    pub fn set_notice(&mut self, notice: impl Into<String>) {
        self.notice = Some(notice.into());
    }

    pub fn clear_notice(&mut self) {
        self.notice = None;
    }
}
