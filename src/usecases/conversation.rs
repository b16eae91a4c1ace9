//! Conversation view sync: bridges user intent and inbound envelopes to the
//! visible transcript.
//!
//! Every transcript entry comes from exactly one local submit or one decoded
//! inbound envelope. Local submits are echoed optimistically and never
//! deduplicated against a server echo of the same message.

use thiserror::Error;

use crate::{
    chat::codec::{self, EncodeError},
    domain::{
        connection::SendStatus,
        envelope::ChatEnvelope,
        events::ConnectivityStatus,
        shell_state::ShellState,
        transcript::{TranscriptEntry, TranscriptState},
    },
};

use super::{contracts::ChatTransport, session::ChatSession};

const CHAT_SEND_DROPPED: &str = "CHAT_SEND_DROPPED";
const CHAT_PAYLOAD_DISCARDED: &str = "CHAT_PAYLOAD_DISCARDED";
const CHAT_FOREIGN_CHAT_ID: &str = "CHAT_FOREIGN_CHAT_ID";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Blank input; nothing was sent or appended.
    Ignored,
    /// Entry appended and payload handed to the transport.
    Sent(SendStatus),
}

#[derive(Debug, Error)]
pub enum SubmitError {
    #[error(transparent)]
    Encoding(#[from] EncodeError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReceiveOutcome {
    Appended,
    Discarded,
}

/// Sends `text` and echoes it into the transcript.
///
/// Encoding happens before the echo, so an encoding failure leaves the
/// transcript untouched.
pub fn submit<T: ChatTransport>(
    session: &ChatSession<T>,
    transcript: &mut TranscriptState,
    text: &str,
) -> Result<SubmitOutcome, SubmitError> {
    let content = text.trim();
    if content.is_empty() {
        return Ok(SubmitOutcome::Ignored);
    }

    let envelope = ChatEnvelope::new(session.chat_id(), session.sender().clone(), content);
    let payload = codec::encode(&envelope)?;

    let status = session.send_payload(payload);
    if status == SendStatus::Dropped {
        tracing::debug!(
            code = CHAT_SEND_DROPPED,
            state = session.connection_state().as_label(),
            "outbound chat message dropped; connection is not open"
        );
    }

    transcript.push(TranscriptEntry::local(envelope.sender, envelope.content));
    transcript.scroll_to_bottom();
    Ok(SubmitOutcome::Sent(status))
}

/// Submits the compose field and clears it once the message is echoed.
pub fn submit_input<T: ChatTransport>(
    session: &ChatSession<T>,
    state: &mut ShellState,
) -> Result<SubmitOutcome, SubmitError> {
    let text = state.message_input().text();
    let outcome = submit(session, state.transcript_mut(), &text)?;

    if matches!(outcome, SubmitOutcome::Sent(_)) {
        state.message_input_mut().clear();
    }

    Ok(outcome)
}

pub fn on_receive(transcript: &mut TranscriptState, envelope: ChatEnvelope) {
    transcript.push(TranscriptEntry::remote(envelope));
}

/// Decodes one inbound payload and appends it. Malformed payloads are logged
/// and skipped without touching the transcript.
pub fn receive_payload(
    chat_id: &str,
    transcript: &mut TranscriptState,
    payload: &str,
) -> ReceiveOutcome {
    let envelope = match codec::decode(payload) {
        Ok(envelope) => envelope,
        Err(error) => {
            tracing::warn!(
                code = CHAT_PAYLOAD_DISCARDED,
                error = %error,
                payload_len = payload.len(),
                "discarding malformed inbound chat payload"
            );
            return ReceiveOutcome::Discarded;
        }
    };

    if envelope.chat_id != chat_id {
        tracing::warn!(
            code = CHAT_FOREIGN_CHAT_ID,
            expected = chat_id,
            received = %envelope.chat_id,
            "inbound envelope carries a different chat id"
        );
    }

    on_receive(transcript, envelope);
    ReceiveOutcome::Appended
}

/// Connectivity only drives the indicator; sending is never gated on it.
pub fn on_connectivity_change(state: &mut ShellState, status: ConnectivityStatus) {
    state.set_connectivity_status(status);
}
