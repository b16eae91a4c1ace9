//! JSON wire codec for [`ChatEnvelope`].
//!
//! Payloads are objects with exactly the `chat_id`, `sender` and `content`
//! fields. Unknown extra fields are ignored on decode.

use thiserror::Error;

use crate::domain::envelope::ChatEnvelope;

#[derive(Debug, Error)]
pub enum EncodeError {
    #[error("refusing to encode envelope with blank content")]
    EmptyContent,
    #[error("failed to serialize chat envelope: {0}")]
    Serialize(#[source] serde_json::Error),
}

#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("malformed chat payload: {0}")]
    Malformed(#[source] serde_json::Error),
    #[error("chat payload has blank content")]
    EmptyContent,
}

pub fn encode(envelope: &ChatEnvelope) -> Result<String, EncodeError> {
    if !envelope.has_content() {
        return Err(EncodeError::EmptyContent);
    }

    serde_json::to_string(envelope).map_err(EncodeError::Serialize)
}

pub fn decode(payload: &str) -> Result<ChatEnvelope, DecodeError> {
    let envelope: ChatEnvelope = serde_json::from_str(payload).map_err(DecodeError::Malformed)?;

    if !envelope.has_content() {
        return Err(DecodeError::EmptyContent);
    }

    Ok(envelope)
}

#[cfg(test)]
mod tests {
    use serde_json::Value;

    use super::*;
    use crate::domain::envelope::SenderRole;

    #[test]
    fn encodes_the_three_wire_fields() {
        let payload = encode(&ChatEnvelope::new("123456", SenderRole::User, "hello"))
            .expect("envelope must encode");

        let value: Value = serde_json::from_str(&payload).expect("payload must be json");
        assert_eq!(value["chat_id"], "123456");
        assert_eq!(value["sender"], "user");
        assert_eq!(value["content"], "hello");
        assert_eq!(value.as_object().map(|o| o.len()), Some(3));
    }

    #[test]
    fn decodes_server_payload() {
        let envelope = decode(r#"{"chat_id":"123456","sender":"admin","content":"hi"}"#)
            .expect("payload must decode");

        assert_eq!(envelope, ChatEnvelope::new("123456", SenderRole::Admin, "hi"));
    }

    #[test]
    fn round_trips_known_and_unknown_roles() {
        for sender in [
            SenderRole::User,
            SenderRole::Admin,
            SenderRole::Other("bot".to_owned()),
        ] {
            let envelope = ChatEnvelope::new("c", sender, "Привет, world");
            let decoded = decode(&encode(&envelope).expect("encode")).expect("decode");

            assert_eq!(decoded, envelope);
        }
    }

    #[test]
    fn ignores_unknown_fields() {
        let envelope =
            decode(r#"{"chat_id":"c","sender":"user","content":"x","timestamp":"2025-01-01"}"#)
                .expect("extra fields are tolerated");

        assert_eq!(envelope.content, "x");
    }

    #[test]
    fn rejects_non_json_payload() {
        assert!(matches!(decode("not json"), Err(DecodeError::Malformed(_))));
    }

    #[test]
    fn rejects_payload_missing_a_field() {
        assert!(matches!(
            decode(r#"{"chat_id":"c","content":"x"}"#),
            Err(DecodeError::Malformed(_))
        ));
    }

    #[test]
    fn rejects_wrongly_typed_field() {
        assert!(matches!(
            decode(r#"{"chat_id":"c","sender":"user","content":42}"#),
            Err(DecodeError::Malformed(_))
        ));
    }

    #[test]
    fn rejects_blank_content_both_ways() {
        assert!(matches!(
            decode(r#"{"chat_id":"c","sender":"user","content":"   "}"#),
            Err(DecodeError::EmptyContent)
        ));
        assert!(matches!(
            encode(&ChatEnvelope::new("c", SenderRole::User, "")),
            Err(EncodeError::EmptyContent)
        ));
    }
}
