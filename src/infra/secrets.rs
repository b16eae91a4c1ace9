use std::panic;

const REDACTED: &str = "[REDACTED]";

const SENSITIVE_KEYS: [&str; 5] = ["token", "cookie", "password", "authorization", "secret"];

/// Scrubs credential fragments from free text: the value of any
/// `key=value`/`key: value` pair whose key looks sensitive, and anything that
/// looks like a JWT.
pub fn redact_text(input: &str) -> String {
    let mut redact_next = false;

    input
        .split_whitespace()
        .map(|chunk| {
            if redact_next {
                redact_next = false;
                return REDACTED.to_owned();
            }

            let (chunk, dangling_key) = redact_chunk(chunk);
            redact_next = dangling_key;
            chunk
        })
        .collect::<Vec<_>>()
        .join(" ")
}

pub fn install_panic_redaction_hook() {
    panic::set_hook(Box::new(|panic_info| {
        let payload = panic_info
            .payload()
            .downcast_ref::<&str>()
            .map(ToString::to_string)
            .or_else(|| panic_info.payload().downcast_ref::<String>().cloned())
            .unwrap_or_else(|| "panic payload omitted".to_owned());

        let scrubbed = redact_text(&payload);

        if let Some(location) = panic_info.location() {
            eprintln!(
                "rchat panic: {} at {}:{}:{}",
                scrubbed,
                location.file(),
                location.line(),
                location.column()
            );
        } else {
            eprintln!("rchat panic: {}", scrubbed);
        }
    }));
}

/// Returns the redacted chunk and whether it was a bare sensitive key whose
/// value follows in the next chunk (`token: abc`).
fn redact_chunk(chunk: &str) -> (String, bool) {
    if let Some((key, _)) = chunk.split_once('=') {
        if is_sensitive_key(key) {
            return (format!("{key}={REDACTED}"), false);
        }
    }

    if let Some(key) = chunk.strip_suffix(':') {
        if is_sensitive_key(key) {
            return (chunk.to_owned(), true);
        }
    }

    if looks_like_jwt(chunk) {
        return (REDACTED.to_owned(), false);
    }

    (chunk.to_owned(), false)
}

fn is_sensitive_key(key: &str) -> bool {
    let lowered = key.to_ascii_lowercase();
    SENSITIVE_KEYS.iter().any(|marker| lowered.contains(marker))
}

fn looks_like_jwt(value: &str) -> bool {
    let cleaned = value.trim_matches(|ch: char| !(ch.is_ascii_alphanumeric() || ch == '_' || ch == '-'));
    let segments: Vec<&str> = cleaned.split('.').collect();

    segments.len() == 3
        && segments[0].starts_with("eyJ")
        && segments.iter().all(|segment| {
            !segment.is_empty()
                && segment
                    .chars()
                    .all(|ch| ch.is_ascii_alphanumeric() || ch == '_' || ch == '-')
        })
}
