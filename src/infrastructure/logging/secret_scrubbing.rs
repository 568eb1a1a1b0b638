use regex::{Captures, Regex};
use std::fmt;

/// Redacts credentials from text before it is logged or shown
///
/// Remote error bodies sometimes echo the request (including the
/// Authorization header or a key fragment); everything read back from the
/// completion service goes through [`SecretScrubber::scrub`] first.
#[derive(Clone)]
pub struct SecretScrubber {
    api_key_pattern: Regex,
    field_pattern: Regex,
    bearer_pattern: Regex,
}

impl SecretScrubber {
    /// Create a new scrubber
    pub fn new() -> Self {
        Self {
            // Groq keys (gsk_...) and OpenAI-style keys (sk-...)
            api_key_pattern: Regex::new(r"\b(?:gsk_|sk-)[A-Za-z0-9_\-]{8,}").expect("static regex"),
            field_pattern: Regex::new(
                r#"(["']?(?:api_key|apikey|token|secret)["']?\s*[:=]\s*)["']?[A-Za-z0-9_\-\.]{8,}["']?"#,
            )
            .expect("static regex"),
            bearer_pattern: Regex::new(r"Bearer\s+[A-Za-z0-9_\-\.]+").expect("static regex"),
        }
    }

    /// Return `message` with every recognised secret replaced
    pub fn scrub(&self, message: &str) -> String {
        let scrubbed = self
            .bearer_pattern
            .replace_all(message, "Bearer [TOKEN_REDACTED]");
        let scrubbed = self
            .field_pattern
            .replace_all(&scrubbed, |caps: &Captures| format!("{}[REDACTED]", &caps[1]));
        self.api_key_pattern
            .replace_all(&scrubbed, "[API_KEY_REDACTED]")
            .into_owned()
    }
}

impl Default for SecretScrubber {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for SecretScrubber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SecretScrubber").finish()
    }
}

/// Short, log-safe prefix of a credential (e.g. `gsk_…(56 chars)`)
pub fn redact_key(key: &str) -> String {
    let prefix: String = key.chars().take(4).collect();
    format!("{prefix}…({} chars)", key.chars().count())
}
