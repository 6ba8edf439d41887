use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::generator::http;
use crate::generator::{GeneratorError, SentenceGenerator};

#[derive(Serialize)]
struct SentenceRequest<'a> {
    palabra: &'a str,
}

#[derive(Deserialize)]
struct SentenceResponse {
    oracion: String,
    /// Set by the backend when it answered with its own canned sentence.
    #[serde(default)]
    error: Option<String>,
}

/// Sentence backend reached over HTTP: `POST {"palabra": ...}` → `{"oracion": ...}`.
pub struct RemoteGenerator {
    endpoint: String,
    timeout: Duration,
}

impl RemoteGenerator {
    pub fn new(endpoint: &str, timeout: Duration) -> Self {
        Self {
            endpoint: endpoint.to_string(),
            timeout,
        }
    }
}

impl SentenceGenerator for RemoteGenerator {
    fn generate(&self, word: &str) -> Result<String, GeneratorError> {
        let body = http::post_json(
            &self.endpoint,
            &SentenceRequest { palabra: word },
            self.timeout,
        )?;
        parse_response(&body)
    }
}

fn parse_response(body: &str) -> Result<String, GeneratorError> {
    let response: SentenceResponse = serde_json::from_str(body)?;
    if let Some(note) = response.error.as_deref() {
        debug!(note, "backend answered with a degraded sentence");
    }
    let sentence = response.oracion.trim();
    if sentence.is_empty() {
        return Err(GeneratorError::Empty);
    }
    Ok(sentence.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_body_uses_palabra_key() {
        let body = serde_json::to_string(&SentenceRequest { palabra: "gato" }).unwrap();
        assert_eq!(body, r#"{"palabra":"gato"}"#);
    }

    #[test]
    fn parses_generated_sentence() {
        let sentence = parse_response(r#"{"oracion": "El gato toma leche\n"}"#).unwrap();
        assert_eq!(sentence, "El gato toma leche");
    }

    #[test]
    fn accepts_backend_degraded_answer() {
        let body = r#"{"oracion": "La casa es muy bonita.", "error": "Límite diario alcanzado"}"#;
        assert_eq!(parse_response(body).unwrap(), "La casa es muy bonita.");
    }

    #[test]
    fn empty_sentence_is_an_error() {
        assert!(matches!(
            parse_response(r#"{"oracion": "  "}"#),
            Err(GeneratorError::Empty)
        ));
    }

    #[test]
    fn error_payload_without_sentence_is_a_decode_error() {
        assert!(matches!(
            parse_response(r#"{"error": "No se proporcionó una palabra"}"#),
            Err(GeneratorError::Decode(_))
        ));
    }

    #[test]
    fn unreachable_endpoint_is_an_error() {
        // Port 9 (discard) on localhost is closed in test environments.
        let generator = RemoteGenerator::new("http://127.0.0.1:9/api/oracion/", Duration::from_secs(1));
        assert!(generator.generate("sol").is_err());
    }
}
