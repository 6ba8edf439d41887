pub mod http;
pub mod offline;
pub mod remote;

use std::sync::Arc;

use tracing::{debug, warn};

use crate::config::Config;
use crate::generator::http::HttpError;
use crate::generator::offline::OfflineGenerator;
use crate::generator::remote::RemoteGenerator;
use crate::words::catalog::Catalog;

#[derive(Debug, thiserror::Error)]
pub enum GeneratorError {
    #[error(transparent)]
    Http(#[from] HttpError),
    #[error("sentence response could not be decoded: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("sentence response was empty")]
    Empty,
    #[error("no offline sentence for {0:?}")]
    Unavailable(String),
}

/// Produces the sentence the player has to repeat for a word.
pub trait SentenceGenerator: Send + Sync {
    fn generate(&self, word: &str) -> Result<String, GeneratorError>;
}

pub fn fallback_sentence(word: &str) -> String {
    format!("Mira la {} que está en la mesa.", word.trim())
}

/// Ask `generator` for a sentence; any failure yields the fixed fallback, so
/// the result is never empty.
pub fn sentence_or_fallback(generator: &dyn SentenceGenerator, word: &str) -> String {
    match generator.generate(word) {
        Ok(sentence) if !sentence.trim().is_empty() => {
            debug!(word = %word, "sentence generated");
            sentence.trim().to_string()
        }
        Ok(_) => {
            warn!(word = %word, "generator returned a blank sentence, using fallback");
            fallback_sentence(word)
        }
        Err(err) => {
            warn!(word = %word, error = %err, "sentence generation failed, using fallback");
            fallback_sentence(word)
        }
    }
}

pub fn from_config(config: &Config, catalog: &Catalog) -> Arc<dyn SentenceGenerator> {
    if config.offline {
        Arc::new(OfflineGenerator::from_catalog(catalog))
    } else {
        Arc::new(RemoteGenerator::new(
            &config.sentence_endpoint,
            config.request_timeout(),
        ))
    }
}
