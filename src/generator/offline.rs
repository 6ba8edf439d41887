use std::collections::HashMap;

use crate::generator::{GeneratorError, SentenceGenerator};
use crate::words::catalog::Catalog;

/// Serves the sentences bundled with the word list, for play without a backend.
pub struct OfflineGenerator {
    sentences: HashMap<String, String>,
}

impl OfflineGenerator {
    pub fn from_catalog(catalog: &Catalog) -> Self {
        let sentences = catalog
            .records()
            .iter()
            .filter_map(|r| {
                r.sentence
                    .as_ref()
                    .filter(|s| !s.trim().is_empty())
                    .map(|s| (r.word.to_lowercase(), s.clone()))
            })
            .collect();
        Self { sentences }
    }
}

impl SentenceGenerator for OfflineGenerator {
    fn generate(&self, word: &str) -> Result<String, GeneratorError> {
        self.sentences
            .get(&word.to_lowercase())
            .cloned()
            .ok_or_else(|| GeneratorError::Unavailable(word.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::sentence_or_fallback;

    #[test]
    fn serves_bundled_sentence() {
        let catalog = Catalog::embedded().unwrap();
        let generator = OfflineGenerator::from_catalog(&catalog);
        assert_eq!(
            generator.generate("Gato").unwrap(),
            "El gato está durmiendo en el sofá."
        );
    }

    #[test]
    fn unknown_word_falls_back() {
        let catalog = Catalog::embedded().unwrap();
        let generator = OfflineGenerator::from_catalog(&catalog);
        assert!(generator.generate("tortuga").is_err());
        assert_eq!(
            sentence_or_fallback(&generator, "tortuga"),
            "Mira la tortuga que está en la mesa."
        );
    }
}
