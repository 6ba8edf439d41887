use std::fs;
use std::path::{Path, PathBuf};

use tracing::{info, warn};

use crate::config::Config;
use crate::generator::http;
use crate::words::record::{RecordProblem, WordRecord};

const WORDS_ES: &str = include_str!("../../assets/data/palabras.json");

#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("failed to read word list {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("word list is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("record {index} ({word:?}) is invalid: {problem}")]
    InvalidRecord {
        index: usize,
        word: String,
        problem: RecordProblem,
    },
    #[error("word list has no usable records")]
    Empty,
}

/// The ordered word list a game walks through.
#[derive(Clone, Debug)]
pub struct Catalog {
    records: Vec<WordRecord>,
}

impl Catalog {
    /// Every record must be valid.
    pub fn new(records: Vec<WordRecord>) -> Result<Self, CatalogError> {
        for (index, record) in records.iter().enumerate() {
            record
                .validate()
                .map_err(|problem| CatalogError::InvalidRecord {
                    index,
                    word: record.word.clone(),
                    problem,
                })?;
        }
        if records.is_empty() {
            return Err(CatalogError::Empty);
        }
        Ok(Self { records })
    }

    pub fn embedded() -> Result<Self, CatalogError> {
        Self::from_json(WORDS_ES)
    }

    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let records: Vec<WordRecord> = serde_json::from_str(json)?;
        Self::new(records)
    }

    /// Like [`Catalog::from_json`], but drops invalid records instead of
    /// rejecting the whole list. Used for lists served by the backend.
    pub fn from_json_lenient(json: &str) -> Result<Self, CatalogError> {
        let records: Vec<WordRecord> = serde_json::from_str(json)?;
        let records: Vec<WordRecord> = records
            .into_iter()
            .filter(|r| match r.validate() {
                Ok(()) => true,
                Err(problem) => {
                    warn!(word = %r.word, %problem, "skipping invalid record");
                    false
                }
            })
            .collect();
        Self::new(records)
    }

    pub fn from_file(path: &Path) -> Result<Self, CatalogError> {
        let content = fs::read_to_string(path).map_err(|source| CatalogError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&content)
    }

    /// Resolve the word list: explicit file, then the remote list, then the
    /// bundled one. A broken explicit file is an error; a broken remote list
    /// is not.
    pub fn load(config: &Config) -> Result<Self, CatalogError> {
        if let Some(ref path) = config.words_file {
            let catalog = Self::from_file(Path::new(path))?;
            info!(path = %path, words = catalog.len(), "loaded word list from file");
            return Ok(catalog);
        }

        if !config.offline {
            if let Some(ref url) = config.words_endpoint {
                match Self::fetch(url, config) {
                    Ok(catalog) => {
                        info!(url = %url, words = catalog.len(), "loaded word list from backend");
                        return Ok(catalog);
                    }
                    Err(err) => {
                        warn!(url = %url, error = %err, "remote word list unavailable, using bundled list");
                    }
                }
            }
        }

        Self::embedded()
    }

    fn fetch(url: &str, config: &Config) -> anyhow::Result<Self> {
        let body = http::get_text(url, config.request_timeout())?;
        Ok(Self::from_json_lenient(&body)?)
    }

    pub fn records(&self) -> &[WordRecord] {
        &self.records
    }

    pub fn get(&self, index: usize) -> Option<&WordRecord> {
        self.records.get(index)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn is_last(&self, index: usize) -> bool {
        index + 1 >= self.records.len()
    }
}
