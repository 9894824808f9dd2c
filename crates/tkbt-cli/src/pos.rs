//! Parts-of-speech lookup against a jisho.org-compatible search API.

use std::cell::RefCell;
use std::collections::HashMap;
use std::time::Duration;

use tkbt_core::settings::PosSettings;
use tracing::{debug, debug_span};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PosError {
    #[error("HTTP error: {0}")]
    Http(String),

    #[error("parse error: {0}")]
    Parse(String),

    #[error("no parts of speech found for {0:?}")]
    NotFound(String),
}

/// Source of grammatical categories for a word.
pub trait PosLookup {
    /// Comma-joined, lowercased part-of-speech labels for `word`.
    fn parts_of_speech(&self, word: &str) -> Result<String, PosError>;
}

impl<L: PosLookup + ?Sized> PosLookup for &L {
    fn parts_of_speech(&self, word: &str) -> Result<String, PosError> {
        (**self).parts_of_speech(word)
    }
}

pub struct JishoClient {
    agent: ureq::Agent,
    endpoint: String,
}

impl JishoClient {
    pub fn new(endpoint: impl Into<String>, timeout: Duration) -> Self {
        let agent: ureq::Agent = ureq::Agent::config_builder()
            .timeout_global(Some(timeout))
            .build()
            .into();
        Self {
            agent,
            endpoint: endpoint.into(),
        }
    }

    pub fn from_settings(settings: &PosSettings) -> Self {
        Self::new(
            settings.endpoint.clone(),
            Duration::from_secs(settings.timeout_secs),
        )
    }
}

impl PosLookup for JishoClient {
    fn parts_of_speech(&self, word: &str) -> Result<String, PosError> {
        let _span = debug_span!("pos_lookup", word).entered();
        let body = self
            .agent
            .get(self.endpoint.as_str())
            .query("keyword", word)
            .call()
            .map_err(|e| PosError::Http(format!("{}: {e}", self.endpoint)))?
            .into_body()
            .read_to_string()
            .map_err(|e| PosError::Http(format!("{}: {e}", self.endpoint)))?;
        parse_search_response(word, &body)
    }
}

/// Extract the parts of speech of the first sense of the first result.
pub fn parse_search_response(word: &str, json: &str) -> Result<String, PosError> {
    let value: serde_json::Value =
        serde_json::from_str(json).map_err(|e| PosError::Parse(format!("search JSON: {e}")))?;

    let Some(labels) = value["data"][0]["senses"][0]["parts_of_speech"].as_array() else {
        return Err(PosError::NotFound(word.to_string()));
    };
    let labels: Vec<&str> = labels.iter().filter_map(|v| v.as_str()).collect();
    if labels.is_empty() {
        return Err(PosError::NotFound(word.to_string()));
    }
    Ok(labels.join(", ").to_lowercase())
}

/// Memoizes lookups per distinct word for the lifetime of one run.
pub struct CachedLookup<L> {
    inner: L,
    cache: RefCell<HashMap<String, Result<String, PosError>>>,
}

impl<L: PosLookup> CachedLookup<L> {
    pub fn new(inner: L) -> Self {
        Self {
            inner,
            cache: RefCell::new(HashMap::new()),
        }
    }
}

impl<L: PosLookup> PosLookup for CachedLookup<L> {
    fn parts_of_speech(&self, word: &str) -> Result<String, PosError> {
        if let Some(hit) = self.cache.borrow().get(word) {
            debug!(word, "pos cache hit");
            return hit.clone();
        }
        let result = self.inner.parts_of_speech(word);
        self.cache
            .borrow_mut()
            .insert(word.to_string(), result.clone());
        result
    }
}
