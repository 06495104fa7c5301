//! The question source seam.
//!
//! The engine consumes question banks through the [`QuestionSource`]
//! trait and never knows whether the records came from files, a
//! network fetch, or a test fixture. Raw records tolerate the loose
//! field spellings found in existing bank data (`q`/`question` for the
//! prompt, `ans`/`correct` for the answer).

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::{SourceError, SourceResult};

/// A raw question record as delivered by a source, before validation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawQuestion {
    /// The question text.
    #[serde(alias = "q", alias = "question")]
    pub prompt: String,
    /// Candidate options, expected to contain the answer.
    #[serde(default)]
    pub options: Vec<String>,
    /// The correct option's text.
    #[serde(alias = "ans", alias = "correct")]
    pub answer: String,
}

impl RawQuestion {
    /// Whether this record can be played: non-empty prompt, at least
    /// one option, and the answer present among the options.
    pub fn is_usable(&self) -> bool {
        !self.prompt.is_empty()
            && !self.options.is_empty()
            && self.options.iter().any(|o| *o == self.answer)
    }
}

/// Provider of raw question records, keyed by category name.
pub trait QuestionSource {
    /// All known category names, in a stable order.
    fn list_categories(&self) -> Vec<String>;

    /// Fetch the raw question list for one category.
    ///
    /// # Errors
    ///
    /// Returns [`SourceError::UnknownCategory`] for a name not in
    /// [`list_categories`](Self::list_categories), or
    /// [`SourceError::Fetch`] when the underlying transport fails.
    fn fetch_category(&self, name: &str) -> SourceResult<Vec<RawQuestion>>;
}

/// An in-memory question source for tests and embedders.
#[derive(Debug, Clone, Default)]
pub struct StaticSource {
    categories: BTreeMap<String, Vec<RawQuestion>>,
}

impl StaticSource {
    /// Create an empty source.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a category, replacing any previous list under the same name.
    #[must_use]
    pub fn with_category(mut self, name: impl Into<String>, questions: Vec<RawQuestion>) -> Self {
        self.categories.insert(name.into(), questions);
        self
    }
}

impl QuestionSource for StaticSource {
    fn list_categories(&self) -> Vec<String> {
        self.categories.keys().cloned().collect()
    }

    fn fetch_category(&self, name: &str) -> SourceResult<Vec<RawQuestion>> {
        self.categories
            .get(name)
            .cloned()
            .ok_or_else(|| SourceError::UnknownCategory(name.to_string()))
    }
}
