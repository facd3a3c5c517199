//! The verse search engine.
//!
//! A search is a linear scan: the raw query is interpreted once
//! ([`Query::parse`]), every record of every selected corpus is tested in
//! corpus order then record order ([`matches`]), matching text is
//! highlighted ([`highlight`]), and the flat match list is later grouped by
//! verse for display ([`aggregate`]). [`scan::run_search`] owns the loop;
//! [`worker::SearchWorker`] runs it off the caller's task.

pub mod aggregate;
pub mod highlight;
pub mod matcher;
pub mod progress;
pub mod query;
pub mod scan;
pub mod worker;

use serde::{Deserialize, Serialize};

pub use aggregate::aggregate;
pub use highlight::{escape_html, highlight};
pub use matcher::matches;
pub use progress::{ProgressEvent, ProgressReporter, ProgressSettings};
pub use query::{Query, QueryOptions};
pub use scan::{ScanError, ScanSettings, run_search};
pub use worker::{SearchTask, SearchWorker, WorkerError};

/// One matching verse from one translation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchResult {
    pub sura: u16,
    pub aya: u32,
    /// Translator display name (or the record's own translator field).
    pub translator: String,
    /// Original verse text, unescaped.
    pub text: String,
    /// HTML-safe text with matches wrapped in `<mark>`.
    #[serde(alias = "highlighted")]
    pub highlighted_text: String,
}

/// All matches for one verse, one item per translator that has it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResultGroup {
    pub sura: u16,
    pub aya: u32,
    pub items: Vec<MatchResult>,
}

impl ResultGroup {
    /// The item contributed by a translator, if any.
    #[must_use]
    pub fn item_for(&self, translator: &crate::corpus::Translator) -> Option<&MatchResult> {
        self.items
            .iter()
            .find(|item| translator.is_labelled(&item.translator))
    }
}
