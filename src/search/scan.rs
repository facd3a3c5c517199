//! The scan loop.

use std::time::Instant;

use thiserror::Error;
use tracing::{debug, info};

use crate::corpus::CorpusError;
use crate::protocol::{DonePayload, SearchRequest};
use crate::search::highlight::highlight;
use crate::search::matcher::matches;
use crate::search::progress::{ProgressEvent, ProgressReporter, ProgressSettings};
use crate::search::query::{Query, QueryOptions};
use crate::search::MatchResult;

/// Errors that abort a whole search. No partial results are returned.
#[derive(Debug, Error)]
pub enum ScanError {
    #[error("Dataset '{key}' has no data")]
    MissingData { key: String },

    #[error("Dataset '{key}' record {index}: {source}")]
    InvalidRecord {
        key: String,
        index: usize,
        #[source]
        source: CorpusError,
    },
}

/// Engine tuning shared by every search.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScanSettings {
    pub query: QueryOptions,
    pub progress: ProgressSettings,
}

/// Run one search to completion on the current thread.
///
/// Datasets are scanned in request order, records in dataset order.
/// `on_progress` is called with strictly increasing counts.
///
/// # Errors
///
/// Returns `ScanError` if a dataset has no data or holds a malformed record.
pub fn run_search(
    request: SearchRequest,
    settings: &ScanSettings,
    mut on_progress: impl FnMut(ProgressEvent),
) -> Result<DonePayload, ScanError> {
    let started = Instant::now();
    let query = Query::parse(&request.query, &settings.query);

    let mut total = 0;
    for dataset in &request.datasets {
        match &dataset.data {
            Some(records) => total += records.len(),
            None => {
                return Err(ScanError::MissingData {
                    key: dataset.key.clone(),
                });
            }
        }
    }

    let mut progress = ProgressReporter::new(total, &settings.progress);
    debug!(
        pattern = query.is_pattern(),
        terms = ?query.terms(),
        total,
        interval = progress.interval(),
        "Starting scan"
    );

    let mut records = Vec::new();
    for dataset in &request.datasets {
        let label = dataset.label();
        for (index, record) in dataset.data.iter().flatten().enumerate() {
            if let Some(event) = progress.advance() {
                on_progress(event);
            }

            record.validate().map_err(|source| ScanError::InvalidRecord {
                key: dataset.key.clone(),
                index,
                source,
            })?;

            if matches(record, &query) {
                records.push(MatchResult {
                    sura: record.sura,
                    aya: record.aya,
                    translator: record
                        .translator
                        .clone()
                        .unwrap_or_else(|| label.to_string()),
                    text: record.text.clone(),
                    highlighted_text: highlight(&record.text, &query),
                });
            }
        }
    }

    info!(
        query = %request.query,
        matches = records.len(),
        scanned = total,
        elapsed_ms = started.elapsed().as_millis(),
        "Search completed"
    );

    Ok(DonePayload {
        records,
        query: request.query,
        sura_names: request.sura_names,
    })
}
