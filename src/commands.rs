//! Command implementations shared by CLI and MCP server.

use std::path::PathBuf;

use tracing::{debug, warn};

use crate::config::Config;
use crate::corpus::{Corpus, SURA_COUNT, SuraNames, Translator, default_sura_names};
use crate::protocol::{self, DonePayload, SearchRequest};
use crate::search::{
    MatchResult, ProgressEvent, ResultGroup, SearchWorker, aggregate, escape_html,
};
use crate::storage::StorageBackend;
use crate::storage::local::LocalStorageBackend;

/// Check a raw query before it is sent to the engine.
///
/// Returns the trimmed query.
///
/// # Errors
///
/// Returns an error if the query is empty, longer than `max_length`
/// characters, or contains a NUL byte.
pub fn validate_query(query: &str, max_length: usize) -> anyhow::Result<&str> {
    let query = query.trim();

    if query.is_empty() {
        anyhow::bail!("Query cannot be empty");
    }

    let length = query.chars().count();
    if length > max_length {
        anyhow::bail!("Query too long: {length} chars (max {max_length})");
    }

    if query.contains('\0') {
        anyhow::bail!("Query contains invalid character: NUL");
    }

    Ok(query)
}

/// Resolve requested translator keys against the configured list.
///
/// An empty request selects every translator. The result keeps the
/// configured order and drops duplicates.
///
/// # Errors
///
/// Returns an error naming the first unknown key.
pub fn select_translators(
    available: &[Translator],
    keys: &[String],
) -> anyhow::Result<Vec<Translator>> {
    if keys.is_empty() {
        return Ok(available.to_vec());
    }

    for key in keys {
        if !available.iter().any(|t| &t.key == key) {
            let known: Vec<&str> = available.iter().map(|t| t.key.as_str()).collect();
            anyhow::bail!(
                "Unknown translator: {key} (available: {})",
                known.join(", ")
            );
        }
    }

    Ok(available
        .iter()
        .filter(|t| keys.contains(&t.key))
        .cloned()
        .collect())
}

/// Load each translator's corpus from the first data directory that has it.
///
/// # Errors
///
/// Returns an error if no corpus could be loaded at all. Individual
/// failures are logged but don't fail the load.
pub fn load_corpora(config: &Config, translators: &[Translator]) -> anyhow::Result<Vec<Corpus>> {
    let backends: Vec<LocalStorageBackend> = config
        .data_paths()
        .into_iter()
        .map(LocalStorageBackend::new)
        .collect();

    let mut corpora = Vec::new();
    let mut errors = Vec::new();

    for translator in translators {
        match backends.iter().find(|b| b.exists(translator)) {
            Some(backend) => match backend.read_corpus(translator) {
                Ok(corpus) => {
                    debug!(
                        key = %translator.key,
                        records = corpus.len(),
                        root = %backend.root().display(),
                        "Loaded corpus"
                    );
                    corpora.push(corpus);
                }
                Err(e) => errors.push(format!("Load {}: {e}", translator.key)),
            },
            None => errors.push(format!("No data file for {}", translator.key)),
        }
    }

    // If we got no corpora and had errors, report them
    if corpora.is_empty() && !errors.is_empty() {
        anyhow::bail!("No translation data loaded:\n  {}", errors.join("\n  "));
    }

    for error in &errors {
        warn!("{error}");
    }

    Ok(corpora)
}

/// Sura names from the first data directory that has them, else the built-in table.
#[must_use]
pub fn load_sura_names(config: &Config) -> SuraNames {
    for root in config.data_paths() {
        match LocalStorageBackend::new(root).read_sura_names() {
            Ok(Some(names)) => return names,
            Ok(None) => {}
            Err(e) => warn!("Ignoring sura names: {e}"),
        }
    }
    default_sura_names()
}

/// Result of a search, flat and grouped.
#[derive(Debug, Clone)]
pub struct SearchOutput {
    /// The worker's `done` payload, records in scan order.
    pub done: DonePayload,
    /// Records grouped by verse in display order.
    pub groups: Vec<ResultGroup>,
    /// Translators that were searched.
    pub translators: Vec<Translator>,
}

/// Search the selected translators.
///
/// # Arguments
///
/// * `config` - Loaded configuration
/// * `query` - Raw query: words, or `/pattern/flags`
/// * `keys` - Translator keys to search; empty means all
/// * `on_progress` - Called for each progress event from the worker
///
/// # Errors
///
/// Returns an error if the query is rejected, no translator is selected or
/// loadable, or the scan itself fails.
pub async fn search(
    config: &Config,
    query: &str,
    keys: &[String],
    on_progress: impl FnMut(ProgressEvent),
) -> anyhow::Result<SearchOutput> {
    let query = validate_query(query, config.search.max_query_length)?;
    let translators = select_translators(&config.translators, keys)?;
    if translators.is_empty() {
        anyhow::bail!("Select at least one translator");
    }

    let corpora = load_corpora(config, &translators)?;
    let request = SearchRequest::new(query, corpora, load_sura_names(config));

    let worker = SearchWorker::spawn(config.scan_settings(), config.worker.queue_depth);
    let task = worker.submit(request).await?;
    let done = task
        .wait(on_progress)
        .await
        .map_err(|e| anyhow::anyhow!("Search failed: {e}"))?;
    worker.shutdown().await?;

    let groups = aggregate(done.records.clone(), &config.translators);

    Ok(SearchOutput {
        done,
        groups,
        translators,
    })
}

/// One sura across translators.
#[derive(Debug, Clone)]
pub struct SuraView {
    pub sura: u16,
    pub name: Option<String>,
    /// Translators that were read, in display order.
    pub translators: Vec<Translator>,
    /// One group per aya.
    pub groups: Vec<ResultGroup>,
}

/// Read every aya of one sura from the selected translators.
///
/// # Errors
///
/// Returns an error if the sura number is out of range, a key is unknown,
/// or no corpus can be loaded.
pub fn read_sura(config: &Config, sura: u16, keys: &[String]) -> anyhow::Result<SuraView> {
    if sura == 0 || sura > SURA_COUNT {
        anyhow::bail!("Sura must be between 1 and {SURA_COUNT}, got {sura}");
    }

    let translators = select_translators(&config.translators, keys)?;
    let corpora = load_corpora(config, &translators)?;

    let records = corpora
        .iter()
        .flat_map(|corpus| {
            corpus.sura(sura).map(|record| MatchResult {
                sura: record.sura,
                aya: record.aya,
                translator: record
                    .translator
                    .clone()
                    .unwrap_or_else(|| corpus.name.clone()),
                text: record.text.clone(),
                highlighted_text: escape_html(&record.text).into_owned(),
            })
        })
        .collect();

    Ok(SuraView {
        sura,
        name: load_sura_names(config).remove(&sura.to_string()),
        translators,
        groups: aggregate(records, &config.translators),
    })
}

/// A configured translator and where its data was found.
#[derive(Debug, Clone)]
pub struct TranslatorInfo {
    pub key: String,
    pub name: String,
    /// Record count, if the corpus loaded.
    pub records: Option<usize>,
    /// Corpus file, if one exists.
    pub path: Option<PathBuf>,
}

/// List configured translators with their data status.
#[must_use]
pub fn list_translators(config: &Config) -> Vec<TranslatorInfo> {
    let backends: Vec<LocalStorageBackend> = config
        .data_paths()
        .into_iter()
        .map(LocalStorageBackend::new)
        .collect();

    config
        .translators
        .iter()
        .map(|translator| {
            let backend = backends.iter().find(|b| b.exists(translator));
            TranslatorInfo {
                key: translator.key.clone(),
                name: translator.name.clone(),
                records: backend
                    .and_then(|b| b.read_corpus(translator).ok())
                    .map(|corpus| corpus.len()),
                path: backend.map(|b| b.corpus_path(translator)),
            }
        })
        .collect()
}

/// Answer JSON-lines search requests on stdin until it closes.
///
/// # Errors
///
/// Returns an error if stdin/stdout fail.
pub async fn serve_worker(config: &Config) -> anyhow::Result<()> {
    let worker = SearchWorker::spawn(config.scan_settings(), config.worker.queue_depth);
    let stdin = tokio::io::BufReader::new(tokio::io::stdin());

    protocol::serve_lines(stdin, tokio::io::stdout(), &worker).await?;
    worker.shutdown().await?;
    Ok(())
}
