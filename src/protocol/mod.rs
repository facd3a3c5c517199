//! Search request/response messages and the JSON-lines worker loop.
//!
//! Messages are `{"type": ..., "payload": ...}` objects:
//!
//! - request `search` with `{query, datasets: [{key, name, data}], suraNames}`
//! - response `progress` with `{loaded, total}`, zero or more times
//! - response `done` with `{records, query, suraNames}`, or
//! - response `error` with a message string
//!
//! Exactly one `done` or `error` ends every request.

use serde::{Deserialize, Serialize};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tracing::{debug, warn};

use crate::corpus::{Corpus, SuraNames, VerseRecord};
use crate::search::{MatchResult, ProgressEvent, SearchWorker};

/// Inbound message.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload", rename_all = "lowercase")]
pub enum Request {
    Search(SearchRequest),
}

/// Outbound message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload", rename_all = "lowercase")]
pub enum Response {
    Progress(ProgressEvent),
    Done(DonePayload),
    Error(String),
}

impl Response {
    /// True for `done` and `error`.
    #[must_use]
    pub fn is_terminal(&self) -> bool {
        !matches!(self, Self::Progress(_))
    }
}

/// One search over an explicit set of corpora.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchRequest {
    pub query: String,
    /// Corpora to scan, in scan order.
    #[serde(default)]
    pub datasets: Vec<Dataset>,
    /// Passed through to the `done` payload for display.
    #[serde(default)]
    pub sura_names: SuraNames,
}

impl SearchRequest {
    #[must_use]
    pub fn new(query: &str, corpora: Vec<Corpus>, sura_names: SuraNames) -> Self {
        Self {
            query: query.to_string(),
            datasets: corpora.into_iter().map(Dataset::from).collect(),
            sura_names,
        }
    }
}

/// One translator's records as sent to the engine.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Dataset {
    pub key: String,
    #[serde(default)]
    pub name: String,
    /// `None` when the sender left it out; the scan rejects such a dataset.
    #[serde(default)]
    pub data: Option<Vec<VerseRecord>>,
}

impl Dataset {
    /// Label attached to matches whose record names no translator.
    #[must_use]
    pub fn label(&self) -> &str {
        if !self.name.is_empty() {
            &self.name
        } else if !self.key.is_empty() {
            &self.key
        } else {
            "未知"
        }
    }
}

impl From<Corpus> for Dataset {
    fn from(corpus: Corpus) -> Self {
        Self {
            key: corpus.key,
            name: corpus.name,
            data: Some(corpus.records),
        }
    }
}

/// Successful search outcome. `records` are in scan order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DonePayload {
    pub records: Vec<MatchResult>,
    pub query: String,
    pub sura_names: SuraNames,
}

/// Decode one request line.
///
/// # Errors
///
/// Returns the JSON error if the line is not a well-formed request.
pub fn decode_request(line: &str) -> Result<Request, serde_json::Error> {
    serde_json::from_str(line)
}

/// Encode one response as a single line (no trailing newline).
///
/// # Errors
///
/// Returns the JSON error if serialization fails.
pub fn encode_response(response: &Response) -> Result<String, serde_json::Error> {
    serde_json::to_string(response)
}

/// Answer requests read line by line from `reader`, writing response lines to
/// `writer`. Requests are handled one at a time in arrival order. Blank lines
/// are skipped; a line that does not decode gets a single `error` response.
///
/// # Errors
///
/// Returns an error if reading or writing fails or the worker has stopped.
pub async fn serve_lines<R, W>(
    reader: R,
    mut writer: W,
    worker: &SearchWorker,
) -> anyhow::Result<()>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut lines = reader.lines();

    while let Some(line) = lines.next_line().await? {
        if line.trim().is_empty() {
            continue;
        }

        let request = match decode_request(&line) {
            Ok(Request::Search(request)) => request,
            Err(e) => {
                warn!(error = %e, "Rejecting malformed request");
                let response = Response::Error(format!("Invalid request: {e}"));
                write_line(&mut writer, &response).await?;
                continue;
            }
        };

        debug!(query = %request.query, datasets = request.datasets.len(), "Search request");
        let mut task = worker.submit(request).await?;
        while let Some(response) = task.next_event().await {
            write_line(&mut writer, &response).await?;
            if response.is_terminal() {
                break;
            }
        }
    }

    Ok(())
}

async fn write_line<W>(writer: &mut W, response: &Response) -> anyhow::Result<()>
where
    W: AsyncWrite + Unpin,
{
    let mut line = encode_response(response)?;
    line.push('\n');
    writer.write_all(line.as_bytes()).await?;
    writer.flush().await?;
    Ok(())
}
