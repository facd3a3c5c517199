//! ayat - search parallel Quran translations.
//!
//! Five translator corpora are scanned record by record for either a set of
//! words (all required, case-insensitive, literal) or a `/pattern/flags`
//! regular expression. Matches are highlighted and grouped by verse, with
//! translations shown in a fixed order.
//!
//! # Modules
//!
//! - [`search`] - Query interpretation, matching, highlighting, progress, grouping, worker
//! - [`protocol`] - Request/response messages and the JSON-lines worker loop
//! - [`commands`] - High-level operations (search, sura, translators, worker)
//! - [`corpus`] - Verse records, corpora, translators and sura names
//! - [`storage`] - Storage backend trait and implementations
//! - [`config`] - Configuration loading
//! - [`cli`] - Command-line interface definitions and rendering

pub mod cli;
pub mod commands;
pub mod config;
pub mod corpus;
pub mod protocol;
pub mod search;
pub mod storage;

#[cfg(feature = "mcp")]
pub mod mcp;
