//! Verse records, translator corpora and sura names.

mod sura_names;

use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer, Serialize};
use thiserror::Error;

pub use sura_names::SURA_NAMES;

/// Number of suras in the Quran.
pub const SURA_COUNT: u16 = 114;

/// Sura number (as a string) to display name, as carried on the wire.
pub type SuraNames = BTreeMap<String, String>;

/// Errors that can occur when loading or validating corpus data.
#[derive(Debug, Error)]
pub enum CorpusError {
    #[error("Sura {sura} out of range (1-114)")]
    SuraOutOfRange { sura: u16 },

    #[error("Aya must be at least 1 (sura {sura})")]
    InvalidAya { sura: u16 },

    #[error("Failed to parse corpus: {0}")]
    ParseError(#[from] serde_json::Error),
}

/// A single verse of one translation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerseRecord {
    pub sura: u16,
    pub aya: u32,
    /// Verse text. Source files sometimes split it into an array of segments.
    #[serde(default, deserialize_with = "deserialize_text")]
    pub text: String,
    /// Overrides the dataset name when present.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub translator: Option<String>,
}

impl VerseRecord {
    #[must_use]
    pub fn new(sura: u16, aya: u32, text: impl Into<String>) -> Self {
        Self {
            sura,
            aya,
            text: text.into(),
            translator: None,
        }
    }

    /// Check the sura and aya numbers.
    ///
    /// # Errors
    ///
    /// Returns `CorpusError::SuraOutOfRange` or `CorpusError::InvalidAya`.
    pub fn validate(&self) -> Result<(), CorpusError> {
        if self.sura == 0 || self.sura > SURA_COUNT {
            return Err(CorpusError::SuraOutOfRange { sura: self.sura });
        }
        if self.aya == 0 {
            return Err(CorpusError::InvalidAya { sura: self.sura });
        }
        Ok(())
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawText {
    One(String),
    Many(Vec<String>),
}

fn deserialize_text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<RawText>::deserialize(deserializer)? {
        Some(RawText::One(text)) => text,
        Some(RawText::Many(parts)) => parts.join(" "),
        None => String::new(),
    })
}

/// One translator in the fixed display order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Translator {
    /// Stable identifier, also the corpus file stem (e.g., "majian").
    pub key: String,
    /// Display name attached to results (e.g., "马坚").
    pub name: String,
}

impl Translator {
    #[must_use]
    pub fn new(key: &str, name: &str) -> Self {
        Self {
            key: key.to_string(),
            name: name.to_string(),
        }
    }

    /// True if a result's translator label refers to this translator.
    #[must_use]
    pub fn is_labelled(&self, label: &str) -> bool {
        self.name == label || self.key == label
    }
}

/// The five bundled translations, in display order.
#[must_use]
pub fn default_translators() -> Vec<Translator> {
    vec![
        Translator::new("mazhonggang", "马仲刚"),
        Translator::new("majinpeng", "马金鹏"),
        Translator::new("tongdaozhang", "仝道章"),
        Translator::new("wangjingzhai", "王静斋"),
        Translator::new("majian", "马坚"),
    ]
}

/// The full verse set of one translator.
#[derive(Debug, Clone)]
pub struct Corpus {
    pub key: String,
    pub name: String,
    pub records: Vec<VerseRecord>,
}

impl Corpus {
    #[must_use]
    pub fn new(translator: &Translator, records: Vec<VerseRecord>) -> Self {
        Self {
            key: translator.key.clone(),
            name: translator.name.clone(),
            records,
        }
    }

    /// Parse a corpus file: a JSON array of verse records.
    ///
    /// # Errors
    ///
    /// Returns `CorpusError::ParseError` if the JSON is invalid.
    pub fn from_json(translator: &Translator, contents: &str) -> Result<Self, CorpusError> {
        let records: Vec<VerseRecord> = serde_json::from_str(contents)?;
        Ok(Self::new(translator, records))
    }

    /// Records of one sura, in corpus order.
    pub fn sura(&self, sura: u16) -> impl Iterator<Item = &VerseRecord> {
        self.records.iter().filter(move |r| r.sura == sura)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Built-in sura names keyed by sura number.
#[must_use]
pub fn default_sura_names() -> SuraNames {
    SURA_NAMES
        .iter()
        .enumerate()
        .map(|(i, name)| ((i + 1).to_string(), (*name).to_string()))
        .collect()
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawSuraNames {
    Map(SuraNames),
    List(Vec<String>),
}

/// Parse sura names from either a `{"1": "..."}` object or a 114-entry array.
///
/// # Errors
///
/// Returns `CorpusError::ParseError` if the JSON is neither shape.
pub fn parse_sura_names(contents: &str) -> Result<SuraNames, CorpusError> {
    Ok(match serde_json::from_str(contents)? {
        RawSuraNames::Map(map) => map,
        RawSuraNames::List(list) => list
            .into_iter()
            .enumerate()
            .map(|(i, name)| ((i + 1).to_string(), name))
            .collect(),
    })
}
