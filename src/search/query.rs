//! Query interpretation.
//!
//! `/pattern/flags` becomes a regular expression; anything else (including a
//! pattern literal that fails to compile) becomes a list of AND-ed literal
//! terms.

use regex::{Regex, RegexBuilder};
use thiserror::Error;
use tracing::debug;

/// Default cap on compiled regex size, in bytes.
pub const DEFAULT_REGEX_SIZE_LIMIT: usize = 1 << 20;

/// Limits applied when compiling user-supplied expressions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QueryOptions {
    /// Upper bound for both the compiled program and the lazy DFA cache.
    pub regex_size_limit: usize,
}

impl Default for QueryOptions {
    fn default() -> Self {
        Self {
            regex_size_limit: DEFAULT_REGEX_SIZE_LIMIT,
        }
    }
}

/// Why a pattern literal could not be compiled.
#[derive(Debug, Error)]
pub enum PatternError {
    #[error("unknown flag '{0}'")]
    UnknownFlag(char),

    #[error("flag '{0}' given more than once")]
    DuplicateFlag(char),

    #[error(transparent)]
    Regex(#[from] regex::Error),
}

/// Flags accepted after the closing `/` of a pattern literal.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PatternFlags {
    /// `i`
    pub case_insensitive: bool,
    /// `m`
    pub multi_line: bool,
    /// `s`
    pub dot_matches_new_line: bool,
}

impl PatternFlags {
    /// Parse a flag string. `u` is always on; `g`, `y`, `d` and `v` are
    /// accepted but do not change a match test.
    ///
    /// # Errors
    ///
    /// Returns `PatternError` on an unknown or repeated flag.
    pub fn parse(flags: &str) -> Result<Self, PatternError> {
        let mut parsed = Self::default();
        let mut seen = String::new();

        for flag in flags.chars() {
            if seen.contains(flag) {
                return Err(PatternError::DuplicateFlag(flag));
            }
            seen.push(flag);

            match flag {
                'i' => parsed.case_insensitive = true,
                'm' => parsed.multi_line = true,
                's' => parsed.dot_matches_new_line = true,
                'u' | 'g' | 'y' | 'd' | 'v' => {}
                other => return Err(PatternError::UnknownFlag(other)),
            }
        }

        Ok(parsed)
    }
}

/// A single regular-expression query.
#[derive(Debug, Clone)]
pub struct PatternQuery {
    pub source: String,
    pub flags: PatternFlags,
    regex: Regex,
}

impl PatternQuery {
    /// Compile `source` with the given flag string.
    ///
    /// # Errors
    ///
    /// Returns `PatternError` if the flags are invalid, the expression does
    /// not parse, or it exceeds the size limit.
    pub fn compile(source: &str, flags: &str, options: &QueryOptions) -> Result<Self, PatternError> {
        let flags = PatternFlags::parse(flags)?;
        let regex = RegexBuilder::new(source)
            .case_insensitive(flags.case_insensitive)
            .multi_line(flags.multi_line)
            .dot_matches_new_line(flags.dot_matches_new_line)
            .size_limit(options.regex_size_limit)
            .dfa_size_limit(options.regex_size_limit)
            .build()?;

        Ok(Self {
            source: source.to_string(),
            flags,
            regex,
        })
    }

    #[must_use]
    pub fn regex(&self) -> &Regex {
        &self.regex
    }
}

/// One literal search term with its case-insensitive matcher.
#[derive(Debug, Clone)]
pub struct Term {
    pub text: String,
    literal: Option<Regex>,
}

impl Term {
    fn new(text: &str, options: &QueryOptions) -> Self {
        Self {
            text: text.to_string(),
            literal: literal_regex(text, options),
        }
    }

    /// `None` if the term could not be compiled; such a term matches nothing.
    #[must_use]
    pub fn literal(&self) -> Option<&Regex> {
        self.literal.as_ref()
    }
}

fn literal_regex(text: &str, options: &QueryOptions) -> Option<Regex> {
    RegexBuilder::new(&regex::escape(text))
        .case_insensitive(true)
        .size_limit(options.regex_size_limit)
        .dfa_size_limit(options.regex_size_limit)
        .build()
        .map_err(|e| debug!(term = text, error = %e, "Term could not be compiled"))
        .ok()
}

/// A structured search query.
#[derive(Debug, Clone)]
pub enum Query {
    /// Every term must appear (case-insensitive, literal).
    Tokens(Vec<Term>),
    /// One regular expression.
    Pattern(PatternQuery),
}

impl Query {
    /// Interpret raw user input.
    ///
    /// An invalid `/pattern/flags` literal is not an error: the whole
    /// original input is split into terms instead.
    #[must_use]
    pub fn parse(input: &str, options: &QueryOptions) -> Self {
        let input = input.trim();

        if let Some((source, flags)) = split_pattern_literal(input) {
            match PatternQuery::compile(source, flags, options) {
                Ok(pattern) => return Self::Pattern(pattern),
                Err(e) => {
                    debug!(query = input, error = %e, "Invalid pattern, using token search");
                }
            }
        }

        Self::Tokens(
            input
                .split_whitespace()
                .map(|term| Term::new(term, options))
                .collect(),
        )
    }

    /// Token texts, or an empty slice for a pattern query.
    #[must_use]
    pub fn terms(&self) -> Vec<&str> {
        match self {
            Self::Tokens(terms) => terms.iter().map(|t| t.text.as_str()).collect(),
            Self::Pattern(_) => Vec::new(),
        }
    }

    #[must_use]
    pub fn is_pattern(&self) -> bool {
        matches!(self, Self::Pattern(_))
    }
}

/// Split `/source/flags` into its parts. The last `/` ends the source.
fn split_pattern_literal(input: &str) -> Option<(&str, &str)> {
    let rest = input.strip_prefix('/')?;
    let slash = rest.rfind('/')?;
    let (source, flags) = (&rest[..slash], &rest[slash + 1..]);

    if source.is_empty() || !flags.chars().all(|c| c.is_ascii_alphabetic()) {
        return None;
    }
    Some((source, flags))
}
