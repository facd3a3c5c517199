//! Per-record match test.

use crate::corpus::VerseRecord;
use crate::search::query::Query;

/// True if the record's text satisfies the query.
///
/// A term that failed to compile never matches, so a token query containing
/// one matches nothing.
#[must_use]
pub fn matches(record: &VerseRecord, query: &Query) -> bool {
    text_matches(&record.text, query)
}

pub(crate) fn text_matches(text: &str, query: &Query) -> bool {
    match query {
        Query::Tokens(terms) => terms
            .iter()
            .all(|term| term.literal().is_some_and(|re| re.is_match(text))),
        Query::Pattern(pattern) => pattern.regex().is_match(text),
    }
}
