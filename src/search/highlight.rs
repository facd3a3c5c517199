//! Match highlighting.
//!
//! Output is HTML-safe: verse text is escaped and matched spans are wrapped
//! in [`MARK_OPEN`] / [`MARK_CLOSE`].
//!
//! Token queries are highlighted one term at a time on the raw text, each
//! pass running over the output of the previous one. Overlapping or repeated
//! terms therefore nest or double the markers, and a later term can match
//! inside an earlier marker (`"ab b"` on `ab` gives
//! `<mark>a<mark>b</mark></mark>`). The passes insert private-use sentinels
//! that become tags only after escaping, so a term never lands inside an
//! entity.

use std::borrow::Cow;

use regex::Captures;

use crate::search::query::Query;

pub const MARK_OPEN: &str = "<mark>";
pub const MARK_CLOSE: &str = "</mark>";

const OPEN_SENTINEL: char = '\u{E000}';
const CLOSE_SENTINEL: char = '\u{E001}';

fn is_sentinel(c: char) -> bool {
    c == OPEN_SENTINEL || c == CLOSE_SENTINEL
}

/// Escape `&`, `<` and `>` for embedding in HTML.
#[must_use]
pub fn escape_html(text: &str) -> Cow<'_, str> {
    if !text.contains(['&', '<', '>']) {
        return Cow::Borrowed(text);
    }

    let mut out = String::with_capacity(text.len() + 8);
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(c),
        }
    }
    Cow::Owned(out)
}

/// Escape `text` and wrap every match of `query`.
#[must_use]
pub fn highlight(text: &str, query: &Query) -> String {
    match query {
        Query::Pattern(pattern) => {
            let mut out = String::with_capacity(text.len() + 16);
            let mut last = 0;

            // Empty matches have nothing to show and are left unmarked.
            for m in pattern.regex().find_iter(text).filter(|m| !m.is_empty()) {
                out.push_str(&escape_html(&text[last..m.start()]));
                out.push_str(MARK_OPEN);
                out.push_str(&escape_html(m.as_str()));
                out.push_str(MARK_CLOSE);
                last = m.end();
            }
            out.push_str(&escape_html(&text[last..]));
            out
        }
        Query::Tokens(terms) => {
            let mut out: String = text.chars().filter(|c| !is_sentinel(*c)).collect();

            // A term holding a sentinel can only hit markers from earlier passes
            let passes = terms
                .iter()
                .filter(|term| !term.text.contains(is_sentinel))
                .filter_map(|term| term.literal());
            for re in passes {
                out = re
                    .replace_all(&out, |caps: &Captures| {
                        format!("{OPEN_SENTINEL}{}{CLOSE_SENTINEL}", &caps[0])
                    })
                    .into_owned();
            }

            escape_html(&out)
                .replace(OPEN_SENTINEL, MARK_OPEN)
                .replace(CLOSE_SENTINEL, MARK_CLOSE)
        }
    }
}
