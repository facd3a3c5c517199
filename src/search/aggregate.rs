//! Grouping of matches by verse.

use std::collections::BTreeMap;

use crate::corpus::Translator;
use crate::search::{MatchResult, ResultGroup};

/// Group matches by `(sura, aya)` in ascending numeric order.
///
/// Items inside a group follow `order`, not the order they were found in.
/// Items from translators missing from `order` go last, in the order they
/// arrived. A translator without the verse simply has no item.
#[must_use]
pub fn aggregate(records: Vec<MatchResult>, order: &[Translator]) -> Vec<ResultGroup> {
    let mut groups: BTreeMap<(u16, u32), Vec<MatchResult>> = BTreeMap::new();
    for record in records {
        groups
            .entry((record.sura, record.aya))
            .or_default()
            .push(record);
    }

    groups
        .into_iter()
        .map(|((sura, aya), mut items)| {
            items.sort_by_key(|item| rank(order, &item.translator));
            ResultGroup { sura, aya, items }
        })
        .collect()
}

fn rank(order: &[Translator], label: &str) -> usize {
    order
        .iter()
        .position(|t| t.is_labelled(label))
        .unwrap_or(order.len())
}
