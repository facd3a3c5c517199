//! Plain-text rendering of results for the terminal and MCP tools.

use std::fmt::Write;

use crate::commands::{SearchOutput, SuraView, TranslatorInfo};
use crate::corpus::{SuraNames, Translator};
use crate::search::ResultGroup;
use crate::search::highlight::{MARK_CLOSE, MARK_OPEN};

const MISSING_IN_SEARCH: &str = "[此章节在此译本中未找到]";
const MISSING_IN_SURA: &str = "[无]";

/// Turn highlighted HTML into markdown emphasis.
#[must_use]
pub fn markup_to_markdown(highlighted: &str) -> String {
    highlighted
        .replace(MARK_OPEN, "**")
        .replace(MARK_CLOSE, "**")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&amp;", "&")
}

fn write_group(
    output: &mut String,
    group: &ResultGroup,
    translators: &[Translator],
    sura_names: &SuraNames,
    missing: &str,
) {
    let name = sura_names
        .get(&group.sura.to_string())
        .map(String::as_str)
        .unwrap_or_default();
    let _ = writeln!(output, "## {}:{} {}", group.sura, group.aya, name.trim_end());

    // One line per selected translator, even where it lacks the verse
    for translator in translators {
        match group.item_for(translator) {
            Some(item) => {
                let _ = writeln!(
                    output,
                    "**{}:** {}",
                    translator.name,
                    markup_to_markdown(&item.highlighted_text)
                );
            }
            None => {
                let _ = writeln!(output, "**{}:** {missing}", translator.name);
            }
        }
    }

    // Matches labelled with a translator outside the selection
    for item in &group.items {
        if !translators.iter().any(|t| t.is_labelled(&item.translator)) {
            let _ = writeln!(
                output,
                "**{}:** {}",
                item.translator,
                markup_to_markdown(&item.highlighted_text)
            );
        }
    }

    output.push('\n');
}

/// Render grouped search results.
#[must_use]
pub fn render_search(result: &SearchOutput) -> String {
    if result.groups.is_empty() {
        return format!("No matches found for '{}'\n", result.done.query);
    }

    let mut output = String::new();
    for group in &result.groups {
        write_group(
            &mut output,
            group,
            &result.translators,
            &result.done.sura_names,
            MISSING_IN_SEARCH,
        );
    }
    let _ = writeln!(
        output,
        "*{} match(es) in {} verse(s)*",
        result.done.records.len(),
        result.groups.len()
    );
    output
}

/// Render one sura across translations.
#[must_use]
pub fn render_sura(view: &SuraView) -> String {
    let mut output = String::new();
    let _ = writeln!(
        output,
        "# Sura {} {}\n",
        view.sura,
        view.name.as_deref().unwrap_or_default()
    );

    if view.groups.is_empty() {
        let _ = writeln!(
            output,
            "No verses found for sura {} in the selected translations",
            view.sura
        );
        return output;
    }

    let mut names = SuraNames::new();
    if let Some(name) = &view.name {
        names.insert(view.sura.to_string(), name.clone());
    }
    for group in &view.groups {
        write_group(&mut output, group, &view.translators, &names, MISSING_IN_SURA);
    }
    output
}

/// Render the translator list.
#[must_use]
pub fn render_translators(translators: &[TranslatorInfo]) -> String {
    let mut output = String::new();
    for info in translators {
        match (&info.path, info.records) {
            (Some(path), Some(records)) => {
                let _ = writeln!(
                    output,
                    "- **{}** {}: {records} verses\n  `{}`",
                    info.key,
                    info.name,
                    path.display()
                );
            }
            (Some(path), None) => {
                let _ = writeln!(
                    output,
                    "- **{}** {}: unreadable\n  `{}`",
                    info.key,
                    info.name,
                    path.display()
                );
            }
            (None, _) => {
                let _ = writeln!(output, "- **{}** {}: no data", info.key, info.name);
            }
        }
    }
    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol::DonePayload;
    use crate::search::{MatchResult, Query, QueryOptions, highlight};

    fn item(translator: &str, highlighted: &str) -> MatchResult {
        MatchResult {
            sura: 2,
            aya: 1,
            translator: translator.to_string(),
            text: String::new(),
            highlighted_text: highlighted.to_string(),
        }
    }

    #[test]
    fn markdown_conversion_unescapes() {
        assert_eq!(
            markup_to_markdown("a &lt;<mark>b</mark>&gt; &amp;lt;"),
            "a <**b**> &lt;"
        );
    }

    #[test]
    fn highlighted_ampersand_survives_conversion() {
        let query = Query::parse("a", &QueryOptions::default());
        assert_eq!(markup_to_markdown(&highlight("a & b", &query)), "**a** & b");
    }

    #[test]
    fn sura_view_placeholder() {
        let view = SuraView {
            sura: 2,
            name: Some("黄牛".to_string()),
            translators: vec![Translator::new("x", "X"), Translator::new("y", "Y")],
            groups: vec![ResultGroup {
                sura: 2,
                aya: 1,
                items: vec![item("X", "艾列弗，俩目，米目")],
            }],
        };

        let text = render_sura(&view);
        assert!(text.starts_with("# Sura 2 黄牛"));
        assert!(text.contains("**X:** 艾列弗，俩目，米目"));
        assert!(text.contains("**Y:** [无]"));
    }

    #[test]
    fn missing_translators_get_a_placeholder() {
        let translators = vec![
            Translator::new("x", "X"),
            Translator::new("y", "Y"),
        ];
        let result = SearchOutput {
            done: DonePayload {
                records: vec![item("X", "<mark>abc</mark>")],
                query: "abc".to_string(),
                sura_names: SuraNames::from([("2".to_string(), "黄牛".to_string())]),
            },
            groups: vec![ResultGroup {
                sura: 2,
                aya: 1,
                items: vec![item("X", "<mark>abc</mark>")],
            }],
            translators,
        };

        let text = render_search(&result);
        assert!(text.contains("## 2:1 黄牛"));
        assert!(text.contains("**X:** **abc**"));
        assert!(text.contains("**Y:** [此章节在此译本中未找到]"));
        assert!(text.contains("1 match(es) in 1 verse(s)"));
    }

    #[test]
    fn no_matches_message() {
        let result = SearchOutput {
            done: DonePayload {
                records: Vec::new(),
                query: "zzz".to_string(),
                sura_names: SuraNames::new(),
            },
            groups: Vec::new(),
            translators: Vec::new(),
        };
        assert_eq!(render_search(&result), "No matches found for 'zzz'\n");
    }
}
