//! Plain-text renderer for diffs.

use crate::diff::model::DiffResult;

const STRIPPED: [char; 4] = ['(', ')', '\'', '"'];

/// Render one `label: value` line per entry, in diff order
///
/// Multi-component values are comma separated. Parentheses and quote
/// characters are removed from the whole text.
pub fn render_human_summary(diff: &DiffResult) -> String {
    let text = diff
        .lines()
        .iter()
        .map(|(label, value)| format!("{label}: {value}"))
        .collect::<Vec<_>>()
        .join("\n");
    text.replace(STRIPPED, "")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diff::model::Sentinel;
    use crate::value::PropertyValue;
    use indexmap::IndexMap;

    #[test]
    fn test_sentinel_lines() {
        assert_eq!(
            render_human_summary(&DiffResult::sentinel(Sentinel::AllByDefault)),
            "All by: default"
        );
        assert_eq!(
            render_human_summary(&DiffResult::sentinel(Sentinel::NonSupported)),
            "Non: Supported"
        );
    }

    #[test]
    fn test_tuple_and_punctuation() {
        let mut entries = IndexMap::new();
        entries.insert(
            "Position Random".to_string(),
            PropertyValue::FloatPair(["0.17".into(), "0.32".into()]),
        );
        entries.insert(
            "Text".to_string(),
            PropertyValue::Text("say \"hi\" (it's fine)".into()),
        );
        let text = render_human_summary(&DiffResult {
            entries,
            sentinel: None,
        });
        assert_eq!(text, "Position Random: 0.17, 0.32\nText: say hi its fine");
    }
}
