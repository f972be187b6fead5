//! Embed sizing helpers.
//!
//! Discord rejects an embed whose description exceeds 4096 characters, whose
//! field names exceed 256 characters, or which carries more than 25 fields.
//! List commands build their embeds through these helpers so a growing
//! collection shortens the reply instead of breaking it.

/// Most fields Discord accepts on one embed
pub const MAX_EMBED_FIELDS: usize = 25;
/// Longest embed field name Discord accepts
pub const FIELD_NAME_LIMIT: usize = 256;
/// Character budget for list descriptions, under Discord's 4096 limit
pub const DESCRIPTION_BUDGET: usize = 4000;

/// A description built from as many lines as fit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CappedLines {
    /// Header followed by the lines that fit, one per row
    pub text: String,
    /// How many lines made it in
    pub shown: usize,
}

/// Appends `lines` to `header` until the next one would push the text past
/// `budget` characters.
pub fn cap_lines<I>(header: &str, lines: I, budget: usize) -> CappedLines
where
    I: IntoIterator<Item = String>,
{
    let mut text = header.to_string();
    let mut length = text.chars().count();
    let mut shown = 0;

    for line in lines {
        let line_length = line.chars().count() + 1;
        if length + line_length > budget {
            break;
        }
        text.push_str(&line);
        text.push('\n');
        length += line_length;
        shown += 1;
    }

    CappedLines { text, shown }
}

/// Footer text for a list that only shows part of its entries.
#[must_use]
pub fn partial_footer(shown: usize, total: usize, noun: &str) -> Option<String> {
    (shown < total).then(|| format!("Showing {shown} of {total} {noun}"))
}

/// Shortens `text` to at most `max` characters, marking the cut with "…".
#[must_use]
pub fn truncate_chars(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    let mut shortened: String = text.chars().take(max.saturating_sub(1)).collect();
    shortened.push('…');
    shortened
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cap_lines_keeps_everything_that_fits() {
        let lines = ["one", "two"].map(String::from);
        let capped = cap_lines("Header\n", lines, 100);

        assert_eq!(capped.text, "Header\none\ntwo\n");
        assert_eq!(capped.shown, 2);
    }

    #[test]
    fn test_cap_lines_stops_at_budget() {
        let lines = (0..500).map(|i| format!("{i:04} Reinforcing steel bar, 12mm, grade 500"));
        let capped = cap_lines("Summary\n\n", lines, DESCRIPTION_BUDGET);

        assert!(capped.text.chars().count() <= DESCRIPTION_BUDGET);
        assert!(capped.shown > 0 && capped.shown < 500);
        assert_eq!(capped.text.lines().count(), capped.shown + 2);
    }

    #[test]
    fn test_partial_footer() {
        assert_eq!(partial_footer(25, 25, "projects"), None);
        assert_eq!(
            partial_footer(25, 40, "projects"),
            Some("Showing 25 of 40 projects".to_string())
        );
    }

    #[test]
    fn test_truncate_chars() {
        assert_eq!(truncate_chars("Depot", 10), "Depot");

        let long = "é".repeat(300);
        let short = truncate_chars(&long, FIELD_NAME_LIMIT);
        assert_eq!(short.chars().count(), FIELD_NAME_LIMIT);
        assert!(short.ends_with('…'));
    }
}
