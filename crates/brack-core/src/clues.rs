//! Clue extraction over puzzle text
//!
//! A clue is "active" while its `[clue-id]` placeholder appears literally in
//! the current puzzle text. Matching is plain substring comparison of the
//! bracketed form: clue ids containing regex-special characters need no
//! escaping, and the closing bracket keeps a clue id that prefixes another
//! from matching the longer placeholder.

use std::collections::BTreeMap;

/// A piece of puzzle text: literal text, or an unsolved clue placeholder
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Segment<'a> {
    Text(&'a str),

    /// Clue id, without the surrounding brackets
    Clue(&'a str),
}

/// Split puzzle text into literal runs and innermost `[clue-id]` placeholders.
///
/// Only innermost pairs count: in `[outer [inner] rest]`, `inner` is the
/// placeholder and `[outer ` is literal text. This is how nested clues work;
/// the outer id becomes a placeholder only after the inner one is solved and
/// its brackets disappear.
pub fn segments(text: &str) -> Vec<Segment<'_>> {
    let mut out = Vec::new();
    let mut plain_start = 0;
    let mut open: Option<usize> = None;

    for (i, ch) in text.char_indices() {
        match ch {
            '[' => open = Some(i),
            ']' => {
                if let Some(o) = open
                    && i > o + 1
                {
                    if o > plain_start {
                        out.push(Segment::Text(&text[plain_start..o]));
                    }
                    out.push(Segment::Clue(&text[o + 1..i]));
                    plain_start = i + 1;
                }
                open = None;
            }
            _ => {}
        }
    }

    if plain_start < text.len() {
        out.push(Segment::Text(&text[plain_start..]));
    }
    out
}

/// The subset of clues whose placeholder currently appears in `state`,
/// in clue-id order.
pub fn active_clues<'a>(
    solutions: &'a BTreeMap<String, String>,
    state: &str,
) -> Vec<(&'a str, &'a str)> {
    solutions
        .iter()
        .filter(|(id, _)| state.contains(&format!("[{id}]")))
        .map(|(id, answer)| (id.as_str(), answer.as_str()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn solutions(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn active_clues_returns_present_placeholders() {
        let sols = solutions(&[("a", "X"), ("b", "Y")]);
        let active = active_clues(&sols, "[a] and [b]");
        assert_eq!(active, vec![("a", "X"), ("b", "Y")]);
    }

    #[test]
    fn solved_clue_is_no_longer_active() {
        let sols = solutions(&[("a", "X"), ("b", "Y")]);
        let active = active_clues(&sols, "X and [b]");
        assert_eq!(active, vec![("b", "Y")]);
    }

    #[test]
    fn regex_special_ids_match_literally() {
        let sols = solutions(&[("a.c*", "X")]);
        assert_eq!(active_clues(&sols, "go [a.c*] now"), vec![("a.c*", "X")]);
        // The dot must not act as a wildcard
        assert!(active_clues(&sols, "go [abc*] now").is_empty());
    }

    #[test]
    fn id_prefix_of_another_does_not_match() {
        let sols = solutions(&[("cap", "X")]);
        // "[capital]" contains "[cap" but not "[cap]"
        assert!(active_clues(&sols, "the [capital] city").is_empty());
    }

    #[test]
    fn active_clues_are_sorted_by_id() {
        let sols = solutions(&[("zebra", "Z"), ("apple", "A"), ("mango", "M")]);
        let ids: Vec<&str> = active_clues(&sols, "[zebra] [mango] [apple]")
            .into_iter()
            .map(|(id, _)| id)
            .collect();
        assert_eq!(ids, vec!["apple", "mango", "zebra"]);
    }

    #[test]
    fn segments_splits_text_and_clues() {
        assert_eq!(
            segments("The [capital] of France"),
            vec![
                Segment::Text("The "),
                Segment::Clue("capital"),
                Segment::Text(" of France"),
            ]
        );
    }

    #[test]
    fn segments_handles_plain_text() {
        assert_eq!(segments("no clues"), vec![Segment::Text("no clues")]);
        assert!(segments("").is_empty());
    }

    #[test]
    fn segments_takes_innermost_brackets_only() {
        assert_eq!(
            segments("a[x[y]z]b"),
            vec![
                Segment::Text("a[x"),
                Segment::Clue("y"),
                Segment::Text("z]b"),
            ]
        );
    }

    #[test]
    fn segments_ignores_empty_brackets() {
        assert_eq!(segments("a[]b"), vec![Segment::Text("a[]b")]);
    }

    #[test]
    fn segments_handles_adjacent_clues() {
        assert_eq!(
            segments("[a][b]"),
            vec![Segment::Clue("a"), Segment::Clue("b")]
        );
    }
}
