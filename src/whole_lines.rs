//! Joining of continuation lines in tagged record text.

use std::iter::{Enumerate, Peekable};

/// Iterator adapter which joins continuation lines (lines starting with
/// whitespace) onto the field line before them.
///
/// Each item is the 0-based index of the field's first line within the chunk
/// and the joined line, with continuation content appended after a single
/// space. A continuation line with no field line before it is yielded on its
/// own, untouched, so that the caller can reject it.
pub(crate) struct WholeLinesIter<I: Iterator> {
    lines: Peekable<Enumerate<I>>,
}

impl<I: Iterator> WholeLinesIter<I> {
    pub(crate) fn new(lines: I) -> Self {
        Self {
            lines: lines.enumerate().peekable(),
        }
    }
}

fn is_continuation(line: &str) -> bool {
    line.starts_with([' ', '\t'])
}

impl<'a, I: Iterator<Item = &'a str>> Iterator for WholeLinesIter<I> {
    type Item = (usize, String);

    fn next(&mut self) -> Option<Self::Item> {
        let (index, first) = self.lines.next()?;
        if is_continuation(first) {
            return Some((index, first.to_string()));
        }
        let mut whole = first.trim_end().to_string();
        while let Some((_, line)) = self.lines.next_if(|(_, l)| is_continuation(l)) {
            let content = line.trim();
            if !content.is_empty() {
                whole.push(' ');
                whole.push_str(content);
            }
        }
        Some((index, whole))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_join_continuations() {
        let text = "TI  - Fantastic yeasts and where to find them: the hidden \n      diversity of dimorphic fungal pathogens.\nDP  - 2019 Dec";
        let actual: Vec<_> = WholeLinesIter::new(text.split('\n')).collect();
        assert_eq!(
            actual,
            vec![
                (
                    0,
                    "TI  - Fantastic yeasts and where to find them: the hidden diversity of dimorphic fungal pathogens."
                        .to_string()
                ),
                (2, "DP  - 2019 Dec".to_string()),
            ]
        );
    }

    #[test]
    fn test_multiple_continuations() {
        let lines = ["AB  - one", "      two", "\tthree", "MH  - Humans"];
        let actual: Vec<_> = WholeLinesIter::new(lines.into_iter()).collect();
        assert_eq!(
            actual,
            vec![
                (0, "AB  - one two three".to_string()),
                (3, "MH  - Humans".to_string())
            ]
        );
    }

    #[test]
    fn test_leading_continuation_is_kept() {
        let lines = ["      orphan", "TI  - Title"];
        let actual: Vec<_> = WholeLinesIter::new(lines.into_iter()).collect();
        assert_eq!(
            actual,
            vec![
                (0, "      orphan".to_string()),
                (1, "TI  - Title".to_string())
            ]
        );
    }

    #[test]
    fn test_trailing_carriage_return_is_trimmed() {
        let lines = ["PMID- 123\r", "TI  - Windows\r"];
        let actual: Vec<_> = WholeLinesIter::new(lines.into_iter()).collect();
        assert_eq!(
            actual,
            vec![(0, "PMID- 123".to_string()), (1, "TI  - Windows".to_string())]
        );
    }
}
