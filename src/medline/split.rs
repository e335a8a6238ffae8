//! Splitting of MEDLINE text into per-record chunks.

/// Iterator over the records of MEDLINE text, which are separated by one or
/// more blank lines.
///
/// Yields the 1-based line number of each chunk's first line together with the
/// chunk itself, borrowed from the source text (both without surrounding blank
/// lines and without a trailing line break).
pub(crate) struct BlankLineSplit<'a> {
    text: &'a str,
    line_break: &'static str,
    /// Byte offset of the next unread line.
    pos: usize,
    /// Line number of the next unread line.
    line: usize,
}

impl<'a> BlankLineSplit<'a> {
    pub(crate) fn new(text: &'a str, line_break: &'static str) -> Self {
        Self {
            text,
            line_break,
            pos: 0,
            line: 1,
        }
    }

    /// The line starting at byte `pos` and the offset of the line after it.
    fn line_at(&self, pos: usize) -> (&'a str, usize) {
        let rest = &self.text[pos..];
        match rest.find(self.line_break) {
            Some(i) => (&rest[..i], pos + i + self.line_break.len()),
            None => (rest, self.text.len()),
        }
    }
}

impl<'a> Iterator for BlankLineSplit<'a> {
    type Item = (usize, &'a str);

    fn next(&mut self) -> Option<Self::Item> {
        // skip leading blank lines
        loop {
            if self.pos >= self.text.len() {
                return None;
            }
            let (line, next) = self.line_at(self.pos);
            if !line.trim().is_empty() {
                break;
            }
            self.pos = next;
            self.line += 1;
        }

        let start = self.pos;
        let start_line = self.line;
        let mut end = start;
        while self.pos < self.text.len() {
            let (line, next) = self.line_at(self.pos);
            if line.trim().is_empty() {
                break;
            }
            end = self.pos + line.len();
            self.pos = next;
            self.line += 1;
        }
        Some((start_line, &self.text[start..end]))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_split_records() {
        let text = "PMID- 1\nTI  - One\n\nPMID- 2\nTI  - Two\n";
        let chunks: Vec<_> = BlankLineSplit::new(text, "\n").collect();
        assert_eq!(
            chunks,
            vec![(1, "PMID- 1\nTI  - One"), (4, "PMID- 2\nTI  - Two")]
        );
    }

    #[test]
    fn test_split_multiple_blank_lines() {
        let text = "\n\nPMID- 1\n  \n\t\n\nPMID- 2";
        let chunks: Vec<_> = BlankLineSplit::new(text, "\n").collect();
        assert_eq!(chunks, vec![(3, "PMID- 1"), (7, "PMID- 2")]);
    }

    #[test]
    fn test_split_crlf() {
        let text = "PMID- 1\r\nTI  - One\r\n\r\nPMID- 2\r\n";
        let chunks: Vec<_> = BlankLineSplit::new(text, "\r\n").collect();
        assert_eq!(chunks, vec![(1, "PMID- 1\r\nTI  - One"), (4, "PMID- 2")]);
    }

    #[test]
    fn test_split_chunks_borrow_source() {
        let text = "\nPMID- 1\n\nPMID- 2";
        let offsets: Vec<_> = BlankLineSplit::new(text, "\n")
            .map(|(_, chunk)| chunk.as_ptr() as usize - text.as_ptr() as usize)
            .collect();
        assert_eq!(offsets, vec![1, 10]);
    }

    #[test]
    fn test_split_empty() {
        assert_eq!(BlankLineSplit::new("", "\n").count(), 0);
        assert_eq!(BlankLineSplit::new("\n \n", "\n").count(), 0);
    }
}
