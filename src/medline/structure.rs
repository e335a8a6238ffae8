use crate::error::SourceSpan;
use crate::tags::Tag;
use crate::Record;
use compact_str::CompactString;
use tracing::trace;

/// Structured raw data of one record from a MEDLINE formatted file.
#[derive(Debug)]
pub(crate) struct RawMedlineData {
    /// Known tag-value pairs, in source order.
    pub(crate) entries: Vec<(Tag, String)>,
    /// Well-formed tags which are not understood and were skipped by the parser.
    pub(crate) ignored_tags: Vec<CompactString>,
    /// Starting line number of this record in the source text (1-based).
    pub(crate) start_line: usize,
    /// Byte-offset span of the entire record chunk in the source text.
    pub(crate) record_span: SourceSpan,
}

impl From<RawMedlineData> for Record {
    fn from(
        RawMedlineData {
            entries,
            ignored_tags,
            start_line,
            record_span: _,
        }: RawMedlineData,
    ) -> Self {
        if !ignored_tags.is_empty() {
            trace!(line = start_line, tags = ?ignored_tags, "skipped unknown tags");
        }
        entries.into_iter().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::FieldValue;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_into_record_groups_values() {
        let raw = RawMedlineData {
            entries: vec![
                (Tag::PubmedUniqueIdentifier, "1".to_string()),
                (Tag::MeshTerms, "Humans".to_string()),
                (Tag::Title, "Title".to_string()),
                (Tag::MeshTerms, "Female".to_string()),
            ],
            ignored_tags: vec![CompactString::new("XY")],
            start_line: 1,
            record_span: SourceSpan::new(0, 10),
        };
        let record = Record::from(raw);
        assert_eq!(record.len(), 3);
        assert_eq!(record.pmid(), Some("1"));
        assert_eq!(
            record.get(Tag::MeshTerms),
            Some(&FieldValue::Multi(vec!["Humans".to_string(), "Female".to_string()]))
        );
    }
}
