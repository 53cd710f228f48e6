/// One parsed FASTA record. Immutable once emitted by the parser; consumed
/// by exactly one validation worker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FastaRecord {
    /// Identifier from the header line, unique within the file.
    pub id: String,
    /// Sequence body with the original line boundaries kept as `'\n'`.
    pub seq: String,
    /// 1-based line number of the record's `>` header.
    pub start_line: u64,
    /// Maximum length seen among the record's body lines after the first;
    /// interior lines are later checked against this width.
    pub wrap_len: usize,
}

impl FastaRecord {
    /// Total sequence length, line separators excluded.
    #[inline]
    pub fn len(&self) -> usize {
        self.seq.len() - self.seq.matches('\n').count()
    }
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.seq.is_empty()
    }
    /// Body lines in file order.
    #[inline]
    pub fn lines(&self) -> impl Iterator<Item = &str> {
        self.seq.split('\n')
    }
}
