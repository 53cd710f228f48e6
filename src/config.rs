/// Which trailing stop-codon marker is tolerated, if any.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StopCodon {
    /// Letters only (strict FASTA).
    #[default]
    None,
    /// Allow a `.` stop-codon marker.
    Dot,
    /// Allow a `*` stop-codon marker.
    Star,
}

/// Immutable validation settings threaded through the parser and the
/// per-record validator.
#[derive(Debug, Clone, Copy, Default)]
pub struct ValidatorOptions {
    /// Stop-codon dialect. With `stop_anywhere` off the marker is only legal
    /// as the last character of a record's last line.
    pub stop_codon: StopCodon,
    /// Allow the dialect marker anywhere in any line. Meaningless without a
    /// dialect; the CLI rejects that combination up front.
    pub stop_anywhere: bool,
    /// Require IDs to match `[A-Za-z][A-Za-z0-9_]*`.
    pub strict_ids: bool,
}
