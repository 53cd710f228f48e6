use std::io;
use thiserror::Error;

/// Structural problems detected while reading lines and headers.
#[derive(Debug, Error)]
pub enum FormatError {
    #[error("fasta must start with a '>' header line")]
    MissingHeader,
    #[error("fasta header does not contain a valid ID: {header}")]
    EmptyId { header: String },
    #[error("fasta ID '{id}' does not match [A-Za-z][A-Za-z0-9_]*")]
    StrictId { id: String },
    #[error("duplicate fasta ID found: {id}")]
    DuplicateId { id: String },
    #[error("line is longer than {max} bytes, split it into smaller lines")]
    OversizedLine { max: usize },
    #[error("fasta file is empty")]
    EmptyInput,
}

/// Content problems detected inside a single record's sequence body.
#[derive(Debug, Error)]
pub enum SequenceError {
    #[error("empty sequence for record {id}")]
    EmptyBody { id: String },
    #[error("empty sequence line")]
    EmptyLine,
    #[error("invalid sequence character")]
    InvalidCharacter,
    #[error("sequence violates preceding line wrapping length of {expected}")]
    WrapLengthViolation { expected: usize },
    #[error("sequence is completely masked: {id}")]
    FullyMasked { id: String },
}

/// Any fatal condition; carries the 1-based line number for diagnostics.
#[derive(Debug, Error)]
pub enum FastaError {
    #[error("I/O error near line #{line}: {source}")]
    Io {
        #[source]
        source: io::Error,
        line: u64,
    },
    #[error("format error near line #{line}: {source}")]
    Format {
        #[source]
        source: FormatError,
        line: u64,
    },
    #[error("sequence error near line #{line}: {source}")]
    Sequence {
        #[source]
        source: SequenceError,
        line: u64,
    },
}

impl FastaError {
    pub(crate) fn io_err(source: io::Error, line: u64) -> Self {
        Self::Io { source, line }
    }
    pub(crate) fn fmt_err(source: FormatError, line: u64) -> Self {
        Self::Format { source, line }
    }
    pub(crate) fn seq_err(source: SequenceError, line: u64) -> Self {
        Self::Sequence { source, line }
    }

    /// Line number the error refers to. Errors coming back from concurrent
    /// workers are ordered by this so the reported diagnostic is
    /// deterministic.
    pub fn line(&self) -> u64 {
        match self {
            Self::Io { line, .. } | Self::Format { line, .. } | Self::Sequence { line, .. } => {
                *line
            }
        }
    }
}
