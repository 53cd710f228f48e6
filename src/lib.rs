//! Streaming FASTA validator.
//!
//! - Plain and `.gz` input (auto-detect).
//! - Single pass, record-by-record (no full-file buffering).
//! - One parser thread feeding a bounded queue drained by a pool of
//!   validation workers; every violation is fatal.
//! - Configurable dialects: trailing stop-codon markers (`.`/`*`,
//!   optionally anywhere in a line) and strict identifiers.

pub mod config;
pub mod error;
pub mod parser;
pub mod pipeline;
pub mod record;
pub mod validate;
mod util;

pub use crate::config::{StopCodon, ValidatorOptions};
pub use crate::error::{FastaError, FormatError, SequenceError};
pub use crate::parser::{FastaParser, MAX_LINE_LEN};
pub use crate::pipeline::{QUEUE_CAPACITY, validate_path, validate_stream};
pub use crate::record::FastaRecord;
pub use crate::validate::check_record;
