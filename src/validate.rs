//! Per-record sequence validation.
//!
//! All patterns are compiled once into process-wide statics; the options
//! select which one applies to a given line. Validation is stateless per
//! record, so records can be checked concurrently in any order.

use crate::config::{StopCodon, ValidatorOptions};
use crate::error::{FastaError, SequenceError};
use crate::record::FastaRecord;

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref LETTERS: Regex = Regex::new(r"^[A-Za-z]+$").unwrap();
    static ref LETTERS_DOT_TAIL: Regex = Regex::new(r"^[A-Za-z]+\.?$").unwrap();
    static ref LETTERS_STAR_TAIL: Regex = Regex::new(r"^[A-Za-z]+\*?$").unwrap();
    static ref LETTERS_DOT_ANY: Regex = Regex::new(r"^[A-Za-z.]+$").unwrap();
    static ref LETTERS_STAR_ANY: Regex = Regex::new(r"^[A-Za-z*]+$").unwrap();
    static ref MASKED: Regex = Regex::new(r"^[Nn]+$").unwrap();
    static ref MASKED_DOT: Regex = Regex::new(r"^[Nn.]+$").unwrap();
    static ref MASKED_STAR: Regex = Regex::new(r"^[Nn*]+$").unwrap();
    static ref STRICT_ID: Regex = Regex::new(r"^[A-Za-z][A-Za-z0-9_]*$").unwrap();
}

/// Pattern for one sequence line under the given dialect. Without
/// `stop_anywhere` the marker is only tolerated on the record's last line,
/// and only as its final character.
fn line_pattern(opts: &ValidatorOptions, is_last: bool) -> &'static Regex {
    match (opts.stop_codon, opts.stop_anywhere) {
        (StopCodon::None, _) => &LETTERS,
        (StopCodon::Dot, true) => &LETTERS_DOT_ANY,
        (StopCodon::Star, true) => &LETTERS_STAR_ANY,
        (StopCodon::Dot, false) if is_last => &LETTERS_DOT_TAIL,
        (StopCodon::Star, false) if is_last => &LETTERS_STAR_TAIL,
        _ => &LETTERS,
    }
}

/// A line counts as masked when it consists solely of `N`/`n`, extended by
/// the dialect marker when one is enabled.
fn masked_pattern(opts: &ValidatorOptions) -> &'static Regex {
    match opts.stop_codon {
        StopCodon::None => &MASKED,
        StopCodon::Dot => &MASKED_DOT,
        StopCodon::Star => &MASKED_STAR,
    }
}

/// Strict-mode ID check used by the parser when `-w` is set.
pub fn is_strict_id(id: &str) -> bool {
    STRICT_ID.is_match(id)
}

/// Check one record against the configured rules. Any violation is fatal.
pub fn check_record(record: &FastaRecord, opts: &ValidatorOptions) -> Result<(), FastaError> {
    if record.seq.is_empty() {
        return Err(FastaError::seq_err(
            SequenceError::EmptyBody {
                id: record.id.clone(),
            },
            record.start_line,
        ));
    }

    let lines: Vec<&str> = record.lines().collect();
    log::debug!("sequence {} has {} line(s)", record.id, lines.len());

    let masked = masked_pattern(opts);
    let mut masked_lines = 0;

    for (i, line) in lines.iter().enumerate() {
        // Absolute position of this body line in the input file.
        let line_no = record.start_line + i as u64 + 1;
        let is_last = i + 1 == lines.len();

        if line.is_empty() {
            return Err(FastaError::seq_err(SequenceError::EmptyLine, line_no));
        }

        if !line_pattern(opts, is_last).is_match(line) {
            return Err(FastaError::seq_err(SequenceError::InvalidCharacter, line_no));
        }

        if i > 0 && !is_last && line.len() != record.wrap_len && !lines[i + 1].is_empty() {
            return Err(FastaError::seq_err(
                SequenceError::WrapLengthViolation {
                    expected: record.wrap_len,
                },
                line_no,
            ));
        }

        if masked.is_match(line) {
            masked_lines += 1;
        }
    }

    if masked_lines == lines.len() {
        return Err(FastaError::seq_err(
            SequenceError::FullyMasked {
                id: record.id.clone(),
            },
            record.start_line,
        ));
    }

    Ok(())
}
