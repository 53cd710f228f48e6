use crate::config::ValidatorOptions;
use crate::error::{FastaError, FormatError};
use crate::record::FastaRecord;
use crate::util::open_source;
use crate::validate::is_strict_id;

use std::collections::HashSet;
use std::io::{self, BufRead, Read};
use std::path::Path;

/// Cap on a single input line, to bound per-line memory.
pub const MAX_LINE_LEN: usize = 1 << 30;

/// Streaming FASTA parser (plain/.gz). Single-threaded producer: owns the
/// ID registry and the partial-record accumulation state, so neither needs
/// synchronization.
pub struct FastaParser {
    rdr: Box<dyn BufRead + Send>,
    opts: ValidatorOptions,
    max_line_len: usize,
    line_num: u64,
    seen_ids: HashSet<String>,
    open: Option<OpenRecord>,
    // Header that finalized the previous record; becomes the next record on
    // the following call.
    pending: Option<(String, u64)>,
    done: bool,
}

struct OpenRecord {
    id: String,
    start_line: u64,
    body: String,
    n_lines: usize,
    wrap_len: usize,
}

impl OpenRecord {
    fn new(id: String, start_line: u64) -> Self {
        Self {
            id,
            start_line,
            body: String::with_capacity(256),
            n_lines: 0,
            wrap_len: 0,
        }
    }

    fn push_line(&mut self, line: &str) {
        if self.n_lines > 0 {
            self.body.push('\n');
            // Lines after the record's first establish the wrapping width.
            self.wrap_len = self.wrap_len.max(line.len());
        }
        self.body.push_str(line);
        self.n_lines += 1;
    }

    fn finish(self) -> FastaRecord {
        FastaRecord {
            id: self.id,
            seq: self.body,
            start_line: self.start_line,
            wrap_len: self.wrap_len,
        }
    }
}

impl FastaParser {
    /// Open from a file path. Auto-detect `.gz` by extension or magic bytes.
    pub fn from_path<P: AsRef<Path>>(path: P, opts: ValidatorOptions) -> Result<Self, FastaError> {
        let rdr = open_source(path.as_ref()).map_err(|e| FastaError::io_err(e, 0))?;
        Ok(Self::new(rdr, opts))
    }

    /// Wrap an arbitrary `BufRead` (stdin, in-memory buffers in tests).
    pub fn from_bufread<R: BufRead + Send + 'static>(reader: R, opts: ValidatorOptions) -> Self {
        Self::new(Box::new(reader), opts)
    }

    fn new(rdr: Box<dyn BufRead + Send>, opts: ValidatorOptions) -> Self {
        Self {
            rdr,
            opts,
            max_line_len: MAX_LINE_LEN,
            line_num: 0,
            seen_ids: HashSet::new(),
            open: None,
            pending: None,
            done: false,
        }
    }

    #[cfg(test)]
    fn with_max_line_len(mut self, max: usize) -> Self {
        self.max_line_len = max;
        self
    }

    fn read_line(&mut self, buf: &mut String) -> io::Result<usize> {
        buf.clear();
        // Cap each read at the line limit (plus room for a CRLF terminator)
        // so an overlong line fails fast instead of being buffered whole.
        let limit = self.max_line_len as u64 + 2;
        let n = (&mut self.rdr).take(limit).read_line(buf)?;
        if n > 0 {
            self.line_num += 1;
            if buf.ends_with('\n') {
                buf.pop();
            }
            if buf.ends_with('\r') {
                buf.pop();
            }
        }
        Ok(n)
    }

    /// Extract and register the ID of a `>` header line.
    fn parse_header(&mut self, line: &str) -> Result<String, FastaError> {
        let token = line.split_whitespace().next().unwrap_or(line);
        let id = token.strip_prefix('>').unwrap_or(token);

        if id.is_empty() {
            return Err(FastaError::fmt_err(
                FormatError::EmptyId {
                    header: line.to_string(),
                },
                self.line_num,
            ));
        }
        if self.opts.strict_ids && !is_strict_id(id) {
            return Err(FastaError::fmt_err(
                FormatError::StrictId { id: id.to_string() },
                self.line_num,
            ));
        }
        if !self.seen_ids.insert(id.to_string()) {
            return Err(FastaError::fmt_err(
                FormatError::DuplicateId { id: id.to_string() },
                self.line_num,
            ));
        }
        Ok(id.to_string())
    }

    /// Next finalized record in file order. Fuses after the first error.
    pub fn next_record(&mut self) -> Option<Result<FastaRecord, FastaError>> {
        if self.done {
            return None;
        }

        if let Some((id, start_line)) = self.pending.take() {
            self.open = Some(OpenRecord::new(id, start_line));
        }

        let mut line = String::with_capacity(256);
        loop {
            let n = match self.read_line(&mut line) {
                Ok(n) => n,
                Err(e) => {
                    self.done = true;
                    return Some(Err(FastaError::io_err(e, self.line_num)));
                }
            };

            if n == 0 {
                self.done = true;
                // No header ever seen: zero lines read, or blank lines only.
                if self.seen_ids.is_empty() {
                    return Some(Err(FastaError::fmt_err(FormatError::EmptyInput, self.line_num)));
                }
                log::info!("parsed {} lines from fasta file", self.line_num);
                return self.open.take().map(|open| Ok(open.finish()));
            }

            if line.len() > self.max_line_len {
                self.done = true;
                return Some(Err(FastaError::fmt_err(
                    FormatError::OversizedLine {
                        max: self.max_line_len,
                    },
                    self.line_num,
                )));
            }

            if line.starts_with('>') {
                let id = match self.parse_header(&line) {
                    Ok(id) => id,
                    Err(e) => {
                        self.done = true;
                        return Some(Err(e));
                    }
                };
                log::debug!("found fasta ID near line #{}: {}", self.line_num, id);

                if let Some(open) = self.open.take() {
                    self.pending = Some((id, self.line_num));
                    return Some(Ok(open.finish()));
                }
                self.open = Some(OpenRecord::new(id, self.line_num));
                continue;
            }

            match &mut self.open {
                Some(open) => open.push_line(&line),
                None => {
                    // Blank lines before the first header are tolerated;
                    // anything else must be a header.
                    if line.is_empty() {
                        continue;
                    }
                    self.done = true;
                    return Some(Err(FastaError::fmt_err(
                        FormatError::MissingHeader,
                        self.line_num,
                    )));
                }
            }
        }
    }
}

impl Iterator for FastaParser {
    type Item = Result<FastaRecord, FastaError>;
    fn next(&mut self) -> Option<Self::Item> {
        self.next_record()
    }
}
