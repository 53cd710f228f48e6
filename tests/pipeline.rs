use fastacheck::{
    FastaError, FastaParser, FormatError, SequenceError, ValidatorOptions, validate_path,
    validate_stream,
};
use std::fs::File;
use std::io::{BufReader, Read, Write};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use tempfile::tempdir;

/// Reader wrapper tracking how many input bytes were actually pulled.
struct CountingReader<R> {
    inner: R,
    consumed: Arc<AtomicUsize>,
}

impl<R: Read> Read for CountingReader<R> {
    fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
        let n = self.inner.read(buf)?;
        self.consumed.fetch_add(n, Ordering::Relaxed);
        Ok(n)
    }
}

const VALID: &str = "\
>seq1
ACGTACGT
ACGTACGT
>seq2
ACGT
";

#[test]
fn valid_file_passes_and_is_idempotent() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("sample.fasta");
    std::fs::write(&path, VALID).unwrap();

    validate_path(&path, 4, ValidatorOptions::default()).unwrap();
    // a second run over the unmodified file gives the same verdict
    validate_path(&path, 4, ValidatorOptions::default()).unwrap();
}

#[test]
fn gz_file_passes() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("sample.fasta.gz");
    {
        let f = File::create(&path).unwrap();
        let mut enc = flate2::write::GzEncoder::new(f, flate2::Compression::fast());
        enc.write_all(VALID.as_bytes()).unwrap();
        enc.finish().unwrap();
    }

    validate_path(&path, 2, ValidatorOptions::default()).unwrap();
}

#[test]
fn missing_file_is_an_io_error() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("no_such.fasta");

    let err = validate_path(&path, 1, ValidatorOptions::default()).unwrap_err();
    assert!(matches!(err, FastaError::Io { .. }));
}

#[test]
fn duplicate_id_fails_through_the_pipeline() {
    let dup = "\
>seq1
ACGT
>seq1
ACGT
";
    let opts = ValidatorOptions::default();
    let parser = FastaParser::from_bufread(BufReader::new(dup.as_bytes()), opts);

    let err = validate_stream(parser, 4, opts).unwrap_err();
    assert!(matches!(
        err,
        FastaError::Format {
            source: FormatError::DuplicateId { .. },
            line: 3,
        }
    ));
}

#[test]
fn wrap_violation_fails_through_the_pipeline() {
    let bad = "\
>seq1
ACGTACGT
ACG
ACGTACGT
";
    let opts = ValidatorOptions::default();
    let parser = FastaParser::from_bufread(BufReader::new(bad.as_bytes()), opts);

    let err = validate_stream(parser, 4, opts).unwrap_err();
    assert!(matches!(
        err,
        FastaError::Sequence {
            source: SequenceError::WrapLengthViolation { expected: 8 },
            line: 3,
        }
    ));
}

#[test]
fn many_records_across_workers() {
    let mut input = String::new();
    for i in 0..500 {
        input.push_str(&format!(">seq{i}\nACGTACGTAC\nACGTACGTAC\nACGT\n"));
    }
    let opts = ValidatorOptions::default();
    let parser = FastaParser::from_bufread(std::io::Cursor::new(input.into_bytes()), opts);

    validate_stream(parser, 4, opts).unwrap();
}

#[test]
fn earliest_error_wins_with_many_failures() {
    // every record is fully masked; the reported error must be the first one
    let mut input = String::new();
    for i in 0..200 {
        input.push_str(&format!(">seq{i}\nNNNN\n"));
    }
    let opts = ValidatorOptions::default();
    let parser = FastaParser::from_bufread(std::io::Cursor::new(input.into_bytes()), opts);

    let err = validate_stream(parser, 4, opts).unwrap_err();
    match err {
        FastaError::Sequence {
            source: SequenceError::FullyMasked { id },
            line,
        } => {
            assert_eq!(id, "seq0");
            assert_eq!(line, 1);
        }
        other => panic!("expected FullyMasked for seq0, got {other:?}"),
    }
}

#[test]
fn bad_record_stops_the_producer_early() {
    // fully-masked first record, then enough valid ones that reading to EOF
    // would be visible in the byte count
    let mut input = String::from(">bad\nNNNN\n");
    for i in 0..50_000 {
        input.push_str(&format!(">seq{i}\nACGTACGTAC\nACGTACGTAC\nACGT\n"));
    }
    let total = input.len();

    let consumed = Arc::new(AtomicUsize::new(0));
    let rdr = BufReader::new(CountingReader {
        inner: std::io::Cursor::new(input.into_bytes()),
        consumed: Arc::clone(&consumed),
    });
    let opts = ValidatorOptions::default();
    let parser = FastaParser::from_bufread(rdr, opts);

    let err = validate_stream(parser, 4, opts).unwrap_err();
    match err {
        FastaError::Sequence {
            source: SequenceError::FullyMasked { id },
            line,
        } => {
            assert_eq!(id, "bad");
            assert_eq!(line, 1);
        }
        other => panic!("expected FullyMasked for the first record, got {other:?}"),
    }

    // the failure must abort parsing, not let it drain the whole file
    let consumed = consumed.load(Ordering::Relaxed);
    assert!(
        consumed < total / 2,
        "parser consumed {consumed} of {total} bytes after the failure"
    );
}

#[test]
fn single_worker_is_supported() {
    let opts = ValidatorOptions::default();
    let parser = FastaParser::from_bufread(BufReader::new(VALID.as_bytes()), opts);
    validate_stream(parser, 1, opts).unwrap();
}
