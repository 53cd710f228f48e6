//! Producer/worker-pool wiring.
//!
//! The parser is the sole producer, feeding a bounded queue; a fixed pool of
//! worker threads drains it and checks each record exactly once. Sending
//! blocks when the queue is full, so in-flight memory stays at
//! `O(QUEUE_CAPACITY)` records. The first failure anywhere raises a shared
//! abort flag that stops the producer and the remaining workers without
//! draining the rest of the input.

use crate::config::ValidatorOptions;
use crate::error::FastaError;
use crate::parser::FastaParser;
use crate::record::FastaRecord;
use crate::validate::check_record;

use crossbeam_channel::{Receiver, bounded};
use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;

/// Records buffered between the parser and the workers.
pub const QUEUE_CAPACITY: usize = 100;

/// Validate a FASTA file (plain or `.gz`) with `workers` threads.
pub fn validate_path<P: AsRef<Path>>(
    path: P,
    workers: usize,
    opts: ValidatorOptions,
) -> Result<(), FastaError> {
    let parser = FastaParser::from_path(path, opts)?;
    validate_stream(parser, workers, opts)
}

/// Run the full pipeline over an already-opened parser. Returns `Ok(())`
/// only when every record passed; otherwise the earliest error by line
/// number among those encountered, so the diagnostic is stable across runs.
pub fn validate_stream(
    mut parser: FastaParser,
    workers: usize,
    opts: ValidatorOptions,
) -> Result<(), FastaError> {
    let workers = workers.max(1);
    let (tx, rx) = bounded::<FastaRecord>(QUEUE_CAPACITY);
    let abort = AtomicBool::new(false);

    thread::scope(|scope| {
        let handles: Vec<_> = (0..workers)
            .map(|_| {
                let rx = rx.clone();
                let abort = &abort;
                scope.spawn(move || worker_loop(rx, &opts, abort))
            })
            .collect();
        drop(rx);

        let mut parse_err: Option<FastaError> = None;
        for item in parser.by_ref() {
            // A failed worker raised the flag; stop reading input.
            if abort.load(Ordering::Relaxed) {
                break;
            }
            match item {
                // Send also fails once every worker has exited.
                Ok(record) => {
                    if tx.send(record).is_err() {
                        break;
                    }
                }
                Err(e) => {
                    abort.store(true, Ordering::Relaxed);
                    parse_err = Some(e);
                    break;
                }
            }
        }
        drop(tx);

        log::info!("waiting for workers to finish...");
        let mut errors: Vec<FastaError> = parse_err.into_iter().collect();
        for handle in handles {
            match handle.join() {
                Ok(Ok(())) => {}
                Ok(Err(e)) => errors.push(e),
                Err(payload) => std::panic::resume_unwind(payload),
            }
        }

        match errors.into_iter().min_by_key(|e| e.line()) {
            Some(e) => Err(e),
            None => {
                log::info!("all workers finished processing");
                Ok(())
            }
        }
    })
}

fn worker_loop(
    rx: Receiver<FastaRecord>,
    opts: &ValidatorOptions,
    abort: &AtomicBool,
) -> Result<(), FastaError> {
    for record in rx.iter() {
        if abort.load(Ordering::Relaxed) {
            break;
        }
        log::debug!("processing record {} with length {}", record.id, record.len());
        if let Err(e) = check_record(&record, opts) {
            abort.store(true, Ordering::Relaxed);
            return Err(e);
        }
        log::debug!("finished processing record {}", record.id);
    }
    Ok(())
}
