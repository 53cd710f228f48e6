use std::env;
use std::process;

use fastacheck::{StopCodon, ValidatorOptions, validate_path};

const USAGE: &str = "\
Usage: fastacheck -fasta <path> [options]

Options:
  -fasta <path>   fasta file to process (.gz supported)
  -threads <n>    number of worker threads (default 6)
  -s              allow a trailing '.' stop-codon marker
  -S              allow a trailing '*' stop-codon marker
  -a              allow the marker anywhere in a line (requires -s or -S)
  -w              strict IDs ([A-Za-z][A-Za-z0-9_]*)
  -verbose        enable verbose logging
  -version        print version and exit";

struct Args {
    fasta: String,
    threads: usize,
    verbose: bool,
    opts: ValidatorOptions,
}

fn set_stop(slot: &mut StopCodon, want: StopCodon) -> Result<(), String> {
    if *slot != StopCodon::None && *slot != want {
        return Err("-s and -S are mutually exclusive".into());
    }
    *slot = want;
    Ok(())
}

fn parse_args(argv: &[String]) -> Result<Args, String> {
    let mut fasta = None;
    let mut threads: usize = 6;
    let mut verbose = false;
    let mut stop_codon = StopCodon::None;
    let mut stop_anywhere = false;
    let mut strict_ids = false;

    let mut it = argv.iter();
    while let Some(arg) = it.next() {
        match arg.as_str() {
            "-fasta" => {
                fasta = Some(it.next().ok_or("-fasta requires a value")?.clone());
            }
            "-threads" => {
                let v = it.next().ok_or("-threads requires a value")?;
                threads = v
                    .parse()
                    .map_err(|_| format!("invalid thread count: {v}"))?;
            }
            "-s" => set_stop(&mut stop_codon, StopCodon::Dot)?,
            "-S" => set_stop(&mut stop_codon, StopCodon::Star)?,
            "-a" => stop_anywhere = true,
            "-w" => strict_ids = true,
            "-verbose" => verbose = true,
            "-version" => {
                println!("{}", env!("CARGO_PKG_VERSION"));
                process::exit(0);
            }
            other => return Err(format!("unknown flag: {other}")),
        }
    }

    let fasta = fasta.ok_or("please provide a fasta file using -fasta")?;
    if threads < 1 {
        return Err("number of threads must be at least 1".into());
    }
    if stop_anywhere && stop_codon == StopCodon::None {
        return Err("-a requires -s or -S".into());
    }

    Ok(Args {
        fasta,
        threads,
        verbose,
        opts: ValidatorOptions {
            stop_codon,
            stop_anywhere,
            strict_ids,
        },
    })
}

fn main() {
    let argv: Vec<String> = env::args().skip(1).collect();
    let args = match parse_args(&argv) {
        Ok(args) => args,
        Err(msg) => {
            eprintln!("{msg}\n\n{USAGE}");
            process::exit(2);
        }
    };

    env_logger::Builder::from_default_env()
        .filter_level(if args.verbose {
            log::LevelFilter::Debug
        } else {
            log::LevelFilter::Error
        })
        .init();

    let available = num_cpus::get();
    let mut threads = args.threads;
    if threads > available {
        log::warn!(
            "requested {threads} threads, but only {available} are available; using {available}"
        );
        threads = available;
    }
    log::info!("using {threads} threads");
    log::info!("processing fasta file: {}", args.fasta);

    if let Err(e) = validate_path(&args.fasta, threads, args.opts) {
        eprintln!("{e}");
        process::exit(1);
    }
    println!("Fasta is valid: {}", args.fasta);
}
