//! This is the command line tool that validates and times the bit-packing
//! codecs over a range of bit widths, and prints the results as a table.

extern crate clap;
extern crate env_logger;
extern crate log;

use clap::error::ErrorKind;
use packbench::config::{command, normalize_args, BenchConfig};
use packbench::driver::{self, Timer};
use packbench::report::Report;

use std::io;
use std::process;

/// Exit status for bad command line input.
const USAGE_EXIT: i32 = -1;
/// Exit status for a codec or harness defect.
const FATAL_EXIT: i32 = 1;

fn main() {
    let matches = match command().try_get_matches_from(normalize_args(std::env::args_os())) {
        Ok(matches) => matches,
        Err(err) => match err.kind() {
            ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => err.exit(),
            _ => {
                eprint!("{}", err);
                eprintln!("{}", command().render_usage());
                process::exit(USAGE_EXIT);
            }
        },
    };

    env_logger::builder().format_timestamp(None).init();

    let config = match BenchConfig::from_matches(&matches) {
        Ok(config) => config,
        Err(err) => {
            eprintln!("error: {}", err);
            eprintln!("{}", command().render_usage());
            process::exit(USAGE_EXIT);
        }
    };

    let stdout = io::stdout();
    let mut report = Report::new(stdout.lock(), config.separator, config.mode);
    let timer = Timer::start();

    match driver::run(&config, &mut report) {
        Ok(results) => {
            log::info!(
                "Benchmarked {} widths in {:03} seconds",
                results.len(),
                timer.stop().as_secs_f32()
            );
        }
        Err(err) => {
            log::error!("Benchmark aborted: {}", err);
            eprintln!("fatal: {}", err);
            process::exit(if err.is_fatal() { FATAL_EXIT } else { USAGE_EXIT });
        }
    }
}
