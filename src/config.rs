//! The benchmark configuration and the command line that builds it.

use crate::bitstream::MAX_BITS;
use crate::codecs::{CodecKind, CodecSet};
use crate::error::BenchError;
use crate::generator::Pattern;
use crate::report::ReportMode;
use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};
use std::ffi::OsString;
use std::ops::RangeInclusive;

/// Stores the parameters of one benchmark run.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BenchConfig {
    /// First bit width tested.
    pub bits_begin: u32,
    /// Last bit width tested (inclusive).
    pub bits_end: u32,
    /// The sequence length is 1 << log2_len.
    pub log2_len: u32,
    /// Number of timed calls per phase.
    pub repeats: u32,
    /// The codecs to benchmark.
    pub codecs: CodecSet,
    pub mode: ReportMode,
    /// Column separator of the report.
    pub separator: char,
    pub pattern: Pattern,
}

impl Default for BenchConfig {
    fn default() -> Self {
        Self {
            bits_begin: 1,
            bits_end: 32,
            log2_len: 25,
            repeats: 16,
            codecs: CodecSet::all(),
            mode: ReportMode::Throughput,
            separator: '\t',
            pattern: Pattern::Ramp,
        }
    }
}

impl BenchConfig {
    /// Number of values in each generated sequence.
    pub fn seq_len(&self) -> usize {
        1usize << self.log2_len
    }

    pub fn widths(&self) -> RangeInclusive<u32> {
        self.bits_begin..=self.bits_end
    }

    /// Check that the parameters describe a run that can be performed.
    pub fn validate(&self) -> Result<(), BenchError> {
        if self.bits_begin == 0 || self.bits_begin > self.bits_end {
            return Err(BenchError::InvalidArgument(format!(
                "bit range {}..={} is empty",
                self.bits_begin, self.bits_end
            )));
        }
        if self.bits_end > MAX_BITS {
            return Err(BenchError::InvalidArgument(format!(
                "no codec supports {} bits (max {})",
                self.bits_end, MAX_BITS
            )));
        }
        if self.log2_len > 31 {
            return Err(BenchError::InvalidArgument(format!(
                "sequence length 2^{} is too large",
                self.log2_len
            )));
        }
        for kind in self.codecs.iter() {
            if !self.widths().any(|bits| kind.supports(bits)) {
                continue;
            }
            if kind.check_len(self.seq_len()).is_err() {
                return Err(BenchError::InvalidArgument(format!(
                    "{} processes multiples of {} values, 2^{} is too small",
                    kind,
                    kind.granularity(),
                    self.log2_len
                )));
            }
        }
        if self.repeats == 0 {
            return Err(BenchError::InvalidArgument(
                "the repeat count must be positive".into(),
            ));
        }
        Ok(())
    }

    /// Build the configuration from parsed command line arguments.
    pub fn from_matches(matches: &ArgMatches) -> Result<Self, BenchError> {
        let mut codecs = CodecSet::empty();
        if let Some(selectors) = matches.get_many::<String>("bench") {
            for selector in selectors {
                codecs.insert(selector.parse::<CodecKind>()?);
            }
        }
        if codecs.is_empty() {
            codecs = CodecSet::all();
        }

        let separator = matches
            .get_one::<String>("sep")
            .map(String::as_str)
            .unwrap_or("\t");
        let mut chars = separator.chars();
        let separator = match (chars.next(), chars.next()) {
            (Some(c), None) => c,
            _ => {
                return Err(BenchError::InvalidArgument(format!(
                    "the separator must be a single character, got '{}'",
                    separator
                )))
            }
        };

        let pattern = match matches.get_one::<String>("pattern").map(String::as_str) {
            Some("uniform") => Pattern::Uniform {
                seed: matches.get_one::<u64>("seed").copied().unwrap_or(0),
            },
            _ => Pattern::Ramp,
        };

        let defaults = BenchConfig::default();
        let config = BenchConfig {
            bits_begin: matches
                .get_one::<u32>("bits_begin")
                .copied()
                .unwrap_or(defaults.bits_begin),
            bits_end: matches
                .get_one::<u32>("bits_end")
                .copied()
                .unwrap_or(defaults.bits_end),
            log2_len: matches
                .get_one::<u32>("size")
                .copied()
                .unwrap_or(defaults.log2_len),
            repeats: matches
                .get_one::<u32>("runs")
                .copied()
                .unwrap_or(defaults.repeats),
            codecs,
            mode: if matches.get_flag("time") {
                ReportMode::Time
            } else {
                ReportMode::Throughput
            },
            separator,
            pattern,
        };
        config.validate()?;
        Ok(config)
    }

    /// Parse the configuration from a full argument list, including the
    /// program name.
    pub fn parse_from<I, T>(args: I) -> Result<Self, BenchError>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString>,
    {
        let matches = command().try_get_matches_from(normalize_args(args))?;
        Self::from_matches(&matches)
    }
}

/// Rewrite the single-dash spellings of the multi-letter options ('-bb',
/// '-be', '-sep') into their long forms, so that clap does not read them as
/// clusters of short flags.
pub fn normalize_args<I, T>(args: I) -> Vec<OsString>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString>,
{
    args.into_iter()
        .map(|arg| {
            let arg: OsString = arg.into();
            match arg.to_str() {
                Some("-bb") => OsString::from("--bb"),
                Some("-be") => OsString::from("--be"),
                Some("-sep") => OsString::from("--sep"),
                _ => arg,
            }
        })
        .collect()
}

/// Returns the command line definition of the benchmark.
pub fn command() -> Command {
    Command::new("cli")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Validates and times integer bit-packing codecs")
        .arg(
            Arg::new("bits_begin")
                .long("bb")
                .value_name("BITS")
                .help("First bit width tested")
                .value_parser(value_parser!(u32))
                .num_args(1),
        )
        .arg(
            Arg::new("bits_end")
                .long("be")
                .value_name("BITS")
                .help("Last bit width tested")
                .value_parser(value_parser!(u32))
                .num_args(1),
        )
        .arg(
            Arg::new("size")
                .short('s')
                .long("size")
                .value_name("LOG2")
                .help("Log2 of the sequence length")
                .value_parser(value_parser!(u32))
                .num_args(1),
        )
        .arg(
            Arg::new("runs")
                .short('r')
                .long("runs")
                .value_name("RUNS")
                .help("Number of timed calls per phase")
                .value_parser(value_parser!(u32))
                .num_args(1),
        )
        .arg(
            Arg::new("bench")
                .short('b')
                .long("bench")
                .value_name("CODEC")
                .help("Codec to benchmark: sserialize, forblock or fastpfor (repeatable, default all)")
                .action(ArgAction::Append)
                .num_args(1),
        )
        .arg(
            Arg::new("time")
                .short('t')
                .long("time")
                .help("Print milliseconds per call instead of throughput")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("sep")
                .long("sep")
                .value_name("CHAR")
                .help("Column separator (default tab)")
                .num_args(1),
        )
        .arg(
            Arg::new("pattern")
                .long("pattern")
                .value_name("PATTERN")
                .help("Shape of the generated values")
                .value_parser(["ramp", "uniform"])
                .num_args(1),
        )
        .arg(
            Arg::new("seed")
                .long("seed")
                .value_name("SEED")
                .help("Seed of the uniform pattern")
                .value_parser(value_parser!(u64))
                .num_args(1),
        )
}

#[test]
fn test_command_is_consistent() {
    command().debug_assert();
}
