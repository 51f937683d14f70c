//! Runs the benchmark: generation, validation and the timed phases, for every
//! selected codec and bit width.

use crate::codecs::CodecKind;
use crate::config::BenchConfig;
use crate::error::BenchError;
use crate::generator;
use crate::report::Report;
use crate::validator;
use crate::Codec;
use std::io::Write;
use std::time::{Duration, Instant};

/// A scoped utility struct for measuring one phase. The timer starts when it
/// is created and reports the elapsed time when it is stopped.
pub struct Timer {
    start: Instant,
}

impl Timer {
    pub fn start() -> Self {
        Self {
            start: Instant::now(),
        }
    }

    pub fn stop(self) -> Duration {
        self.start.elapsed()
    }
}

/// Returns millions of elements per second for 'repeats' passes over 'len'
/// elements that took 'elapsed'.
pub fn throughput(len: usize, repeats: u32, elapsed: Duration) -> f64 {
    let elements = len as f64 * repeats as f64;
    elements / elapsed.as_secs_f64() / 1e6
}

/// The timings of one codec at one bit width.
#[derive(Copy, Clone, Debug)]
pub struct Measurement {
    /// Number of elements per call.
    pub len: usize,
    /// Number of timed calls per phase.
    pub repeats: u32,
    /// Total time of the pack phase.
    pub pack: Duration,
    /// Total time of the unpack phase.
    pub unpack: Duration,
    /// Size of the compressed buffer in bytes.
    pub compressed_len: usize,
}

impl Measurement {
    pub fn pack_throughput(&self) -> f64 {
        throughput(self.len, self.repeats, self.pack)
    }

    pub fn unpack_throughput(&self) -> f64 {
        throughput(self.len, self.repeats, self.unpack)
    }

    /// Average milliseconds per pack call.
    pub fn pack_millis(&self) -> f64 {
        self.pack.as_secs_f64() * 1e3 / self.repeats as f64
    }

    /// Average milliseconds per unpack call.
    pub fn unpack_millis(&self) -> f64 {
        self.unpack.as_secs_f64() * 1e3 / self.repeats as f64
    }
}

/// The results for one bit width, one cell per selected codec. Codecs that
/// do not support the width have no measurement.
#[derive(Clone, Debug)]
pub struct WidthResult {
    pub bits: u32,
    pub cells: Vec<(CodecKind, Option<Measurement>)>,
}

/// Validate 'codec' on 'src' and time 'repeats' pack calls followed by
/// 'repeats' unpack calls.
pub fn bench_codec(
    codec: &mut dyn Codec,
    src: &[u32],
    repeats: u32,
) -> Result<Measurement, BenchError> {
    let name = codec.name();
    let bits = codec.bits();

    // Correctness first. Granularity errors surface here, before any timing.
    let compressed_len = codec.pack(src)?;
    codec.unpack(src.len())?;
    validator::check(codec, src)?;
    log::debug!(
        "{} ({} bits): {} values packed into {} bytes, validated",
        name,
        bits,
        src.len(),
        compressed_len
    );

    // Warm up the caches and the branch predictors.
    codec.unpack(src.len())?;

    let timer = Timer::start();
    for _ in 0..repeats {
        codec.pack(src)?;
    }
    let pack = timer.stop();

    let timer = Timer::start();
    for _ in 0..repeats {
        codec.unpack(src.len())?;
    }
    let unpack = timer.stop();

    log::debug!(
        "{} ({} bits): pack {:?}, unpack {:?} for {} runs",
        name,
        bits,
        pack,
        unpack,
        repeats
    );

    Ok(Measurement {
        len: src.len(),
        repeats,
        pack,
        unpack,
        compressed_len,
    })
}

/// Run the benchmark described by 'config'. The header and every row are
/// written to 'report' as soon as they are available. A fatal error stops
/// the run immediately; a length that a selected codec cannot process fails
/// before the header is written.
pub fn run<W: Write>(
    config: &BenchConfig,
    report: &mut Report<W>,
) -> Result<Vec<WidthResult>, BenchError> {
    let codecs: Vec<CodecKind> = config.codecs.iter().collect();
    let len = config.seq_len();

    // Granularity is known before anything runs, so a mismatch fails the
    // run before the header is written.
    for kind in &codecs {
        if config.widths().any(|bits| kind.supports(bits)) {
            kind.check_len(len)?;
        }
    }
    report.write_header(&codecs)?;

    log::info!(
        "Benchmarking {} values per run, {} runs, widths {}..={}",
        len,
        config.repeats,
        config.bits_begin,
        config.bits_end
    );

    let mut results = Vec::new();
    let mut src = Vec::new();
    for bits in config.widths() {
        generator::fill(&mut src, bits, len, config.pattern);

        let mut cells = Vec::with_capacity(codecs.len());
        for kind in &codecs {
            if !kind.supports(bits) {
                log::debug!("{} does not support {} bits, skipping", kind, bits);
                cells.push((*kind, None));
                continue;
            }
            let mut codec = kind.create(bits)?;
            let measurement = bench_codec(codec.as_mut(), &src, config.repeats)?;
            cells.push((*kind, Some(measurement)));
        }

        let result = WidthResult { bits, cells };
        report.write_row(&result)?;
        log::info!("Finished {} bits", bits);
        results.push(result);
    }
    Ok(results)
}
