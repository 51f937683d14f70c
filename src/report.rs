//! Prints benchmark results as a delimited table.

use crate::codecs::CodecKind;
use crate::driver::WidthResult;
use std::io::{self, Write};

/// Selects the quantity that is printed for each phase.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Default)]
pub enum ReportMode {
    /// Millions of elements per second.
    #[default]
    Throughput,
    /// Average milliseconds per call.
    Time,
}

impl ReportMode {
    fn describe(self) -> (&'static str, &'static str) {
        match self {
            ReportMode::Throughput => ("throughput", "M/s"),
            ReportMode::Time => ("time per call", "ms"),
        }
    }
}

/// Writes the table header and one row per bit width into 'out'.
pub struct Report<W: Write> {
    out: W,
    separator: char,
    mode: ReportMode,
}

impl<W: Write> Report<W> {
    pub fn new(out: W, separator: char, mode: ReportMode) -> Self {
        Self {
            out,
            separator,
            mode,
        }
    }

    pub fn mode(&self) -> ReportMode {
        self.mode
    }

    /// Write the comment lines and the column names for 'codecs'.
    pub fn write_header(&mut self, codecs: &[CodecKind]) -> io::Result<()> {
        let (mode, unit) = self.mode.describe();
        writeln!(self.out, "# mode: {}", mode)?;
        writeln!(self.out, "# unit: {}", unit)?;

        let mut line = String::from("bits");
        for kind in codecs {
            for phase in ["pack", "unpack"] {
                line.push(self.separator);
                line.push_str(&format!("{} {}", kind, phase));
            }
        }
        writeln!(self.out, "{}", line)
    }

    /// Write the row for one bit width. Codecs that were skipped for the
    /// width are printed as '-'.
    pub fn write_row(&mut self, result: &WidthResult) -> io::Result<()> {
        let mut line = result.bits.to_string();
        for (_, measurement) in &result.cells {
            let values = measurement.map(|m| match self.mode {
                ReportMode::Throughput => {
                    (m.pack_throughput(), m.unpack_throughput())
                }
                ReportMode::Time => (m.pack_millis(), m.unpack_millis()),
            });
            match values {
                Some((pack, unpack)) => {
                    line.push(self.separator);
                    line.push_str(&format!("{:.3}", pack));
                    line.push(self.separator);
                    line.push_str(&format!("{:.3}", unpack));
                }
                None => {
                    for _ in 0..2 {
                        line.push(self.separator);
                        line.push('-');
                    }
                }
            }
        }
        writeln!(self.out, "{}", line)?;
        self.out.flush()
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}
