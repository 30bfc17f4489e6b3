//! CSV persistence for pair results.
//!
//! Successful pairs go to the output sink and failed pairs to the error sink.
//! Every row is flushed as soon as it is written.

use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::Path;

use csv::{Writer, WriterBuilder};
use tracing::debug;

use crate::error::Result;
use crate::parser::PairResult;

/// Whether sinks replace or extend existing files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WriteMode {
    #[default]
    Overwrite,
    Append,
}

/// Output and error CSV writers held open for the duration of a run.
pub struct ResultSink<W: Write> {
    output: Writer<W>,
    errors: Writer<W>,
}

impl ResultSink<File> {
    /// Opens (creating if needed) the output and error files.
    pub fn open(output_path: &Path, error_path: &Path, mode: WriteMode) -> Result<Self> {
        debug!(
            output = %output_path.display(),
            errors = %error_path.display(),
            ?mode,
            "Opening result sinks"
        );
        Ok(Self::from_writers(
            open_file(output_path, mode)?,
            open_file(error_path, mode)?,
        ))
    }
}

impl<W: Write> ResultSink<W> {
    pub fn from_writers(output: W, errors: W) -> Self {
        Self {
            output: csv_writer(output),
            errors: csv_writer(errors),
        }
    }

    pub fn write_success(&mut self, result: &PairResult) -> Result<()> {
        write_row(&mut self.output, result)
    }

    pub fn write_failure(&mut self, result: &PairResult) -> Result<()> {
        write_row(&mut self.errors, result)
    }

    /// Flushes and returns the underlying writers.
    pub fn into_inner(self) -> Result<(W, W)> {
        let output = self.output.into_inner().map_err(|e| e.into_error())?;
        let errors = self.errors.into_inner().map_err(|e| e.into_error())?;
        Ok((output, errors))
    }
}

fn open_file(path: &Path, mode: WriteMode) -> Result<File> {
    let mut options = OpenOptions::new();
    options.create(true);
    match mode {
        WriteMode::Overwrite => options.write(true).truncate(true),
        WriteMode::Append => options.append(true),
    };
    Ok(options.open(path)?)
}

fn csv_writer<W: Write>(inner: W) -> Writer<W> {
    WriterBuilder::new().has_headers(false).from_writer(inner)
}

fn write_row<W: Write>(writer: &mut Writer<W>, result: &PairResult) -> Result<()> {
    writer.write_record(result.to_record())?;
    writer.flush()?;
    Ok(())
}
