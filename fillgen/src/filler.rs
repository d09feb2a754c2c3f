//! The file filler.
//!
//! The filler writes a single file on disk: a header line, then numbered
//! filler lines until the file reaches its target size, then a footer line.
//! The size check happens only after a filler line is written, so every file
//! carries at least one filler line and the body overshoots the target by no
//! more than the last filler line.
//!
//! ## Metrics
//!
//! `bytes_written`: Total bytes written, header and footer included
//! `lines_written`: Total filler lines written
//!
use std::{
    fmt,
    fs::{self, File},
    io::{self, BufWriter, Write},
    path::{Path, PathBuf},
    str::FromStr,
};

use metrics::counter;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

/// The first line of every generated file.
pub const HEADER: &str = "Start of Large File\n";
/// The last line of every generated file.
pub const FOOTER: &str = "End of Large File\n";
/// The text following the line number in every filler line.
pub const FILLER_TEXT: &str =
    "This is some filler text to simulate a large file content. Repeat repeat repeat.";

const PROGRESS_INTERVAL: u64 = 100_000;

#[derive(thiserror::Error, Debug)]
/// Errors produced by [`Filler`].
pub enum Error {
    /// Wrapper around [`std::io::Error`].
    #[error("Io error: {0}")]
    Io(#[from] io::Error),
}

#[derive(Debug, Default, Deserialize, Serialize, PartialEq, Eq, Clone, Copy)]
#[serde(rename_all = "snake_case")]
/// How the size of the file is measured after each filler line.
pub enum Measure {
    /// Count the bytes handed to the writer. Writes stay buffered.
    #[default]
    Counted,
    /// Flush and ask the filesystem for the file length after every line.
    Stat,
}

impl fmt::Display for Measure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Counted => write!(f, "counted"),
            Self::Stat => write!(f, "stat"),
        }
    }
}

impl FromStr for Measure {
    type Err = String;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        match input {
            "counted" => Ok(Self::Counted),
            "stat" => Ok(Self::Stat),
            other => Err(format!(
                "unknown measure '{other}', expected 'counted' or 'stat'"
            )),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// The outcome of a completed [`Filler::generate`] run.
pub struct Report {
    /// Path of the written file.
    pub path: PathBuf,
    /// Size of the file on disk after it was closed.
    pub bytes: u64,
    /// Number of filler lines written, header and footer excluded.
    pub lines: u64,
}

/// Render the filler line for counter value `index`, line break included.
#[must_use]
pub fn filler_line(index: u64) -> String {
    format!("Line {index}: {FILLER_TEXT}\n")
}

#[derive(Debug, Clone)]
/// Writes one filler file.
pub struct Filler {
    path: PathBuf,
    target_size: u64,
    measure: Measure,
}

impl Filler {
    /// Create a new [`Filler`] writing to `path` until the file holds at
    /// least `target_size` bytes.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>, target_size: u64) -> Self {
        Self {
            path: path.into(),
            target_size,
            measure: Measure::default(),
        }
    }

    /// Set the [`Measure`] used after each filler line.
    #[must_use]
    pub fn measure(mut self, measure: Measure) -> Self {
        self.measure = measure;
        self
    }

    /// Write the file, truncating anything already at the path.
    ///
    /// # Errors
    ///
    /// Any failure to open, write, flush or stat the file is returned as
    /// [`Error::Io`] as soon as it happens. A partially written file is left
    /// in place.
    pub fn generate(self) -> Result<Report, Error> {
        info!(
            path = %self.path.display(),
            target_size = self.target_size,
            measure = %self.measure,
            "writing fill file"
        );

        let file = fs::OpenOptions::new()
            .create(true)
            .truncate(true)
            .write(true)
            .open(&self.path)?;
        let mut fp = BufWriter::new(file);

        let mut bytes_written = write_counted(&mut fp, HEADER)?;
        let mut lines: u64 = 0;
        loop {
            bytes_written += write_counted(&mut fp, &filler_line(lines))?;
            lines += 1;
            counter!("lines_written").increment(1);

            let size = match self.measure {
                Measure::Counted => bytes_written,
                Measure::Stat => {
                    fp.flush()?;
                    fp.get_ref().metadata()?.len()
                }
            };
            if lines % PROGRESS_INTERVAL == 0 {
                debug!(lines, size, "fill progress");
            }
            if size >= self.target_size {
                break;
            }
        }
        write_counted(&mut fp, FOOTER)?;

        let file: File = fp.into_inner().map_err(io::IntoInnerError::into_error)?;
        drop(file);

        let bytes = fs::metadata(&self.path)?.len();
        info!(path = %self.path.display(), bytes, lines, "fill file written");
        Ok(Report {
            path: self.path,
            bytes,
            lines,
        })
    }
}

/// Write a file to `path` holding at least `target_size` bytes, measuring by
/// byte count.
///
/// # Errors
///
/// See [`Filler::generate`].
pub fn generate(path: impl AsRef<Path>, target_size: u64) -> Result<Report, Error> {
    Filler::new(path.as_ref(), target_size).generate()
}

fn write_counted<W: Write>(fp: &mut W, text: &str) -> Result<u64, Error> {
    fp.write_all(text.as_bytes())?;
    let total_bytes = text.len() as u64;
    counter!("bytes_written").increment(total_bytes);
    Ok(total_bytes)
}
