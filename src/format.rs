// SPDX-License-Identifier: BSD-3-Clause
// Copyright (c) 2025 William Bro-Jørgensen
// Copyright (c) 2020 Guillaume Fraux and contributors
//
// See LICENSE at the project root for full text.

use crate::error::CError;
use crate::formats::com::COMFormat;
use crate::formats::xyz::XYZFormat;
use crate::frame::Frame;
use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;

/// Supported text-based trajectory file formats for reading and writing.
///
/// - `XYZ`: plain-text XYZ coordinate format.
/// - `COM`: one `x y z` center-of-mass line per step.
/// - `Guess`: autodetect format from file extension.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TextFormat {
    /// XYZ file format.
    XYZ,
    /// Center-of-mass coordinate list.
    COM,
    /// Automatically detect format from file extension.
    Guess,
}

/// Concrete file format strategy for reading and writing trajectory data.
pub enum Format {
    /// Handler for the XYZ format.
    XYZ(XYZFormat),
    /// Handler for the center-of-mass format.
    COM(COMFormat),
}

impl Format {
    /// Creates a new [`Format`] by inferring the format from the provided file `path`.
    ///
    /// `.xyz` files are read as XYZ, `.dat` and `.com` files as center-of-mass lists.
    ///
    /// # Errors
    ///
    /// Returns an error if the file extension is unrecognized.
    pub fn new(path: &Path) -> Result<Self, CError> {
        let ext = path.extension().and_then(|s| s.to_str()).unwrap_or("");

        match ext.to_lowercase().as_str() {
            "xyz" => Ok(Format::XYZ(XYZFormat::default())),
            "dat" | "com" => Ok(Format::COM(COMFormat)),
            _ => Err(CError::UnsupportedFileFormat(path.display().to_string())),
        }
    }

    /// Creates a new `Format` using the specified `TextFormat` and file `path`.
    ///
    /// `TextFormat::Guess` delegates to [`Format::new`].
    ///
    /// # Errors
    ///
    /// Returns an error if guessing cannot detect the format.
    pub fn new_from_format(fmt: TextFormat, path: &Path) -> Result<Self, CError> {
        match fmt {
            TextFormat::XYZ => Ok(Format::XYZ(XYZFormat::default())),
            TextFormat::COM => Ok(Format::COM(COMFormat)),
            TextFormat::Guess => Self::new(path),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Format::XYZ(_) => "XYZ",
            Format::COM(_) => "COM",
        }
    }
}

/// Common interface for reading and writing trajectory file formats.
pub trait FileFormat {
    /// Number of steps stored in the file at `path`, derived from its line count.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or its length does not
    /// match the framing of the format.
    fn count_steps(&self, path: &Path) -> Result<usize, CError>;

    /// Reads a single [`Frame`], returning `None` at the end of the trajectory.
    ///
    /// # Errors
    ///
    /// Returns an error if an I/O or parsing error occurs, including a frame
    /// that stops before it is complete.
    fn read(&mut self, reader: &mut BufReader<File>) -> Result<Option<Frame>, CError>;

    /// Writes the next [`Frame`] to `writer`.
    ///
    /// # Errors
    ///
    /// Returns an error if writing fails.
    fn write_next(&mut self, writer: &mut BufWriter<File>, frame: &Frame) -> Result<(), CError>;

    /// Finalizes the file output. This should be called when done writing to
    /// a file to ensure everything reached it.
    ///
    /// # Errors
    ///
    /// Returns an error if finalization fails.
    fn finalize(&self, writer: &mut BufWriter<File>) -> Result<(), CError>;
}

impl FileFormat for Format {
    fn count_steps(&self, path: &Path) -> Result<usize, CError> {
        match self {
            Format::XYZ(format) => format.count_steps(path),
            Format::COM(format) => format.count_steps(path),
        }
    }

    fn read(&mut self, reader: &mut BufReader<File>) -> Result<Option<Frame>, CError> {
        match self {
            Format::XYZ(format) => format.read(reader),
            Format::COM(format) => format.read(reader),
        }
    }

    fn write_next(&mut self, writer: &mut BufWriter<File>, frame: &Frame) -> Result<(), CError> {
        match self {
            Format::XYZ(format) => format.write_next(writer, frame),
            Format::COM(format) => format.write_next(writer, frame),
        }
    }

    fn finalize(&self, writer: &mut BufWriter<File>) -> Result<(), CError> {
        match self {
            Format::XYZ(format) => format.finalize(writer),
            Format::COM(format) => format.finalize(writer),
        }
    }
}
