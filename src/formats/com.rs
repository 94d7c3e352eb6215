use crate::atom::Atom;
use crate::error::CError;
use crate::format::FileFormat;
use crate::frame::Frame;
use crate::lines::count_lines;
use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;

/// Center-of-mass coordinates, one `x y z` line per step.
///
/// Every line becomes a frame holding a single [`Atom::com`].
#[derive(Debug, Default)]
pub struct COMFormat;

impl FileFormat for COMFormat {
    fn count_steps(&self, path: &Path) -> Result<usize, CError> {
        count_lines(path)
    }

    fn read(&mut self, reader: &mut BufReader<File>) -> Result<Option<Frame>, CError> {
        let mut line = String::new();
        reader.read_line(&mut line)?;

        let mut tokens = line.split_whitespace();
        let Some(x) = tokens.next() else {
            return Ok(None);
        };
        let x: f64 = x.parse()?;
        let y: f64 = tokens.next().ok_or(CError::MissingToken)?.parse()?;
        let z: f64 = tokens.next().ok_or(CError::MissingToken)?.parse()?;
        if let Some(extra) = tokens.next() {
            return Err(CError::UnexpectedToken(extra.to_string()));
        }

        let mut frame = Frame::new();
        frame.add_atom(Atom::com(x, y, z));
        Ok(Some(frame))
    }

    fn write_next(&mut self, writer: &mut BufWriter<File>, frame: &Frame) -> Result<(), CError> {
        for atom in frame.atoms() {
            writeln!(writer, "{:?} {:?} {:?}", atom.x, atom.y, atom.z)?;
        }
        Ok(())
    }

    fn finalize(&self, writer: &mut BufWriter<File>) -> Result<(), CError> {
        writer.flush()?;
        Ok(())
    }
}
