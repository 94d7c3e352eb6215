use crate::atom::Atom;
use crate::error::CError;
use crate::format::FileFormat;
use crate::frame::Frame;
use crate::lines::count_lines;
use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;

/// Comment line written in place of the original one for every frame.
pub const PROVENANCE: &str = "Created by xyzmerge";

/// Reader and writer for multi-frame XYZ files.
///
/// Each step is an atom count line, a comment line and one
/// `symbol x y z` line per atom. Columns after `z` are ignored.
#[derive(Debug, Default)]
pub struct XYZFormat {
    step: usize,
}

impl XYZFormat {
    fn parse_atom_count(line: &str) -> Result<usize, CError> {
        line.trim()
            .parse::<usize>()
            .map_err(|_| CError::InvalidAtomCount {
                format: "XYZ".to_string(),
                line: line.trim_end().to_string(),
            })
    }

    fn parse_atom(line: &str) -> Result<Option<Atom>, CError> {
        let mut tokens = line.split_whitespace();
        let Some(symbol) = tokens.next() else {
            return Ok(None);
        };

        let x: f64 = tokens.next().ok_or(CError::MissingToken)?.parse()?;
        let y: f64 = tokens.next().ok_or(CError::MissingToken)?.parse()?;
        let z: f64 = tokens.next().ok_or(CError::MissingToken)?.parse()?;

        Ok(Some(Atom::new(symbol.to_string(), x, y, z)))
    }
}

impl FileFormat for XYZFormat {
    fn count_steps(&self, path: &Path) -> Result<usize, CError> {
        let mut line = String::new();
        BufReader::new(File::open(path)?).read_line(&mut line)?;
        let molecule_size = Self::parse_atom_count(&line)?;

        let block = molecule_size
            .checked_add(2)
            .ok_or_else(|| CError::InvalidAtomCount {
                format: "XYZ".to_string(),
                line: line.trim_end().to_string(),
            })?;
        let lines = count_lines(path)?;
        if lines % block != 0 {
            return Err(CError::NonIntegralSteps {
                format: "XYZ".to_string(),
                lines,
                molecule_size,
            });
        }
        Ok(lines / block)
    }

    fn read(&mut self, reader: &mut BufReader<File>) -> Result<Option<Frame>, CError> {
        let mut line = String::new();
        let bytes = reader.read_line(&mut line)?;
        if bytes == 0 || line.trim().is_empty() {
            return Ok(None);
        }
        let n_atoms = Self::parse_atom_count(&line)?;

        line.clear();
        if reader.read_line(&mut line)? == 0 {
            return Err(CError::MissingComment {
                format: "XYZ".to_string(),
                step: self.step,
            });
        }
        let mut frame = Frame::with_comment(line.trim_end_matches(&['\r', '\n'][..]).to_string());

        for i in 0..n_atoms {
            line.clear();
            reader.read_line(&mut line)?;
            // EOF and a blank line both mean the frame was cut short
            let atom = Self::parse_atom(&line)?.ok_or_else(|| CError::UnexpectedEof {
                format: "XYZ".to_string(),
                step: self.step,
                expected: n_atoms,
                got: i,
            })?;
            frame.add_atom(atom);
        }

        self.step += 1;
        Ok(Some(frame))
    }

    fn write_next(&mut self, writer: &mut BufWriter<File>, frame: &Frame) -> Result<(), CError> {
        writeln!(writer, "{}", frame.size())?;
        writeln!(writer, "{PROVENANCE}")?;
        for atom in frame.atoms() {
            writeln!(writer, "{atom}")?;
        }
        Ok(())
    }

    fn finalize(&self, writer: &mut BufWriter<File>) -> Result<(), CError> {
        writer.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use super::PROVENANCE;
    use crate::{error::CError, format::TextFormat, trajectory::Trajectory};
    use assert_approx_eq::assert_approx_eq;
    use tempfile::Builder;

    #[test]
    fn check_nsteps() {
        let path = Path::new("./src/tests-data/xyz/carbon.xyz");
        let trajectory = Trajectory::new(path).unwrap();
        assert_eq!(trajectory.size, 2);

        let path = Path::new("./src/tests-data/xyz/water.xyz");
        let trajectory = Trajectory::new(path).unwrap();
        assert_eq!(trajectory.size, 3);

        let path = Path::new("./src/tests-data/xyz/spaces.xyz");
        let trajectory = Trajectory::new(path).unwrap();
        assert_eq!(trajectory.size, 1);
    }

    #[test]
    fn read_whole_file() {
        let path = Path::new("./src/tests-data/xyz/water.xyz");
        let trajectory = Trajectory::new(path).unwrap();
        assert_eq!(trajectory.frames().len(), 3);
        assert_eq!(trajectory.molecule_size().unwrap(), 3);

        let frame = &trajectory[0];
        assert_eq!(frame.comment, "water step 0");
        assert_eq!(frame[0].symbol, "O");
        assert_eq!(frame[2].symbol, "H");
        assert_approx_eq!(frame[1].y, 0.755453, 1e-12);

        // the last frame has no trailing newline
        let positions = trajectory[2].positions();
        assert_approx_eq!(positions[2][0], 0.019, 1e-12);
        assert_approx_eq!(positions[2][1], -0.753, 1e-12);
        assert_approx_eq!(positions[2][2], -0.473, 1e-12);
    }

    #[test]
    fn various_files_formatting() {
        let path = Path::new("./src/tests-data/xyz/spaces.xyz");
        let trajectory = Trajectory::new(path).unwrap();
        let frame = &trajectory[0];
        assert_eq!(frame.size(), 2);
        assert_eq!(frame[0].symbol, "O");
        assert_approx_eq!(frame[0].x, 0.8336);
        assert_approx_eq!(frame[0].y, 0.3006);
        assert_approx_eq!(frame[0].z, 0.4968);
        assert_eq!(frame[1].symbol, "Na");
        assert_approx_eq!(frame[1].z, -1.5e-3);
    }

    #[test]
    fn non_integral_steps() {
        let path = Path::new("./src/tests-data/xyz/non_integral.xyz");
        let result = Trajectory::new(path);
        assert!(matches!(
            result,
            Err(CError::NonIntegralSteps {
                lines: 9,
                molecule_size: 3,
                ..
            })
        ));
    }

    #[test]
    fn truncated_frame() {
        let path = Path::new("./src/tests-data/xyz/truncated.xyz");
        let result = Trajectory::new(path);
        assert!(matches!(
            result,
            Err(CError::UnexpectedEof {
                step: 1,
                expected: 5,
                got: 3,
                ..
            })
        ));
    }

    #[test]
    fn missing_comment() {
        let path = Path::new("./src/tests-data/xyz/missing_comment.xyz");
        let result = Trajectory::new(path);
        assert!(matches!(result, Err(CError::MissingComment { step: 2, .. })));
    }

    #[test]
    fn bad_atom_count() {
        let path = Path::new("./src/tests-data/xyz/bad_count.xyz");
        let result = Trajectory::new(path);
        assert!(matches!(result, Err(CError::InvalidAtomCount { line, .. }) if line == "three"));
    }

    #[test]
    fn huge_atom_count() {
        let path = Path::new("./src/tests-data/xyz/huge_count.xyz");
        let result = Trajectory::new(path);
        assert!(matches!(
            result,
            Err(CError::InvalidAtomCount { line, .. }) if line == "18446744073709551615"
        ));
    }

    #[test]
    fn blank_line_ends_reading() {
        let path = Path::new("./src/tests-data/xyz/blank_line.xyz");
        let trajectory = Trajectory::new(path).unwrap();
        assert_eq!(trajectory.size, 2);
        assert_eq!(trajectory.frames().len(), 1);
        assert_eq!(trajectory[0][0].symbol, "Ar");
    }

    #[test]
    fn bad_coordinate() {
        let path = Path::new("./src/tests-data/xyz/bad_atom.xyz");
        let result = Trajectory::new(path);
        assert!(matches!(result, Err(CError::ParseFloatError(_))));
    }

    #[test]
    #[should_panic(expected = "MissingToken")]
    fn missing_coordinate() {
        let path = Path::new("./src/tests-data/xyz/missing_token.xyz");
        Trajectory::new(path).unwrap();
    }

    #[test]
    fn empty_file() {
        let file = Builder::new().suffix(".xyz").tempfile().unwrap();
        let result = Trajectory::new(file.path());
        assert!(matches!(result, Err(CError::InvalidAtomCount { .. })));
    }

    #[test]
    fn write_and_read_back() {
        let path = Path::new("./src/tests-data/xyz/water.xyz");
        let trajectory = Trajectory::new(path).unwrap();

        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("water-copy.xyz");
        trajectory.save(&output).unwrap();

        let text = std::fs::read_to_string(&output).unwrap();
        let mut lines = text.lines();
        assert_eq!(lines.next(), Some("3"));
        assert_eq!(lines.next(), Some(PROVENANCE));
        assert_eq!(lines.next(), Some("O 0.0 0.0 0.11779"));
        assert!(text.ends_with('\n'));

        let copy = Trajectory::with_format(&output, TextFormat::XYZ).unwrap();
        assert_eq!(copy.size, trajectory.size);
        assert_eq!(copy.molecule_size().unwrap(), 3);
        for (original, written) in trajectory.frames().iter().zip(copy.frames()) {
            assert_eq!(written.comment, PROVENANCE);
            assert_eq!(written.atoms(), original.atoms());
        }
    }
}
