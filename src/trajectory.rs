use crate::error::CError;
use crate::format::FileFormat;
use crate::format::Format;
use crate::format::TextFormat;
use crate::frame::Frame;
use log::{debug, warn};
use std::fmt;
use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::ops::Index;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// A whole trajectory file, read eagerly into memory.
#[derive(Debug, Clone)]
pub struct Trajectory {
    /// Number of steps derived from the line count of the file.
    pub size: usize,

    frames: Vec<Frame>,
    // 0 when the frames do not share a single atom count
    molecule_size: usize,
    path: PathBuf,
}

impl Trajectory {
    /// Reads a trajectory, guessing the format from the file extension.
    pub fn new(path: impl AsRef<Path>) -> Result<Self, CError> {
        Self::with_format(path, TextFormat::Guess)
    }

    /// Reads a trajectory with an explicitly provided format.
    pub fn with_format(path: impl AsRef<Path>, fmt: TextFormat) -> Result<Self, CError> {
        let path = path.as_ref();
        let mut strategy = Format::new_from_format(fmt, path)?;
        let size = strategy.count_steps(path)?;

        let file = File::open(path)?;
        let mut reader = BufReader::new(file);
        let mut frames = Vec::with_capacity(size);
        while let Some(frame) = strategy.read(&mut reader)? {
            frames.push(frame);
        }
        if frames.len() != size {
            warn!(
                "{}: read {} of {} steps, stopped at a blank line",
                path.display(),
                frames.len(),
                size
            );
        }

        let molecule_size = uniform_size(&frames);
        if molecule_size == 0 && !frames.is_empty() {
            warn!("{}: molecule size differs between frames", path.display());
        }
        debug!(
            "read {} frames from {} as {}",
            frames.len(),
            path.display(),
            strategy.name()
        );

        Ok(Trajectory {
            size,
            frames,
            molecule_size,
            path: path.to_path_buf(),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn frames(&self) -> &[Frame] {
        &self.frames
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Frame> {
        self.frames.iter()
    }

    pub fn is_consistent(&self) -> bool {
        self.molecule_size != 0
    }

    /// The atom count shared by every frame.
    ///
    /// # Errors
    ///
    /// Fails when the frames disagree on their size.
    pub fn molecule_size(&self) -> Result<usize, CError> {
        if self.is_consistent() {
            Ok(self.molecule_size)
        } else {
            Err(CError::InconsistentMoleculeSize(self.path.clone()))
        }
    }

    /// Fails when fewer frames were read than the line count announced.
    fn check_complete(&self) -> Result<(), CError> {
        if self.frames.len() == self.size {
            Ok(())
        } else {
            Err(CError::IncompleteTrajectory {
                path: self.path.clone(),
                size: self.size,
                frames: self.frames.len(),
            })
        }
    }

    /// Builds a new trajectory where the center of mass of each step in `com`
    /// is appended as the last atom of the frame with the same index.
    ///
    /// Neither `self` nor `com` is modified.
    ///
    /// # Errors
    ///
    /// Fails when the two trajectories do not have the same number of steps,
    /// when either one stopped reading before its last step, when `self` is
    /// inconsistent, or when `com` does not hold exactly one atom per step.
    pub fn merge(&self, com: &Trajectory) -> Result<Trajectory, CError> {
        if self.size != com.size {
            return Err(CError::StepMismatch {
                xyz: self.size,
                com: com.size,
            });
        }
        self.check_complete()?;
        com.check_complete()?;
        let molecule_size = self.molecule_size()?;
        let com_size = com.molecule_size()?;
        if com_size != 1 {
            return Err(CError::UnexpectedComSize(com_size));
        }

        let frames: Vec<Frame> = self
            .frames
            .iter()
            .zip(&com.frames)
            .map(|(frame, center)| frame.with_atom(center[0].clone()))
            .collect();

        Ok(Trajectory {
            size: self.size,
            frames,
            molecule_size: molecule_size + com_size,
            path: self.path.clone(),
        })
    }

    /// Writes the trajectory as XYZ.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), CError> {
        self.save_with_format(path, TextFormat::XYZ)
    }

    /// Writes the trajectory to `path` in the given format.
    ///
    /// The data goes to a temporary file next to `path` which replaces `path`
    /// once everything is written, so a failure never leaves a partial file.
    ///
    /// Formats write the atom count of each frame; every frame is checked
    /// against the uniform molecule size first, so that count is always the
    /// trajectory's.
    ///
    /// # Errors
    ///
    /// Fails on inconsistent trajectories and on I/O errors.
    pub fn save_with_format(&self, path: impl AsRef<Path>, fmt: TextFormat) -> Result<(), CError> {
        let path = path.as_ref();
        let molecule_size = self.molecule_size()?;
        if self.frames.iter().any(|frame| frame.size() != molecule_size) {
            return Err(CError::InconsistentMoleculeSize(self.path.clone()));
        }
        let mut strategy = Format::new_from_format(fmt, path)?;

        let dir = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        let temporary = NamedTempFile::new_in(dir)?;
        let mut writer = BufWriter::new(temporary.reopen()?);
        for frame in &self.frames {
            strategy.write_next(&mut writer, frame)?;
        }
        strategy.finalize(&mut writer)?;
        drop(writer);

        temporary
            .persist(path)
            .map_err(|e| CError::IoError(e.error))?;
        debug!(
            "wrote {} frames of {} atoms to {}",
            self.frames.len(),
            molecule_size,
            path.display()
        );
        Ok(())
    }
}

/// Atom count shared by all `frames`, or 0 if there is none.
fn uniform_size(frames: &[Frame]) -> usize {
    let Some(first) = frames.first() else {
        return 0;
    };
    let size = first.size();
    if frames.iter().all(|frame| frame.size() == size) {
        size
    } else {
        0
    }
}

impl Index<usize> for Trajectory {
    type Output = Frame;

    fn index(&self, index: usize) -> &Self::Output {
        &self.frames[index]
    }
}

impl<'a> IntoIterator for &'a Trajectory {
    type Item = &'a Frame;
    type IntoIter = std::slice::Iter<'a, Frame>;

    fn into_iter(self) -> Self::IntoIter {
        self.frames.iter()
    }
}

impl fmt::Display for Trajectory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "File: {}, steps: {}, molecule size: {}",
            self.path.display(),
            self.size,
            self.molecule_size
        )
    }
}
