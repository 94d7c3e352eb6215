use std::path::PathBuf;
use thiserror::Error;

/// Coarse classification of a [`CError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Opening, reading or writing a file failed.
    Io,
    /// A file is malformed or truncated.
    Format,
    /// The inputs are well formed but do not fit together.
    Validation,
}

#[derive(Error, Debug)]
pub enum CError {
    #[error("Unsupported file format: `{0}`")]
    UnsupportedFileFormat(String),
    #[error("{0}")]
    IoError(#[from] std::io::Error),
    #[error("{format} format: invalid atom count line `{line}`")]
    InvalidAtomCount { format: String, line: String },
    #[error("{format} format: timestep calculation not integral ({lines} lines for molecule size {molecule_size})")]
    NonIntegralSteps {
        format: String,
        lines: usize,
        molecule_size: usize,
    },
    #[error("{format} format: truncated trajectory, missing comment line at step {step}")]
    MissingComment { format: String, step: usize },
    #[error("{format} format: truncated trajectory, not enough lines at step {step} (expected {expected}, got {got})")]
    UnexpectedEof {
        format: String,
        step: usize,
        expected: usize,
        got: usize,
    },
    #[error("Failed to parse float: {0}")]
    ParseFloatError(#[from] std::num::ParseFloatError),
    #[error("Missing token")]
    MissingToken,
    #[error("Unexpected token: `{0}`")]
    UnexpectedToken(String),
    #[error("XYZ and COM files have different timestep numbers ({xyz} and {com})")]
    StepMismatch { xyz: usize, com: usize },
    #[error("molecule size is not uniform across the frames of {0:?}")]
    InconsistentMoleculeSize(PathBuf),
    #[error("expected one COM atom per step, got {0}")]
    UnexpectedComSize(usize),
    #[error("{path:?} holds {frames} frames but {size} steps, reading stopped at a blank line")]
    IncompleteTrajectory {
        path: PathBuf,
        size: usize,
        frames: usize,
    },
    #[error("{stage} {path:?}: {source}")]
    Context {
        stage: &'static str,
        path: PathBuf,
        #[source]
        source: Box<CError>,
    },
}

impl CError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            CError::IoError(_) => ErrorKind::Io,
            CError::StepMismatch { .. }
            | CError::InconsistentMoleculeSize(_)
            | CError::UnexpectedComSize(_)
            | CError::IncompleteTrajectory { .. } => ErrorKind::Validation,
            CError::Context { source, .. } => source.kind(),
            _ => ErrorKind::Format,
        }
    }

    /// Wraps the error with the pipeline stage and the file it concerns.
    pub fn context(self, stage: &'static str, path: impl Into<PathBuf>) -> Self {
        CError::Context {
            stage,
            path: path.into(),
            source: Box::new(self),
        }
    }
}
