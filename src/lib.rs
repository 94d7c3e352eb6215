pub mod atom;
pub mod error;
pub mod format;
pub mod formats;
pub mod frame;
pub mod lines;
pub mod trajectory;

use error::CError;
use format::TextFormat;
use log::info;
use std::path::Path;
use trajectory::Trajectory;

/// Reads the XYZ trajectory at `xyz` and the center-of-mass list at `com`,
/// appends the center of mass of every step to the matching frame and writes
/// the result to `output` as XYZ.
///
/// Nothing is written unless every step succeeds. Errors name the stage and
/// the file they come from.
pub fn merge_files(xyz: &Path, com: &Path, output: &Path) -> Result<(), CError> {
    info!("Loading files.");
    let trajectory =
        Trajectory::with_format(xyz, TextFormat::XYZ).map_err(|e| e.context("reading", xyz))?;
    info!("Trajectory -- {trajectory}");
    let centers =
        Trajectory::with_format(com, TextFormat::COM).map_err(|e| e.context("reading", com))?;
    info!("COM -- {centers}");

    info!("Merging files.");
    let merged = trajectory
        .merge(&centers)
        .map_err(|e| e.context("merging", xyz))?;

    info!("Saving file {}.", output.display());
    merged
        .save(output)
        .map_err(|e| e.context("writing", output))?;
    Ok(())
}
