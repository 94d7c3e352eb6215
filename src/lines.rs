use crate::error::CError;
use memmap2::Mmap;
use std::fs::File;
use std::path::Path;

/// Counts the lines of the file at `path` without reading it into memory.
///
/// A last line that is not terminated by `\n` still counts as a line.
pub fn count_lines(path: &Path) -> Result<usize, CError> {
    let file = File::open(path)?;
    // mapping an empty file fails on some platforms
    if file.metadata()?.len() == 0 {
        return Ok(0);
    }

    // SAFETY: the map is read-only and dropped before returning. Truncating
    // the file from another process while scanning is not supported.
    let mmap = unsafe { Mmap::map(&file)? };
    let newlines = mmap.iter().filter(|&&byte| byte == b'\n').count();
    let unterminated = mmap.last().is_some_and(|&byte| byte != b'\n');
    Ok(newlines + usize::from(unterminated))
}
