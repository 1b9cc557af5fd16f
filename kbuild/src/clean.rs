use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CleanOutcome {
    /// The output directory was not there; nothing was touched.
    Missing,
    /// `removed` entries were deleted from the output directory.
    Cleaned { removed: usize },
}

/// Empty `output_dir` (keeping the directory itself) and delete `target`.
pub fn clean(output_dir: &Path, target: &Path) -> Result<CleanOutcome> {
    println!("🧹 Cleaning...");
    if !output_dir.is_dir() {
        println!("Directory '{}' does not exist.", output_dir.display());
        return Ok(CleanOutcome::Missing);
    }

    let mut removed = 0;
    for entry in
        fs::read_dir(output_dir).with_context(|| format!("Reading {}", output_dir.display()))?
    {
        let entry = entry?;
        let path = entry.path();
        // file_type() does not follow symlinks, so a link to a directory is
        // unlinked rather than emptied.
        if entry.file_type()?.is_dir() {
            fs::remove_dir_all(&path)
                .with_context(|| format!("Removing directory {}", path.display()))?;
        } else {
            fs::remove_file(&path).with_context(|| format!("Removing {}", path.display()))?;
        }
        removed += 1;
    }
    println!("Directory '{}' has been cleaned.", output_dir.display());

    if target.exists() {
        fs::remove_file(target).with_context(|| format!("Removing {}", target.display()))?;
        removed += 1;
    }

    Ok(CleanOutcome::Cleaned { removed })
}
