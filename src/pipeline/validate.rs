use anyhow::{bail, Result};
use std::path::Path;

/// The source video must exist before anything is spawned or written.
pub fn check_input_exists(path: &Path) -> Result<()> {
    if !path.exists() {
        bail!("Video {} does not exist", path.display());
    }
    Ok(())
}

/// The destination must not exist; an earlier run's output is never clobbered.
pub fn check_output_absent(path: &Path) -> Result<()> {
    if path.exists() {
        bail!("Output file {} already exists", path.display());
    }
    Ok(())
}
