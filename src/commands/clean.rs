//! Remove generated output

use anyhow::Result;
use std::fs;

use crate::Quill;

/// Delete the public directory if it exists.
pub fn run(quill: &Quill) -> Result<()> {
    if quill.public_dir.exists() {
        fs::remove_dir_all(&quill.public_dir)?;
        tracing::info!("deleted {}", quill.public_dir.display());
    }
    Ok(())
}
