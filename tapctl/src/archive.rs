use std::path::Path;

use anyhow::{Context, Result};
use flate2::{write::GzEncoder, Compression};

/// Packs the content of `dir` into an in-memory `tar.gz`
pub fn pack_dir(dir: &Path) -> Result<Vec<u8>> {
    let encoder = GzEncoder::new(Vec::new(), Compression::default());
    let mut builder = tar::Builder::new(encoder);

    builder
        .append_dir_all(".", dir)
        .with_context(|| format!("Failed to archive {}", dir.display()))?;

    let blob = builder.into_inner()?.finish()?;
    log::debug!("Packed {} into {} bytes", dir.display(), blob.len());
    Ok(blob)
}
