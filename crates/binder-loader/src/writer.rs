use binder_core::BinderResult;
use binder_domain::ExportArtifact;
use std::path::{Path, PathBuf};
use tokio::fs;

/// Writes whole files through a sibling temp file so readers never observe
/// a half-written export.
pub struct AtomicWriter;

impl AtomicWriter {
    pub async fn write_atomic(path: &Path, data: &[u8]) -> BinderResult<()> {
        // Same directory as the target, so the final rename stays on one filesystem.
        let parent = path.parent().unwrap_or_else(|| Path::new("."));
        let temp_file = tempfile::NamedTempFile::new_in(parent)?;

        fs::write(temp_file.path(), data).await?;
        temp_file.persist(path).map_err(|e| e.error)?;

        tracing::debug!("Atomically wrote {} bytes to {}", data.len(), path.display());
        Ok(())
    }

    pub async fn read_all(path: &Path) -> BinderResult<Vec<u8>> {
        let data = fs::read(path).await?;
        tracing::debug!("Read {} bytes from {}", data.len(), path.display());
        Ok(data)
    }
}

/// Saves export artifacts: the non-browser equivalent of downloading the
/// export link's blob.
pub struct ExportWriter;

impl ExportWriter {
    /// Write `artifact` into `dir` under its own file name.
    pub async fn write(dir: &Path, artifact: &ExportArtifact) -> BinderResult<PathBuf> {
        fs::create_dir_all(dir).await?;
        let path = dir.join(&artifact.file_name);
        AtomicWriter::write_atomic(&path, &artifact.bytes).await?;
        tracing::info!("Exported {} to {}", artifact.file_name, path.display());
        Ok(path)
    }
}
