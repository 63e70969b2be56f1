use binder_core::BinderResult;
use std::path::{Path, PathBuf};

/// Where a file's bytes live.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileSource {
    Path(PathBuf),
    Memory(Vec<u8>),
}

/// A picked file: name, declared MIME type, size and a way to get its bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileHandle {
    pub name: String,
    pub mime_type: String,
    pub size: u64,
    pub source: FileSource,
}

impl FileHandle {
    pub fn in_memory(name: impl Into<String>, mime_type: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            mime_type: mime_type.into(),
            size: bytes.len() as u64,
            source: FileSource::Memory(bytes),
        }
    }

    /// Describe a file on disk. The declared MIME type comes from the
    /// extension, the size from the file's metadata.
    pub fn from_path(path: impl AsRef<Path>) -> BinderResult<Self> {
        let path = path.as_ref();
        let metadata = std::fs::metadata(path)?;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        Ok(Self {
            mime_type: mime_for_name(&name).to_string(),
            name,
            size: metadata.len(),
            source: FileSource::Path(path.to_path_buf()),
        })
    }
}

pub fn mime_for_name(name: &str) -> &'static str {
    let extension = Path::new(name)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_ascii_lowercase());

    match extension.as_deref() {
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("png") => "image/png",
        Some("gif") => "image/gif",
        Some("webp") => "image/webp",
        Some("json") => "application/json",
        Some("txt") => "text/plain",
        _ => "application/octet-stream",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mime_for_name() {
        assert_eq!(mime_for_name("photo.jpg"), "image/jpeg");
        assert_eq!(mime_for_name("PHOTO.JPEG"), "image/jpeg");
        assert_eq!(mime_for_name("icon.png"), "image/png");
        assert_eq!(mime_for_name("mytask1.json"), "application/json");
        assert_eq!(mime_for_name("README"), "application/octet-stream");
    }

    #[test]
    fn test_in_memory_size_matches_bytes() {
        let file = FileHandle::in_memory("a.txt", "text/plain", b"hello".to_vec());
        assert_eq!(file.size, 5);
    }

    #[test]
    fn test_from_missing_path_is_io_error() {
        let err = FileHandle::from_path("/definitely/not/here.jpg").unwrap_err();
        assert!(matches!(err, binder_core::BinderError::Io(_)));
    }
}
