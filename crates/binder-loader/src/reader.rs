use crate::traits::{ContentLoader, FileContent, ReadMode};
use crate::writer::AtomicWriter;
use async_trait::async_trait;
use base64::{engine::general_purpose::STANDARD as BASE64_STANDARD, Engine};
use binder_core::{BinderError, BinderResult};
use binder_domain::{FileHandle, FileSource};

const FALLBACK_MIME: &str = "application/octet-stream";
const UTF8_BOM: &str = "\u{feff}";

/// Reads file handles from disk or memory on the tokio runtime.
#[derive(Debug, Clone, Default)]
pub struct FileReader;

impl FileReader {
    pub fn new() -> Self {
        Self
    }

    async fn read_bytes(file: &FileHandle) -> BinderResult<Vec<u8>> {
        match &file.source {
            FileSource::Memory(bytes) => Ok(bytes.clone()),
            FileSource::Path(path) => {
                AtomicWriter::read_all(path)
                    .await
                    .map_err(|e| BinderError::Read {
                        name: file.name.clone(),
                        reason: e.to_string(),
                    })
            }
        }
    }

    pub fn encode_data_url(mime_type: &str, bytes: &[u8]) -> String {
        let mime = if mime_type.is_empty() {
            FALLBACK_MIME
        } else {
            mime_type
        };
        format!("data:{};base64,{}", mime, BASE64_STANDARD.encode(bytes))
    }

    pub fn decode_text(name: &str, bytes: Vec<u8>) -> BinderResult<String> {
        let text = String::from_utf8(bytes).map_err(|e| BinderError::Read {
            name: name.to_string(),
            reason: format!("not valid UTF-8 text: {}", e),
        })?;
        Ok(match text.strip_prefix(UTF8_BOM) {
            Some(stripped) => stripped.to_string(),
            None => text,
        })
    }
}

#[async_trait]
impl ContentLoader for FileReader {
    async fn load(&self, file: &FileHandle, mode: ReadMode) -> BinderResult<FileContent> {
        let bytes = Self::read_bytes(file).await?;
        tracing::debug!("Read {} bytes of {} as {:?}", bytes.len(), file.name, mode);
        match mode {
            ReadMode::DataUrl => Ok(FileContent::DataUrl(Self::encode_data_url(
                &file.mime_type,
                &bytes,
            ))),
            ReadMode::Text => Ok(FileContent::Text(Self::decode_text(&file.name, bytes)?)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[tokio::test]
    async fn test_data_url_from_memory() {
        let file = FileHandle::in_memory("a.jpg", "image/jpeg", b"abc".to_vec());
        let content = FileReader::new().load(&file, ReadMode::DataUrl).await.unwrap();
        assert_eq!(
            content,
            FileContent::DataUrl("data:image/jpeg;base64,YWJj".to_string())
        );
    }

    #[tokio::test]
    async fn test_data_url_without_mime_uses_fallback() {
        let file = FileHandle::in_memory("blob", "", vec![0xff]);
        let content = FileReader::new().load(&file, ReadMode::DataUrl).await.unwrap();
        assert_eq!(content.into_string(), "data:application/octet-stream;base64,/w==");
    }

    #[tokio::test]
    async fn test_text_from_disk() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("mytask1.json");
        std::fs::write(&path, "\u{feff}[]").unwrap();

        let file = FileHandle::from_path(&path).unwrap();
        let content = FileReader::new().load(&file, ReadMode::Text).await.unwrap();
        assert_eq!(content, FileContent::Text("[]".to_string()));
    }

    #[tokio::test]
    async fn test_invalid_utf8_is_read_error() {
        let file = FileHandle::in_memory("mytask1.json", "application/json", vec![0xc3, 0x28]);
        let err = FileReader::new().load(&file, ReadMode::Text).await.unwrap_err();
        assert!(matches!(err, BinderError::Read { ref name, .. } if name == "mytask1.json"));
    }

    #[tokio::test]
    async fn test_vanished_file_is_read_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("gone.jpg");
        std::fs::write(&path, b"x").unwrap();
        let file = FileHandle::from_path(&path).unwrap();
        std::fs::remove_file(&path).unwrap();

        let err = FileReader::new().load(&file, ReadMode::DataUrl).await.unwrap_err();
        assert!(matches!(err, BinderError::Read { .. }));
    }
}
