use async_trait::async_trait;
use binder_core::BinderResult;
use binder_domain::FileHandle;

/// How a file's bytes should be decoded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReadMode {
    /// `data:<mime>;base64,<payload>`, for previews.
    DataUrl,
    /// UTF-8 text, for imports.
    Text,
}

/// Decoded file content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileContent {
    DataUrl(String),
    Text(String),
}

impl FileContent {
    pub fn into_string(self) -> String {
        match self {
            FileContent::DataUrl(s) | FileContent::Text(s) => s,
        }
    }
}

/// Trait for decoding a file handle into usable content.
///
/// Every call is an independent read: implementations keep no per-read
/// state, so overlapping calls on one loader are safe.
#[async_trait]
pub trait ContentLoader: Send + Sync {
    async fn load(&self, file: &FileHandle, mode: ReadMode) -> BinderResult<FileContent>;
}
