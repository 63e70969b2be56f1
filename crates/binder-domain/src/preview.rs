use crate::file::FileHandle;

pub const JPEG_MIME: &str = "image/jpeg";

/// Read progress of one selected file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadState {
    Pending,
    Loading,
    Ready,
    Failed(String),
}

/// One file of the preview selection and, once read, its data URL.
#[derive(Debug, Clone, PartialEq)]
pub struct PreviewFile {
    pub file: FileHandle,
    pub state: LoadState,
    pub data_url: Option<String>,
}

impl PreviewFile {
    pub fn new(file: FileHandle) -> Self {
        Self {
            file,
            state: LoadState::Pending,
            data_url: None,
        }
    }

    /// Enter `Loading`. Refused while a read is already in flight, so one
    /// model never has two outstanding reads.
    pub fn begin_loading(&mut self) -> bool {
        if self.state == LoadState::Loading {
            return false;
        }
        self.state = LoadState::Loading;
        self.data_url = None;
        true
    }

    pub fn complete(&mut self, data_url: String) {
        self.state = LoadState::Ready;
        self.data_url = Some(data_url);
    }

    pub fn fail(&mut self, reason: String) {
        self.state = LoadState::Failed(reason);
        self.data_url = None;
    }

    pub fn is_ready(&self) -> bool {
        self.state == LoadState::Ready
    }
}

/// Keep files whose declared MIME type is exactly `image/jpeg`, in order.
pub fn select_jpegs(files: Vec<FileHandle>) -> Vec<FileHandle> {
    files
        .into_iter()
        .filter(|file| file.mime_type == JPEG_MIME)
        .collect()
}
