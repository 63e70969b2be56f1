pub mod collection;
pub mod events;
pub mod export;
pub mod file;
pub mod model;
pub mod preview;
pub mod render;
pub mod task;

pub use collection::Collection;
pub use events::{CollectionEvent, Observer};
pub use export::{
    ExportArtifact, ImportRejection, TaskExporter, TaskImporter, TaskRecord, EXPORT_PREFIX,
};
pub use file::{FileHandle, FileSource};
pub use model::{Cid, Model};
pub use preview::{select_jpegs, LoadState, PreviewFile, JPEG_MIME};
pub use render::{ExportLink, PreviewCard, TaskItem};
pub use task::{Task, TaskId};
