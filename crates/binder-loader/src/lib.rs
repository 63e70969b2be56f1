pub mod reader;
pub mod request;
pub mod traits;
pub mod writer;

pub use reader::FileReader;
pub use request::{load_all, LoadRequest};
pub use traits::{ContentLoader, FileContent, ReadMode};
pub use writer::{AtomicWriter, ExportWriter};
