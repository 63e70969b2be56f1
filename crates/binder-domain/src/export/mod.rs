//! Task list import/export.
//!
//! Exports are a compact JSON array of task records written to a file named
//! `mytask<epoch-ms>.json`; imports accept only files carrying that prefix.

pub mod exporter;
pub mod importer;
pub mod models;

pub use exporter::TaskExporter;
pub use importer::TaskImporter;
pub use models::{ExportArtifact, ImportRejection, TaskRecord};

/// Literal, case-sensitive prefix of every exported file name.
pub const EXPORT_PREFIX: &str = "mytask";
