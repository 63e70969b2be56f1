pub mod preview;
pub mod tasks;
