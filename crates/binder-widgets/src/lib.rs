pub mod alerts;
pub mod clock;
pub mod preview;
pub mod tasks;

pub use alerts::{AlertSink, RecordingAlerts};
pub use clock::{Clock, FixedClock, SystemClock};
pub use preview::{Gallery, PreviewWidget};
pub use tasks::{ImportOutcome, TaskListRenderer, TaskListWidget};
