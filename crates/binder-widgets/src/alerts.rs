//! User-facing alerts.
//!
//! A widget aborts the current action after raising an alert; the sink only
//! decides where the message goes.

use std::cell::RefCell;

pub trait AlertSink {
    fn alert(&self, message: &str);
}

/// Keeps every alert in order.
#[derive(Debug, Default)]
pub struct RecordingAlerts {
    messages: RefCell<Vec<String>>,
}

impl RecordingAlerts {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn messages(&self) -> Vec<String> {
        self.messages.borrow().clone()
    }

    pub fn count(&self) -> usize {
        self.messages.borrow().len()
    }

    pub fn take(&self) -> Vec<String> {
        self.messages.take()
    }
}

impl AlertSink for RecordingAlerts {
    fn alert(&self, message: &str) {
        self.messages.borrow_mut().push(message.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recording_alerts_keep_order() {
        let alerts = RecordingAlerts::new();
        alerts.alert("first");
        alerts.alert("second");
        assert_eq!(alerts.count(), 2);
        assert_eq!(alerts.take(), vec!["first", "second"]);
        assert_eq!(alerts.count(), 0);
    }
}
