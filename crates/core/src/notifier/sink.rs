//! Notifier trait and implementations.

use std::sync::{Arc, Mutex};

use super::Alert;
use crate::sms::SmsEvent;

/// Trait for surfacing an accepted event to the user.
///
/// # Design Rules
///
/// - `notify()` must be fast and non-blocking
/// - `notify()` never fails: implementations catch and log their own errors
/// - Alerts are best-effort and never gate persistence or delivery
pub trait SmsNotifier: Send + Sync {
    fn notify(&self, event: &SmsEvent);
}

/// No-op implementation for hosts without an alert surface.
#[derive(Clone, Default)]
pub struct NoOpSmsNotifier;

impl SmsNotifier for NoOpSmsNotifier {
    fn notify(&self, _event: &SmsEvent) {}
}

/// Mock notifier for testing - collects the alerts it would have shown.
#[derive(Clone, Default)]
pub struct MockSmsNotifier {
    alerts: Arc<Mutex<Vec<Alert>>>,
}

impl MockSmsNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns all collected alerts.
    pub fn alerts(&self) -> Vec<Alert> {
        self.alerts.lock().map(|a| a.clone()).unwrap_or_default()
    }

    /// Returns the number of collected alerts.
    pub fn len(&self) -> usize {
        self.alerts.lock().map(|a| a.len()).unwrap_or_default()
    }

    /// Returns true if no alerts have been collected.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl SmsNotifier for MockSmsNotifier {
    fn notify(&self, event: &SmsEvent) {
        if let Ok(mut alerts) = self.alerts.lock() {
            alerts.push(Alert::for_event(event));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::{ALERT_CHANNEL_ID, ALERT_TITLE};

    #[test]
    fn test_noop_notifier_does_not_panic() {
        let notifier = NoOpSmsNotifier;
        notifier.notify(&SmsEvent::new(None, "X1234".to_string(), 0));
    }

    #[test]
    fn test_mock_notifier_collects_alerts() {
        let notifier = MockSmsNotifier::new();
        assert!(notifier.is_empty());

        notifier.notify(&SmsEvent::new(
            Some("JM-AXISBK".to_string()),
            "Rs 120 debited from a/c XX3210".to_string(),
            3,
        ));

        let alerts = notifier.alerts();
        assert_eq!(alerts.len(), 1);
        assert_eq!(alerts[0].channel_id, ALERT_CHANNEL_ID);
        assert_eq!(alerts[0].title, ALERT_TITLE);
        assert_eq!(alerts[0].body, "Rs 120 debited from a/c XX3210");
    }
}
