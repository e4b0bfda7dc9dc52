/// Storage key holding the pending SMS queue blob
pub const PENDING_SMS_KEY: &str = "flutter.pending_sms";

/// Serialized form of an empty queue
pub const EMPTY_QUEUE_JSON: &str = "[]";

/// Pull-API method that drains the pending queue
pub const GET_PENDING_SMS_METHOD: &str = "getPendingSms";

/// Notification channel used for expense alerts
pub const ALERT_CHANNEL_ID: &str = "expense_tracker_sms";

/// Human-readable name of the alert channel
pub const ALERT_CHANNEL_NAME: &str = "Expense Alerts";

/// Title shown on every expense alert
pub const ALERT_TITLE: &str = "New Expense Detected";
