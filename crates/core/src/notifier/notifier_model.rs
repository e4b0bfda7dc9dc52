//! Alert model.

use serde::{Deserialize, Serialize};

use crate::constants::{ALERT_CHANNEL_ID, ALERT_TITLE};
use crate::sms::SmsEvent;

/// A user-visible alert for an accepted event.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Alert {
    pub channel_id: String,
    pub title: String,
    pub body: String,
}

impl Alert {
    /// Builds the expense alert for an event. The alert text is the SMS body.
    pub fn for_event(event: &SmsEvent) -> Self {
        Self {
            channel_id: ALERT_CHANNEL_ID.to_string(),
            title: ALERT_TITLE.to_string(),
            body: event.body().to_string(),
        }
    }
}
