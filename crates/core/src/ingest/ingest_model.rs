use serde::{Deserialize, Serialize};

/// Outcome of processing one batch from the message source.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IngestReport {
    /// Items in the batch
    pub received: usize,
    /// Items classified as transactions and handed to the bridge
    pub accepted: usize,
    /// Items the classifier rejected
    pub rejected: usize,
    /// Items that could not be decoded or persisted
    pub failed: usize,
}
