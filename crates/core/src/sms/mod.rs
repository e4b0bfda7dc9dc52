//! SMS module - message models and the transaction classifier.

mod classifier;
mod sms_model;

pub use classifier::{classify_sms, is_expense_sms, Classification, Rejection, LINK_INDICATORS};
pub use sms_model::{LiveSms, RawSms, SmsEvent};
