//! Notifier module.
//!
//! Provides the alert model and the notifier trait. Runtime adapters
//! implement the trait to surface alerts on their platform.

mod notifier_model;
mod sink;

pub use notifier_model::*;
pub use sink::*;
