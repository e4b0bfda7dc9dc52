//! Delivery bridge - live push plus durable pull.

#[allow(clippy::module_inception)]
mod bridge;
mod consumer;

pub use bridge::{BridgeState, DeliveryBridge};
pub use consumer::LiveSubscription;
