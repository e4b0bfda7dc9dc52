pub mod api;
pub mod config;
pub mod error;
pub mod events;
pub mod notifier;
mod main_lib;

pub use main_lib::{build_state, init_tracing, AppState};
