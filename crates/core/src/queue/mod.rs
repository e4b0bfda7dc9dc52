//! Durable pending queue - trait, blob codec, and in-memory implementation.
//!
//! The SQLite implementation lives in the `storage-sqlite` crate.

pub mod codec;
mod memory;
mod queue_traits;

pub use codec::{append_to_blob, decode_queue, encode_queue};
pub use memory::InMemoryPendingQueue;
pub use queue_traits::PendingQueueRepositoryTrait;
