//! SQLite storage implementation for the pending SMS queue.

mod repository;

pub use repository::SqlitePendingQueueRepository;

// Re-export trait from core for convenience
pub use spendsync_core::queue::PendingQueueRepositoryTrait;
