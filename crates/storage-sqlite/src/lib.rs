//! SQLite storage implementation for SpendSync.
//!
//! This crate provides all database-related functionality using Diesel ORM with SQLite.
//! It implements the queue trait defined in `spendsync-core` and contains:
//! - Database connection pooling and management
//! - Diesel migrations
//! - The single-writer actor that serializes every mutation
//! - The key/value table and the durable pending SMS queue stored in it
//!
//! # Architecture
//!
//! This crate is the only place in the application where Diesel dependencies exist.
//!
//! ```text
//!        core (domain)
//!              │
//!              ▼
//!   storage-sqlite (this crate)
//!              │
//!              ▼
//!          SQLite DB
//! ```

pub mod db;
pub mod errors;
pub mod kv;
pub mod queue;
pub mod schema;

// Re-export database utilities
pub use db::{create_pool, get_connection, get_db_path, init, run_migrations, DbConnection, DbPool, WriteHandle};

// Re-export storage errors and conversion helpers
pub use errors::{IntoCore, StorageError};

pub use queue::SqlitePendingQueueRepository;

// Re-export from spendsync-core for convenience
pub use spendsync_core::errors::{DatabaseError, Error, Result};
