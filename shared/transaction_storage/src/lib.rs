//! Durable pending-transaction queue shared by the notification listener and
//! the transaction reader.
//!
//! The queue lives in a single key-value slot as a JSON array. Producers append
//! one candidate at a time; the consumer drains the whole batch at once.

#![deny(
    clippy::all,
    clippy::pedantic,
    clippy::nursery,
    missing_docs,
    dead_code
)]

mod candidate;
mod error;
/// Key-value slot backends
pub mod key_value;
/// Pending queue operations
pub mod pending_queue;

pub use candidate::TransactionCandidate;
pub use error::{StorageError, StorageResult};
pub use key_value::{FileKeyValueStore, KeyValueStore, MemoryKeyValueStore};
pub use pending_queue::{PendingQueueConfig, PendingQueueStorage};
