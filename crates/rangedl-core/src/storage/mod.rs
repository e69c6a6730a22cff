//! Output file lifecycle and the shared write-at-offset sink.
//!
//! One file handle is shared by every range worker. Writes are serialized by
//! a single lock around the positioned-write call; ranges are disjoint, so
//! the lock only protects the handle itself, never overlapping data.

mod builder;
mod writer;

pub use builder::StorageWriterBuilder;
pub use writer::{PositionedWrite, SharedFile};
