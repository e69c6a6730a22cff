//! Range math and worker planning.
//!
//! Splits a resource of known length into one contiguous byte range per
//! worker and computes the HTTP Range header bounds for each.

mod range;
mod workers;

pub use range::{plan_boundaries, plan_ranges, ByteRange};
pub use workers::WorkerCount;
