//! Work partitioning and multi-threaded dispatch.
//!
//! Splits the coordinate space into contiguous, disjoint chunks, runs one
//! worker thread per chunk, and joins them under a polled completion
//! protocol.

mod dispatch;
mod partition;
mod worker;

pub use dispatch::{generate_grid, generate_with_workers};
pub use partition::{partition, worker_count, WorkChunk};
pub use worker::{sample_chunk, WorkerHandle, WorkerState};
