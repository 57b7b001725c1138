//! Embeddable batch driver for statreset.
//!
//! Provides a clap-free entry point that a cron wrapper or another host process
//! can link directly.
//!
//! # Port traits
//!
//! Record access is abstracted behind [`RecordStore`](ports::RecordStore). The
//! [`adapters`] module provides a filesystem store and an in-memory store for tests.
//!
//! # Entry points
//!
//! - [`run_batch`](pipeline::run_batch) - reset every record in a store
//! - [`run_fs_batch`](pipeline::run_fs_batch) - same, over a users directory on disk

pub mod adapters;
pub mod pipeline;
pub mod ports;
pub mod settings;

pub use pipeline::{BatchError, BatchOutcome, run_batch, run_fs_batch};
pub use settings::BatchSettings;

// Re-exported so embedders do not need the domain crate to resolve a selector.
pub use statreset_domain::{Resolution, resolve_selector};
