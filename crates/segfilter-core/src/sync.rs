//! Synchronization primitives with loom support for concurrency testing.
//!
//! The filter sequence is the only state shared between filters, so only
//! `Arc` and the atomics are switched between std and loom here.
//!
//! # Testing with Loom
//!
//! ```bash
//! RUSTFLAGS="--cfg loom" cargo test --features loom --test loom_tests
//! ```

// ============================================================================
// Arc
// ============================================================================

#[cfg(loom)]
pub use loom::sync::Arc;

#[cfg(not(loom))]
pub use std::sync::Arc;

// ============================================================================
// Atomics
// ============================================================================

#[cfg(loom)]
pub use loom::sync::atomic::{AtomicU64, Ordering};

#[cfg(not(loom))]
pub use std::sync::atomic::{AtomicU64, Ordering};
