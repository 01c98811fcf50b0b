//! Group joins.
//!
//! [`join_all`] waits until each future in the group has produced its output
//! and never short-circuits when one of them yields an error. Errors are plain
//! values in the output vector, so callers decide how to account for them.
//!
//! The futures are polled concurrently inside the calling task. Nothing is
//! spawned, which keeps the helper usable on WASM where spawned tasks cannot
//! be awaited synchronously.

pub use futures::future::join_all;
