//! Runtime-agnostic async helpers for the clinic media core.
//!
//! The video cache runs in two very different hosts:
//! - Native platforms (desktop tooling, integration tests): Tokio runtime
//! - WebAssembly: the browser's event loop via wasm-bindgen-futures
//!
//! # Architecture
//!
//! Conditional compilation (`#[cfg]`) selects the platform implementation while
//! the API surface stays identical. `core-*` crates depend on this crate instead
//! of depending on tokio directly.
//!
//! # Modules
//!
//! - `time`: sleep, timeout, wall-clock helpers
//! - `join`: settle-all joins over groups of futures
//!
//! # Examples
//!
//! ```rust
//! use core_async::join::join_all;
//! use core_async::time::{sleep, Duration};
//!
//! async fn example() -> Vec<u32> {
//!     join_all((0..3).map(|i| async move {
//!         sleep(Duration::from_millis(5)).await;
//!         i
//!     }))
//!     .await
//! }
//! ```

pub mod join;
pub mod time;

pub use join::join_all;
pub use time::{sleep, timeout, Duration};
