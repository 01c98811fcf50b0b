//! # Desktop Bridge Implementations
//!
//! Default implementations of bridge traits for desktop platforms
//! (macOS, Windows, Linux).
//!
//! ## Overview
//!
//! - `HttpClient` using `reqwest`
//! - `KeyValueStore` using one file per slot under the platform data directory
//!
//! The clock comes from `bridge_traits::SystemClock`.
//!
//! ## Usage
//!
//! ```ignore
//! use bridge_desktop::{FileKeyValueStore, ReqwestHttpClient};
//! use bridge_traits::{HttpClient, KeyValueStore};
//!
//! #[tokio::main]
//! async fn main() {
//!     let http_client = ReqwestHttpClient::new();
//!     let storage = FileKeyValueStore::new();
//!
//!     // Use in core configuration
//! }
//! ```

mod http;
mod kv_store;

pub use http::ReqwestHttpClient;
pub use kv_store::FileKeyValueStore;
