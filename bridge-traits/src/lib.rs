//! # Host Bridge Traits
//!
//! Platform abstraction traits that must be implemented by each host platform.
//!
//! ## Overview
//!
//! This crate defines the contract between the media core and platform-specific
//! implementations. Each trait represents a capability that the core requires but
//! that must be implemented differently per platform (desktop, web).
//!
//! ## Traits
//!
//! - [`KeyValueStore`](storage::KeyValueStore) - Synchronous persistent string slots
//! - [`HttpClient`](http::HttpClient) - Async `HEAD` requests with timeouts
//! - [`Clock`](time::Clock) - Time source for deterministic testing
//!
//! ## Platform Requirements
//!
//! | Platform | Implementation Crate |
//! |----------|---------------------|
//! | Desktop  | `bridge-desktop`    |
//! | Web      | `bridge-wasm`       |
//!
//! In-process doubles ([`MemoryStore`](storage::MemoryStore),
//! [`ManualClock`](time::ManualClock)) live here so every crate can use them
//! in tests.
//!
//! ## Fail-Fast Strategy
//!
//! The core should fail fast with descriptive errors when a required capability is missing:
//!
//! ```ignore
//! use core_runtime::Error;
//!
//! let storage = config.storage
//!     .ok_or_else(|| Error::CapabilityMissing {
//!         capability: "KeyValueStore".to_string(),
//!         message: "No storage implementation provided. \
//!                  Desktop: ensure default feature is enabled. \
//!                  Web: inject WasmLocalStore.".to_string()
//!     })?;
//! ```
//!
//! ## Error Handling
//!
//! All bridge traits use the [`BridgeError`](error::BridgeError) type. Platform
//! implementations should convert platform-specific errors to `BridgeError` and
//! include context such as the key or URL involved.
//!
//! ## Thread Safety
//!
//! Bridge traits carry the [`PlatformSendSync`](platform::PlatformSendSync)
//! supertrait: `Send + Sync` on native targets, unbounded on `wasm32`.

pub mod error;
pub mod http;
pub mod platform;
pub mod storage;
pub mod time;

pub use error::BridgeError;

// Re-export commonly used types
pub use http::{HttpClient, HttpRequest, HttpResponse};
pub use platform::PlatformSendSync;
pub use storage::{KeyValueStore, MemoryStore};
pub use time::{Clock, ManualClock, SystemClock};
