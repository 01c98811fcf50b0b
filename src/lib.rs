//! Workspace umbrella crate.
//!
//! Exposes the feature flags that map to the individual workspace crates
//! (`core-service`, `core-media`). Host applications can depend on
//! `clinic-media-workspace` and enable `desktop-shims` or `wasm` without wiring
//! each crate individually.

#[cfg(any(feature = "desktop-shims", feature = "wasm"))]
pub use core_media as media;

#[cfg(any(feature = "desktop-shims", feature = "wasm"))]
pub use core_service::{CoreDependencies, CoreError, CoreService};

#[cfg(all(feature = "wasm", target_arch = "wasm32"))]
pub use core_service::{bootstrap_wasm, WasmBridgeConfig};
