//! Thread-safety bounds that follow the target platform.
//!
//! Native hosts share bridges across Tokio worker threads, so every bridge
//! must be `Send + Sync`. Browser builds run on a single thread and wrap
//! `web_sys` handles (`Storage`, `Window`) that are neither, so the bound has
//! to disappear there. Bridge traits use [`PlatformSendSync`] as their
//! supertrait instead of spelling out `Send + Sync`.

/// `Send + Sync` on native targets, no bound on `wasm32`.
#[cfg(not(target_arch = "wasm32"))]
pub trait PlatformSendSync: Send + Sync {}

#[cfg(not(target_arch = "wasm32"))]
impl<T> PlatformSendSync for T where T: Send + Sync + ?Sized {}

#[cfg(target_arch = "wasm32")]
pub trait PlatformSendSync {}

#[cfg(target_arch = "wasm32")]
impl<T: ?Sized> PlatformSendSync for T {}
