//! # Core Runtime Module
//!
//! Provides foundational runtime infrastructure for the clinic media core:
//! - Logging and tracing infrastructure
//! - Configuration management and bridge defaults
//!
//! ## Overview
//!
//! This crate contains the runtime utilities that other modules depend on.
//! It establishes the logging conventions and the fail-fast bridge
//! configuration used throughout the system.

pub mod config;
pub mod error;
pub mod logging;

pub use config::{CoreConfig, CoreConfigBuilder};
pub use error::{Error, Result};
