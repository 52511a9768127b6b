//! Configuration module for page inlining
//!
//! This module provides the `InlineOptions` snapshot and its builder. Options
//! are built once before a run starts and only read afterwards.

// Sub-modules
pub mod builder;
pub mod getters;
pub mod types;

// Re-exports for public API
pub use builder::InlineOptionsBuilder;
pub use types::InlineOptions;
