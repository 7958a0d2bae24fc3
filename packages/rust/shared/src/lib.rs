//! Shared types, error model, and configuration for anchorprobe.
//!
//! This crate is the foundation depended on by all other anchorprobe crates.
//! It provides:
//! - [`AnchorProbeError`] — the unified error type
//! - Domain types ([`Document`], [`AnchorRecord`], [`Extraction`], [`Notice`])
//! - Configuration ([`AppConfig`], [`FetchOptions`], config loading)

pub mod config;
pub mod error;
pub mod types;

// Re-export public API at crate root for ergonomic imports.
pub use config::{
    AppConfig, FetchConfig, FetchOptions, OutputConfig, config_dir, config_file_path, init_config,
    init_config_at, load_config, load_config_from,
};
pub use error::{AnchorProbeError, Result};
pub use types::{AnchorRecord, CONTENT_MARKER, Document, Extraction, Notice};
