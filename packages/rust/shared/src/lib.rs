//! Shared types, error model, and configuration for guidegen.
//!
//! This crate is the foundation depended on by all other guidegen crates.
//! It provides:
//! - [`GuideGenError`] — the unified error type
//! - Domain types ([`GuideCollection`], [`GuideConfig`], [`Section`], [`TabVariant`])
//! - Configuration ([`GuideGenConfig`], config loading)

pub mod config;
pub mod error;
pub mod types;

// Re-export public API at crate root for ergonomic imports.
pub use config::{
    CONFIG_FILE_NAME, GuideGenConfig, PathsConfig, init_config, load_config, load_config_from,
};
pub use error::{GuideGenError, Result};
pub use types::{
    ContentNode, GuideCollection, GuideConfig, HeadingLevel, LangTabsSection, NodeSection,
    ROOT_FILE_DIR, Section, TabBody, TabVariant,
};
