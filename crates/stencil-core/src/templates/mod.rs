//! Template manifests and compatibility checking
//!
//! This module provides:
//! - Manifest types (RootManifest, TemplateManifest, Vocabulary)
//! - Version compatibility checking between CLI and template

pub mod manifest;
pub mod version;

pub use manifest::{RenameRule, RootManifest, TemplateManifest, Vocabulary};
pub use version::check_compatibility;
