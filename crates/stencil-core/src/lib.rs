//! Stencil Core - Conditional template materialization for project scaffolding
//!
//! This library scaffolds new projects from a directory of template files.
//! Files and directories embed inclusion conditions in their names
//! (`Home.react-pug.tsx.hbs`, `state.!vue`); the engine evaluates those
//! conditions against the user's framework/option selection, strips the
//! condition tokens from output paths, and renders or copies each included
//! entry into the destination tree.
//!
//! # Architecture
//!
//! The library is organized into layers:
//!
//! - **Layer 1: Engine** - Pure condition grammar, evaluator, and path
//!   sanitizer, plus the async tree materializer and render adapter
//! - **Layer 2: Templates** - Manifest loading (vocabulary tables, rename
//!   rules) and CLI/template version compatibility
//! - **Layer 3: CLI/TUI Interface** - Optional cliclack-based prompts
//!   (feature-gated)
//!
//! # Feature Flags
//!
//! - `tui` (default): Enables the cliclack-based prompt flow
//!
//! # Example Usage (without TUI)
//!
//! ```ignore
//! use stencil_core::{materialize, SelectionContext, VariableContext, Vocabulary};
//!
//! let vocab = Vocabulary::new(["vanilla", "vue", "react"], ["pug", "scss"]);
//! let selection = SelectionContext::new("react", ["pug"]);
//! let vars = VariableContext::new();
//! let report = materialize(&vocab, &source, &dest, &selection, &vars).await?;
//! ```

pub mod context;
pub mod engine;
pub mod error;
pub mod templates;
pub mod util;

#[cfg(feature = "tui")]
pub mod tui;

// Re-export main types for convenience
pub use context::{SelectionContext, VariableContext};
pub use engine::{
    clean_dir_name, clean_file_name, is_included, materialize, parse_segment, plan, Condition,
    MaterializeReport, PlannedAction, PlannedEntry, Renderer,
};
pub use error::MaterializeError;
pub use templates::{
    check_compatibility, RenameRule, RootManifest, TemplateManifest, Vocabulary,
};
#[cfg(feature = "tui")]
pub use tui::{run, CreateArgs};

/// CLI version fallback - used for template compatibility checking when a
/// binary does not supply its own
pub const DEFAULT_CLI_VERSION: &str = "0.1.0";
