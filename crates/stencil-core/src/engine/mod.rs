//! The conditional template materialization engine
//!
//! This module provides:
//! - The condition grammar and evaluator for entry-name segments
//! - Output-path sanitization
//! - Recursive tree materialization and dry-run planning
//! - The handlebars render adapter

pub mod condition;
pub mod materialize;
pub mod naming;
pub mod render;

pub use condition::{is_included, parse_segment, Condition};
pub use materialize::{materialize, plan, MaterializeReport, PlannedAction, PlannedEntry};
pub use naming::{clean_dir_name, clean_file_name, has_render_marker};
pub use render::Renderer;
