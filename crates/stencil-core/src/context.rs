//! Selection and variable contexts for one materialization run

use std::collections::BTreeSet;

/// The user's chosen variation axes for a single materialization run:
/// exactly one framework plus any number of independent options.
///
/// Immutable for the duration of one call; the engine never mutates or
/// caches it across calls.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectionContext {
    /// The active framework (one value from the caller's vocabulary)
    pub framework: String,

    /// The active option flags
    pub options: BTreeSet<String>,
}

impl SelectionContext {
    pub fn new<S, I>(framework: S, options: I) -> Self
    where
        S: Into<String>,
        I: IntoIterator<Item = S>,
    {
        Self {
            framework: framework.into(),
            options: options.into_iter().map(Into::into).collect(),
        }
    }

    pub fn has_option(&self, option: &str) -> bool {
        self.options.contains(option)
    }

    pub fn is_framework(&self, framework: &str) -> bool {
        self.framework == framework
    }
}

/// Free-form key/value bindings merged into every render call
/// (project name, target path, package metadata).
pub type VariableContext = serde_json::Map<String, serde_json::Value>;
