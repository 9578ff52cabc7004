//! Template manifest types and parsing

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tokio::fs;

fn default_render_marker() -> String {
    "hbs".to_string()
}

fn default_component_extensions() -> Vec<String> {
    vec!["vue".to_string()]
}

fn default_inert_tokens() -> Vec<String> {
    ["js", "ts", "jsx", "tsx", "css", "html", "config", "spec", "test", "min"]
        .iter()
        .map(|s| s.to_string())
        .collect()
}

/// The naming vocabulary of one template: which tokens are frameworks,
/// which are options, and which pass through untouched.
///
/// Supplied by the template manifest, never hardcoded in the engine, so
/// new frameworks or options are a table update rather than a code change.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Vocabulary {
    /// Mutually-exclusive framework tokens (exactly one active per run)
    pub frameworks: Vec<String>,

    /// Independently togglable option tokens
    pub options: Vec<String>,

    /// File-type tokens kept verbatim and never interpreted as conditions
    #[serde(default = "default_inert_tokens")]
    pub inert: Vec<String>,

    /// Sentinel extension marking a file as template text to render
    #[serde(default = "default_render_marker")]
    pub render_marker: String,

    /// Framework names that double as real file extensions and need
    /// positional disambiguation (`vue` today; any future framework whose
    /// name collides with an extension must be listed here too)
    #[serde(default = "default_component_extensions")]
    pub component_extensions: Vec<String>,

    /// Per-framework destination-name rewrites applied after
    /// sanitization (e.g. react: `main.ts` becomes `main.tsx`)
    #[serde(default)]
    pub renames: Vec<RenameRule>,
}

impl Vocabulary {
    /// Build a vocabulary with default inert tokens, render marker, and
    /// component extensions.
    pub fn new<S, F, O>(frameworks: F, options: O) -> Self
    where
        S: Into<String>,
        F: IntoIterator<Item = S>,
        O: IntoIterator<Item = S>,
    {
        Self {
            frameworks: frameworks.into_iter().map(Into::into).collect(),
            options: options.into_iter().map(Into::into).collect(),
            inert: default_inert_tokens(),
            render_marker: default_render_marker(),
            component_extensions: default_component_extensions(),
            renames: Vec::new(),
        }
    }

    pub fn is_framework(&self, token: &str) -> bool {
        self.frameworks.iter().any(|f| f == token)
    }

    pub fn is_option(&self, token: &str) -> bool {
        self.options.iter().any(|o| o == token)
    }

    pub fn is_inert(&self, token: &str) -> bool {
        token == self.render_marker || self.inert.iter().any(|i| i == token)
    }

    pub fn is_component_extension(&self, token: &str) -> bool {
        self.component_extensions.iter().any(|c| c == token)
    }

    /// Look up the post-sanitization rename for a destination file name
    /// under the given framework, if the caller declared one.
    pub fn rename_for<'a>(&'a self, framework: &str, file_name: &str) -> Option<&'a str> {
        self.renames
            .iter()
            .find(|r| r.framework == framework && r.from == file_name)
            .map(|r| r.to.as_str())
    }
}

/// A caller-declared destination rename, scoped to one framework.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenameRule {
    /// Framework the rule applies to
    pub framework: String,

    /// Sanitized file name to match exactly
    pub from: String,

    /// Replacement file name
    pub to: String,
}

/// Root template manifest (templates/template.yaml)
/// Lists the available project-type template directories.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RootManifest {
    /// List of template directory names
    pub templates: Vec<String>,
}

impl RootManifest {
    /// Load the root manifest from a templates directory.
    pub async fn load(templates_dir: &Path) -> Result<Self> {
        let path = templates_dir.join("template.yaml");
        let content = fs::read_to_string(&path)
            .await
            .with_context(|| format!("Failed to read {}", path.display()))?;
        serde_yaml::from_str(&content).context("Failed to parse root template.yaml")
    }
}

/// Per-template manifest (templates/<name>/template.yaml)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TemplateManifest {
    /// Display name of the template
    pub name: String,

    /// Description of what the template provides
    pub description: String,

    /// Semver version for CLI compatibility checking
    pub version: String,

    /// Framework preselected in the prompt
    #[serde(default)]
    pub default_framework: Option<String>,

    /// The naming vocabulary this template's entry names follow
    pub vocabulary: Vocabulary,
}

impl TemplateManifest {
    /// Load a template manifest from its directory.
    pub async fn load(template_dir: &Path) -> Result<Self> {
        let path = template_dir.join("template.yaml");
        let content = fs::read_to_string(&path)
            .await
            .with_context(|| format!("Failed to read {}", path.display()))?;
        serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse {}", path.display()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_manifest_yaml() {
        let yaml = r#"
name: Electron app
description: Electron application with a choice of renderer framework
version: 0.1.0
default_framework: vanilla
vocabulary:
  frameworks: [vanilla, vue, react, svelte, solid]
  options: [pug, tailwindcss, scss, sass]
  renames:
    - framework: react
      from: main.ts
      to: main.tsx
"#;
        let manifest: TemplateManifest = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(manifest.name, "Electron app");
        assert_eq!(manifest.default_framework.as_deref(), Some("vanilla"));

        let vocab = &manifest.vocabulary;
        assert!(vocab.is_framework("svelte"));
        assert!(vocab.is_option("sass"));
        // Defaults fill in when the manifest stays silent
        assert_eq!(vocab.render_marker, "hbs");
        assert!(vocab.is_inert("config"));
        assert!(vocab.is_component_extension("vue"));

        assert_eq!(vocab.rename_for("react", "main.ts"), Some("main.tsx"));
        assert_eq!(vocab.rename_for("vue", "main.ts"), None);
        assert_eq!(vocab.rename_for("react", "index.ts"), None);
    }

    #[test]
    fn test_parse_root_manifest() {
        let yaml = "templates:\n  - electron\n";
        let root: RootManifest = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(root.templates, vec!["electron".to_string()]);
    }

    #[test]
    fn test_render_marker_is_always_inert() {
        let vocab = Vocabulary::new(["vue"], ["pug"]);
        assert!(vocab.is_inert("hbs"));
    }
}
