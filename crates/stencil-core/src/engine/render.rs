//! Render adapter: merges contexts and delegates substitution to handlebars
//!
//! Template text sees the caller's variable bindings plus `framework` and
//! `options`, and a set of predicate helpers derived from the selection
//! context of the current materialization call:
//!
//! - `has_option "pug"`, `has_any_option "scss" "sass"`,
//!   `has_all_options "pug" "tailwindcss"`
//! - `is_framework "react"`, and one `is_<name>` helper per vocabulary
//!   framework (`is_vue`, `is_react`, ...)
//!
//! A fresh registry is built per materialization call, so the helpers
//! always reflect the current selection rather than a cached prior one.

use std::collections::BTreeSet;

use handlebars::{
    Context, Handlebars, Helper, HelperDef, RenderContext, RenderError, RenderErrorReason,
    ScopedJson,
};
use serde_json::Value as Json;

use crate::context::{SelectionContext, VariableContext};
use crate::templates::manifest::Vocabulary;

#[derive(Clone, Copy)]
enum OptionQuery {
    One,
    Any,
    All,
}

struct OptionHelper {
    name: &'static str,
    query: OptionQuery,
    options: BTreeSet<String>,
}

impl HelperDef for OptionHelper {
    fn call_inner<'reg: 'rc, 'rc>(
        &self,
        h: &Helper<'rc>,
        _: &'reg Handlebars<'reg>,
        _: &'rc Context,
        _: &mut RenderContext<'reg, 'rc>,
    ) -> Result<ScopedJson<'rc>, RenderError> {
        if h.params().is_empty() {
            return Err(RenderErrorReason::ParamNotFoundForIndex(self.name, 0).into());
        }
        // The single-option form takes exactly one name; extra arguments
        // are a template typo, not an "any" query
        if matches!(self.query, OptionQuery::One) && h.params().len() > 1 {
            return Err(RenderErrorReason::Other(format!(
                "{} takes exactly one option name",
                self.name
            ))
            .into());
        }
        let mut tokens = h.params().iter().map(|p| {
            p.value()
                .as_str()
                .map(|t| self.options.contains(t))
                .unwrap_or(false)
        });
        let result = match self.query {
            OptionQuery::One | OptionQuery::Any => tokens.any(|b| b),
            OptionQuery::All => tokens.all(|b| b),
        };
        Ok(ScopedJson::Derived(Json::Bool(result)))
    }
}

struct IsFramework {
    active: String,
}

impl HelperDef for IsFramework {
    fn call_inner<'reg: 'rc, 'rc>(
        &self,
        h: &Helper<'rc>,
        _: &'reg Handlebars<'reg>,
        _: &'rc Context,
        _: &mut RenderContext<'reg, 'rc>,
    ) -> Result<ScopedJson<'rc>, RenderError> {
        let name = h
            .param(0)
            .and_then(|p| p.value().as_str())
            .ok_or(RenderErrorReason::ParamNotFoundForIndex("is_framework", 0))?;
        Ok(ScopedJson::Derived(Json::Bool(self.active == name)))
    }
}

/// Zero-argument convenience predicate for one named framework
/// (`is_vue`, `is_react`, ...).
struct IsNamedFramework {
    expected: String,
    active: String,
}

impl HelperDef for IsNamedFramework {
    fn call_inner<'reg: 'rc, 'rc>(
        &self,
        _: &Helper<'rc>,
        _: &'reg Handlebars<'reg>,
        _: &'rc Context,
        _: &mut RenderContext<'reg, 'rc>,
    ) -> Result<ScopedJson<'rc>, RenderError> {
        Ok(ScopedJson::Derived(Json::Bool(self.expected == self.active)))
    }
}

/// Renders template text against a fixed selection context.
pub struct Renderer {
    registry: Handlebars<'static>,
    framework: String,
    options: BTreeSet<String>,
}

impl Renderer {
    pub fn new(vocab: &Vocabulary, selection: &SelectionContext) -> Self {
        let mut registry = Handlebars::new();
        // Undefined binding access is a render error, not empty output
        registry.set_strict_mode(true);

        registry.register_helper(
            "has_option",
            Box::new(OptionHelper {
                name: "has_option",
                query: OptionQuery::One,
                options: selection.options.clone(),
            }),
        );
        registry.register_helper(
            "has_any_option",
            Box::new(OptionHelper {
                name: "has_any_option",
                query: OptionQuery::Any,
                options: selection.options.clone(),
            }),
        );
        registry.register_helper(
            "has_all_options",
            Box::new(OptionHelper {
                name: "has_all_options",
                query: OptionQuery::All,
                options: selection.options.clone(),
            }),
        );
        registry.register_helper(
            "is_framework",
            Box::new(IsFramework {
                active: selection.framework.clone(),
            }),
        );
        for framework in &vocab.frameworks {
            registry.register_helper(
                &format!("is_{framework}"),
                Box::new(IsNamedFramework {
                    expected: framework.clone(),
                    active: selection.framework.clone(),
                }),
            );
        }

        Self {
            registry,
            framework: selection.framework.clone(),
            options: selection.options.clone(),
        }
    }

    /// Render template text with the merged binding set.
    pub fn render(
        &self,
        template: &str,
        vars: &VariableContext,
    ) -> Result<String, RenderError> {
        let mut data = vars.clone();
        data.insert(
            "framework".to_string(),
            Json::String(self.framework.clone()),
        );
        data.insert(
            "options".to_string(),
            Json::Array(self.options.iter().cloned().map(Json::String).collect()),
        );
        self.registry.render_template(template, &Json::Object(data))
    }
}
