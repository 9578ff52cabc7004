//! Name segmentation and output-path sanitization
//!
//! Splits raw template entry names into their condition segments, and
//! produces clean destination names with condition segments removed and
//! real extensions preserved.
//!
//! One documented ambiguity lives here: a framework whose name doubles as
//! a real file extension (`vue`). A segment equal to such a framework is
//! treated as a literal component marker - not a condition - when it is
//! the last segment of the stem and the file genuinely carries that
//! extension shape (`App.vue`, `App.vue.hbs`). Anywhere else it gates
//! inclusion like any other framework token.

use crate::context::SelectionContext;
use crate::engine::condition::{self, parse_segment, Condition};
use crate::templates::manifest::Vocabulary;

/// A file name decomposed for condition analysis.
///
/// Only the single outermost extension is split off; everything before it
/// is dot-segmented. For render-marker files the true extension therefore
/// appears as the final (inert) segment.
struct SplitName<'a> {
    /// Dot-delimited segments of the name minus its outermost extension.
    /// Segment 0 is the literal stem and is never a condition.
    segments: Vec<&'a str>,

    /// The outermost extension, if any
    extension: Option<&'a str>,

    /// Whether the outermost extension is the render marker
    has_marker: bool,

    /// The framework-named extension this file legitimately ends in, when
    /// the name has component shape (e.g. `vue` for `App.vue.hbs`)
    component_ext: Option<&'a str>,
}

fn split_name<'a>(vocab: &Vocabulary, name: &'a str) -> SplitName<'a> {
    let (base, extension) = match name.rsplit_once('.') {
        // Dotfiles like `.gitignore` have no extension, only a stem
        Some((b, e)) if !b.is_empty() => (b, Some(e)),
        _ => (name, None),
    };

    let has_marker = extension.is_some_and(|e| e == vocab.render_marker);
    let segments: Vec<&str> = base.split('.').collect();

    let candidate = if has_marker {
        segments.last().copied().filter(|_| segments.len() > 1)
    } else {
        extension
    };
    let component_ext = candidate.filter(|c| vocab.is_component_extension(c));

    SplitName {
        segments,
        extension,
        has_marker,
        component_ext,
    }
}

/// Whether a file carries the render marker as its outermost extension
/// (its content must be rendered rather than copied).
pub fn has_render_marker(vocab: &Vocabulary, name: &str) -> bool {
    name.rsplit_once('.')
        .is_some_and(|(base, ext)| !base.is_empty() && ext == vocab.render_marker)
}

/// Parse every condition embedded in a file name.
///
/// Segment 0 is skipped (always the literal stem). The component-extension
/// special case applies to the final stem segment only.
pub fn file_conditions(vocab: &Vocabulary, name: &str) -> Vec<Condition> {
    let split = split_name(vocab, name);
    let last = split.segments.len() - 1;

    split
        .segments
        .iter()
        .enumerate()
        .skip(1)
        .map(|(index, segment)| {
            if index == last && Some(*segment) == split.component_ext {
                Condition::Inert((*segment).to_string())
            } else {
                parse_segment(vocab, segment)
            }
        })
        .collect()
}

/// Whether a file is included under the given context.
pub fn is_included_file(vocab: &Vocabulary, name: &str, context: &SelectionContext) -> bool {
    condition::is_included(&file_conditions(vocab, name), context)
}

/// The single condition of a directory name, if it carries one.
///
/// Directories use a simplified one-condition form (`name.condition`):
/// only the final segment is interpreted.
pub fn dir_condition(vocab: &Vocabulary, name: &str) -> Option<Condition> {
    let (_, last) = name.rsplit_once('.')?;
    Some(parse_segment(vocab, last))
}

/// Whether a directory (and therefore its whole subtree) is included.
pub fn is_included_dir(vocab: &Vocabulary, name: &str, context: &SelectionContext) -> bool {
    dir_condition(vocab, name)
        .map(|c| c.is_satisfied(context))
        .unwrap_or(true)
}

/// Produce the clean destination name for a file: condition segments
/// dropped, inert segments kept in order, the true extension preserved,
/// and the render marker stripped entirely.
///
/// Idempotent once the marker is gone: cleaning a clean name is a no-op.
pub fn clean_file_name(vocab: &Vocabulary, name: &str) -> String {
    let split = split_name(vocab, name);
    let last = split.segments.len() - 1;

    let mut kept: Vec<&str> = vec![split.segments[0]];
    for (index, segment) in split.segments.iter().enumerate().skip(1) {
        let keep = if index == last && Some(*segment) == split.component_ext {
            true
        } else {
            matches!(parse_segment(vocab, segment), Condition::Inert(_))
        };
        if keep {
            kept.push(segment);
        }
    }

    let mut out = kept.join(".");
    if let Some(extension) = split.extension {
        // The materialized file must not carry the render marker
        if !split.has_marker {
            out.push('.');
            out.push_str(extension);
        }
    }
    out
}

/// Produce the clean destination name for a directory: the trailing
/// condition segment, if present, is dropped.
pub fn clean_dir_name(vocab: &Vocabulary, name: &str) -> String {
    match name.rsplit_once('.') {
        Some((stem, last)) if !stem.is_empty() => {
            if matches!(parse_segment(vocab, last), Condition::Inert(_)) {
                name.to_string()
            } else {
                stem.to_string()
            }
        }
        _ => name.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vocab() -> Vocabulary {
        Vocabulary::new(
            ["vanilla", "vue", "react", "svelte", "solid"],
            ["pug", "tailwindcss", "scss", "sass"],
        )
    }

    fn ctx(framework: &str, options: &[&str]) -> SelectionContext {
        SelectionContext::new(framework, options.iter().copied())
    }

    #[test]
    fn test_plain_names_always_included() {
        let v = vocab();
        for name in ["index.html", "logo.png", ".gitignore", "README"] {
            assert!(is_included_file(&v, name, &ctx("vanilla", &[])), "{name}");
            assert!(is_included_file(&v, name, &ctx("react", &["pug"])), "{name}");
        }
    }

    #[test]
    fn test_react_pug_selection() {
        // The naming-convention round trip for react + pug
        let v = vocab();
        let context = ctx("react", &["pug"]);

        assert!(is_included_file(&v, "Home.react-pug.tsx.hbs", &context));
        assert!(is_included_file(&v, "Home.react.tsx.hbs", &context));
        assert!(is_included_file(&v, "Home.pug.vue.hbs", &context));
        assert!(!is_included_file(&v, "Home.vue-pug.vue.hbs", &context));
        assert!(!is_included_file(&v, "Home.solid-pug.tsx.hbs", &context));
    }

    #[test]
    fn test_negated_condition_excludes_active_framework() {
        let v = vocab();
        assert!(!is_included_file(&v, "App.!vue.tsx.hbs", &ctx("vue", &[])));
        assert!(is_included_file(&v, "App.!vue.tsx.hbs", &ctx("react", &[])));
    }

    #[test]
    fn test_vue_component_identity_marker_is_not_a_condition() {
        let v = vocab();
        // Trailing `vue` on a genuine component file never gates inclusion
        assert!(is_included_file(&v, "Home.pug.vue.hbs", &ctx("react", &["pug"])));
        // But `vue` in any other position is a framework condition
        assert!(!is_included_file(&v, "App.vue.vue.hbs", &ctx("react", &[])));
        assert!(is_included_file(&v, "App.vue.vue.hbs", &ctx("vue", &[])));
        // Without component shape, a trailing `vue` stays a condition
        assert!(!is_included_file(&v, "store.vue.ts.hbs", &ctx("react", &[])));
    }

    #[test]
    fn test_clean_name_strips_conditions_and_marker() {
        let v = vocab();
        assert_eq!(clean_file_name(&v, "Home.react-pug.tsx.hbs"), "Home.tsx");
        assert_eq!(clean_file_name(&v, "Home.react.tsx.hbs"), "Home.tsx");
        assert_eq!(clean_file_name(&v, "App.!pug.css.hbs"), "App.css");
        assert_eq!(
            clean_file_name(&v, "tailwind.config.tailwindcss.ts.hbs"),
            "tailwind.config.ts"
        );
    }

    #[test]
    fn test_clean_name_keeps_component_extension() {
        let v = vocab();
        assert_eq!(clean_file_name(&v, "App.vue.vue.hbs"), "App.vue");
        assert_eq!(clean_file_name(&v, "Home.pug.vue.hbs"), "Home.vue");
    }

    #[test]
    fn test_clean_name_preserves_plain_files() {
        let v = vocab();
        assert_eq!(clean_file_name(&v, "vite.config.ts"), "vite.config.ts");
        assert_eq!(clean_file_name(&v, "logo.png"), "logo.png");
        assert_eq!(clean_file_name(&v, ".gitignore"), ".gitignore");
    }

    #[test]
    fn test_clean_name_is_idempotent() {
        let v = vocab();
        for raw in [
            "Home.react-pug.tsx.hbs",
            "App.vue.vue.hbs",
            "tailwind.config.tailwindcss.ts.hbs",
            "index.html.hbs",
            "logo.png",
        ] {
            let once = clean_file_name(&v, raw);
            assert_eq!(clean_file_name(&v, &once), once, "{raw}");
        }
    }

    #[test]
    fn test_directory_single_condition() {
        let v = vocab();
        // `state.!vue` is included for every context except framework vue
        for framework in ["vanilla", "react", "svelte", "solid"] {
            assert!(is_included_dir(&v, "state.!vue", &ctx(framework, &[])));
        }
        assert!(!is_included_dir(&v, "state.!vue", &ctx("vue", &[])));

        assert!(is_included_dir(&v, "components.react", &ctx("react", &[])));
        assert!(!is_included_dir(&v, "components.react", &ctx("vue", &[])));
        assert!(is_included_dir(&v, "styles.scss", &ctx("vue", &["scss"])));
        assert!(!is_included_dir(&v, "styles.scss", &ctx("vue", &[])));
    }

    #[test]
    fn test_directory_without_condition_always_included() {
        let v = vocab();
        assert!(is_included_dir(&v, "src", &ctx("vue", &[])));
        // Unknown trailing tokens are inert, not conditions
        assert!(is_included_dir(&v, "assets.extra", &ctx("vue", &[])));
    }

    #[test]
    fn test_clean_dir_name() {
        let v = vocab();
        assert_eq!(clean_dir_name(&v, "state.!vue"), "state");
        assert_eq!(clean_dir_name(&v, "components.react"), "components");
        assert_eq!(clean_dir_name(&v, "src"), "src");
        assert_eq!(clean_dir_name(&v, "assets.extra"), "assets.extra");
    }

    #[test]
    fn test_render_marker_detection() {
        let v = vocab();
        assert!(has_render_marker(&v, "index.html.hbs"));
        assert!(!has_render_marker(&v, "index.html"));
        assert!(!has_render_marker(&v, "hbs"));
    }
}
