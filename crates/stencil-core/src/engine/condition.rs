//! Condition grammar for file and directory name segments
//!
//! Template entry names embed inclusion conditions as dot-delimited
//! segments (`Home.react-pug.tsx.hbs`, `state.!vue`). Each segment parses
//! into exactly one [`Condition`]; an entry is included iff every parsed
//! condition holds for the current [`SelectionContext`].

use crate::context::SelectionContext;
use crate::templates::manifest::Vocabulary;

/// A single parsed name-segment condition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Condition {
    /// `!token` - include only when the token is neither the active
    /// framework nor an active option
    Negated(String),

    /// `a+b` - include only when every token is satisfied (option
    /// membership first, framework equality otherwise)
    Conjunction(Vec<String>),

    /// `framework-option` - include only when both halves match
    FrameworkOption { framework: String, option: String },

    /// A recognized framework name - include only when it is active
    FrameworkEq(String),

    /// A recognized option name - include only when it is active
    OptionIn(String),

    /// Anything else (file-type markers, custom words) - never excludes
    Inert(String),
}

/// Parse one name segment into a [`Condition`].
///
/// Total: unrecognized segments degrade to [`Condition::Inert`] instead of
/// failing, so scaffolding keeps moving even over unconventional names.
/// Known file-type tokens and the render marker are recognized before any
/// other rule and always pass through verbatim.
pub fn parse_segment(vocab: &Vocabulary, segment: &str) -> Condition {
    if vocab.is_inert(segment) {
        return Condition::Inert(segment.to_string());
    }

    if let Some(rest) = segment.strip_prefix('!') {
        return Condition::Negated(rest.to_string());
    }

    if segment.contains('+') {
        let tokens = segment.split('+').map(str::to_string).collect();
        return Condition::Conjunction(tokens);
    }

    if let Some((left, right)) = segment.split_once('-') {
        if vocab.is_framework(left) && vocab.is_option(right) {
            return Condition::FrameworkOption {
                framework: left.to_string(),
                option: right.to_string(),
            };
        }
    }

    if vocab.is_framework(segment) {
        return Condition::FrameworkEq(segment.to_string());
    }

    if vocab.is_option(segment) {
        return Condition::OptionIn(segment.to_string());
    }

    Condition::Inert(segment.to_string())
}

impl Condition {
    /// Whether this condition permits inclusion under the given context.
    pub fn is_satisfied(&self, context: &SelectionContext) -> bool {
        match self {
            Condition::Negated(token) => {
                !context.is_framework(token) && !context.has_option(token)
            }
            Condition::Conjunction(tokens) => tokens
                .iter()
                .all(|t| context.has_option(t) || context.is_framework(t)),
            Condition::FrameworkOption { framework, option } => {
                context.is_framework(framework) && context.has_option(option)
            }
            Condition::FrameworkEq(token) => context.is_framework(token),
            Condition::OptionIn(token) => context.has_option(token),
            Condition::Inert(_) => true,
        }
    }
}

/// AND across all conditions of a name, short-circuiting on first failure.
/// A name with zero conditions is always included.
pub fn is_included(conditions: &[Condition], context: &SelectionContext) -> bool {
    conditions.iter().all(|c| c.is_satisfied(context))
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
    fn test_parse_negated() {
        assert_eq!(
            parse_segment(&vocab(), "!pug"),
            Condition::Negated("pug".to_string())
        );
    }

    #[test]
    fn test_parse_conjunction() {
        assert_eq!(
            parse_segment(&vocab(), "vue+tailwindcss"),
            Condition::Conjunction(vec!["vue".to_string(), "tailwindcss".to_string()])
        );
    }

    #[test]
    fn test_parse_framework_option_pair() {
        assert_eq!(
            parse_segment(&vocab(), "react-pug"),
            Condition::FrameworkOption {
                framework: "react".to_string(),
                option: "pug".to_string(),
            }
        );
    }

    #[test]
    fn test_parse_framework_and_option() {
        assert_eq!(
            parse_segment(&vocab(), "svelte"),
            Condition::FrameworkEq("svelte".to_string())
        );
        assert_eq!(
            parse_segment(&vocab(), "tailwindcss"),
            Condition::OptionIn("tailwindcss".to_string())
        );
    }

    #[test]
    fn test_unrecognized_segment_is_inert() {
        // Unknown tokens never exclude, including dashed custom words
        assert_eq!(
            parse_segment(&vocab(), "my-partial"),
            Condition::Inert("my-partial".to_string())
        );
        assert_eq!(
            parse_segment(&vocab(), "helpers"),
            Condition::Inert("helpers".to_string())
        );
    }

    #[test]
    fn test_file_type_tokens_bypass_condition_rules() {
        // "ts" and friends are recognized before any condition rule
        assert_eq!(parse_segment(&vocab(), "ts"), Condition::Inert("ts".to_string()));
        assert_eq!(
            parse_segment(&vocab(), "config"),
            Condition::Inert("config".to_string())
        );
    }

    #[test]
    fn test_negated_excludes_active_framework_or_option() {
        let negated = Condition::Negated("vue".to_string());
        assert!(!negated.is_satisfied(&ctx("vue", &[])));
        assert!(negated.is_satisfied(&ctx("react", &[])));

        let negated = Condition::Negated("pug".to_string());
        assert!(!negated.is_satisfied(&ctx("react", &["pug"])));
        assert!(negated.is_satisfied(&ctx("react", &[])));
    }

    #[test]
    fn test_conjunction_requires_every_token() {
        let conj = parse_segment(&vocab(), "vue+tailwindcss");
        assert!(conj.is_satisfied(&ctx("vue", &["tailwindcss"])));
        assert!(!conj.is_satisfied(&ctx("vue", &[])));
        assert!(!conj.is_satisfied(&ctx("react", &["tailwindcss"])));
    }

    #[test]
    fn test_framework_option_requires_both() {
        let pair = parse_segment(&vocab(), "react-pug");
        assert!(pair.is_satisfied(&ctx("react", &["pug"])));
        assert!(!pair.is_satisfied(&ctx("react", &[])));
        assert!(!pair.is_satisfied(&ctx("vue", &["pug"])));
    }

    #[test]
    fn test_zero_conditions_always_included() {
        assert!(is_included(&[], &ctx("vanilla", &[])));
        assert!(is_included(&[], &ctx("solid", &["pug", "scss"])));
    }

    #[test]
    fn test_all_conditions_must_hold() {
        let conditions = vec![
            Condition::FrameworkEq("react".to_string()),
            Condition::OptionIn("pug".to_string()),
        ];
        assert!(is_included(&conditions, &ctx("react", &["pug"])));
        assert!(!is_included(&conditions, &ctx("react", &[])));
        assert!(!is_included(&conditions, &ctx("vue", &["pug"])));
    }
}
