//! Placeholder extraction and substitution
//!
//! A placeholder is `{{` + any text on one line + `}}`, matched non-greedily
//! from left to right. The inner text is the variable name, taken verbatim:
//! no trimming and no identifier validation. Unbalanced braces never match
//! and pass through untouched.
//!
//! Both operations are total: any input string produces a result.

use crate::template::types::RenderContext;
use regex::{Captures, Regex};
use std::collections::HashSet;
use std::sync::OnceLock;

fn placeholder_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"\{\{(.*?)\}\}").expect("placeholder pattern is valid"))
}

/// Extract placeholder names in order of appearance, duplicates included
///
/// ```
/// use switchboard::template::extract_variables;
///
/// let vars = extract_variables("Hi {{name}}, order {{order_id}} confirmed");
/// assert_eq!(vars, vec!["name", "order_id"]);
/// ```
pub fn extract_variables(message: &str) -> Vec<String> {
    placeholder_pattern()
        .captures_iter(message)
        .map(|caps| caps[1].to_string())
        .collect()
}

/// Placeholder names with duplicates removed, first appearance wins
pub fn distinct_variables(message: &str) -> Vec<String> {
    let mut seen = HashSet::new();
    extract_variables(message)
        .into_iter()
        .filter(|name| seen.insert(name.clone()))
        .collect()
}

/// Substitute every placeholder that has a non-empty value in `values`
///
/// Placeholders with no entry, or with an empty value, are left as the
/// literal `{{name}}`. Substitution is a single left-to-right pass, so a
/// value that itself contains `{{...}}` is emitted as-is and never expanded.
///
/// Names are matched exactly. Overlapping spans such as `{{{a}}}` resolve to
/// whatever the left-most non-greedy match captures (here `{a`).
pub fn render(message: &str, values: &RenderContext) -> String {
    placeholder_pattern()
        .replace_all(message, |caps: &Captures| match values.get(&caps[1]) {
            Some(value) if !value.is_empty() => value.to_string(),
            _ => caps[0].to_string(),
        })
        .into_owned()
}

/// Distinct names that [`render`] would leave unresolved
pub fn unresolved_variables(message: &str, values: &RenderContext) -> Vec<String> {
    distinct_variables(message)
        .into_iter()
        .filter(|name| values.get(name).map_or(true, str::is_empty))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ctx(pairs: &[(&str, &str)]) -> RenderContext {
        pairs.iter().copied().collect()
    }

    #[test]
    fn test_extract_empty_message() {
        assert!(extract_variables("").is_empty());
        assert!(extract_variables("no vars here").is_empty());
    }

    #[test]
    fn test_extract_in_order() {
        let vars = extract_variables("Hi {{name}}, order {{order_id}} confirmed");
        assert_eq!(vars, vec!["name", "order_id"]);
    }

    #[test]
    fn test_extract_keeps_duplicates() {
        assert_eq!(extract_variables("{{a}}{{a}}"), vec!["a", "a"]);
        assert_eq!(distinct_variables("{{a}} {{b}} {{a}}"), vec!["a", "b"]);
    }

    #[test]
    fn test_extract_is_verbatim() {
        assert_eq!(
            extract_variables("{{ spaced }} {{}} {{Name.With-Dots}}"),
            vec![" spaced ", "", "Name.With-Dots"]
        );
    }

    #[test]
    fn test_extract_ignores_malformed_braces() {
        assert!(extract_variables("{{open only").is_empty());
        assert!(extract_variables("close only}}").is_empty());
        assert!(extract_variables("{single} {{line\nbreak}}").is_empty());
        assert_eq!(extract_variables("{{a}} {{b"), vec!["a"]);
        assert_eq!(extract_variables("{{{a}}}"), vec!["{a"]);
    }

    #[test]
    fn test_extract_count_matches_spans() {
        let message = "{{x}} and {{y}} then {{x}}, {{ broken and }} {{z";
        assert_eq!(extract_variables(message).len(), 4);
    }

    #[test]
    fn test_render_substitutes() {
        assert_eq!(render("Hi {{name}}!", &ctx(&[("name", "Jo")])), "Hi Jo!");
    }

    #[test]
    fn test_render_leaves_missing_intact() {
        assert_eq!(render("Hi {{name}}!", &ctx(&[])), "Hi {{name}}!");
    }

    #[test]
    fn test_render_empty_value_is_unresolved() {
        assert_eq!(render("Hi {{name}}!", &ctx(&[("name", "")])), "Hi {{name}}!");
    }

    #[test]
    fn test_render_empty_context_is_identity() {
        for message in [
            "",
            "plain text",
            "Hi {{customer_name}}! Your order {{order_id}} has shipped.",
            "{{a}}{{a}} {{ b }} {{unclosed",
            "{{{nested}}}",
        ] {
            assert_eq!(render(message, &RenderContext::new()), message);
        }
    }

    #[test]
    fn test_render_replaces_all_occurrences() {
        let out = render("{{a}}-{{b}}-{{a}}", &ctx(&[("a", "1"), ("b", "2")]));
        assert_eq!(out, "1-2-1");
    }

    #[test]
    fn test_render_is_case_sensitive() {
        let out = render("{{Name}} {{name}}", &ctx(&[("name", "jo")]));
        assert_eq!(out, "{{Name}} jo");
    }

    #[test]
    fn test_render_does_not_expand_values() {
        let out = render("{{a}} {{b}}", &ctx(&[("a", "{{b}}"), ("b", "x")]));
        assert_eq!(out, "{{b}} x");
    }

    #[test]
    fn test_render_ignores_unused_values() {
        let out = render("Hello {{name}}", &ctx(&[("name", "Ann"), ("extra", "1")]));
        assert_eq!(out, "Hello Ann");
    }

    #[test]
    fn test_unresolved_variables() {
        let message = "{{a}} {{b}} {{c}} {{a}}";
        let values = ctx(&[("a", "1"), ("b", "")]);
        assert_eq!(unresolved_variables(message, &values), vec!["b", "c"]);
        assert!(unresolved_variables("none", &values).is_empty());
    }
}
