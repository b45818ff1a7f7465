//! Template Placeholder Resolution
//!
//! Scans template strings for `{{variable}}` placeholders and substitutes
//! them from a key/value context.
//!
//! The placeholder grammar is deliberately small: `{{` followed by one or
//! more word characters (ASCII letters, digits, underscore) followed by
//! `}}`. No whitespace inside the braces, no nesting, no escape syntax.
//! Matching is left-to-right and non-overlapping.
//!
//! Resolution never fails: a key absent from the context renders as a
//! literal `[missing: name]` marker in the output, which callers can detect
//! with [`contains_missing`].

use std::collections::HashMap;

/// Prefix of the marker substituted for an unresolvable placeholder.
pub const MISSING_PREFIX: &str = "[missing:";

/// A `{{name}}` occurrence found in a template string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Placeholder {
    /// Variable name between the braces, in its original casing
    pub name: String,

    /// Byte offset of the opening `{{`
    pub start: usize,

    /// Byte offset just past the closing `}}`
    pub end: usize,
}

/// True for characters allowed inside a placeholder name.
fn is_word_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_'
}

/// Extracts every placeholder from a template string.
///
/// # Example
/// ```
/// use flowcheck::template::extract_placeholders;
///
/// let found = extract_placeholders("do {{task}} on {{repo}}");
/// let names: Vec<_> = found.iter().map(|p| p.name.as_str()).collect();
/// assert_eq!(names, vec!["task", "repo"]);
/// ```
pub fn extract_placeholders(text: &str) -> Vec<Placeholder> {
    let bytes = text.as_bytes();
    let mut found = Vec::new();
    let mut i = 0;

    // Shortest possible placeholder is "{{x}}", five bytes.
    while i + 5 <= bytes.len() {
        if bytes[i] != b'{' || bytes[i + 1] != b'{' {
            i += 1;
            continue;
        }

        let name_start = i + 2;
        let mut j = name_start;
        while j < bytes.len() && is_word_byte(bytes[j]) {
            j += 1;
        }

        let name_ok = j > name_start;
        let closed = j + 1 < bytes.len() && bytes[j] == b'}' && bytes[j + 1] == b'}';

        if name_ok && closed {
            found.push(Placeholder {
                name: text[name_start..j].to_string(),
                start: i,
                end: j + 2,
            });
            i = j + 2;
        } else {
            // Not a placeholder at this position; "{{{a}}" still yields
            // the "{{a}}" starting one byte later.
            i += 1;
        }
    }

    found
}

/// Extracts just the placeholder names, in order of appearance.
pub fn extract_placeholder_names(text: &str) -> Vec<String> {
    extract_placeholders(text).into_iter().map(|p| p.name).collect()
}

/// Resolves every placeholder in a template against a context.
///
/// Lookup order per placeholder:
/// 1. exact key match;
/// 2. the lowercased name (tolerates habitual case variants like `{{Task}}`);
/// 3. otherwise the literal `[missing: name]`, name in its original casing.
///
/// Substituted values are inserted verbatim and never re-scanned.
///
/// # Example
/// ```
/// use std::collections::HashMap;
/// use flowcheck::template::resolve_template;
///
/// let mut context = HashMap::new();
/// context.insert("task".to_string(), "fix the bug".to_string());
///
/// assert_eq!(resolve_template("do {{task}}", &context), "do fix the bug");
/// assert_eq!(resolve_template("do {{TASK}}", &context), "do fix the bug");
/// assert_eq!(resolve_template("do {{other}}", &context), "do [missing: other]");
/// ```
pub fn resolve_template(template: &str, context: &HashMap<String, String>) -> String {
    let placeholders = extract_placeholders(template);
    if placeholders.is_empty() {
        return template.to_string();
    }

    let mut resolved = String::with_capacity(template.len());
    let mut cursor = 0;

    for placeholder in &placeholders {
        resolved.push_str(&template[cursor..placeholder.start]);

        match lookup(context, &placeholder.name) {
            Some(value) => resolved.push_str(value),
            None => {
                resolved.push_str(MISSING_PREFIX);
                resolved.push(' ');
                resolved.push_str(&placeholder.name);
                resolved.push(']');
            }
        }

        cursor = placeholder.end;
    }

    resolved.push_str(&template[cursor..]);
    resolved
}

/// Looks up a name with the lowercase fallback.
fn lookup<'a>(context: &'a HashMap<String, String>, name: &str) -> Option<&'a str> {
    if let Some(value) = context.get(name) {
        return Some(value);
    }
    context.get(&name.to_lowercase()).map(String::as_str)
}

/// Returns true if a resolved string still carries a missing-key marker.
pub fn contains_missing(text: &str) -> bool {
    text.contains(MISSING_PREFIX)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn context(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_extract_single_placeholder() {
        let found = extract_placeholders("hello {{name}}!");
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].name, "name");
        assert_eq!(&"hello {{name}}!"[found[0].start..found[0].end], "{{name}}");
    }

    #[test]
    fn test_extract_multiple_in_order() {
        let names = extract_placeholder_names("{{a}} then {{b}} then {{a}}");
        assert_eq!(names, vec!["a", "b", "a"]);
    }

    #[test]
    fn test_extract_rejects_whitespace_inside_braces() {
        assert!(extract_placeholders("{{ task }}").is_empty());
        assert!(extract_placeholders("{{task }}").is_empty());
    }

    #[test]
    fn test_extract_rejects_single_braces_and_empty() {
        assert!(extract_placeholders("{task}").is_empty());
        assert!(extract_placeholders("{{}}").is_empty());
        assert!(extract_placeholders("no placeholders here").is_empty());
    }

    #[test]
    fn test_extract_triple_brace_prefix() {
        let found = extract_placeholders("{{{a}}");
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].name, "a");
        assert_eq!(found[0].start, 1);
    }

    #[test]
    fn test_extract_word_characters_only() {
        let names = extract_placeholder_names("{{plan_file2}} {{foo-bar}}");
        assert_eq!(names, vec!["plan_file2"]);
    }

    #[test]
    fn test_resolve_exact_match() {
        let ctx = context(&[("task", "my task")]);
        assert_eq!(resolve_template("task: {{task}}", &ctx), "task: my task");
    }

    #[test]
    fn test_resolve_lowercase_fallback() {
        let ctx = context(&[("task", "x")]);
        assert_eq!(resolve_template("{{Task}}", &ctx), "x");
        assert_eq!(resolve_template("{{TASK}}", &ctx), "x");
        assert_eq!(resolve_template("{{task}}", &ctx), "x");
    }

    #[test]
    fn test_resolve_exact_match_wins_over_fallback() {
        let ctx = context(&[("Task", "exact"), ("task", "lower")]);
        assert_eq!(resolve_template("{{Task}}", &ctx), "exact");
    }

    #[test]
    fn test_resolve_missing_marker_exact_format() {
        let ctx = context(&[("task", "my task")]);
        let resolved = resolve_template("task: {{task}} and {{missing}}", &ctx);
        assert_eq!(resolved, "task: my task and [missing: missing]");
    }

    #[test]
    fn test_resolve_missing_keeps_original_casing() {
        let ctx = context(&[]);
        assert_eq!(resolve_template("{{PlanFile}}", &ctx), "[missing: PlanFile]");
    }

    #[test]
    fn test_resolve_is_not_recursive() {
        let ctx = context(&[("outer", "{{inner}}"), ("inner", "value")]);
        assert_eq!(resolve_template("{{outer}}", &ctx), "{{inner}}");
    }

    #[test]
    fn test_resolve_full_context_has_no_missing() {
        let ctx = context(&[("task", "t"), ("repo", "r"), ("branch", "b")]);
        let resolved = resolve_template("{{task}} / {{repo}} / {{branch}}", &ctx);
        assert!(!contains_missing(&resolved));
        assert_eq!(resolved, "t / r / b");
    }

    #[test]
    fn test_resolve_no_placeholders_passthrough() {
        let ctx = context(&[("task", "t")]);
        assert_eq!(resolve_template("plain text", &ctx), "plain text");
    }

    #[test]
    fn test_contains_missing() {
        assert!(contains_missing("before [missing: x] after"));
        assert!(!contains_missing("all resolved"));
    }
}
