//! Firewall expression rendering.
//!
//! # Responsibilities
//! - Turn a path set into one negated boolean expression over the request
//!   path field
//! - Route every entry containing `*` anywhere through a `wildcard` clause
//!   and everything else through a single `in` set
//!
//! # Design Decisions
//! - The partition here is on the raw trailing character, not on segment
//!   structure: `/prefix*` is a literal to the matcher but must still be
//!   rendered as a wildcard clause or the edge would compare it verbatim
//! - An empty path set renders `not ()`; the caller decides whether that
//!   is worth shipping

/// Request field the generated expression tests against.
pub const URI_PATH_FIELD: &str = "http.request.uri.path";

/// Render the allowlist as a single negated expression.
///
/// Everything the paths cover is allowed through; the surrounding rule is
/// expected to block whatever matches the expression.
pub fn render_expression<I, S>(paths: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let (wildcards, exacts): (Vec<String>, Vec<String>) = paths
        .into_iter()
        .map(|p| p.as_ref().to_string())
        .partition(|p| p.ends_with('*'));

    let mut expression = String::from("not (");

    let wildcard_clauses = wildcards
        .iter()
        .map(|p| format!("{URI_PATH_FIELD} wildcard \"{p}\""))
        .collect::<Vec<_>>()
        .join(" or ");
    expression.push_str(&wildcard_clauses);

    if !wildcards.is_empty() && !exacts.is_empty() {
        expression.push_str(" or ");
    }

    if !exacts.is_empty() {
        let set = exacts
            .iter()
            .map(|p| format!("\"{p}\""))
            .collect::<Vec<_>>()
            .join(" ");
        expression.push_str(&format!("{URI_PATH_FIELD} in {{{set}}}"));
    }

    expression.push(')');
    expression
}

/// Expression size as the provider counts it.
pub fn expression_chars(expression: &str) -> usize {
    expression.chars().count()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mixed_paths_render_both_clauses() {
        let expr = render_expression(["/api/users/*", "/blog", "/about"]);
        assert_eq!(
            expr,
            "not (http.request.uri.path wildcard \"/api/users/*\" \
             or http.request.uri.path in {\"/blog\" \"/about\"})"
        );
    }

    #[test]
    fn test_bare_trailing_star_literals_render_as_wildcards() {
        let expr = render_expression(["/@*", "/prefix*"]);
        assert_eq!(
            expr,
            "not (http.request.uri.path wildcard \"/@*\" \
             or http.request.uri.path wildcard \"/prefix*\")"
        );
    }

    #[test]
    fn test_exacts_only() {
        let expr = render_expression(["/blog"]);
        assert_eq!(expr, "not (http.request.uri.path in {\"/blog\"})");
    }

    #[test]
    fn test_internal_wildcard_goes_to_the_in_set() {
        // Only a trailing star selects the wildcard operator.
        let expr = render_expression(["/api/*/x"]);
        assert_eq!(expr, "not (http.request.uri.path in {\"/api/*/x\"})");
    }

    #[test]
    fn test_empty_set_renders_degenerate_expression() {
        let expr = render_expression(Vec::<String>::new());
        assert_eq!(expr, "not ()");
    }

    #[test]
    fn test_expression_chars_counts_characters() {
        assert_eq!(expression_chars("not ()"), 6);
    }
}
