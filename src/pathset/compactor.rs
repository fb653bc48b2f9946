//! Size-driven compaction loop.
//!
//! # Responsibilities
//! - Run the one-time optimize pass, then condense until the rendered
//!   expression fits the character budget
//! - Stop at a fixed point or at the pass cap even when still over budget
//! - Report the over-budget case as data, not as a failure
//!
//! # Design Decisions
//! - Every transform is a pure function; this driver is the only place
//!   that threads one pass's output into the next
//! - An empty inventory is an invalid call, not an empty expression: a
//!   `not ()` rule would block the entire site
//! - Over budget after all passes is survivable (the operator may raise
//!   the budget or trim the inventory), so it comes back in the outcome
//!   with a warning instead of an error

use thiserror::Error;

use crate::pathset::condenser::condense;
use crate::pathset::expression::{expression_chars, render_expression};
use crate::pathset::optimizer::optimize;

/// Errors from the compaction driver.
#[derive(Debug, Error)]
pub enum PathSetError {
    /// Compaction needs at least one path to work with.
    #[error("cannot build an expression from an empty path inventory")]
    EmptyInventory,
}

/// Result of a full compaction run.
#[derive(Debug, Clone)]
pub struct CompactionOutcome {
    /// The rendered firewall expression.
    pub expression: String,
    /// The path set the expression was rendered from.
    pub paths: Vec<String>,
    /// How many condense passes ran.
    pub condense_passes: usize,
    /// Whether the expression fits the configured budget.
    pub within_budget: bool,
    /// The budget the run was measured against, in characters.
    pub budget: usize,
}

impl CompactionOutcome {
    /// Expression size in characters.
    pub fn expression_chars(&self) -> usize {
        expression_chars(&self.expression)
    }
}

/// Drives optimize and condense until the expression fits.
#[derive(Debug, Clone)]
pub struct Compactor {
    budget: usize,
    max_passes: usize,
}

impl Compactor {
    /// Create a driver with an explicit character budget and pass cap.
    pub fn new(budget: usize, max_passes: usize) -> Self {
        Self { budget, max_passes }
    }

    /// Compact a raw inventory into a budget-bounded expression.
    pub fn compact(&self, raw: &[String]) -> Result<CompactionOutcome, PathSetError> {
        if raw.is_empty() {
            return Err(PathSetError::EmptyInventory);
        }

        let mut paths = optimize(raw);
        let mut expression = render_expression(&paths);
        let mut passes = 0;

        while expression_chars(&expression) > self.budget && passes < self.max_passes {
            let next = condense(&paths);
            passes += 1;
            if next == paths {
                tracing::debug!(passes, "Condense reached a fixed point");
                break;
            }
            paths = next;
            expression = render_expression(&paths);
            tracing::debug!(
                pass = passes,
                paths = paths.len(),
                expression_chars = expression_chars(&expression),
                "Condensed path set"
            );
        }

        let within_budget = expression_chars(&expression) <= self.budget;
        if !within_budget {
            tracing::warn!(
                expression_chars = expression_chars(&expression),
                budget = self.budget,
                passes,
                "Expression still over budget after compaction; review the inventory"
            );
        }

        Ok(CompactionOutcome {
            expression,
            paths,
            condense_passes: passes,
            within_budget,
            budget: self.budget,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn paths(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_empty_inventory_is_rejected() {
        let compactor = Compactor::new(4096, 10);
        let err = compactor.compact(&[]).unwrap_err();
        assert!(matches!(err, PathSetError::EmptyInventory));
    }

    #[test]
    fn test_under_budget_runs_no_condense_pass() {
        let compactor = Compactor::new(4096, 10);
        let outcome = compactor
            .compact(&paths(&["/blog", "/about"]))
            .unwrap();
        assert_eq!(outcome.condense_passes, 0);
        assert!(outcome.within_budget);
        assert_eq!(outcome.paths, vec!["/about", "/blog"]);
        assert_eq!(
            outcome.expression,
            "not (http.request.uri.path in {\"/about\" \"/blog\"})"
        );
    }

    #[test]
    fn test_tight_budget_forces_condensing() {
        let inventory = paths(&[
            "/mailcoach/1234/subscribers",
            "/mailcoach/1234/campaigns",
            "/mailcoach/5678/lists",
            "/mailcoach/5678/segments",
        ]);
        let compactor = Compactor::new(80, 10);
        let outcome = compactor.compact(&inventory).unwrap();
        assert!(outcome.condense_passes >= 1);
        assert!(outcome.within_budget);
        assert!(outcome.expression_chars() <= 80);
        assert_eq!(outcome.paths, vec!["/mailcoach/*"]);
    }

    #[test]
    fn test_unreachable_budget_reports_over_budget() {
        let inventory = paths(&["/a/b/c", "/d/e/f", "/g/h/i"]);
        let compactor = Compactor::new(10, 10);
        let outcome = compactor.compact(&inventory).unwrap();
        assert!(!outcome.within_budget);
        assert!(outcome.condense_passes <= 10);
        assert!(outcome.expression_chars() > 10);
    }

    #[test]
    fn test_pass_cap_bounds_the_loop() {
        let inventory = paths(&["/a/b/c/d", "/a/b/c/e", "/f/g/h/i"]);
        let compactor = Compactor::new(1, 2);
        let outcome = compactor.compact(&inventory).unwrap();
        assert!(outcome.condense_passes <= 2);
        assert!(!outcome.within_budget);
    }

    #[test]
    fn test_deterministic() {
        let inventory = paths(&[
            "/api/users/*/posts/*",
            "/api/users/*/comments/*",
            "/blog",
            "/images/logo.png",
        ]);
        let compactor = Compactor::new(60, 10);
        let a = compactor.compact(&inventory).unwrap();
        let b = compactor.compact(&inventory).unwrap();
        assert_eq!(a.expression, b.expression);
        assert_eq!(a.paths, b.paths);
        assert_eq!(a.condense_passes, b.condense_passes);
    }
}
