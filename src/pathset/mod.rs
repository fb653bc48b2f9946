//! Path-set reduction core.
//!
//! # Data Flow
//! ```text
//! raw inventory (routes + assets + extras)
//!     → normalize.rs (leading slash, byte sort)
//!     → optimizer.rs (dedup, wildcard coverage pruning)
//!     → compactor.rs drives, while over budget:
//!         condenser.rs (sibling collapse)
//!         expression.rs (render, measure)
//!     → CompactionOutcome (expression + surviving paths)
//! ```
//!
//! # Design Decisions
//! - Every stage is a pure function over path sequences; only the
//!   compactor threads state between passes
//! - Matching is segment-wise comparison, never pattern compilation
//! - Subtree wildcards are inclusive of their base path
//! - `/` next to `/*` is the one pair coverage never collapses

pub mod compactor;
pub mod condenser;
pub mod expression;
pub mod matcher;
pub mod normalize;
pub mod optimizer;

pub use compactor::{CompactionOutcome, Compactor, PathSetError};
pub use condenser::condense;
pub use expression::{expression_chars, render_expression, URI_PATH_FIELD};
pub use matcher::{covers, is_subtree, is_wildcard, WILDCARD};
pub use normalize::{normalize, normalize_and_sort, segments};
pub use optimizer::optimize;
