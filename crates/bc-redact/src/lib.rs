//! Redaction pipeline stages
//!
//! - **`literal`**: forced matching of caller-supplied literals
//! - **`resolver`**: attribution of recognizer mentions to individuals
//! - **`reconcile`**: overlap resolution into one non-overlapping edit set
//! - **`apply`**: rewriting the narrative from annotations

pub mod apply;
pub mod candidate;
pub mod literal;
pub mod reconcile;
pub mod resolver;

pub use apply::apply_annotations;
pub use candidate::{Candidate, CandidateSource};
pub use literal::{LiteralMatcher, Literals};
pub use reconcile::reconcile;
pub use resolver::{NameResolver, ResolverOptions};
