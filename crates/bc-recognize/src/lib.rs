//! Entity recognition capability
//!
//! The redaction pipeline consumes recognition through the `Recognizer`
//! trait. `HeuristicRecognizer` is the built-in, model-free backend;
//! `StaticRecognizer` replays mentions produced elsewhere.

pub mod heuristic;
pub mod replay;

use bc_core::Locale;
use serde::{Deserialize, Serialize};

pub use heuristic::HeuristicRecognizer;
pub use replay::StaticRecognizer;

/// Coarse classification of a mention
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityType {
    Person,
    Organization,
    Location,
    Other,
}

/// A candidate entity mention (byte offsets into the narrative)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Mention {
    pub start: usize,
    pub end: usize,
    pub text: String,
    pub entity_type: EntityType,
}

impl Mention {
    pub fn new(narrative: &str, start: usize, end: usize, entity_type: EntityType) -> Self {
        Self {
            start,
            end,
            text: narrative[start..end].to_string(),
            entity_type,
        }
    }
}

/// Pluggable recognition backend.
///
/// Implementations must be deterministic for identical input and locale,
/// and safe to call concurrently through a shared reference.
pub trait Recognizer: Send + Sync {
    /// Backend identifier (e.g. "heuristic")
    fn id(&self) -> &str;

    /// Load underlying resources. Idempotent; called eagerly by `preload`
    /// and lazily before the first recognition.
    fn ensure_ready(&self) -> anyhow::Result<()> {
        Ok(())
    }

    /// Candidate mentions in `narrative`
    fn recognize(&self, narrative: &str, locale: &Locale) -> anyhow::Result<Vec<Mention>>;
}

impl<R: Recognizer + ?Sized> Recognizer for std::sync::Arc<R> {
    fn id(&self) -> &str {
        (**self).id()
    }

    fn ensure_ready(&self) -> anyhow::Result<()> {
        (**self).ensure_ready()
    }

    fn recognize(&self, narrative: &str, locale: &Locale) -> anyhow::Result<Vec<Mention>> {
        (**self).recognize(narrative, locale)
    }
}
