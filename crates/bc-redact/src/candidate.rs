use bc_core::{Redaction, RedactionKind};

/// Where a candidate span came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum CandidateSource {
    /// Caller-supplied literal (wins ties)
    Literal,
    /// Recognizer mention attributed to an individual
    Recognizer,
}

/// A span proposed for redaction, before overlap resolution
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    pub start: usize,
    pub end: usize,
    pub label: String,
    pub kind: RedactionKind,
    pub source: CandidateSource,
}

impl Candidate {
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start >= self.end
    }

    pub fn into_redaction(self) -> Redaction {
        Redaction::new(self.start, self.end, self.label, self.kind)
    }
}
