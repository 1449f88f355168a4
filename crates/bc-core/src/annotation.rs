//! Redaction annotations

use serde::{Deserialize, Serialize};

/// A span of the narrative marked for masking.
///
/// Offsets are byte offsets into the UTF-8 narrative and always fall on
/// character boundaries. `text` is the placeholder label written between
/// angle brackets when the annotation is applied.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Redaction {
    pub start: usize,
    pub end: usize,
    pub text: String,
    pub kind: RedactionKind,
}

impl Redaction {
    pub fn new(start: usize, end: usize, text: impl Into<String>, kind: RedactionKind) -> Self {
        Self {
            start,
            end,
            text: text.into(),
            kind,
        }
    }

    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Whether two spans share at least one byte
    pub fn overlaps(&self, other: &Redaction) -> bool {
        self.start < other.end && other.start < self.end
    }
}

/// How a redaction was produced
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RedactionKind {
    /// Matched an individual's canonical name
    Name,
    /// Matched one of an individual's aliases
    Alias,
    /// Caller-supplied literal
    Literal,
    Other,
}

/// Placeholder label policy for annotations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LabelStyle {
    /// Individuals by canonical name, literals as written
    #[default]
    Verbatim,
    /// Individuals by role and list position ("Person 1"), literals by category
    Indexed,
}

impl std::str::FromStr for LabelStyle {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "verbatim" => Ok(Self::Verbatim),
            "indexed" => Ok(Self::Indexed),
            other => Err(format!("unknown label style '{}'", other)),
        }
    }
}
