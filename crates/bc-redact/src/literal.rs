//! Forced matching of caller-supplied literal strings

use std::collections::BTreeMap;

use bc_core::text;
use bc_core::{LabelStyle, Locale, NormalizedText, RedactionKind};

use crate::candidate::{Candidate, CandidateSource};

/// Category name -> literal strings to redact verbatim
pub type Literals = BTreeMap<String, Vec<String>>;

struct Entry {
    category: String,
    literal: String,
    needle: Vec<char>,
}

/// Finds every occurrence of each literal, compared under locale rules
pub struct LiteralMatcher {
    entries: Vec<Entry>,
    label_style: LabelStyle,
}

impl LiteralMatcher {
    pub fn new(literals: &Literals, locale: &Locale, label_style: LabelStyle) -> Self {
        let entries = literals
            .iter()
            .flat_map(|(category, list)| list.iter().map(move |literal| (category, literal)))
            .filter_map(|(category, literal)| {
                let needle: Vec<char> = text::normalize(literal, locale).chars().collect();
                (!needle.is_empty()).then(|| Entry {
                    category: category.clone(),
                    literal: literal.clone(),
                    needle,
                })
            })
            .collect();

        Self {
            entries,
            label_style,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Candidates for every occurrence; overlaps are left to the reconciler
    pub fn find(&self, narrative: &NormalizedText) -> Vec<Candidate> {
        let mut candidates = Vec::new();
        for entry in &self.entries {
            let label = match self.label_style {
                LabelStyle::Verbatim => entry.literal.as_str(),
                LabelStyle::Indexed => entry.category.as_str(),
            };
            for span in narrative.find_all(&entry.needle) {
                candidates.push(Candidate {
                    start: span.start,
                    end: span.end,
                    label: label.to_string(),
                    kind: RedactionKind::Literal,
                    source: CandidateSource::Literal,
                });
            }
        }
        candidates
    }
}
