//! Overlap resolution across all candidate sources

use std::cmp::Reverse;
use std::collections::BTreeMap;

use bc_core::Redaction;
use tracing::debug;

use crate::candidate::Candidate;

/// Reduce candidates to a non-overlapping set, sorted by start.
///
/// Candidates are ranked by length (longer first), then source (literals
/// before recognizer attributions), then start offset, then input order.
/// Each one is accepted unless it overlaps an already accepted span, so for
/// any overlapping pair the higher-ranked span survives. Touching spans are
/// both kept.
pub fn reconcile(candidates: Vec<Candidate>) -> Vec<Redaction> {
    let total = candidates.len();

    let mut ranked: Vec<(usize, Candidate)> = candidates
        .into_iter()
        .filter(|c| !c.is_empty())
        .enumerate()
        .collect();
    ranked.sort_by_key(|(index, c)| (Reverse(c.len()), c.source, c.start, *index));

    // start -> accepted candidate; accepted spans never overlap
    let mut accepted: BTreeMap<usize, Candidate> = BTreeMap::new();
    for (_, candidate) in ranked {
        let blocked = accepted
            .range(..candidate.end)
            .next_back()
            .is_some_and(|(_, prev)| prev.end > candidate.start);
        if !blocked {
            accepted.insert(candidate.start, candidate);
        }
    }

    debug!(candidates = total, kept = accepted.len(), "reconciled spans");
    accepted.into_values().map(Candidate::into_redaction).collect()
}
