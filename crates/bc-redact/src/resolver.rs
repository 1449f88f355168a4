//! Attribution of recognizer mentions to known individuals

use std::collections::HashMap;
use std::collections::hash_map::Entry;

use bc_core::text;
use bc_core::{Individual, LabelStyle, Locale, RedactionKind, Role};
use bc_recognize::Mention;
use tracing::{debug, warn};

use crate::candidate::{Candidate, CandidateSource};

/// Policy knobs for the resolver
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolverOptions {
    pub redact_officers_from_text: bool,
    pub label_style: LabelStyle,
}

impl Default for ResolverOptions {
    fn default() -> Self {
        Self {
            redact_officers_from_text: true,
            label_style: LabelStyle::Verbatim,
        }
    }
}

/// An individual together with its effective role and placeholder label
#[derive(Debug, Clone)]
struct Enrolled {
    role: Role,
    label: String,
}

#[derive(Debug, Clone, Copy)]
struct Attribution {
    owner: usize,
    kind: RedactionKind,
}

/// Matches mentions against the persons and officers lists.
///
/// Lookup keys are locale-normalized names and aliases. When several
/// individuals share a key, the first one enrolled wins: persons before
/// officers, each list in input order, a name before its own aliases.
pub struct NameResolver {
    locale: Locale,
    options: ResolverOptions,
    enrolled: Vec<Enrolled>,
    lookup: HashMap<String, Attribution>,
    /// Longest key, in tokens
    max_tokens: usize,
}

impl NameResolver {
    pub fn new(
        persons: &[Individual],
        officers: &[Individual],
        locale: &Locale,
        options: ResolverOptions,
    ) -> Self {
        let mut resolver = Self {
            locale: locale.clone(),
            options,
            enrolled: Vec::with_capacity(persons.len() + officers.len()),
            lookup: HashMap::new(),
            max_tokens: 0,
        };

        let mut counters: HashMap<Role, usize> = HashMap::new();
        let listed = persons
            .iter()
            .map(|p| (p, Role::Person))
            .chain(officers.iter().map(|o| (o, Role::Officer)));

        for (individual, list_role) in listed {
            let role = individual.role.unwrap_or(list_role);
            let position = {
                let counter = counters.entry(role).or_insert(0);
                *counter += 1;
                *counter
            };
            resolver.enroll(individual, role, position);
        }

        resolver
    }

    fn enroll(&mut self, individual: &Individual, role: Role, position: usize) {
        let owner = self.enrolled.len();
        let label = match (individual.label(), self.options.label_style) {
            (Some(label), _) => label.to_string(),
            (None, LabelStyle::Verbatim) => individual.name.clone(),
            (None, LabelStyle::Indexed) => format!("{} {}", capitalized(role.as_str()), position),
        };
        self.enrolled.push(Enrolled { role, label });

        let keys = std::iter::once((individual.name.as_str(), RedactionKind::Name)).chain(
            individual
                .aliases
                .iter()
                .map(|alias| (alias.as_str(), RedactionKind::Alias)),
        );

        for (surface, kind) in keys {
            let key = text::normalize(surface, &self.locale);
            if key.is_empty() {
                continue;
            }
            let tokens = text::tokenize(&key).len().max(1);
            if let Entry::Vacant(slot) = self.lookup.entry(key) {
                slot.insert(Attribution { owner, kind });
                self.max_tokens = self.max_tokens.max(tokens);
            }
        }
    }

    /// Kept candidates for every mention sub-span naming a known individual.
    ///
    /// Each mention is scanned token by token; at every position the longest
    /// run of tokens whose normalized text is a known key is attributed, and
    /// scanning resumes after it. Mentions naming nobody yield nothing.
    pub fn resolve(&self, narrative: &str, mentions: &[Mention]) -> Vec<Candidate> {
        let mut candidates = Vec::new();
        if self.lookup.is_empty() {
            return candidates;
        }

        let mut discarded_officer = 0usize;
        for mention in mentions {
            if mention.start >= mention.end
                || mention.end > narrative.len()
                || !narrative.is_char_boundary(mention.start)
                || !narrative.is_char_boundary(mention.end)
            {
                warn!(
                    start = mention.start,
                    end = mention.end,
                    "ignoring mention outside narrative bounds"
                );
                continue;
            }

            let tokens: Vec<(usize, usize)> = text::tokenize(&narrative[mention.start..mention.end])
                .into_iter()
                .map(|t| (mention.start + t.start, mention.start + t.end))
                .collect();

            let mut i = 0;
            while i < tokens.len() {
                let longest = self.max_tokens.min(tokens.len() - i);
                let hit = (1..=longest).rev().find_map(|len| {
                    let (start, end) = (tokens[i].0, tokens[i + len - 1].1);
                    let key = text::normalize(&narrative[start..end], &self.locale);
                    self.lookup
                        .get(&key)
                        .map(|attribution| (len, start, end, *attribution))
                });

                let Some((len, start, end, attribution)) = hit else {
                    i += 1;
                    continue;
                };
                i += len;

                let owner = &self.enrolled[attribution.owner];
                if owner.role == Role::Officer && !self.options.redact_officers_from_text {
                    discarded_officer += 1;
                    continue;
                }

                candidates.push(Candidate {
                    start,
                    end,
                    label: owner.label.clone(),
                    kind: attribution.kind,
                    source: CandidateSource::Recognizer,
                });
            }
        }

        debug!(
            mentions = mentions.len(),
            kept = candidates.len(),
            discarded_officer,
            "resolved mentions"
        );
        candidates
    }
}

fn capitalized(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
