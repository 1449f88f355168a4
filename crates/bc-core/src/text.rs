//! Locale-aware text normalization and segmentation
//!
//! Comparison happens on a normalized copy of the narrative (NFKC, lowercase,
//! collapsed whitespace, optionally accent-folded). Every normalized character
//! remembers the byte range of the source cluster it came from, so positions
//! found in normalized space map back to exact narrative offsets.

use std::ops::Range;
use std::sync::LazyLock;

use regex::Regex;
use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::is_combining_mark;

use crate::Locale;

static TOKEN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[\p{L}\p{M}\p{N}]+(?:['’.\-][\p{L}\p{M}\p{N}]+)*")
        .expect("token pattern should compile")
});

/// A word-like token of the source text
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token {
    pub start: usize,
    pub end: usize,
}

/// Split text into word tokens (byte offsets into `text`)
pub fn tokenize(text: &str) -> Vec<Token> {
    TOKEN
        .find_iter(text)
        .map(|m| Token {
            start: m.start(),
            end: m.end(),
        })
        .collect()
}

/// Normalize a string for comparison under `locale`
pub fn normalize(text: &str, locale: &Locale) -> String {
    let normalized: String = NormalizedText::new(text, locale).chars.into_iter().collect();
    normalized.trim().to_string()
}

/// Normalized view of a source string with a map back to source offsets
#[derive(Debug, Clone)]
pub struct NormalizedText {
    chars: Vec<char>,
    origins: Vec<Range<usize>>,
}

impl NormalizedText {
    pub fn new(source: &str, locale: &Locale) -> Self {
        let mut chars = Vec::with_capacity(source.len());
        let mut origins: Vec<Range<usize>> = Vec::with_capacity(source.len());

        for cluster in clusters(source) {
            let text = &source[cluster.clone()];

            if text.chars().all(char::is_whitespace) {
                if chars.last() == Some(&' ') {
                    if let Some(last) = origins.last_mut() {
                        last.end = cluster.end;
                    }
                } else {
                    chars.push(' ');
                    origins.push(cluster);
                }
                continue;
            }

            let folded = fold_cluster(text, locale);
            if folded.is_empty() {
                // Nothing survived folding; attach the bytes to the previous char
                if let Some(last) = origins.last_mut() {
                    last.end = cluster.end;
                }
                continue;
            }
            for c in folded.chars() {
                chars.push(c);
                origins.push(cluster.clone());
            }
        }

        Self { chars, origins }
    }

    /// Source byte range covered by normalized chars `range`
    pub fn source_span(&self, range: Range<usize>) -> Option<Range<usize>> {
        if range.start >= range.end || range.end > self.chars.len() {
            return None;
        }
        Some(self.origins[range.start].start..self.origins[range.end - 1].end)
    }

    /// Every occurrence of `needle` that starts and ends on token and cluster
    /// boundaries, as source byte ranges in ascending order.
    pub fn find_all(&self, needle: &[char]) -> Vec<Range<usize>> {
        let mut found = Vec::new();
        if needle.is_empty() || needle.len() > self.chars.len() {
            return found;
        }

        for i in 0..=(self.chars.len() - needle.len()) {
            let j = i + needle.len();
            if self.chars[i..j] != *needle {
                continue;
            }
            if !self.is_boundary(i, j) {
                continue;
            }
            if let Some(span) = self.source_span(i..j) {
                found.push(span);
            }
        }
        found
    }

    fn is_boundary(&self, i: usize, j: usize) -> bool {
        // Must not split a source cluster
        if i > 0 && self.origins[i - 1] == self.origins[i] {
            return false;
        }
        if j < self.chars.len() && self.origins[j - 1] == self.origins[j] {
            return false;
        }

        // Word-edged needles must sit on token edges
        if is_word_char(self.chars[i]) && i > 0 && is_word_char(self.chars[i - 1]) {
            return false;
        }
        if is_word_char(self.chars[j - 1]) && j < self.chars.len() && is_word_char(self.chars[j])
        {
            return false;
        }
        true
    }
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || is_combining_mark(c)
}

/// Base characters with their trailing combining marks
fn clusters(source: &str) -> Vec<Range<usize>> {
    let mut out: Vec<Range<usize>> = Vec::new();
    for (idx, c) in source.char_indices() {
        let end = idx + c.len_utf8();
        match out.last_mut() {
            Some(last) if is_combining_mark(c) => last.end = end,
            _ => out.push(idx..end),
        }
    }
    out
}

fn fold_cluster(text: &str, locale: &Locale) -> String {
    let composed: String = text.nfkc().collect();

    let stripped: String = if locale.folds_diacritics() {
        composed.nfd().filter(|c| !is_combining_mark(*c)).nfc().collect()
    } else {
        composed
    };

    let mut out = String::with_capacity(stripped.len());
    for c in stripped.chars() {
        match c {
            'I' if locale.turkic_casing() => out.push('ı'),
            'İ' if locale.turkic_casing() => out.push('i'),
            c if c.is_whitespace() => out.push(' '),
            c => out.extend(c.to_lowercase()),
        }
    }
    out
}
