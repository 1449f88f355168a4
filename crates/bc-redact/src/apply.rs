//! Rewriting a narrative from its redaction annotations

use bc_core::{Error, Redaction, Result};

/// Replace every annotated span with `<label>`.
///
/// Annotations may arrive in any order but must lie inside the narrative, on
/// character boundaries, and must not overlap. Validation happens before any
/// edit, so an error never yields partially rewritten text. Spans are applied
/// from the highest start offset down, which leaves the offsets of the
/// not-yet-applied (earlier) spans valid.
pub fn apply_annotations(narrative: &str, annotations: &[Redaction]) -> Result<String> {
    let len = narrative.len();
    let mut ordered: Vec<&Redaction> = annotations.iter().collect();

    for r in &ordered {
        if r.start >= r.end
            || r.end > len
            || !narrative.is_char_boundary(r.start)
            || !narrative.is_char_boundary(r.end)
        {
            return Err(Error::InvalidSpan {
                start: r.start,
                end: r.end,
                len,
            });
        }
    }

    ordered.sort_by_key(|r| (r.start, r.end));
    for pair in ordered.windows(2) {
        if pair[0].end > pair[1].start {
            return Err(Error::OverlappingAnnotations {
                first: (pair[0].start, pair[0].end),
                second: (pair[1].start, pair[1].end),
            });
        }
    }

    let mut redacted = narrative.to_string();
    for r in ordered.iter().rev() {
        redacted.replace_range(r.start..r.end, &format!("<{}>", r.text));
    }
    Ok(redacted)
}
