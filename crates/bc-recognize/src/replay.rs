use bc_core::Locale;

use crate::{EntityType, Mention, Recognizer};

/// Recognizer that replays a fixed set of mentions.
///
/// Used when recognition already ran upstream, and in tests.
#[derive(Debug, Clone, Default)]
pub struct StaticRecognizer {
    mentions: Vec<Mention>,
    failure: Option<String>,
}

impl StaticRecognizer {
    pub fn new(mentions: Vec<Mention>) -> Self {
        Self {
            mentions,
            failure: None,
        }
    }

    /// Mentions for every occurrence of each surface string in `narrative`
    pub fn locate<'a, I>(narrative: &str, surfaces: I) -> Self
    where
        I: IntoIterator<Item = (&'a str, EntityType)>,
    {
        let mut mentions = Vec::new();
        for (surface, entity_type) in surfaces {
            if surface.is_empty() {
                continue;
            }
            for (start, matched) in narrative.match_indices(surface) {
                mentions.push(Mention::new(
                    narrative,
                    start,
                    start + matched.len(),
                    entity_type,
                ));
            }
        }
        mentions.sort_by_key(|m| (m.start, m.end));
        Self::new(mentions)
    }

    /// Recognizer whose every call fails with `message`
    pub fn failing(message: impl Into<String>) -> Self {
        Self {
            mentions: Vec::new(),
            failure: Some(message.into()),
        }
    }
}

impl Recognizer for StaticRecognizer {
    fn id(&self) -> &str {
        "static"
    }

    fn recognize(&self, narrative: &str, _locale: &Locale) -> anyhow::Result<Vec<Mention>> {
        if let Some(message) = &self.failure {
            anyhow::bail!("{}", message);
        }

        // Offsets must address this narrative
        let mentions = self
            .mentions
            .iter()
            .filter(|m| {
                m.start < m.end
                    && m.end <= narrative.len()
                    && narrative.is_char_boundary(m.start)
                    && narrative.is_char_boundary(m.end)
            })
            .cloned()
            .collect();
        Ok(mentions)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_locate_finds_every_occurrence() {
        let narrative = "Jane saw Smith. Smith saw Jane.";
        let recognizer = StaticRecognizer::locate(
            narrative,
            [("Jane", EntityType::Person), ("Smith", EntityType::Person)],
        );
        let mentions = recognizer.recognize(narrative, &Locale::default()).unwrap();

        let spans: Vec<(usize, usize)> = mentions.iter().map(|m| (m.start, m.end)).collect();
        assert_eq!(spans, vec![(0, 4), (9, 14), (16, 21), (26, 30)]);
    }

    #[test]
    fn test_failing_recognizer() {
        let recognizer = StaticRecognizer::failing("model unavailable");
        let err = recognizer
            .recognize("anything", &Locale::default())
            .unwrap_err();
        assert_eq!(err.to_string(), "model unavailable");
    }

    #[test]
    fn test_out_of_range_mentions_dropped() {
        let recognizer = StaticRecognizer::new(vec![Mention {
            start: 2,
            end: 40,
            text: "x".to_string(),
            entity_type: EntityType::Other,
        }]);
        assert!(recognizer.recognize("short", &Locale::default()).unwrap().is_empty());
    }
}
