//! Narrative redaction engine
//!
//! `Redactor` wires the pipeline: individual normalization, literal
//! matching and recognition, name resolution, reconciliation. Every entry
//! point on `Redactor` takes the locale explicitly. The free functions at the
//! bottom of this module are a convenience layer over a shared heuristic
//! redactor and the process-wide default locale.

use std::sync::{Arc, LazyLock, RwLock};
use std::time::Instant;

use bc_core::{
    Error, Individual, IndividualDescriptor, LabelStyle, Locale, NormalizedText, Redaction,
    Result,
};
use bc_recognize::{HeuristicRecognizer, Recognizer};
use bc_redact::{LiteralMatcher, NameResolver, ResolverOptions, reconcile};
use tracing::{debug, info, warn};

pub use bc_redact::{Literals, apply_annotations};

/// Per-call options for `annotate` and `redact`
#[derive(Debug, Clone, PartialEq)]
pub struct AnnotateOptions {
    /// Mask officer names as well as persons
    pub redact_officers_from_text: bool,
    /// Strings to redact regardless of recognition, by category
    pub literals: Option<Literals>,
    pub label_style: LabelStyle,
}

impl Default for AnnotateOptions {
    fn default() -> Self {
        Self {
            redact_officers_from_text: true,
            literals: None,
            label_style: LabelStyle::default(),
        }
    }
}

impl AnnotateOptions {
    pub fn with_literals(mut self, literals: Literals) -> Self {
        self.literals = Some(literals);
        self
    }

    pub fn keep_officers(mut self) -> Self {
        self.redact_officers_from_text = false;
        self
    }
}

/// Stateless redaction engine over a recognizer
#[derive(Clone)]
pub struct Redactor {
    recognizer: Arc<dyn Recognizer>,
}

impl Redactor {
    pub fn new(recognizer: Arc<dyn Recognizer>) -> Self {
        Self { recognizer }
    }

    pub fn recognizer_id(&self) -> &str {
        self.recognizer.id()
    }

    /// Initialize the recognizer's resources ahead of the first request
    pub fn preload(&self) -> Result<()> {
        let started = Instant::now();
        self.recognizer.ensure_ready().map_err(Error::Recognizer)?;
        info!(
            recognizer = self.recognizer.id(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "recognizer ready"
        );
        Ok(())
    }

    /// Redaction annotations for `narrative`, sorted by start offset.
    ///
    /// The result is mutually non-overlapping. Fails without partial output
    /// if an individual is malformed or the recognizer errors.
    pub fn annotate(
        &self,
        locale: &Locale,
        narrative: &str,
        persons: &[IndividualDescriptor],
        officers: &[IndividualDescriptor],
        options: &AnnotateOptions,
    ) -> Result<Vec<Redaction>> {
        let persons = read_individuals(persons)?;
        let officers = read_individuals(officers)?;

        let resolver = NameResolver::new(
            &persons,
            &officers,
            locale,
            ResolverOptions {
                redact_officers_from_text: options.redact_officers_from_text,
                label_style: options.label_style,
            },
        );

        self.recognizer.ensure_ready().map_err(Error::Recognizer)?;
        let mentions = self
            .recognizer
            .recognize(narrative, locale)
            .map_err(|e| {
                warn!(recognizer = self.recognizer.id(), error = %e, "recognition failed");
                Error::Recognizer(e)
            })?;

        let mut candidates = resolver.resolve(narrative, &mentions);

        if let Some(literals) = &options.literals {
            let matcher = LiteralMatcher::new(literals, locale, options.label_style);
            if !matcher.is_empty() {
                let normalized = NormalizedText::new(narrative, locale);
                let literal_candidates = matcher.find(&normalized);
                debug!(count = literal_candidates.len(), "literal candidates");
                candidates.extend(literal_candidates);
            }
        }

        let annotations = reconcile(candidates);
        debug!(
            locale = %locale,
            persons = persons.len(),
            officers = officers.len(),
            mentions = mentions.len(),
            annotations = annotations.len(),
            "annotated narrative"
        );
        Ok(annotations)
    }

    /// `annotate` followed by `apply_annotations`
    pub fn redact(
        &self,
        locale: &Locale,
        narrative: &str,
        persons: &[IndividualDescriptor],
        officers: &[IndividualDescriptor],
        options: &AnnotateOptions,
    ) -> Result<String> {
        let annotations = self.annotate(locale, narrative, persons, officers, options)?;
        apply_annotations(narrative, &annotations)
    }
}

impl Default for Redactor {
    fn default() -> Self {
        Self::new(Arc::new(HeuristicRecognizer::new()))
    }
}

/// Normalize descriptors, then read the fields matching depends on
fn read_individuals(descriptors: &[IndividualDescriptor]) -> Result<Vec<Individual>> {
    descriptors
        .iter()
        .map(|d| Individual::from_mapping(&d.normalize()))
        .collect()
}

// ============================================================================
// Process-wide defaults
// ============================================================================

static LOCALE: LazyLock<RwLock<Locale>> = LazyLock::new(|| RwLock::new(Locale::default()));

static DEFAULT_REDACTOR: LazyLock<Redactor> = LazyLock::new(Redactor::default);

/// Current process-wide locale.
///
/// Read once at the start of each top-level call. Changing it while calls
/// are in flight is not isolated from them.
pub fn get_locale() -> Locale {
    LOCALE.read().unwrap_or_else(|e| e.into_inner()).clone()
}

/// Replace the process-wide locale (last write wins)
pub fn set_locale(locale: Locale) {
    *LOCALE.write().unwrap_or_else(|e| e.into_inner()) = locale;
}

/// Load the shared recognizer's resources
pub fn preload() -> Result<()> {
    DEFAULT_REDACTOR.preload()
}

/// Annotate with the shared redactor under the process-wide locale
pub fn annotate(
    narrative: &str,
    persons: &[IndividualDescriptor],
    officers: &[IndividualDescriptor],
    options: &AnnotateOptions,
) -> Result<Vec<Redaction>> {
    let locale = get_locale();
    DEFAULT_REDACTOR.annotate(&locale, narrative, persons, officers, options)
}

/// Redact with the shared redactor under the process-wide locale
pub fn redact(
    narrative: &str,
    persons: &[IndividualDescriptor],
    officers: &[IndividualDescriptor],
    options: &AnnotateOptions,
) -> Result<String> {
    let locale = get_locale();
    DEFAULT_REDACTOR.redact(&locale, narrative, persons, officers, options)
}

#[cfg(test)]
mod tests {
    use super::*;
    use bc_recognize::{EntityType, StaticRecognizer};

    fn names(list: &[&str]) -> Vec<IndividualDescriptor> {
        list.iter().map(|n| IndividualDescriptor::from(*n)).collect()
    }

    #[test]
    fn test_malformed_individual_aborts_before_recognition() {
        // A failing recognizer proves recognition never ran
        let redactor = Redactor::new(Arc::new(StaticRecognizer::failing("should not run")));
        let bad = serde_json::json!({"aliases": ["J"]});
        let serde_json::Value::Object(map) = bad else {
            unreachable!()
        };

        let err = redactor
            .annotate(
                &Locale::default(),
                "Jane",
                &[IndividualDescriptor::from(map)],
                &[],
                &AnnotateOptions::default(),
            )
            .unwrap_err();
        assert!(matches!(err, Error::MalformedIndividual(_)));
    }

    #[test]
    fn test_recognizer_failure_propagates() {
        let redactor = Redactor::new(Arc::new(StaticRecognizer::failing("model offline")));
        let err = redactor
            .annotate(
                &Locale::default(),
                "Jane was here.",
                &names(&["Jane"]),
                &[],
                &AnnotateOptions::default(),
            )
            .unwrap_err();
        match err {
            Error::Recognizer(inner) => assert_eq!(inner.to_string(), "model offline"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_indexed_labels() {
        let narrative = "Officer Smith interviewed Jane Doe about Elm Street.";
        let redactor = Redactor::new(Arc::new(StaticRecognizer::locate(
            narrative,
            [("Smith", EntityType::Person), ("Jane Doe", EntityType::Person)],
        )));
        let mut literals = Literals::new();
        literals.insert("address".to_string(), vec!["Elm Street".to_string()]);
        let options = AnnotateOptions {
            label_style: LabelStyle::Indexed,
            ..AnnotateOptions::default()
        }
        .with_literals(literals);

        let out = redactor
            .redact(
                &Locale::default(),
                narrative,
                &names(&["Jane Doe"]),
                &names(&["Smith"]),
                &options,
            )
            .unwrap();
        assert_eq!(
            out,
            "Officer <Officer 1> interviewed <Person 1> about <address>."
        );
    }

    #[test]
    fn test_locale_accessor_round_trip() {
        let original = get_locale();
        set_locale(Locale::parse("es-MX").unwrap());
        assert_eq!(get_locale().to_string(), "es-MX");
        set_locale(original.clone());
        assert_eq!(get_locale(), original);
    }

    #[test]
    fn test_default_redactor_preloads() {
        let redactor = Redactor::default();
        assert_eq!(redactor.recognizer_id(), "heuristic");
        redactor.preload().unwrap();
        preload().unwrap();
    }
}
