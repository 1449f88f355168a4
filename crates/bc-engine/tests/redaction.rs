use std::sync::Arc;

use bc_core::{Error, Individual, IndividualDescriptor, Locale, Redaction, RedactionKind, Role};
use bc_engine::{AnnotateOptions, Literals, Redactor, apply_annotations};
use bc_recognize::{EntityType, StaticRecognizer};
use proptest::prelude::*;

fn names(list: &[&str]) -> Vec<IndividualDescriptor> {
    list.iter().map(|n| IndividualDescriptor::from(*n)).collect()
}

fn literals(category: &str, values: &[&str]) -> Literals {
    let mut map = Literals::new();
    map.insert(
        category.to_string(),
        values.iter().map(|v| v.to_string()).collect(),
    );
    map
}

fn assert_non_overlapping(annotations: &[Redaction]) {
    for (i, a) in annotations.iter().enumerate() {
        for b in &annotations[i + 1..] {
            assert!(
                a.end <= b.start || b.end <= a.start,
                "{:?} overlaps {:?}",
                a,
                b
            );
        }
    }
}

/// Every annotation's placeholder sits where the earlier edits shifted it
fn assert_bracket_positions(narrative: &str, annotations: &[Redaction], redacted: &str) {
    let mut sorted: Vec<&Redaction> = annotations.iter().collect();
    sorted.sort_by_key(|r| r.start);

    let mut shift: isize = 0;
    for r in sorted {
        let placeholder = format!("<{}>", r.text);
        let at = (r.start as isize + shift) as usize;
        assert_eq!(&redacted[at..at + placeholder.len()], placeholder);
        shift += placeholder.len() as isize - (r.end - r.start) as isize;
    }
    assert_eq!(redacted.len() as isize, narrative.len() as isize + shift);
}

#[test]
fn test_literal_override() {
    let narrative = "Subject John met Jane.";
    let redactor = Redactor::default();
    let options = AnnotateOptions::default().with_literals(literals("alias", &["John"]));

    let annotations = redactor
        .annotate(&Locale::default(), narrative, &names(&["Jane"]), &[], &options)
        .unwrap();
    assert_eq!(
        annotations,
        vec![
            Redaction::new(8, 12, "John", RedactionKind::Literal),
            Redaction::new(17, 21, "Jane", RedactionKind::Name),
        ]
    );

    let redacted = redactor
        .redact(&Locale::default(), narrative, &names(&["Jane"]), &[], &options)
        .unwrap();
    assert_eq!(redacted, "Subject <John> met <Jane>.");
    assert_bracket_positions(narrative, &annotations, &redacted);
}

#[test]
fn test_officer_suppression() {
    let narrative = "Officer Smith interviewed Jane Doe.";
    let redactor = Redactor::default();
    let options = AnnotateOptions::default().keep_officers();

    let redacted = redactor
        .redact(
            &Locale::default(),
            narrative,
            &names(&["Jane Doe"]),
            &names(&["Smith"]),
            &options,
        )
        .unwrap();
    assert_eq!(redacted, "Officer Smith interviewed <Jane Doe>.");

    let redacted = redactor
        .redact(
            &Locale::default(),
            narrative,
            &names(&["Jane Doe"]),
            &names(&["Smith"]),
            &AnnotateOptions::default(),
        )
        .unwrap();
    assert_eq!(redacted, "Officer <Smith> interviewed <Jane Doe>.");
}

#[test]
fn test_unmatched_entity_discarded() {
    let narrative = "Jane Doe drove from Fresno to Oakland with Pat.";
    let recognizer = StaticRecognizer::locate(
        narrative,
        [
            ("Jane Doe", EntityType::Person),
            ("Fresno", EntityType::Person),
            ("Oakland", EntityType::Location),
            ("Pat", EntityType::Person),
        ],
    );
    let redactor = Redactor::new(Arc::new(recognizer));

    let annotations = redactor
        .annotate(
            &Locale::default(),
            narrative,
            &names(&["Jane Doe"]),
            &[],
            &AnnotateOptions::default(),
        )
        .unwrap();
    assert_eq!(annotations.len(), 1);
    assert_eq!(annotations[0].text, "Jane Doe");
    assert!(annotations.iter().all(|r| &narrative[r.start..r.end] != "Fresno"));
}

#[test]
fn test_equal_length_literal_wins_overlap() {
    let narrative = "Ann Marie Lee arrived.";
    let recognizer = StaticRecognizer::locate(narrative, [("Ann Marie", EntityType::Person)]);
    let redactor = Redactor::new(Arc::new(recognizer));
    let options = AnnotateOptions::default().with_literals(literals("alias", &["Marie Lee"]));

    let annotations = redactor
        .annotate(&Locale::default(), narrative, &names(&["Ann Marie"]), &[], &options)
        .unwrap();
    assert_eq!(
        annotations,
        vec![Redaction::new(4, 13, "Marie Lee", RedactionKind::Literal)]
    );
}

#[test]
fn test_aliases_and_records() {
    let narrative = "Robert Lee, known as Bobby, met Deputy Cruz.";
    let persons = vec![IndividualDescriptor::from(
        Individual::new("Robert Lee").with_aliases(["Bobby"]),
    )];
    let officers = vec![IndividualDescriptor::from(
        Individual::new("Cruz").with_role(Role::Officer),
    )];

    let annotations = Redactor::default()
        .annotate(
            &Locale::default(),
            narrative,
            &persons,
            &officers,
            &AnnotateOptions::default(),
        )
        .unwrap();
    let kinds: Vec<(&str, RedactionKind)> = annotations
        .iter()
        .map(|r| (&narrative[r.start..r.end], r.kind))
        .collect();
    assert_eq!(
        kinds,
        vec![
            ("Robert Lee", RedactionKind::Name),
            ("Bobby", RedactionKind::Alias),
            ("Cruz", RedactionKind::Name),
        ]
    );
}

fn redact_default(narrative: &str, persons: &[&str], officers: &[&str]) -> String {
    Redactor::default()
        .redact(
            &Locale::default(),
            narrative,
            &names(persons),
            &names(officers),
            &AnnotateOptions::default(),
        )
        .unwrap()
}

#[test]
fn test_listed_names_with_titles_and_initials() {
    assert_eq!(
        redact_default("Officer Smith interviewed the victim.", &[], &["Officer Smith"]),
        "<Officer Smith> interviewed the victim."
    );
    assert_eq!(
        redact_default("W. Smith saw it.", &["W. Smith"], &[]),
        "<W. Smith> saw it."
    );
    assert_eq!(
        redact_default("Det. Ruiz met Mr. Smith.", &["Mr. Smith"], &["Ruiz"]),
        "Det. <Ruiz> met <Mr. Smith>."
    );
}

#[test]
fn test_name_wrapped_across_lines() {
    assert_eq!(
        redact_default("The victim, Jane\nDoe, left.", &["Jane Doe"], &[]),
        "The victim, <Jane Doe>, left."
    );
}

#[test]
fn test_lowercase_narrative() {
    assert_eq!(
        redact_default("jane doe arrived.", &["Jane Doe"], &[]),
        "<Jane Doe> arrived."
    );
}

#[test]
fn test_unsupported_individual_type() {
    let err = IndividualDescriptor::try_from(serde_json::json!(3.5)).unwrap_err();
    assert!(matches!(err, Error::UnsupportedIndividualType(ref t) if t == "number"));
}

#[test]
fn test_no_match_is_not_an_error() {
    let narrative = "Nobody of interest appears here.";
    let options = AnnotateOptions::default().with_literals(literals("alias", &["Zed"]));
    let annotations = Redactor::default()
        .annotate(
            &Locale::default(),
            narrative,
            &names(&["Jane"]),
            &names(&["Smith"]),
            &options,
        )
        .unwrap();
    assert!(annotations.is_empty());
}

#[test]
fn test_locale_folding_in_names() {
    let narrative = "La víctima, Ana Peña, habló con el oficial.";
    let es = Locale::parse("es-MX").unwrap();
    let redacted = Redactor::default()
        .redact(
            &es,
            narrative,
            &names(&["ana pena"]),
            &[],
            &AnnotateOptions::default(),
        )
        .unwrap();
    assert_eq!(redacted, "La víctima, <ana pena>, habló con el oficial.");
}

#[test]
fn test_apply_rejects_overlap() {
    let narrative = "Jane Doe";
    let err = apply_annotations(
        narrative,
        &[
            Redaction::new(0, 4, "A", RedactionKind::Name),
            Redaction::new(2, 8, "B", RedactionKind::Literal),
        ],
    )
    .unwrap_err();
    assert!(matches!(err, Error::OverlappingAnnotations { .. }));
}

#[test]
fn test_shared_redactor_across_threads() {
    let narrative = "Officer Smith interviewed Jane Doe. Later Jane Doe left.";
    let redactor = Redactor::default();
    let expected = redactor
        .annotate(
            &Locale::default(),
            narrative,
            &names(&["Jane Doe"]),
            &names(&["Smith"]),
            &AnnotateOptions::default(),
        )
        .unwrap();

    std::thread::scope(|scope| {
        let handles: Vec<_> = (0..4)
            .map(|_| {
                scope.spawn(|| {
                    redactor
                        .annotate(
                            &Locale::default(),
                            narrative,
                            &names(&["Jane Doe"]),
                            &names(&["Smith"]),
                            &AnnotateOptions::default(),
                        )
                        .unwrap()
                })
            })
            .collect();
        for handle in handles {
            assert_eq!(handle.join().unwrap(), expected);
        }
    });
}

#[test]
fn test_top_level_functions_use_default_locale() {
    bc_engine::preload().unwrap();
    let narrative = "Subject John met Jane.";
    let options = AnnotateOptions::default().with_literals(literals("alias", &["John"]));

    let annotations = bc_engine::annotate(narrative, &names(&["Jane"]), &[], &options).unwrap();
    assert_eq!(annotations.len(), 2);

    let redacted = bc_engine::redact(narrative, &names(&["Jane"]), &[], &options).unwrap();
    assert_eq!(redacted, "Subject <John> met <Jane>.");
}

const POOL: &[&str] = &[
    "Jane", "Doe", "Smith", "met", "Officer", "Ann", "Lee", "saw", "the", "Marie", "and", ".",
];

proptest! {
    #[test]
    fn annotate_never_overlaps(
        words in prop::collection::vec(prop::sample::select(POOL), 0..30),
        literal in prop::sample::select(&["Lee", "Ann Lee", "Marie", "Doe Smith"][..]),
    ) {
        let narrative = words.join(" ");
        let persons = names(&["Jane Doe", "Ann", "Marie Lee"]);
        let officers = names(&["Smith", "Lee"]);
        let options = AnnotateOptions::default().with_literals(literals("custom", &[literal]));

        let redactor = Redactor::default();
        let annotations = redactor
            .annotate(&Locale::default(), &narrative, &persons, &officers, &options)
            .unwrap();
        assert_non_overlapping(&annotations);
        prop_assert!(annotations.windows(2).all(|w| w[0].start < w[1].start));

        let redacted = apply_annotations(&narrative, &annotations).unwrap();
        assert_bracket_positions(&narrative, &annotations, &redacted);
    }
}
