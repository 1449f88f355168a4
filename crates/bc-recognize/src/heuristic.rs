//! Model-free recognizer tuned for incident narratives.
//!
//! Proposes runs of capitalized tokens as mentions. A run may wrap onto the
//! next line and keeps its leading titles and initials, so a listed name
//! written as "Officer Smith" or "W. Smith" stays whole; titles and
//! sentence-starter words only affect how the run is classified. Recall
//! matters more than precision here: the name resolver narrows each mention
//! to the known names inside it and discards the rest.
//!
//! Narratives with no uppercase letters at all are treated as caseless and
//! every word may start a run. A lowercase name inside otherwise cased text
//! is not proposed.

use std::collections::HashSet;
use std::sync::OnceLock;

use bc_core::text::{self, Token};
use bc_core::Locale;
use regex::Regex;
use tracing::debug;

use crate::{EntityType, Mention, Recognizer};

const EN_HONORIFICS: &[&str] = &[
    "officer", "ofc", "deputy", "dep", "detective", "det", "sergeant", "sgt", "lieutenant", "lt",
    "captain", "capt", "cpl", "corporal", "agent", "trooper", "chief", "inspector", "mr", "mrs",
    "ms", "miss", "dr", "sir", "madam", "victim", "suspect", "witness", "subject", "reporting",
    "party", "rp", "v", "s", "w",
];

const ES_HONORIFICS: &[&str] = &[
    "oficial", "agente", "detective", "sargento", "teniente", "capitán", "capitan", "sr", "sra",
    "srta", "señor", "senor", "señora", "senora", "don", "doña", "dona", "víctima", "victima",
    "sospechoso", "sospechosa", "testigo", "sujeto",
];

const EN_STARTERS: &[&str] = &[
    "the", "a", "an", "he", "she", "they", "i", "we", "it", "this", "that", "these", "those",
    "his", "her", "their", "on", "at", "in", "after", "before", "when", "while", "upon", "then",
    "there", "as", "once", "during", "later", "both", "according", "per", "if", "my", "our",
];

const ES_STARTERS: &[&str] = &[
    "el", "la", "los", "las", "un", "una", "él", "ella", "ellos", "yo", "en", "después",
    "despues", "antes", "cuando", "luego", "según", "segun", "su", "sus",
];

const EN_PARTICLES: &[&str] = &["van", "von", "de", "der", "del", "la", "le", "da", "di", "st"];

const ES_PARTICLES: &[&str] = &["de", "del", "la", "las", "los", "y"];

const ORG_SUFFIXES: &[&str] = &[
    "department", "dept", "police", "pd", "sheriff", "office", "inc", "llc", "corp", "company",
    "co", "bank", "hospital", "school", "university", "church", "store", "market", "agency",
    "court", "departamento", "policía", "policia", "escuela", "tienda",
];

const LOCATIONS: &[&str] = &[
    "street", "st", "avenue", "ave", "road", "rd", "boulevard", "blvd", "drive", "dr", "lane",
    "ln", "way", "park", "plaza", "highway", "hwy", "freeway", "court", "ct", "calle",
    "avenida", "parque",
];

const LOCATION_PREPOSITIONS: &[&str] = &["in", "near", "en", "cerca"];

/// Compiled word lists for one language
struct Lexicon {
    honorifics: HashSet<String>,
    starters: HashSet<String>,
    particles: HashSet<String>,
}

impl Lexicon {
    fn build(honorifics: &[&str], starters: &[&str], particles: &[&str]) -> Self {
        let set = |words: &[&str]| -> HashSet<String> {
            words.iter().map(|w| w.to_string()).collect()
        };
        Self {
            honorifics: set(honorifics),
            starters: set(starters),
            particles: set(particles),
        }
    }
}

struct Resources {
    english: Lexicon,
    spanish: Lexicon,
    org_suffixes: HashSet<&'static str>,
    location_words: HashSet<&'static str>,
    location_prepositions: HashSet<&'static str>,
    /// Gap between two tokens of the same run, at most one line break
    run_gap: Regex,
    /// Gap after an initial or abbreviated title ("John Q. Public", "Sra. Peña")
    abbreviation_gap: Regex,
}

impl Resources {
    fn build() -> anyhow::Result<Self> {
        Ok(Self {
            english: Lexicon::build(EN_HONORIFICS, EN_STARTERS, EN_PARTICLES),
            spanish: Lexicon::build(ES_HONORIFICS, ES_STARTERS, ES_PARTICLES),
            org_suffixes: ORG_SUFFIXES.iter().copied().collect(),
            location_words: LOCATIONS.iter().copied().collect(),
            location_prepositions: LOCATION_PREPOSITIONS.iter().copied().collect(),
            run_gap: Regex::new(r"^(?:[ \t]+|[ \t]*\r?\n[ \t]*)$")?,
            abbreviation_gap: Regex::new(r"^\.[ \t]*(?:\r?\n[ \t]*)?$")?,
        })
    }

    fn lexicon(&self, locale: &Locale) -> &Lexicon {
        match locale.language() {
            "es" => &self.spanish,
            _ => &self.english,
        }
    }
}

/// Capitalization-driven recognizer with lazily compiled resources
#[derive(Default)]
pub struct HeuristicRecognizer {
    resources: OnceLock<Resources>,
}

impl HeuristicRecognizer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_ready(&self) -> bool {
        self.resources.get().is_some()
    }

    fn resources(&self) -> anyhow::Result<&Resources> {
        if let Some(resources) = self.resources.get() {
            return Ok(resources);
        }
        let built = Resources::build()?;
        debug!("heuristic recognizer resources compiled");
        Ok(self.resources.get_or_init(|| built))
    }
}

impl Recognizer for HeuristicRecognizer {
    fn id(&self) -> &str {
        "heuristic"
    }

    fn ensure_ready(&self) -> anyhow::Result<()> {
        self.resources().map(|_| ())
    }

    fn recognize(&self, narrative: &str, locale: &Locale) -> anyhow::Result<Vec<Mention>> {
        let resources = self.resources()?;
        let lexicon = resources.lexicon(locale);
        let tokens = text::tokenize(narrative);
        let word = |t: &Token| text::normalize(&narrative[t.start..t.end], locale);
        let caseless = !narrative.chars().any(char::is_uppercase);
        let starts_run = |t: &Token| caseless || is_capitalized(&narrative[t.start..t.end]);

        let mut mentions = Vec::new();
        let mut i = 0;
        while i < tokens.len() {
            if !starts_run(&tokens[i]) {
                i += 1;
                continue;
            }

            // Extend the run over capitalized tokens and inner particles
            let mut j = i + 1;
            while j < tokens.len() {
                let prev = tokens[j - 1];
                let gap = &narrative[prev.end..tokens[j].start];
                let abbreviated = narrative[prev.start..prev.end].chars().count() == 1
                    || lexicon.honorifics.contains(&word(&prev));
                let joined = resources.run_gap.is_match(gap)
                    || (abbreviated && resources.abbreviation_gap.is_match(gap));
                if !joined {
                    break;
                }
                if starts_run(&tokens[j]) {
                    j += 1;
                    continue;
                }

                // Lowercase particles only count when a capitalized token follows
                let mut k = j;
                while k < tokens.len()
                    && lexicon.particles.contains(&word(&tokens[k]))
                    && resources
                        .run_gap
                        .is_match(&narrative[tokens[k - 1].end..tokens[k].start])
                {
                    k += 1;
                }
                if k > j
                    && k < tokens.len()
                    && resources
                        .run_gap
                        .is_match(&narrative[tokens[k - 1].end..tokens[k].start])
                    && is_capitalized(&narrative[tokens[k].start..tokens[k].end])
                {
                    j = k + 1;
                } else {
                    break;
                }
            }

            let run = &tokens[i..j];
            let preceding = i.checked_sub(1).map(|p| word(&tokens[p]));
            i = j;

            // Leading starters and titles stay in the mention but not in the
            // part that is classified
            let mut first = 0;
            let mut titled = false;
            while first < run.len() {
                let w = word(&run[first]);
                if lexicon.honorifics.contains(&w) {
                    titled = true;
                    first += 1;
                } else if first == 0 && lexicon.starters.contains(&w) {
                    first += 1;
                } else {
                    break;
                }
            }
            let core = &run[first..];
            if core.is_empty() && !titled {
                continue;
            }

            let last = word(&run[run.len() - 1]);
            let entity_type = if core.is_empty() {
                EntityType::Other
            } else if resources.org_suffixes.contains(last.as_str()) {
                EntityType::Organization
            } else if resources.location_words.contains(last.as_str())
                || (!titled
                    && first == 0
                    && preceding
                        .as_deref()
                        .is_some_and(|p| resources.location_prepositions.contains(p)))
            {
                EntityType::Location
            } else if core.len() == 1 && is_acronym(&narrative[core[0].start..core[0].end]) {
                EntityType::Other
            } else {
                EntityType::Person
            };

            mentions.push(Mention::new(
                narrative,
                run[0].start,
                run[run.len() - 1].end,
                entity_type,
            ));
        }

        debug!(count = mentions.len(), locale = %locale, "heuristic mentions");
        Ok(mentions)
    }
}

fn is_capitalized(token: &str) -> bool {
    token.chars().next().is_some_and(char::is_uppercase)
}

fn is_acronym(token: &str) -> bool {
    token.chars().count() > 1 && token.chars().all(|c| c.is_uppercase() || c.is_ascii_digit())
}
