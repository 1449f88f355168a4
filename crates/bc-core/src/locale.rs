//! Locale selection and the text-comparison rules it implies

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::{Error, Result};

/// Languages whose narratives routinely drop accents, so comparison folds them
const DIACRITIC_FOLDING: &[&str] = &["es", "fr", "pt", "it", "de", "nl", "ca"];

/// Languages with dotted/dotless I casing
const TURKIC: &[&str] = &["tr", "az"];

/// A `lang[-REGION]` locale tag
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Locale {
    language: String,
    region: Option<String>,
}

impl Locale {
    pub fn parse(tag: &str) -> Result<Self> {
        let tag = tag.trim();
        let mut parts = tag.split(['-', '_']);

        let language = parts
            .next()
            .filter(|l| (2..=3).contains(&l.len()) && l.chars().all(|c| c.is_ascii_alphabetic()))
            .ok_or_else(|| Error::UnknownLocale(tag.to_string()))?
            .to_ascii_lowercase();

        let region = match parts.next() {
            None => None,
            Some(r)
                if (r.len() == 2 && r.chars().all(|c| c.is_ascii_alphabetic()))
                    || (r.len() == 3 && r.chars().all(|c| c.is_ascii_digit())) =>
            {
                Some(r.to_ascii_uppercase())
            }
            Some(_) => return Err(Error::UnknownLocale(tag.to_string())),
        };

        if parts.next().is_some() {
            return Err(Error::UnknownLocale(tag.to_string()));
        }

        Ok(Self { language, region })
    }

    pub fn language(&self) -> &str {
        &self.language
    }

    pub fn region(&self) -> Option<&str> {
        self.region.as_deref()
    }

    /// Whether accents are ignored when comparing text
    pub fn folds_diacritics(&self) -> bool {
        DIACRITIC_FOLDING.contains(&self.language.as_str())
    }

    /// Whether I/İ lowercase to ı/i
    pub fn turkic_casing(&self) -> bool {
        TURKIC.contains(&self.language.as_str())
    }
}

impl Default for Locale {
    fn default() -> Self {
        Self {
            language: "en".to_string(),
            region: Some("US".to_string()),
        }
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.region {
            Some(region) => write!(f, "{}-{}", self.language, region),
            None => write!(f, "{}", self.language),
        }
    }
}

impl FromStr for Locale {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl TryFrom<String> for Locale {
    type Error = Error;

    fn try_from(s: String) -> Result<Self> {
        Self::parse(&s)
    }
}

impl From<Locale> for String {
    fn from(locale: Locale) -> Self {
        locale.to_string()
    }
}
