//! Core domain models for narrative redaction
//!
//! This crate contains:
//! - Individuals and the descriptor normalizer
//! - Redaction annotations
//! - Locale and locale-aware text normalization

pub mod annotation;
pub mod error;
pub mod individual;
pub mod locale;
pub mod text;

pub use annotation::{LabelStyle, Redaction, RedactionKind};
pub use error::{Error, Result};
pub use individual::{Individual, IndividualDescriptor, Role};
pub use locale::Locale;
pub use text::NormalizedText;
