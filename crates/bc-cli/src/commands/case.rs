use anyhow::{Context, Result};
use bc_config::Config;
use bc_core::{IndividualDescriptor, Redaction};
use bc_engine::{AnnotateOptions, Literals, Redactor, apply_annotations};
use serde::Deserialize;
use serde_json::Value;

use super::read_input;
use crate::cli::Overrides;

/// A narrative together with the individuals and literals to redact
#[derive(Debug, Deserialize)]
pub struct CaseFile {
    pub narrative: String,
    #[serde(default)]
    pub persons: Vec<Value>,
    #[serde(default)]
    pub officers: Vec<Value>,
    #[serde(default)]
    pub redact_officers_from_text: Option<bool>,
    #[serde(default)]
    pub literals: Option<Literals>,
}

/// Case ready to hand to the engine
struct PreparedCase {
    narrative: String,
    persons: Vec<IndividualDescriptor>,
    officers: Vec<IndividualDescriptor>,
    options: AnnotateOptions,
}

fn prepare(content: &str, overrides: &Overrides, config: &Config) -> Result<PreparedCase> {
    let case: CaseFile = serde_json::from_str(content).context("invalid case file")?;

    let descriptors = |values: Vec<Value>| -> Result<Vec<IndividualDescriptor>> {
        values
            .into_iter()
            .map(|v| IndividualDescriptor::try_from(v).map_err(anyhow::Error::from))
            .collect()
    };

    // Flag beats case file beats config
    let redact_officers_from_text = !overrides.keep_officers
        && case
            .redact_officers_from_text
            .unwrap_or(config.redaction.redact_officers_from_text);

    Ok(PreparedCase {
        narrative: case.narrative,
        persons: descriptors(case.persons)?,
        officers: descriptors(case.officers)?,
        options: AnnotateOptions {
            redact_officers_from_text,
            literals: case.literals,
            label_style: overrides
                .label_style
                .unwrap_or(config.redaction.label_style),
        },
    })
}

fn annotate_case(
    content: &str,
    overrides: &Overrides,
    config: &Config,
) -> Result<(String, Vec<Redaction>)> {
    let case = prepare(content, overrides, config)?;
    let locale = overrides.locale.clone().unwrap_or_else(|| config.locale.clone());

    let annotations = Redactor::default().annotate(
        &locale,
        &case.narrative,
        &case.persons,
        &case.officers,
        &case.options,
    )?;
    Ok((case.narrative, annotations))
}

pub fn annotate(source: &str, overrides: &Overrides, config: &Config) -> Result<()> {
    let (_, annotations) = annotate_case(&read_input(source)?, overrides, config)?;
    println!("{}", serde_json::to_string_pretty(&annotations)?);
    Ok(())
}

pub fn redact(source: &str, overrides: &Overrides, config: &Config) -> Result<()> {
    let (narrative, annotations) = annotate_case(&read_input(source)?, overrides, config)?;
    println!("{}", apply_annotations(&narrative, &annotations)?);
    Ok(())
}

pub fn apply(narrative_source: &str, annotations_source: &str) -> Result<()> {
    let narrative = read_input(narrative_source)?;
    let annotations: Vec<Redaction> = serde_json::from_str(&read_input(annotations_source)?)
        .context("invalid annotations file")?;
    print!("{}", apply_annotations(&narrative, &annotations)?);
    Ok(())
}
