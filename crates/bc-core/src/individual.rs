//! Individuals (persons and officers) named in a narrative

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::{Error, Result};

/// Role of an individual with respect to the incident
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Person,
    Officer,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Person => "person",
            Role::Officer => "officer",
        }
    }

    fn parse(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "person" => Some(Role::Person),
            "officer" => Some(Role::Officer),
            _ => None,
        }
    }
}

/// Canonical individual record.
///
/// Only `name`, `aliases` and `role` take part in matching. Any other fields
/// are carried along in `extra` so the mapping form is lossless.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Individual {
    pub name: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub aliases: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<Role>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Individual {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            aliases: Vec::new(),
            role: None,
            extra: Map::new(),
        }
    }

    pub fn with_aliases<I, S>(mut self, aliases: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.aliases = aliases.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_role(mut self, role: Role) -> Self {
        self.role = Some(role);
        self
    }

    pub fn with_extra(mut self, key: impl Into<String>, value: Value) -> Self {
        self.extra.insert(key.into(), value);
        self
    }

    /// Explicit placeholder label, if the record carries one
    pub fn label(&self) -> Option<&str> {
        self.extra.get("label").and_then(Value::as_str)
    }

    /// Equivalent mapping form
    pub fn to_mapping(&self) -> Map<String, Value> {
        let mut map = Map::new();
        map.insert("name".to_string(), Value::String(self.name.clone()));
        if !self.aliases.is_empty() {
            map.insert(
                "aliases".to_string(),
                Value::Array(self.aliases.iter().cloned().map(Value::String).collect()),
            );
        }
        if let Some(role) = self.role {
            map.insert("role".to_string(), Value::String(role.as_str().to_string()));
        }
        for (key, value) in &self.extra {
            map.entry(key.clone()).or_insert_with(|| value.clone());
        }
        map
    }

    /// Read the fields matching depends on out of a normalized mapping
    pub fn from_mapping(map: &Map<String, Value>) -> Result<Self> {
        let name = match map.get("name") {
            Some(Value::String(name)) => name.clone(),
            Some(other) => {
                return Err(Error::MalformedIndividual(format!(
                    "'name' must be a string, got {}",
                    json_type_name(other)
                )));
            }
            None => {
                return Err(Error::MalformedIndividual(
                    "missing required field 'name'".to_string(),
                ));
            }
        };

        let aliases = match map.get("aliases") {
            None | Some(Value::Null) => Vec::new(),
            Some(Value::Array(items)) => items
                .iter()
                .map(|item| match item {
                    Value::String(alias) => Ok(alias.clone()),
                    other => Err(Error::MalformedIndividual(format!(
                        "aliases of '{}' must be strings, got {}",
                        name,
                        json_type_name(other)
                    ))),
                })
                .collect::<Result<Vec<_>>>()?,
            Some(other) => {
                return Err(Error::MalformedIndividual(format!(
                    "'aliases' of '{}' must be an array, got {}",
                    name,
                    json_type_name(other)
                )));
            }
        };

        let role = match map.get("role") {
            None | Some(Value::Null) => None,
            Some(Value::String(role)) => Some(Role::parse(role).ok_or_else(|| {
                Error::MalformedIndividual(format!("unknown role '{}' for '{}'", role, name))
            })?),
            Some(other) => {
                return Err(Error::MalformedIndividual(format!(
                    "'role' of '{}' must be a string, got {}",
                    name,
                    json_type_name(other)
                )));
            }
        };

        let extra = map
            .iter()
            .filter(|(key, _)| !matches!(key.as_str(), "name" | "aliases" | "role"))
            .map(|(key, value)| (key.clone(), value.clone()))
            .collect();

        Ok(Self {
            name,
            aliases,
            role,
            extra,
        })
    }
}

/// Any value that can describe an individual
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(try_from = "Value")]
pub enum IndividualDescriptor {
    /// Bare name
    Name(String),
    /// Pre-built record
    Record(Individual),
    /// Already-normalized mapping, passed through as-is
    Mapping(Map<String, Value>),
}

impl IndividualDescriptor {
    /// Convert to the canonical mapping form
    pub fn normalize(&self) -> Map<String, Value> {
        match self {
            IndividualDescriptor::Name(name) => {
                let mut map = Map::new();
                map.insert("name".to_string(), Value::String(name.clone()));
                map
            }
            IndividualDescriptor::Record(individual) => individual.to_mapping(),
            IndividualDescriptor::Mapping(map) => map.clone(),
        }
    }
}

impl TryFrom<Value> for IndividualDescriptor {
    type Error = Error;

    fn try_from(value: Value) -> Result<Self> {
        match value {
            Value::String(name) => Ok(IndividualDescriptor::Name(name)),
            Value::Object(map) => Ok(IndividualDescriptor::Mapping(map)),
            other => Err(Error::UnsupportedIndividualType(
                json_type_name(&other).to_string(),
            )),
        }
    }
}

impl From<&str> for IndividualDescriptor {
    fn from(name: &str) -> Self {
        IndividualDescriptor::Name(name.to_string())
    }
}

impl From<String> for IndividualDescriptor {
    fn from(name: String) -> Self {
        IndividualDescriptor::Name(name)
    }
}

impl From<Individual> for IndividualDescriptor {
    fn from(individual: Individual) -> Self {
        IndividualDescriptor::Record(individual)
    }
}

impl From<Map<String, Value>> for IndividualDescriptor {
    fn from(map: Map<String, Value>) -> Self {
        IndividualDescriptor::Mapping(map)
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
