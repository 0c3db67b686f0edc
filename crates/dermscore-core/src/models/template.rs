use std::collections::HashSet;

use serde::{Deserialize, Deserializer, Serialize};
use ts_rs::TS;

use crate::error::CoreError;

/// The definition of one scoring instrument: ordered inputs, an
/// interpretation table, and clinician-facing copy blocks.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Template {
    pub name: String,
    pub slug: String,
    pub category: String,
    pub version: String,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub citation: Option<String>,
    pub inputs: Vec<InputDefinition>,
    pub interpretation: Interpretation,
    #[serde(default)]
    pub copy_blocks: Vec<CopyBlock>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<jiff::Timestamp>,
}

impl Template {
    /// Check that input ids are unique, and option values are unique within
    /// each input.
    pub fn check(&self) -> Result<(), CoreError> {
        let mut ids = HashSet::new();
        for input in &self.inputs {
            if !ids.insert(input.id.as_str()) {
                return Err(CoreError::DuplicateInputId {
                    slug: self.slug.clone(),
                    input_id: input.id.clone(),
                });
            }

            let mut values = HashSet::new();
            for option in &input.options {
                if !values.insert(option.value.as_str()) {
                    return Err(CoreError::DuplicateOptionValue {
                        slug: self.slug.clone(),
                        input_id: input.id.clone(),
                        value: option.value.clone(),
                    });
                }
            }
        }
        Ok(())
    }
}

/// One declared input of a template.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct InputDefinition {
    pub id: String,
    pub label: String,
    #[serde(rename = "type")]
    pub input_type: InputType,
    #[serde(default)]
    pub required: bool,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<InputOption>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub step: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight: Option<f64>,
}

impl InputDefinition {
    pub fn option(&self, value: &str) -> Option<&InputOption> {
        self.options.iter().find(|o| o.value == value)
    }
}

/// The declared type of an input. Unrecognized type names are treated as
/// free text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, TS)]
#[serde(rename_all = "lowercase")]
#[ts(export)]
pub enum InputType {
    Number,
    Select,
    Multiselect,
    Boolean,
    Text,
}

impl InputType {
    pub fn parse(name: &str) -> Self {
        match name {
            "number" => InputType::Number,
            "select" => InputType::Select,
            "multiselect" => InputType::Multiselect,
            "boolean" => InputType::Boolean,
            _ => InputType::Text,
        }
    }
}

impl<'de> Deserialize<'de> for InputType {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let name = String::deserialize(deserializer)?;
        Ok(InputType::parse(&name))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct InputOption {
    pub value: String,
    pub label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub score: Option<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Interpretation {
    #[serde(default)]
    pub summary_template: String,
    pub ranges: Vec<InterpretationRange>,
}

/// A closed `[min, max]` score bucket. Ranges may overlap; the first
/// declared match wins.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct InterpretationRange {
    pub min: f64,
    pub max: f64,
    pub label: String,
    pub guidance: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct CopyBlock {
    pub label: String,
    pub body_template: String,
}
