use std::collections::BTreeMap;

use serde_json::{Map, Value};

use dermscore_core::models::input::{Contribution, SanitizedValue};
use dermscore_core::models::template::{InputDefinition, InputType, Template};

use crate::error::ValidationError;

/// Raw, untrusted input values keyed by input id.
pub type RawInputs = Map<String, Value>;

/// The outcome of a successful validation pass.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Validated {
    pub inputs: BTreeMap<String, SanitizedValue>,
    pub total_score: f64,
    /// Per-input points in declaration order. Text inputs do not appear.
    pub contributions: Vec<Contribution>,
}

/// Validate `raw` against the template's declared inputs.
///
/// Inputs are checked in declaration order and the first violation is
/// returned. The total is an unrounded sum of each input's contribution.
pub fn validate(template: &Template, raw: &RawInputs) -> Result<Validated, ValidationError> {
    let mut validated = Validated::default();

    for input in &template.inputs {
        let value = raw.get(&input.id);
        let absent = is_absent(value);

        if absent && input.required {
            return Err(ValidationError::new(
                &input.id,
                format!("Missing required input \"{}\"", input.label),
            ));
        }

        let Some((sanitized, points)) = sanitize(input, value, absent)? else {
            continue;
        };

        if let Some(points) = points {
            validated.total_score += points;
            validated.contributions.push(Contribution {
                input_id: input.id.clone(),
                label: input.label.clone(),
                points,
            });
        }
        validated.inputs.insert(input.id.clone(), sanitized);
    }

    Ok(validated)
}

/// Returns `None` for an absent optional input that has no canonical empty
/// value. The points are `None` for inputs that never score.
fn sanitize(
    input: &InputDefinition,
    value: Option<&Value>,
    absent: bool,
) -> Result<Option<(SanitizedValue, Option<f64>)>, ValidationError> {
    match input.input_type {
        InputType::Number => {
            let Some(value) = value.filter(|_| !absent) else {
                return Ok(None);
            };
            let number = to_number(value)
                .filter(|n| n.is_finite())
                .ok_or_else(|| {
                    ValidationError::new(&input.id, format!("{} must be a number", input.label))
                })?;

            if let Some(min) = input.min
                && number < min
            {
                return Err(ValidationError::new(
                    &input.id,
                    format!("{} must be >= {min}", input.label),
                ));
            }
            if let Some(max) = input.max
                && number > max
            {
                return Err(ValidationError::new(
                    &input.id,
                    format!("{} must be <= {max}", input.label),
                ));
            }

            let points = number * input.weight.unwrap_or(1.0);
            Ok(Some((SanitizedValue::Number(number), Some(points))))
        }
        InputType::Boolean => {
            let flag = value.is_some_and(truthy);
            let points = if flag { input.weight.unwrap_or(0.0) } else { 0.0 };
            Ok(Some((SanitizedValue::Boolean(flag), Some(points))))
        }
        InputType::Select => {
            if absent {
                return Ok(None);
            }
            let Some(Value::String(choice)) = value else {
                return Err(invalid_option(input));
            };
            let option = input.option(choice).ok_or_else(|| invalid_option(input))?;
            let points = option.score.or(input.weight).unwrap_or(0.0);
            Ok(Some((SanitizedValue::Select(choice.clone()), Some(points))))
        }
        InputType::Multiselect => {
            if absent {
                return Ok(None);
            }
            let Some(Value::Array(items)) = value else {
                return Err(ValidationError::new(
                    &input.id,
                    format!("{} must be a list of options", input.label),
                ));
            };

            let mut choices = Vec::with_capacity(items.len());
            let mut points = 0.0;
            for item in items {
                let choice = display_string(item);
                let option = input.option(&choice).ok_or_else(|| invalid_option(input))?;
                points += option.score.or(input.weight).unwrap_or(0.0);
                choices.push(choice);
            }
            Ok(Some((SanitizedValue::Multiselect(choices), Some(points))))
        }
        InputType::Text => {
            let text = match value {
                None | Some(Value::Null) => Value::String(String::new()),
                Some(v) => v.clone(),
            };
            Ok(Some((SanitizedValue::Text(text), None)))
        }
    }
}

fn invalid_option(input: &InputDefinition) -> ValidationError {
    ValidationError::new(
        &input.id,
        format!("Invalid option for \"{}\"", input.label),
    )
}

fn is_absent(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => true,
        Some(Value::String(s)) => s.is_empty(),
        Some(_) => false,
    }
}

/// Numeric coercion: numbers as-is, trimmed numeric strings (blank is zero),
/// booleans as 1/0.
fn to_number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                Some(0.0)
            } else {
                trimmed.parse::<f64>().ok()
            }
        }
        Value::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
        Value::Null => Some(0.0),
        Value::Array(_) | Value::Object(_) => None,
    }
}

fn truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0 && !f.is_nan()),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// String form of a JSON value as it would be shown in a form control.
pub(crate) fn display_string(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.as_f64().map(|f| f.to_string()).unwrap_or_else(|| n.to_string()),
        Value::Bool(b) => b.to_string(),
        Value::Null => "null".to_string(),
        Value::Array(items) => items
            .iter()
            .map(|item| match item {
                Value::Null => String::new(),
                other => display_string(other),
            })
            .collect::<Vec<_>>()
            .join(","),
        Value::Object(_) => "[object Object]".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn template(inputs: Value) -> Template {
        serde_json::from_value(json!({
            "name": "Test",
            "slug": "test",
            "category": "general",
            "version": "1",
            "description": "",
            "inputs": inputs,
            "interpretation": { "ranges": [] }
        }))
        .unwrap()
    }

    fn raw(value: Value) -> RawInputs {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn weighted_number_contributes_value_times_weight() {
        let t = template(json!([
            { "id": "area", "label": "Area", "type": "number", "weight": 0.5 },
            { "id": "age", "label": "Age", "type": "number" }
        ]));
        let v = validate(&t, &raw(json!({ "area": 4, "age": "30" }))).unwrap();
        assert_eq!(v.total_score, 32.0);
        assert_eq!(v.inputs["age"], SanitizedValue::Number(30.0));
        assert_eq!(v.contributions.len(), 2);
        assert_eq!(v.contributions[0].points, 2.0);
    }

    #[test]
    fn required_field_rejects_null_and_empty_string() {
        let t = template(json!([
            { "id": "age", "label": "Age", "type": "number", "required": true }
        ]));
        for bad in [json!({}), json!({ "age": null }), json!({ "age": "" })] {
            let err = validate(&t, &raw(bad)).unwrap_err();
            assert_eq!(err.message, "Missing required input \"Age\"");
            assert_eq!(err.input_id, "age");
        }
    }

    #[test]
    fn out_of_range_numbers_fail_instead_of_clamping() {
        let t = template(json!([
            { "id": "age", "label": "Age", "type": "number", "min": 0, "max": 120 }
        ]));
        let low = validate(&t, &raw(json!({ "age": -1 }))).unwrap_err();
        assert_eq!(low.message, "Age must be >= 0");
        let high = validate(&t, &raw(json!({ "age": 121 }))).unwrap_err();
        assert_eq!(high.message, "Age must be <= 120");
        assert!(validate(&t, &raw(json!({ "age": 120 }))).is_ok());
    }

    #[test]
    fn non_numeric_values_fail() {
        let t = template(json!([{ "id": "n", "label": "Count", "type": "number" }]));
        for bad in [json!({ "n": "abc" }), json!({ "n": [1] }), json!({ "n": "NaN" })] {
            let err = validate(&t, &raw(bad)).unwrap_err();
            assert_eq!(err.message, "Count must be a number");
        }
    }

    #[test]
    fn boolean_scores_weight_only_when_truthy() {
        let t = template(json!([
            { "id": "a", "label": "A", "type": "boolean", "weight": 2 },
            { "id": "b", "label": "B", "type": "boolean", "weight": 3 },
            { "id": "c", "label": "C", "type": "boolean" }
        ]));
        let v = validate(&t, &raw(json!({ "a": "yes", "b": 0, "c": true }))).unwrap();
        assert_eq!(v.total_score, 2.0);
        assert_eq!(v.inputs["a"], SanitizedValue::Boolean(true));
        assert_eq!(v.inputs["b"], SanitizedValue::Boolean(false));
    }

    #[test]
    fn select_uses_option_score_then_weight() {
        let t = template(json!([
            { "id": "s", "label": "Site", "type": "select", "weight": 5, "options": [
                { "value": "face", "label": "Face", "score": 2 },
                { "value": "trunk", "label": "Trunk" }
            ]}
        ]));
        assert_eq!(validate(&t, &raw(json!({ "s": "face" }))).unwrap().total_score, 2.0);
        assert_eq!(validate(&t, &raw(json!({ "s": "trunk" }))).unwrap().total_score, 5.0);
    }

    #[test]
    fn unknown_or_mistyped_options_are_rejected() {
        let t = template(json!([
            { "id": "s", "label": "Site", "type": "select", "options": [
                { "value": "1", "label": "One", "score": 1 }
            ]}
        ]));
        let unknown = validate(&t, &raw(json!({ "s": "2" }))).unwrap_err();
        assert_eq!(unknown.message, "Invalid option for \"Site\"");
        let mistyped = validate(&t, &raw(json!({ "s": 1 }))).unwrap_err();
        assert_eq!(mistyped.message, "Invalid option for \"Site\"");
    }

    #[test]
    fn multiselect_sums_each_selected_option() {
        let t = template(json!([
            { "id": "m", "label": "Sites", "type": "multiselect", "options": [
                { "value": "1", "label": "One", "score": 1 },
                { "value": "2", "label": "Two", "score": 2 },
                { "value": "x", "label": "Unscored" }
            ]}
        ]));
        let v = validate(&t, &raw(json!({ "m": [1, "2", "x"] }))).unwrap();
        assert_eq!(v.total_score, 3.0);
        assert_eq!(
            v.inputs["m"],
            SanitizedValue::Multiselect(vec!["1".into(), "2".into(), "x".into()])
        );

        let err = validate(&t, &raw(json!({ "m": ["1", "9"] }))).unwrap_err();
        assert_eq!(err.message, "Invalid option for \"Sites\"");
        assert!(validate(&t, &raw(json!({ "m": "1" }))).is_err());
    }

    #[test]
    fn text_defaults_to_empty_and_never_scores() {
        let t = template(json!([
            { "id": "note", "label": "Note", "type": "text", "weight": 10 }
        ]));
        let v = validate(&t, &raw(json!({}))).unwrap();
        assert_eq!(v.inputs["note"], SanitizedValue::Text(json!("")));
        assert_eq!(v.total_score, 0.0);
        assert!(v.contributions.is_empty());
    }

    #[test]
    fn absent_optional_scored_inputs_are_skipped() {
        let t = template(json!([
            { "id": "n", "label": "N", "type": "number" },
            { "id": "s", "label": "S", "type": "select", "options": [] }
        ]));
        let v = validate(&t, &raw(json!({ "s": "" }))).unwrap();
        assert!(v.inputs.is_empty());
        assert_eq!(v.total_score, 0.0);
    }

    #[test]
    fn first_violation_in_declaration_order_is_reported() {
        let t = template(json!([
            { "id": "b", "label": "B", "type": "number", "required": true },
            { "id": "a", "label": "A", "type": "number", "required": true }
        ]));
        let err = validate(&t, &raw(json!({}))).unwrap_err();
        assert_eq!(err.input_id, "b");
    }

    #[test]
    fn validation_is_deterministic() {
        let t = template(json!([
            { "id": "x", "label": "X", "type": "number", "weight": 0.1 },
            { "id": "y", "label": "Y", "type": "number", "weight": 0.2 }
        ]));
        let input = raw(json!({ "x": 1, "y": 1 }));
        assert_eq!(validate(&t, &input).unwrap(), validate(&t, &input).unwrap());
    }
}
