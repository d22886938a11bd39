//! Schema validation of form values.

use std::collections::BTreeMap;
use std::fmt;

use super::form::{FieldKind, FieldSpec, FieldValue, FormValues};

/// Field-level validation failures, keyed by field name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors {
    fields: BTreeMap<String, String>,
}

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.fields.insert(field.into(), message.into());
    }

    pub fn remove(&mut self, field: &str) {
        self.fields.remove(field);
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.fields.get(field).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields
            .iter()
            .map(|(field, message)| (field.as_str(), message.as_str()))
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (field, message) in self.iter() {
            if !first {
                f.write_str("; ")?;
            }
            write!(f, "{field}: {message}")?;
            first = false;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationErrors {}

/// Validate every field, collecting all failures.
pub fn validate(fields: &[FieldSpec], values: &FormValues) -> Result<(), ValidationErrors> {
    let mut errors = ValidationErrors::new();
    for spec in fields {
        if let Some(message) = validate_field(spec, values.get(spec.name)) {
            errors.insert(spec.name, message);
        }
    }
    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Returns the failure message for one field, if any.
pub fn validate_field(spec: &FieldSpec, value: Option<&FieldValue>) -> Option<&'static str> {
    match (spec.kind, value) {
        (FieldKind::Text, Some(FieldValue::Text(text))) => text.is_empty().then_some(spec.message),
        (FieldKind::Flag, Some(FieldValue::Flag(_))) => None,
        (FieldKind::Relation(_), Some(FieldValue::Relation(option))) => {
            (!option.is_selected()).then_some(spec.message)
        }
        (FieldKind::Flag, _) => Some("value is required"),
        _ => Some(spec.message),
    }
}
