//! Form models.
//!
//! A resource declares its editable fields as a static slice of
//! [`FieldSpec`]s; [`FormValues`] holds one [`FieldValue`] per spec. Relation
//! fields hold a [`DropdownOption`] whose id is [`UNSELECTED_ID`] until the
//! user picks a related record.

use std::collections::BTreeMap;

use blogdesk_api_types::EntityId;
use serde::Serialize;
use thiserror::Error;

use super::resource::ResourceKind;

/// Placeholder relation id meaning "nothing selected".
pub const UNSELECTED_ID: EntityId = -1;

/// Minimal `{id, label}` projection used by relation pickers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DropdownOption {
    pub id: EntityId,
    pub label: String,
}

impl DropdownOption {
    pub fn new(id: EntityId, label: impl Into<String>) -> Self {
        Self {
            id,
            label: label.into(),
        }
    }

    pub fn unselected() -> Self {
        Self::new(UNSELECTED_ID, "")
    }

    pub fn is_selected(&self) -> bool {
        self.id != UNSELECTED_ID
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    Flag,
    Relation(ResourceKind),
}

impl FieldKind {
    fn describe(self) -> &'static str {
        match self {
            FieldKind::Text => "text",
            FieldKind::Flag => "boolean",
            FieldKind::Relation(_) => "relation",
        }
    }
}

/// One editable field of a resource form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    pub name: &'static str,
    pub label: &'static str,
    pub kind: FieldKind,
    /// Inline message shown when the field fails validation.
    pub message: &'static str,
}

impl FieldSpec {
    pub const fn text(name: &'static str, label: &'static str, message: &'static str) -> Self {
        Self {
            name,
            label,
            kind: FieldKind::Text,
            message,
        }
    }

    pub const fn flag(name: &'static str, label: &'static str) -> Self {
        Self {
            name,
            label,
            kind: FieldKind::Flag,
            message: "",
        }
    }

    pub const fn relation(
        name: &'static str,
        label: &'static str,
        target: ResourceKind,
        message: &'static str,
    ) -> Self {
        Self {
            name,
            label,
            kind: FieldKind::Relation(target),
            message,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    Text(String),
    Flag(bool),
    Relation(DropdownOption),
}

impl FieldValue {
    pub fn empty(kind: FieldKind) -> Self {
        match kind {
            FieldKind::Text => FieldValue::Text(String::new()),
            FieldKind::Flag => FieldValue::Flag(false),
            FieldKind::Relation(_) => FieldValue::Relation(DropdownOption::unselected()),
        }
    }

    fn matches(&self, kind: FieldKind) -> bool {
        matches!(
            (self, kind),
            (FieldValue::Text(_), FieldKind::Text)
                | (FieldValue::Flag(_), FieldKind::Flag)
                | (FieldValue::Relation(_), FieldKind::Relation(_))
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormError {
    #[error("unknown field `{0}`")]
    UnknownField(String),
    #[error("field `{field}` expects a {expected} value")]
    KindMismatch {
        field: String,
        expected: &'static str,
    },
    #[error("invalid value for `{field}`: {reason}")]
    InvalidValue { field: String, reason: String },
}

/// Current values of a form, keyed by field name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormValues {
    values: BTreeMap<&'static str, FieldValue>,
}

impl FormValues {
    /// Empty text, `false` flags and unselected relations.
    pub fn empty(fields: &[FieldSpec]) -> Self {
        let values = fields
            .iter()
            .map(|spec| (spec.name, FieldValue::empty(spec.kind)))
            .collect();
        Self { values }
    }

    pub fn with_text(mut self, name: &'static str, value: impl Into<String>) -> Self {
        self.values.insert(name, FieldValue::Text(value.into()));
        self
    }

    pub fn with_flag(mut self, name: &'static str, value: bool) -> Self {
        self.values.insert(name, FieldValue::Flag(value));
        self
    }

    pub fn with_relation(mut self, name: &'static str, option: DropdownOption) -> Self {
        self.values.insert(name, FieldValue::Relation(option));
        self
    }

    pub fn get(&self, name: &str) -> Option<&FieldValue> {
        self.values.get(name)
    }

    /// Replace one value, checking the field exists and the kind matches.
    pub fn set(
        &mut self,
        fields: &[FieldSpec],
        name: &str,
        value: FieldValue,
    ) -> Result<(), FormError> {
        let spec = find_spec(fields, name)?;
        if !value.matches(spec.kind) {
            return Err(FormError::KindMismatch {
                field: name.to_string(),
                expected: spec.kind.describe(),
            });
        }
        self.values.insert(spec.name, value);
        Ok(())
    }

    pub fn text(&self, name: &str) -> Result<&str, FormError> {
        match self.values.get(name) {
            Some(FieldValue::Text(value)) => Ok(value),
            Some(_) => Err(mismatch(name, FieldKind::Text)),
            None => Err(FormError::UnknownField(name.to_string())),
        }
    }

    pub fn flag(&self, name: &str) -> Result<bool, FormError> {
        match self.values.get(name) {
            Some(FieldValue::Flag(value)) => Ok(*value),
            Some(_) => Err(mismatch(name, FieldKind::Flag)),
            None => Err(FormError::UnknownField(name.to_string())),
        }
    }

    pub fn relation(&self, name: &str) -> Result<&DropdownOption, FormError> {
        match self.values.get(name) {
            Some(FieldValue::Relation(option)) => Ok(option),
            Some(_) => Err(FormError::KindMismatch {
                field: name.to_string(),
                expected: "relation",
            }),
            None => Err(FormError::UnknownField(name.to_string())),
        }
    }

    pub fn relation_id(&self, name: &str) -> Result<EntityId, FormError> {
        self.relation(name).map(|option| option.id)
    }
}

pub fn find_spec<'a>(fields: &'a [FieldSpec], name: &str) -> Result<&'a FieldSpec, FormError> {
    fields
        .iter()
        .find(|spec| spec.name == name)
        .ok_or_else(|| FormError::UnknownField(name.to_string()))
}

/// Parse a raw `field=value` right-hand side into a typed value.
///
/// Relation fields take the related record's id; the label stays empty until
/// a picker or a loaded record supplies one.
pub fn parse_value(fields: &[FieldSpec], name: &str, raw: &str) -> Result<FieldValue, FormError> {
    let spec = find_spec(fields, name)?;
    match spec.kind {
        FieldKind::Text => Ok(FieldValue::Text(raw.to_string())),
        FieldKind::Flag => parse_flag(raw)
            .map(FieldValue::Flag)
            .ok_or_else(|| FormError::InvalidValue {
                field: name.to_string(),
                reason: format!("`{raw}` is not a boolean"),
            }),
        FieldKind::Relation(_) => raw
            .trim()
            .parse::<EntityId>()
            .map(|id| FieldValue::Relation(DropdownOption::new(id, "")))
            .map_err(|err| FormError::InvalidValue {
                field: name.to_string(),
                reason: err.to_string(),
            }),
    }
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "true" | "yes" | "y" | "1" | "on" => Some(true),
        "false" | "no" | "n" | "0" | "off" => Some(false),
        _ => None,
    }
}

fn mismatch(name: &str, kind: FieldKind) -> FormError {
    FormError::KindMismatch {
        field: name.to_string(),
        expected: kind.describe(),
    }
}
