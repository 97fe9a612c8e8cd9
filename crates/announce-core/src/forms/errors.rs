/// Form validation errors
use serde::Serialize;
use std::collections::BTreeMap;
use thiserror::Error;

/// Field and non-field errors collected while cleaning a form
///
/// Messages are user-facing and rendered next to the offending input.
#[derive(Error, Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[error("Form validation failed")]
pub struct FormValidationError {
    fields: BTreeMap<String, Vec<String>>,
    non_field_errors: Vec<String>,
}

impl FormValidationError {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, field: &str, message: impl Into<String>) {
        self.fields
            .entry(field.to_string())
            .or_default()
            .push(message.into());
    }

    pub fn add_non_field(&mut self, message: impl Into<String>) {
        self.non_field_errors.push(message.into());
    }

    /// Messages for one field, empty if it is valid
    pub fn field(&self, name: &str) -> &[String] {
        self.fields.get(name).map(Vec::as_slice).unwrap_or_default()
    }

    pub fn has_field(&self, name: &str) -> bool {
        self.fields.contains_key(name)
    }

    pub fn fields(&self) -> &BTreeMap<String, Vec<String>> {
        &self.fields
    }

    pub fn non_field_errors(&self) -> &[String] {
        &self.non_field_errors
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty() && self.non_field_errors.is_empty()
    }

    /// Total number of messages
    pub fn len(&self) -> usize {
        self.fields.values().map(Vec::len).sum::<usize>() + self.non_field_errors.len()
    }

    /// Every message in display order: non-field first, then by field name
    pub fn messages(&self) -> Vec<String> {
        self.non_field_errors
            .iter()
            .cloned()
            .chain(self.fields.values().flatten().cloned())
            .collect()
    }

    /// `Ok(value)` when no errors were collected
    pub fn into_result<T>(self, value: T) -> Result<T, Self> {
        if self.is_empty() { Ok(value) } else { Err(self) }
    }
}
