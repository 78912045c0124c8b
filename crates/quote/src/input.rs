use serde::{Deserialize, Serialize};

pub const NAME: &str = "name";
pub const PHONE: &str = "phone";
pub const EMAIL: &str = "email";
pub const COMPANY: &str = "company";
pub const SERVICES: &str = "services[]";
pub const PROJECT_DETAILS: &str = "project-details";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Single(String),
    Multiple(Vec<String>),
}

impl FieldValue {
    /// First entered value, which is what the validator looks at.
    pub fn first(&self) -> &str {
        match self {
            FieldValue::Single(value) => value,
            FieldValue::Multiple(values) => values.first().map(String::as_str).unwrap_or(""),
        }
    }

    pub fn values(&self) -> Vec<&str> {
        match self {
            FieldValue::Single(value) => vec![value.as_str()],
            FieldValue::Multiple(values) => values.iter().map(String::as_str).collect(),
        }
    }

    fn push(&mut self, value: String) {
        match self {
            FieldValue::Single(first) => {
                let first = std::mem::take(first);
                *self = FieldValue::Multiple(vec![first, value]);
            }
            FieldValue::Multiple(values) => values.push(value),
        }
    }
}

/// Snapshot of the values entered in the quote form, in form order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormInput {
    fields: Vec<(String, FieldValue)>,
}

impl FormInput {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds the input from raw `(name, value)` pairs as a browser submits them.
    /// A repeated name (checkbox group) collapses into an ordered list.
    pub fn from_pairs<K, V>(pairs: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        let mut input = Self::new();
        for (name, value) in pairs {
            input.append(name, value);
        }
        input
    }

    pub fn append(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();

        match self.fields.iter_mut().find(|(field, _)| *field == name) {
            Some((_, existing)) => existing.push(value),
            None => self.fields.push((name, FieldValue::Single(value))),
        }
    }

    /// Builder-style `append`.
    pub fn with(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.append(name, value);
        self
    }

    pub fn get(&self, name: &str) -> Option<&FieldValue> {
        self.fields
            .iter()
            .find(|(field, _)| field == name)
            .map(|(_, value)| value)
    }

    /// Single text value of a field, empty when the field is absent.
    pub fn text(&self, name: &str) -> &str {
        self.get(name).map(FieldValue::first).unwrap_or("")
    }

    pub fn list(&self, name: &str) -> Vec<&str> {
        self.get(name).map(FieldValue::values).unwrap_or_default()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldValue)> {
        self.fields.iter().map(|(name, value)| (name.as_str(), value))
    }

    /// Flattens back to `(name, value)` pairs, repeating names of multi-valued fields.
    pub fn to_pairs(&self) -> Vec<(String, String)> {
        self.iter()
            .flat_map(|(name, value)| {
                value
                    .values()
                    .into_iter()
                    .map(move |v| (name.to_owned(), v.to_owned()))
            })
            .collect()
    }
}
