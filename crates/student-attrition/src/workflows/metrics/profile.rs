use std::collections::BTreeMap;

use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};

use super::schema::{MetricCategory, MetricField};
use super::MetricError;

/// Raw answer for a single field, as typed into the form or after coercion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MetricValue {
    Number(f64),
    Text(String),
}

impl MetricValue {
    /// A value is filled unless it is the empty string. Numbers always count, zero included.
    pub fn is_filled(&self) -> bool {
        match self {
            MetricValue::Number(_) => true,
            MetricValue::Text(text) => !text.is_empty(),
        }
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            MetricValue::Number(number) => Some(*number),
            MetricValue::Text(_) => None,
        }
    }
}

impl From<&str> for MetricValue {
    fn from(value: &str) -> Self {
        MetricValue::Text(value.to_string())
    }
}

impl From<String> for MetricValue {
    fn from(value: String) -> Self {
        MetricValue::Text(value)
    }
}

impl From<f64> for MetricValue {
    fn from(value: f64) -> Self {
        MetricValue::Number(value)
    }
}

impl From<i64> for MetricValue {
    fn from(value: i64) -> Self {
        MetricValue::Number(value as f64)
    }
}

/// In-progress answers for the fixed field set. Absent fields are simply not stored.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MetricProfile {
    values: BTreeMap<MetricField, MetricValue>,
}

impl MetricProfile {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a profile from wire names, rejecting anything outside the schema.
    pub fn from_entries<I, K>(entries: I) -> Result<Self, MetricError>
    where
        I: IntoIterator<Item = (K, Option<MetricValue>)>,
        K: AsRef<str>,
    {
        let mut profile = Self::new();
        for (name, value) in entries {
            profile.set_field(name.as_ref(), value)?;
        }
        Ok(profile)
    }

    /// Sets a field by its wire name. `None` clears it.
    pub fn set_field(
        &mut self,
        name: &str,
        value: Option<MetricValue>,
    ) -> Result<(), MetricError> {
        let field = name.parse::<MetricField>()?;
        self.set(field, value);
        Ok(())
    }

    pub fn set(&mut self, field: MetricField, value: Option<MetricValue>) {
        match value {
            Some(value) => {
                self.values.insert(field, value);
            }
            None => {
                self.values.remove(&field);
            }
        }
    }

    pub fn get(&self, field: MetricField) -> Option<&MetricValue> {
        self.values.get(&field)
    }

    pub fn is_filled(&self, field: MetricField) -> bool {
        self.get(field).is_some_and(MetricValue::is_filled)
    }

    pub fn clear(&mut self) {
        self.values.clear();
    }

    pub fn filled_count(&self) -> usize {
        MetricField::ALL
            .into_iter()
            .filter(|field| self.is_filled(*field))
            .count()
    }

    /// Percentage of all fields that are filled.
    pub fn completion(&self) -> f64 {
        percentage(self.filled_count(), MetricField::ALL.len())
    }

    /// Percentage of the category's fields that are filled.
    pub fn category_completion(&self, category: MetricCategory) -> f64 {
        let fields = category.fields();
        let filled = fields.iter().filter(|field| self.is_filled(**field)).count();
        percentage(filled, fields.len())
    }

    pub fn is_complete(&self) -> bool {
        self.filled_count() == MetricField::ALL.len()
    }

    pub fn missing_fields(&self) -> Vec<MetricField> {
        MetricField::ALL
            .into_iter()
            .filter(|field| !self.is_filled(*field))
            .collect()
    }

    pub fn completion_summary(&self) -> CompletionSummary {
        CompletionSummary {
            overall: self.completion(),
            academic: self.category_completion(MetricCategory::Academic),
            support_network: self.category_completion(MetricCategory::SupportNetwork),
            finance: self.category_completion(MetricCategory::Finance),
            background: self.category_completion(MetricCategory::Background),
            missing: self.missing_fields(),
        }
    }
}

fn percentage(filled: usize, total: usize) -> f64 {
    if total == 0 {
        return 0.0;
    }
    100.0 * filled as f64 / total as f64
}

/// Emits every field in schema order; absent fields and non-finite numbers become `null`.
impl Serialize for MetricProfile {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(MetricField::ALL.len()))?;
        for field in MetricField::ALL {
            map.serialize_entry(field.name(), &self.get(field))?;
        }
        map.end()
    }
}

/// Progress snapshot used by reports and the CLI.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CompletionSummary {
    pub overall: f64,
    pub academic: f64,
    pub support_network: f64,
    pub finance: f64,
    pub background: f64,
    pub missing: Vec<MetricField>,
}
