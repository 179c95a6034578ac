use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::profile::{MetricProfile, MetricValue};
use super::schema::MetricField;
use super::MetricError;

/// What to do with a numeric field whose answer does not parse to a finite number.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CoercionPolicy {
    /// Reject the submission with [`MetricError::InvalidNumericInput`].
    #[default]
    Strict,
    /// Transmit `NaN`, which reaches the wire as `null`.
    Permissive,
}

impl FromStr for CoercionPolicy {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "strict" => Ok(CoercionPolicy::Strict),
            "permissive" => Ok(CoercionPolicy::Permissive),
            other => Err(other.to_string()),
        }
    }
}

impl fmt::Display for CoercionPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CoercionPolicy::Strict => f.write_str("strict"),
            CoercionPolicy::Permissive => f.write_str("permissive"),
        }
    }
}

/// Parses a raw answer to a finite float, or returns `NaN`.
pub fn coerce_numeric(value: &MetricValue) -> f64 {
    parse_finite(value).unwrap_or(f64::NAN)
}

fn parse_finite(value: &MetricValue) -> Option<f64> {
    let number = match value {
        MetricValue::Number(number) => *number,
        MetricValue::Text(text) => text.trim().parse::<f64>().ok()?,
    };
    number.is_finite().then_some(number)
}

/// Rewrites every numeric field in place. Under the strict policy the profile is left
/// untouched when any field fails to parse.
pub fn coerce_profile(
    profile: &mut MetricProfile,
    policy: CoercionPolicy,
) -> Result<(), MetricError> {
    let mut coerced = Vec::new();
    for field in MetricField::ALL.into_iter().filter(|field| field.is_numeric()) {
        let Some(value) = profile.get(field) else {
            continue;
        };
        let number = match (parse_finite(value), policy) {
            (Some(number), _) => number,
            (None, CoercionPolicy::Permissive) => f64::NAN,
            (None, CoercionPolicy::Strict) => {
                return Err(MetricError::InvalidNumericInput {
                    field,
                    value: raw_display(value),
                })
            }
        };
        coerced.push((field, number));
    }

    for (field, number) in coerced {
        profile.set(field, Some(MetricValue::Number(number)));
    }
    Ok(())
}

fn raw_display(value: &MetricValue) -> String {
    match value {
        MetricValue::Text(text) => text.clone(),
        MetricValue::Number(number) => number.to_string(),
    }
}
