//! Constraint descriptors and the validator.

use std::fmt::{Display, Formatter};

/// Candidate value checked by a `ConstraintDescriptor`.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Text(String),
    Number(f64),
}

impl FieldValue {
    /// String form used by the `required` check.
    ///
    /// Numbers format like the host does (`5`, `2.5`, `NaN`).
    pub fn to_text(&self) -> String {
        match self {
            Self::Text(value) => value.clone(),
            Self::Number(value) => value.to_string(),
        }
    }
}

/// One field's rule set at the moment of a check.
///
/// Absent bounds mean "no restriction" on that axis.
#[derive(Debug, Clone, PartialEq)]
pub struct ConstraintDescriptor {
    pub value: FieldValue,
    pub required: bool,
    pub min_length: Option<usize>,
    pub max_length: Option<usize>,
    pub min: Option<f64>,
    pub max: Option<f64>,
}

impl ConstraintDescriptor {
    fn unconstrained(value: FieldValue) -> Self {
        Self {
            value,
            required: false,
            min_length: None,
            max_length: None,
            min: None,
            max: None,
        }
    }

    /// Starts a descriptor for a textual value.
    pub fn text(value: impl Into<String>) -> Self {
        Self::unconstrained(FieldValue::Text(value.into()))
    }

    /// Starts a descriptor for a numeric value.
    pub fn number(value: f64) -> Self {
        Self::unconstrained(FieldValue::Number(value))
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn min_length(mut self, min_length: usize) -> Self {
        self.min_length = Some(min_length);
        self
    }

    pub fn max_length(mut self, max_length: usize) -> Self {
        self.max_length = Some(max_length);
        self
    }

    pub fn min(mut self, min: f64) -> Self {
        self.min = Some(min);
        self
    }

    pub fn max(mut self, max: f64) -> Self {
        self.max = Some(max);
        self
    }
}

/// One failed check reported by `violations`.
#[derive(Debug, Clone, PartialEq)]
pub enum ConstraintViolation {
    /// Value is empty after trimming.
    Required,
    /// Text is shorter than `min` characters.
    MinLength { min: usize, actual: usize },
    /// Text is longer than `max` characters.
    MaxLength { max: usize, actual: usize },
    /// Number is below `min` (or NaN).
    Min { min: f64, actual: f64 },
    /// Number is above `max` (or NaN).
    Max { max: f64, actual: f64 },
}

impl Display for ConstraintViolation {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Required => write!(f, "value is required"),
            Self::MinLength { min, actual } => {
                write!(f, "length {actual} is below minimum {min}")
            }
            Self::MaxLength { max, actual } => {
                write!(f, "length {actual} is above maximum {max}")
            }
            Self::Min { min, actual } => write!(f, "value {actual} is below minimum {min}"),
            Self::Max { max, actual } => write!(f, "value {actual} is above maximum {max}"),
        }
    }
}

/// Returns `true` when every applicable check passes.
pub fn validate(input: &ConstraintDescriptor) -> bool {
    violations(input).is_empty()
}

/// Lists every failed check; empty when the value is valid.
///
/// Checks are independent, so the order of the returned list carries no
/// meaning beyond being stable.
pub fn violations(input: &ConstraintDescriptor) -> Vec<ConstraintViolation> {
    let mut failed = Vec::new();

    if input.required && input.value.to_text().trim().is_empty() {
        failed.push(ConstraintViolation::Required);
    }

    match &input.value {
        FieldValue::Text(text) => {
            let actual = text.chars().count();
            if let Some(min) = input.min_length {
                if actual < min {
                    failed.push(ConstraintViolation::MinLength { min, actual });
                }
            }
            if let Some(max) = input.max_length {
                if actual > max {
                    failed.push(ConstraintViolation::MaxLength { max, actual });
                }
            }
        }
        FieldValue::Number(actual) => {
            let actual = *actual;
            if let Some(min) = input.min {
                if actual.is_nan() || actual < min {
                    failed.push(ConstraintViolation::Min { min, actual });
                }
            }
            if let Some(max) = input.max {
                if actual.is_nan() || actual > max {
                    failed.push(ConstraintViolation::Max { max, actual });
                }
            }
        }
    }

    failed
}
