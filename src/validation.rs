use serde::Serialize;
use std::fmt;

/// A single failed rule on a named field
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// All rule failures found while validating one value
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ValidationErrors(pub Vec<FieldError>);

impl ValidationErrors {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(|e| e.field.as_str())
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self
            .0
            .iter()
            .map(|e| format!("{} {}", e.field, e.message))
            .collect();
        write!(f, "{}", parts.join("; "))
    }
}

impl std::error::Error for ValidationErrors {}

/// Struct-level validation run by the binder after every successful bind.
///
/// Implement it on request payloads; a type with no rules can return `Ok(())`.
pub trait Validate {
    fn validate(&self) -> Result<(), ValidationErrors>;
}

impl<T: Validate> Validate for Option<T> {
    fn validate(&self) -> Result<(), ValidationErrors> {
        match self {
            Some(inner) => inner.validate(),
            None => Ok(()),
        }
    }
}

impl<T: Validate> Validate for Vec<T> {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = Vec::new();
        for (i, item) in self.iter().enumerate() {
            if let Err(ValidationErrors(inner)) = item.validate() {
                errors.extend(
                    inner
                        .into_iter()
                        .map(|e| FieldError::new(format!("[{}].{}", i, e.field), e.message)),
                );
            }
        }
        if errors.is_empty() {
            Ok(())
        } else {
            Err(ValidationErrors(errors))
        }
    }
}

/// Validate `value` through its [`Validate`] impl.
///
/// This is the single entry point the binder uses, whatever the binding source.
pub fn validate_struct<T: Validate + ?Sized>(value: &T) -> Result<(), ValidationErrors> {
    value.validate()
}

/// Collects field errors for a [`Validate`] impl.
///
/// ```ignore
/// Validator::new()
///     .required("name", &self.name)
///     .length("name", &self.name, 1, 64)
///     .check("age", self.age >= 18, "must be at least 18")
///     .finish()
/// ```
#[derive(Debug, Default)]
pub struct Validator {
    errors: Vec<FieldError>,
}

impl Validator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `message` against `field` unless `ok` holds
    pub fn check(mut self, field: &str, ok: bool, message: &str) -> Self {
        if !ok {
            self.errors.push(FieldError::new(field, message));
        }
        self
    }

    /// Fails on empty or whitespace-only strings
    pub fn required(self, field: &str, value: &str) -> Self {
        self.check(field, !value.trim().is_empty(), "is required")
    }

    /// Character count must fall within `min..=max`
    pub fn length(self, field: &str, value: &str, min: usize, max: usize) -> Self {
        let count = value.chars().count();
        let message = format!("must be between {} and {} characters", min, max);
        self.check(field, (min..=max).contains(&count), &message)
    }

    pub fn finish(self) -> Result<(), ValidationErrors> {
        if self.errors.is_empty() {
            Ok(())
        } else {
            Err(ValidationErrors(self.errors))
        }
    }
}
