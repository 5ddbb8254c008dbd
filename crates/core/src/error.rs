//! Domain error model.

use core::fmt;

use thiserror::Error;

/// Result type used across the domain layer.
pub type DomainResult<T> = Result<T, DomainError>;

/// Domain-level error.
///
/// Keep this focused on deterministic, local failures (validation, lookups).
/// Network and configuration failures belong to the session crate and are
/// never surfaced through catalog operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// One or more input fields failed validation. Nothing was mutated.
    #[error("validation failed: {0}")]
    Validation(#[from] ValidationError),

    /// An identifier was invalid (e.g. parse failure).
    #[error("invalid identifier: {0}")]
    InvalidId(String),

    /// A requested product was not found.
    #[error("not found")]
    NotFound,
}

impl DomainError {
    pub fn validation(field: Field, reason: impl Into<String>) -> Self {
        Self::Validation(ValidationError::single(field, reason))
    }

    pub fn invalid_id(msg: impl Into<String>) -> Self {
        Self::InvalidId(msg.into())
    }

    pub fn not_found() -> Self {
        Self::NotFound
    }

    /// Returns the validation details when this is a validation failure.
    pub fn as_validation(&self) -> Option<&ValidationError> {
        match self {
            Self::Validation(err) => Some(err),
            _ => None,
        }
    }
}

/// Input field a validation issue refers to.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Field {
    Name,
    Price,
    Quantity,
    Unit,
    Discount,
}

impl Field {
    pub fn as_str(&self) -> &'static str {
        match self {
            Field::Name => "name",
            Field::Price => "price",
            Field::Quantity => "quantity",
            Field::Unit => "unit",
            Field::Discount => "discount",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single rejected field together with a human-readable reason.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldIssue {
    pub field: Field,
    pub reason: String,
}

/// Every field that failed validation for one operation.
///
/// Parsers collect all issues instead of stopping at the first one, so the
/// message shown to the user names each field that needs fixing.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ValidationError {
    issues: Vec<FieldIssue>,
}

impl ValidationError {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn single(field: Field, reason: impl Into<String>) -> Self {
        let mut err = Self::new();
        err.push(field, reason);
        err
    }

    pub fn push(&mut self, field: Field, reason: impl Into<String>) {
        self.issues.push(FieldIssue {
            field,
            reason: reason.into(),
        });
    }

    pub fn is_empty(&self) -> bool {
        self.issues.is_empty()
    }

    pub fn issues(&self) -> &[FieldIssue] {
        &self.issues
    }

    /// Fields that failed, in the order they were checked.
    pub fn fields(&self) -> impl Iterator<Item = Field> + '_ {
        self.issues.iter().map(|issue| issue.field)
    }

    pub fn has_field(&self, field: Field) -> bool {
        self.fields().any(|f| f == field)
    }

    /// `Ok(value)` when no issue was recorded, otherwise `Err(self)`.
    pub fn into_result<T>(self, value: T) -> Result<T, Self> {
        if self.is_empty() { Ok(value) } else { Err(self) }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.issues.is_empty() {
            return f.write_str("no issues");
        }
        for (i, issue) in self.issues.iter().enumerate() {
            if i > 0 {
                f.write_str("; ")?;
            }
            write!(f, "{}: {}", issue.field, issue.reason)?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationError {}
