//! Validation utilities.
//!
//! Validation is explicit: each entity exposes a function that checks its
//! fields with the rules below and accumulates [`FieldViolation`]s. No
//! derive-based or reflective validation is involved.

use crate::{EmporiumError, EmporiumResult, FieldViolation};

/// Accumulates field violations across multiple rule checks.
#[derive(Debug, Default)]
pub struct Violations {
    items: Vec<FieldViolation>,
}

impl Violations {
    /// Creates an empty collector.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records the outcome of a single rule check.
    pub fn record(&mut self, outcome: Result<(), FieldViolation>) {
        if let Err(violation) = outcome {
            self.items.push(violation);
        }
    }

    /// Returns true if no violations were recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Converts the collected violations into a result: `Ok(())` when empty,
    /// a validation error carrying every violation otherwise.
    pub fn into_result(self) -> EmporiumResult<()> {
        if self.items.is_empty() {
            Ok(())
        } else {
            Err(EmporiumError::validation(self.items))
        }
    }
}

/// Common validation functions.
pub mod rules {
    use crate::FieldViolation;

    /// Validates that a string is not blank (not empty after trimming).
    pub fn not_blank(field: &'static str, value: &str) -> Result<(), FieldViolation> {
        if value.trim().is_empty() {
            return Err(FieldViolation::new(field, "not_blank", "must not be blank"));
        }
        Ok(())
    }

    /// Validates that a price is strictly positive and finite.
    pub fn positive_price(field: &'static str, value: f64) -> Result<(), FieldViolation> {
        if !value.is_finite() || value <= 0.0 {
            return Err(FieldViolation::new(
                field,
                "positive",
                "must be greater than 0",
            ));
        }
        Ok(())
    }

    /// Validates that a rating falls within the 1 to 5 scale.
    pub fn rating_in_range(field: &'static str, value: i32) -> Result<(), FieldViolation> {
        if !(1..=5).contains(&value) {
            return Err(FieldViolation::new(
                field,
                "range",
                "must be between 1 and 5",
            ));
        }
        Ok(())
    }

    /// Validates that a referenced id is present (a positive integer).
    pub fn id_present(field: &'static str, value: i64) -> Result<(), FieldViolation> {
        if value <= 0 {
            return Err(FieldViolation::new(field, "required", "is required"));
        }
        Ok(())
    }
}
