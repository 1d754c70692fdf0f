//! Patient record types
//!
//! `PatientRecord` is the stored shape: exactly the six fields that are
//! written to the store file. `bmi` and `verdict` are never stored; they
//! are derived on every read through `PatientView`.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::errors::{ValidationError, ValidationResult};

/// Lower bound (exclusive) for age
pub const MIN_AGE_EXCLUSIVE: i64 = 0;
/// Upper bound (exclusive) for age
pub const MAX_AGE_EXCLUSIVE: i64 = 120;

/// BMI below which a patient is underweight
pub const UNDERWEIGHT_BELOW: f64 = 18.5;
/// BMI from which a patient is obese
pub const OBESE_FROM: f64 = 30.0;

/// Patient gender
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
    Others,
}

impl Gender {
    pub fn as_str(&self) -> &'static str {
        match self {
            Gender::Male => "male",
            Gender::Female => "female",
            Gender::Others => "others",
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// BMI classification
///
/// Only three bands exist. The band between 18.5 and 30 is a single
/// `Normal` label; there is no separate overweight band.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Verdict {
    Underweight,
    Normal,
    Obese,
}

impl Verdict {
    /// Classifies a (rounded) BMI value
    pub fn classify(bmi: f64) -> Self {
        if bmi < UNDERWEIGHT_BELOW {
            Verdict::Underweight
        } else if bmi < OBESE_FROM {
            Verdict::Normal
        } else {
            Verdict::Obese
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Verdict::Underweight => "Underweight",
            Verdict::Normal => "Normal",
            Verdict::Obese => "Obese",
        }
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Computes weight / height², rounded to 2 decimal places.
pub fn compute_bmi(height: f64, weight: f64) -> f64 {
    let raw = weight / height.powi(2);
    (raw * 100.0).round() / 100.0
}

/// Stored patient fields (the id is the store key, not part of the value)
///
/// Numeric fields missing from a stored record read as 0. Such a record
/// still loads and sorts; it just never passes `validate`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PatientRecord {
    pub name: String,
    pub city: String,
    #[serde(default)]
    pub age: i64,
    pub gender: Gender,
    /// Meters
    #[serde(default)]
    pub height: f64,
    /// Kilograms
    #[serde(default)]
    pub weight: f64,
}

impl PatientRecord {
    /// Checks every field constraint, reporting the first violation.
    ///
    /// Create and update both go through here, so a merged patch is held
    /// to the same rules as a fresh record.
    pub fn validate(&self) -> ValidationResult<()> {
        if self.name.trim().is_empty() {
            return Err(ValidationError::new("name", "must not be empty"));
        }
        if self.city.trim().is_empty() {
            return Err(ValidationError::new("city", "must not be empty"));
        }
        if self.age <= MIN_AGE_EXCLUSIVE {
            return Err(ValidationError::new(
                "age",
                format!("must be greater than {}", MIN_AGE_EXCLUSIVE),
            ));
        }
        if self.age >= MAX_AGE_EXCLUSIVE {
            return Err(ValidationError::new(
                "age",
                format!("must be less than {}", MAX_AGE_EXCLUSIVE),
            ));
        }
        // `!(x > 0.0)` also rejects NaN
        if !(self.height > 0.0) || !self.height.is_finite() {
            return Err(ValidationError::new("height", "must be greater than 0"));
        }
        if !(self.weight > 0.0) || !self.weight.is_finite() {
            return Err(ValidationError::new("weight", "must be greater than 0"));
        }
        if !self.bmi().is_finite() {
            return Err(ValidationError::new(
                "bmi",
                "height and weight must give a finite value",
            ));
        }
        Ok(())
    }

    pub fn bmi(&self) -> f64 {
        compute_bmi(self.height, self.weight)
    }

    pub fn verdict(&self) -> Verdict {
        Verdict::classify(self.bmi())
    }

    /// Attaches the derived fields
    pub fn view(&self) -> PatientView {
        let bmi = self.bmi();
        PatientView {
            record: self.clone(),
            bmi,
            verdict: Verdict::classify(bmi),
        }
    }
}

/// Body of a create request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewPatient {
    pub id: String,
    #[serde(flatten)]
    pub record: PatientRecord,
}

impl NewPatient {
    /// Validates the id and every record field.
    pub fn validate(&self) -> ValidationResult<()> {
        if self.id.trim().is_empty() {
            return Err(ValidationError::new("id", "must not be empty"));
        }
        self.record.validate()
    }

    pub fn into_parts(self) -> (String, PatientRecord) {
        (self.id, self.record)
    }
}

/// A record as returned to callers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PatientView {
    #[serde(flatten)]
    pub record: PatientRecord,
    pub bmi: f64,
    pub verdict: Verdict,
}
