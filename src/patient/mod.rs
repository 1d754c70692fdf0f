//! Patient records
//!
//! Types, validation rules and the derived bmi/verdict fields. Nothing in
//! here touches the filesystem.

mod errors;
mod patch;
mod record;

pub use errors::{ValidationError, ValidationResult};
pub use patch::PatientPatch;
pub use record::{
    compute_bmi, Gender, NewPatient, PatientRecord, PatientView, Verdict, MAX_AGE_EXCLUSIVE,
    MIN_AGE_EXCLUSIVE, OBESE_FROM, UNDERWEIGHT_BELOW,
};
