//! Partial updates
//!
//! A patch carries only the fields the caller supplied. Absent fields
//! leave the stored value untouched. A field sent as `null` counts as
//! supplied: it clears the value, so the merged record fails validation.

use serde::{Deserialize, Deserializer, Serialize};

use super::errors::{ValidationError, ValidationResult};
use super::record::{Gender, PatientRecord};

/// Update body: every field optional
///
/// `None` is an absent field, `Some(None)` an explicit `null`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PatientPatch {
    #[serde(default, deserialize_with = "supplied", skip_serializing_if = "Option::is_none")]
    pub name: Option<Option<String>>,
    #[serde(default, deserialize_with = "supplied", skip_serializing_if = "Option::is_none")]
    pub city: Option<Option<String>>,
    #[serde(default, deserialize_with = "supplied", skip_serializing_if = "Option::is_none")]
    pub age: Option<Option<i64>>,
    #[serde(default, deserialize_with = "supplied", skip_serializing_if = "Option::is_none")]
    pub gender: Option<Option<Gender>>,
    #[serde(default, deserialize_with = "supplied", skip_serializing_if = "Option::is_none")]
    pub height: Option<Option<f64>>,
    #[serde(default, deserialize_with = "supplied", skip_serializing_if = "Option::is_none")]
    pub weight: Option<Option<f64>>,
}

/// Only called for keys present in the body, so `null` becomes `Some(None)`.
fn supplied<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

impl PatientPatch {
    /// True when no field was supplied
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }

    /// First field the caller explicitly set to `null`
    pub fn cleared_field(&self) -> Option<&'static str> {
        [
            ("name", matches!(self.name, Some(None))),
            ("city", matches!(self.city, Some(None))),
            ("age", matches!(self.age, Some(None))),
            ("gender", matches!(self.gender, Some(None))),
            ("height", matches!(self.height, Some(None))),
            ("weight", matches!(self.weight, Some(None))),
        ]
        .into_iter()
        .find_map(|(field, cleared)| cleared.then_some(field))
    }

    /// Overlays the supplied values onto `base`. Cleared fields keep the
    /// base value here; `merge` is what rejects them.
    pub fn apply(self, base: PatientRecord) -> PatientRecord {
        PatientRecord {
            name: self.name.flatten().unwrap_or(base.name),
            city: self.city.flatten().unwrap_or(base.city),
            age: self.age.flatten().unwrap_or(base.age),
            gender: self.gender.flatten().unwrap_or(base.gender),
            height: self.height.flatten().unwrap_or(base.height),
            weight: self.weight.flatten().unwrap_or(base.weight),
        }
    }

    /// Merges onto `base` and validates the result as a complete record.
    pub fn merge(self, base: PatientRecord) -> ValidationResult<PatientRecord> {
        if let Some(field) = self.cleared_field() {
            return Err(ValidationError::new(field, "is required"));
        }
        let merged = self.apply(base);
        merged.validate()?;
        Ok(merged)
    }
}
