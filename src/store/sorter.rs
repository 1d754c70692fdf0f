//! Sorting of patient views
//!
//! Only numeric fields can be sorted on. Sort is stable: equal keys keep
//! the order they had in the store file.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use crate::patient::PatientView;

use super::errors::StoreError;

/// Sortable field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortField {
    Height,
    Weight,
    Bmi,
}

impl SortField {
    pub const ALLOWED: [&'static str; 3] = ["height", "weight", "bmi"];

    pub fn as_str(&self) -> &'static str {
        match self {
            SortField::Height => "height",
            SortField::Weight => "weight",
            SortField::Bmi => "bmi",
        }
    }

    fn key(&self, view: &PatientView) -> f64 {
        match self {
            SortField::Height => view.record.height,
            SortField::Weight => view.record.weight,
            SortField::Bmi => view.bmi,
        }
    }
}

impl FromStr for SortField {
    type Err = StoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "height" => Ok(SortField::Height),
            "weight" => Ok(SortField::Weight),
            "bmi" => Ok(SortField::Bmi),
            other => Err(StoreError::InvalidArgument(format!(
                "invalid field '{}', select from {:?}",
                other,
                SortField::ALLOWED
            ))),
        }
    }
}

impl fmt::Display for SortField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Sort direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

impl SortOrder {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortOrder::Asc => "asc",
            SortOrder::Desc => "desc",
        }
    }
}

impl FromStr for SortOrder {
    type Err = StoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "asc" => Ok(SortOrder::Asc),
            "desc" => Ok(SortOrder::Desc),
            other => Err(StoreError::InvalidArgument(format!(
                "invalid order '{}', select between asc and desc",
                other
            ))),
        }
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Sorts views in place by `field` in the given `order`.
///
/// A NaN key (bmi of a stored record with zero height and weight) sorts
/// last in either order.
pub fn sort_views(views: &mut [PatientView], field: SortField, order: SortOrder) {
    views.sort_by(|a, b| compare_keys(field.key(a), field.key(b), order));
}

fn compare_keys(a: f64, b: f64, order: SortOrder) -> Ordering {
    match (a.is_nan(), b.is_nan()) {
        (true, true) => Ordering::Equal,
        (true, false) => Ordering::Greater,
        (false, true) => Ordering::Less,
        (false, false) => {
            let ordering = a.total_cmp(&b);
            match order {
                SortOrder::Asc => ordering,
                SortOrder::Desc => ordering.reverse(),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::patient::{Gender, PatientRecord};

    fn view(name: &str, height: f64, weight: f64) -> PatientView {
        PatientRecord {
            name: name.to_string(),
            city: "Pune".to_string(),
            age: 30,
            gender: Gender::Male,
            height,
            weight,
        }
        .view()
    }

    fn names(views: &[PatientView]) -> Vec<&str> {
        views.iter().map(|v| v.record.name.as_str()).collect()
    }

    #[test]
    fn test_parse_fields() {
        assert_eq!("bmi".parse::<SortField>().unwrap(), SortField::Bmi);
        assert_eq!("height".parse::<SortField>().unwrap(), SortField::Height);
        assert!(matches!(
            "name".parse::<SortField>(),
            Err(StoreError::InvalidArgument(_))
        ));
        assert!("BMI".parse::<SortField>().is_err());
    }

    #[test]
    fn test_parse_orders() {
        assert_eq!("desc".parse::<SortOrder>().unwrap(), SortOrder::Desc);
        assert_eq!(SortOrder::default(), SortOrder::Asc);
        assert!("down".parse::<SortOrder>().is_err());
    }

    #[test]
    fn test_sort_by_weight_desc() {
        let mut views = vec![view("a", 1.7, 60.0), view("b", 1.7, 80.0), view("c", 1.7, 70.0)];
        sort_views(&mut views, SortField::Weight, SortOrder::Desc);
        assert_eq!(names(&views), vec!["b", "c", "a"]);
    }

    #[test]
    fn test_sort_stable_on_ties() {
        let mut views = vec![view("a", 1.8, 60.0), view("b", 1.6, 60.0), view("c", 1.7, 60.0)];
        sort_views(&mut views, SortField::Weight, SortOrder::Asc);
        assert_eq!(names(&views), vec!["a", "b", "c"]);

        sort_views(&mut views, SortField::Weight, SortOrder::Desc);
        assert_eq!(names(&views), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_nan_keys_sort_last() {
        let mut views = vec![
            view("a", 1.6, 50.0),
            view("nan1", 0.0, 0.0),
            view("b", 1.6, 90.0),
            view("nan2", 0.0, 0.0),
            view("c", 1.6, 70.0),
        ];
        assert!(views[1].bmi.is_nan());

        sort_views(&mut views, SortField::Bmi, SortOrder::Desc);
        assert_eq!(names(&views), vec!["b", "c", "a", "nan1", "nan2"]);

        sort_views(&mut views, SortField::Bmi, SortOrder::Asc);
        assert_eq!(names(&views), vec!["a", "c", "b", "nan1", "nan2"]);
    }
}
