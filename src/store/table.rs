//! In-memory form of the store file
//!
//! The file is one JSON object mapping id to stored fields. Entry order
//! follows the file and survives a load/persist cycle, so ties in a
//! sorted listing come out in insertion order.

use std::fmt;

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::patient::{PatientRecord, PatientView};

/// Ordered mapping of patient id to stored fields
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PatientTable {
    rows: Vec<(String, PatientRecord)>,
}

impl PatientTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.position(id).is_some()
    }

    pub fn get(&self, id: &str) -> Option<&PatientRecord> {
        self.position(id).map(|i| &self.rows[i].1)
    }

    /// Inserts or replaces. A replaced entry keeps its position.
    pub fn upsert(&mut self, id: impl Into<String>, record: PatientRecord) {
        let id = id.into();
        match self.position(&id) {
            Some(i) => self.rows[i].1 = record,
            None => self.rows.push((id, record)),
        }
    }

    pub fn remove(&mut self, id: &str) -> Option<PatientRecord> {
        self.position(id).map(|i| self.rows.remove(i).1)
    }

    /// Entries in file order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &PatientRecord)> {
        self.rows.iter().map(|(id, record)| (id.as_str(), record))
    }

    pub fn records(&self) -> impl Iterator<Item = &PatientRecord> {
        self.rows.iter().map(|(_, record)| record)
    }

    fn position(&self, id: &str) -> Option<usize> {
        self.rows.iter().position(|(key, _)| key == id)
    }
}

impl Serialize for PatientTable {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.rows.len()))?;
        for (id, record) in &self.rows {
            map.serialize_entry(id, record)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for PatientTable {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct TableVisitor;

        impl<'de> Visitor<'de> for TableVisitor {
            type Value = PatientTable;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("an object mapping patient id to patient fields")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
                let mut table = PatientTable::new();
                while let Some((id, record)) = access.next_entry::<String, PatientRecord>()? {
                    // Duplicate keys: last one wins, as with any JSON object
                    table.upsert(id, record);
                }
                Ok(table)
            }
        }

        deserializer.deserialize_map(TableVisitor)
    }
}

/// Every patient with derived fields, serialized as an id-keyed object
/// in store order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PatientListing(pub Vec<(String, PatientView)>);

impl PatientListing {
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&PatientView> {
        self.0.iter().find(|(key, _)| key == id).map(|(_, view)| view)
    }
}

impl From<&PatientTable> for PatientListing {
    fn from(table: &PatientTable) -> Self {
        Self(
            table
                .iter()
                .map(|(id, record)| (id.to_string(), record.view()))
                .collect(),
        )
    }
}

impl Serialize for PatientListing {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (id, view) in &self.0 {
            map.serialize_entry(id, view)?;
        }
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::patient::Gender;

    fn record(name: &str, weight: f64) -> PatientRecord {
        PatientRecord {
            name: name.to_string(),
            city: "Pune".to_string(),
            age: 30,
            gender: Gender::Others,
            height: 1.7,
            weight,
        }
    }

    #[test]
    fn test_file_order_preserved() {
        let json = r#"{
            "P3": {"name":"c","city":"x","age":1,"gender":"male","height":1.0,"weight":1.0},
            "P1": {"name":"a","city":"x","age":1,"gender":"male","height":1.0,"weight":1.0},
            "P2": {"name":"b","city":"x","age":1,"gender":"male","height":1.0,"weight":1.0}
        }"#;
        let table: PatientTable = serde_json::from_str(json).unwrap();
        let ids: Vec<_> = table.iter().map(|(id, _)| id).collect();
        assert_eq!(ids, vec!["P3", "P1", "P2"]);

        let out = serde_json::to_string(&table).unwrap();
        let p3 = out.find("\"P3\"").unwrap();
        let p1 = out.find("\"P1\"").unwrap();
        let p2 = out.find("\"P2\"").unwrap();
        assert!(p3 < p1 && p1 < p2);
    }

    #[test]
    fn test_legacy_derived_keys_ignored() {
        let json = r#"{"P1": {"name":"a","city":"x","age":20,"gender":"female",
            "height":1.6,"weight":60,"bmi":23.44,"verdict":"Normal"}}"#;
        let table: PatientTable = serde_json::from_str(json).unwrap();
        let out = serde_json::to_value(&table).unwrap();
        assert!(out["P1"].get("bmi").is_none());
        assert!(out["P1"].get("verdict").is_none());
    }

    #[test]
    fn test_upsert_keeps_position() {
        let mut table = PatientTable::new();
        table.upsert("A", record("a", 50.0));
        table.upsert("B", record("b", 60.0));
        table.upsert("A", record("a2", 55.0));

        let ids: Vec<_> = table.iter().map(|(id, _)| id).collect();
        assert_eq!(ids, vec!["A", "B"]);
        assert_eq!(table.get("A").unwrap().name, "a2");
    }

    #[test]
    fn test_remove() {
        let mut table = PatientTable::new();
        table.upsert("A", record("a", 50.0));
        assert!(table.remove("A").is_some());
        assert!(table.remove("A").is_none());
        assert!(table.is_empty());
    }

    #[test]
    fn test_listing_carries_derived_fields() {
        let mut table = PatientTable::new();
        table.upsert("B", record("b", 60.0));
        table.upsert("A", record("a", 90.0));

        let listing = PatientListing::from(&table);
        assert_eq!(listing.len(), 2);
        assert_eq!(listing.0[0].0, "B");

        let value = serde_json::to_value(&listing).unwrap();
        assert_eq!(value["A"]["verdict"], "Obese");
        assert_eq!(value["B"]["name"], "b");
    }

    #[test]
    fn test_non_object_rejected() {
        assert!(serde_json::from_str::<PatientTable>("[]").is_err());
    }
}
