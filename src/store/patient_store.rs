//! File-backed patient store
//!
//! Every operation loads the whole file; mutations write the whole file
//! back. Mutations hold `write_lock` across the full read-modify-write,
//! and the write itself goes through a temp file that is fsynced and
//! renamed over the store file, so a concurrent reader sees either the
//! old document or the new one.

use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard, PoisonError};

use tracing::{debug, info};

use crate::patient::{NewPatient, PatientPatch, PatientView};

use super::errors::{StoreError, StoreResult};
use super::sorter::{sort_views, SortField, SortOrder};
use super::table::{PatientListing, PatientTable};

/// Default store file name
pub const DEFAULT_STORE_FILE: &str = "patients.json";

/// File-backed patient store
#[derive(Debug)]
pub struct PatientStore {
    path: PathBuf,
    temp_path: PathBuf,
    write_lock: Mutex<()>,
}

impl PatientStore {
    /// Creates a store over `path`. Nothing is read until the first
    /// operation.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let mut temp = path.clone().into_os_string();
        temp.push(".tmp");
        Self {
            path,
            temp_path: PathBuf::from(temp),
            write_lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn exists(&self) -> bool {
        self.path.is_file()
    }

    /// Writes an empty document if the file does not exist yet.
    ///
    /// Returns `true` when a new file was created.
    pub fn initialize(&self) -> StoreResult<bool> {
        let _guard = self.lock();
        if self.exists() {
            return Ok(false);
        }
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(|e| StoreError::io(parent, e))?;
            }
        }
        self.persist(&PatientTable::new())?;
        info!(path = %self.path.display(), "initialized empty patient store");
        Ok(true)
    }

    /// Reads and parses the whole store file.
    pub fn load(&self) -> StoreResult<PatientTable> {
        let content = fs::read(&self.path).map_err(|e| StoreError::io(&self.path, e))?;
        serde_json::from_slice(&content).map_err(|e| StoreError::corrupt(&self.path, e))
    }

    /// Every patient, keyed by id, in store order.
    pub fn list_all(&self) -> StoreResult<PatientListing> {
        let table = self.load()?;
        debug!(count = table.len(), "listed patients");
        Ok(PatientListing::from(&table))
    }

    pub fn get(&self, id: &str) -> StoreResult<PatientView> {
        let table = self.load()?;
        table
            .get(id)
            .map(|record| record.view())
            .ok_or_else(|| StoreError::NotFound(id.to_string()))
    }

    /// All patients ordered by `sort_by`.
    ///
    /// Both arguments are parsed before the file is read, so a bad field
    /// or order fails without touching the store.
    pub fn list_sorted(&self, sort_by: &str, order: &str) -> StoreResult<Vec<PatientView>> {
        let field: SortField = sort_by.parse()?;
        let order: SortOrder = order.parse()?;
        self.list_sorted_by(field, order)
    }

    pub fn list_sorted_by(&self, field: SortField, order: SortOrder) -> StoreResult<Vec<PatientView>> {
        let table = self.load()?;
        let mut views: Vec<PatientView> = table.records().map(|r| r.view()).collect();
        sort_views(&mut views, field, order);
        debug!(field = %field, order = %order, count = views.len(), "sorted patients");
        Ok(views)
    }

    /// Adds a new patient.
    pub fn create(&self, patient: NewPatient) -> StoreResult<PatientView> {
        patient.validate()?;
        let (id, record) = patient.into_parts();

        let _guard = self.lock();
        let mut table = self.load()?;
        if table.contains(&id) {
            return Err(StoreError::AlreadyExists(id));
        }

        let view = record.view();
        table.upsert(id.clone(), record);
        self.persist(&table)?;

        info!(patient_id = %id, bmi = view.bmi, verdict = %view.verdict, "patient created");
        Ok(view)
    }

    /// Applies a partial update and returns the new view.
    pub fn update(&self, id: &str, patch: PatientPatch) -> StoreResult<PatientView> {
        let _guard = self.lock();
        let mut table = self.load()?;
        let existing = table
            .get(id)
            .cloned()
            .ok_or_else(|| StoreError::NotFound(id.to_string()))?;

        let merged = patch.merge(existing)?;
        let view = merged.view();
        table.upsert(id, merged);
        self.persist(&table)?;

        info!(patient_id = %id, bmi = view.bmi, verdict = %view.verdict, "patient updated");
        Ok(view)
    }

    pub fn delete(&self, id: &str) -> StoreResult<()> {
        let _guard = self.lock();
        let mut table = self.load()?;
        if table.remove(id).is_none() {
            return Err(StoreError::NotFound(id.to_string()));
        }
        self.persist(&table)?;

        info!(patient_id = %id, "patient deleted");
        Ok(())
    }

    /// The guard protects no data, so a poisoned lock is still usable.
    fn lock(&self) -> MutexGuard<'_, ()> {
        self.write_lock.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Writes the full table: temp file, fsync, rename.
    fn persist(&self, table: &PatientTable) -> StoreResult<()> {
        let content =
            serde_json::to_vec_pretty(table).map_err(|e| StoreError::corrupt(&self.path, e))?;

        self.write_temp(&content)
            .map_err(|e| StoreError::io(&self.temp_path, e))?;

        fs::rename(&self.temp_path, &self.path).map_err(|e| StoreError::io(&self.path, e))
    }

    fn write_temp(&self, content: &[u8]) -> io::Result<()> {
        let mut file = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(&self.temp_path)?;
        file.write_all(content)?;
        file.write_all(b"\n")?;
        file.sync_all()
    }
}
