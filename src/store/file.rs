//! JSON file storage: one pretty-printed file per record
//!
//! Layout on disk is `<root>/tables/<id>.json` and `<root>/pages/<id>.json`.
//! Records are validated on load since the files may be edited by hand.
//! Listings skip files that fail to load; direct loads report the failure.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};
use uuid::Uuid;

use crate::io::error::{Result, RollpageError, file_system_error, not_found};
use crate::model::page::Page;
use crate::model::table::RollTable;
use crate::store::{OwnedRecord, Record, RecordKind, Storage, ensure_slug_free};

/// Storage backed by a directory of JSON files
#[derive(Debug, Clone)]
pub struct JsonFileStorage {
    root: PathBuf,
}

impl JsonFileStorage {
    /// Use `root` as the storage directory; it is created on first write
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Storage directory
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Path of the file holding a record
    pub fn record_path(&self, kind: RecordKind, id: Uuid) -> PathBuf {
        self.root.join(kind.dir_name()).join(format!("{id}.json"))
    }

    fn read_record(&self, kind: RecordKind, path: &Path) -> Result<Record> {
        let record = match kind {
            RecordKind::Table => Record::Table(read_json::<RollTable>(path)?),
            RecordKind::Page => Record::Page(read_json::<Page>(path)?),
        };
        record.validate()?;
        Ok(record)
    }

    fn all(&self, kind: RecordKind) -> Result<Vec<Record>> {
        let dir = self.root.join(kind.dir_name());
        let entries = match fs::read_dir(&dir) {
            Ok(entries) => entries,
            Err(error) if error.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(error) => return Err(file_system_error(dir, "list", error)),
        };

        let mut paths = Vec::new();
        for entry in entries {
            let path = entry.map_err(|error| file_system_error(&dir, "list", error))?.path();
            if path.extension().and_then(|ext| ext.to_str()) == Some("json") {
                paths.push(path);
            }
        }
        paths.sort();

        Ok(paths
            .iter()
            .filter_map(|path| match self.read_record(kind, path) {
                Ok(record) => Some(record),
                Err(error) => {
                    warn!(path = %path.display(), %error, "skipped unreadable record");
                    None
                }
            })
            .collect())
    }
}

pub(crate) fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let content =
        fs::read_to_string(path).map_err(|error| file_system_error(path, "read", error))?;
    serde_json::from_str(&content).map_err(|source| RollpageError::Serialization {
        path: path.to_path_buf(),
        source,
    })
}

fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .map_err(|error| file_system_error(parent, "create directory", error))?;
    }
    let content =
        serde_json::to_string_pretty(value).map_err(|source| RollpageError::Serialization {
            path: path.to_path_buf(),
            source,
        })?;
    fs::write(path, content).map_err(|error| file_system_error(path, "write", error))
}

impl Storage for JsonFileStorage {
    fn load(&self, kind: RecordKind, id: Uuid) -> Result<Record> {
        let path = self.record_path(kind, id);
        if !path.is_file() {
            return Err(not_found(kind, &id));
        }
        let record = self.read_record(kind, &path)?;
        if record.record_id() != id {
            return Err(not_found(kind, &id));
        }
        Ok(record)
    }

    fn save(&mut self, record: Record) -> Result<()> {
        record.validate()?;
        let path = self.record_path(record.kind(), record.record_id());

        match &record {
            Record::Table(table) => write_json(&path, table)?,
            Record::Page(page) => {
                let others: Vec<Page> = self
                    .all(RecordKind::Page)?
                    .into_iter()
                    .filter_map(|other| match other {
                        Record::Page(other) => Some(other),
                        Record::Table(_) => None,
                    })
                    .collect();
                ensure_slug_free(page, others.iter())?;
                write_json(&path, page)?;
            }
        }

        debug!(path = %path.display(), "saved record");
        Ok(())
    }

    fn delete(&mut self, kind: RecordKind, id: Uuid) -> Result<()> {
        let path = self.record_path(kind, id);
        match fs::remove_file(&path) {
            Ok(()) => {
                debug!(path = %path.display(), "deleted record");
                Ok(())
            }
            Err(error) if error.kind() == ErrorKind::NotFound => Err(not_found(kind, &id)),
            Err(error) => Err(file_system_error(path, "delete", error)),
        }
    }

    fn find_by_owner(&self, kind: RecordKind, owner: &str) -> Result<Vec<Record>> {
        Ok(self
            .all(kind)?
            .into_iter()
            .filter(|record| record.owner() == owner)
            .collect())
    }

    fn find_public(&self, kind: RecordKind) -> Result<Vec<Record>> {
        Ok(self
            .all(kind)?
            .into_iter()
            .filter(OwnedRecord::is_public)
            .collect())
    }

    fn search(&self, kind: RecordKind, query: &str) -> Result<Vec<Record>> {
        Ok(self
            .all(kind)?
            .into_iter()
            .filter(|record| record.matches_query(query))
            .collect())
    }

    fn find_page_by_slug(&self, slug: &str) -> Result<Page> {
        self.all(RecordKind::Page)?
            .into_iter()
            .find_map(|record| match record {
                Record::Page(page) if page.slug == slug => Some(page),
                _ => None,
            })
            .ok_or_else(|| not_found(RecordKind::Page, &slug))
    }
}
