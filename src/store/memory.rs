//! In-memory storage backend

use std::collections::BTreeMap;

use tracing::debug;
use uuid::Uuid;

use crate::io::error::{Result, not_found};
use crate::model::page::Page;
use crate::model::table::RollTable;
use crate::store::{OwnedRecord, Record, RecordKind, Storage, ensure_slug_free};

/// Storage keeping every record in ordered maps
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    tables: BTreeMap<Uuid, RollTable>,
    pages: BTreeMap<Uuid, Page>,
}

impl MemoryStorage {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of records of `kind`
    pub fn len(&self, kind: RecordKind) -> usize {
        match kind {
            RecordKind::Table => self.tables.len(),
            RecordKind::Page => self.pages.len(),
        }
    }

    fn records(&self, kind: RecordKind) -> Vec<Record> {
        match kind {
            RecordKind::Table => self.tables.values().cloned().map(Record::Table).collect(),
            RecordKind::Page => self.pages.values().cloned().map(Record::Page).collect(),
        }
    }
}

impl Storage for MemoryStorage {
    fn load(&self, kind: RecordKind, id: Uuid) -> Result<Record> {
        let record = match kind {
            RecordKind::Table => self.tables.get(&id).cloned().map(Record::Table),
            RecordKind::Page => self.pages.get(&id).cloned().map(Record::Page),
        };
        record.ok_or_else(|| not_found(kind, &id))
    }

    fn save(&mut self, record: Record) -> Result<()> {
        record.validate()?;
        debug!(kind = %record.kind(), id = %record.record_id(), "saving record");
        match record {
            Record::Table(table) => {
                self.tables.insert(table.id, table);
            }
            Record::Page(page) => {
                ensure_slug_free(&page, self.pages.values())?;
                self.pages.insert(page.id, page);
            }
        }
        Ok(())
    }

    fn delete(&mut self, kind: RecordKind, id: Uuid) -> Result<()> {
        let removed = match kind {
            RecordKind::Table => self.tables.remove(&id).is_some(),
            RecordKind::Page => self.pages.remove(&id).is_some(),
        };
        if removed {
            debug!(%kind, %id, "deleted record");
            Ok(())
        } else {
            Err(not_found(kind, &id))
        }
    }

    fn find_by_owner(&self, kind: RecordKind, owner: &str) -> Result<Vec<Record>> {
        Ok(self
            .records(kind)
            .into_iter()
            .filter(|record| record.owner() == owner)
            .collect())
    }

    fn find_public(&self, kind: RecordKind) -> Result<Vec<Record>> {
        Ok(self
            .records(kind)
            .into_iter()
            .filter(OwnedRecord::is_public)
            .collect())
    }

    fn search(&self, kind: RecordKind, query: &str) -> Result<Vec<Record>> {
        Ok(self
            .records(kind)
            .into_iter()
            .filter(|record| record.matches_query(query))
            .collect())
    }

    fn find_page_by_slug(&self, slug: &str) -> Result<Page> {
        self.pages
            .values()
            .find(|page| page.slug == slug)
            .cloned()
            .ok_or_else(|| not_found(RecordKind::Page, &slug))
    }
}
