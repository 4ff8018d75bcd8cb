//! Persistence and access control collaborators
//!
//! This module contains:
//! - The record types that are persisted and the `Storage` interface
//! - An in-memory and a JSON-directory storage backend
//! - Caller identity and ownership/visibility checks

use std::fmt;

use uuid::Uuid;

use crate::io::error::Result;
use crate::model::page::Page;
use crate::model::table::RollTable;

/// Caller identity and ownership checks
pub mod access;
/// One-JSON-file-per-record storage
pub mod file;
/// In-memory storage
pub mod memory;

pub use access::{AuthContext, CallerContext};
pub use file::JsonFileStorage;
pub use memory::MemoryStorage;

/// Kinds of persisted records
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum RecordKind {
    /// A roll table
    Table,
    /// A page
    Page,
}

impl RecordKind {
    /// Directory name used by file-backed storage
    pub const fn dir_name(self) -> &'static str {
        match self {
            Self::Table => "tables",
            Self::Page => "pages",
        }
    }
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Table => write!(f, "Table"),
            Self::Page => write!(f, "Page"),
        }
    }
}

/// Common view of persisted records used by storage and access checks
pub trait OwnedRecord {
    /// Kind of record
    fn kind(&self) -> RecordKind;
    /// Record id
    fn record_id(&self) -> Uuid;
    /// Id of the owning user
    fn owner(&self) -> &str;
    /// Name used for search
    fn name(&self) -> &str;
    /// Whether non-owners may view it
    fn is_public(&self) -> bool;
}

impl OwnedRecord for RollTable {
    fn kind(&self) -> RecordKind {
        RecordKind::Table
    }

    fn record_id(&self) -> Uuid {
        self.id
    }

    fn owner(&self) -> &str {
        &self.owner
    }

    fn name(&self) -> &str {
        &self.name
    }

    // Tables are only ever listed for their owner
    fn is_public(&self) -> bool {
        false
    }
}

impl OwnedRecord for Page {
    fn kind(&self) -> RecordKind {
        RecordKind::Page
    }

    fn record_id(&self) -> Uuid {
        self.id
    }

    fn owner(&self) -> &str {
        &self.owner
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn is_public(&self) -> bool {
        self.is_public
    }
}

/// A persisted record of either kind
#[derive(Debug, Clone, PartialEq)]
pub enum Record {
    /// A roll table
    Table(RollTable),
    /// A page
    Page(Page),
}

impl Record {
    /// Check the record's own invariants
    ///
    /// # Errors
    ///
    /// See [`RollTable::validate`] and [`Page::validate`]
    pub fn validate(&self) -> Result<()> {
        match self {
            Self::Table(table) => table.validate(),
            Self::Page(page) => page.validate(),
        }
    }

    /// Whether the record name contains `query`, ignoring case
    pub fn matches_query(&self, query: &str) -> bool {
        self.name().to_lowercase().contains(&query.to_lowercase())
    }

    fn inner(&self) -> &dyn OwnedRecord {
        match self {
            Self::Table(table) => table,
            Self::Page(page) => page,
        }
    }
}

impl OwnedRecord for Record {
    fn kind(&self) -> RecordKind {
        self.inner().kind()
    }

    fn record_id(&self) -> Uuid {
        self.inner().record_id()
    }

    fn owner(&self) -> &str {
        self.inner().owner()
    }

    fn name(&self) -> &str {
        self.inner().name()
    }

    fn is_public(&self) -> bool {
        self.inner().is_public()
    }
}

impl From<RollTable> for Record {
    fn from(table: RollTable) -> Self {
        Self::Table(table)
    }
}

impl From<Page> for Record {
    fn from(page: Page) -> Self {
        Self::Page(page)
    }
}

/// Persistence collaborator for tables and pages
///
/// Writes are last-write-wins; callers serialize concurrent edits.
pub trait Storage {
    /// Load one record
    ///
    /// # Errors
    ///
    /// Returns `NotFound` when no such record exists
    fn load(&self, kind: RecordKind, id: Uuid) -> Result<Record>;

    /// Insert or replace a record
    ///
    /// # Errors
    ///
    /// Returns `InvalidParameter` when a page slug is taken by another page,
    /// or a backend failure
    fn save(&mut self, record: Record) -> Result<()>;

    /// Delete a record
    ///
    /// # Errors
    ///
    /// Returns `NotFound` when no such record exists
    fn delete(&mut self, kind: RecordKind, id: Uuid) -> Result<()>;

    /// All records of `kind` owned by `owner`
    ///
    /// # Errors
    ///
    /// Returns a backend failure
    fn find_by_owner(&self, kind: RecordKind, owner: &str) -> Result<Vec<Record>>;

    /// All public records of `kind`
    ///
    /// # Errors
    ///
    /// Returns a backend failure
    fn find_public(&self, kind: RecordKind) -> Result<Vec<Record>>;

    /// Records of `kind` whose name contains `query`, ignoring case
    ///
    /// # Errors
    ///
    /// Returns a backend failure
    fn search(&self, kind: RecordKind, query: &str) -> Result<Vec<Record>>;

    /// The page with the given slug
    ///
    /// # Errors
    ///
    /// Returns `NotFound` when no page has that slug
    fn find_page_by_slug(&self, slug: &str) -> Result<Page>;

    /// Load a roll table
    ///
    /// # Errors
    ///
    /// Returns `NotFound` when no such table exists
    fn load_table(&self, id: Uuid) -> Result<RollTable> {
        match self.load(RecordKind::Table, id)? {
            Record::Table(table) => Ok(table),
            Record::Page(_) => Err(crate::io::error::not_found(RecordKind::Table, &id)),
        }
    }

    /// Load a page
    ///
    /// # Errors
    ///
    /// Returns `NotFound` when no such page exists
    fn load_page(&self, id: Uuid) -> Result<Page> {
        match self.load(RecordKind::Page, id)? {
            Record::Page(page) => Ok(page),
            Record::Table(_) => Err(crate::io::error::not_found(RecordKind::Page, &id)),
        }
    }

    /// Load every table a page's boxes are bound to, skipping missing ones
    ///
    /// # Errors
    ///
    /// Returns a backend failure other than `NotFound`
    fn load_page_tables(&self, page: &Page) -> Result<Vec<RollTable>> {
        let mut tables: Vec<RollTable> = Vec::new();
        for table_ref in page.boxes().iter().filter_map(crate::model::PageBox::table_ref) {
            if tables.iter().any(|table| table.id == table_ref) {
                continue;
            }
            match self.load_table(table_ref) {
                Ok(table) => tables.push(table),
                Err(crate::RollpageError::NotFound { .. }) => {}
                Err(error) => return Err(error),
            }
        }
        Ok(tables)
    }
}

/// Reject a page whose slug is already used by a different page
///
/// # Errors
///
/// Returns `InvalidParameter` naming the slug
pub(crate) fn ensure_slug_free<'a>(
    page: &Page,
    mut existing: impl Iterator<Item = &'a Page>,
) -> Result<()> {
    if existing.any(|other| other.slug == page.slug && other.id != page.id) {
        return Err(crate::io::error::invalid_parameter(
            "slug",
            &page.slug,
            &"already used by another page",
        ));
    }
    Ok(())
}
