#![forbid(unsafe_code)]

mod error;
pub mod storage;

use redb::{ReadableDatabase, ReadableTable};
use std::path::Path;
use std::sync::Arc;

pub use error::Error;

use scopeset_types::prelude::*;
use scopeset_types::store_adapter::{RecordFilter, SettingStore};
use scopeset_types::types::SettingRecord;

use error::from_redb_error;
use storage::{TABLE_SETTINGS, owner_from_key, owner_key};

/// redb-based implementation of SettingStore.
///
/// Several stores may share one database through [`RedbSettingStore::handle`];
/// each keeps its own staged records. A failed flush discards the staged batch.
#[derive(Debug)]
pub struct RedbSettingStore {
	db: Arc<redb::Database>,
	staged: Vec<SettingRecord>,
}

impl RedbSettingStore {
	/// Open (or create) the database file at `path`
	pub fn open(path: impl AsRef<Path>) -> ClResult<Self> {
		let path = path.as_ref();
		if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
			std::fs::create_dir_all(parent)?;
		}

		let db = if path.exists() {
			redb::Database::open(path).map_err(from_redb_error)?
		} else {
			redb::Database::create(path).map_err(from_redb_error)?
		};
		info!("Opened settings database {}", path.display());

		Self::from_database(Arc::new(db))
	}

	/// Use an already opened database
	pub fn from_database(db: Arc<redb::Database>) -> ClResult<Self> {
		// Initialize tables
		let tx = db.begin_write().map_err(from_redb_error)?;
		let _ = tx.open_table(TABLE_SETTINGS).map_err(from_redb_error)?;
		tx.commit().map_err(from_redb_error)?;

		Ok(Self { db, staged: Vec::new() })
	}

	/// Another store over the same database, with nothing staged
	pub fn handle(&self) -> Self {
		Self { db: Arc::clone(&self.db), staged: Vec::new() }
	}

	pub fn staged_len(&self) -> usize {
		self.staged.len()
	}
}

impl SettingStore for RedbSettingStore {
	fn find_by(&self, filter: &RecordFilter<'_>) -> ClResult<Vec<SettingRecord>> {
		let tx = self.db.begin_read().map_err(from_redb_error)?;
		let table = tx.open_table(TABLE_SETTINGS).map_err(from_redb_error)?;
		let (kind, owner) = owner_key(filter.owner);

		let mut records = Vec::new();
		if let Some(names) = filter.names {
			for name in names {
				if let Some(value) = table.get((kind, owner, &**name)).map_err(from_redb_error)? {
					records.push(SettingRecord {
						name: name.clone(),
						owner: owner_from_key(kind, owner),
						value: value.value().to_string(),
					});
				}
			}
		} else {
			for entry in table.range((kind, owner, "")..).map_err(from_redb_error)? {
				let (key, value) = entry.map_err(from_redb_error)?;
				let (row_kind, row_owner, name) = key.value();
				if row_kind != kind || row_owner != owner {
					break;
				}
				records.push(SettingRecord {
					name: name.into(),
					owner: owner_from_key(row_kind, row_owner),
					value: value.value().to_string(),
				});
			}
		}

		debug!("Found {} setting records", records.len());
		Ok(records)
	}

	fn persist(&mut self, record: SettingRecord) -> ClResult<()> {
		self.staged.push(record);
		Ok(())
	}

	fn flush(&mut self) -> ClResult<()> {
		let staged = std::mem::take(&mut self.staged);
		if staged.is_empty() {
			return Ok(());
		}

		let tx = self.db.begin_write().map_err(from_redb_error)?;
		{
			let mut table = tx.open_table(TABLE_SETTINGS).map_err(from_redb_error)?;
			for record in &staged {
				let (kind, owner) = owner_key(record.owner.as_deref());
				table
					.insert((kind, owner, &*record.name), record.value.as_str())
					.map_err(from_redb_error)?;
			}
		}
		tx.commit().map_err(from_redb_error)?;

		debug!("Committed {} setting records", staged.len());
		Ok(())
	}
}

// vim: ts=4
