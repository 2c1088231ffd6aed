//! In-process setting store.
//!
//! Clones share the committed rows and the commit counter, but each clone has
//! its own staging area, like separate connections to one database.

use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use scopeset_types::store_adapter::{RecordFilter, SettingStore};
use scopeset_types::types::SettingRecord;

use crate::prelude::*;

type RecordKey = (Option<Box<str>>, Box<str>);

#[derive(Debug, Default)]
pub struct MemorySettingStore {
	committed: Arc<Mutex<HashMap<RecordKey, SettingRecord>>>,
	commits: Arc<AtomicUsize>,
	staged: Vec<SettingRecord>,
}

impl MemorySettingStore {
	pub fn new() -> Self {
		Self::default()
	}

	/// Number of flushes that committed at least one record
	pub fn commit_count(&self) -> usize {
		self.commits.load(Ordering::SeqCst)
	}

	/// Number of committed records
	pub fn len(&self) -> usize {
		self.committed.lock().len()
	}

	pub fn is_empty(&self) -> bool {
		self.committed.lock().is_empty()
	}

	pub fn staged_len(&self) -> usize {
		self.staged.len()
	}
}

impl Clone for MemorySettingStore {
	fn clone(&self) -> Self {
		Self {
			committed: Arc::clone(&self.committed),
			commits: Arc::clone(&self.commits),
			staged: Vec::new(),
		}
	}
}

impl SettingStore for MemorySettingStore {
	fn find_by(&self, filter: &RecordFilter<'_>) -> ClResult<Vec<SettingRecord>> {
		let committed = self.committed.lock();
		Ok(committed.values().filter(|record| filter.matches(record)).cloned().collect())
	}

	fn persist(&mut self, record: SettingRecord) -> ClResult<()> {
		self.staged.push(record);
		Ok(())
	}

	fn flush(&mut self) -> ClResult<()> {
		if self.staged.is_empty() {
			return Ok(());
		}

		let mut committed = self.committed.lock();
		let count = self.staged.len();
		for record in self.staged.drain(..) {
			committed.insert((record.owner.clone(), record.name.clone()), record);
		}
		self.commits.fetch_add(1, Ordering::SeqCst);
		debug!("Memory store committed {} records", count);
		Ok(())
	}
}


// vim: ts=4
