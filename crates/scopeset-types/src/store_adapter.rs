//! Adapter that stores setting records.
//!
//! Writes are two-phase: `persist` stages a record, `flush` commits everything
//! staged so far in one transaction. Reads only see committed records.

use std::fmt::Debug;

use crate::prelude::*;
use crate::types::SettingRecord;

/// Record selection used by `find_by`
#[derive(Debug, Clone, Copy, Default)]
pub struct RecordFilter<'a> {
	/// Equality match on the owner; `None` selects global records
	pub owner: Option<&'a str>,
	/// Restrict to these names when set
	pub names: Option<&'a [Box<str>]>,
}

impl<'a> RecordFilter<'a> {
	pub fn owned_by(owner: Option<&'a str>) -> Self {
		Self { owner, names: None }
	}

	pub fn with_names(mut self, names: &'a [Box<str>]) -> Self {
		self.names = Some(names);
		self
	}

	pub fn matches(&self, record: &SettingRecord) -> bool {
		if record.owner.as_deref() != self.owner {
			return false;
		}
		match self.names {
			Some(names) => names.iter().any(|name| *name == record.name),
			None => true,
		}
	}
}

pub trait SettingStore: Debug {
	/// Committed records matching `filter`
	fn find_by(&self, filter: &RecordFilter<'_>) -> ClResult<Vec<SettingRecord>>;

	/// Stage a record for insert-or-replace on the next `flush`
	fn persist(&mut self, record: SettingRecord) -> ClResult<()>;

	/// Commit all staged records atomically
	fn flush(&mut self) -> ClResult<()>;
}

impl<S: SettingStore + ?Sized> SettingStore for Box<S> {
	fn find_by(&self, filter: &RecordFilter<'_>) -> ClResult<Vec<SettingRecord>> {
		(**self).find_by(filter)
	}

	fn persist(&mut self, record: SettingRecord) -> ClResult<()> {
		(**self).persist(record)
	}

	fn flush(&mut self) -> ClResult<()> {
		(**self).flush()
	}
}

impl<S: SettingStore + ?Sized> SettingStore for &mut S {
	fn find_by(&self, filter: &RecordFilter<'_>) -> ClResult<Vec<SettingRecord>> {
		(**self).find_by(filter)
	}

	fn persist(&mut self, record: SettingRecord) -> ClResult<()> {
		(**self).persist(record)
	}

	fn flush(&mut self) -> ClResult<()> {
		(**self).flush()
	}
}


// vim: ts=4
