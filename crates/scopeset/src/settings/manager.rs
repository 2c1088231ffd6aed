//! Scoped settings manager with lazy per-scope caches and batched write-back.
//!
//! One manager serves one request or session. Values are cached per scope:
//! the global cache is loaded on first global access, each user's cache on the
//! first access for that user. Caches are never evicted.

use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::sync::Arc;

use scopeset_types::codec::Codec;
use scopeset_types::store_adapter::{RecordFilter, SettingStore};
use scopeset_types::types::SettingRecord;

use super::config::SettingsConfig;
use super::types::FrozenSettingsRegistry;
use crate::prelude::*;

/// Cached values by name; `None` means unset
pub type ValueMap = HashMap<Box<str>, Option<SettingValue>>;

#[derive(Debug)]
pub struct SettingsManager<S: SettingStore> {
	registry: Arc<FrozenSettingsRegistry>,
	codec: Box<dyn Codec>,
	store: S,
	/// `None` until the global cache is loaded
	global: Option<ValueMap>,
	/// Present once loaded for that user
	users: HashMap<Box<str>, ValueMap>,
}

impl<S: SettingStore> SettingsManager<S> {
	/// Create a manager using the codec selected by `config`
	pub fn new(config: &SettingsConfig, store: S) -> Self {
		Self::with_codec(Arc::clone(config.registry()), config.format().codec(), store)
	}

	pub fn with_codec(registry: Arc<FrozenSettingsRegistry>, codec: Box<dyn Codec>, store: S) -> Self {
		debug!("Settings manager created with {} codec", codec.name());
		Self { registry, codec, store, global: None, users: HashMap::new() }
	}

	/// Current value of `name` for `user` (global context when `None`)
	pub fn get(&mut self, name: &str, user: Option<&dyn Principal>) -> ClResult<Option<SettingValue>> {
		self.get_for(name, user.map(|u| u.identifier()))
	}

	/// All cached values for the context, loading them first if needed
	pub fn all(&mut self, user: Option<&dyn Principal>) -> ClResult<&ValueMap> {
		let values = self.load(user.map(|u| u.identifier()))?;
		Ok(&*values)
	}

	/// Set a value and write it to the store
	pub fn set(
		&mut self,
		name: &str,
		value: impl Into<SettingValue>,
		user: Option<&dyn Principal>,
	) -> ClResult<&mut Self> {
		let user = user.map(|u| u.identifier());
		self.put(name, Some(value.into()), user)?;
		self.flush_names(&[name.into()], user)?;
		Ok(self)
	}

	/// Set several values and write them to the store in one commit.
	///
	/// Every name is validated before any value is cached.
	pub fn set_many<I, K, V>(&mut self, values: I, user: Option<&dyn Principal>) -> ClResult<&mut Self>
	where
		I: IntoIterator<Item = (K, V)>,
		K: AsRef<str>,
		V: Into<SettingValue>,
	{
		let user = user.map(|u| u.identifier());
		let entries: Vec<(Box<str>, SettingValue)> =
			values.into_iter().map(|(name, value)| (name.as_ref().into(), value.into())).collect();

		for (name, _) in &entries {
			self.registry.validate(name, user)?;
		}

		let mut names: Vec<Box<str>> = entries.iter().map(|(name, _)| name.clone()).collect();
		names.sort_unstable();
		names.dedup();

		for (name, value) in entries {
			self.put(&name, Some(value), user)?;
		}
		self.flush_names(&names, user)?;
		Ok(self)
	}

	/// Unset a value and write the change to the store
	pub fn clear(&mut self, name: &str, user: Option<&dyn Principal>) -> ClResult<&mut Self> {
		let user = user.map(|u| u.identifier());
		self.put(name, None, user)?;
		self.flush_names(&[name.into()], user)?;
		Ok(self)
	}

	/// Write the cached values of `names` to the store.
	///
	/// Names whose scope does not allow the context are skipped.
	pub fn flush(&mut self, names: &[&str], user: Option<&dyn Principal>) -> ClResult<()> {
		let names: Vec<Box<str>> = names.iter().map(|&name| name.into()).collect();
		self.flush_names(&names, user.map(|u| u.identifier()))
	}

	/// Write every configured name valid for the context to the store
	pub fn flush_all(&mut self, user: Option<&dyn Principal>) -> ClResult<()> {
		let mut names: Vec<Box<str>> = self.registry.list().map(|def| def.key.clone()).collect();
		names.sort_unstable();
		self.flush_names(&names, user.map(|u| u.identifier()))
	}

	// Typed getters
	//***************

	pub fn get_string(&mut self, name: &str, user: Option<&dyn Principal>) -> ClResult<Option<String>> {
		match self.get(name, user)? {
			None => Ok(None),
			Some(SettingValue::String(s)) => Ok(Some(s)),
			Some(v) => Err(Error::ValidationError(format!(
				"Setting '{}' is not a string, got {}",
				name,
				v.type_name()
			))),
		}
	}

	pub fn get_int(&mut self, name: &str, user: Option<&dyn Principal>) -> ClResult<Option<i64>> {
		match self.get(name, user)? {
			None => Ok(None),
			Some(SettingValue::Int(i)) => Ok(Some(i)),
			Some(v) => Err(Error::ValidationError(format!(
				"Setting '{}' is not an integer, got {}",
				name,
				v.type_name()
			))),
		}
	}

	pub fn get_bool(&mut self, name: &str, user: Option<&dyn Principal>) -> ClResult<Option<bool>> {
		match self.get(name, user)? {
			None => Ok(None),
			Some(SettingValue::Bool(b)) => Ok(Some(b)),
			Some(v) => Err(Error::ValidationError(format!(
				"Setting '{}' is not a boolean, got {}",
				name,
				v.type_name()
			))),
		}
	}

	pub fn get_json(
		&mut self,
		name: &str,
		user: Option<&dyn Principal>,
	) -> ClResult<Option<serde_json::Value>> {
		match self.get(name, user)? {
			None => Ok(None),
			Some(SettingValue::Json(j)) => Ok(Some(j)),
			Some(v) => Err(Error::ValidationError(format!(
				"Setting '{}' is not JSON, got {}",
				name,
				v.type_name()
			))),
		}
	}

	// Accessors
	//***********

	pub fn registry(&self) -> &Arc<FrozenSettingsRegistry> {
		&self.registry
	}

	pub fn codec(&self) -> &dyn Codec {
		&*self.codec
	}

	pub fn store(&self) -> &S {
		&self.store
	}

	/// Give the store back, dropping the caches
	pub fn into_store(self) -> S {
		self.store
	}

	/// Whether the cache for the context has been loaded
	pub fn is_loaded(&self, user: Option<&dyn Principal>) -> bool {
		match user {
			Some(user) => self.users.contains_key(user.identifier()),
			None => self.global.is_some(),
		}
	}

	// Internals
	//***********

	fn get_for(&mut self, name: &str, user: Option<&str>) -> ClResult<Option<SettingValue>> {
		self.registry.validate(name, user)?;
		let values = self.load(user)?;
		Ok(values.get(name).cloned().flatten())
	}

	/// Validate and write into the cache without touching the store
	fn put(&mut self, name: &str, value: Option<SettingValue>, user: Option<&str>) -> ClResult<()> {
		self.registry.validate(name, user)?;
		let values = self.load(user)?;
		values.insert(name.into(), value);
		Ok(())
	}

	/// Cache for the context, loading it on first use
	fn load(&mut self, user: Option<&str>) -> ClResult<&mut ValueMap> {
		let Self { registry, codec, store, global, users } = self;

		match user {
			None => {
				let values = match global.take() {
					Some(values) => values,
					None => load_values(&**registry, &**codec, &*store, None)?,
				};
				Ok(global.insert(values))
			}
			Some(user) => match users.entry(user.into()) {
				Entry::Occupied(entry) => Ok(entry.into_mut()),
				Entry::Vacant(entry) => {
					let values = load_values(&**registry, &**codec, &*store, Some(user))?;
					Ok(entry.insert(values))
				}
			},
		}
	}

	fn flush_names(&mut self, names: &[Box<str>], user: Option<&str>) -> ClResult<()> {
		let filter = RecordFilter::owned_by(user).with_names(names);
		let mut existing: HashMap<Box<str>, SettingRecord> = self
			.store
			.find_by(&filter)?
			.into_iter()
			.map(|record| (record.name.clone(), record))
			.collect();

		// Build the whole batch before staging anything, so a failure leaves
		// nothing behind for a later flush to commit
		let mut batch = Vec::with_capacity(names.len());
		for name in names {
			let value = match self.get_for(name, user) {
				Ok(value) => value,
				Err(err) if err.is_wrong_scope() => {
					debug!("Skipping setting in flush: {}", err);
					continue;
				}
				Err(err) => return Err(err),
			};

			let mut record =
				existing.remove(name).unwrap_or_else(|| SettingRecord::new(name, user));
			record.value = self.codec.encode(value.as_ref())?;
			batch.push(record);
		}

		let staged = batch.len();
		for record in batch {
			self.store.persist(record)?;
		}
		self.store.flush()?;

		if staged > 0 {
			info!("Flushed {} settings for {}", staged, user.unwrap_or("<global>"));
		} else {
			debug!("Nothing to flush for {}", user.unwrap_or("<global>"));
		}
		Ok(())
	}
}

/// Seed every name the context allows with `None`, then overlay stored values
fn load_values<S: SettingStore>(
	registry: &FrozenSettingsRegistry,
	codec: &dyn Codec,
	store: &S,
	user: Option<&str>,
) -> ClResult<ValueMap> {
	let records = store.find_by(&RecordFilter::owned_by(user))?;
	let mut values: ValueMap = registry.list_for(user).map(|def| (def.key.clone(), None)).collect();

	for record in records {
		let Some(slot) = values.get_mut(&*record.name) else {
			debug!("Ignoring stored setting '{}' outside the configured scope", record.name);
			continue;
		};
		match codec.decode(&record.value) {
			Ok(value) => *slot = value,
			Err(err) => warn!("Stored value for setting '{}' is unreadable: {}", record.name, err),
		}
	}

	debug!("Loaded {} settings for {}", values.len(), user.unwrap_or("<global>"));
	Ok(values)
}


// vim: ts=4
