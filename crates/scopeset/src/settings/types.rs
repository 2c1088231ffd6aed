//! Setting definitions and the registry that holds them.

use std::collections::HashMap;

use crate::prelude::*;

/// Setting definition - metadata for one configured name
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SettingDefinition {
	/// Unique setting name (e.g., "ui.theme")
	pub key: Box<str>,

	/// Human-readable description
	pub description: Option<String>,

	/// Which caches the setting may occupy
	pub scope: SettingScope,
}

impl SettingDefinition {
	/// Create a builder for constructing a SettingDefinition
	pub fn builder(key: impl Into<Box<str>>) -> SettingDefinitionBuilder {
		SettingDefinitionBuilder::new(key)
	}
}

/// Builder for SettingDefinition with fluent API
pub struct SettingDefinitionBuilder {
	key: Box<str>,
	description: Option<String>,
	scope: SettingScope,
}

impl SettingDefinitionBuilder {
	pub fn new(key: impl Into<Box<str>>) -> Self {
		Self {
			key: key.into(),
			description: None,
			scope: SettingScope::All, // Most permissive
		}
	}

	pub fn description(mut self, description: impl Into<String>) -> Self {
		self.description = Some(description.into());
		self
	}

	/// Set the setting scope (defaults to All)
	pub fn scope(mut self, scope: SettingScope) -> Self {
		self.scope = scope;
		self
	}

	pub fn build(self) -> ClResult<SettingDefinition> {
		if self.key.trim().is_empty() {
			return Err(Error::ConfigError("Setting name must not be empty".into()));
		}

		Ok(SettingDefinition { key: self.key, description: self.description, scope: self.scope })
	}
}

/// Mutable registry used while building the configuration
#[derive(Debug, Default)]
pub struct SettingsRegistry {
	definitions: HashMap<Box<str>, SettingDefinition>,
}

impl SettingsRegistry {
	pub fn new() -> Self {
		Self::default()
	}

	/// Register a new setting definition
	pub fn register(&mut self, def: SettingDefinition) -> ClResult<()> {
		if self.definitions.contains_key(&def.key) {
			return Err(Error::ConfigError(format!("Setting '{}' is already registered", def.key)));
		}

		debug!("Registering setting: {} ({})", def.key, def.scope);
		self.definitions.insert(def.key.clone(), def);
		Ok(())
	}

	/// Freeze the registry (make it immutable)
	pub fn freeze(self) -> FrozenSettingsRegistry {
		info!("Freezing settings registry with {} definitions", self.definitions.len());
		FrozenSettingsRegistry { definitions: self.definitions }
	}

	pub fn len(&self) -> usize {
		self.definitions.len()
	}

	pub fn is_empty(&self) -> bool {
		self.definitions.is_empty()
	}
}

/// Immutable registry shared by managers
#[derive(Debug, Default)]
pub struct FrozenSettingsRegistry {
	definitions: HashMap<Box<str>, SettingDefinition>,
}

impl FrozenSettingsRegistry {
	pub fn get(&self, key: &str) -> Option<&SettingDefinition> {
		self.definitions.get(key)
	}

	/// Look up a definition and check it may be accessed for `user`
	pub fn validate(&self, key: &str, user: Option<&str>) -> ClResult<&SettingDefinition> {
		let def = self.get(key).ok_or_else(|| Error::UnknownSetting(key.into()))?;
		def.scope.check(key, user)?;
		Ok(def)
	}

	/// List all registered settings
	pub fn list(&self) -> impl Iterator<Item = &SettingDefinition> {
		self.definitions.values()
	}

	/// Settings that may be cached for the given context
	pub fn list_for<'a>(
		&'a self,
		user: Option<&str>,
	) -> impl Iterator<Item = &'a SettingDefinition> + use<'a> {
		let is_user = user.is_some();
		self.definitions.values().filter(move |def| {
			if is_user { def.scope.allows_user() } else { def.scope.allows_global() }
		})
	}

	pub fn len(&self) -> usize {
		self.definitions.len()
	}

	pub fn is_empty(&self) -> bool {
		self.definitions.is_empty()
	}
}


// vim: ts=4
