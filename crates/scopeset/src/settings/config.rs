//! Static configuration: the frozen definition registry plus the codec format.
//!
//! Loadable from a YAML or JSON document:
//!
//! ```yaml
//! format: json
//! settings:
//!   theme: { scope: all, description: "Colour theme" }
//!   locale: { scope: user }
//! ```

use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::Path;
use std::sync::Arc;

use scopeset_types::codec::CodecFormat;

use super::types::{FrozenSettingsRegistry, SettingDefinition, SettingsRegistry};
use crate::prelude::*;

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct ConfigFile {
	#[serde(default)]
	format: CodecFormat,
	#[serde(default)]
	settings: BTreeMap<String, DefinitionEntry>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct DefinitionEntry {
	#[serde(default)]
	scope: SettingScope,
	description: Option<String>,
}

#[derive(Debug, Clone)]
pub struct SettingsConfig {
	registry: Arc<FrozenSettingsRegistry>,
	format: CodecFormat,
}

impl SettingsConfig {
	pub fn new(registry: FrozenSettingsRegistry, format: CodecFormat) -> Self {
		Self { registry: Arc::new(registry), format }
	}

	pub fn from_yaml(src: &str) -> ClResult<Self> {
		let file: ConfigFile = serde_yaml::from_str(src)
			.map_err(|e| Error::ConfigError(format!("Invalid settings YAML: {}", e)))?;
		Self::from_file(file)
	}

	pub fn from_json(src: &str) -> ClResult<Self> {
		let file: ConfigFile = serde_json::from_str(src)
			.map_err(|e| Error::ConfigError(format!("Invalid settings JSON: {}", e)))?;
		Self::from_file(file)
	}

	/// Load from disk; `.json` files are parsed as JSON, anything else as YAML
	pub fn load(path: impl AsRef<Path>) -> ClResult<Self> {
		let path = path.as_ref();
		let src = std::fs::read_to_string(path)?;
		debug!("Loading settings configuration from {}", path.display());

		match path.extension().and_then(|ext| ext.to_str()) {
			Some(ext) if ext.eq_ignore_ascii_case("json") => Self::from_json(&src),
			_ => Self::from_yaml(&src),
		}
	}

	fn from_file(file: ConfigFile) -> ClResult<Self> {
		let mut registry = SettingsRegistry::new();
		for (key, entry) in file.settings {
			let mut builder = SettingDefinition::builder(key).scope(entry.scope);
			if let Some(description) = entry.description {
				builder = builder.description(description);
			}
			registry.register(builder.build()?)?;
		}
		Ok(Self::new(registry.freeze(), file.format))
	}

	pub fn registry(&self) -> &Arc<FrozenSettingsRegistry> {
		&self.registry
	}

	pub fn format(&self) -> CodecFormat {
		self.format
	}
}

// vim: ts=4
