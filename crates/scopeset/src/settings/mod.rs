//! Settings subsystem: definitions, static configuration, and the scoped manager
//!
//! # Architecture
//!
//! - **Types** (`types.rs`): setting definitions and the registry
//! - **Config** (`config.rs`): registry + codec format, loadable from YAML/JSON
//! - **Manager** (`manager.rs`): lazy per-scope caches and flushing
//! - **Memory** (`memory.rs`): in-process store
//!
//! # Scopes
//!
//! - **Global**: one value shared by everyone
//! - **User**: one value per principal
//! - **All**: either of the above, chosen by whether a user is given

pub mod config;
pub mod manager;
pub mod memory;
pub mod types;

pub use config::SettingsConfig;
pub use manager::SettingsManager;
pub use memory::MemorySettingStore;
pub use types::{
	FrozenSettingsRegistry, SettingDefinition, SettingDefinitionBuilder, SettingsRegistry,
};

// vim: ts=4
