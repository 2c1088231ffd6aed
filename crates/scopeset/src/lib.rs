//! Scoped settings accessor.
//!
//! Named settings are either global, per-user, or valid in both contexts. A
//! [`SettingsManager`] loads values lazily from a [`SettingStore`], keeps them
//! in per-scope caches, and writes changes back in batched flushes.

#![deny(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![forbid(unsafe_code)]

pub mod prelude;
pub mod settings;

pub use scopeset_types::codec::{Codec, CodecFormat, JsonCodec, NativeCodec};
pub use scopeset_types::error::{ClResult, Error};
pub use scopeset_types::store_adapter::{RecordFilter, SettingStore};
pub use scopeset_types::types::{Principal, SettingRecord, SettingScope, SettingValue, UserId};

pub use settings::{
	FrozenSettingsRegistry, MemorySettingStore, SettingDefinition, SettingDefinitionBuilder,
	SettingsConfig, SettingsManager, SettingsRegistry,
};

// vim: ts=4
