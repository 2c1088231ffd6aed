//! Settings manager tests
//!
//! Scope validation, lazy loading, write-back, and batch flushing against the
//! in-memory store.

mod common;

use common::{init_tracing, sample_config};
use scopeset::{
	CodecFormat, Error, JsonCodec, MemorySettingStore, Principal, RecordFilter, SettingStore,
	SettingValue, SettingsManager, UserId,
};
use serde_json::json;
use std::sync::Arc;

fn manager(format: CodecFormat) -> SettingsManager<MemorySettingStore> {
	init_tracing();
	SettingsManager::new(&sample_config(format), MemorySettingStore::new())
}

#[test]
fn test_unknown_setting() {
	let mut manager = manager(CodecFormat::Native);
	let alice = UserId::from("alice");

	assert!(matches!(manager.get("nope", None), Err(Error::UnknownSetting(_))));
	assert!(matches!(manager.get("nope", Some(&alice)), Err(Error::UnknownSetting(_))));
	assert!(matches!(manager.set("nope", 1, None), Err(Error::UnknownSetting(_))));
	assert!(matches!(manager.clear("nope", Some(&alice)), Err(Error::UnknownSetting(_))));
	assert_eq!(manager.store().commit_count(), 0);
}

#[test]
fn test_scope_rules() {
	let mut manager = manager(CodecFormat::Native);
	let alice = UserId::from("alice");

	// Global-only names reject a user
	assert!(manager.get("motd", None).is_ok());
	assert!(matches!(manager.get("motd", Some(&alice)), Err(Error::WrongScope { .. })));
	assert!(matches!(manager.set("motd", "hi", Some(&alice)), Err(Error::WrongScope { .. })));

	// User-only names require one
	assert!(manager.get("locale", Some(&alice)).is_ok());
	assert!(matches!(manager.get("locale", None), Err(Error::WrongScope { .. })));
	assert!(matches!(manager.set("locale", "en", None), Err(Error::WrongScope { .. })));

	// All-scoped names work in both contexts
	assert!(manager.get("theme", None).is_ok());
	assert!(manager.get("theme", Some(&alice)).is_ok());
}

#[test]
fn test_theme_and_locale_scenario() {
	let mut manager = manager(CodecFormat::Native);
	let alice = UserId::from("alice");
	let bob = UserId::from("bob");

	manager.set("theme", "dark", None).expect("Failed to set theme");
	assert_eq!(manager.get("theme", None).expect("get"), Some(SettingValue::from("dark")));

	assert!(matches!(manager.get("locale", None), Err(Error::WrongScope { .. })));

	manager.set("locale", "en", Some(&alice)).expect("Failed to set locale");
	assert_eq!(manager.get("locale", Some(&alice)).expect("get"), Some(SettingValue::from("en")));
	assert_eq!(manager.get("locale", Some(&bob)).expect("get"), None);

	// The global theme does not leak into a user's cache
	assert_eq!(manager.get("theme", Some(&alice)).expect("get"), None);
}

#[test]
fn test_unset_reads_as_none() {
	let mut manager = manager(CodecFormat::Native);
	assert_eq!(manager.get("theme", None).expect("get"), None);
	assert_eq!(manager.get_string("theme", None).expect("get"), None);
}

#[test]
fn test_round_trip_through_fresh_manager() {
	for format in [CodecFormat::Native, CodecFormat::Json] {
		let config = sample_config(format);
		let store = MemorySettingStore::new();
		let alice = UserId::from("alice");

		let mut first = SettingsManager::new(&config, store.clone());
		first.set("theme", "dark", None).expect("set");
		first.set("volume", 7, Some(&alice)).expect("set");
		first.set("beta", true, Some(&alice)).expect("set");
		first.set("motd", json!({"text": "hello", "lines": [1, 2]}), None).expect("set");

		let mut second = SettingsManager::new(&config, first.into_store());
		assert_eq!(second.get_string("theme", None).expect("get"), Some("dark".into()));
		assert_eq!(second.get_int("volume", Some(&alice)).expect("get"), Some(7));
		assert_eq!(second.get_bool("beta", Some(&alice)).expect("get"), Some(true));
		assert_eq!(
			second.get_json("motd", None).expect("get"),
			Some(json!({"text": "hello", "lines": [1, 2]}))
		);
		assert_eq!(second.get("volume", None).expect("get"), None);

		// The original handle sees the same committed rows
		assert_eq!(store.len(), 4);
	}
}

#[test]
fn test_clear() {
	let config = sample_config(CodecFormat::Native);
	let alice = UserId::from("alice");
	let mut manager = SettingsManager::new(&config, MemorySettingStore::new());

	manager.set("locale", "fr", Some(&alice)).expect("set");
	manager.clear("locale", Some(&alice)).expect("clear");
	assert_eq!(manager.get("locale", Some(&alice)).expect("get"), None);

	// Clearing persists an unset value instead of removing the row
	let mut fresh = SettingsManager::new(&config, manager.into_store());
	assert_eq!(fresh.get("locale", Some(&alice)).expect("get"), None);
	assert_eq!(fresh.store().len(), 1);
}

#[test]
fn test_set_many_commits_once() {
	let mut manager = manager(CodecFormat::Native);

	manager.set_many([("theme", 1), ("volume", 2)], None).expect("set_many");
	assert_eq!(manager.store().commit_count(), 1);

	let all = manager.all(None).expect("all");
	assert_eq!(all.get("theme"), Some(&Some(SettingValue::Int(1))));
	assert_eq!(all.get("volume"), Some(&Some(SettingValue::Int(2))));
	assert_eq!(all.get("motd"), Some(&None));
	assert!(!all.contains_key("locale"));
}

#[test]
fn test_set_many_validates_before_caching() {
	let mut manager = manager(CodecFormat::Native);

	let res = manager.set_many([("theme", "dark"), ("locale", "en")], None);
	assert!(matches!(res, Err(Error::WrongScope { .. })));
	assert_eq!(manager.get("theme", None).expect("get"), None);
	assert_eq!(manager.store().commit_count(), 0);
}

#[test]
fn test_set_many_for_user() {
	let mut manager = manager(CodecFormat::Json);
	let alice = UserId::from("alice");

	manager
		.set_many(vec![("locale".to_string(), "de"), ("theme".to_string(), "light")], Some(&alice))
		.expect("set_many");

	let records = manager
		.store()
		.find_by(&RecordFilter::owned_by(Some("alice")))
		.expect("find");
	assert_eq!(records.len(), 2);
	assert!(records.iter().all(|r| r.owner.as_deref() == Some("alice")));
	assert!(manager.store().find_by(&RecordFilter::owned_by(None)).expect("find").is_empty());
}

#[test]
fn test_flush_skips_wrong_scope_names() {
	let mut manager = manager(CodecFormat::Native);
	let alice = UserId::from("alice");

	manager.set("locale", "en", Some(&alice)).expect("set");
	manager.set("theme", "dark", Some(&alice)).expect("set");
	let commits = manager.store().commit_count();

	// "motd" is global-only and gets skipped for a user context
	manager.flush(&["locale", "motd", "theme"], Some(&alice)).expect("flush");
	assert_eq!(manager.store().commit_count(), commits + 1);

	let records = manager.store().find_by(&RecordFilter::owned_by(Some("alice"))).expect("find");
	let mut names: Vec<&str> = records.iter().map(|r| &*r.name).collect();
	names.sort_unstable();
	assert_eq!(names, vec!["locale", "theme"]);
}

#[test]
fn test_flush_all_mixed_scopes() {
	let mut manager = manager(CodecFormat::Native);

	manager.flush_all(None).expect("global flush");
	let global = manager.store().find_by(&RecordFilter::owned_by(None)).expect("find");
	let mut names: Vec<&str> = global.iter().map(|r| &*r.name).collect();
	names.sort_unstable();
	assert_eq!(names, vec!["motd", "theme", "volume"]);

	let bob = UserId::from("bob");
	manager.flush_all(Some(&bob)).expect("user flush");
	let user = manager.store().find_by(&RecordFilter::owned_by(Some("bob"))).expect("find");
	let mut names: Vec<&str> = user.iter().map(|r| &*r.name).collect();
	names.sort_unstable();
	assert_eq!(names, vec!["beta", "locale", "theme", "volume"]);
}

#[test]
fn test_flush_rejects_unknown_names() {
	let mut manager = manager(CodecFormat::Native);
	assert!(matches!(manager.flush(&["theme", "nope"], None), Err(Error::UnknownSetting(_))));
	assert_eq!(manager.store().staged_len(), 0);
	assert_eq!(manager.store().commit_count(), 0);
}

#[test]
fn test_failed_flush_leaves_nothing_for_later_commits() {
	let config = sample_config(CodecFormat::Native);
	let store = MemorySettingStore::new();

	let mut reader = SettingsManager::new(&config, store.clone());
	assert_eq!(reader.get("theme", None).expect("get"), None);

	let mut writer = SettingsManager::new(&config, store.clone());
	writer.set("theme", "dark", None).expect("set");

	// The reader's stale "theme" must not be staged by the failing flush
	assert!(matches!(reader.flush(&["theme", "nope"], None), Err(Error::UnknownSetting(_))));
	assert_eq!(reader.store().staged_len(), 0);

	reader.set("volume", 1, None).expect("set");

	let mut fresh = SettingsManager::new(&config, store);
	assert_eq!(fresh.get_string("theme", None).expect("get"), Some("dark".into()));
	assert_eq!(fresh.get_int("volume", None).expect("get"), Some(1));
}

#[test]
fn test_flush_of_only_skipped_names_commits_nothing() {
	let mut manager = manager(CodecFormat::Native);
	let alice = UserId::from("alice");

	manager.flush(&["motd"], Some(&alice)).expect("flush");
	manager.flush(&["locale", "beta"], None).expect("flush");
	assert_eq!(manager.store().staged_len(), 0);
	assert_eq!(manager.store().commit_count(), 0);
	assert!(manager.store().is_empty());
}

#[test]
fn test_updates_existing_record() {
	let mut manager = manager(CodecFormat::Json);

	manager.set("theme", "dark", None).expect("set");
	manager.set("theme", "light", None).expect("set");

	let records = manager.store().find_by(&RecordFilter::owned_by(None)).expect("find");
	assert_eq!(records.len(), 1);
	assert_eq!(records[0].value, r#""light""#);
}

#[test]
fn test_fluent_set() {
	let mut manager = manager(CodecFormat::Native);
	let alice = UserId::from("alice");

	manager
		.set("theme", "dark", None)
		.and_then(|m| m.set("locale", "en", Some(&alice)))
		.and_then(|m| m.clear("theme", None))
		.expect("chain");

	assert_eq!(manager.get("theme", None).expect("get"), None);
	assert_eq!(manager.get_string("locale", Some(&alice)).expect("get"), Some("en".into()));
}

#[test]
fn test_typed_getter_mismatch() {
	let mut manager = manager(CodecFormat::Native);
	manager.set("volume", 3, None).expect("set");

	assert!(matches!(manager.get_string("volume", None), Err(Error::ValidationError(_))));
	assert!(matches!(manager.get_bool("volume", None), Err(Error::ValidationError(_))));
	assert_eq!(manager.get_int("volume", None).expect("get"), Some(3));
}

#[test]
fn test_cache_is_not_reloaded() {
	let config = sample_config(CodecFormat::Native);
	let store = MemorySettingStore::new();
	let mut reader = SettingsManager::new(&config, store.clone());
	assert_eq!(reader.get("theme", None).expect("get"), None);

	// Another manager writes after the reader loaded its cache
	let mut writer = SettingsManager::new(&config, store);
	writer.set("theme", "dark", None).expect("set");

	assert_eq!(reader.get("theme", None).expect("get"), None);
}

#[test]
fn test_last_writer_wins() {
	let config = sample_config(CodecFormat::Native);
	let store = MemorySettingStore::new();
	let mut first = SettingsManager::new(&config, store.clone());
	let mut second = SettingsManager::new(&config, store.clone());

	first.set("theme", "dark", None).expect("set");
	second.set("theme", "light", None).expect("set");

	let mut fresh = SettingsManager::new(&config, store);
	assert_eq!(fresh.get_string("theme", None).expect("get"), Some("light".into()));
}

#[test]
fn test_custom_codec() {
	let config = sample_config(CodecFormat::Native);
	let mut manager = SettingsManager::with_codec(
		Arc::clone(config.registry()),
		Box::new(JsonCodec),
		MemorySettingStore::new(),
	);
	assert_eq!(manager.codec().name(), "json");

	manager.set("volume", 11, None).expect("set");
	let records = manager.store().find_by(&RecordFilter::owned_by(None)).expect("find");
	assert_eq!(records[0].value, "11");
}

#[test]
fn test_string_principal() {
	let mut manager = manager(CodecFormat::Native);
	let alice = String::from("alice");
	let same = UserId::from("alice");

	manager.set("locale", "sv", Some(&alice)).expect("set");
	assert_eq!(alice.identifier(), same.identifier());
	assert_eq!(manager.get_string("locale", Some(&same)).expect("get"), Some("sv".into()));
}

// vim: ts=4
