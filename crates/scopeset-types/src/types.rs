//! Core value types: scopes, setting values, persisted records, and principals.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{ClResult, Error};

/// Setting scope defines which cache a setting may occupy
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SettingScope {
	/// Global: shared by all users, never stored under a user
	#[serde(rename = "global", alias = "GLOBAL")]
	Global,
	/// User: per-principal values only
	#[serde(rename = "user", alias = "USER")]
	User,
	/// All: valid both globally and per user
	#[default]
	#[serde(rename = "all", alias = "ALL")]
	All,
}

impl SettingScope {
	pub fn allows_global(self) -> bool {
		matches!(self, SettingScope::Global | SettingScope::All)
	}

	pub fn allows_user(self) -> bool {
		matches!(self, SettingScope::User | SettingScope::All)
	}

	/// Check that `name` with this scope may be accessed for `user`
	/// (`None` is the global context).
	pub fn check(self, name: &str, user: Option<&str>) -> ClResult<()> {
		let allowed = match user {
			Some(_) => self.allows_user(),
			None => self.allows_global(),
		};
		if allowed {
			Ok(())
		} else {
			Err(Error::WrongScope { name: name.into(), scope: self, user: user.map(Into::into) })
		}
	}
}

impl fmt::Display for SettingScope {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		f.write_str(match self {
			SettingScope::Global => "global",
			SettingScope::User => "user",
			SettingScope::All => "all",
		})
	}
}

/// Setting value types
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SettingValue {
	Bool(bool), // Must be before Int to avoid bool -> int coercion
	Int(i64),
	String(String),
	Json(serde_json::Value),
}

impl SettingValue {
	/// Get the type name for error messages
	pub fn type_name(&self) -> &'static str {
		match self {
			SettingValue::String(_) => "string",
			SettingValue::Int(_) => "int",
			SettingValue::Bool(_) => "bool",
			SettingValue::Json(_) => "json",
		}
	}
}

impl From<bool> for SettingValue {
	fn from(value: bool) -> Self {
		SettingValue::Bool(value)
	}
}

impl From<i64> for SettingValue {
	fn from(value: i64) -> Self {
		SettingValue::Int(value)
	}
}

impl From<i32> for SettingValue {
	fn from(value: i32) -> Self {
		SettingValue::Int(i64::from(value))
	}
}

impl From<&str> for SettingValue {
	fn from(value: &str) -> Self {
		SettingValue::String(value.to_string())
	}
}

impl From<String> for SettingValue {
	fn from(value: String) -> Self {
		SettingValue::String(value)
	}
}

impl From<serde_json::Value> for SettingValue {
	fn from(value: serde_json::Value) -> Self {
		SettingValue::Json(value)
	}
}

/// Persisted setting row, unique by (name, owner)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SettingRecord {
	pub name: Box<str>,
	/// `None` for global records, the principal identifier otherwise
	pub owner: Option<Box<str>>,
	/// Codec-encoded value
	pub value: String,
}

impl SettingRecord {
	/// New record with an empty value
	pub fn new(name: &str, owner: Option<&str>) -> Self {
		Self { name: name.into(), owner: owner.map(Into::into), value: String::new() }
	}
}

/// Anything that can name a user with a stable identifier.
///
/// The identifier keys the per-user cache and becomes the record owner.
pub trait Principal {
	fn identifier(&self) -> &str;
}

impl Principal for String {
	fn identifier(&self) -> &str {
		self
	}
}

impl Principal for &str {
	fn identifier(&self) -> &str {
		self
	}
}

impl Principal for Box<str> {
	fn identifier(&self) -> &str {
		self
	}
}

/// Plain username principal
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(pub Box<str>);

impl From<&str> for UserId {
	fn from(id: &str) -> Self {
		Self(id.into())
	}
}

impl Principal for UserId {
	fn identifier(&self) -> &str {
		&self.0
	}
}

impl fmt::Display for UserId {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		f.write_str(&self.0)
	}
}


// vim: ts=4
