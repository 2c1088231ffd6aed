//! Table layout for setting records.
//!
//! Rows are keyed by `(kind, owner, name)`. Global rows use kind
//! [`KIND_GLOBAL`] with an empty owner, so an empty user identifier never
//! collides with a global row.

/// Setting records table
pub const TABLE_SETTINGS: redb::TableDefinition<(u8, &str, &str), &str> =
	redb::TableDefinition::new("settings");

pub const KIND_GLOBAL: u8 = 0;
pub const KIND_USER: u8 = 1;

/// Key prefix for an owner (`None` = global)
pub fn owner_key(owner: Option<&str>) -> (u8, &str) {
	match owner {
		Some(owner) => (KIND_USER, owner),
		None => (KIND_GLOBAL, ""),
	}
}

/// Inverse of [`owner_key`]
pub fn owner_from_key(kind: u8, owner: &str) -> Option<Box<str>> {
	if kind == KIND_GLOBAL { None } else { Some(owner.into()) }
}

// vim: ts=4
