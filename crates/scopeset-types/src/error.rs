//! Error type shared by the manager and every store adapter.

use std::fmt;

use crate::types::SettingScope;

pub type ClResult<T> = std::result::Result<T, Error>;

#[derive(Debug)]
pub enum Error {
	/// The name is not present in the static configuration
	UnknownSetting(Box<str>),
	/// The name was accessed from a context its scope does not allow
	WrongScope { name: Box<str>, scope: SettingScope, user: Option<Box<str>> },
	ValidationError(String),
	CodecError(String),
	ConfigError(String),
	DbError,

	// externals
	Io(std::io::Error),
}

impl Error {
	pub fn is_wrong_scope(&self) -> bool {
		matches!(self, Error::WrongScope { .. })
	}
}

impl fmt::Display for Error {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		match self {
			Error::UnknownSetting(name) => write!(f, "unknown setting: {}", name),
			Error::WrongScope { name, scope, user: Some(user) } => write!(
				f,
				"setting '{}' has {} scope and cannot be accessed for user '{}'",
				name, scope, user
			),
			Error::WrongScope { name, scope, user: None } => {
				write!(f, "setting '{}' has {} scope and requires a user", name, scope)
			}
			Error::ValidationError(msg) => write!(f, "validation error: {}", msg),
			Error::CodecError(msg) => write!(f, "codec error: {}", msg),
			Error::ConfigError(msg) => write!(f, "config error: {}", msg),
			Error::DbError => write!(f, "database error"),
			Error::Io(err) => write!(f, "io error: {}", err),
		}
	}
}

impl std::error::Error for Error {
	fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
		match self {
			Error::Io(err) => Some(err),
			_ => None,
		}
	}
}

impl From<std::io::Error> for Error {
	fn from(err: std::io::Error) -> Self {
		Self::Io(err)
	}
}


// vim: ts=4
