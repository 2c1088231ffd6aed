use scopeset_types::error::Error as SettingsError;
use std::fmt;
use tracing::warn;

/// Internal error type for the redb store
#[derive(Debug)]
pub enum Error {
	RedbError(String),
	IoError(std::io::Error),
}

impl fmt::Display for Error {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		match self {
			Error::RedbError(msg) => write!(f, "redb error: {}", msg),
			Error::IoError(e) => write!(f, "io error: {}", e),
		}
	}
}

impl std::error::Error for Error {}

impl From<std::io::Error> for Error {
	fn from(e: std::io::Error) -> Self {
		Error::IoError(e)
	}
}

impl From<Error> for SettingsError {
	fn from(e: Error) -> Self {
		match e {
			Error::IoError(io_err) => SettingsError::Io(io_err),
			Error::RedbError(msg) => {
				warn!("DB: {}", msg);
				SettingsError::DbError
			}
		}
	}
}

/// Helper to convert redb errors
pub fn from_redb_error<E: fmt::Display>(err: E) -> Error {
	Error::RedbError(err.to_string())
}

// vim: ts=4
