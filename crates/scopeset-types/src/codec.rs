//! Value codecs: turn a cached value into the string stored in a record and back.

use serde::{Deserialize, Serialize};
use std::fmt::Debug;

use crate::error::{ClResult, Error};
use crate::types::SettingValue;

/// Encode/decode strategy for persisted values. `None` is an unset value.
pub trait Codec: Debug + Send + Sync {
	fn name(&self) -> &'static str;
	fn encode(&self, value: Option<&SettingValue>) -> ClResult<String>;
	fn decode(&self, raw: &str) -> ClResult<Option<SettingValue>>;
}

/// Codec selector used by static configuration
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum CodecFormat {
	#[default]
	#[serde(rename = "native", alias = "NATIVE")]
	Native,
	#[serde(rename = "json", alias = "JSON")]
	Json,
}

impl CodecFormat {
	pub fn codec(self) -> Box<dyn Codec> {
		match self {
			CodecFormat::Native => Box::new(NativeCodec),
			CodecFormat::Json => Box::new(JsonCodec),
		}
	}
}

// Native codec
//**************

/// Type-tagged form, keeps the exact variant across a round trip
#[derive(Serialize, Deserialize)]
#[serde(tag = "t", content = "v", rename_all = "lowercase")]
enum Tagged {
	Null,
	Bool(bool),
	Int(i64),
	String(String),
	Json(serde_json::Value),
}

/// Default codec: `{"t":"int","v":3}`, `{"t":"null"}`
#[derive(Debug, Clone, Copy, Default)]
pub struct NativeCodec;

impl Codec for NativeCodec {
	fn name(&self) -> &'static str {
		"native"
	}

	fn encode(&self, value: Option<&SettingValue>) -> ClResult<String> {
		let tagged = match value.cloned() {
			None => Tagged::Null,
			Some(SettingValue::Bool(b)) => Tagged::Bool(b),
			Some(SettingValue::Int(i)) => Tagged::Int(i),
			Some(SettingValue::String(s)) => Tagged::String(s),
			Some(SettingValue::Json(j)) => Tagged::Json(j),
		};
		serde_json::to_string(&tagged).map_err(|e| Error::CodecError(e.to_string()))
	}

	fn decode(&self, raw: &str) -> ClResult<Option<SettingValue>> {
		let tagged: Tagged = serde_json::from_str(raw)
			.map_err(|e| Error::CodecError(format!("invalid native value: {}", e)))?;
		Ok(match tagged {
			Tagged::Null => None,
			Tagged::Bool(b) => Some(SettingValue::Bool(b)),
			Tagged::Int(i) => Some(SettingValue::Int(i)),
			Tagged::String(s) => Some(SettingValue::String(s)),
			Tagged::Json(j) => Some(SettingValue::Json(j)),
		})
	}
}

// JSON codec
//************

/// Plain JSON. The variant is recovered from the shape of the document, so a
/// `Json` value holding a scalar comes back as the matching scalar variant.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonCodec;

impl Codec for JsonCodec {
	fn name(&self) -> &'static str {
		"json"
	}

	fn encode(&self, value: Option<&SettingValue>) -> ClResult<String> {
		serde_json::to_string(&value).map_err(|e| Error::CodecError(e.to_string()))
	}

	fn decode(&self, raw: &str) -> ClResult<Option<SettingValue>> {
		serde_json::from_str::<Option<SettingValue>>(raw)
			.map_err(|e| Error::CodecError(format!("invalid json value: {}", e)))
	}
}


// vim: ts=4
