pub use scopeset_types::prelude::*;

pub use crate::settings::{SettingsConfig, SettingsManager};

// vim: ts=4
