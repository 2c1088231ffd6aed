//! Common test utilities and fixtures

use scopeset::{CodecFormat, SettingDefinition, SettingScope, SettingsConfig, SettingsRegistry};

/// Route tracing output through the test harness; safe to call repeatedly
pub fn init_tracing() {
	let _ = tracing_subscriber::fmt()
		.with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
		.with_test_writer()
		.try_init();
}

/// `theme` (all), `locale` (user), `motd` (global), `volume` (all), `beta` (user)
pub fn sample_config(format: CodecFormat) -> SettingsConfig {
	let mut registry = SettingsRegistry::new();
	for (key, scope) in [
		("theme", SettingScope::All),
		("locale", SettingScope::User),
		("motd", SettingScope::Global),
		("volume", SettingScope::All),
		("beta", SettingScope::User),
	] {
		let def = SettingDefinition::builder(key)
			.description(format!("Test setting {}", key))
			.scope(scope)
			.build()
			.expect("Failed to build definition");
		registry.register(def).expect("Failed to register definition");
	}
	SettingsConfig::new(registry.freeze(), format)
}

// vim: ts=4
