use crate::error::ConfigError;

// Declare the modules that make up this crate.
pub mod error;
pub mod settings;

// Re-export the core types to provide a clean public API.
pub use settings::{AgentTableRules, Config, OneTapThresholds, RecommendationDefaults};

/// Loads the application configuration from the `config.toml` file.
///
/// This function is the primary entry point for this crate. The file is
/// optional: when absent, every section falls back to its documented default,
/// so a fresh checkout runs without any setup.
pub fn load_config() -> Result<Config, ConfigError> {
    let builder = config::Config::builder()
        // Tells the builder to look for a file named `config.toml`.
        .add_source(config::File::with_name("config.toml").required(false))
        .build()?;

    // Attempt to deserialize the entire configuration into our `Config` struct.
    let config = builder.try_deserialize::<Config>()?;

    Ok(config)
}
