#[cfg(feature = "cli")]
pub mod args;
pub mod cli;
pub mod settings;
pub mod toml_config;

#[cfg(feature = "cli")]
pub use args::CliConfig;
pub use settings::Settings;
