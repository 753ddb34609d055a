//! Configuration and path management for envmon-cli

pub mod paths;
pub mod settings;

pub use paths::EnvmonPaths;
pub use settings::Settings;
