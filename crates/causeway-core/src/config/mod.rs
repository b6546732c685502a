//! Configuration system for Causeway.
//! TOML-based, 3-layer resolution: env > project file > defaults.

pub mod causeway_config;
pub mod tagger_config;

pub use causeway_config::CausewayConfig;
pub use tagger_config::TaggerConfig;
