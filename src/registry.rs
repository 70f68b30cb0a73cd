mod codec_registry;
mod config;
mod config_builder;

pub use codec_registry::*;
pub use config::*;
pub use config_builder::*;
