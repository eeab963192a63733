pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;
pub use config::ImporterConfig;

pub use core::{archive::ArchiveExpander, client::CritsClient, importer::Importer};
pub use utils::error::{ImportError, Result};
