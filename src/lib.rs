pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;
pub use config::{Settings, SourceKind};

pub use adapters::{HeadHunterAdapter, LocalStorage, SuperJobAdapter};
pub use crate::core::{engine::StatsEngine, pipeline::SalaryPipeline};
pub use utils::error::{Result, SalaryError};
