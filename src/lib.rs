pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::{CliConfig, Command};

pub use config::{cli::LocalStorage, toml_config::AcceleratorConfig};
pub use crate::core::{
    accelerator::RfiAccelerator, export::ResponseExporter, extractor::PromptExtractor,
    impact::ImpactCalculator, reference::ReferenceData,
};
pub use domain::model::{
    EconomicImpact, Industry, Location, RequestOverrides, RequestParameters, RfiResponse,
};
pub use utils::error::{RfiError, Result};
