pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;
pub use config::{LocalStorage, TomlConfig};

pub use crate::core::etl::{EtlEngine, RunOutcome};
pub use crate::core::normalizer::{normalize, Normalizer};
pub use crate::core::pipeline::NormalizerPipeline;
pub use domain::model::{InputRow, MissingProductsPolicy, NormalizedRecord};
pub use utils::error::{NormalizerError, Result};
