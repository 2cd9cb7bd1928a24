pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

pub use config::{cli::LocalStorage, toml_config::RunConfig, CliConfig};
pub use core::{client::HtaccessClient, engine::BatchEngine, pipeline::HtcheckPipeline};
pub use utils::error::{ClientError, HtcheckError, Result};
