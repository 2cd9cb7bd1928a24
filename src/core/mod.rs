pub mod batch;
pub mod client;
pub mod engine;
pub mod export;
pub mod pipeline;

pub use crate::domain::model::{
    BatchInput, BatchOutput, InputTable, ResultRecord, ResultTable, UrlRecord, ValidationResult,
};
pub use crate::domain::ports::{ConfigProvider, Pipeline, Storage, Validator};
pub use crate::utils::error::Result;
