pub mod etl;
pub mod normalizer;
pub mod pipeline;
pub mod sink;
pub mod source;

pub use crate::domain::model::{InputRow, NormalizeResult, NormalizedRecord, ProductEntry};
pub use crate::domain::ports::{ConfigProvider, Pipeline, Storage};
pub use crate::utils::error::Result;
