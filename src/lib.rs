//! Diamond price - предобработка данных для модели цены бриллиантов

pub mod api;
pub mod config;
pub mod data;
pub mod error;
pub mod pipeline;
pub mod preprocessing;
pub mod types;

pub use config::{ColumnGroups, TransformationConfig};
pub use data::Table;
pub use error::{PipelineError, PreprocessingError, Stage};
pub use pipeline::{load_preprocessor, save_preprocessor, DataTransformation, TransformationOutput};
pub use preprocessing::*;
pub use types::*;
