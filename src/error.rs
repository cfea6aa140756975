//! Ошибки предобработки и стадий пайплайна

use std::fmt;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum PreprocessingError {
    /// В наборе данных нет обязательной колонки
    #[error("schema error: column '{column}' is missing from the input")]
    Schema { column: String },

    /// Значение в числовой колонке не парсится как конечное число
    #[error("schema error: column '{column}', row {row}: '{value}' is not a finite number")]
    InvalidNumber {
        column: String,
        row: usize,
        value: String,
    },

    /// Строка с числом ячеек, отличным от числа колонок
    #[error("schema error: row {row} has {got} cells, expected {expected}")]
    RaggedRow {
        row: usize,
        expected: usize,
        got: usize,
    },

    #[error("encoding error: value '{value}' of column '{column}' is not in the category catalog")]
    Encoding { column: String, value: String },

    #[error("degenerate column '{column}': no non-missing values to compute {statistic}")]
    DegenerateColumn {
        column: String,
        statistic: &'static str,
    },

    #[error("configuration error: {0}")]
    Config(String),

    #[error("persistence error at '{path}': {message}")]
    Persistence { path: String, message: String },
}

impl PreprocessingError {
    pub fn schema(column: impl Into<String>) -> Self {
        Self::Schema {
            column: column.into(),
        }
    }

    pub fn persistence(path: &std::path::Path, message: impl fmt::Display) -> Self {
        Self::Persistence {
            path: path.display().to_string(),
            message: message.to_string(),
        }
    }
}

/// Стадия пайплайна, на которой произошла ошибка
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    ReadData,
    Fit,
    Transform,
    Persist,
    Load,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::ReadData => "read data",
            Stage::Fit => "fit",
            Stage::Transform => "transform",
            Stage::Persist => "persist",
            Stage::Load => "load",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Error)]
#[error("{stage} stage failed: {source}")]
pub struct PipelineError {
    pub stage: Stage,
    #[source]
    pub source: PreprocessingError,
}

impl PipelineError {
    pub fn new(stage: Stage, source: PreprocessingError) -> Self {
        Self { stage, source }
    }
}

/// Помечает ошибку стадией пайплайна
pub trait StageContext<T> {
    fn stage(self, stage: Stage) -> Result<T, PipelineError>;
}

impl<T> StageContext<T> for Result<T, PreprocessingError> {
    fn stage(self, stage: Stage) -> Result<T, PipelineError> {
        self.map_err(|source| PipelineError::new(stage, source))
    }
}

pub type Result<T, E = PreprocessingError> = std::result::Result<T, E>;
