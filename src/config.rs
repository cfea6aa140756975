//! Конфигурация стадии трансформации

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{PreprocessingError, Result};
use crate::preprocessing::UnknownCategory;

/// Разбиение входных колонок на числовые и категориальные
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnGroups {
    #[serde(default = "default_numerical")]
    pub numerical: Vec<String>,
    #[serde(default = "default_categorical")]
    pub categorical: Vec<String>,
}

fn default_numerical() -> Vec<String> {
    ["carat", "depth", "table", "x", "y", "z"]
        .iter()
        .map(|c| c.to_string())
        .collect()
}

fn default_categorical() -> Vec<String> {
    ["cut", "color", "clarity"]
        .iter()
        .map(|c| c.to_string())
        .collect()
}

impl Default for ColumnGroups {
    fn default() -> Self {
        Self {
            numerical: default_numerical(),
            categorical: default_categorical(),
        }
    }
}

impl ColumnGroups {
    /// Имена выходных колонок: сначала числовые, затем категориальные
    pub fn output_order(&self) -> Vec<String> {
        self.numerical
            .iter()
            .chain(self.categorical.iter())
            .cloned()
            .collect()
    }

    pub fn validate(&self) -> Result<()> {
        let all = self.output_order();
        if all.is_empty() {
            return Err(PreprocessingError::Config("no columns declared".to_string()));
        }
        for (i, name) in all.iter().enumerate() {
            if all[..i].contains(name) {
                return Err(PreprocessingError::Config(format!(
                    "column '{}' is declared more than once",
                    name
                )));
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransformationConfig {
    #[serde(default = "default_preprocessor_path")]
    pub preprocessor_path: PathBuf,
    #[serde(default = "default_target_column")]
    pub target_column: String,
    #[serde(default = "default_id_columns")]
    pub id_columns: Vec<String>,
    #[serde(default)]
    pub columns: ColumnGroups,
    #[serde(default)]
    pub unknown_category: UnknownCategory,
}

fn default_preprocessor_path() -> PathBuf {
    Path::new("artifacts").join("preprocessor.json")
}
fn default_target_column() -> String { "price".to_string() }
fn default_id_columns() -> Vec<String> { vec!["id".to_string()] }

impl Default for TransformationConfig {
    fn default() -> Self {
        Self {
            preprocessor_path: default_preprocessor_path(),
            target_column: default_target_column(),
            id_columns: default_id_columns(),
            columns: ColumnGroups::default(),
            unknown_category: UnknownCategory::default(),
        }
    }
}

impl TransformationConfig {
    /// Читает конфиг из JSON; отсутствующие поля берутся по умолчанию
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)
            .map_err(|e| PreprocessingError::persistence(path, e))?;
        let config: Self = serde_json::from_str(&raw)
            .map_err(|e| PreprocessingError::Config(format!("{}: {}", path.display(), e)))?;
        config.validate()?;
        Ok(config)
    }

    pub fn with_preprocessor_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.preprocessor_path = path.into();
        self
    }

    pub fn validate(&self) -> Result<()> {
        self.columns.validate()?;
        let dropped = std::iter::once(&self.target_column).chain(self.id_columns.iter());
        for name in dropped {
            if self.columns.output_order().contains(name) {
                return Err(PreprocessingError::Config(format!(
                    "column '{}' is both dropped and used as a feature",
                    name
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_diamond_dataset() {
        let config = TransformationConfig::default();
        assert_eq!(config.preprocessor_path, Path::new("artifacts/preprocessor.json"));
        assert_eq!(config.target_column, "price");
        assert_eq!(config.id_columns, vec!["id".to_string()]);
        assert_eq!(
            config.columns.output_order(),
            vec!["carat", "depth", "table", "x", "y", "z", "cut", "color", "clarity"]
        );
        assert_eq!(config.unknown_category, UnknownCategory::Error);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn partial_json_falls_back_to_defaults() {
        let config: TransformationConfig =
            serde_json::from_str(r#"{ "target_column": "cost" }"#).unwrap();
        assert_eq!(config.target_column, "cost");
        assert_eq!(config.id_columns, vec!["id".to_string()]);
        assert_eq!(config.columns, ColumnGroups::default());
    }

    #[test]
    fn duplicate_column_is_rejected() {
        let groups = ColumnGroups {
            numerical: vec!["carat".into()],
            categorical: vec!["carat".into()],
        };
        assert!(matches!(groups.validate(), Err(PreprocessingError::Config(_))));
    }

    #[test]
    fn target_cannot_be_a_feature() {
        let config = TransformationConfig {
            target_column: "carat".into(),
            ..TransformationConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn from_file_reads_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, r#"{ "preprocessor_path": "out/p.json" }"#).unwrap();
        let config = TransformationConfig::from_file(&path).unwrap();
        assert_eq!(config.preprocessor_path, Path::new("out/p.json"));
    }
}
