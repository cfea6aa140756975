//! Категориальная ветка: мода для пропусков + порядковое кодирование + стандартизация

use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::data::Table;
use crate::error::{PreprocessingError, Result};
use crate::preprocessing::catalog::{CatalogEntry, CategoryCatalog};
use crate::preprocessing::imputation;
use crate::preprocessing::normalization::DataNormalizer;

/// Что делать со значением, которого нет в справочнике
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "policy", content = "value")]
pub enum UnknownCategory {
    /// Ошибка `Encoding`
    #[default]
    Error,
    /// Подставить заданный ранг (например, -1.0)
    UseEncodedValue(f64),
}

#[derive(Debug, Clone)]
pub struct CategoricalBranch {
    entries: Vec<CatalogEntry>,
    unknown: UnknownCategory,
}

impl CategoricalBranch {
    /// Каждая колонка должна иметь запись в справочнике
    pub fn new(
        columns: &[String],
        catalog: &CategoryCatalog,
        unknown: UnknownCategory,
    ) -> Result<Self> {
        let entries = columns
            .iter()
            .map(|name| {
                catalog.entry(name).cloned().ok_or_else(|| {
                    PreprocessingError::Config(format!(
                        "categorical column '{}' has no category catalog entry",
                        name
                    ))
                })
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { entries, unknown })
    }

    pub fn fit(&self, table: &Table) -> Result<FittedCategoricalBranch> {
        let mut modes = Vec::with_capacity(self.entries.len());
        for entry in &self.entries {
            let values = table.text_column(&entry.feature)?;
            let mode = imputation::most_frequent(&values).ok_or_else(|| {
                PreprocessingError::DegenerateColumn {
                    column: entry.feature.clone(),
                    statistic: "most frequent value",
                }
            })?;
            modes.push(mode.to_string());
        }

        let ranks = encode(table, &self.entries, &modes, self.unknown)?;
        let normalizer = DataNormalizer::fit(&ranks)?;

        tracing::debug!("Categorical branch fitted: modes {:?}", modes);

        Ok(FittedCategoricalBranch {
            entries: self.entries.clone(),
            modes,
            unknown: self.unknown,
            normalizer,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FittedCategoricalBranch {
    entries: Vec<CatalogEntry>,
    modes: Vec<String>,
    unknown: UnknownCategory,
    normalizer: DataNormalizer,
}

impl FittedCategoricalBranch {
    pub fn transform(&self, table: &Table) -> Result<Array2<f64>> {
        let ranks = self.encode(table)?;
        self.normalizer.transform(&ranks)
    }

    /// Ранги до стандартизации
    pub fn encode(&self, table: &Table) -> Result<Array2<f64>> {
        encode(table, &self.entries, &self.modes, self.unknown)
    }

    pub fn columns(&self) -> Vec<String> {
        self.entries.iter().map(|e| e.feature.clone()).collect()
    }

    pub fn modes(&self) -> &[String] {
        &self.modes
    }

    pub fn normalizer(&self) -> &DataNormalizer {
        &self.normalizer
    }
}

fn encode(
    table: &Table,
    entries: &[CatalogEntry],
    modes: &[String],
    unknown: UnknownCategory,
) -> Result<Array2<f64>> {
    let mut ranks = Array2::zeros((table.nrows(), entries.len()));

    for (j, (entry, mode)) in entries.iter().zip(modes).enumerate() {
        let values = table.text_column(&entry.feature)?;
        for (i, value) in values.into_iter().enumerate() {
            let label = value.unwrap_or(mode.as_str());
            ranks[[i, j]] = match (entry.rank(label), unknown) {
                (Some(rank), _) => rank as f64,
                (None, UnknownCategory::UseEncodedValue(sentinel)) => sentinel,
                (None, UnknownCategory::Error) => {
                    return Err(PreprocessingError::Encoding {
                        column: entry.feature.clone(),
                        value: label.to_string(),
                    })
                }
            };
        }
    }

    Ok(ranks)
}
