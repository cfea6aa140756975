//! Числовая ветка: медиана для пропусков + стандартизация

use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::data::Table;
use crate::error::{PreprocessingError, Result};
use crate::preprocessing::imputation;
use crate::preprocessing::normalization::DataNormalizer;

#[derive(Debug, Clone)]
pub struct NumericalBranch {
    columns: Vec<String>,
}

impl NumericalBranch {
    pub fn new(columns: Vec<String>) -> Self {
        Self { columns }
    }

    pub fn fit(&self, table: &Table) -> Result<FittedNumericalBranch> {
        let raw = read_columns(table, &self.columns)?;

        let mut medians = Vec::with_capacity(self.columns.len());
        for (name, values) in self.columns.iter().zip(&raw) {
            let median =
                imputation::median(values).ok_or_else(|| PreprocessingError::DegenerateColumn {
                    column: name.clone(),
                    statistic: "median",
                })?;
            medians.push(median);
        }

        let imputed = impute(&raw, &medians, table.nrows());
        let normalizer = DataNormalizer::fit(&imputed)?;

        tracing::debug!("Numerical branch fitted: medians {:?}", medians);

        Ok(FittedNumericalBranch {
            columns: self.columns.clone(),
            medians,
            normalizer,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FittedNumericalBranch {
    columns: Vec<String>,
    medians: Vec<f64>,
    normalizer: DataNormalizer,
}

impl FittedNumericalBranch {
    pub fn transform(&self, table: &Table) -> Result<Array2<f64>> {
        let raw = read_columns(table, &self.columns)?;
        let imputed = impute(&raw, &self.medians, table.nrows());
        self.normalizer.transform(&imputed)
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn medians(&self) -> &[f64] {
        &self.medians
    }

    pub fn normalizer(&self) -> &DataNormalizer {
        &self.normalizer
    }
}

fn read_columns(table: &Table, columns: &[String]) -> Result<Vec<Vec<Option<f64>>>> {
    columns.iter().map(|name| table.numeric_column(name)).collect()
}

fn impute(raw: &[Vec<Option<f64>>], fill: &[f64], n_rows: usize) -> Array2<f64> {
    Array2::from_shape_fn((n_rows, raw.len()), |(i, j)| raw[j][i].unwrap_or(fill[j]))
}
