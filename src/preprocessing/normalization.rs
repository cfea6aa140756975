//! Нормализация данных

#![allow(non_snake_case)]

use ndarray::{Array1, Array2, Axis};
use serde::{Deserialize, Serialize};

use crate::error::{PreprocessingError, Result};

/// Порог, ниже которого std считается нулевым
pub const MIN_STD: f64 = 1e-10;

/// Стандартизация по колонкам: (X - mean) / std
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataNormalizer {
    mean: Array1<f64>,
    std: Array1<f64>,
}

impl DataNormalizer {
    pub fn fit(X: &Array2<f64>) -> Result<Self> {
        if X.nrows() == 0 {
            return Err(PreprocessingError::DegenerateColumn {
                column: "*".to_string(),
                statistic: "mean",
            });
        }

        // Вычисляем среднее и стандартное отклонение по каждому признаку (ddof = 0)
        let mean = X.mean_axis(Axis(0)).ok_or_else(|| PreprocessingError::DegenerateColumn {
            column: "*".to_string(),
            statistic: "mean",
        })?;
        let mut std = X.std_axis(Axis(0), 0.0);

        // Избегаем деления на ноль: постоянная колонка только центрируется
        for val in std.iter_mut() {
            if *val < MIN_STD {
                *val = 1.0;
            }
        }

        Ok(Self { mean, std })
    }

    pub fn transform(&self, X: &Array2<f64>) -> Result<Array2<f64>> {
        if X.ncols() != self.mean.len() {
            return Err(PreprocessingError::Config(format!(
                "normalizer fitted on {} columns, got {}",
                self.mean.len(),
                X.ncols()
            )));
        }

        let mut normalized = X.clone();
        for mut row in normalized.rows_mut() {
            for (i, val) in row.iter_mut().enumerate() {
                *val = (*val - self.mean[i]) / self.std[i];
            }
        }

        Ok(normalized)
    }

    pub fn mean(&self) -> &Array1<f64> {
        &self.mean
    }

    pub fn std(&self) -> &Array1<f64> {
        &self.std
    }

    pub fn is_finite(&self) -> bool {
        self.mean.iter().chain(self.std.iter()).all(|v| v.is_finite())
    }
}
