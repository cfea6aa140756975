//! ColumnTransformer: числовые и категориальные колонки обрабатываются
//! своими ветками, результаты склеиваются по горизонтали.
//!
//! Порядок выходных колонок фиксирован: `[числовые…, категориальные…]`,
//! внутри группы в порядке объявления в [`ColumnGroups`].

use ndarray::{concatenate, Array2, Axis};
use serde::{Deserialize, Serialize};

use crate::config::ColumnGroups;
use crate::data::Table;
use crate::error::{PreprocessingError, Result};
use crate::preprocessing::catalog::CategoryCatalog;
use crate::preprocessing::categorical::{
    CategoricalBranch, FittedCategoricalBranch, UnknownCategory,
};
use crate::preprocessing::numerical::{FittedNumericalBranch, NumericalBranch};

#[derive(Debug, Clone)]
pub struct ColumnTransformer {
    groups: ColumnGroups,
    numerical: NumericalBranch,
    categorical: CategoricalBranch,
}

impl ColumnTransformer {
    pub fn new(
        groups: ColumnGroups,
        catalog: &CategoryCatalog,
        unknown: UnknownCategory,
    ) -> Result<Self> {
        groups.validate()?;
        let numerical = NumericalBranch::new(groups.numerical.clone());
        let categorical = CategoricalBranch::new(&groups.categorical, catalog, unknown)?;
        Ok(Self {
            groups,
            numerical,
            categorical,
        })
    }

    /// Колонки и справочник датасета бриллиантов
    pub fn diamonds() -> Result<Self> {
        Self::new(
            ColumnGroups::default(),
            &CategoryCatalog::diamonds(),
            UnknownCategory::default(),
        )
    }

    pub fn fit(&self, table: &Table) -> Result<FittedColumnTransformer> {
        check_schema(table, &self.groups)?;

        tracing::info!(
            "Fitting column transformer on {} rows ({} numerical, {} categorical columns)",
            table.nrows(),
            self.groups.numerical.len(),
            self.groups.categorical.len()
        );

        let numerical = self.numerical.fit(table)?;
        let categorical = self.categorical.fit(table)?;

        Ok(FittedColumnTransformer {
            groups: self.groups.clone(),
            numerical,
            categorical,
        })
    }

    pub fn fit_transform(&self, table: &Table) -> Result<(FittedColumnTransformer, Array2<f64>)> {
        let fitted = self.fit(table)?;
        let transformed = fitted.transform(table)?;
        Ok((fitted, transformed))
    }
}

/// Обученный трансформер; после fit только читается
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FittedColumnTransformer {
    groups: ColumnGroups,
    numerical: FittedNumericalBranch,
    categorical: FittedCategoricalBranch,
}

impl FittedColumnTransformer {
    pub fn transform(&self, table: &Table) -> Result<Array2<f64>> {
        check_schema(table, &self.groups)?;

        let numerical = self.numerical.transform(table)?;
        let categorical = self.categorical.transform(table)?;

        concatenate(Axis(1), &[numerical.view(), categorical.view()]).map_err(|e| {
            PreprocessingError::Config(format!("failed to concatenate branch outputs: {}", e))
        })
    }

    /// Имена выходных колонок в позиционном порядке
    pub fn feature_names(&self) -> Vec<String> {
        self.groups.output_order()
    }

    pub fn n_features_out(&self) -> usize {
        self.groups.numerical.len() + self.groups.categorical.len()
    }

    /// Все статистики конечны (иначе артефакт не перечитается из JSON)
    pub fn statistics_are_finite(&self) -> bool {
        self.numerical.medians().iter().all(|v| v.is_finite())
            && self.numerical.normalizer().is_finite()
            && self.categorical.normalizer().is_finite()
    }

    pub fn numerical(&self) -> &FittedNumericalBranch {
        &self.numerical
    }

    pub fn categorical(&self) -> &FittedCategoricalBranch {
        &self.categorical
    }
}

fn check_schema(table: &Table, groups: &ColumnGroups) -> Result<()> {
    for name in groups.output_order() {
        if !table.has_column(&name) {
            return Err(PreprocessingError::schema(name));
        }
    }
    Ok(())
}
