//! Стадия трансформации: fit на train, transform train/test, сохранение

use std::path::{Path, PathBuf};

use ndarray::{concatenate, Array1, Array2, Axis};

use crate::config::TransformationConfig;
use crate::data::Table;
use crate::error::{PipelineError, PreprocessingError, Result, Stage, StageContext};
use crate::pipeline::persistence::save_preprocessor;
use crate::preprocessing::{CategoryCatalog, ColumnTransformer, FittedColumnTransformer};

/// Результат стадии: матрицы с целевой колонкой в конце и обученный трансформер
#[derive(Debug, Clone)]
pub struct TransformationOutput {
    pub train: Array2<f64>,
    pub test: Array2<f64>,
    pub preprocessor: FittedColumnTransformer,
    pub preprocessor_path: PathBuf,
}

pub struct DataTransformation {
    config: TransformationConfig,
    catalog: CategoryCatalog,
}

impl DataTransformation {
    pub fn new(config: TransformationConfig) -> Self {
        Self {
            config,
            catalog: CategoryCatalog::diamonds(),
        }
    }

    pub fn with_catalog(mut self, catalog: CategoryCatalog) -> Self {
        self.catalog = catalog;
        self
    }

    pub fn config(&self) -> &TransformationConfig {
        &self.config
    }

    pub fn get_transformer(&self) -> Result<ColumnTransformer> {
        self.config.validate()?;
        ColumnTransformer::new(
            self.config.columns.clone(),
            &self.catalog,
            self.config.unknown_category,
        )
    }

    /// Читает train/test CSV и запускает трансформацию
    pub fn initiate_data_transformation(
        &self,
        train_path: &Path,
        test_path: &Path,
    ) -> Result<TransformationOutput, PipelineError> {
        let train = Table::read_csv(train_path).stage(Stage::ReadData)?;
        let test = Table::read_csv(test_path).stage(Stage::ReadData)?;

        tracing::info!(
            "Read train ({} rows) and test ({} rows) data",
            train.nrows(),
            test.nrows()
        );
        tracing::debug!("Train head:\n{}", train.head(5));
        tracing::debug!("Test head:\n{}", test.head(5));

        self.run(&train, &test)
    }

    pub fn run(&self, train: &Table, test: &Table) -> Result<TransformationOutput, PipelineError> {
        let transformer = self.get_transformer().stage(Stage::Fit)?;

        let (train_features, train_target) = self.split_target(train).stage(Stage::Fit)?;
        let (test_features, test_target) = self.split_target(test).stage(Stage::Transform)?;

        let preprocessor = transformer.fit(&train_features).stage(Stage::Fit)?;

        let train_arr = preprocessor.transform(&train_features).stage(Stage::Transform)?;
        let test_arr = preprocessor.transform(&test_features).stage(Stage::Transform)?;
        tracing::info!("Applied preprocessing object on training and testing datasets");

        let train = append_target(train_arr, train_target).stage(Stage::Transform)?;
        let test = append_target(test_arr, test_target).stage(Stage::Transform)?;

        save_preprocessor(&self.config.preprocessor_path, &preprocessor).stage(Stage::Persist)?;

        Ok(TransformationOutput {
            train,
            test,
            preprocessor,
            preprocessor_path: self.config.preprocessor_path.clone(),
        })
    }

    /// Отделяет целевую колонку и удаляет id
    fn split_target(&self, table: &Table) -> Result<(Table, Array1<f64>)> {
        let target: Array1<f64> = table
            .numeric_column(&self.config.target_column)?
            .into_iter()
            .map(|v| v.unwrap_or(f64::NAN))
            .collect();

        let mut dropped = self.config.id_columns.clone();
        dropped.push(self.config.target_column.clone());
        let features = table.drop_columns(&dropped)?;

        Ok((features, target))
    }
}

fn append_target(features: Array2<f64>, target: Array1<f64>) -> Result<Array2<f64>> {
    let target = target.insert_axis(Axis(1));
    concatenate(Axis(1), &[features.view(), target.view()]).map_err(|e| {
        PreprocessingError::Config(format!("failed to append target column: {}", e))
    })
}
