/// Модуль предобработки данных

pub mod catalog;
pub mod categorical;
pub mod column_transformer;
pub mod imputation;
pub mod normalization;
pub mod numerical;

pub use catalog::{CatalogEntry, CategoryCatalog};
pub use categorical::{CategoricalBranch, FittedCategoricalBranch, UnknownCategory};
pub use column_transformer::{ColumnTransformer, FittedColumnTransformer};
pub use normalization::DataNormalizer;
pub use numerical::{FittedNumericalBranch, NumericalBranch};
