/// Стадии пайплайна обучения

pub mod persistence;
pub mod transformation;

pub use persistence::{load_preprocessor, save_preprocessor, PreprocessorArtifact};
pub use transformation::{DataTransformation, TransformationOutput};
