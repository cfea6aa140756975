//! Сохранение и загрузка обученного трансформера

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{PreprocessingError, Result};
use crate::preprocessing::FittedColumnTransformer;

pub const FORMAT_VERSION: u32 = 1;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PreprocessorArtifact {
    pub format_version: u32,
    pub fitted_at: DateTime<Utc>,
    pub transformer: FittedColumnTransformer,
}

fn temp_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().unwrap_or_default().to_os_string();
    name.push(".tmp");
    path.with_file_name(name)
}

/// Пишет артефакт атомарно: сначала во временный файл, затем rename
pub fn save_preprocessor(path: &Path, transformer: &FittedColumnTransformer) -> Result<()> {
    if path.file_name().is_none() {
        return Err(PreprocessingError::persistence(path, "path has no file name"));
    }
    if !transformer.statistics_are_finite() {
        return Err(PreprocessingError::persistence(
            path,
            "fitted statistics contain non-finite values",
        ));
    }

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| PreprocessingError::persistence(parent, e))?;
    }

    let artifact = PreprocessorArtifact {
        format_version: FORMAT_VERSION,
        fitted_at: Utc::now(),
        transformer: transformer.clone(),
    };
    let data = serde_json::to_vec_pretty(&artifact)
        .map_err(|e| PreprocessingError::persistence(path, e))?;

    let tmp = temp_path(path);
    if let Err(e) = fs::write(&tmp, data) {
        let _ = fs::remove_file(&tmp);
        return Err(PreprocessingError::persistence(&tmp, e));
    }
    if let Err(e) = fs::rename(&tmp, path) {
        let _ = fs::remove_file(&tmp);
        return Err(PreprocessingError::persistence(path, e));
    }

    tracing::info!("Preprocessor saved to {}", path.display());
    Ok(())
}

pub fn load_artifact(path: &Path) -> Result<PreprocessorArtifact> {
    let data = fs::read(path).map_err(|e| PreprocessingError::persistence(path, e))?;
    let artifact: PreprocessorArtifact =
        serde_json::from_slice(&data).map_err(|e| PreprocessingError::persistence(path, e))?;

    if artifact.format_version != FORMAT_VERSION {
        return Err(PreprocessingError::persistence(
            path,
            format!(
                "unsupported format version {} (expected {})",
                artifact.format_version, FORMAT_VERSION
            ),
        ));
    }

    tracing::info!(
        "Preprocessor loaded from {} (fitted at {})",
        path.display(),
        artifact.fitted_at
    );
    Ok(artifact)
}

pub fn load_preprocessor(path: &Path) -> Result<FittedColumnTransformer> {
    load_artifact(path).map(|artifact| artifact.transformer)
}
