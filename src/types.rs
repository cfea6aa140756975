/// Типы данных для API инференса

use serde::{Deserialize, Serialize};

/// Признаки одного бриллианта (без id и цены)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DiamondFeatures {
    #[serde(default)]
    pub carat: Option<f64>,
    #[serde(default)]
    pub depth: Option<f64>,
    #[serde(default)]
    pub table: Option<f64>,
    #[serde(default)]
    pub x: Option<f64>,
    #[serde(default)]
    pub y: Option<f64>,
    #[serde(default)]
    pub z: Option<f64>,
    #[serde(default)]
    pub cut: Option<String>,
    #[serde(default)]
    pub color: Option<String>,
    #[serde(default)]
    pub clarity: Option<String>,
}

impl DiamondFeatures {
    pub const COLUMNS: [&'static str; 9] = [
        "carat", "depth", "table", "x", "y", "z", "cut", "color", "clarity",
    ];

    /// Ячейки в порядке `COLUMNS`
    pub fn to_cells(&self) -> Vec<Option<String>> {
        let num = |v: Option<f64>| v.filter(|v| !v.is_nan()).map(|v| v.to_string());
        vec![
            num(self.carat),
            num(self.depth),
            num(self.table),
            num(self.x),
            num(self.y),
            num(self.z),
            self.cut.clone(),
            self.color.clone(),
            self.clarity.clone(),
        ]
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransformRequest {
    pub rows: Vec<DiamondFeatures>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransformResponse {
    pub columns: Vec<String>,
    pub features: Vec<Vec<f64>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}
