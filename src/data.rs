//! Табличные данные: загрузка CSV и доступ к колонкам по имени

use std::path::Path;

use csv::ReaderBuilder;

use crate::error::{PreprocessingError, Result};
use crate::types::DiamondFeatures;

/// Маркеры пропущенных значений (как у pandas по умолчанию)
const MISSING_MARKERS: [&str; 6] = ["NA", "N/A", "NaN", "nan", "null", "NULL"];

pub fn is_missing(cell: Option<&str>) -> bool {
    match cell {
        None => true,
        Some(value) => value.is_empty() || MISSING_MARKERS.contains(&value),
    }
}

/// Таблица с именованными колонками; ячейки хранятся как строки
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Table {
    columns: Vec<String>,
    rows: Vec<Vec<Option<String>>>,
}

impl Table {
    pub fn new(columns: Vec<String>) -> Self {
        Self {
            columns,
            rows: Vec::new(),
        }
    }

    /// Добавляет строку; длина должна совпадать с числом колонок
    pub fn push_row(&mut self, row: Vec<Option<String>>) -> Result<()> {
        if row.len() != self.columns.len() {
            return Err(PreprocessingError::RaggedRow {
                row: self.rows.len(),
                expected: self.columns.len(),
                got: row.len(),
            });
        }
        self.rows.push(row);
        Ok(())
    }

    pub fn read_csv<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .from_path(path)
            .map_err(|e| PreprocessingError::persistence(path, e))?;

        let columns: Vec<String> = reader
            .headers()
            .map_err(|e| PreprocessingError::persistence(path, e))?
            .iter()
            .map(|h| h.trim().to_string())
            .collect();

        let mut table = Table::new(columns);
        for (row, record) in reader.records().enumerate() {
            let record = record.map_err(|e| csv_error(path, row, e))?;
            let row = record
                .iter()
                .map(|cell| {
                    if is_missing(Some(cell)) {
                        None
                    } else {
                        Some(cell.to_string())
                    }
                })
                .collect();
            table.push_row(row)?;
        }

        tracing::debug!(
            "Loaded {} rows x {} columns from {}",
            table.nrows(),
            table.ncols(),
            path.display()
        );
        Ok(table)
    }

    /// Таблица из записей запроса на инференс
    pub fn from_diamonds(records: &[DiamondFeatures]) -> Self {
        let columns = DiamondFeatures::COLUMNS.iter().map(|c| c.to_string()).collect();
        let rows = records.iter().map(DiamondFeatures::to_cells).collect();
        Self { columns, rows }
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn nrows(&self) -> usize {
        self.rows.len()
    }

    pub fn ncols(&self) -> usize {
        self.columns.len()
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.column_index(name).is_some()
    }

    fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    /// Ячейки колонки; пропуски нормализованы в `None`
    pub fn text_column(&self, name: &str) -> Result<Vec<Option<&str>>> {
        let idx = self
            .column_index(name)
            .ok_or_else(|| PreprocessingError::schema(name))?;
        Ok(self
            .rows
            .iter()
            .map(|row| {
                let cell = row[idx].as_deref();
                if is_missing(cell) {
                    None
                } else {
                    cell
                }
            })
            .collect())
    }

    /// Числовая колонка; пропуски -> `None`, нечисловые значения -> ошибка
    pub fn numeric_column(&self, name: &str) -> Result<Vec<Option<f64>>> {
        self.text_column(name)?
            .into_iter()
            .enumerate()
            .map(|(row, cell)| match cell {
                None => Ok(None),
                Some(raw) => match raw.trim().parse::<f64>() {
                    Ok(v) if v.is_nan() => Ok(None),
                    Ok(v) if v.is_finite() => Ok(Some(v)),
                    _ => Err(PreprocessingError::InvalidNumber {
                        column: name.to_string(),
                        row,
                        value: raw.to_string(),
                    }),
                },
            })
            .collect()
    }

    /// Копия таблицы без указанных колонок
    pub fn drop_columns(&self, names: &[String]) -> Result<Self> {
        for name in names {
            if !self.has_column(name) {
                return Err(PreprocessingError::schema(name.as_str()));
            }
        }

        let keep: Vec<usize> = (0..self.columns.len())
            .filter(|&i| !names.contains(&self.columns[i]))
            .collect();

        Ok(Self {
            columns: keep.iter().map(|&i| self.columns[i].clone()).collect(),
            rows: self
                .rows
                .iter()
                .map(|row| keep.iter().map(|&i| row[i].clone()).collect())
                .collect(),
        })
    }

    /// Первые строки в читаемом виде, для логов
    pub fn head(&self, n: usize) -> String {
        let mut out = self.columns.join(",");
        for row in self.rows.iter().take(n) {
            out.push('\n');
            let cells: Vec<&str> = row.iter().map(|c| c.as_deref().unwrap_or("")).collect();
            out.push_str(&cells.join(","));
        }
        out
    }
}

/// Строка неверной ширины - ошибка схемы, остальное - ошибка чтения файла
fn csv_error(path: &Path, row: usize, err: csv::Error) -> PreprocessingError {
    match err.kind() {
        csv::ErrorKind::UnequalLengths {
            expected_len, len, ..
        } => PreprocessingError::RaggedRow {
            row,
            expected: *expected_len as usize,
            got: *len as usize,
        },
        _ => PreprocessingError::persistence(path, err),
    }
}
