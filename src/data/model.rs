use std::collections::BTreeSet;
use std::fmt;

use serde::Serialize;

// ---------------------------------------------------------------------------
// CellValue – a single cell of the raw (wide) table
// ---------------------------------------------------------------------------

/// A dynamically-typed cell mirroring common spreadsheet / Pandas dtypes.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    String(String),
    Integer(i64),
    Float(f64),
    Bool(bool),
    Null,
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::String(s) => write!(f, "{s}"),
            CellValue::Integer(i) => write!(f, "{i}"),
            CellValue::Float(v) => write!(f, "{v}"),
            CellValue::Bool(b) => write!(f, "{b}"),
            CellValue::Null => write!(f, "<null>"),
        }
    }
}

impl CellValue {
    /// Interpret the cell as a measured level.
    ///
    /// Numeric text is accepted; NaN, non-numeric text and nulls are not.
    pub fn as_level(&self) -> Option<f64> {
        let v = match self {
            CellValue::Float(v) => *v,
            CellValue::Integer(i) => *i as f64,
            CellValue::String(s) => s.trim().parse::<f64>().ok()?,
            CellValue::Bool(_) | CellValue::Null => return None,
        };
        v.is_finite().then_some(v)
    }

    /// Interpret the cell as an identifier label (region / site name).
    pub fn as_label(&self) -> Option<String> {
        match self {
            CellValue::Null => None,
            CellValue::Float(v) if v.is_nan() => None,
            CellValue::String(s) => {
                let trimmed = s.trim();
                (!trimmed.is_empty()).then(|| trimmed.to_string())
            }
            other => Some(other.to_string()),
        }
    }
}

// ---------------------------------------------------------------------------
// RawTable – the loader's output, before normalization
// ---------------------------------------------------------------------------

/// A rectangular table as read from disk: header names plus typed cells.
#[derive(Debug, Clone, Default)]
pub struct RawTable {
    pub headers: Vec<String>,
    /// Each row has exactly `headers.len()` cells.
    pub rows: Vec<Vec<CellValue>>,
}

impl RawTable {
    pub fn new(headers: Vec<String>) -> Self {
        Self {
            headers,
            rows: Vec::new(),
        }
    }

    /// Append a row, padding with nulls or truncating to the header width.
    pub fn push_row(&mut self, mut cells: Vec<CellValue>) {
        cells.resize(self.headers.len(), CellValue::Null);
        self.rows.push(cells);
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == name)
    }
}

// ---------------------------------------------------------------------------
// Measurement – one row of the long table
// ---------------------------------------------------------------------------

/// A single normalized observation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Measurement {
    pub region: String,
    pub site: String,
    /// Year token taken from the value column name (e.g. `"2020"`).
    pub year: String,
    pub level: f64,
    /// Weight used by aggregation; always 1 for loaded data.
    pub unit_count: u64,
}

impl Measurement {
    pub fn new(
        region: impl Into<String>,
        site: impl Into<String>,
        year: impl Into<String>,
        level: f64,
    ) -> Self {
        Self {
            region: region.into(),
            site: site.into(),
            year: year.into(),
            level,
            unit_count: 1,
        }
    }
}

// ---------------------------------------------------------------------------
// Dataset – the complete normalized row-set
// ---------------------------------------------------------------------------

/// The long row-set plus statistics derived once at load.
///
/// Read-only after construction; sessions share it through an `Arc`.
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    pub measurements: Vec<Measurement>,
    /// Distinct years, most recent first.
    pub years: Vec<String>,
    /// Distinct sites across the whole row-set.
    pub total_site_count: usize,
}

impl Dataset {
    /// Build the derived statistics from normalized measurements.
    pub fn from_measurements(measurements: Vec<Measurement>) -> Self {
        let years: BTreeSet<&str> = measurements.iter().map(|m| m.year.as_str()).collect();
        let years: Vec<String> = years.into_iter().rev().map(str::to_string).collect();
        let total_site_count = measurements
            .iter()
            .map(|m| m.site.as_str())
            .collect::<BTreeSet<_>>()
            .len();

        Dataset {
            measurements,
            years,
            total_site_count,
        }
    }

    /// Built-in demo data, used when no file is at hand.
    pub fn demo() -> Self {
        Self::from_measurements(vec![
            Measurement::new("Aguascalientes", "EL LLANO", "2020", 10.5),
            Measurement::new("Aguascalientes", "VALLE DE AGUASCALIENTES", "2020", 20.1),
            Measurement::new("Baja California", "VALLE DE MEXICALI", "2021", 30.2),
            Measurement::new("Baja California", "LLANOS DEL BERRENDO", "2021", 40.0),
            Measurement::new("Aguascalientes", "EL LLANO", "2020", 5.7),
            Measurement::new("Baja California", "VALLE DE MEXICALI", "2021", 25.9),
        ])
    }

    /// Most recent year, the default selection at session start.
    pub fn latest_year(&self) -> Option<&str> {
        self.years.first().map(String::as_str)
    }

    /// Number of measurements.
    pub fn len(&self) -> usize {
        self.measurements.len()
    }

    /// Whether the dataset is empty.
    pub fn is_empty(&self) -> bool {
        self.measurements.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn level_accepts_numeric_text_and_rejects_nan() {
        assert_eq!(CellValue::String(" 12.5 ".into()).as_level(), Some(12.5));
        assert_eq!(CellValue::Integer(3).as_level(), Some(3.0));
        assert_eq!(CellValue::Float(f64::NAN).as_level(), None);
        assert_eq!(CellValue::String("n/a".into()).as_level(), None);
        assert_eq!(CellValue::Null.as_level(), None);
    }

    #[test]
    fn label_stringifies_numbers_and_drops_blanks() {
        assert_eq!(CellValue::Integer(7).as_label().as_deref(), Some("7"));
        assert_eq!(CellValue::String("  ".into()).as_label(), None);
        assert_eq!(CellValue::Null.as_label(), None);
    }

    #[test]
    fn demo_dataset_statistics() {
        let ds = Dataset::demo();
        assert_eq!(ds.len(), 6);
        assert_eq!(ds.years, vec!["2021".to_string(), "2020".to_string()]);
        assert_eq!(ds.latest_year(), Some("2021"));
        assert_eq!(ds.total_site_count, 4);
    }
}
