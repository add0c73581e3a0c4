use crate::config::DatasetConfig;

use super::error::MalformedInputError;
use super::model::{CellValue, Dataset, Measurement, RawTable};

/// Unpivot a wide table into the long measurement row-set.
///
/// Every `(value column, row)` pair becomes one candidate, column-major:
/// all rows of the first value column come before those of the next one.
/// Candidates without a region, site or level are dropped.
pub fn normalize(table: &RawTable, config: &DatasetConfig) -> Result<Dataset, MalformedInputError> {
    let region_idx = table
        .column_index(&config.region_column)
        .ok_or_else(|| MalformedInputError::MissingColumn(config.region_column.clone()))?;
    let site_idx = table
        .column_index(&config.site_column)
        .ok_or_else(|| MalformedInputError::MissingColumn(config.site_column.clone()))?;

    let value_cols: Vec<(usize, &str)> = table
        .headers
        .iter()
        .enumerate()
        .filter_map(|(i, h)| h.strip_prefix(config.value_prefix.as_str()).map(|year| (i, year)))
        .collect();
    if value_cols.is_empty() {
        return Err(MalformedInputError::NoValueColumns {
            prefix: config.value_prefix.clone(),
        });
    }

    let labels: Vec<(Option<String>, Option<String>)> = table
        .rows
        .iter()
        .map(|row| {
            (
                row.get(region_idx).and_then(CellValue::as_label),
                row.get(site_idx).and_then(CellValue::as_label),
            )
        })
        .collect();

    let mut measurements = Vec::with_capacity(table.rows.len() * value_cols.len());
    for &(col_idx, year) in &value_cols {
        for (row, (region, site)) in table.rows.iter().zip(&labels) {
            let level = row.get(col_idx).and_then(CellValue::as_level);
            let (Some(region), Some(site), Some(level)) = (region, site, level) else {
                continue;
            };
            measurements.push(Measurement::new(region.as_str(), site.as_str(), year, level));
        }
    }

    let candidates = table.rows.len() * value_cols.len();
    log::debug!(
        "normalized {} of {candidates} candidates ({} dropped as incomplete)",
        measurements.len(),
        candidates - measurements.len()
    );

    Ok(Dataset::from_measurements(measurements))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn s(v: &str) -> CellValue {
        CellValue::String(v.to_string())
    }

    fn wide_table() -> RawTable {
        let mut t = RawTable::new(
            ["NOM_EDO", "NOM_ACUIF", "PNE_2020", "PNE_2021", "NOTES"]
                .iter()
                .map(|h| h.to_string())
                .collect(),
        );
        let f = CellValue::Float;
        let null = || CellValue::Null;
        t.push_row(vec![s("AGS"), s("SiteA"), f(10.5), f(5.7), s("x")]);
        t.push_row(vec![s("BC"), s("SiteB"), f(30.2), null(), null()]);
        t.push_row(vec![s("BC"), null(), f(1.0), f(2.0), null()]);
        t
    }

    #[test]
    fn unpivots_column_major_and_drops_incomplete() {
        let ds = normalize(&wide_table(), &DatasetConfig::default()).unwrap();
        // 3 rows x 2 value columns = 6 candidates; BC/SiteB 2021 has no level,
        // and the third row has no site.
        assert_eq!(ds.len(), 3);
        assert_eq!(
            ds.measurements,
            vec![
                Measurement::new("AGS", "SiteA", "2020", 10.5),
                Measurement::new("BC", "SiteB", "2020", 30.2),
                Measurement::new("AGS", "SiteA", "2021", 5.7),
            ]
        );
        assert_eq!(ds.years, vec!["2021", "2020"]);
        assert_eq!(ds.total_site_count, 2);
        assert!(ds.measurements.iter().all(|m| m.unit_count == 1));
    }

    #[test]
    fn missing_identifier_column_is_malformed() {
        let mut t = wide_table();
        t.headers[1] = "SITE".to_string();
        let err = normalize(&t, &DatasetConfig::default()).unwrap_err();
        assert_eq!(err, MalformedInputError::MissingColumn("NOM_ACUIF".to_string()));
    }

    #[test]
    fn no_value_columns_is_malformed() {
        let cfg = DatasetConfig {
            value_prefix: "LVL_".to_string(),
            ..DatasetConfig::default()
        };
        let err = normalize(&wide_table(), &cfg).unwrap_err();
        assert_eq!(
            err,
            MalformedInputError::NoValueColumns {
                prefix: "LVL_".to_string()
            }
        );
    }

    #[test]
    fn header_only_table_yields_empty_dataset() {
        let mut t = wide_table();
        t.rows.clear();
        let ds = normalize(&t, &DatasetConfig::default()).unwrap();
        assert!(ds.is_empty());
        assert_eq!(ds.total_site_count, 0);
    }
}
