use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use csv::{ReaderBuilder, StringRecord};
use tracing::{info, warn};

use crate::dataset::{Dataset, Record};
use crate::DataError;

/// Rows sampled per column when sniffing numeric indicator columns
const MAX_SAMPLE_ROWS: usize = 500;

/// Header of the country key column
pub const COUNTRY_COLUMN: &str = "Geographic area";
/// Header of the year key column
pub const YEAR_COLUMN: &str = "Time period";

/// Loads the pre-cleaned wide CSV into a [`Dataset`].
///
/// The file carries the two key columns plus one column per indicator.
/// Indicator columns are discovered from the header, not hardcoded;
/// columns that fail the numeric sniff are skipped with a warning.
pub struct CsvSource;

impl CsvSource {
    /// Load a dataset from a CSV file on disk.
    pub fn load(path: impl AsRef<Path>) -> Result<Dataset, DataError> {
        let path = path.as_ref();
        info!(path = %path.display(), "loading dataset");
        let file = File::open(path)?;
        Self::from_reader(BufReader::new(file))
    }

    /// Load a dataset from any reader.
    pub fn from_reader<R: Read>(reader: R) -> Result<Dataset, DataError> {
        let mut csv_reader = ReaderBuilder::new().has_headers(true).from_reader(reader);
        let headers = csv_reader.headers()?.clone();
        let rows = csv_reader
            .records()
            .collect::<Result<Vec<StringRecord>, _>>()?;

        let country_idx = Self::required_column(&headers, COUNTRY_COLUMN)?;
        let year_idx = Self::required_column(&headers, YEAR_COLUMN)?;

        // Every remaining named column is a candidate indicator. An
        // unnamed column is a serialized index column and is skipped.
        let mut indicator_cols = Vec::new();
        for (idx, name) in headers.iter().enumerate() {
            if idx == country_idx || idx == year_idx || name.is_empty() {
                continue;
            }
            if Self::column_is_numeric(&rows, idx) {
                indicator_cols.push((idx, name.to_string()));
            } else {
                warn!(column = name, "skipping non-numeric column");
            }
        }

        let mut records = Vec::with_capacity(rows.len());
        for (row_idx, row) in rows.iter().enumerate() {
            let country = row.get(country_idx).unwrap_or("").trim();
            let year_raw = row.get(year_idx).unwrap_or("").trim();
            let year = year_raw
                .parse::<i32>()
                .map_err(|_| DataError::InvalidYear {
                    row: row_idx + 1,
                    value: year_raw.to_string(),
                })?;
            let values = indicator_cols
                .iter()
                .map(|&(idx, _)| Self::parse_value(row.get(idx)))
                .collect();
            records.push(Record::new(country, year, values));
        }

        let indicators = indicator_cols.into_iter().map(|(_, name)| name).collect();
        let dataset = Dataset::from_records(indicators, records)?;
        info!(
            rows = dataset.row_count(),
            indicators = dataset.indicators().len(),
            countries = dataset.countries().len(),
            "dataset loaded"
        );
        Ok(dataset)
    }

    fn required_column(headers: &StringRecord, name: &str) -> Result<usize, DataError> {
        headers
            .iter()
            .position(|h| h == name)
            .ok_or_else(|| DataError::MissingColumn(name.to_string()))
    }

    /// Empty cells are absent values, not type evidence; a column is
    /// numeric if every sampled non-empty cell parses and at least one
    /// value was seen.
    fn column_is_numeric(rows: &[StringRecord], col_idx: usize) -> bool {
        let mut saw_value = false;
        for row in rows.iter().take(MAX_SAMPLE_ROWS) {
            match row.get(col_idx).map(str::trim) {
                None | Some("") => continue,
                Some(cell) => {
                    if cell.parse::<f64>().is_err() {
                        return false;
                    }
                    saw_value = true;
                }
            }
        }
        saw_value
    }

    fn parse_value(cell: Option<&str>) -> Option<f64> {
        cell.map(str::trim)
            .filter(|v| !v.is_empty())
            .and_then(|v| v.parse::<f64>().ok())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    const SAMPLE: &str = "\
,Geographic area,Time period,Sub-topic,Incidence rate,Deaths
0,Uganda,2010,HIV,2.4,110
1,Uganda,2011,HIV,,105
2,Kenya,2010,HIV,1.8,
3,Chad,2005,HIV,0.9,40
";

    #[test]
    fn discovers_numeric_indicator_columns() {
        let dataset = CsvSource::from_reader(Cursor::new(SAMPLE)).unwrap();
        // index column skipped, non-numeric "Sub-topic" skipped
        assert_eq!(dataset.indicators(), &["Incidence rate", "Deaths"]);
        assert_eq!(dataset.countries(), &["Uganda", "Kenya", "Chad"]);
        assert_eq!(dataset.year_bounds(), (2005, 2011));
        assert_eq!(dataset.row_count(), 4);
    }

    #[test]
    fn empty_cells_load_as_absent() {
        let dataset = CsvSource::from_reader(Cursor::new(SAMPLE)).unwrap();
        let uganda_2011 = &dataset.records()[1];
        assert_eq!(uganda_2011.value(0), None);
        assert_eq!(uganda_2011.value(1), Some(105.0));
    }

    #[test]
    fn missing_key_column_is_an_error() {
        let csv = "Country,Time period,Incidence rate\nUganda,2010,2.4\n";
        let result = CsvSource::from_reader(Cursor::new(csv));
        assert!(matches!(
            result,
            Err(DataError::MissingColumn(name)) if name == COUNTRY_COLUMN
        ));
    }

    #[test]
    fn unparseable_year_is_an_error() {
        let csv = "Geographic area,Time period,Incidence rate\nUganda,not-a-year,2.4\n";
        let result = CsvSource::from_reader(Cursor::new(csv));
        assert!(matches!(
            result,
            Err(DataError::InvalidYear { row: 1, .. })
        ));
    }

    #[test]
    fn data_free_file_is_an_error() {
        let csv = "Geographic area,Time period,Incidence rate\n";
        let result = CsvSource::from_reader(Cursor::new(csv));
        assert!(matches!(result, Err(DataError::EmptyDataset)));
    }
}
