//! Price table loading.
//!
//! Files are wide CSV: a `date` column followed by one column per asset,
//! one row per trading day.
//!
//! ```text
//! date,AAPL,MSFT,GOOGL
//! 2024-01-02,185.64,370.87,138.17
//! 2024-01-03,184.25,370.60,138.92
//! ```

use std::io::Read;
use std::path::Path;

use vantage_core::{AssetId, Date, PriceTable};

use crate::error::{CliError, CliResult};

/// Loads a price table from a CSV file.
pub fn load_prices(path: &Path) -> CliResult<PriceTable> {
    let file = std::fs::File::open(path)?;
    let table = read_prices(file, path)?;
    tracing::info!(
        path = %path.display(),
        assets = table.num_assets(),
        observations = table.num_observations(),
        "loaded prices"
    );
    Ok(table)
}

/// Parses a price table from any reader. `path` is only used in messages.
pub fn read_prices<R: Read>(reader: R, path: &Path) -> CliResult<PriceTable> {
    let mut rdr = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers = rdr.headers()?.clone();
    let invalid_header = |reason: &str| CliError::InvalidHeader {
        path: path.to_path_buf(),
        reason: reason.to_string(),
    };

    match headers.get(0) {
        Some(first) if first.eq_ignore_ascii_case("date") => {}
        _ => return Err(invalid_header("first column must be 'date'")),
    }
    let assets: Vec<AssetId> = headers.iter().skip(1).map(AssetId::new).collect();
    if assets.is_empty() {
        return Err(invalid_header("no asset columns"));
    }
    if assets.iter().any(|a| a.as_str().is_empty()) {
        return Err(invalid_header("empty asset name"));
    }

    let mut dates = Vec::new();
    let mut columns: Vec<Vec<f64>> = vec![Vec::new(); assets.len()];

    for record in rdr.records() {
        let record = record?;
        let line = record.position().map_or(0, |p| p.line() as usize);

        let raw_date = record.get(0).unwrap_or_default();
        let date = Date::parse(raw_date).map_err(|_| CliError::InvalidValue {
            line,
            column: "date".to_string(),
            value: raw_date.to_string(),
        })?;
        dates.push(date);

        for (i, asset) in assets.iter().enumerate() {
            let cell = record.get(i + 1).unwrap_or_default();
            if cell.is_empty() {
                return Err(CliError::MissingValue {
                    line,
                    asset: asset.to_string(),
                });
            }
            let price: f64 = cell.parse().map_err(|_| CliError::InvalidValue {
                line,
                column: asset.to_string(),
                value: cell.to_string(),
            })?;
            columns[i].push(price);
        }
    }

    Ok(PriceTable::from_columns(
        dates,
        assets.into_iter().zip(columns).collect(),
    )?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use vantage_core::CoreError;

    fn parse(text: &str) -> CliResult<PriceTable> {
        read_prices(text.as_bytes(), Path::new("prices.csv"))
    }

    #[test]
    fn test_reads_wide_table() {
        let table = parse(
            "Date, A, B\n\
             2024-01-02, 100.0, 50.0\n\
             2024-01-03, 101.0, 50.5\n\
             2024-01-04, 102.0, 51.0\n",
        )
        .unwrap();

        assert_eq!(table.num_assets(), 2);
        assert_eq!(table.num_observations(), 3);
        assert_eq!(table.get("B").unwrap().prices(), &[50.0, 50.5, 51.0]);
        assert_eq!(table.dates()[2], Date::from_ymd(2024, 1, 4).unwrap());
    }

    #[test]
    fn test_missing_cell_names_line_and_asset() {
        let err = parse("date,A,B\n2024-01-02,100,50\n2024-01-03,101,\n").unwrap_err();
        match err {
            CliError::MissingValue { line, asset } => {
                assert_eq!(line, 3);
                assert_eq!(asset, "B");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_bad_values_rejected() {
        assert!(matches!(
            parse("date,A\n2024-01-02,abc\n"),
            Err(CliError::InvalidValue { .. })
        ));
        assert!(matches!(
            parse("date,A\n02/01/2024,100\n"),
            Err(CliError::InvalidValue { .. })
        ));
        assert!(matches!(
            parse("day,A\n2024-01-02,100\n"),
            Err(CliError::InvalidHeader { .. })
        ));
    }

    #[test]
    fn test_table_validation_applies() {
        let err = parse("date,A\n2024-01-02,100\n2024-01-02,101\n").unwrap_err();
        assert!(matches!(err, CliError::Data(CoreError::DuplicateDate { .. })));

        let err = parse("date,A\n2024-01-02,100\n2024-01-03,-1\n").unwrap_err();
        assert!(matches!(err, CliError::Data(CoreError::InvalidPrice { .. })));
    }
}
