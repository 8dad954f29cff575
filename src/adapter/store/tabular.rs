//! CSV-backed destination store.
//!
//! The file keeps whatever column order it was created with. Columns the
//! crate does not recognise are carried through untouched, and any missing
//! standard columns are appended at the end on the next save. Writes go to
//! a sibling temp file that is renamed over the original.

use std::fs::{self, File};
use std::io;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use chrono::NaiveDate;
use csv::{ReaderBuilder, StringRecord, WriterBuilder};
use rust_decimal::prelude::FromPrimitive;
use rust_decimal::Decimal;
use tracing::info;

use crate::domain::error::DomainError;
use crate::domain::{DealRecord, Destination, DestinationTable, IataCode, DEFAULT_COLUMNS};
use crate::error::StoreError;
use crate::port::DestinationStore;

const DATE_FORMAT: &str = "%Y-%m-%d";

/// What a header refers to.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Column {
    City,
    Iata,
    LowestPrice,
    Origin,
    DepartureDate,
    ReturnDate,
    TripDays,
    Airline,
    FlightNumber,
    Stopovers,
    Extra(String),
}

impl Column {
    /// Match headers case-insensitively, ignoring `_` and spaces, so both
    /// `lowest_price` and `lowestPrice` resolve.
    fn classify(header: &str) -> Self {
        let key: String = header
            .chars()
            .filter(|c| *c != '_' && !c.is_whitespace())
            .collect::<String>()
            .to_ascii_lowercase();

        match key.as_str() {
            "city" => Self::City,
            "iatacode" | "iata" => Self::Iata,
            "lowestprice" | "price" => Self::LowestPrice,
            "origin" | "departurecity" => Self::Origin,
            "departuredate" => Self::DepartureDate,
            "returndate" => Self::ReturnDate,
            "tripdays" | "tripduration" => Self::TripDays,
            "airline" => Self::Airline,
            "flightnumber" | "flightcodeoutbound" => Self::FlightNumber,
            "stopovers" | "stopoversoutbound" => Self::Stopovers,
            _ => Self::Extra(header.to_string()),
        }
    }
}

/// Destination table stored as a CSV file with a header row.
pub struct CsvDestinationStore {
    path: PathBuf,
    seed_defaults: bool,
}

impl CsvDestinationStore {
    /// `seed_defaults` controls whether a missing file is created with the
    /// default destinations or reported as an error.
    pub fn new(path: impl Into<PathBuf>, seed_defaults: bool) -> Self {
        Self {
            path: path.into(),
            seed_defaults,
        }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_error(&self, source: io::Error) -> StoreError {
        StoreError::Read {
            path: self.path.display().to_string(),
            source,
        }
    }

    fn write_error(&self, source: io::Error) -> StoreError {
        StoreError::Write {
            path: self.path.display().to_string(),
            source,
        }
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }

    fn read_table(&self, file: File) -> Result<DestinationTable, StoreError> {
        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .trim(csv::Trim::Headers)
            .from_reader(file);

        let mut columns: Vec<String> = reader.headers()?.iter().map(str::to_string).collect();
        let kinds: Vec<Column> = columns.iter().map(|h| Column::classify(h)).collect();

        if !kinds.contains(&Column::City) {
            return Err(StoreError::MissingColumn { column: "city" });
        }
        if !kinds.contains(&Column::Iata) {
            return Err(StoreError::MissingColumn { column: "iata_code" });
        }

        for standard in DEFAULT_COLUMNS {
            let kind = Column::classify(standard);
            if !kinds.contains(&kind) {
                columns.push(standard.to_string());
            }
        }

        let mut rows = Vec::new();
        for (index, record) in reader.records().enumerate() {
            let record = record?;
            // Line 1 is the header.
            let line = index + 2;
            if record.iter().all(|cell| cell.trim().is_empty()) {
                continue;
            }
            rows.push(parse_row(&kinds, &record, line)?);
        }

        DestinationTable::from_parts(columns, rows).map_err(|err| match err {
            DomainError::DuplicateDestination { code } => StoreError::DuplicateIata { code },
            other => StoreError::InvalidRow {
                row: 0,
                reason: other.to_string(),
            },
        })
    }

    fn write_table(&self, table: &DestinationTable, target: &Path) -> Result<(), StoreError> {
        let file = File::create(target).map_err(|e| self.write_error(e))?;
        let mut writer = WriterBuilder::new().from_writer(file);

        writer.write_record(table.columns())?;
        let kinds: Vec<Column> = table.columns().iter().map(|h| Column::classify(h)).collect();
        for row in table.rows() {
            writer.write_record(
                kinds
                    .iter()
                    .enumerate()
                    .map(|(position, kind)| cell(row, position, kind)),
            )?;
        }
        writer.flush().map_err(|e| self.write_error(e))?;
        Ok(())
    }
}

impl DestinationStore for CsvDestinationStore {
    fn load(&self) -> Result<DestinationTable, StoreError> {
        match File::open(&self.path) {
            Ok(file) => self.read_table(file),
            Err(err) if err.kind() == io::ErrorKind::NotFound && self.seed_defaults => {
                let table = DestinationTable::with_defaults().map_err(|e| StoreError::InvalidRow {
                    row: 0,
                    reason: e.to_string(),
                })?;
                self.save(&table)?;
                info!(
                    path = %self.path.display(),
                    destinations = table.len(),
                    "Seeded destination store with defaults"
                );
                Ok(table)
            }
            Err(err) => Err(self.read_error(err)),
        }
    }

    fn save(&self, table: &DestinationTable) -> Result<(), StoreError> {
        let temp = self.temp_path();
        if let Err(err) = self.write_table(table, &temp) {
            let _ = fs::remove_file(&temp);
            return Err(err);
        }
        fs::rename(&temp, &self.path).map_err(|e| {
            let _ = fs::remove_file(&temp);
            self.write_error(e)
        })
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

fn parse_row(kinds: &[Column], record: &StringRecord, line: usize) -> Result<Destination, StoreError> {
    let invalid = |reason: String| StoreError::InvalidRow { row: line, reason };

    let mut city = None;
    let mut iata = None;
    let mut price = None;
    let mut origin = None;
    let mut departure = None;
    let mut return_date = None;
    let mut trip_days = None;
    let mut airline = None;
    let mut flight_number = None;
    let mut stopovers = None;
    let mut extra = std::collections::BTreeMap::new();

    let cells = record.iter().chain(std::iter::repeat(""));
    for (position, (kind, raw)) in kinds.iter().zip(cells).enumerate() {
        let value = raw.trim();
        match kind {
            Column::Extra(_) => {
                extra.insert(position, raw.to_string());
                continue;
            }
            _ if value.is_empty() => continue,
            Column::City => city = Some(value.to_string()),
            Column::Iata => iata = Some(IataCode::parse(value).map_err(|e| invalid(e.to_string()))?),
            Column::LowestPrice => price = parse_price(value).map_err(invalid)?,
            Column::Origin => {
                origin = Some(IataCode::parse(value).map_err(|e| invalid(e.to_string()))?);
            }
            Column::DepartureDate => departure = Some(parse_date(value).map_err(invalid)?),
            Column::ReturnDate => return_date = Some(parse_date(value).map_err(invalid)?),
            Column::TripDays => trip_days = Some(parse_count(value).map_err(invalid)?),
            Column::Airline => airline = Some(value.to_string()),
            Column::FlightNumber => flight_number = Some(value.to_string()),
            Column::Stopovers => stopovers = Some(parse_count(value).map_err(invalid)?),
        }
    }

    let city = city.ok_or_else(|| invalid("missing city".into()))?;
    let iata = iata.ok_or_else(|| invalid("missing IATA code".into()))?;

    let last_deal = match (origin, departure, return_date) {
        (Some(origin), Some(departure_date), Some(return_date)) => Some(DealRecord {
            origin,
            departure_date,
            return_date,
            trip_days: trip_days.unwrap_or_else(|| {
                u32::try_from((return_date - departure_date).num_days()).unwrap_or(0)
            }),
            airline,
            flight_number,
            stopovers,
        }),
        _ => None,
    };

    let mut destination = Destination::new(city, iata)
        .with_price(price)
        .with_last_deal(last_deal);
    destination.extra = extra;
    Ok(destination)
}

/// Empty, `inf` and `nan` mean no price has been found yet.
fn parse_price(value: &str) -> Result<Option<Decimal>, String> {
    let lower = value.to_ascii_lowercase();
    if matches!(lower.as_str(), "inf" | "+inf" | "infinity" | "nan") {
        return Ok(None);
    }
    Decimal::from_str(value)
        .ok()
        .or_else(|| value.parse::<f64>().ok().and_then(Decimal::from_f64))
        .map(Some)
        .ok_or_else(|| format!("invalid price '{value}'"))
}

fn parse_date(value: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(value, DATE_FORMAT).map_err(|_| format!("invalid date '{value}'"))
}

fn parse_count(value: &str) -> Result<u32, String> {
    // Spreadsheet exports write whole numbers as `7.0`.
    value
        .parse::<u32>()
        .ok()
        .or_else(|| {
            value
                .parse::<f64>()
                .ok()
                .filter(|v| v.fract() == 0.0 && *v >= 0.0 && *v <= f64::from(u32::MAX))
                .map(|v| v as u32)
        })
        .ok_or_else(|| format!("invalid count '{value}'"))
}

fn cell(row: &Destination, position: usize, kind: &Column) -> String {
    let deal = row.last_deal();
    match kind {
        Column::City => row.city().to_string(),
        Column::Iata => row.iata().to_string(),
        Column::LowestPrice => row
            .lowest_price()
            .map(|p| p.normalize().to_string())
            .unwrap_or_default(),
        Column::Origin => deal.map(|d| d.origin.to_string()).unwrap_or_default(),
        Column::DepartureDate => deal
            .map(|d| d.departure_date.format(DATE_FORMAT).to_string())
            .unwrap_or_default(),
        Column::ReturnDate => deal
            .map(|d| d.return_date.format(DATE_FORMAT).to_string())
            .unwrap_or_default(),
        Column::TripDays => deal.map(|d| d.trip_days.to_string()).unwrap_or_default(),
        Column::Airline => deal.and_then(|d| d.airline.clone()).unwrap_or_default(),
        Column::FlightNumber => deal.and_then(|d| d.flight_number.clone()).unwrap_or_default(),
        Column::Stopovers => deal
            .and_then(|d| d.stopovers)
            .map(|s| s.to_string())
            .unwrap_or_default(),
        Column::Extra(_) => row.extra.get(&position).cloned().unwrap_or_default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use tempfile::TempDir;

    fn store_with(contents: &str) -> (TempDir, CsvDestinationStore) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("destinations.csv");
        fs::write(&path, contents).unwrap();
        let store = CsvDestinationStore::new(path, false);
        (dir, store)
    }

    #[test]
    fn classify_accepts_snake_and_camel_case() {
        assert_eq!(Column::classify("lowestPrice"), Column::LowestPrice);
        assert_eq!(Column::classify("lowest_price"), Column::LowestPrice);
        assert_eq!(Column::classify(" IATA Code "), Column::Iata);
        assert_eq!(
            Column::classify("notes"),
            Column::Extra("notes".to_string())
        );
    }

    #[test]
    fn load_reads_prices_and_treats_zero_and_inf_as_unset() {
        let (_dir, store) = store_with(
            "city,iataCode,lowestPrice\nLondon,LON,100\nParis,PAR,0\nTokyo,TOK,inf\nRome,FCO,\n",
        );

        let table = store.load().unwrap();
        let prices: Vec<_> = table.rows().iter().map(|d| d.lowest_price()).collect();
        assert_eq!(prices, vec![Some(dec!(100)), None, None, None]);
    }

    #[test]
    fn save_preserves_column_order_and_unknown_columns() {
        let (_dir, store) = store_with("notes,iata_code,city,lowest_price\nwindow seat,LON,London,100\n");

        let table = store.load().unwrap();
        assert_eq!(table.rows()[0].extra.get(&0).map(String::as_str), Some("window seat"));
        store.save(&table).unwrap();

        let written = fs::read_to_string(store.path()).unwrap();
        let mut lines = written.lines();
        let header = lines.next().unwrap();
        assert!(header.starts_with("notes,iata_code,city,lowest_price,origin,"));
        assert!(lines.next().unwrap().starts_with("window seat,LON,London,100,"));
        assert!(!store.temp_path().exists());
    }

    #[test]
    fn repeated_headers_keep_their_own_cells() {
        let (_dir, store) = store_with(
            "city,iata_code,lowest_price,note,note,\nLondon,LON,100,aisle,window,late\n",
        );

        let table = store.load().unwrap();
        store.save(&table).unwrap();

        let written = fs::read_to_string(store.path()).unwrap();
        let mut lines = written.lines();
        assert!(lines
            .next()
            .unwrap()
            .starts_with("city,iata_code,lowest_price,note,note,,origin,"));
        assert!(lines
            .next()
            .unwrap()
            .starts_with("London,LON,100,aisle,window,late,,"));
        assert_eq!(store.load().unwrap(), table);
    }

    #[test]
    fn deal_columns_round_trip() {
        let (_dir, store) = store_with(
            "city,iata_code,lowest_price,origin,departure_date,return_date,trip_days,airline,flight_number,stopovers\n\
             London,LON,95,ASU,2027-03-20,2027-03-27,7.0,LATAM,LA 1234,1\n",
        );

        let table = store.load().unwrap();
        let deal = table.rows()[0].last_deal().unwrap();
        assert_eq!(deal.trip_days, 7);
        assert_eq!(deal.stopovers, Some(1));

        store.save(&table).unwrap();
        let reloaded = store.load().unwrap();
        assert_eq!(reloaded, table);
    }

    #[test]
    fn missing_required_column_is_an_error() {
        let (_dir, store) = store_with("city,lowest_price\nLondon,100\n");
        assert!(matches!(
            store.load(),
            Err(StoreError::MissingColumn { column: "iata_code" })
        ));
    }

    #[test]
    fn invalid_rows_report_their_line() {
        let (_dir, store) = store_with("city,iata_code,lowest_price\nLondon,LON,100\nParis,PARIS,50\n");
        match store.load() {
            Err(StoreError::InvalidRow { row, .. }) => assert_eq!(row, 3),
            other => panic!("expected invalid row, got {other:?}"),
        }
    }

    #[test]
    fn duplicate_codes_are_rejected() {
        let (_dir, store) = store_with("city,iata_code\nLondon,LON\nLondon City,lon\n");
        assert!(matches!(
            store.load(),
            Err(StoreError::DuplicateIata { code }) if code == "LON"
        ));
    }

    #[test]
    fn missing_file_is_seeded_only_when_enabled() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("destinations.csv");

        let strict = CsvDestinationStore::new(&path, false);
        assert!(matches!(strict.load(), Err(StoreError::Read { .. })));

        let seeding = CsvDestinationStore::new(&path, true);
        let table = seeding.load().unwrap();
        assert_eq!(table.len(), 20);
        assert!(path.exists());
    }

    #[test]
    fn save_into_missing_directory_fails_with_write_error() {
        let dir = tempfile::tempdir().unwrap();
        let store = CsvDestinationStore::new(dir.path().join("nope").join("d.csv"), false);
        assert!(matches!(
            store.save(&DestinationTable::new()),
            Err(StoreError::Write { .. })
        ));
    }
}
