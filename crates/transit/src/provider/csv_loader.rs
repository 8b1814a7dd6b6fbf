//! Loaders for the three comma-separated source tables.
//!
//! Columns are read by position. The first record is treated as a header when
//! it mentions the table's key column, and rows that are too short or carry
//! unparsable numbers are dropped so later stages only see complete records.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use csv::{ReaderBuilder, StringRecord, Trim};

use crate::identifiers::*;
use crate::models::types::*;

/// Positional layout of one source table
struct Table {
    name: &'static str,
    header_keyword: &'static str,
    min_columns: usize,
}

const ROUTES: Table = Table {
    name: "routes",
    header_keyword: "LINEID",
    min_columns: 4,
};

const STOPS: Table = Table {
    name: "stops",
    header_keyword: "STOPID",
    min_columns: 8,
};

const ROUTE_STOPS: Table = Table {
    name: "route stops",
    header_keyword: "LINESTOP",
    min_columns: 5,
};

pub fn load_routes(path: &Path) -> Result<Vec<Route>> {
    read_routes(open(path)?, path)
}

pub fn load_stops(path: &Path) -> Result<Vec<Stop>> {
    read_stops(open(path)?, path)
}

pub fn load_route_stops(path: &Path) -> Result<Vec<RouteStop>> {
    read_route_stops(open(path)?, path)
}

/// Read routes: id (0), short name (2), description (3)
pub fn read_routes<R: Read>(reader: R, source: &Path) -> Result<Vec<Route>> {
    read_table(reader, source, &ROUTES, |row| {
        Some(Route {
            id: row.get(0)?.parse().ok()?,
            short_name: row.get(2)?.to_string(),
            description: row.get(3)?.to_string(),
        })
    })
}

/// Read stops: id (0), short name (2), long name (3), longitude (6), latitude (7)
pub fn read_stops<R: Read>(reader: R, source: &Path) -> Result<Vec<Stop>> {
    read_table(reader, source, &STOPS, |row| {
        let id: StopId = row.get(0)?.parse().ok()?;
        let lon = parse_coordinate(row.get(6)?)?;
        let lat = parse_coordinate(row.get(7)?)?;
        Some(Stop::new(id, row.get(2)?, row.get(3)?, lat, lon))
    })
}

/// `NaN` and infinities parse as floats but cannot be projected
fn parse_coordinate(field: &str) -> Option<f64> {
    field.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Read memberships: sequence (1), orientation (2), route id (3), stop id (4)
pub fn read_route_stops<R: Read>(reader: R, source: &Path) -> Result<Vec<RouteStop>> {
    read_table(reader, source, &ROUTE_STOPS, |row| {
        let sequence: i32 = row.get(1)?.parse().ok()?;
        let orientation: i32 = row.get(2)?.parse().ok()?;
        let route_id: RouteId = row.get(3)?.parse().ok()?;
        let stop_id: StopId = row.get(4)?.parse().ok()?;
        Some(RouteStop::new(
            route_id,
            stop_id,
            sequence,
            Orientation::from_raw(orientation),
        ))
    })
}

fn open(path: &Path) -> Result<File> {
    File::open(path).map_err(|source| TransitError::Io {
        path: path.to_path_buf(),
        source,
    })
}

fn read_table<R, T, F>(reader: R, source: &Path, table: &Table, parse: F) -> Result<Vec<T>>
where
    R: Read,
    F: Fn(&StringRecord) -> Option<T>,
{
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(Trim::All)
        .from_reader(reader);

    let mut rows = Vec::new();
    let mut dropped = 0usize;
    let mut first = true;

    for record in reader.records() {
        let record = match record {
            Ok(record) => record,
            Err(err) if err.is_io_error() => {
                return Err(TransitError::Csv {
                    path: source.to_path_buf(),
                    source: err,
                });
            }
            Err(err) => {
                log::debug!("{}: dropping unreadable row: {}", table.name, err);
                dropped += 1;
                continue;
            }
        };

        if record.iter().all(str::is_empty) {
            continue;
        }

        if first {
            first = false;
            if is_header(&record, table.header_keyword) {
                continue;
            }
        }

        if record.len() < table.min_columns {
            dropped += 1;
            continue;
        }

        match parse(&record) {
            Some(row) => rows.push(row),
            None => dropped += 1,
        }
    }

    if dropped > 0 {
        log::debug!(
            "{}: dropped {} malformed rows from {}",
            table.name,
            dropped,
            source.display()
        );
    }

    Ok(rows)
}

fn is_header(record: &StringRecord, keyword: &str) -> bool {
    record
        .iter()
        .any(|field| field.to_uppercase().contains(keyword))
}
