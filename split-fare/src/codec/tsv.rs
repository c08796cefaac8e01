//! Tab-separated encoding of a [`PriceMatrix`].

use std::fs::{self, File};
use std::io::{Read, Write};
use std::path::Path;

use chrono::NaiveDate;
use csv::{ReaderBuilder, StringRecord, Terminator, Trim, WriterBuilder};
use tracing::debug;

use crate::domain::{ClockTime, Fare, Stop, StopIndex};
use crate::matrix::{JourneyHeader, MatrixBuilder, MatrixError, PriceCell, PriceMatrix};

use super::CodecError;

const DATE_FORMAT: &str = "%d.%m.%Y";
const DIAGONAL: &str = "0";
const UNAVAILABLE: &str = "?";
/// Leading columns before the first cell: time and stop name.
const LEAD: usize = 2;

/// Decode a price matrix from interchange data.
///
/// The grid width is set by the stop-name row; every row must match it.
pub fn decode<R: Read>(reader: R) -> Result<PriceMatrix, CodecError> {
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .delimiter(b'\t')
        .flexible(true)
        .trim(Trim::All)
        .from_reader(reader);

    let rows = reader
        .records()
        .collect::<Result<Vec<StringRecord>, csv::Error>>()?;

    let header_row = rows.first().ok_or(CodecError::MissingRow { row: 1 })?;
    let names_row = rows.get(1).ok_or(CodecError::MissingRow { row: 2 })?;

    let width = names_row.len();
    let stop_count = width.saturating_sub(LEAD);
    if stop_count < 2 {
        return Err(MatrixError::TooFewStops { found: stop_count }.into());
    }
    check_width(header_row, 1, width)?;

    let names = names_row
        .iter()
        .skip(LEAD)
        .enumerate()
        .map(|(i, name)| {
            if name.is_empty() {
                Err(CodecError::EmptyStopName {
                    column: LEAD + i + 1,
                })
            } else {
                Ok(name.to_string())
            }
        })
        .collect::<Result<Vec<_>, _>>()?;

    let header = parse_header(header_row)?;

    let expected_rows = LEAD + stop_count;
    if rows.len() > expected_rows {
        return Err(CodecError::ExtraRows {
            expected: expected_rows,
            found: rows.len(),
        });
    }

    let mut stops = Vec::with_capacity(stop_count);
    for (i, name) in names.iter().enumerate() {
        let row_number = LEAD + i + 1;
        let row = rows
            .get(LEAD + i)
            .ok_or(CodecError::MissingRow { row: row_number })?;
        check_width(row, row_number, width)?;

        let found = &row[1];
        if found != name {
            return Err(CodecError::StopNameMismatch {
                row: row_number,
                expected: name.clone(),
                found: found.to_string(),
            });
        }

        let arrival = parse_time(&header_row[LEAD + i], 1, LEAD + i + 1)?;
        let departure = parse_time(&row[0], row_number, 1)?;
        stops.push(Stop::new(name.clone(), arrival, departure));
    }

    let mut builder = MatrixBuilder::new(header, stops)?;
    for i in 0..stop_count {
        let row_number = LEAD + i + 1;
        let row = &rows[LEAD + i];
        for j in 0..stop_count {
            let token = &row[LEAD + j];
            let column = LEAD + j + 1;
            if j < i {
                if !token.is_empty() {
                    return Err(CodecError::UnexpectedCell {
                        row: row_number,
                        column,
                        token: token.to_string(),
                    });
                }
            } else if j == i {
                if token != DIAGONAL {
                    return Err(CodecError::InvalidDiagonal {
                        row: row_number,
                        column,
                        token: token.to_string(),
                    });
                }
            } else {
                let cell = parse_cell(token, row_number, column)?;
                builder.record(StopIndex(i), StopIndex(j), cell)?;
            }
        }
    }

    let matrix = builder.finish()?;
    debug!(
        stops = matrix.stop_count(),
        segments = matrix.segment_count(),
        priced = matrix.priced_count(),
        "Decoded price matrix"
    );
    Ok(matrix)
}

/// Encode a price matrix as interchange data.
///
/// Encoding a decoded file reproduces it byte for byte, provided it was
/// written by this function.
pub fn encode<W: Write>(matrix: &PriceMatrix, writer: W) -> Result<(), CodecError> {
    let mut writer = WriterBuilder::new()
        .delimiter(b'\t')
        .terminator(Terminator::CRLF)
        .from_writer(writer);

    let header = matrix.header();
    let stops = matrix.stops();

    let mut first = vec![
        header.date.format(DATE_FORMAT).to_string(),
        header.run_label.clone(),
    ];
    first.extend(stops.iter().map(|s| s.arrival.to_string()));
    writer.write_record(&first)?;

    let mut names = vec![String::new(), String::new()];
    names.extend(stops.iter().map(|s| s.name.clone()));
    writer.write_record(&names)?;

    for (i, stop) in stops.iter().enumerate() {
        let mut row = Vec::with_capacity(LEAD + stops.len());
        row.push(stop.departure.to_string());
        row.push(stop.name.clone());
        for j in 0..stops.len() {
            let token = if j < i {
                String::new()
            } else if j == i {
                DIAGONAL.to_string()
            } else {
                match matrix.cell(StopIndex(i), StopIndex(j)) {
                    Some(PriceCell::Fare(fare)) => fare.to_string(),
                    _ => UNAVAILABLE.to_string(),
                }
            };
            row.push(token);
        }
        writer.write_record(&row)?;
    }

    writer.flush()?;
    Ok(())
}

/// Read and decode an interchange file.
pub fn read_file(path: impl AsRef<Path>) -> Result<PriceMatrix, CodecError> {
    let file = File::open(path.as_ref())?;
    decode(file)
}

/// Encode `matrix` into a file, creating missing parent directories.
pub fn write_file(path: impl AsRef<Path>, matrix: &PriceMatrix) -> Result<(), CodecError> {
    let path = path.as_ref();
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    let file = File::create(path)?;
    encode(matrix, file)?;
    debug!(path = %path.display(), "Wrote price matrix");
    Ok(())
}

fn check_width(row: &StringRecord, row_number: usize, expected: usize) -> Result<(), CodecError> {
    if row.len() != expected {
        return Err(CodecError::ColumnCount {
            row: row_number,
            expected,
            found: row.len(),
        });
    }
    Ok(())
}

fn parse_header(row: &StringRecord) -> Result<JourneyHeader, CodecError> {
    let token = &row[0];
    let date = NaiveDate::parse_from_str(token, DATE_FORMAT).map_err(|_| {
        CodecError::InvalidDate {
            token: token.to_string(),
        }
    })?;
    Ok(JourneyHeader::new(date, &row[1]))
}

fn parse_time(token: &str, row: usize, column: usize) -> Result<ClockTime, CodecError> {
    ClockTime::parse_hhmm(token).map_err(|source| CodecError::InvalidTime {
        row,
        column,
        source,
    })
}

fn parse_cell(token: &str, row: usize, column: usize) -> Result<PriceCell, CodecError> {
    match token {
        // Older files may carry 0 for an unpriced segment
        UNAVAILABLE | DIAGONAL => Ok(PriceCell::Unavailable),
        "" => Err(CodecError::EmptyFare { row, column }),
        _ => Fare::parse(token)
            .map(PriceCell::Fare)
            .map_err(|source| CodecError::BadFare {
                row,
                column,
                token: token.to_string(),
                source,
            }),
    }
}
