//! Text scenario parsing.
//!
//! A scenario describes the initial world and the scripted request stream:
//! the first line is the hotel count, the next N lines the initial guest
//! count per hotel, and every remaining line one transfer record of five
//! whitespace-separated integers: origin, destination, passengers, minimum
//! travel time, maximum travel time.
//!
//! Malformed input is rejected here, before anything reaches the pool; the
//! core assumes well-formed requests.

use std::io::Read;
use std::num::ParseIntError;
use std::str::FromStr;

use thiserror::Error;

use crate::core::request::RequestSpec;

/// Fields per transfer record.
const RECORD_FIELDS: usize = 5;

/// A parsed scenario: initial occupancy plus the scripted request stream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Scenario {
    /// Initial guest count per hotel, indexed by hotel id.
    pub occupancy: Vec<u32>,
    /// Transfer records in script order.
    pub requests: Vec<RequestSpec>,
}

/// Errors produced while parsing a scenario.
#[derive(Debug, Error)]
pub enum ScenarioError {
    /// The input ended before a required section.
    #[error("unexpected end of input while reading {0}")]
    UnexpectedEof(&'static str),
    /// A record had the wrong number of fields.
    #[error("line {line}: expected {expected} fields, found {found}")]
    FieldCount {
        /// 1-based input line.
        line: usize,
        /// Fields required.
        expected: usize,
        /// Fields present.
        found: usize,
    },
    /// A field was not a non-negative integer.
    #[error("line {line}: invalid integer `{value}`: {source}")]
    InvalidNumber {
        /// 1-based input line.
        line: usize,
        /// Offending text.
        value: String,
        /// Underlying parse failure.
        source: ParseIntError,
    },
    /// A record referenced a hotel the header did not declare.
    #[error("line {line}: hotel {hotel} out of range, scenario declares {count} hotels")]
    UnknownHotel {
        /// 1-based input line.
        line: usize,
        /// Offending hotel id.
        hotel: usize,
        /// Declared hotel count.
        count: usize,
    },
    /// A record's travel range had `max < min`.
    #[error("line {line}: travel range {min}..{max} is inverted")]
    InvertedTravelRange {
        /// 1-based input line.
        line: usize,
        /// Minimum travel time.
        min: u64,
        /// Maximum travel time.
        max: u64,
    },
    /// Reading the underlying stream failed.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Parse a scenario from a string.
///
/// Blank lines are ignored; everything else must parse.
///
/// # Errors
///
/// Returns the first [`ScenarioError`] encountered.
pub fn parse_str(input: &str) -> Result<Scenario, ScenarioError> {
    let mut lines = input
        .lines()
        .enumerate()
        .map(|(idx, raw)| (idx + 1, raw.trim()))
        .filter(|(_, text)| !text.is_empty());

    let (line, text) = lines
        .next()
        .ok_or(ScenarioError::UnexpectedEof("hotel count"))?;
    let hotel_count: usize = parse_field(line, text)?;

    let mut occupancy = Vec::with_capacity(hotel_count);
    for _ in 0..hotel_count {
        let (line, text) = lines
            .next()
            .ok_or(ScenarioError::UnexpectedEof("initial occupancy"))?;
        occupancy.push(parse_field(line, text)?);
    }

    let mut requests = Vec::new();
    for (line, text) in lines {
        requests.push(parse_record(line, text, hotel_count)?);
    }

    Ok(Scenario {
        occupancy,
        requests,
    })
}

/// Parse a scenario from a reader.
///
/// # Errors
///
/// Returns the first [`ScenarioError`] encountered, including I/O failures.
pub fn from_reader<R: Read>(mut reader: R) -> Result<Scenario, ScenarioError> {
    let mut input = String::new();
    reader.read_to_string(&mut input)?;
    parse_str(&input)
}

fn parse_field<T>(line: usize, raw: &str) -> Result<T, ScenarioError>
where
    T: FromStr<Err = ParseIntError>,
{
    raw.parse().map_err(|source| ScenarioError::InvalidNumber {
        line,
        value: raw.to_owned(),
        source,
    })
}

fn parse_record(line: usize, text: &str, hotel_count: usize) -> Result<RequestSpec, ScenarioError> {
    let fields: Vec<&str> = text.split_whitespace().collect();
    if fields.len() != RECORD_FIELDS {
        return Err(ScenarioError::FieldCount {
            line,
            expected: RECORD_FIELDS,
            found: fields.len(),
        });
    }

    let origin: usize = parse_field(line, fields[0])?;
    let destination: usize = parse_field(line, fields[1])?;
    let passengers: u32 = parse_field(line, fields[2])?;
    let min_travel_ms: u64 = parse_field(line, fields[3])?;
    let max_travel_ms: u64 = parse_field(line, fields[4])?;

    for hotel in [origin, destination] {
        if hotel >= hotel_count {
            return Err(ScenarioError::UnknownHotel {
                line,
                hotel,
                count: hotel_count,
            });
        }
    }
    if max_travel_ms < min_travel_ms {
        return Err(ScenarioError::InvertedTravelRange {
            line,
            min: min_travel_ms,
            max: max_travel_ms,
        });
    }

    Ok(RequestSpec {
        origin,
        destination,
        passengers,
        min_travel_ms,
        max_travel_ms,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const VALID: &str = "\
2
5
0
0 1 5 10 20
1 0 2 0 0
";

    #[test]
    fn test_parses_valid_scenario() {
        let scenario = parse_str(VALID).unwrap();
        assert_eq!(scenario.occupancy, vec![5, 0]);
        assert_eq!(scenario.requests.len(), 2);
        assert_eq!(
            scenario.requests[0],
            RequestSpec {
                origin: 0,
                destination: 1,
                passengers: 5,
                min_travel_ms: 10,
                max_travel_ms: 20,
            }
        );
    }

    #[test]
    fn test_blank_lines_are_ignored() {
        let scenario = parse_str("1\n\n3\n\n0 0 1 1 2\n\n").unwrap();
        assert_eq!(scenario.occupancy, vec![3]);
        assert_eq!(scenario.requests.len(), 1);
    }

    #[test]
    fn test_scenario_without_requests() {
        let scenario = parse_str("1\n4\n").unwrap();
        assert_eq!(scenario.occupancy, vec![4]);
        assert!(scenario.requests.is_empty());
    }

    #[test]
    fn test_missing_occupancy_line() {
        let err = parse_str("3\n1\n2\n").unwrap_err();
        assert!(matches!(err, ScenarioError::UnexpectedEof(_)));
    }

    #[test]
    fn test_non_numeric_field() {
        let err = parse_str("1\n5\n0 0 x 1 2\n").unwrap_err();
        assert!(matches!(err, ScenarioError::InvalidNumber { line: 3, .. }));
    }

    #[test]
    fn test_wrong_field_count() {
        let err = parse_str("1\n5\n0 0 1\n").unwrap_err();
        assert!(matches!(
            err,
            ScenarioError::FieldCount {
                expected: 5,
                found: 3,
                ..
            }
        ));
    }

    #[test]
    fn test_hotel_out_of_range() {
        let err = parse_str("2\n5\n5\n0 2 1 1 2\n").unwrap_err();
        assert!(matches!(
            err,
            ScenarioError::UnknownHotel {
                hotel: 2,
                count: 2,
                ..
            }
        ));
    }

    #[test]
    fn test_inverted_travel_range() {
        let err = parse_str("1\n5\n0 0 1 9 4\n").unwrap_err();
        assert!(matches!(
            err,
            ScenarioError::InvertedTravelRange { min: 9, max: 4, .. }
        ));
    }

    #[test]
    fn test_from_reader_matches_parse_str() {
        let scenario = from_reader(VALID.as_bytes()).unwrap();
        assert_eq!(scenario, parse_str(VALID).unwrap());
    }
}
