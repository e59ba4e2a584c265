//! Record source parser
//!
//! Turns the lines of a pass schedule into [`PassRecord`]s. Each line looks like
//!
//! ```text
//! <year> <month> <day> <station> <code> <HH:MM:SS> <HH:MM:SS> [ignored...]
//! ```
//!
//! Lines that cannot be turned into a complete record are dropped. Nothing about a
//! dropped line reaches the caller of [`parse_lines`] or [`read_source`]; callers that
//! want to inspect the drops use [`parse_lines_with_report`] or [`load_source`].

use crate::types::{PassRecord, RecordError, Result, TrackerError};
use chrono::{NaiveDate, NaiveTime};
use std::path::Path;

/// Minimum number of whitespace-separated fields in a record line
pub const MIN_FIELDS: usize = 7;

/// Minimum length of a `HH:MM:SS` time token
const TIME_TOKEN_LEN: usize = 8;

/// Outcome of parsing a whole source, including the lines that were dropped
#[derive(Debug, Default)]
pub struct ParseReport {
    /// Accepted records, in source order
    pub records: Vec<PassRecord>,
    /// Rejected lines as (1-based line number, reason)
    pub discarded: Vec<(usize, RecordError)>,
}

impl ParseReport {
    /// Number of lines that were dropped
    pub fn discarded_count(&self) -> usize {
        self.discarded.len()
    }

    fn push(&mut self, line: usize, outcome: std::result::Result<PassRecord, RecordError>) {
        match outcome {
            Ok(record) => self.records.push(record),
            Err(e) => {
                log::trace!("Skipping line {}: {}", line, e);
                self.discarded.push((line, e));
            }
        }
    }

    /// Reasons converted to tracker errors, for reporting
    pub fn errors(&self) -> impl Iterator<Item = TrackerError> + '_ {
        self.discarded.iter().map(|(line, err)| TrackerError::Record {
            line: *line,
            source: err.clone(),
        })
    }
}

/// Parse a single line into a record
pub fn parse_line(line: &str) -> std::result::Result<PassRecord, RecordError> {
    let fields: Vec<&str> = line.split_whitespace().collect();
    if fields.len() < MIN_FIELDS {
        return Err(RecordError::TooFewFields {
            found: fields.len(),
        });
    }

    let (year_token, month_token, day_token) = (fields[0], fields[1], fields[2]);
    let (station, code) = (fields[3], fields[4]);
    let (start_token, end_token) = (fields[5], fields[6]);

    let year: i32 = parse_number("year", year_token)?;
    let month: u32 = parse_number("month", month_token)?;
    let day: u32 = parse_number("day", day_token)?;

    // chrono accepts a wider year range than a calendar date on the wall clock
    let date = if (1..=9999).contains(&year) {
        NaiveDate::from_ymd_opt(year, month, day)
    } else {
        None
    }
    .ok_or(RecordError::InvalidDate { year, month, day })?;

    let start = date.and_time(parse_time_token(start_token)?);
    let end = date.and_time(parse_time_token(end_token)?);

    if start > end {
        return Err(RecordError::InvertedWindow {
            start: start_token.to_string(),
            end: end_token.to_string(),
        });
    }

    Ok(PassRecord {
        year,
        month,
        day,
        station: station.to_string(),
        code: code.to_string(),
        start,
        end,
        start_token: start_token.to_string(),
        end_token: end_token.to_string(),
        date_tokens: [
            year_token.to_string(),
            month_token.to_string(),
            day_token.to_string(),
        ],
    })
}

/// Parse every line, keeping only the valid records
pub fn parse_lines<I, S>(lines: I) -> Vec<PassRecord>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    parse_lines_with_report(lines).records
}

/// Parse every line, keeping both the valid records and the reasons for each drop
pub fn parse_lines_with_report<I, S>(lines: I) -> ParseReport
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut report = ParseReport::default();

    for (index, line) in lines.into_iter().enumerate() {
        report.push(index + 1, parse_line(line.as_ref()));
    }

    report
}

/// Parse raw source bytes line by line
///
/// Encoding is checked per line, so a stray non-UTF-8 byte only costs the line
/// it sits on.
pub fn parse_bytes(bytes: &[u8]) -> ParseReport {
    let mut report = ParseReport::default();
    if bytes.is_empty() {
        return report;
    }

    let body = bytes.strip_suffix(b"\n").unwrap_or(bytes);
    for (index, raw) in body.split(|&b| b == b'\n').enumerate() {
        let raw = raw.strip_suffix(b"\r").unwrap_or(raw);
        let outcome = std::str::from_utf8(raw)
            .map_err(|e| RecordError::InvalidEncoding {
                offset: e.valid_up_to(),
            })
            .and_then(parse_line);
        report.push(index + 1, outcome);
    }

    report
}

/// Read and parse a record source, surfacing I/O failures
pub fn load_source(path: &Path) -> Result<ParseReport> {
    let bytes = std::fs::read(path)?;
    let report = parse_bytes(&bytes);

    log::debug!(
        "Parsed {} passes from {:?} ({} lines skipped)",
        report.records.len(),
        path,
        report.discarded_count()
    );

    Ok(report)
}

/// Read and parse a record source
///
/// An absent or unreadable source is treated as an empty one.
pub fn read_source(path: &Path) -> Vec<PassRecord> {
    match load_source(path) {
        Ok(report) => report.records,
        Err(e) => {
            log::debug!("Record source {:?} unavailable: {}", path, e);
            Vec::new()
        }
    }
}

fn parse_number<T: std::str::FromStr>(
    field: &'static str,
    token: &str,
) -> std::result::Result<T, RecordError> {
    token.parse().map_err(|_| RecordError::InvalidNumber {
        field,
        value: token.to_string(),
    })
}

/// Read hour, minute and second from fixed offsets of a `HH:MM:SS` token.
///
/// The separator positions are not inspected.
fn parse_time_token(token: &str) -> std::result::Result<NaiveTime, RecordError> {
    let malformed = || RecordError::InvalidTimeToken {
        token: token.to_string(),
    };

    if token.len() < TIME_TOKEN_LEN {
        return Err(malformed());
    }

    let component = |range: std::ops::Range<usize>| -> std::result::Result<u32, RecordError> {
        token
            .get(range)
            .and_then(|digits| digits.parse().ok())
            .ok_or_else(&malformed)
    };

    let hour = component(0..2)?;
    let minute = component(3..5)?;
    let second = component(6..8)?;

    NaiveTime::from_hms_opt(hour, minute, second).ok_or_else(|| RecordError::InvalidTime {
        token: token.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const VALID: &str = "2024 06 15 SD1 ALPHA 10:00:00 10:10:00";

    #[test]
    fn test_parse_valid_line() {
        let record = parse_line(VALID).unwrap();
        assert_eq!(record.year, 2024);
        assert_eq!(record.month, 6);
        assert_eq!(record.day, 15);
        assert_eq!(record.station, "SD1");
        assert_eq!(record.code, "ALPHA");
        assert_eq!(record.start.to_string(), "2024-06-15 10:00:00");
        assert_eq!(record.end.to_string(), "2024-06-15 10:10:00");
        assert_eq!(record.formatted_date(), "15-06-2024");
    }

    #[test]
    fn test_extra_fields_are_ignored() {
        let record = parse_line("2024 06 15 SD1 ALPHA 10:00:00 10:10:00 EXTRA 42").unwrap();
        assert_eq!(record.end_token, "10:10:00");
    }

    #[test]
    fn test_too_few_fields() {
        assert_eq!(
            parse_line("2024 06 15"),
            Err(RecordError::TooFewFields { found: 3 })
        );
        assert_eq!(parse_line("   "), Err(RecordError::TooFewFields { found: 0 }));
    }

    #[test]
    fn test_non_numeric_date() {
        let err = parse_line("2024 June 15 SD1 ALPHA 10:00:00 10:10:00").unwrap_err();
        assert_eq!(
            err,
            RecordError::InvalidNumber {
                field: "month",
                value: "June".to_string()
            }
        );
    }

    #[test]
    fn test_impossible_date() {
        let err = parse_line("2023 02 29 SD1 ALPHA 10:00:00 10:10:00").unwrap_err();
        assert!(matches!(err, RecordError::InvalidDate { .. }));

        let err = parse_line("0 01 01 SD1 ALPHA 10:00:00 10:10:00").unwrap_err();
        assert!(matches!(err, RecordError::InvalidDate { .. }));
    }

    #[test]
    fn test_malformed_time_tokens() {
        for token in ["1:00:00", "10:00", "ab:00:00", "10:0x:00"] {
            let line = format!("2024 06 15 SD1 ALPHA {} 10:10:00", token);
            assert!(
                matches!(parse_line(&line), Err(RecordError::InvalidTimeToken { .. })),
                "token {:?} should be rejected",
                token
            );
        }
    }

    #[test]
    fn test_out_of_range_time() {
        let err = parse_line("2024 06 15 SD1 ALPHA 24:00:00 24:10:00").unwrap_err();
        assert!(matches!(err, RecordError::InvalidTime { .. }));

        let err = parse_line("2024 06 15 SD1 ALPHA 10:00:00 10:60:00").unwrap_err();
        assert!(matches!(err, RecordError::InvalidTime { .. }));
    }

    #[test]
    fn test_separator_is_not_inspected() {
        let record = parse_line("2024 06 15 SD1 ALPHA 10-00-00 10.10.00").unwrap();
        assert_eq!(record.start_token, "10-00-00");
        assert_eq!(record.end.to_string(), "2024-06-15 10:10:00");
    }

    #[test]
    fn test_inverted_window_is_rejected() {
        let err = parse_line("2024 06 15 SD1 ALPHA 23:55:00 00:05:00").unwrap_err();
        assert_eq!(
            err,
            RecordError::InvertedWindow {
                start: "23:55:00".to_string(),
                end: "00:05:00".to_string()
            }
        );
    }

    #[test]
    fn test_zero_length_window_is_accepted() {
        let record = parse_line("2024 06 15 SD1 ALPHA 10:00:00 10:00:00").unwrap();
        assert_eq!(record.start, record.end);
    }

    #[test]
    fn test_parse_lines_keeps_order_and_duplicates() {
        let lines = [
            "2024 06 15 SD2 BETA 12:00:00 12:10:00",
            "garbage",
            VALID,
            VALID,
        ];
        let records = parse_lines(lines);
        assert_eq!(records.len(), 3);
        assert_eq!(records[0].code, "BETA");
        assert_eq!(records[1], records[2]);
    }

    #[test]
    fn test_report_counts_discards() {
        let report = parse_lines_with_report([VALID, "2024 06 15", "", VALID]);
        assert_eq!(report.records.len(), 2);
        assert_eq!(report.discarded_count(), 2);
        assert_eq!(report.discarded[0].0, 2);
        assert_eq!(report.discarded[1].0, 3);

        let messages: Vec<String> = report.errors().map(|e| e.to_string()).collect();
        assert_eq!(messages[0], "Line 2: Expected at least 7 fields, found 3");
    }

    #[test]
    fn test_parse_bytes_line_endings() {
        let report = parse_bytes(b"2024 06 15 SD1 ALPHA 10:00:00 10:10:00\r\n\r\n2024 06 15 SD2 BETA 12:00:00 12:10:00");
        assert_eq!(report.records.len(), 2);
        assert_eq!(report.records[1].end_token, "12:10:00");
        assert_eq!(report.discarded, vec![(2, RecordError::TooFewFields { found: 0 })]);

        assert_eq!(parse_bytes(b"").discarded_count(), 0);
        assert_eq!(parse_bytes(format!("{}\n", VALID).as_bytes()).discarded_count(), 0);
    }

    #[test]
    fn test_parse_bytes_bad_encoding_drops_one_line() {
        let report = parse_bytes(b"2024 06 15 SD\xff2 BETA 12:00:00 12:10:00\n2024 06 15 SD1 ALPHA 10:00:00 10:10:00\n");
        assert_eq!(report.records.len(), 1);
        assert_eq!(report.records[0].code, "ALPHA");
        assert_eq!(
            report.discarded,
            vec![(1, RecordError::InvalidEncoding { offset: 13 })]
        );
    }

    #[test]
    fn test_read_missing_source_is_empty() {
        let records = read_source(Path::new("definitely/not/here/sd1.txt"));
        assert!(records.is_empty());
        assert!(load_source(Path::new("definitely/not/here/sd1.txt")).is_err());
    }
}
