//! Frame rendering (text tables and JSON lines)

use anyhow::Result;
use pass_tracker_core::{Classification, Countdown, PassRow, Timestamp};
use serde::Serialize;
use std::io::Write;

const COLUMNS: [&str; 5] = ["Date", "SD", "Code", "Start Time", "End Time"];
const COLUMN_WIDTH: usize = 12;

/// One tick's output in JSON form
#[derive(Debug, Serialize)]
pub struct TickReport {
    pub now: String,
    pub ongoing: Vec<PassRow>,
    pub upcoming: Vec<PassRow>,
    pub countdown: String,
}

impl TickReport {
    pub fn new(now: Timestamp, result: &Classification) -> Self {
        Self {
            now: now.format("%Y-%m-%dT%H:%M:%S").to_string(),
            ongoing: result.ongoing_rows(),
            upcoming: result.upcoming_rows(),
            countdown: result.countdown_at(now).to_string(),
        }
    }
}

/// Text for the countdown line
pub fn countdown_label(countdown: &Countdown) -> String {
    match countdown {
        Countdown::NoUpcoming => countdown.to_string(),
        _ => format!("Next Pass in: {}", countdown),
    }
}

/// Render one frame as text tables
///
/// `now` is the render instant; the countdown is recomputed against it.
pub fn render_text<W: Write>(out: &mut W, now: Timestamp, result: &Classification) -> Result<()> {
    writeln!(
        out,
        "{}    {}",
        now.format("%A, %d %B %Y"),
        now.format("%H:%M:%S")
    )?;
    writeln!(out)?;

    writeln!(out, "Ongoing Passes")?;
    write_table(out, &result.ongoing_rows())?;
    writeln!(out)?;

    writeln!(out, "Upcoming Passes")?;
    write_table(out, &result.upcoming_rows())?;
    writeln!(out)?;

    writeln!(out, "{}", countdown_label(&result.countdown_at(now)))?;
    Ok(())
}

/// Render one frame as a single JSON line
pub fn render_json<W: Write>(out: &mut W, now: Timestamp, result: &Classification) -> Result<()> {
    serde_json::to_writer(&mut *out, &TickReport::new(now, result))?;
    writeln!(out)?;
    Ok(())
}

fn write_table<W: Write>(out: &mut W, rows: &[PassRow]) -> Result<()> {
    let header: Vec<String> = COLUMNS
        .iter()
        .map(|c| format!("{:<width$}", c, width = COLUMN_WIDTH))
        .collect();
    writeln!(out, "  {}", header.join(" ").trim_end())?;

    if rows.is_empty() {
        writeln!(out, "  (none)")?;
        return Ok(());
    }

    for row in rows {
        let cells = [&row.date, &row.station, &row.code, &row.start, &row.end];
        let line: Vec<String> = cells
            .iter()
            .map(|c| format!("{:<width$}", c, width = COLUMN_WIDTH))
            .collect();
        writeln!(out, "  {}", line.join(" ").trim_end())?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pass_tracker_core::{classify, parse_lines};

    fn instant(value: &str) -> Timestamp {
        Timestamp::parse_from_str(value, "%Y-%m-%dT%H:%M:%S").unwrap()
    }

    fn sample() -> Vec<pass_tracker_core::PassRecord> {
        parse_lines([
            "2024 06 15 SD1 ALPHA 10:00:00 10:10:00",
            "2024 06 15 SD2 BRAVO 12:00:00 12:10:00",
        ])
    }

    #[test]
    fn test_text_frame() {
        let now = instant("2024-06-15T10:05:00");
        let result = classify(&sample(), now);

        let mut out = Vec::new();
        render_text(&mut out, now, &result).unwrap();
        let text = String::from_utf8(out).unwrap();

        assert!(text.starts_with("Saturday, 15 June 2024    10:05:00\n"));
        assert!(text.contains("Ongoing Passes\n  Date"));
        assert!(text.contains("15-06-2024   SD1          ALPHA        10:00:00     10:10:00\n"));
        assert!(text.contains("BRAVO"));
        assert!(text.ends_with("Next Pass in: 01:55:00\n"));
    }

    #[test]
    fn test_empty_tables() {
        let now = instant("2024-06-15T13:00:00");
        let result = classify(&sample(), now);

        let mut out = Vec::new();
        render_text(&mut out, now, &result).unwrap();
        let text = String::from_utf8(out).unwrap();

        assert_eq!(text.matches("(none)").count(), 2);
        assert!(text.ends_with("No Upcoming Passes\n"));
    }

    #[test]
    fn test_countdown_uses_render_instant() {
        let result = classify(&sample(), instant("2024-06-15T11:59:59"));

        let mut out = Vec::new();
        render_text(&mut out, instant("2024-06-15T12:00:00"), &result).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.ends_with("Next Pass in: Starting Now!\n"));
    }

    #[test]
    fn test_json_frame() {
        let now = instant("2024-06-15T11:59:30");
        let result = classify(&sample(), now);

        let mut out = Vec::new();
        render_json(&mut out, now, &result).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&out).unwrap();

        assert_eq!(value["now"], "2024-06-15T11:59:30");
        assert_eq!(value["ongoing"].as_array().unwrap().len(), 0);
        assert_eq!(value["upcoming"][0]["code"], "BRAVO");
        assert_eq!(value["upcoming"][0]["date"], "15-06-2024");
        assert_eq!(value["countdown"], "00:00:30");
    }
}
