//! Aligned plain-text table for raw trip rows.
//!
//! One column per source column the dataset provided, preceded by the row
//! number and followed by the derived `month`, `day` and `hour`. Widths are
//! measured in terminal cells so station names with wide characters stay
//! aligned.

use std::io::{self, Write};

use unicode_width::UnicodeWidthStr;

use bikeshare_core::models::{month_name, weekday_name, Column, TripRecord, TripTable};

/// Shown in place of an empty cell.
const NULL_CELL: &str = "-";
const COLUMN_GAP: &str = "  ";
const DERIVED_HEADERS: [&str; 3] = ["month", "day", "hour"];

/// Header labels for `table`: `#`, the present columns, then derived fields.
pub fn header_row(table: &TripTable) -> Vec<String> {
    let mut header = vec!["#".to_string()];
    header.extend(present_columns(table).map(|c| c.header().to_string()));
    header.extend(DERIVED_HEADERS.iter().map(|h| h.to_string()));
    header
}

/// Cell texts for one record, matching [`header_row`].
pub fn record_cells(table: &TripTable, record: &TripRecord) -> Vec<String> {
    let mut cells = vec![record.row.to_string()];
    cells.extend(present_columns(table).map(|c| column_cell(record, c)));

    let calendar = record.calendar();
    cells.push(month_name(calendar.month).unwrap_or(NULL_CELL).to_string());
    cells.push(weekday_name(calendar.weekday).unwrap_or(NULL_CELL).to_string());
    cells.push(calendar.hour.to_string());
    cells
}

/// Write the header and `records` as an aligned block.
pub fn render_rows<W: Write>(
    out: &mut W,
    table: &TripTable,
    records: &[TripRecord],
) -> io::Result<()> {
    let header = header_row(table);
    let body: Vec<Vec<String>> = records.iter().map(|r| record_cells(table, r)).collect();

    let mut widths: Vec<usize> = header.iter().map(|h| h.width()).collect();
    for row in &body {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.width());
        }
    }

    write_line(out, &header, &widths)?;
    let separator: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
    write_line(out, &separator, &widths)?;
    for row in &body {
        write_line(out, row, &widths)?;
    }
    Ok(())
}

fn present_columns(table: &TripTable) -> impl Iterator<Item = Column> + '_ {
    Column::ALL.into_iter().filter(|c| table.has_column(*c))
}

fn column_cell(record: &TripRecord, column: Column) -> String {
    let text = match column {
        Column::StartTime => Some(record.start_time().format("%Y-%m-%d %H:%M:%S").to_string()),
        Column::EndTime => record.end_time.clone(),
        Column::TripDuration => record.trip_duration.map(format_number),
        Column::StartStation => record.start_station.clone(),
        Column::EndStation => record.end_station.clone(),
        Column::UserType => record.user_type.clone(),
        Column::Gender => record.gender.clone(),
        Column::BirthYear => record.birth_year.map(|y| y.to_string()),
    };
    text.unwrap_or_else(|| NULL_CELL.to_string())
}

/// Whole numbers without a trailing `.0`.
fn format_number(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        value.to_string()
    }
}

fn write_line<W: Write>(out: &mut W, cells: &[String], widths: &[usize]) -> io::Result<()> {
    let mut line = String::new();
    for (i, (cell, width)) in cells.iter().zip(widths).enumerate() {
        if i > 0 {
            line.push_str(COLUMN_GAP);
        }
        line.push_str(cell);
        // Pad by display width, not char count.
        line.push_str(&" ".repeat(width.saturating_sub(cell.width())));
    }
    writeln!(out, "{}", line.trim_end())
}

#[cfg(test)]
mod tests {
    use super::*;
    use bikeshare_core::time_utils::parse_timestamp;
    use std::collections::BTreeSet;

    fn record(row: usize, start: &str) -> TripRecord {
        let mut r = TripRecord::new(row, parse_timestamp("2017-03-06 08:15:00").unwrap());
        r.start_station = Some(start.into());
        r.end_station = Some("Canal St".into());
        r.trip_duration = Some(250.0);
        r
    }

    fn table(records: Vec<TripRecord>) -> TripTable {
        let columns: BTreeSet<Column> = [
            Column::StartTime,
            Column::TripDuration,
            Column::StartStation,
            Column::EndStation,
            Column::Gender,
        ]
        .into_iter()
        .collect();
        TripTable::new(records, columns)
    }

    fn render(table: &TripTable) -> Vec<String> {
        let mut out = Vec::new();
        render_rows(&mut out, table, &table.records).unwrap();
        String::from_utf8(out).unwrap().lines().map(String::from).collect()
    }

    #[test]
    fn test_header_lists_present_columns_only() {
        let t = table(Vec::new());
        assert_eq!(
            header_row(&t),
            vec![
                "#",
                "Start Time",
                "Trip Duration",
                "Start Station",
                "End Station",
                "Gender",
                "month",
                "day",
                "hour"
            ]
        );
    }

    #[test]
    fn test_record_cells() {
        let t = table(vec![record(3, "Clinton St")]);
        let cells = record_cells(&t, &t.records[0]);
        assert_eq!(
            cells,
            vec![
                "3",
                "2017-03-06 08:15:00",
                "250",
                "Clinton St",
                "Canal St",
                "-",
                "march",
                "monday",
                "8"
            ]
        );
    }

    #[test]
    fn test_fractional_duration_kept() {
        assert_eq!(format_number(12.5), "12.5");
        assert_eq!(format_number(300.0), "300");
    }

    #[test]
    fn test_rows_are_aligned() {
        let t = table(vec![record(0, "A"), record(1, "Clinton St")]);
        let lines = render(&t);
        assert_eq!(lines.len(), 4);
        let col = lines[0].find("End Station").unwrap();
        assert_eq!(lines[2].find("Canal St"), Some(col));
        assert_eq!(lines[3].find("Canal St"), Some(col));
        assert!(lines[1].starts_with("-  "));
    }

    #[test]
    fn test_wide_characters_measured_by_display_width() {
        let t = table(vec![record(0, "東京駅"), record(1, "ABCDEF")]);
        let lines = render(&t);
        // Both rows place the end station at the same display column.
        let prefix_width = |line: &str| {
            let idx = line.find("Canal St").unwrap();
            line[..idx].width()
        };
        assert_eq!(prefix_width(&lines[2]), prefix_width(&lines[3]));
    }
}
