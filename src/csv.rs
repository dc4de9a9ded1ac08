//! Minimal CSV writer/reader for dashboard exports.

use std::borrow::Cow;

use crate::models::MergedRow;

pub const SERIES_HEADER: [&str; 5] = ["date", "sessions", "clicks", "ctr", "movingAverage"];

/// Quote a field if it contains a delimiter, quote or line break.
pub fn escape_field(field: &str) -> Cow<'_, str> {
    if field.contains([',', '"', '\n', '\r']) {
        Cow::Owned(format!("\"{}\"", field.replace('"', "\"\"")))
    } else {
        Cow::Borrowed(field)
    }
}

fn write_record<S: AsRef<str>>(out: &mut String, fields: &[S]) {
    for (i, field) in fields.iter().enumerate() {
        if i > 0 {
            out.push(',');
        }
        out.push_str(&escape_field(field.as_ref()));
    }
    out.push('\n');
}

/// Serialize a header and rows, one record per line.
pub fn to_csv<S: AsRef<str>>(header: &[&str], rows: &[Vec<S>]) -> String {
    let mut out = String::new();
    write_record(&mut out, header);
    for row in rows {
        write_record(&mut out, row);
    }
    out
}

/// Parse CSV text produced by [`to_csv`] back into records.
///
/// Handles quoted fields with doubled quotes and embedded line breaks.
/// A trailing newline does not produce an empty record.
pub fn parse(text: &str) -> Vec<Vec<String>> {
    let mut records = Vec::new();
    let mut record = Vec::new();
    let mut field = String::new();
    let mut in_quotes = false;
    let mut chars = text.chars().peekable();
    let mut dirty = false;

    while let Some(c) = chars.next() {
        if in_quotes {
            match c {
                '"' if chars.peek() == Some(&'"') => {
                    field.push('"');
                    chars.next();
                }
                '"' => in_quotes = false,
                _ => field.push(c),
            }
            continue;
        }
        match c {
            '"' => {
                in_quotes = true;
                dirty = true;
            }
            ',' => {
                record.push(std::mem::take(&mut field));
                dirty = true;
            }
            '\r' if chars.peek() == Some(&'\n') => {}
            '\n' => {
                record.push(std::mem::take(&mut field));
                records.push(std::mem::take(&mut record));
                dirty = false;
            }
            _ => {
                field.push(c);
                dirty = true;
            }
        }
    }
    if dirty {
        record.push(field);
        records.push(record);
    }
    records
}

/// Export merged rows with [`SERIES_HEADER`].
pub fn series_to_csv(rows: &[MergedRow]) -> String {
    let records: Vec<Vec<String>> = rows
        .iter()
        .map(|r| {
            vec![
                r.date.clone(),
                r.sessions.to_string(),
                r.clicks.to_string(),
                format!("{:.2}", r.ctr),
                r.moving_average.map(|m| m.to_string()).unwrap_or_default(),
            ]
        })
        .collect();
    to_csv(&SERIES_HEADER, &records)
}
