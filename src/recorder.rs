// Implementations of the Recorder trait.

use crate::error::DrillError;
use crate::traits::{ItemRecord, Recorder, SessionSummary};
use chrono::NaiveDate;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

pub const SESSIONS_FILE: &str = "sessions.csv";
pub const EXERCISES_FILE: &str = "exercises.csv";
pub const SESSIONS_HEADER: &str = "date,duration_ms,count,correct,incorrect";
pub const EXERCISES_HEADER: &str = "type,repr,correct,ms_elapsed,date";

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Recorder that only keeps all records in memory.
#[derive(Debug, Default)]
pub struct MemoryRecorder {
    summaries: Vec<SessionSummary>,
    items: Vec<ItemRecord>,
}

impl MemoryRecorder {
    pub fn new() -> Self {
        MemoryRecorder::default()
    }
    pub fn from(items: &[ItemRecord]) -> Self {
        MemoryRecorder {
            summaries: vec![],
            items: items.to_vec(),
        }
    }
}

impl Recorder for MemoryRecorder {
    fn store_summary(&mut self, summary: &SessionSummary) -> Result<(), DrillError> {
        self.summaries.push(*summary);
        Ok(())
    }

    fn store_items(&mut self, items: &[ItemRecord]) -> Result<(), DrillError> {
        self.items.extend_from_slice(items);
        Ok(())
    }

    fn load_summaries(&self) -> Result<Vec<SessionSummary>, DrillError> {
        Ok(self.summaries.clone())
    }

    fn load_items(&self) -> Result<Vec<ItemRecord>, DrillError> {
        Ok(self.items.clone())
    }
}

/// A recorder that appends to two comma separated logs in a data directory, one row per
/// session in `sessions.csv` and one row per answered exercise in `exercises.csv`.
///
/// There is no atomicity across the two files; a failure in between leaves a session
/// without its exercises.
#[derive(Debug, Clone)]
pub struct CsvRecorder {
    dir: PathBuf,
}

impl CsvRecorder {
    /// Files are only created once something is stored.
    pub fn new(dir: &Path) -> Self {
        CsvRecorder {
            dir: dir.to_owned(),
        }
    }

    pub fn sessions_path(&self) -> PathBuf {
        self.dir.join(SESSIONS_FILE)
    }

    pub fn exercises_path(&self) -> PathBuf {
        self.dir.join(EXERCISES_FILE)
    }

    fn append(&self, path: &Path, header: &str, rows: &[String]) -> Result<(), DrillError> {
        std::fs::create_dir_all(&self.dir)?;
        let fresh = match std::fs::metadata(path) {
            Ok(m) => m.len() == 0,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => true,
            Err(e) => return Err(e.into()),
        };

        let mut data = String::new();
        if fresh {
            data.push_str(header);
            data.push('\n');
        }
        for row in rows {
            data.push_str(row);
            data.push('\n');
        }

        use std::fs::OpenOptions;
        let mut file = OpenOptions::new().create(true).append(true).open(path)?;
        file.write_all(data.as_bytes())?;
        file.flush()?;
        debug!(path = %path.display(), rows = rows.len(), "appended rows");
        Ok(())
    }

    /// Data rows of a log, split in fields. A missing file has no rows.
    fn read_rows(path: &Path, header: &str) -> Result<Vec<(usize, Vec<String>)>, DrillError> {
        let content = match std::fs::read_to_string(path) {
            Ok(c) => c,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(vec![]),
            Err(e) => return Err(e.into()),
        };
        let mut lines = content.lines().enumerate();
        match lines.next() {
            None => return Ok(vec![]),
            Some((_, first)) if first.trim() == header => {}
            Some((_, first)) => {
                return Err(DrillError::MalformedLog {
                    file: path.display().to_string(),
                    line: 1,
                    reason: format!("expected header {header:?}, got {first:?}"),
                })
            }
        }
        Ok(lines
            .filter(|(_, l)| !l.trim().is_empty())
            .map(|(i, l)| (i + 1, split_fields(l)))
            .collect())
    }
}

impl Recorder for CsvRecorder {
    fn store_summary(&mut self, summary: &SessionSummary) -> Result<(), DrillError> {
        let row = format!(
            "{},{},{},{},{}",
            summary.date.format(DATE_FORMAT),
            summary.duration_ms,
            summary.count,
            summary.correct,
            summary.incorrect
        );
        self.append(&self.sessions_path(), SESSIONS_HEADER, &[row])
    }

    fn store_items(&mut self, items: &[ItemRecord]) -> Result<(), DrillError> {
        let rows = items
            .iter()
            .map(|item| {
                format!(
                    "{},{},{},{},{}",
                    quote_field(&item.type_tag),
                    quote_field(&item.repr),
                    if item.correct { 1 } else { 0 },
                    item.ms_elapsed,
                    item.date.format(DATE_FORMAT)
                )
            })
            .collect::<Vec<_>>();
        self.append(&self.exercises_path(), EXERCISES_HEADER, &rows)
    }

    fn load_summaries(&self) -> Result<Vec<SessionSummary>, DrillError> {
        let path = self.sessions_path();
        let mut res = vec![];
        for (line, fields) in CsvRecorder::read_rows(&path, SESSIONS_HEADER)? {
            match parse_summary(&fields) {
                Some(summary) => res.push(summary),
                None => warn!(path = %path.display(), line, "skipping malformed session row"),
            }
        }
        Ok(res)
    }

    fn load_items(&self) -> Result<Vec<ItemRecord>, DrillError> {
        let path = self.exercises_path();
        let mut res = vec![];
        for (line, fields) in CsvRecorder::read_rows(&path, EXERCISES_HEADER)? {
            match parse_item(&fields) {
                Some(item) => res.push(item),
                None => warn!(path = %path.display(), line, "skipping malformed exercise row"),
            }
        }
        Ok(res)
    }
}

fn parse_date(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s, DATE_FORMAT).ok()
}

fn parse_summary(fields: &[String]) -> Option<SessionSummary> {
    match fields {
        [date, duration_ms, count, correct, incorrect] => Some(SessionSummary {
            date: parse_date(date)?,
            duration_ms: duration_ms.parse().ok()?,
            count: count.parse().ok()?,
            correct: correct.parse().ok()?,
            incorrect: incorrect.parse().ok()?,
        }),
        _ => None,
    }
}

fn parse_item(fields: &[String]) -> Option<ItemRecord> {
    match fields {
        [type_tag, repr, correct, ms_elapsed, date] => Some(ItemRecord {
            type_tag: type_tag.clone(),
            repr: repr.clone(),
            correct: match correct.as_str() {
                "1" => true,
                "0" => false,
                _ => return None,
            },
            ms_elapsed: ms_elapsed.parse().ok()?,
            date: parse_date(date)?,
        }),
        _ => None,
    }
}

/// Quote a field if it holds the delimiter or a quote, doubling inner quotes.
pub fn quote_field(field: &str) -> String {
    if field.contains([',', '"', '\n']) {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_owned()
    }
}

/// Split one line on commas, honoring quoted fields.
pub fn split_fields(line: &str) -> Vec<String> {
    let mut fields = vec![];
    let mut current = String::new();
    let mut quoted = false;
    let mut chars = line.chars().peekable();
    while let Some(c) = chars.next() {
        match (c, quoted) {
            ('"', true) if chars.peek() == Some(&'"') => {
                current.push('"');
                chars.next();
            }
            ('"', true) => quoted = false,
            ('"', false) if current.is_empty() => quoted = true,
            (',', false) => fields.push(std::mem::take(&mut current)),
            _ => current.push(c),
        }
    }
    fields.push(current);
    fields
}
