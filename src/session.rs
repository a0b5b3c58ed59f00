use crate::error::DrillError;
use crate::traits::{Exercise, ItemRecord, Recorder, SessionSummary};
use chrono::{Local, NaiveDate};
use tracing::{debug, info};

/// Record a series of results of exercises.
#[derive(Debug, Clone)]
pub struct ExerciseSession {
    count: u32,
    correct: u32,
    incorrect: u32,
    total_time_ms: u64,
    items: Vec<ItemRecord>,
    date: NaiveDate,
    stored: bool,
}

impl Default for ExerciseSession {
    fn default() -> Self {
        ExerciseSession::new()
    }
}

impl ExerciseSession {
    /// Session dated today, in local time.
    pub fn new() -> Self {
        ExerciseSession::on(Local::now().date_naive())
    }

    pub fn on(date: NaiveDate) -> Self {
        ExerciseSession {
            count: 0,
            correct: 0,
            incorrect: 0,
            total_time_ms: 0,
            items: vec![],
            date,
            stored: false,
        }
    }

    pub fn finish_an_exercise(&mut self, ex: &dyn Exercise, correct: bool, ms_elapsed: u64) {
        self.count += 1;
        self.total_time_ms += ms_elapsed;
        if correct {
            self.correct += 1;
        } else {
            self.incorrect += 1;
        }
        let record = ItemRecord {
            type_tag: ex.type_tag().to_owned(),
            repr: ex.canonicalize(),
            correct,
            ms_elapsed,
            date: self.date,
        };
        debug!(?record, "finished exercise");
        self.items.push(record);
    }

    /// Append this session to the recorder. Empty sessions are not recorded, and once stored
    /// a session is never appended again.
    ///
    /// The summary goes first, then the items; when storing the items fails the summary is
    /// already written.
    pub fn store_results(&mut self, recorder: &mut dyn Recorder) -> Result<(), DrillError> {
        if self.count == 0 {
            debug!("nothing to store for an empty session");
            return Ok(());
        }
        if self.stored {
            debug!("session already stored");
            return Ok(());
        }
        recorder.store_summary(&self.summary())?;
        recorder.store_items(&self.items)?;
        self.stored = true;
        info!(
            count = self.count,
            correct = self.correct,
            duration_ms = self.total_time_ms,
            "stored session"
        );
        Ok(())
    }

    pub fn summary(&self) -> SessionSummary {
        SessionSummary {
            date: self.date,
            duration_ms: self.total_time_ms,
            count: self.count,
            correct: self.correct,
            incorrect: self.incorrect,
        }
    }

    pub fn count(&self) -> u32 {
        self.count
    }

    pub fn correct(&self) -> u32 {
        self.correct
    }

    pub fn incorrect(&self) -> u32 {
        self.incorrect
    }

    pub fn total_time_ms(&self) -> u64 {
        self.total_time_ms
    }

    pub fn items(&self) -> &[ItemRecord] {
        &self.items
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn is_stored(&self) -> bool {
        self.stored
    }

    /// Fraction of answers that were correct, 0.0 for an empty session.
    pub fn accuracy(&self) -> f64 {
        if self.count == 0 {
            return 0.0;
        }
        self.correct as f64 / self.count as f64
    }

    pub fn mean_time_ms(&self) -> Option<u64> {
        if self.count == 0 {
            None
        } else {
            Some(self.total_time_ms / self.count as u64)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::multiply::TwoByTwo;
    use crate::recorder::{CsvRecorder, MemoryRecorder};

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 1).unwrap()
    }

    fn three_items() -> ExerciseSession {
        let mut session = ExerciseSession::on(date());
        session.finish_an_exercise(&TwoByTwo::with_operands(16, 6), true, 100);
        session.finish_an_exercise(&TwoByTwo::with_operands(23, 45), false, 200);
        session.finish_an_exercise(&TwoByTwo::with_operands(23, 45), true, 300);
        session
    }

    #[test]
    fn test_counters() {
        let session = three_items();
        assert_eq!(session.count(), 3);
        assert_eq!(session.correct(), 2);
        assert_eq!(session.incorrect(), 1);
        assert_eq!(session.total_time_ms(), 600);
        assert_eq!(session.mean_time_ms(), Some(200));
        assert!((session.accuracy() - 2.0 / 3.0).abs() < 1e-9);

        let items = session.items();
        assert_eq!(items.len(), 3);
        assert_eq!(items[1].type_tag, "Int2X2");
        assert_eq!(items[1].repr, "23,45");
        assert!(!items[1].correct);
        assert_eq!(items[1].ms_elapsed, 200);
        assert_eq!(items[1].date, date());
    }

    #[test]
    fn test_store_results() {
        let mut session = three_items();
        let mut recorder = MemoryRecorder::new();
        session.store_results(&mut recorder).unwrap();
        assert!(session.is_stored());
        assert_eq!(recorder.load_summaries().unwrap(), vec![session.summary()]);
        assert_eq!(recorder.load_items().unwrap(), session.items());

        // A second store appends nothing.
        session.store_results(&mut recorder).unwrap();
        assert_eq!(recorder.load_summaries().unwrap().len(), 1);
        assert_eq!(recorder.load_items().unwrap().len(), 3);
    }

    #[test]
    fn test_store_results_io_error() {
        let dir = tempfile::tempdir().unwrap();
        // The data directory is a regular file, so it cannot be created.
        let not_a_dir = dir.path().join("data");
        std::fs::write(&not_a_dir, "occupied").unwrap();

        let mut session = three_items();
        let mut recorder = CsvRecorder::new(&not_a_dir);
        assert!(matches!(
            session.store_results(&mut recorder),
            Err(DrillError::Io(_))
        ));
        assert!(!session.is_stored());
        assert_eq!(std::fs::read_to_string(&not_a_dir).unwrap(), "occupied");

        let mut empty = ExerciseSession::on(date());
        empty.store_results(&mut recorder).unwrap();
        assert_eq!(std::fs::read_to_string(&not_a_dir).unwrap(), "occupied");
    }

    #[test]
    fn test_empty_session_writes_nothing() {
        let mut session = ExerciseSession::on(date());
        assert_eq!(session.accuracy(), 0.0);
        assert_eq!(session.mean_time_ms(), None);

        let mut recorder = MemoryRecorder::new();
        session.store_results(&mut recorder).unwrap();
        assert!(recorder.load_summaries().unwrap().is_empty());

        let dir = tempfile::tempdir().unwrap();
        let mut recorder = CsvRecorder::new(dir.path());
        session.store_results(&mut recorder).unwrap();
        assert!(!recorder.sessions_path().exists());
        assert!(!recorder.exercises_path().exists());
    }
}
