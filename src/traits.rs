use crate::error::DrillError;
use chrono::NaiveDate;

/// The blank the user has to fill in.
pub const PLACEHOLDER: &str = "?";

/// Outcome of checking a typed answer.
#[derive(Debug, PartialEq, Eq, Copy, Clone)]
pub enum Verdict {
    /// The answer matches.
    Correct,
    /// Not a number at all, typed by mistake. Doesn't count as an attempt.
    Invalid,
    /// A number, but the wrong one. Counts as an attempt.
    Error,
}

/// A single drill exercise, immutable once constructed.
pub trait Exercise: std::fmt::Debug {
    /// Stable tag of the concrete exercise type, used for persistence and registry lookup.
    fn type_tag(&self) -> &'static str;

    /// Human readable description of the exercise type.
    fn description(&self) -> &'static str;

    /// Something like `16 x ? = 96`, holding exactly one [`PLACEHOLDER`].
    fn to_display_string(&self) -> String;

    /// Operand-only representation. `16 x ? = 96` and `16 x 6 = ?` are the same exercise by
    /// nature, so both canonicalize to the same string.
    fn canonicalize(&self) -> String;

    /// Check the raw text the user typed against the answer of this rendering.
    fn check(&self, input: &str) -> (Verdict, Option<String>);
}

/// Something that supplies the next exercise to present.
pub trait ExerciseGen: std::fmt::Debug {
    fn get_an_exercise(&mut self) -> Result<Box<dyn Exercise>, DrillError>;
}

/// A stored exercise, enough to recreate it through the registry.
#[derive(Debug, PartialEq, Eq, Hash, Clone)]
pub struct HistoryEntry {
    pub type_tag: String,
    pub repr: String,
}

impl HistoryEntry {
    pub fn new(type_tag: &str, repr: &str) -> Self {
        HistoryEntry {
            type_tag: type_tag.to_owned(),
            repr: repr.to_owned(),
        }
    }
}

/// One answered exercise.
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct ItemRecord {
    pub type_tag: String,
    pub repr: String,
    pub correct: bool,
    pub ms_elapsed: u64,
    pub date: NaiveDate,
}

impl ItemRecord {
    pub fn entry(&self) -> HistoryEntry {
        HistoryEntry::new(&self.type_tag, &self.repr)
    }
}

/// Totals of one completed session.
#[derive(Debug, PartialEq, Eq, Copy, Clone)]
pub struct SessionSummary {
    pub date: NaiveDate,
    pub duration_ms: u64,
    pub count: u32,
    pub correct: u32,
    pub incorrect: u32,
}

/// Something to keep past results.
pub trait Recorder: std::fmt::Debug {
    /// Append the totals of a session.
    fn store_summary(&mut self, summary: &SessionSummary) -> Result<(), DrillError>;

    /// Append answered exercises.
    fn store_items(&mut self, items: &[ItemRecord]) -> Result<(), DrillError>;

    /// All session totals stored so far, oldest first.
    fn load_summaries(&self) -> Result<Vec<SessionSummary>, DrillError>;

    /// All answered exercises stored so far, oldest first.
    fn load_items(&self) -> Result<Vec<ItemRecord>, DrillError>;
}
