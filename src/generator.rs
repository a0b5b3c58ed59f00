//! Various ways to come up with the next exercise.

use crate::error::DrillError;
use crate::registry::ExerciseRegistry;
use crate::traits::{Exercise, ExerciseGen, HistoryEntry, ItemRecord};
use rand::rngs::StdRng;
use rand::{Rng, RngCore, SeedableRng};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt::Debug;
use tracing::debug;

/// Creates fresh random exercises from a set of exercise types.
#[derive(Debug)]
pub struct TypeExerciseGen<'r, R = StdRng> {
    registry: &'r ExerciseRegistry,
    tags: Vec<String>,
    rng: R,
}

impl<'r> TypeExerciseGen<'r, StdRng> {
    pub fn new<S: AsRef<str>>(
        registry: &'r ExerciseRegistry,
        tags: &[S],
    ) -> Result<Self, DrillError> {
        TypeExerciseGen::with_rng(registry, tags, StdRng::from_entropy())
    }

    pub fn single(registry: &'r ExerciseRegistry, tag: &str) -> Result<Self, DrillError> {
        TypeExerciseGen::new(registry, &[tag])
    }
}

impl<'r, R: RngCore + Debug> TypeExerciseGen<'r, R> {
    pub fn with_rng<S: AsRef<str>>(
        registry: &'r ExerciseRegistry,
        tags: &[S],
        rng: R,
    ) -> Result<Self, DrillError> {
        if tags.is_empty() {
            return Err(DrillError::NoExerciseTypes);
        }
        let tags = tags
            .iter()
            .map(|t| t.as_ref().to_owned())
            .collect::<Vec<_>>();
        if let Some(unknown) = tags.iter().find(|t| !registry.contains(t)) {
            return Err(DrillError::UnknownExerciseType(unknown.clone()));
        }
        Ok(TypeExerciseGen {
            registry,
            tags,
            rng,
        })
    }

    pub fn tags(&self) -> &[String] {
        &self.tags
    }
}

impl<'r, R: RngCore + Debug> ExerciseGen for TypeExerciseGen<'r, R> {
    fn get_an_exercise(&mut self) -> Result<Box<dyn Exercise>, DrillError> {
        let tag = &self.tags[self.rng.gen_range(0..self.tags.len())];
        let ex = self.registry.generate_exercise(tag, &mut self.rng)?;
        debug!(tag = %tag, repr = %ex.canonicalize(), "generated exercise");
        Ok(ex)
    }
}

/// Which past exercises to replay.
#[derive(Debug, PartialEq, Eq, Copy, Clone, Default, Deserialize, Serialize)]
pub enum HistoryFilter {
    #[default]
    All,
    /// Only exercises that were answered wrong at least once.
    IncorrectOnly,
}

/// Replays a stored list of exercises, either in order (wrapping around) or at random.
#[derive(Debug)]
pub struct ReprExerciseGen<'r, R = StdRng> {
    registry: &'r ExerciseRegistry,
    history: Vec<HistoryEntry>,
    is_random: bool,
    cursor: usize,
    rng: R,
}

impl<'r> ReprExerciseGen<'r, StdRng> {
    pub fn new(
        registry: &'r ExerciseRegistry,
        history: Vec<HistoryEntry>,
        is_random: bool,
    ) -> Result<Self, DrillError> {
        ReprExerciseGen::with_rng(registry, history, is_random, StdRng::from_entropy())
    }

    /// Build the replay list from logged items. Every exercise shows up once, in the order it
    /// was first answered.
    pub fn from_records(
        registry: &'r ExerciseRegistry,
        records: &[ItemRecord],
        filter: HistoryFilter,
        is_random: bool,
    ) -> Result<Self, DrillError> {
        ReprExerciseGen::new(registry, history_from_records(records, filter), is_random)
    }
}

impl<'r, R: RngCore + Debug> ReprExerciseGen<'r, R> {
    pub fn with_rng(
        registry: &'r ExerciseRegistry,
        history: Vec<HistoryEntry>,
        is_random: bool,
        rng: R,
    ) -> Result<Self, DrillError> {
        if history.is_empty() {
            return Err(DrillError::EmptyHistory);
        }
        Ok(ReprExerciseGen {
            registry,
            history,
            is_random,
            cursor: 0,
            rng,
        })
    }

    pub fn history(&self) -> &[HistoryEntry] {
        &self.history
    }
}

impl<'r, R: RngCore + Debug> ExerciseGen for ReprExerciseGen<'r, R> {
    fn get_an_exercise(&mut self) -> Result<Box<dyn Exercise>, DrillError> {
        let index = if self.is_random {
            self.rng.gen_range(0..self.history.len())
        } else {
            let index = self.cursor;
            self.cursor = (self.cursor + 1) % self.history.len();
            index
        };
        let entry = &self.history[index];
        debug!(index, tag = %entry.type_tag, repr = %entry.repr, "replaying exercise");
        self.registry
            .create_exercise(&entry.type_tag, &entry.repr, &mut self.rng)
    }
}

/// Unique history entries of the records passing the filter, in first-seen order.
pub fn history_from_records(records: &[ItemRecord], filter: HistoryFilter) -> Vec<HistoryEntry> {
    let mut seen = HashSet::new();
    records
        .iter()
        .filter(|r| filter == HistoryFilter::All || !r.correct)
        .map(|r| r.entry())
        .filter(|e| seen.insert(e.clone()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn rng() -> StdRng {
        StdRng::seed_from_u64(42)
    }

    fn record(type_tag: &str, repr: &str, correct: bool) -> ItemRecord {
        ItemRecord {
            type_tag: type_tag.to_owned(),
            repr: repr.to_owned(),
            correct,
            ms_elapsed: 1000,
            date: NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
        }
    }

    #[test]
    fn test_type_gen() {
        let registry = ExerciseRegistry::with_builtin();
        let mut gen = TypeExerciseGen::with_rng(&registry, &["Int1X2"], rng()).unwrap();
        for _ in 0..20 {
            assert_eq!(gen.get_an_exercise().unwrap().type_tag(), "Int1X2");
        }

        let mut gen = TypeExerciseGen::with_rng(&registry, &["Int1X2", "Int2X2"], rng()).unwrap();
        let seen = (0..200)
            .map(|_| gen.get_an_exercise().unwrap().type_tag())
            .collect::<HashSet<_>>();
        assert_eq!(seen.len(), 2);

        let gen = TypeExerciseGen::single(&registry, "Int2X2").unwrap();
        assert_eq!(gen.tags(), ["Int2X2".to_owned()]);
    }

    #[test]
    fn test_type_gen_rejects_bad_tags() {
        let registry = ExerciseRegistry::with_builtin();
        let empty: [&str; 0] = [];
        assert!(matches!(
            TypeExerciseGen::new(&registry, &empty),
            Err(DrillError::NoExerciseTypes)
        ));
        assert!(matches!(
            TypeExerciseGen::new(&registry, &["Int2X2", "Nope"]),
            Err(DrillError::UnknownExerciseType(t)) if t == "Nope"
        ));
    }

    #[test]
    fn test_repr_gen_sequential_wraps() {
        let registry = ExerciseRegistry::with_builtin();
        let history = vec![
            HistoryEntry::new("Int2X2", "16,6"),
            HistoryEntry::new("Int1X2", "7,13"),
            HistoryEntry::new("Int2X2", "23,45"),
        ];
        let mut gen = ReprExerciseGen::with_rng(&registry, history, false, rng()).unwrap();
        let reprs = (0..4)
            .map(|_| gen.get_an_exercise().unwrap().canonicalize())
            .collect::<Vec<_>>();
        assert_eq!(reprs, vec!["16,6", "7,13", "23,45", "16,6"]);
    }

    #[test]
    fn test_repr_gen_random() {
        let registry = ExerciseRegistry::with_builtin();
        let history = vec![
            HistoryEntry::new("Int2X2", "16,6"),
            HistoryEntry::new("Int2X2", "23,45"),
        ];
        let mut gen = ReprExerciseGen::with_rng(&registry, history.clone(), true, rng()).unwrap();
        for _ in 0..50 {
            let ex = gen.get_an_exercise().unwrap();
            assert!(history.contains(&HistoryEntry::new(ex.type_tag(), &ex.canonicalize())));
        }
    }

    #[test]
    fn test_repr_gen_errors() {
        let registry = ExerciseRegistry::with_builtin();
        assert!(matches!(
            ReprExerciseGen::new(&registry, vec![], false),
            Err(DrillError::EmptyHistory)
        ));
        let mut gen =
            ReprExerciseGen::new(&registry, vec![HistoryEntry::new("Gone", "1,2")], false).unwrap();
        assert!(matches!(
            gen.get_an_exercise(),
            Err(DrillError::UnknownExerciseType(_))
        ));
    }

    #[test]
    fn test_history_from_records() {
        let records = vec![
            record("Int1X2", "7,13", true),
            record("Int2X2", "16,6", false),
            record("Int1X2", "7,13", false),
            record("Int2X2", "16,6", false),
            record("Int2X2", "33,44", true),
        ];
        assert_eq!(
            history_from_records(&records, HistoryFilter::All),
            vec![
                HistoryEntry::new("Int1X2", "7,13"),
                HistoryEntry::new("Int2X2", "16,6"),
                HistoryEntry::new("Int2X2", "33,44"),
            ]
        );
        assert_eq!(
            history_from_records(&records, HistoryFilter::IncorrectOnly),
            vec![
                HistoryEntry::new("Int2X2", "16,6"),
                HistoryEntry::new("Int1X2", "7,13"),
            ]
        );

        let registry = ExerciseRegistry::with_builtin();
        let only_correct = vec![record("Int2X2", "33,44", true)];
        assert!(matches!(
            ReprExerciseGen::from_records(
                &registry,
                &only_correct,
                HistoryFilter::IncorrectOnly,
                false
            ),
            Err(DrillError::EmptyHistory)
        ));
    }
}
