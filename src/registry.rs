//! Table from type tag to exercise constructors.
//!
//! The registry is built once at start-up and handed to whoever needs to create exercises,
//! there is no process wide instance.

use crate::error::DrillError;
use crate::multiply::{OneByTwo, TwoByTwo};
use crate::traits::Exercise;
use rand::RngCore;
use std::collections::HashMap;

pub type GenerateFn = fn(&mut dyn RngCore) -> Result<Box<dyn Exercise>, DrillError>;
pub type FromCanonicalFn = fn(&str, &mut dyn RngCore) -> Result<Box<dyn Exercise>, DrillError>;

/// Everything needed to create exercises of one type.
#[derive(Clone, Copy)]
pub struct ExerciseKind {
    /// Stable tag, persisted in the logs.
    pub tag: &'static str,
    pub description: &'static str,
    /// Create a fresh random exercise.
    pub generate: GenerateFn,
    /// Recreate an exercise from its canonical representation.
    pub from_canonical: FromCanonicalFn,
}

impl std::fmt::Debug for ExerciseKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ExerciseKind")
            .field("tag", &self.tag)
            .field("description", &self.description)
            .finish()
    }
}

#[derive(Debug, Default, Clone)]
pub struct ExerciseRegistry {
    kinds: Vec<ExerciseKind>,
    index: HashMap<String, usize>,
}

impl ExerciseRegistry {
    pub fn new() -> Self {
        Default::default()
    }

    /// Registry holding all exercise types this crate provides.
    pub fn with_builtin() -> Self {
        let mut registry = ExerciseRegistry::new();
        registry.register_exercise_type(TwoByTwo::kind());
        registry.register_exercise_type(OneByTwo::kind());
        registry
    }

    /// Add a type, replacing any type with the same tag in place.
    pub fn register_exercise_type(&mut self, kind: ExerciseKind) {
        match self.index.get(kind.tag) {
            Some(&i) => self.kinds[i] = kind,
            None => {
                self.index.insert(kind.tag.to_owned(), self.kinds.len());
                self.kinds.push(kind);
            }
        }
    }

    pub fn kind(&self, tag: &str) -> Result<&ExerciseKind, DrillError> {
        self.index
            .get(tag)
            .map(|&i| &self.kinds[i])
            .ok_or_else(|| DrillError::UnknownExerciseType(tag.to_owned()))
    }

    pub fn contains(&self, tag: &str) -> bool {
        self.index.contains_key(tag)
    }

    /// Recreate an exercise from a stored canonical representation.
    pub fn create_exercise(
        &self,
        tag: &str,
        repr: &str,
        rng: &mut dyn RngCore,
    ) -> Result<Box<dyn Exercise>, DrillError> {
        (self.kind(tag)?.from_canonical)(repr, rng)
    }

    /// Create a fresh random exercise of the given type.
    pub fn generate_exercise(
        &self,
        tag: &str,
        rng: &mut dyn RngCore,
    ) -> Result<Box<dyn Exercise>, DrillError> {
        (self.kind(tag)?.generate)(rng)
    }

    /// All types, in the order they were registered.
    pub fn list_all_types(&self) -> &[ExerciseKind] {
        &self.kinds
    }
}
