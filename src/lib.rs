//! Multiplication drill engine.

// Exercises like 16 x ? = 96 and 16 x 6 = ? are the same exercise, only presented
// differently. Everything is stored by type tag and operands so either can be replayed.

/// Main traits
pub mod traits;

/// Error type shared by all modules.
pub mod error;

// / Random operands.
pub mod number;

// / The multiplication exercises.
pub mod multiply;

// / Table of exercise types.
pub mod registry;

// / Ways to pick the next exercise.
pub mod generator;

// / Aggregation of one run.
pub mod session;

// / Simple implementations to keep records
pub mod recorder;

// / Configuration file.
pub mod config;

// / Implementor for a drill loop.
pub mod training;

pub use error::DrillError;
