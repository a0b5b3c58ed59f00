use thiserror::Error;

/// Everything that can go wrong inside the drill engine.
///
/// Wrong answers are not errors; they are reported through [`crate::traits::Verdict`].
#[derive(Debug, Error)]
pub enum DrillError {
    #[error("cannot generate a {0}-digit integer")]
    InvalidDigits(u32),

    #[error("no acceptable {digits}-digit integer in [{low}, {high}]")]
    EmptyRange { digits: u32, low: i64, high: i64 },

    #[error("malformed representation for {type_tag}: {repr:?}")]
    MalformedRepr { type_tag: String, repr: String },

    #[error("exercise type not registered: {0}")]
    UnknownExerciseType(String),

    #[error("no exercise types to choose from")]
    NoExerciseTypes,

    #[error("history to replay is empty")]
    EmptyHistory,

    #[error("{file}:{line}: {reason}")]
    MalformedLog {
        file: String,
        line: usize,
        reason: String,
    },

    #[error("failed to parse config: {0}")]
    Config(#[from] serde_yaml::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
