//! Drill configuration, read from a yaml file.
//!
//! ```yaml
//! data_dir: /home/me/.multidrill
//! mode:
//!   Count: 20
//! exercise_types: [Int1X2, Int2X2]
//! on_error: Retry
//! replay:
//!   filter: IncorrectOnly
//!   random: true
//! ```

use crate::error::DrillError;
use crate::generator::HistoryFilter;
use crate::multiply::OneByTwo;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Whether a session is bounded by elapsed time or by the number of exercises.
#[derive(Debug, PartialEq, Eq, Copy, Clone, Deserialize, Serialize)]
pub enum DrillMode {
    /// Stop after this many answered exercises.
    Count(u32),
    /// Stop once this many seconds have passed.
    Time(u64),
}

/// What to do after a wrong (but valid) answer.
#[derive(Debug, PartialEq, Eq, Copy, Clone, Default, Deserialize, Serialize)]
pub enum OnError {
    /// Show the same exercise again.
    #[default]
    Retry,
    /// Move on to the next exercise.
    Replace,
}

/// Replay exercises from the exercise log instead of generating new ones.
#[derive(Debug, PartialEq, Eq, Clone, Default, Deserialize, Serialize)]
pub struct ReplayConfig {
    #[serde(default)]
    pub filter: HistoryFilter,
    #[serde(default)]
    pub random: bool,
}

#[derive(Debug, PartialEq, Eq, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct DrillConfig {
    /// Directory holding `sessions.csv` and `exercises.csv`.
    pub data_dir: PathBuf,
    pub mode: DrillMode,
    /// Types to draw fresh exercises from.
    pub exercise_types: Vec<String>,
    pub on_error: OnError,
    pub replay: Option<ReplayConfig>,
}

impl Default for DrillConfig {
    fn default() -> Self {
        DrillConfig {
            data_dir: PathBuf::from("multidrill_data"),
            mode: DrillMode::Count(20),
            exercise_types: vec![OneByTwo::TYPE.to_owned()],
            on_error: OnError::Retry,
            replay: None,
        }
    }
}

impl DrillConfig {
    pub fn load(filename: &Path) -> Result<Self, DrillError> {
        let file = std::fs::File::open(filename)?;
        Ok(serde_yaml::from_reader(file)?)
    }

    pub fn parse(content: &str) -> Result<Self, DrillError> {
        Ok(serde_yaml::from_str(content)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse() {
        let config = DrillConfig::parse(
            "
data_dir: /tmp/drill
mode:
  Time: 300
exercise_types: [Int2X2, Int1X2]
on_error: Replace
replay:
  filter: IncorrectOnly
",
        )
        .unwrap();
        assert_eq!(config.data_dir, PathBuf::from("/tmp/drill"));
        assert_eq!(config.mode, DrillMode::Time(300));
        assert_eq!(config.exercise_types, vec!["Int2X2", "Int1X2"]);
        assert_eq!(config.on_error, OnError::Replace);
        assert_eq!(
            config.replay,
            Some(ReplayConfig {
                filter: HistoryFilter::IncorrectOnly,
                random: false,
            })
        );
    }

    #[test]
    fn test_defaults() {
        let config = DrillConfig::parse("mode:\n  Count: 5\n").unwrap();
        assert_eq!(config.mode, DrillMode::Count(5));
        assert_eq!(config.exercise_types, vec!["Int1X2"]);
        assert_eq!(config.on_error, OnError::Retry);
        assert_eq!(config.replay, None);

        assert!(matches!(
            DrillConfig::parse("mode: sometimes"),
            Err(DrillError::Config(_))
        ));
    }

    #[test]
    fn test_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("drill.yaml");
        std::fs::write(&path, "exercise_types: [Int2X2]\n").unwrap();
        let config = DrillConfig::load(&path).unwrap();
        assert_eq!(config.exercise_types, vec!["Int2X2"]);
        assert_eq!(config.mode, DrillMode::Count(20));
        assert!(matches!(
            DrillConfig::load(&dir.path().join("missing.yaml")),
            Err(DrillError::Io(_))
        ));
    }
}
