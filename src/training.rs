use crate::config::{DrillConfig, DrillMode, OnError};
use crate::error::DrillError;
use crate::generator::{ReprExerciseGen, TypeExerciseGen};
use crate::registry::ExerciseRegistry;
use crate::session::ExerciseSession;
use crate::traits::{Exercise, ExerciseGen, Recorder, Verdict};
use std::time::{Duration, Instant};
use tracing::{debug, info};

/*
Implements the generic flow;
    Create generator (fresh exercises or replay of the log)

    Get exercise
    Present exercise
    Obtain answer
        Invalid -> present the same exercise again, nothing recorded
        Error   -> record, then retry the same one or move on
        Correct -> record, move on

    Until the drill mode says the session is over, then store the session.
*/

/// Result of submitting an answer, for the presentation to show.
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct Submission {
    pub verdict: Verdict,
    pub message: Option<String>,
    /// Whether a new exercise is up now.
    pub advanced: bool,
}

/// Create the generator the config asks for. Replay reads the exercise log from the recorder.
pub fn generator_from_config<'r>(
    config: &DrillConfig,
    registry: &'r ExerciseRegistry,
    recorder: &dyn Recorder,
) -> Result<Box<dyn ExerciseGen + 'r>, DrillError> {
    match &config.replay {
        Some(replay) => {
            let records = recorder.load_items()?;
            Ok(Box::new(ReprExerciseGen::from_records(
                registry,
                &records,
                replay.filter,
                replay.random,
            )?))
        }
        None => Ok(Box::new(TypeExerciseGen::new(
            registry,
            config.exercise_types.as_slice(),
        )?)),
    }
}

/// One drill session, fed answers by the presentation layer.
pub struct Drill<'g> {
    generator: Box<dyn ExerciseGen + 'g>,
    mode: DrillMode,
    on_error: OnError,
    session: ExerciseSession,
    current: Box<dyn Exercise>,
    shown_at: Instant,
    started_at: Instant,
    /// Exercises moved past, either answered correctly or replaced after an error.
    done: u32,
}

impl<'g> std::fmt::Debug for Drill<'g> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Drill")
            .field("mode", &self.mode)
            .field("on_error", &self.on_error)
            .field("current", &self.current)
            .field("done", &self.done)
            .field("session", &self.session)
            .finish()
    }
}

impl<'g> Drill<'g> {
    pub fn new(
        mut generator: Box<dyn ExerciseGen + 'g>,
        mode: DrillMode,
        on_error: OnError,
    ) -> Result<Self, DrillError> {
        let current = generator.get_an_exercise()?;
        let now = Instant::now();
        Ok(Drill {
            generator,
            mode,
            on_error,
            session: ExerciseSession::new(),
            current,
            shown_at: now,
            started_at: now,
            done: 0,
        })
    }

    pub fn from_config(
        config: &DrillConfig,
        registry: &'g ExerciseRegistry,
        recorder: &dyn Recorder,
    ) -> Result<Self, DrillError> {
        let generator = generator_from_config(config, registry, recorder)?;
        Drill::new(generator, config.mode, config.on_error)
    }

    /// The exercise to present.
    pub fn current(&self) -> &dyn Exercise {
        &*self.current
    }

    pub fn session(&self) -> &ExerciseSession {
        &self.session
    }

    pub fn done(&self) -> u32 {
        self.done
    }

    pub fn is_finished(&self) -> bool {
        match self.mode {
            DrillMode::Count(n) => self.done >= n,
            DrillMode::Time(secs) => self.started_at.elapsed() >= Duration::from_secs(secs),
        }
    }

    /// Check an answer, timing it from when the current exercise was presented.
    pub fn submit(&mut self, input: &str) -> Result<Submission, DrillError> {
        let ms_elapsed = self.shown_at.elapsed().as_millis() as u64;
        self.submit_with_elapsed(input, ms_elapsed)
    }

    /// Check an answer that took `ms_elapsed` milliseconds.
    pub fn submit_with_elapsed(
        &mut self,
        input: &str,
        ms_elapsed: u64,
    ) -> Result<Submission, DrillError> {
        let (verdict, message) = self.current.check(input);
        debug!(exercise = %self.current.to_display_string(), input, ?verdict, ms_elapsed, "answer");
        let advance = match verdict {
            Verdict::Invalid => false,
            Verdict::Error => {
                self.session
                    .finish_an_exercise(&*self.current, false, ms_elapsed);
                self.on_error == OnError::Replace
            }
            Verdict::Correct => {
                self.session
                    .finish_an_exercise(&*self.current, true, ms_elapsed);
                true
            }
        };

        if advance {
            self.done += 1;
            if !self.is_finished() {
                self.current = self.generator.get_an_exercise()?;
            }
        }
        if verdict != Verdict::Invalid {
            self.shown_at = Instant::now();
        }
        Ok(Submission {
            verdict,
            message,
            advanced: advance,
        })
    }

    /// End the drill, storing the session unless it is empty.
    pub fn finish(mut self, recorder: &mut dyn Recorder) -> Result<ExerciseSession, DrillError> {
        info!(
            done = self.done,
            count = self.session.count(),
            "drill finished"
        );
        self.session.store_results(recorder)?;
        Ok(self.session)
    }
}
