// Line based front end for the drill engine. Type the number that replaces the '?', 'q' ends
// the session early.

use multidrill::config::{DrillConfig, DrillMode, ReplayConfig};
use multidrill::generator::HistoryFilter;
use multidrill::recorder::CsvRecorder;
use multidrill::registry::ExerciseRegistry;
use multidrill::training::Drill;
use multidrill::traits::{Recorder, Verdict};

use clap::Parser;
use std::io::{BufRead, Write};

#[derive(Parser, Debug)]
#[clap(long_about = None)]
struct Args {
    /// Yaml file with the drill configuration.
    #[clap(short, long)]
    config: Option<String>,

    /// Directory for the session and exercise logs.
    #[clap(short, long)]
    data_dir: Option<String>,

    /// Stop after this many exercises.
    #[clap(long, conflicts_with = "seconds")]
    count: Option<u32>,

    /// Stop after this many seconds.
    #[clap(long)]
    seconds: Option<u64>,

    /// Exercise types to draw from.
    #[clap(short, long)]
    types: Vec<String>,

    /// Replay the exercises answered wrong before.
    #[clap(long)]
    replay_incorrect: bool,

    /// Print the available exercise types and exit.
    #[clap(long)]
    list_types: bool,
}

fn make_config(args: &Args) -> Result<DrillConfig, Box<dyn std::error::Error>> {
    let mut config = match &args.config {
        Some(path) => DrillConfig::load(std::path::Path::new(path))?,
        None => DrillConfig::default(),
    };
    if let Some(dir) = &args.data_dir {
        config.data_dir = dir.into();
    }
    if let Some(count) = args.count {
        config.mode = DrillMode::Count(count);
    }
    if let Some(seconds) = args.seconds {
        config.mode = DrillMode::Time(seconds);
    }
    if !args.types.is_empty() {
        config.exercise_types = args.types.clone();
    }
    if args.replay_incorrect {
        config.replay = Some(ReplayConfig {
            filter: HistoryFilter::IncorrectOnly,
            random: true,
        });
    }
    Ok(config)
}

/// Anything else, an empty line included, is an answer.
fn is_quit(line: &str) -> bool {
    line.trim() == "q"
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("multidrill=warn".parse()?),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let registry = ExerciseRegistry::with_builtin();
    if args.list_types {
        for kind in registry.list_all_types() {
            println!("{: <8} {}", kind.tag, kind.description);
        }
        return Ok(());
    }

    let config = make_config(&args)?;
    let mut recorder = CsvRecorder::new(&config.data_dir);
    let mut drill = Drill::from_config(&config, &registry, &recorder)?;

    let stdin = std::io::stdin();
    let mut lines = stdin.lock().lines();
    let mut stdout = std::io::stdout();
    while !drill.is_finished() {
        print!("{}   ", drill.current().to_display_string());
        stdout.flush()?;
        let line = match lines.next() {
            Some(line) => line?,
            None => break,
        };
        if is_quit(&line) {
            break;
        }
        let submission = drill.submit(&line)?;
        match (submission.verdict, submission.message) {
            (Verdict::Correct, _) => println!("Correct!"),
            (_, Some(msg)) => println!("{msg}"),
            (_, None) => {}
        }
    }

    let session = drill.finish(&mut recorder)?;
    if session.count() > 0 {
        println!(
            "{} answered, {} correct, {} incorrect, {:.0}% in {:.1}s",
            session.count(),
            session.correct(),
            session.incorrect(),
            session.accuracy() * 100.0,
            session.total_time_ms() as f64 / 1000.0
        );
        let history = recorder.load_summaries()?;
        println!("{} sessions recorded so far.", history.len());
    }
    Ok(())
}
