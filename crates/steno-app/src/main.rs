use std::io;
use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use rand::SeedableRng;
use rand::rngs::StdRng;
use steno_core::LessonCatalog;
use steno_types::{ExerciseSettings, Stroke};
use tracing_subscriber::EnvFilter;

pub mod display;
pub mod practice;
pub mod profile;
pub mod state;

use self::state::AppState;

#[derive(Parser)]
#[command(name = "steno-drill", about = "Adaptive stenography practice")]
struct Cli {
    /// JSON config file, defaults to ./config.json or the environment
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Emit logs as JSON
    #[arg(long, global = true)]
    json_logs: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(clap::Args, Default)]
struct ExerciseArgs {
    /// Words per exercise, overrides saved settings
    #[arg(long)]
    size: Option<usize>,

    /// Lesson to draw from, repeatable, overrides saved settings
    #[arg(long = "lesson")]
    lessons: Vec<String>,
}

impl ExerciseArgs {
    fn apply(&self, saved: &ExerciseSettings) -> ExerciseSettings {
        let mut settings = saved.clone();
        if let Some(size) = self.size {
            settings.exercise_size = size;
        }
        if !self.lessons.is_empty() {
            settings.enabled_lessons = self.lessons.clone();
        }
        settings
    }

    fn is_empty(&self) -> bool {
        self.size.is_none() && self.lessons.is_empty()
    }
}

#[derive(Subcommand)]
enum Command {
    /// Print a generated exercise
    Generate {
        #[command(flatten)]
        exercise: ExerciseArgs,

        /// Seed for a reproducible exercise
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Type a generated exercise in the terminal and record the result.
    /// Enter `:pause` on its own line to stop the clock.
    Practice {
        #[command(flatten)]
        exercise: ExerciseArgs,
    },
    /// Show the slowest words by weight
    Weights {
        #[arg(long, default_value_t = 20)]
        top: usize,
    },
    /// Forget every recorded exercise
    ClearHistory,
    /// List available lessons
    Lessons,
    /// Show saved settings, or update them when options are given
    Settings {
        #[command(flatten)]
        exercise: ExerciseArgs,
    },
    /// Write the effective config to a file
    InitConfig {
        #[arg(default_value = "config.json")]
        path: PathBuf,
    },
}

fn init_tracing(json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    if json {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .with_writer(io::stderr)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(io::stderr)
            .with_ansi(atty::is(atty::Stream::Stderr))
            .init();
    }
}

fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();
    init_tracing(cli.json_logs);

    let config = profile::load_config(cli.config.as_deref())?;

    if let Command::InitConfig { path } = &cli.command {
        profile::write_config(&config, path)?;
        return Ok(());
    }

    let mut state = AppState::load(config)?;
    run(&mut state, cli.command)
}

fn run(state: &mut AppState, command: Command) -> anyhow::Result<()> {
    match command {
        Command::Generate { exercise, seed } => {
            let settings = exercise.apply(state.settings.settings());
            let strokes = match seed {
                Some(seed) => state
                    .generator
                    .generate_with_rng(&settings, &mut StdRng::seed_from_u64(seed))?,
                None => state.generator.generate_exercise(&settings)?,
            };
            print_exercise(&strokes);
        }
        Command::Practice { exercise } => {
            let settings = exercise.apply(state.settings.settings());
            let strokes = state.generator.generate_exercise(&settings)?;

            let stdin = io::stdin();
            let result = practice::run_practice(strokes, stdin.lock(), io::stdout())?;
            match result {
                Some(result) => {
                    let correct = result.words.iter().filter(|w| w.is_typed_correctly).count();
                    let seconds: f64 = result.words.iter().map(|w| w.typing_time).sum();
                    println!(
                        "\nDone: {correct}/{} typed cleanly in {seconds:.1}s",
                        result.words.len()
                    );
                    state
                        .generator
                        .record_exercise_result(result)
                        .context("saving exercise history")?;
                }
                None => println!("\nExercise abandoned, nothing recorded"),
            }
        }
        Command::Weights { top } => {
            let mut weights: Vec<(String, f64)> = state.generator.word_weights().into_iter().collect();
            weights.sort_by(|a, b| b.1.total_cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
            if weights.is_empty() {
                println!("No timed words yet");
            }
            for (word, weight) in weights.into_iter().take(top) {
                println!("{weight:>8.3}  {word}");
            }
        }
        Command::ClearHistory => {
            state
                .generator
                .clear_exercise_history()
                .context("clearing exercise history")?;
            println!("Exercise history cleared");
        }
        Command::Lessons => {
            let enabled = &state.settings.settings().enabled_lessons;
            let lessons = state.generator.lessons();
            for name in lessons.lesson_names() {
                let count = lessons.lesson_words(name).map_or(0, <[String]>::len);
                let mark = if enabled.iter().any(|l| l == name) { "*" } else { " " };
                println!("{mark} {name} ({count} words)");
            }
        }
        Command::Settings { exercise } => {
            if !exercise.is_empty() {
                let updated = exercise.apply(state.settings.settings());
                state.settings.save(updated).context("saving settings")?;
            }
            let settings = state.settings.settings();
            println!("Exercise size: {}", settings.exercise_size);
            println!("Lessons: {}", settings.enabled_lessons.join(", "));
        }
        Command::InitConfig { path } => {
            profile::write_config(&state.config, &path)?;
        }
    }

    Ok(())
}

fn print_exercise(strokes: &[Stroke]) {
    let width = strokes
        .iter()
        .map(|s| s.written_word.chars().count())
        .max()
        .unwrap_or(0);
    for stroke in strokes {
        println!("{:<width$}  {}", stroke.written_word, stroke.notation());
    }
}
