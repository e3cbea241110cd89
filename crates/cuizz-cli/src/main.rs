//! cuizz CLI, the user-facing quiz runner.

use std::io;
use std::path::{Path, PathBuf};
use std::process;

use anyhow::Result;
use clap::{CommandFactory, Parser};

use cuizz_core::config;
use cuizz_core::engine::{self, QuizSession, SessionOptions};
use cuizz_core::model::QuestionCard;
use cuizz_core::parser;

const BANNER: &str = "Cuizz: Quizzes in the terminal";

const FILE_FORMAT_HELP: &str = "\
File format (question block):
  What is the capital of France?
  - Paris
  - Berlin
  - Madrid
  - Rome
  1

Controls during the quiz:
  1-4 = choose answer, q = quit, s = skip, r = restart quiz";

#[derive(Parser)]
#[command(name = "cuizz", version, about = BANNER, after_help = FILE_FORMAT_HELP)]
struct Cli {
    /// Path to the questions file
    questions_file: Option<PathBuf>,

    /// Disable q/s/r control commands; every question must be answered
    #[arg(long)]
    no_controls: bool,

    /// Parse the questions file and print a summary instead of playing
    #[arg(long)]
    check: bool,

    /// Config file path
    #[arg(long)]
    config: Option<PathBuf>,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("cuizz_core=warn".parse().unwrap()),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let Some(path) = cli.questions_file else {
        // No file argument: show usage and succeed, so a bare `cuizz`
        // behaves like `cuizz --help`.
        Cli::command().print_help()?;
        return Ok(());
    };

    let config = config::load_config_from(cli.config.as_deref())?;
    let options = SessionOptions {
        controls: config.controls && !cli.no_controls,
        max_input_retries: config.max_input_retries,
    };
    tracing::debug!(controls = options.controls, "session options resolved");

    let questions = parser::load_questions(&path)?;

    if cli.check {
        print_deck_summary(&path, &questions);
        return Ok(());
    }

    println!("{BANNER}");

    let mut session = QuizSession::new(questions);
    let stdin = io::stdin();
    let mut input = stdin.lock();
    let mut output = io::stdout();
    engine::run_session(&mut session, &mut input, &mut output, &options)?;

    Ok(())
}

fn print_deck_summary(path: &Path, questions: &[QuestionCard]) {
    use comfy_table::{Cell, Table};

    let mut table = Table::new();
    table.set_header(vec!["#", "Prompt", "Correct alternative"]);

    for (index, question) in questions.iter().enumerate() {
        table.add_row(vec![
            Cell::new(index + 1),
            Cell::new(&question.prompt),
            Cell::new(format!(
                "{}. {}",
                question.correct_index,
                question.correct_alternative()
            )),
        ]);
    }

    println!("{}: {} question(s)", path.display(), questions.len());
    println!("{table}");
}
