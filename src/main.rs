mod answers;
mod cli;
mod config;
mod error;
mod loader;
mod ordering;
mod prompt;
mod report;
mod scoring;
mod session;
mod telemetry;
mod types;

use crate::error::FitQuizError;
use crate::types::quiz::QuizConfig;
use crate::types::settings::Settings;
use clap::Parser;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

pub mod exit_code {
    pub const SUCCESS: i32 = 0;
    pub const INVALID_ANSWERS: i32 = 1;
    pub const INVALID_CONFIG: i32 = 2;
    pub const RUNTIME_FAILURE: i32 = 3;
}

fn resolve_format(flag: Option<cli::ReportFormat>, settings: &Settings) -> report::OutputFormat {
    match flag {
        Some(cli::ReportFormat::Json) => report::OutputFormat::Json,
        Some(cli::ReportFormat::Md) => report::OutputFormat::Md,
        None => settings
            .report_format()
            .and_then(report::OutputFormat::parse)
            .unwrap_or(report::OutputFormat::Md),
    }
}

fn load_quiz(flag: Option<&Path>, settings: &Settings) -> Result<QuizConfig, FitQuizError> {
    let path = flag
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from(settings.schema_path()));
    Ok(loader::load_config(&path)?)
}

fn session_path(flag: Option<&Path>, settings: &Settings) -> PathBuf {
    flag.map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from(settings.session_file()))
}

fn run(cli: cli::Cli) -> Result<i32, FitQuizError> {
    let root = std::env::current_dir()?;
    let settings = config::load_settings(&root)?;

    match cli.command {
        cli::Commands::Check(cmd) => {
            let mut invalid = 0usize;
            for path in &cmd.paths {
                if !path.exists() {
                    return Err(FitQuizError::PathNotFound(path.display().to_string()));
                }
                for file in loader::discover::schema_files(path) {
                    match loader::load_config(&file) {
                        Ok(config) => println!(
                            "ok: {} ({}, {} questions)",
                            file.display(),
                            config.quiz_id,
                            config.questions.len()
                        ),
                        Err(err) => {
                            invalid += 1;
                            println!("invalid: {}: {}", file.display(), err.message());
                        }
                    }
                }
            }

            if invalid > 0 {
                Ok(exit_code::INVALID_CONFIG)
            } else {
                Ok(exit_code::SUCCESS)
            }
        }
        cli::Commands::Questions(cmd) => {
            let config = load_quiz(cmd.schema.as_deref(), &settings)?;
            let ordered = ordering::order_questions(&config);

            match resolve_format(cmd.format, &settings) {
                report::OutputFormat::Json => {
                    println!("{}", serde_json::to_string_pretty(&ordered)?);
                }
                report::OutputFormat::Md => {
                    let stdout = io::stdout();
                    let mut out = stdout.lock();
                    writeln!(out, "# {}\n", config.title)?;
                    for (index, question) in ordered.iter().enumerate() {
                        prompt::describe_question(
                            &mut out,
                            &config,
                            question,
                            index + 1,
                            ordered.len(),
                        )?;
                    }
                }
            }
            Ok(exit_code::SUCCESS)
        }
        cli::Commands::Take(cmd) => {
            let config = load_quiz(cmd.schema.as_deref(), &settings)?;
            let path = session_path(cmd.session.as_deref(), &settings);
            let previous = session::load_session(&path)?;
            let previous_answers = previous
                .as_ref()
                .and_then(|stored| stored.answers_for(&config));

            let stdin = io::stdin();
            let stdout = io::stdout();
            let answers = prompt::run_quiz(
                &config,
                &mut stdin.lock(),
                &mut stdout.lock(),
                previous_answers,
            )?;

            let stored = session::QuizSession::new(config.quiz_id.clone(), answers);
            session::save_session(&path, &stored)?;
            println!("\nsession saved: {}", path.display());
            Ok(exit_code::SUCCESS)
        }
        cli::Commands::Score(cmd) => {
            let config = load_quiz(cmd.schema.as_deref(), &settings)?;

            let answers = match &cmd.answers {
                Some(path) => {
                    if !path.exists() {
                        return Err(FitQuizError::PathNotFound(path.display().to_string()));
                    }
                    let raw = answers::load_raw_answers(path)?;
                    answers::validate_answers(&config, &raw)?
                }
                None => {
                    let path = session_path(cmd.session.as_deref(), &settings);
                    let stored = session::load_session(&path)?
                        .ok_or_else(|| FitQuizError::NoSession(path.display().to_string()))?;
                    let raw = stored.raw_answers_for(&config)?;
                    answers::validate_answers(&config, &raw)?
                }
            };

            let result = scoring::score(&config, &answers);
            let rendered = report::render(
                &result,
                resolve_format(cmd.format, &settings),
                settings.precision(),
            )?;
            println!("{rendered}");
            Ok(exit_code::SUCCESS)
        }
    }
}

fn main() {
    let cli = cli::Cli::parse();
    telemetry::init(cli.verbose, cli.quiet);

    match run(cli) {
        Ok(code) => {
            if code != 0 {
                std::process::exit(code);
            }
        }
        Err(FitQuizError::Config(err)) => {
            tracing::error!("Quiz configuration error: {err}");
            eprintln!("error: quiz temporarily unavailable");
            std::process::exit(exit_code::INVALID_CONFIG);
        }
        Err(FitQuizError::Answer(err)) => {
            tracing::warn!(question = err.question_id(), "submission rejected");
            eprintln!("error: {err}");
            std::process::exit(exit_code::INVALID_ANSWERS);
        }
        Err(e) => {
            eprintln!("error: {e}");
            std::process::exit(exit_code::RUNTIME_FAILURE);
        }
    }
}
