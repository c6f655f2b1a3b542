use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "fitquiz",
    version,
    about = "Configuration-driven aptitude quiz with fit scoring"
)]
pub struct Cli {
    /// Increase verbosity (-v for info, -vv for debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Validate quiz schema files or directories of schemas
    Check(CheckCommand),
    /// Print questions in presentation order
    Questions(QuestionsCommand),
    /// Answer the quiz interactively and save the session
    Take(TakeCommand),
    /// Score an answer file or the saved session
    Score(ScoreCommand),
}

#[derive(Args)]
pub struct CheckCommand {
    #[arg(required = true)]
    pub paths: Vec<PathBuf>,
}

#[derive(Args)]
pub struct QuestionsCommand {
    #[arg(long)]
    pub schema: Option<PathBuf>,
    #[arg(short, long, value_enum)]
    pub format: Option<ReportFormat>,
}

#[derive(Args)]
pub struct TakeCommand {
    #[arg(long)]
    pub schema: Option<PathBuf>,
    #[arg(long)]
    pub session: Option<PathBuf>,
}

#[derive(Args)]
pub struct ScoreCommand {
    #[arg(long)]
    pub schema: Option<PathBuf>,

    /// JSON or TOML map of question id to answer
    #[arg(long, conflicts_with = "session")]
    pub answers: Option<PathBuf>,

    #[arg(long)]
    pub session: Option<PathBuf>,

    #[arg(short, long, value_enum)]
    pub format: Option<ReportFormat>,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum ReportFormat {
    Json,
    Md,
}
