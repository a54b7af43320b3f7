use crate::report::{run_score_report, run_tables_report, ScoreArgs, TablesArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use lead_score::error::AppError;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "Lead Score",
    about = "Calibrate lead scores from historical deal outcomes and serve them over HTTP",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP service (default command)
    Serve(ServeArgs),
    /// Print the count, percent and weight tables for each scored attribute
    Tables(TablesArgs),
    /// Score leads from an export and describe their likelihood of closing
    Score(ScoreArgs),
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
    /// Lead export to calibrate against before accepting requests
    #[arg(long)]
    pub(crate) dataset: Option<PathBuf>,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Tables(args) => run_tables_report(args),
        Command::Score(args) => run_score_report(args),
    }
}
