use crate::report::{run_batch, run_match, run_rank, BatchArgs, MatchArgs, RankArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use scheme_match::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "Scheme Match",
    about = "Match citizen profiles against welfare scheme eligibility rules",
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
    /// Evaluate one profile against every scheme and print an eligibility report
    Match(MatchArgs),
    /// Rank schemes for one profile by weighted partial-credit score
    Rank(RankArgs),
    /// Evaluate every profile in a CSV export and print one summary line per row
    Batch(BatchArgs),
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Match(args) => run_match(args),
        Command::Rank(args) => run_rank(args),
        Command::Batch(args) => run_batch(args),
    }
}
