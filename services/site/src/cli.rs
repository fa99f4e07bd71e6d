use crate::commands::{run_render, run_summary, RenderArgs, SummaryArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use math_reviews::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "Everyday Math Reviews",
    about = "Serve, render and summarize the Everyday Math Reviews listing",
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
    /// Write the reviews listing page as a standalone HTML document
    Render(RenderArgs),
    /// Print one aggregate line per review
    Summary(SummaryArgs),
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
    /// Review data file path or http(s) URL (overrides REVIEWS_DATA)
    #[arg(long)]
    pub(crate) data: Option<String>,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Render(args) => run_render(args).await,
        Command::Summary(args) => run_summary(args).await,
    }
}
