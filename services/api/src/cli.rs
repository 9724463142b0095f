use crate::demo::{run_demo, run_event_listing, run_listing, DemoArgs, ListArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use consent_desk::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "Consent Desk",
    about = "Collect and review model release consents from the command line",
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
    /// Inspect recorded consents in the sample store
    Consents {
        #[command(subcommand)]
        command: ConsentsCommand,
    },
    /// Walk a consent draft through validation, submission and the admin search
    Demo(DemoArgs),
}

#[derive(Subcommand, Debug)]
enum ConsentsCommand {
    /// List recorded consents, newest first, with optional filters
    List(ListArgs),
    /// Print the distinct event names found in the records
    Events,
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
        Command::Consents {
            command: ConsentsCommand::List(args),
        } => run_listing(args).await,
        Command::Consents {
            command: ConsentsCommand::Events,
        } => run_event_listing().await,
        Command::Demo(args) => run_demo(args).await,
    }
}
