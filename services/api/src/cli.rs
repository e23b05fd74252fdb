use crate::demo::{run_demo, run_offer_letter, DemoArgs, OfferLetterArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use hireline::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "Hireline",
    about = "Run and demonstrate the Hireline recruitment pipeline from the command line",
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
    /// Render an offer letter for stakeholder demos
    Offer {
        #[command(subcommand)]
        command: OfferCommand,
    },
    /// Run an end-to-end CLI demo covering the full candidate pipeline
    Demo(DemoArgs),
}

#[derive(Subcommand, Debug)]
enum OfferCommand {
    /// Render an offer letter for an ad-hoc candidate and print it
    Letter(OfferLetterArgs),
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
        Command::Offer {
            command: OfferCommand::Letter(args),
        } => run_offer_letter(args),
        Command::Demo(args) => run_demo(args),
    }
}
