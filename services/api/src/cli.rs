use crate::report::{
    run_analysis, run_catalog_show, run_profile_report, AnalyseArgs, CatalogShowArgs,
    ProfileReportArgs,
};
use crate::server;
use clap::{Args, Parser, Subcommand};
use student_attrition::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "Student Attrition Analyser",
    about = "Serve and exercise the student performance analysis pipeline from the command line",
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
    /// Inspect a saved profile without contacting the prediction service
    Profile {
        #[command(subcommand)]
        command: ProfileCommand,
    },
    /// Submit a saved profile to the prediction service once
    Analyse(AnalyseArgs),
    /// Inspect the reference vocabulary used by the form
    Catalog {
        #[command(subcommand)]
        command: CatalogCommand,
    },
}

#[derive(Subcommand, Debug)]
enum ProfileCommand {
    /// Print overall and per-category completion plus the unanswered fields
    Report(ProfileReportArgs),
}

#[derive(Subcommand, Debug)]
enum CatalogCommand {
    /// Print the option lists a freshly provisioned catalog would serve
    Show(CatalogShowArgs),
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
        Command::Profile {
            command: ProfileCommand::Report(args),
        } => run_profile_report(args),
        Command::Analyse(args) => run_analysis(args).await,
        Command::Catalog {
            command: CatalogCommand::Show(args),
        } => run_catalog_show(args),
    }
}
