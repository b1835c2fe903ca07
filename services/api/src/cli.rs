use crate::demo::{run_demo, DemoArgs};
use crate::infra::{print_json, read_event};
use crate::server;
use capi_quality::conversions::{match_quality_report, PreparedEvent};
use capi_quality::error::AppError;
use capi_quality::{prepare_event_for_api, validate_event_parameters};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "Conversion Quality Service",
    about = "Validate, prepare, and score conversion events for the attribution API",
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
    /// Validate one event document and list every violated rule
    Validate(EventInputArgs),
    /// Validate one event document and print the API payload
    Prepare(EventInputArgs),
    /// Print the match quality score and recommendations for one event
    Quality(EventInputArgs),
    /// Run sample events through the engine
    Demo(DemoArgs),
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

#[derive(Args, Debug)]
pub(crate) struct EventInputArgs {
    /// Event JSON document (reads stdin when omitted)
    #[arg(long)]
    pub(crate) input: Option<PathBuf>,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Validate(args) => run_validate(args),
        Command::Prepare(args) => run_prepare(args),
        Command::Quality(args) => run_quality(args),
        Command::Demo(args) => run_demo(args),
    }
}

fn run_validate(args: EventInputArgs) -> Result<(), AppError> {
    let event = read_event(args.input.as_deref())?;
    let report = validate_event_parameters(&event);
    print_json(&report)?;

    if report.is_valid() {
        Ok(())
    } else {
        Err(AppError::Rejected(report))
    }
}

fn run_prepare(args: EventInputArgs) -> Result<(), AppError> {
    let event = read_event(args.input.as_deref())?;
    let result = prepare_event_for_api(&event);
    let rejection = result.as_ref().err().cloned();
    print_json(&PreparedEvent::from(result))?;

    match rejection {
        Some(report) => Err(AppError::Rejected(report)),
        None => Ok(()),
    }
}

fn run_quality(args: EventInputArgs) -> Result<(), AppError> {
    let event = read_event(args.input.as_deref())?;
    print_json(&match_quality_report(&event.user_data))
}
