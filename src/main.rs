use std::process;

use blogdesk::{
    application::error::error_chain,
    cli::{self, CliError},
    config,
    infra::telemetry,
};
use tracing::{Dispatch, Level, debug, dispatcher, error};
use tracing_subscriber::fmt as tracing_fmt;

#[tokio::main]
async fn main() {
    if let Err(error) = run().await {
        report_error(&error);
        process::exit(1);
    }
}

async fn run() -> Result<(), CliError> {
    let (cli_args, settings) = config::load_with_cli()?;
    telemetry::init(&settings.logging)?;
    debug!(target = "blogdesk::main", command = ?cli_args.command, "starting");
    cli::run(cli_args, settings).await
}

fn report_error(error: &CliError) {
    let chain = error_chain(error).join(": ");

    if dispatcher::has_been_set() {
        error!(error = %chain, "command failed");
        return;
    }

    let subscriber = tracing_fmt()
        .with_max_level(Level::ERROR)
        .with_writer(std::io::stderr)
        .finish();
    let dispatch = Dispatch::new(subscriber);
    dispatcher::with_default(&dispatch, || {
        error!(error = %chain, "command failed");
    });
}
