use std::process;

use clap::Parser;
use tracing::{Dispatch, Level, dispatcher, error};
use tracing_subscriber::fmt as tracing_fmt;

use quaderno::config::{CliArgs, Settings};
use quaderno::export::{ExportError, Exporter};
use quaderno::telemetry;

#[tokio::main]
async fn main() {
    if let Err(error) = run().await {
        report_application_error(&error);
        process::exit(1);
    }
}

fn report_application_error(error: &ExportError) {
    if dispatcher::has_been_set() {
        error!(error = %error, "export error");
        return;
    }

    let subscriber = tracing_fmt().with_max_level(Level::ERROR).finish();
    let dispatch = Dispatch::new(subscriber);
    dispatcher::with_default(&dispatch, || {
        error!(error = %error, "export error");
    });
}

async fn run() -> Result<(), ExportError> {
    let args = CliArgs::parse();
    let settings = Settings::from_cli(args)?;
    telemetry::init()?;

    let exporter = Exporter::new(settings)?;
    exporter.run().await?;
    Ok(())
}
