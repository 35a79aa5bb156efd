mod cli;

use std::io;
use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration;

use chrono::Local;
use clap::Parser;
use cli::{Cli, Format};
use frontpage::logging::init_logging;
use frontpage::{ConsoleReporter, Error, HttpFetcher, JsonReporter, Persister, Pipeline, Reporter, Summary};

#[tokio::main]
async fn main() -> ExitCode {
  let cli = Cli::parse();
  init_logging(cli.verbose);

  let result = run(&cli).await;
  if let Err(error) = &result {
    tracing::error!(%error, "front page retrieval could not start");
    eprintln!("Error: {error}");
  }
  ExitCode::from(exit_status(&result))
}

/// `0` when every address was saved, `1` when any failed or the run was interrupted, `2` when
/// the run could not start.
fn exit_status(result: &Result<Summary, Error>) -> u8 {
  match result {
    Ok(summary) if summary.is_clean() => 0,
    Ok(_) => 1,
    Err(_) => 2,
  }
}

async fn run(cli: &Cli) -> Result<Summary, Error> {
  let config = cli.to_config();
  config.validate()?;
  tracing::debug!(config = %serde_json::to_string(&config)?, "effective configuration");

  let addresses = config.generator()?.merged(config.rules(Local::now().date_naive()));
  let fetcher = Arc::new(HttpFetcher::new(Duration::from_secs(config.timeout_secs))?);
  let pipeline = Pipeline::new(fetcher, Persister::new(&config.output_dir), config.concurrency)?;

  let cancel = pipeline.cancellation();
  tokio::spawn(async move {
    if tokio::signal::ctrl_c().await.is_ok() {
      tracing::warn!("interrupted, letting in-flight scans finish");
      cancel.cancel();
    }
  });

  let mut reporter: Box<dyn Reporter> = match cli.format {
    Format::Text => Box::new(ConsoleReporter::stdout()?),
    Format::Json => Box::new(JsonReporter::new(io::stdout())),
  };

  pipeline.run(addresses, reporter.as_mut()).await
}
