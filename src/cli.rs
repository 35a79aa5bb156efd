use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Parser, ValueEnum};
use frontpage::config::DEFAULT_BASE_URL;
use frontpage::pipeline::DEFAULT_CONCURRENCY;
use frontpage::{Config, VariantSelection};

/// Downloading the daily front page scans of the New York Times into a `{YYYY}/{MM}` folder tree.
/// Low resolution scans (`.jpg`) go back to 1851, high resolution scans (`.pdf`) to 2012.
#[derive(Parser)]
pub(crate) struct Cli {
  /// Where the archive lives. Scans are requested from
  /// `{base-url}/images/{YYYY}/{MM}/{DD}/nytfrontpage/scan.{jpg|pdf}`.
  #[clap(long, env = "FRONTPAGE_BASE_URL", default_value = DEFAULT_BASE_URL)]
  pub(crate) base_url: String,
  /// Root folder of the downloaded tree. [default: current directory]
  #[clap(long, short, env = "FRONTPAGE_OUTPUT_DIR", default_value = ".")]
  pub(crate) output_dir: PathBuf,
  /// Restart every selected variant at this day (e.g. `2020-01-01`) instead of its first
  /// published day.
  #[clap(long, env = "FRONTPAGE_FROM")]
  pub(crate) from: Option<NaiveDate>,
  /// Last day to download. Never later than today. [default: today]
  #[clap(long, env = "FRONTPAGE_TO")]
  pub(crate) to: Option<NaiveDate>,
  /// First day of low resolution scans. [default: 1851-09-18]
  #[clap(long, env = "FRONTPAGE_LOW_RES_START")]
  pub(crate) low_res_start: Option<NaiveDate>,
  /// Sunday editions are skipped for low resolution scans before this day. [default: 1861-04-14]
  #[clap(long, env = "FRONTPAGE_SUNDAY_CUTOVER")]
  pub(crate) sunday_cutover: Option<NaiveDate>,
  /// First day of high resolution scans. [default: 2012-07-06]
  #[clap(long, env = "FRONTPAGE_HIGH_RES_START")]
  pub(crate) high_res_start: Option<NaiveDate>,
  /// How many scans may be downloading at the same time.
  #[clap(long, short, env = "FRONTPAGE_CONCURRENCY", default_value_t = DEFAULT_CONCURRENCY)]
  pub(crate) concurrency: usize,
  /// Per request timeout in seconds.
  #[clap(long, env = "FRONTPAGE_TIMEOUT", default_value_t = 60)]
  pub(crate) timeout: u64,
  /// Which scans to download.
  #[clap(long, value_enum, default_value_t = Variant::All)]
  pub(crate) variant: Variant,
  /// Report format on stdout.
  #[clap(long, value_enum, default_value_t = Format::Text)]
  pub(crate) format: Format,
  /// Log diagnostics to stderr (`RUST_LOG` takes precedence).
  #[clap(long, short)]
  pub(crate) verbose: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum Variant {
  Low,
  High,
  All,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum Format {
  Text,
  Json,
}

impl Cli {
  pub(crate) fn to_config(&self) -> Config {
    let defaults = Config::default();
    Config {
      base_url: self.base_url.clone(),
      output_dir: self.output_dir.clone(),
      low_resolution_start: self.low_res_start.unwrap_or(defaults.low_resolution_start),
      low_resolution_sunday_cutover: self.sunday_cutover.unwrap_or(defaults.low_resolution_sunday_cutover),
      high_resolution_start: self.high_res_start.unwrap_or(defaults.high_resolution_start),
      end: self.to,
      from: self.from,
      concurrency: self.concurrency,
      timeout_secs: self.timeout,
      variants: match self.variant {
        Variant::Low => VariantSelection::Low,
        Variant::High => VariantSelection::High,
        Variant::All => VariantSelection::All,
      },
    }
  }
}
