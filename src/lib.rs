//! Archives the daily front page scans of the New York Times.
//!
//! Dates are turned into scan addresses ([`address`]), each address is fetched ([`fetch`]) and
//! written below an output root ([`persist`]) by a [`pipeline::Pipeline`] that keeps a fixed
//! number of scans in flight. Every address ends in one [`outcome::Outcome`].

pub mod address;
pub mod config;
pub mod error;
pub mod fetch;
pub mod logging;
pub mod model;
pub mod outcome;
pub mod path;
pub mod persist;
pub mod pipeline;
pub mod report;

pub use address::{AddressGenerator, VariantRule};
pub use config::{Config, VariantSelection};
pub use error::{Error, FetchError, PersistError, Result};
pub use fetch::{Fetcher, HttpFetcher};
pub use model::{Address, DateRange, Exclusion, ScanVariant};
pub use outcome::Outcome;
pub use path::local_path;
pub use persist::Persister;
pub use pipeline::{Pipeline, Summary};
pub use report::{ConsoleReporter, JsonReporter, Reporter};
