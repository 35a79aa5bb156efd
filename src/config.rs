use std::path::PathBuf;

use chrono::{NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

use crate::address::{AddressGenerator, VariantRule};
use crate::error::{Error, Result};
use crate::model::{Exclusion, ScanVariant};
use crate::pipeline::DEFAULT_CONCURRENCY;

pub const DEFAULT_BASE_URL: &str = "http://www.nytimes.com";

/// Which scan variants a run asks for.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VariantSelection {
    Low,
    High,
    #[default]
    All,
}

impl VariantSelection {
    pub fn includes(self, variant: ScanVariant) -> bool {
        match self {
            VariantSelection::Low => variant == ScanVariant::LowResolution,
            VariantSelection::High => variant == ScanVariant::HighResolution,
            VariantSelection::All => true,
        }
    }
}

/// Everything a retrieval run needs to know.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub base_url: String,
    /// Root of the `{YYYY}/{MM}/…` tree.
    pub output_dir: PathBuf,
    /// First day the archive has a low resolution scan for.
    pub low_resolution_start: NaiveDate,
    /// Sunday editions before this day are not published.
    pub low_resolution_sunday_cutover: NaiveDate,
    /// First day the archive has a high resolution scan for.
    pub high_resolution_start: NaiveDate,
    /// Last day to fetch. Defaults to today and is never allowed past it.
    pub end: Option<NaiveDate>,
    /// Restart every selected variant at this day.
    pub from: Option<NaiveDate>,
    pub concurrency: usize,
    pub timeout_secs: u64,
    pub variants: VariantSelection,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            base_url: DEFAULT_BASE_URL.to_string(),
            output_dir: PathBuf::from("."),
            low_resolution_start: ymd(1851, 9, 18),
            low_resolution_sunday_cutover: ymd(1861, 4, 14),
            high_resolution_start: ymd(2012, 7, 6),
            end: None,
            from: None,
            concurrency: DEFAULT_CONCURRENCY,
            timeout_secs: 60,
            variants: VariantSelection::All,
        }
    }
}

impl Config {
    /// Rejects settings no run could succeed with.
    pub fn validate(&self) -> Result<()> {
        if self.concurrency == 0 {
            return Err(Error::ZeroConcurrency);
        }
        self.generator().map(|_| ())
    }

    pub fn generator(&self) -> Result<AddressGenerator> {
        AddressGenerator::new(&self.base_url)
    }

    pub fn end_date(&self, today: NaiveDate) -> NaiveDate {
        self.end.map_or(today, |end| end.min(today))
    }

    /// One rule per selected variant, low resolution first.
    pub fn rules(&self, today: NaiveDate) -> Vec<VariantRule> {
        let end = self.end_date(today);

        ScanVariant::ALL
            .into_iter()
            .filter(|variant| self.variants.includes(*variant))
            .map(|variant| match variant {
                ScanVariant::LowResolution => VariantRule::new(variant, self.low_resolution_start, end)
                    .excluding(Exclusion::WeekdayBefore {
                        weekday: Weekday::Sun,
                        cutover: self.low_resolution_sunday_cutover,
                    }),
                ScanVariant::HighResolution => VariantRule::new(variant, self.high_resolution_start, end),
            })
            .map(|rule| match self.from {
                Some(from) => rule.starting_from(from),
                None => rule,
            })
            .collect()
    }
}

fn ymd(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap_or(NaiveDate::MIN)
}
