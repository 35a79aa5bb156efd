use std::fmt::{Display, Formatter};

use chrono::{Datelike, NaiveDate, Weekday};
use reqwest::Url;
use serde::{Deserialize, Serialize};

/// An inclusive span of calendar days. Iterating a range whose `start` lies after its `end`
/// yields nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        DateRange { start, end }
    }

    /// Lazily walks every day from `start` up to and including `end`.
    pub fn days(&self) -> impl Iterator<Item = NaiveDate> {
        let end = self.end;
        self.start.iter_days().take_while(move |day| *day <= end)
    }

    pub fn is_empty(&self) -> bool {
        self.start > self.end
    }
}

/// The two kinds of front page scans published by the archive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScanVariant {
    LowResolution,
    HighResolution,
}

impl ScanVariant {
    pub const ALL: [ScanVariant; 2] = [ScanVariant::LowResolution, ScanVariant::HighResolution];

    pub fn extension(self) -> &'static str {
        match self {
            ScanVariant::LowResolution => "jpg",
            ScanVariant::HighResolution => "pdf",
        }
    }

    /// Builds `{base}/images/{YYYY}/{MM}/{DD}/nytfrontpage/scan.{ext}`.
    ///
    /// `base` must be able to carry path segments; [`crate::address::AddressGenerator`]
    /// refuses any base URL that cannot.
    pub(crate) fn url(self, base: &Url, date: NaiveDate) -> Url {
        let mut url = base.clone();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.pop_if_empty().extend([
                "images".to_string(),
                format!("{:04}", date.year()),
                format!("{:02}", date.month()),
                format!("{:02}", date.day()),
                "nytfrontpage".to_string(),
                format!("scan.{}", self.extension()),
            ]);
        }
        url
    }
}

impl Display for ScanVariant {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            ScanVariant::LowResolution => f.write_str("low-resolution"),
            ScanVariant::HighResolution => f.write_str("high-resolution"),
        }
    }
}

/// Rule that drops candidate days before they become addresses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Exclusion {
    /// Skips every `weekday` strictly before `cutover`. The cutover day itself is kept.
    WeekdayBefore { weekday: Weekday, cutover: NaiveDate },
}

impl Exclusion {
    pub fn excludes(&self, date: NaiveDate) -> bool {
        match *self {
            Exclusion::WeekdayBefore { weekday, cutover } => date < cutover && date.weekday() == weekday,
        }
    }
}

/// One remote scan to retrieve. Built once by the generator and never changed afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Address {
    pub date: NaiveDate,
    pub variant: ScanVariant,
    pub url: Url,
}

#[cfg(test)]
mod tests {
    use chrono::{NaiveDate, Weekday};
    use reqwest::Url;

    use crate::model::{DateRange, Exclusion, ScanVariant};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn given_range_across_month_end_when_days_then_every_day_in_order() {
        // Given
        let range = DateRange::new(date(2020, 1, 30), date(2020, 2, 2));

        // When
        let days: Vec<NaiveDate> = range.days().collect();

        // Then
        assert_eq!(
            days,
            vec![date(2020, 1, 30), date(2020, 1, 31), date(2020, 2, 1), date(2020, 2, 2)]
        );
    }

    #[test]
    fn given_start_after_end_when_days_then_nothing() {
        let range = DateRange::new(date(2020, 1, 2), date(2020, 1, 1));

        assert!(range.is_empty());
        assert_eq!(range.days().count(), 0);
    }

    #[test]
    fn given_base_url_when_url_then_scan_location_with_padded_components() {
        // Given
        let base = Url::parse("http://www.nytimes.com").unwrap();

        // When
        let low = ScanVariant::LowResolution.url(&base, date(1851, 9, 18));
        let high = ScanVariant::HighResolution.url(&base, date(2017, 10, 2));

        // Then
        assert_eq!(low.as_str(), "http://www.nytimes.com/images/1851/09/18/nytfrontpage/scan.jpg");
        assert_eq!(high.as_str(), "http://www.nytimes.com/images/2017/10/02/nytfrontpage/scan.pdf");
    }

    #[test]
    fn given_base_url_with_path_when_url_then_segments_are_appended() {
        let base = Url::parse("http://mirror.local/archive/").unwrap();

        let url = ScanVariant::LowResolution.url(&base, date(2020, 1, 1));

        assert_eq!(url.as_str(), "http://mirror.local/archive/images/2020/01/01/nytfrontpage/scan.jpg");
    }

    #[test]
    fn given_sunday_exclusion_when_excludes_then_only_sundays_before_cutover() {
        // Given
        let exclusion = Exclusion::WeekdayBefore { weekday: Weekday::Sun, cutover: date(1861, 4, 14) };

        // Then
        assert!(exclusion.excludes(date(1851, 9, 21)));
        assert!(!exclusion.excludes(date(1851, 9, 22)));
        assert!(!exclusion.excludes(date(1861, 4, 14)));
        assert!(!exclusion.excludes(date(1861, 4, 21)));
    }
}
