use chrono::NaiveDate;
use reqwest::Url;

use crate::error::{Error, Result};
use crate::model::{Address, DateRange, Exclusion, ScanVariant};

/// Which days of a variant are worth asking the archive for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VariantRule {
    pub variant: ScanVariant,
    pub range: DateRange,
    pub exclusion: Option<Exclusion>,
}

impl VariantRule {
    pub fn new(variant: ScanVariant, start: NaiveDate, end: NaiveDate) -> Self {
        VariantRule { variant, range: DateRange::new(start, end), exclusion: None }
    }

    pub fn excluding(mut self, exclusion: Exclusion) -> Self {
        self.exclusion = Some(exclusion);
        self
    }

    /// Restarts the rule at `date` unless the rule already begins later.
    pub fn starting_from(mut self, date: NaiveDate) -> Self {
        self.range.start = self.range.start.max(date);
        self
    }

    fn admits(&self, date: NaiveDate) -> bool {
        !self.exclusion.is_some_and(|exclusion| exclusion.excludes(date))
    }
}

/// Turns variant rules into lazy, date ordered streams of [`Address`]es.
#[derive(Debug, Clone)]
pub struct AddressGenerator {
    base: Url,
}

impl AddressGenerator {
    pub fn new(base_url: &str) -> Result<Self> {
        let base = Url::parse(base_url).map_err(|e| Error::InvalidBaseUrl {
            url: base_url.to_string(),
            reason: e.to_string(),
        })?;

        if base.cannot_be_a_base() || !matches!(base.scheme(), "http" | "https") {
            return Err(Error::InvalidBaseUrl {
                url: base_url.to_string(),
                reason: "expected an http(s) url that can carry a path".to_string(),
            });
        }

        Ok(AddressGenerator { base })
    }

    /// One address per admitted day of `rule`, oldest first. Nothing is computed until the
    /// iterator is pulled.
    pub fn addresses(&self, rule: VariantRule) -> impl Iterator<Item = Address> + Send + 'static {
        let base = self.base.clone();
        rule.range
            .days()
            .filter(move |date| rule.admits(*date))
            .map(move |date| Address { date, variant: rule.variant, url: rule.variant.url(&base, date) })
    }

    /// Drains the rules one after another. Dates ascend within a variant; nothing is promised
    /// across variants.
    pub fn merged(&self, rules: Vec<VariantRule>) -> impl Iterator<Item = Address> + Send + 'static {
        let generator = self.clone();
        rules.into_iter().flat_map(move |rule| generator.addresses(rule))
    }
}

#[cfg(test)]
mod tests {
    use chrono::{Datelike, NaiveDate, Weekday};

    use crate::address::{AddressGenerator, VariantRule};
    use crate::error::Error;
    use crate::model::{Exclusion, ScanVariant};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn generator() -> AddressGenerator {
        AddressGenerator::new("http://www.nytimes.com").unwrap()
    }

    fn sunday_rule(start: NaiveDate, end: NaiveDate) -> VariantRule {
        VariantRule::new(ScanVariant::LowResolution, start, end)
            .excluding(Exclusion::WeekdayBefore { weekday: Weekday::Sun, cutover: date(1861, 4, 14) })
    }

    #[test]
    fn given_range_without_exclusion_when_addresses_then_one_per_day_ascending() {
        // Given
        let rule = VariantRule::new(ScanVariant::HighResolution, date(2012, 7, 6), date(2012, 8, 4));

        // When
        let addresses: Vec<_> = generator().addresses(rule).collect();

        // Then
        assert_eq!(addresses.len(), 30);
        assert!(addresses.windows(2).all(|pair| pair[0].date < pair[1].date));
        assert!(addresses.iter().all(|a| a.variant == ScanVariant::HighResolution));
        assert_eq!(addresses[0].url.as_str(), "http://www.nytimes.com/images/2012/07/06/nytfrontpage/scan.pdf");
    }

    #[test]
    fn given_start_after_end_when_addresses_then_empty() {
        let rule = VariantRule::new(ScanVariant::LowResolution, date(2020, 1, 3), date(2020, 1, 1));

        assert_eq!(generator().addresses(rule).count(), 0);
    }

    #[test]
    fn given_sunday_before_cutover_when_addresses_then_it_is_skipped() {
        // Given
        let rule = sunday_rule(date(1851, 9, 18), date(1851, 9, 24));

        // When
        let dates: Vec<_> = generator().addresses(rule).map(|a| a.date).collect();

        // Then
        assert_eq!(
            dates,
            vec![date(1851, 9, 18), date(1851, 9, 19), date(1851, 9, 20), date(1851, 9, 22), date(1851, 9, 23), date(1851, 9, 24)]
        );
    }

    #[test]
    fn given_range_around_cutover_when_addresses_then_sundays_appear_from_cutover_on() {
        // Given
        let rule = sunday_rule(date(1861, 4, 1), date(1861, 4, 30));

        // When
        let sundays: Vec<_> = generator()
            .addresses(rule)
            .map(|a| a.date)
            .filter(|d| d.weekday() == Weekday::Sun)
            .collect();

        // Then
        assert_eq!(sundays, vec![date(1861, 4, 14), date(1861, 4, 21), date(1861, 4, 28)]);
    }

    #[test]
    fn given_unbounded_looking_rule_when_taking_a_few_then_consumer_short_circuits() {
        let rule = VariantRule::new(ScanVariant::LowResolution, date(1851, 9, 18), NaiveDate::MAX);

        let first: Vec<_> = generator().addresses(rule).take(3).map(|a| a.date).collect();

        assert_eq!(first, vec![date(1851, 9, 18), date(1851, 9, 19), date(1851, 9, 20)]);
    }

    #[test]
    fn given_restart_date_when_starting_from_then_earlier_days_are_not_generated() {
        // Given
        let rule = VariantRule::new(ScanVariant::HighResolution, date(2012, 7, 6), date(2012, 7, 31));

        // When
        let restarted = rule.starting_from(date(2012, 7, 30));
        let untouched = rule.starting_from(date(2000, 1, 1));

        // Then
        assert_eq!(generator().addresses(restarted).count(), 2);
        assert_eq!(untouched.range.start, date(2012, 7, 6));
    }

    #[test]
    fn given_two_rules_when_merged_then_each_variant_keeps_its_order() {
        // Given
        let rules = vec![
            VariantRule::new(ScanVariant::LowResolution, date(2020, 1, 1), date(2020, 1, 3)),
            VariantRule::new(ScanVariant::HighResolution, date(2020, 1, 2), date(2020, 1, 3)),
        ];

        // When
        let merged: Vec<_> = generator().merged(rules).collect();

        // Then
        assert_eq!(merged.len(), 5);
        for variant in ScanVariant::ALL {
            let dates: Vec<_> = merged.iter().filter(|a| a.variant == variant).map(|a| a.date).collect();
            assert!(dates.windows(2).all(|pair| pair[0] < pair[1]));
        }
    }

    #[test]
    fn given_malformed_base_url_when_new_then_fatal_error() {
        assert!(matches!(AddressGenerator::new("not a url"), Err(Error::InvalidBaseUrl { .. })));
        assert!(matches!(AddressGenerator::new("mailto:desk@nytimes.com"), Err(Error::InvalidBaseUrl { .. })));
    }
}
