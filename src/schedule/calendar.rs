use chrono::{Datelike, Days, Months, NaiveDate, Weekday};

use crate::errors::{CollectionsError, Result};
use crate::types::Frequency;

/// collection calendar for one credit
///
/// Daily credits are not collected on sundays unless `sunday_collections`
/// is set. A daily credit whose start date is a sunday has its first
/// installment on the following monday.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CollectionCalendar {
    pub frequency: Frequency,
    pub start_date: NaiveDate,
    pub sunday_collections: bool,
}

impl CollectionCalendar {
    pub fn new(frequency: Frequency, start_date: NaiveDate, sunday_collections: bool) -> Self {
        Self {
            frequency,
            start_date,
            sunday_collections,
        }
    }

    fn skips_sundays(&self) -> bool {
        self.frequency == Frequency::Daily && !self.sunday_collections
    }

    /// due date of the first installment
    pub fn first_due_date(&self) -> Result<NaiveDate> {
        if self.skips_sundays() && is_sunday(self.start_date) {
            return add_days(self.start_date, 1);
        }
        Ok(self.start_date)
    }

    /// due date of installment `number` (1-based)
    pub fn due_date(&self, number: u32) -> Result<NaiveDate> {
        if number == 0 {
            return Err(CollectionsError::InvalidInstallmentNumber { number });
        }
        let steps = number - 1;

        match self.frequency {
            Frequency::Monthly => self
                .start_date
                .checked_add_months(Months::new(steps))
                .ok_or_else(|| out_of_range(self.start_date, steps)),
            Frequency::Daily if self.skips_sundays() => {
                // six collection days per calendar week
                let first = self.first_due_date()?;
                let mut date = add_days(first, u64::from(steps / 6) * 7)?;
                for _ in 0..steps % 6 {
                    date = next_collection_day(date)?;
                }
                Ok(date)
            }
            Frequency::Daily | Frequency::Weekly | Frequency::Biweekly => {
                let period = self.frequency.period_days().unwrap_or(1) as u64;
                add_days(self.start_date, u64::from(steps) * period)
            }
        }
    }

    /// due dates of installments 1..=count, in order
    pub fn due_dates(&self, count: u32) -> Result<Vec<NaiveDate>> {
        let mut dates = Vec::with_capacity(count as usize);
        if count == 0 {
            return Ok(dates);
        }

        match self.frequency {
            Frequency::Daily if self.skips_sundays() => {
                let mut date = self.first_due_date()?;
                dates.push(date);
                for _ in 1..count {
                    date = next_collection_day(date)?;
                    dates.push(date);
                }
            }
            _ => {
                for number in 1..=count {
                    dates.push(self.due_date(number)?);
                }
            }
        }

        Ok(dates)
    }

    /// installments falling due on or before `as_of`, capped at `total`
    ///
    /// Closed form of counting `due_dates(total)` entries `<= as_of`.
    pub fn installments_due_by(&self, as_of: NaiveDate, total: u32) -> Result<u32> {
        let first = self.first_due_date()?;
        if total == 0 || as_of < first {
            return Ok(0);
        }

        let count: i64 = match self.frequency {
            Frequency::Monthly => {
                let mut months = (as_of.year() - first.year()) as i64 * 12
                    + as_of.month() as i64
                    - first.month() as i64;
                let steps = u32::try_from(months).unwrap_or(u32::MAX).min(total);
                if steps == total || self.due_date(steps + 1)? > as_of {
                    months -= 1;
                }
                months.min(total as i64 - 1) + 1
            }
            Frequency::Daily if self.skips_sundays() => {
                let days = (as_of - first).num_days() + 1;
                let mut count = days / 7 * 6;
                let mut date = add_days(first, (days / 7 * 7) as u64)?;
                while date <= as_of {
                    if !is_sunday(date) {
                        count += 1;
                    }
                    date = add_days(date, 1)?;
                }
                count
            }
            Frequency::Daily | Frequency::Weekly | Frequency::Biweekly => {
                let period = self.frequency.period_days().unwrap_or(1);
                (as_of - first).num_days() / period + 1
            }
        };

        Ok(count.clamp(0, total as i64) as u32)
    }
}

pub fn is_sunday(date: NaiveDate) -> bool {
    date.weekday() == Weekday::Sun
}

/// next day after `date` that is not a sunday
fn next_collection_day(date: NaiveDate) -> Result<NaiveDate> {
    let next = add_days(date, 1)?;
    if is_sunday(next) {
        add_days(next, 1)
    } else {
        Ok(next)
    }
}

fn add_days(date: NaiveDate, days: u64) -> Result<NaiveDate> {
    date.checked_add_days(Days::new(days))
        .ok_or_else(|| CollectionsError::InvalidDate {
            message: format!("{} + {} days is out of range", date, days),
        })
}

fn out_of_range(start: NaiveDate, months: u32) -> CollectionsError {
    CollectionsError::InvalidDate {
        message: format!("{} + {} months is out of range", start, months),
    }
}
