use std::iter::FusedIterator;

use chrono::{Days, NaiveDate};

use crate::{Error, Result};

/// Date format accepted on the command line, e.g. `12/30/2016`.
pub const INCOMING_DATE_FORMAT: &str = "%m/%d/%Y";

pub fn parse_date(input: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(input.trim(), INCOMING_DATE_FORMAT).map_err(|_| {
        Error::invalid_input(format!(
            "Incorrect date format '{}', use MM/DD/YYYY",
            input
        ))
    })
}

/// Inclusive range of calendar days.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    start: NaiveDate,
    end: NaiveDate,
}

#[allow(clippy::len_without_is_empty)]
impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self> {
        if start > end {
            return Err(Error::invalid_input(format!(
                "Range start {} is after range end {}",
                start, end
            )));
        }
        Ok(DateRange { start, end })
    }

    pub fn parse(start: &str, end: &str) -> Result<Self> {
        DateRange::new(parse_date(start)?, parse_date(end)?)
    }

    /// Builds a range from optional bounds. Neither bound means no range;
    /// exactly one is an error since both are required.
    pub fn from_bounds(start: Option<&str>, end: Option<&str>) -> Result<Option<Self>> {
        match (start, end) {
            (None, None) => Ok(None),
            (Some(start), Some(end)) => DateRange::parse(start, end).map(Some),
            (Some(_), None) => Err(Error::invalid_input(
                "No end date specified for range, both begin and end are required",
            )),
            (None, Some(_)) => Err(Error::invalid_input(
                "No start date specified for range, both begin and end are required",
            )),
        }
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }

    /// Never zero: a range holds at least its start day.
    pub fn len(&self) -> usize {
        (self.end - self.start).num_days() as usize + 1
    }

    /// A fresh iterator over the range; the range itself is never consumed.
    pub fn iter(&self) -> DateIter {
        DateIter {
            next: Some(self.start),
            end: self.end,
        }
    }
}

impl IntoIterator for DateRange {
    type Item = NaiveDate;
    type IntoIter = DateIter;

    fn into_iter(self) -> DateIter {
        self.iter()
    }
}

impl IntoIterator for &DateRange {
    type Item = NaiveDate;
    type IntoIter = DateIter;

    fn into_iter(self) -> DateIter {
        self.iter()
    }
}

#[derive(Debug, Clone)]
pub struct DateIter {
    next: Option<NaiveDate>,
    end: NaiveDate,
}

impl Iterator for DateIter {
    type Item = NaiveDate;

    fn next(&mut self) -> Option<NaiveDate> {
        let current = self.next?;
        self.next = if current < self.end {
            current.checked_add_days(Days::new(1))
        } else {
            None
        };
        Some(current)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self
            .next
            .map_or(0, |next| (self.end - next).num_days() as usize + 1);
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for DateIter {}

impl FusedIterator for DateIter {}

/// Date modes selected on the command line. They may be combined.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DateModes {
    pub range: Option<DateRange>,
    pub date: Option<NaiveDate>,
    pub today: bool,
}

impl DateModes {
    pub fn parse(
        begin: Option<&str>,
        end: Option<&str>,
        date: Option<&str>,
        today: bool,
    ) -> Result<Self> {
        Ok(DateModes {
            range: DateRange::from_bounds(begin, end)?,
            date: date.map(parse_date).transpose()?,
            today,
        })
    }

    /// True when no mode was chosen and today is used instead.
    pub fn implies_today(&self) -> bool {
        self.range.is_none() && self.date.is_none() && !self.today
    }

    /// Dates to fetch: the range, then the single date, then today.
    /// A date requested by more than one mode is listed once.
    pub fn dates(&self, today: NaiveDate) -> Vec<NaiveDate> {
        let mut dates: Vec<NaiveDate> = self
            .range
            .map(|range| range.iter().collect())
            .unwrap_or_default();
        let from_range = dates.len();

        let mut extra = Vec::with_capacity(2);
        if let Some(date) = self.date {
            extra.push(date);
        }
        if self.today || self.implies_today() {
            extra.push(today);
        }
        for date in extra {
            let in_range = self.range.map_or(false, |range| range.contains(date));
            if !in_range && !dates[from_range..].contains(&date) {
                dates.push(date);
            }
        }
        dates
    }
}
