// SPDX-License-Identifier: LicenseRef-Rateslib-Dual
//
// Copyright (c) 2026 Siffrorna Technology Limited
// This code cannot be used or copied externally
//
// Dual-licensed: Free Educational Licence or Paid Commercial Licence (commercial/professional use)
// Source-available, not open source.
//
// See LICENSE and https://rateslib.com/py/en/latest/i_licence.html for details,
// and/or contact info (at) rateslib (dot) com
////////////////////////////////////////////////////////////////////////////////////////////////////

use chrono::prelude::*;
use chrono::Days;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

use crate::calendar::{CalendarError, Result};

/// Create a `NaiveDate`.
///
/// Panics if date values are invalid.
pub fn ndt(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("`year`, `month` `day` are invalid.")
}

/// The direction of travel for a transfer or a backwards counter.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Before,
    After,
}

impl Direction {
    /// Return the adjacent date in this direction, `None` at the edge of chrono's range.
    pub fn step(&self, date: &NaiveDate) -> Option<NaiveDate> {
        match self {
            Direction::Before => date.pred_opt(),
            Direction::After => date.succ_opt(),
        }
    }
}

/// A month and day without a year, written as an `mmdd` literal such as `"1225"`.
///
/// The 29th of February is a valid `MonthDay`; it simply never matches a date in a common year.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MonthDay {
    month: u32,
    day: u32,
}

impl MonthDay {
    /// Create a `MonthDay` from numeric values, validated against a leap year.
    pub fn try_new(month: u32, day: u32) -> Result<Self> {
        match NaiveDate::from_ymd_opt(2000, month, day) {
            Some(_) => Ok(MonthDay { month, day }),
            None => Err(CalendarError::InvalidMonthDay {
                value: format!("{:02}{:02}", month, day),
            }),
        }
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    pub fn day(&self) -> u32 {
        self.day
    }

    /// The date this month-day falls on in `year`, if it exists in that year.
    pub fn on(&self, year: i32) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(year, self.month, self.day)
    }

    /// Whether `date` falls on this month-day.
    pub fn matches(&self, date: &NaiveDate) -> bool {
        date.month() == self.month && date.day() == self.day
    }

    /// The numeric `mmdd` form, e.g. 1225 or 106.
    pub fn as_u32(&self) -> u32 {
        self.month * 100 + self.day
    }
}

impl FromStr for MonthDay {
    type Err = CalendarError;

    fn from_str(s: &str) -> Result<Self> {
        let err = || CalendarError::InvalidMonthDay {
            value: s.to_string(),
        };
        if s.len() != 4 || !s.chars().all(|c| c.is_ascii_digit()) {
            return Err(err());
        }
        let month: u32 = s[0..2].parse().map_err(|_| err())?;
        let day: u32 = s[2..4].parse().map_err(|_| err())?;
        MonthDay::try_new(month, day).map_err(|_| err())
    }
}

impl From<&NaiveDate> for MonthDay {
    fn from(date: &NaiveDate) -> Self {
        MonthDay {
            month: date.month(),
            day: date.day(),
        }
    }
}

impl fmt::Display for MonthDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}{:02}", self.month, self.day)
    }
}

impl Serialize for MonthDay {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for MonthDay {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        MonthDay::from_str(&s).map_err(serde::de::Error::custom)
    }
}

/// Return `date` if it falls on `weekday`, or the first such date after it.
pub fn roll_forward_weekday(date: &NaiveDate, weekday: Weekday) -> Option<NaiveDate> {
    let ahead = (7 + weekday.num_days_from_monday() - date.weekday().num_days_from_monday()) % 7;
    date.checked_add_days(Days::new(ahead.into()))
}

/// Return `date` if it falls on `weekday`, or the last such date before it.
pub fn roll_backward_weekday(date: &NaiveDate, weekday: Weekday) -> Option<NaiveDate> {
    let behind = (7 + date.weekday().num_days_from_monday() - weekday.num_days_from_monday()) % 7;
    date.checked_sub_days(Days::new(behind.into()))
}

/// Move `days` calendar days after `date`, or to the `days`-th `weekday` strictly after it.
///
/// With a `weekday`, `add_days(christmas, 1, Some(Sun))` is the first Sunday after Christmas.
/// A count of zero with a `weekday` rolls forward to the nearest such day on or after `date`.
pub fn add_days(date: &NaiveDate, days: u32, weekday: Option<Weekday>) -> Option<NaiveDate> {
    match weekday {
        None => date.checked_add_days(Days::new(days.into())),
        Some(w) => {
            let shift = if days == 0 { 0 } else { 7 * (days - 1) + 1 };
            roll_forward_weekday(&date.checked_add_days(Days::new(shift.into()))?, w)
        }
    }
}

/// Move `days` calendar days before `date`, or to the `days`-th `weekday` strictly before it.
///
/// With a `weekday`, `sub_days(christmas, 4, Some(Sun))` is the first Sunday of Advent.
pub fn sub_days(date: &NaiveDate, days: u32, weekday: Option<Weekday>) -> Option<NaiveDate> {
    match weekday {
        None => date.checked_sub_days(Days::new(days.into())),
        Some(w) => {
            let shift = if days == 0 { 0 } else { 7 * (days - 1) + 1 };
            roll_backward_weekday(&date.checked_sub_days(Days::new(shift.into()))?, w)
        }
    }
}

/// Return a vector of calendar dates between a start and end, inclusive.
pub fn cal_date_range(start: &NaiveDate, end: &NaiveDate) -> Vec<NaiveDate> {
    start.iter_days().take_while(|d| d <= end).collect()
}

/// Return every date of the civil `year`.
pub fn year_dates(year: i32) -> Vec<NaiveDate> {
    cal_date_range(&ndt(year, 1, 1), &ndt(year, 12, 31))
}
