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

use chrono::{Datelike, NaiveDate, Weekday};
use indexmap::IndexMap;

use crate::calendar::{
    CalendarError, CounterSpan, CounterValue, MonthDay, Name, Result, VariableScope,
};

/// The immutable view of one day handed to activation predicates.
///
/// Exposes the resolved variables of the year, the value of every counter on the day, the
/// day-of-week and the numeric date parts, plus relational helpers against anchors.
#[derive(Debug, Clone, Copy)]
pub struct DayContext<'a> {
    scope: VariableScope<'a>,
    counters: &'a IndexMap<Name, CounterSpan>,
    date: NaiveDate,
}

impl<'a> DayContext<'a> {
    /// Create the context for `date` as read by the rule of `scope.reader()`.
    pub fn new(
        scope: VariableScope<'a>,
        counters: &'a IndexMap<Name, CounterSpan>,
        date: NaiveDate,
    ) -> Self {
        DayContext {
            scope,
            counters,
            date,
        }
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    /// The civil year of the date.
    pub fn year(&self) -> i32 {
        self.date.year()
    }

    pub fn month(&self) -> u32 {
        self.date.month()
    }

    pub fn day(&self) -> u32 {
        self.date.day()
    }

    /// The numeric `mmdd` form of the date, e.g. 1225 or 106.
    pub fn mmdd(&self) -> u32 {
        MonthDay::from(&self.date).as_u32()
    }

    pub fn weekday(&self) -> Weekday {
        self.date.weekday()
    }

    /// Whether the date falls on `weekday`.
    pub fn is(&self, weekday: Weekday) -> bool {
        self.date.weekday() == weekday
    }

    /// Return the value of the named counter on this date.
    pub fn counter(&self, name: &str) -> Result<CounterValue> {
        let key = Name::new(name);
        match self.counters.get(&key) {
            Some(span) => Ok(span.value_on(&self.date)),
            None => Err(self.unknown(key)),
        }
    }

    /// Return the date of a variable.
    pub fn var(&self, name: &str) -> Result<NaiveDate> {
        self.scope.date(name).map_err(|e| self.on_date(e))
    }

    /// Return the value of a boolean flag variable.
    pub fn flag(&self, name: &str) -> Result<bool> {
        self.scope.flag(name).map_err(|e| self.on_date(e))
    }

    pub fn add(&self, anchor: &str, days: u32, weekday: Option<Weekday>) -> Result<NaiveDate> {
        self.scope
            .add(anchor, days, weekday)
            .map_err(|e| self.on_date(e))
    }

    pub fn sub(&self, anchor: &str, days: u32, weekday: Option<Weekday>) -> Result<NaiveDate> {
        self.scope
            .sub(anchor, days, weekday)
            .map_err(|e| self.on_date(e))
    }

    /// Whether the date is strictly after the anchor.
    pub fn is_after(&self, anchor: &str) -> Result<bool> {
        Ok(self.date > self.var(anchor)?)
    }

    /// Whether the date is strictly before the anchor.
    pub fn is_before(&self, anchor: &str) -> Result<bool> {
        Ok(self.date < self.var(anchor)?)
    }

    /// Whether the date is the anchor's date.
    pub fn is_anchor(&self, anchor: &str) -> Result<bool> {
        Ok(self.date == self.var(anchor)?)
    }

    /// Whether the date equals `start`, or lies in `[start, end]` when `end` is given.
    pub fn is_on(&self, start: NaiveDate, end: Option<NaiveDate>) -> bool {
        match end {
            None => self.date == start,
            Some(end) => self.date >= start && self.date <= end,
        }
    }

    fn unknown(&self, name: Name) -> CalendarError {
        self.on_date(self.scope.unknown(name))
    }

    fn on_date(&self, err: CalendarError) -> CalendarError {
        match err {
            CalendarError::UnknownVariableReference {
                year,
                date: None,
                name,
                referenced_by,
            } => CalendarError::UnknownVariableReference {
                year,
                date: Some(self.date),
                name,
                referenced_by,
            },
            other => other,
        }
    }
}
