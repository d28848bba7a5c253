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

//! Errors raised while resolving a calendar year.

use chrono::NaiveDate;
use thiserror::Error;

use crate::calendar::Name;

/// Calendar result type.
pub type Result<T> = std::result::Result<T, CalendarError>;

/// Every way the resolution of a year can fail.
///
/// All errors are fatal to the year being resolved. Resolution is deterministic so retrying
/// with the same definition reproduces the identical error.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CalendarError {
    /// Variable resolution cannot complete because `variables` depend on one another.
    #[error("cyclic dependency between variables {variables:?} in year {year}")]
    CyclicVariableDependency { year: i32, variables: Vec<Name> },

    /// A variable function, counter or activation rule reads a name that is not visible to it.
    #[error("`{referenced_by}` references unknown name `{name}` in year {year}{}", on_date(.date))]
    UnknownVariableReference {
        year: i32,
        date: Option<NaiveDate>,
        name: Name,
        referenced_by: Name,
    },

    /// A counter's `until` cannot be reached from `date_initial` in its stepping direction.
    #[error("counter `{counter}` cannot step from {date_initial} to {until} in year {year}")]
    InvalidCounterRange {
        year: i32,
        counter: Name,
        date_initial: NaiveDate,
        until: NaiveDate,
    },

    /// A counter's value left the range of `i32` while stepping.
    #[error("counter `{counter}` overflows on {date} in year {year}")]
    CounterOverflow {
        year: i32,
        counter: Name,
        date: NaiveDate,
    },

    /// Two or more candidates tie for the strongest precedence and at least one is exclusive.
    #[error("ambiguous precedence between {celebrations:?} on {date} in year {year}")]
    AmbiguousPrecedence {
        year: i32,
        date: NaiveDate,
        celebrations: Vec<Name>,
    },

    /// A transfer chain did not settle within `bound` hops or ran off the resolved table.
    #[error("transfer of `{celebration}` from {date} did not settle within {bound} days in year {year}")]
    TransferLoopExceeded {
        year: i32,
        date: NaiveDate,
        celebration: Name,
        bound: usize,
    },

    /// The requested year precedes the first year the definition is valid for.
    #[error("year {year} precedes the first valid year {first_valid_year}")]
    YearOutOfRange { year: i32, first_valid_year: i32 },

    /// A celebration refers to a rank that is not declared.
    #[error("celebration `{celebration}` has undeclared rank `{rank}` in year {year}")]
    UnknownRank {
        year: i32,
        celebration: Name,
        rank: Name,
    },

    /// A boolean flag was read as a date or a date was read as a flag.
    #[error("variable `{variable}` is not a {expected} in year {year}")]
    VariableKindMismatch {
        year: i32,
        variable: Name,
        expected: &'static str,
    },

    /// An `mmdd` literal does not name a day of the (leap) year.
    #[error("`{value}` is not a valid `mmdd` month-day")]
    InvalidMonthDay { value: String },

    /// Date arithmetic left the range of representable dates.
    #[error("date arithmetic for `{name}` is out of range in year {year}")]
    DateOutOfRange { year: i32, name: Name },

    /// No calendar is registered under `name`.
    #[error("`{name}` does not exist in calendars")]
    UnknownCalendar { name: String },

    /// A calendar is already registered under `name`. First `pop` the existing calendar.
    #[error("`{name}` already exists in calendars, cannot overwrite")]
    CalendarExists { name: String },
}

fn on_date(date: &Option<NaiveDate>) -> String {
    match date {
        Some(d) => format!(" on {}", d),
        None => String::new(),
    }
}
