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

//! Ordinal counters stepping over spans of days, e.g. the week of Lent.

use chrono::{Datelike, NaiveDate};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::calendar::{
    CalendarDefinition, CalendarError, CounterDef, Direction, Name, Result, Until, VariableMap,
    VariableScope,
};

/// The value of a counter on one day: `None` outside the counter's span.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CounterValue {
    pub number: Option<i32>,
}

impl CounterValue {
    pub fn has_value(&self) -> bool {
        self.number.is_some()
    }

    pub fn number(&self) -> Option<i32> {
        self.number
    }

    /// Whether the counter has a value equal to `n`.
    pub fn is(&self, n: i32) -> bool {
        self.number == Some(n)
    }

    /// Whether the counter has a value of at least `n`.
    pub fn at_least(&self, n: i32) -> bool {
        self.number.is_some_and(|v| v >= n)
    }
}

/// The span of one counter in one year, with the value on each day of the span.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CounterSpan {
    pub name: Name,
    pub direction: Direction,
    values: IndexMap<NaiveDate, i32>,
}

impl CounterSpan {
    pub fn value_on(&self, date: &NaiveDate) -> CounterValue {
        CounterValue {
            number: self.values.get(date).copied(),
        }
    }

    /// The days of the span within the resolved table, in walking order.
    pub fn dates(&self) -> impl Iterator<Item = &NaiveDate> {
        self.values.keys()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Walk a counter from its initial date, recording the values that fall in `[first, last]`.
///
/// The value changes by `value_step` on each qualifying day after the initial date. The span
/// excludes `until`; an indefinite counter runs to the edge of the table.
pub fn resolve_counter(
    name: Name,
    counter: &CounterDef,
    variables: &VariableMap,
    first: &NaiveDate,
    last: &NaiveDate,
) -> Result<CounterSpan> {
    let scope = VariableScope::new(variables, name);
    let direction = counter.date_step;
    let mut span = CounterSpan {
        name,
        direction,
        values: IndexMap::new(),
    };

    let Some(start) = counter.date_initial.resolve(&scope)? else {
        return Ok(span);
    };
    let until = match &counter.until {
        Until::Indefinite => None,
        Until::On(date_ref) => {
            Some(date_ref.resolve(&scope)?.ok_or_else(|| scope.out_of_range())?)
        }
    };
    if let Some(until) = until {
        let unreachable = match direction {
            Direction::After => until < start,
            Direction::Before => until > start,
        };
        if unreachable {
            return Err(CalendarError::InvalidCounterRange {
                year: variables.year(),
                counter: name,
                date_initial: start,
                until,
            });
        }
    }

    let past_table = |d: &NaiveDate| match direction {
        Direction::After => d > last,
        Direction::Before => d < first,
    };
    let mut date = start;
    let mut number = counter.value_initial;
    while Some(date) != until && !past_table(&date) {
        if date != start
            && counter
                .value_step_on
                .map_or(true, |weekday| date.weekday() == weekday)
        {
            number = number.checked_add(counter.value_step).ok_or_else(|| {
                CalendarError::CounterOverflow {
                    year: variables.year(),
                    counter: name,
                    date,
                }
            })?;
        }
        if date >= *first && date <= *last {
            span.values.insert(date, number);
        }
        date = match direction.step(&date) {
            Some(d) => d,
            None => break,
        };
    }
    Ok(span)
}

/// Resolve every counter of `definition` over the table `[first, last]`.
pub fn resolve_counters(
    definition: &CalendarDefinition,
    variables: &VariableMap,
    first: &NaiveDate,
    last: &NaiveDate,
) -> Result<IndexMap<Name, CounterSpan>> {
    definition
        .counters
        .iter()
        .map(|(name, counter)| {
            resolve_counter(*name, counter, variables, first, last).map(|span| (*name, span))
        })
        .collect()
}
