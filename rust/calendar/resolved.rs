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
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, instrument};

use crate::calendar::candidates::generate_candidates;
use crate::calendar::resolver::resolve_precedence;
use crate::calendar::{
    cal_date_range, resolve_counters, resolve_variables, CalendarDefinition, CalendarError,
    CounterValue, Name, Result, VariableMap, VariableScope,
};

/// The terminal state of a candidate on one date.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Disposition {
    Winner,
    Commemorated,
    /// Dropped, kept here for diagnostics only.
    Suppressed,
    Omitted,
    /// Moved away; the celebration re-entered the candidates of `to`.
    Transferred { to: NaiveDate },
}

/// A celebration moved from one date to another.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransferRecord {
    pub celebration: Name,
    pub from: NaiveDate,
    pub to: NaiveDate,
}

/// One resolved date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedDay {
    pub date: NaiveDate,
    pub weekday: Weekday,
    /// The annual cycle the date belongs to.
    pub cycle_year: i32,
    /// The value of every counter whose span covers the date.
    pub counters: IndexMap<Name, i32>,
    /// Declared candidates followed by those transferred in.
    pub candidates: Vec<Name>,
    pub dispositions: IndexMap<Name, Disposition>,
    pub winner: Option<Name>,
    /// Ordered by precedence.
    pub commemorations: Vec<Name>,
    /// The rank of the winner.
    pub top_rank: Option<Name>,
}

impl ResolvedDay {
    /// Return the value of a counter on this date.
    pub fn counter(&self, name: &str) -> CounterValue {
        CounterValue {
            number: self.counters.get(&Name::new(name)).copied(),
        }
    }

    /// Whether the celebration is observed on this date, as winner or commemoration.
    pub fn celebrates(&self, name: &str) -> bool {
        let name = Name::new(name);
        self.winner == Some(name) || self.commemorations.contains(&name)
    }

    /// The candidates suppressed on this date.
    pub fn suppressed(&self) -> Vec<Name> {
        self.dispositions
            .iter()
            .filter(|(_, d)| **d == Disposition::Suppressed)
            .map(|(n, _)| *n)
            .collect()
    }
}

/// Return the index of `date` in a contiguous table starting at `first`.
fn offset(first: Option<&ResolvedDay>, date: &NaiveDate, len: usize) -> Option<usize> {
    let days = (*date - first?.date).num_days();
    usize::try_from(days).ok().filter(|i| *i < len)
}

/// The resolved table of one civil year.
///
/// Immutable once constructed and safe to share between threads.
///
/// # Examples
///
/// ```rust
/// # use ordo::calendar::ndt;
/// # use ordo::rites::RiteManager;
/// let roman = RiteManager::new().get("roman").unwrap();
/// let year = roman.resolve(2024).unwrap();
/// assert_eq!(year.len(), 366);
/// assert_eq!(year.occurrences_of("annunciation"), &[ndt(2024, 4, 8)]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedYear {
    pub year: i32,
    pub variables: VariableMap,
    pub(crate) days: Vec<ResolvedDay>,
    pub(crate) transfers: Vec<TransferRecord>,
    pub(crate) occurrences: IndexMap<Name, Vec<NaiveDate>>,
}

impl ResolvedYear {
    /// Resolve civil `year` of `definition`.
    #[instrument(level = "debug", skip(definition))]
    pub fn try_new(definition: &CalendarDefinition, year: i32) -> Result<Self> {
        let first_valid_year = definition.settings.first_valid_year;
        let out_of_range = || CalendarError::YearOutOfRange {
            year,
            first_valid_year,
        };
        if year < first_valid_year {
            return Err(out_of_range());
        }
        let first = NaiveDate::from_ymd_opt(year, 1, 1).ok_or_else(out_of_range)?;
        let last = NaiveDate::from_ymd_opt(year, 12, 31).ok_or_else(out_of_range)?;
        let dates = cal_date_range(&first, &last);

        let variables = resolve_variables(definition, year)?;
        let counters = resolve_counters(definition, &variables, &first, &last)?;
        let candidates = generate_candidates(definition, &variables, &counters, &dates)?;
        let resolution = resolve_precedence(definition, year, &candidates)?;

        let cycle_start = match definition.settings.cycle_start {
            Some(name) => Some(
                VariableScope::new(&variables, Name::new("cycle_start")).date(name.as_str())?,
            ),
            None => None,
        };
        let before_boundary = definition.settings.cycle_starts_before_civil_year_boundary;
        let cycle_year = |date: &NaiveDate| match cycle_start {
            Some(start) if before_boundary && *date >= start => year + 1,
            Some(start) if !before_boundary && *date < start => year - 1,
            _ => year,
        };

        let mut occurrences: IndexMap<Name, Vec<NaiveDate>> = IndexMap::new();
        let mut days = Vec::with_capacity(dates.len());
        for (date, outcome) in resolution.days {
            for name in outcome.winner.iter().chain(outcome.commemorations.iter()) {
                occurrences.entry(*name).or_default().push(date);
            }
            days.push(ResolvedDay {
                date,
                weekday: date.weekday(),
                cycle_year: cycle_year(&date),
                counters: counters
                    .iter()
                    .filter_map(|(name, span)| span.value_on(&date).number.map(|n| (*name, n)))
                    .collect(),
                candidates: outcome.candidates,
                dispositions: outcome.dispositions,
                winner: outcome.winner,
                commemorations: outcome.commemorations,
                top_rank: outcome.top_rank,
            });
        }
        debug!(
            days = days.len(),
            transfers = resolution.transfers.len(),
            "resolved year"
        );
        Ok(ResolvedYear {
            year,
            variables,
            days,
            transfers: resolution.transfers,
            occurrences,
        })
    }

    /// Return the resolved day for `date`, `None` outside the year.
    pub fn day_at(&self, date: &NaiveDate) -> Option<&ResolvedDay> {
        offset(self.days.first(), date, self.days.len()).map(|i| &self.days[i])
    }

    /// The dates on which a celebration is observed, after transfers, in ascending order.
    pub fn occurrences_of(&self, name: &str) -> &[NaiveDate] {
        self.occurrences
            .get(&Name::new(name))
            .map(|v| v.as_slice())
            .unwrap_or(&[])
    }

    /// Return the date of a resolved variable.
    pub fn variable(&self, name: &str) -> Option<NaiveDate> {
        self.variables.date(name)
    }

    /// The days of the year in date order.
    pub fn days(&self) -> impl Iterator<Item = &ResolvedDay> {
        self.days.iter()
    }

    pub fn len(&self) -> usize {
        self.days.len()
    }

    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }

    /// Every transfer in the order it was made.
    pub fn transfers(&self) -> &[TransferRecord] {
        &self.transfers
    }

    /// Every suppressed candidate of the year with its date.
    pub fn suppressed(&self) -> Vec<(NaiveDate, Name)> {
        self.days
            .iter()
            .flat_map(|d| d.suppressed().into_iter().map(move |n| (d.date, n)))
            .collect()
    }
}

/// Resolve civil `year` of `definition` without caching.
pub fn resolve(definition: &CalendarDefinition, year: i32) -> Result<ResolvedYear> {
    ResolvedYear::try_new(definition, year)
}

/// One full annual cycle, assembled from the civil years it spans.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedCycle {
    pub cycle_year: i32,
    pub(crate) days: Vec<ResolvedDay>,
    pub(crate) transfers: Vec<TransferRecord>,
}

impl ResolvedCycle {
    /// Collect the days of `cycle_year` from `years`, which must be given in ascending order.
    pub fn from_years(cycle_year: i32, years: &[Arc<ResolvedYear>]) -> Self {
        let days: Vec<ResolvedDay> = years
            .iter()
            .flat_map(|y| y.days())
            .filter(|d| d.cycle_year == cycle_year)
            .cloned()
            .collect();
        let in_cycle = |date: &NaiveDate| match (days.first(), days.last()) {
            (Some(a), Some(b)) => *date >= a.date && *date <= b.date,
            _ => false,
        };
        let transfers = years
            .iter()
            .flat_map(|y| y.transfers())
            .filter(|t| in_cycle(&t.to))
            .copied()
            .collect();
        ResolvedCycle {
            cycle_year,
            days,
            transfers,
        }
    }

    pub fn day_at(&self, date: &NaiveDate) -> Option<&ResolvedDay> {
        offset(self.days.first(), date, self.days.len()).map(|i| &self.days[i])
    }

    pub fn days(&self) -> impl Iterator<Item = &ResolvedDay> {
        self.days.iter()
    }

    pub fn len(&self) -> usize {
        self.days.len()
    }

    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }

    pub fn transfers(&self) -> &[TransferRecord] {
        &self.transfers
    }
}
