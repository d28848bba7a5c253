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

//! Evaluation of activation rules into the candidate list of each day.

use chrono::NaiveDate;
use indexmap::IndexMap;
use tracing::trace;

use crate::calendar::{
    Activation, CalendarDefinition, CounterSpan, DayContext, Name, Result, VariableMap,
    VariableScope,
};

/// The candidates of every date in `dates`, in celebration declaration order.
///
/// Single-date activations are resolved once for the year, predicates are evaluated against
/// the [`DayContext`] of each date. A celebration whose date falls outside `dates` is not a
/// candidate anywhere.
pub fn generate_candidates(
    definition: &CalendarDefinition,
    variables: &VariableMap,
    counters: &IndexMap<Name, CounterSpan>,
    dates: &[NaiveDate],
) -> Result<IndexMap<NaiveDate, Vec<Name>>> {
    let mut table: IndexMap<NaiveDate, Vec<Name>> =
        dates.iter().map(|d| (*d, Vec::new())).collect();
    let root = VariableScope::new(variables, Name::new(""));

    for (name, celebration) in definition.celebrations.iter() {
        let scope = root.read_by(*name);
        match &celebration.when {
            Activation::Predicate(predicate) => {
                for date in dates {
                    let ctx = DayContext::new(scope, counters, *date);
                    if predicate(&ctx)? {
                        trace!(celebration = %name, %date, "predicate activated");
                        table[date].push(*name);
                    }
                }
            }
            other => {
                let Some(date_ref) = other.date_ref() else {
                    continue;
                };
                if let Some(date) = date_ref.resolve(&scope)? {
                    if let Some(list) = table.get_mut(&date) {
                        list.push(*name);
                    }
                }
            }
        }
    }
    Ok(table)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calendar::{
        ndt, resolve_counters, resolve_variables, year_dates, CalendarError, CalendarSettings,
        Celebration, CounterDef, DateRef, Until, Value, Variable,
    };
    use chrono::Weekday;

    fn definition() -> CalendarDefinition {
        CalendarDefinition::new(CalendarSettings::default())
            .with_variable("christmas", Variable::fixed("1225").unwrap())
            .with_variable(
                "firstSundayOfAdvent",
                Variable::derived(&["christmas"], |s| {
                    s.sub("christmas", 4, Some(Weekday::Sun)).map(Value::Date)
                }),
            )
            .with_counter(
                "weekOfAdvent",
                CounterDef::new(
                    DateRef::Anchor(Name::new("firstSundayOfAdvent")),
                    Until::On(DateRef::Anchor(Name::new("christmas"))),
                )
                .step_on(Weekday::Sun),
            )
            .with_celebration(
                "adventSunday",
                Celebration::new(
                    Activation::Predicate(|c| {
                        Ok(c.counter("weekOfAdvent")?.has_value() && c.is(Weekday::Sun))
                    }),
                    "sunday",
                ),
            )
            .with_celebration(
                "christmas",
                Celebration::new(Activation::Anchor(Name::new("christmas")), "solemnity"),
            )
            .with_celebration(
                "stephen",
                Celebration::new(
                    Activation::Dated(|s| s.add("christmas", 1, None)),
                    "feast",
                ),
            )
            .with_celebration(
                "leapDay",
                Celebration::new(Activation::fixed("0229").unwrap(), "feast"),
            )
    }

    #[test]
    fn test_generate_candidates() {
        let def = definition();
        let vars = resolve_variables(&def, 2024).unwrap();
        let dates = year_dates(2024);
        let (first, last) = (dates[0], dates[dates.len() - 1]);
        let counters = resolve_counters(&def, &vars, &first, &last).unwrap();
        let table = generate_candidates(&def, &vars, &counters, &dates).unwrap();

        assert_eq!(table.len(), 366);
        let sundays: Vec<_> = table
            .iter()
            .filter(|(_, v)| v.contains(&Name::new("adventSunday")))
            .map(|(d, _)| *d)
            .collect();
        assert_eq!(
            sundays,
            vec![ndt(2024, 12, 1), ndt(2024, 12, 8), ndt(2024, 12, 15), ndt(2024, 12, 22)]
        );
        assert_eq!(table[&ndt(2024, 12, 25)], vec![Name::new("christmas")]);
        assert_eq!(table[&ndt(2024, 12, 26)], vec![Name::new("stephen")]);
        assert_eq!(table[&ndt(2024, 2, 29)], vec![Name::new("leapDay")]);
    }

    #[test]
    fn test_fixed_leap_day_absent_in_common_year() {
        let def = definition();
        let vars = resolve_variables(&def, 2023).unwrap();
        let dates = year_dates(2023);
        let (first, last) = (dates[0], dates[dates.len() - 1]);
        let counters = resolve_counters(&def, &vars, &first, &last).unwrap();
        let table = generate_candidates(&def, &vars, &counters, &dates).unwrap();
        assert!(table.values().all(|v| !v.contains(&Name::new("leapDay"))));
    }

    #[test]
    fn test_predicate_unknown_counter() {
        let def = CalendarDefinition::new(CalendarSettings::default()).with_celebration(
            "lentWeekday",
            Celebration::new(
                Activation::Predicate(|c| c.counter("weekOfLent").map(|v| v.has_value())),
                "weekday",
            ),
        );
        let vars = resolve_variables(&def, 2024).unwrap();
        let dates = year_dates(2024);
        let err = generate_candidates(&def, &vars, &IndexMap::new(), &dates).unwrap_err();
        assert_eq!(
            err,
            CalendarError::UnknownVariableReference {
                year: 2024,
                date: Some(ndt(2024, 1, 1)),
                name: Name::new("weekOfLent"),
                referenced_by: Name::new("lentWeekday"),
            }
        );
    }
}
