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

//! Resolution of anchor variables to concrete dates for a year.

use chrono::{NaiveDate, Weekday};
use indexmap::{IndexMap, IndexSet};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

use crate::calendar::date::{add_days, sub_days};
use crate::calendar::{CalendarDefinition, CalendarError, Name, Result, Value, Variable};

/// The resolved variables of one year, in resolution order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VariableMap {
    pub(crate) year: i32,
    pub(crate) values: IndexMap<Name, Value>,
}

impl VariableMap {
    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.values.get(&Name::new(name))
    }

    /// The date of a variable, `None` if it is undeclared or a flag.
    pub fn date(&self, name: &str) -> Option<NaiveDate> {
        match self.get(name) {
            Some(Value::Date(d)) => Some(*d),
            _ => None,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Name, &Value)> {
        self.values.iter()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// The read-only view of resolved variables handed to variable, date and counter rules.
///
/// Lookups are attributed to `reader` so that errors name the rule that made them.
#[derive(Debug, Clone, Copy)]
pub struct VariableScope<'a> {
    year: i32,
    reader: Name,
    values: &'a IndexMap<Name, Value>,
    visible: Option<&'a [Name]>,
}

impl<'a> VariableScope<'a> {
    /// A scope seeing every variable in `variables`.
    pub fn new(variables: &'a VariableMap, reader: Name) -> Self {
        VariableScope {
            year: variables.year,
            reader,
            values: &variables.values,
            visible: None,
        }
    }

    fn restricted(
        year: i32,
        reader: Name,
        values: &'a IndexMap<Name, Value>,
        visible: &'a [Name],
    ) -> Self {
        VariableScope {
            year,
            reader,
            values,
            visible: Some(visible),
        }
    }

    /// The same scope attributed to a different reader.
    pub(crate) fn read_by(&self, reader: Name) -> Self {
        VariableScope { reader, ..*self }
    }

    /// The civil year being resolved.
    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn reader(&self) -> Name {
        self.reader
    }

    /// Return the value of a variable.
    pub fn value(&self, name: &str) -> Result<Value> {
        let key = Name::new(name);
        let visible = self.visible.map_or(true, |v| v.contains(&key));
        match self.values.get(&key) {
            Some(value) if visible => Ok(*value),
            _ => Err(self.unknown(key)),
        }
    }

    /// Return the date of a variable.
    pub fn date(&self, name: &str) -> Result<NaiveDate> {
        match self.value(name)? {
            Value::Date(d) => Ok(d),
            Value::Flag(_) => Err(CalendarError::VariableKindMismatch {
                year: self.year,
                variable: Name::new(name),
                expected: "date",
            }),
        }
    }

    /// Return the value of a boolean flag variable.
    pub fn flag(&self, name: &str) -> Result<bool> {
        match self.value(name)? {
            Value::Flag(b) => Ok(b),
            Value::Date(_) => Err(CalendarError::VariableKindMismatch {
                year: self.year,
                variable: Name::new(name),
                expected: "flag",
            }),
        }
    }

    /// `days` after the anchor, or with a `weekday` the `days`-th such weekday after it.
    pub fn add(&self, anchor: &str, days: u32, weekday: Option<Weekday>) -> Result<NaiveDate> {
        add_days(&self.date(anchor)?, days, weekday).ok_or_else(|| self.out_of_range())
    }

    /// `days` before the anchor, or with a `weekday` the `days`-th such weekday before it.
    pub fn sub(&self, anchor: &str, days: u32, weekday: Option<Weekday>) -> Result<NaiveDate> {
        sub_days(&self.date(anchor)?, days, weekday).ok_or_else(|| self.out_of_range())
    }

    /// The error for date arithmetic by this reader leaving chrono's range.
    pub fn out_of_range(&self) -> CalendarError {
        CalendarError::DateOutOfRange {
            year: self.year,
            name: self.reader,
        }
    }

    pub(crate) fn unknown(&self, name: Name) -> CalendarError {
        CalendarError::UnknownVariableReference {
            year: self.year,
            date: None,
            name,
            referenced_by: self.reader,
        }
    }
}

/// Resolve every variable of `definition` for the civil `year`.
///
/// Variables are ordered with Kahn's algorithm over their declared dependencies, taking ready
/// variables in declaration order. A variable rule sees only the variables it declared.
pub fn resolve_variables(definition: &CalendarDefinition, year: i32) -> Result<VariableMap> {
    let variables = &definition.variables;

    let mut in_degree: IndexMap<&Name, usize> = IndexMap::new();
    let mut dependents: IndexMap<&Name, Vec<&Name>> = IndexMap::new();
    for (name, variable) in variables.iter() {
        in_degree.insert(name, 0);
        for dep in variable.dependencies() {
            if !variables.contains_key(dep) {
                return Err(CalendarError::UnknownVariableReference {
                    year,
                    date: None,
                    name: *dep,
                    referenced_by: *name,
                });
            }
        }
    }
    for (name, variable) in variables.iter() {
        let deps: IndexSet<&Name> = variable.dependencies().iter().collect();
        for dep in deps {
            in_degree[name] += 1;
            dependents.entry(dep).or_default().push(name);
        }
    }

    let mut ready: VecDeque<&Name> = in_degree
        .iter()
        .filter(|(_, d)| **d == 0)
        .map(|(n, _)| *n)
        .collect();
    let mut values: IndexMap<Name, Value> = IndexMap::new();

    while let Some(name) = ready.pop_front() {
        let value = match &variables[name] {
            Variable::Fixed(md) => match md.on(year) {
                Some(d) => Value::Date(d),
                None => return Err(CalendarError::DateOutOfRange { year, name: *name }),
            },
            Variable::Flag(b) => Value::Flag(*b),
            Variable::Derived { after, rule } => {
                rule(&VariableScope::restricted(year, *name, &values, after))?
            }
        };
        values.insert(*name, value);

        if let Some(deps) = dependents.get(name) {
            for dependent in deps {
                let degree = &mut in_degree[*dependent];
                *degree -= 1;
                if *degree == 0 {
                    ready.push_back(dependent);
                }
            }
        }
    }

    if values.len() != variables.len() {
        let cycle: Vec<Name> = in_degree
            .iter()
            .filter(|(_, d)| **d > 0)
            .map(|(n, _)| **n)
            .collect();
        return Err(CalendarError::CyclicVariableDependency {
            year,
            variables: cycle,
        });
    }

    Ok(VariableMap { year, values })
}
