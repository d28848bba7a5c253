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

//! Built-in calendar definitions and a process wide registry of named calendars.
//!
//! | Name | Definition |
//! |------|------------|
//! | *"roman"* | [`roman::general_roman_calendar`] |

pub mod roman;

use itertools::Itertools;
use std::collections::HashMap;
use std::sync::{Arc, LazyLock, PoisonError, RwLock};
use tracing::debug;

use crate::calendar::{Calendar, CalendarDefinition, CalendarError, Result};

// A single memory allocated space to share each Calendar, and its cache of years, by name.
static RITES: LazyLock<RwLock<HashMap<String, Arc<Calendar>>>> = LazyLock::new(|| {
    let mut m = HashMap::new();
    m.insert(
        "roman".to_string(),
        Arc::new(Calendar::new(roman::general_roman_calendar())),
    );
    RwLock::new(m)
});

/// A manager to register and share named [`Calendar`] objects.
///
/// Every `RiteManager` reads the same registry, so calendars added through one instance are
/// visible through all others and resolved years are cached once per process.
#[derive(Debug, Default, Clone, Copy)]
pub struct RiteManager;

impl RiteManager {
    pub fn new() -> Self {
        Self {}
    }

    /// Returns *true* if a calendar is registered under `name`.
    pub fn contains_key(&self, name: &str) -> bool {
        let r = RITES.read().unwrap_or_else(PoisonError::into_inner);
        r.contains_key(&normalise(name))
    }

    /// Return the registered names, sorted.
    pub fn keys(&self) -> Vec<String> {
        let r = RITES.read().unwrap_or_else(PoisonError::into_inner);
        r.keys().cloned().sorted().collect()
    }

    /// Register a calendar under `name`.
    ///
    /// Data will not be overwritten: an existing name must first be removed with `pop`.
    pub fn add(&self, name: &str, definition: CalendarDefinition) -> Result<()> {
        let k = normalise(name);
        let mut w = RITES.write().unwrap_or_else(PoisonError::into_inner);
        if w.contains_key(&k) {
            return Err(CalendarError::CalendarExists { name: k });
        }
        debug!(name = %k, "registering calendar");
        w.insert(k, Arc::new(Calendar::new(definition)));
        Ok(())
    }

    /// Return the shared calendar registered under `name`.
    pub fn get(&self, name: &str) -> Result<Arc<Calendar>> {
        let k = normalise(name);
        let r = RITES.read().unwrap_or_else(PoisonError::into_inner);
        match r.get(&k) {
            Some(calendar) => Ok(Arc::clone(calendar)),
            None => Err(CalendarError::UnknownCalendar { name: k }),
        }
    }

    /// Remove the calendar registered under `name` and return it.
    ///
    /// Holders of the returned `Arc` keep their cached years.
    pub fn pop(&self, name: &str) -> Result<Arc<Calendar>> {
        let k = normalise(name);
        let mut w = RITES.write().unwrap_or_else(PoisonError::into_inner);
        w.remove(&k).ok_or(CalendarError::UnknownCalendar { name: k })
    }
}

// Registry keys are trimmed and lower case. See test_normalise.
fn normalise(name: &str) -> String {
    name.trim().to_lowercase()
}

// UNIT TESTS
#[cfg(test)]
mod tests {
    use super::*;
    use crate::calendar::{ndt, CalendarSettings};

    #[test]
    fn test_normalise() {
        assert_eq!(normalise("  Roman "), "roman");
        assert_eq!(normalise("ROMAN"), "roman");
    }

    #[test]
    fn test_get_shares_calendar() {
        let rm = RiteManager::new();
        let a = rm.get("roman").unwrap();
        let b = RiteManager::new().get(" Roman").unwrap();
        assert!(Arc::ptr_eq(&a, &b));
        let year = a.resolve(2024).unwrap();
        assert_eq!(year.variable("easter"), Some(ndt(2024, 3, 31)));
        assert!(b.cached_years().contains(&2024));
    }

    #[test]
    fn test_get_unknown() {
        let result = RiteManager::new().get("sarum");
        assert_eq!(
            result.unwrap_err(),
            CalendarError::UnknownCalendar {
                name: "sarum".to_string()
            }
        );
    }

    #[test]
    fn test_add_and_pop() {
        let rm = RiteManager::new();
        let def = CalendarDefinition::new(CalendarSettings::default());
        rm.add("Test Add Pop", def.clone()).unwrap();
        assert!(rm.contains_key("test add pop"));
        assert!(rm.keys().contains(&"test add pop".to_string()));

        let err = rm.add("test add pop", def).unwrap_err();
        assert!(matches!(err, CalendarError::CalendarExists { .. }));

        rm.pop("TEST ADD POP").unwrap();
        assert!(!rm.contains_key("test add pop"));
        assert!(rm.pop("test add pop").is_err());
    }

    #[test]
    fn test_keys_sorted() {
        let rm = RiteManager::new();
        let def = CalendarDefinition::new(CalendarSettings::default());
        rm.add("zz keys", def.clone()).unwrap();
        rm.add("aa keys", def).unwrap();
        let keys = rm.keys();
        let mut sorted = keys.clone();
        sorted.sort();
        assert_eq!(keys, sorted);
        assert!(keys.contains(&"roman".to_string()));
        let _ = rm.pop("zz keys");
        let _ = rm.pop("aa keys");
    }
}
