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

use itertools::Itertools;
use std::collections::HashMap;
use std::sync::{Arc, OnceLock, PoisonError, RwLock};
use tracing::{debug, instrument};

use crate::calendar::{CalendarDefinition, ResolvedCycle, ResolvedYear, Result};

type YearCell = Arc<OnceLock<Result<Arc<ResolvedYear>>>>;

/// A calendar definition with a compute-once cache of its resolved years.
///
/// Concurrent requests for the same year share a single computation; requests for different
/// years run independently. Failures are cached as well, since resolution is deterministic.
#[derive(Debug)]
pub struct Calendar {
    definition: Arc<CalendarDefinition>,
    years: RwLock<HashMap<i32, YearCell>>,
}

impl Calendar {
    pub fn new(definition: CalendarDefinition) -> Self {
        Calendar {
            definition: Arc::new(definition),
            years: RwLock::new(HashMap::new()),
        }
    }

    pub fn definition(&self) -> &CalendarDefinition {
        &self.definition
    }

    /// Return the resolved civil `year`, computing it on first request.
    #[instrument(level = "debug", skip(self))]
    pub fn resolve(&self, year: i32) -> Result<Arc<ResolvedYear>> {
        let cached = self
            .years
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&year)
            .cloned();
        let cell = match cached {
            Some(cell) => cell,
            None => self
                .years
                .write()
                .unwrap_or_else(PoisonError::into_inner)
                .entry(year)
                .or_default()
                .clone(),
        };
        cell.get_or_init(|| {
            debug!(year, "resolving");
            ResolvedYear::try_new(&self.definition, year).map(Arc::new)
        })
        .clone()
    }

    /// Resolve civil `year` without reading or populating the cache.
    pub fn resolve_uncached(&self, year: i32) -> Result<ResolvedYear> {
        ResolvedYear::try_new(&self.definition, year)
    }

    /// Return the full annual cycle `cycle_year`, assembled from cached civil years.
    ///
    /// A cycle starting before the civil year boundary spans years `cycle_year - 1` and
    /// `cycle_year`; otherwise it spans `cycle_year` and `cycle_year + 1`. Without a
    /// `cycle_start` the cycle is the civil year.
    pub fn resolve_cycle(&self, cycle_year: i32) -> Result<ResolvedCycle> {
        let settings = &self.definition.settings;
        let years = match (
            settings.cycle_start,
            settings.cycle_starts_before_civil_year_boundary,
        ) {
            (None, _) => vec![cycle_year],
            (Some(_), true) => vec![cycle_year - 1, cycle_year],
            (Some(_), false) => vec![cycle_year, cycle_year + 1],
        };
        let resolved = years
            .into_iter()
            .map(|y| self.resolve(y))
            .collect::<Result<Vec<_>>>()?;
        Ok(ResolvedCycle::from_years(cycle_year, &resolved))
    }

    /// The years held in the cache, in ascending order.
    pub fn cached_years(&self) -> Vec<i32> {
        self.years
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .keys()
            .copied()
            .sorted()
            .collect()
    }
}
