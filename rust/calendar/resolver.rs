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

//! Precedence resolution of a year's candidates, including cascading transfers.

use chrono::NaiveDate;
use indexmap::IndexMap;
use std::collections::{HashSet, VecDeque};
use tracing::{debug, instrument, trace};

use crate::calendar::{
    CalendarDefinition, CalendarError, Direction, Disposition, Name, Outranked, Result,
    TransferRecord,
};

/// A candidate competing for a date, with its rank resolved for the year.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
struct Entry {
    celebration: Name,
    rank: Name,
    precedence: u32,
    exclusive: bool,
    /// Days moved by transfers so far.
    travelled: usize,
}

/// The outcome of resolution on one date.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct DayOutcome {
    /// Declared candidates followed by those transferred in, in arrival order.
    pub candidates: Vec<Name>,
    pub dispositions: IndexMap<Name, Disposition>,
    pub winner: Option<Name>,
    pub commemorations: Vec<Name>,
    pub top_rank: Option<Name>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct Resolution {
    pub days: IndexMap<NaiveDate, DayOutcome>,
    pub transfers: Vec<TransferRecord>,
}

struct Resolver<'a> {
    definition: &'a CalendarDefinition,
    year: i32,
    bound: usize,
    /// The current candidate set of every date in the table.
    sets: IndexMap<NaiveDate, Vec<Entry>>,
    outcomes: IndexMap<NaiveDate, DayOutcome>,
    departed: IndexMap<NaiveDate, Vec<(Name, NaiveDate)>>,
    transfers: Vec<TransferRecord>,
}

/// Whether the strongest candidates of a set include an exclusive one, i.e. the set has (or,
/// unsettled, will have) an exclusive winner.
fn occupied(set: &[Entry]) -> bool {
    let Some(strongest) = set.iter().map(|e| e.precedence).min() else {
        return false;
    };
    set.iter().any(|e| e.exclusive && e.precedence == strongest)
}

/// Resolve every date of `candidates` to a winner, commemorations and a top rank.
///
/// Dates are settled from a FIFO work queue seeded in ascending order. A candidate transferred
/// away is appended to the first free date in its direction, and that date is queued again to
/// be settled with its enlarged candidate set. A date is free when its winner is not exclusive
/// and it does not already hold the transferred celebration. Outranked candidates left on a
/// date, such as a memorial commemorated under a privileged weekday, do not occupy it.
///
/// Every transfer moves a candidate at least one day and a candidate may travel at most
/// `transfer_bound` days in total, so the queue always drains.
#[instrument(level = "debug", skip(definition, candidates))]
pub(crate) fn resolve_precedence(
    definition: &CalendarDefinition,
    year: i32,
    candidates: &IndexMap<NaiveDate, Vec<Name>>,
) -> Result<Resolution> {
    let mut resolver = Resolver {
        definition,
        year,
        bound: definition.settings.transfer_bound.unwrap_or(candidates.len()),
        sets: IndexMap::with_capacity(candidates.len()),
        outcomes: IndexMap::with_capacity(candidates.len()),
        departed: IndexMap::new(),
        transfers: vec![],
    };
    for (date, names) in candidates.iter() {
        let entries = names
            .iter()
            .map(|n| resolver.entry(*n))
            .collect::<Result<Vec<_>>>()?;
        resolver.outcomes.insert(
            *date,
            DayOutcome {
                candidates: names.clone(),
                ..Default::default()
            },
        );
        resolver.sets.insert(*date, entries);
    }

    let mut queue: VecDeque<NaiveDate> = candidates.keys().copied().collect();
    let mut pending: HashSet<NaiveDate> = queue.iter().copied().collect();
    while let Some(date) = queue.pop_front() {
        pending.remove(&date);
        for target in resolver.settle(date)? {
            if pending.insert(target) {
                queue.push_back(target);
            }
        }
    }
    Ok(resolver.finish())
}

impl<'a> Resolver<'a> {
    fn entry(&self, celebration: Name) -> Result<Entry> {
        let unknown = |rank: Name| CalendarError::UnknownRank {
            year: self.year,
            celebration,
            rank,
        };
        let declared = self
            .definition
            .celebrations
            .get(&celebration)
            .ok_or_else(|| unknown(Name::new("")))?;
        let rank_name = declared
            .rank
            .in_year(self.year)
            .ok_or_else(|| unknown(Name::new("")))?;
        let rank = self
            .definition
            .rank(&rank_name)
            .ok_or_else(|| unknown(rank_name))?;
        Ok(Entry {
            celebration,
            rank: rank_name,
            precedence: rank.precedence,
            exclusive: rank.exclusive,
            travelled: 0,
        })
    }

    /// Resolve one date from its current candidate set, returning the dates that received
    /// transfers.
    fn settle(&mut self, date: NaiveDate) -> Result<Vec<NaiveDate>> {
        let mut entries = self.sets[&date].clone();
        entries.sort_by_key(|e| e.precedence);
        trace!(
            %date,
            candidates = ?entries.iter().map(|e| e.celebration).collect::<Vec<_>>(),
            "settling"
        );

        let mut outcome = DayOutcome {
            candidates: std::mem::take(&mut self.outcomes[&date].candidates),
            ..Default::default()
        };
        let Some(first) = entries.first().copied() else {
            self.outcomes[&date] = outcome;
            return Ok(vec![]);
        };

        let tied: Vec<&Entry> = entries
            .iter()
            .take_while(|e| e.precedence == first.precedence)
            .collect();
        if tied.len() > 1 && tied.iter().any(|e| e.exclusive) {
            return Err(CalendarError::AmbiguousPrecedence {
                year: self.year,
                date,
                celebrations: tied.iter().map(|e| e.celebration).collect(),
            });
        }
        let co_winners = tied.len();

        outcome.winner = Some(first.celebration);
        outcome.top_rank = Some(first.rank);
        outcome
            .dispositions
            .insert(first.celebration, Disposition::Winner);
        for e in entries.iter().take(co_winners).skip(1) {
            outcome.commemorations.push(e.celebration);
            outcome
                .dispositions
                .insert(e.celebration, Disposition::Commemorated);
        }

        let mut kept: Vec<Entry> = entries[..co_winners].to_vec();
        let mut leaving: Vec<(Entry, Direction)> = vec![];
        for e in entries.iter().skip(co_winners) {
            let action = self.definition.ranks[&e.rank].action_when_outranked(&first.rank);
            trace!(%date, celebration = %e.celebration, ?action, "outranked");
            let disposition = match action {
                Outranked::Transfer(direction) => {
                    leaving.push((*e, direction));
                    continue;
                }
                Outranked::Commemorate => {
                    outcome.commemorations.push(e.celebration);
                    Disposition::Commemorated
                }
                Outranked::Suppress => Disposition::Suppressed,
                Outranked::Omit | Outranked::NoAction => Disposition::Omitted,
            };
            outcome.dispositions.insert(e.celebration, disposition);
            kept.push(*e);
        }
        self.sets[&date] = kept;
        self.outcomes[&date] = outcome;

        let mut targets = Vec::with_capacity(leaving.len());
        for (entry, direction) in leaving {
            let (target, travelled) = self.free_date(date, &entry, direction)?;
            debug!(
                celebration = %entry.celebration,
                from = %date,
                to = %target,
                "transferred"
            );
            self.sets[&target].push(Entry { travelled, ..entry });
            let arrived = &mut self.outcomes[&target].candidates;
            if !arrived.contains(&entry.celebration) {
                arrived.push(entry.celebration);
            }
            self.departed
                .entry(date)
                .or_default()
                .push((entry.celebration, target));
            self.transfers.push(TransferRecord {
                celebration: entry.celebration,
                from: date,
                to: target,
            });
            targets.push(target);
        }
        Ok(targets)
    }

    /// The first free date strictly beyond `from` in `direction`, with the entry's total travel.
    fn free_date(
        &self,
        from: NaiveDate,
        entry: &Entry,
        direction: Direction,
    ) -> Result<(NaiveDate, usize)> {
        let exceeded = || CalendarError::TransferLoopExceeded {
            year: self.year,
            date: from,
            celebration: entry.celebration,
            bound: self.bound,
        };
        let mut date = from;
        let mut travelled = entry.travelled;
        loop {
            travelled += 1;
            if travelled > self.bound {
                return Err(exceeded());
            }
            date = direction.step(&date).ok_or_else(exceeded)?;
            let set = self.sets.get(&date).ok_or_else(exceeded)?;
            if !set.iter().any(|e| e.celebration == entry.celebration) && !occupied(set) {
                return Ok((date, travelled));
            }
        }
    }

    fn finish(mut self) -> Resolution {
        for (date, moves) in self.departed {
            let outcome = &mut self.outcomes[&date];
            for (celebration, to) in moves {
                outcome
                    .dispositions
                    .insert(celebration, Disposition::Transferred { to });
            }
        }
        Resolution {
            days: self.outcomes,
            transfers: self.transfers,
        }
    }
}
