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

use chrono::{NaiveDate, Weekday};
use indexmap::{IndexMap, IndexSet};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::calendar::{DayContext, Direction, MonthDay, Name, Result, VariableScope};

/// A rule computing a variable's value from already resolved variables.
pub type ValueRule = fn(&VariableScope<'_>) -> Result<Value>;

/// A rule computing a single date from the resolved variables of a year.
pub type DateRule = fn(&VariableScope<'_>) -> Result<NaiveDate>;

/// A rule deciding whether a celebration applies to a given day.
pub type Predicate = fn(&DayContext<'_>) -> Result<bool>;

/// The resolved value of a variable: a date, or a boolean flag toggling downstream rules.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Value {
    Date(NaiveDate),
    Flag(bool),
}

/// A named anchor variable.
#[derive(Clone)]
pub enum Variable {
    /// A fixed month and day, e.g. Christmas on `"1225"`.
    Fixed(MonthDay),
    /// A boolean flag, e.g. whether Epiphany is transferred to a Sunday.
    Flag(bool),
    /// A value derived from the variables listed in `after`, which must resolve first.
    Derived { after: Vec<Name>, rule: ValueRule },
}

impl Variable {
    /// Create a fixed variable from an `mmdd` literal.
    pub fn fixed(mmdd: &str) -> Result<Self> {
        Ok(Variable::Fixed(MonthDay::from_str(mmdd)?))
    }

    /// Create a derived variable reading the variables named in `after`.
    pub fn derived(after: &[&str], rule: ValueRule) -> Self {
        Variable::Derived {
            after: after.iter().map(|s| Name::new(s)).collect(),
            rule,
        }
    }

    /// The variables that must be resolved before this one.
    pub fn dependencies(&self) -> &[Name] {
        match self {
            Variable::Derived { after, .. } => after,
            _ => &[],
        }
    }
}

impl fmt::Debug for Variable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Variable::Fixed(md) => write!(f, "Fixed({})", md),
            Variable::Flag(b) => write!(f, "Flag({})", b),
            Variable::Derived { after, .. } => write!(f, "Derived(after: {:?})", after),
        }
    }
}

/// A reference to a single date of the year.
#[derive(Clone)]
pub enum DateRef {
    Fixed(MonthDay),
    Anchor(Name),
    Dated(DateRule),
}

impl DateRef {
    /// Resolve to a date. A fixed 29th February yields `None` in a common year.
    pub fn resolve(&self, scope: &VariableScope<'_>) -> Result<Option<NaiveDate>> {
        match self {
            DateRef::Fixed(md) => Ok(md.on(scope.year())),
            DateRef::Anchor(name) => scope.date(name.as_str()).map(Some),
            DateRef::Dated(rule) => rule(scope).map(Some),
        }
    }
}

impl fmt::Debug for DateRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DateRef::Fixed(md) => write!(f, "Fixed({})", md),
            DateRef::Anchor(n) => write!(f, "Anchor({})", n),
            DateRef::Dated(_) => write!(f, "Dated(<fn>)"),
        }
    }
}

/// The exclusive end of a counter's span.
#[derive(Clone, Debug)]
pub enum Until {
    /// The span ends the day before (or after, stepping backwards) this date.
    On(DateRef),
    /// The span runs to the edge of the resolved year.
    Indefinite,
}

/// A named ordinal counter, e.g. the week of Advent.
#[derive(Clone, Debug)]
pub struct CounterDef {
    pub date_initial: DateRef,
    pub date_step: Direction,
    pub value_initial: i32,
    pub value_step: i32,
    pub value_step_on: Option<Weekday>,
    pub until: Until,
}

impl CounterDef {
    /// Create a counter starting at `date_initial` with value 1, stepping by 1 every day.
    pub fn new(date_initial: DateRef, until: Until) -> Self {
        CounterDef {
            date_initial,
            date_step: Direction::After,
            value_initial: 1,
            value_step: 1,
            value_step_on: None,
            until,
        }
    }

    /// Step the value only on days falling on `weekday`.
    pub fn step_on(mut self, weekday: Weekday) -> Self {
        self.value_step_on = Some(weekday);
        self
    }

    /// Walk backwards from `date_initial` rather than forwards.
    pub fn backwards(mut self) -> Self {
        self.date_step = Direction::Before;
        self
    }

    pub fn value_initial(mut self, value: i32) -> Self {
        self.value_initial = value;
        self
    }

    pub fn value_step(mut self, value: i32) -> Self {
        self.value_step = value;
        self
    }
}

/// The rule deciding which dates a celebration is a candidate for.
#[derive(Clone)]
pub enum Activation {
    /// Every year on this month and day.
    Fixed(MonthDay),
    /// On the date of a variable.
    Anchor(Name),
    /// On a date computed once per year from the variables.
    Dated(DateRule),
    /// On every day for which the predicate holds.
    Predicate(Predicate),
}

impl Activation {
    /// Create a fixed activation from an `mmdd` literal.
    pub fn fixed(mmdd: &str) -> Result<Self> {
        Ok(Activation::Fixed(MonthDay::from_str(mmdd)?))
    }

    /// The single-date form of this activation, if it is not a predicate.
    pub fn date_ref(&self) -> Option<DateRef> {
        match self {
            Activation::Fixed(md) => Some(DateRef::Fixed(*md)),
            Activation::Anchor(n) => Some(DateRef::Anchor(*n)),
            Activation::Dated(rule) => Some(DateRef::Dated(*rule)),
            Activation::Predicate(_) => None,
        }
    }
}

impl fmt::Debug for Activation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Activation::Fixed(md) => write!(f, "Fixed({})", md),
            Activation::Anchor(n) => write!(f, "Anchor({})", n),
            Activation::Dated(_) => write!(f, "Dated(<fn>)"),
            Activation::Predicate(_) => write!(f, "Predicate(<fn>)"),
        }
    }
}

/// The rank a celebration competes with.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RankRef {
    Fixed(Name),
    /// Ranks effective from a given year, in ascending year order.
    ///
    /// Years before the first entry use the first entry's rank.
    Since(Vec<(i32, Name)>),
}

impl RankRef {
    /// The rank effective in `year`.
    pub fn in_year(&self, year: i32) -> Option<Name> {
        match self {
            RankRef::Fixed(name) => Some(*name),
            RankRef::Since(ranks) => ranks
                .iter()
                .rev()
                .find(|(since, _)| *since <= year)
                .or(ranks.first())
                .map(|(_, name)| *name),
        }
    }
}

/// A named candidate occupant of a calendar date.
#[derive(Clone, Debug)]
pub struct Celebration {
    pub when: Activation,
    pub rank: RankRef,
    /// Saint classes, e.g. *"M"* for martyr.
    pub classes: IndexSet<Name>,
    pub tags: IndexSet<Name>,
    /// Co-celebrated names. Metadata only.
    pub companions: Vec<Name>,
}

impl Celebration {
    /// Create a celebration of rank `rank`.
    pub fn new(when: Activation, rank: &str) -> Self {
        Celebration {
            when,
            rank: RankRef::Fixed(Name::new(rank)),
            classes: IndexSet::new(),
            tags: IndexSet::new(),
            companions: vec![],
        }
    }

    /// Create a celebration whose rank changes over the years.
    pub fn ranked_since(when: Activation, ranks: &[(i32, &str)]) -> Self {
        let mut c = Celebration::new(when, "");
        c.rank = RankRef::Since(ranks.iter().map(|(y, r)| (*y, Name::new(r))).collect());
        c
    }

    pub fn with_tags(mut self, tags: &[&str]) -> Self {
        self.tags.extend(tags.iter().map(|t| Name::new(t)));
        self
    }

    pub fn with_classes(mut self, classes: &[&str]) -> Self {
        self.classes.extend(classes.iter().map(|t| Name::new(t)));
        self
    }

    pub fn with_companions(mut self, companions: &[&str]) -> Self {
        self.companions.extend(companions.iter().map(|t| Name::new(t)));
        self
    }

    /// Whether the celebration carries `tag`.
    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.contains(&Name::new(tag))
    }
}

/// The disposition of a candidate that loses its date to a stronger celebration.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Outranked {
    /// Move to the next free date in the given direction.
    Transfer(Direction),
    /// Keep as a secondary notation on the winning date.
    Commemorate,
    /// Drop, recording the celebration in the day's audit list.
    Suppress,
    /// Drop without any record.
    Omit,
    /// Take no action; the rank's `default_action` applies.
    NoAction,
}

/// The condition, over the rank of the date's winner, under which an [`OutrankRule`] applies.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Trigger {
    Always,
    TopRankIn(IndexSet<Name>),
    TopRankNotIn(IndexSet<Name>),
}

impl Trigger {
    pub fn top_rank_in(ranks: &[&str]) -> Self {
        Trigger::TopRankIn(ranks.iter().map(|r| Name::new(r)).collect())
    }

    pub fn top_rank_not_in(ranks: &[&str]) -> Self {
        Trigger::TopRankNotIn(ranks.iter().map(|r| Name::new(r)).collect())
    }

    /// Whether the trigger fires when the date is held by a celebration of rank `top_rank`.
    pub fn fires(&self, top_rank: &Name) -> bool {
        match self {
            Trigger::Always => true,
            Trigger::TopRankIn(set) => set.contains(top_rank),
            Trigger::TopRankNotIn(set) => !set.contains(top_rank),
        }
    }
}

/// One row of a rank's outranking table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutrankRule {
    pub trigger: Trigger,
    pub action: Outranked,
}

/// A precedence class governing how a celebration competes for a date.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rank {
    /// Lower is stronger.
    pub precedence: u32,
    /// Whether a winner of this rank fully occupies its date.
    pub exclusive: bool,
    /// Evaluated in order, the first firing rule decides the action.
    pub if_outranked: Vec<OutrankRule>,
    pub default_action: Outranked,
}

impl Rank {
    /// Create a non-exclusive rank which is omitted whenever outranked.
    pub fn new(precedence: u32) -> Self {
        Rank {
            precedence,
            exclusive: false,
            if_outranked: vec![],
            default_action: Outranked::Omit,
        }
    }

    pub fn exclusive(mut self) -> Self {
        self.exclusive = true;
        self
    }

    /// Append a row to the outranking table.
    pub fn if_outranked(mut self, trigger: Trigger, action: Outranked) -> Self {
        self.if_outranked.push(OutrankRule { trigger, action });
        self
    }

    pub fn default_action(mut self, action: Outranked) -> Self {
        self.default_action = action;
        self
    }

    /// The action taken when a candidate of this rank loses to a winner of rank `top_rank`.
    ///
    /// Never returns [`Outranked::NoAction`].
    pub fn action_when_outranked(&self, top_rank: &Name) -> Outranked {
        let action = self
            .if_outranked
            .iter()
            .find(|rule| rule.trigger.fires(top_rank))
            .map(|rule| rule.action)
            .unwrap_or(Outranked::NoAction);
        match (action, self.default_action) {
            (Outranked::NoAction, Outranked::NoAction) => Outranked::Omit,
            (Outranked::NoAction, default) => default,
            (action, _) => action,
        }
    }
}

/// A class of saint, e.g. *"Ap"* for apostle, with the classes it may be combined with.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SaintClass {
    pub compatible_with: IndexSet<Name>,
}

impl SaintClass {
    pub fn new(compatible_with: &[&str]) -> Self {
        SaintClass {
            compatible_with: compatible_with.iter().map(|c| Name::new(c)).collect(),
        }
    }
}

/// Scalar configuration of a calendar definition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalendarSettings {
    /// The first year that may be resolved.
    pub first_valid_year: i32,
    /// Whether the annual cycle begins before 1st January of the year it is named for.
    pub cycle_starts_before_civil_year_boundary: bool,
    /// The variable marking the first day of the cycle. `None` means 1st January.
    pub cycle_start: Option<Name>,
    /// The maximum number of days a transfer may travel. Defaults to the length of the year.
    pub transfer_bound: Option<usize>,
}

impl Default for CalendarSettings {
    fn default() -> Self {
        CalendarSettings {
            first_valid_year: 1583,
            cycle_starts_before_civil_year_boundary: false,
            cycle_start: None,
            transfer_bound: None,
        }
    }
}

/// The declarative input from which years are resolved.
///
/// Built once and treated as read-only thereafter. Declaration order of celebrations is the
/// order in which candidates are listed for a date and breaks ties between equal precedences.
#[derive(Debug, Clone, Default)]
pub struct CalendarDefinition {
    pub settings: CalendarSettings,
    pub(crate) variables: IndexMap<Name, Variable>,
    pub(crate) counters: IndexMap<Name, CounterDef>,
    pub(crate) celebrations: IndexMap<Name, Celebration>,
    pub(crate) ranks: IndexMap<Name, Rank>,
    pub(crate) saint_classes: IndexMap<Name, SaintClass>,
}

impl CalendarDefinition {
    /// Create an empty definition.
    pub fn new(settings: CalendarSettings) -> Self {
        CalendarDefinition {
            settings,
            ..Default::default()
        }
    }

    pub fn with_variable(mut self, name: &str, variable: Variable) -> Self {
        self.variables.insert(Name::new(name), variable);
        self
    }

    pub fn with_counter(mut self, name: &str, counter: CounterDef) -> Self {
        self.counters.insert(Name::new(name), counter);
        self
    }

    pub fn with_celebration(mut self, name: &str, celebration: Celebration) -> Self {
        self.celebrations.insert(Name::new(name), celebration);
        self
    }

    pub fn with_rank(mut self, name: &str, rank: Rank) -> Self {
        self.ranks.insert(Name::new(name), rank);
        self
    }

    pub fn with_saint_class(mut self, name: &str, class: SaintClass) -> Self {
        self.saint_classes.insert(Name::new(name), class);
        self
    }

    pub fn variables(&self) -> &IndexMap<Name, Variable> {
        &self.variables
    }

    pub fn counters(&self) -> &IndexMap<Name, CounterDef> {
        &self.counters
    }

    pub fn celebrations(&self) -> &IndexMap<Name, Celebration> {
        &self.celebrations
    }

    pub fn ranks(&self) -> &IndexMap<Name, Rank> {
        &self.ranks
    }

    pub fn rank(&self, name: &Name) -> Option<&Rank> {
        self.ranks.get(name)
    }

    pub fn celebration(&self, name: &str) -> Option<&Celebration> {
        self.celebrations.get(&Name::new(name))
    }

    /// Whether saints of classes `a` and `b` may be combined in one celebration.
    ///
    /// Compatibility is symmetric; a class is always compatible with itself.
    pub fn classes_compatible(&self, a: &str, b: &str) -> bool {
        let (a, b) = (Name::new(a), Name::new(b));
        if a == b {
            return self.saint_classes.contains_key(&a);
        }
        let declares = |x: &Name, y: &Name| {
            self.saint_classes
                .get(x)
                .is_some_and(|c| c.compatible_with.contains(y))
        };
        declares(&a, &b) || declares(&b, &a)
    }
}

// UNIT TESTS
#[cfg(test)]
mod tests {
    use super::*;

    fn memorial() -> Rank {
        Rank::new(10)
            .exclusive()
            .if_outranked(Trigger::top_rank_in(&["strongWeekday"]), Outranked::Commemorate)
            .if_outranked(Trigger::Always, Outranked::Suppress)
    }

    #[test]
    fn test_outrank_table() {
        let rank = memorial();
        assert_eq!(
            rank.action_when_outranked(&Name::new("strongWeekday")),
            Outranked::Commemorate
        );
        assert_eq!(
            rank.action_when_outranked(&Name::new("solemnity")),
            Outranked::Suppress
        );
    }

    #[test]
    fn test_outrank_no_action_falls_back() {
        let rank = Rank::new(13)
            .if_outranked(Trigger::top_rank_in(&["optionalMemorial"]), Outranked::NoAction)
            .default_action(Outranked::Commemorate);
        assert_eq!(
            rank.action_when_outranked(&Name::new("optionalMemorial")),
            Outranked::Commemorate
        );
        assert_eq!(
            rank.action_when_outranked(&Name::new("feast")),
            Outranked::Commemorate
        );

        let rank = Rank::new(13).default_action(Outranked::NoAction);
        assert_eq!(rank.action_when_outranked(&Name::new("feast")), Outranked::Omit);
    }

    #[test]
    fn test_trigger_not_in() {
        let t = Trigger::top_rank_not_in(&["feast"]);
        assert!(!t.fires(&Name::new("feast")));
        assert!(t.fires(&Name::new("memorial")));
    }

    #[test]
    fn test_rank_since() {
        let r = RankRef::Since(vec![
            (2000, Name::new("memorial")),
            (2016, Name::new("feast")),
        ]);
        assert_eq!(r.in_year(1990), Some(Name::new("memorial")));
        assert_eq!(r.in_year(2015), Some(Name::new("memorial")));
        assert_eq!(r.in_year(2016), Some(Name::new("feast")));
        assert_eq!(RankRef::Since(vec![]).in_year(2016), None);
    }

    #[test]
    fn test_classes_compatible() {
        let def = CalendarDefinition::default()
            .with_saint_class("Ap", SaintClass::new(&["Ev"]))
            .with_saint_class("Ev", SaintClass::new(&[]))
            .with_saint_class("B", SaintClass::new(&["D", "M"]))
            .with_saint_class("M", SaintClass::new(&["D"]))
            .with_saint_class("D", SaintClass::new(&[]));
        assert!(def.classes_compatible("Ap", "Ev"));
        assert!(def.classes_compatible("Ev", "Ap"));
        assert!(def.classes_compatible("B", "M"));
        assert!(def.classes_compatible("M", "M"));
        assert!(!def.classes_compatible("Ap", "M"));
        assert!(!def.classes_compatible("X", "X"));
    }

    #[test]
    fn test_celebration_tags() {
        let c = Celebration::new(Activation::fixed("1208").unwrap(), "solemnity")
            .with_tags(&["mary"])
            .with_companions(&["isaacJogues"]);
        assert!(c.has_tag("mary"));
        assert!(!c.has_tag("apparition"));
        assert_eq!(c.companions, vec![Name::new("isaacJogues")]);
        assert!(Activation::fixed("1308").is_err());
    }
}
