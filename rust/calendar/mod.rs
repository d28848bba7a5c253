//! Resolve the celebrations of a liturgical year from a declarative [`CalendarDefinition`].
//!
//! Resolution of a year proceeds through four stages, each consuming only the output of the
//! previous ones:
//! - **variables**: named anchors such as *easter* or *firstSundayOfAdvent* are resolved to dates
//!   in dependency order, see [`resolve_variables`].
//! - **counters**: stepped ordinals such as *weekOfAdvent* are given a value over their span, see
//!   [`resolve_counters`].
//! - **candidates**: every [`Celebration`] whose [`Activation`] holds on a date becomes one of the
//!   date's candidates, see [`generate_candidates`].
//! - **precedence**: each date is won by its strongest candidate and every other candidate is
//!   disposed of by its [`Rank`]'s outranking table, possibly transferring it to another date.
//!
//! The result is a [`ResolvedYear`], an immutable table of [`ResolvedDay`].
//!
//! # Definitions
//!
//! A [`CalendarDefinition`] is assembled in code. Rules are plain `fn` pointers receiving an
//! immutable view, a [`VariableScope`] for variables and dated activations or a [`DayContext`]
//! for predicates.
//!
//! ### Example
//! This example defines Christmas and the first Sunday of Advent, with an Advent week counter and
//! a Sunday celebration activated by it.
//! ```rust
//! # use ordo::calendar::*;
//! # use chrono::Weekday;
//! let definition = CalendarDefinition::new(CalendarSettings::default())
//!     .with_variable("christmas", Variable::fixed("1225").unwrap())
//!     .with_variable(
//!         "firstSundayOfAdvent",
//!         Variable::derived(&["christmas"], |s| {
//!             s.sub("christmas", 4, Some(Weekday::Sun)).map(Value::Date)
//!         }),
//!     )
//!     .with_counter(
//!         "weekOfAdvent",
//!         CounterDef::new(
//!             DateRef::Anchor(Name::new("firstSundayOfAdvent")),
//!             Until::On(DateRef::Anchor(Name::new("christmas"))),
//!         )
//!         .step_on(Weekday::Sun),
//!     )
//!     .with_rank("sunday", Rank::new(2).exclusive())
//!     .with_celebration(
//!         "adventSunday",
//!         Celebration::new(
//!             Activation::Predicate(|c| {
//!                 Ok(c.counter("weekOfAdvent")?.has_value() && c.is(Weekday::Sun))
//!             }),
//!             "sunday",
//!         ),
//!     );
//! let year = resolve(&definition, 2024).unwrap();
//! assert_eq!(year.occurrences_of("adventSunday").len(), 4);
//! let gaudete = year.day_at(&ndt(2024, 12, 15)).unwrap();
//! assert_eq!(gaudete.counter("weekOfAdvent").number, Some(3));
//! ```
//!
//! # Caching
//!
//! A [`Calendar`] wraps a definition and resolves each year once, sharing the result behind an
//! [`Arc`](std::sync::Arc) with every caller.
//!
//! ### Example
//! ```rust
//! # use ordo::calendar::{ndt, Calendar};
//! # use ordo::rites::roman::general_roman_calendar;
//! let calendar = Calendar::new(general_roman_calendar());
//! let year = calendar.resolve(2024).unwrap();
//! assert_eq!(year.variable("easter"), Some(ndt(2024, 3, 31)));
//! ```

mod candidates;
mod context;
mod counters;
mod date;
mod definition;
mod easter;
mod error;
mod manager;
mod name;
mod resolved;
mod resolver;
mod serde;
mod variables;

pub use crate::calendar::{
    candidates::generate_candidates,
    context::DayContext,
    counters::{resolve_counter, resolve_counters, CounterSpan, CounterValue},
    date::{
        add_days, cal_date_range, ndt, roll_backward_weekday, roll_forward_weekday, sub_days,
        year_dates, Direction, MonthDay,
    },
    definition::{
        Activation, CalendarDefinition, CalendarSettings, Celebration, CounterDef, DateRef,
        DateRule, OutrankRule, Outranked, Predicate, Rank, RankRef, SaintClass, Trigger, Until,
        Value, ValueRule, Variable,
    },
    easter::gregorian_easter,
    error::{CalendarError, Result},
    manager::Calendar,
    name::Name,
    resolved::{resolve, Disposition, ResolvedCycle, ResolvedDay, ResolvedYear, TransferRecord},
    variables::{resolve_variables, VariableMap, VariableScope},
};
