//! This is the documentation for ordo, a resolver of liturgical calendars.
//!
//! A calendar is declared as anchor variables, ordinal counters, ranked celebrations and their
//! activation rules. For any year *ordo* computes which celebration occupies each date, which are
//! commemorated alongside it and which are transferred elsewhere. See [`calendar`] for the
//! engine and [`rites`] for the built-in calendars.
//!
//! ```rust
//! # use ordo::calendar::ndt;
//! # use ordo::rites::RiteManager;
//! let roman = RiteManager::new().get("roman").unwrap();
//! let year = roman.resolve(2024).unwrap();
//! let christmas = year.day_at(&ndt(2024, 12, 25)).unwrap();
//! assert!(christmas.celebrates("christmas"));
//! ```

#[cfg(test)]
mod tests;

pub mod json;

pub mod calendar;

pub mod rites;
