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

//! The General Roman Calendar of the Roman Rite, as reformed from 2001.
//!
//! The temporal cycle is complete. The sanctoral cycle is a representative selection of
//! solemnities, feasts, memorials and optional memorials, restricted to celebrations that can
//! never meet another exclusive celebration of equal precedence on the same date.

use chrono::Weekday::{Fri, Mon, Sat, Sun, Thu};

use crate::calendar::{
    gregorian_easter, Activation, CalendarDefinition, CalendarSettings, Celebration, CounterDef,
    DateRef, Direction, MonthDay, Name, Outranked, Rank, SaintClass, Trigger, Until, Value,
    Variable,
};

/// Fixed-date celebrations of the sanctoral cycle: `mmdd`, name, rank and saint classes.
const SANCTORAL: &[(&str, &str, &str, &[&str])] = &[
    ("0103", "nameOfJesus", "optionalMemorial", &[]),
    ("0120", "fabian", "optionalMemorial", &["Pp", "M"]),
    ("0120", "sebastian", "optionalMemorial", &["M"]),
    ("0121", "agnesOfRome", "memorial", &["V", "M"]),
    ("0125", "conversionOfPaul", "feast", &["Ap"]),
    ("0128", "thomasAquinas", "memorial", &["P", "D"]),
    ("0202", "presentation", "feastOfTheLord", &[]),
    ("0222", "chair", "feast", &[]),
    ("0319", "joseph", "solemnity", &[]),
    ("0325", "annunciation", "solemnity", &[]),
    ("0425", "mark", "feast", &["Ev"]),
    ("0429", "catherineOfSiena", "memorial", &["V", "D"]),
    ("0501", "josephTheWorker", "optionalMemorial", &[]),
    ("0806", "transfiguration", "feastOfTheLord", &[]),
    ("0810", "lawrenceOfRome", "feast", &["Dn", "M"]),
    ("0815", "assumption", "solemnity", &[]),
    ("0914", "exaltationOfTheCross", "feast", &[]),
    ("1018", "luke", "feast", &["Ev"]),
    ("1101", "allSaints", "solemnity", &[]),
    ("1102", "allSouls", "strongDay", &[]),
    ("1109", "lateran", "feast", &[]),
    ("1111", "martinOfTours", "memorial", &["B"]),
    ("1122", "cecilia", "memorial", &["V", "M"]),
    ("1130", "andrew", "feast", &["Ap"]),
    ("1203", "francisXavier", "memorial", &["P"]),
    ("1206", "nicholasOfMyra", "optionalMemorial", &["B"]),
    ("1207", "ambroseOfMilan", "memorial", &["B", "D"]),
    ("1208", "immaculateConception", "solemnity", &[]),
    ("1213", "lucy", "memorial", &["V", "M"]),
    ("1214", "johnOfTheCross", "memorial", &["P", "D"]),
    ("1221", "peterCanisius", "optionalMemorial", &["P", "D"]),
    ("1226", "stephen", "feast", &["Dn", "M"]),
    ("1227", "john", "feast", &["Ap", "Ev"]),
    ("1228", "holyInnocents", "feast", &["M"]),
    ("1229", "thomasBecket", "optionalMemorial", &["B", "M"]),
    ("1231", "sylvesterI", "optionalMemorial", &["Pp"]),
];

/// Celebrations of the Blessed Virgin Mary.
const MARIAN: &[&str] = &[
    "maryMotherOfGod",
    "motherOfTheChurch",
    "immaculateHeart",
    "assumption",
    "immaculateConception",
    "marySaturday",
];

/// Saint classes and the classes each may be combined with.
const SAINT_CLASSES: &[(&str, &[&str])] = &[
    ("Ap", &["Ev"]),
    ("Ev", &[]),
    ("Pp", &["D", "M"]),
    ("B", &["D", "M"]),
    ("Ab", &["D", "M"]),
    ("P", &["D", "M"]),
    ("R", &["D", "M"]),
    ("H", &["D", "M"]),
    ("V", &["D", "M"]),
    ("Dn", &["D", "M"]),
    ("M", &["D"]),
    ("D", &[]),
];

/// A fixed activation from a static `mmdd` literal of this module.
///
/// Panics on an invalid literal, which the unit tests rule out.
fn on(mmdd: &str) -> Activation {
    Activation::fixed(mmdd).expect("rite data holds valid `mmdd` literals")
}

fn anchor(name: &str) -> Activation {
    Activation::Anchor(Name::new(name))
}

fn date_of(name: &str) -> DateRef {
    DateRef::Anchor(Name::new(name))
}

/// Return the definition of the General Roman Calendar.
///
/// # Examples
///
/// ```rust
/// # use ordo::calendar::{ndt, resolve};
/// # use ordo::rites::roman::general_roman_calendar;
/// let year = resolve(&general_roman_calendar(), 2008).unwrap();
/// assert_eq!(year.occurrences_of("joseph"), &[ndt(2008, 3, 31)]);
/// assert_eq!(year.occurrences_of("annunciation"), &[ndt(2008, 4, 1)]);
/// ```
pub fn general_roman_calendar() -> CalendarDefinition {
    let settings = CalendarSettings {
        first_valid_year: 2001,
        cycle_starts_before_civil_year_boundary: true,
        cycle_start: Some(Name::new("firstSundayOfAdvent")),
        transfer_bound: None,
    };
    let mut definition = CalendarDefinition::new(settings);
    definition = variables(definition);
    definition = counters(definition);
    definition = ranks(definition);
    definition = temporal(definition);
    definition = sanctoral(definition);
    for (class, compatible) in SAINT_CLASSES {
        definition = definition.with_saint_class(class, SaintClass::new(compatible));
    }
    for name in MARIAN {
        if let Some(celebration) = definition.celebrations.get_mut(&Name::new(name)) {
            celebration.tags.insert(Name::new("mary"));
        }
    }
    definition
}

fn variables(definition: CalendarDefinition) -> CalendarDefinition {
    definition
        .with_variable("christmas", Variable::Fixed(md(12, 25)))
        .with_variable(
            "firstSundayOfAdvent",
            Variable::derived(&["christmas"], |s| {
                s.sub("christmas", 4, Some(Sun)).map(Value::Date)
            }),
        )
        .with_variable("epiphany", Variable::Fixed(md(1, 6)))
        .with_variable("epiphanyTransferred", Variable::Flag(false))
        .with_variable(
            "sundayAfterEpiphany",
            Variable::derived(&["epiphany"], |s| {
                s.add("epiphany", 1, Some(Sun)).map(Value::Date)
            }),
        )
        .with_variable(
            "easter",
            Variable::derived(&[], |s| {
                gregorian_easter(s.year())
                    .map(Value::Date)
                    .ok_or_else(|| s.out_of_range())
            }),
        )
        .with_variable(
            "holyThursday",
            Variable::derived(&["easter"], |s| s.sub("easter", 1, Some(Thu)).map(Value::Date)),
        )
        .with_variable(
            "goodFriday",
            Variable::derived(&["easter"], |s| s.sub("easter", 1, Some(Fri)).map(Value::Date)),
        )
        .with_variable(
            "divineMercySunday",
            Variable::derived(&["easter"], |s| s.add("easter", 1, Some(Sun)).map(Value::Date)),
        )
        .with_variable(
            "ashWednesday",
            Variable::derived(&["easter"], |s| s.sub("easter", 46, None).map(Value::Date)),
        )
        .with_variable(
            "firstSundayOfLent",
            Variable::derived(&["easter"], |s| s.sub("easter", 42, None).map(Value::Date)),
        )
        .with_variable(
            "palmSunday",
            Variable::derived(&["easter"], |s| s.sub("easter", 7, None).map(Value::Date)),
        )
        .with_variable("ascensionTransferred", Variable::Flag(false))
        .with_variable(
            "ascension",
            Variable::derived(&["easter"], |s| s.add("easter", 39, None).map(Value::Date)),
        )
        .with_variable(
            "sundayAfterAscension",
            Variable::derived(&["easter"], |s| s.add("easter", 42, None).map(Value::Date)),
        )
        .with_variable(
            "pentecost",
            Variable::derived(&["easter"], |s| s.add("easter", 49, None).map(Value::Date)),
        )
}

fn md(month: u32, day: u32) -> MonthDay {
    MonthDay::try_new(month, day).expect("rite data holds valid month-days")
}

fn counters(definition: CalendarDefinition) -> CalendarDefinition {
    definition
        .with_counter(
            "weekOfAdvent",
            CounterDef::new(date_of("firstSundayOfAdvent"), Until::On(date_of("christmas")))
                .step_on(Sun),
        )
        .with_counter(
            "dayOfChristmasAtEndOfYear",
            CounterDef::new(date_of("christmas"), Until::Indefinite),
        )
        .with_counter(
            "dayOfChristmasAtBeginningOfYear",
            CounterDef::new(DateRef::Fixed(md(1, 1)), Until::On(date_of("sundayAfterEpiphany")))
                .value_initial(8),
        )
        .with_counter(
            "weekOfOrdinaryTimeAfterEpiphany",
            CounterDef::new(
                DateRef::Dated(|s| s.add("sundayAfterEpiphany", 1, None)),
                Until::On(date_of("ashWednesday")),
            )
            .step_on(Sun),
        )
        .with_counter(
            "weekOfLent",
            CounterDef::new(date_of("firstSundayOfLent"), Until::On(date_of("palmSunday")))
                .step_on(Sun),
        )
        .with_counter(
            "weekOfEaster",
            CounterDef::new(date_of("easter"), Until::On(date_of("pentecost"))).step_on(Sun),
        )
        .with_counter(
            "weekOfOrdinaryTimeAfterPentecost",
            CounterDef::new(
                DateRef::Dated(|s| s.sub("firstSundayOfAdvent", 1, None)),
                Until::On(date_of("pentecost")),
            )
            .backwards()
            .value_initial(34)
            .value_step(-1)
            .step_on(Sat),
        )
}

fn ranks(definition: CalendarDefinition) -> CalendarDefinition {
    definition
        .with_rank("strongDay", Rank::new(1).exclusive())
        .with_rank("strongSolemnity", Rank::new(1).exclusive())
        .with_rank("strongSunday", Rank::new(2).exclusive())
        .with_rank(
            "solemnity",
            Rank::new(3)
                .exclusive()
                .if_outranked(Trigger::Always, Outranked::Transfer(Direction::After)),
        )
        .with_rank("feastOfTheLord", Rank::new(5).exclusive())
        .with_rank("weakSunday", Rank::new(6).exclusive())
        .with_rank("feast", Rank::new(7).exclusive())
        .with_rank("strongWeekday", Rank::new(9))
        .with_rank(
            "memorial",
            Rank::new(10)
                .exclusive()
                .if_outranked(Trigger::top_rank_in(&["strongWeekday"]), Outranked::Commemorate)
                .if_outranked(Trigger::Always, Outranked::Suppress),
        )
        .with_rank(
            "optionalMemorial",
            Rank::new(12)
                .if_outranked(Trigger::top_rank_in(&["strongWeekday"]), Outranked::Commemorate)
                .if_outranked(Trigger::Always, Outranked::Suppress),
        )
        .with_rank("marySaturday", Rank::new(12))
        .with_rank("repeatedLiturgy", Rank::new(12))
        .with_rank("weakWeekday", Rank::new(13))
}

fn temporal(definition: CalendarDefinition) -> CalendarDefinition {
    definition
        // Advent and Christmas
        .with_celebration(
            "adventSunday",
            Celebration::new(
                Activation::Predicate(|c| {
                    Ok(c.counter("weekOfAdvent")?.has_value() && c.is(Sun))
                }),
                "strongSunday",
            ),
        )
        .with_celebration(
            "adventWeekday",
            Celebration::new(
                Activation::Predicate(|c| {
                    Ok(c.counter("weekOfAdvent")?.has_value() && c.mmdd() < 1217 && !c.is(Sun))
                }),
                "weakWeekday",
            ),
        )
        .with_celebration(
            "endOfAdventDay",
            Celebration::new(
                Activation::Predicate(|c| Ok((1217..=1223).contains(&c.mmdd()))),
                "strongWeekday",
            ),
        )
        .with_celebration("dec24", Celebration::new(on("1224"), "strongWeekday"))
        .with_celebration("christmas", Celebration::new(anchor("christmas"), "strongSolemnity"))
        .with_celebration(
            "holyFamily",
            Celebration::new(
                Activation::Predicate(|c| {
                    Ok(((1226..=1231).contains(&c.mmdd()) && c.is(Sun))
                        || (c.mmdd() == 1230 && c.is(Fri)))
                }),
                "feastOfTheLord",
            ),
        )
        .with_celebration(
            "christmasOctave",
            Celebration::new(
                Activation::Predicate(|c| {
                    Ok(c.counter("dayOfChristmasAtEndOfYear")?.has_value() && !c.is(Sun))
                }),
                "strongWeekday",
            ),
        )
        .with_celebration("maryMotherOfGod", Celebration::new(on("0101"), "solemnity"))
        .with_celebration(
            "christmasWeekday",
            Celebration::new(
                Activation::Predicate(|c| {
                    Ok(c.counter("dayOfChristmasAtBeginningOfYear")?.has_value())
                }),
                "weakWeekday",
            ),
        )
        .with_celebration(
            "epiphany",
            Celebration::new(
                Activation::Predicate(|c| {
                    Ok(match c.flag("epiphanyTransferred")? {
                        false => c.mmdd() == 106,
                        true => (102..=108).contains(&c.mmdd()) && c.is(Sun),
                    })
                }),
                "strongSolemnity",
            ),
        )
        .with_celebration(
            "baptism",
            Celebration::new(
                Activation::Predicate(|c| {
                    let mmdd = c.mmdd();
                    Ok(match c.flag("epiphanyTransferred")? {
                        false => (107..=113).contains(&mmdd) && c.is(Sun),
                        true => {
                            ((108..=109).contains(&mmdd) && c.is(Mon))
                                || ((110..=113).contains(&mmdd) && c.is(Sun))
                        }
                    })
                }),
                "feastOfTheLord",
            ),
        )
        // Ordinary Time before Lent
        .with_celebration(
            "ordinaryTimeSundayAfterEpiphany",
            Celebration::new(
                Activation::Predicate(|c| {
                    Ok(c.counter("weekOfOrdinaryTimeAfterEpiphany")?.has_value() && c.is(Sun))
                }),
                "weakSunday",
            ),
        )
        .with_celebration(
            "ordinaryTimeWeekdayAfterEpiphany",
            Celebration::new(
                Activation::Predicate(|c| {
                    Ok(c.counter("weekOfOrdinaryTimeAfterEpiphany")?.has_value() && !c.is(Sun))
                }),
                "weakWeekday",
            ),
        )
        // Lent and the Triduum
        .with_celebration("ashWednesday", Celebration::new(anchor("ashWednesday"), "strongDay"))
        .with_celebration(
            "dayAfterAshWednesday",
            Celebration::new(
                Activation::Predicate(|c| {
                    Ok(c.is_after("ashWednesday")? && c.is_before("firstSundayOfLent")?)
                }),
                "strongWeekday",
            ),
        )
        .with_celebration(
            "lentSunday",
            Celebration::new(
                Activation::Predicate(|c| Ok(c.counter("weekOfLent")?.has_value() && c.is(Sun))),
                "strongSunday",
            ),
        )
        .with_celebration(
            "lentWeekday",
            Celebration::new(
                Activation::Predicate(|c| Ok(c.counter("weekOfLent")?.has_value() && !c.is(Sun))),
                "strongWeekday",
            ),
        )
        .with_celebration("palmSunday", Celebration::new(anchor("palmSunday"), "strongDay"))
        .with_celebration(
            "holyWeek",
            Celebration::new(
                Activation::Predicate(|c| {
                    Ok(c.is_after("palmSunday")? && c.is_before("holyThursday")?)
                }),
                "strongDay",
            ),
        )
        .with_celebration("holyThursday", Celebration::new(anchor("holyThursday"), "strongDay"))
        .with_celebration("goodFriday", Celebration::new(anchor("goodFriday"), "strongDay"))
        .with_celebration(
            "holySaturday",
            Celebration::new(Activation::Dated(|s| s.sub("easter", 1, None)), "strongDay"),
        )
        // Easter
        .with_celebration("easter", Celebration::new(anchor("easter"), "strongSolemnity"))
        .with_celebration(
            "easterWeek",
            Celebration::new(
                Activation::Predicate(|c| {
                    Ok(c.is_after("easter")? && c.is_before("divineMercySunday")?)
                }),
                "strongSolemnity",
            ),
        )
        .with_celebration(
            "divineMercySunday",
            Celebration::new(anchor("divineMercySunday"), "strongSolemnity"),
        )
        .with_celebration(
            "easterSunday",
            Celebration::new(
                Activation::Predicate(|c| Ok(c.counter("weekOfEaster")?.at_least(3) && c.is(Sun))),
                "strongSunday",
            ),
        )
        .with_celebration(
            "easterWeekday",
            Celebration::new(
                Activation::Predicate(|c| {
                    Ok(c.counter("weekOfEaster")?.at_least(2) && !c.is(Sun))
                }),
                "weakWeekday",
            ),
        )
        .with_celebration(
            "ascension",
            Celebration::new(
                Activation::Dated(|s| match s.flag("ascensionTransferred")? {
                    true => s.date("sundayAfterAscension"),
                    false => s.date("ascension"),
                }),
                "solemnity",
            ),
        )
        .with_celebration("pentecost", Celebration::new(anchor("pentecost"), "strongSolemnity"))
        // Ordinary Time after Pentecost
        .with_celebration(
            "ordinaryTimeSundayAfterPentecost",
            Celebration::new(
                Activation::Predicate(|c| {
                    Ok(c.counter("weekOfOrdinaryTimeAfterPentecost")?.has_value() && c.is(Sun))
                }),
                "weakSunday",
            ),
        )
        .with_celebration(
            "ordinaryTimeWeekdayAfterPentecost",
            Celebration::new(
                Activation::Predicate(|c| {
                    Ok(c.counter("weekOfOrdinaryTimeAfterPentecost")?.has_value() && !c.is(Sun))
                }),
                "weakWeekday",
            ),
        )
        .with_celebration(
            "pentecostRepeat",
            Celebration::new(
                Activation::Predicate(|c| {
                    Ok(c.year() <= 2017
                        && c.is_on(c.add("pentecost", 1, None)?, Some(c.add("pentecost", 2, None)?)))
                }),
                "repeatedLiturgy",
            ),
        )
        .with_celebration(
            "motherOfTheChurch",
            Celebration::new(
                Activation::Predicate(|c| {
                    Ok(c.year() >= 2018 && c.is_on(c.add("pentecost", 1, None)?, None))
                }),
                "memorial",
            ),
        )
        .with_celebration(
            "trinity",
            Celebration::new(Activation::Dated(|s| s.add("pentecost", 1, Some(Sun))), "solemnity"),
        )
        .with_celebration(
            "corpusChristi",
            Celebration::new(Activation::Dated(|s| s.add("pentecost", 2, Some(Thu))), "solemnity"),
        )
        .with_celebration(
            "sacredHeart",
            Celebration::new(Activation::Dated(|s| s.add("pentecost", 3, Some(Fri))), "solemnity"),
        )
        .with_celebration(
            "immaculateHeart",
            Celebration::new(Activation::Dated(|s| s.add("pentecost", 3, Some(Sat))), "memorial"),
        )
        .with_celebration(
            "christTheKing",
            Celebration::new(
                Activation::Dated(|s| s.sub("firstSundayOfAdvent", 1, Some(Sun))),
                "solemnity",
            ),
        )
}

fn sanctoral(mut definition: CalendarDefinition) -> CalendarDefinition {
    definition = definition.with_celebration(
        "basilGregory",
        Celebration::new(on("0102"), "memorial")
            .with_classes(&["B", "D"])
            .with_companions(&["basilOfCaesarea", "gregoryOfNazianzus"]),
    );
    for (mmdd, name, rank, classes) in SANCTORAL {
        definition =
            definition.with_celebration(name, Celebration::new(on(mmdd), rank).with_classes(classes));
    }
    definition
        .with_celebration(
            "philipJames",
            Celebration::new(on("0503"), "feast")
                .with_classes(&["Ap"])
                .with_companions(&["philip", "jamesTheLess"]),
        )
        .with_celebration(
            "maryMagdalene",
            Celebration::ranked_since(on("0722"), &[(2001, "memorial"), (2016, "feast")]),
        )
        .with_celebration(
            "johnPaulII",
            Celebration::new(
                Activation::Predicate(|c| Ok(c.year() >= 2014 && c.mmdd() == 1022)),
                "optionalMemorial",
            )
            .with_classes(&["Pp"]),
        )
        .with_celebration(
            "juanDiego",
            Celebration::new(
                Activation::Predicate(|c| Ok(c.year() >= 2002 && c.mmdd() == 1209)),
                "optionalMemorial",
            ),
        )
        // declared last so that saints win ties on Saturdays
        .with_celebration(
            "marySaturday",
            Celebration::new(
                Activation::Predicate(|c| {
                    Ok((c.counter("weekOfOrdinaryTimeAfterEpiphany")?.has_value()
                        || c.counter("weekOfOrdinaryTimeAfterPentecost")?.has_value())
                        && c.is(Sat))
                }),
                "marySaturday",
            ),
        )
}

// UNIT TESTS
#[cfg(test)]
mod tests {
    use super::*;
    use crate::calendar::{ndt, resolve, resolve_variables, Disposition};
    use std::str::FromStr;

    #[test]
    fn test_static_literals() {
        for (mmdd, _, _, _) in SANCTORAL {
            assert!(MonthDay::from_str(mmdd).is_ok(), "{}", mmdd);
        }
        let def = general_roman_calendar();
        for (name, celebration) in def.celebrations() {
            let rank = celebration.rank.in_year(2024).unwrap();
            assert!(def.rank(&rank).is_some(), "{} has rank {}", name, rank);
        }
        for name in MARIAN {
            assert!(def.celebration(name).unwrap().has_tag("mary"));
        }
    }

    #[test]
    fn test_variables_2024() {
        let vars = resolve_variables(&general_roman_calendar(), 2024).unwrap();
        assert_eq!(vars.date("easter"), Some(ndt(2024, 3, 31)));
        assert_eq!(vars.date("ashWednesday"), Some(ndt(2024, 2, 14)));
        assert_eq!(vars.date("palmSunday"), Some(ndt(2024, 3, 24)));
        assert_eq!(vars.date("holyThursday"), Some(ndt(2024, 3, 28)));
        assert_eq!(vars.date("goodFriday"), Some(ndt(2024, 3, 29)));
        assert_eq!(vars.date("divineMercySunday"), Some(ndt(2024, 4, 7)));
        assert_eq!(vars.date("ascension"), Some(ndt(2024, 5, 9)));
        assert_eq!(vars.date("pentecost"), Some(ndt(2024, 5, 19)));
        assert_eq!(vars.date("sundayAfterEpiphany"), Some(ndt(2024, 1, 7)));
        assert_eq!(vars.date("firstSundayOfAdvent"), Some(ndt(2024, 12, 1)));
    }

    #[test]
    fn test_movable_solemnities_2024() {
        let year = resolve(&general_roman_calendar(), 2024).unwrap();
        let options = [
            ("baptism", ndt(2024, 1, 7)),
            ("ascension", ndt(2024, 5, 9)),
            ("trinity", ndt(2024, 5, 26)),
            ("corpusChristi", ndt(2024, 5, 30)),
            ("sacredHeart", ndt(2024, 6, 7)),
            ("immaculateHeart", ndt(2024, 6, 8)),
            ("motherOfTheChurch", ndt(2024, 5, 20)),
            ("christTheKing", ndt(2024, 11, 24)),
            ("holyFamily", ndt(2024, 12, 29)),
        ];
        for (name, date) in options {
            assert_eq!(year.occurrences_of(name), &[date], "{}", name);
        }
    }

    #[test]
    fn test_optional_memorials_share_the_day() {
        let year = resolve(&general_roman_calendar(), 2024).unwrap();
        let day = year.day_at(&ndt(2024, 1, 20)).unwrap();
        assert_eq!(day.winner, Some(Name::new("fabian")));
        assert_eq!(
            day.commemorations,
            vec![Name::new("sebastian"), Name::new("marySaturday")]
        );
        assert_eq!(
            day.dispositions[&Name::new("ordinaryTimeWeekdayAfterEpiphany")],
            Disposition::Omitted
        );
    }

    #[test]
    fn test_memorial_under_strong_weekday() {
        // Sylvester falls in the octave of Christmas, a privileged weekday
        let year = resolve(&general_roman_calendar(), 2024).unwrap();
        let day = year.day_at(&ndt(2024, 12, 31)).unwrap();
        assert_eq!(day.winner, Some(Name::new("christmasOctave")));
        assert_eq!(day.commemorations, vec![Name::new("sylvesterI")]);

        // Thomas Becket is suppressed by the Holy Family on a Sunday
        let day = year.day_at(&ndt(2024, 12, 29)).unwrap();
        assert_eq!(day.winner, Some(Name::new("holyFamily")));
        assert_eq!(day.suppressed(), vec![Name::new("thomasBecket")]);
    }

    #[test]
    fn test_mary_magdalene_rank_by_year() {
        let def = general_roman_calendar();
        let day = |y: i32| {
            let year = resolve(&def, y).unwrap();
            year.day_at(&ndt(y, 7, 22)).unwrap().top_rank
        };
        assert_eq!(day(2015), Some(Name::new("memorial")));
        assert_eq!(day(2016), Some(Name::new("feast")));
    }

    #[test]
    fn test_year_gated_celebrations() {
        let def = general_roman_calendar();
        let year = resolve(&def, 2017).unwrap();
        assert!(year.occurrences_of("motherOfTheChurch").is_empty());
        assert_eq!(
            year.occurrences_of("pentecostRepeat"),
            &[ndt(2017, 6, 5), ndt(2017, 6, 6)]
        );
        // a Sunday in 2017
        assert!(year.occurrences_of("johnPaulII").is_empty());

        let year = resolve(&def, 2018).unwrap();
        assert_eq!(year.occurrences_of("motherOfTheChurch"), &[ndt(2018, 5, 21)]);
        assert!(year.occurrences_of("pentecostRepeat").is_empty());

        let year = resolve(&def, 2013).unwrap();
        assert!(year.occurrences_of("johnPaulII").is_empty());
        let year = resolve(&def, 2014).unwrap();
        assert_eq!(year.occurrences_of("johnPaulII"), &[ndt(2014, 10, 22)]);
    }

    #[test]
    fn test_transfers_2024() {
        let year = resolve(&general_roman_calendar(), 2024).unwrap();
        let day = year.day_at(&ndt(2024, 3, 25)).unwrap();
        assert_eq!(day.winner, Some(Name::new("holyWeek")));
        assert_eq!(
            day.dispositions[&Name::new("annunciation")],
            Disposition::Transferred { to: ndt(2024, 4, 8) }
        );
        assert_eq!(year.occurrences_of("immaculateConception"), &[ndt(2024, 12, 9)]);
    }

    #[test]
    fn test_saint_classes() {
        let def = general_roman_calendar();
        assert!(def.classes_compatible("Ap", "Ev"));
        assert!(def.classes_compatible("Ev", "Ap"));
        assert!(def.classes_compatible("V", "M"));
        assert!(def.classes_compatible("M", "D"));
        assert!(!def.classes_compatible("Ap", "M"));
        assert!(!def.classes_compatible("Ev", "D"));
        let john = def.celebration("john").unwrap();
        assert!(john.classes.contains(&Name::new("Ev")));
        let basil = def.celebration("basilGregory").unwrap();
        assert_eq!(basil.companions.len(), 2);
    }
}
