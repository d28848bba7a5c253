use crate::calendar::{ndt, Disposition, Name, TransferRecord};
use crate::rites::RiteManager;
use chrono::Weekday;

fn names(v: &[&str]) -> Vec<Name> {
    v.iter().map(|n| Name::new(n)).collect()
}

fn transfer(celebration: &str, from: (i32, u32, u32), to: (i32, u32, u32)) -> TransferRecord {
    TransferRecord {
        celebration: Name::new(celebration),
        from: ndt(from.0, from.1, from.2),
        to: ndt(to.0, to.1, to.2),
    }
}

#[test]
fn reference_days_2024() {
    let roman = RiteManager::new().get("roman").unwrap();
    let year = roman.resolve(2024).unwrap();
    let options: Vec<((u32, u32), &str)> = vec![
        ((1, 1), "maryMotherOfGod"),
        ((1, 7), "baptism"),
        ((2, 3), "marySaturday"),
        ((3, 19), "joseph"),
        ((3, 28), "holyThursday"),
        ((3, 31), "easter"),
        ((4, 8), "annunciation"),
        ((5, 9), "ascension"),
        ((5, 19), "pentecost"),
        ((5, 20), "motherOfTheChurch"),
        ((5, 30), "corpusChristi"),
        ((11, 24), "christTheKing"),
        ((11, 30), "andrew"),
        ((12, 1), "adventSunday"),
        ((12, 8), "adventSunday"),
        ((12, 9), "immaculateConception"),
        ((12, 17), "endOfAdventDay"),
        ((12, 24), "dec24"),
        ((12, 25), "christmas"),
        ((12, 29), "holyFamily"),
        ((12, 31), "christmasOctave"),
    ];
    for ((m, d), winner) in options {
        let day = year.day_at(&ndt(2024, m, d)).unwrap();
        assert_eq!(day.winner, Some(Name::new(winner)), "{}-{}", m, d);
    }
}

#[test]
fn counters_2024() {
    let roman = RiteManager::new().get("roman").unwrap();
    let year = roman.resolve(2024).unwrap();
    let day = |m, d| year.day_at(&ndt(2024, m, d)).unwrap();

    assert!(day(1, 1).counter("dayOfChristmasAtBeginningOfYear").is(8));
    assert!(day(3, 19).counter("weekOfLent").is(5));
    assert!(day(5, 20).counter("weekOfOrdinaryTimeAfterPentecost").is(7));
    assert!(day(11, 24).counter("weekOfOrdinaryTimeAfterPentecost").is(34));
    assert!(day(12, 8).counter("weekOfAdvent").is(2));
    assert!(day(12, 17).counter("weekOfAdvent").is(3));
    assert!(day(12, 22).counter("weekOfAdvent").is(4));
    assert!(!day(12, 25).counter("weekOfAdvent").has_value());

    let advent: Vec<_> = year
        .days()
        .filter(|d| d.counter("weekOfAdvent").has_value())
        .collect();
    assert_eq!(advent.len(), 24);
    let gaudete: Vec<_> = advent
        .iter()
        .filter(|d| d.weekday == Weekday::Sun && d.counter("weekOfAdvent").is(3))
        .map(|d| d.date)
        .collect();
    assert_eq!(gaudete, vec![ndt(2024, 12, 15)]);

    let ordinary: Vec<_> = year
        .days()
        .filter(|d| d.counter("weekOfOrdinaryTimeAfterPentecost").has_value())
        .map(|d| d.date)
        .collect();
    assert_eq!(ordinary.first(), Some(&ndt(2024, 5, 20)));
    assert_eq!(ordinary.last(), Some(&ndt(2024, 11, 30)));
}

#[test]
fn dispositions_2024() {
    let roman = RiteManager::new().get("roman").unwrap();
    let year = roman.resolve(2024).unwrap();
    let day = |m, d| year.day_at(&ndt(2024, m, d)).unwrap();

    let christmas = day(12, 25);
    assert_eq!(
        christmas.dispositions[&Name::new("christmasOctave")],
        Disposition::Omitted
    );
    assert!(christmas.commemorations.is_empty());

    let dec9 = day(12, 9);
    assert_eq!(dec9.suppressed(), names(&["juanDiego"]));
    assert!(dec9.candidates.contains(&Name::new("immaculateConception")));
    assert_eq!(
        day(12, 8).dispositions[&Name::new("immaculateConception")],
        Disposition::Transferred {
            to: ndt(2024, 12, 9)
        }
    );

    let saturday = day(2, 3);
    assert!(saturday.commemorations.is_empty());
    assert_eq!(
        saturday.dispositions[&Name::new("marySaturday")],
        Disposition::Winner
    );
    assert_eq!(
        saturday.dispositions[&Name::new("ordinaryTimeWeekdayAfterEpiphany")],
        Disposition::Omitted
    );

    let fabian = day(1, 20);
    assert_eq!(fabian.commemorations, names(&["sebastian", "marySaturday"]));
    assert_eq!(fabian.top_rank, Some(Name::new("optionalMemorial")));
    assert!(!fabian.celebrates("ordinaryTimeWeekdayAfterEpiphany"));

    let suppressed = year.suppressed();
    assert!(suppressed.contains(&(ndt(2024, 12, 9), Name::new("juanDiego"))));
    assert!(suppressed.contains(&(ndt(2024, 12, 29), Name::new("thomasBecket"))));
}

#[test]
fn transfers_by_year() {
    let roman = RiteManager::new().get("roman").unwrap();
    let options = vec![
        (
            2024,
            vec![
                transfer("annunciation", (2024, 3, 25), (2024, 4, 8)),
                transfer("immaculateConception", (2024, 12, 8), (2024, 12, 9)),
            ],
        ),
        (
            2008,
            vec![
                transfer("joseph", (2008, 3, 19), (2008, 3, 31)),
                transfer("annunciation", (2008, 3, 25), (2008, 4, 1)),
            ],
        ),
        (2016, vec![transfer("annunciation", (2016, 3, 25), (2016, 4, 4))]),
        (2017, vec![transfer("joseph", (2017, 3, 19), (2017, 3, 20))]),
        (2018, vec![transfer("annunciation", (2018, 3, 25), (2018, 4, 9))]),
        (2023, vec![transfer("joseph", (2023, 3, 19), (2023, 3, 20))]),
        (2011, vec![]),
        (2015, vec![]),
        (2022, vec![]),
        (2025, vec![]),
    ];
    for (y, expected) in options {
        let year = roman.resolve(y).unwrap();
        assert_eq!(year.transfers(), expected.as_slice(), "{}", y);
    }
}

#[test]
fn repeated_pentecost_liturgy() {
    let roman = RiteManager::new().get("roman").unwrap();
    let year = roman.resolve(2017).unwrap();
    for d in [5, 6] {
        let day = year.day_at(&ndt(2017, 6, d)).unwrap();
        assert_eq!(day.winner, Some(Name::new("pentecostRepeat")));
        assert!(day.commemorations.is_empty());
        assert_eq!(
            day.dispositions[&Name::new("ordinaryTimeWeekdayAfterPentecost")],
            Disposition::Omitted
        );
    }

    let year = roman.resolve(2018).unwrap();
    assert_eq!(
        year.day_at(&ndt(2018, 5, 21)).unwrap().winner,
        Some(Name::new("motherOfTheChurch"))
    );
    assert_eq!(
        year.day_at(&ndt(2018, 5, 22)).unwrap().winner,
        Some(Name::new("ordinaryTimeWeekdayAfterPentecost"))
    );
}

#[test]
fn liturgical_cycle_2025() {
    let roman = RiteManager::new().get("roman").unwrap();
    let cycle = roman.resolve_cycle(2025).unwrap();
    assert_eq!(cycle.cycle_year, 2025);
    assert_eq!(cycle.len(), 364);
    assert_eq!(cycle.days().next().unwrap().date, ndt(2024, 12, 1));
    assert_eq!(cycle.days().last().unwrap().date, ndt(2025, 11, 29));
    assert_eq!(
        cycle.transfers(),
        &[transfer("immaculateConception", (2024, 12, 8), (2024, 12, 9))]
    );
    assert!(cycle.day_at(&ndt(2024, 11, 30)).is_none());
    assert!(cycle.days().all(|d| d.cycle_year == 2025));

    let year = roman.resolve(2024).unwrap();
    assert_eq!(year.day_at(&ndt(2024, 11, 30)).unwrap().cycle_year, 2024);
    assert_eq!(year.day_at(&ndt(2024, 12, 1)).unwrap().cycle_year, 2025);
}
