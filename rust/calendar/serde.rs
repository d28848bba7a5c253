use crate::calendar::{
    CalendarSettings, CounterValue, Disposition, ResolvedCycle, ResolvedDay, ResolvedYear,
    TransferRecord,
};
use crate::json::JSON;

impl JSON for CalendarSettings {}
impl JSON for CounterValue {}
impl JSON for Disposition {}
impl JSON for TransferRecord {}
impl JSON for ResolvedDay {}
impl JSON for ResolvedYear {}
impl JSON for ResolvedCycle {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calendar::{ndt, Name};
    use crate::rites::RiteManager;

    #[test]
    fn test_settings_json() {
        let settings = CalendarSettings {
            first_valid_year: 1970,
            cycle_starts_before_civil_year_boundary: true,
            cycle_start: Some(Name::new("firstSundayOfAdvent")),
            transfer_bound: Some(30),
        };
        let js = settings.to_json().unwrap();
        assert_eq!(
            js,
            r#"{"first_valid_year":1970,"cycle_starts_before_civil_year_boundary":true,"cycle_start":"firstSundayOfAdvent","transfer_bound":30}"#
        );
        let settings2 = CalendarSettings::from_json(&js).unwrap();
        assert_eq!(settings, settings2);
    }

    #[test]
    fn test_disposition_json() {
        let d = Disposition::Transferred { to: ndt(2024, 4, 8) };
        let js = d.to_json().unwrap();
        assert_eq!(js, r#"{"Transferred":{"to":"2024-04-08"}}"#);
        assert_eq!(Disposition::from_json(&js).unwrap(), d);
    }

    #[test]
    fn test_resolved_day_json() {
        let year = RiteManager::new().get("roman").unwrap().resolve(2024).unwrap();
        let day = year.day_at(&ndt(2024, 12, 15)).unwrap();
        let js = day.to_json().unwrap();
        assert!(js.contains(r#""weekOfAdvent":3"#));
        let day2 = ResolvedDay::from_json(&js).unwrap();
        assert_eq!(*day, day2);
        let pretty = day.to_json_pretty().unwrap();
        assert_eq!(ResolvedDay::from_json(&pretty).unwrap(), day2);
    }

    #[test]
    fn test_resolved_year_json() {
        let year = RiteManager::new().get("roman").unwrap().resolve(2008).unwrap();
        let js = year.to_json().unwrap();
        let year2 = ResolvedYear::from_json(&js).unwrap();
        assert_eq!(*year, year2);
    }
}
