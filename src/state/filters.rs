//! Filter Selection State
//!
//! Each chart view owns one `FilterSelection` behind a signal. Every
//! fetch carries the complete current selection, never a delta, so the
//! issued query is a pure function of this struct.

use chrono::{Duration, NaiveDate, SecondsFormat, Utc};

use crate::api::Robot;

/// Value sent for the synthetic "all" dropdown entry.
pub const ALL: &str = "all";

/// Aggregation bucket size for a series.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Interval {
    Daily,
    Weekly,
    Monthly,
}

impl Interval {
    pub const ALL: [Interval; 3] = [Interval::Daily, Interval::Weekly, Interval::Monthly];

    /// Wire value expected by the API.
    pub fn as_str(self) -> &'static str {
        match self {
            Interval::Daily => "daily",
            Interval::Weekly => "weekly",
            Interval::Monthly => "monthly",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Interval::Daily => "Daily",
            Interval::Weekly => "Weekly",
            Interval::Monthly => "Monthly",
        }
    }

    pub fn parse(value: &str) -> Option<Interval> {
        Interval::ALL.into_iter().find(|i| i.as_str() == value)
    }
}

/// Inclusive day range selected in the date-range control.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    /// Range ending today and starting `days` days earlier.
    pub fn last_days(days: i64) -> Self {
        let end = Utc::now().date_naive();
        Self {
            start: end - Duration::days(days),
            end,
        }
    }

    /// ISO-8601 timestamp at the start of the first day.
    pub fn lowerbound(&self) -> String {
        self.start
            .and_hms_opt(0, 0, 0)
            .unwrap()
            .and_utc()
            .to_rfc3339_opts(SecondsFormat::Secs, true)
    }

    /// ISO-8601 timestamp at the end of the last day, so the selected
    /// end day is included in the query window.
    pub fn upperbound(&self) -> String {
        self.end
            .and_hms_opt(23, 59, 59)
            .unwrap()
            .and_utc()
            .to_rfc3339_opts(SecondsFormat::Secs, true)
    }
}

/// The complete filter state of one chart view. Defaults differ per
/// view (Hours uses a one-week daily window, the pick-based views a
/// one-year weekly window), so each view constructs its own.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FilterSelection {
    pub interval: Interval,
    pub robot_id: String,
    pub site: String,
    pub pick_object: String,
    pub range: DateRange,
}

impl FilterSelection {
    /// Selection covering the last `days` days with everything else
    /// set to "all".
    pub fn new(interval: Interval, days: i64) -> Self {
        Self {
            interval,
            robot_id: ALL.to_string(),
            site: ALL.to_string(),
            pick_object: ALL.to_string(),
            range: DateRange::last_days(days),
        }
    }

    /// The full query parameter set for the current selection.
    pub fn query(&self) -> Vec<(&'static str, String)> {
        vec![
            ("interval", self.interval.as_str().to_string()),
            ("lowerbound_dt", self.range.lowerbound()),
            ("upperbound_dt", self.range.upperbound()),
            ("robot_id", self.robot_id.clone()),
            ("site", self.site.clone()),
            ("pick_object", self.pick_object.clone()),
        ]
    }
}

/// One dropdown entry.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SelectOption {
    pub value: String,
    pub label: String,
}

impl SelectOption {
    fn new(value: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
        }
    }
}

pub fn interval_options() -> Vec<SelectOption> {
    Interval::ALL
        .into_iter()
        .map(|i| SelectOption::new(i.as_str(), i.label()))
        .collect()
}

/// Robot dropdown: synthetic "all" entry first, then the reference
/// list in its original order.
pub fn robot_options(robots: &[Robot]) -> Vec<SelectOption> {
    let mut options = vec![SelectOption::new(ALL, "All Robots")];
    options.extend(robots.iter().map(|r| SelectOption::new(&r.id, &r.name)));
    options
}

pub fn site_options(sites: &[String]) -> Vec<SelectOption> {
    let mut options = vec![SelectOption::new(ALL, "All Sites")];
    options.extend(sites.iter().map(|s| SelectOption::new(s, s)));
    options
}

pub fn object_options(objects: &[String]) -> Vec<SelectOption> {
    let mut options = vec![SelectOption::new(ALL, "All Objects")];
    options.extend(objects.iter().map(|o| SelectOption::new(o, o)));
    options
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_interval_round_trip() {
        for interval in Interval::ALL {
            assert_eq!(Interval::parse(interval.as_str()), Some(interval));
        }
        assert_eq!(Interval::parse("hourly"), None);
    }

    #[test]
    fn test_default_selection_covers_window() {
        let selection = FilterSelection::new(Interval::Weekly, 365);
        assert_eq!(selection.robot_id, ALL);
        assert_eq!(selection.site, ALL);
        assert_eq!(selection.pick_object, ALL);
        let days = (selection.range.end - selection.range.start).num_days();
        assert_eq!(days, 365);
    }

    #[test]
    fn test_query_carries_complete_selection() {
        let mut selection = FilterSelection::new(Interval::Daily, 7);
        selection.robot_id = "r1".to_string();

        let query = selection.query();
        let keys: Vec<&str> = query.iter().map(|(k, _)| *k).collect();
        assert_eq!(
            keys,
            vec![
                "interval",
                "lowerbound_dt",
                "upperbound_dt",
                "robot_id",
                "site",
                "pick_object"
            ]
        );
        assert_eq!(query[0].1, "daily");
        assert_eq!(query[3].1, "r1");
        // Untouched fields still travel with the request.
        assert_eq!(query[4].1, ALL);
        assert_eq!(query[5].1, ALL);
    }

    #[test]
    fn test_date_bounds_serialize_as_iso8601() {
        let range = DateRange {
            start: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            end: NaiveDate::from_ymd_opt(2024, 1, 7).unwrap(),
        };
        assert_eq!(range.lowerbound(), "2024-01-01T00:00:00Z");
        assert_eq!(range.upperbound(), "2024-01-07T23:59:59Z");
    }

    #[test]
    fn test_robot_options_prepend_all() {
        let robots = vec![
            Robot {
                id: "r2".to_string(),
                name: "Bot2".to_string(),
            },
            Robot {
                id: "r1".to_string(),
                name: "Bot1".to_string(),
            },
        ];
        let options = robot_options(&robots);
        assert_eq!(options.len(), 3);
        assert_eq!(options[0].value, ALL);
        assert_eq!(options[0].label, "All Robots");
        // Source order preserved, no reordering.
        assert_eq!(options[1].value, "r2");
        assert_eq!(options[2].value, "r1");
    }

    #[test]
    fn test_site_and_object_options() {
        let sites = vec!["siteA".to_string(), "siteB".to_string()];
        let options = site_options(&sites);
        assert_eq!(options[0].label, "All Sites");
        assert_eq!(options[1].value, "siteA");
        assert_eq!(options[2].label, "siteB");

        let objects = vec!["box".to_string()];
        let options = object_options(&objects);
        assert_eq!(options[0].label, "All Objects");
        assert_eq!(options[1].value, "box");
    }
}
