//! Subset selection applied before any aggregation.
use crate::classify;
use crate::types::{Activity, Area, DemandSource, Equipment};
use chrono::NaiveDate;
use clap::ValueEnum;
use serde::Serialize;

/// Inclusive date range; either bound may be open.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
pub struct DateRange {
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
}

impl DateRange {
    pub fn new(start: Option<NaiveDate>, end: Option<NaiveDate>) -> Self {
        DateRange { start, end }
    }

    pub fn is_empty(&self) -> bool {
        self.start.is_none() && self.end.is_none()
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start.map_or(true, |s| s <= date) && self.end.map_or(true, |e| date <= e)
    }

    /// An undated record never matches a bounded range.
    pub fn matches(&self, activity: &Activity) -> bool {
        if self.is_empty() {
            return true;
        }
        activity.start_date.is_some_and(|d| self.contains(d))
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, ValueEnum)]
pub enum KindFilter {
    #[default]
    All,
    Tasks,
    WorkOrders,
}

pub fn filter_by_range(data: &[Activity], range: DateRange) -> Vec<Activity> {
    if range.is_empty() {
        return data.to_vec();
    }
    data.iter().filter(|a| range.matches(a)).cloned().collect()
}

pub fn filter_on_date(data: &[Activity], date: NaiveDate) -> Vec<Activity> {
    data.iter()
        .filter(|a| a.start_date == Some(date))
        .cloned()
        .collect()
}

/// Month drill-down: matches the record's month column, and its year column
/// when a year is given.
pub fn filter_by_month(data: &[Activity], month: u32, year: Option<i32>) -> Vec<Activity> {
    data.iter()
        .filter(|a| a.month == Some(month) && year.map_or(true, |y| a.year == Some(y)))
        .cloned()
        .collect()
}

pub fn filter_by_kind(data: &[Activity], kind: KindFilter) -> Vec<Activity> {
    match kind {
        KindFilter::All => data.to_vec(),
        KindFilter::Tasks => data.iter().filter(|a| classify::is_task(a)).cloned().collect(),
        KindFilter::WorkOrders => data
            .iter()
            .filter(|a| classify::is_work_order(a))
            .cloned()
            .collect(),
    }
}

pub fn filter_by_equipment(data: &[Activity], equipment: Equipment) -> Vec<Activity> {
    data.iter()
        .filter(|a| a.has_equipment(equipment))
        .cloned()
        .collect()
}

pub fn filter_by_area(data: &[Activity], area: Area) -> Vec<Activity> {
    data.iter()
        .filter(|a| area.matches(&a.requester_area))
        .cloned()
        .collect()
}

pub fn filter_by_demand(data: &[Activity], source: DemandSource) -> Vec<Activity> {
    data.iter()
        .filter(|a| a.demand.contains(&source))
        .cloned()
        .collect()
}

/// Activities flagged "Execução - GLOBAL".
pub fn global_activities(data: &[Activity]) -> Vec<Activity> {
    data.iter().filter(|a| a.executed_global).cloned().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dated(y: i32, m: u32, d: u32) -> Activity {
        Activity {
            start_date: NaiveDate::from_ymd_opt(y, m, d),
            month: Some(m),
            year: Some(y),
            ..Default::default()
        }
    }

    fn ymd(y: i32, m: u32, d: u32) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(y, m, d)
    }

    #[test]
    fn range_is_inclusive_on_both_ends() {
        let data = vec![dated(2025, 1, 1), dated(2025, 1, 15), dated(2025, 1, 31), dated(2025, 2, 1)];
        let range = DateRange::new(ymd(2025, 1, 1), ymd(2025, 1, 31));
        assert_eq!(filter_by_range(&data, range).len(), 3);
    }

    #[test]
    fn open_ended_ranges() {
        let data = vec![dated(2024, 12, 31), dated(2025, 1, 1)];
        assert_eq!(filter_by_range(&data, DateRange::new(ymd(2025, 1, 1), None)).len(), 1);
        assert_eq!(filter_by_range(&data, DateRange::new(None, ymd(2024, 12, 31))).len(), 1);
    }

    #[test]
    fn empty_range_keeps_undated_records() {
        let data = vec![Activity::default(), dated(2025, 1, 1)];
        assert_eq!(filter_by_range(&data, DateRange::default()).len(), 2);
    }

    #[test]
    fn undated_records_never_match_a_bound() {
        let data = vec![Activity::default()];
        assert!(filter_by_range(&data, DateRange::new(None, ymd(2100, 1, 1))).is_empty());
    }

    #[test]
    fn single_date_equality() {
        let data = vec![dated(2025, 6, 14), dated(2025, 6, 15)];
        let hits = filter_on_date(&data, NaiveDate::from_ymd_opt(2025, 6, 15).unwrap());
        assert_eq!(hits.len(), 1);
    }

    #[test]
    fn month_with_and_without_year() {
        let data = vec![dated(2024, 3, 1), dated(2025, 3, 1), dated(2025, 4, 1)];
        assert_eq!(filter_by_month(&data, 3, None).len(), 2);
        assert_eq!(filter_by_month(&data, 3, Some(2025)).len(), 1);
    }

    #[test]
    fn kind_split_is_exhaustive() {
        let task = Activity {
            is_task: true,
            ..Default::default()
        };
        let data = vec![task, Activity::default(), Activity::default()];
        assert_eq!(filter_by_kind(&data, KindFilter::Tasks).len(), 1);
        assert_eq!(filter_by_kind(&data, KindFilter::WorkOrders).len(), 2);
        assert_eq!(filter_by_kind(&data, KindFilter::All).len(), 3);
    }

    #[test]
    fn area_accepts_alternate_spellings() {
        let mk = |area: &str| Activity {
            requester_area: area.to_string(),
            ..Default::default()
        };
        let data = vec![mk("MARKETING"), mk("MKT Conteúdos"), mk("ENGENHARIA")];
        assert_eq!(filter_by_area(&data, Area::Marketing).len(), 2);
        assert_eq!(filter_by_area(&data, Area::Engineering).len(), 1);
        assert!(filter_by_area(&data, Area::FrontOffice).is_empty());
    }

    #[test]
    fn equipment_labels_ignore_case() {
        assert_eq!(Equipment::from_label("base de dados"), Some(Equipment::Database));
        assert_eq!(Equipment::from_label("  VSA "), Some(Equipment::Vsa));
        assert_eq!(Equipment::from_label("torradeira"), None);
    }

    #[test]
    fn equipment_drill_down_keeps_flagged_records() {
        let mk = |id: &str, list: &[Equipment]| Activity {
            search_id: id.to_string(),
            equipment: list.iter().copied().collect(),
            ..Default::default()
        };
        let data = vec![
            mk("a", &[Equipment::Vsa, Equipment::Rdv]),
            mk("b", &[Equipment::Rdv]),
            mk("c", &[Equipment::Database]),
            mk("d", &[]),
        ];
        let ids: Vec<String> = filter_by_equipment(&data, Equipment::Rdv)
            .into_iter()
            .map(|a| a.search_id)
            .collect();
        assert_eq!(ids, ["a", "b"]);
        assert_eq!(filter_by_equipment(&data, Equipment::Database).len(), 1);
        assert!(filter_by_equipment(&data, Equipment::Task).is_empty());
    }

    #[test]
    fn global_and_demand_subsets() {
        let data = vec![
            Activity {
                executed_global: true,
                demand: [DemandSource::Global].into_iter().collect(),
                ..Default::default()
            },
            Activity {
                demand: [DemandSource::Platform].into_iter().collect(),
                ..Default::default()
            },
            Activity::default(),
        ];
        assert_eq!(global_activities(&data).len(), 1);
        assert!(global_activities(&data)[0].executed_global);
        assert_eq!(filter_by_demand(&data, DemandSource::Platform).len(), 1);
        assert!(filter_by_demand(&data, DemandSource::Engineering).is_empty());
    }
}
