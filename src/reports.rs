use crate::classify;
use crate::filters::{filter_by_area, filter_by_demand, filter_by_kind, filter_by_month, KindFilter};
use crate::types::{
    Activity, ActivityKind, Area, DemandRow, DemandSource, Equipment, EquipmentRow,
    GlobalMonthRow, MonthlyRow, Status,
};
use crate::util::{format_number, month_full, month_short, percentage};
use serde::Serialize;
use std::collections::BTreeMap;

/// Share above which an equipment is flagged as critical.
pub const CRITICAL_SHARE: f64 = 15.0;
/// Share above which an equipment needs attention.
pub const ATTENTION_SHARE: f64 = 10.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct YearMonth {
    pub year: i32,
    pub month: u32,
}

impl YearMonth {
    pub fn of(activity: &Activity) -> Option<YearMonth> {
        Some(YearMonth {
            year: activity.year?,
            month: activity.month?,
        })
    }

    /// Zero-padded `yyyy-mm`; sorts chronologically.
    pub fn key(&self) -> String {
        format!("{:04}-{:02}", self.year, self.month)
    }

    pub fn label(&self) -> String {
        format!("{}/{}", month_short(self.month), self.year)
    }
}

/// One counter per status bucket plus the total.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct StatusCounts {
    pub total: usize,
    pub success: usize,
    pub partial: usize,
    pub rollback: usize,
    pub authorized: usize,
    pub canceled: usize,
    pub not_executed: usize,
    pub pending_documentation: usize,
    pub work_order_without_ticket: usize,
    pub unrecognized: usize,
}

impl StatusCounts {
    pub fn add(&mut self, status: Status) {
        self.total += 1;
        match status {
            Status::Success => self.success += 1,
            Status::Partial => self.partial += 1,
            Status::Rollback => self.rollback += 1,
            Status::Authorized => self.authorized += 1,
            Status::Canceled => self.canceled += 1,
            Status::NotExecuted => self.not_executed += 1,
            Status::PendingDocumentation => self.pending_documentation += 1,
            Status::WorkOrderWithoutTicket => self.work_order_without_ticket += 1,
            Status::Unrecognized => self.unrecognized += 1,
        }
    }

    pub fn get(&self, status: Status) -> usize {
        match status {
            Status::Success => self.success,
            Status::Partial => self.partial,
            Status::Rollback => self.rollback,
            Status::Authorized => self.authorized,
            Status::Canceled => self.canceled,
            Status::NotExecuted => self.not_executed,
            Status::PendingDocumentation => self.pending_documentation,
            Status::WorkOrderWithoutTicket => self.work_order_without_ticket,
            Status::Unrecognized => self.unrecognized,
        }
    }

    pub fn realized(&self) -> usize {
        Status::ALL
            .into_iter()
            .filter(|s| classify::is_realized_status(*s))
            .map(|s| self.get(s))
            .sum()
    }

    pub fn not_realized(&self) -> usize {
        Status::ALL
            .into_iter()
            .filter(|s| classify::is_not_realized_status(*s))
            .map(|s| self.get(s))
            .sum()
    }

    pub fn success_rate(&self) -> f64 {
        percentage(self.success, self.total)
    }

    pub fn cancel_pct(&self) -> f64 {
        percentage(self.canceled, self.total)
    }
}

pub fn status_totals(data: &[Activity]) -> StatusCounts {
    let mut counts = StatusCounts::default();
    for a in data {
        counts.add(a.status);
    }
    counts
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MonthlyStats {
    pub period: YearMonth,
    pub counts: StatusCounts,
}

impl MonthlyStats {
    pub fn success_rate(&self) -> f64 {
        self.counts.success_rate()
    }

    pub fn to_row(&self) -> MonthlyRow {
        let c = &self.counts;
        MonthlyRow {
            month: self.period.label(),
            total: c.total,
            success: c.success,
            partial: c.partial,
            rollback: c.rollback,
            canceled: c.canceled,
            not_executed: c.not_executed,
            authorized: c.authorized,
            pending_documentation: c.pending_documentation,
            work_order_without_ticket: c.work_order_without_ticket,
            success_rate: format_number(c.success_rate(), 1),
            cancel_pct: format_number(c.cancel_pct(), 1),
        }
    }
}

/// Per-month status counts, one row per observed month in ascending order.
/// Records without a month or year are left out.
pub fn monthly_rollup(data: &[Activity]) -> Vec<MonthlyStats> {
    let mut map: BTreeMap<YearMonth, StatusCounts> = BTreeMap::new();
    for a in data {
        match YearMonth::of(a) {
            Some(period) => map.entry(period).or_default().add(a.status),
            None => log::debug!("Activity '{}' has no month/year, not rolled up", a.search_id),
        }
    }
    map.into_iter()
        .map(|(period, counts)| MonthlyStats { period, counts })
        .collect()
}

/// Same as [`monthly_rollup`] but restricted to `year` and pre-seeded with
/// all twelve months, so empty months show up as zero rows.
pub fn monthly_skeleton(data: &[Activity], year: i32) -> Vec<MonthlyStats> {
    let mut months: Vec<MonthlyStats> = (1..=12)
        .map(|month| MonthlyStats {
            period: YearMonth { year, month },
            counts: StatusCounts::default(),
        })
        .collect();
    for a in data.iter().filter(|a| a.year == Some(year)) {
        if let Some(slot) = a
            .month
            .filter(|m| (1..=12).contains(m))
            .map(|m| &mut months[(m - 1) as usize])
        {
            slot.counts.add(a.status);
        }
    }
    months
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthRate {
    pub month: String,
    pub success_rate: f64,
}

impl MonthRate {
    fn empty() -> Self {
        MonthRate {
            month: "-".to_string(),
            success_rate: 0.0,
        }
    }

    fn of(stats: &MonthlyStats) -> Self {
        MonthRate {
            month: stats.period.label(),
            success_rate: stats.success_rate(),
        }
    }
}

/// Highest success rate; the earliest month wins a tie.
pub fn best_month(months: &[MonthlyStats]) -> MonthRate {
    let Some(first) = months.first() else {
        return MonthRate::empty();
    };
    let best = months.iter().fold(first, |best, current| {
        if current.success_rate() > best.success_rate() {
            current
        } else {
            best
        }
    });
    MonthRate::of(best)
}

/// Lowest success rate; the earliest month wins a tie.
pub fn worst_month(months: &[MonthlyStats]) -> MonthRate {
    let Some(first) = months.first() else {
        return MonthRate::empty();
    };
    let worst = months.iter().fold(first, |worst, current| {
        if current.success_rate() < worst.success_rate() {
            current
        } else {
            worst
        }
    });
    MonthRate::of(worst)
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnnualSummary {
    pub total_activities: usize,
    pub successful_activities: usize,
    pub avg_success_rate: f64,
    pub best_month: MonthRate,
    pub worst_month: MonthRate,
    pub months: Vec<MonthlyStats>,
}

pub fn annual_summary(data: &[Activity]) -> AnnualSummary {
    let months = monthly_rollup(data);
    let counts = status_totals(data);
    AnnualSummary {
        total_activities: counts.total,
        successful_activities: counts.success,
        avg_success_rate: counts.success_rate(),
        best_month: best_month(&months),
        worst_month: worst_month(&months),
        months,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct EquipmentShare {
    pub equipment: Equipment,
    pub total: usize,
    pub percentage: f64,
}

impl EquipmentShare {
    pub fn level(&self) -> &'static str {
        if self.percentage > CRITICAL_SHARE {
            "Crítico"
        } else if self.percentage > ATTENTION_SHARE {
            "Atenção"
        } else {
            "Normal"
        }
    }

    pub fn to_row(&self) -> EquipmentRow {
        EquipmentRow {
            equipment: self.equipment.label().to_string(),
            total: self.total,
            percentage: format_number(self.percentage, 1),
            level: self.level().to_string(),
        }
    }
}

/// Flag count per equipment, zero entries included.
pub fn equipment_counts(data: &[Activity]) -> BTreeMap<Equipment, usize> {
    let mut totals: BTreeMap<Equipment, usize> =
        Equipment::ALL.into_iter().map(|e| (e, 0)).collect();
    for a in data {
        for e in &a.equipment {
            *totals.entry(*e).or_default() += 1;
        }
    }
    totals
}

/// Non-zero equipment counts with their share of all flagged occurrences,
/// largest first. Equal counts keep the column order.
pub fn equipment_tally(data: &[Activity]) -> Vec<EquipmentShare> {
    let totals = equipment_counts(data);
    let occurrences: usize = totals.values().sum();
    let mut shares: Vec<EquipmentShare> = Equipment::ALL
        .into_iter()
        .map(|equipment| {
            let total = totals.get(&equipment).copied().unwrap_or(0);
            EquipmentShare {
                equipment,
                total,
                percentage: percentage(total, occurrences),
            }
        })
        .filter(|s| s.total > 0)
        .collect();
    shares.sort_by(|a, b| b.total.cmp(&a.total));
    shares
}

/// Share of `subset` in `total`, in percent.
pub fn participation(subset: usize, total: usize) -> f64 {
    percentage(subset, total)
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AreaReport {
    pub area: Area,
    pub counts: StatusCounts,
    pub success_rate: f64,
    pub realized: usize,
    pub not_realized: usize,
    pub participation: f64,
    pub months: Vec<MonthlyStats>,
    pub equipment_counts: BTreeMap<Equipment, usize>,
    pub equipment: Vec<EquipmentShare>,
    pub partial_activities: Vec<Activity>,
}

/// Statistics for one requesting area. `data` is the population the
/// participation share is measured against.
pub fn area_report(data: &[Activity], area: Area) -> AreaReport {
    let subset = filter_by_area(data, area);
    let counts = status_totals(&subset);
    log::debug!(
        "Area {}: {} of {} activities",
        area,
        subset.len(),
        data.len()
    );
    AreaReport {
        area,
        counts,
        success_rate: counts.success_rate(),
        realized: counts.realized(),
        not_realized: counts.not_realized(),
        participation: participation(subset.len(), data.len()),
        months: monthly_rollup(&subset),
        equipment_counts: equipment_counts(&subset),
        equipment: equipment_tally(&subset),
        partial_activities: subset
            .iter()
            .filter(|a| a.status == Status::Partial)
            .cloned()
            .collect(),
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct KindSummary {
    pub kind: ActivityKind,
    pub counts: StatusCounts,
    pub months: Vec<MonthlyStats>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TasksReport {
    pub total: usize,
    pub tasks: KindSummary,
    pub work_orders: KindSummary,
    pub task_share: f64,
}

/// Task vs work-order split with monthly rollups for each side.
pub fn tasks_report(data: &[Activity]) -> TasksReport {
    let summarize = |kind: ActivityKind, filter: KindFilter| {
        let subset = filter_by_kind(data, filter);
        KindSummary {
            kind,
            counts: status_totals(&subset),
            months: monthly_rollup(&subset),
        }
    };
    let tasks = summarize(ActivityKind::Task, KindFilter::Tasks);
    let work_orders = summarize(ActivityKind::WorkOrder, KindFilter::WorkOrders);
    TasksReport {
        total: data.len(),
        task_share: participation(tasks.counts.total, data.len()),
        tasks,
        work_orders,
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthDetails {
    pub month: u32,
    pub month_name: &'static str,
    pub year: Option<i32>,
    pub kind: KindFilter,
    pub counts: StatusCounts,
    pub activities: Vec<Activity>,
}

pub fn month_details(
    data: &[Activity],
    month: u32,
    year: Option<i32>,
    kind: KindFilter,
) -> MonthDetails {
    let activities = filter_by_month(&filter_by_kind(data, kind), month, year);
    MonthDetails {
        month,
        month_name: month_full(month),
        year,
        kind,
        counts: status_totals(&activities),
        activities,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GlobalMonth {
    pub period: YearMonth,
    pub total: usize,
    pub success: usize,
    pub failed: usize,
    pub success_rate: f64,
}

impl GlobalMonth {
    pub fn to_row(&self) -> GlobalMonthRow {
        GlobalMonthRow {
            month: self.period.label(),
            total: self.total,
            success: self.success,
            failed: self.failed,
            success_rate: format_number(self.success_rate, 1),
        }
    }
}

/// Success vs everything-else per month. Expects the already selected
/// globally executed activities.
pub fn global_by_month(data: &[Activity]) -> Vec<GlobalMonth> {
    monthly_rollup(data)
        .into_iter()
        .map(|m| GlobalMonth {
            period: m.period,
            total: m.counts.total,
            success: m.counts.success,
            failed: m.counts.total - m.counts.success,
            success_rate: m.success_rate(),
        })
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DemandShare {
    pub source: DemandSource,
    pub counts: StatusCounts,
}

impl DemandShare {
    pub fn to_row(&self) -> DemandRow {
        DemandRow {
            demand: self.source.label().to_string(),
            total: self.counts.total,
            success: self.counts.success,
            canceled: self.counts.canceled,
            success_rate: format_number(self.counts.success_rate(), 1),
        }
    }
}

/// Status counts for each "Demanda - ..." origin, in column order. A record
/// flagged with several origins counts once under each.
pub fn demand_breakdown(data: &[Activity]) -> Vec<DemandShare> {
    DemandSource::ALL
        .into_iter()
        .map(|source| DemandShare {
            source,
            counts: status_totals(&filter_by_demand(data, source)),
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardSummary {
    pub total_activities: usize,
    pub tasks: usize,
    pub work_orders: usize,
    pub realized: usize,
    pub not_realized: usize,
    pub avg_success_rate: f64,
    pub best_month: MonthRate,
    pub worst_month: MonthRate,
    pub area_participation: BTreeMap<String, f64>,
    pub work_orders_without_ticket: usize,
    pub top_equipment: Option<String>,
}

pub fn generate_summary(data: &[Activity]) -> DashboardSummary {
    let annual = annual_summary(data);
    let counts = status_totals(data);
    let tasks = data.iter().filter(|a| classify::is_task(a)).count();
    let without_ticket = data
        .iter()
        .filter(|a| classify::is_work_order_without_ticket(a))
        .count();
    let area_participation = Area::ALL
        .into_iter()
        .map(|area| {
            let n = data.iter().filter(|a| area.matches(&a.requester_area)).count();
            (area.slug().to_string(), participation(n, data.len()))
        })
        .collect();
    DashboardSummary {
        total_activities: data.len(),
        tasks,
        work_orders: data.len() - tasks,
        realized: counts.realized(),
        not_realized: counts.not_realized(),
        avg_success_rate: annual.avg_success_rate,
        best_month: annual.best_month,
        worst_month: annual.worst_month,
        area_participation,
        work_orders_without_ticket: without_ticket,
        top_equipment: equipment_tally(data)
            .first()
            .map(|s| s.equipment.label().to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;

    fn rec(year: i32, month: u32, status: Status) -> Activity {
        Activity {
            year: Some(year),
            month: Some(month),
            status,
            ..Default::default()
        }
    }

    fn with_equipment(list: &[Equipment]) -> Activity {
        Activity {
            equipment: list.iter().copied().collect::<BTreeSet<_>>(),
            ..Default::default()
        }
    }

    #[test]
    fn three_record_rollup() {
        let data = vec![
            rec(2025, 1, Status::Success),
            rec(2025, 1, Status::Canceled),
            rec(2025, 2, Status::Success),
        ];
        let months = monthly_rollup(&data);
        assert_eq!(months.len(), 2);
        assert_eq!(months[0].period.key(), "2025-01");
        assert_eq!(months[0].counts.total, 2);
        assert_eq!(months[0].counts.success, 1);
        assert_eq!(months[0].counts.canceled, 1);
        assert_eq!(months[1].period.key(), "2025-02");
        assert_eq!(months[1].counts.total, 1);
        assert_eq!(months[1].counts.success, 1);

        let annual = annual_summary(&data);
        assert!((annual.avg_success_rate - 200.0 / 3.0).abs() < 1e-9);
    }

    #[test]
    fn rollup_orders_across_years() {
        let data = vec![
            rec(2025, 1, Status::Success),
            rec(2024, 12, Status::Success),
            rec(2024, 2, Status::Success),
        ];
        let keys: Vec<String> = monthly_rollup(&data).iter().map(|m| m.period.key()).collect();
        assert_eq!(keys, vec!["2024-02", "2024-12", "2025-01"]);
    }

    #[test]
    fn skeleton_has_twelve_rows() {
        let data = vec![rec(2025, 3, Status::Canceled), rec(2024, 3, Status::Canceled)];
        let months = monthly_skeleton(&data, 2025);
        assert_eq!(months.len(), 12);
        assert_eq!(months[2].counts.canceled, 1);
        assert_eq!(months.iter().map(|m| m.counts.total).sum::<usize>(), 1);
    }

    #[test]
    fn vsa_and_rdv_flags_tally_once_each() {
        let data = vec![with_equipment(&[Equipment::Vsa, Equipment::Rdv])];
        let counts = equipment_counts(&data);
        assert_eq!(counts[&Equipment::Vsa], 1);
        assert_eq!(counts[&Equipment::Rdv], 1);
        assert_eq!(counts.values().sum::<usize>(), 2);

        let tally = equipment_tally(&data);
        assert_eq!(tally.len(), 2);
        // tie keeps column order: VSA before RDV
        assert_eq!(tally[0].equipment, Equipment::Vsa);
        assert_eq!(tally[1].equipment, Equipment::Rdv);
        assert!((tally[0].percentage - 50.0).abs() < 1e-9);
    }

    #[test]
    fn tally_sorted_descending() {
        let data = vec![
            with_equipment(&[Equipment::Cdn]),
            with_equipment(&[Equipment::Cdn, Equipment::Freeview]),
        ];
        let tally = equipment_tally(&data);
        assert_eq!(tally[0].equipment, Equipment::Cdn);
        assert_eq!(tally[0].total, 2);
    }

    #[test]
    fn empty_tally_is_empty() {
        assert!(equipment_tally(&[]).is_empty());
        assert!(equipment_tally(&[Activity::default()]).is_empty());
    }

    #[test]
    fn level_thresholds() {
        let share = |percentage| EquipmentShare {
            equipment: Equipment::Vsa,
            total: 1,
            percentage,
        };
        assert_eq!(share(15.1).level(), "Crítico");
        assert_eq!(share(15.0).level(), "Atenção");
        assert_eq!(share(10.0).level(), "Normal");
    }

    #[test]
    fn best_and_worst_first_wins_on_ties() {
        let data = vec![
            rec(2025, 1, Status::Success),
            rec(2025, 2, Status::Success),
            rec(2025, 3, Status::Canceled),
            rec(2025, 4, Status::Canceled),
        ];
        let months = monthly_rollup(&data);
        assert_eq!(best_month(&months).month, "Jan/2025");
        assert_eq!(worst_month(&months).month, "Mar/2025");
    }

    #[test]
    fn best_and_worst_of_nothing_is_sentinel() {
        let best = best_month(&[]);
        assert_eq!(best.month, "-");
        assert_eq!(best.success_rate, 0.0);
        assert_eq!(worst_month(&[]).month, "-");
    }

    #[test]
    fn unrecognized_status_is_neither_realized_nor_not() {
        let mut data = vec![rec(2025, 1, Status::Success), rec(2025, 1, Status::Canceled)];
        data.push(Activity {
            status: Status::Unrecognized,
            status_raw: "EM ANÁLISE".into(),
            ..rec(2025, 1, Status::Unrecognized)
        });
        let counts = status_totals(&data);
        assert_eq!(counts.total, 3);
        assert_eq!(counts.realized(), 1);
        assert_eq!(counts.not_realized(), 1);
        assert_eq!(counts.unrecognized, 1);
    }

    #[test]
    fn participation_is_computed_from_counts() {
        let mk = |area: &str| Activity {
            requester_area: area.into(),
            ..rec(2025, 1, Status::Success)
        };
        let data = vec![mk("ENGENHARIA"), mk("MARKETING"), mk("MARKETING"), mk("PLATAFORMA")];
        let report = area_report(&data, Area::Marketing);
        assert_eq!(report.counts.total, 2);
        assert!((report.participation - 50.0).abs() < 1e-9);
        assert_eq!(area_report(&[], Area::Marketing).participation, 0.0);
    }

    #[test]
    fn area_report_lists_partials() {
        let data = vec![
            Activity {
                requester_area: "ENGENHARIA".into(),
                ..rec(2025, 5, Status::Partial)
            },
            Activity {
                requester_area: "ENGENHARIA".into(),
                ..rec(2025, 5, Status::Success)
            },
        ];
        let report = area_report(&data, Area::Engineering);
        assert_eq!(report.partial_activities.len(), 1);
        assert_eq!(report.realized, 2);
    }

    #[test]
    fn tasks_and_work_orders_split() {
        let data = vec![
            Activity {
                is_task: true,
                ..rec(2025, 1, Status::Canceled)
            },
            rec(2025, 1, Status::Success),
            rec(2025, 2, Status::WorkOrderWithoutTicket),
        ];
        let report = tasks_report(&data);
        assert_eq!(report.tasks.counts.total, 1);
        assert_eq!(report.work_orders.counts.total, 2);
        assert_eq!(report.tasks.months[0].counts.cancel_pct(), 100.0);
        assert_eq!(report.work_orders.counts.work_order_without_ticket, 1);
    }

    #[test]
    fn month_details_filters_kind_then_month() {
        let data = vec![
            Activity {
                is_task: true,
                ..rec(2025, 6, Status::Success)
            },
            rec(2025, 6, Status::Rollback),
            rec(2025, 7, Status::Success),
        ];
        let all = month_details(&data, 6, None, KindFilter::All);
        assert_eq!(all.counts.total, 2);
        assert_eq!(all.month_name, "Junho");
        let wo = month_details(&data, 6, Some(2025), KindFilter::WorkOrders);
        assert_eq!(wo.counts.rollback, 1);
        assert_eq!(wo.counts.total, 1);
    }

    #[test]
    fn global_failed_is_everything_but_success() {
        let data = vec![
            rec(2025, 1, Status::Success),
            rec(2025, 1, Status::Partial),
            rec(2025, 1, Status::PendingDocumentation),
        ];
        let months = global_by_month(&data);
        assert_eq!(months[0].success, 1);
        assert_eq!(months[0].failed, 2);
    }

    #[test]
    fn summary_counts() {
        let data = vec![
            Activity {
                is_task: true,
                requester_area: "ENGENHARIA".into(),
                ..rec(2025, 1, Status::Success)
            },
            rec(2025, 2, Status::NotExecuted),
        ];
        let summary = generate_summary(&data);
        assert_eq!(summary.tasks, 1);
        assert_eq!(summary.work_orders, 1);
        assert_eq!(summary.realized, 1);
        assert_eq!(summary.not_realized, 1);
        assert_eq!(summary.area_participation["engenharia"], 50.0);
        assert_eq!(summary.best_month.month, "Jan/2025");
    }

    #[test]
    fn summary_serializes_identically_every_time() {
        let data = vec![
            Activity {
                requester_area: "MARKETING".into(),
                ..rec(2025, 1, Status::Success)
            },
            Activity {
                requester_area: "FRONT OFFICE".into(),
                ..rec(2025, 1, Status::Canceled)
            },
        ];
        let first = serde_json::to_string(&generate_summary(&data)).unwrap();
        for _ in 0..20 {
            assert_eq!(serde_json::to_string(&generate_summary(&data)).unwrap(), first);
        }
        let summary = generate_summary(&data);
        let keys: Vec<&String> = summary
            .area_participation
            .keys()
            .collect();
        assert_eq!(keys, ["engenharia", "front-office", "marketing", "plataforma"]);
    }

    #[test]
    fn summary_counts_work_orders_without_ticket() {
        let data = vec![
            rec(2025, 1, Status::WorkOrderWithoutTicket),
            rec(2025, 1, Status::WorkOrderWithoutTicket),
            rec(2025, 1, Status::NotExecuted),
        ];
        let summary = generate_summary(&data);
        assert_eq!(summary.work_orders_without_ticket, 2);
        assert_eq!(summary.not_realized, 3);
    }

    #[test]
    fn global_view_over_mixed_flags() {
        let data = vec![
            Activity {
                executed_global: true,
                ..rec(2025, 1, Status::Success)
            },
            Activity {
                executed_global: true,
                ..rec(2025, 1, Status::Canceled)
            },
            Activity {
                executed_global: true,
                ..rec(2025, 2, Status::Success)
            },
            rec(2025, 1, Status::Success),
            rec(2025, 3, Status::Canceled),
        ];
        let months = global_by_month(&crate::filters::global_activities(&data));
        assert_eq!(months.len(), 2);
        assert_eq!(months[0].period.key(), "2025-01");
        assert_eq!((months[0].total, months[0].success, months[0].failed), (2, 1, 1));
        assert_eq!(months[0].success_rate, 50.0);
        assert_eq!(months[1].period.key(), "2025-02");
        assert_eq!((months[1].total, months[1].failed), (1, 0));
        assert_eq!(months[1].to_row().success_rate, "100.0");
    }

    #[test]
    fn demand_breakdown_counts_each_flag() {
        let flagged = |sources: &[DemandSource], status| Activity {
            demand: sources.iter().copied().collect(),
            ..rec(2025, 1, status)
        };
        let data = vec![
            flagged(&[DemandSource::Engineering], Status::Success),
            flagged(
                &[DemandSource::Engineering, DemandSource::Global],
                Status::Canceled,
            ),
            flagged(&[], Status::Success),
        ];
        let shares = demand_breakdown(&data);
        assert_eq!(
            shares.iter().map(|s| s.source).collect::<Vec<_>>(),
            DemandSource::ALL.to_vec()
        );
        let eng = shares
            .iter()
            .find(|s| s.source == DemandSource::Engineering)
            .unwrap();
        assert_eq!((eng.counts.total, eng.counts.success), (2, 1));
        assert_eq!(eng.to_row().success_rate, "50.0");
        let global = &shares[0];
        assert_eq!((global.counts.total, global.counts.canceled), (1, 1));
        assert_eq!(shares[2].counts.total, 0);
    }
}
