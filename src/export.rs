use crate::error::Result;
use crate::filters::{filter_by_area, global_activities};
use crate::output::{write_csv, write_json};
use crate::reports::{
    annual_summary, area_report, demand_breakdown, equipment_tally, generate_summary, global_by_month,
    monthly_rollup, monthly_skeleton, tasks_report, MonthlyStats,
};
use crate::types::{Activity, Area, DemandRow, EquipmentRow, GlobalMonthRow, MonthlyRow};
use std::path::{Path, PathBuf};

pub fn monthly_rows(months: &[MonthlyStats]) -> Vec<MonthlyRow> {
    months.iter().map(MonthlyStats::to_row).collect()
}

/// Monthly rows, seeded with all twelve months when a year is given.
pub fn months_for(data: &[Activity], skeleton_year: Option<i32>) -> Vec<MonthlyStats> {
    match skeleton_year {
        Some(year) => monthly_skeleton(data, year),
        None => monthly_rollup(data),
    }
}

/// Write every report for `data` into `out_dir` and return the files written.
pub fn export_all(
    data: &[Activity],
    out_dir: &Path,
    skeleton_year: Option<i32>,
) -> Result<Vec<PathBuf>> {
    let mut written = Vec::new();
    let mut csv_file = |name: &str, rows: &[MonthlyRow]| -> Result<()> {
        let path = out_dir.join(name);
        write_csv(&path, rows)?;
        written.push(path);
        Ok(())
    };

    csv_file("monthly.csv", &monthly_rows(&months_for(data, skeleton_year)))?;

    let areas: Vec<_> = Area::ALL.into_iter().map(|a| area_report(data, a)).collect();
    for report in &areas {
        let months = match skeleton_year {
            Some(year) => monthly_skeleton(&filter_by_area(data, report.area), year),
            None => report.months.clone(),
        };
        csv_file(
            &format!("area_{}_monthly.csv", report.area.slug()),
            &monthly_rows(&months),
        )?;
    }

    let tasks = tasks_report(data);
    csv_file("tasks_monthly.csv", &monthly_rows(&tasks.tasks.months))?;
    csv_file("work_orders_monthly.csv", &monthly_rows(&tasks.work_orders.months))?;

    let equipment: Vec<EquipmentRow> = equipment_tally(data).iter().map(|s| s.to_row()).collect();
    let equipment_path = out_dir.join("equipment.csv");
    write_csv(&equipment_path, &equipment)?;
    written.push(equipment_path);

    let demand: Vec<DemandRow> = demand_breakdown(data).iter().map(|d| d.to_row()).collect();
    let demand_path = out_dir.join("demand.csv");
    write_csv(&demand_path, &demand)?;
    written.push(demand_path);

    let global: Vec<GlobalMonthRow> = global_by_month(&global_activities(data))
        .iter()
        .map(|m| m.to_row())
        .collect();
    let global_path = out_dir.join("global_monthly.csv");
    write_csv(&global_path, &global)?;
    written.push(global_path);

    let areas_path = out_dir.join("areas.json");
    write_json(&areas_path, &areas)?;
    written.push(areas_path);

    let annual_path = out_dir.join("annual.json");
    write_json(&annual_path, &annual_summary(data))?;
    written.push(annual_path);

    let summary_path = out_dir.join("summary.json");
    write_json(&summary_path, &generate_summary(data))?;
    written.push(summary_path);

    log::info!("Exported {} files to {}", written.len(), out_dir.display());
    Ok(written)
}
