// Entry point and high-level CLI flow.
//
// With a subcommand the binary prints one report and exits. Without one it
// falls back to the interactive menu:
// - Option [1] loads and cleans the export, printing diagnostics.
// - Option [2] previews every report and writes the CSV/JSON exports.
// - Option [3] sets the date range the reports are restricted to.
use anyhow::Result;
use atividades_report::cli::{Cli, Commands, RangeArgs};
use atividades_report::config::ReportConfig;
use atividades_report::error::AppError;
use atividades_report::export::{export_all, monthly_rows, months_for};
use atividades_report::filters::{
    filter_by_area, filter_by_equipment, filter_by_range, global_activities,
};
use atividades_report::loader::load_and_clean;
use atividades_report::memo::Memo;
use atividades_report::output::preview_table;
use atividades_report::reports::{
    annual_summary, area_report, demand_breakdown, equipment_tally, generate_summary, global_by_month,
    month_details, tasks_report,
};
use atividades_report::types::{ActivityRow, DemandRow, EquipmentRow, GlobalMonthRow};
use atividades_report::util::{format_int, format_number, month_full, parse_user_date};
use atividades_report::{Activity, Area, DateRange, Equipment, KindFilter};
use clap::Parser;
use std::io::{self, Write};

// Loaded export plus the current date filter. The filtered subset is
// memoized so repeated report runs with the same range reuse it.
struct Session {
    config: ReportConfig,
    data: Option<Vec<Activity>>,
    range: DateRange,
    filtered: Memo<DateRange, Vec<Activity>>,
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp(None)
        .init();
}

/// Read a single line of input after printing the given prompt.
fn read_line(prompt: &str) -> String {
    print!("{}", prompt);
    let _ = io::stdout().flush();
    let mut buf = String::new();
    io::stdin().read_line(&mut buf).ok();
    buf.trim().to_string()
}

/// Ask whether to go back to the menu after generating reports.
fn prompt_back_to_menu() -> bool {
    loop {
        match read_line("Back to Report Selection (Y/N): ")
            .to_uppercase()
            .as_str()
        {
            "Y" => return true,
            "N" => return false,
            _ => println!("Invalid choice. Please enter Y or N."),
        }
    }
}

fn load_data(config: &ReportConfig) -> Result<Vec<Activity>> {
    let (data, report) = load_and_clean(&config.dataset, config.date_format)?;
    println!(
        "Processing dataset... ({} rows read, {} activities loaded)",
        format_int(report.total_rows),
        format_int(report.loaded_rows)
    );
    if report.skipped_rows > 0 {
        println!(
            "Note: {} rows skipped (not readable as records).",
            format_int(report.skipped_rows)
        );
    }
    if report.unparsed_dates > 0 || report.unrecognized_status > 0 {
        println!(
            "Info: {} unparsed start dates, {} unrecognized status values.",
            format_int(report.unparsed_dates),
            format_int(report.unrecognized_status)
        );
    }
    println!();
    Ok(data)
}

fn print_summary(data: &[Activity], scope: &str) {
    let summary = generate_summary(data);
    println!("Consolidated Summary ({})\n", scope);
    println!("Total activities:   {}", format_int(summary.total_activities));
    println!(
        "Tasks / Work orders: {} / {}",
        format_int(summary.tasks),
        format_int(summary.work_orders)
    );
    println!(
        "Realized / Not realized: {} / {}",
        format_int(summary.realized),
        format_int(summary.not_realized)
    );
    println!(
        "Success rate:       {}%",
        format_number(summary.avg_success_rate, 1)
    );
    println!(
        "Best month:         {} ({}%)",
        summary.best_month.month,
        format_number(summary.best_month.success_rate, 1)
    );
    println!(
        "Worst month:        {} ({}%)",
        summary.worst_month.month,
        format_number(summary.worst_month.success_rate, 1)
    );
    println!(
        "WO without ticket:  {}",
        format_int(summary.work_orders_without_ticket)
    );
    for area in Area::ALL {
        let share = summary
            .area_participation
            .get(area.slug())
            .copied()
            .unwrap_or(0.0);
        println!("Participation {:<12} {}%", area.title(), format_number(share, 1));
    }
    println!();
}

fn print_equipment(data: &[Activity], name: Option<&str>, rows: usize) -> Result<()> {
    match name {
        None => {
            let tally: Vec<EquipmentRow> =
                equipment_tally(data).iter().map(|s| s.to_row()).collect();
            preview_table("Activities by Equipment", None, &tally, rows);
        }
        Some(name) => {
            let equipment = Equipment::from_label(name)
                .ok_or_else(|| AppError::UnknownEquipment(name.to_string()))?;
            let share = equipment_tally(data)
                .into_iter()
                .find(|s| s.equipment == equipment);
            let listed: Vec<ActivityRow> = filter_by_equipment(data, equipment)
                .iter()
                .map(ActivityRow::from)
                .collect();
            let note = match share {
                Some(s) => format!(
                    "{} activities, {}% of occurrences, {}",
                    s.total,
                    format_number(s.percentage, 1),
                    s.level()
                ),
                None => "no activities".to_string(),
            };
            preview_table(
                &format!("Equipment: {}", equipment),
                Some(&note),
                &listed,
                rows,
            );
        }
    }
    Ok(())
}

fn print_area(data: &[Activity], area: Area, config: &ReportConfig) {
    let report = area_report(data, area);
    let c = &report.counts;
    println!("Activities - {}\n", area.title());
    println!(
        "Total {} | Success {} | Partial {} | Rollback {} | Canceled {} | Not executed {}",
        c.total, c.success, c.partial, c.rollback, c.canceled, c.not_executed
    );
    println!(
        "Success rate {}% | Participation {}%\n",
        format_number(report.success_rate, 1),
        format_number(report.participation, 1)
    );
    let months = match config.skeleton_year {
        Some(year) => months_for(&filter_by_area(data, area), Some(year)),
        None => report.months.clone(),
    };
    preview_table("Monthly Statistics", None, &monthly_rows(&months), 12);
    let equipment: Vec<EquipmentRow> = report.equipment.iter().map(|s| s.to_row()).collect();
    preview_table("Equipment", None, &equipment, config.preview_rows);
    if !report.partial_activities.is_empty() {
        let partial: Vec<ActivityRow> = report
            .partial_activities
            .iter()
            .map(ActivityRow::from)
            .collect();
        preview_table("Partially Realized", None, &partial, config.preview_rows);
    }
}

fn print_tasks(data: &[Activity]) {
    let report = tasks_report(data);
    println!("Front Office (TASK)\n");
    println!(
        "Tasks {} ({}% of {}) | Work orders {}\n",
        report.tasks.counts.total,
        format_number(report.task_share, 1),
        report.total,
        report.work_orders.counts.total
    );
    preview_table("Tasks per Month", None, &monthly_rows(&report.tasks.months), 12);
    preview_table(
        "Work Orders per Month",
        None,
        &monthly_rows(&report.work_orders.months),
        12,
    );
}

fn print_month(data: &[Activity], month: u32, year: Option<i32>, kind: KindFilter, rows: usize) {
    let details = month_details(data, month, year, kind);
    let c = &details.counts;
    println!(
        "{}{} ({:?})\n",
        details.month_name,
        year.map(|y| format!(" {}", y)).unwrap_or_default(),
        kind
    );
    println!(
        "Total {} | Success {} | Partial {} | Canceled {} | Rollback {} | Not executed {}\n",
        c.total, c.success, c.partial, c.canceled, c.rollback, c.not_executed
    );
    let listed: Vec<ActivityRow> = details.activities.iter().map(ActivityRow::from).collect();
    preview_table("Activities", None, &listed, rows);
}

fn print_annual(data: &[Activity], year: Option<i32>) {
    let annual = annual_summary(data);
    println!("Annual Consolidation\n");
    println!(
        "Total {} | Average success rate {}%",
        format_int(annual.total_activities),
        format_number(annual.avg_success_rate, 1)
    );
    println!(
        "Best month {} ({}%) | Worst month {} ({}%)\n",
        annual.best_month.month,
        format_number(annual.best_month.success_rate, 1),
        annual.worst_month.month,
        format_number(annual.worst_month.success_rate, 1)
    );
    let months = match year {
        Some(_) => months_for(data, year),
        None => annual.months,
    };
    preview_table("Monthly Statistics", None, &monthly_rows(&months), 12);
}

fn print_demand(data: &[Activity]) {
    let rows: Vec<DemandRow> = demand_breakdown(data).iter().map(|d| d.to_row()).collect();
    preview_table("Activities by Demand Origin", None, &rows, rows.len());
}

fn print_global(data: &[Activity]) {
    let rows: Vec<GlobalMonthRow> = global_by_month(&global_activities(data))
        .iter()
        .map(|m| m.to_row())
        .collect();
    preview_table("Global Activities per Month", None, &rows, 12);
}

/// Option [2]: preview every report and write the exports.
fn handle_generate_reports(data: &[Activity], config: &ReportConfig, scope: &str) {
    println!("Generating reports...\n");
    print_summary(data, scope);
    if let Err(e) = print_equipment(data, None, config.preview_rows) {
        eprintln!("Report error: {}", e);
    }
    for area in Area::ALL {
        print_area(data, area, config);
    }
    print_tasks(data);
    print_demand(data);
    match export_all(data, &config.output_dir, config.skeleton_year) {
        Ok(files) => println!(
            "(Full tables exported to {}, {} files)\n",
            config.output_dir.display(),
            files.len()
        ),
        Err(e) => eprintln!("Write error: {}", e),
    }
}

fn handle_set_range(session: &mut Session) {
    let read_bound = |label: &str| loop {
        let input = read_line(&format!("{} (dd/mm/yyyy, empty for none): ", label));
        if input.is_empty() {
            return None;
        }
        match parse_user_date(&input) {
            Ok(d) => return Some(d),
            Err(e) => println!("{}", e),
        }
    };
    let start = read_bound("Start date");
    let end = read_bound("End date");
    session.range = DateRange::new(start, end);
    println!();
}

fn run_menu(config: ReportConfig) {
    let mut session = Session {
        config,
        data: None,
        range: DateRange::default(),
        filtered: Memo::new(),
    };
    loop {
        println!("Select an option:");
        println!("[1] Load the dataset");
        println!("[2] Generate Reports");
        println!("[3] Set date range\n");
        match read_line("Enter choice: ").as_str() {
            "1" => match load_data(&session.config) {
                Ok(data) => {
                    session.data = Some(data);
                    session.filtered.invalidate();
                }
                Err(e) => eprintln!("Failed to load file: {}\n", e),
            },
            "2" => {
                println!();
                let Some(data) = session.data.as_deref() else {
                    println!("Error: No data loaded. Please load the dataset first (option 1).\n");
                    continue;
                };
                let range = session.range;
                let filtered = session
                    .filtered
                    .get_or_compute(range, |r| filter_by_range(data, *r));
                let scope = describe_range(range);
                handle_generate_reports(filtered, &session.config, &scope);
                if !prompt_back_to_menu() {
                    println!("Exiting the program.");
                    break;
                }
            }
            "3" => handle_set_range(&mut session),
            _ => println!("Invalid choice. Please enter 1, 2 or 3.\n"),
        }
    }
}

fn describe_range(range: DateRange) -> String {
    RangeArgs {
        from: range.start,
        to: range.end,
        on: None,
    }
    .describe()
}

fn run_command(command: Commands, config: &ReportConfig) -> Result<()> {
    let all = load_data(config)?;
    match command {
        Commands::Summary { range } => print_summary(&range.select(&all), &range.describe()),
        Commands::Equipment { name, range } => {
            print_equipment(&range.select(&all), name.as_deref(), config.preview_rows)?
        }
        Commands::Area { area, range } => print_area(&range.select(&all), area, config),
        Commands::Tasks { range } => print_tasks(&range.select(&all)),
        Commands::Month { month, year, kind } => {
            if !(1..=12).contains(&month) {
                return Err(AppError::InvalidMonth(month.to_string()).into());
            }
            log::debug!("Month view for {}", month_full(month));
            print_month(&all, month, year, kind, config.preview_rows)
        }
        Commands::Annual { year, range } => {
            print_annual(&range.select(&all), year.or(config.skeleton_year))
        }
        Commands::Demand { range } => print_demand(&range.select(&all)),
        Commands::Global { range } => print_global(&range.select(&all)),
        Commands::Export { range } => {
            let files = export_all(&range.select(&all), &config.output_dir, config.skeleton_year)?;
            for f in files {
                println!("{}", f.display());
            }
        }
    }
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let mut config = ReportConfig::load(cli.config.as_deref())?;
    cli.apply_overrides(&mut config);
    log::debug!("Effective config: {:?}", config);

    match cli.command {
        Some(command) => run_command(command, &config),
        None => {
            run_menu(config);
            Ok(())
        }
    }
}
