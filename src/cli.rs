use crate::config::ReportConfig;
use crate::error::AppError;
use crate::filters::{filter_by_range, filter_on_date, DateRange, KindFilter};
use crate::types::{Activity, Area};
use crate::util::{parse_user_date, DateFormat};
use chrono::NaiveDate;
use clap::{ArgAction, Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "atividades_report")]
#[command(about = "Scheduled activity reports for the TV platform", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Config file (defaults to ./atividades.toml when present)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Activity export (JSON)
    #[arg(short, long, global = true, env = "ATIVIDADES_DATA")]
    pub data: Option<PathBuf>,

    /// Date layout the export uses
    #[arg(long, global = true, value_enum)]
    pub date_format: Option<DateFormat>,

    /// Directory for CSV/JSON exports
    #[arg(short, long, global = true)]
    pub output_dir: Option<PathBuf>,

    /// Rows shown in console previews
    #[arg(long, global = true)]
    pub preview_rows: Option<usize>,

    /// Increase log verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

impl Cli {
    /// Flags win over the config file.
    pub fn apply_overrides(&self, config: &mut ReportConfig) {
        if let Some(p) = &self.data {
            config.dataset = p.clone();
        }
        if let Some(f) = self.date_format {
            config.date_format = f;
        }
        if let Some(d) = &self.output_dir {
            config.output_dir = d.clone();
        }
        if let Some(n) = self.preview_rows {
            config.preview_rows = n;
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Overall KPIs, best/worst month and area participation
    Summary {
        #[command(flatten)]
        range: RangeArgs,
    },
    /// Equipment tally, or the activities of one equipment
    Equipment {
        /// Equipment column name, e.g. "VSA" or "Base de dados"
        name: Option<String>,
        #[command(flatten)]
        range: RangeArgs,
    },
    /// Statistics for one requesting area
    Area {
        /// engenharia, marketing, plataforma or front-office
        #[arg(value_parser = parse_area)]
        area: Area,
        #[command(flatten)]
        range: RangeArgs,
    },
    /// Task vs work-order breakdown
    Tasks {
        #[command(flatten)]
        range: RangeArgs,
    },
    /// Activities of a single month
    Month {
        /// Month number (1-12)
        month: u32,
        /// Restrict to a year
        #[arg(long)]
        year: Option<i32>,
        #[arg(long, value_enum, default_value = "all")]
        kind: KindFilter,
    },
    /// Month-by-month consolidation with best and worst month
    Annual {
        /// Seed all twelve months of this year
        #[arg(long)]
        year: Option<i32>,
        #[command(flatten)]
        range: RangeArgs,
    },
    /// Status counts per demand origin
    Demand {
        #[command(flatten)]
        range: RangeArgs,
    },
    /// Globally executed activities per month
    Global {
        #[command(flatten)]
        range: RangeArgs,
    },
    /// Write every report to the output directory
    Export {
        #[command(flatten)]
        range: RangeArgs,
    },
}

#[derive(Args, Debug, Clone, Default)]
pub struct RangeArgs {
    /// First day included (dd/mm/yyyy or yyyy-mm-dd)
    #[arg(long, value_parser = parse_date_arg)]
    pub from: Option<NaiveDate>,

    /// Last day included (dd/mm/yyyy or yyyy-mm-dd)
    #[arg(long, value_parser = parse_date_arg)]
    pub to: Option<NaiveDate>,

    /// Single day; overrides --from/--to
    #[arg(long, value_parser = parse_date_arg, conflicts_with_all = ["from", "to"])]
    pub on: Option<NaiveDate>,
}

impl RangeArgs {
    pub fn range(&self) -> DateRange {
        DateRange::new(self.from, self.to)
    }

    pub fn select(&self, data: &[Activity]) -> Vec<Activity> {
        match self.on {
            Some(day) => filter_on_date(data, day),
            None => filter_by_range(data, self.range()),
        }
    }

    pub fn describe(&self) -> String {
        let fmt = |d: Option<NaiveDate>| {
            d.map(|d| d.format("%d/%m/%Y").to_string())
                .unwrap_or_else(|| "...".to_string())
        };
        match (self.on, self.from, self.to) {
            (Some(day), _, _) => format!("On {}", day.format("%d/%m/%Y")),
            (None, None, None) => "All dates".to_string(),
            (None, from, to) => format!("{} to {}", fmt(from), fmt(to)),
        }
    }
}

fn parse_date_arg(s: &str) -> Result<NaiveDate, String> {
    parse_user_date(s).map_err(|e| e.to_string())
}

fn parse_area(s: &str) -> Result<Area, String> {
    Area::from_name(s).ok_or_else(|| AppError::UnknownArea(s.to_string()).to_string())
}
