// Utility helpers for parsing and basic formatting.
//
// This module centralizes all the "dirty" JSON/number/date handling so the
// rest of the code can assume clean, typed values.
use crate::error::{AppError, Result};
use chrono::{Days, NaiveDate};
use clap::ValueEnum;
use num_format::{Locale, ToFormattedString};
use serde::{Deserialize, Serialize};
use serde_json::Value;

pub const MONTHS_SHORT: [&str; 12] = [
    "Jan", "Fev", "Mar", "Abr", "Mai", "Jun", "Jul", "Ago", "Set", "Out", "Nov", "Dez",
];

pub const MONTHS_FULL: [&str; 12] = [
    "Janeiro", "Fevereiro", "Março", "Abril", "Maio", "Junho", "Julho", "Agosto", "Setembro",
    "Outubro", "Novembro", "Dezembro",
];

/// Date layout a dataset version is expected to use. The preferred layout is
/// tried first; the others are still attempted before giving up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum DateFormat {
    /// dd/mm/yy or dd/mm/yyyy
    #[default]
    DayMonthYear,
    /// mm/dd/yy HH:MM
    MonthDayYearTime,
    /// Spreadsheet serial day number
    Serial,
}

/// Spreadsheet day zero. Serial 1 is 1899-12-31 and the phantom 1900-02-29
/// is absorbed by starting here instead of at 1900-01-01.
fn serial_epoch() -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(1899, 12, 30)
}

/// Convert a spreadsheet serial (days, fractional part = time of day) into a
/// calendar date. Negative, non-finite or out-of-range serials yield `None`.
pub fn serial_to_date(serial: f64) -> Option<NaiveDate> {
    if !serial.is_finite() || serial < 0.0 {
        return None;
    }
    serial_epoch()?.checked_add_days(Days::new(serial.trunc() as u64))
}

// Splits the date token of "a/b/y[ HH:MM]" into its three numbers. Two-digit
// years are taken as 20yy.
fn split_slashed(s: &str) -> Option<(u32, u32, i32)> {
    let date_part = s.split_whitespace().next()?;
    let mut parts = date_part.split('/');
    let a = parts.next()?.trim().parse::<u32>().ok()?;
    let b = parts.next()?.trim().parse::<u32>().ok()?;
    let y_str = parts.next()?.trim();
    if parts.next().is_some() {
        return None;
    }
    let y = y_str.parse::<i32>().ok()?;
    let year = match y_str.len() {
        2 => 2000 + y,
        4 => y,
        _ => return None,
    };
    Some((a, b, year))
}

fn parse_day_month_year(s: &str) -> Option<NaiveDate> {
    let (day, month, year) = split_slashed(s)?;
    NaiveDate::from_ymd_opt(year, month, day)
}

fn parse_month_day_year(s: &str) -> Option<NaiveDate> {
    let (month, day, year) = split_slashed(s)?;
    NaiveDate::from_ymd_opt(year, month, day)
}

fn parse_iso(s: &str) -> Option<NaiveDate> {
    let token = s.split(['T', ' ']).next()?;
    NaiveDate::parse_from_str(token, "%Y-%m-%d").ok()
}

fn parse_serial_text(s: &str) -> Option<NaiveDate> {
    if s.contains('/') || s.contains('-') {
        return None;
    }
    serial_to_date(s.parse::<f64>().ok()?)
}

/// Parse a textual date, trying the preferred layout first. Bare numbers are
/// only read as serials when the serial layout is preferred.
pub fn parse_date_text(s: &str, preferred: DateFormat) -> Option<NaiveDate> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }
    let order: Vec<fn(&str) -> Option<NaiveDate>> = match preferred {
        DateFormat::DayMonthYear => vec![parse_day_month_year, parse_month_day_year, parse_iso],
        DateFormat::MonthDayYearTime => vec![parse_month_day_year, parse_day_month_year, parse_iso],
        DateFormat::Serial => vec![
            parse_serial_text,
            parse_day_month_year,
            parse_month_day_year,
            parse_iso,
        ],
    };
    order.iter().find_map(|parse| parse(s))
}

/// Parse a date cell that may be a serial number or text.
pub fn parse_date_value(v: Option<&Value>, preferred: DateFormat) -> Option<NaiveDate> {
    match v? {
        Value::Number(n) => serial_to_date(n.as_f64()?),
        Value::String(s) => parse_date_text(s, preferred),
        _ => None,
    }
}

pub fn format_date(d: NaiveDate) -> String {
    d.format("%d/%m/%Y").to_string()
}

/// Canonical "dd/mm/yyyy" display string, or the input unchanged when it
/// cannot be parsed. Never fails.
pub fn normalize_date(raw: &str, preferred: DateFormat) -> String {
    match parse_date_text(raw, preferred) {
        Some(d) => format_date(d),
        None => raw.to_string(),
    }
}

/// Dates typed on the command line: dd/mm/yyyy or yyyy-mm-dd.
pub fn parse_user_date(s: &str) -> Result<NaiveDate> {
    parse_day_month_year(s.trim())
        .or_else(|| parse_iso(s.trim()))
        .ok_or_else(|| AppError::InvalidDate(s.to_string()))
}

/// A flag cell counts as set when it is `1`, `"1"` or `true`.
pub fn parse_flag(v: Option<&Value>) -> bool {
    match v {
        Some(Value::Number(n)) => n.as_f64() == Some(1.0),
        Some(Value::String(s)) => s.trim() == "1",
        Some(Value::Bool(b)) => *b,
        _ => false,
    }
}

/// Text cell as a trimmed string; numbers are rendered, anything else is empty.
pub fn value_to_string(v: Option<&Value>) -> String {
    match v {
        Some(Value::String(s)) => s.trim().to_string(),
        Some(Value::Number(n)) => n.to_string(),
        Some(Value::Bool(b)) => b.to_string(),
        _ => String::new(),
    }
}

pub fn parse_u32_value(v: Option<&Value>) -> Option<u32> {
    match v? {
        Value::Number(n) => n
            .as_u64()
            .or_else(|| n.as_f64().filter(|f| *f >= 0.0).map(|f| f as u64))
            .and_then(|x| u32::try_from(x).ok()),
        Value::String(s) => s.trim().parse::<u32>().ok(),
        _ => None,
    }
}

pub fn parse_i32_value(v: Option<&Value>) -> Option<i32> {
    match v? {
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().map(|f| f as i64))
            .and_then(|x| i32::try_from(x).ok()),
        Value::String(s) => s.trim().parse::<i32>().ok(),
        _ => None,
    }
}

/// `part / whole * 100`, or 0 for an empty whole.
pub fn percentage(part: usize, whole: usize) -> f64 {
    if whole == 0 {
        return 0.0;
    }
    part as f64 / whole as f64 * 100.0
}

pub fn month_short(month: u32) -> &'static str {
    match month {
        1..=12 => MONTHS_SHORT[(month - 1) as usize],
        _ => "-",
    }
}

pub fn month_full(month: u32) -> &'static str {
    match month {
        1..=12 => MONTHS_FULL[(month - 1) as usize],
        _ => "-",
    }
}

pub fn format_number(n: f64, decimals: usize) -> String {
    // Fixed decimals plus thousands separators (e.g., `1,234,567.89`).
    let neg = n.is_sign_negative() && n != 0.0;
    let s = format!("{:.*}", decimals, n.abs());
    let mut parts = s.split('.');
    let int_part = parts.next().unwrap_or("0");
    let frac_part = parts.next();
    let int_val: i64 = int_part.parse().unwrap_or(0);
    let mut res = int_val.to_formatted_string(&Locale::en);
    if let Some(frac) = frac_part {
        res.push('.');
        res.push_str(frac);
    }
    if neg {
        format!("-{}", res)
    } else {
        res
    }
}

pub fn format_int<T>(n: T) -> String
where
    T: ToFormattedString,
{
    n.to_formatted_string(&Locale::en)
}
