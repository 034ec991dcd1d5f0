use crate::error::Result;
use serde::Serialize;
use std::path::Path;
use tabled::{settings::Style, Table, Tabled};

pub fn write_csv<T: Serialize>(path: &Path, rows: &[T]) -> Result<()> {
    ensure_parent(path)?;
    let mut wtr = csv::Writer::from_path(path)?;
    for r in rows {
        wtr.serialize(r)?;
    }
    wtr.flush()?;
    log::debug!("Wrote {} rows to {}", rows.len(), path.display());
    Ok(())
}

pub fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    ensure_parent(path)?;
    let s = serde_json::to_string_pretty(value)?;
    std::fs::write(path, s)?;
    log::debug!("Wrote {}", path.display());
    Ok(())
}

fn ensure_parent(path: &Path) -> Result<()> {
    if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
        std::fs::create_dir_all(dir)?;
    }
    Ok(())
}

/// Markdown table of the first `max_rows` rows, `None` when there are none.
pub fn render_table<T>(rows: &[T], max_rows: usize) -> Option<String>
where
    T: Tabled + Clone,
{
    let slice: Vec<T> = rows.iter().take(max_rows).cloned().collect();
    if slice.is_empty() {
        return None;
    }
    Some(Table::new(slice).with(Style::markdown()).to_string())
}

pub fn preview_table<T>(title: &str, note: Option<&str>, rows: &[T], max_rows: usize)
where
    T: Tabled + Clone,
{
    println!("{}", title);
    if let Some(n) = note {
        println!("({})", n);
    }
    println!();
    match render_table(rows, max_rows) {
        Some(table) => println!("{}\n", table),
        None => println!("(no rows)\n"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::EquipmentRow;

    fn row(name: &str, total: usize) -> EquipmentRow {
        EquipmentRow {
            equipment: name.to_string(),
            total,
            percentage: "50.0".to_string(),
            level: "Crítico".to_string(),
        }
    }

    #[test]
    fn table_is_truncated_to_max_rows() {
        let rows = vec![row("VSA", 2), row("RDV", 1), row("CDN", 1)];
        let table = render_table(&rows, 2).unwrap();
        assert!(table.contains("| Equipment"));
        assert!(table.contains("VSA"));
        assert!(table.contains("RDV"));
        assert!(!table.contains("CDN"));
    }

    #[test]
    fn empty_table_renders_nothing() {
        assert!(render_table::<EquipmentRow>(&[], 5).is_none());
    }

    #[test]
    fn csv_and_json_land_on_disk() {
        let dir = tempfile::tempdir().unwrap();
        let csv_path = dir.path().join("nested").join("equipment.csv");
        write_csv(&csv_path, &[row("VSA", 2)]).unwrap();
        let text = std::fs::read_to_string(&csv_path).unwrap();
        assert!(text.starts_with("Equipment,Total,Percentage,Level"));
        assert!(text.contains("VSA,2,50.0,Crítico"));

        let json_path = dir.path().join("summary.json");
        write_json(&json_path, &serde_json::json!({"total": 3})).unwrap();
        let back: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&json_path).unwrap()).unwrap();
        assert_eq!(back["total"], 3);
    }
}
