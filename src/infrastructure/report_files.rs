// File sinks for the text report and tabular export
use crate::domain::fleet::ExportRow;
use anyhow::{Context, Result};
use std::path::Path;

/// Render export rows as CSV with a header line
pub fn export_csv(rows: &[ExportRow]) -> Result<Vec<u8>> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    for row in rows {
        writer.serialize(row).context("Failed to serialize export row")?;
    }
    // header is only emitted with the first record
    if rows.is_empty() {
        writer.write_record([
            "timestamp",
            "vehicle_name",
            "vehicle_type",
            "battery_level",
            "battery_range",
            "is_active",
            "charging_state",
            "odometer",
            "inside_temp",
            "outside_temp",
        ])?;
    }
    writer.into_inner().context("Failed to flush CSV writer")
}

pub async fn write_export_csv(path: &Path, rows: &[ExportRow]) -> Result<()> {
    let bytes = export_csv(rows)?;
    tokio::fs::write(path, bytes)
        .await
        .with_context(|| format!("Failed to write export to {}", path.display()))?;
    tracing::info!(path = %path.display(), rows = rows.len(), "wrote fleet export");
    Ok(())
}

pub async fn write_text_report(path: &Path, report: &str) -> Result<()> {
    tokio::fs::write(path, report)
        .await
        .with_context(|| format!("Failed to write report to {}", path.display()))?;
    tracing::info!(path = %path.display(), "wrote energy report");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn row(name: &str) -> ExportRow {
        ExportRow {
            timestamp: Utc.timestamp_millis_opt(1_700_000_000_000).unwrap(),
            vehicle_name: name.to_string(),
            vehicle_type: "modely".to_string(),
            battery_level: 81,
            battery_range: 240.5,
            is_active: true,
            charging_state: "Charging".to_string(),
            odometer: 12000.5,
            inside_temp: 20.0,
            outside_temp: 12.5,
        }
    }

    #[test]
    fn test_export_csv() {
        let bytes = export_csv(&[row("Blue"), row("Red")]).unwrap();
        let text = String::from_utf8(bytes).unwrap();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(
            lines[0],
            "timestamp,vehicle_name,vehicle_type,battery_level,battery_range,is_active,charging_state,odometer,inside_temp,outside_temp"
        );
        assert_eq!(
            lines[1],
            "2023-11-14T22:13:20Z,Blue,modely,81,240.5,true,Charging,12000.5,20.0,12.5"
        );
        assert_eq!(lines.len(), 3);
    }

    #[test]
    fn test_empty_export_has_header() {
        let text = String::from_utf8(export_csv(&[]).unwrap()).unwrap();
        assert_eq!(text.lines().count(), 1);
        assert!(text.starts_with("timestamp,vehicle_name"));
    }
}
