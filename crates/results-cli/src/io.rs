//! CSV input and export.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use csv::{ReaderBuilder, WriterBuilder};
use serde::{Deserialize, Serialize};

use results_model::{ResultTuple, RiderId, RiderLookup, RiderRecord, StandingRow};
use results_standings::PointsTable;

/// Byte order mark so spreadsheet programs detect UTF-8.
const UTF8_BOM: &str = "\u{feff}";

#[derive(Debug, Deserialize)]
struct ResultRow {
    rider_id: RiderId,
    class_name: String,
    position: u32,
    #[serde(default)]
    points: Option<u32>,
    event_id: String,
    #[serde(default)]
    valid: Option<bool>,
}

pub fn read_riders(path: &Path) -> Result<Vec<RiderRecord>> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_path(path)
        .with_context(|| format!("read csv: {}", path.display()))?;
    let mut riders = Vec::new();
    for (index, record) in reader.deserialize::<RiderRecord>().enumerate() {
        let rider =
            record.with_context(|| format!("read rider row {}: {}", index + 1, path.display()))?;
        riders.push(rider);
    }
    Ok(riders)
}

/// Reads results. Rows without points get them from `system` and `points`.
pub fn read_results(
    path: &Path,
    points: &PointsTable,
    system: Option<&str>,
) -> Result<Vec<ResultTuple>> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_path(path)
        .with_context(|| format!("read csv: {}", path.display()))?;
    let mut results = Vec::new();
    for (index, record) in reader.deserialize::<ResultRow>().enumerate() {
        let row =
            record.with_context(|| format!("read result row {}: {}", index + 1, path.display()))?;
        let awarded = match (row.points, system) {
            (Some(value), _) => value,
            (None, Some(system)) => points.points_for(row.position, system),
            (None, None) => 0,
        };
        results.push(ResultTuple {
            rider_id: row.rider_id,
            class_name: row.class_name,
            position: row.position,
            points: awarded,
            event_id: row.event_id,
            valid: row.valid.unwrap_or(true),
        });
    }
    Ok(results)
}

#[derive(Debug, Serialize)]
struct ExportRow<'a> {
    first_name: &'a str,
    last_name: &'a str,
    club: &'a str,
    class_name: &'a str,
    rank: usize,
    total_points: u64,
    event_count: usize,
}

/// Standings as CSV text, one row per rider and class.
pub fn render_export_csv<L>(rows: &[StandingRow], riders: &L) -> Result<String>
where
    L: RiderLookup + ?Sized,
{
    let mut writer = WriterBuilder::new().from_writer(Vec::new());
    for row in rows {
        let rider = riders.rider(&row.rider_id);
        writer.serialize(ExportRow {
            first_name: rider.map_or("", |r| r.first_name.as_str()),
            last_name: rider.map_or(row.rider_id.as_str(), |r| r.last_name.as_str()),
            club: rider.and_then(RiderRecord::club).unwrap_or(""),
            class_name: &row.class_name,
            rank: row.rank,
            total_points: row.total_points,
            event_count: row.event_count,
        })?;
    }
    let bytes = writer.into_inner().context("flush csv export")?;
    String::from_utf8(bytes).context("csv export is not utf-8")
}

pub fn write_export(path: &Path, csv: &str) -> Result<()> {
    fs::write(path, format!("{UTF8_BOM}{csv}"))
        .with_context(|| format!("write export: {}", path.display()))
}
