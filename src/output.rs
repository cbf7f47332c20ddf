//! Output formatting and persistence for the ranked report.
//!
//! Supports a console table, JSON rendering, the per-neighborhood CSV export
//! and a GeoJSON document for map rendering (severity-weighted heatmap of all
//! barriers plus markers for the severe ones).

use chrono::{DateTime, Utc};
use comfy_table::{Cell, CellAlignment, ContentArrangement, Table, presets};
use csv::WriterBuilder;
use serde::Serialize;
use serde_json::{Value, json};
use tracing::{debug, info};

use crate::analyzers::types::{RankedNeighborhood, RankedReport};
use crate::analyzers::utility::mean;
use crate::clean::CleanedRecord;
use crate::error::Result;
use crate::stats::BarrierComposition;

#[derive(Serialize)]
struct ReportDocument<'a> {
    generated_at: DateTime<Utc>,
    top_n: usize,
    neighborhoods: &'a [RankedNeighborhood],
}

/// Logs the report using Rust's debug pretty-print format.
pub fn print_pretty(report: &RankedReport) {
    debug!("{:#?}", report);
}

/// Renders the full ranking as pretty-printed JSON.
pub fn report_json(report: &RankedReport) -> Result<String> {
    let doc = ReportDocument {
        generated_at: Utc::now(),
        top_n: report.top_n(),
        neighborhoods: report.entries(),
    };
    Ok(serde_json::to_string_pretty(&doc)?)
}

/// Prints the full ranking as JSON to stdout.
pub fn print_json(report: &RankedReport) -> Result<()> {
    println!("{}", report_json(report)?);
    Ok(())
}

/// Builds the headline table of the top-ranked neighborhoods.
pub fn top_table(report: &RankedReport) -> Table {
    let mut table = Table::new();
    table
        .load_preset(presets::UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec!["Neighborhood", "Barriers", "Avg Severity", "Index"]);

    for entry in report.top() {
        table.add_row(vec![
            Cell::new(&entry.neighborhood),
            Cell::new(entry.total_barriers).set_alignment(CellAlignment::Right),
            Cell::new(format!("{:.2}", entry.avg_severity)).set_alignment(CellAlignment::Right),
            Cell::new(format!("{:.1}", entry.barrier_density_index))
                .set_alignment(CellAlignment::Right),
        ]);
    }

    table
}

pub fn print_top_table(report: &RankedReport) {
    println!(
        "TOP {} MOST INACCESSIBLE NEIGHBORHOODS (by Barrier Density Index)",
        report.top().len()
    );
    println!("{}", top_table(report));
}

/// Logs the two headline findings: the #1 neighborhood by volume of
/// barriers and the #2 by severity.
pub fn log_insights(report: &RankedReport) {
    let top = report.top();
    if let Some(first) = top.first() {
        info!(
            neighborhood = %first.neighborhood,
            total_barriers = first.total_barriers,
            "Insight: highest-ranked neighborhood"
        );
    }
    if let Some(second) = top.get(1) {
        info!(
            neighborhood = %second.neighborhood,
            avg_severity = second.avg_severity,
            "Insight: second-ranked neighborhood"
        );
    }
}

/// Writes one row per neighborhood (neighborhood, total_barriers,
/// avg_severity, barrier_density_index), replacing any existing file.
pub fn write_ranked_csv(path: &str, report: &RankedReport) -> Result<()> {
    debug!(path, rows = report.len(), "Writing ranked CSV");

    let mut writer = WriterBuilder::new().has_headers(true).from_path(path)?;
    for entry in report.entries() {
        writer.serialize(entry)?;
    }
    writer.flush()?;

    info!(path, rows = report.len(), "Saved neighborhood stats");
    Ok(())
}

/// GeoJSON map data for the cleaned records.
///
/// `features` holds point markers for barriers at or above `threshold`,
/// capped at `limit`. The foreign member `heatmap` lists every record as
/// `[latitude, longitude, severity]`, and `center` is the mean location.
pub fn hotspot_collection(records: &[CleanedRecord], threshold: u8, limit: usize) -> Value {
    let features: Vec<Value> = records
        .iter()
        .filter(|r| r.severity >= f64::from(threshold))
        .take(limit)
        .map(|r| {
            json!({
                "type": "Feature",
                "geometry": {
                    "type": "Point",
                    "coordinates": [r.longitude, r.latitude],
                },
                "properties": {
                    "label_type": r.label_type,
                    "neighborhood": r.neighborhood,
                    "severity": r.severity,
                },
            })
        })
        .collect();

    let heatmap: Vec<[f64; 3]> = records
        .iter()
        .map(|r| [r.latitude, r.longitude, r.severity])
        .collect();

    let latitudes: Vec<f64> = records.iter().map(|r| r.latitude).collect();
    let longitudes: Vec<f64> = records.iter().map(|r| r.longitude).collect();

    json!({
        "type": "FeatureCollection",
        "center": {
            "latitude": mean(&latitudes),
            "longitude": mean(&longitudes),
        },
        "features": features,
        "heatmap": heatmap,
    })
}

pub fn write_hotspots(path: &str, records: &[CleanedRecord], threshold: u8, limit: usize) -> Result<()> {
    let collection = hotspot_collection(records, threshold, limit);
    let count = collection["features"].as_array().map_or(0, Vec::len);

    std::fs::write(path, serde_json::to_vec_pretty(&collection)?)?;

    info!(path, features = count, threshold, "Saved hotspot layer");
    Ok(())
}

/// Logs the permanence split and the most common barrier types.
pub fn log_composition(composition: &BarrierComposition) {
    info!(
        total = composition.total,
        permanent_pct = composition.permanent_pct(),
        temporary_pct = composition.temporary_pct(),
        unflagged = composition.unflagged,
        "Barrier permanence"
    );
    for label in &composition.top_label_types {
        info!(label_type = %label.label_type, count = label.count, "Common barrier type");
    }
}
