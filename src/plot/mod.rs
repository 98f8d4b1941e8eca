//! Chart emission
//!
//! Turns a `FullExport` into a self-contained plotly HTML page: one scatter
//! trace per entity over the aligned match axis, with shaded bands marking
//! season boundaries. The trace JSON is built separately from the HTML so
//! its shape is testable.

use crate::error::Result;
use crate::league::FullExport;
use anyhow::Context;
use serde_json::{json, Value};
use std::path::Path;

/// Plotly figure as `{ data, layout }` JSON
pub fn build_figure(export: &FullExport, initial_rating: f64) -> Value {
    let data: Vec<Value> = export
        .series
        .iter()
        .map(|series| {
            let flat: Vec<f64> = series.history.iter().flatten().copied().collect();
            let y = blank_leading_run(&flat, initial_rating);
            let last = flat.last().copied().unwrap_or(initial_rating);
            json!({
                "type": "scatter",
                "mode": "lines",
                "x": (0..flat.len()).collect::<Vec<usize>>(),
                "y": y,
                "name": format!("{}: {}", series.abbrev, last.round() as i64),
                "text": series.abbrev,
                "hoverinfo": "text+x+y",
                "line": { "color": series.color },
            })
        })
        .collect();

    json!({
        "data": data,
        "layout": {
            "title": format!("{} Elo Ratings", export.league),
            "xaxis": { "title": "Match" },
            "yaxis": { "title": "Elo" },
            "shapes": boundary_bands(export),
            "annotations": boundary_labels(export),
        },
    })
}

/// Write the figure into an HTML page loading plotly from its CDN
pub fn write_plot_html(export: &FullExport, initial_rating: f64, path: &Path) -> Result<()> {
    let figure = build_figure(export, initial_rating);
    let html = format!(
        "<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\"/>\n\
         <title>{title} Elo Ratings</title>\n\
         <script src=\"https://cdn.plot.ly/plotly-2.35.2.min.js\"></script>\n\
         </head>\n<body>\n<div id=\"chart\"></div>\n<script>\n\
         var figure = {figure};\n\
         Plotly.newPlot(\"chart\", figure.data, figure.layout);\n\
         </script>\n</body>\n</html>\n",
        title = export.league,
        figure = figure
    );

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("creating output directory {}", parent.display()))?;
    }
    std::fs::write(path, html).with_context(|| format!("writing plot {}", path.display()))
}

/// Null out the flat run of initial-rating values at the start of a series
/// so entities that joined the league late don't draw a long idle line
fn blank_leading_run(values: &[f64], initial_rating: f64) -> Vec<Value> {
    let mut blank_until = 0;
    for (i, &value) in values.iter().enumerate() {
        let next_flat = values.get(i + 1).is_some_and(|&n| n == initial_rating);
        if value == initial_rating && next_flat {
            blank_until = i + 1;
        } else {
            break;
        }
    }
    values
        .iter()
        .enumerate()
        .map(|(i, &v)| if i < blank_until { Value::Null } else { json!(v) })
        .collect()
}

/// Shaded vertical bands at each season boundary, positioned from the
/// aligned segment lengths (identical across entities)
fn boundary_bands(export: &FullExport) -> Vec<Value> {
    let Some(first) = export.series.first() else {
        return Vec::new();
    };
    let mut bands = Vec::new();
    let mut bound: i64 = -1;
    for segment in &first.history {
        bound += segment.len() as i64;
        bands.push(json!({
            "type": "rect",
            "xref": "x",
            "yref": "paper",
            "x0": bound,
            "y0": 0,
            "x1": bound + 1,
            "y1": 1,
            "fillcolor": "DarkGray",
            "opacity": 0.5,
            "layer": "above",
            "line": { "width": 0 },
        }));
    }
    bands
}

/// Season labels anchored to the start of each segment after the first
fn boundary_labels(export: &FullExport) -> Vec<Value> {
    let Some(first) = export.series.first() else {
        return Vec::new();
    };
    let mut labels = Vec::new();
    let mut start: usize = 0;
    for (i, segment) in first.history.iter().enumerate() {
        // The seed segment predates the first recorded season label
        if i > 0 {
            if let Some(season) = export.seasons.get(i - 1) {
                labels.push(json!({
                    "x": start,
                    "y": 1,
                    "yref": "paper",
                    "yanchor": "bottom",
                    "showarrow": false,
                    "text": season,
                }));
            }
        }
        start += segment.len();
    }
    labels
}
