//! Chart figure model and the figure surface collaborators.
//!
//! Figures here are declarative: panels of line/bar/fill/marker series with
//! reference lines and optional y-limits. Rasterizing them is a collaborator
//! concern behind `FigureRenderer`; modules only accumulate figures on a
//! `FigureSurface`, and the report harness drains that surface to files
//! after each module.

mod renderer;
mod surface;

pub use renderer::{FigureRenderer, SpecRenderer};
pub use surface::FigureSurface;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A complete multi-panel figure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Figure {
    pub title: String,
    pub panels: Vec<Panel>,
}

impl Figure {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            panels: Vec::new(),
        }
    }

    pub fn push_panel(&mut self, panel: Panel) {
        self.panels.push(panel);
    }
}

/// One panel (subplot) of a figure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Panel {
    pub title: String,
    pub y_label: String,
    pub series: Vec<PanelSeries>,
    /// Horizontal reference lines (e.g. RSI 70/30, base-100 line).
    pub h_lines: Vec<f64>,
    /// Fixed y-axis limits, when the panel needs them (e.g. correlation ±1).
    pub y_limits: Option<(f64, f64)>,
}

impl Panel {
    pub fn new(title: impl Into<String>, y_label: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            y_label: y_label.into(),
            series: Vec::new(),
            h_lines: Vec::new(),
            y_limits: None,
        }
    }

    pub fn line(mut self, label: &str, dates: &[NaiveDate], values: &[f64]) -> Self {
        self.series.push(PanelSeries {
            label: label.to_string(),
            kind: SeriesKind::Line,
            points: points_of(dates, values),
        });
        self
    }

    pub fn bars(mut self, label: &str, dates: &[NaiveDate], values: &[f64]) -> Self {
        self.series.push(PanelSeries {
            label: label.to_string(),
            kind: SeriesKind::Bar,
            points: points_of(dates, values),
        });
        self
    }

    /// Filled region between the series and the panel baseline (or between
    /// two band lines when drawn around an existing pair).
    pub fn fill(mut self, label: &str, dates: &[NaiveDate], values: &[f64]) -> Self {
        self.series.push(PanelSeries {
            label: label.to_string(),
            kind: SeriesKind::Fill,
            points: points_of(dates, values),
        });
        self
    }

    /// Discrete event markers (buy/sell points).
    pub fn markers(mut self, label: &str, dates: &[NaiveDate], values: &[f64]) -> Self {
        self.series.push(PanelSeries {
            label: label.to_string(),
            kind: SeriesKind::Markers,
            points: points_of(dates, values),
        });
        self
    }

    pub fn h_line(mut self, y: f64) -> Self {
        self.h_lines.push(y);
        self
    }

    pub fn y_limits(mut self, low: f64, high: f64) -> Self {
        self.y_limits = Some((low, high));
        self
    }
}

/// One drawable series within a panel. NaN values are dropped at
/// construction (a renderer cannot place them).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PanelSeries {
    pub label: String,
    pub kind: SeriesKind,
    pub points: Vec<(NaiveDate, f64)>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SeriesKind {
    Line,
    Bar,
    Fill,
    Markers,
}

fn points_of(dates: &[NaiveDate], values: &[f64]) -> Vec<(NaiveDate, f64)> {
    dates
        .iter()
        .zip(values)
        .filter(|(_, v)| !v.is_nan())
        .map(|(&d, &v)| (d, v))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn panel_builder_collects_series() {
        let dates = [d("2024-01-02"), d("2024-01-03")];
        let panel = Panel::new("Price", "$")
            .line("Close", &dates, &[100.0, 101.0])
            .h_line(100.0);
        assert_eq!(panel.series.len(), 1);
        assert_eq!(panel.h_lines, vec![100.0]);
        assert_eq!(panel.series[0].points.len(), 2);
    }

    #[test]
    fn nan_points_are_dropped() {
        let dates = [d("2024-01-02"), d("2024-01-03"), d("2024-01-04")];
        let panel = Panel::new("MA", "$").line("MA20", &dates, &[f64::NAN, 100.0, 101.0]);
        assert_eq!(panel.series[0].points.len(), 2);
        assert_eq!(panel.series[0].points[0].0, d("2024-01-03"));
    }

    #[test]
    fn figure_round_trips_through_json() {
        let dates = [d("2024-01-02")];
        let mut fig = Figure::new("Test");
        fig.push_panel(Panel::new("P", "y").markers("Buy", &dates, &[5.0]).y_limits(-1.0, 1.0));

        let json = serde_json::to_string(&fig).unwrap();
        let back: Figure = serde_json::from_str(&json).unwrap();
        assert_eq!(back.title, "Test");
        assert_eq!(back.panels[0].y_limits, Some((-1.0, 1.0)));
        assert_eq!(back.panels[0].series[0].kind, SeriesKind::Markers);
    }
}
