//! Serializable chart figure.
//!
//! The JSON layout follows the plotly figure schema (`data` + `layout`) so a
//! composed chart can be handed to any plotly-compatible renderer as is.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One drawable series of a figure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Trace {
    Candlestick(CandlestickTrace),
    Scatter(LineTrace),
    Bar(BarTrace),
}

impl Trace {
    pub fn name(&self) -> &str {
        match self {
            Trace::Candlestick(t) => &t.name,
            Trace::Scatter(t) => &t.name,
            Trace::Bar(t) => &t.name,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CandlestickTrace {
    pub name: String,
    pub x: Vec<DateTime<Utc>>,
    pub open: Vec<f64>,
    pub high: Vec<f64>,
    pub low: Vec<f64>,
    pub close: Vec<f64>,
}

/// Line overlay; undefined points serialize as `null` and leave a gap
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineTrace {
    pub name: String,
    pub mode: String,
    pub x: Vec<DateTime<Utc>>,
    pub y: Vec<Option<f64>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BarTrace {
    pub name: String,
    pub x: Vec<DateTime<Utc>>,
    pub y: Vec<f64>,
    pub yaxis: String,
    pub marker: Marker,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Marker {
    pub color: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RangeSlider {
    pub visible: bool,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Axis {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub domain: Option<[f64; 2]>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub overlaying: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub side: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub showgrid: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub range: Option<[f64; 2]>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rangeslider: Option<RangeSlider>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Margin {
    pub l: u32,
    pub r: u32,
    pub t: u32,
    pub b: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Layout {
    pub xaxis: Axis,
    pub yaxis: Axis,
    pub yaxis2: Axis,
    pub margin: Margin,
    pub height: u32,
}

/// Composed chart: traces in drawing order plus layout
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Figure {
    pub data: Vec<Trace>,
    pub layout: Layout,
}

impl Figure {
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    pub fn to_json_pretty(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    /// Trace lookup by legend name
    pub fn trace(&self, name: &str) -> Option<&Trace> {
        self.data.iter().find(|t| t.name() == name)
    }

    /// Volume trace drawn on the secondary axis
    pub fn volume_trace(&self) -> Option<&BarTrace> {
        self.data.iter().find_map(|t| match t {
            Trace::Bar(bar) => Some(bar),
            _ => None,
        })
    }

    /// Indicator overlays in legend order
    pub fn line_traces(&self) -> Vec<&LineTrace> {
        self.data
            .iter()
            .filter_map(|t| match t {
                Trace::Scatter(line) => Some(line),
                _ => None,
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trace_serializes_with_plotly_type_tag() {
        let trace = Trace::Scatter(LineTrace {
            name: "MA5".to_string(),
            mode: "lines".to_string(),
            x: vec![],
            y: vec![None, Some(1.5)],
        });

        let json = serde_json::to_value(&trace).unwrap();
        assert_eq!(json["type"], "scatter");
        assert_eq!(json["mode"], "lines");
        assert_eq!(json["y"], serde_json::json!([null, 1.5]));
    }

    #[test]
    fn test_axis_skips_unset_fields() {
        let axis = Axis {
            title: Some("Price".to_string()),
            ..Axis::default()
        };
        let json = serde_json::to_value(&axis).unwrap();
        assert_eq!(json, serde_json::json!({"title": "Price"}));
    }
}
