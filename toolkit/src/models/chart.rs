//! Line chart accumulator.
//!
//! A [`Chart`] collects named line series and serializes to a Plotly
//! figure (`{"data": [...], "layout": {...}}`), either as JSON or as a
//! standalone HTML page that loads plotly.js from its CDN.

use crate::error::{Result, ToolkitError};
use crate::models::Value;
use serde::Serialize;
use std::path::Path;

const PLOTLY_CDN: &str = "https://cdn.plot.ly/plotly-2.35.2.min.js";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AxisTitle {
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Axis {
    pub title: AxisTitle,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Layout {
    pub title: AxisTitle,
    pub xaxis: Axis,
    pub yaxis: Axis,
}

impl Default for Layout {
    fn default() -> Self {
        Self {
            title: AxisTitle { text: String::new() },
            xaxis: Axis {
                title: AxisTitle { text: String::new() },
            },
            yaxis: Axis {
                title: AxisTitle { text: String::new() },
            },
        }
    }
}

/// One named series drawn as straight line segments
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LineTrace {
    #[serde(rename = "type")]
    kind: &'static str,
    mode: &'static str,
    pub name: String,
    pub x: Vec<Value>,
    pub y: Vec<Option<f64>>,
}

impl LineTrace {
    pub fn new(name: impl Into<String>, x: Vec<Value>, y: Vec<Option<f64>>) -> Self {
        Self {
            kind: "scatter",
            mode: "lines",
            name: name.into(),
            x,
            y,
        }
    }

    pub fn len(&self) -> usize {
        self.x.len()
    }

    pub fn is_empty(&self) -> bool {
        self.x.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct Chart {
    #[serde(rename = "data")]
    traces: Vec<LineTrace>,
    layout: Layout,
}

impl Chart {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn update_layout(&mut self, title: &str, xaxis_title: &str, yaxis_title: &str) -> &mut Self {
        self.layout.title.text = title.to_string();
        self.layout.xaxis.title.text = xaxis_title.to_string();
        self.layout.yaxis.title.text = yaxis_title.to_string();
        self
    }

    pub fn add_trace(&mut self, trace: LineTrace) -> &mut Self {
        self.traces.push(trace);
        self
    }

    pub fn traces(&self) -> &[LineTrace] {
        &self.traces
    }

    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Standalone HTML page rendering the chart with plotly.js
    pub fn to_html(&self) -> Result<String> {
        // `</` would close the inline script early; `<\/` is the same JSON string
        let figure = self.to_json()?.replace("</", "<\\/");
        Ok(format!(
            r#"<!DOCTYPE html>
<html>
<head>
<meta charset="utf-8">
<title>{title}</title>
<script src="{cdn}"></script>
</head>
<body>
<div id="chart" style="width:100%;height:90vh;"></div>
<script>
const figure = {figure};
Plotly.newPlot("chart", figure.data, figure.layout);
</script>
</body>
</html>
"#,
            title = html_escape(&self.layout.title.text),
            cdn = PLOTLY_CDN,
            figure = figure,
        ))
    }

    pub fn write_html(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        std::fs::write(path, self.to_html()?).map_err(|source| ToolkitError::Io {
            path: path.to_path_buf(),
            source,
        })
    }
}

fn html_escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}
