use serde::{Deserialize, Serialize};

/// Version of the chart JSON shape handed to the browser.
pub const CHART_CONTRACT_VERSION: u32 = 1;

/// One dataset record. Only `year` is consumed; other columns are skipped at load time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Row {
    pub year: i32,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Dataset {
    pub rows: Vec<Row>,
}

impl Dataset {
    pub fn new(rows: Vec<Row>) -> Self {
        Self { rows }
    }

    pub fn from_years<I: IntoIterator<Item = i32>>(years: I) -> Self {
        Self {
            rows: years.into_iter().map(|year| Row { year }).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct YearCount {
    pub year: i32,
    pub count: u64,
}

/// Presentation constants for the bar chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartStyle {
    pub title: String,
    pub title_font_family: String,
    pub title_font_size: u32,
    pub title_color: String,
    pub bar_color: String,
    pub bar_line_color: String,
    pub bar_line_width: f64,
    pub opacity: f64,
    pub axis_headroom: u64,
}

impl Default for ChartStyle {
    fn default() -> Self {
        Self {
            title: "Lego sets per year".to_string(),
            title_font_family: "Trebuchet".to_string(),
            title_font_size: 18,
            title_color: "rgb(255,129,10)".to_string(),
            bar_color: "rgb(255,129,10)".to_string(),
            bar_line_color: "rgb(255,129,0)".to_string(),
            bar_line_width: 1.5,
            opacity: 0.75,
            axis_headroom: 100,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartDescription {
    pub version: u32,
    pub data: Vec<BarTrace>,
    pub layout: Layout,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BarTrace {
    #[serde(rename = "type")]
    pub trace_type: String,
    pub x: Vec<i32>,
    pub y: Vec<u64>,
    pub marker: Marker,
    pub opacity: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Marker {
    pub color: String,
    pub line: MarkerLine,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarkerLine {
    pub color: String,
    pub width: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Layout {
    pub title: Title,
    pub yaxis: Axis,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Title {
    pub text: String,
    pub font: Font,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Font {
    pub family: String,
    pub size: u32,
    pub color: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Axis {
    pub range: [u64; 2],
    pub showticklabels: bool,
}

impl ChartDescription {
    /// Upper bound of the y-axis range.
    pub fn y_upper_bound(&self) -> u64 {
        self.layout.yaxis.range[1]
    }
}
