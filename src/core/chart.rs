use crate::domain::model::{
    Axis, BarTrace, ChartDescription, ChartStyle, Font, Layout, Marker, MarkerLine, Title,
    YearCount, CHART_CONTRACT_VERSION,
};

/// Builds the bar chart for the given counts. An empty input yields an empty
/// series and a y-axis of `[0, axis_headroom]`.
pub fn build_bar_chart(counts: &[YearCount], style: &ChartStyle) -> ChartDescription {
    let x: Vec<i32> = counts.iter().map(|c| c.year).collect();
    let y: Vec<u64> = counts.iter().map(|c| c.count).collect();
    let max_count = y.iter().copied().max().unwrap_or(0);

    let trace = BarTrace {
        trace_type: "bar".to_string(),
        x,
        y,
        marker: Marker {
            color: style.bar_color.clone(),
            line: MarkerLine {
                color: style.bar_line_color.clone(),
                width: style.bar_line_width,
            },
        },
        opacity: style.opacity,
    };

    let layout = Layout {
        title: Title {
            text: style.title.clone(),
            font: Font {
                family: style.title_font_family.clone(),
                size: style.title_font_size,
                color: style.title_color.clone(),
            },
        },
        yaxis: Axis {
            range: [0, max_count.saturating_add(style.axis_headroom)],
            showticklabels: true,
        },
    };

    ChartDescription {
        version: CHART_CONTRACT_VERSION,
        data: vec![trace],
        layout,
    }
}
