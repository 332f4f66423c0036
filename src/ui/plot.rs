use std::ops::RangeInclusive;

use eframe::egui::{self, Align2, Color32, CornerRadius, FontId, Sense, Stroke, Ui};
use egui_plot::{
    Bar, BarChart, BoxElem, BoxPlot, BoxSpread, GridMark, Legend, MarkerShape, Plot, PlotPoints,
    Points,
};

use crate::color::{contrasting_text, generate_palette, ColorMap};
use crate::data::stats::AgeSummary;
use crate::views::{BarSpec, Chart, ChartKind, Heatmap, ScatterGroup};

const PLOT_HEIGHT: f32 = 340.0;

// ---------------------------------------------------------------------------
// Chart dispatch
// ---------------------------------------------------------------------------

/// Draw one chart description. `id` must be unique among charts on screen.
pub fn chart(ui: &mut Ui, id: &str, chart: &Chart, colors: &ColorMap) {
    ui.strong(chart.title.as_str());
    match &chart.kind {
        ChartKind::Bars { bars, horizontal } => bar_chart(ui, id, chart, bars, *horizontal, colors),
        ChartKind::Heatmap(h) => heatmap(ui, h),
        ChartKind::AgeBoxes(boxes) => age_boxes(ui, id, chart, boxes, colors),
        ChartKind::Scatter(groups) => scatter(ui, id, chart, groups, colors),
    }
}

/// A static, labelled plot for `chart`.
macro_rules! base_plot {
    ($id:expr, $chart:expr) => {
        Plot::new($id)
            .legend(Legend::default())
            .x_axis_label($chart.x_label)
            .y_axis_label($chart.y_label)
            .height(PLOT_HEIGHT)
            .allow_boxed_zoom(false)
            .allow_drag(false)
            .allow_scroll(false)
            .allow_zoom(false)
    };
}

/// Axis labels for charts whose categories sit at 0, 1, 2, …
fn category_axis(labels: Vec<String>) -> impl Fn(GridMark, &RangeInclusive<f64>) -> String {
    move |mark, _range| {
        let v = mark.value;
        if v < 0.0 || (v - v.round()).abs() > 1e-6 {
            return String::new();
        }
        labels.get(v.round() as usize).cloned().unwrap_or_default()
    }
}

// ---------------------------------------------------------------------------
// Bars
// ---------------------------------------------------------------------------

fn bar_chart(
    ui: &mut Ui,
    id: &str,
    chart: &Chart,
    bars: &[BarSpec],
    horizontal: bool,
    colors: &ColorMap,
) {
    let n = bars.len();
    let palette = generate_palette(n);

    // Horizontal charts list the first bar at the top.
    let slot = |i: usize| if horizontal { (n - 1 - i) as f64 } else { i as f64 };
    let mut labels = vec![String::new(); n];

    // One BarChart per legend entry so positions show up in the legend.
    let mut series: Vec<(Option<String>, Color32, Vec<Bar>)> = Vec::new();
    for (i, spec) in bars.iter().enumerate() {
        labels[slot(i) as usize] = spec.label.clone();
        let color = match &spec.position {
            Some(p) => colors.color_for(p),
            None => palette[i],
        };
        let bar = Bar::new(slot(i), spec.value)
            .name(&spec.label)
            .fill(color)
            .width(0.7);

        match series.iter_mut().find(|(key, _, _)| spec.position.is_some() && *key == spec.position) {
            Some((_, _, group)) => group.push(bar),
            None => series.push((spec.position.clone(), color, vec![bar])),
        }
    }

    let mut plot = base_plot!(id, chart);
    plot = if horizontal {
        plot.y_axis_formatter(category_axis(labels)).include_x(0.0)
    } else {
        plot.x_axis_formatter(category_axis(labels)).include_y(0.0)
    };

    plot.show(ui, |plot_ui| {
        for (key, color, group) in series {
            let mut bar_chart = BarChart::new(group).color(color);
            if let Some(position) = key {
                bar_chart = bar_chart.name(position);
            }
            if horizontal {
                bar_chart = bar_chart.horizontal();
            }
            plot_ui.bar_chart(bar_chart);
        }
    });
}

// ---------------------------------------------------------------------------
// Box plot
// ---------------------------------------------------------------------------

fn age_boxes(ui: &mut Ui, id: &str, chart: &Chart, boxes: &[AgeSummary], colors: &ColorMap) {
    let labels = boxes.iter().map(|b| b.position.clone()).collect();

    base_plot!(id, chart)
        .x_axis_formatter(category_axis(labels))
        .show(ui, |plot_ui| {
            for (i, summary) in boxes.iter().enumerate() {
                let x = i as f64;
                let color = colors.color_for(&summary.position);
                let elem = BoxElem::new(
                    x,
                    BoxSpread::new(
                        summary.lower_whisker,
                        summary.q1,
                        summary.median,
                        summary.q3,
                        summary.upper_whisker,
                    ),
                )
                .name(&summary.position)
                .fill(color.linear_multiply(0.4))
                .stroke(Stroke::new(1.5, color))
                .box_width(0.5);

                let tooltip = box_tooltip(summary);
                plot_ui.box_plot(
                    BoxPlot::new(vec![elem])
                        .name(&summary.position)
                        .color(color)
                        .element_formatter(Box::new(move |_, _| tooltip.clone())),
                );

                if !summary.outliers.is_empty() {
                    let points: Vec<[f64; 2]> = summary.outliers.iter().map(|&a| [x, a]).collect();
                    plot_ui.points(
                        Points::new(PlotPoints::from(points))
                            .shape(MarkerShape::Diamond)
                            .color(color)
                            .radius(3.0),
                    );
                }
            }
        });
}

/// Hover text for one position's box. Whiskers stop at 1.5 IQR, so the
/// observed extremes are listed separately.
fn box_tooltip(s: &AgeSummary) -> String {
    format!(
        "{}\nmax: {:.0}\nQ3: {:.1}\nmedian: {:.1}\nQ1: {:.1}\nmin: {:.0}",
        s.position, s.max, s.q3, s.median, s.q1, s.min
    )
}

// ---------------------------------------------------------------------------
// Scatter
// ---------------------------------------------------------------------------

fn scatter(ui: &mut Ui, id: &str, chart: &Chart, groups: &[ScatterGroup], colors: &ColorMap) {
    base_plot!(id, chart).show(ui, |plot_ui| {
        for group in groups {
            plot_ui.points(
                Points::new(PlotPoints::from(group.points.clone()))
                    .name(&group.position)
                    .color(colors.color_for(&group.position))
                    .filled(true)
                    .radius(4.0),
            );
        }
    });
}

// ---------------------------------------------------------------------------
// Heatmap (egui_plot has none, so paint cells directly)
// ---------------------------------------------------------------------------

fn heatmap(ui: &mut Ui, h: &Heatmap) {
    const CELL: egui::Vec2 = egui::vec2(72.0, 32.0);
    const LABEL_WIDTH: f32 = 80.0;
    const HEADER_HEIGHT: f32 = 24.0;

    let size = egui::vec2(
        LABEL_WIDTH + CELL.x * h.col_labels.len() as f32,
        HEADER_HEIGHT + CELL.y * h.row_labels.len() as f32,
    );
    let (response, painter) = ui.allocate_painter(size, Sense::hover());
    let origin = response.rect.min;
    let text_color = ui.visuals().text_color();
    let font = FontId::proportional(13.0);
    let (lo, hi) = h.range;

    for (c, label) in h.col_labels.iter().enumerate() {
        let center = origin + egui::vec2(LABEL_WIDTH + CELL.x * (c as f32 + 0.5), HEADER_HEIGHT * 0.5);
        painter.text(center, Align2::CENTER_CENTER, label, font.clone(), text_color);
    }

    for (r, label) in h.row_labels.iter().enumerate() {
        let top = HEADER_HEIGHT + CELL.y * r as f32;
        painter.text(
            origin + egui::vec2(LABEL_WIDTH - 8.0, top + CELL.y * 0.5),
            Align2::RIGHT_CENTER,
            label,
            font.clone(),
            text_color,
        );

        for c in 0..h.col_labels.len() {
            if h.is_masked(r, c) {
                continue;
            }
            let value = h.cells[r][c];
            let rect = egui::Rect::from_min_size(
                origin + egui::vec2(LABEL_WIDTH + CELL.x * c as f32, top),
                CELL,
            )
            .shrink(1.0);

            let t = if hi > lo { (value - lo) / (hi - lo) } else { 0.0 };
            let fill = h.scale.sample(t);
            painter.rect_filled(rect, CornerRadius::ZERO, fill);

            let text = if value.is_nan() {
                "n/a".to_string()
            } else {
                format!("{value:.prec$}", prec = h.decimals)
            };
            painter.text(rect.center(), Align2::CENTER_CENTER, text, font.clone(), contrasting_text(fill));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn box_tooltip_lists_observed_extremes() {
        let summary = AgeSummary {
            position: "MB".into(),
            min: 20.0,
            q1: 21.0,
            median: 22.5,
            q3: 24.0,
            max: 40.0,
            lower_whisker: 20.0,
            upper_whisker: 24.0,
            outliers: vec![40.0],
        };
        assert_eq!(
            box_tooltip(&summary),
            "MB\nmax: 40\nQ3: 24.0\nmedian: 22.5\nQ1: 21.0\nmin: 20"
        );
    }
}
