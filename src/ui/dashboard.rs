use eframe::egui::{self, RichText, ScrollArea, Ui};
use egui_plot::{Bar, BarChart, Legend, Plot, PlotPoints, Points};

use crate::color::LanguageColors;
use crate::data::aggregate::{PageHistogram, ScatterSeries};
use crate::render::{self, ChartSpec, DisplayCall};
use crate::state::AppState;

const CHART_HEIGHT: f32 = 260.0;

// ---------------------------------------------------------------------------
// Central panel – the dashboard itself
// ---------------------------------------------------------------------------

/// Re-run the pipeline and interpret its display calls.
pub fn central_panel(ui: &mut Ui, state: &AppState) {
    let dataset = match &state.dataset {
        Some(ds) => ds,
        None => {
            ui.centered_and_justified(|ui: &mut Ui| {
                ui.heading("Open a books file to explore the dashboard  (File → Open…)");
            });
            return;
        }
    };

    let colors = LanguageColors::new(&dataset.languages);
    let calls = render::render(dataset, &state.criteria, state.selected_title.as_deref());

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            for call in calls {
                show_call(ui, &colors, call);
            }
        });
}

fn show_call(ui: &mut Ui, colors: &LanguageColors, call: DisplayCall) {
    match call {
        DisplayCall::Heading(text) => {
            ui.add_space(12.0);
            ui.heading(text);
        }
        DisplayCall::Text(text) => {
            ui.label(text);
        }
        DisplayCall::Table {
            title,
            headers,
            rows,
        } => show_table(ui, &title, &headers, rows),
        DisplayCall::Chart(spec) => show_chart(ui, colors, spec),
        DisplayCall::Image { uri, caption } => {
            ui.add(
                egui::Image::from_uri(uri)
                    .max_width(240.0)
                    .rounding(4.0),
            );
            ui.label(RichText::new(caption).italics());
        }
    }
}

// ---------------------------------------------------------------------------
// Tables
// ---------------------------------------------------------------------------

fn show_table(ui: &mut Ui, title: &str, headers: &[String], rows: Vec<Vec<String>>) {
    egui::Grid::new(title.to_string())
        .striped(true)
        .min_col_width(60.0)
        .show(ui, |ui: &mut Ui| {
            for header in headers {
                ui.strong(header);
            }
            ui.end_row();
            for row in rows {
                for cell in row {
                    ui.label(cell);
                }
                ui.end_row();
            }
        });
}

// ---------------------------------------------------------------------------
// Charts (egui_plot)
// ---------------------------------------------------------------------------

fn show_chart(ui: &mut Ui, colors: &LanguageColors, spec: ChartSpec) {
    match spec {
        ChartSpec::Scatter {
            title,
            x_label,
            y_label,
            series,
        } => scatter_chart(ui, colors, title, x_label, y_label, series),
        ChartSpec::Bar {
            title,
            x_label,
            y_label,
            bars,
        } => bar_chart(ui, title, x_label, y_label, bars),
        ChartSpec::Histogram {
            title,
            x_label,
            histogram,
        } => histogram_chart(ui, title, x_label, histogram),
    }
}

fn scatter_chart(
    ui: &mut Ui,
    colors: &LanguageColors,
    title: String,
    x_label: String,
    y_label: String,
    series: Vec<ScatterSeries>,
) {
    let hover_series = series.clone();
    Plot::new(title)
        .height(CHART_HEIGHT)
        .legend(Legend::default())
        .x_axis_label(x_label)
        .y_axis_label(y_label)
        .label_formatter(move |name, value| {
            // Echo title/author when the cursor snaps to a point.
            for s in &hover_series {
                if s.language != name {
                    continue;
                }
                if let Some(pos) = s
                    .points
                    .iter()
                    .position(|p| p[0] == value.x && p[1] == value.y)
                {
                    return format!("{}\n{} · {:.0} pages ({:.0})", s.labels[pos], name, value.y, value.x);
                }
            }
            format!("{:.0}, {:.0}", value.x, value.y)
        })
        .show(ui, |plot_ui| {
            for s in series {
                let color = colors.color_for(&s.language);
                let points: PlotPoints = s.points.into();
                plot_ui.points(
                    Points::new(points)
                        .name(&s.language)
                        .color(color)
                        .radius(3.0),
                );
            }
        });
}

fn bar_chart(ui: &mut Ui, title: String, x_label: String, y_label: String, bars: Vec<(String, usize)>) {
    let labels: Vec<String> = bars.iter().map(|(label, _)| label.clone()).collect();
    let chart_bars: Vec<Bar> = bars
        .iter()
        .enumerate()
        .map(|(i, (label, count))| Bar::new(i as f64, *count as f64).name(label).width(0.6))
        .collect();

    Plot::new(title)
        .height(CHART_HEIGHT)
        .x_axis_label(x_label)
        .y_axis_label(y_label)
        .x_axis_formatter(move |mark, _range| {
            let idx = mark.value.round();
            if (mark.value - idx).abs() > 0.05 || idx < 0.0 {
                return String::new();
            }
            labels.get(idx as usize).cloned().unwrap_or_default()
        })
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(BarChart::new(chart_bars));
        });
}

fn histogram_chart(ui: &mut Ui, title: String, x_label: String, histogram: PageHistogram) {
    let width = f64::from(histogram.bin_width);
    let chart_bars: Vec<Bar> = histogram
        .bins
        .iter()
        .map(|&(start, count)| {
            let center = f64::from(start) + width / 2.0;
            Bar::new(center, count as f64).width(width * 0.95)
        })
        .collect();

    Plot::new(title)
        .height(CHART_HEIGHT)
        .x_axis_label(x_label)
        .y_axis_label("Number of Books")
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(BarChart::new(chart_bars));
        });
}
