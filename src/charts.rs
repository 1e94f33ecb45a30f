//! Canvas chart rendering for the dashboard.
//!
//! Each canvas is owned by exactly one [`ChartSlot`]. Installing a new
//! chart disposes the previous handle first, so repeated dashboard
//! refreshes can never stack two live drawings (or their resources) on
//! the same canvas.

use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use crate::format;
use crate::models::{ComparisonData, SeriesData};

/// Slice palette, reused in order when there are more categories than colors.
const PALETTE: [&str; 10] = [
    "#FF6384", "#36A2EB", "#FFCE56", "#4BC0C0", "#9966FF", "#FF9F40",
    "#FF6384", "#C9CBCF", "#4BC0C0", "#FF6384",
];

const CURRENT_COLOR: &str = "#36A2EB";
const PREVIOUS_COLOR: &str = "#C9CBCF";
const GRID_COLOR: &str = "rgba(0, 0, 0, 0.05)";
const TEXT_COLOR: &str = "#334155";

/// Something bound to a canvas that must be torn down before the canvas
/// is drawn on again.
pub trait Disposable {
    fn dispose(&mut self);
}

/// Holds at most one live chart. The slot, not the caller, is
/// responsible for disposing a superseded instance.
pub struct ChartSlot<C: Disposable> {
    live: Option<C>,
}

impl<C: Disposable> Default for ChartSlot<C> {
    fn default() -> Self {
        ChartSlot { live: None }
    }
}

impl<C: Disposable> ChartSlot<C> {
    pub fn new() -> Self {
        ChartSlot { live: None }
    }

    /// Replaces the current chart, disposing the previous one first.
    pub fn install(&mut self, next: C) {
        if let Some(mut previous) = self.live.take() {
            previous.dispose();
        }
        self.live = Some(next);
    }

    pub fn clear(&mut self) {
        if let Some(mut previous) = self.live.take() {
            previous.dispose();
        }
    }

    pub fn is_live(&self) -> bool {
        self.live.is_some()
    }
}

impl<C: Disposable> Drop for ChartSlot<C> {
    fn drop(&mut self) {
        self.clear();
    }
}

/// The three dashboard slots, owned by the dashboard page for its lifetime.
#[derive(Default)]
pub struct DashboardCharts {
    pub category: ChartSlot<Chart>,
    pub monthly: ChartSlot<Chart>,
    pub comparison: ChartSlot<Chart>,
}

impl DashboardCharts {
    pub fn dispose_all(&mut self) {
        self.category.clear();
        self.monthly.clear();
        self.comparison.clear();
    }
}

/// One drawn chart bound to a canvas.
pub struct Chart {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
}

impl Disposable for Chart {
    fn dispose(&mut self) {
        self.ctx.clear_rect(
            0.0,
            0.0,
            self.canvas.width() as f64,
            self.canvas.height() as f64,
        );
    }
}

impl Chart {
    fn bind(canvas: HtmlCanvasElement) -> Result<Chart, JsValue> {
        let ctx = canvas
            .get_context("2d")?
            .ok_or_else(|| JsValue::from_str("canvas has no 2d context"))?
            .dyn_into::<CanvasRenderingContext2d>()?;
        ctx.clear_rect(0.0, 0.0, canvas.width() as f64, canvas.height() as f64);
        ctx.set_font("12px sans-serif");
        Ok(Chart { canvas, ctx })
    }

    /// Category breakdown pie with a labelled legend.
    pub fn pie(canvas: HtmlCanvasElement, data: &SeriesData) -> Result<Chart, JsValue> {
        let chart = Chart::bind(canvas)?;
        let width = chart.canvas.width() as f64;
        let height = chart.canvas.height() as f64;
        let legend_width = (width * 0.4).min(180.0);
        let cx = (width - legend_width) / 2.0;
        let cy = height / 2.0;
        let radius = (cx.min(cy) - 10.0).max(10.0);

        for (i, (start, end)) in pie_angles(&data.data).into_iter().enumerate() {
            let color = PALETTE[i % PALETTE.len()];
            chart.ctx.begin_path();
            chart.ctx.move_to(cx, cy);
            chart.ctx.arc(cx, cy, radius, start, end)?;
            chart.ctx.close_path();
            chart.ctx.set_fill_style_str(color);
            chart.ctx.fill();
        }

        // Legend on the right, one row per category.
        let legend_x = width - legend_width + 10.0;
        for (i, label) in data.labels.iter().enumerate() {
            let y = 20.0 + i as f64 * 18.0;
            if y > height - 6.0 {
                break;
            }
            chart
                .ctx
                .set_fill_style_str(PALETTE[i % PALETTE.len()]);
            chart.ctx.fill_rect(legend_x, y - 9.0, 10.0, 10.0);
            chart.ctx.set_fill_style_str(TEXT_COLOR);
            let amount = data.data.get(i).copied();
            chart.ctx.fill_text(
                &format!("{}: {}", label, format::currency(amount)),
                legend_x + 16.0,
                y,
            )?;
        }

        Ok(chart)
    }

    /// Monthly spending trend line with a filled area and currency ticks.
    pub fn line(canvas: HtmlCanvasElement, data: &SeriesData) -> Result<Chart, JsValue> {
        let chart = Chart::bind(canvas)?;
        let width = chart.canvas.width() as f64;
        let height = chart.canvas.height() as f64;
        let (left, right, top, bottom) = (70.0, 10.0, 10.0, 26.0);
        let plot_w = (width - left - right).max(1.0);
        let plot_h = (height - top - bottom).max(1.0);
        let max = axis_max(&data.data);

        chart.draw_y_axis(left, top, plot_w, plot_h, max)?;

        let count = data.data.len();
        let x_of = |i: usize| {
            if count <= 1 {
                left + plot_w / 2.0
            } else {
                left + plot_w * i as f64 / (count - 1) as f64
            }
        };
        let y_of = |v: f64| top + plot_h * (1.0 - (v / max).clamp(0.0, 1.0));

        if count > 0 {
            // Filled area under the line.
            chart.ctx.begin_path();
            chart.ctx.move_to(x_of(0), top + plot_h);
            for (i, value) in data.data.iter().enumerate() {
                chart.ctx.line_to(x_of(i), y_of(*value));
            }
            chart.ctx.line_to(x_of(count - 1), top + plot_h);
            chart.ctx.close_path();
            chart.ctx.set_fill_style_str("rgba(54, 162, 235, 0.1)");
            chart.ctx.fill();

            chart.ctx.begin_path();
            chart.ctx.set_stroke_style_str(CURRENT_COLOR);
            chart.ctx.set_line_width(2.0);
            for (i, value) in data.data.iter().enumerate() {
                if i == 0 {
                    chart.ctx.move_to(x_of(i), y_of(*value));
                } else {
                    chart.ctx.line_to(x_of(i), y_of(*value));
                }
            }
            chart.ctx.stroke();

            for (i, value) in data.data.iter().enumerate() {
                chart.ctx.begin_path();
                chart.ctx.arc(x_of(i), y_of(*value), 3.0, 0.0, std::f64::consts::TAU)?;
                chart.ctx.set_fill_style_str(CURRENT_COLOR);
                chart.ctx.fill();
            }
        }

        chart.ctx.set_fill_style_str(TEXT_COLOR);
        for (i, label) in data.labels.iter().enumerate() {
            chart.ctx.fill_text(label, x_of(i) - 16.0, height - 8.0)?;
        }

        Ok(chart)
    }

    /// Current-vs-previous-month grouped bars per category.
    pub fn comparison(
        canvas: HtmlCanvasElement,
        data: &ComparisonData,
    ) -> Result<Chart, JsValue> {
        let chart = Chart::bind(canvas)?;
        let width = chart.canvas.width() as f64;
        let height = chart.canvas.height() as f64;
        let (left, right, top, bottom) = (70.0, 10.0, 24.0, 26.0);
        let plot_w = (width - left - right).max(1.0);
        let plot_h = (height - top - bottom).max(1.0);

        let max = axis_max(
            &data
                .current
                .iter()
                .chain(data.previous.iter())
                .copied()
                .collect::<Vec<f64>>(),
        );
        chart.draw_y_axis(left, top, plot_w, plot_h, max)?;

        let groups = data.labels.len().max(1);
        let group_w = plot_w / groups as f64;
        let bar_w = (group_w * 0.35).max(2.0);

        for (i, label) in data.labels.iter().enumerate() {
            let group_x = left + group_w * i as f64 + group_w * 0.15;
            let current = data.current.get(i).copied().unwrap_or(0.0);
            let previous = data.previous.get(i).copied().unwrap_or(0.0);

            for (offset, value, color) in [
                (0.0, current, CURRENT_COLOR),
                (bar_w, previous, PREVIOUS_COLOR),
            ] {
                let bar_h = plot_h * (value / max).clamp(0.0, 1.0);
                chart.ctx.set_fill_style_str(color);
                chart.ctx.fill_rect(
                    group_x + offset,
                    top + plot_h - bar_h,
                    bar_w,
                    bar_h,
                );
            }

            chart.ctx.set_fill_style_str(TEXT_COLOR);
            chart.ctx.fill_text(label, group_x, height - 8.0)?;
        }

        // Legend above the plot.
        chart.ctx.set_fill_style_str(CURRENT_COLOR);
        chart.ctx.fill_rect(left, 6.0, 10.0, 10.0);
        chart.ctx.set_fill_style_str(TEXT_COLOR);
        chart.ctx.fill_text("Current Month", left + 16.0, 15.0)?;
        chart.ctx.set_fill_style_str(PREVIOUS_COLOR);
        chart.ctx.fill_rect(left + 120.0, 6.0, 10.0, 10.0);
        chart.ctx.set_fill_style_str(TEXT_COLOR);
        chart.ctx.fill_text("Previous Month", left + 136.0, 15.0)?;

        Ok(chart)
    }

    fn draw_y_axis(
        &self,
        left: f64,
        top: f64,
        plot_w: f64,
        plot_h: f64,
        max: f64,
    ) -> Result<(), JsValue> {
        for tick in axis_ticks(max) {
            let y = top + plot_h * (1.0 - tick / max);
            self.ctx.set_stroke_style_str(GRID_COLOR);
            self.ctx.set_line_width(1.0);
            self.ctx.begin_path();
            self.ctx.move_to(left, y);
            self.ctx.line_to(left + plot_w, y);
            self.ctx.stroke();
            self.ctx.set_fill_style_str(TEXT_COLOR);
            self.ctx
                .fill_text(&format::currency(Some(tick)), 4.0, y + 4.0)?;
        }
        Ok(())
    }
}

/// Start/end angles of each pie slice, beginning at 12 o'clock.
/// Non-positive values produce empty slices rather than skewing the total.
fn pie_angles(values: &[f64]) -> Vec<(f64, f64)> {
    let total: f64 = values.iter().filter(|v| **v > 0.0).sum();
    let mut angles = Vec::with_capacity(values.len());
    let mut cursor = -std::f64::consts::FRAC_PI_2;
    for value in values {
        let sweep = if total > 0.0 && *value > 0.0 {
            std::f64::consts::TAU * value / total
        } else {
            0.0
        };
        angles.push((cursor, cursor + sweep));
        cursor += sweep;
    }
    angles
}

/// Upper bound of the value axis; always positive so empty data still
/// draws a frame.
fn axis_max(values: &[f64]) -> f64 {
    let max = values.iter().copied().fold(0.0_f64, f64::max);
    if max > 0.0 {
        max
    } else {
        1.0
    }
}

/// Four evenly spaced tick values from zero-exclusive up to `max`.
fn axis_ticks(max: f64) -> Vec<f64> {
    (1..=4).map(|i| max * i as f64 / 4.0).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FakeChart {
        disposed: std::rc::Rc<std::cell::Cell<u32>>,
    }

    impl Disposable for FakeChart {
        fn dispose(&mut self) {
            self.disposed.set(self.disposed.get() + 1);
        }
    }

    fn counted() -> (std::rc::Rc<std::cell::Cell<u32>>, FakeChart) {
        let count = std::rc::Rc::new(std::cell::Cell::new(0));
        let chart = FakeChart { disposed: count.clone() };
        (count, chart)
    }

    #[test]
    fn installing_twice_disposes_the_first_instance() {
        let (first_count, first) = counted();
        let (second_count, second) = counted();

        let mut slot = ChartSlot::new();
        slot.install(first);
        assert_eq!(first_count.get(), 0);

        slot.install(second);
        assert_eq!(first_count.get(), 1, "superseded chart must be disposed");
        assert_eq!(second_count.get(), 0);
        assert!(slot.is_live());
    }

    #[test]
    fn clear_disposes_and_empties_the_slot() {
        let (count, chart) = counted();
        let mut slot = ChartSlot::new();
        slot.install(chart);
        slot.clear();
        assert_eq!(count.get(), 1);
        assert!(!slot.is_live());
        slot.clear();
        assert_eq!(count.get(), 1, "clearing an empty slot is a no-op");
    }

    #[test]
    fn dropping_the_slot_disposes_its_chart() {
        let (count, chart) = counted();
        {
            let mut slot = ChartSlot::new();
            slot.install(chart);
        }
        assert_eq!(count.get(), 1);
    }

    #[test]
    fn pie_angles_cover_the_full_circle() {
        let angles = pie_angles(&[1.0, 1.0, 2.0]);
        assert_eq!(angles.len(), 3);
        let sweep: f64 = angles.iter().map(|(s, e)| e - s).sum();
        assert!((sweep - std::f64::consts::TAU).abs() < 1e-9);
        // Slices are contiguous.
        assert!((angles[0].1 - angles[1].0).abs() < 1e-9);
        assert!((angles[1].1 - angles[2].0).abs() < 1e-9);
    }

    #[test]
    fn pie_angles_ignore_non_positive_values() {
        let angles = pie_angles(&[3.0, 0.0, -1.0]);
        assert!((angles[0].1 - angles[0].0 - std::f64::consts::TAU).abs() < 1e-9);
        assert_eq!(angles[1].0, angles[1].1);
        assert_eq!(angles[2].0, angles[2].1);
    }

    #[test]
    fn axis_max_never_collapses_to_zero() {
        assert_eq!(axis_max(&[]), 1.0);
        assert_eq!(axis_max(&[0.0, -5.0]), 1.0);
        assert_eq!(axis_max(&[2.5, 7.0]), 7.0);
    }

    #[test]
    fn axis_ticks_split_the_range_evenly() {
        assert_eq!(axis_ticks(100.0), vec![25.0, 50.0, 75.0, 100.0]);
    }
}
