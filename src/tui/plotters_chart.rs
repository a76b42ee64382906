//! Plotters-powered attribution bar chart widget for Ratatui.
//!
//! Why Plotters instead of Ratatui's built-in `BarChart` widget?
//! - signed horizontal bars around a shared zero axis
//! - proper numeric x axis with tick labels
//! - easy to extend later (legend, annotations, exportable PNG/SVG backends, etc.)
//!
//! We render Plotters output into the Ratatui buffer using
//! `plotters-ratatui-backend`. Feature-name labels are drawn by the caller
//! in a left gutter (terminal cells are too coarse for Plotters to place
//! per-bar text reliably).

use plotters::prelude::*;
use plotters::style::Color as _;
use plotters_ratatui_backend::widget_fn;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Style},
    widgets::Widget,
};

/// A lightweight, render-only chart description.
///
/// The widget is intentionally data-driven: bars and bounds are computed
/// outside the render call. Bars are indexed bottom-up (index 0 renders at
/// the bottom of the chart).
pub struct AttributionChart<'a> {
    /// Signed contributions, one bar each.
    pub bars: &'a [f64],
    /// Symmetric x bounds (log-odds).
    pub x_bounds: [f64; 2],
}

impl Widget for AttributionChart<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        // When the available area is too small, Plotters may fail to build a
        // chart. In that case, we render a small hint rather than panicking.
        if area.width < 16 || area.height < 6 {
            buf.set_string(
                area.x,
                area.y,
                "Chart area too small (resize terminal).",
                Style::default().fg(Color::Yellow),
            );
            return;
        }

        let n = self.bars.len();
        if n == 0 {
            return;
        }

        let x0 = self.x_bounds[0];
        let x1 = self.x_bounds[1];
        if !(x0.is_finite() && x1.is_finite()) || x1 <= x0 {
            return;
        }

        let bars: Vec<f64> = self.bars.to_vec();
        let widget = widget_fn(move |root| {
            let mut chart = ChartBuilder::on(&root)
                .margin(1)
                .set_label_area_size(LabelAreaPosition::Bottom, 3)
                .build_cartesian_2d(x0..x1, 0.0..n as f64)?;

            chart
                .configure_mesh()
                .disable_x_mesh()
                .disable_y_mesh()
                .x_desc("contribution (log-odds)")
                .x_labels(5)
                .y_labels(0)
                .x_label_formatter(&|v| format!("{v:+.2}"))
                .label_style(("sans-serif", 10).into_font().color(&WHITE))
                .axis_style(&WHITE)
                .draw()?;

            // Series styling: keep the palette high-contrast for terminal
            // readability. Green pushes toward approval, red toward denial.
            let approve = RGBColor(0, 255, 0);
            let deny = RGBColor(255, 0, 0);

            for (idx, contribution) in bars.iter().enumerate() {
                let color = if *contribution >= 0.0 { approve } else { deny };
                let y0 = idx as f64 + 0.2;
                let y1 = idx as f64 + 0.8;
                chart.draw_series(std::iter::once(Rectangle::new(
                    [(0.0, y0), (*contribution, y1)],
                    color.filled(),
                )))?;
            }

            // Zero axis.
            chart.draw_series(LineSeries::new(
                [(0.0, 0.0), (0.0, n as f64)],
                &WHITE,
            ))?;

            Ok(())
        });

        widget.render(area, buf);
    }
}
