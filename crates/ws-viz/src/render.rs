//! Log-y stacked histogram plot.

use ws_core::Result;

use crate::axes::{Axis, PlotArea};
use crate::canvas::{Canvas, outline};
use crate::color::Color;
use crate::config::PlotStyle;
use crate::legend::{LegendEntry, draw_legend};
use crate::primitives::*;
use crate::stack::StackArtifact;

const FALLBACK: Color = Color::rgb(136, 136, 136);

/// Render one stack to an SVG document.
pub fn render_stack(art: &StackArtifact, style: &PlotStyle) -> Result<String> {
    let palette = style.palette_colors()?;
    let color_of = |i: usize| palette.get(i).copied().unwrap_or(FALLBACK);

    let mut canvas = Canvas::new(style.width, style.height);
    let area = PlotArea::from_margins(
        style.width,
        style.height,
        style.margin_left,
        style.margin_right,
        style.margin_top,
        style.margin_bottom,
    );

    let (x_min, x_max) = match (art.bin_edges.first(), art.bin_edges.last()) {
        (Some(&lo), Some(&hi)) if hi > lo => (lo, hi),
        _ => (0.0, 1.0),
    };
    let x_axis = Axis::linear(x_min, x_max, 6).with_label(art.x_label.clone());
    let y_top = (art.max_total() * style.headroom).max(style.y_min * 10.0);
    let y_axis = Axis::auto_log(style.y_min, y_top).with_label(art.y_label.clone());

    // Stack, bottom sample first.
    let mut cumulative = vec![0.0_f64; art.total_y.len()];
    for (si, sample) in art.samples.iter().enumerate() {
        let fill = Style::filled(color_of(si));
        let bins = sample.y.iter().zip(cumulative.iter_mut()).zip(art.bin_edges.windows(2));
        for ((&y, cum), edge) in bins {
            let base = *cum;
            *cum += y;
            if !(y > 0.0) || *cum <= y_axis.min {
                continue;
            }
            let px_lo = x_axis.data_to_pixel(edge[0], area.left, area.right());
            let px_hi = x_axis.data_to_pixel(edge[1], area.left, area.right());
            let py_base = y_axis.data_to_pixel(base, area.bottom(), area.top);
            let py_top = y_axis.data_to_pixel(*cum, area.bottom(), area.top);
            canvas.rect(px_lo, py_top, px_hi - px_lo, py_base - py_top, &fill);
        }
    }

    draw_axes(&mut canvas, &area, &x_axis, &y_axis, style);

    let entries: Vec<LegendEntry> = art
        .samples
        .iter()
        .enumerate()
        .map(|(i, s)| LegendEntry { label: s.label.clone(), color: color_of(i) })
        .collect();
    draw_legend(&mut canvas, &area, &entries, style.legend_columns, style.tick_size * 0.8);

    draw_header(&mut canvas, &area, style);
    Ok(canvas.finish_svg())
}

/// Frame with inward ticks on all four sides, tick labels and axis titles.
fn draw_axes(canvas: &mut Canvas, area: &PlotArea, x_axis: &Axis, y_axis: &Axis, style: &PlotStyle) {
    let black = Color::rgb(0, 0, 0);
    let tick = LineStyle::solid(black, 0.8);
    let tick_len = area.height.min(area.width) * 0.03;

    canvas.rect(area.left, area.top, area.width, area.height, &outline(black, 1.0));

    let x_label_style = TextStyle {
        size: style.tick_size,
        anchor: TextAnchor::Middle,
        baseline: TextBaseline::Hanging,
        ..Default::default()
    };
    for (&val, label) in x_axis.tick_positions.iter().zip(&x_axis.tick_labels) {
        let px = x_axis.data_to_pixel(val, area.left, area.right());
        canvas.line(px, area.bottom(), px, area.bottom() - tick_len, &tick);
        canvas.line(px, area.top, px, area.top + tick_len, &tick);
        canvas.text(px, area.bottom() + 5.0, label, &x_label_style);
    }

    let y_label_style = TextStyle {
        size: style.tick_size,
        anchor: TextAnchor::End,
        baseline: TextBaseline::Central,
        ..Default::default()
    };
    for (&val, label) in y_axis.tick_positions.iter().zip(&y_axis.tick_labels) {
        let py = y_axis.data_to_pixel(val, area.bottom(), area.top);
        canvas.line(area.left, py, area.left + tick_len, py, &tick);
        canvas.line(area.right(), py, area.right() - tick_len, py, &tick);
        canvas.text(area.left - 5.0, py, label, &y_label_style);
    }

    let title = TextStyle { size: style.font_size, anchor: TextAnchor::End, ..Default::default() };
    if !x_axis.label.is_empty() {
        let y = area.bottom() + style.tick_size + 10.0 + style.font_size;
        canvas.text(area.right(), y, &x_axis.label, &title);
    }
    if !y_axis.label.is_empty() {
        let widest = y_axis
            .tick_labels
            .iter()
            .map(|l| approx_text_width(l, style.tick_size))
            .fold(0.0_f64, f64::max);
        let x = area.left - widest - 12.0;
        canvas.text_rotated(x, area.top, &y_axis.label, &title, -90.0);
    }
}

fn draw_header(canvas: &mut Canvas, area: &PlotArea, style: &PlotStyle) {
    let y = area.top - 8.0;
    if !style.experiment.is_empty() {
        let bold = TextStyle { size: style.font_size, bold: true, ..Default::default() };
        canvas.text(area.left, y, &style.experiment, &bold);
    }
    if !style.energy.is_empty() {
        let plain =
            TextStyle { size: style.font_size, anchor: TextAnchor::End, ..Default::default() };
        canvas.text(area.right(), y, &style.energy, &plain);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stack::{STACK_SCHEMA_V1, StackSample};
    use ws_core::Channel;

    fn sample(partition: &str, y: Vec<f64>) -> StackSample {
        StackSample {
            partition: partition.into(),
            histogram: format!("mnu_{partition}_m_inv"),
            label: crate::stack::partition_label(Channel::Muon, partition),
            yield_: y.iter().sum(),
            y,
        }
    }

    fn artifact() -> StackArtifact {
        StackArtifact {
            schema_version: STACK_SCHEMA_V1.into(),
            channel: Channel::Muon,
            variable: "m_inv".into(),
            x_label: "Gen-level invariant M(ℓν) / GeV".into(),
            y_label: "Events".into(),
            bin_edges: vec![0.0, 2000.0, 4000.0, 6000.0, 8000.0],
            samples: vec![
                sample("400to800", vec![1e-4, 0.0, 0.0, 0.0]),
                sample("6000", vec![0.0, 0.0, 2e-6, 0.0]),
            ],
            total_y: vec![1e-4, 0.0, 2e-6, 0.0],
        }
    }

    #[test]
    fn draws_one_bar_per_nonzero_bin() {
        let svg = render_stack(&artifact(), &PlotStyle::default()).unwrap();
        assert_eq!(svg.matches(r##"fill="#64c0e8""##).count(), 2); // bar + legend swatch
        assert_eq!(svg.matches(r##"fill="#f8ce68""##).count(), 2);
        assert!(svg.contains("W→μν (M400-800)"));
        assert!(svg.contains("W→μν (M6000-inf)"));
        assert!(svg.contains(">CMS Simulation</text>"));
        assert!(svg.contains(">(13.6 TeV)</text>"));
        assert!(svg.contains(">Gen-level invariant M(ℓν) / GeV</text>"));
        assert!(svg.contains(">Events</text>"));
        assert!(svg.contains(">10\u{207B}\u{00B9}\u{00B9}</text>"));
    }

    #[test]
    fn empty_stack_still_renders_frame() {
        let mut art = artifact();
        for s in &mut art.samples {
            s.y = vec![0.0; 4];
        }
        art.total_y = vec![0.0; 4];
        let style = PlotStyle { experiment: String::new(), ..Default::default() };
        let svg = render_stack(&art, &style).unwrap();
        // Legend swatches only.
        assert_eq!(svg.matches(r##"fill="#64c0e8""##).count(), 1);
        assert!(!svg.contains("CMS Simulation"));
        assert!(svg.contains(">8000</text>"));
    }

    #[test]
    fn extra_partitions_fall_back_to_grey() {
        let style = PlotStyle { palette: vec!["#000001".into()], ..Default::default() };
        let svg = render_stack(&artifact(), &style).unwrap();
        assert!(svg.contains(r##"fill="#888888""##));
    }
}
