use crate::axes::PlotArea;
use crate::canvas::Canvas;
use crate::color::Color;
use crate::primitives::*;

pub struct LegendEntry {
    pub label: String,
    pub color: Color,
}

/// Borderless filled-box legend, rows filled left to right, anchored at the
/// top right of the plot area.
pub fn draw_legend(
    canvas: &mut Canvas,
    area: &PlotArea,
    entries: &[LegendEntry],
    columns: usize,
    font_size: f64,
) {
    if entries.is_empty() {
        return;
    }
    let columns = columns.max(1);
    let row_height = font_size + 4.0;
    let swatch_w = font_size * 1.2;
    let swatch_h = font_size * 0.8;
    let gap = 5.0;
    let padding = 6.0;

    let text_style =
        TextStyle { size: font_size, baseline: TextBaseline::Central, ..Default::default() };
    let max_label = entries
        .iter()
        .map(|e| approx_text_width(&e.label, font_size))
        .fold(0.0_f64, f64::max);
    let column_w = swatch_w + gap + max_label + padding;

    let lx = area.right() - padding - columns as f64 * column_w;
    let ly = area.top + padding;

    for (i, entry) in entries.iter().enumerate() {
        let (row, col) = (i / columns, i % columns);
        let sx = lx + col as f64 * column_w;
        let ey = ly + row as f64 * row_height + row_height / 2.0;
        canvas.rect(sx, ey - swatch_h / 2.0, swatch_w, swatch_h, &Style::filled(entry.color));
        canvas.text(sx + swatch_w + gap, ey, &entry.label, &text_style);
    }
}
