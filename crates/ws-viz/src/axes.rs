/// Rectangular plot area within the canvas.
#[derive(Debug, Clone, Copy)]
pub struct PlotArea {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl PlotArea {
    /// Area inside pad margins given as fractions of the canvas.
    pub fn from_margins(
        canvas_w: f64,
        canvas_h: f64,
        left: f64,
        right: f64,
        top: f64,
        bottom: f64,
    ) -> Self {
        Self {
            left: canvas_w * left,
            top: canvas_h * top,
            width: canvas_w * (1.0 - left - right),
            height: canvas_h * (1.0 - top - bottom),
        }
    }

    pub fn right(&self) -> f64 {
        self.left + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.top + self.height
    }
}

/// Axis with tick generation and data→pixel mapping.
#[derive(Debug, Clone)]
pub struct Axis {
    pub min: f64,
    pub max: f64,
    pub log: bool,
    pub label: String,
    pub tick_positions: Vec<f64>,
    pub tick_labels: Vec<String>,
}

impl Axis {
    /// Linear axis spanning exactly `[min, max]` with "nice number" ticks inside.
    pub fn linear(min: f64, max: f64, target_ticks: usize) -> Self {
        let mut ticks = Vec::new();
        let mut labels = Vec::new();
        if max > min {
            let step = nice_step((max - min) / (target_ticks.max(2) - 1) as f64);
            let mut k = (min / step).ceil();
            while k * step <= max + step * 1e-9 {
                let v = k * step;
                ticks.push(v);
                labels.push(format_tick(v, step));
                k += 1.0;
            }
        }
        Self { min, max, log: false, label: String::new(), tick_positions: ticks, tick_labels: labels }
    }

    /// Logarithmic axis widened to whole decades.
    pub fn auto_log(data_min: f64, data_max: f64) -> Self {
        // Tolerance keeps exact powers of ten on their own decade.
        let log_min = (data_min.max(1e-300).log10() + 1e-9).floor() as i32;
        let log_max = ((data_max.max(1e-300).log10() - 1e-9).ceil() as i32).max(log_min + 1);

        let ticks: Vec<f64> = (log_min..=log_max).map(|e| 10.0_f64.powi(e)).collect();
        let labels = (log_min..=log_max).map(|e| format!("10{}", superscript(e))).collect();
        Self {
            min: 10.0_f64.powi(log_min),
            max: 10.0_f64.powi(log_max),
            log: true,
            label: String::new(),
            tick_positions: ticks,
            tick_labels: labels,
        }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    /// Map a data value to pixel coordinate; log axes clamp at `min`.
    pub fn data_to_pixel(&self, value: f64, px_min: f64, px_max: f64) -> f64 {
        let frac = if self.log {
            let v = value.max(self.min).ln();
            (v - self.min.ln()) / (self.max.ln() - self.min.ln())
        } else {
            (value - self.min) / (self.max - self.min)
        };
        px_min + frac * (px_max - px_min)
    }
}

fn nice_step(rough: f64) -> f64 {
    let exp = rough.abs().log10().floor();
    let frac = rough / 10.0_f64.powf(exp);
    let nice_frac = if frac <= 1.5 {
        1.0
    } else if frac <= 3.5 {
        2.0
    } else if frac <= 7.5 {
        5.0
    } else {
        10.0
    };
    nice_frac * 10.0_f64.powf(exp)
}

fn format_tick(value: f64, step: f64) -> String {
    let decimals = if step >= 1.0 { 0 } else { (-step.log10().floor()) as usize };
    if decimals == 0 {
        // Avoid "-0"
        let v = if value.abs() < step * 0.01 { 0.0 } else { value };
        format!("{}", v.round() as i64)
    } else {
        format!("{:.prec$}", value, prec = decimals)
    }
}

fn superscript(n: i32) -> String {
    n.to_string()
        .chars()
        .map(|c| match c {
            '-' => '\u{207B}',
            '0' => '\u{2070}',
            '1' => '\u{00B9}',
            '2' => '\u{00B2}',
            '3' => '\u{00B3}',
            '4' => '\u{2074}',
            '5' => '\u{2075}',
            '6' => '\u{2076}',
            '7' => '\u{2077}',
            '8' => '\u{2078}',
            '9' => '\u{2079}',
            _ => c,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn linear_ticks_stay_inside() {
        let ax = Axis::linear(-3.14, 3.14, 7);
        assert_eq!(ax.min, -3.14);
        assert_eq!(ax.max, 3.14);
        assert_eq!(ax.tick_labels, vec!["-3", "-2", "-1", "0", "1", "2", "3"]);
        let ax = Axis::linear(0.0, 8000.0, 5);
        assert_eq!(ax.tick_labels, vec!["0", "2000", "4000", "6000", "8000"]);
    }

    #[test]
    fn log_decades() {
        let ax = Axis::auto_log(1e-11, 3.0e-4);
        assert!(ax.log);
        assert_eq!(ax.tick_positions.len(), 9);
        assert_eq!(ax.tick_labels[0], "10\u{207B}\u{00B9}\u{00B9}");
        assert_eq!(ax.tick_labels[8], "10\u{207B}\u{00B3}");
        // Bottom of the range maps to the bottom pixel, clamped below it.
        assert!((ax.data_to_pixel(1e-11, 500.0, 100.0) - 500.0).abs() < 1e-9);
        assert_eq!(ax.data_to_pixel(0.0, 500.0, 100.0), 500.0);
        assert!((ax.data_to_pixel(1e-3, 500.0, 100.0) - 100.0).abs() < 1e-9);
    }

    #[test]
    fn linear_mapping() {
        let ax = Axis::linear(0.0, 100.0, 5);
        assert!((ax.data_to_pixel(50.0, 0.0, 500.0) - 250.0).abs() < 1e-9);
    }

    #[test]
    fn nice_step_values() {
        assert!((nice_step(3.2) - 2.0).abs() < 1e-9);
        assert!((nice_step(0.7) - 0.5).abs() < 1e-9);
        assert!((nice_step(15.0) - 10.0).abs() < 1e-9);
    }

    #[test]
    fn margins() {
        let a = PlotArea::from_margins(600.0, 600.0, 0.16, 0.05, 0.08, 0.13);
        assert!((a.left - 96.0).abs() < 1e-9);
        assert!((a.right() - 570.0).abs() < 1e-9);
        assert!((a.top - 48.0).abs() < 1e-9);
        assert!((a.bottom() - 522.0).abs() < 1e-9);
    }
}
