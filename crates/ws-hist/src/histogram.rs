//! 1-D histogram with explicit under/overflow.

use ws_core::{Error, Result};

/// A filled 1-D histogram.
///
/// Bins are addressed `1..=n_bins`; `0` is the underflow and `n_bins + 1`
/// the overflow.
#[derive(Debug, Clone, PartialEq)]
pub struct Histogram {
    /// Histogram name.
    pub name: String,
    /// Bin edges (length = n_bins + 1).
    pub bin_edges: Vec<f64>,
    /// Bin contents (sum of weights), excluding under/overflow.
    pub bin_content: Vec<f64>,
    /// Sum of weights squared per bin.
    pub sumw2: Vec<f64>,
    /// Underflow sum of weights.
    pub underflow: f64,
    /// Overflow sum of weights.
    pub overflow: f64,
    /// Number of fills, under/overflow included.
    pub entries: f64,
}

/// Uniform edges of `n_bins` bins over `[low, high)`.
pub fn uniform_edges(n_bins: usize, low: f64, high: f64) -> Vec<f64> {
    let width = (high - low) / n_bins as f64;
    let mut edges: Vec<f64> = (0..n_bins).map(|i| low + i as f64 * width).collect();
    edges.push(high);
    edges
}

impl Histogram {
    /// Empty histogram over the given edges.
    pub fn new(name: impl Into<String>, bin_edges: Vec<f64>) -> Result<Self> {
        let name = name.into();
        if bin_edges.len() < 2 {
            return Err(Error::Validation(format!(
                "histogram '{name}' needs at least 2 bin edges, got {}",
                bin_edges.len()
            )));
        }
        if bin_edges.windows(2).any(|w| !(w[0] < w[1])) {
            return Err(Error::Validation(format!(
                "histogram '{name}' bin edges are not strictly increasing"
            )));
        }
        let n = bin_edges.len() - 1;
        Ok(Self {
            name,
            bin_edges,
            bin_content: vec![0.0; n],
            sumw2: vec![0.0; n],
            underflow: 0.0,
            overflow: 0.0,
            entries: 0.0,
        })
    }

    /// Empty histogram with `n_bins` uniform bins over `[low, high)`.
    pub fn uniform(name: impl Into<String>, n_bins: usize, low: f64, high: f64) -> Result<Self> {
        if n_bins == 0 {
            return Err(Error::Validation("histogram needs at least one bin".to_string()));
        }
        Self::new(name, uniform_edges(n_bins, low, high))
    }

    /// Number of bins, excluding under/overflow.
    pub fn n_bins(&self) -> usize {
        self.bin_content.len()
    }

    /// Bin index of `x`: `0` below range, `n_bins + 1` at or above the
    /// upper edge. NaN is not below the range, so it lands in the overflow.
    pub fn find_bin(&self, x: f64) -> usize {
        let edges = &self.bin_edges;
        let n = self.n_bins();
        if x < edges[0] {
            return 0;
        }
        if !(x < edges[n]) {
            return n + 1;
        }
        // First edge greater than x.
        let upper = edges.partition_point(|e| *e <= x);
        upper.clamp(1, n)
    }

    /// Add `weight` at `x`. Every call counts as an entry.
    pub fn fill(&mut self, x: f64, weight: f64) {
        let n = self.n_bins();
        self.entries += 1.0;
        match self.find_bin(x) {
            0 => self.underflow += weight,
            bin if bin == n + 1 => self.overflow += weight,
            bin => {
                self.bin_content[bin - 1] += weight;
                self.sumw2[bin - 1] += weight * weight;
            }
        }
    }

    /// Center of bin `i`; outside `1..=n_bins` the edge bin width is extended.
    pub fn bin_center(&self, i: usize) -> f64 {
        let edges = &self.bin_edges;
        let n = self.n_bins();
        if i == 0 {
            let w = edges[1] - edges[0];
            return edges[0] - 0.5 * w;
        }
        if i > n {
            let w = edges[n] - edges[n - 1];
            return edges[n] + (i - n) as f64 * w - 0.5 * w;
        }
        0.5 * (edges[i - 1] + edges[i])
    }

    /// Content of bin `i`: underflow at `0`, overflow at `n_bins + 1`,
    /// zero beyond.
    pub fn bin_content(&self, i: usize) -> f64 {
        let n = self.n_bins();
        match i {
            0 => self.underflow,
            i if i <= n => self.bin_content[i - 1],
            i if i == n + 1 => self.overflow,
            _ => 0.0,
        }
    }

    /// Sum of in-range bin contents.
    pub fn integral(&self) -> f64 {
        self.bin_content.iter().sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn uniform_edges_hit_bounds() {
        let e = uniform_edges(30, -3.14, 3.14);
        assert_eq!(e.len(), 31);
        assert_eq!(e[0], -3.14);
        assert_eq!(e[30], 3.14);
    }

    #[test]
    fn edge_semantics() {
        let mut h = Histogram::uniform("h", 4, 0.0, 8.0).unwrap();
        h.fill(-0.1, 1.0);
        h.fill(0.0, 2.0);
        h.fill(2.0, 3.0);
        h.fill(7.999, 4.0);
        h.fill(8.0, 5.0);
        h.fill(f64::NAN, 6.0);
        assert_eq!(h.bin_content, vec![2.0, 3.0, 0.0, 4.0]);
        assert_eq!(h.underflow, 1.0);
        assert_eq!(h.overflow, 11.0);
        assert_eq!(h.entries, 6.0);
        assert_eq!(h.sumw2, vec![4.0, 9.0, 0.0, 16.0]);
        assert_eq!(h.bin_content(0), 1.0);
        assert_eq!(h.bin_content(1), 2.0);
        assert_eq!(h.bin_content(5), 11.0);
        assert_eq!(h.bin_content(6), 0.0);
    }

    #[test]
    fn nan_overflows_and_every_fill_is_an_entry() {
        let mut h = Histogram::uniform("h", 4, 0.0, 8.0).unwrap();
        h.fill(f64::NAN, 1.0);
        h.fill(9.0, 1.0);
        h.fill(1.0, 1.0);
        assert_eq!(h.find_bin(f64::NAN), 5);
        assert_eq!(h.underflow, 0.0);
        assert_eq!(h.overflow, 2.0);
        assert_eq!(h.entries, 3.0);
        assert_eq!(h.bin_content(1), 1.0);
    }

    #[test]
    fn centers_are_one_indexed() {
        let h = Histogram::uniform("h", 200, 0.0, 8000.0).unwrap();
        assert_relative_eq!(h.bin_center(1), 20.0);
        assert_relative_eq!(h.bin_center(200), 7980.0);
        assert_relative_eq!(h.bin_center(0), -20.0);
        assert_relative_eq!(h.bin_center(201), 8020.0);
    }

    #[test]
    fn rejects_bad_edges() {
        assert!(Histogram::new("h", vec![1.0]).is_err());
        assert!(Histogram::new("h", vec![0.0, 1.0, 1.0]).is_err());
        assert!(Histogram::uniform("h", 0, 0.0, 1.0).is_err());
    }
}
