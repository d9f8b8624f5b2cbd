//! Cut-flow bookkeeping.

use std::fmt;

use crate::select::Verdict;

/// Pass/all counts of an ordered list of cuts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CutFlow {
    total: u64,
    cuts: Vec<(&'static str, u64)>,
}

impl CutFlow {
    /// Empty cut-flow for the given cut names.
    pub fn new(names: &[&'static str]) -> Self {
        Self { total: 0, cuts: names.iter().map(|&n| (n, 0)).collect() }
    }

    /// Record one event.
    ///
    /// An event that failed cut `k` passed every cut before it.
    pub fn record(&mut self, verdict: &Verdict) {
        self.total += 1;
        let passed = match verdict {
            Verdict::Pass(_) => self.cuts.len(),
            Verdict::Fail { cut } => (*cut).min(self.cuts.len()),
        };
        for (_, n) in &mut self.cuts[..passed] {
            *n += 1;
        }
    }

    /// Events seen.
    pub fn total(&self) -> u64 {
        self.total
    }

    /// Events passing every cut.
    pub fn selected(&self) -> u64 {
        self.cuts.last().map_or(self.total, |&(_, n)| n)
    }

    /// `(name, pass, all)` per cut, where `all` is the count reaching it.
    pub fn rows(&self) -> impl Iterator<Item = (&'static str, u64, u64)> + '_ {
        let mut all = self.total;
        self.cuts.iter().map(move |&(name, pass)| {
            let row = (name, pass, all);
            all = pass;
            row
        })
    }
}

fn percent(num: u64, den: u64) -> f64 {
    if den == 0 { 0.0 } else { 100.0 * num as f64 / den as f64 }
}

impl fmt::Display for CutFlow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let width = self.cuts.iter().map(|(n, _)| n.len()).max().unwrap_or(0);
        for (name, pass, all) in self.rows() {
            writeln!(
                f,
                "{name:<width$}: pass={pass:<10} all={all:<10} -- eff={:.2} % cumulative eff={:.2} %",
                percent(pass, all),
                percent(pass, self.total),
            )?;
        }
        Ok(())
    }
}
