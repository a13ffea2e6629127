use crate::error::{Result, TrackError};

/// Equal-width histogram of heading values
///
/// Bins span the observed range of headings. Every bin is half-open except
/// the last, which also takes the maximum value.
#[derive(Debug, Clone, PartialEq)]
pub struct HeadingHistogram {
    /// Bin edges, one more than the number of counts
    pub edges: Vec<f64>,
    pub counts: Vec<usize>,
}

impl HeadingHistogram {
    pub fn new(headings: &[f64], bins: usize) -> Result<Self> {
        if bins == 0 {
            return Err(TrackError::Config(
                "histogram needs at least one bin".to_string(),
            ));
        }
        if headings.is_empty() {
            return Ok(Self {
                edges: Vec::new(),
                counts: Vec::new(),
            });
        }

        let (mut lo, mut hi) = headings
            .iter()
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &h| {
                (lo.min(h), hi.max(h))
            });
        if lo == hi {
            lo -= 0.5;
            hi += 0.5;
        }

        let width = (hi - lo) / bins as f64;
        let edges: Vec<f64> = (0..=bins).map(|i| lo + width * i as f64).collect();

        let mut counts = vec![0; bins];
        for &h in headings {
            let idx = (((h - lo) / width).floor() as usize).min(bins - 1);
            counts[idx] += 1;
        }

        Ok(Self { edges, counts })
    }

    pub fn bin_width(&self) -> Option<f64> {
        match self.edges.as_slice() {
            [first, second, ..] => Some(second - first),
            _ => None,
        }
    }

    /// Centre and count of each bin
    pub fn bars(&self) -> impl Iterator<Item = (f64, usize)> + '_ {
        self.edges
            .windows(2)
            .zip(&self.counts)
            .map(|(e, &c)| ((e[0] + e[1]) / 2.0, c))
    }

    pub fn total(&self) -> usize {
        self.counts.iter().sum()
    }
}
