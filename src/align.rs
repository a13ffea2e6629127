//! Heading alignment.
//!
//! The telemetry system records, at sample `i`, the heading it observed while
//! travelling from `i - 1` to `i`. Drawn as-is, every whisker therefore shows
//! the direction of the segment *behind* its point, which becomes obvious
//! once the plot is zoomed in on a curve. The aligner re-pairs positions with
//! headings `shift` samples away so that each whisker matches the track
//! leaving its point.
//!
//! For the default shift of `+1`:
//!
//! ```text
//! recorded  (P0,H0) (P1,H1) (P2,H2)
//! aligned   (P0,H1) (P1,H2) (P2,H2)   <- RepeatEdge
//! ```
//!
//! Alignment is not idempotent. Running it twice moves headings by two
//! samples, so it must be applied exactly once per render.

use crate::config::{AlignConfig, BoundaryPolicy};
use crate::track::TrackSample;

#[derive(Debug, Clone, Copy)]
pub struct HeadingAligner {
    shift: i32,
    boundary: BoundaryPolicy,
}

impl Default for HeadingAligner {
    fn default() -> Self {
        Self::new(&AlignConfig::default())
    }
}

impl HeadingAligner {
    pub fn new(config: &AlignConfig) -> Self {
        Self {
            shift: config.shift,
            boundary: config.boundary,
        }
    }

    pub fn shift(&self) -> i32 {
        self.shift
    }

    pub fn boundary(&self) -> BoundaryPolicy {
        self.boundary
    }

    /// Return the track with each position paired with its shifted heading
    ///
    /// Positions and sequence indices are carried through untouched. Tracks of
    /// zero or one sample are returned unchanged whatever the policy.
    pub fn align(&self, samples: &[TrackSample]) -> Vec<TrackSample> {
        let n = samples.len();
        if n <= 1 || self.shift == 0 {
            return samples.to_vec();
        }

        let shift = self.shift as isize;
        let last = n as isize - 1;

        let aligned: Vec<TrackSample> = samples
            .iter()
            .enumerate()
            .filter_map(|(i, sample)| {
                let source = i as isize + shift;
                let heading = if (0..=last).contains(&source) {
                    samples[source as usize].heading
                } else {
                    match self.boundary {
                        BoundaryPolicy::RepeatEdge => {
                            samples[source.clamp(0, last) as usize].heading
                        }
                        BoundaryPolicy::KeepOriginal => sample.heading,
                        BoundaryPolicy::Drop => return None,
                    }
                };
                Some(TrackSample { heading, ..*sample })
            })
            .collect();

        log::debug!(
            "Aligned {} of {} samples (shift {:+}, boundary {:?})",
            aligned.len(),
            n,
            self.shift,
            self.boundary
        );

        aligned
    }
}

/// Align with the default one-sample forward shift
pub fn align_headings(samples: &[TrackSample]) -> Vec<TrackSample> {
    HeadingAligner::default().align(samples)
}
