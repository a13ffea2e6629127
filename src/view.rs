use crate::align::HeadingAligner;
use crate::config::{AlignConfig, TrackVizConfig};
use crate::error::Result;
use crate::histogram::HeadingHistogram;
use crate::track::{TrackSample, TrackSummary};
use crate::whisker::{Whisker, whiskers};

/// Everything needed to draw one track
///
/// Holds the recording unchanged and derives the aligned track and its
/// whiskers from it, so re-aligning with different settings never compounds
/// an earlier shift.
pub struct TrackView {
    recorded: Vec<TrackSample>,
    aligned: Vec<TrackSample>,
    aligner: HeadingAligner,
    whisker_length: f64,
    summary: Option<TrackSummary>,
    histogram: HeadingHistogram,
}

impl TrackView {
    pub fn new(recorded: Vec<TrackSample>, config: &TrackVizConfig) -> Result<Self> {
        let aligner = HeadingAligner::new(&config.align);
        let aligned = aligner.align(&recorded);
        let summary = TrackSummary::from_samples(&recorded);
        let headings: Vec<f64> = recorded.iter().map(|s| s.heading).collect();
        let histogram = HeadingHistogram::new(&headings, config.plot.histogram_bins)?;

        Ok(Self {
            recorded,
            aligned,
            aligner,
            whisker_length: config.plot.whisker_length_deg,
            summary,
            histogram,
        })
    }

    /// Recompute the aligned track from the recording
    pub fn realign(&mut self, config: &AlignConfig) {
        self.aligner = HeadingAligner::new(config);
        self.aligned = self.aligner.align(&self.recorded);
    }

    pub fn set_whisker_length(&mut self, length: f64) {
        self.whisker_length = length;
    }

    pub fn recorded(&self) -> &[TrackSample] {
        &self.recorded
    }

    pub fn aligned(&self) -> &[TrackSample] {
        &self.aligned
    }

    pub fn aligner(&self) -> &HeadingAligner {
        &self.aligner
    }

    pub fn summary(&self) -> Option<&TrackSummary> {
        self.summary.as_ref()
    }

    pub fn histogram(&self) -> &HeadingHistogram {
        &self.histogram
    }

    pub fn aligned_whiskers(&self) -> Vec<Whisker> {
        whiskers(&self.aligned, self.whisker_length)
    }

    pub fn recorded_whiskers(&self) -> Vec<Whisker> {
        whiskers(&self.recorded, self.whisker_length)
    }
}
