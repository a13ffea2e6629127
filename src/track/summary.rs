use rolling_stats::Stats;
use serde::Serialize;

use crate::track::TrackSample;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Range {
    pub min: f64,
    pub max: f64,
}

impl Range {
    fn of(values: impl Iterator<Item = f64>) -> Option<Self> {
        values.fold(None, |acc, v| match acc {
            None => Some(Range { min: v, max: v }),
            Some(r) => Some(Range {
                min: r.min.min(v),
                max: r.max.max(v),
            }),
        })
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct StatsSummary {
    pub count: usize,
    pub mean: f64,
    pub std_dev: f64,
    pub min: f64,
    pub max: f64,
}

impl StatsSummary {
    fn from_stats(stats: &Stats<f64>) -> Option<Self> {
        if stats.count == 0 {
            return None;
        }
        Some(Self {
            count: stats.count,
            mean: stats.mean,
            std_dev: stats.std_dev,
            min: stats.min,
            max: stats.max,
        })
    }
}

/// Overview of a loaded track, computed over the headings as recorded
#[derive(Debug, Clone, Serialize)]
pub struct TrackSummary {
    pub points: usize,
    pub latitude: Range,
    pub longitude: Range,
    pub heading: StatsSummary,
    /// Mean direction accounting for wrap-around at north, degrees in [0, 360)
    pub heading_circular_mean: Option<f64>,
}

impl TrackSummary {
    pub fn from_samples(samples: &[TrackSample]) -> Option<Self> {
        let latitude = Range::of(samples.iter().map(|s| s.position.latitude))?;
        let longitude = Range::of(samples.iter().map(|s| s.position.longitude))?;

        let mut heading_stats: Stats<f64> = Stats::new();
        for sample in samples {
            heading_stats.update(sample.heading);
        }

        Some(Self {
            points: samples.len(),
            latitude,
            longitude,
            heading: StatsSummary::from_stats(&heading_stats)?,
            heading_circular_mean: circular_mean_degrees(samples.iter().map(|s| s.heading)),
        })
    }
}

/// Mean of angles in degrees, `None` when the directions cancel out
pub fn circular_mean_degrees(angles: impl Iterator<Item = f64>) -> Option<f64> {
    let (sin_sum, cos_sum) = angles.fold((0.0, 0.0), |(s, c), a| {
        let r = a.to_radians();
        (s + r.sin(), c + r.cos())
    });
    if sin_sum.hypot(cos_sum) < 1e-9 {
        return None;
    }
    Some(sin_sum.atan2(cos_sum).to_degrees().rem_euclid(360.0))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::track::Position;
    use approx::assert_abs_diff_eq;

    fn sample(i: usize, lat: f64, lon: f64, heading: f64) -> TrackSample {
        TrackSample::new(i, Position::new(lat, lon), heading)
    }

    #[test]
    fn test_summary_ranges() {
        let samples = vec![
            sample(0, 45.10, -122.30, 10.0),
            sample(1, 45.12, -122.35, 350.0),
            sample(2, 45.11, -122.31, 20.0),
        ];
        let summary = TrackSummary::from_samples(&samples).unwrap();

        assert_eq!(summary.points, 3);
        assert_abs_diff_eq!(summary.latitude.min, 45.10);
        assert_abs_diff_eq!(summary.latitude.max, 45.12);
        assert_abs_diff_eq!(summary.longitude.min, -122.35);
        assert_abs_diff_eq!(summary.longitude.max, -122.30);
        assert_abs_diff_eq!(summary.heading.min, 10.0);
        assert_abs_diff_eq!(summary.heading.max, 350.0);
        assert_eq!(summary.heading.count, 3);
    }

    #[test]
    fn test_summary_empty() {
        assert!(TrackSummary::from_samples(&[]).is_none());
    }

    #[test]
    fn test_circular_mean_wraps_north() {
        let mean = circular_mean_degrees([350.0, 10.0].into_iter()).unwrap();
        assert!(mean < 1e-9 || (360.0 - mean) < 1e-9, "mean was {}", mean);

        let mean = circular_mean_degrees([80.0, 100.0].into_iter()).unwrap();
        assert_abs_diff_eq!(mean, 90.0, epsilon = 1e-9);
    }

    #[test]
    fn test_circular_mean_opposite_directions() {
        assert!(circular_mean_degrees([0.0, 180.0].into_iter()).is_none());
    }
}
