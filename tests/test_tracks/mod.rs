#![allow(dead_code)]

use std::path::PathBuf;

use trackviz::track::{Position, TrackSample};

/// Bearing of the straight segment from `from` to `to`, degrees clockwise from north
pub fn bearing(from: Position, to: Position) -> f64 {
    (to.longitude - from.longitude)
        .atan2(to.latitude - from.latitude)
        .to_degrees()
        .rem_euclid(360.0)
}

/// Clockwise lap of a circle, recorded the way the telemetry system does it:
/// the heading stored at each point is the bearing of the segment arriving
/// there.
pub fn circular_track(points: usize, radius_deg: f64) -> Vec<TrackSample> {
    let centre = Position::new(45.0, -122.0);
    let step = 360.0 / points as f64;
    let at = |i: isize| {
        let phi = (i as f64 * step).to_radians();
        Position::new(
            centre.latitude + radius_deg * phi.cos(),
            centre.longitude + radius_deg * phi.sin(),
        )
    };

    (0..points as isize)
        .map(|i| TrackSample::new(i as usize, at(i), bearing(at(i - 1), at(i))))
        .collect()
}

/// Track from bare headings, positions spread along a diagonal
pub fn track_from_headings(headings: &[f64]) -> Vec<TrackSample> {
    headings
        .iter()
        .enumerate()
        .map(|(i, &h)| {
            TrackSample::new(
                i,
                Position::new(40.0 + i as f64 * 1e-4, -105.0 - i as f64 * 2e-4),
                h,
            )
        })
        .collect()
}

pub fn to_csv(samples: &[TrackSample]) -> String {
    let mut csv = String::from("Latitude,Longitude,Altitude,Course\n");
    for s in samples {
        csv.push_str(&format!(
            "{},{},{},{}\n",
            s.position.latitude, s.position.longitude, 120.5, s.heading
        ));
    }
    csv
}

/// Write `contents` to a fresh file in the system temp directory
pub fn temp_file(name: &str, contents: &str) -> PathBuf {
    let path = std::env::temp_dir().join(format!("trackviz_{}_{}", std::process::id(), name));
    std::fs::write(&path, contents).expect("Failed to write temp track file");
    path
}
