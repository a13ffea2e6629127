mod test_tracks;

use approx::assert_abs_diff_eq;
use trackviz::config::{AlignConfig, BoundaryPolicy};
use trackviz::whisker::whisker_end;
use trackviz::{HeadingAligner, TrackSample, align_headings};

const POLICIES: [BoundaryPolicy; 3] = [
    BoundaryPolicy::RepeatEdge,
    BoundaryPolicy::Drop,
    BoundaryPolicy::KeepOriginal,
];

fn aligner(shift: i32, boundary: BoundaryPolicy) -> HeadingAligner {
    HeadingAligner::new(&AlignConfig { shift, boundary })
}

fn headings(samples: &[TrackSample]) -> Vec<f64> {
    samples.iter().map(|s| s.heading).collect()
}

#[test]
fn test_each_position_takes_next_heading() {
    for n in 2..40 {
        let input: Vec<f64> = (0..n).map(|i| (i as f64 * 37.0) % 360.0).collect();
        let track = test_tracks::track_from_headings(&input);

        for policy in POLICIES {
            let out = aligner(1, policy).align(&track);
            for i in 0..n - 1 {
                assert_eq!(
                    out[i].heading,
                    track[i + 1].heading,
                    "n={} i={} policy={:?}",
                    n,
                    i,
                    policy
                );
            }
        }
    }
}

#[test]
fn test_short_tracks_are_unchanged() {
    let empty: Vec<TrackSample> = Vec::new();
    let single = test_tracks::track_from_headings(&[123.0]);

    for policy in POLICIES {
        for shift in [-2, -1, 1, 2] {
            assert!(aligner(shift, policy).align(&empty).is_empty());
            assert_eq!(aligner(shift, policy).align(&single), single);
        }
    }
}

#[test]
fn test_last_sample_boundary_policies() {
    let track = test_tracks::track_from_headings(&[10.0, 20.0, 30.0, 40.0, 50.0]);

    let out = aligner(1, BoundaryPolicy::RepeatEdge).align(&track);
    assert_eq!(out.len(), 5);
    assert_eq!(out[4].heading, 50.0);

    let out = aligner(1, BoundaryPolicy::KeepOriginal).align(&track);
    assert_eq!(out.len(), 5);
    assert_eq!(out[4].heading, track[4].heading);

    let out = aligner(1, BoundaryPolicy::Drop).align(&track);
    assert_eq!(out.len(), 4);
    assert_eq!(out.last().unwrap().sequence_index, 3);
}

#[test]
fn test_positions_never_change() {
    let track = test_tracks::circular_track(50, 0.001);
    for policy in [BoundaryPolicy::RepeatEdge, BoundaryPolicy::KeepOriginal] {
        for shift in [-3, -1, 0, 1, 3] {
            let out = aligner(shift, policy).align(&track);
            assert_eq!(out.len(), track.len());
            for (a, b) in track.iter().zip(&out) {
                assert_eq!(a.position, b.position);
                assert_eq!(a.sequence_index, b.sequence_index);
            }
        }
    }

    // Dropped samples leave the survivors untouched and in order
    let out = aligner(3, BoundaryPolicy::Drop).align(&track);
    assert_eq!(out.len(), track.len() - 3);
    for s in &out {
        assert_eq!(s.position, track[s.sequence_index].position);
    }
}

#[test]
fn test_three_point_scenario() {
    let track = test_tracks::track_from_headings(&[0.0, 45.0, 90.0]);
    let out = align_headings(&track);
    assert_eq!(headings(&out), vec![45.0, 90.0, 90.0]);
    assert_eq!(out[0].position, track[0].position);
    assert_eq!(out[2].position, track[2].position);
}

#[test]
fn test_alignment_is_not_idempotent() {
    let track = test_tracks::track_from_headings(&[10.0, 20.0, 30.0, 40.0]);
    let once = align_headings(&track);
    let twice = align_headings(&once);

    assert_ne!(headings(&once), headings(&twice));
    assert_eq!(headings(&twice), vec![30.0, 40.0, 40.0, 40.0]);

    // Two single shifts equal one shift of two
    let shifted_by_two = aligner(2, BoundaryPolicy::RepeatEdge).align(&track);
    assert_eq!(headings(&twice), headings(&shifted_by_two));
}

#[test]
fn test_aligned_whiskers_point_at_next_point() {
    let track = test_tracks::circular_track(72, 0.0005);
    let aligned = align_headings(&track);

    for i in 0..track.len() - 1 {
        let here = track[i].position;
        let next = track[i + 1].position;
        let segment = (next.latitude - here.latitude).hypot(next.longitude - here.longitude);

        let end = whisker_end(here, aligned[i].heading, segment);
        assert_abs_diff_eq!(end.latitude, next.latitude, epsilon = 1e-12);
        assert_abs_diff_eq!(end.longitude, next.longitude, epsilon = 1e-12);
    }
}

#[test]
fn test_recorded_whiskers_lag_one_step() {
    let points = 72;
    let track = test_tracks::circular_track(points, 0.0005);
    let step = 360.0 / points as f64;

    for i in 1..points - 1 {
        let outgoing = test_tracks::bearing(track[i].position, track[i + 1].position);
        let lag = (outgoing - track[i].heading).rem_euclid(360.0);
        assert_abs_diff_eq!(lag, step, epsilon = 1e-6);
    }
}
