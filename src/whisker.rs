use crate::track::{Position, TrackSample};

/// Heading indicator drawn from a track point
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Whisker {
    pub start: Position,
    pub end: Position,
}

/// End point of a whisker of `length` degrees leaving `start` on `heading`
///
/// Headings are navigation angles (0° north, clockwise). Lat/lon are treated
/// as a flat plane, which is accurate enough at whisker scale.
pub fn whisker_end(start: Position, heading: f64, length: f64) -> Position {
    let theta = (90.0 - heading).to_radians();
    Position::new(
        start.latitude + length * theta.sin(),
        start.longitude + length * theta.cos(),
    )
}

pub fn whiskers(samples: &[TrackSample], length: f64) -> Vec<Whisker> {
    samples
        .iter()
        .map(|s| Whisker {
            start: s.position,
            end: whisker_end(s.position, s.heading, length),
        })
        .collect()
}
