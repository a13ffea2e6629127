/// Geographic position in degrees
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Position {
    pub latitude: f64,
    pub longitude: f64,
}

impl Position {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }
}

/// One recorded track observation
///
/// The recorded `heading` at index `i` is the direction observed while
/// travelling from sample `i - 1` to sample `i`, so it describes the segment
/// arriving at this position rather than the one leaving it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrackSample {
    pub position: Position,
    /// Direction of travel in degrees clockwise from north
    pub heading: f64,
    /// Zero-based position in the recording
    pub sequence_index: usize,
}

impl TrackSample {
    pub fn new(sequence_index: usize, position: Position, heading: f64) -> Self {
        Self {
            position,
            heading,
            sequence_index,
        }
    }
}
