pub mod loader;
pub mod sample;
pub mod summary;

pub use loader::{ColumnMap, load_track, read_track};
pub use sample::{Position, TrackSample};
pub use summary::{Range, StatsSummary, TrackSummary};
