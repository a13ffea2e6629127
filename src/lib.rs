pub mod align;
pub mod config;
pub mod error;
pub mod histogram;
pub mod output;
pub mod track;
pub mod view;
pub mod whisker;

pub use align::{HeadingAligner, align_headings};
pub use config::TrackVizConfig;
pub use error::{Result, TrackError};
pub use track::{Position, TrackSample, load_track};
pub use view::TrackView;
