//! Configuration for trackviz.
//!
//! All sections implement `Default`, and every field may be overridden from a
//! TOML file. Missing keys keep their defaults:
//!
//! ```toml
//! [align]
//! shift = 1
//! boundary = "repeat-edge"
//!
//! [columns]
//! scheme = "heading"
//! heading = "Course Over Ground"
//!
//! [plot]
//! whisker_length_deg = 0.00001
//! ```

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use serde::Deserialize;

use crate::error::{Result, TrackError};

/// Approximate length of one degree of latitude in metres.
pub const METRES_PER_DEGREE: f64 = 111_320.0;

/// Whisker length specification
///
/// Stored in degrees, since whiskers are drawn in lat/lon space.
/// Can be given in metres when the scale of the track is easier to reason
/// about on the ground.
///
/// # Parsing formats
/// - `0.000005` - degrees (no suffix)
/// - `0.000005deg` - degrees (explicit)
/// - `0.5m` - metres, converted with [`METRES_PER_DEGREE`]
///
/// # Example
/// ```
/// use trackviz::config::WhiskerLength;
///
/// let len: WhiskerLength = "1.1132m".parse().unwrap();
/// assert!((len.as_degrees() - 0.00001).abs() < 1e-12);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WhiskerLength(f64);

impl WhiskerLength {
    pub fn from_degrees(deg: f64) -> Self {
        Self(deg)
    }

    pub fn from_metres(m: f64) -> Self {
        Self(m / METRES_PER_DEGREE)
    }

    pub fn as_degrees(&self) -> f64 {
        self.0
    }
}

impl Default for WhiskerLength {
    fn default() -> Self {
        Self::from_degrees(0.000005)
    }
}

impl fmt::Display for WhiskerLength {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}deg", self.0)
    }
}

impl FromStr for WhiskerLength {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let s = s.trim();

        if let Some(num) = s.strip_suffix("deg") {
            let deg: f64 = num
                .trim()
                .parse()
                .map_err(|_| format!("invalid length: {}", s))?;
            if !(deg > 0.0 && deg.is_finite()) {
                return Err("length must be positive".to_string());
            }
            return Ok(Self::from_degrees(deg));
        }

        let (num, metres) = match s.strip_suffix('m') {
            Some(num) => (num, true),
            None => (s, false),
        };

        let value: f64 = num
            .trim()
            .parse()
            .map_err(|_| format!("invalid length: {}", s))?;
        if !(value > 0.0 && value.is_finite()) {
            return Err("length must be positive".to_string());
        }
        Ok(if metres {
            Self::from_metres(value)
        } else {
            Self::from_degrees(value)
        })
    }
}

/// What to do with positions that have no heading to shift in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum BoundaryPolicy {
    /// Reuse the nearest heading that exists (the last one for a forward shift)
    #[default]
    RepeatEdge,
    /// Leave those positions out of the aligned track
    Drop,
    /// Keep the heading recorded at that position
    KeepOriginal,
}

/// Column naming convention used to detect track file columns
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum ColumnScheme {
    /// `latitude`, `longitude`/`long`, `course`
    #[default]
    Course,
    /// `lat`, `lon`/`long`, `head`
    Heading,
}

/// System-wide configuration
///
/// # Example
/// ```
/// use trackviz::config::TrackVizConfig;
///
/// let mut config = TrackVizConfig::default();
/// config.align.shift = 2;
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct TrackVizConfig {
    /// Heading alignment
    pub align: AlignConfig,
    /// Track file column detection
    pub columns: ColumnConfig,
    /// Plot appearance
    pub plot: PlotConfig,
}

/// Heading alignment configuration
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct AlignConfig {
    /// Samples to move headings by. Positive pairs each position with a later
    /// heading, negative with an earlier one, zero leaves the track as recorded.
    pub shift: i32,
    /// Policy for positions left without a heading by the shift
    pub boundary: BoundaryPolicy,
}

impl Default for AlignConfig {
    fn default() -> Self {
        Self {
            // Recorded heading at i describes the segment arriving at i
            shift: 1,
            boundary: BoundaryPolicy::RepeatEdge,
        }
    }
}

/// Track file column configuration
///
/// Explicit names take precedence over detection through `scheme`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ColumnConfig {
    pub scheme: ColumnScheme,
    pub latitude: Option<String>,
    pub longitude: Option<String>,
    pub heading: Option<String>,
}

/// Plot configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PlotConfig {
    /// Whisker length in degrees
    pub whisker_length_deg: f64,
    /// Number of bins in the heading histogram
    pub histogram_bins: usize,
    /// Track point marker radius in screen points
    pub point_radius: f32,
}

impl Default for PlotConfig {
    fn default() -> Self {
        Self {
            whisker_length_deg: WhiskerLength::default().as_degrees(),
            histogram_bins: 36,
            point_radius: 1.5,
        }
    }
}

/// Command-line values that take precedence over the configuration file
#[derive(Debug, Clone, Copy, Default)]
pub struct ConfigOverrides {
    pub shift: Option<i32>,
    pub boundary: Option<BoundaryPolicy>,
    pub columns: Option<ColumnScheme>,
    pub whisker_length: Option<WhiskerLength>,
}

impl TrackVizConfig {
    /// Replace every setting that has an override
    pub fn apply_overrides(&mut self, overrides: &ConfigOverrides) {
        if let Some(shift) = overrides.shift {
            self.align.shift = shift;
        }
        if let Some(boundary) = overrides.boundary {
            self.align.boundary = boundary;
        }
        if let Some(scheme) = overrides.columns {
            self.columns.scheme = scheme;
        }
        if let Some(length) = overrides.whisker_length {
            self.plot.whisker_length_deg = length.as_degrees();
        }
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: Self =
            toml::from_str(content).map_err(|e| TrackError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    pub fn validate(&self) -> Result<()> {
        if !(self.plot.whisker_length_deg > 0.0 && self.plot.whisker_length_deg.is_finite()) {
            return Err(TrackError::Config(format!(
                "whisker_length_deg must be positive, got {}",
                self.plot.whisker_length_deg
            )));
        }
        if self.plot.histogram_bins == 0 {
            return Err(TrackError::Config(
                "histogram_bins must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}
