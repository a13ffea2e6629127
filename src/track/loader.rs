//! CSV track file loading.
//!
//! Track files carry one sample per row with a header naming the columns.
//! The latitude, longitude and heading columns are found by substring match
//! on the lower-cased header (see [`ColumnScheme`]) unless named explicitly
//! in [`ColumnConfig`]. Any other column (altitude, timestamps, ...) is
//! ignored.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use csv::{ReaderBuilder, StringRecord, Trim};

use crate::config::{ColumnConfig, ColumnScheme};
use crate::error::{Result, TrackError};
use crate::track::{Position, TrackSample};

/// Indices of the columns a track is built from
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnMap {
    pub latitude: usize,
    pub longitude: usize,
    pub heading: usize,
    headers: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Role {
    Latitude,
    Longitude,
    Heading,
}

impl Role {
    fn name(self) -> &'static str {
        match self {
            Role::Latitude => "latitude",
            Role::Longitude => "longitude",
            Role::Heading => "heading",
        }
    }
}

fn classify(scheme: ColumnScheme, header: &str) -> Option<Role> {
    let h = header.trim().to_lowercase();
    match scheme {
        ColumnScheme::Course => {
            if h.contains("latitude") {
                Some(Role::Latitude)
            } else if h.contains("longitude") || h.contains("long") {
                Some(Role::Longitude)
            } else if h.contains("course") {
                Some(Role::Heading)
            } else {
                None
            }
        }
        ColumnScheme::Heading => {
            if h.contains("lat") {
                Some(Role::Latitude)
            } else if h.contains("lon") || h.contains("long") {
                Some(Role::Longitude)
            } else if h.contains("head") {
                Some(Role::Heading)
            } else {
                None
            }
        }
    }
}

fn find_named(headers: &[String], name: &str) -> Option<usize> {
    let wanted = name.trim();
    headers
        .iter()
        .position(|h| h.trim().eq_ignore_ascii_case(wanted))
}

impl ColumnMap {
    /// Resolve column roles against a header row
    ///
    /// When several headers match the same role the last one wins.
    pub fn detect(headers: &[String], config: &ColumnConfig) -> Result<Self> {
        let mut latitude = None;
        let mut longitude = None;
        let mut heading = None;

        for (i, header) in headers.iter().enumerate() {
            match classify(config.scheme, header) {
                Some(Role::Latitude) => latitude = Some(i),
                Some(Role::Longitude) => longitude = Some(i),
                Some(Role::Heading) => heading = Some(i),
                None => {}
            }
        }

        let overrides = [
            (&config.latitude, &mut latitude),
            (&config.longitude, &mut longitude),
            (&config.heading, &mut heading),
        ];
        for (name, slot) in overrides {
            if let Some(name) = name {
                *slot = find_named(headers, name);
            }
        }

        match (latitude, longitude, heading) {
            (Some(latitude), Some(longitude), Some(heading)) => Ok(Self {
                latitude,
                longitude,
                heading,
                headers: headers.to_vec(),
            }),
            _ => {
                let missing = [
                    (Role::Latitude, latitude),
                    (Role::Longitude, longitude),
                    (Role::Heading, heading),
                ]
                .iter()
                .filter(|(_, idx)| idx.is_none())
                .map(|(role, _)| role.name())
                .collect();
                Err(TrackError::MissingColumns {
                    missing,
                    available: headers.to_vec(),
                })
            }
        }
    }

    pub fn latitude_name(&self) -> &str {
        &self.headers[self.latitude]
    }

    pub fn longitude_name(&self) -> &str {
        &self.headers[self.longitude]
    }

    pub fn heading_name(&self) -> &str {
        &self.headers[self.heading]
    }

    fn parse_sample(&self, index: usize, record: &StringRecord) -> Result<TrackSample> {
        let line = record
            .position()
            .map(|p| p.line())
            .unwrap_or(index as u64 + 2);
        let field = |col: usize| -> Result<f64> {
            let raw = record.get(col).unwrap_or("");
            match raw.parse::<f64>() {
                Ok(v) if v.is_finite() => Ok(v),
                _ => Err(TrackError::InvalidValue {
                    line,
                    column: self.headers[col].clone(),
                    value: raw.to_string(),
                }),
            }
        };

        let position = Position::new(field(self.latitude)?, field(self.longitude)?);
        Ok(TrackSample::new(index, position, field(self.heading)?))
    }
}

/// Read a track from any CSV source
pub fn read_track<R: Read>(reader: R, config: &ColumnConfig) -> Result<Vec<TrackSample>> {
    let mut csv_reader = ReaderBuilder::new()
        .has_headers(true)
        .trim(Trim::All)
        .from_reader(reader);

    let headers: Vec<String> = csv_reader.headers()?.iter().map(str::to_string).collect();
    log::debug!("Columns: {:?}", headers);

    let columns = ColumnMap::detect(&headers, config)?;
    log::info!(
        "Using columns latitude={:?} longitude={:?} heading={:?}",
        columns.latitude_name(),
        columns.longitude_name(),
        columns.heading_name()
    );

    let mut samples = Vec::new();
    for (index, record) in csv_reader.records().enumerate() {
        let record = record?;
        samples.push(columns.parse_sample(index, &record)?);
    }

    log::info!("Loaded {} GPS points", samples.len());
    Ok(samples)
}

/// Load a track from a CSV file
pub fn load_track<P: AsRef<Path>>(path: P, config: &ColumnConfig) -> Result<Vec<TrackSample>> {
    let path = path.as_ref();
    log::debug!("Opening track file {}", path.display());
    let file = File::open(path)?;
    read_track(file, config)
}
