mod csv;
mod json;
mod text;

use serde::Serialize;

use crate::track::{TrackSample, TrackSummary};
use crate::whisker::whisker_end;

pub use self::csv::CsvFormatter;
pub use self::json::JsonFormatter;
pub use self::text::TextFormatter;

#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
    Csv,
}

/// One aligned track point alongside the heading recorded there
#[derive(Debug, Clone, Serialize)]
pub struct AlignedRow {
    pub index: usize,
    pub latitude: f64,
    pub longitude: f64,
    pub heading: f64,
    pub recorded_heading: f64,
    /// Tip of the heading whisker drawn from this point
    pub end_latitude: f64,
    pub end_longitude: f64,
}

impl AlignedRow {
    /// Pair aligned samples back up with the recording they came from
    pub fn pair(
        recorded: &[TrackSample],
        aligned: &[TrackSample],
        whisker_length: f64,
    ) -> Vec<Self> {
        aligned
            .iter()
            .map(|a| {
                let recorded_heading = recorded
                    .get(a.sequence_index)
                    .filter(|r| r.sequence_index == a.sequence_index)
                    .or_else(|| recorded.iter().find(|r| r.sequence_index == a.sequence_index))
                    .map_or(a.heading, |r| r.heading);
                let end = whisker_end(a.position, a.heading, whisker_length);
                Self {
                    index: a.sequence_index,
                    latitude: a.position.latitude,
                    longitude: a.position.longitude,
                    heading: a.heading,
                    recorded_heading,
                    end_latitude: end.latitude,
                    end_longitude: end.longitude,
                }
            })
            .collect()
    }
}

pub trait Formatter {
    fn format(&self, row: &AlignedRow) -> String;

    fn header(&self) -> Option<&'static str> {
        None
    }

    fn summary(&self, summary: &TrackSummary) -> String {
        summary_text(summary)
    }
}

pub fn summary_text(summary: &TrackSummary) -> String {
    let mean = summary
        .heading_circular_mean
        .map_or("-".to_string(), |m| format!("{:.1}°", m));
    format!(
        "Loaded {} GPS points\n\
         \n\
         Track Statistics:\n\
         Latitude range: {:.6} to {:.6}\n\
         Longitude range: {:.6} to {:.6}\n\
         Heading range: {:.1}° to {:.1}°\n\
         Heading std dev: {:.1}°\n\
         Mean heading: {}",
        summary.points,
        summary.latitude.min,
        summary.latitude.max,
        summary.longitude.min,
        summary.longitude.max,
        summary.heading.min,
        summary.heading.max,
        summary.heading.std_dev,
        mean
    )
}

pub fn create_formatter(format: OutputFormat, verbose: bool) -> Box<dyn Formatter> {
    match format {
        OutputFormat::Text => Box::new(TextFormatter::new(verbose)),
        OutputFormat::Json => Box::new(JsonFormatter),
        OutputFormat::Csv => Box::new(CsvFormatter),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::track::Position;

    fn row() -> AlignedRow {
        AlignedRow {
            index: 7,
            latitude: 45.1234567,
            longitude: -122.7654321,
            heading: 92.3,
            recorded_heading: 88.5,
            end_latitude: 45.25,
            end_longitude: -122.5,
        }
    }

    #[test]
    fn test_pair_keeps_recorded_heading() {
        let recorded = vec![
            TrackSample::new(0, Position::new(1.0, 2.0), 10.0),
            TrackSample::new(1, Position::new(1.5, 2.5), 20.0),
        ];
        let aligned = vec![
            TrackSample::new(0, Position::new(1.0, 2.0), 20.0),
            TrackSample::new(1, Position::new(1.5, 2.5), 20.0),
        ];
        let rows = AlignedRow::pair(&recorded, &aligned, 0.001);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].heading, 20.0);
        assert_eq!(rows[0].recorded_heading, 10.0);
        assert_eq!(rows[1].index, 1);
    }

    #[test]
    fn test_pair_whisker_end_follows_length() {
        let track = vec![TrackSample::new(0, Position::new(1.0, 2.0), 90.0)];

        let short = AlignedRow::pair(&track, &track, 0.001);
        let long = AlignedRow::pair(&track, &track, 0.5);

        assert!((short[0].end_longitude - 2.001).abs() < 1e-12);
        assert!((long[0].end_longitude - 2.5).abs() < 1e-12);
        assert!((long[0].end_latitude - 1.0).abs() < 1e-12);

        let f = create_formatter(OutputFormat::Csv, false);
        assert_ne!(f.format(&short[0]), f.format(&long[0]));
    }

    fn summary() -> TrackSummary {
        let track = vec![
            TrackSample::new(0, Position::new(45.0, -122.0), 0.0),
            TrackSample::new(1, Position::new(45.1, -122.1), 90.0),
            TrackSample::new(2, Position::new(45.2, -122.2), 180.0),
        ];
        TrackSummary::from_samples(&track).unwrap()
    }

    #[test]
    fn test_text_summary_shows_spread() {
        let s = summary();
        let text = create_formatter(OutputFormat::Text, false).summary(&s);
        assert!(text.starts_with("Loaded 3 GPS points"));
        assert!(text.contains("Heading range: 0.0° to 180.0°"));
        assert!(text.contains(&format!("Heading std dev: {:.1}°", s.heading.std_dev)));
        assert!(text.contains("Mean heading: 90.0°"));
    }

    #[test]
    fn test_json_summary() {
        let f = create_formatter(OutputFormat::Json, false);
        let value: serde_json::Value = serde_json::from_str(&f.summary(&summary())).unwrap();
        assert_eq!(value["points"], 3);
        assert_eq!(value["heading"]["count"], 3);
        assert_eq!(value["heading"]["mean"], 90.0);
        assert!(value["heading"]["std_dev"].as_f64().unwrap() > 0.0);
        assert_eq!(value["latitude"]["min"], 45.0);
    }

    #[test]
    fn test_csv_format() {
        let f = create_formatter(OutputFormat::Csv, false);
        assert_eq!(
            f.header(),
            Some("index,latitude,longitude,heading,recorded_heading,end_latitude,end_longitude")
        );
        assert_eq!(
            f.format(&row()),
            "7,45.1234567,-122.7654321,92.30,88.50,45.250000000,-122.500000000"
        );
    }

    #[test]
    fn test_json_format() {
        let f = create_formatter(OutputFormat::Json, false);
        assert!(f.header().is_none());
        let value: serde_json::Value = serde_json::from_str(&f.format(&row())).unwrap();
        assert_eq!(value["index"], 7);
        assert_eq!(value["heading"], 92.3);
        assert_eq!(value["recorded_heading"], 88.5);
        assert_eq!(value["end_longitude"], -122.5);
    }

    #[test]
    fn test_text_format() {
        let plain = create_formatter(OutputFormat::Text, false).format(&row());
        assert!(plain.contains(" 92.3°"));
        assert!(!plain.contains("recorded"));

        let verbose = create_formatter(OutputFormat::Text, true).format(&row());
        assert!(verbose.contains("recorded:  88.5"));
    }
}
