use super::{AlignedRow, Formatter};
use crate::track::TrackSummary;

pub struct JsonFormatter;

impl Formatter for JsonFormatter {
    fn format(&self, row: &AlignedRow) -> String {
        serde_json::to_string(row).unwrap_or_default()
    }

    fn summary(&self, summary: &TrackSummary) -> String {
        serde_json::to_string_pretty(summary).unwrap_or_default()
    }
}
