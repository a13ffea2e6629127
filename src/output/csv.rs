use super::{AlignedRow, Formatter};

pub struct CsvFormatter;

impl Formatter for CsvFormatter {
    fn format(&self, row: &AlignedRow) -> String {
        format!(
            "{},{:.7},{:.7},{:.2},{:.2},{:.9},{:.9}",
            row.index,
            row.latitude,
            row.longitude,
            row.heading,
            row.recorded_heading,
            row.end_latitude,
            row.end_longitude
        )
    }

    fn header(&self) -> Option<&'static str> {
        Some("index,latitude,longitude,heading,recorded_heading,end_latitude,end_longitude")
    }
}
