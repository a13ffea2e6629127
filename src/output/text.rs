use super::{AlignedRow, Formatter};

pub struct TextFormatter {
    verbose: bool,
}

impl TextFormatter {
    pub fn new(verbose: bool) -> Self {
        Self { verbose }
    }
}

impl Formatter for TextFormatter {
    fn format(&self, row: &AlignedRow) -> String {
        if self.verbose {
            format!(
                "#{:<6} {:>12.7}, {:>12.7}  heading: {:>5.1}° (recorded: {:>5.1}°, Δ {:>+6.1}°)",
                row.index,
                row.latitude,
                row.longitude,
                row.heading,
                row.recorded_heading,
                heading_delta(row.recorded_heading, row.heading)
            )
        } else {
            format!(
                "#{:<6} {:>12.7}, {:>12.7}  heading: {:>5.1}°",
                row.index, row.latitude, row.longitude, row.heading
            )
        }
    }
}

/// Signed turn from `from` to `to` in degrees, wrapped to [-180, 180)
fn heading_delta(from: f64, to: f64) -> f64 {
    (to - from + 180.0).rem_euclid(360.0) - 180.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_heading_delta_wraps() {
        assert!((heading_delta(350.0, 10.0) - 20.0).abs() < 1e-9);
        assert!((heading_delta(10.0, 350.0) + 20.0).abs() < 1e-9);
        assert!((heading_delta(90.0, 90.0)).abs() < 1e-9);
    }
}
