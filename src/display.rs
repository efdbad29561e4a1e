//! # Tabular display for illuminance series
//!
//! Borrowing renderers that print a slice of [`IlluminanceSample`] as a table.
//!
//! ## Overview
//!
//! The entry point is the display adaptor [`SeriesDisplay`], built through
//! [`SeriesDisplayExt`]. It renders with `{}` and never clones the samples.
//!
//! Two layouts are available, both drawn with `comfy-table`:
//!
//! - **Compact**:
//!   `Local time | Sun alt (°) | Moon alt (°) | Phase (°) | Illum. (%) | Twilight (lx) | E_surface (mlx)`
//! - **Full**: every field of the sample, in the column order of the CSV-like report
//!   (Sun longitude, altitude, azimuth and distance, Moon longitude, latitude, altitude,
//!   azimuth, distance, phase and illumination, then the four illuminance terms).
//!
//! ## Quick examples
//!
//! ```rust,ignore
//! use nightlux::display::SeriesDisplayExt;
//!
//! println!("{}", samples.show());
//! println!("{}", samples.table_full());
//! ```

use std::fmt;

use comfy_table::{presets::UTF8_FULL, Cell, CellAlignment, ContentArrangement, Row, Table};

use crate::series::IlluminanceSample;

enum TableMode {
    Compact,
    Full,
}

/// Display adaptor rendering a borrowed series as a table.
pub struct SeriesDisplay<'a> {
    samples: &'a [IlluminanceSample],
    mode: TableMode,
    /// Header line above the table, if any
    title: Option<String>,
    /// Fixed table width; the terminal width is used when unset
    max_width: Option<u16>,
}

impl<'a> SeriesDisplay<'a> {
    /// Build a new adaptor in **compact** mode.
    pub fn new(samples: &'a [IlluminanceSample]) -> Self {
        SeriesDisplay {
            samples,
            mode: TableMode::Compact,
            title: None,
            max_width: None,
        }
    }

    /// Switch between the **full** and the **compact** layout.
    ///
    /// Arguments
    /// -----------------
    /// * `yes` – If `true`, selects the full layout; otherwise resets to compact.
    pub fn full(mut self, yes: bool) -> Self {
        self.mode = if yes {
            TableMode::Full
        } else {
            TableMode::Compact
        };
        self
    }

    /// Print `title` on its own line above the table.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Wrap cells to fit `width` columns instead of the detected terminal width.
    pub fn with_max_width(mut self, width: u16) -> Self {
        self.max_width = Some(width);
        self
    }

    fn new_table(&self, header: &[&str]) -> Table {
        let mut table = Table::new();
        table
            .load_preset(UTF8_FULL)
            .set_content_arrangement(ContentArrangement::Dynamic);
        if let Some(width) = self.max_width {
            table.set_width(width);
        }
        table.set_header(header.iter().map(|h| Cell::new(h)).collect::<Vec<_>>());
        table
    }

    fn right(value: f64, decimals: usize) -> Cell {
        Cell::new(format!("{value:.decimals$}")).set_alignment(CellAlignment::Right)
    }

    fn render_compact(&self) -> String {
        let mut table = self.new_table(&[
            "Local time",
            "Sun alt (°)",
            "Moon alt (°)",
            "Phase (°)",
            "Illum. (%)",
            "Twilight (lx)",
            "E_surface (mlx)",
        ]);

        for s in self.samples {
            table.add_row(Row::from(vec![
                Cell::new(&s.local_time),
                Self::right(s.sun_altitude, 2),
                Self::right(s.moon_altitude, 2),
                Self::right(s.moon_phase_angle, 2),
                Self::right(s.moon_illumination, 2),
                Self::right(s.sun_twilight, 2),
                Self::right(s.surface, 2),
            ]));
        }

        table.to_string()
    }

    fn render_full(&self) -> String {
        let mut table = self.new_table(&[
            "Local time",
            "Sun λ (°)",
            "Sun alt (°)",
            "Sun az (°)",
            "Sun dist (AU)",
            "Moon λ (°)",
            "Moon β (°)",
            "Moon alt (°)",
            "Moon az (°)",
            "Moon dist (km)",
            "Phase (°)",
            "Illum. (%)",
            "R_light sun (lx)",
            "R_light moon (mlx)",
            "Twilight (lx)",
            "E_surface (mlx)",
        ]);

        for s in self.samples {
            table.add_row(Row::from(vec![
                Cell::new(&s.local_time),
                Self::right(s.sun_longitude, 2),
                Self::right(s.sun_altitude, 2),
                Self::right(s.sun_azimuth, 2),
                Self::right(s.sun_distance, 6),
                Self::right(s.moon_longitude, 2),
                Self::right(s.moon_latitude, 2),
                Self::right(s.moon_altitude, 2),
                Self::right(s.moon_azimuth, 2),
                Self::right(s.moon_distance, 2),
                Self::right(s.moon_phase_angle, 2),
                Self::right(s.moon_illumination, 2),
                Self::right(s.sun_reflected, 2),
                Self::right(s.moon_reflected, 2),
                Self::right(s.sun_twilight, 2),
                Self::right(s.surface, 2),
            ]));
        }

        table.to_string()
    }
}

/// Builders for [`SeriesDisplay`] on a slice of samples.
pub trait SeriesDisplayExt {
    /// Compact table.
    fn show(&self) -> SeriesDisplay<'_>;

    /// Table with every field of the samples.
    fn table_full(&self) -> SeriesDisplay<'_> {
        self.show().full(true)
    }
}

impl SeriesDisplayExt for [IlluminanceSample] {
    fn show(&self) -> SeriesDisplay<'_> {
        SeriesDisplay::new(self)
    }
}

impl fmt::Display for SeriesDisplay<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(title) = &self.title {
            writeln!(f, "{title}")?;
        }
        writeln!(f, "Illuminance series (n={})", self.samples.len())?;

        let out = match self.mode {
            TableMode::Compact => self.render_compact(),
            TableMode::Full => self.render_full(),
        };
        f.write_str(&out)
    }
}

#[cfg(test)]
mod display_test {
    use super::*;
    use crate::time::Instant;

    fn sample(local_time: &str, surface: f64) -> IlluminanceSample {
        IlluminanceSample {
            local_time: local_time.to_string(),
            utc: Instant::new(2024, 10, 18, 12, 0, 0),
            sun_longitude: 205.12,
            sun_altitude: -35.5,
            sun_azimuth: 290.01,
            sun_distance: 0.996011,
            moon_longitude: 36.78,
            moon_latitude: -1.02,
            moon_altitude: 41.3,
            moon_azimuth: 110.25,
            moon_distance: 363_123.45,
            moon_phase_angle: 12.34,
            moon_illumination: 98.84,
            sun_reflected: 0.0,
            moon_reflected: 12.5,
            sun_twilight: 0.0,
            surface,
        }
    }

    #[test]
    fn test_compact_table() {
        let samples = vec![sample("2024-10-18 21:00", 12.5), sample("2024-10-18 21:10", 13.75)];
        let out = samples.show().with_max_width(400).to_string();

        assert!(out.starts_with("Illuminance series (n=2)"));
        assert!(out.contains("Local time"));
        assert!(out.contains("E_surface (mlx)"));
        assert!(out.contains("2024-10-18 21:10"));
        assert!(out.contains("13.75"));
        assert!(!out.contains("Moon dist (km)"));
    }

    #[test]
    fn test_full_table() {
        let samples = vec![sample("2024-10-18 21:00", 12.5)];
        let out = samples
            .table_full()
            .with_title("Seoul")
            .with_max_width(400)
            .to_string();

        assert!(out.starts_with("Seoul\n"));
        assert!(out.contains("Moon dist (km)"));
        assert!(out.contains("363123.45"));
        assert!(out.contains("0.996011"));
    }
}
