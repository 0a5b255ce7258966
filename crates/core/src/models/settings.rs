use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::errors::CoreError;

/// An sRGB colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    pub const WHITE: Rgb = Rgb(255, 255, 255);
    pub const BLACK: Rgb = Rgb(0, 0, 0);
    pub const GRID: Rgb = Rgb(215, 215, 215);

    /// `#rrggbb`
    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.0, self.1, self.2)
    }
}

/// Pixel layout of a chart canvas.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartGeometry {
    pub width: i32,
    pub height: i32,
    /// Gap between the canvas edge and the plot area, on every side.
    pub padding: i32,
    /// Length of the axis tick marks.
    pub tick_length: i32,
    /// Number of horizontal bands on the value axis.
    pub y_divisions: u32,
    /// Line height used to offset text from the element it labels.
    pub label_height: i32,
    pub background: Rgb,
    pub grid: Rgb,
    pub foreground: Rgb,
}

impl Default for ChartGeometry {
    fn default() -> Self {
        Self {
            width: 1280,
            height: 720,
            padding: 50,
            tick_length: 5,
            y_divisions: 10,
            label_height: 15,
            background: Rgb::WHITE,
            grid: Rgb::GRID,
            foreground: Rgb::BLACK,
        }
    }
}

impl ChartGeometry {
    pub fn left(&self) -> i32 {
        self.padding
    }

    pub fn right(&self) -> i32 {
        self.width - self.padding
    }

    pub fn top(&self) -> i32 {
        self.padding
    }

    pub fn bottom(&self) -> i32 {
        self.height - self.padding
    }

    pub fn plot_width(&self) -> i32 {
        self.width - self.padding * 2
    }

    pub fn plot_height(&self) -> i32 {
        self.height - self.padding * 2
    }
}

/// Runtime configuration. Every field has a default, so a JSON file only
/// needs the keys it wants to change.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Origin of the historical-quotes service.
    pub base_url: String,

    /// Value of the `num_rows` query parameter.
    pub num_rows: u32,

    /// Where each download is written. Overwritten on every fetch.
    pub download_path: PathBuf,

    /// Per-request timeout.
    pub timeout_secs: u64,

    pub geometry: ChartGeometry,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            base_url: "https://quotes.wsj.com".to_string(),
            num_rows: 90,
            download_path: PathBuf::from("./temp.csv"),
            timeout_secs: 30,
            geometry: ChartGeometry::default(),
        }
    }
}

impl Settings {
    /// Read settings from a JSON file and validate them.
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self, CoreError> {
        let text = std::fs::read_to_string(path.as_ref())?;
        let settings: Settings = serde_json::from_str(&text)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Reject values that would make the pipeline meaningless.
    pub fn validate(&self) -> Result<(), CoreError> {
        if self.base_url.trim().is_empty() {
            return Err(CoreError::Config("base_url must not be empty".into()));
        }
        if self.num_rows == 0 {
            return Err(CoreError::Config("num_rows must be at least 1".into()));
        }
        let g = &self.geometry;
        if g.plot_width() <= 0 || g.plot_height() <= 0 {
            return Err(CoreError::Config(format!(
                "Chart area {}x{} leaves no room inside padding {}",
                g.width, g.height, g.padding
            )));
        }
        if g.y_divisions == 0 {
            return Err(CoreError::Config("y_divisions must be at least 1".into()));
        }
        Ok(())
    }
}
