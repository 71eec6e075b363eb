//! Color tags and color maps for plot output

use std::fmt;
use serde::{Serialize, Deserialize};

/// 8-bit RGB color, serialized as `[r, g, b]`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    /// Linear interpolation between two colors, `t` in [0, 1]
    pub fn lerp(self, other: Rgb, t: f64) -> Rgb {
        let mix = |a: u8, b: u8| (a as f64 * (1.0 - t) + b as f64 * t).round() as u8;
        Rgb(mix(self.0, other.0), mix(self.1, other.1), mix(self.2, other.2))
    }

    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.0, self.1, self.2)
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

const PALETTE: &[Rgb] = &[
    Rgb(100, 150, 250), // Blue
    Rgb(250, 150, 100), // Orange
    Rgb(150, 250, 100), // Green
    Rgb(250, 100, 150), // Pink
    Rgb(150, 100, 250), // Purple
    Rgb(250, 250, 100), // Yellow
    Rgb(100, 250, 250), // Cyan
    Rgb(250, 100, 100), // Red
];

/// Display color of an axis or highlight
///
/// Either an explicit RGB triple or a name the rendering backend resolves.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ColorTag {
    Rgb(Rgb),
    Named(String),
}

impl ColorTag {
    /// Categorical palette color, cycling
    pub fn palette(index: usize) -> ColorTag {
        ColorTag::Rgb(PALETTE[index % PALETTE.len()])
    }
}

impl Default for ColorTag {
    fn default() -> Self {
        ColorTag::Named("black".to_string())
    }
}

impl From<Rgb> for ColorTag {
    fn from(rgb: Rgb) -> Self {
        ColorTag::Rgb(rgb)
    }
}

impl From<&str> for ColorTag {
    fn from(name: &str) -> Self {
        ColorTag::Named(name.to_string())
    }
}

impl fmt::Display for ColorTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ColorTag::Rgb(rgb) => fmt::Display::fmt(rgb, f),
            ColorTag::Named(name) => f.write_str(name),
        }
    }
}

/// Continuous color map for the color axis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorMap {
    #[default]
    Viridis,
    Plasma,
    /// Blue-white-red
    Diverging,
}

const VIRIDIS: &[Rgb] = &[
    Rgb(68, 1, 84),
    Rgb(53, 91, 125),
    Rgb(42, 117, 142),
    Rgb(86, 163, 92),
    Rgb(253, 231, 36),
];

const PLASMA: &[Rgb] = &[
    Rgb(13, 8, 135),
    Rgb(253, 65, 148),
    Rgb(253, 251, 36),
];

const DIVERGING: &[Rgb] = &[
    Rgb(50, 50, 200),
    Rgb(255, 255, 255),
    Rgb(255, 50, 50),
];

impl ColorMap {
    /// Color at a normalized position
    ///
    /// Positions outside [0, 1] take the end colors; NaN takes the first.
    pub fn sample(self, t: f64) -> Rgb {
        let stops = match self {
            ColorMap::Viridis => VIRIDIS,
            ColorMap::Plasma => PLASMA,
            ColorMap::Diverging => DIVERGING,
        };

        let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
        let scaled = t * (stops.len() - 1) as f64;
        let segment = (scaled.floor() as usize).min(stops.len() - 2);

        stops[segment].lerp(stops[segment + 1], scaled - segment as f64)
    }
}
