//! Color model for flagfetch.
//!
//! A plain 8-bit RGB triple plus the lightness tricks needed to keep a flag
//! readable on both dark and light terminals. Every operation returns a new
//! color, nothing mutates in place.

use std::fmt;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// Which escape sequence family to emit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
pub enum ColorDepth {
    /// 256 color palette (216 color cube + 24 step grayscale ramp)
    #[serde(rename = "8bit")]
    #[value(name = "8bit")]
    Ansi8Bit,
    /// 24-bit truecolor
    #[default]
    #[serde(rename = "rgb")]
    #[value(name = "rgb")]
    Rgb,
}

/// Whether the terminal background is light or dark.
/// Decides if clamp-to-range lightness pushes colors up or down.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Background {
    #[default]
    Dark,
    Light,
}

impl Background {
    /// Lightness that reads well on this background when the user never picked one.
    pub fn default_lightness(self) -> f64 {
        match self {
            Background::Dark => 0.65,
            Background::Light => 0.4,
        }
    }
}

impl fmt::Display for Background {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Background::Dark => f.write_str("dark"),
            Background::Light => f.write_str("light"),
        }
    }
}

// Levels of the xterm 6x6x6 color cube, indices 16..=231
const CUBE_LEVELS: [u8; 6] = [0, 95, 135, 175, 215, 255];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Build a color from a packed `0xRRGGBB` literal.
    pub const fn hex(packed: u32) -> Self {
        Self {
            r: ((packed >> 16) & 0xff) as u8,
            g: ((packed >> 8) & 0xff) as u8,
            b: (packed & 0xff) as u8,
        }
    }

    fn channels_unit(self) -> (f64, f64, f64) {
        (
            f64::from(self.r) / 255.0,
            f64::from(self.g) / 255.0,
            f64::from(self.b) / 255.0,
        )
    }

    fn from_unit(r: f64, g: f64, b: f64) -> Self {
        let to_u8 = |v: f64| (v * 255.0).round().clamp(0.0, 255.0) as u8;
        Self::new(to_u8(r), to_u8(g), to_u8(b))
    }

    /// Convert to (hue, lightness, saturation), all in `[0, 1]`.
    pub fn to_hls(self) -> (f64, f64, f64) {
        let (r, g, b) = self.channels_unit();
        let max = r.max(g).max(b);
        let min = r.min(g).min(b);
        let lightness = (max + min) / 2.0;
        if max == min {
            return (0.0, lightness, 0.0);
        }

        let range = max - min;
        let saturation = if lightness <= 0.5 {
            range / (max + min)
        } else {
            range / (2.0 - max - min)
        };

        let rc = (max - r) / range;
        let gc = (max - g) / range;
        let bc = (max - b) / range;
        let hue = if r == max {
            bc - gc
        } else if g == max {
            2.0 + rc - bc
        } else {
            4.0 + gc - rc
        };

        ((hue / 6.0).rem_euclid(1.0), lightness, saturation)
    }

    pub fn from_hls(hue: f64, lightness: f64, saturation: f64) -> Self {
        if saturation == 0.0 {
            return Self::from_unit(lightness, lightness, lightness);
        }
        let m2 = if lightness <= 0.5 {
            lightness * (1.0 + saturation)
        } else {
            lightness + saturation - lightness * saturation
        };
        let m1 = 2.0 * lightness - m2;
        Self::from_unit(
            hue_channel(m1, m2, hue + 1.0 / 3.0),
            hue_channel(m1, m2, hue),
            hue_channel(m1, m2, hue - 1.0 / 3.0),
        )
    }

    /// The HLS lightness component.
    pub fn lightness(self) -> f64 {
        self.to_hls().1
    }

    /// Set lightness to `target`, or clamp the current lightness into
    /// `[floor, ceiling]` when either bound is given.
    #[must_use]
    pub fn set_lightness(self, target: f64, floor: Option<f64>, ceiling: Option<f64>) -> Self {
        let (hue, lightness, saturation) = self.to_hls();
        let lightness = match (floor, ceiling) {
            (None, None) => target,
            (floor, ceiling) => {
                let raised = floor.map_or(lightness, |floor| lightness.max(floor));
                ceiling.map_or(raised, |ceiling| raised.min(ceiling))
            }
        };
        Self::from_hls(hue, lightness.clamp(0.0, 1.0), saturation)
    }

    /// Multiply lightness by `factor`.
    #[must_use]
    pub fn lighten(self, factor: f64) -> Self {
        let (hue, lightness, saturation) = self.to_hls();
        Self::from_hls(hue, (lightness * factor).clamp(0.0, 1.0), saturation)
    }

    /// Per-channel linear blend towards `other`. `weight` 0 keeps self, 1 gives other.
    #[must_use]
    pub fn overlay(self, other: Color, weight: f64) -> Self {
        let weight = weight.clamp(0.0, 1.0);
        if weight == 0.0 {
            return self;
        }
        let mix = |a: u8, b: u8| {
            let a = f64::from(a);
            (a + (f64::from(b) - a) * weight).round().clamp(0.0, 255.0) as u8
        };
        Self::new(mix(self.r, other.r), mix(self.g, other.g), mix(self.b, other.b))
    }

    /// Index of the closest entry of the 256 color palette, ignoring the 16
    /// user-themable system colors.
    pub fn to_8bit_index(self) -> u8 {
        let nearest_level = |v: u8| {
            (0..CUBE_LEVELS.len())
                .min_by_key(|&i| (i32::from(CUBE_LEVELS[i]) - i32::from(v)).abs())
                .unwrap_or(0)
        };
        let (ri, gi, bi) = (nearest_level(self.r), nearest_level(self.g), nearest_level(self.b));
        let cube = Color::new(CUBE_LEVELS[ri], CUBE_LEVELS[gi], CUBE_LEVELS[bi]);
        let cube_index = 16 + 36 * ri + 6 * gi + bi;

        // grayscale ramp is 8, 18, ..., 238 at indices 232..=255
        let average = (i32::from(self.r) + i32::from(self.g) + i32::from(self.b)) / 3;
        let gray_step = ((average - 8 + 5) / 10).clamp(0, 23);
        let gray_level = (8 + gray_step * 10) as u8;
        let gray = Color::new(gray_level, gray_level, gray_level);

        if self.distance_squared(gray) < self.distance_squared(cube) {
            (232 + gray_step) as u8
        } else {
            cube_index as u8
        }
    }

    fn distance_squared(self, other: Color) -> i32 {
        let dr = i32::from(self.r) - i32::from(other.r);
        let dg = i32::from(self.g) - i32::from(other.g);
        let db = i32::from(self.b) - i32::from(other.b);
        dr * dr + dg * dg + db * db
    }

    pub fn to_ansi_8bit(self, foreground: bool) -> String {
        let layer = if foreground { 38 } else { 48 };
        format!("\x1b[{};5;{}m", layer, self.to_8bit_index())
    }

    pub fn to_ansi_rgb(self, foreground: bool) -> String {
        let layer = if foreground { 38 } else { 48 };
        format!("\x1b[{};2;{};{};{}m", layer, self.r, self.g, self.b)
    }

    /// Escape sequence selecting this color as foreground or background.
    pub fn to_ansi(self, foreground: bool, depth: ColorDepth) -> String {
        match depth {
            ColorDepth::Ansi8Bit => self.to_ansi_8bit(foreground),
            ColorDepth::Rgb => self.to_ansi_rgb(foreground),
        }
    }
}

fn hue_channel(m1: f64, m2: f64, hue: f64) -> f64 {
    let hue = hue.rem_euclid(1.0);
    if hue < 1.0 / 6.0 {
        m1 + (m2 - m1) * hue * 6.0
    } else if hue < 0.5 {
        m2
    } else if hue < 2.0 / 3.0 {
        m1 + (m2 - m1) * (2.0 / 3.0 - hue) * 6.0
    } else {
        m1
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}
