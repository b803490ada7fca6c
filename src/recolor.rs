//! Recolor engine.
//!
//! Walks a normalized ASCII template cell by cell, samples the flag at the
//! same position, runs the sample through a lightness policy and emits the
//! glyph. A color escape is only written when the code differs from the
//! previous one in the row, so long runs of one color cost one sequence.
//!
//! Every row starts bold with a fresh color tracker and ends with a full reset
//! before its newline. The last row ends with unbold + reset, so the output
//! never leaks escape state into whatever the terminal prints next.

use std::str::FromStr;

use clap::ValueEnum;
use log::debug;
use serde::{Deserialize, Serialize};

use crate::color::{Background, Color, ColorDepth};
use crate::error::{Error, Result};
use crate::flag::FlagSource;
use crate::template::{Cell, NormalizedTemplate, normalize};

pub const BOLD: &str = "\x1b[1m";
pub const UNBOLD: &str = "\x1b[22m";
pub const RESET: &str = "\x1b[0m";
const DEFAULT_FOREGROUND: &str = "\x1b[39m";
const DEFAULT_BACKGROUND: &str = "\x1b[49m";

/// How each sampled color is adjusted before it is emitted.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "kebab-case")]
pub enum LightnessPolicy {
    /// Keep lightness at least `target` on dark backgrounds and at most
    /// `target` on light ones. Explicit bounds take precedence over `target`.
    ClampToRange {
        target: f64,
        #[serde(default)]
        floor: Option<f64>,
        #[serde(default)]
        ceiling: Option<f64>,
    },
    /// Force lightness to exactly `target`.
    Absolute { target: f64 },
    /// Multiply lightness by `factor`.
    MultiplicativeScale { factor: f64 },
    None,
}

impl LightnessPolicy {
    pub fn apply(self, color: Color, background: Background) -> Color {
        match self {
            LightnessPolicy::ClampToRange {
                target,
                floor,
                ceiling,
            } => {
                let (floor, ceiling) = match background {
                    Background::Dark => (Some(floor.unwrap_or(target)), ceiling),
                    Background::Light => (floor, Some(ceiling.unwrap_or(target))),
                };
                color.set_lightness(target, floor, ceiling)
            }
            LightnessPolicy::Absolute { target } => color.set_lightness(target, None, None),
            LightnessPolicy::MultiplicativeScale { factor } => color.lighten(factor),
            LightnessPolicy::None => color,
        }
    }
}

/// Tag of a [`LightnessPolicy`], without its parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum LightnessMode {
    #[default]
    ClampToRange,
    Absolute,
    MultiplicativeScale,
    None,
}

impl LightnessMode {
    /// Attach the parameter: a target lightness, or a factor for the scale mode.
    pub fn with_value(self, value: f64) -> LightnessPolicy {
        match self {
            LightnessMode::ClampToRange => LightnessPolicy::ClampToRange {
                target: value,
                floor: None,
                ceiling: None,
            },
            LightnessMode::Absolute => LightnessPolicy::Absolute { target: value },
            LightnessMode::MultiplicativeScale => {
                LightnessPolicy::MultiplicativeScale { factor: value }
            }
            LightnessMode::None => LightnessPolicy::None,
        }
    }
}

impl FromStr for LightnessMode {
    type Err = Error;

    // Also accepts the short names older configs used.
    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "clamp-to-range" | "set_dl" => Ok(LightnessMode::ClampToRange),
            "absolute" | "set_raw" => Ok(LightnessMode::Absolute),
            "multiplicative-scale" | "scale" => Ok(LightnessMode::MultiplicativeScale),
            "none" => Ok(LightnessMode::None),
            _ => Err(Error::UnsupportedLightnessMode(s.to_string())),
        }
    }
}

/// Terminal facts and output choices for one render request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderOptions {
    pub depth: ColorDepth,
    pub background: Background,
    /// Color the glyphs (true) or the cells behind them (false).
    pub foreground: bool,
    /// Counter-clockwise flag rotation in degrees, a multiple of 90.
    pub rotation: i32,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            depth: ColorDepth::Rgb,
            background: Background::Dark,
            foreground: true,
            rotation: 0,
        }
    }
}

/// Recolor raw template text with the named flag.
///
/// Fails with [`Error::FlagNotFound`] before producing any output when the
/// flag isn't installed. Empty art renders as an empty string.
pub fn recolor(
    ascii_raw: &str,
    flag_name: &str,
    policy: LightnessPolicy,
    options: RenderOptions,
    flags: &dyn FlagSource,
) -> Result<String> {
    let template = normalize(ascii_raw);
    if template.width() == 0 {
        return Ok(String::new());
    }

    debug!(
        "Recoloring {}x{} ascii with flag {} ({:?})",
        template.width(),
        template.height(),
        flag_name,
        policy
    );
    let flag = flags.provide(
        flag_name,
        template.width(),
        template.height(),
        options.rotation,
    )?;

    Ok(paint(&template, policy, options, |x, y, _| flag.get(x, y)))
}

/// Emit `template` with each cell colored by `color_at`.
/// `None` from `color_at` means the terminal's default color.
pub(crate) fn paint(
    template: &NormalizedTemplate,
    policy: LightnessPolicy,
    options: RenderOptions,
    color_at: impl Fn(usize, usize, &Cell) -> Option<Color>,
) -> String {
    if template.width() == 0 {
        return String::new();
    }

    let default_code = if options.foreground {
        DEFAULT_FOREGROUND
    } else {
        DEFAULT_BACKGROUND
    };

    // most cells are a single glyph, escapes roughly double that
    let mut output = String::with_capacity(template.width() * template.height() * 4);
    output.push_str(BOLD);

    for (y, row) in template.rows().iter().enumerate() {
        if y > 0 {
            output.push_str(RESET);
            output.push('\n');
            output.push_str(BOLD);
        }

        let mut current = String::new();
        for (x, cell) in row.iter().enumerate() {
            let code = match color_at(x, y, cell) {
                Some(color) => policy
                    .apply(color, options.background)
                    .to_ansi(options.foreground, options.depth),
                None => default_code.to_string(),
            };
            if code != current {
                output.push_str(&code);
                current = code;
            }
            output.push(cell.glyph);
        }
    }

    output.push_str(UNBOLD);
    output.push_str(RESET);
    output
}
