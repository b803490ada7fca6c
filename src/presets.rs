// Built-in flag presets for flagfetch.
// Each preset is an ordered list of stripe colors, top to bottom.

use crate::color::{Color, ColorDepth};
use crate::error::Result;
use crate::flag::PixelGrid;
use crate::recolor::RESET;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Preset {
    pub name: &'static str,
    pub colors: &'static [Color],
}

pub static PRESETS: &[Preset] = &[
    Preset {
        name: "rainbow",
        colors: &[
            Color::hex(0xe50000),
            Color::hex(0xff8d00),
            Color::hex(0xffee00),
            Color::hex(0x028121),
            Color::hex(0x004cff),
            Color::hex(0x770088),
        ],
    },
    Preset {
        name: "transgender",
        colors: &[
            Color::hex(0x55cdfd),
            Color::hex(0xf6aab7),
            Color::hex(0xffffff),
            Color::hex(0xf6aab7),
            Color::hex(0x55cdfd),
        ],
    },
    Preset {
        name: "nonbinary",
        colors: &[
            Color::hex(0xfcf431),
            Color::hex(0xfcfcfc),
            Color::hex(0x9d59d2),
            Color::hex(0x282828),
        ],
    },
    Preset {
        name: "agender",
        colors: &[
            Color::hex(0x000000),
            Color::hex(0xbababa),
            Color::hex(0xffffff),
            Color::hex(0xbaf484),
            Color::hex(0xffffff),
            Color::hex(0xbababa),
            Color::hex(0x000000),
        ],
    },
    Preset {
        name: "queer",
        colors: &[
            Color::hex(0xb57fdd),
            Color::hex(0xffffff),
            Color::hex(0x49821e),
        ],
    },
    Preset {
        name: "genderfluid",
        colors: &[
            Color::hex(0xfe76a2),
            Color::hex(0xffffff),
            Color::hex(0xbf12d7),
            Color::hex(0x000000),
            Color::hex(0x303cbe),
        ],
    },
    Preset {
        name: "bisexual",
        colors: &[
            Color::hex(0xd60270),
            Color::hex(0x9b4f96),
            Color::hex(0x0038a8),
        ],
    },
    Preset {
        name: "pansexual",
        colors: &[
            Color::hex(0xff1c8d),
            Color::hex(0xffd700),
            Color::hex(0x1ab3ff),
        ],
    },
    Preset {
        name: "lesbian",
        colors: &[
            Color::hex(0xd62800),
            Color::hex(0xff9b56),
            Color::hex(0xffffff),
            Color::hex(0xd462a6),
            Color::hex(0xa40062),
        ],
    },
    Preset {
        name: "asexual",
        colors: &[
            Color::hex(0x000000),
            Color::hex(0xa4a4a4),
            Color::hex(0xffffff),
            Color::hex(0x810081),
        ],
    },
    Preset {
        name: "aromantic",
        colors: &[
            Color::hex(0x3ba740),
            Color::hex(0xa8d47a),
            Color::hex(0xffffff),
            Color::hex(0xababab),
            Color::hex(0x000000),
        ],
    },
    Preset {
        name: "gay-men",
        colors: &[
            Color::hex(0x078d70),
            Color::hex(0x98e8c1),
            Color::hex(0xffffff),
            Color::hex(0x7bade2),
            Color::hex(0x3d1a78),
        ],
    },
];

// Case-insensitive exact lookup
pub fn find(name: &str) -> Option<&'static Preset> {
    PRESETS
        .iter()
        .find(|preset| preset.name.eq_ignore_ascii_case(name))
}

impl Preset {
    /// Repeat each color by its weight.
    pub fn with_weights(&self, weights: &[usize]) -> Vec<Color> {
        self.colors
            .iter()
            .zip(weights)
            .flat_map(|(&color, &weight)| std::iter::repeat_n(color, weight))
            .collect()
    }

    /// Spread the colors over exactly `length` entries.
    /// An odd remainder widens the centre stripe, the rest widens the borders in pairs.
    pub fn with_length(&self, length: usize) -> Vec<Color> {
        let count = self.colors.len();
        if count == 0 {
            return Vec::new();
        }
        let mut weights = vec![length / count; count];
        let mut extras = length % count;
        if extras % 2 == 1 {
            extras -= 1;
            weights[count / 2] += 1;
        }
        let mut border = 0;
        while extras > 0 {
            extras -= 2;
            weights[border] += 1;
            weights[count - 1 - border] += 1;
            border += 1;
        }
        self.with_weights(&weights)
    }

    /// Stripes of this preset as a flag image.
    pub fn to_grid(&self) -> Result<PixelGrid> {
        PixelGrid::stripes(self.colors)
    }

    /// Color `text` character by character, spreading the stripes across its length.
    pub fn color_text(&self, text: &str, depth: ColorDepth, foreground: bool) -> String {
        let colors = self.with_length(text.chars().count());
        let mut output = String::with_capacity(text.len() * 4);
        let mut current = String::new();
        for (glyph, color) in text.chars().zip(colors) {
            let code = color.to_ansi(foreground, depth);
            if code != current {
                output.push_str(&code);
                current = code;
            }
            output.push(glyph);
        }
        if !current.is_empty() {
            output.push_str(RESET);
        }
        output
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn finds_presets_ignoring_case() {
        assert_eq!(find("Transgender").map(|p| p.name), Some("transgender"));
        assert!(find("trans").is_none());
    }

    #[test]
    fn with_length_matches_exact_multiples() {
        let bi = find("bisexual").unwrap();
        let colors = bi.with_length(6);
        assert_eq!(colors.len(), 6);
        assert_eq!(colors[0], colors[1]);
        assert_eq!(colors[2], bi.colors[1]);
        assert_eq!(colors[5], bi.colors[2]);
    }

    #[test]
    fn with_length_widens_centre_then_borders() {
        let bi = find("bisexual").unwrap();
        // 7 = 2 each + 1 odd extra in the middle
        assert_eq!(bi.with_length(7), bi.with_weights(&[2, 3, 2]));
        // 8 = 2 each + a pair on the borders
        assert_eq!(bi.with_length(8), bi.with_weights(&[3, 2, 3]));
        // shorter than the preset
        assert_eq!(bi.with_length(1), vec![bi.colors[1]]);
        assert_eq!(bi.with_length(2), vec![bi.colors[0], bi.colors[2]]);
        for length in 0..40 {
            assert_eq!(bi.with_length(length).len(), length);
        }
    }

    #[test]
    fn color_text_switches_only_on_change() {
        let bi = find("bisexual").unwrap();
        let text = bi.color_text("abcdef", ColorDepth::Rgb, true);
        assert_eq!(text.matches("\x1b[38;2;").count(), 3);
        assert!(text.ends_with(RESET));
        assert_eq!(bi.color_text("", ColorDepth::Rgb, true), "");
    }

    #[test]
    fn to_grid_is_a_stripe_column() {
        let rainbow = find("rainbow").unwrap();
        let grid = rainbow.to_grid().unwrap();
        assert_eq!((grid.width(), grid.height()), (1, 6));
        assert_eq!(grid.get(0, 5), Some(Color::hex(0x770088)));
    }
}
