// Color control module for flagfetch
// Colors for flagfetch's own messages, separate from the art it recolors

use tintify::TintColorize;

use crate::color::Color;

const TITLE: Color = Color::hex(0x12c2e9);
const KEY: Color = Color::hex(0xc471ed);
const VALUE: Color = Color::hex(0xf7797d);
const ERROR: Color = Color::hex(0xe50000);

fn paint(text: &str, color: Color) -> String {
    text.truecolor(color.r, color.g, color.b).to_string()
}

pub fn color_title(text: &str) -> String {
    paint(text, TITLE)
}

pub fn color_key(text: &str) -> String {
    paint(text, KEY)
}

pub fn color_value(text: &str) -> String {
    paint(text, VALUE)
}

pub fn color_error(text: &str) -> String {
    paint(text, ERROR)
}

// "Key: value" line used by the summary output
pub fn key_value(key: &str, value: &str) -> String {
    format!("{}: {}", color_key(key), color_value(value))
}
