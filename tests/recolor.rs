use std::collections::{BTreeMap, HashMap};

use flagfetch::presets::find;
use flagfetch::recolor::{BOLD, RESET, UNBOLD};
use flagfetch::renderer::visible_len;
use flagfetch::{
    Background, Color, ColorAlignment, ColorDepth, Error, FlagSource, LightnessPolicy, PixelGrid,
    RenderOptions, Result, recolor,
};

const RED: Color = Color::new(255, 0, 0);
const BLUE: Color = Color::new(0, 0, 255);

#[derive(Default)]
struct MemoryFlags(HashMap<String, PixelGrid>);

impl MemoryFlags {
    fn with(mut self, name: &str, rows: Vec<Vec<Color>>) -> Self {
        self.0
            .insert(name.to_string(), PixelGrid::from_rows(rows).unwrap());
        self
    }
}

impl FlagSource for MemoryFlags {
    fn names(&self) -> Vec<String> {
        self.0.keys().cloned().collect()
    }

    fn load(&self, name: &str) -> Result<Option<PixelGrid>> {
        Ok(self.0.get(name).cloned())
    }
}

fn red_over_blue() -> MemoryFlags {
    MemoryFlags::default().with("red-blue", vec![vec![RED], vec![BLUE]])
}

fn lines(output: &str) -> Vec<&str> {
    output.split('\n').collect()
}

#[test]
fn two_row_flag_colors_each_row() {
    let output = recolor(
        "${c1}AA\nAA",
        "red-blue",
        LightnessPolicy::None,
        RenderOptions::default(),
        &red_over_blue(),
    )
    .unwrap();

    assert_eq!(
        output,
        format!("{BOLD}\x1b[38;2;255;0;0mAA{RESET}\n{BOLD}\x1b[38;2;0;0;255mAA{UNBOLD}{RESET}")
    );
}

#[test]
fn unknown_flag_is_an_error() {
    let result = recolor(
        "abc",
        "missing",
        LightnessPolicy::None,
        RenderOptions::default(),
        &red_over_blue(),
    );
    assert!(matches!(result, Err(Error::FlagNotFound(name)) if name == "missing"));
}

#[test]
fn every_row_is_as_wide_as_the_widest_line() {
    let output = recolor(
        "${c1}ab\n${c2}abcd\n\nx",
        "red-blue",
        LightnessPolicy::None,
        RenderOptions::default(),
        &red_over_blue(),
    )
    .unwrap();

    let rows = lines(&output);
    assert_eq!(rows.len(), 4);
    for row in rows {
        assert_eq!(visible_len(row), 4, "{row:?}");
    }
}

#[test]
fn one_escape_per_uniform_row() {
    let art = "${c1}#####\n#####\n#####\n#####";
    let output = recolor(
        art,
        "red-blue",
        LightnessPolicy::None,
        RenderOptions::default(),
        &red_over_blue(),
    )
    .unwrap();

    for row in lines(&output) {
        assert_eq!(row.matches("\x1b[38;2;").count(), 1, "{row:?}");
    }
}

#[test]
fn rotation_turns_stripes_into_columns() {
    let options = RenderOptions {
        rotation: 90,
        ..RenderOptions::default()
    };
    let output = recolor(
        "abcd\nabcd",
        "red-blue",
        LightnessPolicy::None,
        options,
        &red_over_blue(),
    )
    .unwrap();

    // counter-clockwise: the top stripe ends up on the left
    for row in lines(&output) {
        assert!(row.contains("\x1b[38;2;255;0;0mab\x1b[38;2;0;0;255mcd"), "{row:?}");
    }
}

#[test]
fn light_background_caps_lightness() {
    let flags = MemoryFlags::default().with("white", vec![vec![Color::new(255, 255, 255)]]);
    let options = RenderOptions {
        background: Background::Light,
        ..RenderOptions::default()
    };
    let policy = LightnessPolicy::ClampToRange {
        target: 0.4,
        floor: None,
        ceiling: None,
    };
    let output = recolor("ab", "white", policy, options, &flags).unwrap();

    // white at lightness 0.4 is a gray of 102
    assert!(output.contains("\x1b[38;2;102;102;102m"), "{output:?}");
}

#[test]
fn eight_bit_output_uses_palette_indices() {
    let options = RenderOptions {
        depth: ColorDepth::Ansi8Bit,
        ..RenderOptions::default()
    };
    let output = recolor(
        "ab\ncd",
        "red-blue",
        LightnessPolicy::None,
        options,
        &red_over_blue(),
    )
    .unwrap();

    assert!(output.contains("\x1b[38;5;196mab"));
    assert!(output.contains("\x1b[38;5;21mcd"));
    assert!(!output.contains(";2;"));
}

#[test]
fn slots_carry_over_to_following_lines() {
    let preset = find("bisexual").unwrap();
    let alignment = ColorAlignment::Custom {
        slots: BTreeMap::from([(1, 0), (2, 2)]),
    };
    let output = alignment
        .recolor(
            "${c1}A${c2}B\nCD",
            preset,
            LightnessPolicy::None,
            RenderOptions::default(),
        )
        .unwrap();

    let first = preset.colors[0].to_ansi_rgb(true);
    let last = preset.colors[2].to_ansi_rgb(true);
    assert_eq!(
        output,
        format!("{BOLD}{first}A{last}B{RESET}\n{BOLD}{last}CD{UNBOLD}{RESET}")
    );
}

#[test]
fn crlf_art_renders_like_lf_art() {
    let render = |art: &str| {
        recolor(
            art,
            "red-blue",
            LightnessPolicy::None,
            RenderOptions::default(),
            &red_over_blue(),
        )
        .unwrap()
    };
    let output = render("${c1}ab\r\ncd");
    assert!(!output.contains('\r'));
    assert_eq!(output, render("${c1}ab\ncd"));
}
