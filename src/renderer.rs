//! flagfetch preview rendering
//! lays colored blocks out side by side and draws gradient test bars.

use crate::color::{Color, ColorDepth};
use crate::helpers::center;
use crate::recolor::RESET;
use crate::scale::Scale;

const BLACK: Color = Color::new(0, 0, 0);
const WHITE: Color = Color::new(255, 255, 255);

/// Strip ANSI codes to get visible width.
/// Because colored text is a liar about its actual length!
pub fn visible_len(text: &str) -> usize {
    let mut len = 0;
    let mut in_escape = false;
    for character in text.chars() {
        if character == '\x1b' {
            in_escape = true;
        } else if in_escape {
            if character == 'm' {
                in_escape = false;
            }
        } else {
            len += 1;
        }
    }
    len
}

fn block_width(block: &[String]) -> usize {
    block.iter().map(|line| visible_len(line)).max().unwrap_or(0)
}

/// Glue blocks of lines next to each other, `gap` spaces apart.
/// Shorter blocks are padded with blank lines at the bottom.
pub fn join_blocks(blocks: &[Vec<String>], gap: usize) -> Vec<String> {
    let widths: Vec<usize> = blocks.iter().map(|block| block_width(block)).collect();
    let height = blocks.iter().map(Vec::len).max().unwrap_or(0);
    let spacer = " ".repeat(gap);

    (0..height)
        .map(|row| {
            let mut line = String::new();
            for (index, (block, &width)) in blocks.iter().zip(&widths).enumerate() {
                if index > 0 {
                    line.push_str(&spacer);
                }
                let cell = block.get(row).map_or("", String::as_str);
                line.push_str(cell);
                line.push_str(&" ".repeat(width.saturating_sub(visible_len(cell))));
            }
            line.trim_end_matches(' ').to_string()
        })
        .collect()
}

/// Lay equally sized blocks out in rows that fit `term_width` columns.
pub fn grid_layout(blocks: &[Vec<String>], term_width: usize, gap: usize) -> String {
    let width = blocks.iter().map(|block| block_width(block)).max().unwrap_or(0);
    let per_row = ((term_width + gap) / (width + gap).max(1)).max(1);

    blocks
        .chunks(per_row)
        .map(|row| join_blocks(row, gap).join("\n"))
        .collect::<Vec<_>>()
        .join("\n\n")
}

/// A bar of `width` cells whose background follows `scale`, with `label`
/// centered on top in a color that stays readable against it.
pub fn gradient_bar(scale: &Scale, width: usize, label: &str, depth: ColorDepth) -> String {
    let label: Vec<char> = center(label, width).chars().collect();
    let mut bar = String::with_capacity(width * 40);
    for (index, color) in scale.samples(width).into_iter().enumerate() {
        let contrast = if color.lightness() > 0.5 { BLACK } else { WHITE };
        bar.push_str(&color.to_ansi(false, depth));
        bar.push_str(&color.overlay(contrast, 0.85).to_ansi(true, depth));
        bar.push(label.get(index).copied().unwrap_or(' '));
    }
    bar.push_str(RESET);
    bar
}

#[cfg(test)]
mod tests {
    use super::*;

    fn block(lines: &[&str]) -> Vec<String> {
        lines.iter().map(|line| line.to_string()).collect()
    }

    #[test]
    fn visible_len_skips_escapes() {
        assert_eq!(visible_len("\x1b[1m\x1b[38;2;1;2;3mab\x1b[0m"), 2);
        assert_eq!(visible_len("plain"), 5);
    }

    #[test]
    fn joins_blocks_with_padding() {
        let joined = join_blocks(
            &[block(&["\x1b[1ma\x1b[0m", "abc"]), block(&["x", "y", "z"])],
            2,
        );
        assert_eq!(
            joined,
            vec![
                "\x1b[1ma\x1b[0m    x".to_string(),
                "abc  y".to_string(),
                "     z".to_string(),
            ]
        );
    }

    #[test]
    fn grid_wraps_to_terminal_width() {
        let blocks = vec![block(&["aaaa"]); 5];
        // 4 wide + 2 gap: three fit in 16 columns
        let layout = grid_layout(&blocks, 16, 2);
        assert_eq!(layout, "aaaa  aaaa  aaaa\n\naaaa  aaaa");
        // never fewer than one per row
        assert_eq!(grid_layout(&blocks[..1], 2, 2), "aaaa");
    }

    #[test]
    fn gradient_bar_is_as_wide_as_asked() {
        let scale = Scale::new(vec![Color::hex(0x12c2e9), Color::hex(0xf7797d)]).unwrap();
        let bar = gradient_bar(&scale, 20, "RGB Color Testing", ColorDepth::Rgb);
        assert_eq!(visible_len(&bar), 20);
        assert!(bar.starts_with("\x1b[48;2;18;194;233m"));
        assert!(bar.ends_with(RESET));
    }
}
