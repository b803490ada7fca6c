//! ASCII template normalizer.
//!
//! Distro art arrives in neofetch's format: plain text with `${cN}` color-slot
//! placeholders (N a single digit). A placeholder switches the current slot
//! and the slot persists across lines until another placeholder overrides it.
//! Normalizing resolves that continuation, strips the placeholders and pads
//! every line to the widest one, so one row of the result is one output line.

use memchr::memmem;

const PLACEHOLDER_PREFIX: &[u8] = b"${c";
// `${c` + digit + `}`
const PLACEHOLDER_LEN: usize = 5;

/// One character cell of a normalized template.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cell {
    pub glyph: char,
    /// Slot active when this glyph was drawn, `None` before the first placeholder.
    pub slot: Option<u8>,
}

/// A rectangular, placeholder-free grid of cells.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedTemplate {
    rows: Vec<Vec<Cell>>,
    /// Slot inherited at the start of each line.
    line_slots: Vec<Option<u8>>,
    width: usize,
}

impl NormalizedTemplate {
    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.rows.len()
    }

    pub fn rows(&self) -> &[Vec<Cell>] {
        &self.rows
    }

    pub fn cell(&self, x: usize, y: usize) -> Option<Cell> {
        self.rows.get(y).and_then(|row| row.get(x)).copied()
    }

    /// Slot a line starts with before any of its own placeholders apply.
    pub fn line_slot(&self, y: usize) -> Option<u8> {
        self.line_slots.get(y).copied().flatten()
    }

    /// Distinct slots referenced anywhere in the template, sorted.
    pub fn slots(&self) -> Vec<u8> {
        let mut slots: Vec<u8> = self
            .rows
            .iter()
            .flatten()
            .filter_map(|cell| cell.slot)
            .collect();
        slots.sort_unstable();
        slots.dedup();
        slots
    }

    /// The padded text without any placeholders.
    pub fn to_text(&self) -> String {
        self.rows
            .iter()
            .map(|row| row.iter().map(|cell| cell.glyph).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Placeholders of a line as (byte offset, slot), in order.
/// Anything that is not exactly `${c` + one digit + `}` stays plain text.
fn placeholders(line: &str) -> Vec<(usize, u8)> {
    let bytes = line.as_bytes();
    memmem::find_iter(bytes, PLACEHOLDER_PREFIX)
        .filter_map(|start| {
            let digit = *bytes.get(start + 3)?;
            let close = *bytes.get(start + 4)?;
            (digit.is_ascii_digit() && close == b'}').then_some((start, digit - b'0'))
        })
        .collect()
}

/// Split a line into cells, starting from the inherited slot.
fn parse_line(line: &str, inherited: Option<u8>) -> (Vec<Cell>, Option<u8>) {
    let mut cells = Vec::with_capacity(line.len());
    let mut current = inherited;
    let mut cursor = 0;

    for (start, slot) in placeholders(line) {
        cells.extend(line[cursor..start].chars().map(|glyph| Cell {
            glyph,
            slot: current,
        }));
        current = Some(slot);
        cursor = start + PLACEHOLDER_LEN;
    }
    cells.extend(line[cursor..].chars().map(|glyph| Cell {
        glyph,
        slot: current,
    }));

    (cells, current)
}

/// Normalize raw template text into a rectangular grid.
pub fn normalize(raw: &str) -> NormalizedTemplate {
    let (rows, line_slots, _) = raw.split('\n').fold(
        (Vec::new(), Vec::new(), None),
        |(mut rows, mut line_slots, inherited), line| {
            // CRLF art: the carriage return is a line ending, not a glyph
            let line = line.strip_suffix('\r').unwrap_or(line);
            let (cells, trailing) = parse_line(line, inherited);
            rows.push((cells, trailing));
            line_slots.push(inherited);
            (rows, line_slots, trailing)
        },
    );

    let width = rows.iter().map(|(cells, _)| cells.len()).max().unwrap_or(0);
    // padding keeps whatever slot the line ended with
    let rows = rows
        .into_iter()
        .map(|(mut cells, trailing): (Vec<Cell>, Option<u8>)| {
            cells.resize(
                width,
                Cell {
                    glyph: ' ',
                    slot: trailing,
                },
            );
            cells
        })
        .collect();

    NormalizedTemplate {
        rows,
        line_slots,
        width,
    }
}

/// Template (width, height) ignoring placeholders.
pub fn ascii_size(raw: &str) -> (usize, usize) {
    let template = normalize(raw);
    (template.width(), template.height())
}
