//! Color alignment: recolor a template from a preset's stripe list instead of
//! a flag image, using the template's color slots.
//!
//! * horizontal: every row takes the stripe at its height; with fore/back slots
//!   the fore slot keeps the terminal's default color so the logo's outline
//!   stays readable against the stripes
//! * vertical: every column takes the stripe at its position
//! * custom: each slot is bound to one preset color

use std::collections::BTreeMap;
use std::fmt;

use log::warn;
use serde::{Deserialize, Serialize};

use crate::color::Color;
use crate::error::{Error, Result};
use crate::presets::Preset;
use crate::recolor::{LightnessPolicy, RenderOptions, paint};
use crate::template::normalize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorAlignment {
    Horizontal {
        /// (fore slot, back slot)
        #[serde(default)]
        fore_back: Option<(u8, u8)>,
    },
    Vertical,
    Custom {
        /// slot -> index into the preset's colors
        slots: BTreeMap<u8, usize>,
    },
}

impl Default for ColorAlignment {
    fn default() -> Self {
        ColorAlignment::Horizontal { fore_back: None }
    }
}

impl fmt::Display for ColorAlignment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ColorAlignment::Horizontal { fore_back: None } => f.write_str("horizontal"),
            ColorAlignment::Horizontal {
                fore_back: Some((fore, back)),
            } => write!(f, "horizontal (fore {fore}, back {back})"),
            ColorAlignment::Vertical => f.write_str("vertical"),
            ColorAlignment::Custom { slots } => {
                let pairs: Vec<String> = slots
                    .iter()
                    .map(|(slot, index)| format!("{slot}={index}"))
                    .collect();
                write!(f, "custom ({})", pairs.join(","))
            }
        }
    }
}

impl ColorAlignment {
    /// Recolor `ascii_raw` with `preset`'s stripes.
    pub fn recolor(
        &self,
        ascii_raw: &str,
        preset: &Preset,
        policy: LightnessPolicy,
        options: RenderOptions,
    ) -> Result<String> {
        let template = normalize(ascii_raw);

        let output = match self {
            ColorAlignment::Horizontal { fore_back } => {
                let stripes = preset.with_length(template.height());
                paint(&template, policy, options, |_, y, cell| {
                    match (fore_back, cell.slot) {
                        (Some((fore, _)), Some(slot)) if slot == *fore => None,
                        _ => stripes.get(y).copied(),
                    }
                })
            }
            ColorAlignment::Vertical => {
                let stripes = preset.with_length(template.width());
                paint(&template, policy, options, |x, _, _| stripes.get(x).copied())
            }
            ColorAlignment::Custom { slots } => {
                let bound = bind_slots(slots, preset)?;
                for slot in template.slots() {
                    if !bound.contains_key(&slot) {
                        warn!("Slot {slot} has no color mapped, it keeps the terminal default");
                    }
                }
                paint(&template, policy, options, |_, _, cell| {
                    cell.slot.and_then(|slot| bound.get(&slot).copied())
                })
            }
        };
        Ok(output)
    }
}

fn bind_slots(slots: &BTreeMap<u8, usize>, preset: &Preset) -> Result<BTreeMap<u8, Color>> {
    slots
        .iter()
        .map(|(&slot, &index)| {
            preset
                .colors
                .get(index)
                .map(|&color| (slot, color))
                .ok_or(Error::SlotOutOfRange {
                    slot,
                    index,
                    available: preset.colors.len(),
                })
        })
        .collect()
}
