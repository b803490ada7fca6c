// Helper functions
// Parsing for values typed in by a human, everything past here trusts its input.

use std::collections::BTreeMap;

use crate::error::{Error, Result};

// Parse a lightness given as a decimal (0.5) or a percentage (50%).
// Must land in [0, 1].
pub fn parse_lightness(input: &str) -> Result<f64> {
    let trimmed = input.trim();
    let invalid = || Error::InvalidLightnessValue(input.to_string());

    let value = match trimmed.strip_suffix('%') {
        Some(percent) => percent.trim().parse::<f64>().map_err(|_| invalid())? / 100.0,
        None => trimmed.parse::<f64>().map_err(|_| invalid())?,
    };

    if !(0.0..=1.0).contains(&value) {
        return Err(invalid());
    }
    Ok(value)
}

// Parse a custom slot mapping like "1=0,2=3" (slot = preset color index).
pub fn parse_slots(input: &str) -> Result<BTreeMap<u8, usize>> {
    let invalid = || Error::InvalidSlotMapping(input.to_string());

    input
        .split(',')
        .map(str::trim)
        .filter(|pair| !pair.is_empty())
        .map(|pair| {
            let (slot, index) = pair.split_once('=').ok_or_else(invalid)?;
            let slot: u8 = slot.trim().parse().map_err(|_| invalid())?;
            if slot > 9 {
                return Err(invalid());
            }
            let index: usize = index.trim().parse().map_err(|_| invalid())?;
            Ok((slot, index))
        })
        .collect::<Result<BTreeMap<_, _>>>()
        .and_then(|slots| if slots.is_empty() { Err(invalid()) } else { Ok(slots) })
}

// Center text in a field of `width` columns, never truncating.
pub fn center(text: &str, width: usize) -> String {
    format!("{text:^width$}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_decimals_and_percentages() {
        assert_eq!(parse_lightness("0.5").unwrap(), 0.5);
        assert_eq!(parse_lightness(" 65% ").unwrap(), 0.65);
        assert_eq!(parse_lightness("1").unwrap(), 1.0);
        assert_eq!(parse_lightness("0%").unwrap(), 0.0);
    }

    #[test]
    fn rejects_bad_lightness() {
        for input in ["", "bright", "1.5", "-0.1", "150%", "%"] {
            assert!(
                matches!(parse_lightness(input), Err(Error::InvalidLightnessValue(ref s)) if s == input),
                "{input:?} should be rejected"
            );
        }
    }

    #[test]
    fn parses_slot_mappings() {
        let slots = parse_slots("1=0, 2=3").unwrap();
        assert_eq!(slots, BTreeMap::from([(1, 0), (2, 3)]));
    }

    #[test]
    fn rejects_bad_slot_mappings() {
        for input in ["", "1", "a=1", "1=b", "12=0"] {
            assert!(
                matches!(parse_slots(input), Err(Error::InvalidSlotMapping(_))),
                "{input:?} should be rejected"
            );
        }
    }

    #[test]
    fn centers_without_truncating() {
        assert_eq!(center("ab", 6), "  ab  ");
        assert_eq!(center("abcdef", 2), "abcdef");
    }
}
