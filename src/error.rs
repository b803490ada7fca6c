// Error taxonomy for flagfetch.
// Everything fails synchronously and straight back to the caller, nothing retries.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("{0} flag does not exist")]
    FlagNotFound(String),
    #[error("Flag dimensions must be positive, got {width}x{height}")]
    InvalidDimensions { width: usize, height: usize },
    #[error("Pixel buffer holds {actual} pixels, expected {expected}")]
    PixelCountMismatch { expected: usize, actual: usize },
    #[error("Rotation must be a multiple of 90 degrees, got {0}")]
    InvalidRotation(i32),
    #[error(
        "Unable to parse lightness value {0:?}, please input it as a decimal or percentage (e.g. 0.5 or 50%)"
    )]
    InvalidLightnessValue(String),
    #[error("Unsupported lightness mode {0:?}, expected clamp-to-range, absolute, multiplicative-scale or none")]
    UnsupportedLightnessMode(String),
    #[error("A color scale needs at least 2 anchors, got {0}")]
    ScaleTooShort(usize),
    #[error("Invalid slot mapping {0:?}, expected something like 1=0,2=3")]
    InvalidSlotMapping(String),
    #[error("Slot {slot} maps to color {index}, but the preset only has {available} colors")]
    SlotOutOfRange {
        slot: u8,
        index: usize,
        available: usize,
    },
    #[error("Failed to decode flag image {}: {source}", path.display())]
    FlagDecode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Config(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
