//! flagfetch
//! Recolors distro ascii art with pride flags.

pub mod alignment;
pub mod asciimodule;
pub mod color;
pub mod colorcontrol;
pub mod configloader;
pub mod error;
pub mod flag;
pub mod helpers;
pub mod presets;
pub mod recolor;
pub mod renderer;
pub mod scale;
pub mod template;
pub mod terminalsize;

pub use alignment::ColorAlignment;
pub use color::{Background, Color, ColorDepth};
pub use error::{Error, Result};
pub use flag::{DirectorySource, FlagRegistry, FlagSource, PixelGrid, PresetSource};
pub use presets::Preset;
pub use recolor::{LightnessMode, LightnessPolicy, RenderOptions, recolor};
pub use scale::Scale;
pub use template::{NormalizedTemplate, normalize};
