// Configuration loader for flagfetch
// Loads and saves settings as config.json

use std::fs;
use std::path::PathBuf;

use log::{debug, info};
use serde::{Deserialize, Serialize};

use crate::alignment::ColorAlignment;
use crate::color::{Background, ColorDepth};
use crate::error::Result;
use crate::recolor::{LightnessMode, LightnessPolicy, RenderOptions};

const CONFIG_FILE: &str = "config.json";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Flag (or preset) name
    pub flag: String,
    pub mode: ColorDepth,
    pub light_dark: Background,
    /// Target lightness, None uses the background's default
    pub lightness: Option<f64>,
    pub lightness_mode: LightnessMode,
    /// Counter-clockwise flag rotation in degrees
    pub rotation: i32,
    /// Color the glyphs rather than the cells behind them
    pub foreground: bool,
    /// Built-in distro logo to use when no ascii file is given
    pub distro: Option<String>,
    /// Recolor by slot from preset stripes instead of sampling the flag image
    pub color_align: Option<ColorAlignment>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            flag: "rainbow".to_string(),
            mode: ColorDepth::Rgb,
            light_dark: Background::Dark,
            lightness: None,
            lightness_mode: LightnessMode::ClampToRange,
            rotation: 0,
            foreground: true,
            distro: None,
            color_align: None,
        }
    }
}

impl Config {
    /// Lightness the policy targets: the configured one or the background's default.
    pub fn effective_lightness(&self) -> f64 {
        self.lightness
            .unwrap_or_else(|| self.light_dark.default_lightness())
    }

    /// Switch to `mode` with `value` as its parameter.
    pub fn pin_lightness(&mut self, mode: LightnessMode, value: f64) {
        self.lightness_mode = mode;
        self.lightness = Some(value);
    }

    pub fn lightness_policy(&self) -> LightnessPolicy {
        self.lightness_mode.with_value(self.effective_lightness())
    }

    pub fn render_options(&self) -> RenderOptions {
        RenderOptions {
            depth: self.mode,
            background: self.light_dark,
            foreground: self.foreground,
            rotation: self.rotation,
        }
    }

    /// Write to the user config path, creating directories as needed.
    pub fn save(&self) -> Result<PathBuf> {
        let path = user_config_dir()
            .map(|dir| dir.join(CONFIG_FILE))
            .unwrap_or_else(|| PathBuf::from(CONFIG_FILE));
        self.save_to(path)
    }

    pub fn save_to(&self, path: PathBuf) -> Result<PathBuf> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, serde_json::to_string_pretty(self)?)?;
        info!("Saved config to {}", path.display());
        Ok(path)
    }
}

// $XDG_CONFIG_HOME/flagfetch, falling back to ~/.config/flagfetch
fn user_config_dir() -> Option<PathBuf> {
    if let Ok(xdg_config) = std::env::var("XDG_CONFIG_HOME") {
        return Some(PathBuf::from(xdg_config).join("flagfetch"));
    }
    let home = std::env::var("HOME").ok()?;
    Some(PathBuf::from(home).join(".config/flagfetch"))
}

/// Get the config file path, checking common locations
fn get_config_path() -> Option<PathBuf> {
    if let Some(path) = user_config_dir().map(|dir| dir.join(CONFIG_FILE)) {
        if path.exists() {
            return Some(path);
        }
    }

    // Check config.json in current directory (for development)
    let local_path = PathBuf::from(CONFIG_FILE);
    if local_path.exists() {
        return Some(local_path);
    }

    None
}

/// Directory holding installed flag images:
/// $XDG_DATA_HOME/flagfetch/flags, falling back to ~/.local/share/flagfetch/flags
pub fn flags_dir() -> Option<PathBuf> {
    if let Ok(xdg_data) = std::env::var("XDG_DATA_HOME") {
        return Some(PathBuf::from(xdg_data).join("flagfetch/flags"));
    }
    let home = std::env::var("HOME").ok()?;
    Some(PathBuf::from(home).join(".local/share/flagfetch/flags"))
}

/// Load configuration from file, defaults when there is none.
pub fn load_config() -> Result<Config> {
    let Some(path) = get_config_path() else {
        debug!("No config file found, using defaults");
        return Ok(Config::default());
    };

    debug!("Loading config from {}", path.display());
    parse_config(&fs::read_to_string(&path)?)
}

/// Parse the JSON config content
pub fn parse_config(content: &str) -> Result<Config> {
    Ok(serde_json::from_str(content)?)
}
