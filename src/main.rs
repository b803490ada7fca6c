// flagfetch: distro ascii art, recolored with pride flags

use std::collections::BTreeMap;
use std::fs;
use std::path::PathBuf;
use std::thread;

use anyhow::{Context, bail};
use clap::{Parser, ValueEnum};
use log::{debug, warn};

use flagfetch::asciimodule::{self, DISTROS};
use flagfetch::colorcontrol::{color_error, color_key, color_title, key_value};
use flagfetch::configloader::{self, Config};
use flagfetch::helpers::{center, parse_lightness, parse_slots};
use flagfetch::renderer::{gradient_bar, grid_layout};
use flagfetch::template::ascii_size;
use flagfetch::terminalsize::terminal_width;
use flagfetch::{
    Background, ColorAlignment, ColorDepth, Error, FlagRegistry, FlagSource, LightnessMode,
    LightnessPolicy, RenderOptions, Scale, Color, normalize, presets, recolor,
};

// Flag swatches in --list-flags
const SWATCH_HEIGHT: usize = 5;
const SWATCH_MIN_WIDTH: usize = 20;
const SWATCH_GAP: usize = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum AlignArg {
    Horizontal,
    Vertical,
    Custom,
}

// cmd line args, *claps*
#[derive(Parser)]
#[command(name = "flagfetch", version, about = "Distro ascii art, recolored with pride flags")]
struct Args {
    /// Flag to color with (a built-in preset or an installed flag image)
    #[arg(short = 'f', long = "flag")]
    flag: Option<String>,

    /// Color system
    #[arg(short = 'm', long = "mode", value_enum)]
    mode: Option<ColorDepth>,

    /// Terminal has a light background
    #[arg(long = "light", conflicts_with = "dark")]
    light: bool,

    /// Terminal has a dark background
    #[arg(long = "dark")]
    dark: bool,

    /// Lighten colors by a multiplier
    #[arg(long = "c-scale", conflicts_with_all = ["set_light", "lightness"])]
    scale: Option<f64>,

    /// Set lightness of every color to exactly this value (0.5 or 50%)
    #[arg(long = "c-set-l", value_parser = parse_lightness, conflicts_with = "lightness")]
    set_light: Option<f64>,

    /// Keep colors at least this light on dark terminals, at most this light on light ones
    #[arg(long = "lightness", value_parser = parse_lightness)]
    lightness: Option<f64>,

    /// How the configured lightness is applied
    #[arg(long = "lightness-mode", value_enum)]
    lightness_mode: Option<LightnessMode>,

    /// Counter-clockwise flag rotation, a multiple of 90
    #[arg(long = "rotation", allow_hyphen_values = true)]
    rotation: Option<i32>,

    /// Color the background of each cell instead of the glyph
    #[arg(long = "background-fill")]
    background_fill: bool,

    /// Read ascii art from a file (neofetch ${cN} format)
    #[arg(short = 'a', long = "ascii", conflicts_with = "distro")]
    ascii: Option<PathBuf>,

    /// Use a built-in distro logo
    #[arg(short = 'd', long = "distro")]
    distro: Option<String>,

    /// Recolor by color slot from the preset's stripes instead of the flag image
    #[arg(long = "align", value_enum)]
    align: Option<AlignArg>,

    /// Slot to preset color mapping for --align custom, e.g. 1=0,2=3
    #[arg(long = "slots", value_parser = parse_slots)]
    slots: Option<BTreeMap<u8, usize>>,

    /// Directory with installed flag images
    #[arg(long = "flags-dir")]
    flags_dir: Option<PathBuf>,

    /// Preview every installed flag
    #[arg(long = "list-flags")]
    list_flags: bool,

    /// Print 8bit and RGB gradient bars to pick a color system
    #[arg(long = "color-test")]
    color_test: bool,

    /// Print the normalized ascii art without colors
    #[arg(long = "test-print")]
    test_print: bool,

    /// Save the effective settings as the new config
    #[arg(long = "save")]
    save: bool,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    // Load config, CLI args override it
    let mut config = configloader::load_config().unwrap_or_else(|error| {
        warn!("Ignoring unreadable config: {error}");
        Config::default()
    });
    apply_args(&mut config, &args)?;
    debug!("Effective config: {config:?}");

    let flags = match args.flags_dir.clone().or_else(configloader::flags_dir) {
        Some(dir) => FlagRegistry::with_directory(dir),
        None => FlagRegistry::builtin(),
    };

    if args.color_test {
        print_color_test()?;
        return Ok(());
    }

    if args.list_flags {
        print!("{}", list_flags(&flags, config.mode)?);
        return Ok(());
    }

    let ascii = load_ascii(&args, &config)?;

    if args.test_print {
        let (width, height) = ascii_size(&ascii);
        println!("{}", normalize(&ascii).to_text());
        println!("{}", key_value("Size", &format!("{width}x{height}")));
        return Ok(());
    }

    let policy = config.lightness_policy();
    let rendered = match &config.color_align {
        Some(alignment) => {
            let preset = presets::find(&config.flag)
                .ok_or_else(|| Error::FlagNotFound(config.flag.clone()))
                .context("Slot alignment needs a built-in preset")?;
            alignment.recolor(&ascii, preset, policy, config.render_options())?
        }
        None => recolor(&ascii, &config.flag, policy, config.render_options(), &flags)?,
    };
    println!("{rendered}");

    if args.save {
        let path = config.save().context("Failed to save config")?;
        println!();
        println!("{}", key_value("Configuration file saved at", &path.display().to_string()));
        println!("{}: {}", color_key("Flag"), flag_title(&config.flag, &config.flag, config.mode));
        println!("{}", key_value("Light/Dark", &config.light_dark.to_string()));
        println!("{}", key_value("Lightness", &format!("{:.2}", config.effective_lightness())));
        if let Some(alignment) = &config.color_align {
            println!("{}", key_value("Color alignment", &alignment.to_string()));
        }
    }

    Ok(())
}

fn apply_args(config: &mut Config, args: &Args) -> anyhow::Result<()> {
    if let Some(flag) = &args.flag {
        config.flag = flag.clone();
    }
    if let Some(mode) = args.mode {
        config.mode = mode;
    }
    if args.light {
        config.light_dark = Background::Light;
    } else if args.dark {
        config.light_dark = Background::Dark;
    }
    if let Some(lightness) = args.lightness {
        config.lightness = Some(lightness);
    }
    if let Some(mode) = args.lightness_mode {
        config.lightness_mode = mode;
    }
    if let Some(factor) = args.scale {
        config.pin_lightness(LightnessMode::MultiplicativeScale, factor);
    } else if let Some(target) = args.set_light {
        config.pin_lightness(LightnessMode::Absolute, target);
    }
    if let Some(rotation) = args.rotation {
        config.rotation = rotation;
    }
    if args.background_fill {
        config.foreground = false;
    }
    if let Some(distro) = &args.distro {
        config.distro = Some(distro.clone());
    }

    config.color_align = match args.align {
        None => config.color_align.take(),
        Some(AlignArg::Horizontal) => Some(ColorAlignment::Horizontal {
            fore_back: config.distro.as_deref().and_then(asciimodule::get_fore_back),
        }),
        Some(AlignArg::Vertical) => Some(ColorAlignment::Vertical),
        Some(AlignArg::Custom) => {
            let Some(slots) = args.slots.clone() else {
                bail!("--align custom needs --slots, e.g. --slots 1=0,2=3");
            };
            Some(ColorAlignment::Custom { slots })
        }
    };
    Ok(())
}

fn load_ascii(args: &Args, config: &Config) -> anyhow::Result<String> {
    if let Some(path) = &args.ascii {
        return fs::read_to_string(path)
            .with_context(|| format!("Failed to read ascii art from {}", path.display()));
    }
    match &config.distro {
        Some(distro) => match asciimodule::get_distro_logo(distro) {
            Some(logo) => Ok(logo.to_string()),
            None => bail!(
                "{} (built-in: {})",
                color_error(&format!("No ascii art for distro {distro}")),
                DISTROS.join(", ")
            ),
        },
        None => Ok(asciimodule::test_ascii(&lightness_label(config))),
    }
}

// Label for the test cat: the lightness it is rendered with
fn lightness_label(config: &Config) -> String {
    match config.lightness_mode {
        LightnessMode::None => String::new(),
        LightnessMode::MultiplicativeScale => format!("x{:.1}", config.effective_lightness()),
        _ => format!("{:.0}%", config.effective_lightness() * 100.0),
    }
}

// `text` in the stripes of the preset called `name`, the title color otherwise
fn flag_title(name: &str, text: &str, depth: ColorDepth) -> String {
    match presets::find(name) {
        Some(preset) => preset.color_text(text, depth, true),
        None => color_title(text),
    }
}

fn print_color_test() -> anyhow::Result<()> {
    let scale = Scale::new(vec![
        Color::hex(0x12c2e9),
        Color::hex(0xc471ed),
        Color::hex(0xf7797d),
    ])?;
    let width = terminal_width();
    println!("{}", gradient_bar(&scale, width, "8bit Color Testing", ColorDepth::Ansi8Bit));
    println!("{}", gradient_bar(&scale, width, "RGB Color Testing", ColorDepth::Rgb));
    println!();
    println!("If you can't see colors under \"RGB Color Testing\", use --mode 8bit");
    Ok(())
}

// Render every flag as a swatch with its name on top, one thread per flag
fn list_flags(flags: &FlagRegistry, depth: ColorDepth) -> anyhow::Result<String> {
    let names = flags.names();
    let spacing = names
        .iter()
        .map(|name| name.chars().count())
        .max()
        .unwrap_or(0)
        .max(SWATCH_MIN_WIDTH);
    let swatch = vec![" ".repeat(spacing); SWATCH_HEIGHT].join("\n");
    let options = RenderOptions {
        depth,
        background: Background::Dark,
        foreground: false,
        rotation: 270,
    };

    let blocks: Vec<Vec<String>> = thread::scope(|scope| {
        let handles: Vec<_> = names
            .iter()
            .map(|name| {
                let swatch = &swatch;
                scope.spawn(move || {
                    recolor(swatch, name, LightnessPolicy::None, options, flags)
                        .map(|painted| (name, painted))
                })
            })
            .collect();

        handles
            .into_iter()
            .filter_map(|handle| match handle.join() {
                Ok(Ok((name, painted))) => {
                    let mut block = vec![flag_title(name, &center(name, spacing), depth)];
                    block.extend(painted.split('\n').map(str::to_string));
                    Some(block)
                }
                Ok(Err(error)) => {
                    warn!("Skipping flag: {error}");
                    None
                }
                Err(_) => {
                    warn!("Flag preview thread panicked");
                    None
                }
            })
            .collect()
    });

    if blocks.is_empty() {
        bail!("No flags installed");
    }

    let mut output = grid_layout(&blocks, terminal_width(), SWATCH_GAP);
    output.push('\n');
    Ok(output)
}
