//! Flag image provider.
//!
//! A flag is looked up by name (case-insensitive, exact) in a registry of
//! sources, rotated by a multiple of 90 degrees and resampled with
//! nearest-neighbour to exactly the size the caller asked for.

use std::fs;
use std::path::PathBuf;

use log::{debug, warn};

use crate::color::Color;
use crate::error::{Error, Result};
use crate::presets::{self, Preset};

/// An immutable 2D grid of colors, stored row by row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelGrid {
    width: usize,
    height: usize,
    pixels: Vec<Color>,
}

impl PixelGrid {
    pub fn new(width: usize, height: usize, pixels: Vec<Color>) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(Error::InvalidDimensions { width, height });
        }
        if pixels.len() != width * height {
            return Err(Error::PixelCountMismatch {
                expected: width * height,
                actual: pixels.len(),
            });
        }
        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    /// Build from rows of equal length, top row first.
    pub fn from_rows(rows: Vec<Vec<Color>>) -> Result<Self> {
        let height = rows.len();
        let width = rows.first().map_or(0, Vec::len);
        let pixels: Vec<Color> = rows.into_iter().flatten().collect();
        Self::new(width, height, pixels)
    }

    /// A one pixel wide column of horizontal stripes, top to bottom.
    pub fn stripes(colors: &[Color]) -> Result<Self> {
        Self::new(1, colors.len(), colors.to_vec())
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn get(&self, x: usize, y: usize) -> Option<Color> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.pixels.get(y * self.width + x).copied()
    }

    fn pixel(&self, x: usize, y: usize) -> Color {
        self.pixels[y * self.width + x]
    }

    /// Rotate counter-clockwise by `degrees`, a multiple of 90.
    /// Quarter turns swap width and height so nothing gets cropped.
    pub fn rotated(&self, degrees: i32) -> Result<Self> {
        if degrees % 90 != 0 {
            return Err(Error::InvalidRotation(degrees));
        }
        let (w, h) = (self.width, self.height);
        let grid = match degrees.rem_euclid(360) {
            0 => self.clone(),
            90 => self.remap(h, w, |x, y| self.pixel(w - 1 - y, x)),
            180 => self.remap(w, h, |x, y| self.pixel(w - 1 - x, h - 1 - y)),
            _ => self.remap(h, w, |x, y| self.pixel(y, h - 1 - x)),
        };
        Ok(grid)
    }

    /// Nearest-neighbour resample to exactly `width` x `height`.
    pub fn resized(&self, width: usize, height: usize) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(Error::InvalidDimensions { width, height });
        }
        // sample at pixel centres, same as PIL's NEAREST filter
        let source_x = |x: usize| ((2 * x + 1) * self.width / (2 * width)).min(self.width - 1);
        let source_y = |y: usize| ((2 * y + 1) * self.height / (2 * height)).min(self.height - 1);
        Ok(self.remap(width, height, |x, y| self.pixel(source_x(x), source_y(y))))
    }

    fn remap(&self, width: usize, height: usize, sample: impl Fn(usize, usize) -> Color) -> Self {
        let pixels = (0..height)
            .flat_map(|y| (0..width).map(move |x| (x, y)))
            .map(|(x, y)| sample(x, y))
            .collect();
        Self {
            width,
            height,
            pixels,
        }
    }
}

/// Somewhere flags can be found.
pub trait FlagSource {
    /// Names of every flag this source can load.
    fn names(&self) -> Vec<String>;

    /// Load a flag at its native size. `Ok(None)` when the name isn't here.
    fn load(&self, name: &str) -> Result<Option<PixelGrid>>;

    /// Resolve `name` to a grid of exactly `width` x `height`, rotated
    /// counter-clockwise by `rotation` degrees before resampling.
    fn provide(&self, name: &str, width: usize, height: usize, rotation: i32) -> Result<PixelGrid> {
        if rotation % 90 != 0 {
            return Err(Error::InvalidRotation(rotation));
        }
        if width == 0 || height == 0 {
            return Err(Error::InvalidDimensions { width, height });
        }
        let flag = self
            .load(name)?
            .ok_or_else(|| Error::FlagNotFound(name.to_string()))?;
        debug!(
            "Resampling flag {} from {}x{} to {}x{} (rotation {})",
            name,
            flag.width(),
            flag.height(),
            width,
            height,
            rotation
        );
        flag.rotated(rotation)?.resized(width, height)
    }
}

/// Built-in presets, each rendered as equal horizontal stripes.
#[derive(Debug, Clone, Copy, Default)]
pub struct PresetSource;

impl FlagSource for PresetSource {
    fn names(&self) -> Vec<String> {
        presets::PRESETS
            .iter()
            .map(|preset| preset.name.to_string())
            .collect()
    }

    fn load(&self, name: &str) -> Result<Option<PixelGrid>> {
        presets::find(name).map(Preset::to_grid).transpose()
    }
}

/// Flag images installed in a directory, matched by file stem
/// (`trans.png` is the flag `trans`).
#[derive(Debug, Clone)]
pub struct DirectorySource {
    dir: PathBuf,
}

impl DirectorySource {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn entries(&self) -> Vec<(String, PathBuf)> {
        let Ok(read_dir) = fs::read_dir(&self.dir) else {
            debug!("Flag directory {} is not readable", self.dir.display());
            return Vec::new();
        };
        let mut entries: Vec<(String, PathBuf)> = read_dir
            .flatten()
            .map(|entry| entry.path())
            .filter(|path| path.is_file())
            .filter_map(|path| {
                let file_name = path.file_name()?.to_str()?;
                let stem = file_name.split('.').next()?;
                (!stem.is_empty()).then(|| (stem.to_string(), path.clone()))
            })
            .collect();
        entries.sort();
        entries
    }
}

impl FlagSource for DirectorySource {
    fn names(&self) -> Vec<String> {
        self.entries().into_iter().map(|(stem, _)| stem).collect()
    }

    fn load(&self, name: &str) -> Result<Option<PixelGrid>> {
        let Some((_, path)) = self
            .entries()
            .into_iter()
            .find(|(stem, _)| stem.eq_ignore_ascii_case(name))
        else {
            return Ok(None);
        };

        debug!("Decoding flag {} from {}", name, path.display());
        let image = image::open(&path)
            .map_err(|source| Error::FlagDecode {
                path: path.clone(),
                source,
            })?
            .to_rgb8();
        let (width, height) = image.dimensions();
        let pixels = image
            .pixels()
            .map(|pixel| Color::new(pixel[0], pixel[1], pixel[2]))
            .collect();
        PixelGrid::new(width as usize, height as usize, pixels).map(Some)
    }
}

/// Ordered set of sources. Earlier sources shadow later ones.
#[derive(Default)]
pub struct FlagRegistry {
    sources: Vec<Box<dyn FlagSource + Send + Sync>>,
}

impl FlagRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Just the built-in presets.
    pub fn builtin() -> Self {
        Self::new().with_source(PresetSource)
    }

    /// Installed flag images first, built-in presets as fallback.
    pub fn with_directory(dir: impl Into<PathBuf>) -> Self {
        Self::new()
            .with_source(DirectorySource::new(dir))
            .with_source(PresetSource)
    }

    #[must_use]
    pub fn with_source(mut self, source: impl FlagSource + Send + Sync + 'static) -> Self {
        self.sources.push(Box::new(source));
        self
    }
}

impl FlagSource for FlagRegistry {
    fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = Vec::new();
        for name in self.sources.iter().flat_map(|source| source.names()) {
            if !names.iter().any(|known| known.eq_ignore_ascii_case(&name)) {
                names.push(name);
            }
        }
        names
    }

    fn load(&self, name: &str) -> Result<Option<PixelGrid>> {
        let mut broken = None;
        for source in &self.sources {
            match source.load(name) {
                Ok(Some(grid)) => return Ok(Some(grid)),
                Ok(None) => {}
                // a broken file shouldn't hide a preset of the same name
                Err(error @ Error::FlagDecode { .. }) => {
                    warn!("{error}");
                    broken.get_or_insert(error);
                }
                Err(error) => return Err(error),
            }
        }
        match broken {
            Some(error) => Err(error),
            None => Ok(None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const R: Color = Color::new(255, 0, 0);
    const G: Color = Color::new(0, 255, 0);
    const B: Color = Color::new(0, 0, 255);
    const W: Color = Color::new(255, 255, 255);

    // R G
    // B W
    fn quad() -> PixelGrid {
        PixelGrid::from_rows(vec![vec![R, G], vec![B, W]]).unwrap()
    }

    fn rows(grid: &PixelGrid) -> Vec<Vec<Color>> {
        (0..grid.height())
            .map(|y| (0..grid.width()).map(|x| grid.get(x, y).unwrap()).collect())
            .collect()
    }

    #[test]
    fn rejects_bad_dimensions() {
        assert!(matches!(
            PixelGrid::new(0, 2, vec![]),
            Err(Error::InvalidDimensions { .. })
        ));
        assert!(matches!(
            PixelGrid::new(2, 2, vec![R]),
            Err(Error::PixelCountMismatch { expected: 4, actual: 1 })
        ));
        assert!(quad().get(2, 0).is_none());
    }

    #[test]
    fn rotates_counter_clockwise() {
        let grid = quad();
        assert_eq!(rows(&grid.rotated(0).unwrap()), rows(&grid));
        assert_eq!(rows(&grid.rotated(90).unwrap()), vec![vec![G, W], vec![R, B]]);
        assert_eq!(rows(&grid.rotated(180).unwrap()), vec![vec![W, B], vec![G, R]]);
        assert_eq!(rows(&grid.rotated(270).unwrap()), vec![vec![B, R], vec![W, G]]);
        assert_eq!(rows(&grid.rotated(-90).unwrap()), rows(&grid.rotated(270).unwrap()));
        assert!(matches!(grid.rotated(45), Err(Error::InvalidRotation(45))));
    }

    #[test]
    fn quarter_turn_expands_instead_of_cropping() {
        let stripes = PixelGrid::stripes(&[R, G, B]).unwrap();
        let turned = stripes.rotated(270).unwrap();
        assert_eq!((turned.width(), turned.height()), (3, 1));
        assert_eq!(rows(&turned), vec![vec![B, G, R]]);
    }

    #[test]
    fn nearest_resize_spreads_stripes_evenly() {
        let stripes = PixelGrid::stripes(&[R, G, B]).unwrap();
        let resized = stripes.resized(2, 6).unwrap();
        assert_eq!((resized.width(), resized.height()), (2, 6));
        let column: Vec<Color> = (0..6).map(|y| resized.get(1, y).unwrap()).collect();
        assert_eq!(column, vec![R, R, G, G, B, B]);
    }

    #[test]
    fn nearest_resize_downsamples() {
        let grid = PixelGrid::from_rows(vec![vec![R, G, B, W]]).unwrap();
        assert_eq!(rows(&grid.resized(2, 1).unwrap()), vec![vec![G, W]]);
    }

    #[test]
    fn registry_matches_case_insensitively() {
        let registry = FlagRegistry::builtin();
        let flag = registry.provide("RainBow", 4, 6, 0).unwrap();
        assert_eq!((flag.width(), flag.height()), (4, 6));
        assert!(registry.names().iter().any(|name| name == "rainbow"));
    }

    #[test]
    fn registry_reports_missing_flags() {
        let registry = FlagRegistry::builtin();
        assert!(matches!(
            registry.provide("not-a-real-flag", 4, 4, 0),
            Err(Error::FlagNotFound(name)) if name == "not-a-real-flag"
        ));
        assert!(matches!(
            registry.provide("rainbow", 0, 4, 0),
            Err(Error::InvalidDimensions { .. })
        ));
        assert!(matches!(
            registry.provide("rainbow", 4, 4, 30),
            Err(Error::InvalidRotation(30))
        ));
    }

    #[test_log::test]
    fn directory_flags_shadow_presets() {
        let temp = tempfile::tempdir().unwrap();
        let dir = temp.path();
        let image = image::RgbImage::from_fn(2, 1, |x, _| {
            if x == 0 {
                image::Rgb([10, 20, 30])
            } else {
                image::Rgb([40, 50, 60])
            }
        });
        image.save(dir.join("Rainbow.png")).unwrap();
        fs::write(dir.join("broken.png"), b"not a png").unwrap();

        let registry = FlagRegistry::with_directory(dir);
        let flag = registry.provide("rainbow", 2, 1, 0).unwrap();
        assert_eq!(flag.get(0, 0), Some(Color::new(10, 20, 30)));
        assert_eq!(flag.get(1, 0), Some(Color::new(40, 50, 60)));

        // shows up once even though a preset shares the name
        let names = registry.names();
        assert_eq!(
            names.iter().filter(|n| n.eq_ignore_ascii_case("rainbow")).count(),
            1
        );
        assert!(names.contains(&"broken".to_string()));
        assert!(matches!(
            DirectorySource::new(dir).load("broken"),
            Err(Error::FlagDecode { .. })
        ));
    }

    #[test_log::test]
    fn broken_flag_reports_decode_error() {
        let temp = tempfile::tempdir().unwrap();
        fs::write(temp.path().join("myflag.png"), b"not a png").unwrap();
        fs::write(temp.path().join("transgender.png"), b"not a png either").unwrap();

        let registry = FlagRegistry::with_directory(temp.path());
        assert!(registry.names().contains(&"myflag".to_string()));
        assert!(matches!(
            registry.provide("myflag", 2, 2, 0),
            Err(Error::FlagDecode { path, .. }) if path.ends_with("myflag.png")
        ));
        // a preset of the same name still wins over a broken file
        assert!(registry.provide("transgender", 1, 5, 0).is_ok());
        assert!(matches!(
            registry.provide("nope", 2, 2, 0),
            Err(Error::FlagNotFound(_))
        ));
    }

    #[test]
    fn missing_directory_is_empty() {
        let source = DirectorySource::new("/nonexistent/flagfetch/flags");
        assert!(source.names().is_empty());
        assert!(source.load("rainbow").unwrap().is_none());
    }
}
