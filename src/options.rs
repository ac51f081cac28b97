//! Generation options and the validated specs derived from them.

use crate::color::{self, Rgb};
use crate::error::{Error, Result};
use std::path::PathBuf;

/// Font size used when none is given, in points.
pub const DEFAULT_FONT_SIZE: f64 = 48.0;

/// Background image transparency used when none is given.
pub const DEFAULT_TRANSPARENCY: f64 = 0.5;

/// Extension appended to output names.
pub const PPTX_EXTENSION: &str = "pptx";

/// Typography applied uniformly to every slide.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StyleSpec {
    /// Title and body font size in points
    pub font_size: f64,
    /// Title and body font color
    pub font_color: Rgb,
}

impl Default for StyleSpec {
    fn default() -> Self {
        Self {
            font_size: DEFAULT_FONT_SIZE,
            font_color: Rgb(255, 255, 255),
        }
    }
}

/// How every slide's background is produced.
#[derive(Debug, Clone, PartialEq)]
pub enum BackgroundSpec {
    /// A picture whose alpha channel is scaled by `transparency`.
    Image {
        /// Source image
        path: PathBuf,
        /// Alpha multiplier in `[0.0, 1.0]`; 0 is invisible, 1 keeps the original
        transparency: f64,
    },
    /// A solid background fill.
    SolidColor(Rgb),
}

impl Default for BackgroundSpec {
    fn default() -> Self {
        BackgroundSpec::SolidColor(Rgb(49, 51, 158))
    }
}

/// Options for generating a deck.
///
/// Defaults match the command-line tool: read `input.txt`, name the output
/// after the title, white 48pt text on the blue-purple `default` fill.
#[derive(Debug, Clone)]
pub struct GenerateOptions {
    /// Lyrics text file
    pub input: PathBuf,

    /// Output file; derived from the title when `None`
    pub output: Option<String>,

    /// Background image; solid fill when `None`
    pub background_image: Option<PathBuf>,

    /// Background color name (ignored when an image is set)
    pub background_color: String,

    /// Font color name
    pub font_color: String,

    /// Font size in points
    pub font_size: f64,

    /// Background image alpha multiplier
    pub transparency: f64,

    /// Directory for transient image files; system temp dir when `None`
    pub temp_dir: Option<PathBuf>,
}

impl Default for GenerateOptions {
    fn default() -> Self {
        Self {
            input: PathBuf::from("input.txt"),
            output: None,
            background_image: None,
            background_color: "default".to_string(),
            font_color: "white".to_string(),
            font_size: DEFAULT_FONT_SIZE,
            transparency: DEFAULT_TRANSPARENCY,
            temp_dir: None,
        }
    }
}

impl GenerateOptions {
    /// Create new options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the input file.
    pub fn with_input(mut self, path: impl Into<PathBuf>) -> Self {
        self.input = path.into();
        self
    }

    /// Set the output file name.
    pub fn with_output(mut self, output: impl Into<String>) -> Self {
        self.output = Some(output.into());
        self
    }

    /// Use a background image instead of a solid fill.
    pub fn with_background_image(mut self, path: impl Into<PathBuf>) -> Self {
        self.background_image = Some(path.into());
        self
    }

    /// Set the background color name.
    pub fn with_background_color(mut self, name: impl Into<String>) -> Self {
        self.background_color = name.into();
        self
    }

    /// Set the font color name.
    pub fn with_font_color(mut self, name: impl Into<String>) -> Self {
        self.font_color = name.into();
        self
    }

    /// Set the font size in points.
    pub fn with_font_size(mut self, size: f64) -> Self {
        self.font_size = size;
        self
    }

    /// Set the background image transparency.
    pub fn with_transparency(mut self, transparency: f64) -> Self {
        self.transparency = transparency;
        self
    }

    /// Set where transient image files are written.
    pub fn with_temp_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.temp_dir = Some(dir.into());
        self
    }

    /// Resolve colors and check ranges before any slide is built.
    ///
    /// Both color names are resolved even when an image replaces the
    /// background color, so a typo never slips through.
    pub fn validate(&self) -> Result<(StyleSpec, BackgroundSpec)> {
        let font_color = color::resolve(&self.font_color)?;
        let background_color = color::resolve(&self.background_color)?;

        if !self.font_size.is_finite() || self.font_size <= 0.0 {
            return Err(Error::InvalidOption(format!(
                "font size must be a positive number of points, got {}",
                self.font_size
            )));
        }

        let background = match self.background_image.as_ref() {
            Some(path) if !path.as_os_str().is_empty() => {
                if !(0.0..=1.0).contains(&self.transparency) {
                    return Err(Error::InvalidOption(format!(
                        "transparency must be between 0.0 and 1.0, got {}",
                        self.transparency
                    )));
                }
                BackgroundSpec::Image {
                    path: path.clone(),
                    transparency: self.transparency,
                }
            }
            _ => BackgroundSpec::SolidColor(background_color),
        };

        let style = StyleSpec {
            font_size: self.font_size,
            font_color,
        };

        Ok((style, background))
    }
}
