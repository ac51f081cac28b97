//! Text frame, paragraph, and run models.

use crate::color::Rgb;
use serde::{Deserialize, Serialize};

/// Text alignment within a paragraph.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextAlignment {
    /// Inherit from the layout (left for the body placeholder).
    #[default]
    Left,
    /// Centered.
    Center,
}

/// Bullet handling for a paragraph.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Bullet {
    /// Use whatever bullet the placeholder's list style defines.
    #[default]
    Inherit,
    /// Suppress the bullet marker.
    None,
}

/// Outer (drop) shadow effect that can be attached to any run, anchored at
/// the text center.
///
/// Distances are in EMUs, the direction in 60000ths of a degree and the
/// alpha in 1000ths of a percent, which is how DrawingML stores them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OuterShadow {
    /// Blur radius in EMUs.
    pub blur_radius: i64,
    /// Offset distance in EMUs.
    pub distance: i64,
    /// Offset direction in 60000ths of a degree.
    pub direction: u32,
    /// Whether the shadow rotates with its shape.
    pub rotate_with_shape: bool,
    /// Shadow color.
    pub color: Rgb,
    /// Opacity in 1000ths of a percent (100000 = opaque).
    pub alpha: u32,
}

impl OuterShadow {
    /// Soft black shadow at 50% opacity, 3pt blur, offset 3pt straight down.
    pub const fn soft() -> Self {
        Self {
            blur_radius: 38_100,
            distance: 38_100,
            direction: 5_400_000,
            rotate_with_shape: false,
            color: Rgb::BLACK,
            alpha: 50_000,
        }
    }
}

impl Default for OuterShadow {
    fn default() -> Self {
        Self::soft()
    }
}

/// Character formatting for a run.
///
/// `None` means "inherit from the placeholder".
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TextStyle {
    /// Bold text
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub bold: bool,

    /// Single underline
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub underline: bool,

    /// Font size in points
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<f64>,

    /// Solid text color
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<Rgb>,

    /// Drop shadow
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shadow: Option<OuterShadow>,
}

impl TextStyle {
    /// Check if style has any formatting.
    pub fn has_formatting(&self) -> bool {
        self.bold
            || self.underline
            || self.size.is_some()
            || self.color.is_some()
            || self.shadow.is_some()
    }
}

/// A run of text with consistent styling.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TextRun {
    /// The text content
    pub text: String,

    /// Text styling
    #[serde(default, skip_serializing_if = "is_default_style")]
    pub style: TextStyle,
}

fn is_default_style(style: &TextStyle) -> bool {
    *style == TextStyle::default()
}

impl TextRun {
    /// Create a plain text run with no styling.
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            style: TextStyle::default(),
        }
    }

    /// Create a styled text run.
    pub fn styled(text: impl Into<String>, style: TextStyle) -> Self {
        Self {
            text: text.into(),
            style,
        }
    }

    /// Check if this run is empty.
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}

/// A paragraph of text.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Paragraph {
    /// Text runs in this paragraph
    #[serde(default)]
    pub runs: Vec<TextRun>,

    /// Text alignment
    #[serde(default, skip_serializing_if = "is_default_alignment")]
    pub alignment: TextAlignment,

    /// Bullet override
    #[serde(default, skip_serializing_if = "is_inherited_bullet")]
    pub bullet: Bullet,
}

fn is_default_alignment(a: &TextAlignment) -> bool {
    *a == TextAlignment::Left
}

fn is_inherited_bullet(b: &Bullet) -> bool {
    *b == Bullet::Inherit
}

impl Paragraph {
    /// Create a new empty paragraph.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a paragraph with the given text.
    pub fn with_text(text: impl Into<String>) -> Self {
        Self {
            runs: vec![TextRun::plain(text)],
            ..Default::default()
        }
    }

    /// Add a text run to this paragraph.
    pub fn add_run(&mut self, run: TextRun) {
        self.runs.push(run);
    }

    /// Get the plain text content.
    pub fn plain_text(&self) -> String {
        self.runs.iter().map(|r| r.text.as_str()).collect()
    }
}

/// The text body of a placeholder shape.
///
/// Like a real placeholder, a frame always holds at least one paragraph:
/// clearing it leaves a single empty paragraph behind, and new paragraphs
/// are appended after it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextFrame {
    /// Paragraphs in order; never empty.
    pub paragraphs: Vec<Paragraph>,
}

impl Default for TextFrame {
    fn default() -> Self {
        Self {
            paragraphs: vec![Paragraph::new()],
        }
    }
}

impl TextFrame {
    /// Create a frame holding one empty paragraph.
    pub fn new() -> Self {
        Self::default()
    }

    /// Remove all text, keeping one empty paragraph.
    pub fn clear(&mut self) {
        self.paragraphs.truncate(1);
        if let Some(first) = self.paragraphs.first_mut() {
            *first = Paragraph::new();
        } else {
            self.paragraphs.push(Paragraph::new());
        }
    }

    /// Append a new empty paragraph and return it.
    pub fn add_paragraph(&mut self) -> &mut Paragraph {
        self.paragraphs.push(Paragraph::new());
        let last = self.paragraphs.len() - 1;
        &mut self.paragraphs[last]
    }

    /// The first paragraph.
    pub fn first_paragraph_mut(&mut self) -> &mut Paragraph {
        if self.paragraphs.is_empty() {
            self.paragraphs.push(Paragraph::new());
        }
        &mut self.paragraphs[0]
    }

    /// Paragraph texts joined with `\n`.
    pub fn text(&self) -> String {
        self.paragraphs
            .iter()
            .map(Paragraph::plain_text)
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Replace all content with `text`, one plain paragraph per line.
    pub fn set_text(&mut self, text: &str) {
        self.paragraphs = text.split('\n').map(Paragraph::with_text).collect();
        if self.paragraphs.is_empty() {
            self.paragraphs.push(Paragraph::new());
        }
    }
}
