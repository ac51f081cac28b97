//! Deck, slide, and shape structures.

use super::TextFrame;
use crate::color::Rgb;
use crate::error::Result;
use serde::{Deserialize, Serialize};

/// English Metric Units: 914400 per inch, 12700 per point.
pub type Emu = i64;

/// Slide canvas size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Canvas {
    /// Width in EMUs
    pub width: Emu,
    /// Height in EMUs
    pub height: Emu,
}

impl Default for Canvas {
    /// 10" x 7.5" (4:3), the stock presentation size.
    fn default() -> Self {
        Self {
            width: 9_144_000,
            height: 6_858_000,
        }
    }
}

/// Edit restrictions for a picture shape.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PictureLocks {
    /// Cannot be grouped
    pub no_group: bool,
    /// Cannot be selected
    pub no_select: bool,
    /// Cannot be rotated
    pub no_rotate: bool,
    /// Aspect ratio cannot change
    pub no_change_aspect: bool,
    /// Cannot be moved
    pub no_move: bool,
    /// Cannot be resized
    pub no_resize: bool,
}

impl PictureLocks {
    /// Every restriction set; used for backdrops.
    pub const fn background() -> Self {
        Self {
            no_group: true,
            no_select: true,
            no_rotate: true,
            no_change_aspect: true,
            no_move: true,
            no_resize: true,
        }
    }

    /// Check if any restriction is set.
    pub fn is_locked(&self) -> bool {
        self.no_group
            || self.no_select
            || self.no_rotate
            || self.no_change_aspect
            || self.no_move
            || self.no_resize
    }
}

/// An embedded PNG picture placed on a slide.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Picture {
    /// Shape name shown in the selection pane
    pub name: String,
    /// Encoded PNG bytes
    #[serde(skip)]
    pub data: Vec<u8>,
    /// Left offset in EMUs
    pub x: Emu,
    /// Top offset in EMUs
    pub y: Emu,
    /// Width in EMUs
    pub width: Emu,
    /// Height in EMUs
    pub height: Emu,
    /// Edit restrictions
    #[serde(default)]
    pub locks: PictureLocks,
}

/// A shape in a slide's shape tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Shape {
    /// The layout's title placeholder
    Title {
        /// Title text
        frame: TextFrame,
    },
    /// The layout's content placeholder
    Body {
        /// Body text
        frame: TextFrame,
    },
    /// A picture
    Picture(Picture),
}

/// One slide built on the Title-and-Content layout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Slide {
    /// Shapes in z-order, back to front
    pub shapes: Vec<Shape>,

    /// Solid background fill; `None` inherits the master background
    #[serde(skip_serializing_if = "Option::is_none")]
    pub background: Option<Rgb>,
}

impl Default for Slide {
    fn default() -> Self {
        Self::title_and_content()
    }
}

impl Slide {
    /// A slide with empty title and body placeholders.
    pub fn title_and_content() -> Self {
        Self {
            shapes: vec![
                Shape::Title {
                    frame: TextFrame::new(),
                },
                Shape::Body {
                    frame: TextFrame::new(),
                },
            ],
            background: None,
        }
    }

    /// The title placeholder's text frame.
    pub fn title(&self) -> Option<&TextFrame> {
        self.shapes.iter().find_map(|shape| match shape {
            Shape::Title { frame } => Some(frame),
            _ => None,
        })
    }

    /// Mutable access to the title placeholder, adding it if missing.
    pub fn title_mut(&mut self) -> &mut TextFrame {
        let index = match self
            .shapes
            .iter()
            .position(|s| matches!(s, Shape::Title { .. }))
        {
            Some(index) => index,
            None => {
                self.shapes.push(Shape::Title {
                    frame: TextFrame::new(),
                });
                self.shapes.len() - 1
            }
        };
        match &mut self.shapes[index] {
            Shape::Title { frame } => frame,
            _ => unreachable!("index points at the title placeholder"),
        }
    }

    /// The body placeholder's text frame.
    pub fn body(&self) -> Option<&TextFrame> {
        self.shapes.iter().find_map(|shape| match shape {
            Shape::Body { frame } => Some(frame),
            _ => None,
        })
    }

    /// Mutable access to the body placeholder, adding it if missing.
    pub fn body_mut(&mut self) -> &mut TextFrame {
        let index = match self
            .shapes
            .iter()
            .position(|s| matches!(s, Shape::Body { .. }))
        {
            Some(index) => index,
            None => {
                self.shapes.push(Shape::Body {
                    frame: TextFrame::new(),
                });
                self.shapes.len() - 1
            }
        };
        match &mut self.shapes[index] {
            Shape::Body { frame } => frame,
            _ => unreachable!("index points at the body placeholder"),
        }
    }

    /// Add a picture on top of the existing shapes; returns its z-index.
    pub fn add_picture(&mut self, picture: Picture) -> usize {
        self.shapes.push(Shape::Picture(picture));
        self.shapes.len() - 1
    }

    /// Move the shape at `index` behind every other shape.
    pub fn send_to_back(&mut self, index: usize) {
        if index < self.shapes.len() {
            let shape = self.shapes.remove(index);
            self.shapes.insert(0, shape);
        }
    }

    /// Pictures on this slide, back to front.
    pub fn pictures(&self) -> impl Iterator<Item = &Picture> {
        self.shapes.iter().filter_map(|shape| match shape {
            Shape::Picture(picture) => Some(picture),
            _ => None,
        })
    }

    /// Set a solid background fill.
    pub fn set_background_fill(&mut self, color: Rgb) {
        self.background = Some(color);
    }
}

/// A generated presentation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Deck {
    /// Title from the first input line
    pub title: String,

    /// Slide size
    pub canvas: Canvas,

    /// Slides in order
    pub slides: Vec<Slide>,
}

impl Deck {
    /// Create an empty deck with the stock canvas.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            canvas: Canvas::default(),
            slides: Vec::new(),
        }
    }

    /// Append a Title-and-Content slide and return it.
    pub fn add_slide(&mut self) -> &mut Slide {
        self.slides.push(Slide::title_and_content());
        let last = self.slides.len() - 1;
        &mut self.slides[last]
    }

    /// Number of slides.
    pub fn slide_count(&self) -> usize {
        self.slides.len()
    }

    /// Pretty-printed JSON outline of the deck (picture bytes omitted).
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| crate::error::Error::Serialize(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::TextRun;

    #[test]
    fn test_new_slide_has_placeholders() {
        let slide = Slide::title_and_content();
        assert_eq!(slide.shapes.len(), 2);
        assert!(slide.title().is_some());
        assert!(slide.body().is_some());
        assert_eq!(slide.pictures().count(), 0);
        assert!(slide.background.is_none());
    }

    #[test]
    fn test_send_to_back() {
        let mut slide = Slide::title_and_content();
        let index = slide.add_picture(Picture {
            name: "Background".to_string(),
            ..Default::default()
        });
        assert_eq!(index, 2);

        slide.send_to_back(index);
        assert!(matches!(slide.shapes[0], Shape::Picture(_)));
        assert!(matches!(slide.shapes[1], Shape::Title { .. }));
        assert!(matches!(slide.shapes[2], Shape::Body { .. }));

        // Out of range is ignored
        slide.send_to_back(10);
        assert_eq!(slide.shapes.len(), 3);
    }

    #[test]
    fn test_background_locks() {
        let locks = PictureLocks::background();
        assert!(locks.is_locked());
        assert!(locks.no_group && locks.no_select && locks.no_rotate);
        assert!(locks.no_change_aspect && locks.no_move && locks.no_resize);
        assert!(!PictureLocks::default().is_locked());
    }

    #[test]
    fn test_deck_json_omits_picture_bytes() {
        let mut deck = Deck::new("Song");
        let slide = deck.add_slide();
        slide
            .title_mut()
            .first_paragraph_mut()
            .add_run(TextRun::plain("Song"));
        slide.add_picture(Picture {
            name: "Background".to_string(),
            data: vec![1, 2, 3],
            ..Default::default()
        });

        let json = deck.to_json().unwrap();
        assert!(json.contains("\"title\": \"Song\""));
        assert!(json.contains("\"type\": \"picture\""));
        assert!(!json.contains("\"data\""));
    }
}
