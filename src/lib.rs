//! # lyrics2pptx
//!
//! Turn a plain-text lyrics file into a styled PowerPoint slide deck.
//!
//! The first line of the file is the title; every blank-line-separated
//! block after it becomes one slide. Each slide repeats the title with a
//! small ` (i/n)` counter and shows its block centered, bold, and shadowed
//! over either a solid color or a translucent background picture.
//!
//! ## Quick Start
//!
//! ```no_run
//! use lyrics2pptx::{generate, GenerateOptions};
//!
//! let options = GenerateOptions::new()
//!     .with_input("amazing_grace.txt")
//!     .with_font_color("yellow")
//!     .with_background_color("black");
//!
//! let generated = generate(&options)?;
//! println!("{} slides -> {}", generated.slide_count, generated.output_path.display());
//! # Ok::<(), lyrics2pptx::Error>(())
//! ```
//!
//! ## Step by Step
//!
//! ```no_run
//! use lyrics2pptx::{segment, DeckAssembler, GenerateOptions};
//!
//! let (style, background) = GenerateOptions::new().validate()?;
//! let lyrics = segment(&std::fs::read_to_string("input.txt")?)?;
//! let deck = DeckAssembler::new(style, background).assemble(&lyrics)?;
//! let bytes = lyrics2pptx::pptx::to_bytes(&deck)?;
//! std::fs::write("deck.pptx", bytes)?;
//! # Ok::<(), lyrics2pptx::Error>(())
//! ```

pub mod assemble;
pub mod background;
pub mod color;
pub mod error;
pub mod model;
pub mod options;
pub mod pptx;
pub mod segment;
pub mod style;

// Re-exports
pub use assemble::{generate, plan, resolve_output_name, save, DeckAssembler, Generated};
pub use background::BackgroundComposer;
pub use color::{color_names, resolve as resolve_color, Rgb};
pub use error::{Error, Result};
pub use model::{Canvas, Deck, Paragraph, Picture, Shape, Slide, TextFrame, TextRun, TextStyle};
pub use options::{BackgroundSpec, GenerateOptions, StyleSpec};
pub use segment::{segment, ContentBlock, Lyrics};
pub use style::RunStyler;

/// Convert lyrics text to .pptx bytes with the default style and background.
///
/// # Example
///
/// ```
/// let bytes = lyrics2pptx::text_to_pptx("My Song\nLine one\n\nLine two")?;
/// assert_eq!(&bytes[..2], b"PK");
/// # Ok::<(), lyrics2pptx::Error>(())
/// ```
pub fn text_to_pptx(text: &str) -> Result<Vec<u8>> {
    let (style, background) = GenerateOptions::default().validate()?;
    let lyrics = segment(text)?;
    let deck = DeckAssembler::new(style, background).assemble(&lyrics)?;
    pptx::to_bytes(&deck)
}
