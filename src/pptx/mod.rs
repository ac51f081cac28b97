//! PPTX (PowerPoint) presentation writer.
//!
//! Decks are serialized into the Office Open XML (.pptx) format: a ZIP
//! package holding one slide master, one Title-and-Content layout, a theme,
//! and one part per slide.

pub mod package;
pub mod template;
mod writer;

pub use package::{Package, Relationships};
pub use writer::{font_size_hundredths, to_bytes, write_deck, xml_text, APPLICATION};
