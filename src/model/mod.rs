//! In-memory presentation model.
//!
//! The pipeline builds these structures slide by slide; the `pptx` writer
//! turns them into PresentationML parts.

mod deck;
mod paragraph;

pub use deck::*;
pub use paragraph::*;
