//! Splitting lyrics text into a title and slide-sized blocks.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};

/// Alternate line break emitted by some lyric sources (`\x0b`).
const VERTICAL_TAB: char = '\u{000B}';

/// Byte order mark some editors prepend to UTF-8 files.
const BOM: char = '\u{FEFF}';

/// A blank-line-delimited group of lines; becomes exactly one slide.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentBlock {
    /// Stripped, non-empty lines in source order.
    pub lines: Vec<String>,
}

impl ContentBlock {
    /// Build a block from raw text, stripping every line and dropping blanks.
    pub fn from_text(text: &str) -> Self {
        Self {
            lines: text
                .split('\n')
                .map(str::trim)
                .filter(|line| !line.is_empty())
                .map(String::from)
                .collect(),
        }
    }

    /// Check if the block has no lines.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

/// Segmented input: the deck title plus its ordered blocks.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Lyrics {
    /// First line of the input, stripped.
    pub title: String,
    /// Slide blocks in source order.
    pub blocks: Vec<ContentBlock>,
}

impl Lyrics {
    /// Number of slides this input will produce.
    pub fn slide_count(&self) -> usize {
        self.blocks.len()
    }
}

/// Convert `\r\n` and lone `\r` to `\n`.
fn normalize_newlines(text: &str) -> String {
    if !text.contains('\r') {
        return text.to_string();
    }
    text.replace("\r\n", "\n").replace('\r', "\n")
}

/// Replace vertical tabs with newlines.
pub fn normalize_vertical_tabs(text: &str) -> String {
    text.replace(VERTICAL_TAB, "\n")
}

/// Split the body (everything after the title line) into blocks.
///
/// Blocks are separated by a blank line; whatever is left of a block after
/// stripping must be non-empty to survive.
pub fn split_blocks(body: &str) -> Vec<ContentBlock> {
    let body = normalize_vertical_tabs(body);
    body.split("\n\n")
        .map(str::trim)
        .filter(|chunk| !chunk.is_empty())
        .map(ContentBlock::from_text)
        .filter(|block| !block.is_empty())
        .collect()
}

/// Parse the full text of a lyrics file.
///
/// The first line is the title regardless of its content. A file with no
/// lines at all is [`Error::EmptyInput`]; a file with only a title yields
/// zero blocks.
///
/// # Example
///
/// ```
/// let lyrics = lyrics2pptx::segment("My Song\nLine one\nLine two\n\nLine three\n")?;
/// assert_eq!(lyrics.title, "My Song");
/// assert_eq!(lyrics.blocks.len(), 2);
/// assert_eq!(lyrics.blocks[0].lines, ["Line one", "Line two"]);
/// # Ok::<(), lyrics2pptx::Error>(())
/// ```
pub fn segment(text: &str) -> Result<Lyrics> {
    let text = text.strip_prefix(BOM).unwrap_or(text);
    if text.is_empty() {
        return Err(Error::EmptyInput);
    }

    let text = normalize_newlines(text);
    let (first, rest) = text.split_once('\n').unwrap_or((text.as_str(), ""));

    Ok(Lyrics {
        title: first.trim().to_string(),
        blocks: split_blocks(rest),
    })
}
