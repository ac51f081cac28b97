//! Deck assembly and the end-to-end generate pipeline.

use crate::background::BackgroundComposer;
use crate::error::{Error, Result};
use crate::model::Deck;
use crate::options::{BackgroundSpec, GenerateOptions, StyleSpec, PPTX_EXTENSION};
use crate::pptx;
use crate::segment::{self, Lyrics};
use crate::style::RunStyler;
use std::fs;
use std::path::{Path, PathBuf};

/// Builds one slide per content block.
#[derive(Debug, Clone)]
pub struct DeckAssembler {
    styler: RunStyler,
    composer: BackgroundComposer,
}

impl DeckAssembler {
    /// Create an assembler for the given style and background.
    pub fn new(style: StyleSpec, background: BackgroundSpec) -> Self {
        Self {
            styler: RunStyler::new(style),
            composer: BackgroundComposer::new(background),
        }
    }

    /// Write transient background files to `dir`.
    pub fn with_temp_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.composer = self.composer.with_temp_dir(dir);
        self
    }

    /// Build the deck for `lyrics`.
    ///
    /// Slide `i` (1-based) gets the title with an ` (i/n)` suffix and the
    /// lines of block `i`. A title-only input yields a deck without slides.
    pub fn assemble(&self, lyrics: &Lyrics) -> Result<Deck> {
        let mut deck = Deck::new(lyrics.title.clone());
        let canvas = deck.canvas;
        let total = lyrics.slide_count();

        for (i, block) in lyrics.blocks.iter().enumerate() {
            let slide = deck.add_slide();
            self.styler
                .style_title(slide.title_mut(), &lyrics.title, i + 1, total);
            self.styler.style_body(slide.body_mut(), block);
            self.composer.apply(slide, canvas)?;
            tracing::debug!("Built slide {}/{} ({} lines)", i + 1, total, block.lines.len());
        }

        Ok(deck)
    }
}

/// Build a deck with default transient-file placement.
pub fn assemble(lyrics: &Lyrics, style: &StyleSpec, background: &BackgroundSpec) -> Result<Deck> {
    DeckAssembler::new(*style, background.clone()).assemble(lyrics)
}

/// Output file name for a deck.
///
/// No name (or an empty one) gives `<title>.pptx`; a name without a
/// `.pptx` suffix (any case) gets one appended.
pub fn resolve_output_name(output: Option<&str>, title: &str) -> PathBuf {
    let name = match output {
        Some(name) if !name.is_empty() => name.to_string(),
        _ => title.to_string(),
    };
    let suffix = format!(".{}", PPTX_EXTENSION);
    if name.to_lowercase().ends_with(&suffix) {
        PathBuf::from(name)
    } else {
        PathBuf::from(format!("{}{}", name, suffix))
    }
}

/// Write `deck` to `path`, returning the absolute path written.
pub fn save(deck: &Deck, path: &Path) -> Result<PathBuf> {
    let bytes = pptx::to_bytes(deck)?;
    let absolute = std::path::absolute(path).unwrap_or_else(|_| path.to_path_buf());

    fs::write(&absolute, bytes).map_err(|source| Error::Save {
        path: absolute.clone(),
        source,
    })?;

    tracing::info!("Saved {} slides to {}", deck.slide_count(), absolute.display());
    Ok(absolute)
}

/// Summary of a finished generation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Generated {
    /// Deck title
    pub title: String,
    /// Number of slides written
    pub slide_count: usize,
    /// Absolute path of the saved file
    pub output_path: PathBuf,
}

/// Read and validate everything, then build the deck without saving it.
pub fn plan(options: &GenerateOptions) -> Result<Deck> {
    let (style, background) = options.validate()?;
    let text = fs::read_to_string(&options.input)?;
    let lyrics = segment::segment(&text)?;

    let mut assembler = DeckAssembler::new(style, background);
    if let Some(dir) = &options.temp_dir {
        assembler = assembler.with_temp_dir(dir);
    }
    assembler.assemble(&lyrics)
}

/// Generate and save a deck from a lyrics file.
///
/// Options are validated before the input is read, and nothing is written
/// unless every slide was built.
pub fn generate(options: &GenerateOptions) -> Result<Generated> {
    let deck = plan(options)?;
    let output = resolve_output_name(options.output.as_deref(), &deck.title);
    let output_path = save(&deck, &output)?;

    Ok(Generated {
        title: deck.title.clone(),
        slide_count: deck.slide_count(),
        output_path,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Rgb;
    use crate::model::{Bullet, TextAlignment};

    fn lyrics(text: &str) -> Lyrics {
        segment::segment(text).unwrap()
    }

    #[test]
    fn test_resolve_output_name() {
        assert_eq!(resolve_output_name(None, "Amazing Grace"), PathBuf::from("Amazing Grace.pptx"));
        assert_eq!(resolve_output_name(Some(""), "T"), PathBuf::from("T.pptx"));
        assert_eq!(resolve_output_name(Some("deck"), "T"), PathBuf::from("deck.pptx"));
        assert_eq!(resolve_output_name(Some("deck.pptx"), "T"), PathBuf::from("deck.pptx"));
        assert_eq!(resolve_output_name(Some("DECK.PPTX"), "T"), PathBuf::from("DECK.PPTX"));
        assert_eq!(resolve_output_name(Some("deck.ppt"), "T"), PathBuf::from("deck.ppt.pptx"));
    }

    #[test]
    fn test_assemble_two_blocks() {
        let deck = assemble(
            &lyrics("My Song\nLine one\nLine two\n\nLine three"),
            &StyleSpec::default(),
            &BackgroundSpec::default(),
        )
        .unwrap();

        assert_eq!(deck.title, "My Song");
        assert_eq!(deck.slide_count(), 2);

        let first = &deck.slides[0];
        assert_eq!(first.title().unwrap().text(), "My Song (1/2)");
        assert_eq!(first.body().unwrap().text(), "Line one\nLine two");
        assert_eq!(first.background, Some(Rgb(49, 51, 158)));

        let second = &deck.slides[1];
        assert_eq!(second.title().unwrap().text(), "My Song (2/2)");
        assert_eq!(second.body().unwrap().text(), "Line three");
        let paragraph = &second.body().unwrap().paragraphs[0];
        assert_eq!(paragraph.alignment, TextAlignment::Center);
        assert_eq!(paragraph.bullet, Bullet::None);
    }

    #[test]
    fn test_title_only_has_no_slides() {
        let deck = assemble(
            &lyrics("Just a title"),
            &StyleSpec::default(),
            &BackgroundSpec::default(),
        )
        .unwrap();
        assert_eq!(deck.title, "Just a title");
        assert_eq!(deck.slide_count(), 0);
    }

    #[test]
    fn test_save_reports_absolute_path() {
        let dir = tempfile::tempdir().unwrap();
        let deck = Deck::new("T");
        let path = save(&deck, &dir.path().join("t.pptx")).unwrap();
        assert!(path.is_absolute());
        assert!(path.exists());
    }

    #[test]
    fn test_save_into_missing_directory_fails() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("missing").join("t.pptx");
        let err = save(&Deck::new("T"), &target).unwrap_err();
        assert!(matches!(err, Error::Save { .. }));
    }

    #[test]
    fn test_plan_checks_colors_before_reading_input() {
        let options = GenerateOptions::new()
            .with_input("/definitely/not/here.txt")
            .with_font_color("orange");
        let err = plan(&options).unwrap_err();
        assert!(matches!(err, Error::UnsupportedColor { .. }));
    }
}
