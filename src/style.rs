//! Title and body run styling.

use crate::model::{Bullet, OuterShadow, Paragraph, TextAlignment, TextFrame, TextRun, TextStyle};
use crate::options::StyleSpec;
use crate::segment::ContentBlock;

/// Size of the ` (i/n)` suffix relative to the main font size.
pub const INDEX_SUFFIX_SCALE: f64 = 0.3;

/// Builds styled runs for one deck.
#[derive(Debug, Clone, Copy)]
pub struct RunStyler {
    spec: StyleSpec,
    shadow: OuterShadow,
}

impl RunStyler {
    /// Create a styler using the soft drop shadow.
    pub fn new(spec: StyleSpec) -> Self {
        Self {
            spec,
            shadow: OuterShadow::soft(),
        }
    }

    /// Style of the title text: bold, underlined, full size, shadowed.
    pub fn title_style(&self) -> TextStyle {
        TextStyle {
            bold: true,
            underline: true,
            size: Some(self.spec.font_size),
            color: Some(self.spec.font_color),
            shadow: Some(self.shadow),
        }
    }

    /// Style of the slide index suffix: 30% size, same color and shadow.
    pub fn suffix_style(&self) -> TextStyle {
        TextStyle {
            bold: false,
            underline: false,
            size: Some(self.spec.font_size * INDEX_SUFFIX_SCALE),
            color: Some(self.spec.font_color),
            shadow: Some(self.shadow),
        }
    }

    /// Fill a title frame with the deck title and its ` (i/n)` suffix.
    ///
    /// `index` is 1-based.
    pub fn style_title(&self, frame: &mut TextFrame, title: &str, index: usize, total: usize) {
        frame.clear();
        let paragraph = frame.first_paragraph_mut();
        paragraph.add_run(TextRun::styled(title, self.title_style()));
        paragraph.add_run(TextRun::styled(
            index_suffix(index, total),
            self.suffix_style(),
        ));
    }

    /// Fill a body frame with one paragraph per line of `block`.
    ///
    /// Lines are appended after the frame's leftover empty paragraph, so the
    /// frame text starts with a newline and the centered lyric style is
    /// applied (see [`RunStyler::apply_leading_blank_rule`]).
    pub fn style_body(&self, frame: &mut TextFrame, block: &ContentBlock) {
        frame.clear();
        for line in &block.lines {
            let line = line.trim();
            if !line.is_empty() {
                frame.add_paragraph().add_run(TextRun::plain(line));
            }
        }
        self.apply_leading_blank_rule(frame);
    }

    /// Center and emphasize a body whose text starts with a blank line.
    ///
    /// The leading newline is dropped, then every paragraph loses its
    /// bullet, is centered, and every run gets the deck's size, bold, color,
    /// and shadow. Bodies without a leading blank keep the layout's
    /// left-aligned bulleted style. Returns whether the rule fired.
    pub fn apply_leading_blank_rule(&self, frame: &mut TextFrame) -> bool {
        let text = frame.text();
        let Some(rest) = text.strip_prefix('\n') else {
            return false;
        };
        frame.set_text(rest);

        for paragraph in &mut frame.paragraphs {
            self.emphasize(paragraph);
        }
        true
    }

    fn emphasize(&self, paragraph: &mut Paragraph) {
        paragraph.bullet = Bullet::None;
        paragraph.alignment = TextAlignment::Center;
        for run in &mut paragraph.runs {
            run.style.size = Some(self.spec.font_size);
            run.style.bold = true;
            run.style.color = Some(self.spec.font_color);
            run.style.shadow = Some(self.shadow);
        }
    }
}

/// ` (i/n)` with a leading space.
pub fn index_suffix(index: usize, total: usize) -> String {
    format!(" ({}/{})", index, total)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Rgb;

    fn styler() -> RunStyler {
        RunStyler::new(StyleSpec {
            font_size: 48.0,
            font_color: Rgb(255, 255, 0),
        })
    }

    fn block(lines: &[&str]) -> ContentBlock {
        ContentBlock {
            lines: lines.iter().map(|l| l.to_string()).collect(),
        }
    }

    #[test]
    fn test_index_suffix() {
        assert_eq!(index_suffix(1, 2), " (1/2)");
        assert_eq!(index_suffix(12, 12), " (12/12)");
    }

    #[test]
    fn test_title_runs() {
        let mut frame = TextFrame::new();
        styler().style_title(&mut frame, "My Song", 2, 3);

        assert_eq!(frame.paragraphs.len(), 1);
        let runs = &frame.paragraphs[0].runs;
        assert_eq!(runs.len(), 2);

        assert_eq!(runs[0].text, "My Song");
        assert!(runs[0].style.bold);
        assert!(runs[0].style.underline);
        assert_eq!(runs[0].style.size, Some(48.0));
        assert_eq!(runs[0].style.color, Some(Rgb(255, 255, 0)));
        assert_eq!(runs[0].style.shadow, Some(OuterShadow::soft()));

        assert_eq!(runs[1].text, " (2/3)");
        assert!(!runs[1].style.bold);
        assert!(!runs[1].style.underline);
        let size = runs[1].style.size.unwrap();
        assert!((size - 14.4).abs() < 1e-9);
        assert_eq!(runs[1].style.color, Some(Rgb(255, 255, 0)));
        assert_eq!(runs[1].style.shadow, Some(OuterShadow::soft()));
    }

    #[test]
    fn test_body_is_centered_lyric_style() {
        let mut frame = TextFrame::new();
        styler().style_body(&mut frame, &block(&["Line one", "Line two"]));

        assert_eq!(frame.text(), "Line one\nLine two");
        assert_eq!(frame.paragraphs.len(), 2);
        for paragraph in &frame.paragraphs {
            assert_eq!(paragraph.alignment, TextAlignment::Center);
            assert_eq!(paragraph.bullet, Bullet::None);
            assert_eq!(paragraph.runs.len(), 1);
            let style = &paragraph.runs[0].style;
            assert!(style.bold);
            assert!(!style.underline);
            assert_eq!(style.size, Some(48.0));
            assert_eq!(style.color, Some(Rgb(255, 255, 0)));
            assert!(style.shadow.is_some());
        }
    }

    #[test]
    fn test_body_skips_blank_lines() {
        let mut frame = TextFrame::new();
        styler().style_body(&mut frame, &block(&["  a  ", "", "   ", "b"]));
        let texts: Vec<String> = frame.paragraphs.iter().map(|p| p.plain_text()).collect();
        assert_eq!(texts, vec!["a", "b"]);
    }

    #[test]
    fn test_rule_does_not_fire_without_leading_blank() {
        let mut frame = TextFrame::new();
        frame.set_text("first\nsecond");

        assert!(!styler().apply_leading_blank_rule(&mut frame));
        for paragraph in &frame.paragraphs {
            assert_eq!(paragraph.alignment, TextAlignment::Left);
            assert_eq!(paragraph.bullet, Bullet::Inherit);
            assert!(!paragraph.runs[0].style.has_formatting());
        }
    }

    #[test]
    fn test_restyling_a_frame_replaces_old_text() {
        let styler = styler();
        let mut frame = TextFrame::new();
        styler.style_body(&mut frame, &block(&["old"]));
        styler.style_body(&mut frame, &block(&["new"]));
        assert_eq!(frame.text(), "new");
    }
}
