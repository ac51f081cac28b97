//! Slide backgrounds: translucent locked pictures or solid fills.

use crate::error::{Error, Result};
use crate::model::{Canvas, Picture, PictureLocks, Slide};
use crate::options::BackgroundSpec;
use image::{ImageFormat, RgbaImage};
use std::fs;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// Name given to background picture shapes.
pub const BACKGROUND_PICTURE_NAME: &str = "Background Picture";

/// Applies one deck-wide background to each slide.
#[derive(Debug, Clone)]
pub struct BackgroundComposer {
    spec: BackgroundSpec,
    temp_dir: Option<PathBuf>,
}

impl BackgroundComposer {
    /// Create a composer for `spec`, writing transient files to the system
    /// temp directory.
    pub fn new(spec: BackgroundSpec) -> Self {
        Self {
            spec,
            temp_dir: None,
        }
    }

    /// Write transient files to `dir` instead.
    pub fn with_temp_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.temp_dir = Some(dir.into());
        self
    }

    /// Give `slide` its background.
    ///
    /// With an image, a full-bleed locked picture is placed behind every
    /// other shape; otherwise the slide gets a solid fill.
    pub fn apply(&self, slide: &mut Slide, canvas: Canvas) -> Result<()> {
        match &self.spec {
            BackgroundSpec::Image { path, transparency } => {
                let image = load_translucent(path, *transparency)?;
                self.with_transient(&image, |png| insert_background_picture(slide, canvas, png))
            }
            BackgroundSpec::SolidColor(color) => {
                slide.set_background_fill(*color);
                Ok(())
            }
        }
    }

    /// Run `insert` against a transient PNG of `image`, then remove the file
    /// whether or not `insert` succeeded.
    fn with_transient<F>(&self, image: &RgbaImage, insert: F) -> Result<()>
    where
        F: FnOnce(&Path) -> Result<()>,
    {
        let transient = self.write_transient(image)?;
        let inserted = insert(transient.path());
        let transient_path = transient.path().to_path_buf();
        if let Err(e) = transient.close() {
            tracing::warn!(
                "Failed to remove transient image {}: {e}",
                transient_path.display()
            );
        }
        inserted
    }

    /// Encode `image` as PNG into a uniquely named transient file.
    ///
    /// The file is deleted when the returned handle is dropped or closed.
    fn write_transient(&self, image: &RgbaImage) -> Result<NamedTempFile> {
        let mut builder = tempfile::Builder::new();
        builder.prefix("lyrics2pptx-bg-").suffix(".png");
        let mut file = match &self.temp_dir {
            Some(dir) => builder.tempfile_in(dir)?,
            None => builder.tempfile()?,
        };

        let mut writer = BufWriter::new(file.as_file_mut());
        image.write_to(&mut writer, ImageFormat::Png)?;
        writer.flush()?;
        drop(writer);

        tracing::debug!("Wrote transient background {}", file.path().display());
        Ok(file)
    }
}

/// Open an image and scale its alpha channel by `transparency`.
pub fn load_translucent(path: &Path, transparency: f64) -> Result<RgbaImage> {
    let image = image::open(path).map_err(|e| Error::ImageOpen {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;
    let mut rgba = image.into_rgba8();
    scale_alpha(&mut rgba, transparency);
    Ok(rgba)
}

/// Multiply every pixel's alpha by `factor` (0.0 clears, 1.0 keeps).
pub fn scale_alpha(image: &mut RgbaImage, factor: f64) {
    for pixel in image.pixels_mut() {
        pixel[3] = scaled_alpha(pixel[3], factor);
    }
}

fn scaled_alpha(alpha: u8, factor: f64) -> u8 {
    (f64::from(alpha) * factor).round().clamp(0.0, 255.0) as u8
}

/// Embed the PNG at `png_path` as a locked full-canvas picture at the back.
fn insert_background_picture(slide: &mut Slide, canvas: Canvas, png_path: &Path) -> Result<()> {
    let data = fs::read(png_path)?;
    let index = slide.add_picture(Picture {
        name: BACKGROUND_PICTURE_NAME.to_string(),
        data,
        x: 0,
        y: 0,
        width: canvas.width,
        height: canvas.height,
        locks: PictureLocks::background(),
    });
    slide.send_to_back(index);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Rgb;
    use crate::model::Shape;
    use image::{Rgb as RgbPixel, RgbImage, Rgba};

    fn write_rgba_png(dir: &Path, alphas: [u8; 4]) -> PathBuf {
        let mut img = RgbaImage::new(2, 2);
        for (pixel, alpha) in img.pixels_mut().zip(alphas) {
            *pixel = Rgba([10, 20, 30, alpha]);
        }
        let path = dir.join("source.png");
        img.save(&path).unwrap();
        path
    }

    fn entries(dir: &Path) -> usize {
        fs::read_dir(dir).unwrap().count()
    }

    #[test]
    fn test_scaled_alpha() {
        assert_eq!(scaled_alpha(255, 0.5), 128);
        assert_eq!(scaled_alpha(200, 0.5), 100);
        assert_eq!(scaled_alpha(200, 0.0), 0);
        assert_eq!(scaled_alpha(200, 1.0), 200);
        assert_eq!(scaled_alpha(7, 0.25), 2);
        // Exact halves round away from zero
        assert_eq!(scaled_alpha(1, 0.5), 1);
        assert_eq!(scaled_alpha(5, 0.5), 3);
    }

    #[test]
    fn test_solid_fill() {
        let composer = BackgroundComposer::new(BackgroundSpec::SolidColor(Rgb(49, 51, 158)));
        let mut slide = Slide::title_and_content();
        composer.apply(&mut slide, Canvas::default()).unwrap();

        assert_eq!(slide.background, Some(Rgb(49, 51, 158)));
        assert_eq!(slide.pictures().count(), 0);
    }

    #[test]
    fn test_image_alpha_is_scaled_and_transient_removed() {
        let source_dir = tempfile::tempdir().unwrap();
        let scratch = tempfile::tempdir().unwrap();
        let path = write_rgba_png(source_dir.path(), [255, 128, 0, 10]);

        let composer = BackgroundComposer::new(BackgroundSpec::Image {
            path,
            transparency: 0.5,
        })
        .with_temp_dir(scratch.path());

        let mut slide = Slide::title_and_content();
        composer.apply(&mut slide, Canvas::default()).unwrap();

        assert_eq!(entries(scratch.path()), 0);

        let picture = slide.pictures().next().unwrap();
        let decoded = image::load_from_memory(&picture.data).unwrap().into_rgba8();
        let alphas: Vec<u8> = decoded.pixels().map(|p| p[3]).collect();
        assert_eq!(alphas, vec![128, 64, 0, 5]);
        assert_eq!(decoded.get_pixel(0, 0).0[..3], [10, 20, 30]);
    }

    #[test]
    fn test_picture_is_locked_full_bleed_and_at_the_back() {
        let source_dir = tempfile::tempdir().unwrap();
        let path = write_rgba_png(source_dir.path(), [255; 4]);
        let composer = BackgroundComposer::new(BackgroundSpec::Image {
            path,
            transparency: 1.0,
        })
        .with_temp_dir(source_dir.path());

        let canvas = Canvas::default();
        let mut slide = Slide::title_and_content();
        composer.apply(&mut slide, canvas).unwrap();

        match &slide.shapes[0] {
            Shape::Picture(picture) => {
                assert_eq!(picture.name, BACKGROUND_PICTURE_NAME);
                assert_eq!((picture.x, picture.y), (0, 0));
                assert_eq!(picture.width, canvas.width);
                assert_eq!(picture.height, canvas.height);
                assert_eq!(picture.locks, PictureLocks::background());
            }
            other => panic!("expected picture at the back, got {:?}", other),
        }
        assert!(matches!(slide.shapes[1], Shape::Title { .. }));
        assert!(matches!(slide.shapes[2], Shape::Body { .. }));
        assert!(slide.background.is_none());
        // Only the source image remains
        assert_eq!(entries(source_dir.path()), 1);
    }

    #[test]
    fn test_failed_insert_still_removes_transient() {
        let scratch = tempfile::tempdir().unwrap();
        let composer = BackgroundComposer::new(BackgroundSpec::Image {
            path: PathBuf::from("unused.png"),
            transparency: 0.5,
        })
        .with_temp_dir(scratch.path());

        let mut seen = None;
        let err = composer
            .with_transient(&RgbaImage::new(2, 2), |png| {
                assert!(png.exists());
                seen = Some(png.to_path_buf());
                Err(Error::Image("insert failed".into()))
            })
            .unwrap_err();

        assert!(matches!(err, Error::Image(ref msg) if msg == "insert failed"));
        assert!(!seen.unwrap().exists());
        assert_eq!(entries(scratch.path()), 0);
    }

    #[test]
    fn test_opaque_image_gains_alpha_channel() {
        let source_dir = tempfile::tempdir().unwrap();
        let path = source_dir.path().join("opaque.png");
        RgbImage::from_pixel(3, 1, RgbPixel([1, 2, 3])).save(&path).unwrap();

        let rgba = load_translucent(&path, 0.5).unwrap();
        assert!(rgba.pixels().all(|p| p[3] == 128));
    }

    #[test]
    fn test_unreadable_image_is_fatal_and_leaves_nothing() {
        let scratch = tempfile::tempdir().unwrap();
        let missing = scratch.path().join("missing.png");
        let composer = BackgroundComposer::new(BackgroundSpec::Image {
            path: missing,
            transparency: 0.5,
        })
        .with_temp_dir(scratch.path());

        let mut slide = Slide::title_and_content();
        let err = composer.apply(&mut slide, Canvas::default()).unwrap_err();
        assert!(matches!(err, Error::ImageOpen { .. }));
        assert_eq!(entries(scratch.path()), 0);
        assert_eq!(slide.pictures().count(), 0);
    }

    #[test]
    fn test_undecodable_image_is_fatal() {
        let scratch = tempfile::tempdir().unwrap();
        let bogus = scratch.path().join("bogus.png");
        fs::write(&bogus, b"not an image").unwrap();

        let err = load_translucent(&bogus, 0.5).unwrap_err();
        assert!(matches!(err, Error::ImageOpen { .. }));
    }
}
