//! Named color palette.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// An sRGB color triple.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    /// Black, used for text shadows.
    pub const BLACK: Rgb = Rgb(0, 0, 0);

    /// Red component.
    pub fn r(&self) -> u8 {
        self.0
    }

    /// Green component.
    pub fn g(&self) -> u8 {
        self.1
    }

    /// Blue component.
    pub fn b(&self) -> u8 {
        self.2
    }

    /// Upper-case hex form used by DrawingML `srgbClr` (e.g. "31339E").
    pub fn to_hex(&self) -> String {
        format!("{:02X}{:02X}{:02X}", self.0, self.1, self.2)
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.to_hex())
    }
}

/// The closed palette, in the order it is presented to users.
const PALETTE: [(&str, Rgb); 8] = [
    ("white", Rgb(255, 255, 255)),
    ("black", Rgb(0, 0, 0)),
    ("red", Rgb(255, 0, 0)),
    ("green", Rgb(0, 255, 0)),
    ("blue", Rgb(0, 0, 255)),
    ("yellow", Rgb(255, 255, 0)),
    ("purple", Rgb(128, 0, 128)),
    ("default", Rgb(49, 51, 158)),
];

/// Names accepted by [`resolve`].
pub fn color_names() -> Vec<&'static str> {
    PALETTE.iter().map(|(name, _)| *name).collect()
}

/// Resolve a color name to its RGB triple.
///
/// Names are case-sensitive. Anything outside the palette yields
/// [`Error::UnsupportedColor`].
///
/// # Example
///
/// ```
/// use lyrics2pptx::color::{resolve, Rgb};
///
/// assert_eq!(resolve("default")?, Rgb(49, 51, 158));
/// assert!(resolve("pink").is_err());
/// # Ok::<(), lyrics2pptx::Error>(())
/// ```
pub fn resolve(name: &str) -> Result<Rgb> {
    PALETTE
        .iter()
        .find(|(candidate, _)| *candidate == name)
        .map(|(_, rgb)| *rgb)
        .ok_or_else(|| Error::UnsupportedColor {
            name: name.to_string(),
            supported: color_names(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_every_palette_name() {
        for name in color_names() {
            let first = resolve(name).unwrap();
            let second = resolve(name).unwrap();
            assert_eq!(first, second);
        }
        assert_eq!(resolve("white").unwrap(), Rgb(255, 255, 255));
        assert_eq!(resolve("purple").unwrap(), Rgb(128, 0, 128));
    }

    #[test]
    fn test_resolve_is_case_sensitive() {
        assert!(matches!(
            resolve("White"),
            Err(Error::UnsupportedColor { .. })
        ));
        assert!(resolve("").is_err());
        assert!(resolve(" white").is_err());
    }

    #[test]
    fn test_unsupported_color_lists_palette() {
        match resolve("orange") {
            Err(Error::UnsupportedColor { name, supported }) => {
                assert_eq!(name, "orange");
                assert_eq!(supported.len(), 8);
                assert_eq!(supported[0], "white");
                assert_eq!(supported[7], "default");
            }
            other => panic!("expected UnsupportedColor, got {:?}", other),
        }
    }

    #[test]
    fn test_hex() {
        assert_eq!(Rgb(49, 51, 158).to_hex(), "31339E");
        assert_eq!(Rgb::BLACK.to_hex(), "000000");
        assert_eq!(Rgb(255, 0, 128).to_string(), "#FF0080");
    }
}
