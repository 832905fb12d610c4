//! Color type and its operations.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Color in RGBA format.
///
/// Serializes to and from a hex string like `"#FF0000FF"`.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Default, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(from = "String", into = "String"))]
pub struct Color {
    r: u8,
    g: u8,
    b: u8,
    a: u8,
}

impl Color {
    /// Opaque black.
    pub const BLACK: Color = Color::rgba(0, 0, 0, 255);
    /// Opaque white.
    pub const WHITE: Color = Color::rgba(255, 255, 255, 255);
    /// Opaque red.
    pub const RED: Color = Color::rgba(255, 0, 0, 255);
    /// Opaque green.
    pub const GREEN: Color = Color::rgba(0, 128, 0, 255);
    /// Opaque blue.
    pub const BLUE: Color = Color::rgba(0, 0, 255, 255);
    /// Opaque gray.
    pub const GRAY: Color = Color::rgba(128, 128, 128, 255);
    /// Opaque light gray.
    pub const LIGHT_GRAY: Color = Color::rgba(211, 211, 211, 255);
    /// Opaque orange.
    pub const ORANGE: Color = Color::rgba(255, 165, 0, 255);
    /// Opaque purple.
    pub const PURPLE: Color = Color::rgba(128, 0, 128, 255);
    /// Fully transparent black.
    pub const TRANSPARENT: Color = Color::rgba(0, 0, 0, 0);

    /// Creates a new color from the components.
    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Red component.
    pub const fn r(&self) -> u8 {
        self.r
    }

    /// Green component.
    pub const fn g(&self) -> u8 {
        self.g
    }

    /// Blue component.
    pub const fn b(&self) -> u8 {
        self.b
    }

    /// Alpha component. 0 is fully transparent, 255 is fully opaque.
    pub const fn a(&self) -> u8 {
        self.a
    }

    /// Same color with the given alpha component.
    pub fn with_alpha(&self, a: u8) -> Self {
        Self { a, ..*self }
    }

    /// Returns true if the alpha component is zero.
    pub fn is_transparent(&self) -> bool {
        self.a == 0
    }

    /// Components of the color as an array.
    pub const fn to_u8_array(&self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }

    /// Hex string representation of the color, e.g. `"#00FF00FF"`.
    pub fn to_hex(&self) -> String {
        format!("#{:02X}{:02X}{:02X}{:02X}", self.r, self.g, self.b, self.a)
    }

    /// Parses a color from a `#RRGGBB` or `#RRGGBBAA` hex string.
    pub fn try_from_hex(hex: &str) -> Option<Self> {
        let value = hex.strip_prefix('#')?;
        match value.len() {
            6 => {
                let r = u8::from_str_radix(&value[0..2], 16).ok()?;
                let g = u8::from_str_radix(&value[2..4], 16).ok()?;
                let b = u8::from_str_radix(&value[4..6], 16).ok()?;
                Some(Self::rgba(r, g, b, 255))
            }
            8 => {
                let r = u8::from_str_radix(&value[0..2], 16).ok()?;
                let g = u8::from_str_radix(&value[2..4], 16).ok()?;
                let b = u8::from_str_radix(&value[4..6], 16).ok()?;
                let a = u8::from_str_radix(&value[6..8], 16).ok()?;
                Some(Self::rgba(r, g, b, a))
            }
            _ => None,
        }
    }
}

impl From<String> for Color {
    fn from(value: String) -> Self {
        Color::try_from_hex(&value).unwrap_or_default()
    }
}

impl From<Color> for String {
    fn from(value: Color) -> Self {
        value.to_hex()
    }
}
