//! Color handling for Trellis drawings
//!
//! [`Color`] wraps the `DynamicColor` type from the color crate and accepts
//! any CSS color string. [`Palette`] hands out the default node fills: a
//! sequence of hues that walks the color wheel and lowers saturation each
//! time it wraps around, so neighbouring nodes rarely share a color.

use std::{
    hash::{Hash, Hasher},
    str::FromStr,
};

use color::DynamicColor;

/// Wrapper around the `DynamicColor` type from the color crate
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct Color {
    color: DynamicColor,
}

impl Eq for Color {}

impl Hash for Color {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.to_string().hash(state);
    }
}

impl Color {
    /// Create a new `Color` from a CSS color string such as `"#ff0000"`,
    /// `"rgb(255, 0, 0)"` or `"red"`.
    ///
    /// # Examples
    ///
    /// ```
    /// use trellis_core::color::Color;
    ///
    /// let red = Color::new("#ff0000").unwrap();
    /// let blue = Color::new("steelblue").unwrap();
    /// assert!(Color::new("not-a-color").is_err());
    /// ```
    pub fn new(color_str: &str) -> Result<Self, String> {
        match DynamicColor::from_str(color_str) {
            Ok(color) => Ok(Self { color }),
            Err(err) => Err(format!("invalid color `{color_str}`: {err}")),
        }
    }

    /// Creates an opaque color from 8-bit RGB channels.
    pub fn from_rgb8(red: u8, green: u8, blue: u8) -> Self {
        Self::new(&format!("#{red:02x}{green:02x}{blue:02x}"))
            .expect("hex triplet is a valid CSS color")
    }

    /// Returns a sanitized string usable inside an SVG `id` attribute.
    ///
    /// # Examples
    ///
    /// ```
    /// use trellis_core::color::Color;
    ///
    /// let id = Color::new("#ff8000").unwrap().to_id_safe_string();
    /// assert!(id.chars().all(|c| c.is_alphanumeric() || c == '_'));
    /// ```
    pub fn to_id_safe_string(self) -> String {
        let sanitized: String = self
            .to_string()
            .replace('#', "hex")
            .chars()
            .map(|c| if c.is_alphanumeric() { c } else { '_' })
            .collect();

        if sanitized.chars().next().is_some_and(|c| c.is_ascii_digit()) {
            format!("c_{sanitized}")
        } else {
            sanitized
        }
    }

}

impl Default for Color {
    fn default() -> Self {
        Self::new("black").expect("'black' is a valid CSS color")
    }
}

impl std::fmt::Display for Color {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.color)
    }
}

impl From<&Color> for svg::node::Value {
    fn from(color: &Color) -> Self {
        Self::from(color.to_string())
    }
}

impl From<Color> for svg::node::Value {
    fn from(color: Color) -> Self {
        Self::from(color.to_string())
    }
}

const HUE_STEP: f64 = 0.075;
const SATURATION_STEP: f64 = 0.2;
const BRIGHTNESS: f64 = 0.75;

/// Rotating source of default node colors.
///
/// Each call to [`next_color`](Self::next_color) advances the hue; once the
/// hue wraps past a full turn the saturation drops, and once saturation is
/// exhausted the cycle starts over.
///
/// # Examples
///
/// ```
/// use trellis_core::color::Palette;
///
/// let mut palette = Palette::new();
/// let first = palette.next_color();
/// let second = palette.next_color();
/// assert_ne!(first, second);
///
/// palette.reset();
/// assert_eq!(palette.next_color(), first);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Palette {
    hue: f64,
    saturation: f64,
    brightness: f64,
}

impl Palette {
    pub fn new() -> Self {
        Self {
            hue: 0.0,
            saturation: 1.0,
            brightness: BRIGHTNESS,
        }
    }

    /// Restarts the sequence from its first color.
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    /// Returns the current color and advances the sequence.
    pub fn next_color(&mut self) -> Color {
        let (red, green, blue) = hsb_to_rgb8(self.hue, self.saturation, self.brightness);

        self.hue += HUE_STEP;
        if self.hue > 1.0 {
            self.hue = 0.0;
            self.saturation -= SATURATION_STEP;
            if self.saturation <= 0.0 {
                self.saturation = 1.0;
            }
        }

        Color::from_rgb8(red, green, blue)
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self::new()
    }
}

impl Iterator for Palette {
    type Item = Color;

    fn next(&mut self) -> Option<Color> {
        Some(self.next_color())
    }
}

/// Converts hue/saturation/brightness (all in `[0, 1]`) to 8-bit RGB.
fn hsb_to_rgb8(hue: f64, saturation: f64, brightness: f64) -> (u8, u8, u8) {
    let sector = (hue.rem_euclid(1.0)) * 6.0;
    let chroma = brightness * saturation;
    let x = chroma * (1.0 - ((sector % 2.0) - 1.0).abs());
    let (r, g, b) = match sector as u32 {
        0 => (chroma, x, 0.0),
        1 => (x, chroma, 0.0),
        2 => (0.0, chroma, x),
        3 => (0.0, x, chroma),
        4 => (x, 0.0, chroma),
        _ => (chroma, 0.0, x),
    };
    let offset = brightness - chroma;
    let channel = |value: f64| ((value + offset) * 255.0).round().clamp(0.0, 255.0) as u8;

    (channel(r), channel(g), channel(b))
}
