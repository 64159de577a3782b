//! 8-bit RGB and RGBA color values

use std::fmt;
use std::str::FromStr;


/// An opaque 8-bit RGB triple.
///
/// This is the unit the edge sampler counts: alpha is dropped, so two
/// pixels with the same channels but different opacity are the same
/// `Rgb`. Ordering is lexicographic on `(r, g, b)` and is only used to
/// make frequency rankings deterministic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Rgb {
    /// Red channel (0..=255)
    pub r: u8,
    /// Green channel (0..=255)
    pub g: u8,
    /// Blue channel (0..=255)
    pub b: u8,
}

impl Rgb {
    /// Create a color from its three channels.
    #[inline]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Create a neutral gray with all channels set to `v`.
    #[inline]
    pub const fn gray(v: u8) -> Self {
        Self { r: v, g: v, b: v }
    }

    /// Convert to a byte array [R, G, B].
    #[inline]
    pub fn to_bytes(self) -> [u8; 3] {
        [self.r, self.g, self.b]
    }

    /// Euclidean distance in RGB space.
    ///
    /// # Example
    /// ```
    /// use backdrop_fill::Rgb;
    /// let d = Rgb::new(0, 0, 0).distance(Rgb::new(3, 4, 0));
    /// assert_eq!(d, 5.0);
    /// ```
    #[inline]
    pub fn distance(self, other: Rgb) -> f32 {
        let dr = self.r as f32 - other.r as f32;
        let dg = self.g as f32 - other.g as f32;
        let db = self.b as f32 - other.b as f32;
        (dr * dr + dg * dg + db * db).sqrt()
    }

    /// Format as uppercase `#RRGGBB`.
    pub fn to_hex(self) -> String {
        format!("#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}

impl From<[u8; 3]> for Rgb {
    #[inline]
    fn from(bytes: [u8; 3]) -> Self {
        Self::new(bytes[0], bytes[1], bytes[2])
    }
}

impl FromStr for Rgb {
    type Err = ParseColorError;

    /// Parse a color from a hex string.
    ///
    /// Accepts `#RRGGBB`, `RRGGBB`, `#RGB` and `RGB`, case-insensitive,
    /// surrounding whitespace trimmed.
    ///
    /// ```
    /// use backdrop_fill::Rgb;
    ///
    /// let gray: Rgb = "#ccc".parse().unwrap();
    /// assert_eq!(gray, Rgb::gray(204));
    /// ```
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let digits = s.strip_prefix('#').unwrap_or(s);

        let mut nibbles = [0u8; 6];
        let mut len = 0;
        for (at, found) in digits.chars().enumerate() {
            let value = found
                .to_digit(16)
                .ok_or(ParseColorError::Digit { at, found })?;
            if let Some(slot) = nibbles.get_mut(len) {
                *slot = value as u8;
            }
            len += 1;
        }

        let n = nibbles;
        match len {
            // 0xF -> 0xFF
            3 => Ok(Self::new(n[0] * 17, n[1] * 17, n[2] * 17)),
            6 => Ok(Self::new((n[0] << 4) | n[1], (n[2] << 4) | n[3], (n[4] << 4) | n[5])),
            len => Err(ParseColorError::Length(len)),
        }
    }
}

/// Why a string isn't a hex color.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseColorError {
    /// Digit count after the optional `#` was neither 3 nor 6
    Length(usize),
    /// Not a hex digit; `at` counts from the first digit
    Digit { at: usize, found: char },
}

impl fmt::Display for ParseColorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseColorError::Length(len) => write!(f, "expected 3 or 6 hex digits, got {len}"),
            ParseColorError::Digit { at, found } => {
                write!(f, "{found:?} at digit {at} is not hexadecimal")
            }
        }
    }
}

impl std::error::Error for ParseColorError {}

/// A single image pixel: RGB plus 8-bit alpha, where alpha 0 is fully
/// transparent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    /// The value every erased pixel is set to. RGB is zeroed along with
    /// alpha so nothing leaks through later compositing.
    pub const TRANSPARENT: Rgba = Rgba::new(0, 0, 0, 0);

    #[inline]
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// A fully opaque pixel of the given color.
    #[inline]
    pub const fn opaque(color: Rgb) -> Self {
        Self::new(color.r, color.g, color.b, 255)
    }

    /// The color channels without alpha.
    #[inline]
    pub fn rgb(self) -> Rgb {
        Rgb::new(self.r, self.g, self.b)
    }

    #[inline]
    pub fn is_transparent(self) -> bool {
        self.a == 0
    }

    #[inline]
    pub fn to_bytes(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }
}

impl From<[u8; 4]> for Rgba {
    #[inline]
    fn from(bytes: [u8; 4]) -> Self {
        Self::new(bytes[0], bytes[1], bytes[2], bytes[3])
    }
}

/// Whether two colors are closer than `threshold` in RGB space.
///
/// Alpha never takes part. The comparison is strict: colors exactly
/// `threshold` apart are not similar, so a threshold of 0 matches nothing
/// and a threshold just above 0 matches only identical colors.
#[inline]
pub fn is_similar(a: Rgb, b: Rgb, threshold: f32) -> bool {
    a.distance(b) < threshold
}
