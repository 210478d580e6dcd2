//! Colors and the palette clusters draw their default colors from.
//!
//! The default palette is Category10 followed by a deterministic extension: hues are
//! stepped by the golden ratio over a few saturation/value bands, and candidates too
//! close to an existing color are skipped. It is not a perceptual (CAM02) optimizer like
//! Glasbey, but it keeps neighbouring legend entries distinguishable for a few hundred
//! colors, which is what a label editor needs.

use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

use rand::prelude::*;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// A 24-bit RGB color, written as `#rrggbb`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct Color {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
}

impl Color {
    /// A color from its three channels.
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse `#rrggbb` (the leading `#` is optional, case-insensitive).
    pub fn from_hex(s: &str) -> Result<Self> {
        let hex = s.strip_prefix('#').unwrap_or(s);
        if hex.len() != 6 || !hex.is_ascii() {
            return Err(Error::InvalidColor(s.to_string()));
        }
        let channel = |range: std::ops::Range<usize>| {
            u8::from_str_radix(&hex[range], 16).map_err(|_| Error::InvalidColor(s.to_string()))
        };
        Ok(Self::rgb(channel(0..2)?, channel(2..4)?, channel(4..6)?))
    }

    fn distance_sq(self, other: Self) -> i32 {
        let dr = i32::from(self.r) - i32::from(other.r);
        let dg = i32::from(self.g) - i32::from(other.g);
        let db = i32::from(self.b) - i32::from(other.b);
        dr * dr + dg * dg + db * db
    }

    fn from_hsv(h: f32, s: f32, v: f32) -> Self {
        let h6 = (h.rem_euclid(1.0)) * 6.0;
        let c = v * s;
        let x = c * (1.0 - ((h6 % 2.0) - 1.0).abs());
        let m = v - c;
        let (r, g, b) = match h6 as u32 {
            0 => (c, x, 0.0),
            1 => (x, c, 0.0),
            2 => (0.0, c, x),
            3 => (0.0, x, c),
            4 => (x, 0.0, c),
            _ => (c, 0.0, x),
        };
        let to_u8 = |f: f32| ((f + m) * 255.0).round().clamp(0.0, 255.0) as u8;
        Self::rgb(to_u8(r), to_u8(g), to_u8(b))
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl FromStr for Color {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_hex(s)
    }
}

impl From<Color> for String {
    fn from(c: Color) -> Self {
        c.to_string()
    }
}

impl TryFrom<String> for Color {
    type Error = Error;

    fn try_from(s: String) -> Result<Self> {
        Self::from_hex(&s)
    }
}

const CATEGORY10: [Color; 10] = [
    Color::rgb(0x1f, 0x77, 0xb4),
    Color::rgb(0xff, 0x7f, 0x0e),
    Color::rgb(0x2c, 0xa0, 0x2c),
    Color::rgb(0xd6, 0x27, 0x28),
    Color::rgb(0x94, 0x67, 0xbd),
    Color::rgb(0x8c, 0x56, 0x4b),
    Color::rgb(0xe3, 0x77, 0xc2),
    Color::rgb(0x7f, 0x7f, 0x7f),
    Color::rgb(0xbc, 0xbd, 0x22),
    Color::rgb(0x17, 0xbe, 0xcf),
];

const GOLDEN: f64 = 0.618_033_988_749_895;
const BANDS: [(f32, f32); 6] = [
    (0.75, 0.85),
    (0.55, 0.65),
    (0.85, 0.55),
    (0.40, 0.90),
    (0.95, 0.75),
    (0.30, 0.60),
];
/// Minimum squared RGB distance between a generated color and every earlier one.
const MIN_DISTANCE_SQ: i32 = 24 * 24;
const MAX_MISSES: usize = 512;

/// Number of distinct 24-bit colors; no palette can hold more.
pub const MAX_PALETTE_LENGTH: usize = 1 << 24;
/// Odd, hence coprime to `2^24`: `k * CUBE_STRIDE mod 2^24` visits every color once.
const CUBE_STRIDE: u64 = 0x9e_3779;

const TABLEAU10: [Color; 10] = [
    Color::rgb(0x4e, 0x79, 0xa7),
    Color::rgb(0xf2, 0x8e, 0x2b),
    Color::rgb(0xe1, 0x57, 0x59),
    Color::rgb(0x76, 0xb7, 0xb2),
    Color::rgb(0x59, 0xa1, 0x4f),
    Color::rgb(0xed, 0xc9, 0x48),
    Color::rgb(0xb0, 0x7a, 0xa1),
    Color::rgb(0xff, 0x9d, 0xa7),
    Color::rgb(0x9c, 0x75, 0x5f),
    Color::rgb(0xba, 0xb0, 0xac),
];

const SET1: [Color; 9] = [
    Color::rgb(0xe4, 0x1a, 0x1c),
    Color::rgb(0x37, 0x7e, 0xb8),
    Color::rgb(0x4d, 0xaf, 0x4a),
    Color::rgb(0x98, 0x4e, 0xa3),
    Color::rgb(0xff, 0x7f, 0x00),
    Color::rgb(0xff, 0xff, 0x33),
    Color::rgb(0xa6, 0x56, 0x28),
    Color::rgb(0xf7, 0x81, 0xbf),
    Color::rgb(0x99, 0x99, 0x99),
];

const DARK2: [Color; 8] = [
    Color::rgb(0x1b, 0x9e, 0x77),
    Color::rgb(0xd9, 0x5f, 0x02),
    Color::rgb(0x75, 0x70, 0xb3),
    Color::rgb(0xe7, 0x29, 0x8a),
    Color::rgb(0x66, 0xa6, 0x1e),
    Color::rgb(0xe6, 0xab, 0x02),
    Color::rgb(0xa6, 0x76, 0x1d),
    Color::rgb(0x66, 0x66, 0x66),
];

/// Named base palettes accepted by [`Palette::named`].
pub const PALETTE_NAMES: [&str; 4] = ["category10", "tableau10", "set1", "dark2"];

/// An ordered list of colors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Palette {
    colors: Vec<Color>,
    /// Position in the generated hue sequence, so repeated extension keeps moving forward.
    cursor: usize,
    /// Position in the RGB cube walk; non-zero once the hue sequence is exhausted.
    cube_cursor: u64,
}

impl Default for Palette {
    fn default() -> Self {
        Self::generate(super::params::DEFAULT_PALETTE_LENGTH)
    }
}

impl Palette {
    /// The ten Category10 colors.
    pub fn category10() -> Self {
        Self::from_base(&CATEGORY10)
    }

    /// A named base palette (see [`PALETTE_NAMES`]), extended or truncated to `length`.
    ///
    /// `glasbey_category10` is accepted as an alias of `category10`.
    pub fn named(name: &str, length: usize) -> Result<Self> {
        let base: &[Color] = match name.to_ascii_lowercase().as_str() {
            "category10" | "glasbey_category10" => &CATEGORY10,
            "tableau10" => &TABLEAU10,
            "set1" => &SET1,
            "dark2" => &DARK2,
            _ => return Err(Error::UnknownPalette(name.to_string())),
        };
        Ok(Self::from_colors(base.to_vec(), length))
    }

    fn from_base(base: &[Color]) -> Self {
        Self {
            colors: base.to_vec(),
            cursor: 0,
            cube_cursor: 0,
        }
    }

    /// Category10, extended (or truncated) to exactly `length` colors.
    pub fn generate(length: usize) -> Self {
        Self::from_colors(CATEGORY10.to_vec(), length)
    }

    /// A caller-supplied palette, extended (or truncated) to exactly `length` colors.
    pub fn from_colors(colors: Vec<Color>, length: usize) -> Self {
        let mut palette = Self {
            colors,
            cursor: 0,
            cube_cursor: 0,
        };
        if palette.colors.len() > length {
            palette.colors.truncate(length);
        } else {
            palette.extend_to(length);
        }
        palette
    }

    /// Number of colors.
    pub fn len(&self) -> usize {
        self.colors.len()
    }

    /// True for a zero-length palette.
    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    /// All colors, in palette order.
    pub fn colors(&self) -> &[Color] {
        &self.colors
    }

    /// Color at `index`, if the palette is that long.
    pub fn get(&self, index: usize) -> Option<Color> {
        self.colors.get(index).copied()
    }

    /// Shuffle in place; seeded for reproducibility, thread RNG otherwise.
    pub fn shuffle(&mut self, seed: Option<u64>) {
        let mut rng: Box<dyn RngCore> = match seed {
            Some(s) => Box::new(StdRng::seed_from_u64(s)),
            None => Box::new(rand::rng()),
        };
        self.colors.shuffle(&mut rng);
    }

    /// Append generated colors until the palette holds `length` entries.
    ///
    /// Colors come from a spaced hue sequence first. Once that runs dry the rest of the
    /// RGB cube is walked, so any `length` up to [`MAX_PALETTE_LENGTH`] is reached;
    /// larger requests stop there.
    pub fn extend_to(&mut self, length: usize) {
        let length = length.min(MAX_PALETTE_LENGTH);
        if self.cube_cursor == 0 {
            self.extend_by_hue(length);
        }
        if self.colors.len() < length {
            self.extend_by_cube(length);
        }
    }

    /// Golden-ratio hue steps, skipping candidates too close to an existing color. The
    /// spacing halves after every run of misses; gives up once it reaches zero.
    fn extend_by_hue(&mut self, length: usize) {
        let mut min_distance_sq = MIN_DISTANCE_SQ;
        let mut misses = 0;
        while self.colors.len() < length && min_distance_sq > 0 {
            let step = self.cursor;
            self.cursor += 1;
            let hue = (0.11 + step as f64 * GOLDEN).fract() as f32;
            let (s, v) = BANDS[(step / 7) % BANDS.len()];
            let candidate = Color::from_hsv(hue, s, v);
            let distinct = self
                .colors
                .iter()
                .all(|c| c.distance_sq(candidate) >= min_distance_sq);
            if distinct {
                self.colors.push(candidate);
                misses = 0;
            } else {
                misses += 1;
                if misses > MAX_MISSES {
                    min_distance_sq /= 2;
                    misses = 0;
                }
            }
        }
    }

    /// Every 24-bit color in a scattered order, skipping colors already present.
    fn extend_by_cube(&mut self, length: usize) {
        let mut present: HashSet<Color> = self.colors.iter().copied().collect();
        let cube = MAX_PALETTE_LENGTH as u64;
        while self.colors.len() < length && self.cube_cursor < cube {
            let k = (self.cube_cursor * CUBE_STRIDE) % cube;
            self.cube_cursor += 1;
            let c = Color::rgb((k >> 16) as u8, (k >> 8) as u8, k as u8);
            if present.insert(c) {
                self.colors.push(c);
            }
        }
    }

    /// The first palette color not in `used`, extending the palette when all are taken.
    ///
    /// When every 24-bit color is already in use the first palette color is reused.
    pub fn next_unused(&mut self, used: &HashSet<Color>) -> Color {
        loop {
            if let Some(c) = self.colors.iter().copied().find(|c| !used.contains(c)) {
                return c;
            }
            let before = self.colors.len();
            self.extend_to((before * 2).max(before + 1));
            if self.colors.len() == before {
                return self.colors.first().copied().unwrap_or(CATEGORY10[0]);
            }
        }
    }
}
