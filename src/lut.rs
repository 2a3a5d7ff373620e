//! Lookup tables and how normalized values are mapped onto them.

use std::fmt;
use rgb::RGB8;
use serde::{Deserialize, Serialize};
use crate::{ColorRange, Error, Result};
use crate::palettes::{self, ty::PaletteType};

/// How a normalized value `t` ∈ \[0, 1\] selects a color of a [`Lut`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Interpolation {
    /// Nearest entry: index `⌊t (N-1) + 0.5⌋` (round half up).
    Discrete,
    /// Linear interpolation between the two bracketing entries.
    #[default]
    Continuous,
}

/// An ordered, immutable table of N ≥ 2 colors.
#[derive(Clone, PartialEq, Eq)]
pub struct Lut {
    name: String,
    colors: Vec<RGB8>, // Invariant: length ≥ 2
    typ: PaletteType,
}

impl fmt::Debug for Lut {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Lut")
            .field("name", &self.name)
            .field("len", &self.colors.len())
            .field("typ", &self.typ)
            .finish()
    }
}

/// Length of a raw LUT file: 256 reds, then 256 greens, then 256 blues.
const RAW_LEN: usize = 768;
/// Some raw LUT files carry a 32 bytes header before the table.
const RAW_HEADER_LEN: usize = 32;

impl Lut {
    /// Create a custom LUT from its colors.
    ///
    /// # Example
    ///
    /// ```
    /// use rgb::RGB8;
    /// use roi_color_coder::{Lut, Interpolation};
    /// let lut = Lut::new("bw", vec![RGB8::new(0, 0, 0),
    ///                                RGB8::new(255, 255, 255)]).unwrap();
    /// assert_eq!(lut.sample(0.5, Interpolation::Continuous),
    ///            RGB8::new(128, 128, 128));
    /// ```
    pub fn new(name: impl Into<String>, colors: Vec<RGB8>) -> Result<Self> {
        let name = name.into();
        if colors.len() < 2 {
            return Err(Error::InvalidLut(format!(
                "{name:?} has {} color(s), at least 2 are required",
                colors.len())));
        }
        Ok(Lut { name, colors, typ: PaletteType::Seq })
    }

    /// Return the catalog LUT called `name` (case insensitive).  See
    /// [`Lut::catalog_names`].
    pub fn named(name: &str) -> Result<Self> {
        palettes::ALL_PALETTES.iter()
            .find(|p| p.name.eq_ignore_ascii_case(name))
            .map(|p| Lut { name: p.name.to_string(), colors: p.rgb.clone(),
                           typ: p.typ })
            .ok_or_else(|| Error::InvalidLut(format!(
                "no LUT named {name:?} in the catalog")))
    }

    /// Names of the LUTs known to [`Lut::named`].
    pub fn catalog_names() -> impl Iterator<Item = &'static str> {
        palettes::ALL_PALETTES.iter().map(|p| p.name)
    }

    /// Parse a raw binary LUT: 256 red bytes followed by 256 green and
    /// 256 blue bytes, optionally preceded by a 32 bytes header.
    pub fn from_raw(name: impl Into<String>, bytes: &[u8]) -> Result<Self> {
        let table = match bytes.len() {
            RAW_LEN => bytes,
            n if n == RAW_LEN + RAW_HEADER_LEN => &bytes[RAW_HEADER_LEN ..],
            n => return Err(Error::InvalidLut(format!(
                "raw LUT must be {RAW_LEN} or {} bytes long, got {n}",
                RAW_LEN + RAW_HEADER_LEN))),
        };
        let (r, gb) = table.split_at(256);
        let (g, b) = gb.split_at(256);
        let colors = r.iter().zip(g).zip(b)
            .map(|((&r, &g), &b)| RGB8 { r, g, b })
            .collect();
        Lut::new(name, colors)
    }

    /// Parse a text LUT: one color per line, either `r g b` or
    /// `index r g b`, separated by white space, commas or tabs.  Blank
    /// lines are ignored, as is a first non blank line that does not start
    /// with a digit (column headers).
    pub fn from_text(name: impl Into<String>, text: &str) -> Result<Self> {
        let mut colors = Vec::new();
        let mut first = true;
        for (lineno, line) in text.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() { continue }
            if std::mem::take(&mut first)
                && !line.starts_with(|c: char| c.is_ascii_digit()) {
                continue
            }
            let fields: Vec<&str> = line
                .split(|c: char| c == ',' || c.is_whitespace())
                .filter(|f| !f.is_empty())
                .collect();
            let rgb = match fields.len() {
                3 => &fields[..],
                4 => &fields[1 ..],
                n => return Err(Error::InvalidLut(format!(
                    "line {}: expected 3 or 4 columns, got {n}", lineno + 1))),
            };
            let mut c = [0u8; 3];
            for (ch, f) in c.iter_mut().zip(rgb) {
                *ch = f.parse().map_err(|_| Error::InvalidLut(format!(
                    "line {}: {f:?} is not in 0..=255", lineno + 1)))?;
            }
            colors.push(RGB8 { r: c[0], g: c[1], b: c[2] });
        }
        Lut::new(name, colors)
    }

    /// Name of the LUT.
    pub fn name(&self) -> &str { &self.name }

    /// Number of colors in the LUT (at least 2).
    #[allow(clippy::len_without_is_empty)]
    pub fn len(&self) -> usize { self.colors.len() }

    /// The colors of the LUT, in order.
    pub fn colors(&self) -> &[RGB8] { &self.colors }

    /// Says whether the LUT is `Seq`uential, `Div`ergent or
    /// `Qual`itative.  Custom LUTs are reported as sequential.
    pub fn typ(&self) -> PaletteType { self.typ }

    /// The same LUT, last color first.
    pub fn reversed(&self) -> Self {
        let mut colors = self.colors.clone();
        colors.reverse();
        Lut { name: format!("{} (reversed)", self.name), colors,
              typ: self.typ }
    }

    /// Returns the color corresponding to `t` ∈ \[0., 1.\].  Values
    /// outside are clamped and NaN is treated as `0.`.
    pub fn sample(&self, t: f64, mode: Interpolation) -> RGB8 {
        let t = if t.is_nan() { 0. } else { t.clamp(0., 1.) };
        let last = self.colors.len() - 1;
        let x = t * last as f64;
        match mode {
            Interpolation::Discrete => {
                self.colors[((x + 0.5).floor() as usize).min(last)]
            }
            Interpolation::Continuous => {
                let i = (x.floor() as usize).min(last - 1);
                let f = x - i as f64;
                let c0 = self.colors[i];
                let c1 = self.colors[i + 1];
                let lerp = |a: u8, b: u8| {
                    (a as f64 + f * (b as f64 - a as f64)).round() as u8 };
                RGB8 { r: lerp(c0.r, c1.r), g: lerp(c0.g, c1.g),
                       b: lerp(c0.b, c1.b) }
            }
        }
    }

    /// Bind the LUT to an interpolation mode.
    pub fn sampler(&self, mode: Interpolation) -> Sampler<'_> {
        Sampler { lut: self, mode }
    }
}

/// A [`Lut`] together with the [`Interpolation`] used to read it.
///
/// Region colors and legend colors both go through a `Sampler`, so a
/// legend always shows the colors painted on the regions.
#[derive(Clone, Copy, Debug)]
pub struct Sampler<'a> {
    lut: &'a Lut,
    mode: Interpolation,
}

impl Sampler<'_> {
    pub fn lut(&self) -> &Lut { self.lut }
    pub fn mode(&self) -> Interpolation { self.mode }
}

impl ColorRange<RGB8> for Sampler<'_> {
    #[inline]
    fn rgb(&self, t: f64) -> RGB8 { self.lut.sample(t, self.mode) }
}
