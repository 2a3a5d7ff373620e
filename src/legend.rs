//! Color ramp legends.

use image::{Rgba, RgbaImage};
use log::{debug, trace};
use rgb::{RGB8, RGBA8};
use serde::{Deserialize, Serialize};
use crate::font::{self, FONT_HEIGHT};
use crate::{ColorRange, Error, Interpolation, Lut, Range, Result};

/// Largest number of decimal places [`LabelFormat::Auto`] uses.
const AUTO_MAX_PLACES: usize = 6;
/// Largest number of decimal places of any label format.
const MAX_PLACES: usize = 17;
/// Upper bound of the legend ramp length, in pixels.
const MAX_LENGTH: u32 = 1 << 14;
/// Upper bound of the other legend sizes, in pixels.
const MAX_SIZE: u32 = 1 << 10;
/// Upper bound of the font scale.
const MAX_LABEL_SCALE: u32 = 64;
/// Blank pixels between tick marks and labels.
const LABEL_GAP: u32 = 2;

/// How tick values are printed.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LabelFormat {
    /// Fewest decimal places showing every tick exactly (up to 6),
    /// switching to scientific notation for magnitudes ≥ 1e5 or
    /// < 1e-3.  Places are added until neighbouring ticks get
    /// different labels.
    #[default]
    Auto,
    /// Fixed number of decimal places.
    Decimal(usize),
    /// Scientific notation with this number of decimal places.
    Scientific(usize),
}

impl LabelFormat {
    pub fn validate(&self) -> Result<()> {
        match *self {
            LabelFormat::Decimal(p) | LabelFormat::Scientific(p)
                if p > MAX_PLACES =>
                Err(Error::InvalidConfig(format!(
                    "{p} decimal places is more than f64 holds"))),
            _ => Ok(()),
        }
    }

    /// Replace `Auto` by the explicit format suited to `values`.
    fn resolve(self, values: &[f64]) -> LabelFormat {
        if self != LabelFormat::Auto { return self }
        let m = values.iter().fold(0., |m: f64, x| m.max(x.abs()));
        if m == 0. { return LabelFormat::Decimal(0) }
        let mut f = if !(1e-3 .. 1e5).contains(&m) {
            LabelFormat::Scientific(2)
        } else {
            let exact = |p: usize| {
                let s = 10f64.powi(p as i32);
                values.iter().all(|x| ((x * s).round() / s - x).abs()
                                       <= 1e-9 * x.abs().max(1.)) };
            match (0 ..= AUTO_MAX_PLACES).find(|&p| exact(p)) {
                Some(p) => LabelFormat::Decimal(p),
                None => {
                    let step = if values.len() > 1 {
                        (values[values.len() - 1] - values[0]).abs()
                            / (values.len() - 1) as f64
                    } else { m };
                    let p = (1. - step.log10().floor()).max(0.) as usize;
                    LabelFormat::Decimal(p.min(AUTO_MAX_PLACES))
                }
            }
        };
        // Neighbouring ticks with different values need different
        // labels: add places, then go scientific.
        let distinct = |f: LabelFormat| values.windows(2).all(|w| {
            w[0] == w[1] || f.format(w[0]) != f.format(w[1]) });
        while !distinct(f) {
            f = match f {
                LabelFormat::Decimal(p) if p < AUTO_MAX_PLACES =>
                    LabelFormat::Decimal(p + 1),
                LabelFormat::Decimal(_) => LabelFormat::Scientific(2),
                LabelFormat::Scientific(p) if p < MAX_PLACES =>
                    LabelFormat::Scientific(p + 1),
                _ => break,
            };
        }
        f
    }

    /// Print `x` according to the (resolved) format.  Negative zero
    /// is printed without sign.
    pub fn format(&self, x: f64) -> String {
        match *self {
            LabelFormat::Auto => LabelFormat::Auto.resolve(&[x]).format(x),
            LabelFormat::Decimal(p) => {
                let s = 10f64.powi(p as i32);
                let x = if (x * s).round() == 0. { 0. } else { x };
                format!("{x:.p$}")
            }
            LabelFormat::Scientific(p) => {
                let x = if x == 0. { 0. } else { x };
                format!("{x:.p$e}")
            }
        }
    }
}

/// Direction of the color ramp.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    /// Low values at the bottom, labels on the right.
    #[default]
    Vertical,
    /// Low values on the left, labels below.
    Horizontal,
}

/// Geometry and colors of the legend image.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LegendLayout {
    pub orientation: Orientation,
    /// Size of the ramp along its long axis, one LUT sample per pixel.
    pub length: u32,
    /// Size of the ramp across.
    pub thickness: u32,
    pub tick_length: u32,
    /// Blank border around everything.
    pub margin: u32,
    /// Size of a font pixel.
    pub label_scale: u32,
    pub draw_labels: bool,
    pub background: RGBA8,
    /// Color of tick marks and labels.
    pub foreground: RGBA8,
}

impl Default for LegendLayout {
    fn default() -> Self {
        LegendLayout {
            orientation: Orientation::Vertical,
            length: 256,
            thickness: 20,
            tick_length: 5,
            margin: 4,
            label_scale: 2,
            draw_labels: true,
            background: RGBA8::new(255, 255, 255, 255),
            foreground: RGBA8::new(0, 0, 0, 255),
        }
    }
}

impl LegendLayout {
    pub fn validate(&self) -> Result<()> {
        if self.length < 2 {
            return Err(Error::InvalidConfig(format!(
                "legend length must be at least 2 pixels, got {}",
                self.length)));
        }
        if self.thickness == 0 || self.label_scale == 0 {
            return Err(Error::InvalidConfig(
                "legend thickness and label scale must be positive".into()));
        }
        if self.length > MAX_LENGTH {
            return Err(Error::InvalidConfig(format!(
                "legend length must be at most {MAX_LENGTH} pixels, got {}",
                self.length)));
        }
        let sizes = [("thickness", self.thickness),
                     ("tick length", self.tick_length),
                     ("margin", self.margin)];
        if let Some((what, n)) = sizes.iter().find(|(_, n)| *n > MAX_SIZE) {
            return Err(Error::InvalidConfig(format!(
                "legend {what} must be at most {MAX_SIZE} pixels, got {n}")));
        }
        if self.label_scale > MAX_LABEL_SCALE {
            return Err(Error::InvalidConfig(format!(
                "label scale must be at most {MAX_LABEL_SCALE}, got {}",
                self.label_scale)));
        }
        Ok(())
    }

    /// Check that `tick_count` ticks fit on the ramp.
    pub fn validate_ticks(&self, tick_count: usize) -> Result<()> {
        if tick_count == 0 {
            return Err(Error::InvalidConfig(
                "at least one legend tick is required".into()));
        }
        if tick_count > self.length as usize {
            return Err(Error::InvalidConfig(format!(
                "{tick_count} ticks do not fit on a ramp of {} pixels",
                self.length)));
        }
        Ok(())
    }
}

/// A labeled position on the ramp.
#[derive(Clone, Debug, PartialEq)]
pub struct Tick {
    /// Position in \[0, 1\] along the ramp.
    pub position: f64,
    /// Measurement value at this position.
    pub value: f64,
    pub label: String,
    pub color: RGB8,
}

/// Ticks and image of a color ramp.
#[derive(Clone, Debug)]
pub struct Legend {
    ticks: Vec<Tick>,
    image: RgbaImage,
    /// Top left corner of the ramp in `image`.
    bar: (u32, u32),
    swatch: bool,
    layout: LegendLayout,
}

impl Legend {
    pub fn ticks(&self) -> &[Tick] { &self.ticks }

    pub fn image(&self) -> &RgbaImage { &self.image }

    pub fn into_image(self) -> RgbaImage { self.image }

    /// Whether the legend is a single swatch (degenerate range).
    pub fn is_swatch(&self) -> bool { self.swatch }

    /// Pixel of the image, in the middle of the ramp thickness, showing
    /// position `t` ∈ \[0, 1\].
    pub fn bar_pixel(&self, t: f64) -> (u32, u32) {
        let l = &self.layout;
        let along = (t.clamp(0., 1.) * (l.length - 1) as f64).round() as u32;
        let across = l.thickness / 2;
        match l.orientation {
            Orientation::Vertical =>
                (self.bar.0 + across, self.bar.1 + l.length - 1 - along),
            Orientation::Horizontal =>
                (self.bar.0 + along, self.bar.1 + across),
        }
    }
}

fn rgba(c: RGBA8) -> Rgba<u8> { Rgba([c.r, c.g, c.b, c.a]) }

/// Build the legend of `range` drawn with `lut`.
///
/// `tick_count` ticks are spread evenly over the ramp, both ends
/// included (a single tick sits in the middle).  The ramp samples the
/// LUT exactly as [`colorize`](crate::colorize) does.  A degenerate
/// range gives a single tick and a plain swatch of the middle color.
pub fn render_legend(
    range: &Range,
    lut: &Lut,
    mode: Interpolation,
    tick_count: usize,
    format: LabelFormat,
    layout: &LegendLayout,
) -> Result<Legend> {
    format.validate()?;
    layout.validate()?;
    layout.validate_ticks(tick_count)?;
    let sampler = lut.sampler(mode);
    let swatch = range.is_degenerate();
    let mut ticks: Vec<Tick> = if swatch || tick_count == 1 {
        let value = range.value_at(0.5);
        vec![Tick { position: 0.5, value, label: String::new(),
                    color: sampler.rgb(0.5) }]
    } else {
        sampler.range(range.min(), range.max(), tick_count)
            .map(|(position, value, color)| Tick {
                position, value, label: String::new(), color })
            .collect()
    };
    let values: Vec<f64> = ticks.iter().map(|t| t.value).collect();
    let format = format.resolve(&values);
    for tick in &mut ticks {
        tick.label = format.format(tick.value);
        trace!("tick {} at {}: {}", tick.label, tick.position, tick.value);
    }

    let l = layout;
    let scale = l.label_scale;
    let label_h = if l.draw_labels { FONT_HEIGHT * scale } else { 0 };
    let label_w = if l.draw_labels {
        ticks.iter().map(|t| font::text_width(&t.label, scale)).max()
            .unwrap_or(0)
    } else { 0 };
    let gap = if l.draw_labels { LABEL_GAP } else { 0 };
    let (width, height, bar) = match l.orientation {
        Orientation::Vertical => {
            let pad = l.margin.max(label_h.div_ceil(2));
            (l.margin + l.thickness + l.tick_length + gap + label_w + l.margin,
             pad + l.length + pad,
             (l.margin, pad))
        }
        Orientation::Horizontal => {
            let pad = l.margin.max(label_w.div_ceil(2));
            (pad + l.length + pad,
             l.margin + l.thickness + l.tick_length + gap + label_h + l.margin,
             (pad, l.margin))
        }
    };
    let mut image = RgbaImage::from_pixel(width, height, rgba(l.background));

    // Ramp, one sample per pixel along the long axis.
    let last = (l.length - 1) as f64;
    for k in 0 .. l.length {
        let t = k as f64 / last;
        let c = if swatch { ticks[0].color } else { sampler.rgb(t) };
        let c = Rgba([c.r, c.g, c.b, 255]);
        for across in 0 .. l.thickness {
            let (x, y) = match l.orientation {
                Orientation::Vertical =>
                    (bar.0 + across, bar.1 + l.length - 1 - k),
                Orientation::Horizontal => (bar.0 + k, bar.1 + across),
            };
            image.put_pixel(x, y, c);
        }
    }

    // Tick marks and labels.
    let ink = rgba(l.foreground);
    for tick in &ticks {
        let along = (tick.position * last).round() as u32;
        match l.orientation {
            Orientation::Vertical => {
                let y = bar.1 + l.length - 1 - along;
                for dx in 0 .. l.tick_length {
                    image.put_pixel(bar.0 + l.thickness + dx, y, ink);
                }
                if l.draw_labels {
                    let x = bar.0 + l.thickness + l.tick_length + gap;
                    font::draw_text(&mut image, x as i64,
                                    y as i64 - (label_h / 2) as i64,
                                    &tick.label, ink, scale);
                }
            }
            Orientation::Horizontal => {
                let x = bar.0 + along;
                for dy in 0 .. l.tick_length {
                    image.put_pixel(x, bar.1 + l.thickness + dy, ink);
                }
                if l.draw_labels {
                    let w = font::text_width(&tick.label, scale);
                    font::draw_text(&mut image, x as i64 - (w / 2) as i64,
                                    (bar.1 + l.thickness + l.tick_length + gap)
                                    as i64,
                                    &tick.label, ink, scale);
                }
            }
        }
    }
    debug!("legend {width}x{height} with {} tick(s)", ticks.len());
    Ok(Legend { ticks, image, bar, swatch, layout: *l })
}


#[cfg(test)]
mod tests {
    use super::*;

    fn bwr() -> Lut {
        Lut::new("bwr", vec![RGB8::new(0, 0, 255), RGB8::new(255, 255, 255),
                             RGB8::new(255, 0, 0)]).unwrap()
    }

    fn labels(l: &Legend) -> Vec<&str> {
        l.ticks().iter().map(|t| t.label.as_str()).collect()
    }

    #[test]
    fn three_ticks() {
        let range = Range::new(10., 50.).unwrap();
        let l = render_legend(&range, &bwr(), Interpolation::Continuous, 3,
                              LabelFormat::Auto, &LegendLayout::default())
            .unwrap();
        assert_eq!(labels(&l), ["10", "30", "50"]);
        let pos: Vec<f64> = l.ticks().iter().map(|t| t.position).collect();
        assert_eq!(pos, [0., 0.5, 1.]);
        assert_eq!(l.ticks()[1].color, RGB8::new(255, 255, 255));
        assert!(!l.is_swatch());
    }

    #[test]
    fn ramp_matches_lut() {
        let lut = Lut::named("fire").unwrap();
        let range = Range::new(0., 1.).unwrap();
        for orientation in [Orientation::Vertical, Orientation::Horizontal] {
            for mode in [Interpolation::Discrete, Interpolation::Continuous] {
                let layout = LegendLayout { orientation, length: 101,
                                            ..LegendLayout::default() };
                let l = render_legend(&range, &lut, mode, 5,
                                      LabelFormat::Auto, &layout).unwrap();
                for k in 0 ..= 100 {
                    let t = k as f64 / 100.;
                    let (x, y) = l.bar_pixel(t);
                    let c = lut.sample(t, mode);
                    assert_eq!(*l.image().get_pixel(x, y),
                               Rgba([c.r, c.g, c.b, 255]), "t = {t}");
                }
            }
        }
    }

    #[test]
    fn degenerate_is_swatch() {
        let range = Range::new(5., 5.).unwrap();
        let lut = bwr();
        let l = render_legend(&range, &lut, Interpolation::Continuous, 5,
                              LabelFormat::Auto, &LegendLayout::default())
            .unwrap();
        assert!(l.is_swatch());
        assert_eq!(labels(&l), ["5"]);
        let mid = RGB8::new(255, 255, 255);
        assert_eq!(l.ticks()[0].color, mid);
        for t in [0., 0.3, 1.] {
            let (x, y) = l.bar_pixel(t);
            assert_eq!(*l.image().get_pixel(x, y), Rgba([255, 255, 255, 255]));
        }
    }

    #[test]
    fn single_tick_keeps_gradient() {
        let range = Range::new(0., 10.).unwrap();
        let lut = bwr();
        let l = render_legend(&range, &lut, Interpolation::Continuous, 1,
                              LabelFormat::Auto, &LegendLayout::default())
            .unwrap();
        assert!(!l.is_swatch());
        assert_eq!(labels(&l), ["5"]);
        let (x, y) = l.bar_pixel(0.);
        assert_eq!(*l.image().get_pixel(x, y), Rgba([0, 0, 255, 255]));
    }

    #[test]
    fn zero_ticks() {
        let range = Range::new(0., 1.).unwrap();
        assert!(matches!(
            render_legend(&range, &bwr(), Interpolation::Discrete, 0,
                          LabelFormat::Auto, &LegendLayout::default()),
            Err(Error::InvalidConfig(_))));
    }

    #[test]
    fn oversized_layout() {
        let range = Range::new(0., 1.).unwrap();
        let legend = |layout: LegendLayout, n: usize| render_legend(
            &range, &bwr(), Interpolation::Continuous, n, LabelFormat::Auto,
            &layout);
        let d = LegendLayout::default();
        for layout in [LegendLayout { length: u32::MAX, ..d },
                       LegendLayout { margin: u32::MAX, ..d },
                       LegendLayout { thickness: u32::MAX / 2, ..d },
                       LegendLayout { tick_length: u32::MAX, ..d },
                       LegendLayout { label_scale: u32::MAX, ..d }] {
            assert!(matches!(legend(layout, 5), Err(Error::InvalidConfig(_))),
                    "{layout:?}");
        }
        assert!(matches!(legend(d, 257), Err(Error::InvalidConfig(_))));
        assert!(legend(d, 256).is_ok());
    }

    #[test]
    fn narrow_range_labels_differ() {
        let range = Range::new(1000., 1000.0000001).unwrap();
        let l = render_legend(&range, &bwr(), Interpolation::Continuous, 3,
                              LabelFormat::Auto, &LegendLayout::default())
            .unwrap();
        let labels = labels(&l);
        assert_ne!(labels[0], labels[1]);
        assert_ne!(labels[1], labels[2]);
        assert!(labels.iter().all(|s| s.contains('e')), "{labels:?}");
        // Extra places when a fixed point label can still tell them apart.
        let close = [10000., 10000.000002, 10000.000004];
        assert_eq!(LabelFormat::Auto.resolve(&close), LabelFormat::Decimal(6));
    }

    #[test]
    fn formats() {
        assert_eq!(LabelFormat::Decimal(2).format(3.14159), "3.14");
        assert_eq!(LabelFormat::Decimal(0).format(-0.2), "0");
        assert_eq!(LabelFormat::Decimal(1).format(-0.), "0.0");
        assert_eq!(LabelFormat::Scientific(2).format(12345.), "1.23e4");
        assert_eq!(LabelFormat::Scientific(1).format(-0.), "0.0e0");
        assert_eq!(LabelFormat::Auto.format(2.5), "2.5");
    }

    #[test]
    fn auto_format() {
        let auto = |v: &[f64]| LabelFormat::Auto.resolve(v);
        assert_eq!(auto(&[0., 0.25, 0.5]), LabelFormat::Decimal(2));
        assert_eq!(auto(&[10., 30., 50.]), LabelFormat::Decimal(0));
        assert_eq!(auto(&[0., 5e5]), LabelFormat::Scientific(2));
        assert_eq!(auto(&[1e-5, 2e-5]), LabelFormat::Scientific(2));
        assert_eq!(auto(&[0., 0.]), LabelFormat::Decimal(0));
        assert_eq!(auto(&[0., 1. / 3., 2. / 3.]), LabelFormat::Decimal(2));
    }

    #[test]
    fn layout_sizes() {
        let range = Range::new(0., 100.).unwrap();
        let layout = LegendLayout { draw_labels: false, margin: 3,
                                    ..LegendLayout::default() };
        let l = render_legend(&range, &bwr(), Interpolation::Continuous, 2,
                              LabelFormat::Auto, &layout).unwrap();
        assert_eq!(l.image().dimensions(), (3 + 20 + 5 + 3, 3 + 256 + 3));
        let layout = LegendLayout { orientation: Orientation::Horizontal,
                                    ..layout };
        let l = render_legend(&range, &bwr(), Interpolation::Continuous, 2,
                              LabelFormat::Auto, &layout).unwrap();
        assert_eq!(l.image().dimensions(), (3 + 256 + 3, 3 + 20 + 5 + 3));
        // Bottom of a vertical ramp, left of a horizontal one.
        assert_eq!(l.bar_pixel(0.), (3, 3 + 10));
    }
}
