//! Assigning colors to regions and painting them.

use std::collections::HashMap;
use image::{Rgba, RgbaImage};
use log::{debug, trace};
use rgb::RGB8;
use serde::{Deserialize, Serialize};
use crate::{ColorRange, Error, Interpolation, Lut, Measurements, Range,
            Region, Result};

/// What to do with a region that has no (finite) measurement.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NoDataPolicy {
    /// Leave the region unpainted.
    #[default]
    Skip,
    /// Paint the region with this color.
    Color(RGB8),
}

/// Whether a region is painted in full or only along its border.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Fill {
    #[default]
    Fill,
    Outline,
}

/// How regions are painted on the canvas.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Style {
    pub fill: Fill,
    /// Width, in pixels, of the outline drawn inside the region.
    /// Only used with [`Fill::Outline`].
    pub stroke_width: f64,
    /// Opacity in \[0, 1\] of the painted color.
    pub opacity: f64,
}

impl Default for Style {
    fn default() -> Self {
        Style { fill: Fill::Fill, stroke_width: 1., opacity: 1. }
    }
}

impl Style {
    pub fn validate(&self) -> Result<()> {
        if !(self.stroke_width.is_finite() && self.stroke_width > 0.) {
            return Err(Error::InvalidConfig(format!(
                "stroke width must be positive, got {}", self.stroke_width)));
        }
        if !(0. ..= 1.).contains(&self.opacity) {
            return Err(Error::InvalidConfig(format!(
                "opacity must be in [0, 1], got {}", self.opacity)));
        }
        Ok(())
    }
}

/// The color given to each region, in input order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ColorAssignment {
    entries: Vec<(String, RGB8)>,
    index: HashMap<String, usize>,
    unresolved: Vec<String>,
}

impl ColorAssignment {
    fn push(&mut self, id: &str, c: RGB8) {
        self.index.entry(id.to_string()).or_insert(self.entries.len());
        self.entries.push((id.to_string(), c));
    }

    /// Color of region `id`, if it received one.
    pub fn get(&self, id: &str) -> Option<RGB8> {
        self.index.get(id).map(|&i| self.entries[i].1)
    }

    /// `(region id, color)` pairs in input order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, RGB8)> {
        self.entries.iter().map(|(id, c)| (id.as_str(), *c))
    }

    pub fn len(&self) -> usize { self.entries.len() }

    pub fn is_empty(&self) -> bool { self.entries.is_empty() }

    /// Regions without a measurement, whatever the [`NoDataPolicy`].
    pub fn unresolved(&self) -> &[String] { &self.unresolved }
}

/// Map each region's measurement through `range` onto `lut`.
///
/// This is a pure function of its arguments.  Regions without a
/// measurement are handled by `no_data` and listed in
/// [`ColorAssignment::unresolved`]; they never cause an error.
pub fn colorize(
    regions: &[Region],
    measurements: &Measurements,
    range: &Range,
    lut: &Lut,
    mode: Interpolation,
    no_data: NoDataPolicy,
) -> ColorAssignment {
    let sampler = lut.sampler(mode);
    let mut assignment = ColorAssignment::default();
    for region in regions {
        match measurements.get(&region.id) {
            Some(x) => {
                let t = range.normalize(x);
                let c = sampler.rgb(t);
                trace!("region {:?}: {x} -> t = {t} -> {c:?}", region.id);
                assignment.push(&region.id, c);
            }
            None => {
                debug!("region {:?} has no measurement ({:?})",
                       region.id, no_data);
                assignment.unresolved.push(region.id.clone());
                if let NoDataPolicy::Color(c) = no_data {
                    assignment.push(&region.id, c);
                }
            }
        }
    }
    assignment
}

fn blend(dst: &mut Rgba<u8>, c: RGB8, opacity: f64) {
    let mix = |src: u8, dst: u8| {
        (opacity * src as f64 + (1. - opacity) * dst as f64).round() as u8 };
    let Rgba([r, g, b, a]) = *dst;
    *dst = Rgba([mix(c.r, r), mix(c.g, g), mix(c.b, b), mix(255, a)]);
}

/// Paint the regions that have a color in `assignment` onto `canvas`,
/// in the order of `regions` (the last one drawn wins on overlaps).
/// Return the number of pixels written.
pub fn paint(
    canvas: &mut RgbaImage,
    regions: &[Region],
    assignment: &ColorAssignment,
    style: &Style,
) -> usize {
    let (width, height) = canvas.dimensions();
    let stroke = match style.fill {
        Fill::Fill => None,
        Fill::Outline => Some(style.stroke_width),
    };
    let mut painted = 0;
    for region in regions {
        let Some(c) = assignment.get(&region.id) else { continue };
        for (i, j) in region.shape.pixels(stroke, width, height) {
            blend(canvas.get_pixel_mut(i, j), c, style.opacity);
            painted += 1;
        }
    }
    debug!("painted {painted} pixel(s) of {} region(s)", assignment.len());
    painted
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::Shape;

    fn square(id: &str, x: f64) -> Region {
        Region::new(id, Shape::Rectangle { x, y: 0., width: 2., height: 2. })
    }

    fn bwr() -> Lut {
        Lut::new("bwr", vec![RGB8::new(0, 0, 255), RGB8::new(255, 255, 255),
                             RGB8::new(255, 0, 0)]).unwrap()
    }

    #[test]
    fn assigns_and_saturates() {
        let regions = [square("a", 0.), square("b", 2.), square("c", 4.)];
        let m: Measurements = [("a", -100.), ("b", 15.), ("c", 100.)]
            .into_iter().collect();
        let range = Range::new(10., 20.).unwrap();
        let a = colorize(&regions, &m, &range, &bwr(),
                         Interpolation::Continuous, NoDataPolicy::Skip);
        assert_eq!(a.get("a"), Some(RGB8::new(0, 0, 255)));
        assert_eq!(a.get("b"), Some(RGB8::new(255, 255, 255)));
        assert_eq!(a.get("c"), Some(RGB8::new(255, 0, 0)));
        assert!(a.unresolved().is_empty());
    }

    #[test]
    fn no_data() {
        let regions = [square("a", 0.), square("lost", 2.)];
        let m: Measurements = [("a", 1.)].into_iter().collect();
        let range = Range::new(0., 1.).unwrap();
        let gray = RGB8::new(128, 128, 128);
        let a = colorize(&regions, &m, &range, &bwr(),
                         Interpolation::Discrete, NoDataPolicy::Color(gray));
        assert_eq!(a.get("lost"), Some(gray));
        assert_eq!(a.unresolved(), ["lost"]);
        let a = colorize(&regions, &m, &range, &bwr(),
                         Interpolation::Discrete, NoDataPolicy::Skip);
        assert_eq!(a.get("lost"), None);
        assert_eq!(a.len(), 1);
        assert_eq!(a.unresolved(), ["lost"]);
    }

    #[test]
    fn idempotent() {
        let regions: Vec<_> = (0 .. 10)
            .map(|i| square(&format!("r{i}"), 2. * i as f64)).collect();
        let m: Measurements = (0 .. 10)
            .map(|i| (format!("r{i}"), (i * i) as f64)).collect();
        let range = Range::new(0., 81.).unwrap();
        let lut = Lut::named("fire").unwrap();
        for mode in [Interpolation::Discrete, Interpolation::Continuous] {
            let a = colorize(&regions, &m, &range, &lut, mode,
                             NoDataPolicy::Skip);
            let b = colorize(&regions, &m, &range, &lut, mode,
                             NoDataPolicy::Skip);
            assert_eq!(a, b);
        }
    }

    #[test]
    fn paint_last_wins() {
        let regions = [square("a", 0.), square("b", 1.)];
        let m: Measurements = [("a", 0.), ("b", 1.)].into_iter().collect();
        let range = Range::new(0., 1.).unwrap();
        let a = colorize(&regions, &m, &range, &bwr(),
                         Interpolation::Continuous, NoDataPolicy::Skip);
        let mut canvas = RgbaImage::new(4, 2);
        let n = paint(&mut canvas, &regions, &a, &Style::default());
        assert_eq!(n, 8);
        assert_eq!(*canvas.get_pixel(0, 0), Rgba([0, 0, 255, 255]));
        assert_eq!(*canvas.get_pixel(1, 0), Rgba([255, 0, 0, 255]));
        assert_eq!(*canvas.get_pixel(3, 1), Rgba([0, 0, 0, 0]));
    }

    #[test]
    fn paint_opacity() {
        let regions = [square("a", 0.)];
        let m: Measurements = [("a", 1.)].into_iter().collect();
        let range = Range::new(0., 1.).unwrap();
        let a = colorize(&regions, &m, &range, &bwr(),
                         Interpolation::Continuous, NoDataPolicy::Skip);
        let mut canvas = RgbaImage::from_pixel(2, 2, Rgba([0, 0, 255, 255]));
        let style = Style { opacity: 0.5, ..Style::default() };
        paint(&mut canvas, &regions, &a, &style);
        assert_eq!(*canvas.get_pixel(0, 0), Rgba([128, 0, 128, 255]));
    }

    #[test]
    fn style_validation() {
        assert!(Style::default().validate().is_ok());
        let bad = Style { opacity: 1.5, ..Style::default() };
        assert!(matches!(bad.validate(), Err(Error::InvalidConfig(_))));
        let bad = Style { stroke_width: 0., ..Style::default() };
        assert!(bad.validate().is_err());
    }
}
