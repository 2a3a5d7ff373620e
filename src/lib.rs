//! Color-code regions of interest by a measurement.
//!
//! Each region's measurement is mapped through a [`Range`] onto a
//! lookup table ([`Lut`]); the regions are then painted on a canvas
//! and a [`Legend`] showing the same mapping is drawn.
//!
//! - [`compute_range`]: the measurement range, with optional override
//!   and percentile clamping.
//! - [`Lut::sample`]: color of a normalized value.
//! - [`colorize`] and [`paint`]: region colors and painting.
//! - [`render_legend`]: the color ramp with labeled ticks.
//! - [`render`]: all of the above, validated up front.
//!
//! # Example
//!
//! ```
//! use image::RgbaImage;
//! use roi_color_coder::{render, Config, Lut, Measurements, Region, Shape};
//! let regions: Vec<_> = (0 .. 5).map(|i| Region::new(
//!     format!("R{}", i + 1),
//!     Shape::Rectangle { x: 10. * i as f64, y: 0., width: 10., height: 10. }))
//!     .collect();
//! let m: Measurements = (0 .. 5).map(|i| (format!("R{}", i + 1),
//!                                          10. * (i + 1) as f64)).collect();
//! let mut canvas = RgbaImage::new(50, 10);
//! let out = render(&mut canvas, &regions, &m, &Lut::named("fire").unwrap(),
//!                  &Config::default()).unwrap();
//! assert_eq!(out.legend.ticks().len(), Config::default().tick_count);
//! ```

use std::marker::PhantomData;
use image::RgbaImage;
use log::info;

mod error;
mod palettes;
mod font;
pub mod lut;
pub mod range;
pub mod region;
pub mod measurements;
pub mod colorize;
pub mod legend;
pub mod config;

pub use error::{Error, Result};
pub use palettes::ty::PaletteType;
pub use lut::{Interpolation, Lut, Sampler};
pub use range::{compute_range, percentile, Range};
pub use region::{Region, Shape};
pub use measurements::{MeasurementTable, Measurements};
pub use colorize::{colorize, paint, ColorAssignment, Fill, NoDataPolicy, Style};
pub use legend::{render_legend, LabelFormat, Legend, LegendLayout,
                 Orientation, Tick};
pub use config::{Config, RangeSetting};

/// A “continuous” range of colors parametrized by reals in \[0, 1\].
pub trait ColorRange<Color> {
    /// Returns the color corresponding to `t` ∈ \[0., 1.\].
    fn rgb(&self, t: f64) -> Color;

    /// Return an iterator yielding uniform sampling of `n` points
    /// between `a` and `b` (with the bounds `a` and `b` included in
    /// the list of points) together with their position in \[0, 1\]
    /// and colors.  It is not required that `a <= b`.
    fn range(self, mut a: f64, mut b: f64, n: usize) -> Samples<Self, Color>
    where Self: Sized {
        if a == f64::INFINITY { a = f64::MAX; }
        else if a == f64::NEG_INFINITY { a = f64::MIN };
        if b == f64::NEG_INFINITY { b = f64::MIN; }
        else if b == f64::INFINITY { b = f64::MAX };
        // `a` or `b` NaN will give an iterator yielding NaN.
        if n == 0 {
            Samples { range: self,  color: PhantomData,
                      a, b, flast: 0., last: 0,
                      i: 1, j: 0 } // Empty iterator
        } else {
            Samples { range: self,  color: PhantomData,
                      a, b, flast: (n - 1) as f64,
                      last: n - 1, i: 0, j: n - 1 }
        }
    }
}

/// An iterator yielding positions `t` ∈ \[0, 1\], the corresponding
/// `f64` in a given range, and colors.
///
/// Legend ticks are built from it: the position places the tick on
/// the ramp, the value gives its label and the color is the one the
/// ramp shows there.  The end points are exact, so the first and last
/// labels print the range bounds as given.
pub struct Samples<R, Color> {
    range: R,
    color: PhantomData<Color>,
    a: f64, // finite or NaN
    b: f64, // finite or NaN
    flast: f64, // `last` as a floating-point number
    last: usize,
    i: usize, // first position to be consumed (i ≤ j)
    j: usize, // last position to be consumed
}

impl<R, Color> Samples<R, Color> where R: ColorRange<Color> {
    /// Return the position, float and color of the point `k`
    /// (assuming it is in the range `0 ..= self.last`).
    fn rgb(&self, k: usize) -> (f64, f64, Color) {
        if k == 0 {
            (0., self.a, R::rgb(&self.range, 0.))
        } else if k == self.last {
            (1., self.b, R::rgb(&self.range, 1.))
        } else {
            let alpha = (self.last - k) as f64;
            let beta = k as f64;
            let t = beta / self.flast;
            let mut x = (alpha * self.a + beta * self.b) / self.flast;
            if x.is_infinite() {
                x = (1. - t) * self.a + t * self.b;
            }
            (t, x, R::rgb(&self.range, t))
        }
    }
}

impl<R, Color> Iterator for Samples<R, Color>
where R: ColorRange<Color> {
    type Item = (f64, f64, Color);

    fn next(&mut self) -> Option<Self::Item> {
        if self.i <= self.j {
            let item = self.rgb(self.i);
            self.i += 1;
            Some(item)
        } else {
            None
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let len = self.len();
        (len, Some(len))
    }
}

impl<R, Color> ExactSizeIterator for Samples<R, Color>
where R: ColorRange<Color> {
    fn len(&self) -> usize {
        if self.i <= self.j { self.j - self.i + 1 } else { 0 }
    }
}

impl<R, Color> DoubleEndedIterator for Samples<R, Color>
where R: ColorRange<Color> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.i <= self.j {
            let item = self.rgb(self.j);
            if self.j == 0 {
                self.i = 1
            } else {
                self.j -= 1;
            }
            Some(item)
        } else {
            None
        }
    }
}


/// Everything a [`render`] produced besides the painted canvas.
#[derive(Clone, Debug)]
pub struct Rendering {
    /// The range used for both the regions and the legend.
    pub range: Range,
    pub assignment: ColorAssignment,
    pub legend: Legend,
}

/// Color-code `regions` by `measurements` on `canvas` and draw the
/// legend.
///
/// The configuration, the range and the legend are all worked out
/// before the canvas is touched: on error, `canvas` is left as it was.
/// The range is computed from the measurements of `regions` only.
pub fn render(
    canvas: &mut RgbaImage,
    regions: &[Region],
    measurements: &Measurements,
    lut: &Lut,
    config: &Config,
) -> Result<Rendering> {
    config.validate()?;
    let range = compute_range(
        regions.iter().map(|r| measurements.get(&r.id)),
        config.range.bounds(),
        config.clamp_percentile)?;
    let assignment = colorize(regions, measurements, &range, lut,
                              config.mode, config.no_data);
    let legend = render_legend(&range, lut, config.mode, config.tick_count,
                               config.label_format, &config.legend)?;
    let painted = paint(canvas, regions, &assignment, &config.style);
    info!("colored {} of {} region(s) with {:?} over [{}, {}], \
           {painted} pixel(s) painted",
          assignment.len(), regions.len(), lut.name(),
          range.min(), range.max());
    Ok(Rendering { range, assignment, legend })
}
