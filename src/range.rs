//! The measurement range mapped onto a LUT.

use log::{debug, warn};
use crate::{Error, Result};

/// Closed interval `[min, max]` of measurement values, `min ≤ max`,
/// both finite.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Range {
    min: f64,
    max: f64,
}

impl Range {
    /// Create the range `[min, max]`.  Fails if a bound is not finite
    /// or if `min > max`.
    pub fn new(min: f64, max: f64) -> Result<Self> {
        if !min.is_finite() || !max.is_finite() {
            return Err(Error::InvalidRange(format!(
                "bounds must be finite, got [{min}, {max}]")));
        }
        if min > max {
            return Err(Error::InvalidRange(format!(
                "min {min} is greater than max {max}")));
        }
        Ok(Range { min, max })
    }

    pub fn min(&self) -> f64 { self.min }
    pub fn max(&self) -> f64 { self.max }

    /// Whether all values map to the same color (`min == max`).
    pub fn is_degenerate(&self) -> bool { self.min == self.max }

    /// Map `x` to \[0, 1\].  Values outside the range saturate to the
    /// nearest bound.  A degenerate range maps everything to `0.5`.
    pub fn normalize(&self, x: f64) -> f64 {
        if self.is_degenerate() { return 0.5 }
        let width = self.max - self.min;
        let t = if width.is_finite() { (x - self.min) / width }
                else {
                    // Bounds of opposite signs near `f64::MAX`.
                    (x / 2. - self.min / 2.) / (self.max / 2. - self.min / 2.)
                };
        t.clamp(0., 1.)
    }

    /// Inverse of [`Range::normalize`]: the value at position `t` ∈
    /// \[0, 1\].  The bounds are returned exactly for `t = 0` and
    /// `t = 1`.
    pub fn value_at(&self, t: f64) -> f64 {
        if t <= 0. || self.is_degenerate() { self.min }
        else if t >= 1. { self.max }
        else {
            let x = (1. - t) * self.min + t * self.max;
            if x.is_finite() { x }
            else { self.min + t * (self.max - self.min) }
        }
    }
}

/// Percentile `p` ∈ \[0, 100\] of `sorted` (ascending, non empty).
///
/// The rank `p/100 · (n-1)` is linearly interpolated between the two
/// surrounding order statistics.
pub fn percentile(sorted: &[f64], p: f64) -> f64 {
    let rank = p / 100. * (sorted.len() - 1) as f64;
    let lo = rank.floor() as usize;
    let hi = rank.ceil() as usize;
    if lo == hi {
        sorted[lo]
    } else {
        sorted[lo] + (sorted[hi] - sorted[lo]) * (rank - lo as f64)
    }
}

/// Compute the range used to color `values`.
///
/// Missing (`None`) and non finite values are ignored.  `bounds`, when
/// given, wins over everything else so that several images can share a
/// scale.  Otherwise, `clamp_percentile = Some((low, high))` takes the
/// `low` and `high` percentiles of the data (see [`percentile`]) and
/// `None` the extreme values.
///
/// # Example
///
/// ```
/// use roi_color_coder::compute_range;
/// let r = compute_range([Some(3.), None, Some(-1.), Some(f64::NAN)],
///                       None, None).unwrap();
/// assert_eq!((r.min(), r.max()), (-1., 3.));
/// ```
pub fn compute_range<I>(
    values: I,
    bounds: Option<(f64, f64)>,
    clamp_percentile: Option<(f64, f64)>,
) -> Result<Range>
where I: IntoIterator<Item = Option<f64>> {
    if let Some((low, high)) = clamp_percentile {
        if !(0. ..= 100.).contains(&low) || !(0. ..= 100.).contains(&high)
            || low > high {
            return Err(Error::InvalidRange(format!(
                "percentiles ({low}, {high}) must satisfy \
                 0 <= low <= high <= 100")));
        }
    }
    if let Some((min, max)) = bounds {
        if clamp_percentile.is_some() {
            warn!("range override [{min}, {max}] takes precedence over \
                   percentile clamping");
        }
        return Range::new(min, max);
    }
    let mut finite: Vec<f64> = values.into_iter().flatten()
        .filter(|x| x.is_finite())
        .collect();
    if finite.is_empty() {
        return Err(Error::InvalidRange(
            "no finite measurement and no range override".into()));
    }
    finite.sort_by(f64::total_cmp);
    let range = match clamp_percentile {
        Some((low, high)) => Range::new(percentile(&finite, low),
                                        percentile(&finite, high))?,
        None => Range::new(finite[0], finite[finite.len() - 1])?,
    };
    debug!("range [{}, {}] from {} finite measurement(s)",
           range.min, range.max, finite.len());
    Ok(range)
}


#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn extremes() {
        let v = [Some(4.), Some(-2.5), None, Some(f64::INFINITY), Some(9.)];
        let r = compute_range(v, None, None).unwrap();
        assert_eq!(r.min(), -2.5);
        assert_eq!(r.max(), 9.);
    }

    #[test]
    fn override_wins() {
        let v = [Some(4.), Some(5.)];
        let r = compute_range(v, Some((0., 100.)), Some((10., 90.))).unwrap();
        assert_eq!((r.min(), r.max()), (0., 100.));
        // Even without any data.
        let r = compute_range([None, None], Some((1., 1.)), None).unwrap();
        assert!(r.is_degenerate());
    }

    #[test]
    fn invalid() {
        let v = [Some(1.)];
        assert!(matches!(compute_range(v, Some((2., 1.)), None),
                         Err(Error::InvalidRange(_))));
        assert!(matches!(compute_range(v, Some((f64::NAN, 1.)), None),
                         Err(Error::InvalidRange(_))));
        assert!(matches!(compute_range([None, Some(f64::NAN)], None, None),
                         Err(Error::InvalidRange(_))));
        assert!(matches!(compute_range(v, None, Some((50., 10.))),
                         Err(Error::InvalidRange(_))));
        assert!(matches!(compute_range(v, None, Some((-1., 10.))),
                         Err(Error::InvalidRange(_))));
    }

    #[test]
    fn percentile_interpolates() {
        let v: Vec<f64> = (1 ..= 100).map(|i| i as f64).collect();
        assert_relative_eq!(percentile(&v, 5.), 5.95, epsilon = 1e-12);
        assert_relative_eq!(percentile(&v, 95.), 95.05, epsilon = 1e-12);
        assert_eq!(percentile(&v, 0.), 1.);
        assert_eq!(percentile(&v, 100.), 100.);
        assert_eq!(percentile(&[7.], 30.), 7.);
    }

    #[test]
    fn clamped_range() {
        let v = (1 ..= 100).rev().map(|i| Some(i as f64));
        let r = compute_range(v, None, Some((5., 95.))).unwrap();
        assert_relative_eq!(r.min(), 5.95, epsilon = 1e-12);
        assert_relative_eq!(r.max(), 95.05, epsilon = 1e-12);
        assert_eq!(r.normalize(1.), 0.);
        assert_eq!(r.normalize(100.), 1.);
    }

    #[test]
    fn degenerate() {
        let r = compute_range([Some(5.), Some(5.), Some(5.)], None, None)
            .unwrap();
        assert!(r.is_degenerate());
        assert_eq!(r.normalize(5.), 0.5);
        assert_eq!(r.normalize(-1e300), 0.5);
        assert_eq!(r.value_at(0.3), 5.);
    }

    #[test]
    fn normalize_and_back() {
        let r = Range::new(10., 50.).unwrap();
        assert_eq!(r.normalize(10.), 0.);
        assert_eq!(r.normalize(30.), 0.5);
        assert_eq!(r.normalize(50.), 1.);
        assert_eq!(r.value_at(0.), 10.);
        assert_eq!(r.value_at(0.5), 30.);
        assert_eq!(r.value_at(1.), 50.);
        for i in 0 ..= 20 {
            let t = i as f64 / 20.;
            assert_relative_eq!(r.normalize(r.value_at(t)), t, epsilon = 1e-12);
        }
    }

    #[test]
    fn width_overflows() {
        let v = [Some(-1e308), Some(0.), Some(1e308)];
        let r = compute_range(v, None, None).unwrap();
        assert!((r.max() - r.min()).is_infinite());
        assert_eq!(r.normalize(-1e308), 0.);
        assert_eq!(r.normalize(0.), 0.5);
        assert_eq!(r.normalize(1e308), 1.);
        assert_eq!(r.normalize(f64::MAX), 1.);
        for i in 0 ..= 20 {
            let t = i as f64 / 20.;
            assert_relative_eq!(r.normalize(r.value_at(t)), t, epsilon = 1e-12);
        }
    }
}
