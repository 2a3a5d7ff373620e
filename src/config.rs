//! Configuration of a color coding run.
//!
//! Every field has a default, so a configuration file only needs the
//! options it changes:
//!
//! ```
//! use roi_color_coder::{Config, Fill, Interpolation};
//! let c = Config::from_json(r#"{
//!     "lut": "viridis",
//!     "range": { "override": { "min": 0, "max": 255 } },
//!     "mode": "discrete",
//!     "fill": "outline",
//!     "stroke_width": 2
//! }"#).unwrap();
//! assert_eq!(c.range.bounds(), Some((0., 255.)));
//! assert_eq!(c.mode, Interpolation::Discrete);
//! assert_eq!(c.style.fill, Fill::Outline);
//! ```

use serde::{Deserialize, Serialize};
use crate::{Interpolation, LabelFormat, LegendLayout, Lut, NoDataPolicy,
            Result, Style};

/// Where the bounds of the range come from.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RangeSetting {
    /// From the data (see [`compute_range`](crate::compute_range)).
    #[default]
    Auto,
    /// Fixed bounds, e.g. to share a scale between images.
    Override { min: f64, max: f64 },
}

impl RangeSetting {
    pub fn bounds(&self) -> Option<(f64, f64)> {
        match *self {
            RangeSetting::Auto => None,
            RangeSetting::Override { min, max } => Some((min, max)),
        }
    }
}

fn default_lut() -> String { "fire".to_string() }

fn default_tick_count() -> usize { 5 }

/// All the options of [`render`](crate::render).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Catalog name of the LUT, see [`Lut::named`].
    #[serde(default = "default_lut")]
    pub lut: String,
    /// Use the LUT last color first.
    pub reverse_lut: bool,
    pub range: RangeSetting,
    /// `(low, high)` percentiles bounding the range.
    pub clamp_percentile: Option<(f64, f64)>,
    pub mode: Interpolation,
    pub no_data: NoDataPolicy,
    #[serde(flatten)]
    pub style: Style,
    /// Number of labeled ticks on the legend.
    #[serde(default = "default_tick_count")]
    pub tick_count: usize,
    pub label_format: LabelFormat,
    pub legend: LegendLayout,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            lut: default_lut(),
            reverse_lut: false,
            range: RangeSetting::Auto,
            clamp_percentile: None,
            mode: Interpolation::default(),
            no_data: NoDataPolicy::default(),
            style: Style::default(),
            tick_count: default_tick_count(),
            label_format: LabelFormat::default(),
            legend: LegendLayout::default(),
        }
    }
}

impl Config {
    /// Parse a JSON configuration.
    pub fn from_json(s: &str) -> Result<Self> {
        Ok(serde_json::from_str(s)?)
    }

    /// Serialize to pretty printed JSON.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// The LUT selected by [`Config::lut`] and [`Config::reverse_lut`].
    pub fn lut(&self) -> Result<Lut> {
        let lut = Lut::named(&self.lut)?;
        Ok(if self.reverse_lut { lut.reversed() } else { lut })
    }

    /// Check the values that are not checked when the range is
    /// computed.
    pub fn validate(&self) -> Result<()> {
        self.style.validate()?;
        self.label_format.validate()?;
        self.legend.validate()?;
        self.legend.validate_ticks(self.tick_count)
    }
}
