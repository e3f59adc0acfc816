//! Sequential color scales for choropleth fills.
//!
//! Values are split into equal-width bins between the observed minimum and
//! maximum, and each bin takes one color from a `ColorBrewer` sequential
//! ramp.

use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};

/// `ColorBrewer` sequential palettes (9-class ramps, light to dark).
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
pub enum Palette {
    /// Yellow, orange, red.
    YlOrRd,
    /// Yellow, green, blue.
    YlGnBu,
    /// Blue, purple.
    BuPu,
    /// Orange, red.
    OrRd,
    /// Reds.
    Reds,
    /// Blues.
    Blues,
}

impl Palette {
    /// The full 9-class ramp.
    #[must_use]
    pub const fn ramp(self) -> &'static [&'static str; 9] {
        match self {
            Self::YlOrRd => &[
                "#ffffcc", "#ffeda0", "#fed976", "#feb24c", "#fd8d3c", "#fc4e2a", "#e31a1c",
                "#bd0026", "#800026",
            ],
            Self::YlGnBu => &[
                "#ffffd9", "#edf8b1", "#c7e9b4", "#7fcdbb", "#41b6c4", "#1d91c0", "#225ea8",
                "#253494", "#081d58",
            ],
            Self::BuPu => &[
                "#f7fcfd", "#e0ecf4", "#bfd3e6", "#9ebcda", "#8c96c6", "#8c6bb1", "#88419d",
                "#810f7c", "#4d004b",
            ],
            Self::OrRd => &[
                "#fff7ec", "#fee8c8", "#fdd49e", "#fdbb84", "#fc8d59", "#ef6548", "#d7301f",
                "#b30000", "#7f0000",
            ],
            Self::Reds => &[
                "#fff5f0", "#fee0d2", "#fcbba1", "#fc9272", "#fb6a4a", "#ef3b2c", "#cb181d",
                "#a50f15", "#67000d",
            ],
            Self::Blues => &[
                "#f7fbff", "#deebf7", "#c6dbef", "#9ecae1", "#6baed6", "#4292c6", "#2171b5",
                "#08519c", "#08306b",
            ],
        }
    }

    /// Picks `n` colors spread evenly along the ramp, always including
    /// both ends. `n` is clamped to `1..=9`.
    #[must_use]
    pub fn colors(self, n: usize) -> Vec<&'static str> {
        let ramp = self.ramp();
        let n = n.clamp(1, ramp.len());
        if n == 1 {
            return vec![ramp[ramp.len() - 1]];
        }
        let last = ramp.len() - 1;
        (0..n)
            .map(|i| {
                // Round to the nearest ramp index.
                let idx = (i * last + (n - 1) / 2) / (n - 1);
                ramp[idx]
            })
            .collect()
    }
}

/// A binned linear color scale over a value domain.
#[derive(Debug, Clone, PartialEq)]
pub struct ColorScale {
    thresholds: Vec<f64>,
    colors: Vec<&'static str>,
}

impl ColorScale {
    /// Builds a scale with `bins` equal-width bins covering `values`.
    ///
    /// Non-finite values are ignored. Returns `None` if no finite value
    /// remains.
    #[must_use]
    pub fn from_values<I>(values: I, palette: Palette, bins: usize) -> Option<Self>
    where
        I: IntoIterator<Item = f64>,
    {
        let (min, max) = values
            .into_iter()
            .filter(|v| v.is_finite())
            .fold(None, |acc: Option<(f64, f64)>, v| {
                Some(acc.map_or((v, v), |(lo, hi)| (lo.min(v), hi.max(v))))
            })?;

        let colors = palette.colors(bins);
        let bins = colors.len();

        #[allow(clippy::cast_precision_loss)]
        let mut thresholds: Vec<f64> = (0..=bins)
            .map(|i| min + (max - min) * (i as f64) / (bins as f64))
            .collect();
        thresholds[bins] = max;

        Some(Self { thresholds, colors })
    }

    /// Bin edges, `bins + 1` ascending values from min to max.
    #[must_use]
    pub fn thresholds(&self) -> &[f64] {
        &self.thresholds
    }

    /// One color per bin.
    #[must_use]
    pub fn colors(&self) -> &[&'static str] {
        &self.colors
    }

    /// Domain minimum.
    #[must_use]
    pub fn min(&self) -> f64 {
        self.thresholds[0]
    }

    /// Domain maximum.
    #[must_use]
    pub fn max(&self) -> f64 {
        self.thresholds[self.thresholds.len() - 1]
    }

    /// Returns the bin index of `value`, clamped to the domain.
    ///
    /// When every value in the domain is equal, everything falls in the
    /// top bin.
    #[must_use]
    pub fn bin(&self, value: f64) -> usize {
        let bins = self.colors.len();
        let span = self.max() - self.min();
        if span <= 0.0 {
            return bins - 1;
        }
        let position = ((value - self.min()) / span).clamp(0.0, 1.0);
        #[allow(
            clippy::cast_possible_truncation,
            clippy::cast_sign_loss,
            clippy::cast_precision_loss
        )]
        let idx = (position * bins as f64).floor() as usize;
        idx.min(bins - 1)
    }

    /// Returns the fill color for `value`.
    #[must_use]
    pub fn color(&self, value: f64) -> &'static str {
        self.colors[self.bin(value)]
    }
}
