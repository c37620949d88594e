//! Ordered color stops with linear interpolation.

use super::Color;
use crate::error::{PlotError, Result};

/// A color scale over `[0, 1]`.
///
/// Lookups are pure: the same `t` always yields the same color, and values
/// outside `[0, 1]` are clamped to the end stops rather than extrapolated.
#[derive(Debug, Clone, PartialEq)]
pub struct ColorMap {
    stops: Vec<(f64, Color)>,
}

impl ColorMap {
    /// Equally spaced stops over `[0, 1]`.
    pub fn new(colors: Vec<Color>) -> Result<Self> {
        if colors.len() < 2 {
            return Err(PlotError::TooFewStops(colors.len()));
        }

        Ok(Self::spaced(colors))
    }

    /// Equally spaced stops; callers guarantee at least two colors.
    pub(super) fn spaced(colors: Vec<Color>) -> Self {
        let last = (colors.len() - 1) as f64;
        let stops = colors
            .into_iter()
            .enumerate()
            .map(|(i, c)| (i as f64 / last, c))
            .collect();

        Self { stops }
    }

    /// Stops at explicit positions, which must strictly increase within `[0, 1]`.
    pub fn with_positions(stops: Vec<(f64, Color)>) -> Result<Self> {
        if stops.len() < 2 {
            return Err(PlotError::TooFewStops(stops.len()));
        }

        let in_unit = stops.iter().all(|(p, _)| (0.0..=1.0).contains(p));
        let increasing = stops.windows(2).all(|w| w[1].0 > w[0].0);

        if !in_unit || !increasing {
            return Err(PlotError::InvalidStops(
                stops.iter().map(|(p, _)| *p).collect(),
            ));
        }

        Ok(Self { stops })
    }

    /// Equally spaced stops from hex literals.
    pub fn from_hex(colors: &[&str]) -> Result<Self> {
        let colors = colors
            .iter()
            .map(|c| Color::from_hex(c))
            .collect::<Result<Vec<_>>>()?;

        Self::new(colors)
    }

    /// The stops as `(position, color)` pairs.
    pub fn stops(&self) -> &[(f64, Color)] {
        &self.stops
    }

    /// Interpolated color for `t`; NaN maps to the first stop.
    pub fn get(&self, t: f64) -> Color {
        let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };

        let (first_pos, first) = self.stops[0];
        let (last_pos, last) = self.stops[self.stops.len() - 1];

        if t <= first_pos {
            return first;
        }
        if t >= last_pos {
            return last;
        }

        // first stop strictly above t; never 0 or len here
        let upper = self.stops.partition_point(|(p, _)| *p <= t);
        let (p0, c0) = self.stops[upper - 1];
        let (p1, c1) = self.stops[upper];

        c0.lerp(c1, (t - p0) / (p1 - p0))
    }
}
