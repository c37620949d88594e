//! Axis: domain to pixel-range mapping and "nice" tick generation.
//!
//! An [`Axis`] is an immutable value. Every `with_*` method returns a new
//! copy, so the same axis can be shared between renders without aliasing.
//!
//! The tick interval follows the classic "nice numbers" approach
//! (<https://stackoverflow.com/questions/237220/tickmark-algorithm-for-a-graph-axis>).

use crate::error::{PlotError, Result};
use crate::format::format_tick;

/// Data-space or pixel-space interval `(start, end)`.
pub type Lim = (f64, f64);

/// Upper bound on generated ticks, guards against pathological intervals.
pub const MAX_TICKS: usize = 10_000;

/// Direction an axis maps its domain onto the pixel range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Orientation {
    /// Horizontal: `range.0` is the domain start.
    #[default]
    X,
    /// Vertical: pixel y grows downward, so `range.1` is the domain start.
    Y,
}

/// Reject empty, reversed or non-finite spans.
fn checked_span(lim: Lim) -> Result<f64> {
    let span = lim.1 - lim.0;
    if !span.is_finite() || span <= 0.0 {
        return Err(PlotError::DegenerateDomain {
            min: lim.0,
            max: lim.1,
        });
    }
    Ok(span)
}

fn resolve_interval(lim: Lim, interval: Option<f64>) -> Result<f64> {
    match interval {
        Some(i) if i.is_finite() && i > 0.0 => Ok(i),
        Some(i) => Err(PlotError::InvalidInterval(i)),
        None => calculate_interval(lim),
    }
}

/// Calculates a reasonable tick interval for a data axis.
///
/// Returns a spacing that splits the domain into between 5 and 10 intervals.
/// The tiers are `x`, `x / 2` and `x / 5` for the power of ten `x` below the
/// range, falling back to `x / 4` when `range / x` is in `(2, 2.5)`.
/// A degenerate domain is rejected.
pub fn calculate_interval(lim: Lim) -> Result<f64> {
    let range = checked_span(lim)?;

    let x = 10f64.powf(range.log10().floor());

    if range / x >= 5.0 {
        Ok(x)
    } else if range / (0.5 * x) >= 5.0 {
        Ok(0.5 * x)
    } else if range / (0.2 * x) <= 10.0 {
        Ok(0.2 * x)
    } else {
        // x / 5 would give up to 12.5 intervals when range / x is in (2, 2.5)
        Ok(0.25 * x)
    }
}

/// Snap a limit outward to multiples of the interval, e.g. `[0.23, 4.1]`
/// becomes `[0, 5]`.
pub fn auto_lim(lim: Lim, interval: Option<f64>) -> Result<Lim> {
    let interval = resolve_interval(lim, interval)?;

    Ok((
        (lim.0 / interval).floor() * interval,
        (lim.1 / interval).ceil() * interval,
    ))
}

/// Ticks from `lim.0` in steps of `interval` while still within `lim.1`.
///
/// The first tick is always `lim.0`; the last may fall short of `lim.1`.
pub fn make_ticks(lim: Lim, interval: Option<f64>) -> Result<Vec<f64>> {
    let interval = resolve_interval(lim, interval)?;

    let span = lim.1 - lim.0;
    if span > 0.0 && span / interval >= MAX_TICKS as f64 {
        return Err(PlotError::TooManyTicks {
            count: (span / interval) as usize + 1,
            limit: MAX_TICKS,
        });
    }

    let mut ticks = vec![lim.0];

    // multiply rather than accumulate so error does not build up
    for i in 1.. {
        let tick = lim.0 + i as f64 * interval;
        if tick > lim.1 {
            break;
        }
        // steps below the ulp of a large offset round onto the previous tick
        if ticks.last().is_some_and(|&last| tick <= last) {
            continue;
        }
        ticks.push(tick);
    }

    Ok(ticks)
}

/// Maps a numeric domain onto a pixel range.
#[derive(Debug, Clone, PartialEq)]
pub struct Axis {
    orientation: Orientation,
    domain: Lim,
    range: Lim,
    ticks: Vec<f64>,
    tick_labels: Vec<String>,
    clip: bool,
    title: String,
}

impl Default for Axis {
    fn default() -> Self {
        Self::new(Orientation::X)
    }
}

impl Axis {
    /// Create an axis with domain `[0, 100]` mapped onto `[0, 500]`.
    pub fn new(orientation: Orientation) -> Self {
        Self {
            orientation,
            domain: (0.0, 100.0),
            range: (0.0, 500.0),
            ticks: vec![0.0, 100.0],
            tick_labels: vec!["0".to_string(), "100".to_string()],
            clip: true,
            title: String::new(),
        }
    }

    /// Horizontal axis.
    pub fn x() -> Self {
        Self::new(Orientation::X)
    }

    /// Vertical (flipped) axis.
    pub fn y() -> Self {
        Self::new(Orientation::Y)
    }

    /// Copy with a new title.
    pub fn with_title(&self, title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..self.clone()
        }
    }

    /// Copy with clipping switched on or off.
    pub fn with_clip(&self, clip: bool) -> Self {
        Self {
            clip,
            ..self.clone()
        }
    }

    /// Copy with a new data-space domain; ticks are regenerated.
    pub fn with_domain(&self, lim: Lim, interval: Option<f64>) -> Result<Self> {
        checked_span(lim)?;

        let a = Self {
            domain: lim,
            ..self.clone()
        };

        Ok(a.with_ticks(make_ticks(lim, interval)?))
    }

    /// Like [`Axis::with_domain`] but the limit is first snapped outward to
    /// multiples of the interval.
    pub fn auto_domain(&self, lim: Lim, interval: Option<f64>) -> Result<Self> {
        let interval = resolve_interval(lim, interval)?;

        self.with_domain(auto_lim(lim, Some(interval))?, Some(interval))
    }

    /// Copy with a new pixel range.
    pub fn with_range(&self, lim: Lim) -> Self {
        Self {
            range: lim,
            ..self.clone()
        }
    }

    /// Copy with explicit ticks; labels are regenerated from the values.
    pub fn with_ticks(&self, ticks: Vec<f64>) -> Self {
        let tick_labels = ticks.iter().map(|&t| format_tick(t)).collect();

        Self {
            ticks,
            tick_labels,
            ..self.clone()
        }
    }

    /// Copy with explicit tick labels, one per tick.
    pub fn with_tick_labels<S: Into<String>>(
        &self,
        labels: impl IntoIterator<Item = S>,
    ) -> Result<Self> {
        let tick_labels: Vec<String> = labels.into_iter().map(Into::into).collect();

        if tick_labels.len() != self.ticks.len() {
            return Err(PlotError::shape_mismatch(
                "tick labels",
                self.ticks.len(),
                tick_labels.len(),
            ));
        }

        Ok(Self {
            tick_labels,
            ..self.clone()
        })
    }

    /// Orientation of the axis.
    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    /// Limits in data space.
    pub fn domain(&self) -> Lim {
        self.domain
    }

    /// Limits in pixel space.
    pub fn range(&self) -> Lim {
        self.range
    }

    /// Tick positions in data space.
    pub fn ticks(&self) -> &[f64] {
        &self.ticks
    }

    /// Tick labels, parallel to [`Axis::ticks`].
    pub fn tick_labels(&self) -> &[String] {
        &self.tick_labels
    }

    /// Whether normalised values are clamped to `[0, 1]`.
    pub fn clip(&self) -> bool {
        self.clip
    }

    /// Axis title.
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Pixel length of the range.
    pub fn range_span(&self) -> f64 {
        self.range.1 - self.range.0
    }

    /// Normalise a data value to `[0, 1]` over the domain.
    pub fn norm(&self, x: f64) -> f64 {
        let s = (x - self.domain.0) / (self.domain.1 - self.domain.0);

        if self.clip {
            s.clamp(0.0, 1.0)
        } else {
            s
        }
    }

    /// Convert a data value to its pixel coordinate.
    pub fn domain_to_range(&self, x: f64) -> f64 {
        match self.orientation {
            Orientation::X => self.range.0 + self.norm(x) * self.range_span(),
            Orientation::Y => self.range.1 - self.norm(x) * self.range_span(),
        }
    }

    /// Inverse of [`Axis::domain_to_range`] (ignoring clipping).
    pub fn range_to_domain(&self, px: f64) -> f64 {
        let s = match self.orientation {
            Orientation::X => (px - self.range.0) / self.range_span(),
            Orientation::Y => (self.range.1 - px) / self.range_span(),
        };

        self.domain.0 + s * (self.domain.1 - self.domain.0)
    }
}
