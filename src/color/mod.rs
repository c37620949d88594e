//! Colors and color scales.
//!
//! [`ColorMap`] interpolates a normalized scalar over ordered color stops,
//! [`Palette`] names the built-in maps.

mod colormap;
mod palette;
mod rgba;

pub use colormap::ColorMap;
pub use palette::Palette;
pub use rgba::Color;
