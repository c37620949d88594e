//! Built-in color maps.

use super::{Color, ColorMap};

/// Named color maps for chart shading.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum Palette {
    /// Blue-White-Red diverging map, the heatmap default.
    #[default]
    Bwr,
    /// Light to dark blue sequential map.
    Blues,
    /// Viridis (perceptually uniform, colorblind-friendly).
    Viridis,
    /// Plasma (perceptually uniform).
    Plasma,
    /// Jet/rainbow (traditional, high contrast).
    Jet,
}

impl Palette {
    /// Get the next palette in cycle.
    pub fn next(self) -> Self {
        match self {
            Self::Bwr => Self::Blues,
            Self::Blues => Self::Viridis,
            Self::Viridis => Self::Plasma,
            Self::Plasma => Self::Jet,
            Self::Jet => Self::Bwr,
        }
    }

    /// Get palette name.
    pub fn name(self) -> &'static str {
        match self {
            Self::Bwr => "Blue-White-Red",
            Self::Blues => "Blues",
            Self::Viridis => "Viridis",
            Self::Plasma => "Plasma",
            Self::Jet => "Jet",
        }
    }

    /// The color stops of this palette.
    pub fn colors(self) -> Vec<Color> {
        match self {
            Self::Bwr => vec![
                Color::rgb(0, 0, 255),
                Color::rgb(255, 255, 255),
                Color::rgb(255, 0, 0),
            ],
            Self::Blues => vec![
                Color::rgb(247, 251, 255),
                Color::rgb(107, 174, 214),
                Color::rgb(8, 48, 107),
            ],
            // Simplified viridis, three anchors
            Self::Viridis => vec![
                Color::rgb(68, 1, 84),
                Color::rgb(33, 104, 109),
                Color::rgb(253, 231, 37),
            ],
            Self::Plasma => vec![
                Color::rgb(13, 8, 135),
                Color::rgb(180, 54, 121),
                Color::rgb(240, 175, 12),
            ],
            // HSV hue sweep from 240° (blue) down to 0° (red)
            Self::Jet => vec![
                Color::rgb(0, 0, 255),
                Color::rgb(0, 255, 255),
                Color::rgb(0, 255, 0),
                Color::rgb(255, 255, 0),
                Color::rgb(255, 0, 0),
            ],
        }
    }

    /// Build the color map.
    pub fn colormap(self) -> ColorMap {
        ColorMap::spaced(self.colors())
    }
}

impl ColorMap {
    /// Negative/neutral/positive map used by volcano plots: `#3366cc`, `#cccccc`, `#e62e00`.
    pub fn volcano() -> Self {
        Self::spaced(vec![
            Color::rgb(0x33, 0x66, 0xcc),
            Color::rgb(0xcc, 0xcc, 0xcc),
            Color::rgb(0xe6, 0x2e, 0x00),
        ])
    }
}

impl Default for ColorMap {
    fn default() -> Self {
        Palette::default().colormap()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cycle_visits_every_palette() {
        let mut p = Palette::Bwr;
        let mut seen = vec![p];
        for _ in 0..4 {
            p = p.next();
            seen.push(p);
        }
        assert_eq!(p.next(), Palette::Bwr);
        seen.dedup();
        assert_eq!(seen.len(), 5);
    }

    #[test]
    fn palettes_span_their_end_colors() {
        for p in [Palette::Bwr, Palette::Blues, Palette::Viridis, Palette::Plasma, Palette::Jet] {
            let colors = p.colors();
            let cmap = p.colormap();
            assert_eq!(cmap.get(0.0), colors[0]);
            assert_eq!(cmap.get(1.0), *colors.last().unwrap());
        }
    }

    #[test]
    fn default_map_is_blue_white_red() {
        assert_eq!(ColorMap::default().get(0.5), Color::WHITE);
    }
}
