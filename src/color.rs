use std::collections::BTreeMap;

use eframe::egui::Color32;
use palette::{Hsl, IntoColor, LinSrgb, Mix, Srgb};

// ---------------------------------------------------------------------------
// Color palette generator
// ---------------------------------------------------------------------------

/// Generates `n` visually distinct colours using evenly spaced hues.
pub fn generate_palette(n: usize) -> Vec<Color32> {
    if n == 0 {
        return Vec::new();
    }
    (0..n)
        .map(|i| {
            let hue = (i as f32 / n as f32) * 360.0;
            let hsl = Hsl::new(hue, 0.65, 0.55);
            let rgb: Srgb = hsl.into_color();
            to_color32(rgb)
        })
        .collect()
}

fn to_color32(rgb: Srgb) -> Color32 {
    Color32::from_rgb(
        (rgb.red.clamp(0.0, 1.0) * 255.0) as u8,
        (rgb.green.clamp(0.0, 1.0) * 255.0) as u8,
        (rgb.blue.clamp(0.0, 1.0) * 255.0) as u8,
    )
}

// ---------------------------------------------------------------------------
// Color mapping: position → Color32
// ---------------------------------------------------------------------------

/// Gives every position a stable colour, shared by all charts.
#[derive(Debug, Clone)]
pub struct ColorMap {
    mapping: BTreeMap<String, Color32>,
    default_color: Color32,
}

impl ColorMap {
    /// Build a colour map from the dataset's distinct positions.
    pub fn new(positions: &[String]) -> Self {
        let mapping = positions
            .iter()
            .cloned()
            .zip(generate_palette(positions.len()))
            .collect();

        ColorMap {
            mapping,
            default_color: Color32::GRAY,
        }
    }

    pub fn color_for(&self, position: &str) -> Color32 {
        self.mapping
            .get(position)
            .copied()
            .unwrap_or(self.default_color)
    }
}

// ---------------------------------------------------------------------------
// Continuous scales for heatmaps and table gradients
// ---------------------------------------------------------------------------

/// How a heatmap maps values to colour.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ColorScale {
    /// Light yellow → green → dark blue over `[min, max]` of the data.
    Sequential,
    /// Blue → white → red over `[-1, 1]`, white at zero.
    Diverging,
    /// Light yellow → orange → dark red over `[0, 1]`.
    Heat,
}

impl ColorScale {
    fn stops(self) -> [Srgb; 3] {
        match self {
            ColorScale::Sequential => [
                Srgb::new(1.0, 1.0, 0.85),
                Srgb::new(0.25, 0.71, 0.77),
                Srgb::new(0.03, 0.11, 0.35),
            ],
            ColorScale::Diverging => [
                Srgb::new(0.23, 0.30, 0.75),
                Srgb::new(0.87, 0.87, 0.87),
                Srgb::new(0.71, 0.02, 0.15),
            ],
            ColorScale::Heat => [
                Srgb::new(1.0, 1.0, 0.8),
                Srgb::new(0.99, 0.55, 0.24),
                Srgb::new(0.5, 0.0, 0.15),
            ],
        }
    }

    /// Colour for `t` in `[0, 1]` (clamped). NaN maps to grey.
    pub fn sample(self, t: f64) -> Color32 {
        if t.is_nan() {
            return Color32::GRAY;
        }
        let t = t.clamp(0.0, 1.0) as f32;
        let [low, mid, high]: [LinSrgb; 3] = self.stops().map(|c| c.into_linear());
        let mixed: LinSrgb = if t < 0.5 {
            low.mix(mid, t * 2.0)
        } else {
            mid.mix(high, (t - 0.5) * 2.0)
        };
        to_color32(Srgb::from_linear(mixed))
    }
}

/// Black or white, whichever reads better on `background`.
pub fn contrasting_text(background: Color32) -> Color32 {
    let luma = 0.299 * background.r() as f32
        + 0.587 * background.g() as f32
        + 0.114 * background.b() as f32;
    if luma > 140.0 {
        Color32::BLACK
    } else {
        Color32::WHITE
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn palette_has_distinct_colours() {
        let colours = generate_palette(5);
        assert_eq!(colours.len(), 5);
        for (i, a) in colours.iter().enumerate() {
            for b in &colours[i + 1..] {
                assert_ne!(a, b);
            }
        }
        assert!(generate_palette(0).is_empty());
    }

    #[test]
    fn unknown_position_falls_back_to_grey() {
        let map = ColorMap::new(&["OH".to_string(), "L".to_string()]);
        assert_ne!(map.color_for("OH"), map.color_for("L"));
        assert_eq!(map.color_for("DS"), Color32::GRAY);
    }

    #[test]
    fn scale_endpoints_and_clamping() {
        let scale = ColorScale::Diverging;
        assert_eq!(scale.sample(-3.0), scale.sample(0.0));
        assert_eq!(scale.sample(7.0), scale.sample(1.0));
        assert_ne!(scale.sample(0.0), scale.sample(1.0));
        assert_eq!(scale.sample(f64::NAN), Color32::GRAY);
    }

    #[test]
    fn text_contrast() {
        assert_eq!(contrasting_text(Color32::WHITE), Color32::BLACK);
        assert_eq!(contrasting_text(Color32::from_rgb(8, 29, 88)), Color32::WHITE);
    }
}
