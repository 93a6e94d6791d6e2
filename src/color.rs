use std::collections::BTreeMap;

use eframe::egui::Color32;
use palette::{Hsl, IntoColor, Srgb};

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
            let hsl = Hsl::new(hue, 0.75, 0.55);
            let rgb: Srgb = hsl.into_color();
            Color32::from_rgb(
                (rgb.red * 255.0) as u8,
                (rgb.green * 255.0) as u8,
                (rgb.blue * 255.0) as u8,
            )
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Color mapping: language → Color32
// ---------------------------------------------------------------------------

/// Maps scatter-series languages to distinct colours; the unknown-language
/// group falls back to grey.
#[derive(Debug, Clone)]
pub struct LanguageColors {
    mapping: BTreeMap<String, Color32>,
    default_color: Color32,
}

impl LanguageColors {
    /// Build a colour map from the dataset's sorted language list.
    pub fn new(languages: &[String]) -> Self {
        let palette = generate_palette(languages.len());
        let mapping: BTreeMap<String, Color32> =
            languages.iter().cloned().zip(palette.into_iter()).collect();

        LanguageColors {
            mapping,
            default_color: Color32::GRAY,
        }
    }

    /// Look up the colour for a language label.
    pub fn color_for(&self, language: &str) -> Color32 {
        self.mapping
            .get(language)
            .copied()
            .unwrap_or(self.default_color)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn palette_has_distinct_colors() {
        let palette = generate_palette(6);
        assert_eq!(palette.len(), 6);
        for (i, a) in palette.iter().enumerate() {
            for b in palette.iter().skip(i + 1) {
                assert_ne!(a, b);
            }
        }
    }

    #[test]
    fn unknown_language_gets_the_default() {
        let colors = LanguageColors::new(&["de".to_string(), "en".to_string()]);
        assert_ne!(colors.color_for("de"), colors.color_for("en"));
        assert_eq!(colors.color_for("zz"), Color32::GRAY);
    }
}
