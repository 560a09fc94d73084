use eframe::egui::Color32;
use palette::{Hsl, IntoColor, Srgb};

use crate::data::model::Cohort;

// ---------------------------------------------------------------------------
// Color palette generator
// ---------------------------------------------------------------------------

/// Generates `n` visually distinct colours using evenly spaced hues,
/// starting at `hue_offset` degrees.
pub fn generate_palette(n: usize, hue_offset: f32) -> Vec<Color32> {
    if n == 0 {
        return Vec::new();
    }
    (0..n)
        .map(|i| {
            let hue = (hue_offset + (i as f32 / n as f32) * 360.0) % 360.0;
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
// Plot colours
// ---------------------------------------------------------------------------

/// Colours used consistently across all plots.
#[derive(Debug, Clone, Copy)]
pub struct PlotColors {
    junior: Color32,
    senior: Color32,
    pub bootstrap: Color32,
}

impl Default for PlotColors {
    fn default() -> Self {
        // Three hues: one per cohort, one for the bootstrap distribution.
        let palette = generate_palette(3, 210.0);
        PlotColors {
            junior: palette[0],
            senior: palette[1],
            bootstrap: palette[2],
        }
    }
}

impl PlotColors {
    pub fn cohort(&self, cohort: Cohort) -> Color32 {
        match cohort {
            Cohort::Junior => self.junior,
            Cohort::Senior => self.senior,
        }
    }

    /// Translucent variant for overlapping bars.
    pub fn cohort_fill(&self, cohort: Cohort) -> Color32 {
        let c = self.cohort(cohort);
        Color32::from_rgba_unmultiplied(c.r(), c.g(), c.b(), 110)
    }
}
