//! Visual theme configuration.

use sketchflow_core::Theme;

#[derive(Debug, Clone, Copy)]
pub struct ThemeConfig {
    pub stroke_width: f64,
    /// Maximum random perturbation applied to sketchy geometry. Zero turns
    /// off sketchy paths entirely and the renderers fall back to native
    /// primitives.
    pub jitter_amount: f64,
    pub fill_opacity: f64,
    pub font_family: &'static str,
    /// Second, thinner, semi-transparent pass over each sketchy stroke.
    pub double_stroke: bool,
    pub corner_radius: f64,
}

const HAND_DRAWN: ThemeConfig = ThemeConfig {
    stroke_width: 1.5,
    jitter_amount: 2.0,
    fill_opacity: 0.15,
    font_family: "'Segoe Print', 'Comic Sans MS', cursive",
    double_stroke: true,
    corner_radius: 0.0,
};

const CLEAN: ThemeConfig = ThemeConfig {
    stroke_width: 1.5,
    jitter_amount: 0.0,
    fill_opacity: 0.1,
    font_family: "Inter, Helvetica, Arial, sans-serif",
    double_stroke: false,
    corner_radius: 3.0,
};

const MINIMAL: ThemeConfig = ThemeConfig {
    stroke_width: 1.0,
    jitter_amount: 0.0,
    fill_opacity: 0.05,
    font_family: "Inter, Helvetica, Arial, sans-serif",
    double_stroke: false,
    corner_radius: 3.0,
};

impl ThemeConfig {
    pub fn of(theme: Theme) -> &'static ThemeConfig {
        match theme {
            Theme::HandDrawn => &HAND_DRAWN,
            Theme::Clean => &CLEAN,
            Theme::Minimal => &MINIMAL,
        }
    }

    pub fn sketchy(&self) -> bool {
        self.jitter_amount > 0.0
    }
}
